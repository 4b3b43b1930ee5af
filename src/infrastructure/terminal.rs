//! In-memory nodes for the terminal host.
//!
//! The terminal has no layout engine: a node keeps whatever the step tree told it
//! and the outline renderer turns that into text.

use tracing::trace;

use crate::domain::{NodeFactory, NodeHandle, Placement};

#[derive(Debug, Clone)]
pub struct TerminalFactory {
    canvas: String,
    created: usize,
}

impl TerminalFactory {
    pub fn new(canvas: impl Into<String>) -> Self {
        Self {
            canvas: canvas.into(),
            created: 0,
        }
    }

    pub fn canvas(&self) -> &str {
        &self.canvas
    }

    /// Nodes created over the factory's lifetime, released ones included.
    pub fn created(&self) -> usize {
        self.created
    }
}

impl NodeFactory for TerminalFactory {
    type Handle = TerminalNode;

    fn create_node(&mut self) -> TerminalNode {
        let serial = self.created;
        self.created += 1;
        trace!(canvas = %self.canvas, serial, "terminal node created");
        TerminalNode {
            serial,
            title: String::new(),
            visible: false,
            placement: Placement::Root,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalNode {
    serial: usize,
    title: String,
    visible: bool,
    placement: Placement,
}

impl TerminalNode {
    pub fn serial(&self) -> usize {
        self.serial
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }
}

impl NodeHandle for TerminalNode {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn place(&mut self, placement: Placement) {
        self.placement = placement;
    }

    fn release(self) {
        trace!(serial = self.serial, title = %self.title, "terminal node released");
    }
}
