//! Step-indexed tree builder with linear playback.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::error::{StepResult, StepTreeError};
use crate::domain::frame::FrameArena;
use crate::domain::node::{NodeFactory, NodeHandle, NodeId, Placement};

/// Append-ordered nodes, the parent-stack they were built along, and a cursor
/// marking how far playback has revealed them.
///
/// Nodes `0..=cursor` are visible, everything after the cursor is hidden.
/// Adding nodes is only possible in the fully revealed state.
pub struct StepTree<F: NodeFactory> {
    factory: F,
    nodes: Vec<F::Handle>,
    frames: FrameArena,
    current: Option<Index>,
    cursor: Option<usize>,
}

impl<F: NodeFactory> StepTree<F> {
    pub fn new(factory: F) -> Self {
        Self {
            factory,
            nodes: Vec::new(),
            frames: FrameArena::new(),
            current: None,
            cursor: None,
        }
    }

    /// Create a node below the current branch and descend into it.
    ///
    /// The first child of a frame is centered below it, later children line up
    /// to the right of the previous one. Without an open frame the node is a root.
    #[instrument(level = "debug", skip(self))]
    pub fn add_node(&mut self, title: &str) -> StepResult<NodeId> {
        if !self.is_fully_revealed() {
            return Err(StepTreeError::Rewound {
                cursor: self.cursor,
                len: self.nodes.len(),
            });
        }

        let id = self.nodes.len();
        let placement = match self.current {
            Some(idx) => {
                let frame = self
                    .frames
                    .get_frame_mut(idx)
                    .ok_or(StepTreeError::StaleFrame(idx))?;
                let placement = match frame.right_edge() {
                    Some(after) => Placement::RightOf {
                        parent: frame.node,
                        after,
                    },
                    None => Placement::CenteredBelow { parent: frame.node },
                };
                frame.extend_right(id);
                placement
            }
            None => Placement::Root,
        };

        let mut handle = self.factory.create_node();
        handle.set_title(title);
        handle.place(placement);
        handle.set_visible(true);
        self.nodes.push(handle);
        self.cursor = Some(id);

        self.current = Some(self.frames.insert_frame(id, placement, self.current));
        debug!(id, %placement, depth = self.depth(), "node added");
        Ok(id)
    }

    /// Close the current frame; the next node attaches to its parent again.
    #[instrument(level = "debug", skip(self))]
    pub fn end(&mut self) -> StepResult<NodeId> {
        let idx = self.current.ok_or(StepTreeError::NoOpenNode)?;
        let frame = self
            .frames
            .get_frame(idx)
            .ok_or(StepTreeError::StaleFrame(idx))?;
        self.current = frame.parent;
        trace!(node = frame.node, "frame closed");
        Ok(frame.node)
    }

    /// Reveal the next node. Returns the revealed node, None at the end.
    #[instrument(level = "trace", skip(self))]
    pub fn next_step(&mut self) -> Option<NodeId> {
        let next = self.cursor.map_or(0, |c| c + 1);
        let node = self.nodes.get_mut(next)?;
        node.set_visible(true);
        self.cursor = Some(next);
        Some(next)
    }

    /// Hide the last revealed node. Returns the hidden node, None at the start.
    #[instrument(level = "trace", skip(self))]
    pub fn prev_step(&mut self) -> Option<NodeId> {
        let current = self.cursor?;
        if let Some(node) = self.nodes.get_mut(current) {
            node.set_visible(false);
        }
        self.cursor = current.checked_sub(1);
        Some(current)
    }

    /// Hide every node and move the cursor before the first one.
    #[instrument(level = "debug", skip(self))]
    pub fn hide_nodes(&mut self) {
        for node in &mut self.nodes {
            node.set_visible(false);
        }
        self.cursor = None;
    }

    /// Show every node and move the cursor onto the last one.
    #[instrument(level = "debug", skip(self))]
    pub fn view_nodes(&mut self) {
        for node in &mut self.nodes {
            node.set_visible(true);
        }
        self.cursor = self.nodes.len().checked_sub(1);
    }

    /// Release every node and reset to the empty state.
    #[instrument(level = "debug", skip(self))]
    pub fn destroy_nodes(&mut self) {
        let released = self.nodes.len();
        for node in self.nodes.drain(..) {
            node.release();
        }
        self.frames.clear();
        self.current = None;
        self.cursor = None;
        debug!(released, "nodes destroyed");
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Last revealed node, None before the first step.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.cursor == self.nodes.len().checked_sub(1)
    }

    /// Number of open frames on the parent-stack.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut next = self.current;
        while let Some(frame) = next.and_then(|idx| self.frames.get_frame(idx)) {
            depth += 1;
            next = frame.parent;
        }
        depth
    }

    /// Node of the frame on top of the parent-stack.
    pub fn current(&self) -> Option<NodeId> {
        self.current
            .and_then(|idx| self.frames.get_frame(idx))
            .map(|frame| frame.node)
    }

    pub fn node(&self, id: NodeId) -> Option<&F::Handle> {
        self.nodes.get(id)
    }

    /// Nodes in step order.
    pub fn nodes(&self) -> impl Iterator<Item = &F::Handle> {
        self.nodes.iter()
    }

    pub fn frames(&self) -> &FrameArena {
        &self.frames
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }
}

impl<F: NodeFactory> std::fmt::Debug for StepTree<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepTree")
            .field("len", &self.nodes.len())
            .field("cursor", &self.cursor)
            .field("depth", &self.depth())
            .finish()
    }
}
