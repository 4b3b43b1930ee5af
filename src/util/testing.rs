//! Test support: one-time logging setup and a recording node factory.

use std::cell::RefCell;
use std::env;
use std::rc::Rc;
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{NodeFactory, NodeHandle, Placement};

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // Create a filter for noisy modules
    let noisy_modules = ["generational_arena"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Something the step tree did to a node, tagged with the node's creation serial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeEvent {
    Created(usize),
    Titled(usize, String),
    Placed(usize, Placement),
    Shown(usize),
    Hidden(usize),
    Released(usize),
}

/// Shared event log of a [`RecordingFactory`] and all nodes it created.
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<NodeEvent>>>);

impl EventLog {
    pub fn events(&self) -> Vec<NodeEvent> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, event: NodeEvent) {
        self.0.borrow_mut().push(event);
    }
}

/// Fake host collaborator: plain in-memory nodes that log every mutation.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    log: EventLog,
    created: usize,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> EventLog {
        self.log.clone()
    }

    pub fn created(&self) -> usize {
        self.created
    }
}

impl NodeFactory for RecordingFactory {
    type Handle = RecordingNode;

    fn create_node(&mut self) -> RecordingNode {
        let serial = self.created;
        self.created += 1;
        self.log.push(NodeEvent::Created(serial));
        RecordingNode {
            serial,
            title: String::new(),
            visible: false,
            placement: None,
            log: self.log.clone(),
        }
    }
}

#[derive(Debug)]
pub struct RecordingNode {
    serial: usize,
    title: String,
    visible: bool,
    placement: Option<Placement>,
    log: EventLog,
}

impl RecordingNode {
    pub fn serial(&self) -> usize {
        self.serial
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }
}

impl NodeHandle for RecordingNode {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.log.push(NodeEvent::Titled(self.serial, self.title.clone()));
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.log.push(if visible {
            NodeEvent::Shown(self.serial)
        } else {
            NodeEvent::Hidden(self.serial)
        });
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn place(&mut self, placement: Placement) {
        self.placement = Some(placement);
        self.log.push(NodeEvent::Placed(self.serial, placement));
    }

    fn release(self) {
        self.log.push(NodeEvent::Released(self.serial));
    }
}
