//! Step-indexed presentation trees.
//!
//! Nodes are appended one at a time along an implicit insertion path: every new
//! node hangs below the current one and becomes current itself, [`StepTree::end`]
//! climbs back up. Creation order doubles as reveal order, and a cursor walks it
//! forwards and backwards to show or hide one node per step.
//!
//! ```
//! use steptree::domain::{NodeHandle, StepTree};
//! use steptree::infrastructure::TerminalFactory;
//!
//! let mut tree = StepTree::new(TerminalFactory::new("canvas"));
//! tree.add_node("root")?;
//! tree.add_node("left")?;
//! tree.end()?;
//! tree.add_node("right")?;
//!
//! tree.hide_nodes();
//! assert_eq!(tree.next_step(), Some(0));
//! assert!(tree.node(0).unwrap().is_visible());
//! assert!(!tree.node(1).unwrap().is_visible());
//! # Ok::<(), steptree::domain::StepTreeError>(())
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::StepTree;
