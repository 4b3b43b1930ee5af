//! Domain layer: the step tree and its collaborator contracts
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod frame;
pub mod node;
pub mod outline;
pub mod step_tree;

pub use error::{StepResult, StepTreeError};
pub use frame::{FrameArena, TreeFrame};
pub use node::{NodeFactory, NodeHandle, NodeId, Placement};
pub use outline::{OutlineOptions, TreeNodeConvert};
pub use step_tree::StepTree;
