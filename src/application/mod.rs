//! Application layer: scripts and playback sessions
//!
//! This layer drives the domain step tree from script text and playback actions.

pub mod error;
pub mod error_ext;
pub mod script;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use script::{Command, Script, ScriptFormat, ScriptLine};
pub use session::{Action, Outcome, Progress, Session};
