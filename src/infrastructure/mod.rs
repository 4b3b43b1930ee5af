//! Infrastructure layer: concrete host collaborators
//!
//! This layer implements the domain's node contracts for the terminal host.

pub mod error;
pub mod terminal;

pub use error::{InfraError, InfraResult};
pub use terminal::{TerminalFactory, TerminalNode};
