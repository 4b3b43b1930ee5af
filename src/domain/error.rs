//! Domain-level errors (no external dependencies)

use generational_arena::Index;
use thiserror::Error;

/// Domain errors are caller contract violations on a [`StepTree`](super::StepTree).
///
/// They are surfaced immediately: continuing past any of them would corrupt the
/// cursor or the parent-stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepTreeError {
    #[error("no open node: end() called with an empty parent stack")]
    NoOpenNode,

    #[error("cannot add a node while rewound: cursor at {} of {len} nodes", describe_cursor(.cursor))]
    Rewound { cursor: Option<usize>, len: usize },

    #[error("frame no longer exists: {0:?}")]
    StaleFrame(Index),
}

fn describe_cursor(cursor: &Option<usize>) -> String {
    cursor.map_or_else(|| "start".to_string(), |c| c.to_string())
}

/// Result type for step tree operations.
pub type StepResult<T> = Result<T, StepTreeError>;
