//! Playback sessions: a replayed script plus the actions a presenter can take.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, instrument};

use crate::application::script::{Command, Script};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{NodeFactory, NodeId, StepTree};

/// Presenter input, as bound to "next"/"previous" style controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Next,
    Prev,
    ViewAll,
    HideAll,
    Destroy,
    Quit,
}

impl FromStr for Action {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "next" => Ok(Action::Next),
            "p" | "prev" => Ok(Action::Prev),
            "v" | "view" => Ok(Action::ViewAll),
            "h" | "hide" => Ok(Action::HideAll),
            "d" | "destroy" => Ok(Action::Destroy),
            "q" | "quit" => Ok(Action::Quit),
            _ => Err(ApplicationError::InvalidAction(s.trim().to_string())),
        }
    }
}

/// Effect of an [`Action`] on the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Revealed(NodeId),
    Hidden(NodeId),
    /// Stepping past either end
    Unchanged,
    AllShown,
    AllHidden,
    Destroyed(usize),
    Quit,
}

/// How far playback has come.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub revealed: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}/{}", self.revealed, self.total)
    }
}

pub struct Session<F: NodeFactory> {
    tree: StepTree<F>,
}

impl<F: NodeFactory> Session<F> {
    /// Build a tree by running every script command against a fresh factory.
    #[instrument(level = "debug", skip_all)]
    pub fn replay(script: &Script, factory: F) -> ApplicationResult<Self> {
        let mut tree = StepTree::new(factory);
        for line in script.lines() {
            let result = match &line.command {
                Command::Node(title) => tree.add_node(title),
                Command::End => tree.end(),
            };
            result.map_err(|source| ApplicationError::Replay {
                line: line.line,
                source,
            })?;
        }
        info!(nodes = tree.len(), "script replayed");
        Ok(Self { tree })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn apply(&mut self, action: Action) -> Outcome {
        let outcome = match action {
            Action::Next => self
                .tree
                .next_step()
                .map_or(Outcome::Unchanged, Outcome::Revealed),
            Action::Prev => self
                .tree
                .prev_step()
                .map_or(Outcome::Unchanged, Outcome::Hidden),
            Action::ViewAll => {
                self.tree.view_nodes();
                Outcome::AllShown
            }
            Action::HideAll => {
                self.tree.hide_nodes();
                Outcome::AllHidden
            }
            Action::Destroy => {
                let released = self.tree.len();
                self.tree.destroy_nodes();
                Outcome::Destroyed(released)
            }
            Action::Quit => Outcome::Quit,
        };
        debug!(?outcome, "action applied");
        outcome
    }

    /// Hide everything so playback starts from nothing.
    pub fn rewind(&mut self) {
        self.tree.hide_nodes();
    }

    /// Step forward up to `steps` times; returns how many nodes were revealed.
    pub fn advance(&mut self, steps: usize) -> usize {
        (0..steps)
            .map_while(|_| self.tree.next_step())
            .count()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            revealed: self.tree.cursor().map_or(0, |c| c + 1),
            total: self.tree.len(),
        }
    }

    pub fn tree(&self) -> &StepTree<F> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut StepTree<F> {
        &mut self.tree
    }
}
