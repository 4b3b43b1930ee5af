//! Contracts for the host-side node collaborator.
//!
//! The step tree never looks at rendered geometry. It creates handles through a
//! [`NodeFactory`], titles them, toggles their visibility and tells each one where
//! it is anchored via a [`Placement`]. Everything else belongs to the host.

use std::fmt;

/// Position of a node in creation order. This is the only identity a node has.
pub type NodeId = usize;

/// Anchoring decision for a freshly added node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Starts a new tree; not anchored to any prior node.
    Root,
    /// First child at this level: top below `parent`, horizontally centered under it.
    CenteredBelow { parent: NodeId },
    /// Later sibling: top below `parent`, left edge on `after`'s right edge.
    RightOf { parent: NodeId, after: NodeId },
}

impl Placement {
    pub fn parent(&self) -> Option<NodeId> {
        match *self {
            Placement::Root => None,
            Placement::CenteredBelow { parent } | Placement::RightOf { parent, .. } => {
                Some(parent)
            }
        }
    }

    pub fn is_root(&self) -> bool {
        matches!(self, Placement::Root)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Root => write!(f, "root"),
            Placement::CenteredBelow { parent } => write!(f, "centered below #{}", parent),
            Placement::RightOf { parent, after } => {
                write!(f, "below #{}, right of #{}", parent, after)
            }
        }
    }
}

/// A rendered element owned by the host.
pub trait NodeHandle {
    fn set_title(&mut self, title: &str);

    fn title(&self) -> &str;

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;

    /// Wire the layout anchors for this node.
    fn place(&mut self, placement: Placement);

    /// Irrevocably release the underlying resource.
    ///
    /// Called once per handle on teardown. The default simply drops the handle.
    fn release(self)
    where
        Self: Sized,
    {
    }
}

/// Capability to create node handles on the host canvas.
///
/// Creation is infallible by contract; a host that can fail here has to deal
/// with it on its own side.
pub trait NodeFactory {
    type Handle: NodeHandle;

    fn create_node(&mut self) -> Self::Handle;
}
