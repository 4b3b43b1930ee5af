use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::node::{NodeId, Placement};

/// Entry on the parent-stack: one per `add_node` call.
#[derive(Debug)]
pub struct TreeFrame {
    /// Node this frame wraps
    pub node: NodeId,
    /// Anchoring handed to the node when it was created
    pub placement: Placement,
    /// Frame that was on top when this one was pushed, None for roots
    pub parent: Option<Index>,
    /// Frames pushed while this one was on top, in creation order
    pub children: Vec<Index>,
    /// Node whose right edge the next child at this level attaches to
    right_edge: Option<NodeId>,
}

impl TreeFrame {
    pub fn right_edge(&self) -> Option<NodeId> {
        self.right_edge
    }

    pub(crate) fn extend_right(&mut self, node: NodeId) {
        self.right_edge = Some(node);
    }
}

/// Arena storage for the frames of a step tree.
///
/// Uses generational arena so that indices handed out before a [`clear`](Self::clear)
/// can never resolve to a frame created afterwards.
#[derive(Debug)]
pub struct FrameArena {
    arena: Arena<TreeFrame>,
    /// Frames pushed onto an empty stack, in creation order
    roots: Vec<Index>,
}

impl Default for FrameArena {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_frame(
        &mut self,
        node: NodeId,
        placement: Placement,
        parent: Option<Index>,
    ) -> Index {
        let frame = TreeFrame {
            node,
            placement,
            parent,
            children: Vec::new(),
            right_edge: None,
        };
        let frame_idx = self.arena.insert(frame);

        match parent.and_then(|idx| self.arena.get_mut(idx)) {
            Some(parent) => parent.children.push(frame_idx),
            None => self.roots.push(frame_idx),
        }

        frame_idx
    }

    pub fn get_frame(&self, idx: Index) -> Option<&TreeFrame> {
        self.arena.get(idx)
    }

    pub fn get_frame_mut(&mut self, idx: Index) -> Option<&mut TreeFrame> {
        self.arena.get_mut(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order walk over every tree, roots in creation order.
    pub fn iter(&self) -> FrameIterator<'_> {
        FrameIterator::new(self)
    }

    /// Length of the longest root-to-leaf chain.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.roots
            .iter()
            .map(|&root| self.calculate_depth(root))
            .max()
            .unwrap_or(0)
    }

    fn calculate_depth(&self, frame_idx: Index) -> usize {
        if let Some(frame) = self.get_frame(frame_idx) {
            1 + frame
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Nodes without children, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        self.iter()
            .filter(|(_, frame)| frame.children.is_empty())
            .map(|(_, frame)| frame.node)
            .collect()
    }

    /// Drop every frame. Previously issued indices become stale.
    pub fn clear(&mut self) {
        // `Arena::clear` keeps the generation; removal bumps it
        self.arena.retain(|_, _| false);
        self.roots.clear();
    }
}

pub struct FrameIterator<'a> {
    frames: &'a FrameArena,
    stack: Vec<Index>,
}

impl<'a> FrameIterator<'a> {
    fn new(frames: &'a FrameArena) -> Self {
        let stack = frames.roots.iter().rev().copied().collect();
        Self { frames, stack }
    }
}

impl<'a> Iterator for FrameIterator<'a> {
    type Item = (Index, &'a TreeFrame);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(frame) = self.frames.get_frame(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in frame.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, frame));
            }
        }
        None
    }
}
