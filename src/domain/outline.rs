/*
Text rendering of a step tree, for hosts without a canvas and for tests.
Hidden nodes take their subtree with them: a descendant is always created,
and therefore revealed, after its ancestor.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::node::{NodeFactory, NodeHandle, Placement};
use crate::domain::step_tree::StepTree;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineOptions {
    /// Render hidden nodes as `hidden_placeholder` instead of leaving them out
    pub show_hidden: bool,
    pub hidden_placeholder: String,
    /// Append the anchoring of each node to its label
    pub show_placement: bool,
    /// Label of the synthetic root when the canvas holds several trees
    pub canvas: String,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            hidden_placeholder: "·".into(),
            show_placement: false,
            canvas: "canvas".into(),
        }
    }
}

pub trait TreeNodeConvert {
    fn to_tree_string(&self, options: &OutlineOptions) -> Tree<String>;
}

impl<F: NodeFactory> TreeNodeConvert for StepTree<F> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, options: &OutlineOptions) -> Tree<String> {
        let mut trees: Vec<Tree<String>> = self
            .frames()
            .roots()
            .iter()
            .filter_map(|&root| build_tree(self, root, options))
            .collect();

        match trees.len() {
            0 => Tree::new("(empty)".to_string()),
            1 if self.frames().roots().len() == 1 => trees.remove(0),
            _ => Tree::new(options.canvas.clone()).with_leaves(trees),
        }
    }
}

fn build_tree<F: NodeFactory>(
    tree: &StepTree<F>,
    frame_idx: Index,
    options: &OutlineOptions,
) -> Option<Tree<String>> {
    let frame = tree.frames().get_frame(frame_idx)?;
    let node = tree.node(frame.node)?;
    if !node.is_visible() && !options.show_hidden {
        return None;
    }

    let mut label = if node.is_visible() {
        node.title().to_string()
    } else {
        options.hidden_placeholder.clone()
    };
    if options.show_placement {
        if let Some(placement) = describe_placement(tree, frame.placement, options) {
            label = format!("{} ({})", label, placement);
        }
    }

    let leaves: Vec<_> = frame
        .children
        .iter()
        .filter_map(|&child| build_tree(tree, child, options))
        .collect();
    Some(Tree::new(label).with_leaves(leaves))
}

/// Anchoring of a node in terms of the nodes it refers to; hidden ones stay placeholders.
fn describe_placement<F: NodeFactory>(
    tree: &StepTree<F>,
    placement: Placement,
    options: &OutlineOptions,
) -> Option<String> {
    let title = |id: usize| {
        tree.node(id).map(|n| {
            if n.is_visible() {
                n.title()
            } else {
                options.hidden_placeholder.as_str()
            }
        })
    };
    match placement {
        Placement::Root => None,
        Placement::CenteredBelow { parent } => Some(format!("centered below {:?}", title(parent)?)),
        Placement::RightOf { after, .. } => Some(format!("right of {:?}", title(after)?)),
    }
}
