//! Tests for StepTree building and playback

use rstest::rstest;

use steptree::domain::{NodeHandle, Placement, StepTree, StepTreeError};
use steptree::util::testing::{NodeEvent, RecordingFactory};

fn tree_with(titles: &[&str]) -> StepTree<RecordingFactory> {
    let mut tree = StepTree::new(RecordingFactory::new());
    for title in titles {
        tree.add_node(title).unwrap();
    }
    tree
}

fn visibility(tree: &StepTree<RecordingFactory>) -> Vec<bool> {
    tree.nodes().map(|n| n.is_visible()).collect()
}

// ============================================================
// Building
// ============================================================

#[rstest]
#[case(1)]
#[case(3)]
#[case(7)]
fn given_adds_without_end_when_building_then_depth_and_len_match(#[case] count: usize) {
    // Arrange
    let titles: Vec<String> = (0..count).map(|i| format!("n{}", i)).collect();
    let mut tree = StepTree::new(RecordingFactory::new());

    // Act
    for title in &titles {
        tree.add_node(title).unwrap();
    }

    // Assert
    assert_eq!(tree.depth(), count);
    assert_eq!(tree.len(), count);
    let stored: Vec<&str> = tree.nodes().map(|n| n.title()).collect();
    assert_eq!(stored, titles.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(tree.cursor(), Some(count - 1));
}

#[test]
fn given_chain_when_adding_then_each_node_centered_below_previous() {
    let tree = tree_with(&["a", "b", "c"]);

    assert_eq!(tree.node(0).unwrap().placement(), Some(Placement::Root));
    assert_eq!(
        tree.node(1).unwrap().placement(),
        Some(Placement::CenteredBelow { parent: 0 })
    );
    assert_eq!(
        tree.node(2).unwrap().placement(),
        Some(Placement::CenteredBelow { parent: 1 })
    );
}

#[test]
fn given_open_frame_when_ending_then_returns_to_previous_frame() {
    // Arrange
    let mut tree = tree_with(&["root", "child"]);

    // Act
    let closed = tree.end().unwrap();

    // Assert
    assert_eq!(closed, 1);
    assert_eq!(tree.current(), Some(0));
    assert_eq!(tree.depth(), 1);
}

#[test]
fn given_more_ends_than_adds_when_ending_then_no_open_node() {
    // Arrange
    let mut tree = tree_with(&["root", "child"]);
    tree.end().unwrap();
    tree.end().unwrap();

    // Act
    let result = tree.end();

    // Assert
    assert_eq!(result, Err(StepTreeError::NoOpenNode));
    assert_eq!(tree.current(), None);
    assert_eq!(tree.len(), 2);
}

#[test]
fn given_empty_tree_when_ending_then_no_open_node() {
    let mut tree = StepTree::new(RecordingFactory::new());

    assert_eq!(tree.end(), Err(StepTreeError::NoOpenNode));
}

#[test]
fn given_siblings_when_adding_then_first_centered_rest_right_of_previous() {
    // Arrange
    let mut tree = StepTree::new(RecordingFactory::new());
    let root = tree.add_node("R").unwrap();

    // Act
    let a = tree.add_node("A").unwrap();
    tree.end().unwrap();
    let b = tree.add_node("B").unwrap();
    tree.end().unwrap();
    let c = tree.add_node("C").unwrap();

    // Assert
    assert_eq!(
        tree.node(a).unwrap().placement(),
        Some(Placement::CenteredBelow { parent: root })
    );
    assert_eq!(
        tree.node(b).unwrap().placement(),
        Some(Placement::RightOf {
            parent: root,
            after: a
        })
    );
    assert_eq!(
        tree.node(c).unwrap().placement(),
        Some(Placement::RightOf {
            parent: root,
            after: b
        })
    );
    let (_, root_frame) = tree.frames().iter().next().unwrap();
    assert_eq!(root_frame.right_edge(), Some(c));
}

#[test]
fn given_child_closed_when_adding_then_attaches_to_parent_not_child() {
    // Arrange
    let mut tree = StepTree::new(RecordingFactory::new());
    tree.add_node("root").unwrap();
    tree.add_node("child1").unwrap();
    tree.end().unwrap();

    // Act
    let child2 = tree.add_node("child2").unwrap();

    // Assert
    let placement = tree.node(child2).unwrap().placement().unwrap();
    assert_eq!(placement.parent(), Some(0));
    assert_ne!(placement.parent(), Some(1));
    assert_eq!(placement, Placement::RightOf { parent: 0, after: 1 });
    assert_eq!(tree.frames().depth(), 2);
    assert_eq!(tree.frames().leaf_nodes(), vec![1, 2]);
}

#[test]
fn given_all_frames_closed_when_adding_then_new_root() {
    let mut tree = tree_with(&["first"]);
    tree.end().unwrap();

    let second = tree.add_node("second").unwrap();

    assert_eq!(tree.node(second).unwrap().placement(), Some(Placement::Root));
    assert_eq!(tree.frames().roots().len(), 2);
}

#[test]
fn given_node_added_when_inspecting_log_then_titled_placed_and_shown() {
    let factory = RecordingFactory::new();
    let log = factory.log();
    let mut tree = StepTree::new(factory);

    tree.add_node("only").unwrap();

    assert_eq!(
        log.events(),
        vec![
            NodeEvent::Created(0),
            NodeEvent::Titled(0, "only".into()),
            NodeEvent::Placed(0, Placement::Root),
            NodeEvent::Shown(0),
        ]
    );
}

#[test]
fn given_rewound_tree_when_adding_then_rejected_without_creating() {
    // Arrange
    let mut tree = tree_with(&["a", "b"]);
    tree.prev_step();

    // Act
    let result = tree.add_node("c");

    // Assert
    assert_eq!(
        result,
        Err(StepTreeError::Rewound {
            cursor: Some(0),
            len: 2
        })
    );
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.factory().created(), 2);
}

#[test]
fn given_rewound_tree_viewed_again_when_adding_then_accepted() {
    let mut tree = tree_with(&["a"]);
    tree.hide_nodes();
    tree.view_nodes();

    let id = tree.add_node("b").unwrap();

    assert_eq!(id, 1);
    assert_eq!(tree.cursor(), Some(1));
}

// ============================================================
// Stepping
// ============================================================

#[test]
fn given_hidden_tree_when_stepping_forward_then_reveals_in_creation_order() {
    // Arrange
    let mut tree = tree_with(&["a", "b", "c"]);
    tree.hide_nodes();

    // Act & Assert
    assert_eq!(tree.next_step(), Some(0));
    assert_eq!(visibility(&tree), vec![true, false, false]);
    assert_eq!(tree.next_step(), Some(1));
    assert_eq!(visibility(&tree), vec![true, true, false]);
    assert_eq!(tree.next_step(), Some(2));
    assert_eq!(visibility(&tree), vec![true, true, true]);
    assert_eq!(tree.cursor(), Some(2));
}

#[test]
fn given_fully_revealed_when_stepping_forward_then_noop() {
    // Arrange
    let factory = RecordingFactory::new();
    let log = factory.log();
    let mut tree = StepTree::new(factory);
    tree.add_node("a").unwrap();
    tree.add_node("b").unwrap();
    log.clear();

    // Act
    let result = tree.next_step();

    // Assert
    assert_eq!(result, None);
    assert_eq!(tree.cursor(), Some(1));
    assert!(log.events().is_empty());
}

#[test]
fn given_end_reached_when_stepping_back_past_start_then_hides_in_reverse() {
    // Arrange
    let mut tree = tree_with(&["a", "b", "c"]);
    let mut hidden = Vec::new();

    // Act
    for _ in 0..=tree.len() {
        if let Some(id) = tree.prev_step() {
            hidden.push(id);
        }
    }

    // Assert
    assert_eq!(hidden, vec![2, 1, 0]);
    assert_eq!(tree.cursor(), None);
    assert_eq!(visibility(&tree), vec![false, false, false]);
    assert_eq!(tree.prev_step(), None);
    assert_eq!(tree.cursor(), None);
}

#[test]
fn given_stepping_back_and_forth_when_checking_then_prefix_visible() {
    let mut tree = tree_with(&["a", "b", "c", "d"]);
    tree.hide_nodes();

    tree.next_step();
    tree.next_step();
    tree.next_step();
    tree.prev_step();

    assert_eq!(tree.cursor(), Some(1));
    assert_eq!(visibility(&tree), vec![true, true, false, false]);
}

// ============================================================
// Bulk operations
// ============================================================

#[test]
fn given_view_hide_view_when_round_tripping_then_fully_visible_again() {
    // Arrange
    let mut tree = tree_with(&["a", "b", "c"]);

    // Act
    tree.view_nodes();
    tree.hide_nodes();
    assert_eq!(tree.cursor(), None);
    assert_eq!(visibility(&tree), vec![false, false, false]);
    tree.view_nodes();

    // Assert
    assert_eq!(visibility(&tree), vec![true, true, true]);
    assert_eq!(tree.cursor(), Some(2));
    assert!(tree.is_fully_revealed());
}

#[test]
fn given_empty_tree_when_viewing_then_cursor_stays_at_start() {
    let mut tree = StepTree::new(RecordingFactory::new());

    tree.view_nodes();
    tree.hide_nodes();

    assert_eq!(tree.cursor(), None);
}

#[test]
fn given_built_tree_when_destroying_then_releases_all_and_resets() {
    // Arrange
    let factory = RecordingFactory::new();
    let log = factory.log();
    let mut tree = StepTree::new(factory);
    tree.add_node("a").unwrap();
    tree.add_node("b").unwrap();
    tree.prev_step();
    log.clear();

    // Act
    tree.destroy_nodes();

    // Assert
    assert_eq!(
        log.events(),
        vec![NodeEvent::Released(0), NodeEvent::Released(1)]
    );
    assert!(tree.is_empty());
    assert_eq!(tree.cursor(), None);
    assert_eq!(tree.current(), None);
    assert_eq!(tree.depth(), 0);
    assert!(tree.frames().is_empty());
    assert_eq!(tree.next_step(), None);
    assert_eq!(tree.prev_step(), None);
    assert_eq!(tree.end(), Err(StepTreeError::NoOpenNode));
}

#[test]
fn given_destroyed_tree_when_rebuilding_then_starts_fresh() {
    let mut tree = tree_with(&["a", "b"]);
    tree.destroy_nodes();

    let id = tree.add_node("again").unwrap();

    assert_eq!(id, 0);
    assert_eq!(tree.node(0).unwrap().placement(), Some(Placement::Root));
    assert_eq!(tree.node(0).unwrap().serial(), 2);
    assert_eq!(tree.depth(), 1);
}
