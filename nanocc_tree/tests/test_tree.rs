use nanocc_tree::{NodeId, TraversalMode, Tree, TreeError};

/// ```text
/// r
/// |__ 1
/// |   |__ 4
/// |   |__ 5
/// |__ 2
/// |__ 3
///     |__ 6
/// ```
fn sample_tree() -> (Tree<&'static str>, [NodeId; 7]) {
    let mut tree = Tree::new();
    let r = tree.insert("r", None).unwrap();
    let n1 = tree.insert("1", Some(r)).unwrap();
    let n2 = tree.insert("2", Some(r)).unwrap();
    let n3 = tree.insert("3", Some(r)).unwrap();
    let n4 = tree.insert("4", Some(n1)).unwrap();
    let n5 = tree.insert("5", Some(n1)).unwrap();
    let n6 = tree.insert("6", Some(n3)).unwrap();
    (tree, [r, n1, n2, n3, n4, n5, n6])
}

fn collect(tree: &Tree<&'static str>, start: Option<NodeId>, mode: TraversalMode) -> Vec<&'static str> {
    tree.traverse(start, mode).unwrap().map(|id| tree[id]).collect()
}

#[test]
fn test_tree_construction() {
    let (tree, _) = sample_tree();
    assert_eq!(tree.len(), 7);
}

#[test]
fn test_traverse_depth_first() {
    let (tree, [_, _, _, n3, ..]) = sample_tree();

    assert_eq!(
        collect(&tree, None, TraversalMode::DepthFirst),
        vec!["r", "1", "4", "5", "2", "3", "6"]
    );
    assert_eq!(collect(&tree, Some(n3), TraversalMode::DepthFirst), vec!["3", "6"]);
}

#[test]
fn test_traverse_breadth_first() {
    let (tree, [_, n1, ..]) = sample_tree();

    assert_eq!(
        collect(&tree, None, TraversalMode::BreadthFirst),
        vec!["r", "1", "2", "3", "4", "5", "6"]
    );
    assert_eq!(collect(&tree, Some(n1), TraversalMode::BreadthFirst), vec!["1", "4", "5"]);
}

#[test]
fn test_traverse_is_restartable() {
    let (tree, [r, ..]) = sample_tree();

    for mode in [TraversalMode::DepthFirst, TraversalMode::BreadthFirst] {
        let first = collect(&tree, Some(r), mode);
        let second = collect(&tree, Some(r), mode);
        assert_eq!(first, second);
    }

    // Abandoning a walk half way doesn't affect the next one.
    let mut partial = tree.traverse(None, TraversalMode::DepthFirst).unwrap();
    partial.next();
    partial.next();
    drop(partial);
    assert_eq!(collect(&tree, None, TraversalMode::DepthFirst).len(), 7);
}

#[test]
fn test_traverse_non_member() {
    let (mut tree, [r, ..]) = sample_tree();
    let stray = tree.create_node("stray");

    assert!(matches!(
        tree.traverse(Some(stray), TraversalMode::DepthFirst),
        Err(TreeError::NotMember(id)) if id == stray
    ));

    tree.remove_node(r).unwrap();
    assert_eq!(tree.traverse(None, TraversalMode::DepthFirst).unwrap().count(), 0);
}

#[test]
fn test_get_children() {
    let (tree, [_, n1, _, _, n4, n5, _]) = sample_tree();
    assert_eq!(tree.children(n1).unwrap(), &[n4, n5]);
    assert!(tree.is_leaf(n4).unwrap());
}

#[test]
fn test_add_existing_node() {
    let (mut tree, [r, n1, ..]) = sample_tree();

    assert_eq!(tree.add_node(n1, Some(r)), Err(TreeError::AlreadyMember(n1)));
    assert_eq!(tree.add_node(r, None), Err(TreeError::AlreadyMember(r)));
    assert_eq!(tree.children(r).unwrap().len(), 3);
    assert_eq!(tree.len(), 7);
}

#[test]
fn test_loop() {
    let (mut tree, [r, n1, n2, n3, n4, n5, n6]) = sample_tree();
    let before = collect(&tree, None, TraversalMode::DepthFirst);

    assert_eq!(tree.set_parent(n1, n4), Err(TreeError::Cycle { node: n1, parent: n4 }));
    assert_eq!(tree.set_parent(r, n6), Err(TreeError::Cycle { node: r, parent: n6 }));

    // Structure is untouched.
    assert_eq!(collect(&tree, None, TraversalMode::DepthFirst), before);
    assert_eq!(tree.children(r).unwrap(), &[n1, n2, n3]);
    assert_eq!(tree.children(n1).unwrap(), &[n4, n5]);
    assert_eq!(tree.parent(n1), Some(r));
}

#[test]
fn test_reparent_sibling() {
    let (mut tree, [r, n1, n2, n3, ..]) = sample_tree();

    tree.set_parent(n3, n2).unwrap();

    assert_eq!(tree.children(r).unwrap(), &[n1, n2]);
    assert_eq!(tree.children(n2).unwrap(), &[n3]);
    assert_eq!(
        collect(&tree, None, TraversalMode::DepthFirst),
        vec!["r", "1", "4", "5", "2", "3", "6"]
    );
    assert_eq!(
        collect(&tree, None, TraversalMode::BreadthFirst),
        vec!["r", "1", "2", "4", "5", "3", "6"]
    );
    assert_eq!(tree.len(), 7);
}

#[test]
fn test_remove_subtree() {
    let (mut tree, [r, n1, n2, n3, n4, n5, _]) = sample_tree();

    assert_eq!(tree.remove_node(n1), Ok(3));
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.children(r).unwrap(), &[n2, n3]);
    assert!(!tree.contains(n4));
    assert!(!tree.contains(n5));
}

#[test]
fn test_remove_root() {
    let (mut tree, [r, ..]) = sample_tree();

    assert_eq!(tree.remove_node(r), Ok(7));
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert_eq!(tree.root(), None);

    // A new root can be planted afterwards.
    let new_root = tree.insert("n", None).unwrap();
    assert_eq!(tree.root(), Some(new_root));
}
