use famtree_core::config::{DEFAULT_MAX_TREE_DEPTH, MAX_TREE_DEPTH_LIMIT};
use famtree_core::tree::build_tree;
use famtree_core::{FamilyStore, FamilyTreeNode, Gender, Member, MemberId, TreeError};
use pretty_assertions::assert_eq;

fn id(s: &str) -> MemberId {
    MemberId::from(s)
}

fn assert_levels(node: &FamilyTreeNode, expected: usize) {
    assert_eq!(node.level, expected, "wrong level for {}", node.id());
    for child in &node.children {
        assert_levels(child, expected + 1);
    }
}

/// A straight line of `n` generations: g0 -> g1 -> ... -> g{n-1}.
fn lineage(n: usize) -> FamilyStore {
    let members = (0..n)
        .map(|i| {
            let mut member = Member::with_id(format!("g{i}"), format!("Gen {i}"), Gender::Male);
            if i > 0 {
                member = member.with_parents([format!("g{}", i - 1)]);
            }
            if i + 1 < n {
                member = member.with_children([format!("g{}", i + 1)]);
            }
            member
        })
        .collect();
    FamilyStore::from_members(members, Some(id("g0")))
}

#[test]
fn test_seed_tree_shape() {
    let store = FamilyStore::seeded();
    let tree = store.build_tree(&id("1"), DEFAULT_MAX_TREE_DEPTH).unwrap().unwrap();

    assert_eq!(tree.node_count(), 8);
    assert_eq!(tree.depth(), 2);
    assert_levels(&tree, 0);

    let noura = tree.find(&id("4")).unwrap();
    let names: Vec<&str> = noura.children.iter().map(|c| c.member.name.as_str()).collect();
    assert_eq!(names, vec!["Abdullah Fahd", "Reem Fahd"]);
}

#[test]
fn test_rebuild_is_idempotent() {
    let store = FamilyStore::seeded();
    let first = store.build_tree(&id("1"), DEFAULT_MAX_TREE_DEPTH).unwrap();
    let second = store.build_tree(&id("1"), DEFAULT_MAX_TREE_DEPTH).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_subtree_root() {
    let store = FamilyStore::seeded();
    let tree = store.build_tree(&id("3"), DEFAULT_MAX_TREE_DEPTH).unwrap().unwrap();
    let ids: Vec<&str> = tree.ids().into_iter().map(MemberId::as_str).collect();
    assert_eq!(ids, vec!["3", "7", "8"]);
    assert_levels(&tree, 0);
}

#[test]
fn test_missing_root_is_none() {
    let store = FamilyStore::seeded();
    assert_eq!(store.build_tree(&id("404"), DEFAULT_MAX_TREE_DEPTH), Ok(None));
}

#[test]
fn test_depth_limit() {
    let store = lineage(6);
    // Levels 0..=5 fit a limit of 5 exactly.
    assert!(build_tree(&store, &id("g0"), 5).is_ok());
    assert_eq!(
        build_tree(&store, &id("g0"), 4),
        Err(TreeError::DepthExceeded {
            root: id("g0"),
            limit: 4
        })
    );
}

#[test]
fn test_requested_depth_is_capped() {
    let store = lineage(MAX_TREE_DEPTH_LIMIT + 500);
    assert_eq!(
        build_tree(&store, &id("g0"), 1_000_000),
        Err(TreeError::DepthExceeded {
            root: id("g0"),
            limit: MAX_TREE_DEPTH_LIMIT
        })
    );
}

#[test]
fn test_self_child_is_cycle() {
    let store = FamilyStore::from_members(
        vec![Member::with_id("a", "Loop", Gender::Female).with_children(["a"])],
        Some(id("a")),
    );
    assert_eq!(
        store.build_tree(&id("a"), DEFAULT_MAX_TREE_DEPTH),
        Err(TreeError::Cycle { id: id("a") })
    );
}

#[test]
fn test_tree_serializes() {
    let store = FamilyStore::seeded();
    let tree = store.build_tree(&id("3"), DEFAULT_MAX_TREE_DEPTH).unwrap().unwrap();
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["member"]["name"], "Mohammed Ahmed");
    assert_eq!(json["children"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["children"][0]["level"], 1);
}
