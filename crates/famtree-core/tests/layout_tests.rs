use famtree_core::connector::route;
use famtree_core::layout::{layout, sibling_offset};
use famtree_core::{ConnectorKind, DisplayPreset, FamilyStore, Gender, Member, MemberId, Point};
use proptest::prelude::*;

fn id(s: &str) -> MemberId {
    MemberId::from(s)
}

/// A root with `n` children and no grandchildren.
fn fan(n: usize) -> FamilyStore {
    let child_ids: Vec<String> = (0..n).map(|i| format!("c{i}")).collect();
    let mut members =
        vec![Member::with_id("root", "Root", Gender::Female).with_children(child_ids.clone())];
    members.extend(child_ids.iter().map(|cid| {
        Member::with_id(cid.as_str(), cid.as_str(), Gender::Male).with_parents(["root"])
    }));
    FamilyStore::from_members(members, Some(id("root")))
}

#[test]
fn test_generation_bands() {
    let store = FamilyStore::seeded();
    let tree = store.build_tree(&id("1"), 200).unwrap().unwrap();
    let metrics = DisplayPreset::Desktop.metrics();
    let positions = layout(&tree, &metrics);

    for (member_id, point) in positions.iter() {
        let node = tree.find(member_id).unwrap();
        assert_eq!(point.y, node.level as f64 * metrics.vertical_spacing);
    }
}

#[test]
fn test_positions_follow_preorder() {
    let store = FamilyStore::seeded();
    let tree = store.build_tree(&id("1"), 200).unwrap().unwrap();
    let positions = layout(&tree, &DisplayPreset::Desktop.metrics());
    let order: Vec<&MemberId> = positions.iter().map(|(member_id, _)| member_id).collect();
    assert_eq!(order, tree.ids());
}

#[test]
fn test_shared_child_takes_last_placement() {
    let store = FamilyStore::from_members(
        vec![
            Member::with_id("r", "Root", Gender::Male).with_children(["x", "y"]),
            Member::with_id("x", "X", Gender::Male).with_children(["z"]),
            Member::with_id("y", "Y", Gender::Female).with_children(["z"]),
            Member::with_id("z", "Z", Gender::Female).with_parents(["x", "y"]),
        ],
        Some(id("r")),
    );
    let tree = store.build_tree(&id("r"), 200).unwrap().unwrap();
    let metrics = DisplayPreset::Desktop.metrics();
    let positions = layout(&tree, &metrics);

    assert_eq!(positions.len(), 4);
    assert_eq!(positions.get(&id("z")), Some(Point::new(100.0, 300.0)));

    // Both parents route into the one box.
    let drops: Vec<Point> = route(&tree, &positions, &metrics)
        .into_iter()
        .filter(|c| c.kind == ConnectorKind::ChildDrop && c.child.as_ref() == Some(&id("z")))
        .map(|c| c.to)
        .collect();
    assert_eq!(drops, vec![Point::new(100.0, 300.0), Point::new(100.0, 300.0)]);
}

#[test]
fn test_connectors_meet_nodes() {
    let store = FamilyStore::seeded();
    let tree = store.build_tree(&id("1"), 200).unwrap().unwrap();
    let metrics = DisplayPreset::Touch.metrics();
    let positions = layout(&tree, &metrics);

    for connector in route(&tree, &positions, &metrics) {
        match connector.kind {
            ConnectorKind::ParentDrop => {
                let parent = positions.get(&connector.parent).unwrap();
                assert_eq!(connector.from, Point::new(parent.x, parent.y + metrics.node_height / 2.0));
            }
            ConnectorKind::ChildDrop => {
                let child = connector.child.as_ref().and_then(|c| positions.get(c)).unwrap();
                assert_eq!(connector.to, child);
            }
            ConnectorKind::SiblingBridge => assert_eq!(connector.from.y, connector.to.y),
        }
    }
}

proptest! {
    #[test]
    fn sibling_groups_are_centered(n in 1usize..12, spacing in 10.0f64..400.0) {
        let sum: f64 = (0..n).map(|i| sibling_offset(i, n, spacing)).sum();
        prop_assert!(sum.abs() < 1e-6, "offsets sum to {}", sum);
    }

    #[test]
    fn siblings_are_evenly_spaced(n in 2usize..12) {
        let store = fan(n);
        let tree = store.build_tree(&id("root"), 200).unwrap().unwrap();
        let metrics = DisplayPreset::Desktop.metrics();
        let positions = layout(&tree, &metrics);

        let xs: Vec<f64> = (0..n)
            .map(|i| positions.get(&MemberId::new(format!("c{i}"))).unwrap().x)
            .collect();
        for pair in xs.windows(2) {
            prop_assert!((pair[1] - pair[0] - metrics.horizontal_spacing).abs() < 1e-9);
        }
        prop_assert!((xs[0] + xs[n - 1]).abs() < 1e-9);
    }
}
