use famtree_core::{FamilyStore, Gender, Link, Member, MemberId, MemberPatch, SEED_ROOT_ID};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn id(s: &str) -> MemberId {
    MemberId::from(s)
}

fn ids(members: Vec<&Member>) -> Vec<&str> {
    members.into_iter().map(|m| m.id.as_str()).collect()
}

#[test]
fn test_seed_store() {
    let store = FamilyStore::seeded();
    assert_eq!(store.len(), 11);
    assert_eq!(store.root_id(), Some(&id(SEED_ROOT_ID)));
    assert!(store.symmetry_violations().is_empty());
}

#[test]
fn test_add_then_read_back() {
    let mut store = FamilyStore::seeded();
    let child = Member::new("Layla Khalid", Gender::Female).with_parents(["5", "6"]);
    let child_id = child.id.clone();
    assert!(store.add(child));

    assert_eq!(ids(store.parents_of(&child_id)), vec!["5", "6"]);
    assert!(store.get_by_id(&id("5")).unwrap().children_ids.contains(&child_id));
    assert!(store.get_by_id(&id("6")).unwrap().children_ids.contains(&child_id));
    assert!(store.symmetry_violations().is_empty());
}

#[test]
fn test_add_before_referenced_parent() {
    let mut store = FamilyStore::new();
    store.add(Member::with_id("b", "Badr", Gender::Male).with_parents(["a"]));
    store.add(Member::with_id("a", "Amal", Gender::Female));

    assert_eq!(ids(store.children_of(&id("a"))), vec!["b"]);
    assert!(store.symmetry_violations().is_empty());
}

#[test]
fn test_delete_cascades_every_role() {
    let mut store = FamilyStore::seeded();
    let removed = store.delete(&id("3")).unwrap();
    assert_eq!(removed.name, "Mohammed Ahmed");

    for member in store.all() {
        assert!(!member.parent_ids.contains(&id("3")), "{} still has parent 3", member.id);
        assert!(!member.spouse_ids.contains(&id("3")), "{} still has spouse 3", member.id);
        assert!(!member.children_ids.contains(&id("3")), "{} still has child 3", member.id);
    }
    assert!(store.delete(&id("3")).is_none());
    assert_eq!(store.len(), 10);
}

#[test]
fn test_update_resyncs_relationships() {
    let mut store = FamilyStore::seeded();
    // Move "5" from parent "1" to parent "3".
    let patch = MemberPatch {
        parent_ids: Some(vec![id("3")]),
        ..Default::default()
    };
    assert!(store.update(&id("5"), patch));

    assert!(!store.get_by_id(&id("1")).unwrap().children_ids.contains(&id("5")));
    assert!(!store.get_by_id(&id("2")).unwrap().children_ids.contains(&id("5")));
    assert!(store.get_by_id(&id("3")).unwrap().children_ids.contains(&id("5")));
    assert!(store.symmetry_violations().is_empty());
}

#[test]
fn test_update_clears_optional_fields() {
    let mut store = FamilyStore::seeded();
    let patch = MemberPatch {
        name: Some("Ahmed M.".to_string()),
        location: Some(None),
        ..Default::default()
    };
    store.update(&id("1"), patch);

    let ahmed = store.get_by_id(&id("1")).unwrap();
    assert_eq!(ahmed.name, "Ahmed M.");
    assert_eq!(ahmed.location, None);
    assert!(ahmed.birth_date.is_some());
}

#[test]
fn test_relationship_queries() {
    let store = FamilyStore::seeded();
    assert_eq!(ids(store.children_of(&id("1"))), vec!["3", "4", "5"]);
    assert_eq!(ids(store.spouses_of(&id("1"))), vec!["2"]);
    assert_eq!(ids(store.siblings_of(&id("4"))), vec!["3", "5"]);
    assert!(store.siblings_of(&id("1")).is_empty());

    let candidates = store.potential_relatives(&id("1"));
    assert_eq!(candidates.len(), 10);
    assert!(candidates.iter().all(|m| m.id != id("1")));
}

#[test]
fn test_unknown_ids_are_noops() {
    let mut store = FamilyStore::seeded();
    assert!(store.get_by_id(&id("404")).is_none());
    assert!(store.parents_of(&id("404")).is_empty());
    assert!(!store.update(&id("404"), MemberPatch::default()));
    assert!(store.delete(&id("404")).is_none());
    assert!(!store.set_root(&id("404")));
    assert_eq!(store.len(), 11);
}

// ── Symmetry under arbitrary mutation sequences ────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Add {
        parents: Vec<usize>,
        spouses: Vec<usize>,
        /// Offsets of later operations whose members are named up front
        later: Vec<(Link, usize)>,
    },
    Delete(usize),
    SetSpouses(usize, Vec<usize>),
    SetChildren(usize, Vec<usize>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let picks = || proptest::collection::vec(0usize..64, 0..3);
    let link = prop_oneof![Just(Link::Parent), Just(Link::Spouse), Just(Link::Child)];
    let later = proptest::collection::vec((link, 1usize..6), 0..3);
    prop_oneof![
        3 => (picks(), picks(), later)
            .prop_map(|(parents, spouses, later)| Op::Add { parents, spouses, later }),
        1 => (0usize..64).prop_map(Op::Delete),
        1 => (0usize..64, picks()).prop_map(|(i, s)| Op::SetSpouses(i, s)),
        1 => (0usize..64, picks()).prop_map(|(i, c)| Op::SetChildren(i, c)),
    ]
}

/// Resolves indices against the current members, never including `except`.
fn pick(store: &FamilyStore, picks: &[usize], except: Option<&MemberId>) -> Vec<MemberId> {
    let all: Vec<MemberId> = store.all().map(|m| m.id.clone()).collect();
    if all.is_empty() {
        return Vec::new();
    }
    picks
        .iter()
        .map(|i| all[i % all.len()].clone())
        .filter(|candidate| Some(candidate) != except)
        .collect()
}

fn nth(store: &FamilyStore, i: usize) -> Option<MemberId> {
    if store.is_empty() {
        return None;
    }
    store.all().nth(i % store.len()).map(|m| m.id.clone())
}

proptest! {
    #[test]
    fn links_stay_symmetric(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let mut store = FamilyStore::new();
        for (n, op) in ops.into_iter().enumerate() {
            match op {
                Op::Add { parents, spouses, later } => {
                    let mut member =
                        Member::with_id(format!("m{n}"), format!("Member {n}"), Gender::Male)
                            .with_parents(pick(&store, &parents, None))
                            .with_spouses(pick(&store, &spouses, None));
                    for (link, offset) in later {
                        let future = [MemberId::from(format!("m{}", n + offset))];
                        member = match link {
                            Link::Parent => member.with_parents(future),
                            Link::Spouse => member.with_spouses(future),
                            Link::Child => member.with_children(future),
                        };
                    }
                    store.add(member);
                }
                Op::Delete(i) => {
                    if let Some(target) = nth(&store, i) {
                        store.delete(&target);
                    }
                }
                Op::SetSpouses(i, spouses) => {
                    if let Some(target) = nth(&store, i) {
                        let patch = MemberPatch {
                            spouse_ids: Some(pick(&store, &spouses, Some(&target))),
                            ..Default::default()
                        };
                        store.update(&target, patch);
                    }
                }
                Op::SetChildren(i, children) => {
                    if let Some(target) = nth(&store, i) {
                        let patch = MemberPatch {
                            children_ids: Some(pick(&store, &children, Some(&target))),
                            ..Default::default()
                        };
                        store.update(&target, patch);
                    }
                }
            }
            prop_assert!(
                store.symmetry_violations().is_empty(),
                "violations: {:?}",
                store.symmetry_violations()
            );
        }
    }
}
