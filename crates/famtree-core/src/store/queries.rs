//! Relationship queries over the store.

use serde::Serialize;

use crate::member::{push_unique, Member, MemberId};

use super::{FamilyStore, Link};

/// One half of a relationship link that has no matching back reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymmetryViolation {
    /// Member holding the reference
    pub holder: MemberId,
    /// Referenced member, which does not point back
    pub target: MemberId,
    /// Which list of `holder` the reference sits in
    pub relation: Link,
}

impl FamilyStore {
    /// Resolved parents of a member. Unknown ids are skipped.
    pub fn parents_of(&self, id: &MemberId) -> Vec<&Member> {
        self.resolve(id, |m| &m.parent_ids)
    }

    /// Resolved children of a member, in stored order.
    pub fn children_of(&self, id: &MemberId) -> Vec<&Member> {
        self.resolve(id, |m| &m.children_ids)
    }

    pub fn spouses_of(&self, id: &MemberId) -> Vec<&Member> {
        self.resolve(id, |m| &m.spouse_ids)
    }

    /// Members sharing at least one parent with `id`, excluding itself.
    ///
    /// Half-siblings are included; each sibling appears once, in the order
    /// first reached through the parents.
    pub fn siblings_of(&self, id: &MemberId) -> Vec<&Member> {
        let mut sibling_ids: Vec<MemberId> = Vec::new();
        for parent in self.parents_of(id) {
            for child_id in &parent.children_ids {
                if child_id != id {
                    push_unique(&mut sibling_ids, child_id.clone());
                }
            }
        }
        sibling_ids
            .iter()
            .filter_map(|sibling_id| self.get_by_id(sibling_id))
            .collect()
    }

    /// Every member other than `id`: the candidates offered when picking
    /// parents or spouses for it.
    pub fn potential_relatives(&self, id: &MemberId) -> Vec<&Member> {
        self.all().filter(|m| &m.id != id).collect()
    }

    /// Lists every reference whose counterpart does not point back.
    ///
    /// References to unknown members are not violations.
    pub fn symmetry_violations(&self) -> Vec<SymmetryViolation> {
        let mut violations = Vec::new();
        for member in self.all() {
            for relation in Link::ALL {
                for target in relation.refs(member) {
                    let Some(other) = self.get_by_id(target) else {
                        continue;
                    };
                    if !relation.back_refs(other).contains(&member.id) {
                        violations.push(SymmetryViolation {
                            holder: member.id.clone(),
                            target: target.clone(),
                            relation,
                        });
                    }
                }
            }
        }
        violations
    }

    fn resolve<F>(&self, id: &MemberId, ids: F) -> Vec<&Member>
    where
        F: Fn(&Member) -> &Vec<MemberId>,
    {
        self.get_by_id(id)
            .map(|member| {
                ids(member)
                    .iter()
                    .filter_map(|other| self.get_by_id(other))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(members: Vec<&Member>) -> Vec<&str> {
        members.into_iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_relatives_of_seed_member() {
        let store = FamilyStore::seeded();
        let id = MemberId::from("3");
        assert_eq!(names(store.parents_of(&id)), vec!["1", "2"]);
        assert_eq!(names(store.spouses_of(&id)), vec!["6"]);
        assert_eq!(names(store.children_of(&id)), vec!["7", "8"]);
        assert_eq!(names(store.siblings_of(&id)), vec!["4", "5"]);
    }

    #[test]
    fn test_siblings_without_parents() {
        let store = FamilyStore::seeded();
        assert!(store.siblings_of(&MemberId::from("1")).is_empty());
        assert!(store.siblings_of(&MemberId::from("unknown")).is_empty());
    }

    #[test]
    fn test_potential_relatives_excludes_self() {
        let store = FamilyStore::seeded();
        let candidates = store.potential_relatives(&MemberId::from("5"));
        assert_eq!(candidates.len(), store.len() - 1);
        assert!(candidates.iter().all(|m| m.id.as_str() != "5"));
    }

    #[test]
    fn test_violation_names_the_list() {
        use crate::member::Gender;

        let store = FamilyStore::from_members(
            vec![
                Member::with_id("a", "Amal", Gender::Female),
                Member::with_id("b", "Badr", Gender::Male).with_parents(["a"]),
            ],
            None,
        );
        assert_eq!(
            store.symmetry_violations(),
            vec![SymmetryViolation {
                holder: MemberId::from("b"),
                target: MemberId::from("a"),
                relation: Link::Parent,
            }]
        );
        let json = serde_json::to_value(&store.symmetry_violations()[0]).unwrap();
        assert_eq!(json["relation"], "parent");
    }

    #[test]
    fn test_seed_is_symmetric() {
        assert!(FamilyStore::seeded().symmetry_violations().is_empty());
    }
}
