//! Tree materialization.
//!
//! Expands the flat relationship graph into a rooted descendant tree by
//! following `children_ids` from a chosen root. The graph is not guaranteed
//! to be a tree: a member reachable through two parents appears once per
//! path, and a child list pointing back at an ancestor is a structural error
//! rather than an endless recursion.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::MAX_TREE_DEPTH_LIMIT;
use crate::member::{Member, MemberId};
use crate::store::MemberLookup;

/// Structural problems found while building a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Tree rooted at {root} is deeper than {limit} generations")]
    DepthExceeded { root: MemberId, limit: usize },

    #[error("Member {id} is its own descendant")]
    Cycle { id: MemberId },
}

/// One member placed in a materialized tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FamilyTreeNode {
    /// Snapshot of the member at build time
    pub member: Member,
    pub children: Vec<FamilyTreeNode>,
    /// Distance from the root along the children chain (root = 0)
    pub level: usize,
}

impl FamilyTreeNode {
    pub fn id(&self) -> &MemberId {
        &self.member.id
    }

    /// Depth-first search for the first node holding `id`.
    pub fn find(&self, id: &MemberId) -> Option<&FamilyTreeNode> {
        if self.id() == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Total number of nodes, counting repeated members once per path.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(FamilyTreeNode::node_count).sum::<usize>()
    }

    /// Deepest level present in the tree.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(FamilyTreeNode::depth)
            .max()
            .unwrap_or(self.level)
    }

    /// Member ids in pre-order.
    pub fn ids(&self) -> Vec<&MemberId> {
        let mut out = Vec::with_capacity(self.node_count());
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a MemberId>) {
        out.push(self.id());
        for child in &self.children {
            child.collect_ids(out);
        }
    }
}

/// Builds the descendant tree of `root_id`.
///
/// Returns `Ok(None)` if the root does not resolve. Child ids that do not
/// resolve are skipped. Fails once a node would sit deeper than `max_depth`
/// or when a member turns out to be its own descendant. `max_depth` is
/// capped at [`MAX_TREE_DEPTH_LIMIT`].
pub fn build_tree<L: MemberLookup + ?Sized>(
    lookup: &L,
    root_id: &MemberId,
    max_depth: usize,
) -> Result<Option<FamilyTreeNode>, TreeError> {
    let Some(root) = lookup.get_by_id(root_id) else {
        debug!(%root_id, "tree root not found");
        return Ok(None);
    };

    let mut builder = Builder {
        lookup,
        root_id,
        max_depth: max_depth.min(MAX_TREE_DEPTH_LIMIT),
        path: Vec::new(),
    };
    let tree = builder.expand(root, 0).inspect_err(|err| {
        warn!(%root_id, error = %err, "tree build failed");
    })?;

    debug!(%root_id, nodes = tree.node_count(), depth = tree.depth(), "tree built");
    Ok(Some(tree))
}

struct Builder<'a, L: ?Sized> {
    lookup: &'a L,
    root_id: &'a MemberId,
    max_depth: usize,
    /// Ids on the path from the root to the node being expanded
    path: Vec<&'a MemberId>,
}

impl<'a, L: MemberLookup + ?Sized> Builder<'a, L> {
    fn expand(&mut self, member: &'a Member, level: usize) -> Result<FamilyTreeNode, TreeError> {
        if level > self.max_depth {
            return Err(TreeError::DepthExceeded {
                root: self.root_id.clone(),
                limit: self.max_depth,
            });
        }
        if self.path.contains(&&member.id) {
            return Err(TreeError::Cycle {
                id: member.id.clone(),
            });
        }

        self.path.push(&member.id);
        let mut children = Vec::with_capacity(member.children_ids.len());
        for child_id in &member.children_ids {
            if let Some(child) = self.lookup.get_by_id(child_id) {
                children.push(self.expand(child, level + 1)?);
            }
        }
        self.path.pop();

        Ok(FamilyTreeNode {
            member: member.clone(),
            children,
            level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::Gender;
    use crate::store::FamilyStore;

    fn id(s: &str) -> MemberId {
        MemberId::from(s)
    }

    #[test]
    fn test_unknown_root_is_absent() {
        let store = FamilyStore::seeded();
        assert_eq!(build_tree(&store, &id("nope"), 200), Ok(None));
    }

    #[test]
    fn test_dangling_children_are_skipped() {
        let store = FamilyStore::from_members(
            vec![
                Member::with_id("a", "A", Gender::Male).with_children(["ghost", "b"]),
                Member::with_id("b", "B", Gender::Female).with_parents(["a"]),
            ],
            Some(id("a")),
        );
        let tree = build_tree(&store, &id("a"), 200).unwrap().unwrap();
        assert_eq!(tree.children.len(), 1);
        assert_eq!(tree.children[0].id(), &id("b"));
    }

    #[test]
    fn test_cycle_is_structural_error() {
        let store = FamilyStore::from_members(
            vec![
                Member::with_id("a", "A", Gender::Male).with_children(["b"]),
                Member::with_id("b", "B", Gender::Male).with_children(["a"]),
            ],
            Some(id("a")),
        );
        assert_eq!(
            build_tree(&store, &id("a"), 200),
            Err(TreeError::Cycle { id: id("a") })
        );
    }

    #[test]
    fn test_depth_guard() {
        let chain: Vec<Member> = (0..10)
            .map(|i| {
                let member = Member::with_id(i.to_string(), format!("Gen {i}"), Gender::Male);
                if i < 9 {
                    member.with_children([(i + 1).to_string()])
                } else {
                    member
                }
            })
            .collect();
        let store = FamilyStore::from_members(chain, Some(id("0")));

        assert!(build_tree(&store, &id("0"), 9).unwrap().is_some());
        assert_eq!(
            build_tree(&store, &id("0"), 8),
            Err(TreeError::DepthExceeded { root: id("0"), limit: 8 })
        );
    }

    #[test]
    fn test_diamond_is_materialized_per_path() {
        let store = FamilyStore::from_members(
            vec![
                Member::with_id("r", "Root", Gender::Male).with_children(["x", "y"]),
                Member::with_id("x", "X", Gender::Male).with_children(["z"]),
                Member::with_id("y", "Y", Gender::Female).with_children(["z"]),
                Member::with_id("z", "Z", Gender::Female).with_parents(["x", "y"]),
            ],
            Some(id("r")),
        );
        let tree = build_tree(&store, &id("r"), 200).unwrap().unwrap();
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn test_find_and_ids() {
        let store = FamilyStore::seeded();
        let tree = build_tree(&store, &id("1"), 200).unwrap().unwrap();
        assert_eq!(tree.find(&id("10")).map(|n| n.level), Some(2));
        assert!(tree.find(&id("6")).is_none());
        let ids: Vec<&str> = tree.ids().into_iter().map(MemberId::as_str).collect();
        assert_eq!(ids, vec!["1", "3", "7", "8", "4", "10", "11", "5"]);
    }
}
