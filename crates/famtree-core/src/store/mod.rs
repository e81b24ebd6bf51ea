//! Relationship store.
//!
//! Owns every [`Member`] in an id-keyed arena and keeps the redundant
//! parent/child and spouse links symmetric across mutations. Relationships
//! are plain id lists, so cascades are id-set edits and traversals can guard
//! against cycles with simple lookups.
//!
//! Operations on unknown ids never fail: mutations report `false`/`None`
//! and readers skip references they cannot resolve.

mod queries;
mod seed;

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::member::{push_unique, remove_id, Member, MemberId, MemberPatch};
use crate::tree::{self, FamilyTreeNode, TreeError};

pub use queries::SymmetryViolation;
pub use seed::SEED_ROOT_ID;

/// Read access to members by id.
///
/// The tree builder only needs lookups, so it is written against this trait
/// rather than the concrete store.
pub trait MemberLookup {
    /// Returns the member with the given id, if present.
    fn get_by_id(&self, id: &MemberId) -> Option<&Member>;
}

/// In-memory family data: all members plus the designated root.
#[derive(Debug, Clone, Default)]
pub struct FamilyStore {
    members: HashMap<MemberId, Member>,
    /// Insertion order, used for listings and root reassignment
    order: Vec<MemberId>,
    root_id: Option<MemberId>,
}

impl FamilyStore {
    /// Creates an empty store with no root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from members whose links are already symmetric.
    ///
    /// Members are inserted as-is; duplicates by id keep the first record.
    pub fn from_members(members: Vec<Member>, root_id: Option<MemberId>) -> Self {
        let mut store = Self::new();
        for member in members {
            if store.members.contains_key(&member.id) {
                continue;
            }
            store.order.push(member.id.clone());
            store.members.insert(member.id.clone(), member);
        }
        store.root_id = root_id;
        store
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &MemberId) -> bool {
        self.members.contains_key(id)
    }

    /// All members in insertion order.
    pub fn all(&self) -> impl Iterator<Item = &Member> {
        self.order.iter().filter_map(|id| self.members.get(id))
    }

    pub fn get_by_id(&self, id: &MemberId) -> Option<&Member> {
        self.members.get(id)
    }

    /// The designated display root.
    pub fn root_id(&self) -> Option<&MemberId> {
        self.root_id.as_ref()
    }

    /// Changes the designated root. Unknown ids are ignored.
    pub fn set_root(&mut self, id: &MemberId) -> bool {
        if !self.contains(id) {
            debug!(%id, "set_root ignored: unknown member");
            return false;
        }
        self.root_id = Some(id.clone());
        info!(%id, "root changed");
        true
    }

    /// Inserts a new member and links it into its relatives.
    ///
    /// Every listed parent gains the member as a child, every listed spouse
    /// gains it as a spouse and every listed child gains it as a parent.
    /// Members added earlier that already reference the new id get the
    /// matching back reference on the new member. Referenced ids that do not
    /// exist yet are kept and linked once they are added.
    /// Returns `false` if a member with the same id already exists.
    pub fn add(&mut self, mut member: Member) -> bool {
        if self.contains(&member.id) {
            debug!(id = %member.id, "add ignored: id already present");
            return false;
        }

        let id = member.id.clone();
        for link in Link::ALL {
            for other_id in link.refs(&member) {
                if let Some(other) = self.members.get_mut(other_id) {
                    push_unique(link.back_refs_mut(other), id.clone());
                }
            }
        }

        let mut forward = 0usize;
        for other in self.order.iter().filter_map(|other_id| self.members.get(other_id)) {
            for link in Link::ALL {
                if link.refs(other).contains(&id) {
                    push_unique(link.back_refs_mut(&mut member), other.id.clone());
                    forward += 1;
                }
            }
        }

        info!(%id, name = %member.name, forward, "member added");
        self.order.push(id.clone());
        self.members.insert(id, member);
        true
    }

    /// Merges `patch` into the member with the given id.
    ///
    /// Relationship lists replaced through the patch are re-synchronized on
    /// the counterpart records: relatives dropped from a list lose the back
    /// reference, relatives added to it gain one.
    pub fn update(&mut self, id: &MemberId, patch: MemberPatch) -> bool {
        let Some(member) = self.members.get_mut(id) else {
            debug!(%id, "update ignored: unknown member");
            return false;
        };

        let before = member.clone();
        let relinks = patch.changes_relationships();
        member.apply(patch);
        let after = member.clone();

        if relinks {
            for link in Link::ALL {
                self.relink(id, link.refs(&before), link.refs(&after), link);
            }
        }

        info!(%id, relinks, "member updated");
        true
    }

    /// Removes a member and strips its id from every other member.
    ///
    /// If the removed member was the root, the first remaining member in
    /// insertion order becomes the root (or none if the store is now empty).
    pub fn delete(&mut self, id: &MemberId) -> Option<Member> {
        let removed = self.members.remove(id)?;
        self.order.retain(|existing| existing != id);

        let mut touched = 0usize;
        for member in self.members.values_mut() {
            let hit = remove_id(&mut member.children_ids, id)
                | remove_id(&mut member.spouse_ids, id)
                | remove_id(&mut member.parent_ids, id);
            if hit {
                touched += 1;
            }
        }

        if self.root_id.as_ref() == Some(id) {
            self.root_id = self.order.first().cloned();
            debug!(new_root = ?self.root_id, "root reassigned after delete");
        }

        info!(%id, touched, "member deleted");
        Some(removed)
    }

    /// Builds the descendant tree rooted at `root_id`.
    ///
    /// Returns `Ok(None)` when the root does not resolve.
    pub fn build_tree(
        &self,
        root_id: &MemberId,
        max_depth: usize,
    ) -> Result<Option<FamilyTreeNode>, TreeError> {
        tree::build_tree(self, root_id, max_depth)
    }

    /// Applies one side of a relationship diff to the counterpart records.
    fn relink(&mut self, id: &MemberId, before: &[MemberId], after: &[MemberId], link: Link) {
        for gone in before.iter().filter(|other| !after.contains(other) && *other != id) {
            if let Some(other) = self.members.get_mut(gone) {
                remove_id(link.back_refs_mut(other), id);
            }
        }
        for new in after.iter().filter(|other| !before.contains(other) && *other != id) {
            if let Some(other) = self.members.get_mut(new) {
                push_unique(link.back_refs_mut(other), id.clone());
            }
        }
    }
}

impl MemberLookup for FamilyStore {
    fn get_by_id(&self, id: &MemberId) -> Option<&Member> {
        self.members.get(id)
    }
}

/// One of the three relationship lists on a member.
///
/// Each list is mirrored by a list on the referenced member: parents by
/// children, children by parents, spouses by spouses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Link {
    Parent,
    Spouse,
    Child,
}

impl Link {
    pub const ALL: [Link; 3] = [Link::Parent, Link::Spouse, Link::Child];

    /// This list on `member`.
    pub fn refs(self, member: &Member) -> &[MemberId] {
        match self {
            Link::Parent => &member.parent_ids,
            Link::Spouse => &member.spouse_ids,
            Link::Child => &member.children_ids,
        }
    }

    /// The list on `other` that mirrors this one.
    pub fn back_refs(self, other: &Member) -> &[MemberId] {
        match self {
            Link::Parent => &other.children_ids,
            Link::Spouse => &other.spouse_ids,
            Link::Child => &other.parent_ids,
        }
    }

    fn back_refs_mut(self, other: &mut Member) -> &mut Vec<MemberId> {
        match self {
            Link::Parent => &mut other.children_ids,
            Link::Spouse => &mut other.spouse_ids,
            Link::Child => &mut other.parent_ids,
        }
    }
}
