use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a member.
///
/// Ids are opaque strings: the seed set uses short numeric ids, new members
/// get a UUID v4 token from [`MemberId::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh, unique id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MemberId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Gender of a member. Drives every visual distinction in the tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Returns a human-readable name for the gender.
    pub fn display_name(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Heading used when listing this member's spouses.
    pub fn spouses_label(&self) -> &'static str {
        match self {
            Gender::Male => "Wives",
            Gender::Female => "Husbands",
        }
    }

    /// Colour accent for nodes and connectors owned by this gender.
    pub fn accent(&self) -> Accent {
        match self {
            Gender::Male => Accent::Blue,
            Gender::Female => Accent::Purple,
        }
    }

    /// The other gender.
    pub fn toggled(self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }
}

/// Renderer-agnostic colour hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Blue,
    Purple,
}

/// One person in the family tree.
///
/// Relationship lists are stored on both ends of every link; the
/// [`FamilyStore`](crate::store::FamilyStore) keeps them symmetric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Unique identifier, never changes after creation
    pub id: MemberId,
    /// Display name
    pub name: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_date: Option<NaiveDate>,
    /// Free-text biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Reference to a portrait, opaque to the core
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub parent_ids: Vec<MemberId>,
    #[serde(default)]
    pub spouse_ids: Vec<MemberId>,
    #[serde(default)]
    pub children_ids: Vec<MemberId>,
}

impl Member {
    /// Creates a member with a freshly generated id and no relationships.
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self::with_id(MemberId::generate(), name, gender)
    }

    /// Creates a member with a caller-chosen id.
    pub fn with_id(id: impl Into<MemberId>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
            birth_date: None,
            death_date: None,
            bio: None,
            location: None,
            image_url: None,
            parent_ids: Vec::new(),
            spouse_ids: Vec::new(),
            children_ids: Vec::new(),
        }
    }

    pub fn born(mut self, date: NaiveDate) -> Self {
        self.birth_date = Some(date);
        self
    }

    pub fn died(mut self, date: NaiveDate) -> Self {
        self.death_date = Some(date);
        self
    }

    pub fn located(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_parents<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MemberId>,
    {
        for id in ids {
            push_unique(&mut self.parent_ids, id.into());
        }
        self
    }

    pub fn with_spouses<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MemberId>,
    {
        for id in ids {
            push_unique(&mut self.spouse_ids, id.into());
        }
        self
    }

    pub fn with_children<I, T>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<MemberId>,
    {
        for id in ids {
            push_unique(&mut self.children_ids, id.into());
        }
        self
    }

    /// First letter of every name part, uppercased.
    ///
    /// Used as the avatar fallback: "Ahmed Mohammed" -> "AM".
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn is_living(&self) -> bool {
        self.death_date.is_none()
    }

    /// Age in whole years on `on`, or at death if that came first.
    ///
    /// Returns `None` without a birth date or when `on` precedes it.
    pub fn age_on(&self, on: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        let end = match self.death_date {
            Some(death) if death < on => death,
            _ => on,
        };
        if end < birth {
            return None;
        }
        let mut years = end.year() - birth.year();
        if (end.month(), end.day()) < (birth.month(), birth.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }

    /// Applies a partial update. Only fields present in the patch change.
    ///
    /// Relatives are not touched; [`FamilyStore::update`](crate::store::FamilyStore::update)
    /// keeps their back references in sync.
    pub fn apply(&mut self, patch: MemberPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(gender) = patch.gender {
            self.gender = gender;
        }
        if let Some(birth_date) = patch.birth_date {
            self.birth_date = birth_date;
        }
        if let Some(death_date) = patch.death_date {
            self.death_date = death_date;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(parent_ids) = patch.parent_ids {
            self.parent_ids = dedup(parent_ids);
        }
        if let Some(spouse_ids) = patch.spouse_ids {
            self.spouse_ids = dedup(spouse_ids);
        }
        if let Some(children_ids) = patch.children_ids {
            self.children_ids = dedup(children_ids);
        }
    }
}

/// Partial update for a [`Member`].
///
/// `None` leaves a field untouched. Optional attributes are doubly wrapped so
/// a patch can clear them with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberPatch {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub death_date: Option<Option<NaiveDate>>,
    pub bio: Option<Option<String>>,
    pub location: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub parent_ids: Option<Vec<MemberId>>,
    pub spouse_ids: Option<Vec<MemberId>>,
    pub children_ids: Option<Vec<MemberId>>,
}

impl MemberPatch {
    /// Returns true if the patch touches any relationship list.
    pub fn changes_relationships(&self) -> bool {
        self.parent_ids.is_some() || self.spouse_ids.is_some() || self.children_ids.is_some()
    }
}

pub(crate) fn push_unique(ids: &mut Vec<MemberId>, id: MemberId) -> bool {
    if ids.contains(&id) {
        false
    } else {
        ids.push(id);
        true
    }
}

pub(crate) fn remove_id(ids: &mut Vec<MemberId>, id: &MemberId) -> bool {
    let before = ids.len();
    ids.retain(|existing| existing != id);
    ids.len() != before
}

fn dedup(ids: Vec<MemberId>) -> Vec<MemberId> {
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        push_unique(&mut out, id);
    }
    out
}
