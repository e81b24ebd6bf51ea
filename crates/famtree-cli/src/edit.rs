//! Text editing of member fields, shared by `famtree edit` and the
//! interactive view.
//!
//! Every field is edited as one line of text. An empty line clears optional
//! fields; relationship fields take comma-separated member ids.

use chrono::NaiveDate;
use famtree_core::{FamilyStore, Member, MemberId, MemberPatch};
use thiserror::Error;

/// Date format accepted and shown for birth and death dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Reasons an edit line is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("'{0}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("No member with id '{0}'")]
    UnknownMember(String),

    #[error("A member cannot be their own relative")]
    SelfReference,
}

/// Editable member field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Born,
    Died,
    Location,
    Bio,
    Parents,
    Spouses,
}

impl EditField {
    pub const ALL: [EditField; 7] = [
        EditField::Name,
        EditField::Born,
        EditField::Died,
        EditField::Location,
        EditField::Bio,
        EditField::Parents,
        EditField::Spouses,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditField::Name => "Name",
            EditField::Born => "Born",
            EditField::Died => "Died",
            EditField::Location => "Location",
            EditField::Bio => "Bio",
            EditField::Parents => "Parents",
            EditField::Spouses => "Spouses",
        }
    }

    /// Input hint shown next to the label.
    pub fn hint(self) -> &'static str {
        match self {
            EditField::Name => "",
            EditField::Born | EditField::Died => "YYYY-MM-DD, empty clears",
            EditField::Location | EditField::Bio => "empty clears",
            EditField::Parents | EditField::Spouses => "comma-separated ids",
        }
    }

    /// The field after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Current value of the field as editable text.
    pub fn current(self, member: &Member) -> String {
        let date = |d: Option<NaiveDate>| d.map(|d| d.format(DATE_FORMAT).to_string());
        let ids = |ids: &[MemberId]| {
            ids.iter()
                .map(MemberId::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self {
            EditField::Name => member.name.clone(),
            EditField::Born => date(member.birth_date).unwrap_or_default(),
            EditField::Died => date(member.death_date).unwrap_or_default(),
            EditField::Location => member.location.clone().unwrap_or_default(),
            EditField::Bio => member.bio.clone().unwrap_or_default(),
            EditField::Parents => ids(member.parent_ids.as_slice()),
            EditField::Spouses => ids(member.spouse_ids.as_slice()),
        }
    }

    /// Parses `input` for this field of member `id` into `patch`.
    ///
    /// Relationship ids must name existing members other than `id`.
    pub fn fill(
        self,
        patch: &mut MemberPatch,
        input: &str,
        store: &FamilyStore,
        id: &MemberId,
    ) -> Result<(), EditError> {
        let input = input.trim();
        match self {
            EditField::Name => {
                if input.is_empty() {
                    return Err(EditError::EmptyName);
                }
                patch.name = Some(input.to_string());
            }
            EditField::Born => patch.birth_date = Some(parse_date(input)?),
            EditField::Died => patch.death_date = Some(parse_date(input)?),
            EditField::Location => patch.location = Some(optional(input)),
            EditField::Bio => patch.bio = Some(optional(input)),
            EditField::Parents => patch.parent_ids = Some(parse_ids(input, store, id)?),
            EditField::Spouses => patch.spouse_ids = Some(parse_ids(input, store, id)?),
        }
        Ok(())
    }
}

/// Builds one patch from several field edits of member `id`.
pub fn build_patch(
    store: &FamilyStore,
    id: &MemberId,
    edits: &[(EditField, &str)],
) -> Result<MemberPatch, EditError> {
    let mut patch = MemberPatch::default();
    for (field, input) in edits {
        field.fill(&mut patch, input, store, id)?;
    }
    Ok(patch)
}

fn optional(input: &str) -> Option<String> {
    (!input.is_empty()).then(|| input.to_string())
}

fn parse_date(input: &str) -> Result<Option<NaiveDate>, EditError> {
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map(Some)
        .map_err(|_| EditError::InvalidDate(input.to_string()))
}

fn parse_ids(input: &str, store: &FamilyStore, id: &MemberId) -> Result<Vec<MemberId>, EditError> {
    let mut ids = Vec::new();
    for part in input.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        let other = MemberId::from(part);
        if &other == id {
            return Err(EditError::SelfReference);
        }
        if !store.contains(&other) {
            return Err(EditError::UnknownMember(part.to_string()));
        }
        if !ids.contains(&other) {
            ids.push(other);
        }
    }
    Ok(ids)
}
