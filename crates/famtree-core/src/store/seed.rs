//! Built-in seed family: three generations around member "1".

use chrono::NaiveDate;

use crate::member::{Gender, Member, MemberId};

use super::FamilyStore;

/// Id of the seeded root member.
pub const SEED_ROOT_ID: &str = "1";

impl FamilyStore {
    /// A store loaded with the built-in family, rooted at [`SEED_ROOT_ID`].
    pub fn seeded() -> Self {
        Self::from_members(seed_members(), Some(MemberId::from(SEED_ROOT_ID)))
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn seed_members() -> Vec<Member> {
    vec![
        Member::with_id("1", "Ahmed Mohammed", Gender::Male)
            .born(ymd(1950, 5, 15))
            .bio("Eldest grandfather of the family")
            .located("Riyadh")
            .with_spouses(["2"])
            .with_children(["3", "4", "5"]),
        Member::with_id("2", "Fatima Ali", Gender::Female)
            .born(ymd(1955, 8, 20))
            .bio("Eldest grandmother of the family")
            .located("Riyadh")
            .with_spouses(["1"])
            .with_children(["3", "4", "5"]),
        Member::with_id("3", "Mohammed Ahmed", Gender::Male)
            .born(ymd(1975, 3, 10))
            .bio("Eldest son")
            .located("Jeddah")
            .with_parents(["1", "2"])
            .with_spouses(["6"])
            .with_children(["7", "8"]),
        Member::with_id("4", "Noura Ahmed", Gender::Female)
            .born(ymd(1978, 11, 5))
            .bio("Middle daughter")
            .located("Dammam")
            .with_parents(["1", "2"])
            .with_spouses(["9"])
            .with_children(["10", "11"]),
        Member::with_id("5", "Khalid Ahmed", Gender::Male)
            .born(ymd(1980, 7, 22))
            .bio("Youngest son")
            .located("Riyadh")
            .with_parents(["1", "2"]),
        Member::with_id("6", "Mona Saad", Gender::Female)
            .born(ymd(1977, 9, 18))
            .located("Jeddah")
            .with_spouses(["3"])
            .with_children(["7", "8"]),
        Member::with_id("7", "Ahmed Mohammed", Gender::Male)
            .born(ymd(2000, 4, 12))
            .located("Jeddah")
            .with_parents(["3", "6"]),
        Member::with_id("8", "Sara Mohammed", Gender::Female)
            .born(ymd(2003, 12, 30))
            .located("Jeddah")
            .with_parents(["3", "6"]),
        Member::with_id("9", "Fahd Salem", Gender::Male)
            .born(ymd(1976, 2, 14))
            .located("Dammam")
            .with_spouses(["4"])
            .with_children(["10", "11"]),
        Member::with_id("10", "Abdullah Fahd", Gender::Male)
            .born(ymd(2002, 8, 9))
            .located("Dammam")
            .with_parents(["4", "9"]),
        Member::with_id("11", "Reem Fahd", Gender::Female)
            .born(ymd(2005, 5, 25))
            .located("Dammam")
            .with_parents(["4", "9"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_shape() {
        let store = FamilyStore::seeded();
        assert_eq!(store.len(), 11);
        assert_eq!(store.root_id().map(MemberId::as_str), Some(SEED_ROOT_ID));
        let root = store.get_by_id(&MemberId::from(SEED_ROOT_ID)).unwrap();
        assert_eq!(root.children_ids.len(), 3);
    }
}
