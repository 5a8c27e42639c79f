use anyhow::Result;

use crate::{model::CityQuery, storage::LocalStore};

pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

/// Maximum number of remembered searches.
pub const MAX_RECENT: usize = 5;

/// Previously searched city names, most recent first.
///
/// No two entries are equal ignoring case, and there are never more than
/// [`MAX_RECENT`] of them.
///
/// The only ways to build one are [`RecentSearches::load`],
/// [`RecentSearches::from_entries`] and [`RecentSearches::record_search`], all of
/// which keep those invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentSearches(Vec<String>);

impl RecentSearches {
    /// Read the persisted list. Absent or malformed data yields an empty list.
    pub fn load(store: &LocalStore) -> Self {
        let stored: Vec<String> = store.get(RECENT_SEARCHES_KEY).unwrap_or_default();
        Self::from_entries(stored)
    }

    /// Build a list from arbitrary entries, restoring the invariants: blank
    /// names dropped, later case-insensitive duplicates dropped, truncated.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list: Vec<String> = Vec::with_capacity(MAX_RECENT);
        for entry in entries {
            let entry: String = entry.into();
            let Ok(city) = CityQuery::new(&entry) else {
                continue;
            };
            if list.iter().any(|existing| city.matches(existing)) {
                continue;
            }
            list.push(city.into_inner());
            if list.len() == MAX_RECENT {
                break;
            }
        }
        Self(list)
    }

    /// New list with `city` moved (or inserted) to the front.
    pub fn record_search(&self, city: &CityQuery) -> Self {
        let rest = self.0.iter().filter(|existing| !city.matches(existing)).cloned();

        let list = std::iter::once(city.as_str().to_string())
            .chain(rest)
            .take(MAX_RECENT)
            .collect();

        Self(list)
    }

    /// Write the full list, replacing any previously stored value.
    pub fn persist(&self, store: &mut LocalStore) -> Result<()> {
        store.set(RECENT_SEARCHES_KEY, &self.0)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn city(name: &str) -> CityQuery {
        CityQuery::new(name).expect("valid city")
    }

    fn list(entries: &[&str]) -> RecentSearches {
        RecentSearches::from_entries(entries.iter().copied())
    }

    fn assert_invariants(list: &RecentSearches) {
        assert!(list.len() <= MAX_RECENT);
        for (i, a) in list.iter().enumerate() {
            for b in list.iter().skip(i + 1) {
                assert_ne!(a.to_lowercase(), b.to_lowercase(), "duplicate in {list:?}");
            }
        }
    }

    #[test]
    fn record_search_on_empty_list() {
        let updated = RecentSearches::default().record_search(&city("London"));
        assert_eq!(updated.as_slice(), ["London"]);
    }

    #[test]
    fn existing_city_moves_to_front_with_new_casing() {
        let updated = list(&["Paris", "Tokyo"]).record_search(&city("PARIS"));
        assert_eq!(updated.as_slice(), ["PARIS", "Tokyo"]);
    }

    #[test]
    fn city_in_the_middle_moves_to_front() {
        let updated = list(&["Paris", "Tokyo", "Lima"]).record_search(&city("tokyo"));
        assert_eq!(updated.as_slice(), ["tokyo", "Paris", "Lima"]);
    }

    #[test]
    fn list_is_capped_at_five() {
        let full = list(&["A", "B", "C", "D", "E"]);
        let updated = full.record_search(&city("F"));
        assert_eq!(updated.as_slice(), ["F", "A", "B", "C", "D"]);
    }

    #[test]
    fn record_search_keeps_invariants_across_many_searches() {
        let searches = [
            "Paris", "tokyo", "Lima", "PARIS", "Oslo", "Rome", "Cairo", "lima", "Tokyo", "Quito",
            "rome", "Oslo",
        ];

        let mut recent = RecentSearches::default();
        for name in searches {
            let query = city(name);
            recent = recent.record_search(&query);

            assert_eq!(recent.as_slice()[0], name);
            assert_invariants(&recent);
        }
    }

    #[test]
    fn record_search_does_not_mutate_input() {
        let original = list(&["Paris"]);
        let _ = original.record_search(&city("Tokyo"));
        assert_eq!(original.as_slice(), ["Paris"]);
    }

    #[test]
    fn from_entries_restores_invariants() {
        let restored = list(&["Paris", "paris", " ", "Tokyo", "Lima", "Oslo", "Rome", "Quito"]);
        assert_eq!(restored.as_slice(), ["Paris", "Tokyo", "Lima", "Oslo", "Rome"]);
    }

    #[test]
    fn load_from_absent_store_is_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = LocalStore::open(dir.path().join("state.json"));
        assert!(RecentSearches::load(&store).is_empty());
    }

    #[test]
    fn load_from_corrupt_store_is_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");

        fs::write(&path, r#"{"recentSearches": "not a list"}"#).expect("write");
        assert!(RecentSearches::load(&LocalStore::open(&path)).is_empty());

        fs::write(&path, "\u{0}\u{1}garbage").expect("write");
        assert!(RecentSearches::load(&LocalStore::open(&path)).is_empty());
    }

    #[test]
    fn load_repairs_stored_list_that_breaks_invariants() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"recentSearches": ["Oslo", "OSLO", "", "Rome", "Lima", "Cairo", "Quito", "Bern"]}"#,
        )
        .expect("write");

        let loaded = RecentSearches::load(&LocalStore::open(&path));

        assert_eq!(loaded.as_slice(), ["Oslo", "Rome", "Lima", "Cairo", "Quito"]);
        assert_invariants(&loaded);
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("state.json");

        let recent = list(&["Paris", "Tokyo"]).record_search(&city("Lima"));
        let mut store = LocalStore::open(&path);
        recent.persist(&mut store).expect("persist");

        assert_eq!(RecentSearches::load(&LocalStore::open(&path)), recent);
    }
}
