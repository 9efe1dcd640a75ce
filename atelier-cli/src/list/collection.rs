//! In-memory collection backing a list view.
//!
//! Mutations happen only in response to confirmed server operations:
//! full refresh after create/update, local remove after a confirmed
//! delete, and replace-by-identity for the low-latency opening toggle.
//! Search and category filtering are pure projections; nothing is
//! persisted or sent to the server.

use crate::records::{Identify, ListRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    fn matches(&self, record_category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => record_category == Some(wanted.as_str()),
        }
    }
}

#[derive(Debug, Default)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R: Identify> Collection<R> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Replace the whole collection with a freshly fetched one.
    pub fn refresh(&mut self, records: Vec<R>) {
        self.records = records;
    }

    /// Replace the record sharing the update's identity. Returns false
    /// when no such record exists; every other entry is left untouched.
    pub fn apply_local_update(&mut self, updated: R) -> bool {
        match self.records.iter().position(|r| r.id() == updated.id()) {
            Some(index) => {
                self.records[index] = updated;
                true
            }
            None => false,
        }
    }

    /// Remove a record after the server confirmed its deletion.
    pub fn remove_local(&mut self, id: &str) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        self.records.len() != before
    }
}

impl<R: ListRecord> Collection<R> {
    /// Case-insensitive substring search on the display field combined
    /// with an exact-match category filter.
    pub fn filter_view(&self, search: &str, filter: &CategoryFilter) -> Vec<&R> {
        let needle = search.to_lowercase();
        self.records
            .iter()
            .filter(|r| filter.matches(r.category()))
            .filter(|r| r.display_field().to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Opening;

    fn opening(id: &str, position: &str, employment_type: &str, is_open: bool) -> Opening {
        Opening {
            id: id.into(),
            position: position.into(),
            short_description: String::new(),
            location: String::new(),
            salary_range: String::new(),
            immediate_joiner: false,
            employment_type: employment_type.into(),
            is_open,
        }
    }

    #[test]
    fn toggle_replaces_only_the_matching_record() {
        let mut collection = Collection::new();
        collection.refresh(vec![
            opening("a", "Site Architect", "Full Time", true),
            opening("b", "Junior Designer", "Internship", false),
            opening("c", "Project Lead", "Full Time", true),
        ]);
        let untouched_before = collection.records()[2].clone();

        let replaced = collection.apply_local_update(opening("b", "Junior Designer", "Internship", true));
        assert!(replaced);
        assert!(collection.get("b").unwrap().is_open);
        assert_eq!(collection.records()[2], untouched_before);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn apply_local_update_misses_unknown_ids() {
        let mut collection = Collection::new();
        collection.refresh(vec![opening("a", "Site Architect", "Full Time", true)]);
        assert!(!collection.apply_local_update(opening("zz", "Ghost", "Full Time", true)));
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn remove_local_drops_by_identity() {
        let mut collection = Collection::new();
        collection.refresh(vec![
            opening("a", "Site Architect", "Full Time", true),
            opening("b", "Junior Designer", "Internship", false),
        ]);
        assert!(collection.remove_local("a"));
        assert!(!collection.remove_local("a"));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.records()[0].id, "b");
    }

    #[test]
    fn filter_view_is_a_pure_projection() {
        let mut collection = Collection::new();
        collection.refresh(vec![
            opening("a", "Site Architect", "Full Time", true),
            opening("b", "Junior Designer", "Internship", false),
            opening("c", "Architectural Visualizer", "Full Time", true),
        ]);

        let matches = collection.filter_view("archi", &CategoryFilter::Only("Full Time".into()));
        let ids: Vec<&str> = matches.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        // Projection does not mutate the backing collection.
        assert_eq!(collection.len(), 3);
        assert_eq!(
            collection.filter_view("", &CategoryFilter::All).len(),
            3
        );
    }
}
