//! Location filtering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::{CategoryId, Location, TagId};

/// Active category, tag and search criteria.
///
/// An empty criterion matches everything. Tags are any-of: a location
/// passes when it carries at least one active tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFilter {
    #[serde(default)]
    pub categories: BTreeSet<CategoryId>,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
    #[serde(default)]
    pub search: String,
}

impl LocationFilter {
    /// Add the category if absent, remove it if present.
    pub fn toggle_category(&mut self, id: CategoryId) {
        if !self.categories.remove(&id) {
            self.categories.insert(id);
        }
    }

    /// Add the tag if absent, remove it if present.
    pub fn toggle_tag(&mut self, id: TagId) {
        if !self.tags.remove(&id) {
            self.tags.insert(id);
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.tags.is_empty() && self.search.trim().is_empty()
    }

    /// Whether `location` passes every active criterion.
    pub fn matches(&self, location: &Location) -> bool {
        self.matches_with_needle(location, &self.needle())
    }

    /// Locations passing the filter, in input order.
    pub fn apply<'a>(&self, locations: &'a [Location]) -> Vec<&'a Location> {
        let needle = self.needle();
        locations
            .iter()
            .filter(|l| self.matches_with_needle(l, &needle))
            .collect()
    }

    fn needle(&self) -> String {
        self.search.trim().to_lowercase()
    }

    fn matches_with_needle(&self, location: &Location, needle: &str) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&location.category_id) {
            return false;
        }
        if !self.tags.is_empty() && !self.tags.iter().any(|t| location.has_tag(t)) {
            return false;
        }
        needle.is_empty() || location.matches_text(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Catalog;

    fn ids(locations: &[&Location]) -> Vec<String> {
        locations.iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn empty_filter_returns_everything_in_order() {
        let catalog = Catalog::sample().unwrap();
        let filter = LocationFilter::default();
        assert!(filter.is_empty());

        let result = filter.apply(catalog.locations());
        assert_eq!(result.len(), catalog.locations().len());
        assert_eq!(result[0].id, catalog.locations()[0].id);
    }

    #[test]
    fn category_filter() {
        let catalog = Catalog::sample().unwrap();
        let mut filter = LocationFilter::default();
        filter.toggle_category(CategoryId::new("park"));

        let result = filter.apply(catalog.locations());
        assert!(!result.is_empty());
        assert!(result.iter().all(|l| l.category_id.as_str() == "park"));
    }

    #[test]
    fn toggling_twice_removes() {
        let mut filter = LocationFilter::default();
        filter.toggle_category(CategoryId::new("food"));
        filter.toggle_category(CategoryId::new("food"));
        filter.toggle_tag(TagId::new("historic"));
        filter.toggle_tag(TagId::new("historic"));
        assert!(filter.is_empty());
    }

    #[test]
    fn tags_are_any_of() {
        let catalog = Catalog::sample().unwrap();
        let mut filter = LocationFilter::default();
        filter.toggle_tag(TagId::new("historic"));
        let historic = filter.apply(catalog.locations()).len();

        filter.toggle_tag(TagId::new("late-night"));
        let either = filter.apply(catalog.locations());

        assert!(either.len() >= historic);
        assert!(either.iter().all(|l| {
            l.has_tag(&TagId::new("historic")) || l.has_tag(&TagId::new("late-night"))
        }));
    }

    #[test]
    fn search_is_case_insensitive_on_name_and_address() {
        let catalog = Catalog::sample().unwrap();
        let mut filter = LocationFilter::default();

        filter.set_search("  INDIA gate ");
        assert_eq!(ids(&filter.apply(catalog.locations())), vec!["india-gate"]);

        filter.set_search("chandni chowk");
        let result = ids(&filter.apply(catalog.locations()));
        assert!(result.contains(&"red-fort".to_string()));
    }

    #[test]
    fn criteria_combine() {
        let catalog = Catalog::sample().unwrap();
        let mut filter = LocationFilter::default();
        filter.toggle_category(CategoryId::new("landmark"));
        filter.set_search("qutub");
        assert_eq!(ids(&filter.apply(catalog.locations())), vec!["qutub-minar"]);

        filter.toggle_category(CategoryId::new("landmark"));
        filter.toggle_category(CategoryId::new("food"));
        assert!(filter.apply(catalog.locations()).is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut filter = LocationFilter::default();
        filter.toggle_category(CategoryId::new("food"));
        filter.set_search("x");
        filter.clear();
        assert_eq!(filter, LocationFilter::default());
    }
}
