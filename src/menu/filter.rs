//! Menu Filtering
//!
//! Category, search and dietary filters compose conjunctively over the fetched menu.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::menu::models::{Category, CategoryLookup, MenuItem};

/// Label of the catch-all category entry.
pub const ALL_CATEGORIES: &str = "All";

/// Category picker selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategorySelection {
    /// Every category.
    #[default]
    All,

    /// A single category, by display name.
    Named(String),
}

impl CategorySelection {
    /// Build a selection from a picker label; `"All"` selects every category.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();

        if label == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Named(label)
        }
    }

    fn matches(&self, category_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Named(name) => name == category_name,
        }
    }
}

/// Independently toggled dietary filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryFilters {
    /// Only vegetarian items
    pub vegetarian: bool,

    /// Only spicy items
    pub spicy: bool,

    /// Only popular items
    pub popular: bool,
}

/// A dietary filter toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietaryFilter {
    /// Vegetarian
    Vegetarian,

    /// Spicy
    Spicy,

    /// Popular
    Popular,
}

impl DietaryFilters {
    /// Flip a single filter.
    pub fn toggle(&mut self, filter: DietaryFilter) {
        match filter {
            DietaryFilter::Vegetarian => self.vegetarian = !self.vegetarian,
            DietaryFilter::Spicy => self.spicy = !self.spicy,
            DietaryFilter::Popular => self.popular = !self.popular,
        }
    }

    fn matches(self, item: &MenuItem) -> bool {
        (!self.vegetarian || item.is_vegetarian)
            && (!self.spicy || item.is_spicy)
            && (!self.popular || item.is_popular)
    }
}

/// Browsing filter state. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuFilter {
    /// Selected category
    pub selected_category: CategorySelection,

    /// Free-text search
    pub search_term: String,

    /// Dietary toggles
    pub active_filters: DietaryFilters,
}

impl MenuFilter {
    /// Select a category by picker label.
    pub fn select_category(&mut self, label: impl Into<String>) {
        self.selected_category = CategorySelection::from_label(label);
    }

    /// Replace the search term.
    pub fn search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Flip a dietary filter.
    pub fn toggle(&mut self, filter: DietaryFilter) {
        self.active_filters.toggle(filter);
    }

    /// Whether a single item passes every active predicate.
    #[must_use]
    pub fn matches(&self, item: &MenuItem, categories: &CategoryLookup) -> bool {
        self.selected_category
            .matches(categories.resolve(&item.category))
            && matches_search(item, &self.search_term)
            && self.active_filters.matches(item)
            && item.is_available != Some(false)
    }
}

fn matches_search(item: &MenuItem, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();

    item.name.to_lowercase().contains(&needle) || item.description.to_lowercase().contains(&needle)
}

/// The visible subset of `items`, in response order.
#[must_use]
pub fn filter_menu<'a>(
    items: &'a [MenuItem],
    categories: &CategoryLookup,
    filter: &MenuFilter,
) -> Vec<&'a MenuItem> {
    items
        .iter()
        .filter(|item| filter.matches(item, categories))
        .collect()
}

/// Group items by resolved category name. Groups are sorted by name, items keep their order.
#[must_use]
pub fn group_by_category<'a>(
    items: impl IntoIterator<Item = &'a MenuItem>,
    categories: &CategoryLookup,
) -> Vec<(String, Vec<&'a MenuItem>)> {
    let mut groups: BTreeMap<String, Vec<&'a MenuItem>> = BTreeMap::new();

    for item in items {
        groups
            .entry(categories.resolve(&item.category).to_string())
            .or_default()
            .push(item);
    }

    groups.into_iter().collect()
}

/// Category picker labels: `"All"` followed by the category names in lexicographic order.
#[must_use]
pub fn category_labels(categories: &[Category]) -> Vec<String> {
    let mut names: Vec<String> = categories.iter().map(|c| c.name.clone()).collect();

    names.sort();
    names.dedup();
    names.insert(0, ALL_CATEGORIES.to_string());

    names
}
