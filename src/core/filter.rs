//! Category and field filtering
//!
//! Both filters keep the input order and treat [`ALL`] as "no restriction".

use crate::core::record::Record;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Sentinel selection matching every record
pub const ALL: &str = "all";

/// Narrows a collection to a single category
///
/// # Example
/// ```rust,ignore
/// let facets = CategoryFilter::categories(&products);   // ["all", "Books", "Toys"]
/// let books = CategoryFilter::apply(&products, Some("Books"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryFilter;

impl CategoryFilter {
    /// Distinct categories in first-seen order, with [`ALL`] prepended
    pub fn categories<T: Record>(items: &[T]) -> Vec<String> {
        let distinct: IndexSet<&str> = items.iter().map(|item| item.category()).collect();
        std::iter::once(ALL)
            .chain(distinct)
            .map(str::to_string)
            .collect()
    }

    /// Whether `selected` matches every record
    pub fn is_all(selected: Option<&str>) -> bool {
        selected.is_none_or(|value| value == ALL)
    }

    /// Keep records whose category equals `selected` exactly
    ///
    /// `None` or [`ALL`] returns the input unchanged.
    pub fn apply<T: Record>(items: &[T], selected: Option<&str>) -> Vec<T> {
        match selected {
            Some(category) if !Self::is_all(selected) => items
                .iter()
                .filter(|item| item.category() == category)
                .cloned()
                .collect(),
            _ => items.to_vec(),
        }
    }
}

/// Selectable values for one filterable field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub field: String,
    pub options: Vec<String>,
}

/// Per-field selections, each defaulting to [`ALL`]
///
/// A record passes when, for every field with a concrete selection, the
/// field's display text equals the selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldFilters {
    selections: IndexMap<String, String>,
}

impl FieldFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters over `fields`, every one starting at [`ALL`]
    pub fn for_fields<'a>(fields: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            selections: fields
                .into_iter()
                .map(|field| (field.to_string(), ALL.to_string()))
                .collect(),
        }
    }

    /// Select a value for a field
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.selections.insert(field.into(), value.into());
    }

    /// Current selection for a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.selections.get(field).map(String::as_str)
    }

    /// Reset every field to [`ALL`]
    pub fn reset(&mut self) {
        for value in self.selections.values_mut() {
            *value = ALL.to_string();
        }
    }

    /// Whether any field has a concrete selection
    pub fn is_active(&self) -> bool {
        self.selections.values().any(|value| value != ALL)
    }

    /// Option lists for every tracked field: [`ALL`] followed by distinct
    /// values in first-seen order
    pub fn options<T: Record>(&self, items: &[T]) -> Vec<FilterOptions> {
        self.selections
            .keys()
            .map(|field| {
                let distinct: IndexSet<String> = items
                    .iter()
                    .filter_map(|item| item.field_value(field))
                    .map(|value| value.to_string())
                    .collect();
                FilterOptions {
                    field: field.clone(),
                    options: std::iter::once(ALL.to_string()).chain(distinct).collect(),
                }
            })
            .collect()
    }

    /// Keep records matching every concrete selection
    pub fn apply<T: Record>(&self, items: &[T]) -> Vec<T> {
        if !self.is_active() {
            return items.to_vec();
        }

        items
            .iter()
            .filter(|item| self.matches(*item))
            .cloned()
            .collect()
    }

    fn matches<T: Record>(&self, item: &T) -> bool {
        self.selections
            .iter()
            .filter(|(_, selected)| selected.as_str() != ALL)
            .all(|(field, selected)| {
                item.field_value(field)
                    .is_some_and(|value| value.to_string() == *selected)
            })
    }
}
