//! Multi-column sorting
//!
//! A [`SortSpec`] is an ordered list of `(column, direction)` pairs; index 0
//! is the primary column. [`SortSpec::toggle`] implements the two header-click
//! behaviors (replace and accumulate) and [`sorted`] produces the ordered view.

use crate::core::error::CatalogError;
use crate::core::record::Record;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort direction for one column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    /// The opposite direction
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Apply this direction to an ascending comparison
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// One `(column, direction)` pair of a sort specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortEntry {
    pub column: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortEntry {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn ascending(column: impl Into<String>) -> Self {
        Self::new(column, SortDirection::Ascending)
    }
}

/// Ordered sort priorities, primary column first
///
/// No column appears twice. An empty spec keeps source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec(Vec<SortEntry>);

impl SortSpec {
    /// Empty specification (source order)
    pub fn new() -> Self {
        Self::default()
    }

    /// Specification with a single ascending primary column
    pub fn by(column: impl Into<String>) -> Self {
        Self(vec![SortEntry::ascending(column)])
    }

    /// Build a specification from entries, keeping the first occurrence of
    /// any repeated column
    pub fn from_entries(entries: impl IntoIterator<Item = SortEntry>) -> Self {
        let mut spec = Self::new();
        for entry in entries {
            if spec.position(&entry.column).is_none() {
                spec.0.push(entry);
            }
        }
        spec
    }

    pub fn entries(&self) -> &[SortEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The primary entry, if any
    pub fn primary(&self) -> Option<&SortEntry> {
        self.0.first()
    }

    /// Priority index of `column` (0 is primary)
    pub fn position(&self, column: &str) -> Option<usize> {
        self.0.iter().position(|entry| entry.column == column)
    }

    /// Direction currently applied to `column`, if it is sorted
    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.position(column).map(|i| self.0[i].direction)
    }

    /// Check every column against the record type's registered sort columns
    pub fn validate<T: Record>(&self) -> Result<(), CatalogError> {
        match self.0.iter().find(|entry| !T::is_sortable(&entry.column)) {
            Some(entry) => Err(invalid_column::<T>(&entry.column)),
            None => Ok(()),
        }
    }

    /// Toggle `column` in response to a header click
    ///
    /// - `multi = false` (replace): when `column` is already primary its
    ///   direction flips and the rest of the spec is kept; otherwise the spec
    ///   collapses to `[{column, asc}]`.
    /// - `multi = true` (accumulate): when `column` is present anywhere its
    ///   direction flips in place; otherwise it is appended ascending as the
    ///   lowest priority.
    ///
    /// Columns that `T` does not register are rejected and the spec is left
    /// unchanged.
    pub fn toggle<T: Record>(&mut self, column: &str, multi: bool) -> Result<(), CatalogError> {
        ensure_sortable::<T>(column)?;

        match (self.position(column), multi) {
            (Some(0), false) => {
                self.0[0].direction = self.0[0].direction.flipped();
            }
            (_, false) => {
                self.0 = vec![SortEntry::ascending(column)];
            }
            (Some(i), true) => {
                self.0[i].direction = self.0[i].direction.flipped();
            }
            (None, true) => {
                self.0.push(SortEntry::ascending(column));
            }
        }

        tracing::debug!(column = column, multi = multi, spec = ?self.0, "Sort toggled");
        Ok(())
    }

    /// Compare two records by every entry in priority order
    pub fn compare<T: Record>(&self, a: &T, b: &T) -> Ordering {
        self.0
            .iter()
            .map(|entry| compare_column(a, b, entry))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Compare one column; missing and null values go last in either direction
fn compare_column<T: Record>(a: &T, b: &T, entry: &SortEntry) -> Ordering {
    let a_value = a.field_value(&entry.column).filter(|v| !v.is_null());
    let b_value = b.field_value(&entry.column).filter(|v| !v.is_null());

    match (a_value, b_value) {
        (Some(x), Some(y)) => entry.direction.apply(x.compare(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Reject a sort toggle on a column `T` does not register, with a diagnostic
pub fn ensure_sortable<T: Record>(column: &str) -> Result<(), CatalogError> {
    if T::is_sortable(column) {
        return Ok(());
    }

    tracing::warn!(
        column = column,
        registered = ?T::sortable_fields(),
        "Ignoring sort toggle on unregistered column"
    );
    Err(invalid_column::<T>(column))
}

fn invalid_column<T: Record>(column: &str) -> CatalogError {
    CatalogError::InvalidColumn {
        column: column.to_string(),
        registered: T::sortable_fields(),
    }
}

/// Return a new sequence ordered by `spec`
///
/// The sort is stable: records that tie on every entry keep their input
/// order. An empty input yields an empty output.
pub fn sorted<T: Record>(items: &[T], spec: &SortSpec) -> Vec<T> {
    let mut out = items.to_vec();
    if !spec.is_empty() {
        out.sort_by(|a, b| spec.compare(a, b));
    }
    out
}
