//! Record trait defining the item abstraction the catalog pipeline works over

use crate::core::field::FieldValue;

/// One row of a fetched collection.
///
/// A record has a stable identifier, a category used by the category facet,
/// and a fixed schema of named fields readable through [`field_value`].
/// Only the fields listed in [`sortable_fields`] may be used as sort columns.
///
/// Records are immutable for the lifetime of a fetch result, which is why
/// the pipeline can freely clone them into filtered, sorted and paged views.
///
/// Most records implement this trait through [`impl_record!`](crate::impl_record).
///
/// [`field_value`]: Record::field_value
/// [`sortable_fields`]: Record::sortable_fields
pub trait Record: Clone + Send + Sync + 'static {
    /// Stable unique identifier
    fn id(&self) -> u64;

    /// Category value matched by the category filter (case-sensitive)
    fn category(&self) -> &str;

    /// Read a named field, `None` when the record has no such field
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Names of every readable field
    fn fields() -> &'static [&'static str];

    /// Names of the fields that may be used as sort columns
    fn sortable_fields() -> &'static [&'static str];

    /// Whether `column` is a registered sort column for this record type
    fn is_sortable(column: &str) -> bool {
        Self::sortable_fields().contains(&column)
    }
}
