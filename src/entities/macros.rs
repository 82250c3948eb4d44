//! Macros for reducing boilerplate when defining records
//!
//! These macros generate the repetitive [`Record`](crate::core::record::Record)
//! implementation needed for each catalog item type.

/// Implement [`Record`](crate::core::record::Record) for an existing struct
///
/// Every listed field must have a type convertible through
/// `FieldValue::from(&field)` (strings, integers, floats, booleans,
/// date-times, or options of those).
///
/// # Example
///
/// ```rust,ignore
/// use catalog::prelude::*;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct Book {
///     pub id: u64,
///     pub title: String,
///     pub genre: String,
///     pub pages: u32,
/// }
///
/// impl_record!(
///     Book,
///     id: id,
///     category: genre,
///     fields: [title, genre, pages],
///     sortable: [title, pages]
/// );
/// ```
#[macro_export]
macro_rules! impl_record {
    (
        $type:ident,
        id: $id_field:ident,
        category: $category_field:ident,
        fields: [ $( $field:ident ),* $(,)? ],
        sortable: [ $( $sortable:ident ),* $(,)? ] $(,)?
    ) => {
        impl $crate::core::record::Record for $type {
            fn id(&self) -> u64 {
                self.$id_field
            }

            fn category(&self) -> &str {
                &self.$category_field
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    $(
                        stringify!($field) => {
                            Some($crate::core::field::FieldValue::from(&self.$field))
                        }
                    )*
                    _ => None,
                }
            }

            fn fields() -> &'static [&'static str] {
                &[ $( stringify!($field) ),* ]
            }

            fn sortable_fields() -> &'static [&'static str] {
                &[ $( stringify!($sortable) ),* ]
            }
        }
    };
}
