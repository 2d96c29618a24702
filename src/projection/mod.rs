//! View Projection
//!
//! Derives the rows a list view shows from the fetched entities, the search
//! text and the sort directive. The projection is a pure function of those
//! three inputs and is recomputed whenever any of them changes.

mod columns;
mod sort;
mod value;

pub use columns::{Column, Tabular};
pub use sort::{SortDirection, SortDirective};
pub use value::FieldValue;

/// Whether any searchable top-level field of `entity` contains `needle`.
///
/// `needle` must already be lowercased. Text and numbers take part; dates,
/// nested lists and missing values never match. An empty needle matches
/// everything.
pub fn matches<T: Tabular>(entity: &T, needle: &str) -> bool {
    T::COLUMNS.iter().any(|column| {
        (column.value)(entity)
            .search_text()
            .is_some_and(|text| text.contains(needle))
    })
}

/// Filter then sort `entities` for display without touching the input.
///
/// Filtering is a case-insensitive substring test with no trimming. With no
/// active field (or a field the entity does not have) rows keep fetch order;
/// otherwise they are ordered by that field in the directive's direction.
/// Rows with equal keys keep their relative order.
pub fn project<'a, T: Tabular>(
    entities: &'a [T],
    filter: &str,
    directive: &SortDirective,
) -> Vec<&'a T> {
    let needle = filter.to_lowercase();

    let mut rows: Vec<&T> = entities
        .iter()
        .filter(|entity| matches(*entity, &needle))
        .collect();

    // Every column yields a single value kind, so the comparison is total.
    if let Some(column) = directive.field().and_then(T::column) {
        let direction = directive.direction();

        rows.sort_by(|left, right| {
            direction.apply((column.value)(left).compare(&(column.value)(right)))
        });
    }

    rows
}
