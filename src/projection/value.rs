//! Field Values

use std::cmp::Ordering;

use jiff::civil::Date;
use rust_decimal::Decimal;

/// Runtime value of one top-level entity field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Text field
    Text(&'a str),

    /// Integer id or decimal amount
    Number(Decimal),

    /// Calendar date
    Date(Date),

    /// Field absent on this entity
    Missing,
}

impl FieldValue<'_> {
    /// Lowercased text used for free-text search.
    ///
    /// Only text and numbers take part in search; dates and missing values
    /// return `None`.
    pub fn search_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(text) => Some(text.to_lowercase()),
            FieldValue::Number(number) => Some(number.normalize().to_string()),
            FieldValue::Date(_) | FieldValue::Missing => None,
        }
    }

    /// Relational comparison that never fails: values of different kinds
    /// (and missing values) compare as equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for FieldValue<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(left), FieldValue::Text(right)) => Some(left.cmp(right)),
            (FieldValue::Number(left), FieldValue::Number(right)) => Some(left.cmp(right)),
            (FieldValue::Date(left), FieldValue::Date(right)) => Some(left.cmp(right)),
            (FieldValue::Missing, FieldValue::Missing) => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Number(Decimal::from(value))
    }
}

impl From<Decimal> for FieldValue<'_> {
    fn from(value: Decimal) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Date> for FieldValue<'_> {
    fn from(value: Date) -> Self {
        FieldValue::Date(value)
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn numbers_search_in_normalised_form() {
        assert_eq!(
            FieldValue::Number(Decimal::new(1250, 2)).search_text(),
            Some("12.5".to_string())
        );
        assert_eq!(FieldValue::from(1000_i64).search_text(), Some("1000".to_string()));
    }

    #[test]
    fn text_search_is_lowercased_without_trimming() {
        assert_eq!(
            FieldValue::Text(" Rye Bread ").search_text(),
            Some(" rye bread ".to_string())
        );
    }

    #[test]
    fn dates_and_missing_values_are_not_searchable() {
        assert_eq!(FieldValue::Date(date(2024, 1, 1)).search_text(), None);
        assert_eq!(FieldValue::Missing.search_text(), None);
    }

    #[test]
    fn text_compares_lexicographically() {
        assert_eq!(
            FieldValue::Text("Apple").compare(&FieldValue::Text("Banana")),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Text("banana").compare(&FieldValue::Text("Banana")),
            Ordering::Greater
        );
    }

    #[test]
    fn numbers_compare_numerically() {
        assert_eq!(
            FieldValue::from(10_i64).compare(&FieldValue::Number(Decimal::new(95, 1))),
            Ordering::Greater
        );
    }

    #[test]
    fn mismatched_kinds_compare_equal() {
        assert_eq!(
            FieldValue::Text("10").compare(&FieldValue::from(5_i64)),
            Ordering::Equal
        );
        assert_eq!(
            FieldValue::Missing.compare(&FieldValue::Date(date(2024, 1, 1))),
            Ordering::Equal
        );
    }
}
