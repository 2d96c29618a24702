//! List view state.

use crate::projection::{SortDirective, Tabular, project};

/// Fetched rows plus the search text and sort directive applied to them.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    entities: Vec<T>,
    search: String,
    sort: SortDirective,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            entities: Vec::new(),
            search: String::new(),
            sort: SortDirective::unsorted(),
        }
    }
}

impl<T: Tabular> ListView<T> {
    /// Empty, unfiltered, unsorted view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the fetched rows, keeping search and sort.
    pub fn replace(&mut self, entities: Vec<T>) {
        self.entities = entities;
    }

    /// Rows in fetch order.
    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Set the search text.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Current sort directive.
    pub fn sort(&self) -> &SortDirective {
        &self.sort
    }

    /// Handle a click on the `field` column header.
    pub fn click_header(&mut self, field: &str) {
        self.sort.click(field);
    }

    /// Rows to display.
    pub fn rows(&self) -> Vec<&T> {
        project(&self.entities, &self.search, &self.sort)
    }
}

impl<T: PartialEq> ListView<T> {
    /// Drop every row structurally equal to `entity`.
    pub fn remove(&mut self, entity: &T) {
        self.entities.retain(|row| row != entity);
    }

    /// Replace every row structurally equal to `old` with `new`.
    pub fn patch(&mut self, old: &T, new: &T)
    where
        T: Clone,
    {
        self.entities
            .iter_mut()
            .filter(|row| **row == *old)
            .for_each(|row| *row = new.clone());
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::entities::Product;

    use super::*;

    fn product(id: i64, name: &str, price: i64) -> Product {
        Product {
            product_id: id,
            product_name: name.to_string(),
            price: Decimal::from(price),
            weight: Decimal::from(100),
        }
    }

    fn view() -> ListView<Product> {
        let mut view = ListView::new();
        view.replace(vec![
            product(1, "Apple", 10),
            product(2, "Banana", 5),
            product(3, "Cranberry juice", 30),
        ]);
        view
    }

    #[test]
    fn rows_apply_search_and_sort() {
        let mut view = view();

        view.set_search("an");
        view.click_header("price");
        view.click_header("price");

        let names: Vec<&str> = view
            .rows()
            .iter()
            .map(|product| product.product_name.as_str())
            .collect();

        assert_eq!(names, ["Cranberry juice", "Banana"]);
    }

    #[test]
    fn replace_keeps_search_and_sort() {
        let mut view = view();
        view.set_search("a");
        view.click_header("productName");

        view.replace(vec![product(9, "Kale", 20)]);

        assert_eq!(view.search(), "a");
        assert_eq!(view.sort(), &SortDirective::ascending("productName"));
        assert_eq!(view.entities().len(), 1);
    }

    #[test]
    fn remove_drops_structural_matches() {
        let mut view = view();

        view.remove(&product(2, "Banana", 5));

        assert_eq!(view.entities().len(), 2);
        assert!(view.entities().iter().all(|p| p.product_id != 2));
    }

    #[test]
    fn patch_replaces_structural_matches_only() {
        let mut view = view();

        view.patch(&product(2, "Banana", 5), &product(2, "Banana", 6));
        view.patch(&product(1, "Apple", 999), &product(1, "Gone", 0));

        assert_eq!(view.entities().get(1), Some(&product(2, "Banana", 6)));
        assert_eq!(view.entities().first(), Some(&product(1, "Apple", 10)));
    }
}
