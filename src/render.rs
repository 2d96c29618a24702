//! Render
//!
//! Terminal output for the pages: list tables, the navigation header and the
//! product-order picker.

use std::io;

use jiff::civil::Date;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    entities::ProductOrder,
    pages::{OrderSelection, format_amount, order_label},
    projection::{FieldValue, SortDirection, SortDirective, Tabular},
    routes::{APP_TITLE, NAV_ENTRIES},
};

/// Errors writing terminal output.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The output stream rejected the write.
    #[error("failed to write output")]
    Io(#[from] io::Error),
}

/// Delivery dates read `day / month / year`.
pub fn format_date(date: Date) -> String {
    format!("{} / {} / {}", date.day(), date.month(), date.year())
}

fn cell(value: &FieldValue<'_>) -> String {
    match value {
        FieldValue::Text(text) => (*text).to_string(),
        FieldValue::Number(number) => number.normalize().to_string(),
        FieldValue::Date(date) => format_date(*date),
        FieldValue::Missing => String::new(),
    }
}

fn header(name: &str, text: &str, sort: &SortDirective) -> String {
    if sort.field() != Some(name) {
        return text.to_string();
    }

    match sort.direction() {
        SortDirection::Ascending => format!("{text} ▲"),
        SortDirection::Descending => format!("{text} ▼"),
    }
}

/// Write `rows` as a table, marking the sorted column.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_table<T: Tabular>(
    mut out: impl io::Write,
    rows: &[&T],
    sort: &SortDirective,
) -> Result<(), RenderError> {
    if rows.is_empty() {
        writeln!(out, "No rows.")?;
        return Ok(());
    }

    let mut builder = Builder::default();

    builder.push_record(
        T::COLUMNS
            .iter()
            .map(|column| header(column.name, column.header, sort)),
    );

    for row in rows {
        builder.push_record(
            T::COLUMNS
                .iter()
                .map(|column| cell(&(column.value)(row))),
        );
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    let numeric = rows.first().map_or_else(Vec::new, |first| {
        T::COLUMNS
            .iter()
            .enumerate()
            .filter(|(_, column)| matches!((column.value)(first), FieldValue::Number(_)))
            .map(|(index, _)| index)
            .collect()
    });

    for index in numeric {
        table.modify(Columns::new(index..=index), Alignment::right());
    }

    writeln!(out, "{table}")?;

    Ok(())
}

/// Write the title and navigation links, bracketing the active one.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_nav(mut out: impl io::Write, current_path: &str) -> Result<(), RenderError> {
    let links: Vec<String> = NAV_ENTRIES
        .iter()
        .map(|entry| {
            if entry.is_active(current_path) {
                format!("[{}]", entry.label)
            } else {
                entry.label.to_string()
            }
        })
        .collect();

    writeln!(out, "{APP_TITLE}  {}", links.join("  "))?;

    Ok(())
}

/// Write the product-order picker and the totals of the selection.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_order_picker(
    mut out: impl io::Write,
    orders: &[ProductOrder],
    selection: &OrderSelection,
) -> Result<(), RenderError> {
    for order in orders {
        let mark = if selection.is_selected(order.order_id) {
            "x"
        } else {
            " "
        };

        writeln!(out, "[{mark}] {:>4}  {}", order.order_id, order_label(order))?;
    }

    let totals = selection.totals(orders);

    writeln!(out, "Total cost: {}", format_amount(totals.cost))?;
    writeln!(out, "Total weight: {}", format_amount(totals.weight))?;

    Ok(())
}

/// Write an inline error line.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_error(mut out: impl io::Write, message: &str) -> Result<(), RenderError> {
    writeln!(out, "! {message}")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::entities::{Delivery, Product};

    use super::*;

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<(), RenderError>) -> TestResult<String> {
        let mut out = Vec::new();
        write(&mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn dates_use_one_based_months() {
        assert_eq!(format_date(date(1996, 11, 18)), "18 / 11 / 1996");
        assert_eq!(format_date(date(2024, 1, 5)), "5 / 1 / 2024");
    }

    #[test]
    fn product_table_marks_sorted_column() -> TestResult {
        let milk = Product {
            product_id: 3,
            product_name: "Milk".to_string(),
            price: Decimal::new(1250, 2),
            weight: Decimal::from(1000),
        };

        let output = render(|out| {
            write_table(out, &[&milk], &SortDirective::descending("price"))
        })?;

        assert!(output.contains("Product Name"));
        assert!(output.contains("Price ▼"));
        assert!(output.contains("12.5"));
        assert!(!output.contains("Weight ▲"));

        Ok(())
    }

    #[test]
    fn delivery_table_formats_dates() -> TestResult {
        let delivery = Delivery {
            delivery_id: 1,
            delivery_date: date(2024, 3, 9),
            destination: "Valby".to_string(),
            from_warehouse: "Glostrup".to_string(),
            product_orders: Vec::new(),
        };

        let output = render(|out| write_table(out, &[&delivery], &SortDirective::unsorted()))?;

        assert!(output.contains("Delivery Date"));
        assert!(output.contains("9 / 3 / 2024"));
        assert!(output.contains("Glostrup"));

        Ok(())
    }

    #[test]
    fn empty_table_says_so() -> TestResult {
        let output = render(|out| write_table::<Product>(out, &[], &SortDirective::unsorted()))?;

        assert_eq!(output, "No rows.\n");

        Ok(())
    }

    #[test]
    fn nav_brackets_active_entry() -> TestResult {
        let output = render(|out| write_nav(out, "/deliveries"))?;

        assert_eq!(output, "købmandsapp.io  Products  [Deliveries]  Vans\n");

        Ok(())
    }

    #[test]
    fn picker_checks_selected_orders_and_totals() -> TestResult {
        let orders = [ProductOrder {
            order_id: 5,
            quantity: 2,
            product: Product {
                product_id: 1,
                product_name: "Rye bread".to_string(),
                price: Decimal::from(28),
                weight: Decimal::from(750),
            },
        }];
        let mut selection = OrderSelection::default();
        selection.toggle(5);

        let output = render(|out| write_order_picker(out, &orders, &selection))?;

        assert_eq!(
            output,
            "[x]    5  Rye bread | 2 stk. | 56DKK | 1500g (1.5kg)\nTotal cost: 56\nTotal weight: 1500\n"
        );

        Ok(())
    }

    #[test]
    fn picker_marks_overflowing_totals() -> TestResult {
        let orders = [ProductOrder {
            order_id: 7,
            quantity: u32::MAX,
            product: Product {
                product_id: 1,
                product_name: "Gold bar".to_string(),
                price: Decimal::MAX,
                weight: Decimal::ONE,
            },
        }];
        let mut selection = OrderSelection::default();
        selection.toggle(7);

        let output = render(|out| write_order_picker(out, &orders, &selection))?;

        assert!(output.contains("| overflowDKK |"));
        assert!(output.ends_with("Total cost: overflow\nTotal weight: 4294967295\n"));

        Ok(())
    }
}
