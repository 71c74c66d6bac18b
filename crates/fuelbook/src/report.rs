//! Plain-text report tables.
//!
//! Every report is a [`Table`]: a title, an `=` rule, a header line, aligned
//! rows and a closing rule. Numbers are formatted with the [`TableFormat`]
//! handed to the builder functions.

use fuelbook_booking::ProductionCostRow;
use fuelbook_core::{CostingMethod, Decimal, StockPosition, TableFormat};
use std::io::{self, Write};

use crate::compare::CompareRow;

/// Horizontal alignment of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// Pad on the right.
    Left,
    /// Pad on the left.
    Right,
}

/// A titled text table.
#[derive(Debug, Clone)]
pub struct Table {
    title: String,
    columns: Vec<(String, Align)>,
    rows: Vec<Vec<String>>,
    empty_message: String,
}

impl Table {
    /// Create a table with no columns.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: Vec::new(),
            rows: Vec::new(),
            empty_message: "(no rows)".to_string(),
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, header: impl Into<String>, align: Align) -> Self {
        self.columns.push((header.into(), align));
        self
    }

    /// Text printed instead of rows when the table is empty.
    #[must_use]
    pub fn when_empty(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Add a row. Missing cells render blank; extra cells are dropped.
    pub fn push_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, (header, _))| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn line(&self, cells: &[String], widths: &[usize]) -> String {
        let parts: Vec<String> = self
            .columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, ((_, align), width))| {
                let cell = cells.get(i).map_or("", String::as_str);
                match align {
                    Align::Left => format!("{cell:<width$}"),
                    Align::Right => format!("{cell:>width$}"),
                }
            })
            .collect();
        parts.join("  ").trim_end().to_string()
    }

    /// Write the table.
    pub fn render<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let widths = self.widths();
        let headers: Vec<String> = self.columns.iter().map(|(h, _)| h.clone()).collect();
        let header = self.line(&headers, &widths);
        let rule = "=".repeat(header.chars().count().max(self.title.chars().count()));

        writeln!(writer, "{}", self.title)?;
        writeln!(writer, "{rule}")?;
        if self.rows.is_empty() {
            writeln!(writer, "{}", self.empty_message)?;
        } else {
            writeln!(writer, "{header}")?;
            for row in &self.rows {
                writeln!(writer, "{}", self.line(row, &widths))?;
            }
        }
        writeln!(writer, "{rule}")?;
        Ok(())
    }

    /// Render into a string.
    pub fn to_text(&self) -> String {
        let mut out = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.render(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// Stock valuation table for one target.
pub fn stock_table(
    target: &str,
    method: CostingMethod,
    positions: &[StockPosition],
    fmt: &TableFormat,
) -> Table {
    let mut table = Table::new(format!("{target} {method} Stock"))
        .column("Item", Align::Left)
        .column("Quantity", Align::Right)
        .column("Unit Cost", Align::Right)
        .column("Total Value", Align::Right)
        .when_empty("No stock.");

    for pos in positions {
        table.push_row(vec![
            pos.material.clone(),
            fmt.number(pos.remaining_quantity),
            fmt.number(pos.unit_cost),
            fmt.number(pos.total_value),
        ]);
    }

    if !positions.is_empty() {
        let total: Decimal = positions.iter().map(|p| p.total_value).sum();
        table.push_row(vec![
            "Total".to_string(),
            String::new(),
            String::new(),
            fmt.number(total),
        ]);
    }

    table
}

/// Per-product production cost summary.
pub fn production_table(title: &str, rows: &[ProductionCostRow], fmt: &TableFormat) -> Table {
    let mut table = Table::new(title)
        .column("Product", Align::Left)
        .column("Unit Cost", Align::Right)
        .column("Materials", Align::Right)
        .column("Job", Align::Right)
        .column("Blueprint", Align::Right)
        .column("Total Materials", Align::Right)
        .column("Total Job", Align::Right)
        .column("Total Blueprint", Align::Right)
        .column("Total Cost", Align::Right)
        .when_empty("No products.");

    for row in rows {
        table.push_row(vec![
            row.product.clone(),
            fmt.number(row.unit_cost),
            fmt.number(row.materials_cost_per_unit),
            fmt.number(row.job_cost_per_unit),
            fmt.number(row.blueprint_cost_per_unit),
            fmt.number(row.total_materials_cost),
            fmt.number(row.total_job_cost),
            fmt.number(row.total_blueprint_cost),
            fmt.number(row.total_cost),
        ]);
    }

    table
}

/// Per-unit material contributions of one product.
pub fn material_breakdown_table(row: &ProductionCostRow, fmt: &TableFormat) -> Table {
    let mut table = Table::new(format!("{} per unit", row.product))
        .column("Component", Align::Left)
        .column("Cost", Align::Right);

    for (material, cost) in &row.material_costs_per_unit {
        table.push_row(vec![material.clone(), fmt.number(*cost)]);
    }
    table.push_row(vec!["Job".to_string(), fmt.number(row.job_cost_per_unit)]);
    table.push_row(vec![
        "Blueprint".to_string(),
        fmt.number(row.blueprint_cost_per_unit),
    ]);

    table
}

/// Buy-location comparison table.
pub fn compare_table(rows: &[CompareRow], fmt: &TableFormat) -> Table {
    let mut table = Table::new("Profit Comparison (latest prices)")
        .column("Item", Align::Left)
        .column("Volume", Align::Right)
        .column("Buy Remote", Align::Right)
        .column("Buy Local", Align::Right)
        .column("Shipping", Align::Right)
        .column("Net Remote", Align::Right)
        .column("Difference", Align::Right)
        .column("Better", Align::Left)
        .when_empty("No items priced in both markets.");

    for row in rows {
        table.push_row(vec![
            row.item.clone(),
            fmt.number(row.volume),
            fmt.number(row.buy_remote),
            fmt.number(row.buy_local),
            fmt.number(row.shipping_cost),
            fmt.number(row.net_remote),
            fmt.number(row.difference),
            row.better.to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new("Demo")
            .column("Name", Align::Left)
            .column("Value", Align::Right);
        table.push_row(vec!["a".to_string(), "1.00".to_string()]);
        table.push_row(vec!["longer".to_string(), "1,000.00".to_string()]);

        let text = table.to_text();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Demo");
        assert_eq!(lines[1], "=".repeat(16));
        assert_eq!(lines[2], "Name       Value");
        assert_eq!(lines[3], "a           1.00");
        assert_eq!(lines[4], "longer  1,000.00");
        assert_eq!(lines[5], lines[1]);
    }

    #[test]
    fn test_empty_table_message() {
        let table = Table::new("Nothing here")
            .column("Item", Align::Left)
            .when_empty("No stock.");
        let text = table.to_text();
        assert_eq!(text, "Nothing here\n============\nNo stock.\n============\n");
    }

    #[test]
    fn test_stock_table_has_total() {
        let positions = vec![
            StockPosition::new("Coolant", dec!(30), dec!(20)),
            StockPosition::new("Robotics", dec!(2), dec!(50000)),
        ];
        let table = stock_table("RYC", CostingMethod::Fifo, &positions, &TableFormat::default());

        assert_eq!(table.len(), 3);
        let text = table.to_text();
        assert!(text.starts_with("RYC FIFO Stock\n"));
        assert!(text.contains("Coolant"));
        assert!(text.contains("100,600.00"));
    }

    #[test]
    fn test_production_and_breakdown_tables() {
        let row = ProductionCostRow {
            product: "Helium Fuel Block".to_string(),
            unit_cost: dec!(225),
            materials_cost_per_unit: dec!(175),
            job_cost_per_unit: dec!(40),
            blueprint_cost_per_unit: dec!(10),
            total_materials_cost: dec!(17500),
            total_job_cost: dec!(4000),
            total_blueprint_cost: dec!(1000),
            total_cost: dec!(22500),
            material_costs_per_unit: [("Helium Isotopes".to_string(), dec!(175))].into(),
        };
        let fmt = TableFormat::default();

        let summary = production_table("RYC Production", &[row.clone()], &fmt).to_text();
        assert!(summary.contains("22,500.00"));

        let breakdown = material_breakdown_table(&row, &fmt);
        assert_eq!(breakdown.len(), 3);
        assert!(breakdown.to_text().contains("Helium Isotopes"));
    }
}
