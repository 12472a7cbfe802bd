//! Schema aggregation.
//!
//! Joins independently fetched column rows and constraint rows on
//! `(table_name, column_name)` into a [`Schema`] tree. The join is a pure
//! relational match: a column's constraint list is every constraint row with
//! the same table and column, in row order, duplicates kept.
//!
//! Output order follows the resolved table list, then the catalog's column
//! order within each table. A table with no column rows still appears, with
//! an empty column list.

use crate::models::{CatalogDescriptions, Column, ColumnRow, ConstraintRow, Schema, Table};
use std::collections::HashMap;

/// Constraint types bucketed by `(table, column)`, preserving row order
/// inside each bucket.
#[derive(Debug, Default)]
pub struct ConstraintIndex<'a> {
    by_column: HashMap<(&'a str, &'a str), Vec<&'a str>>,
}

impl<'a> ConstraintIndex<'a> {
    pub fn build(rows: &'a [ConstraintRow]) -> Self {
        let mut by_column: HashMap<(&str, &str), Vec<&str>> = HashMap::new();
        for row in rows {
            by_column
                .entry((row.table_name.as_str(), row.column_name.as_str()))
                .or_default()
                .push(row.constraint_type.as_str());
        }
        Self { by_column }
    }

    /// Constraint types on `table.column`, in catalog order.
    pub fn lookup(&self, table: &str, column: &str) -> Vec<String> {
        self.by_column
            .get(&(table, column))
            .map(|types| types.iter().map(|t| t.to_string()).collect())
            .unwrap_or_default()
    }
}

/// Build one schema tree from the rows fetched for it.
///
/// `tables` is the resolved table list and fixes the output order.
pub fn aggregate_schema(
    schema_name: &str,
    tables: &[String],
    columns: &[ColumnRow],
    constraints: &[ConstraintRow],
    descriptions: &CatalogDescriptions,
) -> Schema {
    let index = ConstraintIndex::build(constraints);

    let mut columns_by_table: HashMap<&str, Vec<&ColumnRow>> = HashMap::new();
    for row in columns {
        columns_by_table
            .entry(row.table_name.as_str())
            .or_default()
            .push(row);
    }

    let tables = tables
        .iter()
        .map(|table_name| {
            let columns = columns_by_table
                .get(table_name.as_str())
                .map(|rows| {
                    rows.iter()
                        .map(|row| {
                            Column::from_row(row, index.lookup(table_name, &row.column_name))
                        })
                        .collect()
                })
                .unwrap_or_default();

            Table::new(table_name.as_str())
                .with_description(descriptions.table(table_name))
                .with_columns(columns)
        })
        .collect();

    Schema {
        name: schema_name.to_string(),
        description: descriptions.schema.clone(),
        tables,
    }
}
