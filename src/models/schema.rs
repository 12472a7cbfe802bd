//! Schema-related data models.
//!
//! Two layers live here: the raw rows returned by the catalog queries, decoded
//! into fixed typed structs at the driver boundary, and the aggregated
//! schema → table → column tree that is rendered.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Constraint type string that the document view renders in its Keys column.
pub const PRIMARY_KEY: &str = "PRIMARY KEY";

/// One column definition as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ColumnRow {
    pub table_name: String,
    pub column_name: String,
    /// SQL-standard type name, e.g. `character varying`
    pub data_type: String,
    /// Native type name, e.g. `varchar`
    pub udt_name: String,
    pub nullable: bool,
    /// Character maximum length, falling back to numeric precision
    pub length: Option<i32>,
    pub description: Option<String>,
}

impl ColumnRow {
    /// Minimal row for a nullable column without length or comment.
    pub fn new(
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        data_type: impl Into<String>,
        udt_name: impl Into<String>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            column_name: column_name.into(),
            data_type: data_type.into(),
            udt_name: udt_name.into(),
            nullable: true,
            length: None,
            description: None,
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_length(mut self, length: i32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One (constraint, column) association as returned by the catalog.
///
/// A composite key yields several rows sharing `constraint_name`.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ConstraintRow {
    pub constraint_name: String,
    /// `PRIMARY KEY`, `FOREIGN KEY`, `UNIQUE` or `CHECK`
    pub constraint_type: String,
    pub table_name: String,
    pub column_name: String,
}

impl ConstraintRow {
    pub fn new(
        constraint_name: impl Into<String>,
        constraint_type: impl Into<String>,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            constraint_type: constraint_type.into(),
            table_name: table_name.into(),
            column_name: column_name.into(),
        }
    }
}

/// Table comment as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TableCommentRow {
    pub table_name: String,
    pub description: String,
}

/// Comments attached to a schema and its tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDescriptions {
    pub schema: Option<String>,
    /// Table name → comment
    pub tables: HashMap<String, String>,
}

impl CatalogDescriptions {
    pub fn new(schema: Option<String>, rows: Vec<TableCommentRow>) -> Self {
        Self {
            schema: schema.filter(|s| !s.is_empty()),
            tables: rows
                .into_iter()
                .filter(|row| !row.description.is_empty())
                .map(|row| (row.table_name, row.description))
                .collect(),
        }
    }

    pub fn table(&self, name: &str) -> Option<String> {
        self.tables.get(name).cloned()
    }
}

/// Aggregated column with its resolved constraint list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub data_type: String,
    pub alias_data_type: String,
    /// Serialized as a JSON boolean, not the catalog's `"YES"`/`"NO"` text.
    pub nullable: bool,
    pub length: Option<i32>,
    /// Constraint types in catalog order, duplicates kept
    pub constraints: Vec<String>,
}

impl Column {
    /// Build a column from its catalog row and the constraint types joined to it.
    pub fn from_row(row: &ColumnRow, constraints: Vec<String>) -> Self {
        Self {
            name: row.column_name.clone(),
            description: row.description.clone().filter(|d| !d.is_empty()),
            data_type: row.data_type.clone(),
            alias_data_type: row.udt_name.clone(),
            nullable: row.nullable,
            length: row.length,
            constraints,
        }
    }

    /// Whether any constraint on this column is exactly `PRIMARY KEY`.
    pub fn is_primary_key(&self) -> bool {
        self.constraints.iter().any(|c| c == PRIMARY_KEY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            columns: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = columns;
        self
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub name: String,
    #[serde(rename = "desc", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub tables: Vec<Table>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tables: Vec::new(),
        }
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}
