//! Word document renderer.
//!
//! Layout: per schema a level-2 heading and a description line; per table a
//! level-3 heading, a description line and a five-column table with one row
//! per column. The Keys cell lists only `PRIMARY KEY` entries; other
//! constraint kinds stay in the JSON view.

use crate::error::{DocsError, DocsResult};
use crate::models::{Column, PRIMARY_KEY, Schema, Table};
use crate::output::OutputDir;
use docx_rs::{Docx, Paragraph, Run, Style, StyleType, Table as DocxTable, TableCell, TableRow};
use std::io::Cursor;
use std::path::PathBuf;
use tracing::debug;

pub const HEADER: [&str; 5] = ["Column Name", "Data Type", "Keys", "Nullable", "Description"];

const SCHEMA_HEADING: &str = "Heading2";
const TABLE_HEADING: &str = "Heading3";

/// Cell texts for one column row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnCells {
    pub name: String,
    pub data_type: String,
    pub keys: Vec<String>,
    pub nullable: &'static str,
    pub description: String,
}

impl ColumnCells {
    pub fn from_column(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            data_type: data_type_cell(column),
            keys: key_cells(column),
            nullable: nullable_cell(column),
            description: column.description.clone().unwrap_or_default(),
        }
    }
}

/// `type(length)` when a length or precision is known, bare `type` otherwise.
pub fn data_type_cell(column: &Column) -> String {
    match column.length {
        Some(length) => format!("{}({})", column.data_type, length),
        None => column.data_type.clone(),
    }
}

/// Constraint entries shown in the Keys cell: exact `PRIMARY KEY` matches only.
pub fn key_cells(column: &Column) -> Vec<String> {
    column
        .constraints
        .iter()
        .filter(|c| c.as_str() == PRIMARY_KEY)
        .cloned()
        .collect()
}

pub fn nullable_cell(column: &Column) -> &'static str {
    if column.nullable { "YES" } else { "NO" }
}

/// Body rows for one table, in column order.
pub fn table_rows(table: &Table) -> Vec<ColumnCells> {
    table.columns.iter().map(ColumnCells::from_column).collect()
}

fn description_line(description: Option<&str>) -> String {
    format!("Description: {}", description.unwrap_or_default())
}

fn text(value: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(value))
}

fn heading(value: &str, style: &str) -> Paragraph {
    text(value).style(style)
}

fn cell(lines: &[String]) -> TableCell {
    // Word rejects cells without a paragraph.
    if lines.is_empty() {
        return TableCell::new().add_paragraph(Paragraph::new());
    }
    lines
        .iter()
        .fold(TableCell::new(), |cell, line| cell.add_paragraph(text(line)))
}

fn header_row() -> TableRow {
    TableRow::new(
        HEADER
            .iter()
            .map(|h| {
                TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(*h).bold()))
            })
            .collect(),
    )
}

fn body_row(cells: ColumnCells) -> TableRow {
    TableRow::new(vec![
        cell(&[cells.name]),
        cell(&[cells.data_type]),
        cell(&cells.keys),
        cell(&[cells.nullable.to_string()]),
        cell(&[cells.description]),
    ])
}

fn column_table(table: &Table) -> DocxTable {
    let rows = std::iter::once(header_row())
        .chain(table_rows(table).into_iter().map(body_row))
        .collect();
    DocxTable::new(rows)
}

/// Lay out the whole document.
pub fn build_document(schemas: &[Schema]) -> Docx {
    let mut docx = Docx::new()
        .add_style(
            Style::new(SCHEMA_HEADING, StyleType::Paragraph)
                .name("Heading 2")
                .size(32)
                .bold(),
        )
        .add_style(
            Style::new(TABLE_HEADING, StyleType::Paragraph)
                .name("Heading 3")
                .size(26)
                .bold(),
        );

    for schema in schemas {
        docx = docx
            .add_paragraph(heading(&schema.name, SCHEMA_HEADING))
            .add_paragraph(text(&description_line(schema.description.as_deref())));

        for table in &schema.tables {
            docx = docx
                .add_paragraph(heading(&table.name, TABLE_HEADING))
                .add_paragraph(text(&description_line(table.description.as_deref())))
                .add_table(column_table(table));
        }
    }
    docx
}

/// Serialize the document into a `.docx` byte buffer.
pub fn pack_document(schemas: &[Schema]) -> DocsResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    build_document(schemas)
        .build()
        .pack(&mut buf)
        .map_err(|e| DocsError::render(format!("Failed to pack document: {}", e)))?;
    Ok(buf.into_inner())
}

/// Render `schemas` into a document file under `output` and return its path.
///
/// The caller removes the file once it has been delivered.
pub async fn render_document(schemas: &[Schema], output: &OutputDir) -> DocsResult<PathBuf> {
    let bytes = pack_document(schemas)?;
    let path = output.write_artifact(&bytes).await?;
    debug!(path = %path.display(), size = bytes.len(), "Document written");
    Ok(path)
}
