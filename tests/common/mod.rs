//! Shared test fixtures: an in-memory catalog.

#![allow(dead_code)]

use db_docs::db::{CatalogProvider, CatalogSource};
use db_docs::error::{DocsError, DocsResult};
use db_docs::models::{CatalogDescriptions, ColumnRow, ConnectionConfig, ConstraintRow};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Which catalog operation should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    ListTables,
    Columns,
    Constraints,
    Descriptions,
}

/// Catalog holding the rows of a single schema.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    pub schema: String,
    pub tables: Vec<String>,
    pub columns: Vec<ColumnRow>,
    pub constraints: Vec<ConstraintRow>,
    pub descriptions: CatalogDescriptions,
    pub fail_on: Option<FailOn>,
    /// Added before the column query answers
    pub delay: Option<Duration>,
    pub list_calls: AtomicUsize,
}

impl MemoryCatalog {
    pub fn new(schema: &str) -> Self {
        Self {
            schema: schema.to_string(),
            ..Default::default()
        }
    }

    pub fn with_table(mut self, name: &str) -> Self {
        self.tables.push(name.to_string());
        self
    }

    pub fn with_column(mut self, row: ColumnRow) -> Self {
        self.columns.push(row);
        self
    }

    pub fn with_constraint(mut self, row: ConstraintRow) -> Self {
        self.constraints.push(row);
        self
    }

    pub fn failing_on(mut self, op: FailOn) -> Self {
        self.fail_on = Some(op);
        self
    }

    pub fn delayed_by(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check(&self, op: FailOn) -> DocsResult<()> {
        if self.fail_on == Some(op) {
            return Err(DocsError::database(
                format!("permission denied for {:?}", op),
                Some("42501".to_string()),
                "grant access",
            ));
        }
        Ok(())
    }

    fn in_scope(&self, schema: &str, tables: &[String], table: &str) -> bool {
        schema == self.schema && tables.iter().any(|t| t == table)
    }
}

impl CatalogSource for MemoryCatalog {
    async fn list_tables(&self, schema: &str) -> DocsResult<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check(FailOn::ListTables)?;
        if schema != self.schema {
            return Ok(Vec::new());
        }
        Ok(self.tables.clone())
    }

    async fn fetch_columns(&self, schema: &str, tables: &[String]) -> DocsResult<Vec<ColumnRow>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.check(FailOn::Columns)?;
        Ok(self
            .columns
            .iter()
            .filter(|row| self.in_scope(schema, tables, &row.table_name))
            .cloned()
            .collect())
    }

    async fn fetch_constraints(
        &self,
        schema: &str,
        tables: &[String],
    ) -> DocsResult<Vec<ConstraintRow>> {
        self.check(FailOn::Constraints)?;
        Ok(self
            .constraints
            .iter()
            .filter(|row| self.in_scope(schema, tables, &row.table_name))
            .cloned()
            .collect())
    }

    async fn fetch_descriptions(
        &self,
        schema: &str,
        _tables: &[String],
    ) -> DocsResult<CatalogDescriptions> {
        self.check(FailOn::Descriptions)?;
        if schema != self.schema {
            return Ok(CatalogDescriptions::default());
        }
        Ok(self.descriptions.clone())
    }
}

/// Several single-schema catalogs behind one connection provider.
#[derive(Debug, Clone, Default)]
pub struct MemoryProvider {
    catalogs: Arc<Vec<MemoryCatalog>>,
    opened: Arc<AtomicUsize>,
}

impl MemoryProvider {
    pub fn new(catalogs: Vec<MemoryCatalog>) -> Self {
        Self {
            catalogs: Arc::new(catalogs),
            opened: Arc::default(),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    fn find(&self, schema: &str) -> Option<&MemoryCatalog> {
        self.catalogs.iter().find(|c| c.schema == schema)
    }
}

impl CatalogProvider for MemoryProvider {
    type Catalog = MemoryProvider;

    async fn with_catalog<F, Fut, T>(&self, _config: &ConnectionConfig, f: F) -> DocsResult<T>
    where
        F: FnOnce(MemoryProvider) -> Fut + Send,
        Fut: Future<Output = DocsResult<T>> + Send,
        T: Send,
    {
        self.opened.fetch_add(1, Ordering::SeqCst);
        f(self.clone()).await
    }
}

impl CatalogSource for MemoryProvider {
    async fn list_tables(&self, schema: &str) -> DocsResult<Vec<String>> {
        match self.find(schema) {
            Some(catalog) => catalog.list_tables(schema).await,
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_columns(&self, schema: &str, tables: &[String]) -> DocsResult<Vec<ColumnRow>> {
        match self.find(schema) {
            Some(catalog) => catalog.fetch_columns(schema, tables).await,
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_constraints(
        &self,
        schema: &str,
        tables: &[String],
    ) -> DocsResult<Vec<ConstraintRow>> {
        match self.find(schema) {
            Some(catalog) => catalog.fetch_constraints(schema, tables).await,
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_descriptions(
        &self,
        schema: &str,
        tables: &[String],
    ) -> DocsResult<CatalogDescriptions> {
        match self.find(schema) {
            Some(catalog) => catalog.fetch_descriptions(schema, tables).await,
            None => Ok(CatalogDescriptions::default()),
        }
    }
}

/// `public.users` with `id` (integer, primary key) and `email` (varchar(255), nullable).
pub fn users_catalog() -> MemoryCatalog {
    MemoryCatalog::new("public")
        .with_table("users")
        .with_column(
            ColumnRow::new("users", "id", "integer", "int4")
                .with_nullable(false)
                .with_length(32),
        )
        .with_column(
            ColumnRow::new("users", "email", "character varying", "varchar").with_length(255),
        )
        .with_constraint(ConstraintRow::new("users_pkey", "PRIMARY KEY", "users", "id"))
}
