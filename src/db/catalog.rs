//! Catalog query layer.
//!
//! Reads table, column, constraint and comment metadata for one schema from
//! PostgreSQL's `information_schema` views and `pg_catalog` comment functions.
//!
//! # Architecture
//!
//! [`CatalogSource`] is the seam between the introspection pipeline and the
//! store, and [`CatalogProvider`] hands one out per database connection.
//! [`PgCatalog`] is the production implementation; tests substitute an
//! in-memory source. Schema and table names are always bound as parameters
//! (`$1` schema, `$2` a `text[]` of table names).

use crate::error::DocsResult;
use crate::models::{
    CatalogDescriptions, ColumnRow, ConnectionConfig, ConstraintRow, TableCommentRow,
};
use sqlx::PgPool;
use std::future::Future;
use tracing::debug;

/// Read-only access to a schema's catalog metadata.
pub trait CatalogSource: Send + Sync {
    /// All table names visible in `schema`, ordered by name.
    fn list_tables(&self, schema: &str) -> impl Future<Output = DocsResult<Vec<String>>> + Send;

    /// Column definitions of `tables`, ordered by table then ordinal position.
    fn fetch_columns(
        &self,
        schema: &str,
        tables: &[String],
    ) -> impl Future<Output = DocsResult<Vec<ColumnRow>>> + Send;

    /// One row per (constraint, column) pair on `tables`.
    fn fetch_constraints(
        &self,
        schema: &str,
        tables: &[String],
    ) -> impl Future<Output = DocsResult<Vec<ConstraintRow>>> + Send;

    /// Comments on the schema itself and on `tables`.
    fn fetch_descriptions(
        &self,
        schema: &str,
        tables: &[String],
    ) -> impl Future<Output = DocsResult<CatalogDescriptions>> + Send;
}

/// Hands out a catalog for one database and releases it once `f` is done.
pub trait CatalogProvider: Send + Sync {
    type Catalog: CatalogSource;

    fn with_catalog<F, Fut, T>(
        &self,
        config: &ConnectionConfig,
        f: F,
    ) -> impl Future<Output = DocsResult<T>> + Send
    where
        F: FnOnce(Self::Catalog) -> Fut + Send,
        Fut: Future<Output = DocsResult<T>> + Send,
        T: Send;
}

// =============================================================================
// SQL Query Templates
// =============================================================================
//
// information_schema columns are domain types (sql_identifier, cardinal_number,
// yes_or_no); every projected column is cast to a plain type so it decodes
// into the row structs without domain lookups.

mod queries {
    pub const LIST_TABLES: &str = r#"
        SELECT t.table_name::text AS table_name
        FROM information_schema.tables t
        WHERE t.table_schema = $1
        ORDER BY t.table_name
        "#;

    pub const COLUMNS: &str = r#"
        SELECT
            c.table_name::text AS table_name,
            c.column_name::text AS column_name,
            c.data_type::text AS data_type,
            c.udt_name::text AS udt_name,
            (c.is_nullable = 'YES') AS nullable,
            COALESCE(c.character_maximum_length, c.numeric_precision)::int4 AS length,
            col_description(
                format('%I.%I', c.table_schema, c.table_name)::regclass,
                c.ordinal_position::int4
            ) AS description
        FROM information_schema.columns c
        WHERE c.table_schema = $1
        AND c.table_name::text = ANY($2)
        ORDER BY c.table_name, c.ordinal_position
        "#;

    pub const CONSTRAINTS: &str = r#"
        SELECT
            tc.constraint_name::text AS constraint_name,
            tc.constraint_type::text AS constraint_type,
            kcu.table_name::text AS table_name,
            kcu.column_name::text AS column_name,
            kcu.ordinal_position::int4 AS position
        FROM information_schema.table_constraints tc
        JOIN information_schema.key_column_usage kcu
            ON kcu.constraint_name = tc.constraint_name
            AND kcu.constraint_schema = tc.constraint_schema
            AND kcu.table_name = tc.table_name
        WHERE tc.table_schema = $1
        AND tc.table_name::text = ANY($2)
        AND tc.constraint_type IN ('PRIMARY KEY', 'FOREIGN KEY', 'UNIQUE')
        UNION ALL
        SELECT
            tc.constraint_name::text,
            tc.constraint_type::text,
            ccu.table_name::text,
            ccu.column_name::text,
            0
        FROM information_schema.table_constraints tc
        JOIN information_schema.constraint_column_usage ccu
            ON ccu.constraint_name = tc.constraint_name
            AND ccu.constraint_schema = tc.constraint_schema
            AND ccu.table_name = tc.table_name
        WHERE tc.table_schema = $1
        AND tc.table_name::text = ANY($2)
        AND tc.constraint_type = 'CHECK'
        ORDER BY table_name, constraint_name, position, column_name
        "#;

    pub const SCHEMA_COMMENT: &str = r#"
        SELECT obj_description(n.oid, 'pg_namespace') AS description
        FROM pg_namespace n
        WHERE n.nspname = $1
        "#;

    pub const TABLE_COMMENTS: &str = r#"
        SELECT
            c.relname::text AS table_name,
            obj_description(c.oid, 'pg_class') AS description
        FROM pg_class c
        JOIN pg_namespace n ON n.oid = c.relnamespace
        WHERE n.nspname = $1
        AND c.relname::text = ANY($2)
        AND obj_description(c.oid, 'pg_class') IS NOT NULL
        "#;
}

/// Catalog source backed by a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl CatalogSource for PgCatalog {
    async fn list_tables(&self, schema: &str) -> DocsResult<Vec<String>> {
        let tables: Vec<String> = sqlx::query_scalar(queries::LIST_TABLES)
            .bind(schema)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = tables.len(), schema, "Discovered tables");
        Ok(tables)
    }

    async fn fetch_columns(&self, schema: &str, tables: &[String]) -> DocsResult<Vec<ColumnRow>> {
        let rows: Vec<ColumnRow> = sqlx::query_as(queries::COLUMNS)
            .bind(schema)
            .bind(tables)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), schema, "Fetched column rows");
        Ok(rows)
    }

    async fn fetch_constraints(
        &self,
        schema: &str,
        tables: &[String],
    ) -> DocsResult<Vec<ConstraintRow>> {
        let rows: Vec<ConstraintRow> = sqlx::query_as(queries::CONSTRAINTS)
            .bind(schema)
            .bind(tables)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), schema, "Fetched constraint rows");
        Ok(rows)
    }

    async fn fetch_descriptions(
        &self,
        schema: &str,
        tables: &[String],
    ) -> DocsResult<CatalogDescriptions> {
        let schema_comment = sqlx::query_scalar::<_, Option<String>>(queries::SCHEMA_COMMENT)
            .bind(schema)
            .fetch_optional(&self.pool)
            .await?
            .flatten();

        let table_comments: Vec<TableCommentRow> = sqlx::query_as(queries::TABLE_COMMENTS)
            .bind(schema)
            .bind(tables)
            .fetch_all(&self.pool)
            .await?;

        Ok(CatalogDescriptions::new(schema_comment, table_comments))
    }
}
