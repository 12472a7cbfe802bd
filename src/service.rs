//! Introspection pipeline.
//!
//! Per schema: resolve the table list, run the data queries concurrently, wait
//! for all of them, then aggregate. Several schemas are processed side by
//! side, each on its own connection; the first failure fails the batch.

use crate::aggregate::aggregate_schema;
use crate::db::{CatalogProvider, CatalogSource};
use crate::error::DocsResult;
use crate::models::{ConnectionConfig, Schema, SchemaRequest};
use futures_util::FutureExt;
use futures_util::future::try_join_all;
use tracing::{debug, info, instrument};

/// Data queries a schema runs side by side: columns, constraints, comments.
pub const CONCURRENT_DATA_QUERIES: usize = 3;

/// Introspect one schema through `catalog`.
pub async fn introspect_schema<C: CatalogSource>(
    catalog: &C,
    request: &SchemaRequest,
) -> DocsResult<Schema> {
    let schema = request.name.as_str();

    let tables = if request.tables.is_empty() {
        catalog.list_tables(schema).await?
    } else {
        request.tables.clone()
    };

    let (columns, constraints, descriptions) = tokio::try_join!(
        catalog.fetch_columns(schema, &tables),
        catalog.fetch_constraints(schema, &tables),
        catalog.fetch_descriptions(schema, &tables),
    )?;

    debug!(
        schema,
        tables = tables.len(),
        columns = columns.len(),
        constraints = constraints.len(),
        "Aggregating schema"
    );

    Ok(aggregate_schema(
        schema,
        &tables,
        &columns,
        &constraints,
        &descriptions,
    ))
}

/// Introspect every requested schema, each over its own connection.
///
/// Results come back in request order.
#[instrument(skip_all, fields(target_db = %config.target(), schemas = requests.len()))]
pub async fn introspect_all<P: CatalogProvider>(
    provider: &P,
    config: &ConnectionConfig,
    requests: &[SchemaRequest],
) -> DocsResult<Vec<Schema>> {
    let schemas = try_join_all(requests.iter().map(|request| {
        provider
            .with_catalog(config, move |catalog| async move {
                introspect_schema(&catalog, request).await
            })
            .boxed()
    }))
    .await?;

    info!(count = schemas.len(), "Introspection complete");
    Ok(schemas)
}
