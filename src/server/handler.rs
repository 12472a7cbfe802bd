//! Documentation request handler.

use crate::error::{DocsError, DocsResult};
use crate::models::DocsRequest;
use crate::render::{self, DOCX_CONTENT_TYPE, OutputFormat};
use crate::server::AppState;
use crate::service::introspect_all;
use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Default, Deserialize)]
pub struct ExportParams {
    pub export_as: Option<String>,
}

/// POST <endpoint> - Introspect the requested schemas and render them.
pub async fn generate_docs(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ExportParams>, QueryRejection>,
    body: Result<Json<DocsRequest>, JsonRejection>,
) -> Response {
    let export_as = params.ok().and_then(|Query(p)| p.export_as);
    let format = OutputFormat::from_selector(export_as.as_deref());

    match handle(&state, format, body).await {
        Ok(response) => response,
        Err(err) => {
            if err.status_code().is_client_error() {
                warn!(error = %err, "Rejected request");
            } else {
                error!(error = %err, suggestion = ?err.suggestion(), "Request failed");
            }
            err.into_response()
        }
    }
}

async fn handle(
    state: &AppState,
    format: OutputFormat,
    body: Result<Json<DocsRequest>, JsonRejection>,
) -> DocsResult<Response> {
    let Json(request) = body.map_err(|rejection| DocsError::invalid_input(rejection.body_text()))?;
    request.validate()?;

    info!(
        target_db = %request.config.target(),
        schemas = request.schemas.len(),
        %format,
        "Generating documentation"
    );

    let schemas = introspect_all(&state.provider, &request.config, &request.schemas).await?;

    match format {
        OutputFormat::Json => Ok(render::render_json(schemas).into_response()),
        OutputFormat::Docx => {
            let path = render::render_document(&schemas, &state.output).await?;
            let bytes = state.output.take_artifact(&path).await?;
            let disposition = format!(
                "attachment; filename=\"db_docs_{}.docx\"",
                chrono::Utc::now().timestamp_millis()
            );
            Ok((
                [
                    (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response())
        }
    }
}
