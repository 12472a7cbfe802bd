//! Output renderers.
//!
//! JSON mode hands the aggregated tree back unchanged. Document mode lays it
//! out as a Word document (see [`document`]).

pub mod document;

use crate::models::Schema;
use axum::Json;

pub use document::render_document;

/// MIME type of the generated document.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Output representation selected by the `export_as` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Docx,
}

impl OutputFormat {
    /// Parse the selector. Anything other than `docx` falls back to JSON.
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some(s) if s.trim().eq_ignore_ascii_case("docx") => Self::Docx,
            _ => Self::Json,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Docx => write!(f, "docx"),
        }
    }
}

/// JSON mode is the identity transform.
pub fn render_json(schemas: Vec<Schema>) -> Json<Vec<Schema>> {
    Json(schemas)
}
