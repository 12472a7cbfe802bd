//! Inbound request models and their validation.

use crate::error::{DocsError, DocsResult};
use crate::models::ConnectionConfig;
use serde::Deserialize;

/// Body of a documentation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocsRequest {
    pub config: ConnectionConfig,
    pub schemas: Vec<SchemaRequest>,
}

/// One schema to introspect.
///
/// An empty `tables` list means "every table in the schema"; it is resolved
/// against the catalog before any other query runs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaRequest {
    pub name: String,
    #[serde(default)]
    pub tables: Vec<String>,
}

impl SchemaRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = tables.into_iter().map(Into::into).collect();
        self
    }
}

impl DocsRequest {
    /// Validate the request, reporting only the first problem found.
    pub fn validate(&self) -> DocsResult<()> {
        let config = &self.config;
        non_empty("config.host", &config.host)?;
        non_empty("config.user", &config.user)?;
        non_empty("config.password", &config.password)?;
        non_empty("config.database", &config.database)?;

        for (i, schema) in self.schemas.iter().enumerate() {
            non_empty(&format!("schemas[{}].name", i), &schema.name)?;
            for (j, table) in schema.tables.iter().enumerate() {
                non_empty(&format!("schemas[{}].tables[{}]", i, j), table)?;
            }
        }
        Ok(())
    }
}

fn non_empty(field: &str, value: &str) -> DocsResult<()> {
    if value.is_empty() {
        return Err(DocsError::invalid_input(format!(
            "\"{}\" is not allowed to be empty",
            field
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DocsRequest {
        serde_json::from_str(json).unwrap()
    }

    const CONFIG: &str =
        r#"{"host":"localhost","port":5432,"user":"postgres","password":"pw","database":"app"}"#;

    #[test]
    fn test_tables_default_to_empty() {
        let req = parse(&format!(
            r#"{{"config":{},"schemas":[{{"name":"public"}}]}}"#,
            CONFIG
        ));
        assert_eq!(req.schemas, vec![SchemaRequest::new("public")]);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_explicit_tables_kept_in_order() {
        let req = parse(&format!(
            r#"{{"config":{},"schemas":[{{"name":"sales","tables":["orders","customers"]}}]}}"#,
            CONFIG
        ));
        assert_eq!(req.schemas[0].tables, vec!["orders", "customers"]);
    }

    #[test]
    fn test_missing_schemas_fails_to_parse() {
        let result: Result<DocsRequest, _> =
            serde_json::from_str(&format!(r#"{{"config":{}}}"#, CONFIG));
        assert!(result.unwrap_err().to_string().contains("schemas"));
    }

    #[test]
    fn test_empty_host_rejected() {
        let mut req = parse(&format!(r#"{{"config":{},"schemas":[]}}"#, CONFIG));
        req.config.host.clear();
        let err = req.validate().unwrap_err();
        assert_eq!(err.message(), "\"config.host\" is not allowed to be empty");
    }

    #[test]
    fn test_first_failure_reported() {
        let mut req = parse(&format!(
            r#"{{"config":{},"schemas":[{{"name":""}}]}}"#,
            CONFIG
        ));
        req.config.password.clear();
        let err = req.validate().unwrap_err();
        assert!(err.message().contains("config.password"));
    }

    #[test]
    fn test_empty_table_name_rejected() {
        let req = parse(&format!(
            r#"{{"config":{},"schemas":[{{"name":"public","tables":["users",""]}}]}}"#,
            CONFIG
        ));
        let err = req.validate().unwrap_err();
        assert_eq!(
            err.message(),
            "\"schemas[0].tables[1]\" is not allowed to be empty"
        );
    }
}
