//! Data models for the DB docs service.
//!
//! This module re-exports all model types used throughout the application.

pub mod connection;
pub mod request;
pub mod schema;

pub use connection::ConnectionConfig;
pub use request::{DocsRequest, SchemaRequest};
pub use schema::{
    CatalogDescriptions, Column, ColumnRow, ConstraintRow, PRIMARY_KEY, Schema, Table,
    TableCommentRow,
};
