//! DB Docs Library
//!
//! Introspects PostgreSQL schema metadata (tables, columns, constraints) and
//! renders it as JSON or as a Word document.

pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod output;
pub mod render;
pub mod server;
pub mod service;

pub use config::Config;
pub use error::{DocsError, DocsResult};
pub use server::{AppState, HttpServer};
