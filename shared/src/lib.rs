//! Shared library for the Notion calendar Lambda.
//!
//! Configuration, errors, Notion models and client, and the date aggregation
//! used by the `database` function.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod notion;

pub use aggregate::{aggregate, Aggregation, RecordOutcome, SkipReason, SkippedRecord};
pub use config::Config;
pub use error::{Error, Result};
pub use models::{DateEntry, Page, PropertyValue, QueryResponse};
pub use notion::{DatabaseQuery, NotionClient};
