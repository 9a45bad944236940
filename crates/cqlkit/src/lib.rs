//! A fluent builder for Cassandra Query Language statements.
//!
//! Builders accumulate clause records on a [`Session`] and compile them on
//! demand into CQL text with `?` placeholders plus the ordered list of values
//! bound to them. Execution is left to a [`exec::Driver`] implementation.
//!
//! ```
//! use cqlkit::{CqlBuilder, QueryBuilder};
//! use serde_json::json;
//!
//! let mut query = QueryBuilder::for_keyspace("shop")
//!     .update("orders")
//!     .set("status", "shipped")
//!     .add("events", json!(["shipped"]))
//!     .where_("id", "=", 42);
//!
//! assert_eq!(
//!     query.cql()?,
//!     r#"UPDATE "shop"."orders" SET "status" = ?,"events" = "events" + ? WHERE "id" = ?;"#
//! );
//! assert_eq!(query.bindings(), &[json!("shipped"), json!(["shipped"]), json!(42)]);
//! # Ok::<(), cqlkit::Error>(())
//! ```

pub mod builder;
pub mod compiler;
pub mod error;
pub mod exec;
pub mod format;
pub mod logging;
pub mod registry;
pub mod session;
pub mod statement;

#[cfg(test)]
mod test_utils;

pub use builder::{CqlBuilder, KeyspaceBuilder, QueryBuilder, TableBuilder};
pub use error::{Error, Result};
pub use serde_json::Value;
pub use session::{Component, Session};
pub use statement::{PrimaryKey, Selection, Target};

/// Loads the configuration file into the process-wide configuration and
/// installs the stderr log subscriber it describes.
pub fn init() -> Result<()> {
    cqlkit_config::config::init()?;
    let config = cqlkit_config::config::get_config();
    logging::setup_logging(&logging::LogConfig::from(&config))
}
