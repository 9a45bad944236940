//! Fluent builders for the three CQL sub-languages.
//!
//! Every builder owns a [`Session`] and moves it along the chain. Starting a
//! schema statement from a [`QueryBuilder`] hands the session to a
//! [`TableBuilder`] or [`KeyspaceBuilder`], which switches the session's active
//! component.

mod keyspace;
mod query;
mod table;

pub use keyspace::KeyspaceBuilder;
pub use query::QueryBuilder;
pub use table::TableBuilder;
use serde_json::Value;

use crate::{
    error::Result,
    exec::{Driver, ExecOptions},
    session::Session,
};

/// Access to the session behind a builder.
pub trait CqlBuilder {
    fn session(&self) -> &Session;

    fn session_mut(&mut self) -> &mut Session;

    fn into_session(self) -> Session
    where
        Self: Sized;

    /// Compiles the statement for execution and returns its text.
    fn cql(&mut self) -> Result<String> {
        self.session_mut().cql()
    }

    /// Values bound by the most recent compile.
    fn bindings(&self) -> &[Value] {
        self.session().bindings()
    }

    fn keyspace(&self) -> Option<&str> {
        self.session().keyspace()
    }

    fn table(&self) -> Option<&str> {
        self.session().table()
    }

    fn is_debug(&self) -> bool {
        self.session().is_debug()
    }

    fn is_executing(&self) -> bool {
        self.session().is_executing()
    }

    fn exec<D: Driver>(&mut self, driver: &mut D, options: &ExecOptions) -> Result<D::ResultSet> {
        self.session_mut().exec(driver, options)
    }

    fn stream<'d, D: Driver>(
        &mut self,
        driver: &'d mut D,
        options: &ExecOptions,
    ) -> Result<Box<dyn Iterator<Item = Result<D::Row>> + 'd>> {
        self.session_mut().stream(driver, options)
    }

    fn each_row<D, F>(&mut self, driver: &mut D, options: &ExecOptions, on_row: F) -> Result<()>
    where
        D: Driver,
        F: FnMut(D::Row),
    {
        self.session_mut().each_row(driver, options, on_row)
    }
}

macro_rules! impl_cql_builder {
    ($builder:ty) => {
        impl $crate::builder::CqlBuilder for $builder {
            fn session(&self) -> &$crate::session::Session {
                &self.session
            }

            fn session_mut(&mut self) -> &mut $crate::session::Session {
                &mut self.session
            }

            fn into_session(self) -> $crate::session::Session {
                self.session
            }
        }
    };
}

pub(crate) use impl_cql_builder;
