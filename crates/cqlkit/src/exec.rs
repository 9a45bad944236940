//! The boundary to a Cassandra driver.
//!
//! Nothing in this crate talks to the network. A [`Driver`] implementation
//! owns the connection; sessions compile their statement and hand the text
//! and bindings over.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{Error, Result},
    session::Session,
};

/// Per-call execution options. Serializes to the option object drivers take,
/// leaving out whatever is unset.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ExecOptions {
    /// Prepare the statement. Defaults to the session's configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepare: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_size: Option<i32>,
}

impl ExecOptions {
    pub fn prepare(mut self, prepare: bool) -> Self {
        self.prepare = Some(prepare);
        self
    }

    pub fn fetch_size(mut self, fetch_size: i32) -> Self {
        self.fetch_size = Some(fetch_size);
        self
    }
}

/// One entry of a batch: compiled text and its bindings, serialized as
/// `{"query": ..., "params": [...]}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BatchStatement {
    pub query: String,
    pub params: Vec<Value>,
}

/// A connected Cassandra client.
pub trait Driver {
    type Row;
    type ResultSet;

    fn is_connected(&self) -> bool;

    fn execute(
        &mut self,
        query: &str,
        params: &[Value],
        options: &ExecOptions,
    ) -> Result<Self::ResultSet>;

    /// Streams the rows of a query one at a time.
    fn stream<'a>(
        &'a mut self,
        query: &str,
        params: &[Value],
        options: &ExecOptions,
    ) -> Result<Box<dyn Iterator<Item = Result<Self::Row>> + 'a>>;

    fn batch(
        &mut self,
        statements: &[BatchStatement],
        options: &ExecOptions,
    ) -> Result<Self::ResultSet>;
}

fn is_data_statement(cql: &str) -> bool {
    let verb = cql
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();
    matches!(verb.as_str(), "SELECT" | "INSERT" | "UPDATE" | "DELETE")
}

fn ensure_connected<D: Driver>(driver: &D) -> Result<()> {
    if driver.is_connected() {
        Ok(())
    } else {
        Err(Error::NotConnected)
    }
}

impl Session {
    /// Fills in the prepare default. Amazon Keyspaces cannot prepare schema
    /// statements, so those are never prepared there.
    fn resolve_options(&self, cql: &str, options: &ExecOptions) -> ExecOptions {
        let mut resolved = options.clone();
        let prepare = resolved.prepare.unwrap_or(self.prepare());
        resolved.prepare = Some(prepare && !(self.is_aws_keyspace() && !is_data_statement(cql)));
        resolved
    }

    /// Compiles the statement and executes it.
    pub fn exec<D: Driver>(&mut self, driver: &mut D, options: &ExecOptions) -> Result<D::ResultSet> {
        ensure_connected(driver)?;

        let cql = self.cql()?;
        let options = self.resolve_options(&cql, options);
        debug!("executing {cql} prepare: {:?}", options.prepare);
        driver.execute(&cql, self.bindings(), &options)
    }

    /// Compiles the statement and streams its rows from the driver.
    pub fn stream<'d, D: Driver>(
        &mut self,
        driver: &'d mut D,
        options: &ExecOptions,
    ) -> Result<Box<dyn Iterator<Item = Result<D::Row>> + 'd>> {
        ensure_connected(driver)?;

        let cql = self.cql()?;
        let options = self.resolve_options(&cql, options);
        debug!("streaming {cql}");
        driver.stream(&cql, self.bindings(), &options)
    }

    /// Calls `on_row` for every streamed row, stopping at the first error.
    pub fn each_row<D, F>(&mut self, driver: &mut D, options: &ExecOptions, mut on_row: F) -> Result<()>
    where
        D: Driver,
        F: FnMut(D::Row),
    {
        for row in self.stream(driver, options)? {
            on_row(row?);
        }
        Ok(())
    }

    /// Compiles for execution into a batch entry.
    pub fn to_batch_statement(&mut self) -> Result<BatchStatement> {
        let query = self.cql()?;
        Ok(BatchStatement {
            query,
            params: self.bindings().to_vec(),
        })
    }
}

/// Compiles every session and submits them as one batch. Without an explicit
/// prepare flag the first session's configured default applies.
pub fn batch<'s, D, I>(driver: &mut D, options: &ExecOptions, sessions: I) -> Result<D::ResultSet>
where
    D: Driver,
    I: IntoIterator<Item = &'s mut Session>,
{
    ensure_connected(driver)?;

    let mut prepare = options.prepare;
    let mut statements = Vec::new();
    for session in sessions {
        prepare.get_or_insert(session.prepare());
        statements.push(session.to_batch_statement()?);
    }
    debug!("executing batch of {} statements", statements.len());

    let options = ExecOptions {
        prepare,
        ..options.clone()
    };
    driver.batch(&statements, &options)
}
