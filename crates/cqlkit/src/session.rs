//! Per-statement state shared by the three builders.

use cqlkit_config::config::{get_config, Config};
use serde_json::Value;
use tracing::{debug, trace};

use crate::{
    compiler::{self, Context},
    error::{Error, Result},
    format::Bindings,
    statement::{Compiling, GroupIndex, Grouped, Singletons, Statement},
};

/// The sub-language currently answering builder calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Component {
    Keyspace,
    Table,
    #[default]
    Query,
}

/// One statement under construction.
///
/// Builders append records to the log and the session compiles them on
/// demand. Compiling never consumes the log, so a session can be compiled,
/// extended and compiled again.
#[derive(Debug)]
pub struct Session {
    log: Vec<Statement>,
    index: GroupIndex,
    singletons: Singletons,
    compiling: Option<Compiling>,
    component: Component,
    keyspace: Option<String>,
    table: Option<String>,
    bindings: Vec<Value>,
    cql: Option<String>,
    method_stack: Vec<&'static str>,
    query_phases: Vec<String>,
    debug: bool,
    aws_keyspace: bool,
    prepare: bool,
    executing: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session from the process-wide configuration.
    pub fn new() -> Self {
        Self::from_config(&get_config())
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            log: Vec::new(),
            index: GroupIndex::default(),
            singletons: Singletons::default(),
            compiling: None,
            component: Component::default(),
            keyspace: config.keyspace.clone(),
            table: None,
            bindings: Vec::new(),
            cql: None,
            method_stack: Vec::new(),
            query_phases: Vec::new(),
            debug: config.is_debug(),
            aws_keyspace: config.is_aws_keyspace(),
            prepare: config.prepare(),
            executing: false,
        }
    }

    pub fn append(&mut self, statement: Statement) {
        self.log.push(statement);
    }

    pub fn log(&self) -> &[Statement] {
        &self.log
    }

    /// Rebuilds the grouping index from the whole log.
    pub fn regroup(&mut self) {
        self.index = GroupIndex::build(&self.log);
    }

    pub fn singletons(&self) -> &Singletons {
        &self.singletons
    }

    pub fn singletons_mut(&mut self) -> &mut Singletons {
        &mut self.singletons
    }

    /// Registers the statement kind unless one is already set, then applies
    /// the registered keyspace and table.
    pub fn register_compiling(&mut self, marker: Compiling) {
        match &self.compiling {
            Some(existing) => trace!(
                "ignoring {}, session already compiles {}",
                marker.name(),
                existing.name()
            ),
            None => {
                trace!("session compiles {}", marker.name());
                self.compiling = Some(marker);
            }
        }
        if let Some(marker) = self.compiling.clone() {
            self.apply_target(&marker);
        }
    }

    pub fn compiling(&self) -> Option<&Compiling> {
        self.compiling.as_ref()
    }

    pub fn resolve_component(&mut self, component: Component) {
        if self.component != component {
            trace!("switching component {:?} -> {:?}", self.component, component);
            self.component = component;
        }
    }

    pub fn component(&self) -> Component {
        self.component
    }

    /// Compiles the registered statement, repopulating the bindings.
    pub fn compile(&mut self) -> Result<String> {
        let marker = self.compiling.clone().ok_or_else(|| {
            Error::InvalidState("no statement kind has been registered on this session".into())
        })?;
        Ok(self.compile_marker(&marker))
    }

    /// Compiles for execution: bindings are always recorded.
    pub fn cql(&mut self) -> Result<String> {
        self.executing = true;
        let cql = self.compile()?;
        if self.debug {
            debug!("compiled: {cql} bindings: {:?}", self.bindings);
        }
        Ok(cql)
    }

    /// Records a builder call and, in debug mode, recompiles so the bindings
    /// can be inspected before execution.
    pub(crate) fn checkpoint(&mut self, method: &'static str) {
        if !self.debug {
            return;
        }
        self.method_stack.push(method);
        if let Some(marker) = self.compiling.clone() {
            let cql = self.compile_marker(&marker);
            debug!(
                "{:?} {method}: {cql} bindings: {:?}",
                self.component, self.bindings
            );
        }
    }

    fn compile_marker(&mut self, marker: &Compiling) -> String {
        self.apply_target(marker);
        self.bindings.clear();
        self.regroup();

        let mut bindings = Bindings::new(self.debug || self.executing);
        let cql = {
            let ctx = Context {
                grouped: Grouped::new(&self.log, &self.index),
                singletons: &self.singletons,
                keyspace: self.keyspace.as_deref(),
                table: self.table.as_deref(),
            };
            compiler::compile(marker, &ctx, &mut bindings)
        };

        self.bindings = bindings.into_values();
        if self.debug {
            self.query_phases.push(cql.clone());
        }
        self.cql = Some(cql.clone());
        cql
    }

    fn apply_target(&mut self, marker: &Compiling) {
        if let Some(keyspace) = marker.keyspace() {
            self.keyspace = Some(keyspace.to_string());
        }
        if let Some(table) = marker.table() {
            self.table = Some(table.to_string());
        }
    }

    /// Bindings from the most recent compile.
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    /// Text from the most recent compile.
    pub fn last_cql(&self) -> Option<&str> {
        self.cql.as_deref()
    }

    /// Display names of the builder calls made so far. Debug mode only.
    pub fn method_stack(&self) -> &[&'static str] {
        &self.method_stack
    }

    /// Every compiled text in order, one per builder call and execution.
    /// Debug mode only.
    pub fn query_phases(&self) -> &[String] {
        &self.query_phases
    }

    pub fn keyspace(&self) -> Option<&str> {
        self.keyspace.as_deref()
    }

    pub fn use_keyspace(&mut self, keyspace: impl Into<String>) {
        self.keyspace = Some(keyspace.into());
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn set_table(&mut self, table: impl Into<String>) {
        self.table = Some(table.into());
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    pub fn is_aws_keyspace(&self) -> bool {
        self.aws_keyspace
    }

    pub fn set_aws_keyspace(&mut self, aws_keyspace: bool) {
        self.aws_keyspace = aws_keyspace;
    }

    /// Prepare default applied by `exec` when the caller does not choose.
    pub fn prepare(&self) -> bool {
        self.prepare
    }
}
