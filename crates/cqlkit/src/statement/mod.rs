//! The intermediate representation built up by the builders.
//!
//! A session keeps an append-only log of [`Statement`] records, a
//! [`GroupIndex`] rebuilt from that log on every compile, a handful of
//! [`Singletons`] and at most one [`Compiling`] marker naming the statement
//! kind.

pub mod grouping;
pub mod record;

pub use grouping::{GroupIndex, Grouped, Grouping};
pub use record::{
    Aggregate, Alteration, Assignment, ColumnDef, DurableWrites, Ordering, PrimaryKey, Relation,
    Replication, Selection, Target, Using, WithOption,
};
use serde_json::Value;
use tracing::warn;

use crate::{
    registry::{KeyspaceMethod, Method, QueryMethod, TableMethod},
    session::Component,
};

/// One accumulated clause fragment. Immutable once appended.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Where(Relation),
    If(Relation),
    Set(Assignment),
    Using(Using),
    OrderBy(Ordering),
    Aggregate(Aggregate),
    Column(ColumnDef),
    With(WithOption),
    Alter(Alteration),
    Strategy(Replication),
    And(DurableWrites),
}

impl Statement {
    /// The builder method that produced this record.
    pub fn method(&self) -> Method {
        match self {
            Statement::Where(relation) | Statement::If(relation) => relation.method.into(),
            Statement::Set(assignment) => assignment.method.into(),
            Statement::Using(using) => using.method.into(),
            Statement::OrderBy(_) => QueryMethod::OrderBy.into(),
            Statement::Aggregate(aggregate) => aggregate.method.into(),
            Statement::Column(ColumnDef::Typed { method, .. }) => (*method).into(),
            Statement::Column(ColumnDef::PrimaryKey(_)) => TableMethod::Primary.into(),
            Statement::Column(ColumnDef::Unrecognized { .. }) => TableMethod::Column.into(),
            Statement::With(WithOption::Property { .. }) => TableMethod::With.into(),
            Statement::With(WithOption::Options { method, .. }) => (*method).into(),
            Statement::With(WithOption::ClusteringOrder { .. }) => {
                TableMethod::WithClusteringOrderBy.into()
            }
            Statement::Alter(Alteration::Alter { .. }) => TableMethod::Alter.into(),
            Statement::Alter(Alteration::Drop(_)) => TableMethod::Drop.into(),
            Statement::Alter(Alteration::Rename { .. }) => TableMethod::Rename.into(),
            Statement::Strategy(replication) => replication.method.into(),
            Statement::And(_) => KeyspaceMethod::WithDurableWrites.into(),
        }
    }

    pub fn grouping(&self) -> Grouping {
        self.method().grouping()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Limit {
    /// `Limit` or `LimitPerPartition`.
    pub method: QueryMethod,
    pub value: Value,
}

/// At-most-one clauses. Last write wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Singletons {
    pub limit: Option<Limit>,
    pub allow_filtering: bool,
    pub if_exists: bool,
    pub if_not_exists: bool,
}

impl Singletons {
    /// Fills the slot `method` feeds. Flags ignore `value`.
    pub fn set(&mut self, method: QueryMethod, value: Value) {
        match method.grouping() {
            Grouping::Limit => self.limit = Some(Limit { method, value }),
            Grouping::Allow => self.allow_filtering = true,
            Grouping::IfExists => self.if_exists = true,
            Grouping::IfNotExists => self.if_not_exists = true,
            grouping => warn!("{} feeds {grouping:?}, which is not a singleton", method.name()),
        }
    }
}

/// The statement kind owning a session, with the arguments of the call that
/// registered it. The first registration sticks.
#[derive(Clone, Debug, PartialEq)]
pub enum Compiling {
    Insert {
        identifiers: Vec<String>,
        values: Vec<Value>,
    },
    Select {
        columns: Vec<Selection>,
    },
    Update {
        table: Option<String>,
    },
    Delete {
        columns: Vec<String>,
    },
    CreateColumnFamily {
        table: String,
        keyspace: Option<String>,
        if_not_exists: bool,
    },
    CreateType {
        name: String,
        keyspace: Option<String>,
        if_not_exists: bool,
    },
    AlterColumnFamily {
        table: String,
        keyspace: Option<String>,
    },
    AlterType {
        name: String,
        keyspace: Option<String>,
    },
    CreateIndex {
        table: String,
        index_name: String,
        on_column: String,
    },
    CreateIndexCustom {
        table: String,
        index_name: String,
        on_column: String,
        using: Option<String>,
    },
    DropColumnFamily {
        table: String,
        keyspace: Option<String>,
        if_exists: bool,
    },
    DropType {
        name: String,
        keyspace: Option<String>,
        if_exists: bool,
    },
    Truncate {
        table: String,
        keyspace: Option<String>,
    },
    CreateKeyspace {
        keyspace: String,
        if_not_exists: bool,
    },
    AlterKeyspace {
        keyspace: String,
        if_exists: bool,
    },
    DropKeyspace {
        keyspace: String,
        if_exists: bool,
    },
}

impl Compiling {
    pub fn component(&self) -> Component {
        match self {
            Compiling::Insert { .. }
            | Compiling::Select { .. }
            | Compiling::Update { .. }
            | Compiling::Delete { .. } => Component::Query,
            Compiling::CreateKeyspace { .. }
            | Compiling::AlterKeyspace { .. }
            | Compiling::DropKeyspace { .. } => Component::Keyspace,
            _ => Component::Table,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Compiling::Insert { .. } => "insert",
            Compiling::Select { .. } => "select",
            Compiling::Update { .. } => "update",
            Compiling::Delete { .. } => "delete",
            Compiling::CreateColumnFamily { .. } => "createColumnFamily",
            Compiling::CreateType { .. } => "createType",
            Compiling::AlterColumnFamily { .. } => "alterColumnFamily",
            Compiling::AlterType { .. } => "alterType",
            Compiling::CreateIndex { .. } => "createIndex",
            Compiling::CreateIndexCustom { .. } => "createIndexCustom",
            Compiling::DropColumnFamily { .. } => "dropColumnFamily",
            Compiling::DropType { .. } => "dropType",
            Compiling::Truncate { .. } => "truncate",
            Compiling::CreateKeyspace { .. } => "createKeyspace",
            Compiling::AlterKeyspace { .. } => "alterKeyspace",
            Compiling::DropKeyspace { .. } => "dropKeyspace",
        }
    }

    /// Keyspace named by the registering call, if any.
    pub fn keyspace(&self) -> Option<&str> {
        match self {
            Compiling::CreateColumnFamily { keyspace, .. }
            | Compiling::CreateType { keyspace, .. }
            | Compiling::AlterColumnFamily { keyspace, .. }
            | Compiling::AlterType { keyspace, .. }
            | Compiling::DropColumnFamily { keyspace, .. }
            | Compiling::DropType { keyspace, .. }
            | Compiling::Truncate { keyspace, .. } => keyspace.as_deref(),
            Compiling::CreateKeyspace { keyspace, .. }
            | Compiling::AlterKeyspace { keyspace, .. }
            | Compiling::DropKeyspace { keyspace, .. } => Some(keyspace.as_str()),
            _ => None,
        }
    }

    /// Table or type named by the registering call, if any.
    pub fn table(&self) -> Option<&str> {
        match self {
            Compiling::Update { table } => table.as_deref(),
            Compiling::CreateColumnFamily { table, .. }
            | Compiling::AlterColumnFamily { table, .. }
            | Compiling::CreateIndex { table, .. }
            | Compiling::CreateIndexCustom { table, .. }
            | Compiling::DropColumnFamily { table, .. }
            | Compiling::Truncate { table, .. } => Some(table.as_str()),
            Compiling::CreateType { name, .. }
            | Compiling::AlterType { name, .. }
            | Compiling::DropType { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }
}
