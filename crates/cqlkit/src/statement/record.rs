use serde_json::{Map, Value};

use crate::registry::{KeyspaceMethod, QueryMethod, TableMethod};

/// A WHERE or IF relation.
#[derive(Clone, Debug, PartialEq)]
pub struct Relation {
    pub method: QueryMethod,
    /// One key for plain relations, several for `token(...)` relations. Raw
    /// relations keep their clause text here.
    pub keys: Vec<String>,
    pub op: String,
    pub value: Value,
}

impl Relation {
    pub fn new(
        method: QueryMethod,
        key: impl Into<String>,
        op: impl Into<String>,
        value: Value,
    ) -> Self {
        Self {
            method,
            keys: vec![key.into()],
            op: op.into(),
            value,
        }
    }

    pub fn raw(clause: impl Into<String>) -> Self {
        Self {
            method: QueryMethod::WhereRaw,
            keys: vec![clause.into()],
            op: String::new(),
            value: Value::Null,
        }
    }
}

/// One `SET` assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub method: QueryMethod,
    pub key: String,
    pub value: Value,
}

/// A `USING TTL` or `USING TIMESTAMP` parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Using {
    pub method: QueryMethod,
    pub value: Value,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ordering {
    pub column: String,
    /// Upper-cased as given, usually `ASC` or `DESC`.
    pub direction: String,
}

/// A function applied to a selected column, such as `ttl("col")`.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregate {
    pub method: QueryMethod,
    pub column: String,
    pub alias: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ColumnDef {
    Typed {
        method: TableMethod,
        name: String,
        options: Vec<String>,
    },
    PrimaryKey(PrimaryKey),
    /// Declared through a type name that no column method knows. Kept so the
    /// compiler can report it, never rendered.
    Unrecognized { name: String, type_name: String },
}

/// Primary key definition.
///
/// A composite partition key renders in its own parentheses; clustering
/// columns follow it flat.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PrimaryKey {
    pub partition: Vec<String>,
    pub composite: bool,
    pub clustering: Vec<String>,
}

impl PrimaryKey {
    /// Flat key: the first column is the partition key, the rest cluster.
    pub fn columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            partition: columns.into_iter().map(Into::into).collect(),
            composite: false,
            clustering: Vec::new(),
        }
    }

    /// Composite partition key, rendered as `("a", "b")`.
    pub fn composite<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            partition: columns.into_iter().map(Into::into).collect(),
            composite: true,
            clustering: Vec::new(),
        }
    }

    pub fn clustering<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clustering.extend(columns.into_iter().map(Into::into));
        self
    }
}

impl From<&str> for PrimaryKey {
    fn from(column: &str) -> Self {
        PrimaryKey::columns([column])
    }
}

impl From<String> for PrimaryKey {
    fn from(column: String) -> Self {
        PrimaryKey::columns([column])
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum WithOption {
    /// `key = 'value'`, or `key = { ... }` when the value is a map.
    Property { key: String, value: Value },
    /// `CACHING = { ... }` and friends.
    Options {
        method: TableMethod,
        value: Map<String, Value>,
    },
    ClusteringOrder { column: String, direction: String },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Alteration {
    Alter { column: String, type_name: String },
    Drop(Vec<String>),
    Rename { from: String, to: String },
}

/// Replication parameters, `class` first.
#[derive(Clone, Debug, PartialEq)]
pub struct Replication {
    pub method: KeyspaceMethod,
    pub params: Map<String, Value>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DurableWrites(pub bool);

/// A table or type name, optionally qualified by its keyspace.
#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub keyspace: Option<String>,
    pub name: String,
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target {
            keyspace: None,
            name: name.to_string(),
        }
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Target {
            keyspace: None,
            name,
        }
    }
}

/// `(keyspace, name)`
impl From<(&str, &str)> for Target {
    fn from((keyspace, name): (&str, &str)) -> Self {
        Target {
            keyspace: Some(keyspace.to_string()),
            name: name.to_string(),
        }
    }
}

/// An entry of a SELECT list.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection {
    Column(String),
    Alias { column: String, alias: String },
}

impl From<&str> for Selection {
    fn from(column: &str) -> Self {
        Selection::Column(column.to_string())
    }
}

impl From<String> for Selection {
    fn from(column: String) -> Self {
        Selection::Column(column)
    }
}

impl From<(&str, &str)> for Selection {
    fn from((column, alias): (&str, &str)) -> Self {
        Selection::Alias {
            column: column.to_string(),
            alias: alias.to_string(),
        }
    }
}
