use serde_json::Value;

use super::{impl_cql_builder, KeyspaceBuilder, TableBuilder};
use crate::{
    registry::QueryMethod,
    session::{Component, Session},
    statement::{
        Aggregate, Assignment, Compiling, Ordering, Relation, Selection, Statement, Target, Using,
    },
};

/// Entry point of every statement, and the builder for INSERT, SELECT,
/// UPDATE and DELETE.
///
/// ```
/// use cqlkit::{CqlBuilder, QueryBuilder};
///
/// let mut query = QueryBuilder::for_keyspace("ks")
///     .select(["id", "name"])
///     .from("users")
///     .where_("id", "=", 1)
///     .limit(10);
///
/// assert_eq!(
///     query.cql().unwrap(),
///     r#"SELECT "id","name" FROM "ks"."users" WHERE "id" = ? LIMIT ?;"#
/// );
/// ```
#[derive(Debug, Default)]
pub struct QueryBuilder {
    session: Session,
}

impl_cql_builder!(QueryBuilder);

macro_rules! relation_method {
    ($(#[$meta:meta])* $fn_name:ident, $method:ident) => {
        $(#[$meta])*
        pub fn $fn_name(
            self,
            key: impl Into<String>,
            op: impl Into<String>,
            value: impl Into<Value>,
        ) -> Self {
            self.push(Statement::Where(Relation::new(
                QueryMethod::$method,
                key,
                op,
                value.into(),
            )))
        }
    };
}

macro_rules! assignment_method {
    ($(#[$meta:meta])* $fn_name:ident, $all_fn_name:ident, $method:ident) => {
        $(#[$meta])*
        pub fn $fn_name(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
            self.assign(QueryMethod::$method, [(key.into(), value.into())])
        }

        pub fn $all_fn_name<I, K, V>(self, entries: I) -> Self
        where
            I: IntoIterator<Item = (K, V)>,
            K: Into<String>,
            V: Into<Value>,
        {
            self.assign(QueryMethod::$method, entries)
        }
    };
}

macro_rules! aggregate_method {
    ($fn_name:ident, $as_fn_name:ident, $method:ident) => {
        pub fn $fn_name(self, column: impl Into<String>) -> Self {
            self.aggregate(QueryMethod::$method, column.into(), None)
        }

        pub fn $as_fn_name(self, column: impl Into<String>, alias: impl Into<String>) -> Self {
            self.aggregate(QueryMethod::$method, column.into(), Some(alias.into()))
        }
    };
}

impl QueryBuilder {
    /// Creates a builder configured from the process-wide configuration.
    pub fn new() -> Self {
        Self::from_session(Session::new())
    }

    pub fn for_keyspace(keyspace: impl Into<String>) -> Self {
        Self::new().use_keyspace(keyspace)
    }

    pub fn from_session(mut session: Session) -> Self {
        session.resolve_component(Component::Query);
        Self { session }
    }

    pub fn use_keyspace(mut self, keyspace: impl Into<String>) -> Self {
        self.session.use_keyspace(keyspace);
        self
    }

    /// Starts an INSERT of the given column/value pairs.
    pub fn insert<I, K, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let (identifiers, values): (Vec<String>, Vec<Value>) = values
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .unzip();
        self.start(Compiling::Insert {
            identifiers,
            values,
        })
    }

    /// Starts a SELECT. With no columns and no aggregates it selects `*`.
    pub fn select<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Selection>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        self.start(Compiling::Select { columns })
    }

    pub fn select_all(self) -> Self {
        self.select(["*"])
    }

    pub fn update(self, table: impl Into<String>) -> Self {
        self.start(Compiling::Update {
            table: Some(table.into()),
        })
    }

    /// Starts a DELETE of the given columns, or of whole rows when empty.
    pub fn delete<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        self.start(Compiling::Delete { columns })
    }

    pub fn from(mut self, table: impl Into<String>) -> Self {
        self.session.set_table(table);
        self.checkpoint(QueryMethod::From.name())
    }

    pub fn into(mut self, table: impl Into<String>) -> Self {
        self.session.set_table(table);
        self.checkpoint(QueryMethod::Into.name())
    }

    relation_method!(where_, Where);
    relation_method!(and_where, AndWhere);
    relation_method!(
        /// Joined to the other OR relations with `OR`.
        or_where,
        OrWhere
    );
    relation_method!(min_timeuuid_where, MinTimeuuidWhere);
    relation_method!(max_timeuuid_where, MaxTimeuuidWhere);

    /// `token("k1", "k2") op token(?, ?)`
    pub fn token_where<I, S>(self, keys: I, op: impl Into<String>, value: impl Into<Value>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(Statement::Where(Relation {
            method: QueryMethod::TokenWhere,
            keys: keys.into_iter().map(Into::into).collect(),
            op: op.into(),
            value: value.into(),
        }))
    }

    /// Appends `clause` to the WHERE clause verbatim. Nothing is bound.
    pub fn where_raw(self, clause: impl Into<String>) -> Self {
        self.push(Statement::Where(Relation::raw(clause)))
    }

    pub fn if_(self, key: impl Into<String>, op: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(Statement::If(Relation::new(
            QueryMethod::If,
            key,
            op,
            value.into(),
        )))
    }

    assignment_method!(set, set_all, Set);
    assignment_method!(
        /// `"c" = "c" + ?`, for collections.
        add,
        add_all,
        Add
    );
    assignment_method!(
        /// `"c" = "c" - ?`, for collections.
        remove,
        remove_all,
        Remove
    );
    assignment_method!(increment, increment_all, Increment);
    assignment_method!(decrement, decrement_all, Decrement);

    /// Orders by `column`. The direction is upper-cased.
    pub fn order_by(self, column: impl Into<String>, direction: impl AsRef<str>) -> Self {
        self.order_by_all([(column, direction)])
    }

    pub fn order_by_all<I, K, D>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: AsRef<str>,
    {
        for (column, direction) in entries {
            self.session.append(Statement::OrderBy(Ordering {
                column: column.into(),
                direction: direction.as_ref().to_uppercase(),
            }));
        }
        self.checkpoint(QueryMethod::OrderBy.name())
    }

    pub fn using_ttl(self, ttl: impl Into<Value>) -> Self {
        self.push(Statement::Using(Using {
            method: QueryMethod::UsingTtl,
            value: ttl.into(),
        }))
    }

    pub fn using_timestamp(self, timestamp: impl Into<Value>) -> Self {
        self.push(Statement::Using(Using {
            method: QueryMethod::UsingTimestamp,
            value: timestamp.into(),
        }))
    }

    pub fn limit(self, limit: impl Into<Value>) -> Self {
        self.singleton(QueryMethod::Limit, limit.into())
    }

    pub fn limit_per_partition(self, limit: impl Into<Value>) -> Self {
        self.singleton(QueryMethod::LimitPerPartition, limit.into())
    }

    pub fn allow_filtering(self) -> Self {
        self.singleton(QueryMethod::AllowFiltering, Value::Bool(true))
    }

    pub fn if_exists(self) -> Self {
        self.singleton(QueryMethod::IfExists, Value::Bool(true))
    }

    pub fn if_not_exists(self) -> Self {
        self.singleton(QueryMethod::IfNotExists, Value::Bool(true))
    }

    aggregate_method!(count, count_as, Count);
    aggregate_method!(ttl, ttl_as, Ttl);
    aggregate_method!(writetime, writetime_as, Writetime);
    aggregate_method!(date_of, date_of_as, DateOf);
    aggregate_method!(unix_timestamp_of, unix_timestamp_of_as, UnixTimestampOf);
    aggregate_method!(to_date, to_date_as, ToDate);
    aggregate_method!(to_timestamp, to_timestamp_as, ToTimestamp);
    aggregate_method!(to_unix_timestamp, to_unix_timestamp_as, ToUnixTimestamp);

    pub fn create_column_family(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::CreateColumnFamily {
            table: name,
            keyspace,
            if_not_exists: false,
        })
    }

    pub fn create_column_family_if_not_exists(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::CreateColumnFamily {
            table: name,
            keyspace,
            if_not_exists: true,
        })
    }

    pub fn create_type(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::CreateType {
            name,
            keyspace,
            if_not_exists: false,
        })
    }

    pub fn create_type_if_not_exists(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::CreateType {
            name,
            keyspace,
            if_not_exists: true,
        })
    }

    pub fn alter_column_family(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::AlterColumnFamily {
            table: name,
            keyspace,
        })
    }

    pub fn alter_type(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::AlterType { name, keyspace })
    }

    pub fn create_index(
        self,
        table: impl Into<String>,
        index_name: impl Into<String>,
        on_column: impl Into<String>,
    ) -> TableBuilder {
        self.into_table_builder(Compiling::CreateIndex {
            table: table.into(),
            index_name: index_name.into(),
            on_column: on_column.into(),
        })
    }

    /// Custom index backed by `using`, or by the SASI index class when `None`.
    pub fn create_index_custom(
        self,
        table: impl Into<String>,
        index_name: impl Into<String>,
        on_column: impl Into<String>,
        using: Option<&str>,
    ) -> TableBuilder {
        self.into_table_builder(Compiling::CreateIndexCustom {
            table: table.into(),
            index_name: index_name.into(),
            on_column: on_column.into(),
            using: using.map(str::to_string),
        })
    }

    pub fn drop_column_family(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::DropColumnFamily {
            table: name,
            keyspace,
            if_exists: false,
        })
    }

    pub fn drop_column_family_if_exists(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::DropColumnFamily {
            table: name,
            keyspace,
            if_exists: true,
        })
    }

    pub fn drop_type(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::DropType {
            name,
            keyspace,
            if_exists: false,
        })
    }

    pub fn drop_type_if_exists(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::DropType {
            name,
            keyspace,
            if_exists: true,
        })
    }

    pub fn truncate(self, target: impl Into<Target>) -> TableBuilder {
        let Target { keyspace, name } = target.into();
        self.into_table_builder(Compiling::Truncate {
            table: name,
            keyspace,
        })
    }

    pub fn create_keyspace(self, keyspace: impl Into<String>) -> KeyspaceBuilder {
        self.into_keyspace_builder(Compiling::CreateKeyspace {
            keyspace: keyspace.into(),
            if_not_exists: false,
        })
    }

    pub fn create_keyspace_if_not_exists(self, keyspace: impl Into<String>) -> KeyspaceBuilder {
        self.into_keyspace_builder(Compiling::CreateKeyspace {
            keyspace: keyspace.into(),
            if_not_exists: true,
        })
    }

    pub fn alter_keyspace(self, keyspace: impl Into<String>) -> KeyspaceBuilder {
        self.into_keyspace_builder(Compiling::AlterKeyspace {
            keyspace: keyspace.into(),
            if_exists: false,
        })
    }

    pub fn alter_keyspace_if_exists(self, keyspace: impl Into<String>) -> KeyspaceBuilder {
        self.into_keyspace_builder(Compiling::AlterKeyspace {
            keyspace: keyspace.into(),
            if_exists: true,
        })
    }

    pub fn drop_keyspace(self, keyspace: impl Into<String>) -> KeyspaceBuilder {
        self.into_keyspace_builder(Compiling::DropKeyspace {
            keyspace: keyspace.into(),
            if_exists: false,
        })
    }

    pub fn drop_keyspace_if_exists(self, keyspace: impl Into<String>) -> KeyspaceBuilder {
        self.into_keyspace_builder(Compiling::DropKeyspace {
            keyspace: keyspace.into(),
            if_exists: true,
        })
    }

    fn start(mut self, marker: Compiling) -> Self {
        let name = marker.name();
        self.session.resolve_component(marker.component());
        self.session.register_compiling(marker);
        self.checkpoint(name)
    }

    fn into_table_builder(self, marker: Compiling) -> TableBuilder {
        TableBuilder::start(self.session, marker)
    }

    fn into_keyspace_builder(self, marker: Compiling) -> KeyspaceBuilder {
        KeyspaceBuilder::start(self.session, marker)
    }

    fn push(mut self, statement: Statement) -> Self {
        let method = statement.method();
        self.session.append(statement);
        self.checkpoint(method.name())
    }

    fn assign<I, K, V>(mut self, method: QueryMethod, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.session.append(Statement::Set(Assignment {
                method,
                key: key.into(),
                value: value.into(),
            }));
        }
        self.checkpoint(method.name())
    }

    fn aggregate(self, method: QueryMethod, column: String, alias: Option<String>) -> Self {
        self.push(Statement::Aggregate(Aggregate {
            method,
            column,
            alias,
        }))
    }

    fn singleton(mut self, method: QueryMethod, value: Value) -> Self {
        self.session.singletons_mut().set(method, value);
        self.checkpoint(method.name())
    }

    fn checkpoint(mut self, method: &'static str) -> Self {
        self.session.checkpoint(method);
        self
    }
}
