use serde_json::{Map, Value};
use tracing::warn;

use super::impl_cql_builder;
use crate::{
    registry::{is_reserved, TableMethod},
    session::Session,
    statement::{Alteration, ColumnDef, Compiling, PrimaryKey, Statement, WithOption},
};

/// Builder for column family, user-defined type and index statements.
#[derive(Debug)]
pub struct TableBuilder {
    session: Session,
}

impl_cql_builder!(TableBuilder);

macro_rules! scalar_column {
    ($($fn_name:ident => $method:ident),* $(,)?) => {
        $(
            pub fn $fn_name(self, name: impl Into<String>) -> Self {
                self.typed(TableMethod::$method, name.into(), Vec::new())
            }
        )*
    };
}

macro_rules! options_method {
    ($($fn_name:ident => $method:ident),* $(,)?) => {
        $(
            pub fn $fn_name(self, options: Map<String, Value>) -> Self {
                self.push(Statement::With(WithOption::Options {
                    method: TableMethod::$method,
                    value: options,
                }))
            }
        )*
    };
}

impl TableBuilder {
    pub(crate) fn start(mut session: Session, marker: Compiling) -> Self {
        let name = marker.name();
        session.resolve_component(marker.component());
        session.register_compiling(marker);
        session.checkpoint(name);
        Self { session }
    }

    scalar_column! {
        decimal => Decimal,
        boolean => Boolean,
        blob => Blob,
        timestamp => Timestamp,
        date => Date,
        inet => Inet,
        bigint => Bigint,
        counter => Counter,
        double => Double,
        int => Int,
        float => Float,
        ascii => Ascii,
        text => Text,
        timeuuid => Timeuuid,
        uuid => Uuid,
        varchar => Varchar,
    }

    /// `"name" LIST <element>`
    pub fn list(self, name: impl Into<String>, element: impl Into<String>) -> Self {
        self.typed(TableMethod::List, name.into(), vec![element.into()])
    }

    /// `"name" SET <element>`
    pub fn set(self, name: impl Into<String>, element: impl Into<String>) -> Self {
        self.typed(TableMethod::Set, name.into(), vec![element.into()])
    }

    /// `"name" MAP <key,value>`
    pub fn map(
        self,
        name: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.typed(TableMethod::Map, name.into(), vec![key.into(), value.into()])
    }

    /// `"name" FROZEN <udt>`
    pub fn frozen(self, name: impl Into<String>, udt: impl Into<String>) -> Self {
        self.typed(TableMethod::Frozen, name.into(), vec![udt.into()])
    }

    pub fn frozen_set(self, name: impl Into<String>, udt: impl Into<String>) -> Self {
        self.typed(TableMethod::FrozenSet, name.into(), vec![udt.into()])
    }

    /// `"name" MAP <key, FROZEN <udt>>`
    pub fn frozen_map(
        self,
        name: impl Into<String>,
        key: impl Into<String>,
        udt: impl Into<String>,
    ) -> Self {
        self.typed(TableMethod::FrozenMap, name.into(), vec![key.into(), udt.into()])
    }

    pub fn frozen_list(self, name: impl Into<String>, udt: impl Into<String>) -> Self {
        self.typed(TableMethod::FrozenList, name.into(), vec![udt.into()])
    }

    pub fn primary(self, key: impl Into<PrimaryKey>) -> Self {
        self.push(Statement::Column(ColumnDef::PrimaryKey(key.into())))
    }

    /// Declares a column by type name, as in `column("tags", "list", ["text"])`.
    ///
    /// Type names resolve against the column methods, ignoring case. A name
    /// no method knows is kept and reported when the statement compiles.
    pub fn column<I, S>(self, name: impl Into<String>, type_name: &str, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let options = options.into_iter().map(Into::into).collect();

        match TableMethod::column_type(type_name) {
            Some(TableMethod::Primary) | None => self.push(Statement::Column(ColumnDef::Unrecognized {
                name,
                type_name: type_name.to_string(),
            })),
            Some(method) => self.typed(method, name, options),
        }
    }

    /// `key = 'value'`, or `key = { ... }` for a map value.
    pub fn with(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_all([(key, value)])
    }

    pub fn with_all<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (key, value) in entries {
            self.session.append(Statement::With(WithOption::Property {
                key: key.into(),
                value: value.into(),
            }));
        }
        self.checkpoint(TableMethod::With.name())
    }

    options_method! {
        with_caching => WithCaching,
        with_compression => WithCompression,
        with_compaction => WithCompaction,
        with_options => WithOptions,
    }

    pub fn with_clustering_order_by(
        self,
        column: impl Into<String>,
        direction: impl AsRef<str>,
    ) -> Self {
        self.push(Statement::With(WithOption::ClusteringOrder {
            column: column.into(),
            direction: direction.as_ref().to_uppercase(),
        }))
    }

    /// `ALTER "column" TYPE type_name`
    pub fn alter(self, column: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.push(Statement::Alter(Alteration::Alter {
            column: column.into(),
            type_name: type_name.into(),
        }))
    }

    pub fn drop<I, S>(self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        self.push(Statement::Alter(Alteration::Drop(columns)))
    }

    pub fn rename(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.push(Statement::Alter(Alteration::Rename {
            from: from.into(),
            to: to.into(),
        }))
    }

    fn typed(self, method: TableMethod, name: String, options: Vec<String>) -> Self {
        if is_reserved(&name) {
            warn!("'{}' is a reserved word in CQL", name);
        }
        self.push(Statement::Column(ColumnDef::Typed {
            method,
            name,
            options,
        }))
    }

    fn push(mut self, statement: Statement) -> Self {
        let method = statement.method();
        self.session.append(statement);
        self.checkpoint(method.name())
    }

    fn checkpoint(mut self, method: &'static str) -> Self {
        self.session.checkpoint(method);
        self
    }
}

#[cfg(test)]
mod tests {
    use cqlkit_config::config::Config;
    use serde_json::json;

    use super::*;
    use crate::{
        builder::{CqlBuilder, QueryBuilder},
        session::Component,
        test_utils::capture_logs,
    };

    fn qb() -> QueryBuilder {
        let mut config = Config::default_config();
        config.keyspace = Some("cassanKnexy".to_string());
        QueryBuilder::from_session(Session::from_config(&config))
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_create_column_family() {
        let mut query = qb()
            .create_column_family("columnFamily")
            .text("textType")
            .uuid("uuidType")
            .int("intType")
            .timestamp("timestamp")
            .primary(PrimaryKey::composite(["textType", "uuidType"]).clustering(["intType", "timestamp"]));

        assert_eq!(
            query.cql().unwrap(),
            "CREATE COLUMNFAMILY \"cassanKnexy\".\"columnFamily\" ( \"textType\" TEXT, \"uuidType\" \
             UUID, \"intType\" INT, \"timestamp\" TIMESTAMP, PRIMARY KEY ((\"textType\", \
             \"uuidType\"), \"intType\", \"timestamp\") ) ;"
        );
        assert!(query.bindings().is_empty());
    }

    #[test]
    fn test_create_column_family_if_not_exists() {
        let mut query = qb()
            .create_column_family_if_not_exists("columnFamily")
            .text("textType")
            .primary("textType");

        assert_eq!(
            query.cql().unwrap(),
            "CREATE COLUMNFAMILY IF NOT EXISTS \"cassanKnexy\".\"columnFamily\" ( \"textType\" \
             TEXT, PRIMARY KEY (\"textType\") ) ;"
        );
    }

    #[test]
    fn test_collection_columns() {
        let mut query = qb()
            .create_column_family("columnFamily")
            .list("frozenList", "list<text>")
            .set("setType", "timestamp")
            .map("mapType", "uuid", "text")
            .frozen("udt", "myUUDT")
            .frozen_set("udtSet", "myUUDT")
            .frozen_map("udtMap", "text", "myUUDT")
            .frozen_list("udtList", "myUUDT")
            .primary(PrimaryKey::columns(["mapType", "udt"]));

        assert_eq!(
            query.cql().unwrap(),
            "CREATE COLUMNFAMILY \"cassanKnexy\".\"columnFamily\" ( \"frozenList\" LIST \
             <list<text>>, \"setType\" SET <timestamp>, \"mapType\" MAP <uuid,text>, \"udt\" \
             FROZEN <myUUDT>, \"udtSet\" SET <FROZEN <myUUDT>>, \"udtMap\" MAP <text, FROZEN \
             <myUUDT>>, \"udtList\" LIST <FROZEN <myUUDT>>, PRIMARY KEY (\"mapType\", \"udt\") ) ;"
        );
    }

    #[test]
    fn test_generic_column_matches_typed_method() {
        let mut generic = qb()
            .create_column_family("t")
            .column("tags", "LIST", ["text"])
            .column("id", "uuid", Vec::<String>::new());
        let mut typed = qb().create_column_family("t").list("tags", "text").uuid("id");

        assert_eq!(generic.cql().unwrap(), typed.cql().unwrap());
    }

    #[test]
    fn test_unknown_column_type_is_omitted() {
        let mut query = qb()
            .create_column_family("t")
            .text("name")
            .column("geo", "point", Vec::<String>::new());

        let (cql, logs) = capture_logs(false, || query.cql().unwrap());

        assert_eq!(cql, "CREATE COLUMNFAMILY \"cassanKnexy\".\"t\" ( \"name\" TEXT ) ;");
        assert!(logs.contains("[ERROR] column 'geo' has unrecognized type 'point', skipping\n"));
    }

    #[test]
    fn test_reserved_word_column_still_declared() {
        let (mut query, logs) = capture_logs(false, || {
            qb().create_column_family("t").text("select").int("count")
        });

        assert!(logs.contains("[WARN] 'select' is a reserved word in CQL\n"));
        assert!(!logs.contains("'count' is a reserved word"));
        assert_eq!(
            query.cql().unwrap(),
            "CREATE COLUMNFAMILY \"cassanKnexy\".\"t\" ( \"select\" TEXT, \"count\" INT ) ;"
        );
    }

    #[test]
    fn test_with_options() {
        let mut query = qb()
            .create_column_family("columnFamily")
            .with_all([("gc_grace_seconds", json!(0)), ("default_time_to_live", json!(3600))])
            .with_compression(object(json!({
                "sstable_compression ": "DeflateCompressor",
                "chunk_length_kb": 64
            })))
            .with_compaction(object(json!({
                "class": "SizeTieredCompactionStrategy",
                "cold_reads_to_omit": 0.05
            })))
            .with_caching(object(json!({"rows_per_partition": 25})))
            .with("comment", "For Knex!");

        assert_eq!(
            query.cql().unwrap(),
            "CREATE COLUMNFAMILY \"cassanKnexy\".\"columnFamily\" WITH gc_grace_seconds = '0' AND \
             default_time_to_live = '3600' AND COMPRESSION = { 'sstable_compression ' : \
             'DeflateCompressor' , 'chunk_length_kb' : '64' } AND COMPACTION = { 'class' : \
             'SizeTieredCompactionStrategy' , 'cold_reads_to_omit' : '0.05' } AND CACHING = { \
             'rows_per_partition' : '25' } AND comment = 'For Knex!';"
        );
    }

    #[test]
    fn test_clustering_order() {
        let mut query = qb()
            .create_column_family("t")
            .text("id")
            .timestamp("ts")
            .primary(PrimaryKey::from("id").clustering(["ts"]))
            .with_clustering_order_by("ts", "desc");

        assert_eq!(
            query.cql().unwrap(),
            "CREATE COLUMNFAMILY \"cassanKnexy\".\"t\" ( \"id\" TEXT, \"ts\" TIMESTAMP, PRIMARY \
             KEY (\"id\", \"ts\") ) WITH CLUSTERING ORDER BY ( \"ts\" DESC ) ;"
        );
    }

    #[test]
    fn test_create_type() {
        let mut query = qb().create_type("type").text("textType");
        assert_eq!(
            query.cql().unwrap(),
            "CREATE TYPE \"cassanKnexy\".type ( \"textType\" TEXT ) ;"
        );

        let mut query = qb().create_type_if_not_exists("type").text("textType");
        assert_eq!(
            query.cql().unwrap(),
            "CREATE TYPE IF NOT EXISTS \"cassanKnexy\".type ( \"textType\" TEXT ) ;"
        );
    }

    #[test]
    fn test_alter_column_family() {
        let mut query = qb()
            .alter_column_family("columnFamily")
            .alter("columnName", "columnType");
        assert_eq!(
            query.cql().unwrap(),
            "ALTER TABLE \"cassanKnexy\".\"columnFamily\" ALTER \"columnName\" TYPE columnType;"
        );

        let mut query = qb().alter_column_family("columnFamily").rename("old", "new");
        assert_eq!(
            query.cql().unwrap(),
            "ALTER TABLE \"cassanKnexy\".\"columnFamily\" RENAME \"old\" TO \"new\";"
        );

        let mut query = qb()
            .alter_column_family("columnFamily")
            .drop(["columnName1", "columnName2"]);
        assert_eq!(
            query.cql().unwrap(),
            "ALTER TABLE \"cassanKnexy\".\"columnFamily\" DROP \"columnName1\" DROP \"columnName2\";"
        );

        let mut query = qb()
            .alter_column_family("columnFamily")
            .uuid("uuidType")
            .varchar("varcharType");
        assert_eq!(
            query.cql().unwrap(),
            "ALTER TABLE \"cassanKnexy\".\"columnFamily\" ADD \"uuidType\" UUID ADD \"varcharType\" \
             VARCHAR;"
        );
    }

    #[test]
    fn test_alter_type() {
        let mut query = qb().alter_type("address").rename("zip", "postcode");
        assert_eq!(
            query.cql().unwrap(),
            "ALTER TYPE \"cassanKnexy\".address RENAME \"zip\" TO \"postcode\";"
        );
    }

    #[test]
    fn test_create_index() {
        let mut query = qb().create_index("columnFamily", "indexName", "foo");
        assert_eq!(
            query.cql().unwrap(),
            "CREATE INDEX \"indexName\" ON \"cassanKnexy\".\"columnFamily\" ( \"foo\" );"
        );
    }

    #[test]
    fn test_create_index_custom() {
        let mut query = qb()
            .create_index_custom("columnFamily", "indexName", "onColumn", None)
            .with_options(object(json!({
                "mode": "CONTAINS",
                "analyzer_class": "org.apache.cassandra.index.sasi.analyzer.NonTokenizingAnalyzer",
                "case_sensitive": "false"
            })));
        assert_eq!(
            query.cql().unwrap(),
            "CREATE CUSTOM INDEX \"indexName\" ON \"cassanKnexy\".\"columnFamily\" ( \"onColumn\" ) \
             USING 'org.apache.cassandra.index.sasi.SASIIndex' WITH OPTIONS = { 'mode' : \
             'CONTAINS' , 'analyzer_class' : \
             'org.apache.cassandra.index.sasi.analyzer.NonTokenizingAnalyzer' , 'case_sensitive' \
             : 'false' };"
        );

        let mut query = qb().create_index_custom(
            "columnFamily",
            "indexName",
            "onColumn",
            Some("org.custom.class.path"),
        );
        assert_eq!(
            query.cql().unwrap(),
            "CREATE CUSTOM INDEX \"indexName\" ON \"cassanKnexy\".\"columnFamily\" ( \"onColumn\" ) \
             USING 'org.custom.class.path';"
        );
    }

    #[test]
    fn test_drop_and_truncate() {
        let mut query = qb().drop_column_family("columnFamily");
        assert_eq!(
            query.cql().unwrap(),
            "DROP COLUMNFAMILY \"cassanKnexy\".\"columnFamily\" ;"
        );

        let mut query = qb().drop_column_family_if_exists("columnFamily");
        assert_eq!(
            query.cql().unwrap(),
            "DROP COLUMNFAMILY IF EXISTS \"cassanKnexy\".\"columnFamily\" ;"
        );

        let mut query = qb().drop_type_if_exists("type");
        assert_eq!(query.cql().unwrap(), "DROP TYPE IF EXISTS \"cassanKnexy\".type ;");

        let mut query = qb().drop_type("type");
        assert_eq!(query.cql().unwrap(), "DROP TYPE \"cassanKnexy\".type ;");

        let mut query = qb().truncate("columnFamily");
        assert_eq!(query.cql().unwrap(), "TRUNCATE \"cassanKnexy\".\"columnFamily\" ;");
    }

    #[test]
    fn test_explicit_keyspace_overrides_session() {
        let mut query = qb().truncate(("archive", "events"));
        assert_eq!(query.cql().unwrap(), "TRUNCATE \"archive\".\"events\" ;");
        assert_eq!(query.keyspace(), Some("archive"));
    }

    #[test]
    fn test_without_keyspace() {
        let session = Session::from_config(&Config::default_config());
        let mut query = QueryBuilder::from_session(session).drop_column_family("t");
        assert_eq!(query.cql().unwrap(), "DROP COLUMNFAMILY \"t\" ;");
    }

    #[test]
    fn test_debug_checkpoint_names_component() {
        let mut session = qb().into_session();
        session.set_debug(true);

        let (query, logs) = capture_logs(false, || {
            QueryBuilder::from_session(session)
                .create_column_family("t")
                .text("id")
        });

        assert!(logs.contains(
            "[DEBUG] Table text: CREATE COLUMNFAMILY \"cassanKnexy\".\"t\" ( \"id\" TEXT ) ; bindings: []\n"
        ));
        assert_eq!(query.session().method_stack(), &["createColumnFamily", "text"]);
    }

    #[test]
    fn test_switches_component() {
        let query = qb().create_column_family("t");
        assert_eq!(query.session().component(), Component::Table);
    }
}
