//! Column family, user-defined type and index statements.

use tracing::error;

use super::Context;
use crate::{
    format::{literal, quote, render_map},
    registry::ColumnShape,
    statement::{Alteration, ColumnDef, PrimaryKey, WithOption},
};

const DEFAULT_INDEX_CLASS: &str = "org.apache.cassandra.index.sasi.SASIIndex";

pub fn create_column_family(ctx: &Context, if_not_exists: bool) -> String {
    let mut cql = String::from("CREATE COLUMNFAMILY ");
    if if_not_exists {
        cql.push_str("IF NOT EXISTS ");
    }
    cql.push_str(&ctx.source());
    cql.push(' ');
    push_definition(ctx, &mut cql);
    cql.push(';');
    cql
}

pub fn create_type(ctx: &Context, if_not_exists: bool) -> String {
    let mut cql = String::from("CREATE TYPE ");
    if if_not_exists {
        cql.push_str("IF NOT EXISTS ");
    }
    cql.push_str(&ctx.type_source());
    cql.push(' ');
    push_definition(ctx, &mut cql);
    cql.push(';');
    cql
}

pub fn alter_column_family(ctx: &Context) -> String {
    let mut cql = format!("ALTER TABLE {} ", ctx.source());
    push_alteration(ctx, &mut cql);
    cql.push(';');
    cql
}

pub fn alter_type(ctx: &Context) -> String {
    let mut cql = format!("ALTER TYPE {} ", ctx.type_source());
    push_alteration(ctx, &mut cql);
    cql.push(';');
    cql
}

pub fn create_index(ctx: &Context, index_name: &str, on_column: &str) -> String {
    format!(
        "CREATE INDEX {} ON {} ( {} );",
        quote(index_name),
        ctx.source(),
        quote(on_column)
    )
}

pub fn create_index_custom(
    ctx: &Context,
    index_name: &str,
    on_column: &str,
    using: Option<&str>,
) -> String {
    let mut cql = format!(
        "CREATE CUSTOM INDEX {} ON {} ( {} ) USING '{}'",
        quote(index_name),
        ctx.source(),
        quote(on_column),
        using.unwrap_or(DEFAULT_INDEX_CLASS)
    );
    if let Some(with) = compile_with(ctx) {
        cql.push(' ');
        cql.push_str(&with);
    }
    cql.push(';');
    cql
}

pub fn drop_column_family(ctx: &Context, if_exists: bool) -> String {
    let mut cql = String::from("DROP COLUMNFAMILY ");
    if if_exists {
        cql.push_str("IF EXISTS ");
    }
    cql.push_str(&ctx.source());
    cql.push_str(" ;");
    cql
}

pub fn drop_type(ctx: &Context, if_exists: bool) -> String {
    let mut cql = String::from("DROP TYPE ");
    if if_exists {
        cql.push_str("IF EXISTS ");
    }
    cql.push_str(&ctx.type_source());
    cql.push_str(" ;");
    cql
}

pub fn truncate(ctx: &Context) -> String {
    format!("TRUNCATE {} ;", ctx.source())
}

/// Column list followed by the WITH clause, as used by CREATE statements.
fn push_definition(ctx: &Context, cql: &mut String) {
    let columns = compile_columns(ctx);
    if !columns.is_empty() {
        cql.push_str(&format!("( {} ) ", columns.join(", ")));
    }
    if let Some(with) = compile_with(ctx) {
        cql.push_str(&with);
    }
}

/// ADD columns, WITH options and the ALTER/DROP/RENAME operations, each
/// separated by a space.
fn push_alteration(ctx: &Context, cql: &mut String) {
    let mut parts = Vec::new();

    let columns = compile_columns(ctx);
    if !columns.is_empty() {
        parts.push(format!("ADD {}", columns.join(" ADD ")));
    }
    parts.extend(compile_with(ctx));
    parts.extend(
        ctx.grouped
            .alterations()
            .into_iter()
            .map(|alteration| match alteration {
                Alteration::Alter { column, type_name } => {
                    format!("ALTER {} TYPE {type_name}", quote(column))
                }
                Alteration::Drop(columns) => columns
                    .iter()
                    .map(|column| format!("DROP {}", quote(column)))
                    .collect::<Vec<_>>()
                    .join(" "),
                Alteration::Rename { from, to } => {
                    format!("RENAME {} TO {}", quote(from), quote(to))
                }
            }),
    );

    cql.push_str(&parts.join(" "));
}

fn compile_columns(ctx: &Context) -> Vec<String> {
    ctx.grouped
        .columns()
        .into_iter()
        .filter_map(render_column)
        .collect()
}

fn render_column(column: &ColumnDef) -> Option<String> {
    match column {
        ColumnDef::PrimaryKey(key) => Some(render_primary_key(key)),
        ColumnDef::Unrecognized { name, type_name } => {
            error!("column '{name}' has unrecognized type '{type_name}', skipping");
            None
        }
        ColumnDef::Typed {
            method,
            name,
            options,
        } => {
            let name = quote(name);
            let type_name = method.name().to_uppercase();
            let option = |idx: usize| options.get(idx).map(String::as_str).unwrap_or_default();

            let rendered = match method.column_shape() {
                Some(ColumnShape::Collection) => {
                    format!("{name} {type_name} <{}>", options.join(","))
                }
                Some(ColumnShape::FrozenSet) => {
                    format!("{name} SET <FROZEN <{}>>", options.join(","))
                }
                Some(ColumnShape::FrozenMap) => {
                    format!("{name} MAP <{}, FROZEN <{}>>", option(0), option(1))
                }
                Some(ColumnShape::FrozenList) => {
                    format!("{name} LIST <FROZEN <{}>>", option(0))
                }
                _ => format!("{name} {type_name}"),
            };
            Some(rendered)
        }
    }
}

fn render_primary_key(key: &PrimaryKey) -> String {
    let quote_all = |columns: &[String]| {
        columns
            .iter()
            .map(|column| quote(column))
            .collect::<Vec<_>>()
    };

    let mut parts = Vec::new();
    if key.composite {
        parts.push(format!("({})", quote_all(&key.partition).join(", ")));
    } else {
        parts.extend(quote_all(&key.partition));
    }
    parts.extend(quote_all(&key.clustering));

    format!("PRIMARY KEY ({})", parts.join(", "))
}

fn compile_with(ctx: &Context) -> Option<String> {
    let withs = ctx.grouped.withs();
    if withs.is_empty() {
        return None;
    }

    let parts = withs
        .iter()
        .map(|option| match option {
            WithOption::Property { key, value } => match value {
                serde_json::Value::Object(map) => format!("{key} = {}", render_map(map)),
                scalar => format!("{key} = '{}'", literal(scalar)),
            },
            WithOption::Options { method, value } => {
                format!("{} = {}", method.name().to_uppercase(), render_map(value))
            }
            WithOption::ClusteringOrder { column, direction } => {
                format!("CLUSTERING ORDER BY ( {} {direction} ) ", quote(column))
            }
        })
        .collect::<Vec<_>>();

    Some(format!("WITH {}", parts.join(" AND ")))
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use super::*;
    use crate::{
        registry::TableMethod,
        statement::{GroupIndex, Grouped, Singletons, Statement},
    };

    fn context<'a>(
        log: &'a [Statement],
        index: &'a GroupIndex,
        singletons: &'a Singletons,
    ) -> Context<'a> {
        Context {
            grouped: Grouped::new(log, index),
            singletons,
            keyspace: Some("ks"),
            table: Some("t"),
        }
    }

    fn render(log: &[Statement], compile: impl FnOnce(&Context) -> String) -> String {
        let index = GroupIndex::build(log);
        let singletons = Singletons::default();
        compile(&context(log, &index, &singletons))
    }

    fn typed(method: TableMethod, name: &str, options: &[&str]) -> Statement {
        Statement::Column(ColumnDef::Typed {
            method,
            name: name.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        })
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_column_shapes() {
        let log = vec![
            typed(TableMethod::Text, "name", &[]),
            typed(TableMethod::List, "tags", &["text"]),
            typed(TableMethod::Map, "attrs", &["uuid", "text"]),
            typed(TableMethod::Frozen, "address", &["myUUDT"]),
            typed(TableMethod::FrozenSet, "a", &["myUUDT"]),
            typed(TableMethod::FrozenMap, "b", &["text", "myUUDT"]),
            typed(TableMethod::FrozenList, "c", &["myUUDT"]),
            Statement::Column(ColumnDef::PrimaryKey(PrimaryKey::from("name"))),
        ];

        assert_eq!(
            render(&log, |ctx| create_column_family(ctx, false)),
            "CREATE COLUMNFAMILY \"ks\".\"t\" ( \"name\" TEXT, \"tags\" LIST <text>, \
             \"attrs\" MAP <uuid,text>, \"address\" FROZEN <myUUDT>, \"a\" SET <FROZEN <myUUDT>>, \
             \"b\" MAP <text, FROZEN <myUUDT>>, \"c\" LIST <FROZEN <myUUDT>>, PRIMARY KEY (\"name\") ) ;"
        );
    }

    #[test]
    fn test_unrecognized_column_is_omitted() {
        let log = vec![
            typed(TableMethod::Int, "id", &[]),
            Statement::Column(ColumnDef::Unrecognized {
                name: "geo".into(),
                type_name: "point".into(),
            }),
        ];

        assert_eq!(
            render(&log, |ctx| create_column_family(ctx, true)),
            "CREATE COLUMNFAMILY IF NOT EXISTS \"ks\".\"t\" ( \"id\" INT ) ;"
        );
    }

    #[test]
    fn test_primary_key_forms() {
        assert_eq!(
            render_primary_key(&PrimaryKey::columns(["uuidType", "timestampType"])),
            "PRIMARY KEY (\"uuidType\", \"timestampType\")"
        );
        assert_eq!(
            render_primary_key(
                &PrimaryKey::composite(["textType", "uuidType"]).clustering(["intType", "timestamp"])
            ),
            "PRIMARY KEY ((\"textType\", \"uuidType\"), \"intType\", \"timestamp\")"
        );
    }

    #[test]
    fn test_with_clause() {
        let log = vec![
            Statement::With(WithOption::Property {
                key: "gc_grace_seconds".into(),
                value: json!(0),
            }),
            Statement::With(WithOption::Options {
                method: TableMethod::WithCaching,
                value: object(json!({"rows_per_partition": "25"})),
            }),
            Statement::With(WithOption::ClusteringOrder {
                column: "ts".into(),
                direction: "DESC".into(),
            }),
        ];

        assert_eq!(
            render(&log, |ctx| create_column_family(ctx, false)),
            "CREATE COLUMNFAMILY \"ks\".\"t\" WITH gc_grace_seconds = '0' AND CACHING = { \
             'rows_per_partition' : '25' } AND CLUSTERING ORDER BY ( \"ts\" DESC ) ;"
        );
    }

    #[test]
    fn test_alter_operations() {
        let log = vec![
            typed(TableMethod::Text, "extra", &[]),
            typed(TableMethod::Int, "count", &[]),
            Statement::Alter(Alteration::Alter {
                column: "id".into(),
                type_name: "bigint".into(),
            }),
            Statement::Alter(Alteration::Drop(vec!["a".into(), "b".into()])),
            Statement::Alter(Alteration::Rename {
                from: "c".into(),
                to: "d".into(),
            }),
        ];

        assert_eq!(
            render(&log, alter_column_family),
            "ALTER TABLE \"ks\".\"t\" ADD \"extra\" TEXT ADD \"count\" INT ALTER \"id\" TYPE bigint \
             DROP \"a\" DROP \"b\" RENAME \"c\" TO \"d\";"
        );

        let log = vec![Statement::Alter(Alteration::Rename {
            from: "c".into(),
            to: "d".into(),
        })];
        assert_eq!(
            render(&log, alter_type),
            "ALTER TYPE \"ks\".t RENAME \"c\" TO \"d\";"
        );
    }

    #[test]
    fn test_indexes() {
        assert_eq!(
            render(&[], |ctx| create_index(ctx, "idx", "col")),
            "CREATE INDEX \"idx\" ON \"ks\".\"t\" ( \"col\" );"
        );
        assert_eq!(
            render(&[], |ctx| create_index_custom(ctx, "idx", "col", None)),
            "CREATE CUSTOM INDEX \"idx\" ON \"ks\".\"t\" ( \"col\" ) USING \
             'org.apache.cassandra.index.sasi.SASIIndex';"
        );

        let log = vec![Statement::With(WithOption::Property {
            key: "OPTIONS".into(),
            value: json!({"mode": "CONTAINS"}),
        })];
        assert_eq!(
            render(&log, |ctx| create_index_custom(ctx, "idx", "col", Some("my.Index"))),
            "CREATE CUSTOM INDEX \"idx\" ON \"ks\".\"t\" ( \"col\" ) USING 'my.Index' WITH \
             OPTIONS = { 'mode' : 'CONTAINS' };"
        );
    }

    #[test]
    fn test_drops_and_truncate() {
        assert_eq!(
            render(&[], |ctx| drop_column_family(ctx, true)),
            "DROP COLUMNFAMILY IF EXISTS \"ks\".\"t\" ;"
        );
        assert_eq!(
            render(&[], |ctx| drop_type(ctx, false)),
            "DROP TYPE \"ks\".t ;"
        );
        assert_eq!(render(&[], truncate), "TRUNCATE \"ks\".\"t\" ;");
    }
}
