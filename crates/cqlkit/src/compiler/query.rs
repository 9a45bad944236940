//! INSERT, SELECT, UPDATE and DELETE.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::Context;
use crate::{
    format::{placeholder_for_array, placeholders, quote, Bindings},
    registry::QueryMethod,
    statement::{Relation, Selection},
};

static NESTED_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[.*\]$").expect("unable to compile nested key regex"));

pub fn insert(
    ctx: &Context,
    bindings: &mut Bindings,
    identifiers: &[String],
    values: &[Value],
) -> String {
    let columns = identifiers
        .iter()
        .map(|identifier| quote(identifier))
        .collect::<Vec<_>>();
    let mut cql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        ctx.source(),
        columns.join(","),
        placeholders(&Value::Array(values.to_vec()), bindings)
    );

    if ctx.singletons.if_not_exists {
        cql.push_str(" IF NOT EXISTS");
    }
    if let Some(using) = compile_using(ctx, bindings) {
        cql.push(' ');
        cql.push_str(&using);
    }

    cql.push(';');
    cql
}

pub fn select(ctx: &Context, bindings: &mut Bindings, columns: &[Selection]) -> String {
    let aggregates = ctx
        .grouped
        .aggregates()
        .into_iter()
        .map(|aggregate| {
            let call = match aggregate.method {
                QueryMethod::Count if aggregate.column == "*" => "COUNT(*)".to_string(),
                QueryMethod::Count => format!("COUNT({})", quote(&aggregate.column)),
                method => format!("{}({})", method.name(), quote(&aggregate.column)),
            };
            match &aggregate.alias {
                Some(alias) => format!("{call} AS {}", quote(alias)),
                None => call,
            }
        })
        .collect::<Vec<_>>();

    let mut selected = columns
        .iter()
        .map(|column| match column {
            Selection::Column(name) if name == "*" => name.clone(),
            Selection::Column(name) => quote(name),
            Selection::Alias { column, alias } => format!("{} AS {}", quote(column), quote(alias)),
        })
        .collect::<Vec<_>>();
    if selected.is_empty() && aggregates.is_empty() {
        selected.push("*".to_string());
    }

    let list = [selected.join(","), aggregates.join(", ")]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>();
    let mut cql = format!("SELECT {} FROM {}", list.join(", "), ctx.source());

    let wheres = ctx.grouped.wheres();
    if !wheres.is_empty() {
        cql.push_str(" WHERE ");
        cql.push_str(&compile_relations(&wheres, bindings));
    }

    let orderings = ctx.grouped.orderings();
    if !orderings.is_empty() {
        let orders = orderings
            .iter()
            .map(|ordering| format!("{} {}", quote(&ordering.column), ordering.direction))
            .collect::<Vec<_>>();
        cql.push_str(" ORDER BY ");
        cql.push_str(&orders.join(" "));
    }

    if let Some(limit) = &ctx.singletons.limit {
        match limit.method {
            QueryMethod::LimitPerPartition => cql.push_str(" PER PARTITION LIMIT "),
            _ => cql.push_str(" LIMIT "),
        }
        cql.push_str(&placeholders(&limit.value, bindings));
    }

    if ctx.singletons.allow_filtering {
        cql.push_str(" ALLOW FILTERING");
    }

    cql.push(';');
    cql
}

pub fn update(ctx: &Context, bindings: &mut Bindings) -> String {
    let mut cql = format!("UPDATE {}", ctx.source());

    if let Some(using) = compile_using(ctx, bindings) {
        cql.push(' ');
        cql.push_str(&using);
    }

    let assignments = ctx.grouped.assignments();
    if !assignments.is_empty() {
        let sets = assignments
            .iter()
            .map(|assignment| {
                let key = quote(&assignment.key);
                let param = if assignment.value.is_array() {
                    placeholder_for_array(&assignment.value, bindings)
                } else {
                    placeholders(&assignment.value, bindings)
                };
                match assignment.method {
                    QueryMethod::Add | QueryMethod::Increment => format!("{key} = {key} + {param}"),
                    QueryMethod::Remove | QueryMethod::Decrement => {
                        format!("{key} = {key} - {param}")
                    }
                    _ => format!("{key} = {param}"),
                }
            })
            .collect::<Vec<_>>();
        cql.push_str(" SET ");
        cql.push_str(&sets.join(","));
    }

    compile_conditions(ctx, bindings, &mut cql);
    cql.push(';');
    cql
}

pub fn delete(ctx: &Context, bindings: &mut Bindings, columns: &[String]) -> String {
    let columns = columns
        .iter()
        .map(|column| quote(column))
        .collect::<Vec<_>>();
    let mut cql = format!("DELETE {} FROM {}", columns.join(","), ctx.source());

    compile_conditions(ctx, bindings, &mut cql);
    cql.push(';');
    cql
}

/// WHERE, IF and IF EXISTS, shared by UPDATE and DELETE.
fn compile_conditions(ctx: &Context, bindings: &mut Bindings, cql: &mut String) {
    let wheres = ctx.grouped.wheres();
    if !wheres.is_empty() {
        cql.push_str(" WHERE ");
        cql.push_str(&compile_relations(&wheres, bindings));
    }

    let conditions = ctx.grouped.conditions();
    if !conditions.is_empty() {
        cql.push_str(" IF ");
        cql.push_str(&compile_relations(&conditions, bindings));
    }

    if ctx.singletons.if_exists {
        cql.push_str(" IF EXISTS");
    }
}

fn compile_using(ctx: &Context, bindings: &mut Bindings) -> Option<String> {
    let usings = ctx.grouped.usings();
    if usings.is_empty() {
        return None;
    }

    let parts = usings
        .iter()
        .map(|using| {
            let keyword = match using.method {
                QueryMethod::UsingTtl => "TTL",
                _ => "TIMESTAMP",
            };
            format!("{keyword} {}", placeholders(&using.value, bindings))
        })
        .collect::<Vec<_>>();

    Some(format!("USING {}", parts.join(" AND ")))
}

/// Groups relations by kind, in order of each kind's first appearance, and
/// joins them. A group is prefixed by its own connective unless it comes
/// first.
fn compile_relations(relations: &[&Relation], bindings: &mut Bindings) -> String {
    let mut groups: Vec<(QueryMethod, Vec<&Relation>)> = Vec::new();
    for relation in relations {
        match groups.iter_mut().find(|(method, _)| *method == relation.method) {
            Some((_, group)) => group.push(relation),
            None => groups.push((relation.method, vec![relation])),
        }
    }

    let mut cql = String::new();
    for (idx, (method, group)) in groups.iter().enumerate() {
        let connective = method.connective();
        let rendered = group
            .iter()
            .map(|relation| render_relation(relation, bindings))
            .collect::<Vec<_>>();
        if idx > 0 {
            cql.push_str(connective);
        }
        cql.push_str(&rendered.join(connective));
    }
    cql
}

fn render_relation(relation: &Relation, bindings: &mut Bindings) -> String {
    let first_key = relation.keys.first().map(String::as_str).unwrap_or_default();
    let op = &relation.op;

    match relation.method {
        QueryMethod::WhereRaw => first_key.to_string(),
        QueryMethod::TokenWhere => {
            let keys = relation
                .keys
                .iter()
                .map(|key| quote(key))
                .collect::<Vec<_>>();
            format!(
                "token({}) {op} token({})",
                keys.join(", "),
                placeholders(&relation.value, bindings)
            )
        }
        QueryMethod::MinTimeuuidWhere => format!(
            "{} {op} minTimeuuid({})",
            render_key(first_key),
            placeholders(&relation.value, bindings)
        ),
        QueryMethod::MaxTimeuuidWhere => format!(
            "{} {op} maxTimeuuid({})",
            render_key(first_key),
            placeholders(&relation.value, bindings)
        ),
        _ if op.eq_ignore_ascii_case("in") => format!(
            "{} {op} ({})",
            render_key(first_key),
            placeholders(&relation.value, bindings)
        ),
        _ => format!(
            "{} {op} {}",
            render_key(first_key),
            placeholders(&relation.value, bindings)
        ),
    }
}

/// Quotes a key, leaving a trailing `[index]` element selector unquoted.
fn render_key(key: &str) -> String {
    if NESTED_KEY_RE.is_match(key) {
        if let Some(idx) = key.find('[') {
            return format!("{}{}", quote(&key[..idx]), &key[idx..]);
        }
    }
    quote(key)
}
