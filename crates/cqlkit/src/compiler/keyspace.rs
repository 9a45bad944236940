//! CREATE, ALTER and DROP KEYSPACE.

use super::Context;
use crate::{
    format::{quote, render_map},
    registry::KeyspaceMethod,
};

pub fn create_keyspace(ctx: &Context, if_not_exists: bool) -> String {
    let mut cql = String::from("CREATE KEYSPACE ");
    if if_not_exists {
        cql.push_str("IF NOT EXISTS ");
    }
    push_keyspace(ctx, &mut cql);
    push_options(ctx, &mut cql);
    cql.push(';');
    cql
}

pub fn alter_keyspace(ctx: &Context, if_exists: bool) -> String {
    let mut cql = String::from("ALTER KEYSPACE ");
    if if_exists {
        cql.push_str("IF EXISTS ");
    }
    push_keyspace(ctx, &mut cql);
    push_options(ctx, &mut cql);
    cql.push(';');
    cql
}

pub fn drop_keyspace(ctx: &Context, if_exists: bool) -> String {
    let mut cql = String::from("DROP KEYSPACE ");
    if if_exists {
        cql.push_str("IF EXISTS ");
    }
    push_keyspace(ctx, &mut cql);
    cql.push(';');
    cql
}

fn push_keyspace(ctx: &Context, cql: &mut String) {
    if let Some(keyspace) = ctx.keyspace {
        cql.push_str(&quote(keyspace));
    }
}

/// Replication maps and durable-writes flags are each concatenated as given.
fn push_options(ctx: &Context, cql: &mut String) {
    let strategies = ctx.grouped.strategies();
    if !strategies.is_empty() {
        cql.push_str(" WITH REPLICATION = ");
        for strategy in strategies {
            cql.push_str(&render_map(&strategy.params));
        }
    }

    let durable_writes = ctx.grouped.durable_writes();
    if !durable_writes.is_empty() {
        cql.push_str(" AND ");
        for flag in durable_writes {
            cql.push_str(&format!("{} = {}", KeyspaceMethod::WithDurableWrites.name(), flag.0));
        }
    }
}
