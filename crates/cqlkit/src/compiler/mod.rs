//! Compilers turning a grouped log into CQL text.
//!
//! Each statement kind has one entry point. Entry points only read the
//! session through [`Context`] and push bound values into [`Bindings`] in the
//! order their placeholders appear.

pub mod keyspace;
pub mod query;
pub mod table;

use crate::{
    format::{quote, Bindings},
    statement::{Compiling, Grouped, Singletons},
};

/// What a compiler sees of the session.
pub struct Context<'a> {
    pub grouped: Grouped<'a>,
    pub singletons: &'a Singletons,
    pub keyspace: Option<&'a str>,
    pub table: Option<&'a str>,
}

impl Context<'_> {
    /// `"ks"."table"`, `"table"` or nothing, depending on what is known.
    pub fn source(&self) -> String {
        match (self.keyspace, self.table) {
            (Some(keyspace), Some(table)) => format!("{}.{}", quote(keyspace), quote(table)),
            (None, Some(table)) => quote(table),
            _ => String::new(),
        }
    }

    /// Like [`Context::source`] but the type name stays unquoted.
    pub fn type_source(&self) -> String {
        match (self.keyspace, self.table) {
            (Some(keyspace), Some(name)) => format!("{}.{}", quote(keyspace), name),
            (None, Some(name)) => name.to_string(),
            _ => String::new(),
        }
    }
}

/// Runs the compiler registered by `marker`.
pub fn compile(marker: &Compiling, ctx: &Context, bindings: &mut Bindings) -> String {
    match marker {
        Compiling::Insert {
            identifiers,
            values,
        } => query::insert(ctx, bindings, identifiers, values),
        Compiling::Select { columns } => query::select(ctx, bindings, columns),
        Compiling::Update { .. } => query::update(ctx, bindings),
        Compiling::Delete { columns } => query::delete(ctx, bindings, columns),
        Compiling::CreateColumnFamily { if_not_exists, .. } => {
            table::create_column_family(ctx, *if_not_exists)
        }
        Compiling::CreateType { if_not_exists, .. } => table::create_type(ctx, *if_not_exists),
        Compiling::AlterColumnFamily { .. } => table::alter_column_family(ctx),
        Compiling::AlterType { .. } => table::alter_type(ctx),
        Compiling::CreateIndex {
            index_name,
            on_column,
            ..
        } => table::create_index(ctx, index_name, on_column),
        Compiling::CreateIndexCustom {
            index_name,
            on_column,
            using,
            ..
        } => table::create_index_custom(ctx, index_name, on_column, using.as_deref()),
        Compiling::DropColumnFamily { if_exists, .. } => {
            table::drop_column_family(ctx, *if_exists)
        }
        Compiling::DropType { if_exists, .. } => table::drop_type(ctx, *if_exists),
        Compiling::Truncate { .. } => table::truncate(ctx),
        Compiling::CreateKeyspace { if_not_exists, .. } => {
            keyspace::create_keyspace(ctx, *if_not_exists)
        }
        Compiling::AlterKeyspace { if_exists, .. } => keyspace::alter_keyspace(ctx, *if_exists),
        Compiling::DropKeyspace { if_exists, .. } => keyspace::drop_keyspace(ctx, *if_exists),
    }
}
