use std::{collections::HashSet, sync::LazyLock};

/// Keywords CQL refuses as unquoted identifiers.
pub static RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "add", "allow", "alter", "and", "apply", "asc", "authorize", "batch", "begin", "by",
        "columnfamily", "create", "default", "delete", "desc", "describe", "drop", "entries",
        "execute", "from", "full", "grant", "if", "in", "index", "infinity", "insert", "into",
        "is", "keyspace", "limit", "materialized", "mbean", "mbeans", "modify", "nan",
        "norecursive", "not", "null", "of", "on", "or", "order", "primary", "rename", "replace",
        "revoke", "schema", "select", "set", "table", "to", "token", "truncate", "unlogged",
        "unset", "update", "use", "using", "view", "where", "with",
    ]
    .into_iter()
    .collect()
});

pub fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.contains(name.to_lowercase().as_str())
}
