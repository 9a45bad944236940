//! Declarative method tables for the three sub-languages.
//!
//! Every public builder method has one [`MethodSpec`] entry naming its CQL
//! display name and the grouping its calls feed. Records carry the [`Method`]
//! that produced them and take their grouping from its entry, singleton
//! setters dispatch on it, and the compilers use the display names and
//! column shapes when rendering.

pub mod keyspace;
pub mod query;
pub mod reserved;
pub mod table;

pub use keyspace::{KeyspaceMethod, KEYSPACE_METHODS};
pub use query::{QueryMethod, QUERY_METHODS};
pub use reserved::is_reserved;
pub use table::{TableMethod, TABLE_METHODS};

use crate::statement::Grouping;

/// Any builder method, across the three tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Query(QueryMethod),
    Table(TableMethod),
    Keyspace(KeyspaceMethod),
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::Query(method) => method.name(),
            Method::Table(method) => method.name(),
            Method::Keyspace(method) => method.name(),
        }
    }

    pub fn grouping(self) -> Grouping {
        match self {
            Method::Query(method) => method.spec().grouping,
            Method::Table(method) => method.spec().grouping,
            Method::Keyspace(method) => method.spec().grouping,
        }
    }
}

impl From<QueryMethod> for Method {
    fn from(method: QueryMethod) -> Self {
        Method::Query(method)
    }
}

impl From<TableMethod> for Method {
    fn from(method: TableMethod) -> Self {
        Method::Table(method)
    }
}

impl From<KeyspaceMethod> for Method {
    fn from(method: KeyspaceMethod) -> Self {
        Method::Keyspace(method)
    }
}

/// How a column type renders in a column definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnShape {
    /// `"name" TYPE`
    Scalar,
    /// `"name" TYPE <a,b>`
    Collection,
    /// `"name" SET <FROZEN <udt>>`
    FrozenSet,
    /// `"name" MAP <key, FROZEN <udt>>`
    FrozenMap,
    /// `"name" LIST <FROZEN <udt>>`
    FrozenList,
    PrimaryKey,
}

#[derive(Debug)]
pub struct MethodSpec<M: 'static> {
    pub method: M,
    pub name: &'static str,
    pub grouping: Grouping,
    /// Set for the column type methods only.
    pub column: Option<ColumnShape>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_delegates_to_its_table() {
        let method = Method::from(QueryMethod::OrWhere);
        assert_eq!(method.name(), "orWhere");
        assert_eq!(method.grouping(), Grouping::Where);

        let method = Method::from(TableMethod::WithClusteringOrderBy);
        assert_eq!(method.name(), "clustering");
        assert_eq!(method.grouping(), Grouping::With);

        let method = Method::from(KeyspaceMethod::WithDurableWrites);
        assert_eq!(method.name(), "DURABLE_WRITES");
        assert_eq!(method.grouping(), Grouping::And);
    }
}
