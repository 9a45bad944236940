use super::{ColumnShape, MethodSpec};
use crate::statement::Grouping;

/// Table and user-defined type builder methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableMethod {
    Primary,
    Frozen,
    FrozenSet,
    FrozenMap,
    FrozenList,
    List,
    Set,
    Decimal,
    Boolean,
    Blob,
    Timestamp,
    Date,
    Inet,
    Bigint,
    Counter,
    Double,
    Int,
    Float,
    Map,
    Ascii,
    Text,
    Timeuuid,
    Uuid,
    Varchar,
    /// Generic declaration by type name. Not a column type itself.
    Column,
    With,
    WithCaching,
    WithCompression,
    WithCompaction,
    WithClusteringOrderBy,
    WithOptions,
    Alter,
    Drop,
    Rename,
}

macro_rules! spec {
    ($method:ident, $name:literal, $grouping:ident, $column:expr) => {
        MethodSpec {
            method: TableMethod::$method,
            name: $name,
            grouping: Grouping::$grouping,
            column: $column,
        }
    };
    ($method:ident, $name:literal, $grouping:ident) => {
        spec!($method, $name, $grouping, None)
    };
}

const SCALAR: Option<ColumnShape> = Some(ColumnShape::Scalar);
const COLLECTION: Option<ColumnShape> = Some(ColumnShape::Collection);

/// Indexed by `TableMethod as usize`.
pub static TABLE_METHODS: [MethodSpec<TableMethod>; 34] = [
    spec!(Primary, "primary", Column, Some(ColumnShape::PrimaryKey)),
    spec!(Frozen, "frozen", Column, COLLECTION),
    spec!(FrozenSet, "frozenSet", Column, Some(ColumnShape::FrozenSet)),
    spec!(FrozenMap, "frozenMap", Column, Some(ColumnShape::FrozenMap)),
    spec!(FrozenList, "frozenList", Column, Some(ColumnShape::FrozenList)),
    spec!(List, "list", Column, COLLECTION),
    spec!(Set, "set", Column, COLLECTION),
    spec!(Decimal, "decimal", Column, SCALAR),
    spec!(Boolean, "boolean", Column, SCALAR),
    spec!(Blob, "blob", Column, SCALAR),
    spec!(Timestamp, "timestamp", Column, SCALAR),
    spec!(Date, "date", Column, SCALAR),
    spec!(Inet, "inet", Column, SCALAR),
    spec!(Bigint, "bigint", Column, SCALAR),
    spec!(Counter, "counter", Column, SCALAR),
    spec!(Double, "double", Column, SCALAR),
    spec!(Int, "int", Column, SCALAR),
    spec!(Float, "float", Column, SCALAR),
    spec!(Map, "map", Column, COLLECTION),
    spec!(Ascii, "ascii", Column, SCALAR),
    spec!(Text, "text", Column, SCALAR),
    spec!(Timeuuid, "timeuuid", Column, SCALAR),
    spec!(Uuid, "uuid", Column, SCALAR),
    spec!(Varchar, "varchar", Column, SCALAR),
    spec!(Column, "column", Column),
    spec!(With, "with", With),
    spec!(WithCaching, "caching", With),
    spec!(WithCompression, "compression", With),
    spec!(WithCompaction, "compaction", With),
    spec!(WithClusteringOrderBy, "clustering", With),
    spec!(WithOptions, "options", With),
    spec!(Alter, "alter", Alter),
    spec!(Drop, "drop", Alter),
    spec!(Rename, "rename", Alter),
];

impl TableMethod {
    pub fn spec(self) -> &'static MethodSpec<TableMethod> {
        &TABLE_METHODS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Finds the column type method whose display name matches `type_name`,
    /// ignoring case.
    pub fn column_type(type_name: &str) -> Option<TableMethod> {
        TABLE_METHODS
            .iter()
            .filter(|spec| spec.column.is_some())
            .find(|spec| spec.name.eq_ignore_ascii_case(type_name))
            .map(|spec| spec.method)
    }

    pub fn column_shape(self) -> Option<ColumnShape> {
        self.spec().column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_method() {
        for (idx, spec) in TABLE_METHODS.iter().enumerate() {
            assert_eq!(spec.method as usize, idx, "{} is out of place", spec.name);
        }
    }

    #[test]
    fn test_column_type_lookup() {
        assert_eq!(TableMethod::column_type("text"), Some(TableMethod::Text));
        assert_eq!(TableMethod::column_type("TIMEUUID"), Some(TableMethod::Timeuuid));
        assert_eq!(TableMethod::column_type("frozenMap"), Some(TableMethod::FrozenMap));
        assert_eq!(TableMethod::column_type("duration"), None);
        // option methods are not column types
        assert_eq!(TableMethod::column_type("caching"), None);
        assert_eq!(TableMethod::column_type("column"), None);
    }

    #[test]
    fn test_column_shape() {
        assert_eq!(TableMethod::Text.column_shape(), Some(ColumnShape::Scalar));
        assert_eq!(TableMethod::Frozen.column_shape(), Some(ColumnShape::Collection));
        assert_eq!(TableMethod::WithCaching.column_shape(), None);
    }
}
