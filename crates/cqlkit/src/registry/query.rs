use super::MethodSpec;
use crate::statement::Grouping;

/// Data manipulation builder methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryMethod {
    From,
    Into,
    Where,
    AndWhere,
    OrWhere,
    TokenWhere,
    MinTimeuuidWhere,
    MaxTimeuuidWhere,
    WhereRaw,
    OrderBy,
    Set,
    Add,
    Remove,
    Increment,
    Decrement,
    If,
    IfExists,
    IfNotExists,
    UsingTtl,
    UsingTimestamp,
    Limit,
    LimitPerPartition,
    Count,
    Ttl,
    Writetime,
    DateOf,
    UnixTimestampOf,
    ToDate,
    ToTimestamp,
    ToUnixTimestamp,
    AllowFiltering,
}

macro_rules! spec {
    ($method:ident, $name:literal, $grouping:ident) => {
        MethodSpec {
            method: QueryMethod::$method,
            name: $name,
            grouping: Grouping::$grouping,
            column: None,
        }
    };
}

/// Indexed by `QueryMethod as usize`.
pub static QUERY_METHODS: [MethodSpec<QueryMethod>; 31] = [
    spec!(From, "from", Source),
    spec!(Into, "into", Source),
    spec!(Where, "where", Where),
    spec!(AndWhere, "andWhere", Where),
    spec!(OrWhere, "orWhere", Where),
    spec!(TokenWhere, "tokenWhere", Where),
    spec!(MinTimeuuidWhere, "minTimeuuidWhere", Where),
    spec!(MaxTimeuuidWhere, "maxTimeuuidWhere", Where),
    spec!(WhereRaw, "whereRaw", Where),
    spec!(OrderBy, "orderBy", OrderBy),
    spec!(Set, "set", Set),
    spec!(Add, "add", Set),
    spec!(Remove, "remove", Set),
    spec!(Increment, "increment", Set),
    spec!(Decrement, "decrement", Set),
    spec!(If, "if", If),
    spec!(IfExists, "ifExists", IfExists),
    spec!(IfNotExists, "ifNotExists", IfNotExists),
    spec!(UsingTtl, "usingTTL", Using),
    spec!(UsingTimestamp, "usingTimestamp", Using),
    spec!(Limit, "limit", Limit),
    spec!(LimitPerPartition, "limitPerPartition", Limit),
    spec!(Count, "count", Aggregate),
    spec!(Ttl, "ttl", Aggregate),
    spec!(Writetime, "writetime", Aggregate),
    spec!(DateOf, "dateOf", Aggregate),
    spec!(UnixTimestampOf, "unixTimestampOf", Aggregate),
    spec!(ToDate, "toDate", Aggregate),
    spec!(ToTimestamp, "toTimestamp", Aggregate),
    spec!(ToUnixTimestamp, "toUnixTimestamp", Aggregate),
    spec!(AllowFiltering, "allowFiltering", Allow),
];

impl QueryMethod {
    pub fn spec(self) -> &'static MethodSpec<QueryMethod> {
        &QUERY_METHODS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn grouping(self) -> Grouping {
        self.spec().grouping
    }

    /// Connective joining relations of this kind inside a WHERE or IF clause.
    pub fn connective(self) -> &'static str {
        match self {
            QueryMethod::OrWhere => " OR ",
            QueryMethod::WhereRaw => " ",
            _ => " AND ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_method() {
        for (idx, spec) in QUERY_METHODS.iter().enumerate() {
            assert_eq!(spec.method as usize, idx, "{} is out of place", spec.name);
        }
    }

    #[test]
    fn test_where_family_shares_grouping() {
        let wheres = QUERY_METHODS
            .iter()
            .filter(|spec| spec.grouping == Grouping::Where)
            .count();
        assert_eq!(wheres, 7);
    }

    #[test]
    fn test_singleton_groupings() {
        assert_eq!(QueryMethod::From.grouping(), Grouping::Source);
        assert_eq!(QueryMethod::Into.grouping(), Grouping::Source);
        assert_eq!(QueryMethod::LimitPerPartition.grouping(), Grouping::Limit);
        assert_eq!(QueryMethod::AllowFiltering.grouping(), Grouping::Allow);
        assert_eq!(QueryMethod::IfExists.grouping(), Grouping::IfExists);
        assert_eq!(QueryMethod::IfNotExists.grouping(), Grouping::IfNotExists);
    }

    #[test]
    fn test_connectives() {
        assert_eq!(QueryMethod::Where.connective(), " AND ");
        assert_eq!(QueryMethod::TokenWhere.connective(), " AND ");
        assert_eq!(QueryMethod::OrWhere.connective(), " OR ");
        assert_eq!(QueryMethod::WhereRaw.connective(), " ");
        assert_eq!(QueryMethod::If.connective(), " AND ");
    }
}
