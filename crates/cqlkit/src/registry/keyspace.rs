use super::MethodSpec;
use crate::statement::Grouping;

/// Keyspace builder methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyspaceMethod {
    WithNetworkTopologyStrategy,
    WithSimpleStrategy,
    WithDurableWrites,
}

/// Indexed by `KeyspaceMethod as usize`. The display name of a strategy is its
/// replication class.
pub static KEYSPACE_METHODS: [MethodSpec<KeyspaceMethod>; 3] = [
    MethodSpec {
        method: KeyspaceMethod::WithNetworkTopologyStrategy,
        name: "NetworkTopologyStrategy",
        grouping: Grouping::Strategy,
        column: None,
    },
    MethodSpec {
        method: KeyspaceMethod::WithSimpleStrategy,
        name: "SimpleStrategy",
        grouping: Grouping::Strategy,
        column: None,
    },
    MethodSpec {
        method: KeyspaceMethod::WithDurableWrites,
        name: "DURABLE_WRITES",
        grouping: Grouping::And,
        column: None,
    },
];

impl KeyspaceMethod {
    pub fn spec(self) -> &'static MethodSpec<KeyspaceMethod> {
        &KEYSPACE_METHODS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_method() {
        for (idx, spec) in KEYSPACE_METHODS.iter().enumerate() {
            assert_eq!(spec.method as usize, idx);
        }
    }
}
