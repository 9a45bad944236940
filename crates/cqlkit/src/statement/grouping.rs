use std::collections::HashMap;

use super::{
    Aggregate, Alteration, Assignment, ColumnDef, DurableWrites, Ordering, Relation, Replication,
    Statement, Using, WithOption,
};

/// The clause a record feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Grouping {
    Source,
    Where,
    If,
    Set,
    Using,
    OrderBy,
    Aggregate,
    Limit,
    Allow,
    IfExists,
    IfNotExists,
    Column,
    With,
    Alter,
    Strategy,
    And,
}

/// Positions of the log's records, bucketed by grouping. Append order is kept
/// inside each bucket.
#[derive(Debug, Default)]
pub struct GroupIndex {
    groups: HashMap<Grouping, Vec<usize>>,
}

impl GroupIndex {
    pub fn build(log: &[Statement]) -> Self {
        let mut groups: HashMap<Grouping, Vec<usize>> = HashMap::new();
        for (idx, statement) in log.iter().enumerate() {
            groups.entry(statement.grouping()).or_default().push(idx);
        }
        Self { groups }
    }

    pub fn indices(&self, grouping: Grouping) -> &[usize] {
        self.groups
            .get(&grouping)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn contains(&self, grouping: Grouping) -> bool {
        !self.indices(grouping).is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

macro_rules! typed_group {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        pub fn $fn_name(&self) -> Vec<&'a $ty> {
            self.records(Grouping::$variant)
                .filter_map(|statement| match statement {
                    Statement::$variant(record) => Some(record),
                    _ => None,
                })
                .collect()
        }
    };
}

/// A read-only view pairing the log with its index.
#[derive(Clone, Copy)]
pub struct Grouped<'a> {
    log: &'a [Statement],
    index: &'a GroupIndex,
}

impl<'a> Grouped<'a> {
    pub fn new(log: &'a [Statement], index: &'a GroupIndex) -> Self {
        Self { log, index }
    }

    pub fn has(&self, grouping: Grouping) -> bool {
        self.index.contains(grouping)
    }

    pub fn records(&self, grouping: Grouping) -> impl Iterator<Item = &'a Statement> + 'a {
        let log = self.log;
        let index = self.index;
        index
            .indices(grouping)
            .iter()
            .filter_map(move |&idx| log.get(idx))
    }

    typed_group!(wheres, Where, Relation);
    typed_group!(conditions, If, Relation);
    typed_group!(assignments, Set, Assignment);
    typed_group!(usings, Using, Using);
    typed_group!(orderings, OrderBy, Ordering);
    typed_group!(aggregates, Aggregate, Aggregate);
    typed_group!(columns, Column, ColumnDef);
    typed_group!(withs, With, WithOption);
    typed_group!(alterations, Alter, Alteration);
    typed_group!(strategies, Strategy, Replication);
    typed_group!(durable_writes, And, DurableWrites);
}
