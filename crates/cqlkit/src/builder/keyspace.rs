use serde_json::{Map, Value};

use super::impl_cql_builder;
use crate::{
    error::{Error, Result},
    registry::KeyspaceMethod,
    session::Session,
    statement::{Compiling, DurableWrites, Replication, Statement},
};

/// Builder for keyspace statements.
///
/// ```
/// use cqlkit::{CqlBuilder, QueryBuilder};
///
/// let mut query = QueryBuilder::new()
///     .create_keyspace("metrics")
///     .with_simple_strategy(3)?
///     .with_durable_writes(true);
///
/// assert_eq!(
///     query.cql()?,
///     "CREATE KEYSPACE \"metrics\" WITH REPLICATION = { 'class' : 'SimpleStrategy' , \
///      'replication_factor' : '3' } AND DURABLE_WRITES = true;"
/// );
/// # Ok::<(), cqlkit::Error>(())
/// ```
#[derive(Debug)]
pub struct KeyspaceBuilder {
    session: Session,
}

impl_cql_builder!(KeyspaceBuilder);

impl KeyspaceBuilder {
    pub(crate) fn start(mut session: Session, marker: Compiling) -> Self {
        let name = marker.name();
        session.resolve_component(marker.component());
        session.register_compiling(marker);
        session.checkpoint(name);
        Self { session }
    }

    /// Replicates with `SimpleStrategy` and the given replication factor.
    pub fn with_simple_strategy(self, replication_factor: impl Into<Value>) -> Result<Self> {
        let replication_factor = replication_factor.into();
        if replication_factor.is_null() {
            return Err(Error::InvalidArgument(
                "SimpleStrategy requires a replication factor".into(),
            ));
        }

        let mut params = Map::new();
        params.insert("replication_factor".into(), replication_factor);
        Ok(self.strategy(KeyspaceMethod::WithSimpleStrategy, params))
    }

    /// Replicates with `NetworkTopologyStrategy`, one entry per data center.
    pub fn with_network_topology_strategy<I, K, V>(self, data_centers: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let params = data_centers
            .into_iter()
            .map(|(name, factor)| (name.into(), factor.into()))
            .collect::<Map<_, _>>();
        if params.is_empty() {
            return Err(Error::InvalidArgument(
                "NetworkTopologyStrategy requires at least one data center".into(),
            ));
        }

        Ok(self.strategy(KeyspaceMethod::WithNetworkTopologyStrategy, params))
    }

    pub fn with_durable_writes(mut self, durable_writes: bool) -> Self {
        self.session
            .append(Statement::And(DurableWrites(durable_writes)));
        self.checkpoint(KeyspaceMethod::WithDurableWrites.name())
    }

    fn strategy(mut self, method: KeyspaceMethod, params: Map<String, Value>) -> Self {
        let mut replication = Map::new();
        replication.insert("class".into(), Value::String(method.name().to_string()));
        replication.extend(params);

        self.session.append(Statement::Strategy(Replication {
            method,
            params: replication,
        }));
        self.checkpoint(method.name())
    }

    fn checkpoint(mut self, method: &'static str) -> Self {
        self.session.checkpoint(method);
        self
    }
}
