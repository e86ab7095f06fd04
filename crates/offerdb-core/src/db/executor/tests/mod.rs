
use crate::{
    config::OfferConfig,
    db::{
        OfferExecutor, OfferStream,
        memory::{MemoryAssetIndex, MemoryPolicyStore},
        query::{AssetQuery, Criterion, OfferQuery, Range},
        spi::{
            AssetCatalog, AssetStream, DefinitionSource, DefinitionStream,
            ParticipantAgentService, PolicyRegistry,
        },
    },
    error::InternalError,
    model::{
        Asset, ClaimToken, ContractDefinition, ContractOffer, ParticipantAgent, Policy,
        PolicyDefinition,
    },
};
use std::cell::{Cell, RefCell};

/// Property every harness asset carries, naming the definition selecting it.
const GROUP: &str = "group";

///
/// FailPoint
///
/// Where the harness injects a collaborator failure.
///

#[derive(Clone, Debug, Eq, PartialEq)]
enum FailPoint {
    Agent,
    OpenDefinitions,
    // fail when pulling the n-th definition (0-based)
    PullDefinition(usize),
    Count(&'static str),
    Query(&'static str),
    Policy(&'static str),
    // fail when pulling the n-th asset of a definition's query
    PullAsset(&'static str, usize),
}

///
/// Calls
///
/// Invocation log for every collaborator entry point.
///

#[derive(Debug, Default)]
struct Calls {
    agents: Cell<u32>,
    definition_streams_opened: Cell<u32>,
    definition_streams_released: Cell<u32>,
    definitions_pulled: Cell<u32>,
    counts: RefCell<Vec<Vec<Criterion>>>,
    queries: RefCell<Vec<AssetQuery>>,
    asset_streams_released: Cell<u32>,
    assets_pulled: Cell<u32>,
    policy_lookups: RefCell<Vec<String>>,
}

impl Calls {
    fn collaborator_calls(&self) -> usize {
        self.agents.get() as usize
            + self.definition_streams_opened.get() as usize
            + self.definitions_pulled.get() as usize
            + self.counts.borrow().len()
            + self.queries.borrow().len()
            + self.assets_pulled.get() as usize
            + self.policy_lookups.borrow().len()
    }
}

fn bump(cell: &Cell<u32>) {
    cell.set(cell.get() + 1);
}

///
/// Released
///
/// Iterator wrapper that counts pulls and records its own release on drop.
///

struct Released<'a, I> {
    inner: I,
    pulled: &'a Cell<u32>,
    released: &'a Cell<u32>,
}

impl<I: Iterator> Iterator for Released<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        bump(self.pulled);
        self.inner.next()
    }
}

impl<I> Drop for Released<'_, I> {
    fn drop(&mut self) {
        bump(self.released);
    }
}

///
/// Harness
///
/// One object playing every collaborator, backed by the in-memory stores and
/// recording each call so laziness can be asserted.
///

#[derive(Default)]
struct Harness {
    definitions: Vec<ContractDefinition>,
    catalog: MemoryAssetIndex,
    policies: MemoryPolicyStore,
    fail: Option<FailPoint>,
    config: OfferConfig,
    calls: Calls,
}

impl Harness {
    fn new() -> Self {
        Self::default()
    }

    /// Add a definition selecting `asset_count` fresh assets named
    /// `{id}-{n}`, under contract policy `policy_id`.
    fn definition(mut self, id: &str, policy_id: &str, asset_count: usize) -> Self {
        for n in 0..asset_count {
            self.catalog
                .insert(Asset::bare(format!("{id}-{n}")).with_property(GROUP, id));
        }
        self.definitions.push(ContractDefinition::new(
            id,
            policy_id,
            vec![Criterion::equals(GROUP, id)],
        ));

        self
    }

    fn policy(mut self, id: &str) -> Self {
        self.policies.insert(PolicyDefinition::new(
            id,
            Policy {
                uid: Some(id.to_string()),
                ..Policy::default()
            },
        ));

        self
    }

    fn failing(mut self, fail: FailPoint) -> Self {
        self.fail = Some(fail);
        self
    }

    fn config(mut self, config: OfferConfig) -> Self {
        self.config = config;
        self
    }

    fn executor(&self) -> OfferExecutor<'_> {
        OfferExecutor::new(self, self, self, self).with_config(self.config.clone())
    }

    fn stream(&self, from: u64, to: u64) -> OfferStream<'_> {
        self.stream_with(OfferQuery::default(), from, to)
    }

    fn stream_with(&self, query: OfferQuery, from: u64, to: u64) -> OfferStream<'_> {
        let range = Range::new(from, to).expect("test range should be valid");

        self.executor()
            .query_offers(query, range)
            .expect("test query should open")
    }

    /// Drain `[from, to)` and return the offers, failing on any error.
    fn offers(&self, from: u64, to: u64) -> Vec<ContractOffer> {
        self.stream(from, to)
            .collect::<Result<Vec<_>, _>>()
            .expect("offer stream should drain without errors")
    }

    fn fails_at(&self, point: &FailPoint) -> bool {
        self.fail.as_ref() == Some(point)
    }

    // Definition owning a filter, read from its leading group criterion.
    fn group_of(filter: &[Criterion]) -> &str {
        filter
            .first()
            .and_then(|criterion| criterion.operand_right.as_text())
            .unwrap_or_default()
    }
}

impl ParticipantAgentService for Harness {
    fn create_for(&self, token: &ClaimToken) -> Result<ParticipantAgent, InternalError> {
        bump(&self.calls.agents);
        if self.fails_at(&FailPoint::Agent) {
            return Err(InternalError::agent_unavailable("identity provider offline"));
        }

        Ok(ParticipantAgent::new(
            token.claims.clone(),
            std::collections::BTreeMap::new(),
        ))
    }
}

impl DefinitionSource for Harness {
    fn definitions_for<'a>(
        &'a self,
        _agent: &ParticipantAgent,
    ) -> Result<DefinitionStream<'a>, InternalError> {
        bump(&self.calls.definition_streams_opened);
        if self.fails_at(&FailPoint::OpenDefinitions) {
            return Err(InternalError::definition_unavailable(
                "definition store offline",
            ));
        }

        let fail_at = match self.fail {
            Some(FailPoint::PullDefinition(n)) => Some(n),
            _ => None,
        };
        let definitions = self
            .definitions
            .iter()
            .cloned()
            .enumerate()
            .map(move |(n, definition)| {
                if fail_at == Some(n) {
                    return Err(InternalError::definition_unavailable(format!(
                        "definition {n} unreadable"
                    )));
                }

                Ok(definition)
            });

        Ok(Box::new(Released {
            inner: definitions,
            pulled: &self.calls.definitions_pulled,
            released: &self.calls.definition_streams_released,
        }))
    }
}

impl AssetCatalog for Harness {
    fn count(&self, filter: &[Criterion]) -> Result<u64, InternalError> {
        self.calls.counts.borrow_mut().push(filter.to_vec());
        let group = Self::group_of(filter);
        if matches!(self.fail, Some(FailPoint::Count(id)) if id == group) {
            return Err(InternalError::catalog_unavailable(format!(
                "count failed for {group}"
            )));
        }

        self.catalog.count(filter)
    }

    fn query<'a>(&'a self, query: &AssetQuery) -> Result<AssetStream<'a>, InternalError> {
        self.calls.queries.borrow_mut().push(query.clone());
        let group = Self::group_of(&query.filter).to_string();
        if matches!(self.fail, Some(FailPoint::Query(id)) if id == group) {
            return Err(InternalError::catalog_unavailable(format!(
                "query failed for {group}"
            )));
        }

        let fail_at = match self.fail {
            Some(FailPoint::PullAsset(id, n)) if id == group => Some(n),
            _ => None,
        };
        let assets = self
            .catalog
            .query(query)?
            .enumerate()
            .map(move |(n, asset)| {
                if fail_at == Some(n) {
                    return Err(InternalError::catalog_unavailable(format!(
                        "asset {n} of {group} unreadable"
                    )));
                }

                asset
            });

        Ok(Box::new(Released {
            inner: assets,
            pulled: &self.calls.assets_pulled,
            released: &self.calls.asset_streams_released,
        }))
    }
}

impl PolicyRegistry for Harness {
    fn find_by_id(&self, policy_id: &str) -> Result<Option<PolicyDefinition>, InternalError> {
        self.calls.policy_lookups.borrow_mut().push(policy_id.to_string());
        if matches!(self.fail, Some(FailPoint::Policy(id)) if id == policy_id) {
            return Err(InternalError::policy_unavailable(format!(
                "policy store failed for {policy_id}"
            )));
        }

        self.policies.find_by_id(policy_id)
    }
}

fn asset_ids(offers: &[ContractOffer]) -> Vec<&str> {
    offers.iter().map(|offer| offer.asset.id.as_str()).collect()
}
