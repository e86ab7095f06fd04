//! Module: executor::offer
//! Responsibility: lazy, range-paginated offer production across definitions.
//! Does not own: definition visibility, asset matching, or policy semantics;
//! those stay behind the `spi` collaborators.

use crate::{
    config::OfferConfig,
    db::{
        executor::window::{LocalWindow, compute_local_window, signed},
        query::{AssetQuery, Criterion, OfferQuery, QueryError, Range},
        spi::{
            AssetCatalog, AssetStream, DefinitionSource, DefinitionStream, ParticipantAgentService,
            PolicyRegistry,
        },
    },
    error::InternalError,
    model::{ContractDefinition, ContractOffer, Policy},
    obs::sink::{self, MetricsEvent},
    types::OfferId,
};
use std::{fmt, iter::FusedIterator};
use tracing::{debug, trace};

///
/// Collaborators
///
/// Borrowed collaborator set shared by an executor and every stream it opens.
///

#[derive(Clone, Copy)]
struct Collaborators<'a> {
    agents: &'a dyn ParticipantAgentService,
    definitions: &'a dyn DefinitionSource,
    catalog: &'a dyn AssetCatalog,
    policies: &'a dyn PolicyRegistry,
}

///
/// OfferExecutor
///
/// Entry point for offer queries. Holds no per-call state; each
/// `query_offers` call opens an independent `OfferStream`.
///

pub struct OfferExecutor<'a> {
    sources: Collaborators<'a>,
    config: OfferConfig,
}

impl<'a> OfferExecutor<'a> {
    #[must_use]
    pub fn new(
        agents: &'a dyn ParticipantAgentService,
        definitions: &'a dyn DefinitionSource,
        catalog: &'a dyn AssetCatalog,
        policies: &'a dyn PolicyRegistry,
    ) -> Self {
        Self {
            sources: Collaborators {
                agents,
                definitions,
                catalog,
                policies,
            },
            config: OfferConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: OfferConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &OfferConfig {
        &self.config
    }

    /// Open a lazy offer stream over `range`.
    ///
    /// Only the range is checked here; no collaborator is invoked until the
    /// returned stream is advanced.
    pub fn query_offers(
        &self,
        query: OfferQuery,
        range: Range,
    ) -> Result<OfferStream<'a>, QueryError> {
        range.check_limit(self.config.max_limit)?;

        Ok(OfferStream::new(self.sources, query, range, self.config.metrics))
    }
}

///
/// StreamPhase
///

enum StreamPhase<'a> {
    // agent and definition stream not resolved yet
    Pending,
    Definitions(DefinitionStream<'a>),
    Finished,
}

///
/// DefinitionOffers
///
/// Offers still to be minted for the definition currently being drained.
///

struct DefinitionOffers<'a> {
    definition_id: String,
    policy: Policy,
    assets: AssetStream<'a>,
    remaining: u64,
}

impl DefinitionOffers<'_> {
    // Mint the next offer, never pulling past the local window limit.
    fn next_offer(&mut self) -> Result<Option<ContractOffer>, InternalError> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let Some(asset) = self.assets.next().transpose()? else {
            return Ok(None);
        };
        self.remaining -= 1;

        let id = OfferId::generate(&self.definition_id)?;

        Ok(Some(ContractOffer::mint(id, &self.policy, asset)))
    }
}

///
/// OfferStream
///
/// Pull-based offer sequence for one call. Definitions are pulled one at a
/// time and only while the global window is still open; dropping the stream
/// drops any open definition and asset iterators with it.
///
/// Not restartable: once it has returned `None` or an error it stays
/// finished and never calls a collaborator again.
///

pub struct OfferStream<'a> {
    sources: Collaborators<'a>,
    query: OfferQuery,
    range: Range,
    metrics: bool,
    started: bool,
    phase: StreamPhase<'a>,
    current: Option<DefinitionOffers<'a>>,

    // running counters, local to this call
    seen: u64,
    remaining_skip: i64,
    emitted: u64,
}

impl<'a> OfferStream<'a> {
    fn new(sources: Collaborators<'a>, query: OfferQuery, range: Range, metrics: bool) -> Self {
        Self {
            sources,
            query,
            range,
            metrics,
            started: false,
            phase: StreamPhase::Pending,
            current: None,
            seen: 0,
            remaining_skip: signed(range.from()),
            emitted: 0,
        }
    }

    #[must_use]
    pub const fn range(&self) -> Range {
        self.range
    }

    /// Assets counted across every definition processed so far.
    #[must_use]
    pub const fn seen(&self) -> u64 {
        self.seen
    }

    /// Global skip still to apply; negative once the window start is behind us.
    #[must_use]
    pub const fn remaining_skip(&self) -> i64 {
        self.remaining_skip
    }

    /// Offers yielded so far.
    #[must_use]
    pub const fn emitted(&self) -> u64 {
        self.emitted
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.phase, StreamPhase::Finished)
    }

    // Advance until one offer is available or the window is exhausted.
    fn next_offer(&mut self) -> Result<Option<ContractOffer>, InternalError> {
        loop {
            if self.emitted >= self.range.limit() {
                return Ok(None);
            }

            if let Some(current) = self.current.as_mut() {
                if let Some(offer) = current.next_offer()? {
                    self.emitted += 1;
                    self.record(MetricsEvent::OfferEmitted);

                    return Ok(Some(offer));
                }
                self.current = None;
            }

            // checked before pulling so the source is never over-consumed
            if self.seen >= self.range.to() {
                return Ok(None);
            }

            let Some(definition) = self.next_definition()? else {
                return Ok(None);
            };
            self.current = self.open_definition(definition)?;
        }
    }

    fn next_definition(&mut self) -> Result<Option<ContractDefinition>, InternalError> {
        if matches!(self.phase, StreamPhase::Pending) {
            let agent = self.sources.agents.create_for(&self.query.claim_token)?;
            let definitions = self.sources.definitions.definitions_for(&agent)?;
            self.phase = StreamPhase::Definitions(definitions);
        }

        match &mut self.phase {
            StreamPhase::Definitions(definitions) => definitions.next().transpose(),
            StreamPhase::Pending | StreamPhase::Finished => Ok(None),
        }
    }

    // Count, window, resolve, and open one definition's assets. Counters
    // advance by the full count whether or not the definition contributes.
    fn open_definition(
        &mut self,
        definition: ContractDefinition,
    ) -> Result<Option<DefinitionOffers<'a>>, InternalError> {
        let filter = self.query.filter_for(&definition);
        let count = self.sources.catalog.count(&filter)?;
        let window = compute_local_window(count, self.seen, self.remaining_skip, self.range);

        trace!(
            definition = %definition.id,
            count,
            seen = self.seen,
            remaining_skip = self.remaining_skip,
            ?window,
            "definition window"
        );
        self.record(MetricsEvent::DefinitionPulled {
            count,
            skipped: window.is_none(),
        });

        let offers = match window {
            Some(window) => self.resolve_offers(definition, filter, count, window)?,
            None => None,
        };

        self.seen = self.seen.saturating_add(count);
        self.remaining_skip = self.remaining_skip.saturating_sub(signed(count));

        Ok(offers)
    }

    fn resolve_offers(
        &self,
        definition: ContractDefinition,
        filter: Vec<Criterion>,
        count: u64,
        window: LocalWindow,
    ) -> Result<Option<DefinitionOffers<'a>>, InternalError> {
        let Some(policy) = self
            .sources
            .policies
            .find_by_id(&definition.contract_policy_id)?
        else {
            debug!(
                definition = %definition.id,
                policy = %definition.contract_policy_id,
                count,
                "contract policy not found; definition contributes no offers"
            );
            self.record(MetricsEvent::PolicyUnresolved { count });

            return Ok(None);
        };

        let query = AssetQuery::new(filter)
            .offset(window.offset)
            .limit(Some(window.limit));
        let assets = self.sources.catalog.query(&query)?;

        Ok(Some(DefinitionOffers {
            definition_id: definition.id,
            policy: policy.policy,
            assets,
            remaining: window.limit,
        }))
    }

    fn finish(&mut self) {
        self.phase = StreamPhase::Finished;
        self.current = None;
        self.record(MetricsEvent::QueryFinish {
            offers: self.emitted,
        });
    }

    fn fail(&mut self, err: &InternalError) {
        self.phase = StreamPhase::Finished;
        self.current = None;
        debug!(
            origin = %err.origin,
            class = %err.class,
            emitted = self.emitted,
            error = %err,
            "offer stream aborted"
        );
        self.record(MetricsEvent::QueryFailed { origin: err.origin });
    }

    fn record(&self, event: MetricsEvent) {
        if self.metrics {
            sink::record(event);
        }
    }
}

impl Iterator for OfferStream<'_> {
    type Item = Result<ContractOffer, InternalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_finished() {
            return None;
        }
        if !self.started {
            self.started = true;
            self.record(MetricsEvent::QueryStart);
        }

        match self.next_offer() {
            Ok(Some(offer)) => Some(Ok(offer)),
            Ok(None) => {
                self.finish();
                None
            }
            Err(err) => {
                self.fail(&err);
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.is_finished() {
            return (0, Some(0));
        }
        let left = self.range.limit().saturating_sub(self.emitted);

        (0, usize::try_from(left).ok())
    }
}

impl FusedIterator for OfferStream<'_> {}

impl fmt::Debug for OfferStream<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OfferStream")
            .field("range", &self.range)
            .field("seen", &self.seen)
            .field("remaining_skip", &self.remaining_skip)
            .field("emitted", &self.emitted)
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}
