use offerdb::{
    core::{
        db::spi::DefinitionSource,
        error::InternalError,
        model::{CONSUMER_PLACEHOLDER, ParticipantAgent},
    },
    error::{ErrorKind, ErrorOrigin, QueryErrorKind},
    prelude::*,
};

const CATALOG: &str = r#"{
    "assets": [
        {"id": "report-2023", "properties": {"type": "pdf", "year": 2023}},
        {"id": "report-2024", "properties": {"type": "pdf", "year": 2024}},
        {"id": "sales-q1", "properties": {"type": "csv", "region": "eu"}},
        {"id": "sales-q2", "properties": {"type": "csv", "region": "us"}},
        {"id": "sales-q3", "properties": {"type": "csv", "region": "eu"}},
        {"id": "draft", "properties": {"type": "pdf", "year": null}}
    ],
    "definitions": [
        {
            "id": "reports",
            "contract_policy_id": "research-only",
            "selector_criteria": [
                {"operand_left": "type", "operator": "=", "operand_right": "pdf"},
                {"operand_left": "year", "operator": "in", "operand_right": [2023, 2024]}
            ]
        },
        {
            "id": "orphaned",
            "contract_policy_id": "retired",
            "selector_criteria": [
                {"operand_left": "id", "operator": "=", "operand_right": "draft"}
            ]
        },
        {
            "id": "sales",
            "access_policy_id": "partners",
            "contract_policy_id": "commercial",
            "selector_criteria": [
                {"operand_left": "id", "operator": "like", "operand_right": "sales-%"}
            ]
        }
    ],
    "policies": [
        {"id": "research-only", "policy": {"uid": "research-only", "assigner": "did:web:provider"}},
        {"id": "commercial", "policy": {"uid": "commercial"}}
    ]
}"#;

#[derive(serde::Deserialize)]
struct Fixture {
    assets: Vec<Asset>,
    definitions: Vec<ContractDefinition>,
    policies: Vec<PolicyDefinition>,
}

struct Connector {
    agents: ClaimTokenAgentService,
    definitions: MemoryDefinitionStore,
    catalog: MemoryAssetIndex,
    policies: MemoryPolicyStore,
    config: OfferConfig,
}

impl Connector {
    fn load(config: OfferConfig) -> Self {
        let fixture: Fixture = serde_json::from_str(CATALOG).expect("fixture should decode");

        Self {
            agents: ClaimTokenAgentService::from_config(&config),
            definitions: MemoryDefinitionStore::with_definitions(fixture.definitions),
            catalog: MemoryAssetIndex::with_assets(fixture.assets),
            policies: MemoryPolicyStore::with_policies(fixture.policies),
            config,
        }
    }

    fn executor(&self) -> OfferExecutor<'_> {
        OfferExecutor::new(&self.agents, &self.definitions, &self.catalog, &self.policies)
            .with_config(self.config.clone())
    }
}

fn ids(offers: &[ContractOffer]) -> Vec<&str> {
    offers.iter().map(|offer| offer.asset.id.as_str()).collect()
}

#[test]
fn full_page_lists_every_offer_with_a_resolved_policy() {
    let connector = Connector::load(OfferConfig::default());

    let offers = fetch_page(&connector.executor(), OfferQuery::default(), 0, 100)
        .expect("page should load");

    // the orphaned definition's policy is gone, so its asset is silently left out
    assert_eq!(
        ids(&offers),
        vec!["report-2023", "report-2024", "sales-q1", "sales-q2", "sales-q3"]
    );
    assert_eq!(offers[0].policy.assigner.as_deref(), Some("did:web:provider"));
    assert_eq!(offers[0].policy.target.as_deref(), Some("report-2023"));
    assert_eq!(offers[4].id.definition_id(), "sales");
    assert!(offers.iter().all(|offer| offer.consumer == CONSUMER_PLACEHOLDER));
}

#[test]
fn consecutive_pages_walk_the_global_order() {
    let mut connector = Connector::load(OfferConfig::default());
    connector
        .policies
        .insert(PolicyDefinition::new("retired", Policy::default()));
    let executor = connector.executor();

    let first = fetch_page(&executor, OfferQuery::default(), 0, 2).expect("page should load");
    let second = fetch_page(&executor, OfferQuery::default(), 2, 4).expect("page should load");
    let third = fetch_page(&executor, OfferQuery::default(), 4, 6).expect("page should load");

    assert_eq!(ids(&first), vec!["report-2023", "report-2024"]);
    assert_eq!(ids(&second), vec!["draft", "sales-q1"]);
    assert_eq!(ids(&third), vec!["sales-q2", "sales-q3"]);
}

#[test]
fn unresolved_policy_keeps_its_positions_empty() {
    let connector = Connector::load(OfferConfig::default());

    // position 2 is the orphaned draft
    let page = fetch_page(&connector.executor(), OfferQuery::default(), 2, 3)
        .expect("page should load");

    assert!(page.is_empty());
}

#[test]
fn query_criteria_narrow_every_definition() {
    let connector = Connector::load(OfferConfig::default());
    let query = OfferQuery::new(
        ClaimToken::default(),
        vec![Criterion::new("region", CriterionOp::Ne, Value::from("us"))],
    );

    let offers = fetch_page(&connector.executor(), query, 0, 10).expect("page should load");

    // reports carry no region, so `!=` keeps them
    assert_eq!(
        ids(&offers),
        vec!["report-2023", "report-2024", "sales-q1", "sales-q3"]
    );
}

#[test]
fn config_file_limits_window_width() {
    let config = OfferConfig::from_toml_str("max_limit = 3\nmetrics = false\n")
        .expect("config should parse");
    let connector = Connector::load(config);

    let err = fetch_page(&connector.executor(), OfferQuery::default(), 0, 4)
        .expect_err("wide window should be rejected");

    assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::LimitExceeded));
    assert_eq!(err.origin, ErrorOrigin::Query);
}

#[test]
fn negative_bounds_are_rejected() {
    let connector = Connector::load(OfferConfig::default());

    let err = fetch_page(&connector.executor(), OfferQuery::default(), -2, 3)
        .expect_err("negative bound should be rejected");

    assert_eq!(err.kind, ErrorKind::Query(QueryErrorKind::InvalidRange));
}

#[test]
fn collaborator_failure_becomes_public_error() {
    struct Offline;

    impl DefinitionSource for Offline {
        fn definitions_for<'a>(
            &'a self,
            _agent: &ParticipantAgent,
        ) -> Result<offerdb::core::db::spi::DefinitionStream<'a>, InternalError> {
            Err(InternalError::definition_unavailable("definition store offline"))
        }
    }

    let connector = Connector::load(OfferConfig::default());
    let executor = OfferExecutor::new(
        &connector.agents,
        &Offline,
        &connector.catalog,
        &connector.policies,
    );

    let err = fetch_page(&executor, OfferQuery::default(), 0, 5)
        .expect_err("offline source should fail the page");

    assert_eq!(err.kind, ErrorKind::Unavailable);
    assert_eq!(err.origin, ErrorOrigin::Definition);
    assert_eq!(err.to_string(), "definition store offline");
}

#[test]
fn stream_can_be_abandoned_after_first_offer() {
    let connector = Connector::load(OfferConfig::default());
    let range = Range::new(0, 100).expect("range should be valid");

    let mut stream = connector
        .executor()
        .query_offers(OfferQuery::default(), range)
        .expect("stream should open");
    let first = stream
        .next()
        .expect("catalog should not be empty")
        .expect("first offer should mint");

    assert_eq!(first.asset.id, "report-2023");
    assert_eq!(stream.emitted(), 1);
    assert!(!offerdb::VERSION.is_empty());
}
