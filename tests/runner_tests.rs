//! End-to-end runs of the test orchestrator against a spy API client.

mod common;

use baf::{
    FuzzerSetting, HttpMethod, MapEnvironment, ResultKind, Results, RunConfig, TestOutcome,
    TestRunner,
};
use baf_core::fuzz::{MutatorRegistry, PayloadMutator};
use baf_core::planned_dispatch_count;
use common::fixtures::SERVER_VAR;
use common::{post_test, Fixture, SpyClient};
use rand::RngCore;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/";
const ITEMS_URL: &str = "http://localhost:8080/api/items";

fn environment() -> MapEnvironment {
    MapEnvironment::new().with(SERVER_VAR, BASE_URL)
}

fn settings() -> Vec<FuzzerSetting> {
    vec![FuzzerSetting::default()]
}

fn live() -> RunConfig {
    RunConfig::default()
}

fn dry() -> RunConfig {
    RunConfig {
        dry_run: true,
        access_token: None,
    }
}

#[test]
fn test_baseline_dry_run_makes_no_calls() {
    let fx = Fixture::new();
    let test = post_test("baseline", fx.payload("p.json", &json!({"a": 1})));
    let client = SpyClient::answering(200);
    let env = environment();
    let settings = settings();
    let config = dry();

    let mut results = Results::new();
    let outcome = TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .with_seed(1)
        .run_test(&test, &mut results);

    assert_eq!(outcome, TestOutcome::Completed { dispatched: 1 });
    assert_eq!(client.call_count(), 0);
    assert_eq!(results.len(), 1);
    let result = &results.as_slice()[0];
    assert_eq!(result.kind, ResultKind::DryRun);
    assert_eq!(result.url.as_deref(), Some(ITEMS_URL));
    assert_eq!(result.payload, Some(json!({"a": 1})));
}

#[test]
fn test_unresolved_server_is_configuration_error() {
    let fx = Fixture::new();
    let test = post_test("no server", fx.payload("p.json", &json!({"a": 1})));
    let client = SpyClient::answering(200);
    let env = MapEnvironment::new();
    let settings = settings();
    let config = live();

    let mut results = Results::new();
    let outcome = TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .run_test(&test, &mut results);

    assert!(matches!(outcome, TestOutcome::ConfigurationError(_)));
    assert_eq!(client.call_count(), 0);
    assert_eq!(results.len(), 1);
    let result = &results.as_slice()[0];
    assert_eq!(result.kind, ResultKind::ConfigurationError);
    assert_eq!(result.cause.as_deref(), Some("URL construction"));
    assert_eq!(result.data.as_deref(), Some(SERVER_VAR));
    assert_eq!(result.url, None);
}

#[test]
fn test_removal_dispatches_every_non_empty_subset() {
    let fx = Fixture::new();
    let mut test = post_test("remove", fx.payload("p.json", &json!({"a": 1, "b": 2})));
    test.remove_items = true;
    let client = SpyClient::answering(200);
    let env = environment();
    let settings = settings();
    let config = live();

    let mut results = Results::new();
    let outcome = TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .with_seed(7)
        .run_test(&test, &mut results);

    assert_eq!(outcome, TestOutcome::Completed { dispatched: 3 });
    // No baseline: the unmodified payload is never sent.
    assert_eq!(
        client.payloads(),
        vec![json!({}), json!({"b": 2}), json!({"a": 1})]
    );
    assert_eq!(results.count(ResultKind::Success), 3);
    assert!(client.calls().iter().all(|c| c.url == ITEMS_URL));
}

#[test]
fn test_addition_dispatches_nine_non_colliding_variants() {
    let fx = Fixture::new();
    let mut test = post_test("add", fx.payload("p.json", &json!({"a": 1})));
    test.add_items = true;
    let client = SpyClient::answering(200);
    let env = environment();
    let settings = settings();
    let config = live();

    let mut results = Results::new();
    TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .with_seed(11)
        .run_test(&test, &mut results);

    let payloads = client.payloads();
    assert_eq!(payloads.len(), 9);
    let sizes: Vec<usize> = payloads
        .iter()
        .map(|p| p.as_object().unwrap().len())
        .collect();
    assert_eq!(sizes, vec![2, 2, 2, 3, 3, 3, 4, 4, 4]);
    for payload in &payloads {
        assert_eq!(payload["a"], json!(1));
    }
    assert_eq!(results.len(), 9);
}

#[test]
fn test_change_keeps_key_set() {
    let fx = Fixture::new();
    let original = json!({"a": 1, "b": "two", "c": [3]});
    let mut test = post_test("change", fx.payload("p.json", &original));
    test.change_types = true;
    let client = SpyClient::answering(200);
    let env = environment();
    let settings = settings();
    let config = live();

    let mut results = Results::new();
    TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .with_seed(5)
        .run_test(&test, &mut results);

    let payloads = client.payloads();
    assert_eq!(payloads.len(), 12);
    let original_keys: Vec<&String> = original.as_object().unwrap().keys().collect();
    for payload in &payloads {
        let keys: Vec<&String> = payload.as_object().unwrap().keys().collect();
        assert_eq!(keys, original_keys);
    }
}

#[test]
fn test_all_flags_follow_strategy_order_and_planned_count() {
    let fx = Fixture::new();
    let mut test = post_test("all", fx.payload("p.json", &json!({"a": 1, "b": 2, "c": 3})));
    test.remove_items = true;
    test.add_items = true;
    test.change_types = true;
    test.mutate_payload = true;
    let client = SpyClient::answering(200);
    let env = environment();
    let settings = settings();
    let config = dry();

    let mut results = Results::new();
    let outcome = TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .with_seed(3)
        .run_test(&test, &mut results);

    // 7 removals + 9 additions + 12 changes, nothing from the empty registry.
    assert_eq!(planned_dispatch_count(&test, 3), 28);
    assert_eq!(outcome, TestOutcome::Completed { dispatched: 28 });
    assert_eq!(results.count(ResultKind::DryRun), 28);
    assert_eq!(client.call_count(), 0);

    let sizes: Vec<usize> = results
        .iter()
        .map(|r| r.payload.as_ref().unwrap().as_object().unwrap().len())
        .collect();
    // Removal variants are all smaller than the original, additions larger.
    assert!(sizes[..7].iter().all(|&n| n < 3));
    assert!(sizes[7..16].iter().all(|&n| n > 3));
    assert!(sizes[16..].iter().all(|&n| n == 3));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let fx = Fixture::new();
    let mut test = post_test("seeded", fx.payload("p.json", &json!({"a": 1, "b": {"c": 2}})));
    test.add_items = true;
    test.change_types = true;
    let env = environment();
    let settings = settings();
    let config = live();

    let run = |seed: u64| {
        let client = SpyClient::answering(200);
        let mut results = Results::new();
        TestRunner::new(&config, &client, &env, &settings)
            .with_payload_root(fx.path())
            .with_seed(seed)
            .run_test(&test, &mut results);
        client.payloads()
    };

    assert_eq!(run(42), run(42));
}

#[test]
fn test_configuration_error_does_not_stop_run() {
    let fx = Fixture::new();
    let payload = fx.payload("p.json", &json!({"a": 1}));

    let mut missing_setting = post_test("missing setting", payload.clone());
    missing_setting.fuzzer_setting = Some("nope".into());
    let mut no_setting = post_test("no setting", payload.clone());
    no_setting.fuzzer_setting = None;
    let bad_payload = post_test("bad payload", "does-not-exist.json".into());
    let good = post_test("good", payload);

    let client = SpyClient::answering(200);
    let env = environment();
    let settings = settings();
    let config = live();

    let mut results = Results::new();
    let outcomes = TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .run_all(
            &[missing_setting, no_setting, bad_payload, good],
            &mut results,
        );

    assert_eq!(outcomes.len(), 4);
    assert_eq!(outcomes[3], TestOutcome::Completed { dispatched: 1 });
    let causes: Vec<Option<&str>> = results.iter().map(|r| r.cause.as_deref()).collect();
    assert_eq!(
        causes,
        vec![
            Some("missing fuzzer setting"),
            Some("missing fuzzer setting"),
            Some("payload load failure"),
            None,
        ]
    );
    assert_eq!(results.as_slice()[0].data.as_deref(), Some("nope"));
    assert_eq!(results.as_slice()[0].url.as_deref(), Some(ITEMS_URL));
    assert_eq!(results.as_slice()[3].kind, ResultKind::Success);
    assert_eq!(client.call_count(), 1);
}

#[test]
fn test_non_object_root_rejected_for_key_strategies() {
    let fx = Fixture::new();
    let list = fx.payload("list.json", &json!([1, 2, 3]));
    let mut remove = post_test("remove list", list.clone());
    remove.remove_items = true;
    let mut mutate_only = post_test("mutate list", list);
    mutate_only.mutate_payload = true;

    let client = SpyClient::answering(200);
    let env = environment();
    let settings = settings();
    let config = live();

    let mut results = Results::new();
    let outcomes = TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .run_all(&[remove, mutate_only], &mut results);

    assert!(matches!(outcomes[0], TestOutcome::ConfigurationError(_)));
    assert_eq!(outcomes[1], TestOutcome::Completed { dispatched: 0 });
    assert_eq!(results.len(), 1);
    assert_eq!(
        results.as_slice()[0].cause.as_deref(),
        Some("payload root is not an object")
    );
    assert_eq!(client.call_count(), 0);
}

#[test]
fn test_live_classification_and_token() {
    let fx = Fixture::new();
    let mut test = post_test("classify", fx.payload("p.json", &json!({"a": 1})));
    test.expected_status = 201;
    let env = environment();
    let settings = settings();
    let config = RunConfig {
        dry_run: false,
        access_token: Some("secret".into()),
    };

    let created = SpyClient::answering(201);
    let rejected = SpyClient::answering(400);
    let down = SpyClient::unreachable();
    let mut results = Results::new();
    for client in [&created, &rejected, &down] {
        TestRunner::new(&config, client, &env, &settings)
            .with_payload_root(fx.path())
            .run_test(&test, &mut results);
    }

    let kinds: Vec<ResultKind> = results.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![ResultKind::Success, ResultKind::Failure, ResultKind::Failure]
    );
    assert_eq!(results.as_slice()[1].status_code, Some(400));
    assert_eq!(results.as_slice()[2].status_code, None);
    assert_eq!(results.as_slice()[2].cause.as_deref(), Some("connection refused"));
    assert_eq!(created.calls()[0].access_token.as_deref(), Some("secret"));
}

#[test]
fn test_non_post_methods_send_nothing_and_count_nothing() {
    let fx = Fixture::new();
    let payload = fx.payload("p.json", &json!({"a": 1, "b": 2}));
    let mut get = post_test("get", payload.clone());
    get.method = HttpMethod::Get;
    let mut trace = post_test("trace", payload.clone());
    trace.method = HttpMethod::Other("TRACE".into());
    trace.remove_items = true;
    let post = post_test("post", payload);

    let client = SpyClient::answering(200);
    let env = environment();
    let settings = settings();
    let config = live();

    let mut results = Results::new();
    let outcomes = TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .run_all(&[get, trace, post], &mut results);

    assert_eq!(
        outcomes,
        vec![
            TestOutcome::Completed { dispatched: 0 },
            TestOutcome::Completed { dispatched: 0 },
            TestOutcome::Completed { dispatched: 1 },
        ]
    );
    assert_eq!(client.call_count(), 1);
    assert_eq!(results.len(), 1);
    assert_eq!(results.as_slice()[0].test.label(), "post");
}

struct DropFirstKey;

impl PayloadMutator for DropFirstKey {
    fn name(&self) -> &str {
        "drop-first-key"
    }

    fn mutate(&self, original: &Value, _rng: &mut dyn RngCore) -> Vec<Value> {
        let mut copy = original.clone();
        if let Some(map) = copy.as_object_mut() {
            if let Some(first) = map.keys().next().cloned() {
                map.remove(&first);
            }
        }
        vec![copy]
    }
}

#[test]
fn test_registered_mutator_is_dispatched() {
    let fx = Fixture::new();
    let mut test = post_test("mutate", fx.payload("p.json", &json!({"a": 1, "b": 2})));
    test.mutate_payload = true;
    let client = SpyClient::answering(200);
    let env = environment();
    let settings = settings();
    let config = live();

    let mut registry = MutatorRegistry::new();
    registry.register(Box::new(DropFirstKey));

    let mut results = Results::new();
    let outcome = TestRunner::new(&config, &client, &env, &settings)
        .with_payload_root(fx.path())
        .with_mutators(registry)
        .run_test(&test, &mut results);

    assert_eq!(outcome, TestOutcome::Completed { dispatched: 1 });
    assert_eq!(client.payloads(), vec![json!({"b": 2})]);
}
