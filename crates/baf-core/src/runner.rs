//! Per-test control flow.
//!
//! A test moves through URL resolution, fuzzer-setting lookup and payload
//! loading; any failure there records one CONFIGURATION_ERROR and ends the
//! test before a request is made. A test with no mutation flags then sends its
//! original payload once (the baseline); otherwise every enabled strategy runs
//! in the order remove, add, change, mutate and each variant is dispatched.

use std::fs;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;
use tracing::{error, info, warn};

use baf_types::{find_fuzzer_setting, FuzzerSetting, Test};

use crate::client::ApiClient;
use crate::env::Environment;
use crate::error::ConfigurationError;
use crate::executor::{RunConfig, TestExecutor};
use crate::fuzz::addition::ADDITION_VARIANT_COUNT;
use crate::fuzz::change::change_variant_count;
use crate::fuzz::removal::removal_variant_count;
use crate::fuzz::{
    AdditionVariants, ChangeVariants, MutatorRegistry, RandomPayloadGenerator, RemovalVariants,
    Strategy, Variant,
};
use crate::results::{Results, TestResult};
use crate::url::construct_url;

/// Terminal state of one test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// All variants were handed to the executor. `dispatched` counts the ones
    /// that produced a result (sent, or recorded as a dry run).
    Completed { dispatched: usize },
    /// Stopped before any request.
    ConfigurationError(ConfigurationError),
}

/// Executor calls a test will make, given the key count of its payload.
///
/// One baseline call when no flag is set; otherwise
/// `(2ⁿ − 1)·remove + 9·add + 4n·change`. The mutate strategy contributes
/// nothing with the default (empty) mutator registry. Saturates at `u128::MAX`.
pub fn planned_dispatch_count(test: &Test, key_count: usize) -> u128 {
    if !test.any_mutation_enabled() {
        return 1;
    }
    let mut total: u128 = 0;
    if test.remove_items {
        total = total.saturating_add(removal_variant_count(key_count));
    }
    if test.add_items {
        total = total.saturating_add(ADDITION_VARIANT_COUNT as u128);
    }
    if test.change_types {
        total = total.saturating_add(change_variant_count(key_count) as u128);
    }
    total
}

/// Runs tests sequentially against one API client.
pub struct TestRunner<'a> {
    config: &'a RunConfig,
    client: &'a dyn ApiClient,
    environment: &'a dyn Environment,
    fuzzer_settings: &'a [FuzzerSetting],
    mutators: MutatorRegistry,
    payload_root: Option<PathBuf>,
    rng: StdRng,
}

impl<'a> TestRunner<'a> {
    /// Create a runner seeded from system entropy.
    pub fn new(
        config: &'a RunConfig,
        client: &'a dyn ApiClient,
        environment: &'a dyn Environment,
        fuzzer_settings: &'a [FuzzerSetting],
    ) -> Self {
        Self {
            config,
            client,
            environment,
            fuzzer_settings,
            mutators: MutatorRegistry::default(),
            payload_root: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Reseed the random source so generated variants are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Resolve relative payload paths against `root`.
    pub fn with_payload_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.payload_root = Some(root.into());
        self
    }

    pub fn with_mutators(mut self, mutators: MutatorRegistry) -> Self {
        self.mutators = mutators;
        self
    }

    /// Run every test in order. A configuration error in one test does not
    /// stop the following ones.
    pub fn run_all(&mut self, tests: &[Test], results: &mut Results) -> Vec<TestOutcome> {
        tests
            .iter()
            .enumerate()
            .map(|(index, test)| {
                info!(test = test.label(), "Test #{}", index + 1);
                self.run_test(test, results)
            })
            .collect()
    }

    /// Run one test.
    pub fn run_test(&mut self, test: &Test, results: &mut Results) -> TestOutcome {
        match self.try_run_test(test, results) {
            Ok(dispatched) => {
                info!(test = test.label(), dispatched, "Finished");
                TestOutcome::Completed { dispatched }
            }
            Err(e) => {
                error!(test = test.label(), cause = e.cause(), "Test configuration error: {}", e);
                let url = match &e {
                    ConfigurationError::UrlConstruction { .. } => None,
                    _ => construct_url(test, self.environment),
                };
                results.add_test_result(TestResult::configuration_error(
                    test,
                    url.as_deref(),
                    e.cause(),
                    e.data(),
                ));
                TestOutcome::ConfigurationError(e)
            }
        }
    }

    fn try_run_test(
        &mut self,
        test: &Test,
        results: &mut Results,
    ) -> Result<usize, ConfigurationError> {
        let url = construct_url(test, self.environment).ok_or_else(|| {
            ConfigurationError::UrlConstruction {
                server: test.server.clone(),
            }
        })?;

        info!("URL to test:                {}", url);
        info!("HTTP method:                {}", test.method);
        info!("Expected HTTP status:       {}", test.expected_status);
        info!("Add items operation:        {}", enabled_disabled(test.add_items));
        info!("Remove items operation:     {}", enabled_disabled(test.remove_items));
        info!("Change item type operation: {}", enabled_disabled(test.change_types));
        info!("Mutate payload operation:   {}", enabled_disabled(test.mutate_payload));
        info!("Original payload file:      {}", test.payload.display());
        info!(
            "Fuzzer setting name:        {}",
            test.fuzzer_setting.as_deref().unwrap_or("<none>")
        );

        let settings = self.fuzzer_settings;
        let setting = test
            .fuzzer_setting
            .as_deref()
            .and_then(|name| find_fuzzer_setting(settings, name))
            .ok_or_else(|| ConfigurationError::MissingFuzzerSetting {
                name: test.fuzzer_setting.clone(),
            })?;
        log_fuzzer_setting(setting);

        let payload_path = self.resolve_payload_path(&test.payload);
        let original = load_payload(&payload_path)?;

        if test.requires_object_payload() && !original.is_object() {
            return Err(ConfigurationError::PayloadNotObject {
                path: payload_path.display().to_string(),
            });
        }

        let key_count = original.as_object().map_or(0, |m| m.len());
        let planned = planned_dispatch_count(test, key_count);
        info!(planned = %planned, key_count, "Planned dispatches");
        if test.remove_items && key_count > 20 {
            warn!(
                key_count,
                "Removal strategy grows as 2^n; this test will issue {} requests",
                planned
            );
        }

        let executor = TestExecutor::new(self.client, self.config);
        let mut dispatched = 0usize;

        if !test.any_mutation_enabled() {
            info!("Run test with the original payload");
            if executor.perform_test(&url, test, &original, results).is_some() {
                dispatched += 1;
            }
        }

        let mut generator = RandomPayloadGenerator::new(setting.clone(), self.rng.gen());
        let mut dispatch = |variant: Variant, results: &mut Results| {
            info!(
                strategy = %variant.strategy,
                iteration = variant.iteration,
                "Iteration #{}", variant.iteration
            );
            if executor
                .perform_test(&url, test, &variant.payload, results)
                .is_some()
            {
                dispatched += 1;
            }
        };

        if let Some(object) = original.as_object() {
            if test.remove_items {
                info!(strategy = %Strategy::Remove, "Run tests with items removed from original payload");
                for variant in RemovalVariants::new(object) {
                    dispatch(variant, results);
                }
            }

            if test.add_items {
                info!(strategy = %Strategy::Add, "Run tests with items added into the original payload");
                for variant in AdditionVariants::new(object, &mut generator) {
                    dispatch(variant, results);
                }
            }

            if test.change_types {
                info!(strategy = %Strategy::Change, "Run tests with items changed from original payload");
                for variant in ChangeVariants::new(object, &mut generator, &mut self.rng) {
                    dispatch(variant, results);
                }
            }
        }

        if test.mutate_payload {
            info!(
                strategy = %Strategy::Mutate,
                mutators = self.mutators.len(),
                "Run tests with items mutated"
            );
            for variant in self.mutators.variants(&original, &mut self.rng) {
                dispatch(variant, results);
            }
        }

        Ok(dispatched)
    }

    fn resolve_payload_path(&self, path: &Path) -> PathBuf {
        match &self.payload_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Load and decode the original JSON payload.
pub fn load_payload(path: &Path) -> Result<Value, ConfigurationError> {
    let payload_error = |reason: String| ConfigurationError::PayloadLoad {
        path: path.display().to_string(),
        reason,
    };
    let raw = fs::read_to_string(path).map_err(|e| payload_error(e.to_string()))?;
    serde_json::from_str(&raw).map_err(|e| payload_error(e.to_string()))
}

fn enabled_disabled(flag: bool) -> &'static str {
    if flag {
        "enabled"
    } else {
        "disabled"
    }
}

fn log_fuzzer_setting(setting: &FuzzerSetting) {
    info!("Fuzzer setting: {}", setting.name);
    info!("  Iteration deep: {}", setting.iteration_deep);
    info!(
        "  List length in range from {} to {}",
        setting.list_min_length, setting.list_max_length
    );
    info!(
        "  Dict length in range from {} to {}",
        setting.dict_min_length, setting.dict_max_length
    );
    info!(
        "  Dict keys length in range from {} to {}",
        setting.dict_key_min_length, setting.dict_key_max_length
    );
    info!(
        "  Strings length in range from {} to {}",
        setting.string_min_length, setting.string_max_length
    );
    info!("  Dictionary characters:                  {}", setting.dict_characters);
    info!("  String characters:                      {}", setting.string_characters);
    info!("  Allow NaN in floats:                    {}", setting.allow_nan);
    info!("  Allow Inf in floats:                    {}", setting.allow_inf);
    info!("  Generate strings for SQL injection:     {}", setting.sql_injection);
    info!("  Generate strings for Gremlin injection: {}", setting.gremlin_injection);
}
