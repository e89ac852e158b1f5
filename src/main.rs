//! baf - blind API fuzzer CLI.
//!
//! Runs every test in a tests file against its endpoint, mutating the original
//! JSON payload as each test's flags request, and reports whether the API
//! answered with the expected status code.
//!
//! ```text
//! baf --tests tests.yaml --fuzzer-settings settings.yaml [--dry-run] [--json]
//! ```
//!
//! Server addresses come from the environment variable each test names in its
//! `Server` field. The exit code is non-zero only when the input files cannot
//! be loaded; failing or misconfigured tests are reported, not fatal.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use baf::{
    format_results_json, format_summary, load_fuzzer_settings, load_tests, write_results_json,
    HttpApiClient, ProcessEnvironment, Results, RunConfig, TestRunner,
};
use baf_types::env_utils::{env_bool, env_string};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Test definitions (YAML for .yaml/.yml, JSON otherwise).
    #[arg(long, value_name = "FILE")]
    tests: PathBuf,

    /// Fuzzer settings referenced by the tests.
    #[arg(long, value_name = "FILE")]
    fuzzer_settings: PathBuf,

    /// Record what would be sent without calling the API (env: BAF_DRY_RUN).
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Bearer token for the API (env: BAF_ACCESS_TOKEN).
    #[arg(long, value_name = "TOKEN")]
    access_token: Option<String>,

    /// Seed for reproducible payload generation.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Print the results as JSON instead of a summary table.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also write the JSON results to this file.
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let suite = load_tests(&cli.tests)?;
    let fuzzer_settings = load_fuzzer_settings(&cli.fuzzer_settings)?;

    let config = RunConfig {
        dry_run: cli.dry_run || env_bool("BAF_DRY_RUN"),
        access_token: cli
            .access_token
            .clone()
            .or_else(|| env_string("BAF_ACCESS_TOKEN")),
    };

    let client = HttpApiClient::new();
    let environment = ProcessEnvironment;
    let mut runner = TestRunner::new(&config, &client, &environment, &fuzzer_settings)
        .with_payload_root(&suite.payload_root);
    if let Some(seed) = cli.seed {
        runner = runner.with_seed(seed);
    }

    let mut results = Results::new();
    runner.run_all(&suite.tests, &mut results);

    if cli.json {
        println!("{}", format_results_json(&results)?);
    } else {
        print!("{}", format_summary(&results));
    }
    if let Some(path) = &cli.output {
        write_results_json(&results, path)?;
        tracing::info!(path = %path.display(), "Wrote results");
    }

    Ok(())
}
