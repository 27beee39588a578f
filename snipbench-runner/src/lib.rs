#![warn(missing_docs)]
//! snipbench Runner
//!
//! Run coordination, configuration and the CLI harness for benchmark
//! binaries. Build a [`Suite`] and hand it to [`run()`] in your main
//! function to get the full snipbench CLI experience.
//!
//! # Example
//!
//! ```ignore
//! use snipbench_runner::Suite;
//!
//! fn main() -> anyhow::Result<()> {
//!     let suite = Suite::new("string building")
//!         .candidate("push_str", || { /* ... */ })
//!         .candidate("format!", || { /* ... */ });
//!     snipbench_runner::run(suite)
//! }
//! ```

mod config;
pub mod engine;
mod metadata;
mod planner;
mod report;
mod suite;

pub use config::{CONFIG_FILE_NAME, ConfigError, OutputConfig, RunnerConfig, SnipConfig};
pub use engine::{
    DEFAULT_AMOUNT, DEFAULT_INTER_TEST_DELAY, DiagnosticSink, RunBoard, RunCoordinator, RunId,
    RunOptions, RunOutcome, RunSink, RunSupersession, TracingDiagnostics,
};
pub use planner::{ExecutionPlan, build_plan};
pub use report::build_report;
pub use suite::Suite;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;
use snipbench_core::{TestProvider, silence_candidate_panics};
use snipbench_report::{OutputFormat, format_human_output, generate_json_report};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// snipbench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "snipbench")]
#[command(author, version, about = "snipbench - compare code snippets against the fastest one")]
pub struct Cli {
    /// Optional subcommand (List, Run); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter tests by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Samples collected per test
    #[arg(long, short = 'n')]
    pub amount: Option<u32>,

    /// Pause after every sample (e.g., "1ms")
    #[arg(long)]
    pub delay_between: Option<String>,

    /// Pause after every test (e.g., "50ms")
    #[arg(long, conflicts_with = "no_delay_after")]
    pub delay_after: Option<String>,

    /// Disable the pause after every test
    #[arg(long)]
    pub no_delay_after: bool,

    /// Output format: json, human
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (discovered from the current directory if not specified)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Internal: Absorb cargo bench's --bench flag
    #[arg(long, hide = true)]
    pub bench: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the suite's tests
    List,
    /// Run the suite (default)
    Run,
}

/// Run the snipbench CLI over `suite` with the process arguments.
/// This is the main entry point for benchmark binaries.
pub fn run(suite: Suite) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(suite, cli)
}

/// Run the snipbench CLI over `suite` with pre-parsed arguments.
pub fn run_with_cli(suite: Suite, cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    let config = load_config(&cli)?;
    let options = config
        .runner
        .to_run_options()
        .context("invalid runner configuration")?;

    let format: OutputFormat = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format)
        .parse()
        .map_err(anyhow::Error::msg)?;

    let filter = Regex::new(&cli.filter)
        .with_context(|| format!("invalid filter pattern '{}'", cli.filter))?;
    let plan = build_plan(suite.slots(), Some(&filter));

    match cli.command {
        Some(Commands::List) => list_tests(&suite, &plan),
        Some(Commands::Run) | None => run_suite(&suite, &plan, &options, format, &cli),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "snipbench=debug"
    } else {
        "snipbench=info"
    };
    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Layer configuration: snipbench.toml defaults, then CLI overrides.
fn load_config(cli: &Cli) -> anyhow::Result<SnipConfig> {
    let mut config = match &cli.config {
        Some(path) => SnipConfig::load(path)?,
        None => SnipConfig::discover().unwrap_or_default(),
    };

    if let Some(amount) = cli.amount {
        config.runner.amount = amount;
    }
    if let Some(delay) = &cli.delay_between {
        config.runner.delay_between = Some(delay.clone());
    }
    if let Some(delay) = &cli.delay_after {
        config.runner.delay_after = Some(delay.clone());
    }
    if cli.no_delay_after {
        config.runner.delay_after = None;
    }
    if let Some(format) = &cli.format {
        config.output.format = format.clone();
    }

    debug!(?config, "resolved configuration");
    Ok(config)
}

fn list_tests(suite: &Suite, plan: &ExecutionPlan) -> anyhow::Result<()> {
    println!("snipbench Plan: {}", suite.description());

    for (slot, name) in plan.slots.iter().zip(suite.names()) {
        let marker = if slot.is_ready() { "" } else { " (skipped)" };
        println!("├── [{}] {}{}", slot.index, name, marker);
    }

    println!("{} of {} tests selected.", plan.selected, plan.slots.len());
    Ok(())
}

fn run_suite(
    suite: &Suite,
    plan: &ExecutionPlan,
    options: &RunOptions,
    format: OutputFormat,
    cli: &Cli,
) -> anyhow::Result<()> {
    if plan.selected == 0 {
        println!("No tests selected.");
        return Ok(());
    }

    eprintln!(
        "Running {} tests, {} samples each...\n",
        plan.selected,
        options.amount.get()
    );

    // Failures are reported through the diagnostic sink
    silence_candidate_panics();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_time()
        .build()?;

    let board = Arc::new(RunBoard::new());
    let controller = Arc::new(RunSupersession::new(board.clone()));
    let coordinator = RunCoordinator::new(controller);

    let pb = ProgressBar::new(plan.selected as u64 * u64::from(options.amount.get()));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message("samples");

    let start_time = Instant::now();
    let outcome = runtime.block_on(async {
        // Candidates run on this thread; the bar is fed from a worker.
        let mut progress = board.subscribe_progress();
        let bar = pb.clone();
        let watcher = tokio::spawn(async move {
            while progress.changed().await.is_ok() {
                let count = *progress.borrow_and_update();
                if let Some(count) = count {
                    bar.set_position(count);
                }
            }
        });

        let outcome = coordinator.run(&plan.slots, options).await;
        watcher.abort();
        outcome
    });
    pb.finish_and_clear();
    debug!(elapsed_ms = start_time.elapsed().as_secs_f64() * 1000.0, "run finished");

    let result = match outcome {
        RunOutcome::Completed(result) => result,
        RunOutcome::NothingToRun => {
            println!("No tests selected.");
            return Ok(());
        }
        RunOutcome::Superseded => anyhow::bail!("run was superseded before it could publish"),
    };

    let report = build_report(suite.description(), &plan.slots, &result, options);

    let output = match format {
        OutputFormat::Json => generate_json_report(&report)?,
        OutputFormat::Human => format_human_output(&report),
    };

    // Write output
    if let Some(ref path) = cli.output {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(output.as_bytes())?;
        println!("Report written to: {}", path.display());
    } else {
        print!("{}", output);
    }

    if report.summary.failed > 0 {
        anyhow::bail!("{} test(s) panicked during execution", report.summary.failed);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("snipbench").chain(args.iter().copied()))
    }

    #[test]
    fn test_cli_defaults() {
        let cli = cli(&[]);
        assert_eq!(cli.filter, ".*");
        assert!(cli.command.is_none());
        assert!(cli.amount.is_none());
        assert!(!cli.no_delay_after);
    }

    #[test]
    fn test_cli_flags() {
        let cli = cli(&["-n", "20", "--delay-between", "1ms", "--format", "json", "loop", "list"]);
        assert_eq!(cli.amount, Some(20));
        assert_eq!(cli.delay_between.as_deref(), Some("1ms"));
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert_eq!(cli.filter, "loop");
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_delay_after_conflicts() {
        let parsed = Cli::try_parse_from(["snipbench", "--delay-after", "5ms", "--no-delay-after"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = std::env::temp_dir().join(format!("snipbench-cfg-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[runner]\namount = 7\ndelay_between = \"2ms\"\n").unwrap();

        let path_arg = path.to_string_lossy().into_owned();
        let config = load_config(&cli(&["--config", path_arg.as_str(), "--no-delay-after"])).unwrap();
        assert_eq!(config.runner.amount, 7);
        assert_eq!(config.runner.delay_between.as_deref(), Some("2ms"));
        assert_eq!(config.runner.delay_after, None);

        let config = load_config(&cli(&["--config", path_arg.as_str(), "-n", "3"])).unwrap();
        assert_eq!(config.runner.amount, 3);
        assert_eq!(config.runner.delay_after.as_deref(), Some("50ms"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_list_command() {
        let suite = Suite::new("loops").candidate("a", || {}).candidate("b", || {});
        let result = run_with_cli(suite, cli(&["a", "list"]));
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_writes_json_report() {
        let path = std::env::temp_dir().join(format!("snipbench-report-{}.json", std::process::id()));
        let path_arg = path.to_string_lossy().into_owned();
        let suite = Suite::new("loops")
            .candidate("sum", || {
                std::hint::black_box((0..100u64).sum::<u64>());
            })
            .candidate("noop", || {});

        run_with_cli(
            suite,
            cli(&["-n", "5", "--no-delay-after", "--format", "json", "-o", path_arg.as_str()]),
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["tests"].as_array().unwrap().len(), 2);
        assert_eq!(json["tests"][0]["metrics"]["samples"], 5);
        assert_eq!(json["summary"]["completed"], 2);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_run_reports_panics_as_error() {
        let suite = Suite::new("broken").candidate("boom", || panic!("boom"));
        let err = run_with_cli(suite, cli(&["-n", "2", "--no-delay-after"])).unwrap_err();
        assert!(err.to_string().contains("panicked"));
    }
}
