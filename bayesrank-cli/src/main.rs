mod benchmark;
mod config;
mod error;
mod ingest;
mod output;

use bayesrank_core::constants::{DEFAULT_ALGORITHM, DEFAULT_SMOOTHING, DEFAULT_TOP_N};
use bayesrank_core::{Algorithm, EngineConfig, RankingEngine};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::BayesrankConfig;
use crate::error::{CliError, Result};
use crate::ingest::LoadReport;

/// Processed dataset read by `rank`/`bench` and written by `clean`.
const DEFAULT_INPUT: &str = "datos_procesados.csv";
/// Ranked dataset written by `rank`.
const DEFAULT_OUTPUT: &str = "restaurantes_ordenados.csv";

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "bayesrank", version, about = "Rank restaurants by Bayesian-average review score")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (default: ~/.config/bayesrank/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level logging on stderr. RUST_LOG takes precedence.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Clean a raw review dump into a processed dataset
    Clean(CleanArgs),
    /// Score, sort and report a processed dataset
    Rank(RankArgs),
    /// Time several sort variants on the same scored dataset
    Bench(BenchArgs),
    /// Create a default config file at ~/.config/bayesrank/config.toml
    Init,
}

#[derive(Parser)]
struct CleanArgs {
    /// Raw CSV dump with organization, rating and num_reviews columns
    #[arg(long)]
    raw: PathBuf,

    /// Processed output (default: datos_procesados.csv, or `input` from config)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser)]
struct RankArgs {
    /// Processed dataset (default: datos_procesados.csv)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Ranked CSV destination (default: restaurantes_ordenados.csv)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Sort variant: "exchange", "partition" or "heap-select"
    #[arg(long)]
    algorithm: Option<String>,

    /// Smoothing constant m. Must be positive. Default: 100.
    #[arg(long)]
    smoothing: Option<f64>,

    /// Unique names shown in the report. Default: 20.
    #[arg(long)]
    top: Option<usize>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct BenchArgs {
    /// Processed dataset (default: datos_procesados.csv)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Comma-separated variants to run (default: all three)
    #[arg(long, value_delimiter = ',')]
    algorithms: Vec<String>,

    /// Smoothing constant m. Must be positive. Default: 100.
    #[arg(long)]
    smoothing: Option<f64>,

    /// Only benchmark the first N records
    #[arg(long)]
    limit: Option<usize>,

    /// Output JSON instead of the text report
    #[arg(long)]
    json: bool,
}

/// Everything `rank` needs, after merging CLI args over config over defaults.
#[derive(Debug, PartialEq)]
struct RankSettings {
    input: PathBuf,
    output: PathBuf,
    algorithm: Algorithm,
    smoothing: f64,
    top_n: usize,
}

fn resolve_rank_settings(args: &RankArgs, cfg: &BayesrankConfig) -> Result<RankSettings> {
    let algorithm = args
        .algorithm
        .as_deref()
        .or(cfg.algorithm.as_deref())
        .map(str::parse::<Algorithm>)
        .transpose()?
        .unwrap_or(DEFAULT_ALGORITHM);

    Ok(RankSettings {
        input: input_path(args.input.as_deref(), cfg),
        output: args
            .output
            .clone()
            .or_else(|| cfg.output.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        algorithm,
        smoothing: args.smoothing.or(cfg.smoothing).unwrap_or(DEFAULT_SMOOTHING),
        top_n: args.top.or(cfg.top_n).unwrap_or(DEFAULT_TOP_N),
    })
}

fn input_path(arg: Option<&Path>, cfg: &BayesrankConfig) -> PathBuf {
    arg.map(Path::to_path_buf)
        .or_else(|| cfg.input.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}

/// Parse `--algorithms`; an empty list means every variant.
fn resolve_algorithms(names: &[String]) -> Result<Vec<Algorithm>> {
    if names.is_empty() {
        return Ok(Algorithm::ALL.to_vec());
    }
    let mut algorithms = Vec::with_capacity(names.len());
    for name in names {
        let algorithm: Algorithm = name.parse()?;
        if !algorithms.contains(&algorithm) {
            algorithms.push(algorithm);
        }
    }
    Ok(algorithms)
}

/// An explicit `--config` must exist and parse. The default location is optional.
fn resolve_config(explicit: Option<&Path>) -> Result<BayesrankConfig> {
    match explicit {
        Some(path) => {
            std::fs::metadata(path).map_err(|e| CliError::io(path, e))?;
            config::load_config(path)
        }
        None => match config::config_path() {
            Ok(path) => config::load_config(&path),
            Err(_) => Ok(BayesrankConfig::default()),
        },
    }
}

fn log_directive(verbose: bool, configured: Option<&str>) -> &str {
    if verbose { "debug" } else { configured.unwrap_or("info") }
}

fn init_logging(verbose: bool, configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(log_directive(verbose, configured)).unwrap_or_else(|_| EnvFilter::new("info"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // `init` creates the config file, so it runs without loading one.
    let cfg = match cli.command {
        Commands::Init => BayesrankConfig::default(),
        _ => resolve_config(cli.config.as_deref()).unwrap_or_else(|e| bail(e)),
    };
    init_logging(cli.verbose, cfg.log_level.as_deref());

    let result = match cli.command {
        Commands::Clean(args) => run_clean(args, &cfg),
        Commands::Rank(args) => run_rank(args, &cfg),
        Commands::Bench(args) => run_bench(args, &cfg),
        Commands::Init => run_init(cli.config),
    };

    if let Err(e) = result {
        bail(e);
    }
}

fn run_clean(args: CleanArgs, cfg: &BayesrankConfig) -> Result<()> {
    let out = input_path(args.out.as_deref(), cfg);
    let report = ingest::clean_raw(&args.raw, &out)?;
    println!(
        "Kept {} rows, dropped {} malformed rows. Wrote {}",
        report.kept,
        report.dropped,
        out.display(),
    );
    Ok(())
}

fn run_rank(args: RankArgs, cfg: &BayesrankConfig) -> Result<()> {
    // Algorithm and smoothing are validated here, before any data is read.
    let settings = resolve_rank_settings(&args, cfg)?;
    let engine = RankingEngine::new(EngineConfig {
        algorithm: settings.algorithm,
        smoothing: settings.smoothing,
    })?;
    debug!(?settings, "resolved rank settings");

    let LoadReport { mut records, skipped } = ingest::load_processed(&settings.input)?;
    if skipped > 0 {
        info!(skipped, "rows skipped while loading");
    }

    let start = Instant::now();
    let summary = engine.rank(&mut records)?;
    let elapsed = start.elapsed();

    output::write_ranked_csv(&settings.output, &records)?;
    info!(path = %settings.output.display(), records = records.len(), "wrote ranked dataset");

    if args.json {
        output::print_json(&records, &summary, settings.top_n)?;
    } else {
        output::print_table(&records, &summary, settings.top_n, elapsed);
    }
    Ok(())
}

fn run_bench(args: BenchArgs, cfg: &BayesrankConfig) -> Result<()> {
    let algorithms = resolve_algorithms(&args.algorithms)?;
    let smoothing = args.smoothing.or(cfg.smoothing).unwrap_or(DEFAULT_SMOOTHING);
    let engine = RankingEngine::new(EngineConfig {
        smoothing,
        ..EngineConfig::default()
    })?;

    let input = input_path(args.input.as_deref(), cfg);
    let LoadReport { mut records, .. } = ingest::load_processed(&input)?;
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    if algorithms.contains(&Algorithm::Exchange) && records.len() > benchmark::EXCHANGE_WARN_THRESHOLD {
        warn!(
            records = records.len(),
            "exchange sort is quadratic; expect a long run (use --limit or drop it from --algorithms)"
        );
    }

    let report = engine.benchmark(&records, &algorithms)?;

    if args.json {
        benchmark::print_json(&report, records.len())?;
    } else {
        benchmark::print_report(&report, records.len());
    }

    benchmark::ensure_agreement(&report)
}

fn run_init(explicit: Option<PathBuf>) -> Result<()> {
    let path = match explicit {
        Some(path) => path,
        None => config::config_path()?,
    };
    config::create_default_config(&path)?;
    println!("Created config at {}", path.display());
    println!("Edit it to set your default dataset paths, algorithm, etc.");
    Ok(())
}
