//! # Cacheside
//!
//! Serves `GET /products` through a cache-aside layer and benchmarks it.

mod bootstrap;
mod server;

use cacheside_application::use_cases::GetProductsUseCase;
use cacheside_bench::stats::SummaryStatistic;
use cacheside_bench::{BenchmarkEngine, HttpProductsClient, ScenarioRunner};
use cacheside_domain::config::CacheBackend;
use cacheside_domain::{CliOverrides, Config};
use cacheside_infrastructure::SqliteProductRepository;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cacheside")]
#[command(version)]
#[command(about = "Cache-aside products service with a latency benchmark harness")]
struct Cli {
    /// Path to configuration file (defaults to ./cacheside.toml when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the products service (default)
    Serve(ServeArgs),
    /// Run the scenario matrix against a running service
    Bench(BenchArgs),
}

#[derive(Args, Default)]
struct ServeArgs {
    /// HTTP port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database URL
    #[arg(long)]
    database: Option<String>,

    /// Enable the cache layer
    #[arg(long, conflicts_with = "no_cache")]
    cache: bool,

    /// Disable the cache layer
    #[arg(long)]
    no_cache: bool,

    /// Cache backend (redis, memory)
    #[arg(long)]
    cache_backend: Option<CacheBackend>,

    /// Cache entry lifetime in seconds
    #[arg(long)]
    ttl: Option<u64>,
}

#[derive(Args)]
struct BenchArgs {
    /// Products endpoint URL
    #[arg(long)]
    url: Option<String>,

    /// Requests per scenario
    #[arg(short = 'n', long)]
    runs: Option<u32>,

    /// Directory for report files
    #[arg(short = 'o', long)]
    output_dir: Option<String>,

    #[command(subcommand)]
    action: Option<BenchAction>,
}

#[derive(Subcommand)]
enum BenchAction {
    /// Print mean and population standard deviation of the given values
    Stats {
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            log_level: self.log_level.clone(),
            ..CliOverrides::default()
        };

        match &self.command {
            Some(Command::Serve(args)) => {
                overrides.port = args.port;
                overrides.bind_address = args.bind.clone();
                overrides.database_url = args.database.clone();
                overrides.cache_backend = args.cache_backend;
                overrides.cache_ttl = args.ttl;
                overrides.cache_enabled = match (args.cache, args.no_cache) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                };
            }
            Some(Command::Bench(args)) => {
                overrides.bench_base_url = args.url.clone();
                overrides.bench_runs = args.runs;
                overrides.bench_output_dir = args.output_dir.clone();
            }
            None => {}
        }

        overrides
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Bench(BenchArgs {
        action: Some(BenchAction::Stats { values }),
        ..
    })) = &cli.command
    {
        let stat = SummaryStatistic::from_samples(values);
        println!("Mean: {:.2}", stat.mean);
        println!("Std Dev: {:.2}", stat.std_dev);
        return Ok(());
    }

    let config = bootstrap::load_config(cli.config.as_deref(), cli.overrides())?;
    bootstrap::init_logging(&config);

    match cli.command {
        Some(Command::Bench(_)) => run_bench(&config).await,
        Some(Command::Serve(_)) | None => run_server(&config).await,
    }
}

async fn run_server(config: &Config) -> anyhow::Result<()> {
    info!("Cacheside starting");

    let pool = bootstrap::init_database(&config.database).await?;
    let source = Arc::new(SqliteProductRepository::new(pool));

    let mut use_case = GetProductsUseCase::new(source);
    if let Some(store) = bootstrap::init_cache(&config.cache).await? {
        use_case = use_case.with_cache(store, config.cache.ttl_seconds);
    }

    let state = cacheside_api::AppState::new(Arc::new(use_case));
    server::start_web_server(config, state).await
}

async fn run_bench(config: &Config) -> anyhow::Result<()> {
    let bench = &config.bench;
    info!(target_url = %bench.base_url, "Cacheside benchmark starting");

    let client = Arc::new(HttpProductsClient::new(bench.base_url.clone())?);
    let runner = ScenarioRunner::new(client).with_delay(Duration::from_millis(bench.delay_ms));
    let engine = BenchmarkEngine::new(
        runner,
        bench.scenarios.clone(),
        bench.runs,
        bench.output_dir.as_str(),
    );

    match engine.run().await {
        Ok(outcome) => {
            info!(
                summary = %outcome.summary_path.display(),
                elapsed_s = outcome.total_elapsed.as_secs_f64(),
                "Benchmark finished"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Benchmark aborted");
            Err(e.into())
        }
    }
}
