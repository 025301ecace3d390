//! Stampede election simulator CLI.
//!
//! Runs a Bully election over a cluster of `--processes` ranked
//! processes, with one designated dead and one noticing the failure.
//! By default the run is fully deterministic; `--live` runs the same
//! state machines over a real tokio task-per-process cluster instead.

use clap::Parser;
use stampede_runtime::run_cluster;
use stampede_simulation::{NetworkConfig, SimulationRunner};
use stampede_types::ProcessId;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stampede-sim")]
#[command(about = "Bully leader election simulator")]
#[command(version)]
struct Cli {
    /// Total number of processes in the cluster
    #[arg(short = 'n', long, default_value = "5")]
    processes: u32,

    /// Id of the former coordinator, presumed dead
    #[arg(short, long)]
    dead: u32,

    /// Id of the process that notices the failure and starts the election
    #[arg(short, long)]
    initiator: u32,

    /// RNG seed for the simulated network
    #[arg(long, default_value = "12345")]
    seed: u64,

    /// Base network latency in milliseconds
    #[arg(long, default_value = "1")]
    base_latency_ms: u64,

    /// Maximum additional latency jitter in milliseconds
    #[arg(long, default_value = "2")]
    jitter_ms: u64,

    /// Run over a real tokio task-per-process cluster instead of the
    /// deterministic simulation
    #[arg(long)]
    live: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    let dead = ProcessId(cli.dead);
    let initiator = ProcessId(cli.initiator);

    if cli.live {
        let report = run_cluster(cli.processes, dead, initiator).await?;
        println!("leader: {}", report.leader);
        println!(
            "finishers: {}",
            report
                .finishers
                .iter()
                .map(|p| p.0.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    } else {
        let config = NetworkConfig {
            base_latency: Duration::from_millis(cli.base_latency_ms),
            jitter: Duration::from_millis(cli.jitter_ms),
        };
        let outcome =
            SimulationRunner::new(cli.processes, dead, initiator, config, cli.seed)?.run()?;

        println!("leader: {}", outcome.leader);
        println!("virtual time: {:?}", outcome.elapsed);
        println!(
            "messages: {} election, {} ok, {} coordinator ({} events)",
            outcome.stats.elections_sent,
            outcome.stats.oks_sent,
            outcome.stats.coordinators_sent,
            outcome.stats.events_processed,
        );
    }

    Ok(())
}
