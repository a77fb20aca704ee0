//! `swarmlab` command-line driver.
//!
//! Usage:
//!   swarmlab run <problem> [options]    # optimize one reference scenario
//!   swarmlab compare [options]          # pathfinding with each topology
//!
//! Problems: pathfinding, pathfinding-3d, coverage, coverage-3d

use std::{error::Error, fs::File, io::BufWriter, path::PathBuf, sync::Arc};

use clap::{Args, Parser, Subcommand};
use swarmlab::{
    algorithms::particles::SwarmStatus,
    core::{Callbacks, CtrlCAbortSignal},
    prelude::*,
    problems::ProblemKind,
};

/// Particle swarm optimization for path planning and transmitter coverage
#[derive(Parser)]
#[command(name = "swarmlab")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize one reference scenario and print the result table
    Run {
        /// pathfinding, pathfinding-3d, coverage or coverage-3d
        problem: ProblemKind,

        /// Number of waypoints (pathfinding) or routers (coverage)
        #[arg(long)]
        size: Option<usize>,

        /// global, social or geographic
        #[arg(short, long, default_value = "global")]
        topology: String,

        /// Neighbourhood size of the social and geographic topologies
        #[arg(short = 'k', long, default_value_t = SwarmTopology::DEFAULT_NEIGHBOR_SIZE)]
        neighbor_size: usize,

        #[command(flatten)]
        budget: Budget,

        /// Write the summary (including the full history) as a Python pickle
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare the three topologies on the planar pathfinding scenario
    Compare {
        #[command(flatten)]
        budget: Budget,

        /// Neighbourhood size of the social and geographic topologies
        #[arg(short = 'k', long, default_value_t = 5)]
        neighbor_size: usize,
    },
}

#[derive(Args)]
struct Budget {
    /// Number of particles (defaults to the scenario's usual budget)
    #[arg(short = 'n', long)]
    particles: Option<usize>,

    /// Number of iterations (defaults to the scenario's usual budget)
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Seed for the random number generator
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

impl Budget {
    fn configure(&self, kind: ProblemKind, config: PSOConfig) -> PSOConfig {
        let (particles, iterations) = kind.default_budget();
        config
            .with_n_particles(self.particles.unwrap_or(particles))
            .with_max_iter(self.iterations.unwrap_or(iterations))
    }
}

/// Run the planar pathfinding scenario once per topology. A run that ends early (e.g. on
/// Ctrl-C) is the last one attempted.
fn compare(
    budget: &Budget,
    neighbor_size: usize,
    callbacks: &Callbacks<SwarmStatus, ()>,
) -> Result<Vec<(SwarmTopology, SwarmSummary)>, PsoError> {
    let kind = ProblemKind::Pathfinding2D;
    let problem = kind.build(kind.default_size());
    let mut results = Vec::new();
    for topology in [
        SwarmTopology::Global,
        SwarmTopology::Social { neighbor_size },
        SwarmTopology::Geographic { neighbor_size },
    ] {
        let config = budget
            .configure(kind, PSOConfig::new(problem.bounds()))
            .with_topology(topology);
        let mut pso = PSO::new(config, Rng::with_seed(budget.seed))?;
        let summary = pso.optimize_with(&problem, callbacks)?;
        let aborted = !summary.message.is_empty();
        results.push((topology, summary));
        if aborted {
            break;
        }
    }
    Ok(results)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .init();

    let callbacks = Callbacks::empty().with_abort_signal(Arc::new(CtrlCAbortSignal::new()));

    match cli.command {
        Commands::Run {
            problem: kind,
            size,
            topology,
            neighbor_size,
            budget,
            output,
        } => {
            let problem = kind.build(size.unwrap_or_else(|| kind.default_size()));
            let config = budget
                .configure(kind, PSOConfig::new(problem.bounds()))
                .with_topology(SwarmTopology::from_name(&topology, neighbor_size)?);
            let mut pso = PSO::new(config, Rng::with_seed(budget.seed))?;
            let summary = pso.optimize_with(&problem, &callbacks)?;
            println!("{}", summary);
            if let Some(fraction) = problem.coverage_fraction(&summary.x) {
                println!(
                    "Coverage: {:.2}% ({} points uncovered)",
                    100.0 * fraction,
                    summary.fx
                );
            }
            if let Some(path) = output {
                let mut writer = BufWriter::new(File::create(&path)?);
                summary.write_pickle(&mut writer)?;
                println!("Summary written to {}", path.display());
            }
        }
        Commands::Compare {
            budget,
            neighbor_size,
        } => {
            for (topology, summary) in compare(&budget, neighbor_size, &callbacks)? {
                println!(
                    "{:<28} final cost {:>10.2} after {} iterations",
                    topology.to_string(),
                    summary.fx,
                    summary.iterations
                );
                if !summary.message.is_empty() {
                    println!("{}, skipping the remaining topologies", summary.message);
                }
            }
        }
    }
    Ok(())
}
