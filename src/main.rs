//! FLYWAY - CLI entry point
//!
//! Headless driver for the migratory-bird population simulator.

use clap::{Parser, Subcommand};
use flyway::climate;
use flyway::{benchmark, Config, Simulation};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "flyway")]
#[command(version)]
#[command(about = "Stochastic migratory-bird population simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a headless simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "flyway.yaml")]
        config: PathBuf,

        /// Number of ticks to simulate
        #[arg(short, long, default_value = "10000")]
        ticks: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Write the final snapshot to this JSON file
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of ticks
        #[arg(short, long, default_value = "10000")]
        ticks: u64,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "flyway.yaml")]
        output: PathBuf,
    },

    /// Print the climate zone table
    Zones,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            ticks,
            seed,
            snapshot,
            quiet,
        } => run_simulation(config, ticks, seed, snapshot, quiet),

        Commands::Benchmark { ticks, seed } => {
            let result = benchmark(ticks, seed);
            println!("{}", result);
            Ok(())
        }

        Commands::Init { output } => generate_config(output),

        Commands::Zones => {
            print_zones();
            Ok(())
        }
    }
}

fn run_simulation(
    config_path: PathBuf,
    ticks: u64,
    seed: Option<u64>,
    snapshot_path: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Load or create config
    let config = if config_path.exists() {
        println!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        println!("Using default configuration");
        Config::default()
    };

    let stats_interval = config.logging.stats_interval.max(1);

    let mut sim = match seed {
        Some(s) => {
            println!("Using seed: {}", s);
            Simulation::new_with_seed(config, s)
        }
        None => Simulation::new(config),
    };

    println!("Starting simulation");
    println!("  Founders: {}", sim.population());
    println!(
        "  Arena: {}x{}",
        sim.config.arena.width, sim.config.arena.height
    );
    println!("  Zone: {}", climate::zone_for(sim.latitude).name);
    println!("  Ticks: {}", ticks);
    println!();

    let start = Instant::now();

    for _ in 0..ticks {
        sim.update();

        if !quiet && sim.tick % stats_interval == 0 {
            println!("{}", sim.stats.summary());
            if let Some(event) = sim.events.latest() {
                log::debug!("latest event [{}]: {}", event.tick, event.message);
            }
        }

        if sim.is_extinct() {
            println!("\nFlock extinct at tick {}", sim.tick);
            break;
        }
    }

    let elapsed = start.elapsed();
    let ticks_per_sec = sim.tick as f64 / elapsed.as_secs_f64();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Ticks: {}", sim.tick);
    println!("Speed: {:.1} ticks/s", ticks_per_sec);
    println!("Final population: {}", sim.population());
    println!("Score: {}", sim.stats.score);
    println!("Born: {}  Died: {}", sim.stats.total_born, sim.stats.total_died);
    println!("Survival rate: {:.2}", sim.stats.survival_rate());

    if let Some(path) = snapshot_path {
        let json = serde_json::to_string_pretty(&sim.snapshot())?;
        std::fs::write(&path, json)?;
        println!("Snapshot: {:?}", path);
    }

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Default configuration written to: {:?}", output);
    Ok(())
}

fn print_zones() {
    println!("Climate zones (north to south):");
    for zone in &climate::ZONES {
        println!(
            "  {:20} from {:6.1}°  survival x{:.2}",
            zone.name, zone.min_latitude, zone.survival_modifier
        );
    }
}
