//! # FLYWAY
//!
//! Stochastic migratory-bird population simulator.
//!
//! ## Features
//!
//! - **Individual-based**: every egg, juvenile and adult is simulated with
//!   its own genetics, energy and survival odds
//! - **Predator-prey**: predators pursue and catch birds with fitness-scaled
//!   probability
//! - **Climate feedback**: latitude bands modulate survival; migrations move
//!   the flock between them and regenerate the habitat
//! - **Player-steerable**: migration, forced breeding, hiding and extra
//!   predators are exposed as action calls for a host UI
//! - **Reproducible**: seeded random number generation
//!
//! ## Quick Start
//!
//! ```rust
//! use flyway::{Config, Simulation};
//!
//! // Create a simulation with the default config
//! let mut sim = Simulation::new_with_seed(Config::default(), 42);
//!
//! // Drive it one tick per frame
//! sim.run(1000);
//!
//! // Read what the renderer needs
//! let snapshot = sim.snapshot();
//! println!("Population: {}", snapshot.population());
//! println!("Zone: {}", snapshot.climate_zone);
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use flyway::Config;
//!
//! let mut config = Config::default();
//! config.arena.width = 1280.0;
//! config.breeding.clutch_mean = 5.0;
//! ```

pub mod bird;
pub mod climate;
pub mod config;
pub mod events;
pub mod habitat;
pub mod predator;
pub mod random;
pub mod simulation;
pub mod snapshot;
pub mod stats;

// Re-export main types
pub use bird::{Bird, BirdId, Gender, LifeStage};
pub use config::Config;
pub use predator::{Predator, PredatorKind};
pub use simulation::{Direction, RunState, Simulation};
pub use snapshot::WorldSnapshot;
pub use stats::Stats;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(ticks: u64, seed: u64) -> BenchmarkResult {
    use std::time::Instant;

    let mut config = Config::default();
    // Measure the full tick including predation.
    config.timing.safe_mode_secs = 0.0;

    let mut sim = Simulation::new_with_seed(config, seed);

    let start = Instant::now();
    sim.run(ticks);
    let elapsed = start.elapsed();

    BenchmarkResult {
        ticks,
        final_population: sim.population(),
        score: sim.stats.score,
        elapsed_secs: elapsed.as_secs_f64(),
        ticks_per_second: ticks as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub ticks: u64,
    pub final_population: usize,
    pub score: u32,
    pub elapsed_secs: f64,
    pub ticks_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Ticks: {}", self.ticks)?;
        writeln!(f, "Final population: {}", self.final_population)?;
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} ticks/s", self.ticks_per_second)?;
        Ok(())
    }
}
