//! Configuration system for the flyway simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub arena: ArenaConfig,
    pub birds: BirdConfig,
    pub breeding: BreedingConfig,
    pub predation: PredationConfig,
    pub migration: MigrationConfig,
    pub habitat: HabitatConfig,
    pub weather: WeatherConfig,
    pub timing: TimingConfig,
    pub logging: LoggingConfig,
}

/// Arena (world bounds) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Arena width in world units
    pub width: f32,
    /// Arena height in world units
    pub height: f32,
    /// Inner margin kept clear of the hard bounds
    pub margin: f32,
}

/// Per-bird behavior and life-cycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdConfig {
    /// Energy ceiling (and starting energy)
    pub max_energy: f32,
    /// Energy regained per tick while idling below the ceiling
    pub energy_regen: f32,
    /// Speed ceiling for juveniles
    pub juvenile_max_speed: f32,
    /// Speed ceiling for adults
    pub adult_max_speed: f32,
    /// Per-tick chance of a random velocity impulse while wandering
    pub wander_impulse_chance: f32,
    /// Magnitude of a wander impulse per axis
    pub wander_impulse: f32,
    /// Damping divisor for juvenile follow steering
    pub follow_damping: f32,
    /// Noise added per axis while steering
    pub steering_noise: f32,
    /// Horizontal-velocity deadband before the facing flips
    pub facing_deadband: f32,
    /// Per-tick chance of refreshing the cached survival chance
    pub survival_refresh_chance: f32,
    /// Uniform jitter half-width applied to survival chances
    pub survival_jitter: f32,
    /// Hatch countdown distribution: mean
    pub hatch_ticks_mean: f32,
    /// Hatch countdown distribution: stddev
    pub hatch_ticks_stddev: f32,
    /// Hatch countdown clamp range
    pub hatch_ticks_min: f32,
    pub hatch_ticks_max: f32,
    /// Maturation countdown distribution: mean
    pub mature_ticks_mean: f32,
    /// Maturation countdown distribution: stddev
    pub mature_ticks_stddev: f32,
    /// Maturation countdown clamp range
    pub mature_ticks_min: f32,
    pub mature_ticks_max: f32,
    /// Genetic egg-survival factor distribution
    pub egg_survival_mean: f32,
    pub egg_survival_stddev: f32,
    /// Genetic juvenile-survival factor distribution
    pub juvenile_survival_mean: f32,
    pub juvenile_survival_stddev: f32,
    /// Clamp range shared by both genetic survival factors
    pub base_survival_min: f32,
    pub base_survival_max: f32,
}

/// Breeding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedingConfig {
    /// Ticks between automatic breeding attempts
    pub interval_ticks: u64,
    /// Cooldown set by every attempt, success or not
    pub cooldown_ticks: u32,
    /// Attempt success-probability distribution
    pub success_mean: f32,
    pub success_stddev: f32,
    /// Clamp range for the success probability
    pub success_min: f32,
    pub success_max: f32,
    /// Clutch-size distribution
    pub clutch_mean: f32,
    pub clutch_stddev: f32,
    /// Clutch-size clamp range
    pub clutch_min: f32,
    pub clutch_max: f32,
    /// Minimum energy for an adult to be an eligible parent
    pub min_parent_energy: f32,
    /// Energy deducted from the mother per clutch
    pub mother_energy_cost: f32,
    /// Eggs land within this offset of the mother on each axis
    pub egg_scatter: f32,
}

/// Predator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredationConfig {
    /// Base per-tick catch probability at point-blank range
    pub catch_probability_base: f32,
    /// Distance below which a catch attempt is possible
    pub catch_radius: f32,
    /// Distance within which a predator pursues a target
    pub pursuit_radius: f32,
    /// Predator speed ceiling
    pub max_speed: f32,
    /// Steering damping divisor while pursuing
    pub pursuit_damping: f32,
    /// Predators present after a reset
    pub initial_predators: usize,
    /// Adult count that must be exceeded before dynamic spawning
    pub spawn_adult_threshold: usize,
    /// Divisor converting the adult count to a spawn probability
    pub spawn_adult_divisor: f32,
}

/// Migration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Latitude after a reset (degrees)
    pub start_latitude: f32,
    /// Longitude after a reset (degrees)
    pub start_longitude: f32,
    /// Ground distance covered per migration (km)
    pub distance_km: f32,
    /// Kilometres per degree of latitude
    pub km_per_degree: f32,
    /// Latitude clamp range reachable by migration
    pub latitude_min: f32,
    pub latitude_max: f32,
    /// Distance to the target below which a bird has arrived
    pub arrival_radius: f32,
    /// Energy drained per tick in flight
    pub energy_drain: f32,
    /// Energy restored on arrival
    pub arrival_energy_bonus: f32,
    /// Energy floor applied when a flight aborts
    pub abort_energy_floor: f32,
    /// Per-tick probability that the flight continues
    pub success_rate: f32,
    /// Half-width of the uniform weather speed multiplier
    pub weather_variance: f32,
}

/// Habitat feature generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitatConfig {
    /// Pond count range (inclusive)
    pub pond_count_min: usize,
    pub pond_count_max: usize,
    /// Pond radius ranges per axis
    pub pond_rx_min: f32,
    pub pond_rx_max: f32,
    pub pond_ry_min: f32,
    pub pond_ry_max: f32,
    /// Cover patch count range (inclusive)
    pub cover_count_min: usize,
    pub cover_count_max: usize,
    /// Cover patch radius range
    pub cover_radius_min: f32,
    pub cover_radius_max: f32,
    /// Hit-test radius for hiding a specific bird at a point
    pub hide_hit_radius: f32,
}

/// Storm configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Per-tick probability of a storm
    pub storm_probability: f32,
    /// Energy drained from every bird by a storm
    pub storm_energy_drain: f32,
    /// Energy floor after a storm
    pub storm_energy_floor: f32,
}

/// Cadences and real-time windows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Ticks between stage-countdown decrements
    pub stage_aging_interval: u64,
    /// Ticks between dynamic predator-spawn attempts
    pub predator_spawn_interval: u64,
    /// Wall-clock seconds of predation-free grace after a reset
    pub safe_mode_secs: f32,
    /// Wall-clock seconds a hidden bird stays hidden
    pub hide_secs: f32,
    /// Wall-clock seconds between triggering and committing a migration
    pub migration_secs: f32,
}

/// Event log and stats output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Most-recent events retained in the simulation log
    pub event_capacity: usize,
    /// Ticks between stats lines in the headless runner
    pub stats_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena: ArenaConfig::default(),
            birds: BirdConfig::default(),
            breeding: BreedingConfig::default(),
            predation: PredationConfig::default(),
            migration: MigrationConfig::default(),
            habitat: HabitatConfig::default(),
            weather: WeatherConfig::default(),
            timing: TimingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 600.0,
            margin: 20.0,
        }
    }
}

impl Default for BirdConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            energy_regen: 0.05,
            juvenile_max_speed: 1.5,
            adult_max_speed: 2.5,
            wander_impulse_chance: 0.05,
            wander_impulse: 0.5,
            follow_damping: 15.0,
            steering_noise: 0.2,
            facing_deadband: 0.1,
            survival_refresh_chance: 0.01,
            survival_jitter: 0.05,
            hatch_ticks_mean: 3.0,
            hatch_ticks_stddev: 0.5,
            hatch_ticks_min: 1.5,
            hatch_ticks_max: 5.0,
            mature_ticks_mean: 8.0,
            mature_ticks_stddev: 1.5,
            mature_ticks_min: 4.0,
            mature_ticks_max: 12.0,
            egg_survival_mean: 0.85,
            egg_survival_stddev: 0.10,
            juvenile_survival_mean: 0.70,
            juvenile_survival_stddev: 0.12,
            base_survival_min: 0.3,
            base_survival_max: 1.0,
        }
    }
}

impl Default for BreedingConfig {
    fn default() -> Self {
        Self {
            interval_ticks: 500,
            cooldown_ticks: 300,
            success_mean: 0.80,
            success_stddev: 0.15,
            success_min: 0.2,
            success_max: 1.0,
            clutch_mean: 4.0,
            clutch_stddev: 1.5,
            clutch_min: 1.0,
            clutch_max: 8.0,
            min_parent_energy: 50.0,
            mother_energy_cost: 15.0,
            egg_scatter: 60.0,
        }
    }
}

impl Default for PredationConfig {
    fn default() -> Self {
        Self {
            catch_probability_base: 0.02,
            catch_radius: 30.0,
            pursuit_radius: 150.0,
            max_speed: 3.5,
            pursuit_damping: 20.0,
            initial_predators: 2,
            spawn_adult_threshold: 3,
            spawn_adult_divisor: 10.0,
        }
    }
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            start_latitude: 45.0,
            start_longitude: -75.0,
            distance_km: 1000.0,
            km_per_degree: 111.0,
            latitude_min: -60.0,
            latitude_max: 75.0,
            arrival_radius: 50.0,
            energy_drain: 0.1,
            arrival_energy_bonus: 20.0,
            abort_energy_floor: 10.0,
            success_rate: 0.95,
            weather_variance: 0.15,
        }
    }
}

impl Default for HabitatConfig {
    fn default() -> Self {
        Self {
            pond_count_min: 2,
            pond_count_max: 3,
            pond_rx_min: 60.0,
            pond_rx_max: 130.0,
            pond_ry_min: 50.0,
            pond_ry_max: 110.0,
            cover_count_min: 3,
            cover_count_max: 5,
            cover_radius_min: 30.0,
            cover_radius_max: 50.0,
            hide_hit_radius: 40.0,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            storm_probability: 0.001,
            storm_energy_drain: 30.0,
            storm_energy_floor: 10.0,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            stage_aging_interval: 100,
            predator_spawn_interval: 1800,
            safe_mode_secs: 10.0,
            hide_secs: 3.0,
            migration_secs: 5.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            event_capacity: 100,
            stats_interval: 500,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.arena.width <= 0.0 || self.arena.height <= 0.0 {
            return Err("arena dimensions must be positive".to_string());
        }
        if self.arena.margin * 2.0 >= self.arena.width.min(self.arena.height) {
            return Err("arena margin leaves no interior space".to_string());
        }
        if !(0.0..=1.0).contains(&self.predation.catch_probability_base) {
            return Err("catch_probability_base must be in [0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.weather.storm_probability) {
            return Err("storm_probability must be in [0, 1]".to_string());
        }
        if !(0.0..=1.0).contains(&self.migration.success_rate) {
            return Err("migration success_rate must be in [0, 1]".to_string());
        }
        if self.breeding.clutch_min < 1.0 || self.breeding.clutch_max < self.breeding.clutch_min {
            return Err("clutch range must satisfy 1 <= min <= max".to_string());
        }
        if self.migration.latitude_min >= self.migration.latitude_max {
            return Err("latitude range must satisfy min < max".to_string());
        }
        if self.timing.stage_aging_interval == 0 || self.breeding.interval_ticks == 0 {
            return Err("tick cadences must be > 0".to_string());
        }
        if self.timing.predator_spawn_interval == 0 {
            return Err("predator_spawn_interval must be > 0".to_string());
        }
        if self.timing.safe_mode_secs < 0.0
            || self.timing.hide_secs < 0.0
            || self.timing.migration_secs < 0.0
        {
            return Err("real-time windows must be >= 0".to_string());
        }
        if self.logging.event_capacity == 0 {
            return Err("event_capacity must be > 0".to_string());
        }
        Ok(())
    }
}
