//! Simulation engine - the per-tick update loop.
//!
//! One `update()` call per external frame drives movement, aging, predation,
//! breeding, hatching and maturation, storms, dynamic predator spawning and
//! the migration state machine. All timed effects are wall-clock deadlines
//! owned by the simulation value, so a `reset()` structurally invalidates
//! them; nothing scheduled can outlive the population it was aimed at.

use crate::bird::{Bird, BirdId, Gender, LifeStage};
use crate::climate;
use crate::config::Config;
use crate::events::{EventKind, EventLog};
use crate::habitat::Habitat;
use crate::predator::{Predator, PredatorKind};
use crate::random::{sample_count, sample_normal_clamped};
use crate::snapshot::{BirdView, PredatorView, WorldSnapshot};
use crate::stats::Stats;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Compass direction for a migration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        }
    }
}

/// Run state of the whole simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Paused,
    /// Terminal until `reset()`
    GameOver,
}

/// A triggered migration whose completion is still pending
#[derive(Clone, Copy, Debug)]
struct PendingMigration {
    commit_at: Instant,
    latitude: f32,
    longitude: f32,
}

/// The simulation world
pub struct Simulation {
    // Population
    pub birds: Vec<Bird>,
    pub predators: Vec<Predator>,

    // Environment
    pub habitat: Habitat,
    pub latitude: f32,
    pub longitude: f32,

    // State
    pub tick: u64,
    pub run_state: RunState,
    pub breeding_cooldown: u32,

    // Configuration
    pub config: Config,

    // Statistics and player-visible log
    pub stats: Stats,
    pub events: EventLog,

    // Wall-clock deadlines, polled each tick
    safe_mode_until: Option<Instant>,
    pending_migration: Option<PendingMigration>,
    started_at: Instant,

    // ID generation
    next_bird_id: BirdId,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

impl Simulation {
    /// Create a new simulation with the given configuration
    pub fn new(config: Config) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, seed)
    }

    /// Create a new simulation with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, seed: u64) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let now = Instant::now();

        let mut sim = Self {
            birds: Vec::new(),
            predators: Vec::new(),
            habitat: Habitat::default(),
            latitude: config.migration.start_latitude,
            longitude: config.migration.start_longitude,
            tick: 0,
            run_state: RunState::Running,
            breeding_cooldown: 0,
            stats: Stats::new(),
            events: EventLog::new(config.logging.event_capacity),
            safe_mode_until: None,
            pending_migration: None,
            started_at: now,
            next_bird_id: 0,
            rng,
            seed,
            config,
        };
        sim.reset();
        sim
    }

    /// Get seed for reproducibility
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rebuild the world wholesale: founder pair, fresh habitat, initial
    /// predators, zeroed counters, safe mode armed.
    pub fn reset(&mut self) {
        self.birds.clear();
        self.predators.clear();
        self.tick = 0;
        self.run_state = RunState::Running;
        self.breeding_cooldown = 0;
        self.stats = Stats::new();
        self.events = EventLog::new(self.config.logging.event_capacity);
        self.latitude = self.config.migration.start_latitude;
        self.longitude = self.config.migration.start_longitude;
        self.pending_migration = None;
        self.started_at = Instant::now();
        self.safe_mode_until =
            Some(self.started_at + Duration::from_secs_f32(self.config.timing.safe_mode_secs));
        self.next_bird_id = 0;

        self.habitat = Habitat::generate(&mut self.rng, &self.config.arena, &self.config.habitat);

        let modifier = self.climate_modifier();
        let fx = self.config.arena.width * 0.3;
        let fy = self.config.arena.height / 3.0;

        let id = self.allocate_id();
        let male = Bird::adult(id, fx, fy, Gender::Male, &self.config.birds, modifier, &mut self.rng);
        self.birds.push(male);
        let id = self.allocate_id();
        let female =
            Bird::adult(id, fx + 20.0, fy, Gender::Female, &self.config.birds, modifier, &mut self.rng);
        self.birds.push(female);

        for i in 0..self.config.predation.initial_predators {
            let kind = if i % 2 == 0 { PredatorKind::Ground } else { PredatorKind::Aerial };
            let arena = &self.config.arena;
            let x = if i % 2 == 0 {
                arena.margin + 80.0
            } else {
                arena.width - arena.margin - 80.0
            };
            let y = arena.margin + 80.0;
            let predator = Predator::new(kind, x, y, &mut self.rng);
            self.predators.push(predator);
        }

        self.stats.update(self.tick, &self.birds, self.predators.len());
        log::info!("simulation reset (seed {})", self.seed);
    }

    /// Reset with new arena dimensions (responsive hosts resize at reset).
    pub fn reset_with_arena(&mut self, width: f32, height: f32) {
        self.config.arena.width = width;
        self.config.arena.height = height;
        self.reset();
    }

    /// Advance the simulation by one tick.
    pub fn update(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }

        self.tick += 1;
        let now = Instant::now();

        if let Some(deadline) = self.safe_mode_until {
            if now >= deadline {
                self.safe_mode_until = None;
                self.events.push(
                    self.tick,
                    EventKind::SafeModeEnded,
                    "The grace period is over; predators are hunting",
                );
            }
        }

        if self.breeding_cooldown > 0 {
            self.breeding_cooldown -= 1;
        }

        if self.tick % self.config.timing.stage_aging_interval == 0 {
            for bird in &mut self.birds {
                if bird.ticks_remaining > 0 {
                    bird.ticks_remaining -= 1;
                }
            }
        }

        self.commit_migration_if_due(now);
        self.expire_hides(now);

        self.step_birds();
        self.step_predators();

        if self.safe_mode_until.is_none() {
            self.run_predation();
        }

        self.maybe_storm();

        if self.tick % self.config.breeding.interval_ticks == 0 {
            self.breed();
        }

        if self.tick % self.config.timing.predator_spawn_interval == 0
            && self.safe_mode_until.is_none()
        {
            self.maybe_spawn_predator();
        }

        self.run_hatching();
        self.run_maturation();

        if self.birds.is_empty() {
            self.run_state = RunState::GameOver;
            self.events.push(self.tick, EventKind::Extinction, "The flock has died out");
        }

        self.stats.update(self.tick, &self.birds, self.predators.len());
    }

    /// Run the simulation for the given number of ticks
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.update();
        }
    }

    /// Attempt one breeding round.
    ///
    /// No-op while the cooldown is live or without an eligible pair; any
    /// actual attempt, successful or not, restarts the cooldown.
    pub fn breed(&mut self) {
        if self.breeding_cooldown > 0 {
            return;
        }

        let cfg = self.config.breeding.clone();
        let has_father = self.birds.iter().any(|b| {
            b.stage == LifeStage::Adult && b.gender == Gender::Male && b.energy > cfg.min_parent_energy
        });
        let mothers: Vec<usize> = self
            .birds
            .iter()
            .enumerate()
            .filter(|(_, b)| {
                b.stage == LifeStage::Adult
                    && b.gender == Gender::Female
                    && b.energy > cfg.min_parent_energy
            })
            .map(|(i, _)| i)
            .collect();
        if !has_father || mothers.is_empty() {
            return;
        }

        self.breeding_cooldown = cfg.cooldown_ticks;

        let success_p = sample_normal_clamped(
            &mut self.rng,
            cfg.success_mean,
            cfg.success_stddev,
            cfg.success_min,
            cfg.success_max,
        );
        if self.rng.gen::<f32>() >= success_p {
            self.events.push(
                self.tick,
                EventKind::BreedingFailure,
                "The breeding season came to nothing",
            );
            return;
        }

        let mother_idx = mothers[self.rng.gen_range(0..mothers.len())];
        let (mother_id, mx, my) = {
            let mother = &self.birds[mother_idx];
            (mother.id, mother.x, mother.y)
        };
        let clutch = sample_count(
            &mut self.rng,
            cfg.clutch_mean,
            cfg.clutch_stddev,
            cfg.clutch_min,
            cfg.clutch_max,
        );

        let modifier = self.climate_modifier();
        let (min_x, max_x) = (self.config.arena.margin, self.config.arena.width - self.config.arena.margin);
        let (min_y, max_y) = (self.config.arena.margin, self.config.arena.height - self.config.arena.margin);
        for _ in 0..clutch {
            let x = (mx + self.rng.gen_range(-cfg.egg_scatter..=cfg.egg_scatter)).clamp(min_x, max_x);
            let y = (my + self.rng.gen_range(-cfg.egg_scatter..=cfg.egg_scatter)).clamp(min_y, max_y);
            let id = self.allocate_id();
            let gender = Gender::random(&mut self.rng);
            let egg =
                Bird::egg(id, x, y, gender, Some(mother_id), &self.config.birds, modifier, &mut self.rng);
            self.birds.push(egg);
        }

        self.stats.total_born += clutch as u64;
        let mother = &mut self.birds[mother_idx];
        mother.energy = (mother.energy - cfg.mother_energy_cost).max(0.0);
        self.events.push(
            self.tick,
            EventKind::BreedingSuccess,
            format!("A clutch of {} eggs was laid", clutch),
        );
    }

    /// Clear the cooldown and breed immediately.
    pub fn force_breeding(&mut self) {
        self.breeding_cooldown = 0;
        self.breed();
    }

    /// Relocate the flock one fixed distance in a compass direction.
    ///
    /// Adults take wing toward the corresponding arena edge; the new
    /// coordinates commit after the configured in-flight delay. A migration
    /// triggered while another is pending is ignored and logged.
    pub fn trigger_migration(&mut self, direction: Direction) {
        if self.run_state == RunState::GameOver {
            return;
        }
        if self.pending_migration.is_some() {
            self.events.push(
                self.tick,
                EventKind::MigrationBlocked,
                "The flock is already on the wing",
            );
            return;
        }

        let cfg = &self.config.migration;
        let lat_delta = cfg.distance_km / cfg.km_per_degree;
        let (latitude, longitude) = match direction {
            Direction::North => (
                (self.latitude + lat_delta).clamp(cfg.latitude_min, cfg.latitude_max),
                self.longitude,
            ),
            Direction::South => (
                (self.latitude - lat_delta).clamp(cfg.latitude_min, cfg.latitude_max),
                self.longitude,
            ),
            Direction::East | Direction::West => {
                // Longitude degrees shrink with the cosine of the latitude.
                let cos = self.latitude.to_radians().cos().abs().max(0.01);
                let lon_delta = cfg.distance_km / (cfg.km_per_degree * cos);
                let signed = if direction == Direction::East { lon_delta } else { -lon_delta };
                (self.latitude, wrap_longitude(self.longitude + signed))
            }
        };

        let arena = &self.config.arena;
        let target = match direction {
            Direction::North => (arena.width / 2.0, arena.margin),
            Direction::South => (arena.width / 2.0, arena.height - arena.margin),
            Direction::East => (arena.width - arena.margin, arena.height / 2.0),
            Direction::West => (arena.margin, arena.height / 2.0),
        };

        for bird in &mut self.birds {
            if bird.stage == LifeStage::Adult {
                bird.migrating = true;
                bird.migration_target = Some(target);
            }
        }

        self.pending_migration = Some(PendingMigration {
            commit_at: Instant::now()
                + Duration::from_secs_f32(self.config.timing.migration_secs),
            latitude,
            longitude,
        });
        self.events.push(
            self.tick,
            EventKind::MigrationStarted,
            format!("The flock heads {}", direction.name()),
        );
    }

    /// Teleport every non-egg bird to its nearest cover patch and hide it
    /// for the configured window. No-op without cover.
    pub fn hide_all(&mut self) {
        if self.run_state == RunState::GameOver || self.habitat.covers.is_empty() {
            return;
        }
        let until = Instant::now() + Duration::from_secs_f32(self.config.timing.hide_secs);
        let mut hidden = 0u32;
        for bird in &mut self.birds {
            if bird.stage == LifeStage::Egg {
                continue;
            }
            if let Some(cover) = self.habitat.nearest_cover(bird.x, bird.y) {
                bird.x = cover.x;
                bird.y = cover.y;
                bird.hiding = true;
                bird.hiding_until = Some(until);
                hidden += 1;
            }
        }
        if hidden > 0 {
            self.events.push(
                self.tick,
                EventKind::Hiding,
                format!("{} birds ducked into cover", hidden),
            );
        }
    }

    /// Hide the first bird within the hit radius of a point, same semantics
    /// as `hide_all` but single-target.
    pub fn hide_at(&mut self, x: f32, y: f32) {
        if self.run_state == RunState::GameOver {
            return;
        }
        let radius = self.config.habitat.hide_hit_radius;
        let idx = match self
            .birds
            .iter()
            .position(|b| b.stage != LifeStage::Egg && b.distance_to(x, y) < radius)
        {
            Some(idx) => idx,
            None => return,
        };
        let cover = match self.habitat.nearest_cover(self.birds[idx].x, self.birds[idx].y) {
            Some(cover) => *cover,
            None => return,
        };

        let until = Instant::now() + Duration::from_secs_f32(self.config.timing.hide_secs);
        let bird = &mut self.birds[idx];
        bird.x = cover.x;
        bird.y = cover.y;
        bird.hiding = true;
        bird.hiding_until = Some(until);
        let message = format!("A {} ducked into cover", bird.stage.name());
        self.events.push(self.tick, EventKind::Hiding, message);
    }

    /// Drop one extra predator at a random edge.
    pub fn add_predator(&mut self) {
        if self.run_state == RunState::GameOver {
            return;
        }
        let predator = self.random_edge_predator();
        let message = format!("A {} joins the hunt", predator.kind.name());
        self.predators.push(predator);
        self.events.push(self.tick, EventKind::PredatorArrived, message);
    }

    /// Toggle between running and paused; returns whether the simulation is
    /// now paused. Game over is terminal and unaffected.
    pub fn toggle_pause(&mut self) -> bool {
        match self.run_state {
            RunState::Running => {
                self.run_state = RunState::Paused;
                true
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                false
            }
            RunState::GameOver => false,
        }
    }

    /// Whether the predation-free grace window is still armed.
    pub fn safe_mode_active(&self) -> bool {
        self.safe_mode_until.is_some()
    }

    /// Whether a triggered migration has not yet committed.
    pub fn migration_in_flight(&self) -> bool {
        self.pending_migration.is_some()
    }

    /// Wall-clock seconds since the last reset.
    pub fn elapsed_secs(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }

    /// Get current population count
    pub fn population(&self) -> usize {
        self.birds.len()
    }

    /// Check if the flock is extinct
    pub fn is_extinct(&self) -> bool {
        self.run_state == RunState::GameOver
    }

    /// Build the read-only per-frame view for the renderer/UI layer.
    pub fn snapshot(&self) -> WorldSnapshot {
        let zone = climate::zone_for(self.latitude);
        WorldSnapshot {
            tick: self.tick,
            elapsed_secs: self.elapsed_secs(),
            paused: self.run_state == RunState::Paused,
            game_over: self.run_state == RunState::GameOver,
            safe_mode: self.safe_mode_active(),
            score: self.stats.score,
            latitude: self.latitude,
            longitude: self.longitude,
            climate_zone: zone.name.to_string(),
            climate_modifier: zone.survival_modifier,
            breeding_cooldown: self.breeding_cooldown,
            birds: self.birds.iter().map(BirdView::from).collect(),
            predators: self.predators.iter().map(PredatorView::from).collect(),
            adults: self.stats.adults,
            juveniles: self.stats.juveniles,
            eggs: self.stats.eggs,
            energy_mean: self.stats.energy_mean,
            total_born: self.stats.total_born,
            total_died: self.stats.total_died,
            survival_rate: self.stats.survival_rate(),
            latest_event: self.events.latest().map(|e| e.message.clone()),
            recent_events: self.events.recent(10),
        }
    }

    // ------------------------------------------------------------------
    // Per-tick phases
    // ------------------------------------------------------------------

    fn climate_modifier(&self) -> f32 {
        climate::survival_modifier(self.latitude)
    }

    fn allocate_id(&mut self) -> BirdId {
        let id = self.next_bird_id;
        self.next_bird_id += 1;
        id
    }

    fn commit_migration_if_due(&mut self, now: Instant) {
        let pending = match self.pending_migration {
            Some(pending) if now >= pending.commit_at => pending,
            _ => return,
        };
        self.pending_migration = None;
        self.latitude = pending.latitude;
        self.longitude = pending.longitude;

        let modifier = self.climate_modifier();
        for bird in &mut self.birds {
            bird.refresh_survival(&mut self.rng, modifier, &self.config.birds);
        }
        self.habitat = Habitat::generate(&mut self.rng, &self.config.arena, &self.config.habitat);

        let zone = climate::zone_for(self.latitude);
        self.events.push(
            self.tick,
            EventKind::MigrationCompleted,
            format!("The flock settled in the {} zone", zone.name),
        );
    }

    fn expire_hides(&mut self, now: Instant) {
        for bird in &mut self.birds {
            if let Some(until) = bird.hiding_until {
                if now >= until {
                    bird.hiding = false;
                    bird.hiding_until = None;
                }
            }
        }
    }

    fn step_birds(&mut self) {
        let modifier = self.climate_modifier();
        // Parent positions are resolved against the start-of-tick state; a
        // handle whose parent is gone simply resolves to None.
        let positions: HashMap<BirdId, (f32, f32)> =
            self.birds.iter().map(|b| (b.id, (b.x, b.y))).collect();

        for bird in &mut self.birds {
            let parent_pos = bird.parent.and_then(|id| positions.get(&id).copied());
            bird.step(
                &mut self.rng,
                &self.config.arena,
                &self.config.birds,
                &self.config.migration,
                modifier,
                parent_pos,
            );
        }
    }

    fn step_predators(&mut self) {
        for predator in &mut self.predators {
            predator.step(&self.config.arena, &self.config.predation, &self.birds);
        }
    }

    fn run_predation(&mut self) {
        let mut caught: Vec<usize> = Vec::new();
        for (i, bird) in self.birds.iter().enumerate() {
            if bird.stage == LifeStage::Egg {
                continue;
            }
            for predator in &self.predators {
                if predator.can_catch(&mut self.rng, bird, &self.config.predation) {
                    // At most one catch per bird per tick.
                    caught.push(i);
                    break;
                }
            }
        }

        for &i in caught.iter().rev() {
            let bird = self.birds.remove(i);
            self.stats.total_died += 1;
            self.events.push(
                self.tick,
                EventKind::Death,
                format!("A {} was taken by a predator", bird.stage.name()),
            );
        }
    }

    fn maybe_storm(&mut self) {
        if self.rng.gen::<f32>() < self.config.weather.storm_probability {
            let drain = self.config.weather.storm_energy_drain;
            let floor = self.config.weather.storm_energy_floor;
            for bird in &mut self.birds {
                bird.energy = (bird.energy - drain).max(floor);
            }
            self.events.push(self.tick, EventKind::Storm, "A storm batters the flock");
        }
    }

    fn maybe_spawn_predator(&mut self) {
        let adults = self.birds.iter().filter(|b| b.stage == LifeStage::Adult).count();
        if adults <= self.config.predation.spawn_adult_threshold {
            return;
        }
        let p = (adults as f32 / self.config.predation.spawn_adult_divisor).min(1.0);
        if self.rng.gen::<f32>() < p {
            let predator = self.random_edge_predator();
            self.predators.push(predator);
            self.events.push(
                self.tick,
                EventKind::PredatorArrived,
                "Drawn by the growing flock, a predator arrives",
            );
        }
    }

    fn random_edge_predator(&mut self) -> Predator {
        let (min_x, max_x) = (self.config.arena.margin, self.config.arena.width - self.config.arena.margin);
        let (min_y, max_y) = (self.config.arena.margin, self.config.arena.height - self.config.arena.margin);
        let (x, y) = match self.rng.gen_range(0..4) {
            0 => (self.rng.gen_range(min_x..=max_x), min_y),
            1 => (self.rng.gen_range(min_x..=max_x), max_y),
            2 => (min_x, self.rng.gen_range(min_y..=max_y)),
            _ => (max_x, self.rng.gen_range(min_y..=max_y)),
        };
        let kind = PredatorKind::random(&mut self.rng);
        Predator::new(kind, x, y, &mut self.rng)
    }

    fn run_hatching(&mut self) {
        let modifier = self.climate_modifier();
        let mut hatched = 0u32;
        let mut failed = 0u32;

        let mut i = 0;
        while i < self.birds.len() {
            let due = {
                let bird = &self.birds[i];
                bird.stage == LifeStage::Egg && bird.ticks_remaining == 0
            };
            if !due {
                i += 1;
                continue;
            }
            let survives = self.rng.gen::<f32>() < self.birds[i].survival_chance;
            if survives {
                let bird = &mut self.birds[i];
                bird.hatch(&mut self.rng, modifier, &self.config.birds);
                hatched += 1;
                i += 1;
            } else {
                self.birds.remove(i);
                failed += 1;
            }
        }

        if hatched > 0 {
            self.events.push(self.tick, EventKind::Hatched, format!("{} eggs hatched", hatched));
        }
        if failed > 0 {
            self.stats.total_died += failed as u64;
            self.events.push(
                self.tick,
                EventKind::HatchFailed,
                format!("{} eggs failed to hatch", failed),
            );
        }
    }

    fn run_maturation(&mut self) {
        let modifier = self.climate_modifier();
        let mut matured = 0u32;
        let mut failed = 0u32;

        let mut i = 0;
        while i < self.birds.len() {
            let due = {
                let bird = &self.birds[i];
                bird.stage == LifeStage::Juvenile && bird.ticks_remaining == 0
            };
            if !due {
                i += 1;
                continue;
            }
            let survives = self.rng.gen::<f32>() < self.birds[i].survival_chance;
            if survives {
                let bird = &mut self.birds[i];
                bird.mature(&mut self.rng, modifier, &self.config.birds);
                matured += 1;
                i += 1;
            } else {
                self.birds.remove(i);
                failed += 1;
            }
        }

        if matured > 0 {
            self.stats.score += matured * 10;
            self.events.push(
                self.tick,
                EventKind::Matured,
                format!("{} juveniles fledged into adults", matured),
            );
        }
        if failed > 0 {
            self.stats.total_died += failed as u64;
            self.events.push(
                self.tick,
                EventKind::MaturationFailed,
                format!("{} juveniles did not make it", failed),
            );
        }
    }
}

/// Wrap a longitude into (-180, 180].
fn wrap_longitude(mut longitude: f32) -> f32 {
    while longitude > 180.0 {
        longitude -= 360.0;
    }
    while longitude <= -180.0 {
        longitude += 360.0;
    }
    longitude
}
