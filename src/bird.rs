//! Bird structure and behavior.

use crate::config::{ArenaConfig, BirdConfig, MigrationConfig};
use crate::random::{sample_count, sample_normal_clamped};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Unique bird identifier
pub type BirdId = u64;

/// Life-cycle stage of a bird
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeStage {
    Egg,
    Juvenile,
    Adult,
}

impl LifeStage {
    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            LifeStage::Egg => "egg",
            LifeStage::Juvenile => "juvenile",
            LifeStage::Adult => "adult",
        }
    }
}

/// Bird gender, relevant for breeding eligibility and lineage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Draw a gender with even odds
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        }
    }
}

/// A single bird in the simulation
#[derive(Clone, Debug)]
pub struct Bird {
    // Identity
    pub id: BirdId,
    pub stage: LifeStage,
    pub gender: Gender,
    /// Advisory handle to the adult that produced this bird; looked up by id
    /// each use and tolerated dangling. Cleared on maturation.
    pub parent: Option<BirdId>,

    // Physical state
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub facing_left: bool,

    // Life cycle
    /// Stage countdown; the transition resolves once this reaches zero
    pub ticks_remaining: u32,
    pub energy: f32,

    // Genetics, fixed at creation
    pub base_egg_survival: f32,
    pub base_juvenile_survival: f32,

    /// Cached survival probability for the current stage transition
    pub survival_chance: f32,

    // Player-driven state
    pub hiding: bool,
    pub hiding_until: Option<Instant>,
    pub migrating: bool,
    pub migration_target: Option<(f32, f32)>,
}

impl Bird {
    /// Create an egg near its mother.
    ///
    /// Samples the hatch countdown and the genetic egg-survival factor; the
    /// juvenile-survival factor is pre-drawn for the later stage as well.
    pub fn egg<R: Rng + ?Sized>(
        id: BirdId,
        x: f32,
        y: f32,
        gender: Gender,
        parent: Option<BirdId>,
        cfg: &BirdConfig,
        climate_modifier: f32,
        rng: &mut R,
    ) -> Self {
        let ticks = sample_count(
            rng,
            cfg.hatch_ticks_mean,
            cfg.hatch_ticks_stddev,
            cfg.hatch_ticks_min,
            cfg.hatch_ticks_max,
        );
        let base_egg = sample_normal_clamped(
            rng,
            cfg.egg_survival_mean,
            cfg.egg_survival_stddev,
            cfg.base_survival_min,
            cfg.base_survival_max,
        );
        Self::with_stage(id, LifeStage::Egg, ticks, x, y, gender, parent, base_egg, cfg, climate_modifier, rng)
    }

    /// Create a juvenile directly (normally reached by hatching an egg).
    pub fn juvenile<R: Rng + ?Sized>(
        id: BirdId,
        x: f32,
        y: f32,
        gender: Gender,
        parent: Option<BirdId>,
        cfg: &BirdConfig,
        climate_modifier: f32,
        rng: &mut R,
    ) -> Self {
        let ticks = sample_count(
            rng,
            cfg.mature_ticks_mean,
            cfg.mature_ticks_stddev,
            cfg.mature_ticks_min,
            cfg.mature_ticks_max,
        );
        Self::with_stage(id, LifeStage::Juvenile, ticks, x, y, gender, parent, 1.0, cfg, climate_modifier, rng)
    }

    /// Create a full adult, e.g. a founder.
    pub fn adult<R: Rng + ?Sized>(
        id: BirdId,
        x: f32,
        y: f32,
        gender: Gender,
        cfg: &BirdConfig,
        climate_modifier: f32,
        rng: &mut R,
    ) -> Self {
        Self::with_stage(id, LifeStage::Adult, 0, x, y, gender, None, 1.0, cfg, climate_modifier, rng)
    }

    #[allow(clippy::too_many_arguments)]
    fn with_stage<R: Rng + ?Sized>(
        id: BirdId,
        stage: LifeStage,
        ticks_remaining: u32,
        x: f32,
        y: f32,
        gender: Gender,
        parent: Option<BirdId>,
        base_egg_survival: f32,
        cfg: &BirdConfig,
        climate_modifier: f32,
        rng: &mut R,
    ) -> Self {
        // The juvenile factor is drawn for every bird regardless of its
        // current stage; it only starts mattering after hatching.
        let base_juvenile_survival = sample_normal_clamped(
            rng,
            cfg.juvenile_survival_mean,
            cfg.juvenile_survival_stddev,
            cfg.base_survival_min,
            cfg.base_survival_max,
        );

        let mut bird = Self {
            id,
            stage,
            gender,
            parent,
            x,
            y,
            vx: rng.gen_range(-1.0..=1.0),
            vy: rng.gen_range(-1.0..=1.0),
            facing_left: false,
            ticks_remaining,
            energy: cfg.max_energy,
            base_egg_survival,
            base_juvenile_survival,
            survival_chance: 0.0,
            hiding: false,
            hiding_until: None,
            migrating: false,
            migration_target: None,
        };
        bird.refresh_survival(rng, climate_modifier, cfg);
        bird
    }

    /// Genetic survival factor for the current stage transition.
    ///
    /// Adults carry no transition risk and contribute a neutral factor.
    pub fn base_survival_factor(&self) -> f32 {
        match self.stage {
            LifeStage::Egg => self.base_egg_survival,
            LifeStage::Juvenile => self.base_juvenile_survival,
            LifeStage::Adult => 1.0,
        }
    }

    /// Recompute the cached survival chance.
    ///
    /// Product of the genetic factor for the current stage, the energy
    /// fraction, the climate modifier and a small uniform jitter, clamped to
    /// [0, 1]. Callers without a simulation context pass a modifier of 1.0.
    pub fn refresh_survival<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        climate_modifier: f32,
        cfg: &BirdConfig,
    ) {
        let jitter = rng.gen_range(1.0 - cfg.survival_jitter..=1.0 + cfg.survival_jitter);
        self.survival_chance = (self.base_survival_factor()
            * (self.energy / cfg.max_energy)
            * climate_modifier
            * jitter)
            .clamp(0.0, 1.0);
    }

    /// Transition a hatched egg into a juvenile with a fresh countdown.
    pub fn hatch<R: Rng + ?Sized>(&mut self, rng: &mut R, climate_modifier: f32, cfg: &BirdConfig) {
        self.stage = LifeStage::Juvenile;
        self.ticks_remaining = sample_count(
            rng,
            cfg.mature_ticks_mean,
            cfg.mature_ticks_stddev,
            cfg.mature_ticks_min,
            cfg.mature_ticks_max,
        );
        self.refresh_survival(rng, climate_modifier, cfg);
    }

    /// Transition a matured juvenile into an adult.
    pub fn mature<R: Rng + ?Sized>(&mut self, rng: &mut R, climate_modifier: f32, cfg: &BirdConfig) {
        self.stage = LifeStage::Adult;
        self.ticks_remaining = 0;
        self.parent = None;
        self.refresh_survival(rng, climate_modifier, cfg);
    }

    /// Euclidean distance to a point.
    pub fn distance_to(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Advance one tick of movement and energy.
    ///
    /// Eggs never move. Juveniles steer toward a live parent; a dangling
    /// parent handle (resolved by the caller to `None`) degrades to plain
    /// wandering. A migrating bird flies toward its target instead.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        arena: &ArenaConfig,
        cfg: &BirdConfig,
        migration: &MigrationConfig,
        climate_modifier: f32,
        parent_pos: Option<(f32, f32)>,
    ) {
        if self.stage == LifeStage::Egg {
            return;
        }

        if self.migrating {
            self.step_migration(rng, cfg, migration);
        } else {
            if self.energy < cfg.max_energy {
                self.energy = (self.energy + cfg.energy_regen).min(cfg.max_energy);
            }
            match (self.stage, parent_pos) {
                (LifeStage::Juvenile, Some((px, py))) => {
                    self.vx = (px - self.x) / cfg.follow_damping
                        + rng.gen_range(-cfg.steering_noise..=cfg.steering_noise);
                    self.vy = (py - self.y) / cfg.follow_damping
                        + rng.gen_range(-cfg.steering_noise..=cfg.steering_noise);
                }
                _ => self.wander(rng, cfg),
            }
        }

        let max_speed = match self.stage {
            LifeStage::Egg => return,
            LifeStage::Juvenile => cfg.juvenile_max_speed,
            LifeStage::Adult => cfg.adult_max_speed,
        };
        let speed = (self.vx * self.vx + self.vy * self.vy).sqrt();
        if speed > max_speed {
            self.vx = self.vx / speed * max_speed;
            self.vy = self.vy / speed * max_speed;
        }

        self.x += self.vx;
        self.y += self.vy;

        let (min_x, max_x) = (arena.margin, arena.width - arena.margin);
        let (min_y, max_y) = (arena.margin, arena.height - arena.margin);
        if self.x < min_x || self.x > max_x {
            self.vx = -self.vx;
        }
        if self.y < min_y || self.y > max_y {
            self.vy = -self.vy;
        }
        self.x = self.x.clamp(min_x, max_x);
        self.y = self.y.clamp(min_y, max_y);

        // Deadband keeps the sprite from flickering at near-zero speeds.
        if self.vx < -cfg.facing_deadband {
            self.facing_left = true;
        } else if self.vx > cfg.facing_deadband {
            self.facing_left = false;
        }

        if rng.gen::<f32>() < cfg.survival_refresh_chance {
            self.refresh_survival(rng, climate_modifier, cfg);
        }
    }

    fn step_migration<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        cfg: &BirdConfig,
        migration: &MigrationConfig,
    ) {
        let (tx, ty) = match self.migration_target {
            Some(target) => target,
            None => {
                self.migrating = false;
                return;
            }
        };

        let dx = tx - self.x;
        let dy = ty - self.y;
        let dist = (dx * dx + dy * dy).sqrt();

        if dist <= migration.arrival_radius {
            self.migrating = false;
            self.migration_target = None;
            self.energy = (self.energy + migration.arrival_energy_bonus).min(cfg.max_energy);
            return;
        }

        let weather =
            rng.gen_range(1.0 - migration.weather_variance..=1.0 + migration.weather_variance);
        let speed = cfg.adult_max_speed * weather;
        self.vx = dx / dist * speed + rng.gen_range(-cfg.steering_noise..=cfg.steering_noise);
        self.vy = dy / dist * speed + rng.gen_range(-cfg.steering_noise..=cfg.steering_noise);

        self.energy -= migration.energy_drain;
        if self.energy <= 0.0 || rng.gen::<f32>() > migration.success_rate {
            self.migrating = false;
            self.migration_target = None;
            self.energy = self.energy.max(migration.abort_energy_floor);
        }
    }

    fn wander<R: Rng + ?Sized>(&mut self, rng: &mut R, cfg: &BirdConfig) {
        if rng.gen::<f32>() < cfg.wander_impulse_chance {
            self.vx += rng.gen_range(-cfg.wander_impulse..=cfg.wander_impulse);
            self.vy += rng.gen_range(-cfg.wander_impulse..=cfg.wander_impulse);
        }
    }
}
