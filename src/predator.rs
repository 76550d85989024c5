//! Predator pursuit and catch mechanics.

use crate::bird::{Bird, LifeStage};
use crate::config::{ArenaConfig, PredationConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Hunting style; cosmetic only, the mechanics are identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredatorKind {
    Ground,
    Aerial,
}

impl PredatorKind {
    /// Draw a kind with even odds
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            PredatorKind::Ground
        } else {
            PredatorKind::Aerial
        }
    }

    /// Get display name
    pub fn name(&self) -> &'static str {
        match self {
            PredatorKind::Ground => "ground hunter",
            PredatorKind::Aerial => "aerial hunter",
        }
    }
}

/// A predator roaming the arena
#[derive(Clone, Debug)]
pub struct Predator {
    pub kind: PredatorKind,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

impl Predator {
    /// Create a predator with a random drift velocity.
    pub fn new<R: Rng + ?Sized>(kind: PredatorKind, x: f32, y: f32, rng: &mut R) -> Self {
        Self {
            kind,
            x,
            y,
            vx: rng.gen_range(-2.5..=2.5),
            vy: rng.gen_range(-2.5..=2.5),
        }
    }

    /// Euclidean distance to a bird.
    pub fn distance_to(&self, bird: &Bird) -> f32 {
        let dx = self.x - bird.x;
        let dy = self.y - bird.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Nearest bird that can be hunted: not hiding, not an egg.
    ///
    /// Strict minimum distance; ties go to the first bird encountered.
    /// Returns `None` over an empty or fully hidden population.
    pub fn nearest_target<'a>(&self, birds: &'a [Bird]) -> Option<&'a Bird> {
        let mut nearest: Option<&Bird> = None;
        let mut min_dist = f32::INFINITY;
        for bird in birds {
            if bird.stage == LifeStage::Egg || bird.hiding {
                continue;
            }
            let dist = self.distance_to(bird);
            if dist < min_dist {
                min_dist = dist;
                nearest = Some(bird);
            }
        }
        nearest
    }

    /// Advance one tick: accelerate toward prey in range, then integrate and
    /// bounce at the arena bounds.
    pub fn step(&mut self, arena: &ArenaConfig, cfg: &PredationConfig, birds: &[Bird]) {
        if let Some(target) = self.nearest_target(birds) {
            if self.distance_to(target) < cfg.pursuit_radius {
                self.vx += (target.x - self.x) / cfg.pursuit_damping;
                self.vy += (target.y - self.y) / cfg.pursuit_damping;
            }
        }

        let speed = (self.vx * self.vx + self.vy * self.vy).sqrt();
        if speed > cfg.max_speed {
            self.vx = self.vx / speed * cfg.max_speed;
            self.vy = self.vy / speed * cfg.max_speed;
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
    }

    /// One independent catch trial against a bird.
    ///
    /// Requires point-blank range and a visible bird; succeeds with
    /// probability `catch_probability_base * (1 - survival_chance)`, so a
    /// fully fit bird is never caught even in range.
    pub fn can_catch<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bird: &Bird,
        cfg: &PredationConfig,
    ) -> bool {
        if bird.hiding || self.distance_to(bird) >= cfg.catch_radius {
            return false;
        }
        let p = cfg.catch_probability_base * (1.0 - bird.survival_chance);
        rng.gen::<f32>() < p
    }
}
