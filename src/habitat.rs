//! Static habitat features: ponds and cover patches.
//!
//! Features are regenerated at randomized positions and counts whenever a
//! migration commits, so each new territory has its own layout.

use crate::config::{ArenaConfig, HabitatConfig};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An elliptical pond
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Pond {
    pub x: f32,
    pub y: f32,
    pub rx: f32,
    pub ry: f32,
}

/// A circular cover patch birds can hide in
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Cover {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl Cover {
    /// Whether a point lies inside the patch.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.x;
        let dy = y - self.y;
        (dx * dx + dy * dy).sqrt() <= self.radius
    }
}

/// The set of features in the current territory
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Habitat {
    pub ponds: Vec<Pond>,
    pub covers: Vec<Cover>,
}

impl Habitat {
    /// Generate a fresh layout within the arena margins.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, arena: &ArenaConfig, cfg: &HabitatConfig) -> Self {
        let (min_x, max_x) = (arena.margin, arena.width - arena.margin);
        let (min_y, max_y) = (arena.margin, arena.height - arena.margin);

        let pond_count = rng.gen_range(cfg.pond_count_min..=cfg.pond_count_max);
        let ponds = (0..pond_count)
            .map(|_| Pond {
                x: rng.gen_range(min_x..=max_x),
                y: rng.gen_range(min_y..=max_y),
                rx: rng.gen_range(cfg.pond_rx_min..=cfg.pond_rx_max),
                ry: rng.gen_range(cfg.pond_ry_min..=cfg.pond_ry_max),
            })
            .collect();

        let cover_count = rng.gen_range(cfg.cover_count_min..=cfg.cover_count_max);
        let covers = (0..cover_count)
            .map(|_| Cover {
                x: rng.gen_range(min_x..=max_x),
                y: rng.gen_range(min_y..=max_y),
                radius: rng.gen_range(cfg.cover_radius_min..=cfg.cover_radius_max),
            })
            .collect();

        Self { ponds, covers }
    }

    /// Nearest cover patch to a point, `None` when there are no patches.
    pub fn nearest_cover(&self, x: f32, y: f32) -> Option<&Cover> {
        let mut nearest: Option<&Cover> = None;
        let mut min_dist = f32::INFINITY;
        for cover in &self.covers {
            let dx = cover.x - x;
            let dy = cover.y - y;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < min_dist {
                min_dist = dist;
                nearest = Some(cover);
            }
        }
        nearest
    }
}
