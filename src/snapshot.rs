//! Read-only per-frame view of the simulation for the renderer/UI layer.

use crate::bird::{Bird, BirdId, LifeStage};
use crate::events::Event;
use crate::predator::{Predator, PredatorKind};
use serde::{Deserialize, Serialize};

/// What the renderer needs to draw one bird
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BirdView {
    pub id: BirdId,
    pub stage: LifeStage,
    pub x: f32,
    pub y: f32,
    pub facing_left: bool,
    pub hiding: bool,
    pub migrating: bool,
}

impl From<&Bird> for BirdView {
    fn from(bird: &Bird) -> Self {
        Self {
            id: bird.id,
            stage: bird.stage,
            x: bird.x,
            y: bird.y,
            facing_left: bird.facing_left,
            hiding: bird.hiding,
            migrating: bird.migrating,
        }
    }
}

/// What the renderer needs to draw one predator
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PredatorView {
    pub kind: PredatorKind,
    pub x: f32,
    pub y: f32,
}

impl From<&Predator> for PredatorView {
    fn from(predator: &Predator) -> Self {
        Self {
            kind: predator.kind,
            x: predator.x,
            y: predator.y,
        }
    }
}

/// Complete per-frame state published to external collaborators
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub elapsed_secs: f64,
    pub paused: bool,
    pub game_over: bool,
    pub safe_mode: bool,
    pub score: u32,

    pub latitude: f32,
    pub longitude: f32,
    pub climate_zone: String,
    pub climate_modifier: f32,

    pub breeding_cooldown: u32,

    pub birds: Vec<BirdView>,
    pub predators: Vec<PredatorView>,
    pub adults: usize,
    pub juveniles: usize,
    pub eggs: usize,
    pub energy_mean: f32,

    pub total_born: u64,
    pub total_died: u64,
    pub survival_rate: f32,

    /// Latest log line, if any
    pub latest_event: Option<String>,
    /// Most recent retained events, oldest first
    pub recent_events: Vec<Event>,
}

impl WorldSnapshot {
    /// Total living population in this frame.
    pub fn population(&self) -> usize {
        self.birds.len()
    }
}
