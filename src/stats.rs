//! Population statistics tracking.

use crate::bird::{Bird, LifeStage};
use serde::{Deserialize, Serialize};

/// Aggregate counters and per-tick population summary
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current simulation tick
    pub tick: u64,
    /// Score earned from matured birds
    pub score: u32,
    /// Birds created by breeding since the last reset
    pub total_born: u64,
    /// Birds lost to predation or failed stage transitions
    pub total_died: u64,
    /// Current counts by stage
    pub adults: usize,
    pub juveniles: usize,
    pub eggs: usize,
    /// Predators currently in the arena
    pub predators: usize,
    /// Mean energy across the population (0 when empty)
    pub energy_mean: f32,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the per-tick summary from current simulation state.
    pub fn update(&mut self, tick: u64, birds: &[Bird], predator_count: usize) {
        self.tick = tick;
        self.adults = birds.iter().filter(|b| b.stage == LifeStage::Adult).count();
        self.juveniles = birds.iter().filter(|b| b.stage == LifeStage::Juvenile).count();
        self.eggs = birds.iter().filter(|b| b.stage == LifeStage::Egg).count();
        self.predators = predator_count;
        self.energy_mean = if birds.is_empty() {
            0.0
        } else {
            birds.iter().map(|b| b.energy).sum::<f32>() / birds.len() as f32
        };
    }

    /// Total living population.
    pub fn population(&self) -> usize {
        self.adults + self.juveniles + self.eggs
    }

    /// Fraction of bred birds still alive: `(born - died) / born`.
    ///
    /// Reported as 0 before anything has been born.
    pub fn survival_rate(&self) -> f32 {
        if self.total_born == 0 {
            0.0
        } else {
            (self.total_born as f32 - self.total_died as f32) / self.total_born as f32
        }
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Pop:{:3} (A:{} J:{} E:{}) | Pred:{:2} | Score:{:4} | Energy:{:3.0} | Born:{} Died:{}",
            self.tick,
            self.population(),
            self.adults,
            self.juveniles,
            self.eggs,
            self.predators,
            self.score,
            self.energy_mean,
            self.total_born,
            self.total_died,
        )
    }
}
