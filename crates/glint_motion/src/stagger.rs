//! Per-child delay offsets for staggered reveals

use serde::{Deserialize, Serialize};

/// Order in which children start
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerOrder {
    /// First to last
    #[default]
    Forward,
    /// Last to first
    Reverse,
    /// From the center outward
    FromCenter,
}

/// Stagger timing (seconds)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StaggerConfig {
    /// Delay added to every child before the per-index step
    #[serde(default)]
    pub base_delay: f32,
    /// Delay between consecutive children
    pub step: f32,
    #[serde(default)]
    pub order: StaggerOrder,
    /// Cap the step count so long lists don't trail forever
    #[serde(default)]
    pub limit: Option<usize>,
}

impl StaggerConfig {
    pub fn new(step: f32) -> Self {
        Self {
            base_delay: 0.0,
            step: step.max(0.0),
            order: StaggerOrder::Forward,
            limit: None,
        }
    }

    pub fn base_delay(mut self, seconds: f32) -> Self {
        self.base_delay = seconds.max(0.0);
        self
    }

    pub fn reverse(mut self) -> Self {
        self.order = StaggerOrder::Reverse;
        self
    }

    pub fn from_center(mut self) -> Self {
        self.order = StaggerOrder::FromCenter;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Delay for the child at `index` out of `total`
    pub fn delay_for_index(&self, index: usize, total: usize) -> f32 {
        let position = match self.order {
            StaggerOrder::Forward => index,
            StaggerOrder::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerOrder::FromCenter => index.abs_diff(total / 2),
        };
        let position = self.limit.map_or(position, |limit| position.min(limit));

        self.base_delay + self.step * position as f32
    }
}
