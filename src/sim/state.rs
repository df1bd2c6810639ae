//! Drop state and result types

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::BoardSettings;

/// Phase of a drop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropPhase {
    /// Chip is above the settle threshold
    Falling,
    /// Chip has crossed the settle threshold; no further frames run
    Settled,
}

/// One path sample (chip center at the start of a frame)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl From<DVec2> for PathPoint {
    fn from(pos: DVec2) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

/// The falling chip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chip {
    pub pos: DVec2,
    pub vel: DVec2,
    pub radius: f64,
    /// Horizontal position the chip was released from
    pub drop_x: f64,
    pub peg_collisions: u32,
    /// Frames simulated so far
    pub frames: u32,
    pub phase: DropPhase,
    /// Position history, one sample per frame
    pub path: Vec<PathPoint>,
}

impl Chip {
    /// Chip at the drop height with a given horizontal velocity
    pub fn new(drop_x: f64, initial_vx: f64, settings: &BoardSettings) -> Self {
        let pos = DVec2::new(drop_x, settings.drop_height);
        let phase = if pos.y < settings.settle_threshold() {
            DropPhase::Falling
        } else {
            DropPhase::Settled
        };

        Self {
            pos,
            vel: DVec2::new(initial_vx, 0.0),
            radius: settings.chip_radius,
            drop_x,
            peg_collisions: 0,
            frames: 0,
            phase,
            path: Vec::new(),
        }
    }

    /// Chip with the small random sideways velocity of a hand release
    pub fn launch<R: Rng + ?Sized>(drop_x: f64, settings: &BoardSettings, rng: &mut R) -> Self {
        let vx = (rng.random::<f64>() - 0.5) * settings.launch_spread;
        Self::new(drop_x, vx, settings)
    }

    /// Append the current position to the path
    #[inline]
    pub fn record_path(&mut self) {
        self.path.push(self.pos.into());
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// Outcome of a settled drop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropResult {
    pub score: u32,
    pub final_slot: u32,
    pub drop_x: f64,
    pub final_x: f64,
    pub horizontal_distance: f64,
    pub fall_time_ms: u32,
    pub peg_collisions: u32,
    pub frames: u32,
    pub path: Vec<PathPoint>,
}

/// Seed for a reproducible drop sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Independent sequence for the same seed
    pub fn with_stream(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        if self.stream == 0 {
            Pcg32::seed_from_u64(self.seed)
        } else {
            Pcg32::new(self.seed, self.stream)
        }
    }
}
