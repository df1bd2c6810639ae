//! Plinko Sim - deterministic Plinko drop simulator
//!
//! Core modules:
//! - `sim`: Deterministic drop simulation (peg layout, chip physics, landing)
//! - `settings`: Board geometry and physics tuning
//! - `ledger`: Stored game results and their statistics
//! - `seeder`: Batch generation of backdated historical games
//! - `web`: Browser bindings (wasm32 only)

pub mod error;
pub mod ledger;
pub mod seeder;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{LedgerError, SettingsError, SimError};
pub use ledger::{GameLedger, GameRecord, GameSubmission, Statistics};
pub use settings::{BoardSettings, FrameLimitPolicy};

/// Board configuration constants (defaults for [`BoardSettings`])
pub mod consts {
    /// Peg rows in the drop field
    pub const ROWS: u32 = 12;
    /// Landing slots (and pegs in an even row)
    pub const COLUMNS: u32 = 9;

    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f64 = 600.0;
    pub const CANVAS_HEIGHT: f64 = 700.0;

    pub const PEG_RADIUS: f64 = 5.0;
    pub const CHIP_RADIUS: f64 = 10.0;

    /// Vertical position the chip is released from
    pub const DROP_HEIGHT: f64 = 40.0;
    /// Y of the first peg row
    pub const PEG_TOP: f64 = 100.0;
    /// Height reserved above and below the peg field when spacing rows
    pub const PLAYFIELD_MARGIN: f64 = 150.0;
    /// Distance from the canvas bottom at which the chip has settled
    pub const SETTLE_MARGIN: f64 = 100.0;

    /// Downward acceleration per frame (pixels/frame²)
    pub const GRAVITY: f64 = 0.6;
    /// Velocity retained after a peg or wall bounce
    pub const BOUNCE: f64 = 0.6;
    /// Scale of the random horizontal kick on a peg bounce
    pub const HORIZONTAL_BOUNCE: f64 = 0.8;
    /// Spread of the initial horizontal velocity (centered on zero)
    pub const LAUNCH_SPREAD: f64 = 3.0;

    /// Slot prizes, left to right
    pub const SLOT_PRIZES: [u32; COLUMNS as usize] = [100, 500, 1000, 0, 10000, 0, 1000, 500, 100];

    /// Simulated frame rate used to turn frame counts into fall time
    pub const FRAMES_PER_SECOND: f64 = 60.0;
    /// Frames after which a chip that has not settled is considered stuck
    pub const MAX_FRAMES: u32 = 10_000;
}

/// Round to two decimal places (the precision results are stored at)
#[inline]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.345_6), 12.35);
        assert_eq!(round_cents(-0.004), -0.0);
        assert_eq!(round_cents(300.0), 300.0);
    }

    #[test]
    fn test_prize_table_matches_columns() {
        assert_eq!(consts::SLOT_PRIZES.len(), consts::COLUMNS as usize);
    }
}
