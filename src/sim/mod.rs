//! Deterministic drop simulation
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One fixed step per animation frame
//! - Seeded RNG only, drawn in a fixed order (release velocity, then one
//!   jitter per peg hit)
//! - Pegs checked in layout order
//! - No I/O or platform dependencies

pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, bounce_off_peg, chip_peg_collision, clamp_to_walls};
pub use layout::{Peg, PegLayout, pegs_in_row};
pub use state::{Chip, DropPhase, DropResult, PathPoint, RngState};
pub use tick::{fall_time_ms, landing_slot, random_drop, random_drop_x, run_chip, settle, simulate_drop, step};
