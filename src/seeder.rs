//! Batch seeding of historical games
//!
//! Fills a ledger with simulated drops from random positions, each stamped
//! with a random time in the last thirty days so the leaderboards look lived
//! in.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::error::SimError;
use crate::ledger::GameLedger;
use crate::settings::BoardSettings;
use crate::sim::{PegLayout, random_drop};

/// Oldest backdate, in minutes (30 days)
pub const SEED_WINDOW_MINUTES: i64 = 60 * 24 * 30;

/// Simulate `count` guest games and store them in `ledger`
///
/// Returns the number of games written. Stops at the first drop that fails
/// to settle; games stored before it are kept.
pub fn seed_games<R: Rng + ?Sized>(
    ledger: &mut GameLedger,
    layout: &PegLayout,
    settings: &BoardSettings,
    count: usize,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<usize, SimError> {
    settings.validate()?;

    for written in 0..count {
        let result = random_drop(layout, settings, rng).inspect_err(|e| {
            log::error!("Seeding stopped after {} games: {}", written, e);
        })?;
        let minutes_ago = rng.random_range(1..=SEED_WINDOW_MINUTES);
        ledger.record_drop(&result, None, now - Duration::minutes(minutes_ago));
    }

    log::info!("Seeded {} games", count);
    Ok(count)
}
