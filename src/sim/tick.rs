//! Frame-by-frame drop simulation
//!
//! One call to [`step`] is one animation frame. [`run_chip`] steps until the
//! chip crosses the settle threshold and turns the final state into a
//! [`DropResult`].

use rand::Rng;

use super::collision::{bounce_off_peg, chip_peg_collision, clamp_to_walls};
use super::layout::PegLayout;
use super::state::{Chip, DropPhase, DropResult};
use crate::consts::FRAMES_PER_SECOND;
use crate::error::SimError;
use crate::settings::{BoardSettings, FrameLimitPolicy};

/// Advance the chip by one frame
///
/// Draws one jitter value from `rng` per peg collision.
pub fn step<R: Rng + ?Sized>(
    chip: &mut Chip,
    layout: &PegLayout,
    settings: &BoardSettings,
    rng: &mut R,
) -> DropPhase {
    if chip.pos.y >= settings.settle_threshold() {
        chip.phase = DropPhase::Settled;
        return chip.phase;
    }

    chip.frames += 1;
    chip.record_path();

    chip.vel.y += settings.gravity;
    chip.pos += chip.vel;

    for peg in layout.pegs() {
        let hit = chip_peg_collision(chip.pos, chip.radius, peg, settings.peg_radius);
        if hit.hit {
            let jitter = rng.random::<f64>();
            bounce_off_peg(chip, &hit, settings.bounce, settings.horizontal_bounce, jitter);
            log::trace!(
                "frame {}: peg ({:.1}, {:.1}) hit, penetration {:.3}",
                chip.frames,
                peg.x,
                peg.y,
                hit.penetration
            );
        }
    }

    clamp_to_walls(chip, settings.canvas_width, settings.bounce);

    if chip.pos.y >= settings.settle_threshold() {
        chip.phase = DropPhase::Settled;
    }
    chip.phase
}

/// Run a chip until it settles and score the landing
pub fn run_chip<R: Rng + ?Sized>(
    mut chip: Chip,
    layout: &PegLayout,
    settings: &BoardSettings,
    rng: &mut R,
) -> Result<DropResult, SimError> {
    while chip.phase == DropPhase::Falling {
        if chip.frames >= settings.max_frames {
            match settings.frame_limit {
                FrameLimitPolicy::Fail => {
                    return Err(SimError::MaxFramesExceeded {
                        frames: chip.frames,
                        y: chip.pos.y,
                    });
                }
                FrameLimitPolicy::Settle => {
                    log::warn!(
                        "Chip still falling after {} frames at ({:.2}, {:.2}), settling in place",
                        chip.frames,
                        chip.pos.x,
                        chip.pos.y
                    );
                    chip.phase = DropPhase::Settled;
                    break;
                }
            }
        }
        step(&mut chip, layout, settings, rng);
    }

    Ok(settle(chip, settings))
}

/// Drop a chip from `drop_x` with a random release velocity
pub fn simulate_drop<R: Rng + ?Sized>(
    layout: &PegLayout,
    settings: &BoardSettings,
    drop_x: f64,
    rng: &mut R,
) -> Result<DropResult, SimError> {
    let chip = Chip::launch(drop_x, settings, rng);
    run_chip(chip, layout, settings, rng)
}

/// Drop a chip from a random whole-pixel position that keeps it on the canvas
pub fn random_drop<R: Rng + ?Sized>(
    layout: &PegLayout,
    settings: &BoardSettings,
    rng: &mut R,
) -> Result<DropResult, SimError> {
    let drop_x = random_drop_x(settings, rng);
    simulate_drop(layout, settings, drop_x, rng)
}

/// Whole-pixel drop position in `[chip_radius, canvas_width - chip_radius]`
pub fn random_drop_x<R: Rng + ?Sized>(settings: &BoardSettings, rng: &mut R) -> f64 {
    let low = settings.chip_radius.ceil() as i64;
    let high = (settings.canvas_width - settings.chip_radius).floor() as i64;
    if high < low {
        return settings.canvas_width / 2.0;
    }
    rng.random_range(low..=high) as f64
}

/// Landing slot for a horizontal position, clamped to the board
pub fn landing_slot(x: f64, settings: &BoardSettings) -> u32 {
    let last = settings.columns.saturating_sub(1);
    // NaN.max(0.0) is 0.0, and the float-to-int cast saturates
    let raw = (x / settings.slot_width()).floor().max(0.0) as u64;
    raw.min(last as u64) as u32
}

/// Simulated fall time for a frame count at the fixed frame rate
#[inline]
pub fn fall_time_ms(frames: u32) -> u32 {
    (frames as f64 * 1000.0 / FRAMES_PER_SECOND).round() as u32
}

/// Score a settled chip
pub fn settle(chip: Chip, settings: &BoardSettings) -> DropResult {
    let final_x = chip.pos.x;
    let final_slot = landing_slot(final_x, settings);
    let score = settings.prize_for_slot(final_slot);

    log::debug!(
        "Chip dropped at {:.1} settled at {:.2} in slot {} ({} pts, {} pegs, {} frames)",
        chip.drop_x,
        final_x,
        final_slot,
        score,
        chip.peg_collisions,
        chip.frames
    );

    DropResult {
        score,
        final_slot,
        drop_x: chip.drop_x,
        final_x,
        horizontal_distance: (final_x - chip.drop_x).abs(),
        fall_time_ms: fall_time_ms(chip.frames),
        peg_collisions: chip.peg_collisions,
        frames: chip.frames,
        path: chip.path,
    }
}
