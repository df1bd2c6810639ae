//! Chip/peg collision detection and response
//!
//! Pegs are resolved one at a time in layout order. A chip overlapping two
//! pegs in the same frame gets two independent bounces and two position
//! corrections, which can compound.

use glam::DVec2;

use super::layout::Peg;
use super::state::Chip;

/// Result of a chip/peg overlap check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the chip overlaps the peg
    pub hit: bool,
    /// Direction from peg center to chip center (radians)
    pub angle: f64,
    /// Center-to-center distance
    pub distance: f64,
    /// Overlap depth (for position correction)
    pub penetration: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            angle: 0.0,
            distance: 0.0,
            penetration: 0.0,
        }
    }

    /// Unit vector pointing from the peg to the chip
    #[inline]
    pub fn normal(&self) -> DVec2 {
        DVec2::new(self.angle.cos(), self.angle.sin())
    }
}

/// Check a chip against one peg
pub fn chip_peg_collision(chip_pos: DVec2, chip_radius: f64, peg: &Peg, peg_radius: f64) -> CollisionResult {
    let offset = chip_pos - peg.pos();
    let distance = offset.length();
    let reach = chip_radius + peg_radius;

    if distance < reach {
        CollisionResult {
            hit: true,
            angle: offset.y.atan2(offset.x),
            distance,
            penetration: reach - distance,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Bounce the chip off a peg it overlaps
///
/// The outgoing velocity points along the collision normal with the
/// pre-collision speed scaled by `bounce`, plus a sideways kick of
/// `(jitter - 0.5) * horizontal_bounce` where `jitter` is uniform in [0, 1).
/// The chip is then pushed out of the peg by the overlap depth.
pub fn bounce_off_peg(chip: &mut Chip, hit: &CollisionResult, bounce: f64, horizontal_bounce: f64, jitter: f64) {
    let speed = chip.speed();
    let normal = hit.normal();

    chip.vel = DVec2::new(
        normal.x * speed * bounce + (jitter - 0.5) * horizontal_bounce,
        normal.y * speed * bounce,
    );
    chip.pos += normal * hit.penetration;
    chip.peg_collisions += 1;
}

/// Keep the chip inside the side walls
///
/// Returns true if either wall was hit.
pub fn clamp_to_walls(chip: &mut Chip, canvas_width: f64, bounce: f64) -> bool {
    let mut hit = false;

    if chip.pos.x - chip.radius < 0.0 {
        chip.pos.x = chip.radius;
        chip.vel.x = -chip.vel.x * bounce;
        hit = true;
    }
    if chip.pos.x + chip.radius > canvas_width {
        chip.pos.x = canvas_width - chip.radius;
        chip.vel.x = -chip.vel.x * bounce;
        hit = true;
    }

    hit
}
