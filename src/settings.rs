//! Board settings
//!
//! Geometry, physics tuning and the prize table for a Plinko board.
//! Loaded from a JSON file; any missing key falls back to the defaults in
//! [`crate::consts`].

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SettingsError, SimError};

/// What to do when a chip is still falling after `max_frames`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrameLimitPolicy {
    /// Abort the drop with [`SimError::MaxFramesExceeded`]
    #[default]
    Fail,
    /// Settle the chip where it is and log a warning
    Settle,
}

impl FrameLimitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameLimitPolicy::Fail => "fail",
            FrameLimitPolicy::Settle => "settle",
        }
    }
}

impl FromStr for FrameLimitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" | "error" => Ok(FrameLimitPolicy::Fail),
            "settle" | "cap" => Ok(FrameLimitPolicy::Settle),
            _ => Err(format!("unknown frame limit policy '{s}' (expected fail or settle)")),
        }
    }
}

/// Board geometry and physics constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    // === Geometry ===
    pub rows: u32,
    pub columns: u32,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub peg_radius: f64,
    pub chip_radius: f64,
    pub drop_height: f64,
    pub peg_top: f64,
    pub playfield_margin: f64,
    pub settle_margin: f64,

    // === Physics ===
    pub gravity: f64,
    pub bounce: f64,
    pub horizontal_bounce: f64,
    pub launch_spread: f64,

    // === Scoring ===
    /// Prize for each landing slot, left to right
    pub slot_prizes: Vec<u32>,

    // === Frame limit ===
    pub max_frames: u32,
    pub frame_limit: FrameLimitPolicy,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            rows: ROWS,
            columns: COLUMNS,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            peg_radius: PEG_RADIUS,
            chip_radius: CHIP_RADIUS,
            drop_height: DROP_HEIGHT,
            peg_top: PEG_TOP,
            playfield_margin: PLAYFIELD_MARGIN,
            settle_margin: SETTLE_MARGIN,

            gravity: GRAVITY,
            bounce: BOUNCE,
            horizontal_bounce: HORIZONTAL_BOUNCE,
            launch_spread: LAUNCH_SPREAD,

            slot_prizes: SLOT_PRIZES.to_vec(),

            max_frames: MAX_FRAMES,
            frame_limit: FrameLimitPolicy::Fail,
        }
    }
}

impl BoardSettings {
    /// Y position at which a falling chip is considered landed
    #[inline]
    pub fn settle_threshold(&self) -> f64 {
        self.canvas_height - self.settle_margin
    }

    /// Width of one landing slot
    #[inline]
    pub fn slot_width(&self) -> f64 {
        self.canvas_width / self.columns as f64
    }

    /// Prize for a landing slot (0 for a slot the table doesn't cover)
    pub fn prize_for_slot(&self, slot: u32) -> u32 {
        self.slot_prizes.get(slot as usize).copied().unwrap_or(0)
    }

    /// Whether `score` is one of the prizes on this board
    pub fn is_prize(&self, score: u32) -> bool {
        self.slot_prizes.contains(&score)
    }

    /// Reject geometry that cannot produce a playable board
    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |reason: String| -> Result<(), SimError> { Err(SimError::InvalidBoard(reason)) };

        if self.rows == 0 || self.columns == 0 {
            return invalid(format!("board needs at least one row and column, got {}x{}", self.rows, self.columns));
        }
        for (name, value) in [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("chip_radius", self.chip_radius),
            ("gravity", self.gravity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        if !self.peg_radius.is_finite() || self.peg_radius < 0.0 {
            return invalid(format!("peg_radius must not be negative, got {}", self.peg_radius));
        }
        if self.canvas_height <= self.playfield_margin {
            return invalid(format!(
                "canvas_height {} leaves no playfield below a {} margin",
                self.canvas_height, self.playfield_margin
            ));
        }
        if self.chip_radius * 2.0 > self.canvas_width {
            return invalid(format!("chip of radius {} does not fit the canvas", self.chip_radius));
        }
        if self.slot_prizes.len() != self.columns as usize {
            return invalid(format!(
                "prize table has {} entries for {} slots",
                self.slot_prizes.len(),
                self.columns
            ));
        }
        if self.max_frames == 0 {
            return invalid("max_frames must be at least 1".to_string());
        }
        Ok(())
    }

    /// Load settings from a JSON file, or the defaults if it doesn't exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::info!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!(
            "Loaded {}x{} board settings from {}",
            settings.rows,
            settings.columns,
            path.display()
        );
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Board settings saved to {}", path.display());
        Ok(())
    }
}
