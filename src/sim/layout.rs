//! Peg layout generation
//!
//! Pegs form a triangular lattice: even rows hold one peg per column, odd
//! rows one fewer, and every row is centered on the canvas so the odd rows
//! sit in the gaps of the rows around them.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{PEG_TOP, PLAYFIELD_MARGIN};
use crate::settings::BoardSettings;

/// A fixed circular obstacle (center position; radius comes from settings)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub x: f64,
    pub y: f64,
}

impl Peg {
    #[inline]
    pub fn pos(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Number of pegs in a lattice row
#[inline]
pub fn pegs_in_row(row: u32, columns: u32) -> u32 {
    if row % 2 == 0 {
        columns
    } else {
        columns.saturating_sub(1)
    }
}

/// The ordered pegs of a board, row by row, left to right
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PegLayout {
    pub rows: u32,
    pub columns: u32,
    pegs: Vec<Peg>,
}

impl PegLayout {
    /// Generate the lattice for a canvas with the default margins
    pub fn new(rows: u32, columns: u32, canvas_width: f64, canvas_height: f64) -> Self {
        Self::build(rows, columns, canvas_width, canvas_height, PEG_TOP, PLAYFIELD_MARGIN)
    }

    /// Generate the lattice described by board settings
    pub fn from_settings(settings: &BoardSettings) -> Self {
        Self::build(
            settings.rows,
            settings.columns,
            settings.canvas_width,
            settings.canvas_height,
            settings.peg_top,
            settings.playfield_margin,
        )
    }

    /// A board with no pegs (free fall between the walls)
    pub fn empty(rows: u32, columns: u32) -> Self {
        Self {
            rows,
            columns,
            pegs: Vec::new(),
        }
    }

    /// A hand-placed layout
    pub fn from_pegs(pegs: Vec<Peg>) -> Self {
        Self {
            rows: 0,
            columns: 0,
            pegs,
        }
    }

    fn build(
        rows: u32,
        columns: u32,
        canvas_width: f64,
        canvas_height: f64,
        peg_top: f64,
        playfield_margin: f64,
    ) -> Self {
        let spacing_x = if columns > 0 { canvas_width / columns as f64 } else { 0.0 };
        let spacing_y = (canvas_height - playfield_margin) / (rows + 1) as f64;

        let capacity: usize = (0..rows).map(|row| pegs_in_row(row, columns) as usize).sum();
        let mut pegs = Vec::with_capacity(capacity);

        for row in 0..rows {
            let count = pegs_in_row(row, columns);
            if count == 0 {
                continue;
            }
            let row_width = (count - 1) as f64 * spacing_x;
            let offset = (canvas_width - row_width) / 2.0;
            let y = peg_top + spacing_y * row as f64;

            for col in 0..count {
                pegs.push(Peg {
                    x: offset + spacing_x * col as f64,
                    y,
                });
            }
        }

        log::debug!("Generated {} pegs for a {}x{} board", pegs.len(), rows, columns);

        Self { rows, columns, pegs }
    }

    pub fn pegs(&self) -> &[Peg] {
        &self.pegs
    }

    pub fn len(&self) -> usize {
        self.pegs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pegs.is_empty()
    }

    /// Pegs of one lattice row (empty for hand-placed layouts or out of range)
    pub fn row(&self, row: u32) -> &[Peg] {
        if row >= self.rows {
            return &[];
        }
        let start: usize = (0..row).map(|r| pegs_in_row(r, self.columns) as usize).sum();
        let end = start + pegs_in_row(row, self.columns) as usize;
        self.pegs.get(start..end).unwrap_or(&[])
    }
}
