//! Error types for simulation, settings and the game ledger

use std::io;

use thiserror::Error;

/// Failures of a single drop simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The chip never crossed the settle threshold (degenerate bounce cycle)
    #[error("chip did not settle within {frames} frames (last y = {y:.2})")]
    MaxFramesExceeded { frames: u32, y: f64 },

    /// Board geometry that cannot produce a playable field
    #[error("invalid board: {0}")]
    InvalidBoard(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SimError),
}

/// Rejected submissions and snapshot failures
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("invalid score value: {0}")]
    InvalidScore(u32),

    #[error("invalid drop position {position} (board has {columns} columns)")]
    InvalidDropPosition { position: u32, columns: u32 },

    #[error("invalid final slot {slot} (board has {columns} slots)")]
    InvalidSlot { slot: u32, columns: u32 },

    #[error("failed to access ledger file: {0}")]
    Io(#[from] io::Error),

    #[error("malformed ledger: {0}")]
    Json(#[from] serde_json::Error),
}

impl LedgerError {
    /// Name of the submitted field that failed validation, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            LedgerError::InvalidScore(_) => Some("score"),
            LedgerError::InvalidDropPosition { .. } => Some("drop_position"),
            LedgerError::InvalidSlot { .. } => Some("final_slot"),
            LedgerError::Io(_) | LedgerError::Json(_) => None,
        }
    }
}
