//! Game ledger
//!
//! Stores finished games (simulated or submitted by a player), answers the
//! statistics and leaderboard queries, and snapshots itself to JSON.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::round_cents;
use crate::settings::BoardSettings;
use crate::sim::{DropResult, PathPoint};

/// Rows returned by the leaderboard queries unless asked otherwise
pub const DEFAULT_LIMIT: usize = 10;

/// A stored game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    /// Player who dropped the chip (None for guests and seeded games)
    pub user_id: Option<u64>,
    pub score: u32,
    /// Release column, reported by players (simulated drops carry `drop_x`)
    #[serde(default)]
    pub drop_position: Option<u32>,
    pub final_slot: u32,
    pub drop_x: Option<f64>,
    pub final_x: Option<f64>,
    pub horizontal_distance: Option<f64>,
    pub path: Option<Vec<PathPoint>>,
    pub fall_time_ms: Option<u32>,
    pub peg_collisions: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// A game reported by a player's browser
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameSubmission {
    pub score: u32,
    /// Column the chip was released above
    pub drop_position: u32,
    pub final_slot: u32,
    #[serde(default)]
    pub path: Option<Vec<PathPoint>>,
}

/// Leaderboard row (a record without its trajectory)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub id: u64,
    pub user_id: Option<u64>,
    pub score: u32,
    pub drop_position: Option<u32>,
    pub final_slot: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&GameRecord> for GameSummary {
    fn from(record: &GameRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            score: record.score,
            drop_position: record.drop_position,
            final_slot: record.final_slot,
            created_at: record.created_at,
        }
    }
}

/// Aggregate numbers over every stored game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_games: u64,
    pub total_winnings: u64,
    pub average_score: Option<f64>,
    pub highest_score: Option<u32>,
}

/// Everything the results page shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub recent_games: Vec<GameSummary>,
    pub high_scores: Vec<GameSummary>,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLedger {
    records: Vec<GameRecord>,
    next_id: u64,
}

impl Default for GameLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl GameLedger {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    fn next_record_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn get(&self, id: u64) -> Option<&GameRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Store a simulator result, returning the new record's id
    pub fn record_drop(&mut self, result: &DropResult, user_id: Option<u64>, created_at: DateTime<Utc>) -> u64 {
        let id = self.next_record_id();
        self.records.push(GameRecord {
            id,
            user_id,
            score: result.score,
            drop_position: None,
            final_slot: result.final_slot,
            drop_x: Some(round_cents(result.drop_x)),
            final_x: Some(round_cents(result.final_x)),
            horizontal_distance: Some(round_cents(result.horizontal_distance)),
            path: Some(result.path.clone()),
            fall_time_ms: Some(result.fall_time_ms),
            peg_collisions: Some(result.peg_collisions),
            created_at,
        });
        id
    }

    /// Validate and store a player-reported game
    ///
    /// The score must be one of the board's prizes, and the drop column and
    /// landing slot must both exist.
    pub fn submit(
        &mut self,
        submission: GameSubmission,
        settings: &BoardSettings,
        user_id: Option<u64>,
        now: DateTime<Utc>,
    ) -> Result<u64, LedgerError> {
        if !settings.is_prize(submission.score) {
            return Err(LedgerError::InvalidScore(submission.score));
        }
        if submission.drop_position >= settings.columns {
            return Err(LedgerError::InvalidDropPosition {
                position: submission.drop_position,
                columns: settings.columns,
            });
        }
        if submission.final_slot >= settings.columns {
            return Err(LedgerError::InvalidSlot {
                slot: submission.final_slot,
                columns: settings.columns,
            });
        }

        let id = self.next_record_id();
        self.records.push(GameRecord {
            id,
            user_id,
            score: submission.score,
            drop_position: Some(submission.drop_position),
            final_slot: submission.final_slot,
            drop_x: None,
            final_x: None,
            horizontal_distance: None,
            path: submission.path,
            fall_time_ms: None,
            peg_collisions: None,
            created_at: now,
        });
        log::info!("Stored submitted game {} ({} pts, slot {})", id, submission.score, submission.final_slot);
        Ok(id)
    }

    pub fn statistics(&self) -> Statistics {
        let total_games = self.records.len() as u64;
        let total_winnings: u64 = self.records.iter().map(|r| r.score as u64).sum();
        let average_score = (total_games > 0).then(|| total_winnings as f64 / total_games as f64);
        let highest_score = self.records.iter().map(|r| r.score).max();

        Statistics {
            total_games,
            total_winnings,
            average_score,
            highest_score,
        }
    }

    /// Newest games first
    pub fn recent(&self, limit: usize) -> Vec<&GameRecord> {
        let mut games: Vec<&GameRecord> = self.records.iter().collect();
        games.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        games.truncate(limit);
        games
    }

    /// Highest scores first, newest first among equal scores
    pub fn high_scores(&self, limit: usize) -> Vec<&GameRecord> {
        let mut games: Vec<&GameRecord> = self.records.iter().collect();
        games.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        games.truncate(limit);
        games
    }

    pub fn report(&self, limit: usize) -> LedgerReport {
        LedgerReport {
            recent_games: self.recent(limit).into_iter().map(GameSummary::from).collect(),
            high_scores: self.high_scores(limit).into_iter().map(GameSummary::from).collect(),
            statistics: self.statistics(),
        }
    }

    /// Remove every game, returning how many were removed
    ///
    /// Ids keep counting up so a flushed ledger never reuses one.
    pub fn flush(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        log::info!("Ledger flushed ({} games removed)", removed);
        removed
    }

    /// Load a ledger snapshot, or an empty ledger if the file doesn't exist
    pub fn load(path: &Path) -> Result<Self, LedgerError> {
        if !path.exists() {
            log::info!("No ledger at {}, starting fresh", path.display());
            return Ok(Self::new());
        }

        let json = fs::read_to_string(path)?;
        let mut ledger: Self = serde_json::from_str(&json)?;
        // Snapshots edited by hand may carry a stale counter
        let max_id = ledger.records.iter().map(|r| r.id).max().unwrap_or(0);
        ledger.next_id = ledger.next_id.max(max_id + 1);
        log::info!("Loaded {} games from {}", ledger.records.len(), path.display());
        Ok(ledger)
    }

    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        log::info!("Ledger saved ({} games)", self.records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn submit(ledger: &mut GameLedger, score: u32, slot: u32, minutes: i64) -> u64 {
        let submission = GameSubmission {
            score,
            drop_position: slot,
            final_slot: slot,
            path: None,
        };
        ledger
            .submit(submission, &BoardSettings::default(), None, at(minutes))
            .unwrap()
    }

    fn sample_result() -> DropResult {
        DropResult {
            score: 1000,
            final_slot: 2,
            drop_x: 300.0,
            final_x: 180.123_456,
            horizontal_distance: 119.876_544,
            fall_time_ms: 850,
            peg_collisions: 14,
            frames: 51,
            path: vec![PathPoint { x: 300.0, y: 40.0 }],
        }
    }

    #[test]
    fn test_empty_statistics() {
        let stats = GameLedger::new().statistics();
        assert_eq!(stats.total_games, 0);
        assert_eq!(stats.total_winnings, 0);
        assert_eq!(stats.average_score, None);
        assert_eq!(stats.highest_score, None);
    }

    #[test]
    fn test_statistics() {
        let mut ledger = GameLedger::new();
        submit(&mut ledger, 10000, 4, 0);
        submit(&mut ledger, 1000, 2, 1);
        submit(&mut ledger, 500, 1, 2);

        let stats = ledger.statistics();
        assert_eq!(stats.total_games, 3);
        assert_eq!(stats.total_winnings, 11500);
        assert_eq!(stats.highest_score, Some(10000));
        assert!((stats.average_score.unwrap() - 11500.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_recent_is_limited_and_newest_first() {
        let mut ledger = GameLedger::new();
        for i in 0..15 {
            submit(&mut ledger, 100, 0, i);
        }
        let recent = ledger.recent(DEFAULT_LIMIT);
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].created_at, at(14));
        assert!(recent.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_high_scores_order() {
        let mut ledger = GameLedger::new();
        submit(&mut ledger, 100, 0, 0);
        submit(&mut ledger, 10000, 4, 1);
        submit(&mut ledger, 500, 1, 2);

        let scores: Vec<u32> = ledger.high_scores(DEFAULT_LIMIT).iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![10000, 500, 100]);
    }

    #[test]
    fn test_submit_rejects_unknown_score() {
        let mut ledger = GameLedger::new();
        let err = ledger
            .submit(
                GameSubmission {
                    score: 999,
                    drop_position: 4,
                    final_slot: 4,
                    path: None,
                },
                &BoardSettings::default(),
                None,
                at(0),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidScore(999)));
        assert_eq!(err.field(), Some("score"));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_submit_rejects_slot_out_of_range() {
        let mut ledger = GameLedger::new();
        let err = ledger
            .submit(
                GameSubmission {
                    score: 100,
                    drop_position: 4,
                    final_slot: 9,
                    path: None,
                },
                &BoardSettings::default(),
                Some(7),
                at(0),
            )
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidSlot { slot: 9, columns: 9 }));
        assert_eq!(err.field(), Some("final_slot"));
    }

    #[test]
    fn test_submit_checks_drop_position() {
        let settings = BoardSettings::default();
        let mut ledger = GameLedger::new();
        let submission = |drop_position| GameSubmission {
            score: 1000,
            drop_position,
            final_slot: 2,
            path: None,
        };

        let err = ledger.submit(submission(9), &settings, None, at(0)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidDropPosition { position: 9, columns: 9 }));
        assert_eq!(err.field(), Some("drop_position"));
        assert!(ledger.is_empty());

        let first = ledger.submit(submission(0), &settings, None, at(1)).unwrap();
        let last = ledger.submit(submission(8), &settings, None, at(2)).unwrap();
        assert_eq!(ledger.get(first).unwrap().drop_position, Some(0));
        assert_eq!(ledger.get(last).unwrap().drop_position, Some(8));
        assert_eq!(ledger.report(DEFAULT_LIMIT).recent_games[0].drop_position, Some(8));
    }

    #[test]
    fn test_submit_missing_drop_position_is_rejected() {
        let parsed = serde_json::from_str::<GameSubmission>(r#"{ "score": 500, "final_slot": 1 }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_submit_keeps_user_and_path() {
        let mut ledger = GameLedger::new();
        let path = vec![PathPoint { x: 300.0, y: 100.0 }, PathPoint { x: 310.0, y: 150.0 }];
        let id = ledger
            .submit(
                GameSubmission {
                    score: 10000,
                    drop_position: 4,
                    final_slot: 4,
                    path: Some(path.clone()),
                },
                &BoardSettings::default(),
                Some(42),
                at(0),
            )
            .unwrap();

        let record = ledger.get(id).unwrap();
        assert_eq!(record.user_id, Some(42));
        assert_eq!(record.path, Some(path));
        assert_eq!(record.drop_x, None);
    }

    #[test]
    fn test_record_drop_rounds_decimals() {
        let mut ledger = GameLedger::new();
        let id = ledger.record_drop(&sample_result(), None, at(0));
        let record = ledger.get(id).unwrap();
        assert_eq!(record.final_x, Some(180.12));
        assert_eq!(record.horizontal_distance, Some(119.88));
        assert_eq!(record.peg_collisions, Some(14));
        assert_eq!(record.fall_time_ms, Some(850));
        assert_eq!(record.user_id, None);
    }

    #[test]
    fn test_flush_keeps_ids_increasing() {
        let mut ledger = GameLedger::new();
        let first = submit(&mut ledger, 100, 0, 0);
        submit(&mut ledger, 100, 0, 1);
        assert_eq!(ledger.flush(), 2);
        assert!(ledger.is_empty());
        assert_eq!(ledger.statistics().total_games, 0);
        assert!(submit(&mut ledger, 100, 0, 2) > first + 1);
    }

    #[test]
    fn test_report_omits_paths() {
        let mut ledger = GameLedger::new();
        ledger.record_drop(&sample_result(), None, at(0));
        let json = serde_json::to_value(ledger.report(DEFAULT_LIMIT)).unwrap();
        assert_eq!(json["statistics"]["total_games"], 1);
        assert_eq!(json["high_scores"][0]["score"], 1000);
        assert!(json["recent_games"][0].get("path").is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let mut ledger = GameLedger::new();
        ledger.record_drop(&sample_result(), Some(3), at(0));
        submit(&mut ledger, 500, 1, 5);
        ledger.save(&path).unwrap();

        let mut loaded = GameLedger::load(&path).unwrap();
        assert_eq!(loaded.records(), ledger.records());
        assert_eq!(submit(&mut loaded, 100, 0, 6), 3);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameLedger::load(&dir.path().join("none.json")).unwrap().is_empty());
    }
}
