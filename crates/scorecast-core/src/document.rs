// The analysis document returned by the upstream analysis API: game metadata,
// the at-bat array, and the API's own per-owner counting lines.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::event::{AtBatEvent, AtBatResult, Owner};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DocumentError {
    /// The JSON did not have the expected shape (e.g. `runnersBefore` was not
    /// an object, or a required field was missing).
    #[error("invalid analysis document: {source}")]
    InvalidDocument { source: serde_json::Error },
}

// ---------------------------------------------------------------------------
// Game metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    pub game_id: String,
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub venue: Option<String>,
    /// Display name for the primary owner's side of the comparison.
    #[serde(default)]
    pub primary_label: Option<String>,
    /// Display name for the secondary owner's side of the comparison.
    #[serde(default)]
    pub secondary_label: Option<String>,
}

impl GameMetadata {
    /// Display label for an owner, falling back to the generic owner name.
    pub fn owner_label(&self, owner: Owner) -> &str {
        let label = match owner {
            Owner::Primary => self.primary_label.as_deref(),
            Owner::Secondary => self.secondary_label.as_deref(),
        };
        label.unwrap_or(owner.label())
    }

    /// "Away @ Home" matchup string.
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }
}

// ---------------------------------------------------------------------------
// Upstream counting lines
// ---------------------------------------------------------------------------

/// The counting part of a stat block as the API reports it. Rate stats are
/// never taken from the API; they are recomputed from the at-bats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatLine {
    pub at_bats: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub rbis: u32,
    pub walks: u32,
    pub strikeouts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerStatBlocks {
    pub primary: Option<StatLine>,
    pub secondary: Option<StatLine>,
}

impl OwnerStatBlocks {
    pub fn get(&self, owner: Owner) -> Option<&StatLine> {
        match owner {
            Owner::Primary => self.primary.as_ref(),
            Owner::Secondary => self.secondary.as_ref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisDocument {
    pub game: GameMetadata,
    #[serde(default)]
    pub at_bats: Vec<AtBatEvent>,
    #[serde(default)]
    pub stats: OwnerStatBlocks,
}

impl AnalysisDocument {
    /// Parse a document from the API's JSON body.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let document: AnalysisDocument = serde_json::from_str(text)
            .map_err(|e| DocumentError::InvalidDocument { source: e })?;

        let unknown = document
            .at_bats
            .iter()
            .filter(|ab| ab.result == AtBatResult::Unknown)
            .count();
        if unknown > 0 {
            warn!(
                game_id = %document.game.game_id,
                unknown,
                "document contains at-bats with unrecognised results"
            );
        }
        debug!(
            game_id = %document.game.game_id,
            at_bats = document.at_bats.len(),
            "parsed analysis document"
        );

        Ok(document)
    }

    /// At-bats produced by one owner, in document order.
    pub fn events_for(&self, owner: Owner) -> impl Iterator<Item = &AtBatEvent> + '_ {
        self.at_bats.iter().filter(move |ab| ab.owner == owner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
