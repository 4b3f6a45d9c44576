// Scoring-play aggregation.
//
// Buckets run-producing at-bats by base situation, outs, inning, batter and
// result category. Each bucket carries a play count and the runs (RBI) those
// plays produced.

use scorecast_core::event::{AtBatEvent, AtBatResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::bases::{BaseState, Situation};
use crate::stats::safe_ratio;

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    pub plays: u32,
    pub runs: u32,
}

impl BucketCount {
    fn record(&mut self, runs: u32) {
        self.plays += 1;
        self.runs = self.runs.saturating_add(runs);
    }

    /// Runs per play, 0.0 for an empty bucket.
    pub fn average(&self) -> f64 {
        safe_ratio(self.runs as f64, self.plays as f64)
    }
}

/// One bucket per base situation, in `Situation::ALL` order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SituationTable {
    counts: [BucketCount; 8],
}

impl SituationTable {
    fn record(&mut self, situation: Situation, runs: u32) {
        self.counts[situation.index()].record(runs);
    }

    pub fn get(&self, situation: Situation) -> BucketCount {
        self.counts[situation.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Situation, BucketCount)> + '_ {
        Situation::ALL.iter().map(move |&s| (s, self.get(s)))
    }

    pub fn total_plays(&self) -> u32 {
        self.counts.iter().map(|c| c.plays).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatterBucket {
    pub batter: String,
    pub plays: u32,
    pub runs: u32,
}

impl BatterBucket {
    pub fn average(&self) -> f64 {
        safe_ratio(self.runs as f64, self.plays as f64)
    }
}

// ---------------------------------------------------------------------------
// Result category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCategory {
    HomeRun,
    Hit,
    Sacrifice,
    Other,
}

impl ResultCategory {
    pub const ALL: [ResultCategory; 4] = [
        ResultCategory::HomeRun,
        ResultCategory::Hit,
        ResultCategory::Sacrifice,
        ResultCategory::Other,
    ];

    /// Categorise free result text. "home run" wins over everything; a
    /// single/double/triple is a hit; anything mentioning "sacrifice" is a
    /// sacrifice; the rest is other.
    pub fn from_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if text.contains("home run") {
            ResultCategory::HomeRun
        } else if ["single", "double", "triple"].iter().any(|h| text.contains(h)) {
            ResultCategory::Hit
        } else if text.contains("sacrifice") {
            ResultCategory::Sacrifice
        } else {
            ResultCategory::Other
        }
    }

    pub fn of(result: AtBatResult) -> Self {
        Self::from_text(result.description())
    }

    pub fn index(&self) -> usize {
        match self {
            ResultCategory::HomeRun => 0,
            ResultCategory::Hit => 1,
            ResultCategory::Sacrifice => 2,
            ResultCategory::Other => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResultCategory::HomeRun => "Home Run",
            ResultCategory::Hit => "Hit",
            ResultCategory::Sacrifice => "Sacrifice",
            ResultCategory::Other => "Other",
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoringSituationSummary {
    pub total_runs: u32,
    pub total_scoring_at_bats: u32,
    /// Total runs over total scoring at-bats.
    pub runs_per_at_bat: f64,
    pub by_situation: SituationTable,
    /// Indexed by outs before the at-bat.
    pub by_outs: [BucketCount; 3],
    pub by_inning: BTreeMap<u32, BucketCount>,
    /// First-appearance order.
    pub by_batter: Vec<BatterBucket>,
    /// Indexed by `ResultCategory::index`.
    pub by_category: [BucketCount; 4],
    /// Base-situation counts over every at-bat, when the full population was
    /// supplied.
    pub opportunities: Option<SituationTable>,
}

impl ScoringSituationSummary {
    pub fn category(&self, category: ResultCategory) -> BucketCount {
        self.by_category[category.index()]
    }

    pub fn outs(&self, outs_before: u8) -> Option<BucketCount> {
        self.by_outs.get(outs_before as usize).copied()
    }

    pub fn opportunities_for(&self, situation: Situation) -> Option<u32> {
        self.opportunities.as_ref().map(|t| t.get(situation).plays)
    }

    /// Scoring plays in `situation` over all at-bats that started in it.
    /// `None` without opportunity data; 0.0 when there were no opportunities.
    pub fn conversion_rate(&self, situation: Situation) -> Option<f64> {
        self.opportunities_for(situation).map(|opportunities| {
            safe_ratio(
                self.by_situation.get(situation).plays as f64,
                opportunities as f64,
            )
        })
    }

    /// Top `n` run producers: most runs, then most plays, then by name.
    pub fn top_batters(&self, n: usize) -> Vec<&BatterBucket> {
        let mut batters: Vec<&BatterBucket> = self.by_batter.iter().collect();
        batters.sort_by(|a, b| {
            b.runs
                .cmp(&a.runs)
                .then_with(|| b.plays.cmp(&a.plays))
                .then_with(|| a.batter.cmp(&b.batter))
        });
        batters.truncate(n);
        batters
    }
}

/// The run-producing subset of `events` (`rbi > 0`), in order.
pub fn scoring_plays(events: &[AtBatEvent]) -> impl Iterator<Item = &AtBatEvent> + '_ {
    events.iter().filter(|e| e.is_scoring_play())
}

/// Aggregate scoring at-bats.
///
/// `scoring_at_bats` is expected to be pre-filtered to `rbi > 0` (see
/// `scoring_plays`); it is not filtered again here. When `all_at_bats` is
/// given, base-situation opportunity counts are computed over it in a
/// separate pass.
pub fn summarize<'a, I>(scoring_at_bats: I, all_at_bats: Option<&[AtBatEvent]>) -> ScoringSituationSummary
where
    I: IntoIterator<Item = &'a AtBatEvent>,
{
    let mut summary = ScoringSituationSummary::default();
    let mut batter_index: HashMap<&str, usize> = HashMap::new();

    for event in scoring_at_bats {
        let runs = event.rbi;
        summary.total_scoring_at_bats += 1;
        summary.total_runs = summary.total_runs.saturating_add(runs);

        summary
            .by_situation
            .record(BaseState::of(event).situation, runs);

        match summary.by_outs.get_mut(event.outs_before as usize) {
            Some(bucket) => bucket.record(runs),
            None => warn!(
                batter = %event.batter,
                inning = event.inning,
                outs_before = event.outs_before,
                "scoring play with out-of-range outs skipped in outs table"
            ),
        }

        summary.by_inning.entry(event.inning).or_default().record(runs);

        let idx = *batter_index.entry(event.batter.as_str()).or_insert_with(|| {
            summary.by_batter.push(BatterBucket {
                batter: event.batter.clone(),
                plays: 0,
                runs: 0,
            });
            summary.by_batter.len() - 1
        });
        let batter = &mut summary.by_batter[idx];
        batter.plays += 1;
        batter.runs = batter.runs.saturating_add(runs);

        summary.by_category[ResultCategory::of(event.result).index()].record(runs);
    }

    summary.runs_per_at_bat = safe_ratio(
        summary.total_runs as f64,
        summary.total_scoring_at_bats as f64,
    );

    summary.opportunities = all_at_bats.map(|all| {
        let mut table = SituationTable::default();
        for event in all {
            table.record(BaseState::of(event).situation, event.rbi);
        }
        table
    });

    summary
}

/// Summarize a full game: scoring plays plus opportunities over every at-bat.
pub fn summarize_game(events: &[AtBatEvent]) -> ScoringSituationSummary {
    summarize(scoring_plays(events), Some(events))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
