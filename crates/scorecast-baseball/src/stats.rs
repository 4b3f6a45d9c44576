// Batting statistics folded from a sequence of at-bat events.
//
// Counting stats are accumulated in a single pass; rate stats are derived at
// the end with a zero guard so callers never see NaN or infinity. No rounding
// happens here; that is a display concern (see `format`).

use scorecast_core::document::StatLine;
use scorecast_core::event::{AtBatEvent, AtBatResult, Owner};
use serde::Serialize;
use std::collections::HashMap;

use crate::bases::BaseState;

/// `numerator / denominator`, or 0.0 when the denominator is not positive.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

// ---------------------------------------------------------------------------
// BattingStats
// ---------------------------------------------------------------------------

/// Standard and situational batting line for one set of at-bats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BattingStats {
    /// Plate appearances excluding walks.
    pub at_bats: u32,
    pub hits: u32,
    pub home_runs: u32,
    pub rbis: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub total_bases: u32,
    pub average: f64,
    /// (H + BB) / (AB + BB). Hit-by-pitch and sacrifice flies are not part of
    /// the input data, so they are not part of the formula either.
    pub obp: f64,
    pub slg: f64,
    pub ops: f64,
    pub risp_at_bats: u32,
    pub risp_hits: u32,
    pub risp_average: f64,
    /// At-bats with a runner in scoring position and two outs.
    pub clutch_at_bats: u32,
    pub clutch_hits: u32,
    pub clutch_average: f64,
}

impl BattingStats {
    pub fn plate_appearances(&self) -> u32 {
        self.at_bats + self.walks
    }

    /// The counting part of this line, in the shape the analysis API reports.
    pub fn counting_line(&self) -> StatLine {
        StatLine {
            at_bats: self.at_bats,
            hits: self.hits,
            home_runs: self.home_runs,
            rbis: self.rbis,
            walks: self.walks,
            strikeouts: self.strikeouts,
        }
    }
}

/// Fold a sequence of at-bats into a batting line.
///
/// Pure and order-insensitive in its result; calling it twice on the same
/// input produces bit-identical output.
pub fn compute_stats<'a, I>(events: I) -> BattingStats
where
    I: IntoIterator<Item = &'a AtBatEvent>,
{
    let mut s = BattingStats::default();

    for event in events {
        let result = event.result;
        s.rbis = s.rbis.saturating_add(event.rbi);

        if !result.is_at_bat() {
            s.walks += 1;
            continue;
        }

        s.at_bats += 1;
        let is_hit = result.is_hit();
        if is_hit {
            s.hits += 1;
            s.total_bases += result.total_bases();
        }
        if result == AtBatResult::HomeRun {
            s.home_runs += 1;
        }
        if result == AtBatResult::Strikeout {
            s.strikeouts += 1;
        }

        let bases = BaseState::of(event);
        if bases.in_scoring_position() {
            s.risp_at_bats += 1;
            if is_hit {
                s.risp_hits += 1;
            }
        }
        if bases.is_clutch(event.outs_before) {
            s.clutch_at_bats += 1;
            if is_hit {
                s.clutch_hits += 1;
            }
        }
    }

    let ab = s.at_bats as f64;
    s.average = safe_ratio(s.hits as f64, ab);
    s.obp = safe_ratio((s.hits + s.walks) as f64, (s.at_bats + s.walks) as f64);
    s.slg = safe_ratio(s.total_bases as f64, ab);
    s.ops = s.obp + s.slg;
    s.risp_average = safe_ratio(s.risp_hits as f64, s.risp_at_bats as f64);
    s.clutch_average = safe_ratio(s.clutch_hits as f64, s.clutch_at_bats as f64);

    s
}

// ---------------------------------------------------------------------------
// Owner comparison
// ---------------------------------------------------------------------------

/// Side-by-side batting lines for the two tracked owners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct OwnerComparison {
    pub primary: BattingStats,
    pub secondary: BattingStats,
}

impl OwnerComparison {
    pub fn get(&self, owner: Owner) -> &BattingStats {
        match owner {
            Owner::Primary => &self.primary,
            Owner::Secondary => &self.secondary,
        }
    }
}

/// Partition by owner and compute each side independently.
pub fn compare_owners(events: &[AtBatEvent]) -> OwnerComparison {
    OwnerComparison {
        primary: compute_stats(events.iter().filter(|e| e.owner == Owner::Primary)),
        secondary: compute_stats(events.iter().filter(|e| e.owner == Owner::Secondary)),
    }
}

// ---------------------------------------------------------------------------
// Per-batter lines
// ---------------------------------------------------------------------------

/// One batter's line, used for player cards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatterLine {
    pub batter: String,
    /// Owner of the batter's first plate appearance.
    pub owner: Owner,
    pub stats: BattingStats,
}

/// Compute one line per batter, in order of first appearance.
pub fn stats_by_batter(events: &[AtBatEvent]) -> Vec<BatterLine> {
    let mut order: Vec<(&str, Owner)> = Vec::new();
    let mut grouped: HashMap<&str, Vec<&AtBatEvent>> = HashMap::new();

    for event in events {
        let key = event.batter.as_str();
        let entry = grouped.entry(key).or_default();
        if entry.is_empty() {
            order.push((key, event.owner));
        }
        entry.push(event);
    }

    order
        .into_iter()
        .map(|(batter, owner)| BatterLine {
            batter: batter.to_string(),
            owner,
            stats: compute_stats(grouped.get(batter).into_iter().flatten().copied()),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn ab(result: AtBatResult) -> AtBatEvent {
        AtBatEvent::new("Batter", result)
    }

    #[test]
    fn empty_input_is_all_zero() {
        let events: Vec<AtBatEvent> = Vec::new();
        let s = compute_stats(&events);
        assert_eq!(s, BattingStats::default());
        for v in [s.average, s.obp, s.slg, s.ops, s.risp_average, s.clutch_average] {
            assert_eq!(v, 0.0);
            assert!(v.is_finite());
        }
    }

    #[test]
    fn single_hit_line() {
        let s = compute_stats(&[ab(AtBatResult::Single)]);
        assert_eq!(s.at_bats, 1);
        assert_eq!(s.hits, 1);
        assert_eq!(s.average, 1.0);
        assert_eq!(s.slg, 1.0);
        assert_eq!(s.obp, 1.0);
        assert_eq!(s.ops, 2.0);
    }

    #[test]
    fn walk_only_line() {
        let s = compute_stats(&[ab(AtBatResult::Walk)]);
        assert_eq!(s.at_bats, 0);
        assert_eq!(s.hits, 0);
        assert_eq!(s.walks, 1);
        assert_eq!(s.plate_appearances(), 1);
        assert_eq!(s.average, 0.0);
        assert!(!s.average.is_nan());
        assert_eq!(s.obp, 1.0);
        assert_eq!(s.slg, 0.0);
        assert_eq!(s.ops, 1.0);
    }

    #[test]
    fn mixed_line() {
        // 1B, 2B, HR, K, out, BB, sac fly, error -> AB = 7, H = 3, TB = 7
        let events = vec![
            ab(AtBatResult::Single),
            ab(AtBatResult::Double),
            ab(AtBatResult::HomeRun).with_rbi(2),
            ab(AtBatResult::Strikeout),
            ab(AtBatResult::Out),
            ab(AtBatResult::Walk),
            ab(AtBatResult::SacrificeFlyOut).with_rbi(1),
            ab(AtBatResult::Error),
        ];
        let s = compute_stats(&events);
        assert_eq!(s.at_bats, 7);
        assert_eq!(s.hits, 3);
        assert_eq!(s.home_runs, 1);
        assert_eq!(s.rbis, 3);
        assert_eq!(s.walks, 1);
        assert_eq!(s.strikeouts, 1);
        assert_eq!(s.total_bases, 7);
        assert!(approx_eq(s.average, 3.0 / 7.0, 1e-12));
        assert!(approx_eq(s.obp, 4.0 / 8.0, 1e-12));
        assert!(approx_eq(s.slg, 1.0, 1e-12));
        assert!(approx_eq(s.ops, 1.5, 1e-12));
    }

    #[test]
    fn home_run_with_runners_on_second_and_third_counts_as_risp() {
        let mut events = vec![ab(AtBatResult::Out)];
        let before = compute_stats(&events);

        events.push(
            ab(AtBatResult::HomeRun)
                .with_runner("Lee", 2)
                .with_runner("Kim", 3)
                .with_rbi(3),
        );
        let after = compute_stats(&events);

        assert_eq!(after.risp_at_bats, before.risp_at_bats + 1);
        assert_eq!(after.risp_hits, before.risp_hits + 1);
        assert_eq!(after.risp_average, 1.0);
    }

    #[test]
    fn risp_excludes_walks_and_runner_on_first() {
        let events = vec![
            ab(AtBatResult::Walk).with_runner("a", 2),
            ab(AtBatResult::Single).with_runner("a", 1),
            ab(AtBatResult::Out).with_runner("a", 3),
            ab(AtBatResult::Double).with_runner("a", 2),
        ];
        let s = compute_stats(&events);
        assert_eq!(s.risp_at_bats, 2);
        assert_eq!(s.risp_hits, 1);
        assert!(approx_eq(s.risp_average, 0.5, 1e-12));
    }

    #[test]
    fn clutch_requires_two_outs() {
        let events = vec![
            ab(AtBatResult::Single).with_runner("a", 2).with_outs(1),
            ab(AtBatResult::Single).with_runner("a", 2).with_outs(2),
            ab(AtBatResult::Strikeout).with_runner("a", 3).with_outs(2),
            ab(AtBatResult::Single).with_runner("a", 1).with_outs(2),
        ];
        let s = compute_stats(&events);
        assert_eq!(s.clutch_at_bats, 2);
        assert_eq!(s.clutch_hits, 1);
        assert!(approx_eq(s.clutch_average, 0.5, 1e-12));
    }

    #[test]
    fn out_of_range_runner_is_not_risp() {
        let s = compute_stats(&[ab(AtBatResult::Single).with_runner("ghost", 4)]);
        assert_eq!(s.risp_at_bats, 0);
    }

    #[test]
    fn compute_stats_is_idempotent() {
        let events = vec![
            ab(AtBatResult::Single),
            ab(AtBatResult::Triple).with_runner("a", 2),
            ab(AtBatResult::Walk),
            ab(AtBatResult::Out).with_outs(2),
        ];
        let a = compute_stats(&events);
        let b = compute_stats(&events);
        assert_eq!(a, b);
        assert_eq!(a.ops.to_bits(), b.ops.to_bits());
        assert_eq!(a.obp.to_bits(), b.obp.to_bits());
    }

    #[test]
    fn compare_owners_splits_partitions() {
        let events = vec![
            ab(AtBatResult::Single),
            ab(AtBatResult::Out).with_owner(Owner::Secondary),
            ab(AtBatResult::HomeRun).with_owner(Owner::Secondary),
            ab(AtBatResult::Walk),
        ];
        let cmp = compare_owners(&events);
        assert_eq!(cmp.primary.at_bats, 1);
        assert_eq!(cmp.primary.walks, 1);
        assert_eq!(cmp.secondary.at_bats, 2);
        assert_eq!(cmp.secondary.home_runs, 1);
        assert!(approx_eq(cmp.get(Owner::Secondary).average, 0.5, 1e-12));
        assert_eq!(cmp.get(Owner::Primary), &cmp.primary);
    }

    #[test]
    fn stats_by_batter_keeps_first_appearance_order() {
        let events = vec![
            AtBatEvent::new("Ruiz", AtBatResult::Single),
            AtBatEvent::new("Ortega", AtBatResult::Out).with_owner(Owner::Secondary),
            AtBatEvent::new("Ruiz", AtBatResult::Out),
            AtBatEvent::new("Ortega", AtBatResult::Double).with_owner(Owner::Secondary),
        ];
        let lines = stats_by_batter(&events);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].batter, "Ruiz");
        assert_eq!(lines[0].owner, Owner::Primary);
        assert_eq!(lines[0].stats.at_bats, 2);
        assert_eq!(lines[1].batter, "Ortega");
        assert_eq!(lines[1].owner, Owner::Secondary);
        assert!(approx_eq(lines[1].stats.slg, 1.0, 1e-12));
    }

    #[test]
    fn counting_line_matches_fields() {
        let s = compute_stats(&[ab(AtBatResult::HomeRun).with_rbi(1), ab(AtBatResult::Walk)]);
        let line = s.counting_line();
        assert_eq!(line.at_bats, 1);
        assert_eq!(line.hits, 1);
        assert_eq!(line.home_runs, 1);
        assert_eq!(line.rbis, 1);
        assert_eq!(line.walks, 1);
        assert_eq!(line.strikeouts, 0);
    }

    #[test]
    fn huge_rbi_totals_saturate() {
        let s = compute_stats(&[
            ab(AtBatResult::HomeRun).with_rbi(u32::MAX),
            ab(AtBatResult::Single).with_rbi(1),
        ]);
        assert_eq!(s.rbis, u32::MAX);
        assert_eq!(s.hits, 2);
    }

    #[test]
    fn safe_ratio_guards_zero() {
        assert_eq!(safe_ratio(3.0, 0.0), 0.0);
        assert_eq!(safe_ratio(0.0, 0.0), 0.0);
        assert_eq!(safe_ratio(1.0, 4.0), 0.25);
    }
}
