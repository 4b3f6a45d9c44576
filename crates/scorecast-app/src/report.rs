// Plain-text game report: owner comparison, per-batter lines and the
// scoring-situation tables.

use scorecast_baseball::format::{format_percent, format_rate, format_ratio, RateStyle};
use scorecast_baseball::grade::{grade, StatKind};
use scorecast_baseball::scoring::{summarize_game, BucketCount, ResultCategory, ScoringSituationSummary};
use scorecast_baseball::stats::{compare_owners, stats_by_batter, BatterLine, BattingStats, OwnerComparison};
use scorecast_core::document::{AnalysisDocument, GameMetadata, StatLine};
use scorecast_core::event::Owner;
use std::fmt::Display;

use crate::config::DisplayConfig;

// ---------------------------------------------------------------------------
// Report model
// ---------------------------------------------------------------------------

/// Everything the engine derives from one document.
#[derive(Debug, Clone)]
pub struct GameReport {
    pub game: GameMetadata,
    pub comparison: OwnerComparison,
    pub batters: Vec<BatterLine>,
    pub scoring: ScoringSituationSummary,
}

impl GameReport {
    pub fn build(document: &AnalysisDocument) -> Self {
        GameReport {
            game: document.game.clone(),
            comparison: compare_owners(&document.at_bats),
            batters: stats_by_batter(&document.at_bats),
            scoring: summarize_game(&document.at_bats),
        }
    }
}

/// An owner whose upstream counting line disagrees with the recomputed one.
#[derive(Debug, Clone, PartialEq)]
pub struct StatMismatch {
    pub owner: Owner,
    pub upstream: StatLine,
    pub computed: StatLine,
}

/// Compare the API's own counting lines against the recomputed ones. Owners
/// without an upstream block are skipped.
pub fn upstream_mismatches(document: &AnalysisDocument, comparison: &OwnerComparison) -> Vec<StatMismatch> {
    Owner::ALL
        .iter()
        .filter_map(|&owner| {
            let upstream = *document.stats.get(owner)?;
            let computed = comparison.get(owner).counting_line();
            (upstream != computed).then_some(StatMismatch {
                owner,
                upstream,
                computed,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn graded(value: f64, kind: StatKind, style: RateStyle) -> String {
    format!("{} {}", format_rate(value, style), grade(value, kind).label())
}

fn comparison_row(label: &str, primary: impl Display, secondary: impl Display) -> String {
    format!("{label:<10}{primary:<24}{secondary:<24}\n")
}

fn bucket_row(label: impl Display, bucket: BucketCount) -> String {
    format!(
        "{label:<24}{:>6}{:>6}{:>8}\n",
        bucket.plays,
        bucket.runs,
        format_ratio(bucket.runs, bucket.plays)
    )
}

pub fn render(report: &GameReport, display: &DisplayConfig) -> String {
    let game = &report.game;
    let mut out = format!("{}  {}\n", game.matchup(), game.date.format("%b %-d, %Y"));
    if let Some(venue) = &game.venue {
        out.push_str(&format!("{venue}\n"));
    }
    out.push('\n');

    out.push_str(&format_comparison(report, display.rate_style));
    out.push('\n');
    out.push_str(&format_batters(report, display.rate_style));
    out.push('\n');
    out.push_str(&format_scoring(&report.scoring, display.top_batters));

    out
}

fn format_comparison(report: &GameReport, style: RateStyle) -> String {
    let game = &report.game;
    let p = &report.comparison.primary;
    let s = &report.comparison.secondary;

    let mut out = String::from("== Comparison ==\n");
    out.push_str(&comparison_row(
        "",
        game.owner_label(Owner::Primary),
        game.owner_label(Owner::Secondary),
    ));

    let counts: [(&str, fn(&BattingStats) -> u32); 7] = [
        ("PA", |b| b.plate_appearances()),
        ("AB", |b| b.at_bats),
        ("H", |b| b.hits),
        ("HR", |b| b.home_runs),
        ("RBI", |b| b.rbis),
        ("BB", |b| b.walks),
        ("K", |b| b.strikeouts),
    ];
    for (name, get) in counts {
        out.push_str(&comparison_row(name, get(p), get(s)));
    }

    let rates: [(StatKind, fn(&BattingStats) -> f64); 5] = [
        (StatKind::Average, |b| b.average),
        (StatKind::Obp, |b| b.obp),
        (StatKind::Slg, |b| b.slg),
        (StatKind::Ops, |b| b.ops),
        (StatKind::RispAverage, |b| b.risp_average),
    ];
    for (kind, get) in rates {
        out.push_str(&comparison_row(
            kind.label(),
            graded(get(p), kind, style),
            graded(get(s), kind, style),
        ));
    }

    out.push_str(&comparison_row(
        "RISP H-AB",
        format!("{}-{}", p.risp_hits, p.risp_at_bats),
        format!("{}-{}", s.risp_hits, s.risp_at_bats),
    ));
    out.push_str(&comparison_row(
        "2-out RISP",
        format!("{}-{} {}", p.clutch_hits, p.clutch_at_bats, format_rate(p.clutch_average, style)),
        format!("{}-{} {}", s.clutch_hits, s.clutch_at_bats, format_rate(s.clutch_average, style)),
    ));
    out
}

fn format_batters(report: &GameReport, style: RateStyle) -> String {
    let mut out = String::from("== Batters ==\n");
    out.push_str(&format!(
        "{:<20}{:<12}{:>4}{:>4}{:>4}{:>4}{:>5}{:>4}{:>4}{:>7}{:>7}{:>7}{:>7}\n",
        "Batter", "Side", "PA", "AB", "H", "HR", "RBI", "BB", "K", "AVG", "OBP", "SLG", "OPS"
    ));
    for line in &report.batters {
        let b = &line.stats;
        out.push_str(&format!(
            "{:<20}{:<12}{:>4}{:>4}{:>4}{:>4}{:>5}{:>4}{:>4}{:>7}{:>7}{:>7}{:>7}\n",
            line.batter,
            report.game.owner_label(line.owner),
            b.plate_appearances(),
            b.at_bats,
            b.hits,
            b.home_runs,
            b.rbis,
            b.walks,
            b.strikeouts,
            format_rate(b.average, style),
            format_rate(b.obp, style),
            format_rate(b.slg, style),
            format_rate(b.ops, style)
        ));
    }
    out
}

fn format_scoring(summary: &ScoringSituationSummary, top_batters: usize) -> String {
    let mut out = String::from("== Scoring Plays ==\n");
    out.push_str(&format!(
        "{} runs on {} scoring at-bats ({} runs per scoring at-bat)\n\n",
        summary.total_runs,
        summary.total_scoring_at_bats,
        format_ratio(summary.total_runs, summary.total_scoring_at_bats)
    ));

    out.push_str(&format!(
        "{:<24}{:>6}{:>6}{:>6}{:>9}\n",
        "Situation", "Plays", "Runs", "Opp", "Conv"
    ));
    for (situation, bucket) in summary.by_situation.iter() {
        let opp = summary
            .opportunities_for(situation)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".into());
        let conv = summary
            .conversion_rate(situation)
            .map(format_percent)
            .unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "{:<24}{:>6}{:>6}{:>6}{:>9}\n",
            situation.display_str(),
            bucket.plays,
            bucket.runs,
            opp,
            conv
        ));
    }
    out.push('\n');

    out.push_str(&format!("{:<24}{:>6}{:>6}{:>8}\n", "Outs", "Plays", "Runs", "R/Play"));
    for (outs, bucket) in summary.by_outs.iter().enumerate() {
        out.push_str(&bucket_row(format!("{outs} out"), *bucket));
    }
    out.push('\n');

    out.push_str(&format!("{:<24}{:>6}{:>6}{:>8}\n", "Inning", "Plays", "Runs", "R/Play"));
    for (inning, bucket) in &summary.by_inning {
        out.push_str(&bucket_row(inning, *bucket));
    }
    out.push('\n');

    out.push_str(&format!("{:<24}{:>6}{:>6}\n", "Result", "Plays", "Runs"));
    for category in ResultCategory::ALL {
        let bucket = summary.category(category);
        out.push_str(&format!("{:<24}{:>6}{:>6}\n", category.label(), bucket.plays, bucket.runs));
    }
    out.push('\n');

    out.push_str(&format!(
        "{:<24}{:>6}{:>6}{:>8}\n",
        "Top run producers", "Plays", "Runs", "R/Play"
    ));
    for batter in summary.top_batters(top_batters) {
        out.push_str(&bucket_row(
            &batter.batter,
            BucketCount {
                plays: batter.plays,
                runs: batter.runs,
            },
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
