// At-bat situational analytics: base-state classification, batting stat
// folds, scoring-play aggregation and the qualitative grade ladder.

pub mod bases;
pub mod format;
pub mod grade;
pub mod scoring;
pub mod stats;

pub use bases::{BaseState, Situation};
pub use grade::{color_of, grade, grade_named, grade_with_unit, GradeStyle, RateUnit, StatGrade, StatKind};
pub use scoring::{summarize, ResultCategory, ScoringSituationSummary};
pub use stats::{compare_owners, compute_stats, stats_by_batter, BattingStats};
