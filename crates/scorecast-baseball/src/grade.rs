// Qualitative grade ladder for rate statistics.
//
// Every statistic kind owns an ascending table of seven cut points and a
// direction. A value is graded by counting the cut points it clears: for
// higher-is-better kinds a cut point is cleared when the value is at or above
// it, for lower-is-better kinds when the value is at or below it. Zero cleared
// cut points is `Terrible`, all seven is `Excellent`, so values outside the
// table clamp to the extreme grades.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// StatGrade
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatGrade {
    Terrible,
    Bad,
    BelowAverage,
    Average,
    AboveAverage,
    Good,
    VeryGood,
    Excellent,
}

impl StatGrade {
    /// Worst to best.
    pub const ALL: [StatGrade; 8] = [
        StatGrade::Terrible,
        StatGrade::Bad,
        StatGrade::BelowAverage,
        StatGrade::Average,
        StatGrade::AboveAverage,
        StatGrade::Good,
        StatGrade::VeryGood,
        StatGrade::Excellent,
    ];

    /// 0 (terrible) ..= 7 (excellent).
    pub fn rank(&self) -> usize {
        match self {
            StatGrade::Terrible => 0,
            StatGrade::Bad => 1,
            StatGrade::BelowAverage => 2,
            StatGrade::Average => 3,
            StatGrade::AboveAverage => 4,
            StatGrade::Good => 5,
            StatGrade::VeryGood => 6,
            StatGrade::Excellent => 7,
        }
    }

    /// Inverse of `rank`, clamping anything above 7 to `Excellent`.
    pub fn from_rank(rank: usize) -> Self {
        StatGrade::ALL[rank.min(StatGrade::ALL.len() - 1)]
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatGrade::Terrible => "Terrible",
            StatGrade::Bad => "Bad",
            StatGrade::BelowAverage => "Below Average",
            StatGrade::Average => "Average",
            StatGrade::AboveAverage => "Above Average",
            StatGrade::Good => "Good",
            StatGrade::VeryGood => "Very Good",
            StatGrade::Excellent => "Excellent",
        }
    }
}

impl fmt::Display for StatGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Presentation tokens for a grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeStyle {
    pub label: &'static str,
    pub text_color: &'static str,
    pub background_color: &'static str,
}

pub fn color_of(grade: StatGrade) -> GradeStyle {
    let (text_color, background_color) = match grade {
        StatGrade::Terrible => ("#ffffff", "#b71c1c"),
        StatGrade::Bad => ("#ffffff", "#e53935"),
        StatGrade::BelowAverage => ("#000000", "#ffab91"),
        StatGrade::Average => ("#000000", "#eeeeee"),
        StatGrade::AboveAverage => ("#000000", "#c5e1a5"),
        StatGrade::Good => ("#000000", "#81c784"),
        StatGrade::VeryGood => ("#ffffff", "#43a047"),
        StatGrade::Excellent => ("#ffffff", "#1b5e20"),
    };
    GradeStyle {
        label: grade.label(),
        text_color,
        background_color,
    }
}

// ---------------------------------------------------------------------------
// StatKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherBetter,
    LowerBetter,
}

/// The unit a ladder is expressed in, for the rate kinds whose inputs arrive
/// either as a fraction or as a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    Raw,
    Percent,
    Fraction,
}

/// Unit of an incoming rate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateUnit {
    /// Guess from the magnitude: anything above 1 is a percentage, 1.0 and
    /// below is a fraction.
    #[default]
    Infer,
    Fraction,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKind {
    Average,
    Obp,
    Slg,
    Ops,
    RispAverage,
    Era,
    Whip,
    StrikeoutRate,
    WalkRate,
    WinRate,
}

const AVERAGE_LADDER: [f64; 7] = [0.200, 0.220, 0.240, 0.260, 0.280, 0.300, 0.320];
const OBP_LADDER: [f64; 7] = [0.280, 0.300, 0.320, 0.340, 0.360, 0.380, 0.400];
const SLG_LADDER: [f64; 7] = [0.340, 0.370, 0.400, 0.430, 0.460, 0.500, 0.550];
const OPS_LADDER: [f64; 7] = [0.600, 0.650, 0.700, 0.750, 0.800, 0.850, 0.900];
const RISP_AVERAGE_LADDER: [f64; 7] = [0.200, 0.230, 0.250, 0.270, 0.290, 0.310, 0.340];
const ERA_LADDER: [f64; 7] = [2.50, 3.00, 3.50, 4.00, 4.50, 5.00, 5.50];
const WHIP_LADDER: [f64; 7] = [1.00, 1.10, 1.20, 1.30, 1.40, 1.50, 1.60];
// percent
const STRIKEOUT_RATE_LADDER: [f64; 7] = [14.0, 17.0, 20.0, 23.0, 26.0, 29.0, 32.0];
// percent
const WALK_RATE_LADDER: [f64; 7] = [5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.0];
// fraction
const WIN_RATE_LADDER: [f64; 7] = [0.350, 0.400, 0.450, 0.500, 0.550, 0.600, 0.650];

impl StatKind {
    pub const ALL: [StatKind; 10] = [
        StatKind::Average,
        StatKind::Obp,
        StatKind::Slg,
        StatKind::Ops,
        StatKind::RispAverage,
        StatKind::Era,
        StatKind::Whip,
        StatKind::StrikeoutRate,
        StatKind::WalkRate,
        StatKind::WinRate,
    ];

    /// Parse a kind name. Case, `_`, `-` and spaces are ignored, so both
    /// "rispAverage" and "risp_average" work.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "average" | "avg" | "ba" => Some(StatKind::Average),
            "obp" => Some(StatKind::Obp),
            "slg" => Some(StatKind::Slg),
            "ops" => Some(StatKind::Ops),
            "rispaverage" | "rispavg" | "risp" => Some(StatKind::RispAverage),
            "era" => Some(StatKind::Era),
            "whip" => Some(StatKind::Whip),
            "strikeoutrate" | "krate" | "k%" => Some(StatKind::StrikeoutRate),
            "walkrate" | "bbrate" | "bb%" => Some(StatKind::WalkRate),
            "winrate" | "win%" => Some(StatKind::WinRate),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Average => "AVG",
            StatKind::Obp => "OBP",
            StatKind::Slg => "SLG",
            StatKind::Ops => "OPS",
            StatKind::RispAverage => "RISP AVG",
            StatKind::Era => "ERA",
            StatKind::Whip => "WHIP",
            StatKind::StrikeoutRate => "K%",
            StatKind::WalkRate => "BB%",
            StatKind::WinRate => "Win%",
        }
    }

    pub fn direction(&self) -> Direction {
        match self {
            StatKind::Era | StatKind::Whip | StatKind::WalkRate => Direction::LowerBetter,
            _ => Direction::HigherBetter,
        }
    }

    /// Ascending cut points.
    pub fn ladder(&self) -> &'static [f64; 7] {
        match self {
            StatKind::Average => &AVERAGE_LADDER,
            StatKind::Obp => &OBP_LADDER,
            StatKind::Slg => &SLG_LADDER,
            StatKind::Ops => &OPS_LADDER,
            StatKind::RispAverage => &RISP_AVERAGE_LADDER,
            StatKind::Era => &ERA_LADDER,
            StatKind::Whip => &WHIP_LADDER,
            StatKind::StrikeoutRate => &STRIKEOUT_RATE_LADDER,
            StatKind::WalkRate => &WALK_RATE_LADDER,
            StatKind::WinRate => &WIN_RATE_LADDER,
        }
    }

    fn scale(&self) -> Scale {
        match self {
            StatKind::StrikeoutRate | StatKind::WalkRate => Scale::Percent,
            StatKind::WinRate => Scale::Fraction,
            _ => Scale::Raw,
        }
    }

    /// Bring a raw value into the unit this kind's ladder is written in.
    pub fn normalize(&self, value: f64, unit: RateUnit) -> f64 {
        match (self.scale(), unit) {
            (Scale::Raw, _) => value,
            (Scale::Percent, RateUnit::Percent) => value,
            (Scale::Percent, RateUnit::Fraction) => value * 100.0,
            (Scale::Percent, RateUnit::Infer) => {
                if value > 1.0 {
                    value
                } else {
                    value * 100.0
                }
            }
            (Scale::Fraction, RateUnit::Fraction) => value,
            (Scale::Fraction, RateUnit::Percent) => value / 100.0,
            (Scale::Fraction, RateUnit::Infer) => {
                if value > 1.0 {
                    value / 100.0
                } else {
                    value
                }
            }
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Grading
// ---------------------------------------------------------------------------

/// Grade a value, inferring the unit of rate kinds from its magnitude.
pub fn grade(value: f64, kind: StatKind) -> StatGrade {
    grade_with_unit(value, kind, RateUnit::Infer)
}

/// Grade a value whose unit is known. NaN grades as `Average`.
pub fn grade_with_unit(value: f64, kind: StatKind, unit: RateUnit) -> StatGrade {
    if value.is_nan() {
        return StatGrade::Average;
    }
    let v = kind.normalize(value, unit);
    let ladder = kind.ladder();
    let cleared = match kind.direction() {
        Direction::HigherBetter => ladder.iter().filter(|&&cut| v >= cut).count(),
        Direction::LowerBetter => ladder.iter().filter(|&&cut| v <= cut).count(),
    };
    StatGrade::from_rank(cleared)
}

/// Grade by kind name. Unknown names grade as `Average`.
pub fn grade_named(value: f64, kind: &str) -> StatGrade {
    match StatKind::from_name(kind) {
        Some(kind) => grade(value, kind),
        None => StatGrade::Average,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
