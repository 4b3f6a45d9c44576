// Per-plate-appearance event records as delivered by the analysis API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Runner identifier → base number (1, 2 or 3). Any other base number is
/// carried through untouched and ignored by occupancy classification.
pub type Runners = BTreeMap<String, i64>;

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// Which tracked party produced an at-bat. Stats are split on this to build
/// the two sides of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    #[default]
    Primary,
    Secondary,
}

impl Owner {
    pub const ALL: [Owner; 2] = [Owner::Primary, Owner::Secondary];

    /// Default display label, used when the game metadata carries none.
    pub fn label(&self) -> &'static str {
        match self {
            Owner::Primary => "Primary",
            Owner::Secondary => "Secondary",
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// At-bat result
// ---------------------------------------------------------------------------

/// Outcome of a plate appearance.
///
/// Deserializes from the API's snake_case tokens as well as the free-text
/// spellings that show up in older documents ("Home Run", "sac fly").
/// Anything unrecognised becomes `Unknown` instead of failing the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AtBatResult {
    Single,
    Double,
    Triple,
    HomeRun,
    Walk,
    Strikeout,
    Out,
    SacrificeOut,
    SacrificeFlyOut,
    Error,
    Unknown,
}

impl AtBatResult {
    /// Parse a result token or free-text description.
    pub fn parse(text: &str) -> Self {
        let normalized = text
            .trim()
            .to_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "single" | "1b" => AtBatResult::Single,
            "double" | "2b" => AtBatResult::Double,
            "triple" | "3b" => AtBatResult::Triple,
            "home run" | "homerun" | "homer" | "hr" => AtBatResult::HomeRun,
            "walk" | "base on balls" | "intentional walk" | "bb" => AtBatResult::Walk,
            "strikeout" | "strike out" | "struck out" | "k" => AtBatResult::Strikeout,
            "out" | "ground out" | "groundout" | "fly out" | "flyout" | "line out"
            | "lineout" | "pop out" | "popout" => AtBatResult::Out,
            "sacrifice out" | "sacrifice bunt" | "sac bunt" => AtBatResult::SacrificeOut,
            "sacrifice fly out" | "sacrifice fly" | "sac fly" => AtBatResult::SacrificeFlyOut,
            "error" | "reached on error" => AtBatResult::Error,
            _ => AtBatResult::Unknown,
        }
    }

    /// Wire token (snake_case).
    pub fn token(&self) -> &'static str {
        match self {
            AtBatResult::Single => "single",
            AtBatResult::Double => "double",
            AtBatResult::Triple => "triple",
            AtBatResult::HomeRun => "home_run",
            AtBatResult::Walk => "walk",
            AtBatResult::Strikeout => "strikeout",
            AtBatResult::Out => "out",
            AtBatResult::SacrificeOut => "sacrifice_out",
            AtBatResult::SacrificeFlyOut => "sacrifice_fly_out",
            AtBatResult::Error => "error",
            AtBatResult::Unknown => "unknown",
        }
    }

    /// Lowercase result text, the form text-based categorisation works on.
    pub fn description(&self) -> &'static str {
        match self {
            AtBatResult::Single => "single",
            AtBatResult::Double => "double",
            AtBatResult::Triple => "triple",
            AtBatResult::HomeRun => "home run",
            AtBatResult::Walk => "walk",
            AtBatResult::Strikeout => "strikeout",
            AtBatResult::Out => "out",
            AtBatResult::SacrificeOut => "sacrifice out",
            AtBatResult::SacrificeFlyOut => "sacrifice fly out",
            AtBatResult::Error => "error",
            AtBatResult::Unknown => "unknown",
        }
    }

    /// Title-case label for tables.
    pub fn display_str(&self) -> &'static str {
        match self {
            AtBatResult::Single => "Single",
            AtBatResult::Double => "Double",
            AtBatResult::Triple => "Triple",
            AtBatResult::HomeRun => "Home Run",
            AtBatResult::Walk => "Walk",
            AtBatResult::Strikeout => "Strikeout",
            AtBatResult::Out => "Out",
            AtBatResult::SacrificeOut => "Sacrifice Out",
            AtBatResult::SacrificeFlyOut => "Sacrifice Fly Out",
            AtBatResult::Error => "Error",
            AtBatResult::Unknown => "Unknown",
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            AtBatResult::Single | AtBatResult::Double | AtBatResult::Triple | AtBatResult::HomeRun
        )
    }

    /// Whether the plate appearance counts toward the at-bat denominator.
    /// Walks are plate appearances but not at-bats.
    pub fn is_at_bat(&self) -> bool {
        !matches!(self, AtBatResult::Walk)
    }

    /// Bases credited to the batter: single=1 .. home run=4, otherwise 0.
    pub fn total_bases(&self) -> u32 {
        match self {
            AtBatResult::Single => 1,
            AtBatResult::Double => 2,
            AtBatResult::Triple => 3,
            AtBatResult::HomeRun => 4,
            _ => 0,
        }
    }
}

impl From<String> for AtBatResult {
    fn from(value: String) -> Self {
        AtBatResult::parse(&value)
    }
}

impl From<AtBatResult> for String {
    fn from(value: AtBatResult) -> Self {
        value.token().to_string()
    }
}

impl fmt::Display for AtBatResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

// ---------------------------------------------------------------------------
// At-bat event
// ---------------------------------------------------------------------------

fn default_top_half() -> bool {
    true
}

/// One plate appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtBatEvent {
    pub batter: String,
    pub inning: u32,
    #[serde(default = "default_top_half")]
    pub is_top_half: bool,
    /// Outs recorded before the plate appearance (0..=2).
    pub outs_before: u8,
    #[serde(default)]
    pub runners_before: Runners,
    pub result: AtBatResult,
    #[serde(default)]
    pub rbi: u32,
    #[serde(default)]
    pub owner: Owner,
    /// Free-text play description lines. Display only.
    #[serde(default)]
    pub log: Vec<String>,
}

impl AtBatEvent {
    /// A first-inning, nobody-out, bases-empty plate appearance for the
    /// primary owner. Chain the `with_*` helpers to fill in the situation.
    pub fn new(batter: impl Into<String>, result: AtBatResult) -> Self {
        AtBatEvent {
            batter: batter.into(),
            inning: 1,
            is_top_half: true,
            outs_before: 0,
            runners_before: Runners::new(),
            result,
            rbi: 0,
            owner: Owner::Primary,
            log: Vec::new(),
        }
    }

    pub fn with_inning(mut self, inning: u32, is_top_half: bool) -> Self {
        self.inning = inning;
        self.is_top_half = is_top_half;
        self
    }

    pub fn with_outs(mut self, outs_before: u8) -> Self {
        self.outs_before = outs_before;
        self
    }

    pub fn with_runner(mut self, runner: impl Into<String>, base: i64) -> Self {
        self.runners_before.insert(runner.into(), base);
        self
    }

    pub fn with_rbi(mut self, rbi: u32) -> Self {
        self.rbi = rbi;
        self
    }

    pub fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_log(mut self, line: impl Into<String>) -> Self {
        self.log.push(line.into());
        self
    }

    /// Whether this plate appearance drove in at least one run.
    pub fn is_scoring_play(&self) -> bool {
        self.rbi > 0
    }

    /// "Top 3" / "Bot 7" style half-inning label.
    pub fn half_inning_label(&self) -> String {
        let half = if self.is_top_half { "Top" } else { "Bot" };
        format!("{half} {}", self.inning)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
