// Base-occupancy classification.
//
// Turns the sparse runner → base map carried by each at-bat into three
// occupancy flags and one of eight named base situations.

use scorecast_core::event::{AtBatEvent, Runners};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FIRST_BASE: i64 = 1;
pub const SECOND_BASE: i64 = 2;
pub const THIRD_BASE: i64 = 3;

// ---------------------------------------------------------------------------
// Situation
// ---------------------------------------------------------------------------

/// The eight mutually exclusive base-occupancy shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Situation {
    Empty,
    First,
    Second,
    Third,
    FirstSecond,
    FirstThird,
    SecondThird,
    Loaded,
}

impl Situation {
    /// Canonical table order. `index()` is the position in this array.
    pub const ALL: [Situation; 8] = [
        Situation::Empty,
        Situation::First,
        Situation::Second,
        Situation::Third,
        Situation::FirstSecond,
        Situation::FirstThird,
        Situation::SecondThird,
        Situation::Loaded,
    ];

    /// Direct lookup from the occupancy triple. Every triple maps to exactly
    /// one shape.
    pub fn from_occupancy(on_first: bool, on_second: bool, on_third: bool) -> Self {
        match (on_first, on_second, on_third) {
            (false, false, false) => Situation::Empty,
            (true, false, false) => Situation::First,
            (false, true, false) => Situation::Second,
            (false, false, true) => Situation::Third,
            (true, true, false) => Situation::FirstSecond,
            (true, false, true) => Situation::FirstThird,
            (false, true, true) => Situation::SecondThird,
            (true, true, true) => Situation::Loaded,
        }
    }

    /// Kebab-case token ("first-third", "loaded").
    pub fn label(&self) -> &'static str {
        match self {
            Situation::Empty => "empty",
            Situation::First => "first",
            Situation::Second => "second",
            Situation::Third => "third",
            Situation::FirstSecond => "first-second",
            Situation::FirstThird => "first-third",
            Situation::SecondThird => "second-third",
            Situation::Loaded => "loaded",
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Situation::Empty => "Bases Empty",
            Situation::First => "Runner on 1st",
            Situation::Second => "Runner on 2nd",
            Situation::Third => "Runner on 3rd",
            Situation::FirstSecond => "Runners on 1st & 2nd",
            Situation::FirstThird => "Runners on 1st & 3rd",
            Situation::SecondThird => "Runners on 2nd & 3rd",
            Situation::Loaded => "Bases Loaded",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Situation::Empty => 0,
            Situation::First => 1,
            Situation::Second => 2,
            Situation::Third => 3,
            Situation::FirstSecond => 4,
            Situation::FirstThird => 5,
            Situation::SecondThird => 6,
            Situation::Loaded => 7,
        }
    }

    pub fn runner_count(&self) -> usize {
        match self {
            Situation::Empty => 0,
            Situation::First | Situation::Second | Situation::Third => 1,
            Situation::FirstSecond | Situation::FirstThird | Situation::SecondThird => 2,
            Situation::Loaded => 3,
        }
    }

    /// A runner on second or third.
    pub fn in_scoring_position(&self) -> bool {
        !matches!(self, Situation::Empty | Situation::First)
    }
}

impl fmt::Display for Situation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// BaseState
// ---------------------------------------------------------------------------

/// Occupancy before a plate appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BaseState {
    pub on_first: bool,
    pub on_second: bool,
    pub on_third: bool,
    pub situation: Situation,
}

impl BaseState {
    /// Classify a runner map. Runner identity is irrelevant; base numbers
    /// outside 1..=3 occupy nothing.
    pub fn classify(runners_before: &Runners) -> Self {
        let mut on_first = false;
        let mut on_second = false;
        let mut on_third = false;

        for &base in runners_before.values() {
            match base {
                FIRST_BASE => on_first = true,
                SECOND_BASE => on_second = true,
                THIRD_BASE => on_third = true,
                _ => {}
            }
        }

        BaseState {
            on_first,
            on_second,
            on_third,
            situation: Situation::from_occupancy(on_first, on_second, on_third),
        }
    }

    /// Classify the pre-at-bat state of an event.
    pub fn of(event: &AtBatEvent) -> Self {
        Self::classify(&event.runners_before)
    }

    pub fn in_scoring_position(&self) -> bool {
        self.on_second || self.on_third
    }

    /// Runner in scoring position with two outs already recorded.
    pub fn is_clutch(&self, outs_before: u8) -> bool {
        self.in_scoring_position() && outs_before == 2
    }
}

/// Runners standing on `base`, in identifier order.
pub fn runners_on(runners_before: &Runners, base: i64) -> Vec<&str> {
    runners_before
        .iter()
        .filter(|(_, &b)| b == base)
        .map(|(name, _)| name.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
