//! Tactical tag vocabulary and the tag set

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One discrete aspect of the geometric relationship between the duelists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TacticalTag {
    CloseRange,
    MediumRange,
    FarRange,
    HighGroundAdvantage,
    LowGroundDisadvantage,
    BehindCover,
    TargetMoving,
    TargetAirborne,
}

impl TacticalTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CloseRange => "close_range",
            Self::MediumRange => "medium_range",
            Self::FarRange => "far_range",
            Self::HighGroundAdvantage => "high_ground_advantage",
            Self::LowGroundDisadvantage => "low_ground_disadvantage",
            Self::BehindCover => "behind_cover",
            Self::TargetMoving => "target_moving",
            Self::TargetAirborne => "target_airborne",
        }
    }

    /// Phrase used when describing the situation in prose
    ///
    /// Height tags are named from the classifier's measurement: the high
    /// ground tag means the opponent sits above the AI.
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::CloseRange => "opponent at close range",
            Self::MediumRange => "opponent at medium range",
            Self::FarRange => "opponent at long range",
            Self::HighGroundAdvantage => "opponent is above us",
            Self::LowGroundDisadvantage => "opponent is below us",
            Self::BehindCover => "opponent is behind cover",
            Self::TargetMoving => "opponent is moving",
            Self::TargetAirborne => "opponent is airborne",
        }
    }
}

impl std::fmt::Display for TacticalTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unordered set of tactical tags
///
/// Backed by a `BTreeSet` so iteration and descriptions are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TacticalTags(BTreeSet<TacticalTag>);

impl TacticalTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: TacticalTag) -> bool {
        self.0.insert(tag)
    }

    pub fn contains(&self, tag: TacticalTag) -> bool {
        self.0.contains(&tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = TacticalTag> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Natural-language summary for advisory prompts
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "no notable tactical features".to_string();
        }
        self.iter().map(|t| t.phrase()).collect::<Vec<_>>().join(", ")
    }
}

impl FromIterator<TacticalTag> for TacticalTags {
    fn from_iter<I: IntoIterator<Item = TacticalTag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl std::fmt::Display for TacticalTags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let labels: Vec<_> = self.iter().map(|t| t.as_str()).collect();
        write!(f, "[{}]", labels.join(", "))
    }
}
