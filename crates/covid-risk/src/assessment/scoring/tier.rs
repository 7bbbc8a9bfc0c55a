use serde::{Deserialize, Serialize};

/// Ordered risk tiers; `Low` is the least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    Low,
    Moderate,
    Elevated,
    High,
    VeryHigh,
}

impl RiskTier {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Low,
            Self::Moderate,
            Self::Elevated,
            Self::High,
            Self::VeryHigh,
        ]
    }

    /// First matching threshold wins, evaluated from the top tier down.
    pub const fn from_score(score: i32) -> Self {
        if score >= 15 {
            Self::VeryHigh
        } else if score >= 10 {
            Self::High
        } else if score >= 6 {
            Self::Elevated
        } else if score >= 3 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::Elevated => "Elevated",
            Self::High => "High",
            Self::VeryHigh => "Very high",
        }
    }

    /// Display color used by history listings.
    pub const fn color(self) -> &'static str {
        match self {
            Self::Low => "darkgreen",
            Self::Moderate => "green",
            Self::Elevated => "orange",
            Self::High => "red",
            Self::VeryHigh => "darkred",
        }
    }
}
