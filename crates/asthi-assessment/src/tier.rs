use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use asthi_core::models::language::Language;

use crate::content::{self, ContentBundle};
use crate::error::AssessmentError;

/// Sarcopenia risk phase. Serialized as its number, 1 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RiskTier {
    /// Phase 1: indicators suggest sarcopenia risk.
    NeedsAttention = 1,
    /// Phase 2: moderate muscle weakness.
    ModerateConcern = 2,
    /// Phase 3: muscle health in a good range.
    GoodCondition = 3,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [
        RiskTier::NeedsAttention,
        RiskTier::ModerateConcern,
        RiskTier::GoodCondition,
    ];

    /// Map a total score to a tier: 8 and up is good, 5 to 7 moderate,
    /// anything lower needs attention.
    pub fn from_score(total: u8) -> Self {
        if total >= 8 {
            RiskTier::GoodCondition
        } else if total >= 5 {
            RiskTier::ModerateConcern
        } else {
            RiskTier::NeedsAttention
        }
    }

    pub fn phase(self) -> u8 {
        self as u8
    }

    /// Advisory text and training videos for this tier.
    pub fn bundle(self, language: Language) -> ContentBundle {
        content::bundle_for(self, language)
    }
}

impl From<RiskTier> for u8 {
    fn from(tier: RiskTier) -> Self {
        tier.phase()
    }
}

impl TryFrom<u8> for RiskTier {
    type Error = AssessmentError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RiskTier::NeedsAttention),
            2 => Ok(RiskTier::ModerateConcern),
            3 => Ok(RiskTier::GoodCondition),
            other => Err(AssessmentError::UnknownTier(other.to_string())),
        }
    }
}

/// Parse a phase number as it appears in a URL path.
impl FromStr for RiskTier {
    type Err = AssessmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| AssessmentError::UnknownTier(s.to_string()))
            .and_then(RiskTier::try_from)
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {}", self.phase())
    }
}
