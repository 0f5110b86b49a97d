//! asthi-assessment
//!
//! Sarcopenia risk classification. Pure data and arithmetic; no I/O.
//! Three measurements are banded into sub-scores, summed, and the total
//! picks one of three risk phases, each with fixed advisory content.

pub mod content;
pub mod error;
pub mod scoring;
pub mod tier;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use asthi_core::models::language::Language;
use content::ContentBundle;
use scoring::{BiomarkerInput, SubScores};
use tier::RiskTier;

/// Classify three raw measurements into a risk phase.
///
/// Total over all inputs, including negative, zero and NaN values.
pub fn classify(grip_strength: f64, walking_speed: f64, muscle_mass: f64) -> RiskTier {
    let input = BiomarkerInput {
        grip_strength,
        walking_speed,
        muscle_mass,
    };
    RiskTier::from_score(scoring::score(&input).total)
}

/// Result of one questionnaire submission, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    #[ts(type = "1 | 2 | 3")]
    pub tier: RiskTier,
    pub scores: SubScores,
    pub language: Language,
    pub bundle: ContentBundle,
}

pub fn assess(input: &BiomarkerInput, language: Language) -> Assessment {
    let scores = scoring::score(input);
    let tier = RiskTier::from_score(scores.total);
    Assessment {
        tier,
        scores,
        language,
        bundle: tier.bundle(language),
    }
}
