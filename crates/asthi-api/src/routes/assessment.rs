use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;

use asthi_assessment::content::ContentBundle;
use asthi_assessment::scoring::BiomarkerInput;
use asthi_assessment::tier::RiskTier;
use asthi_assessment::{assess, Assessment};
use asthi_core::models::language::Language;

use crate::error::ApiError;

/// Questionnaire submission. Absent or `null` measurements count as zero;
/// a browser serializes an unparsable number field as `null`.
#[derive(Deserialize)]
pub struct AssessmentRequest {
    #[serde(default)]
    pub grip_strength: Option<f64>,
    #[serde(default)]
    pub walking_speed: Option<f64>,
    #[serde(default)]
    pub muscle_mass: Option<f64>,
    #[serde(default)]
    pub language: Language,
}

#[derive(Deserialize)]
pub struct LanguageQuery {
    #[serde(default)]
    pub language: Language,
}

pub async fn create_assessment(
    payload: Result<Json<AssessmentRequest>, JsonRejection>,
) -> Result<Json<Assessment>, ApiError> {
    let Json(req) = payload?;
    let input = BiomarkerInput {
        grip_strength: req.grip_strength.unwrap_or(0.0),
        walking_speed: req.walking_speed.unwrap_or(0.0),
        muscle_mass: req.muscle_mass.unwrap_or(0.0),
    };

    let assessment = assess(&input, req.language);
    tracing::info!(
        phase = assessment.tier.phase(),
        total = assessment.scores.total,
        "assessment classified"
    );

    Ok(Json(assessment))
}

/// Content for one phase, for clients that classify locally. Any segment
/// other than 1, 2 or 3 is a 404.
pub async fn get_tier_bundle(
    Path(phase): Path<String>,
    query: Result<Query<LanguageQuery>, QueryRejection>,
) -> Result<Json<ContentBundle>, ApiError> {
    let Query(query) = query?;
    let tier: RiskTier = phase.parse()?;
    Ok(Json(tier.bundle(query.language)))
}
