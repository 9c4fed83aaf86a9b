mod config;
mod rules;

pub use config::{AgeBracket, BaseScoring, MultiplierBounds, PriorityWeighting, ScoringConfig};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::{ApplicantProfile, Pathway};

const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Profile or pathway attribute a multiplier is looked up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreDimension {
    #[serde(rename = "AGE")]
    Age,
    #[serde(rename = "NATIONALITY")]
    Nationality,
    #[serde(rename = "FUND")]
    Fund,
    #[serde(rename = "EDUCATION")]
    Education,
    #[serde(rename = "PRIORITY")]
    Priority,
}

impl ScoreDimension {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Nationality => "nationality",
            Self::Fund => "fund",
            Self::Education => "education",
            Self::Priority => "priority",
        }
    }
}

/// A table lookup that missed and was replaced by the neutral multiplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSubstitution {
    pub dimension: ScoreDimension,
    pub key: String,
}

/// Every factor behind a final score, kept for audits and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub base: f64,
    pub age_multiplier: f64,
    pub nationality_multiplier: f64,
    pub fund_multiplier: f64,
    pub education_multiplier: f64,
    pub priority_weight: f64,
    pub final_score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substitutions: Vec<ScoringSubstitution>,
}

/// Stateless scorer that applies the weighting tables to one pathway at a time.
#[derive(Debug, Clone)]
pub struct PathwayScorer {
    config: Arc<ScoringConfig>,
}

impl PathwayScorer {
    pub fn new(config: Arc<ScoringConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score(&self, profile: &ApplicantProfile, pathway: &Pathway) -> ScoreBreakdown {
        let config = self.config.as_ref();
        let mut substitutions = Vec::new();
        let mut resolve = |dimension: ScoreDimension, key: String, found: Option<f64>| match found {
            Some(value) => config.multiplier_bounds.clamp(value),
            None => {
                warn!(
                    dimension = dimension.label(),
                    key = %key,
                    pathway_id = %pathway.pathway_id,
                    scoring_version = %config.version,
                    "scoring table entry missing; substituting neutral multiplier"
                );
                substitutions.push(ScoringSubstitution { dimension, key });
                NEUTRAL_MULTIPLIER
            }
        };

        let base = rules::base_score(config, pathway);
        let age_multiplier = resolve(
            ScoreDimension::Age,
            profile.age.to_string(),
            rules::age_multiplier(config, profile.age),
        );
        let nationality_multiplier = resolve(
            ScoreDimension::Nationality,
            profile.nationality.to_string(),
            rules::nationality_multiplier(config, profile),
        );
        let fund_multiplier = resolve(
            ScoreDimension::Fund,
            profile.available_annual_fund.bracket.code().to_string(),
            rules::fund_multiplier(config, profile),
        );
        let education_multiplier = resolve(
            ScoreDimension::Education,
            profile.education_level.code().to_string(),
            rules::education_multiplier(config, profile),
        );
        let priority_weight = resolve(
            ScoreDimension::Priority,
            profile.priority_preference.code().to_string(),
            rules::priority_weight(config, profile.priority_preference, pathway),
        );

        let product = age_multiplier
            * nationality_multiplier
            * fund_multiplier
            * education_multiplier
            * priority_weight;
        let final_score = round_score((base * product).clamp(0.0, 100.0));

        ScoreBreakdown {
            base,
            age_multiplier,
            nationality_multiplier,
            fund_multiplier,
            education_multiplier,
            priority_weight,
            final_score,
            substitutions,
        }
    }
}

fn round_score(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
