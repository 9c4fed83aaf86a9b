use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::assembler::{assemble, DiagnosisMeta, DiagnosisResult};
use super::catalog::PathwayCatalog;
use super::domain::ApplicantProfileInput;
use super::error::{ConfigurationError, InputValidationError};
use super::generator::{generate, GenerationBudget};
use super::normalizer::{NormalizerPolicy, ProfileNormalizer};
use super::ranking::{rank, ScoredPathway};
use super::scoring::{PathwayScorer, ScoringConfig};

const DEFAULT_TOP_N: usize = 5;
const DEFAULT_NEXT_STEPS: usize = 3;

/// Per-request limits and policies applied by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub top_n: usize,
    pub max_pathways: usize,
    pub max_expansions: usize,
    pub next_steps_limit: usize,
    pub normalizer: NormalizerPolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        let budget = GenerationBudget::default();
        Self {
            top_n: DEFAULT_TOP_N,
            max_pathways: budget.max_pathways,
            max_expansions: budget.max_expansions,
            next_steps_limit: DEFAULT_NEXT_STEPS,
            normalizer: NormalizerPolicy::default(),
        }
    }
}

impl EngineSettings {
    pub fn budget(&self) -> GenerationBudget {
        GenerationBudget {
            max_pathways: self.max_pathways,
            max_expansions: self.max_expansions,
        }
    }
}

/// Normalize, generate, score, rank and assemble in one call.
///
/// Holds only immutable shared state, so one engine serves every request.
#[derive(Debug, Clone)]
pub struct PathwayEngine {
    catalog: Arc<PathwayCatalog>,
    scorer: PathwayScorer,
    normalizer: ProfileNormalizer,
    settings: EngineSettings,
}

impl PathwayEngine {
    pub fn new(
        catalog: Arc<PathwayCatalog>,
        scoring: Arc<ScoringConfig>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            catalog,
            scorer: PathwayScorer::new(scoring),
            normalizer: ProfileNormalizer::with_policy(settings.normalizer),
            settings,
        }
    }

    /// Engine over the catalog and scoring tables shipped with the crate.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Ok(Self::new(
            Arc::new(PathwayCatalog::standard()?),
            Arc::new(ScoringConfig::standard()?),
            EngineSettings::default(),
        ))
    }

    pub fn catalog(&self) -> &PathwayCatalog {
        &self.catalog
    }

    pub fn scoring(&self) -> &ScoringConfig {
        self.scorer.config()
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Deterministic for a given input, catalog and scoring table.
    pub fn evaluate(
        &self,
        input: &ApplicantProfileInput,
    ) -> Result<DiagnosisResult, InputValidationError> {
        self.run(input, None)
    }

    /// Same as [`evaluate`](Self::evaluate), stamping `evaluated_on`.
    pub fn evaluate_on(
        &self,
        input: &ApplicantProfileInput,
        date: NaiveDate,
    ) -> Result<DiagnosisResult, InputValidationError> {
        self.run(input, Some(date))
    }

    fn run(
        &self,
        input: &ApplicantProfileInput,
        evaluated_on: Option<NaiveDate>,
    ) -> Result<DiagnosisResult, InputValidationError> {
        let profile = match self.normalizer.normalize(input) {
            Ok(profile) => profile,
            Err(error) => {
                debug!(fields = ?error.fields(), "applicant profile rejected");
                return Err(error);
            }
        };

        let generation = generate(&self.catalog, &profile, self.settings.budget());
        let total_pathways_evaluated = generation.pathways.len();

        let scored: Vec<ScoredPathway> = generation
            .pathways
            .into_iter()
            .map(|pathway| ScoredPathway {
                breakdown: self.scorer.score(&profile, &pathway),
                pathway,
            })
            .collect();

        let ranked = rank(scored, self.settings.top_n, &self.scoring().labels);

        info!(
            goal = profile.final_goal.code(),
            preference = profile.priority_preference.code(),
            generated = total_pathways_evaluated,
            returned = ranked.len(),
            truncated = generation.truncated,
            expansions = generation.expansions,
            "pathway diagnosis evaluated"
        );

        let meta = DiagnosisMeta {
            total_pathways_evaluated,
            catalog_version: self.catalog.version().to_string(),
            scoring_version: self.scoring().version.clone(),
            generation_truncated: generation.truncated,
            evaluated_on,
        };

        Ok(assemble(ranked, meta, self.settings.next_steps_limit))
    }
}
