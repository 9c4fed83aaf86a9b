//! Pathway diagnosis: from a raw applicant profile to ranked, explainable
//! sequences of visa statuses.
//!
//! The pipeline runs normalizer, generator, scorer, ranker and assembler in
//! that order. The catalog and scoring tables are loaded once and shared
//! read-only; everything else lives for a single request.

pub mod advice;
pub mod assembler;
pub mod catalog;
pub mod domain;
pub mod engine;
pub mod error;
pub mod generator;
pub mod normalizer;
pub mod ranking;
pub mod router;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use advice::NextStep;
pub use assembler::{DiagnosisMeta, DiagnosisResult, PathwayResult};
pub use catalog::{
    CatalogDocument, CatalogSummary, EligibilityRule, PathwayCatalog, StartStatesEntry,
    Transition, VisaState,
};
pub use domain::{
    AnnualFund, ApplicantProfile, ApplicantProfileInput, CountryCode, EducationLevel,
    FeasibilityLabel, FinalGoal, FundBracket, LocalizedName, Milestone, Pathway,
    PriorityPreference,
};
pub use engine::{EngineSettings, PathwayEngine};
pub use error::{ConfigurationError, FieldViolation, InputValidationError};
pub use generator::{generate, Generation, GenerationBudget};
pub use normalizer::{NormalizerPolicy, ProfileNormalizer};
pub use ranking::{rank, LabelThresholds, RankedPathway, ScoredPathway};
pub use router::pathway_router;
pub use scoring::{
    PathwayScorer, ScoreBreakdown, ScoreDimension, ScoringConfig, ScoringSubstitution,
};
