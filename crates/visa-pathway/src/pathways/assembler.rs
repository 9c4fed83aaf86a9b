use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::advice::{next_steps, NextStep};
use super::domain::{FeasibilityLabel, LocalizedName, Milestone};
use super::ranking::RankedPathway;
use super::scoring::ScoreBreakdown;

/// A ranked pathway as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayResult {
    pub pathway_id: String,
    pub display_names: LocalizedName,
    pub visa_chain: Vec<String>,
    pub visa_chain_label: String,
    pub estimated_months: u32,
    pub estimated_cost_won: u64,
    pub final_score: f64,
    pub score_breakdown: ScoreBreakdown,
    pub feasibility_label: FeasibilityLabel,
    pub milestones: Vec<Milestone>,
    pub next_steps: Vec<NextStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisMeta {
    /// Pathways generated before deduplication and truncation.
    pub total_pathways_evaluated: usize,
    pub catalog_version: String,
    pub scoring_version: String,
    pub generation_truncated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluated_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub pathways: Vec<PathwayResult>,
    pub meta: DiagnosisMeta,
}

impl DiagnosisResult {
    pub fn top(&self) -> Option<&PathwayResult> {
        self.pathways.first()
    }

    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty()
    }
}

pub(crate) fn assemble(
    ranked: Vec<RankedPathway>,
    meta: DiagnosisMeta,
    next_steps_limit: usize,
) -> DiagnosisResult {
    let pathways = ranked
        .into_iter()
        .map(|ranked| {
            let pathway = ranked.pathway;
            PathwayResult {
                display_names: pathway.display_names(),
                visa_chain_label: pathway.visa_chain_label(),
                next_steps: next_steps(&pathway, next_steps_limit),
                final_score: ranked.breakdown.final_score,
                score_breakdown: ranked.breakdown,
                feasibility_label: ranked.feasibility_label,
                pathway_id: pathway.pathway_id,
                visa_chain: pathway.visa_chain,
                estimated_months: pathway.estimated_months,
                estimated_cost_won: pathway.estimated_cost_won,
                milestones: pathway.milestones,
            }
        })
        .collect();

    DiagnosisResult { pathways, meta }
}
