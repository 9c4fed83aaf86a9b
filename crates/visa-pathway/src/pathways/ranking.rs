use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{FeasibilityLabel, Pathway};
use super::scoring::ScoreBreakdown;

/// Lowest final score that earns each feasibility label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelThresholds {
    pub excellent: f64,
    pub good: f64,
    pub moderate: f64,
}

impl Default for LabelThresholds {
    fn default() -> Self {
        Self {
            excellent: 85.0,
            good: 65.0,
            moderate: 40.0,
        }
    }
}

impl LabelThresholds {
    pub fn label_for(&self, score: f64) -> FeasibilityLabel {
        if score >= self.excellent {
            FeasibilityLabel::Excellent
        } else if score >= self.good {
            FeasibilityLabel::Good
        } else if score >= self.moderate {
            FeasibilityLabel::Moderate
        } else {
            FeasibilityLabel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPathway {
    pub pathway: Pathway,
    pub breakdown: ScoreBreakdown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedPathway {
    pub pathway: Pathway,
    pub breakdown: ScoreBreakdown,
    pub feasibility_label: FeasibilityLabel,
}

/// Best first: higher score, then shorter, then cheaper, then pathway id.
pub fn ranking_order(left: &ScoredPathway, right: &ScoredPathway) -> Ordering {
    right
        .breakdown
        .final_score
        .total_cmp(&left.breakdown.final_score)
        .then_with(|| {
            left.pathway
                .estimated_months
                .cmp(&right.pathway.estimated_months)
        })
        .then_with(|| {
            left.pathway
                .estimated_cost_won
                .cmp(&right.pathway.estimated_cost_won)
        })
        .then_with(|| left.pathway.pathway_id.cmp(&right.pathway.pathway_id))
}

/// Sort, drop repeated visa chains, keep the best `top_n` and label them.
pub fn rank(
    mut candidates: Vec<ScoredPathway>,
    top_n: usize,
    thresholds: &LabelThresholds,
) -> Vec<RankedPathway> {
    candidates.sort_by(ranking_order);

    let mut seen_chains = BTreeSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen_chains.insert(candidate.pathway.visa_chain.clone()))
        .take(top_n)
        .map(|candidate| RankedPathway {
            feasibility_label: thresholds.label_for(candidate.breakdown.final_score),
            pathway: candidate.pathway,
            breakdown: candidate.breakdown,
        })
        .collect()
}
