use serde::{Deserialize, Serialize};

use super::domain::{Milestone, Pathway};

/// One actionable step toward the next milestone of a pathway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    pub order: u32,
    pub status_code: String,
    pub month_from_start: u32,
    pub action: String,
    pub checklist: Vec<String>,
}

/// Up to `limit` steps, one per upcoming milestone in pathway order.
pub fn next_steps(pathway: &Pathway, limit: usize) -> Vec<NextStep> {
    pathway
        .milestones
        .iter()
        .take(limit)
        .zip(1..)
        .map(|(milestone, order)| NextStep {
            order,
            status_code: milestone.status_code.clone(),
            month_from_start: milestone.month_from_start,
            action: action_for(milestone),
            checklist: milestone.requirements.clone(),
        })
        .collect()
}

fn action_for(milestone: &Milestone) -> String {
    let name = &milestone.display_names.en;
    match &milestone.via_transition {
        None => format!("Apply for {} ({name})", milestone.status_code),
        Some(transition) => format!(
            "Change status to {} ({name}) around month {} via {transition}",
            milestone.status_code, milestone.month_from_start
        ),
    }
}
