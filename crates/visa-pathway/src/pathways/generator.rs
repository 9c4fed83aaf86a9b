use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::catalog::{all_hold, PathwayCatalog, Transition, VisaState};
use super::domain::{ApplicantProfile, Milestone, Pathway};

const DEFAULT_MAX_PATHWAYS: usize = 50;
const DEFAULT_MAX_EXPANSIONS: usize = 5_000;

/// Hard ceilings on generator work for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationBudget {
    /// Complete pathways kept; the shortest ones win.
    pub max_pathways: usize,
    /// Partial paths taken off the frontier before traversal stops.
    pub max_expansions: usize,
}

impl Default for GenerationBudget {
    fn default() -> Self {
        Self {
            max_pathways: DEFAULT_MAX_PATHWAYS,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
        }
    }
}

/// Un-scored pathways in ascending (months, cost, pathway id) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub pathways: Vec<Pathway>,
    pub truncated: bool,
    pub expansions: usize,
}

/// Route under construction. Ordered so the heap pops the shortest first.
#[derive(Debug, Clone)]
struct PartialPath {
    months: u32,
    cost_won: u64,
    pathway_id: String,
    milestones: Vec<Milestone>,
}

impl PartialPath {
    fn key(&self) -> (u32, u64, &str) {
        (self.months, self.cost_won, self.pathway_id.as_str())
    }

    fn start(state: &VisaState) -> Self {
        let milestone = snapshot(state, None, 0);
        Self {
            months: milestone.duration_months,
            cost_won: milestone.cost_won,
            pathway_id: state.code.clone(),
            milestones: vec![milestone],
        }
    }

    fn visited(&self, code: &str) -> bool {
        self.milestones
            .iter()
            .any(|milestone| milestone.status_code == code)
    }

    fn last_code(&self) -> &str {
        self.milestones
            .last()
            .map(|milestone| milestone.status_code.as_str())
            .unwrap_or_default()
    }

    fn extend(&self, transition: &Transition, target: &VisaState) -> Self {
        let milestone = snapshot(target, Some(transition), self.months);
        let mut milestones = self.milestones.clone();
        let months = self.months + milestone.duration_months;
        let cost_won = self.cost_won + milestone.cost_won;
        milestones.push(milestone);

        Self {
            months,
            cost_won,
            pathway_id: format!("{}/{}", self.pathway_id, transition.id),
            milestones,
        }
    }

    fn to_pathway(&self) -> Pathway {
        Pathway {
            pathway_id: self.pathway_id.clone(),
            visa_chain: self
                .milestones
                .iter()
                .map(|milestone| milestone.status_code.clone())
                .collect(),
            estimated_months: self.months,
            estimated_cost_won: self.cost_won,
            milestones: self.milestones.clone(),
        }
    }
}

impl PartialEq for PartialPath {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for PartialPath {}

impl Ord for PartialPath {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl PartialOrd for PartialPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn snapshot(state: &VisaState, via: Option<&Transition>, month_from_start: u32) -> Milestone {
    let processing = via.map_or(0, |transition| transition.processing_months);
    let transition_cost = via.map_or(0, |transition| transition.cost_won);

    Milestone {
        status_code: state.code.clone(),
        display_names: state.names.clone(),
        month_from_start,
        duration_months: state.base_duration_months + processing,
        cost_won: state.cost_won + transition_cost,
        can_work_part_time: state.can_work_part_time,
        max_work_hours_per_week: state.max_work_hours_per_week,
        estimated_monthly_income: state.estimated_monthly_income,
        requirements: state.requirements.clone(),
        terminal: state.terminal,
        permanent: state.permanent,
        via_transition: via.map(|transition| transition.id.clone()),
    }
}

/// Enumerate eligible start-to-terminal pathways for the applicant's goal.
///
/// Partial paths are expanded shortest-first, so when a budget runs out the
/// pathways already emitted are exactly the shortest ones and the same set is
/// returned on every call. A pathway is emitted whenever a terminal status is
/// reached; traversal continues through terminals that have onward edges.
pub fn generate(
    catalog: &PathwayCatalog,
    profile: &ApplicantProfile,
    budget: GenerationBudget,
) -> Generation {
    let mut frontier: BinaryHeap<Reverse<PartialPath>> = catalog
        .start_states(profile.final_goal)
        .into_iter()
        .filter(|state| all_hold(&state.entry_rules, profile))
        .map(|state| Reverse(PartialPath::start(state)))
        .collect();

    let mut pathways = Vec::new();
    let mut expansions = 0;
    let mut truncated = false;

    while let Some(Reverse(partial)) = frontier.pop() {
        if pathways.len() >= budget.max_pathways || expansions >= budget.max_expansions {
            truncated = true;
            break;
        }
        expansions += 1;

        let current = partial.last_code();
        if catalog.is_terminal(current) {
            pathways.push(partial.to_pathway());
        }

        for transition in catalog.transitions_from(current) {
            if partial.visited(&transition.to) || !all_hold(&transition.rules, profile) {
                continue;
            }
            if let Some(target) = catalog.state(&transition.to) {
                frontier.push(Reverse(partial.extend(transition, target)));
            }
        }
    }

    Generation {
        pathways,
        truncated,
        expansions,
    }
}
