use super::super::domain::{ApplicantProfile, Pathway, PriorityPreference};
use super::config::{PriorityWeighting, ScoringConfig};

pub(crate) fn base_score(config: &ScoringConfig, pathway: &Pathway) -> f64 {
    let base = config.base;
    let raw = base.start
        - base.per_transition_penalty * pathway.transition_count() as f64
        - base.per_requirement_penalty * pathway.requirement_count() as f64;
    raw.clamp(base.floor, 100.0)
}

pub(crate) fn age_multiplier(config: &ScoringConfig, age: u8) -> Option<f64> {
    config
        .age_brackets
        .iter()
        .find(|bracket| bracket.contains(age))
        .map(|bracket| bracket.multiplier)
}

pub(crate) fn nationality_multiplier(
    config: &ScoringConfig,
    profile: &ApplicantProfile,
) -> Option<f64> {
    config
        .nationality
        .get(profile.nationality.as_str())
        .copied()
}

pub(crate) fn fund_multiplier(config: &ScoringConfig, profile: &ApplicantProfile) -> Option<f64> {
    config
        .fund
        .get(&profile.available_annual_fund.bracket)
        .copied()
}

pub(crate) fn education_multiplier(
    config: &ScoringConfig,
    profile: &ApplicantProfile,
) -> Option<f64> {
    config.education.get(&profile.education_level).copied()
}

/// `None` when the preference has no weighting or lacks the reference value
/// its fitness depends on.
pub(crate) fn priority_weight(
    config: &ScoringConfig,
    preference: PriorityPreference,
    pathway: &Pathway,
) -> Option<f64> {
    let weighting = config.priority.get(&preference)?;
    let fitness = fitness(weighting, preference, pathway)?;
    Some(weighting.weight(fitness))
}

fn fitness(
    weighting: &PriorityWeighting,
    preference: PriorityPreference,
    pathway: &Pathway,
) -> Option<f64> {
    match preference {
        PriorityPreference::Fast => {
            let reference = weighting.reference_months?;
            Some(ratio(reference as f64, pathway.estimated_months as f64))
        }
        PriorityPreference::LowCost => {
            let reference = weighting.reference_cost_won?;
            Some(ratio(reference as f64, pathway.estimated_cost_won as f64))
        }
        PriorityPreference::Stability => {
            let permanent = pathway
                .final_milestone()
                .is_some_and(|milestone| milestone.permanent);
            if permanent {
                Some(1.0)
            } else {
                weighting.non_permanent_fitness
            }
        }
        PriorityPreference::Flexibility => {
            if pathway.milestones.is_empty() {
                return Some(0.0);
            }
            let flexible = pathway
                .milestones
                .iter()
                .filter(|milestone| milestone.can_work_part_time)
                .count();
            Some(flexible as f64 / pathway.milestones.len() as f64)
        }
    }
}

/// `min(1, reference / actual)`; an actual of zero is always a full fit.
fn ratio(reference: f64, actual: f64) -> f64 {
    if actual <= 0.0 {
        1.0
    } else {
        (reference / actual).min(1.0)
    }
}
