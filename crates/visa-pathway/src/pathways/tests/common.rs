use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::pathways::catalog::{
    CatalogDocument, EligibilityRule, PathwayCatalog, Transition, VisaState,
};
use crate::pathways::domain::{
    ApplicantProfile, ApplicantProfileInput, FinalGoal, LocalizedName, PriorityPreference,
};
use crate::pathways::engine::{EngineSettings, PathwayEngine};
use crate::pathways::normalizer::ProfileNormalizer;
use crate::pathways::scoring::ScoringConfig;

/// Scenario profile: a 23-year-old Vietnamese graduate aiming to work.
pub(super) fn work_input(priority: &str) -> ApplicantProfileInput {
    ApplicantProfileInput {
        nationality: Some(json!("VN")),
        age: Some(json!(23)),
        education_level: Some(json!("BACHELOR")),
        available_annual_fund: Some(json!("BETWEEN_10M_30M")),
        final_goal: Some(json!("WORK")),
        priority_preference: Some(json!(priority)),
    }
}

pub(super) fn work_profile(priority: &str) -> ApplicantProfile {
    ProfileNormalizer::default()
        .normalize(&work_input(priority))
        .expect("scenario profile is valid")
}

pub(super) fn profile_with(goal: FinalGoal, preference: PriorityPreference) -> ApplicantProfile {
    let mut profile = work_profile("FAST");
    profile.final_goal = goal;
    profile.priority_preference = preference;
    profile
}

pub(super) fn standard_catalog() -> PathwayCatalog {
    PathwayCatalog::standard().expect("standard catalog loads")
}

pub(super) fn standard_scoring() -> ScoringConfig {
    ScoringConfig::standard().expect("standard scoring loads")
}

pub(super) fn standard_engine() -> PathwayEngine {
    engine_with(standard_catalog(), EngineSettings::default())
}

pub(super) fn engine_with(catalog: PathwayCatalog, settings: EngineSettings) -> PathwayEngine {
    PathwayEngine::new(Arc::new(catalog), Arc::new(standard_scoring()), settings)
}

pub(super) fn state(code: &str, months: u32) -> VisaState {
    VisaState {
        code: code.to_string(),
        names: LocalizedName {
            en: format!("{code} status"),
            ko: format!("{code} 체류"),
        },
        can_work_part_time: false,
        max_work_hours_per_week: 0,
        estimated_monthly_income: 0,
        base_duration_months: months,
        cost_won: 1_000_000,
        requirements: vec![format!("{code} application form")],
        terminal: false,
        permanent: false,
        start_goals: Vec::new(),
        entry_rules: Vec::new(),
    }
}

pub(super) fn start(code: &str, months: u32, goals: &[FinalGoal]) -> VisaState {
    VisaState {
        start_goals: goals.to_vec(),
        ..state(code, months)
    }
}

pub(super) fn terminal(code: &str, months: u32) -> VisaState {
    VisaState {
        terminal: true,
        ..state(code, months)
    }
}

pub(super) fn transition(id: &str, from: &str, to: &str) -> Transition {
    Transition {
        id: id.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        processing_months: 1,
        cost_won: 100_000,
        rules: Vec::new(),
    }
}

pub(super) fn guarded(id: &str, from: &str, to: &str, rule: EligibilityRule) -> Transition {
    Transition {
        rules: vec![rule],
        ..transition(id, from, to)
    }
}

pub(super) fn document(states: Vec<VisaState>, transitions: Vec<Transition>) -> CatalogDocument {
    CatalogDocument {
        version: "fixture-1".to_string(),
        states,
        transitions,
    }
}

/// `S0 -> {A, B} -> T`, plus a direct `S0 -> T` edge. Three work pathways.
pub(super) fn diamond_catalog() -> PathwayCatalog {
    PathwayCatalog::from_document(document(
        vec![
            start("S0", 6, &[FinalGoal::Work]),
            state("A", 12),
            state("B", 3),
            terminal("T", 6),
        ],
        vec![
            transition("s0-a", "S0", "A"),
            transition("s0-b", "S0", "B"),
            transition("s0-t", "S0", "T"),
            transition("a-t", "A", "T"),
            transition("b-t", "B", "T"),
        ],
    ))
    .expect("diamond catalog is valid")
}

/// A ladder of `rungs` two-way forks; yields `2^rungs` distinct pathways.
pub(super) fn ladder_catalog(rungs: usize) -> PathwayCatalog {
    let mut states = vec![start("L0", 1, &[FinalGoal::Work])];
    let mut transitions = Vec::new();
    for rung in 0..rungs {
        let from = format!("L{rung}");
        let to = format!("L{}", rung + 1);
        let mut next = state(&to, 1);
        next.terminal = rung + 1 == rungs;
        states.push(next);

        let mut fast = transition(&format!("{from}-fast"), &from, &to);
        fast.processing_months = 1;
        let mut slow = transition(&format!("{from}-slow"), &from, &to);
        slow.processing_months = 2;
        transitions.push(fast);
        transitions.push(slow);
    }
    PathwayCatalog::from_document(document(states, transitions)).expect("ladder catalog is valid")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
