use crate::pathways::domain::{FeasibilityLabel, Pathway};
use crate::pathways::ranking::{rank, LabelThresholds, ScoredPathway};
use crate::pathways::scoring::ScoreBreakdown;

fn scored(pathway_id: &str, chain: &[&str], months: u32, cost: u64, score: f64) -> ScoredPathway {
    ScoredPathway {
        pathway: Pathway {
            pathway_id: pathway_id.to_string(),
            milestones: Vec::new(),
            visa_chain: chain.iter().map(|code| code.to_string()).collect(),
            estimated_months: months,
            estimated_cost_won: cost,
        },
        breakdown: ScoreBreakdown {
            base: score,
            age_multiplier: 1.0,
            nationality_multiplier: 1.0,
            fund_multiplier: 1.0,
            education_multiplier: 1.0,
            priority_weight: 1.0,
            final_score: score,
            substitutions: Vec::new(),
        },
    }
}

fn ranked_ids(candidates: Vec<ScoredPathway>, top_n: usize) -> Vec<String> {
    rank(candidates, top_n, &LabelThresholds::default())
        .into_iter()
        .map(|ranked| ranked.pathway.pathway_id)
        .collect()
}

#[test]
fn orders_by_score_then_months_cost_and_id() {
    let candidates = vec![
        scored("c", &["C"], 12, 100, 70.0),
        scored("a-slow", &["A", "X"], 24, 100, 80.0),
        scored("a-fast", &["A", "Y"], 12, 100, 80.0),
        scored("b-cheap", &["B", "X"], 24, 50, 80.0),
        scored("z", &["Z", "X"], 24, 50, 80.0),
        scored("top", &["T"], 48, 900, 95.5),
    ];

    assert_eq!(
        ranked_ids(candidates, 10),
        vec!["top", "a-fast", "b-cheap", "z", "a-slow", "c"]
    );
}

#[test]
fn duplicate_chains_keep_the_better_instance() {
    let candidates = vec![
        scored("S/slow", &["S", "T"], 20, 100, 60.0),
        scored("S/fast", &["S", "T"], 18, 100, 75.0),
        scored("U", &["U"], 10, 100, 50.0),
    ];

    let ranked = rank(candidates, 5, &LabelThresholds::default());

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].pathway.pathway_id, "S/fast");
    assert_eq!(ranked[1].pathway.pathway_id, "U");
}

#[test]
fn truncates_to_top_n_and_handles_empty_input() {
    let candidates = (0..8)
        .map(|index| {
            let code = format!("S{index}");
            scored(&code, &[code.as_str()], 12, 100, 50.0 + index as f64)
        })
        .collect();

    assert_eq!(ranked_ids(candidates, 3), vec!["S7", "S6", "S5"]);
    assert!(rank(Vec::new(), 5, &LabelThresholds::default()).is_empty());
    assert!(ranked_ids(vec![scored("a", &["A"], 1, 1, 10.0)], 0).is_empty());
}

#[test]
fn labels_follow_thresholds() {
    let thresholds = LabelThresholds::default();

    assert_eq!(thresholds.label_for(85.0), FeasibilityLabel::Excellent);
    assert_eq!(thresholds.label_for(84.99), FeasibilityLabel::Good);
    assert_eq!(thresholds.label_for(65.0), FeasibilityLabel::Good);
    assert_eq!(thresholds.label_for(40.0), FeasibilityLabel::Moderate);
    assert_eq!(thresholds.label_for(39.99), FeasibilityLabel::Low);
    assert_eq!(thresholds.label_for(0.0), FeasibilityLabel::Low);

    let ranked = rank(
        vec![scored("a", &["A"], 1, 1, 90.0), scored("b", &["B"], 1, 1, 30.0)],
        5,
        &thresholds,
    );
    assert_eq!(ranked[0].feasibility_label, FeasibilityLabel::Excellent);
    assert_eq!(ranked[1].feasibility_label, FeasibilityLabel::Low);
}
