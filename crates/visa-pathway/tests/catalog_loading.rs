//! Loading behavior for catalog and scoring documents supplied from disk.

use std::io::Cursor;
use std::path::PathBuf;

use visa_pathway::pathways::{ConfigurationError, FinalGoal, PathwayCatalog, ScoringConfig};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn shipped(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("data")
        .join(name)
}

#[test]
fn shipped_documents_match_embedded_copies() {
    let from_disk = PathwayCatalog::from_path(shipped("catalog.json")).expect("catalog loads");
    let embedded = PathwayCatalog::standard().expect("embedded catalog loads");
    assert_eq!(from_disk.summary(), embedded.summary());

    let scoring = ScoringConfig::from_path(shipped("scoring.json")).expect("scoring loads");
    assert_eq!(scoring, ScoringConfig::standard().expect("embedded scoring loads"));
}

#[test]
fn fixture_catalog_reports_its_starts() {
    let catalog = PathwayCatalog::from_path(fixture("work_only_catalog.json")).expect("loads");

    assert_eq!(catalog.version(), "fixture-work-only");
    assert_eq!(catalog.start_states(FinalGoal::Work).len(), 1);
    assert!(catalog.start_states(FinalGoal::Settle).is_empty());
    assert!(catalog.is_terminal("E-7-4"));
}

#[test]
fn missing_files_surface_io_errors() {
    let result = PathwayCatalog::from_path(fixture("does_not_exist.json"));
    assert!(matches!(
        result,
        Err(ConfigurationError::Io { what: "pathway catalog", .. })
    ));

    let scoring = ScoringConfig::from_path(fixture("does_not_exist.json"));
    assert!(matches!(
        scoring,
        Err(ConfigurationError::Io { what: "scoring table", .. })
    ));
}

#[test]
fn readers_are_validated_like_files() {
    let raw = r#"{
        "version": "inline",
        "states": [
            {
                "code": "A",
                "names": { "en": "A", "ko": "A" },
                "can_work_part_time": false,
                "max_work_hours_per_week": 0,
                "estimated_monthly_income": 0,
                "base_duration_months": 0,
                "terminal": true,
                "start_goals": ["WORK"]
            }
        ]
    }"#;

    let result = PathwayCatalog::from_reader(Cursor::new(raw));

    assert!(matches!(
        result,
        Err(ConfigurationError::InvalidState { code, .. }) if code == "A"
    ));
}

#[test]
fn scoring_errors_name_the_problem() {
    let raw = r#"{
        "version": "broken",
        "multiplier_bounds": { "min": 0.5, "max": 0.2 },
        "base": { "start": 100, "per_transition_penalty": 8, "per_requirement_penalty": 1.5, "floor": 20 },
        "age_brackets": []
    }"#;

    let error = ScoringConfig::from_json_str(raw).expect_err("inverted bounds are rejected");

    assert!(error.to_string().contains("multiplier_bounds"));
}
