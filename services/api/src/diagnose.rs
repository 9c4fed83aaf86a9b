use crate::infra::{build_engine, fund_value, load_catalog, load_scoring, parse_date};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;
use visa_pathway::config::PathwayConfig;
use visa_pathway::error::AppError;
use visa_pathway::pathways::{ApplicantProfileInput, DiagnosisResult, PathwayResult};

#[derive(Args, Debug)]
pub(crate) struct DiagnoseArgs {
    /// ISO 3166 alpha-2 nationality code, e.g. VN
    #[arg(long)]
    pub(crate) nationality: String,
    /// Applicant age in whole years
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) age: i64,
    /// HIGH_SCHOOL, ASSOCIATE, BACHELOR, MASTER or DOCTORATE
    #[arg(long)]
    pub(crate) education_level: String,
    /// Fund bracket code or a whole number of won
    #[arg(long)]
    pub(crate) fund: String,
    /// STUDY, WORK, BUSINESS or SETTLE
    #[arg(long)]
    pub(crate) goal: String,
    /// FAST, LOW_COST, STABILITY or FLEXIBILITY
    #[arg(long)]
    pub(crate) priority: String,
    /// Catalog document to load instead of the embedded one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Scoring tables to load instead of the embedded ones
    #[arg(long)]
    pub(crate) scoring: Option<PathBuf>,
    /// Number of pathways to return
    #[arg(long)]
    pub(crate) top_n: Option<usize>,
    /// Evaluation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the full result as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogCheckArgs {
    /// Catalog document to validate instead of the embedded one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
    /// Scoring tables to validate instead of the embedded ones
    #[arg(long)]
    pub(crate) scoring: Option<PathBuf>,
}

impl DiagnoseArgs {
    fn profile_input(&self) -> ApplicantProfileInput {
        ApplicantProfileInput {
            nationality: Some(Value::String(self.nationality.clone())),
            age: Some(Value::from(self.age)),
            education_level: Some(Value::String(self.education_level.clone())),
            available_annual_fund: Some(fund_value(&self.fund)),
            final_goal: Some(Value::String(self.goal.clone())),
            priority_preference: Some(Value::String(self.priority.clone())),
        }
    }
}

pub(crate) fn run_diagnose(args: DiagnoseArgs) -> Result<(), AppError> {
    let mut config = PathwayConfig::from_env()?;
    if let Some(path) = args.catalog.clone() {
        config.catalog_path = Some(path);
    }
    if let Some(path) = args.scoring.clone() {
        config.scoring_path = Some(path);
    }
    if let Some(top_n) = args.top_n {
        config.top_n = top_n;
    }
    config.validate()?;

    let engine = build_engine(&config)?;
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let result = engine.evaluate_on(&args.profile_input(), today)?;

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Result unavailable as JSON: {err}"),
        }
    } else {
        render_diagnosis(&result);
    }

    Ok(())
}

pub(crate) fn run_catalog_check(args: CatalogCheckArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let scoring = load_scoring(args.scoring.as_deref())?;
    let summary = catalog.summary();

    println!("Catalog {} is valid", summary.version);
    println!(
        "- {} visa states | {} transitions",
        summary.state_count, summary.transition_count
    );
    println!("- Terminal states: {}", summary.terminal_states.join(", "));
    println!("Start states by goal:");
    for entry in &summary.start_states {
        let states = if entry.states.is_empty() {
            "(none)".to_string()
        } else {
            entry.states.join(", ")
        };
        println!("  - {}: {}", entry.goal.code(), states);
    }
    println!(
        "Scoring tables {} are valid (multipliers within [{}, {}])",
        scoring.version, scoring.multiplier_bounds.min, scoring.multiplier_bounds.max
    );

    Ok(())
}

fn render_diagnosis(result: &DiagnosisResult) {
    let meta = &result.meta;
    println!("Visa pathway diagnosis");
    println!(
        "Catalog {} | scoring {}{}",
        meta.catalog_version,
        meta.scoring_version,
        meta.evaluated_on
            .map(|date| format!(" | evaluated {date}"))
            .unwrap_or_default()
    );
    println!(
        "{} pathway(s) evaluated, showing {}{}",
        meta.total_pathways_evaluated,
        result.pathways.len(),
        if meta.generation_truncated {
            " (search budget reached)"
        } else {
            ""
        }
    );

    if result.pathways.is_empty() {
        println!("No eligible pathway for this profile.");
        return;
    }

    for (rank, pathway) in result.pathways.iter().enumerate() {
        render_pathway(rank + 1, pathway);
    }
}

fn render_pathway(rank: usize, pathway: &PathwayResult) {
    let breakdown = &pathway.score_breakdown;
    println!(
        "\n{rank}. {} [{}] score {:.2} ({})",
        pathway.visa_chain_label,
        pathway.pathway_id,
        pathway.final_score,
        pathway.feasibility_label.label()
    );
    println!(
        "   {} months | KRW {} | {}",
        pathway.estimated_months, pathway.estimated_cost_won, pathway.display_names.en
    );
    println!(
        "   base {:.1} x age {:.2} x nationality {:.2} x fund {:.2} x education {:.2} x priority {:.2}",
        breakdown.base,
        breakdown.age_multiplier,
        breakdown.nationality_multiplier,
        breakdown.fund_multiplier,
        breakdown.education_multiplier,
        breakdown.priority_weight
    );
    for substitution in &breakdown.substitutions {
        println!(
            "   note: no {} entry for '{}', neutral multiplier used",
            substitution.dimension.label(),
            substitution.key
        );
    }
    for milestone in &pathway.milestones {
        let work = if milestone.can_work_part_time {
            format!("part-time up to {}h/week", milestone.max_work_hours_per_week)
        } else {
            "no part-time work".to_string()
        };
        println!(
            "   - month {:>3}: {} ({}) for {} months, {}",
            milestone.month_from_start,
            milestone.status_code,
            milestone.display_names.en,
            milestone.duration_months,
            work
        );
    }
    println!("   Next steps:");
    for step in &pathway.next_steps {
        println!("     {}. {}", step.order, step.action);
        for item in &step.checklist {
            println!("        [ ] {item}");
        }
    }
}
