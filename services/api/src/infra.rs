use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::Value;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use visa_pathway::config::PathwayConfig;
use visa_pathway::error::AppError;
use visa_pathway::pathways::{
    ConfigurationError, EngineSettings, PathwayCatalog, PathwayEngine, ScoringConfig,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the catalog and scoring tables once and wrap them in a shared engine.
pub(crate) fn build_engine(config: &PathwayConfig) -> Result<PathwayEngine, AppError> {
    let settings: EngineSettings = config.engine_settings()?;
    let catalog = load_catalog(config.catalog_path.as_deref())?;
    let scoring = load_scoring(config.scoring_path.as_deref())?;

    info!(
        catalog_version = catalog.version(),
        scoring_version = %scoring.version,
        top_n = settings.top_n,
        max_pathways = settings.max_pathways,
        "pathway engine initialised"
    );

    Ok(PathwayEngine::new(
        Arc::new(catalog),
        Arc::new(scoring),
        settings,
    ))
}

pub(crate) fn load_catalog(path: Option<&Path>) -> Result<PathwayCatalog, ConfigurationError> {
    match path {
        Some(path) => PathwayCatalog::from_path(path),
        None => PathwayCatalog::standard(),
    }
}

pub(crate) fn load_scoring(path: Option<&Path>) -> Result<ScoringConfig, ConfigurationError> {
    match path {
        Some(path) => ScoringConfig::from_path(path),
        None => ScoringConfig::standard(),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Command-line funds are either a bracket code or a whole number of won.
/// Signed amounts stay numeric so the normalizer can reject them as negative.
pub(crate) fn fund_value(raw: &str) -> Value {
    let trimmed = raw.trim().replace('_', "");
    if let Ok(won) = trimmed.parse::<u64>() {
        return Value::from(won);
    }
    match trimmed.parse::<i64>() {
        Ok(won) => Value::from(won),
        Err(_) => Value::String(raw.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_values_accept_numbers_and_codes() {
        assert_eq!(fund_value("15000000"), Value::from(15_000_000u64));
        assert_eq!(fund_value("15_000_000"), Value::from(15_000_000u64));
        assert_eq!(
            fund_value(" BETWEEN_10M_30M "),
            Value::String("BETWEEN_10M_30M".to_string())
        );
        assert_eq!(fund_value("-5"), Value::from(-5i64));
    }

    #[test]
    fn parse_date_reports_bad_input() {
        assert_eq!(
            parse_date("2025-03-14"),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"))
        );
        assert!(parse_date("14/03/2025")
            .expect_err("wrong format")
            .contains("YYYY-MM-DD"));
    }

    #[test]
    fn engine_builds_from_embedded_data_by_default() {
        let engine = build_engine(&PathwayConfig::default()).expect("engine builds");
        assert_eq!(engine.catalog().version(), "kr-2025.2");
        assert_eq!(engine.settings().top_n, 5);
    }

    #[test]
    fn missing_catalog_file_is_a_configuration_error() {
        let config = PathwayConfig {
            catalog_path: Some("/nonexistent/catalog.json".into()),
            ..PathwayConfig::default()
        };
        assert!(matches!(
            build_engine(&config),
            Err(AppError::Catalog(ConfigurationError::Io { .. }))
        ));
    }

    #[test]
    fn invalid_settings_stop_the_engine_before_loading() {
        let config = PathwayConfig {
            min_age: 70,
            max_age: 20,
            ..PathwayConfig::default()
        };
        assert!(matches!(build_engine(&config), Err(AppError::Config(_))));
    }
}
