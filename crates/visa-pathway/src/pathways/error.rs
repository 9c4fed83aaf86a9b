use serde::Serialize;

/// A single rejected input field and the constraint it broke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub constraint: String,
}

impl FieldViolation {
    pub(crate) fn new(field: &'static str, constraint: impl Into<String>) -> Self {
        Self {
            field,
            constraint: constraint.into(),
        }
    }
}

/// Every violation found in one profile. Never partially applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid applicant profile: {}", summarize(.violations))]
pub struct InputValidationError {
    pub violations: Vec<FieldViolation>,
}

impl InputValidationError {
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations
            .iter()
            .map(|violation| violation.field)
            .collect()
    }

    pub fn violation_for(&self, field: &str) -> Option<&FieldViolation> {
        self.violations
            .iter()
            .find(|violation| violation.field == field)
    }
}

fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{} {}", violation.field, violation.constraint))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Raised while loading the catalog or scoring tables. Fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to read {what}: {source}")]
    Io {
        what: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {what} document: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog declares no visa states")]
    EmptyCatalog,
    #[error("visa state {0} is declared more than once")]
    DuplicateState(String),
    #[error("transition id {0} is declared more than once")]
    DuplicateTransition(String),
    #[error("visa state {code} has invalid attribute: {detail}")]
    InvalidState { code: String, detail: String },
    #[error("transition {transition} references unknown visa state {code}")]
    UnknownState { transition: String, code: String },
    #[error("catalog {what} totals exceed what a single pathway can accumulate")]
    TotalOverflow { what: &'static str },
    #[error("catalog contains a cycle: {}", .path.join(" -> "))]
    Cycle { path: Vec<String> },
    #[error("catalog has no start state for any goal")]
    NoStartStates,
    #[error("catalog has no terminal state")]
    NoTerminalStates,
    #[error("visa state {0} is not reachable from any start state")]
    Unreachable(String),
    #[error("visa state {0} cannot reach any terminal state")]
    Dangling(String),
    #[error("scoring table is invalid: {0}")]
    InvalidScoring(String),
}
