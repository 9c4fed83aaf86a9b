use serde::{Deserialize, Serialize};

use super::super::domain::{FinalGoal, LocalizedName};
use super::rules::EligibilityRule;

/// Visa status node as declared in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisaState {
    pub code: String,
    pub names: LocalizedName,
    pub can_work_part_time: bool,
    pub max_work_hours_per_week: u32,
    pub estimated_monthly_income: u64,
    pub base_duration_months: u32,
    #[serde(default)]
    pub cost_won: u64,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub terminal: bool,
    #[serde(default)]
    pub permanent: bool,
    /// Goals for which this status is an admissible starting point.
    #[serde(default)]
    pub start_goals: Vec<FinalGoal>,
    /// Must hold for the applicant to start here.
    #[serde(default)]
    pub entry_rules: Vec<EligibilityRule>,
}

impl VisaState {
    pub fn is_start_for(&self, goal: FinalGoal) -> bool {
        self.start_goals.contains(&goal)
    }

    pub fn is_start(&self) -> bool {
        !self.start_goals.is_empty()
    }
}

/// Directed edge between two statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub processing_months: u32,
    #[serde(default)]
    pub cost_won: u64,
    #[serde(default)]
    pub rules: Vec<EligibilityRule>,
}

/// On-disk shape of a versioned catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub version: String,
    pub states: Vec<VisaState>,
    #[serde(default)]
    pub transitions: Vec<Transition>,
}
