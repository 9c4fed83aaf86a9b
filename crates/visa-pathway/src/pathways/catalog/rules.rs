use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicantProfile, EducationLevel, FinalGoal, FundBracket};

/// Serializable eligibility predicate attached to start states and transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum EligibilityRule {
    MinEducation { level: EducationLevel },
    MinFund { bracket: FundBracket },
    MinAge { years: u8 },
    MaxAge { years: u8 },
    NationalityIn { codes: Vec<String> },
    NationalityNotIn { codes: Vec<String> },
    GoalIn { goals: Vec<FinalGoal> },
}

impl EligibilityRule {
    pub fn holds(&self, profile: &ApplicantProfile) -> bool {
        match self {
            EligibilityRule::MinEducation { level } => profile.education_level >= *level,
            EligibilityRule::MinFund { bracket } => {
                profile.available_annual_fund.bracket >= *bracket
            }
            EligibilityRule::MinAge { years } => profile.age >= *years,
            EligibilityRule::MaxAge { years } => profile.age <= *years,
            EligibilityRule::NationalityIn { codes } => codes
                .iter()
                .any(|code| code.eq_ignore_ascii_case(profile.nationality.as_str())),
            EligibilityRule::NationalityNotIn { codes } => !codes
                .iter()
                .any(|code| code.eq_ignore_ascii_case(profile.nationality.as_str())),
            EligibilityRule::GoalIn { goals } => goals.contains(&profile.final_goal),
        }
    }
}

pub(crate) fn all_hold(rules: &[EligibilityRule], profile: &ApplicantProfile) -> bool {
    rules.iter().all(|rule| rule.holds(profile))
}
