use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Highest completed education, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "HIGH_SCHOOL")]
    HighSchool,
    #[serde(rename = "ASSOCIATE")]
    Associate,
    #[serde(rename = "BACHELOR")]
    Bachelor,
    #[serde(rename = "MASTER")]
    Master,
    #[serde(rename = "DOCTORATE")]
    Doctorate,
}

impl EducationLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::HighSchool,
            Self::Associate,
            Self::Bachelor,
            Self::Master,
            Self::Doctorate,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::HighSchool => "HIGH_SCHOOL",
            Self::Associate => "ASSOCIATE",
            Self::Bachelor => "BACHELOR",
            Self::Master => "MASTER",
            Self::Doctorate => "DOCTORATE",
        }
    }
}

/// Annual funds the applicant can commit, in won brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FundBracket {
    #[serde(rename = "UNDER_10M")]
    Under10M,
    #[serde(rename = "BETWEEN_10M_30M")]
    Between10M30M,
    #[serde(rename = "BETWEEN_30M_50M")]
    Between30M50M,
    #[serde(rename = "OVER_50M")]
    Over50M,
}

impl FundBracket {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Under10M,
            Self::Between10M30M,
            Self::Between30M50M,
            Self::Over50M,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Under10M => "UNDER_10M",
            Self::Between10M30M => "BETWEEN_10M_30M",
            Self::Between30M50M => "BETWEEN_30M_50M",
            Self::Over50M => "OVER_50M",
        }
    }

    /// Bucket a declared amount in won. Lower bounds are inclusive.
    pub const fn for_amount(won: u64) -> Self {
        if won < 10_000_000 {
            Self::Under10M
        } else if won < 30_000_000 {
            Self::Between10M30M
        } else if won < 50_000_000 {
            Self::Between30M50M
        } else {
            Self::Over50M
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FinalGoal {
    #[serde(rename = "STUDY")]
    Study,
    #[serde(rename = "WORK")]
    Work,
    #[serde(rename = "BUSINESS")]
    Business,
    #[serde(rename = "SETTLE")]
    Settle,
}

impl FinalGoal {
    pub const fn ordered() -> [Self; 4] {
        [Self::Study, Self::Work, Self::Business, Self::Settle]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Study => "STUDY",
            Self::Work => "WORK",
            Self::Business => "BUSINESS",
            Self::Settle => "SETTLE",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriorityPreference {
    #[serde(rename = "FAST")]
    Fast,
    #[serde(rename = "LOW_COST")]
    LowCost,
    #[serde(rename = "STABILITY")]
    Stability,
    #[serde(rename = "FLEXIBILITY")]
    Flexibility,
}

impl PriorityPreference {
    pub const fn ordered() -> [Self; 4] {
        [Self::Fast, Self::LowCost, Self::Stability, Self::Flexibility]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Fast => "FAST",
            Self::LowCost => "LOW_COST",
            Self::Stability => "STABILITY",
            Self::Flexibility => "FLEXIBILITY",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeasibilityLabel {
    #[serde(rename = "EXCELLENT")]
    Excellent,
    #[serde(rename = "GOOD")]
    Good,
    #[serde(rename = "MODERATE")]
    Moderate,
    #[serde(rename = "LOW")]
    Low,
}

impl FeasibilityLabel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
        }
    }
}

/// Upper-case ISO 3166 alpha-2 country code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CountryCode(pub String);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Declared funds: the bracket used for scoring and eligibility, plus the raw
/// amount when the applicant supplied a number instead of a bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualFund {
    pub bracket: FundBracket,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_won: Option<u64>,
}

/// Raw profile fields exactly as a collaborator sent them.
///
/// Every field is kept untyped so the normalizer can name the offending field
/// instead of failing the whole body at deserialization time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfileInput {
    #[serde(default)]
    pub nationality: Option<Value>,
    #[serde(default)]
    pub age: Option<Value>,
    #[serde(default)]
    pub education_level: Option<Value>,
    #[serde(default)]
    pub available_annual_fund: Option<Value>,
    #[serde(default)]
    pub final_goal: Option<Value>,
    #[serde(default)]
    pub priority_preference: Option<Value>,
}

/// Validated, canonical applicant profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantProfile {
    pub nationality: CountryCode,
    pub age: u8,
    pub education_level: EducationLevel,
    pub available_annual_fund: AnnualFund,
    pub final_goal: FinalGoal,
    pub priority_preference: PriorityPreference,
}

/// Display names for a status or pathway.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub en: String,
    pub ko: String,
}

/// One stage of a realized pathway. Values are copied out of the catalog when
/// the pathway is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub status_code: String,
    pub display_names: LocalizedName,
    pub month_from_start: u32,
    pub duration_months: u32,
    pub cost_won: u64,
    pub can_work_part_time: bool,
    pub max_work_hours_per_week: u32,
    pub estimated_monthly_income: u64,
    pub requirements: Vec<String>,
    pub terminal: bool,
    pub permanent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via_transition: Option<String>,
}

/// Ordered start-to-terminal sequence of milestones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pathway {
    pub pathway_id: String,
    pub milestones: Vec<Milestone>,
    pub visa_chain: Vec<String>,
    pub estimated_months: u32,
    pub estimated_cost_won: u64,
}

impl Pathway {
    pub fn transition_count(&self) -> usize {
        self.milestones.len().saturating_sub(1)
    }

    pub fn requirement_count(&self) -> usize {
        self.milestones
            .iter()
            .map(|milestone| milestone.requirements.len())
            .sum()
    }

    pub fn final_milestone(&self) -> Option<&Milestone> {
        self.milestones.last()
    }

    pub fn visa_chain_label(&self) -> String {
        self.visa_chain.join(" → ")
    }

    pub fn display_names(&self) -> LocalizedName {
        let en = self
            .milestones
            .iter()
            .map(|milestone| milestone.display_names.en.as_str())
            .collect::<Vec<_>>()
            .join(" → ");
        let ko = self
            .milestones
            .iter()
            .map(|milestone| milestone.display_names.ko.as_str())
            .collect::<Vec<_>>()
            .join(" → ");
        LocalizedName { en, ko }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_brackets_use_inclusive_lower_bounds() {
        assert_eq!(FundBracket::for_amount(0), FundBracket::Under10M);
        assert_eq!(FundBracket::for_amount(9_999_999), FundBracket::Under10M);
        assert_eq!(FundBracket::for_amount(10_000_000), FundBracket::Between10M30M);
        assert_eq!(FundBracket::for_amount(30_000_000), FundBracket::Between30M50M);
        assert_eq!(FundBracket::for_amount(50_000_000), FundBracket::Over50M);
    }

    #[test]
    fn enums_serialize_with_boundary_codes() {
        for level in EducationLevel::ordered() {
            let json = serde_json::to_value(level).expect("serialize");
            assert_eq!(json, Value::String(level.code().to_string()));
        }
        for bracket in FundBracket::ordered() {
            let json = serde_json::to_value(bracket).expect("serialize");
            assert_eq!(json, Value::String(bracket.code().to_string()));
        }
        assert!(EducationLevel::Master > EducationLevel::Bachelor);
        assert!(FundBracket::Over50M > FundBracket::Between30M50M);
    }
}
