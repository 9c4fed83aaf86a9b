use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::domain::{EducationLevel, FundBracket, PriorityPreference};
use super::super::error::ConfigurationError;
use super::super::ranking::LabelThresholds;

const STANDARD_SCORING: &str = include_str!("../../../data/scoring.json");
const MULTIPLIER_CEILING: f64 = 1.5;

/// Versioned weighting tables applied to every generated pathway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub version: String,
    pub multiplier_bounds: MultiplierBounds,
    pub base: BaseScoring,
    pub age_brackets: Vec<AgeBracket>,
    /// Keyed by upper-case alpha-2 country code.
    #[serde(default)]
    pub nationality: BTreeMap<String, f64>,
    #[serde(default)]
    pub fund: BTreeMap<FundBracket, f64>,
    #[serde(default)]
    pub education: BTreeMap<EducationLevel, f64>,
    #[serde(default)]
    pub priority: BTreeMap<PriorityPreference, PriorityWeighting>,
    #[serde(default)]
    pub labels: LabelThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MultiplierBounds {
    pub min: f64,
    pub max: f64,
}

impl MultiplierBounds {
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Administrative complexity score before any multiplier is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseScoring {
    pub start: f64,
    pub per_transition_penalty: f64,
    pub per_requirement_penalty: f64,
    pub floor: f64,
}

/// Inclusive age range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeBracket {
    pub min_age: u8,
    pub max_age: u8,
    pub multiplier: f64,
}

impl AgeBracket {
    pub fn contains(&self, age: u8) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }
}

/// `floor + (ceiling - floor) * fitness`, with fitness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeighting {
    pub floor: f64,
    pub ceiling: f64,
    /// FAST: pathways at or under this duration get full fitness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_months: Option<u32>,
    /// LOW_COST: pathways at or under this cost get full fitness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_cost_won: Option<u64>,
    /// STABILITY: fitness of a pathway that does not end in permanent residence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_permanent_fitness: Option<f64>,
}

impl PriorityWeighting {
    pub fn weight(&self, fitness: f64) -> f64 {
        self.floor + (self.ceiling - self.floor) * fitness.clamp(0.0, 1.0)
    }
}

impl ScoringConfig {
    /// The tables shipped with the crate.
    pub fn standard() -> Result<Self, ConfigurationError> {
        Self::from_json_str(STANDARD_SCORING)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let file = std::fs::File::open(path).map_err(|source| ConfigurationError::Io {
            what: "scoring table",
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let config: Self =
            serde_json::from_reader(reader).map_err(|source| ConfigurationError::Parse {
                what: "scoring table",
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigurationError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigurationError::Parse {
                what: "scoring table",
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.version.trim().is_empty() {
            return invalid("version must not be blank");
        }

        let bounds = self.multiplier_bounds;
        if !(bounds.min.is_finite() && bounds.max.is_finite())
            || bounds.min < 0.0
            || bounds.max > MULTIPLIER_CEILING
            || bounds.min > bounds.max
        {
            return invalid(format!(
                "multiplier_bounds [{}, {}] must lie within [0, {MULTIPLIER_CEILING}]",
                bounds.min, bounds.max
            ));
        }
        if !(bounds.min..=bounds.max).contains(&1.0) {
            return invalid(format!(
                "multiplier_bounds [{}, {}] must include the neutral multiplier 1",
                bounds.min, bounds.max
            ));
        }

        let base = self.base;
        if !(0.0..=100.0).contains(&base.floor) || !(base.floor..=100.0).contains(&base.start) {
            return invalid("base start and floor must satisfy 0 <= floor <= start <= 100");
        }
        if !non_negative(base.per_transition_penalty) || !non_negative(base.per_requirement_penalty)
        {
            return invalid("base penalties must be finite and non-negative");
        }

        let mut brackets: Vec<&AgeBracket> = self.age_brackets.iter().collect();
        brackets.sort_by_key(|bracket| bracket.min_age);
        for bracket in &brackets {
            if bracket.min_age > bracket.max_age {
                return invalid(format!(
                    "age bracket {}-{} is inverted",
                    bracket.min_age, bracket.max_age
                ));
            }
            check_multiplier("age", bracket.multiplier)?;
        }
        for pair in brackets.windows(2) {
            if pair[1].min_age <= pair[0].max_age {
                return invalid(format!(
                    "age brackets {}-{} and {}-{} overlap",
                    pair[0].min_age, pair[0].max_age, pair[1].min_age, pair[1].max_age
                ));
            }
        }

        for (code, multiplier) in &self.nationality {
            if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
                return invalid(format!(
                    "nationality key '{code}' must be an upper-case alpha-2 code"
                ));
            }
            check_multiplier("nationality", *multiplier)?;
        }
        for multiplier in self.fund.values() {
            check_multiplier("fund", *multiplier)?;
        }
        for multiplier in self.education.values() {
            check_multiplier("education", *multiplier)?;
        }

        for (preference, weighting) in &self.priority {
            if !non_negative(weighting.floor)
                || !non_negative(weighting.ceiling)
                || weighting.floor > weighting.ceiling
            {
                return invalid(format!(
                    "priority {} must satisfy 0 <= floor <= ceiling",
                    preference.code()
                ));
            }
            if weighting.reference_months == Some(0) {
                return invalid("priority reference_months must be greater than zero");
            }
            if let Some(fitness) = weighting.non_permanent_fitness {
                if !(0.0..=1.0).contains(&fitness) {
                    return invalid("priority non_permanent_fitness must lie within [0, 1]");
                }
            }
        }

        let labels = self.labels;
        if !(0.0..=100.0).contains(&labels.moderate)
            || labels.moderate > labels.good
            || labels.good > labels.excellent
            || labels.excellent > 100.0
        {
            return invalid("label thresholds must satisfy 0 <= moderate <= good <= excellent <= 100");
        }

        Ok(())
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn check_multiplier(table: &str, value: f64) -> Result<(), ConfigurationError> {
    if non_negative(value) {
        Ok(())
    } else {
        invalid(format!("{table} multiplier {value} must be finite and non-negative"))
    }
}

fn invalid(detail: impl Into<String>) -> Result<(), ConfigurationError> {
    Err(ConfigurationError::InvalidScoring(detail.into()))
}
