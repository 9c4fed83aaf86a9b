use serde_json::Value;

use super::domain::{
    AnnualFund, ApplicantProfile, ApplicantProfileInput, CountryCode, EducationLevel, FinalGoal,
    FundBracket, PriorityPreference,
};
use super::error::{FieldViolation, InputValidationError};

const DEFAULT_MIN_AGE: u8 = 15;
const DEFAULT_MAX_AGE: u8 = 99;

/// Admissible age window for applicants. Always `min_age <= max_age`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerPolicy {
    min_age: u8,
    max_age: u8,
}

impl NormalizerPolicy {
    /// `None` when the window is inverted.
    pub fn new(min_age: u8, max_age: u8) -> Option<Self> {
        (min_age <= max_age).then_some(Self { min_age, max_age })
    }

    pub fn min_age(&self) -> u8 {
        self.min_age
    }

    pub fn max_age(&self) -> u8 {
        self.max_age
    }
}

impl Default for NormalizerPolicy {
    fn default() -> Self {
        Self {
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

/// Turns raw collaborator input into an `ApplicantProfile`.
#[derive(Debug, Clone, Default)]
pub struct ProfileNormalizer {
    policy: NormalizerPolicy,
}

impl ProfileNormalizer {
    pub fn with_policy(policy: NormalizerPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &NormalizerPolicy {
        &self.policy
    }

    /// Validate every field, collecting all violations before failing.
    pub fn normalize(
        &self,
        input: &ApplicantProfileInput,
    ) -> Result<ApplicantProfile, InputValidationError> {
        let mut violations = Vec::new();

        let nationality = collect(&mut violations, parse_nationality(&input.nationality));
        let age = collect(&mut violations, self.parse_age(&input.age));
        let education_level = collect(
            &mut violations,
            parse_code(
                "educationLevel",
                &input.education_level,
                &EducationLevel::ordered(),
                |level| level.code(),
            ),
        );
        let available_annual_fund =
            collect(&mut violations, parse_fund(&input.available_annual_fund));
        let final_goal = collect(
            &mut violations,
            parse_code(
                "finalGoal",
                &input.final_goal,
                &FinalGoal::ordered(),
                |goal| goal.code(),
            ),
        );
        let priority_preference = collect(
            &mut violations,
            parse_code(
                "priorityPreference",
                &input.priority_preference,
                &PriorityPreference::ordered(),
                |preference| preference.code(),
            ),
        );

        match (
            nationality,
            age,
            education_level,
            available_annual_fund,
            final_goal,
            priority_preference,
        ) {
            (
                Some(nationality),
                Some(age),
                Some(education_level),
                Some(available_annual_fund),
                Some(final_goal),
                Some(priority_preference),
            ) if violations.is_empty() => Ok(ApplicantProfile {
                nationality,
                age,
                education_level,
                available_annual_fund,
                final_goal,
                priority_preference,
            }),
            _ => Err(InputValidationError { violations }),
        }
    }

    fn parse_age(&self, raw: &Option<Value>) -> Result<u8, FieldViolation> {
        let value = required("age", raw)?;
        let range = format!(
            "must be between {} and {}",
            self.policy.min_age, self.policy.max_age
        );

        let number = match value {
            Value::Number(number) => number,
            _ => return Err(FieldViolation::new("age", "must be an integer")),
        };

        let age = match (number.as_i64(), number.as_u64()) {
            (Some(age), _) => age,
            (None, Some(_)) => return Err(FieldViolation::new("age", range)),
            (None, None) => return Err(FieldViolation::new("age", "must be an integer")),
        };

        if age < i64::from(self.policy.min_age) || age > i64::from(self.policy.max_age) {
            return Err(FieldViolation::new("age", range));
        }

        u8::try_from(age).map_err(|_| FieldViolation::new("age", range))
    }
}

fn collect<T>(violations: &mut Vec<FieldViolation>, result: Result<T, FieldViolation>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}

fn required<'a>(field: &'static str, raw: &'a Option<Value>) -> Result<&'a Value, FieldViolation> {
    match raw {
        None | Some(Value::Null) => Err(FieldViolation::new(field, "is required")),
        Some(value) => Ok(value),
    }
}

fn parse_nationality(raw: &Option<Value>) -> Result<CountryCode, FieldViolation> {
    let value = required("nationality", raw)?;
    let text = value.as_str().ok_or_else(|| {
        FieldViolation::new("nationality", "must be a two-letter country code string")
    })?;

    let trimmed = text.trim();
    if trimmed.len() != 2 || !trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return Err(FieldViolation::new(
            "nationality",
            format!("must be a two-letter country code, got '{text}'"),
        ));
    }

    Ok(CountryCode(trimmed.to_ascii_uppercase()))
}

fn parse_code<T: Copy>(
    field: &'static str,
    raw: &Option<Value>,
    allowed: &[T],
    code: impl Fn(T) -> &'static str,
) -> Result<T, FieldViolation> {
    let value = required(field, raw)?;
    let allowed_codes = || {
        allowed
            .iter()
            .map(|variant| code(*variant))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let text = value.as_str().ok_or_else(|| {
        FieldViolation::new(field, format!("must be one of {}", allowed_codes()))
    })?;

    let candidate = text.trim().to_ascii_uppercase();
    allowed
        .iter()
        .copied()
        .find(|variant| code(*variant) == candidate)
        .ok_or_else(|| {
            FieldViolation::new(
                field,
                format!("unknown value '{text}', expected one of {}", allowed_codes()),
            )
        })
}

fn parse_fund(raw: &Option<Value>) -> Result<AnnualFund, FieldViolation> {
    const FIELD: &str = "availableAnnualFund";
    let value = required(FIELD, raw)?;

    match value {
        Value::Number(number) => {
            if let Some(won) = number.as_u64() {
                return Ok(AnnualFund {
                    bracket: FundBracket::for_amount(won),
                    declared_won: Some(won),
                });
            }
            if number.as_i64().is_some() || number.as_f64().is_some_and(|won| won < 0.0) {
                return Err(FieldViolation::new(FIELD, "must not be negative"));
            }
            Err(FieldViolation::new(FIELD, "must be a whole number of won"))
        }
        Value::String(_) => {
            let bracket = parse_code(FIELD, raw, &FundBracket::ordered(), |bracket| {
                bracket.code()
            })?;
            Ok(AnnualFund {
                bracket,
                declared_won: None,
            })
        }
        _ => Err(FieldViolation::new(
            FIELD,
            "must be a non-negative integer or a fund bracket code",
        )),
    }
}
