use serde::{Deserialize, Serialize};

/// Where the applicant expects to live while studying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivingSituation {
    AtHome,
    AwayFromHome,
    Renting,
    MovingOut,
    OnCampus,
    Unsure,
}

impl LivingSituation {
    pub const fn label(self) -> &'static str {
        match self {
            LivingSituation::AtHome => "at home",
            LivingSituation::AwayFromHome => "away from home",
            LivingSituation::Renting => "renting",
            LivingSituation::MovingOut => "moving out",
            LivingSituation::OnCampus => "on campus",
            LivingSituation::Unsure => "unsure",
        }
    }

    /// Situations other than a settled at-home arrangement attract the
    /// away-from-home base rate; an undecided applicant is assessed at home.
    pub(crate) const fn away_from_home(self) -> bool {
        !matches!(self, LivingSituation::AtHome | LivingSituation::Unsure)
    }
}

/// Declared ground for an independence claim, collected upstream as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndependenceGround {
    WorkHistory,
    Married,
    UnreasonableToLiveAtHome,
    Other,
}

/// Whether the applicant is assessed on their own or their parents' means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndependenceStatus {
    Dependent,
    Independent { basis: IndependenceBasis },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndependenceBasis {
    Declared,
    AgeQualified,
}

impl IndependenceStatus {
    pub const fn is_independent(self) -> bool {
        matches!(self, IndependenceStatus::Independent { .. })
    }
}

/// The applicant's declared circumstances, shape-validated upstream.
///
/// Monetary fields are optional: an absent value means the corresponding test
/// is simply not applied, which is different from declaring zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: u8,
    pub full_time_study: bool,
    pub concessional_study_load: bool,
    pub declared_independent: bool,
    #[serde(default)]
    pub independence_ground: Option<IndependenceGround>,
    /// Combined parental income for the assessment year.
    #[serde(default)]
    pub parental_income: Option<f64>,
    /// Siblings concurrently receiving a comparable payment.
    #[serde(default)]
    pub siblings_on_payment: u32,
    /// The applicant's own fortnightly income.
    #[serde(default)]
    pub personal_income: Option<f64>,
    /// Accrued income-bank credit offset against personal income.
    #[serde(default)]
    pub income_bank_credit: Option<f64>,
    #[serde(default)]
    pub personal_assets: Option<f64>,
    #[serde(default)]
    pub homeowner: bool,
    pub living_situation: LivingSituation,
    #[serde(default)]
    pub has_dependent_children: bool,
    #[serde(default)]
    pub partnered: bool,
}

/// Rejection of a malformed profile before any gate logic runs.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("'{field}' must be a finite number")]
    NonFinite { field: &'static str },
    #[error("'{field}' must not be negative")]
    Negative { field: &'static str },
}

impl ApplicantProfile {
    /// Domain validation for the monetary fields. Absent values are fine;
    /// supplied values must be finite and non-negative, never coerced.
    pub fn validate(&self) -> Result<(), ProfileError> {
        check_optional_amount("parental_income", self.parental_income)?;
        check_optional_amount("personal_income", self.personal_income)?;
        check_optional_amount("income_bank_credit", self.income_bank_credit)?;
        check_optional_amount("personal_assets", self.personal_assets)?;
        Ok(())
    }
}

fn check_optional_amount(field: &'static str, value: Option<f64>) -> Result<(), ProfileError> {
    let Some(value) = value else { return Ok(()) };
    if !value.is_finite() {
        return Err(ProfileError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(ProfileError::Negative { field });
    }
    Ok(())
}
