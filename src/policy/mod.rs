//! Versioned policy tables: the rate, threshold, and cap constants the
//! calculators evaluate against for a given payment year.
//!
//! Tables are plain data owned by the caller. They can be deserialized from
//! JSON or taken from the compiled-in schedules via [`PaymentPolicy::for_year`]
//! and [`RentAssistancePolicy::for_year`]; either way the engines validate a
//! table once at construction and refuse to build on a malformed one, since a
//! silently-zero rate would misreport what an applicant is entitled to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Calendar year a policy table takes effect in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PolicyYear(pub u16);

impl std::fmt::Display for PolicyYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raised when a policy table fails structural validation.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("policy field '{field}' must be a finite number")]
    NonFinite { field: &'static str },
    #[error("policy field '{field}' must not be negative")]
    Negative { field: &'static str },
    #[error("policy field '{field}' must be greater than zero")]
    ZeroRate { field: &'static str },
    #[error("age limits are inverted (min {min} > max {max})")]
    AgeBounds { min: u8, max: u8 },
    #[error("personal income free area {free_area} exceeds lower ceiling {lower_ceiling}")]
    BandOrdering { free_area: f64, lower_ceiling: f64 },
    #[error("upper taper {upper} is below lower taper {lower}; reduction would fall as income rises")]
    TaperOrdering { lower: f64, upper: f64 },
}

/// Qualifying age window plus the age at which independence is presumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeLimits {
    pub min: u8,
    pub max: u8,
    pub independent_from: u8,
}

/// Linear taper applied to combined parental income above the free area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParentalIncomeTest {
    pub free_area: f64,
    pub taper: f64,
}

/// Two-band taper applied to the applicant's own fortnightly income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersonalIncomeTest {
    pub free_area: f64,
    pub lower_ceiling: f64,
    pub lower_taper: f64,
    pub upper_flat_offset: f64,
    pub upper_taper: f64,
}

/// Hard asset cut-offs keyed by home ownership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssetLimits {
    pub homeowner: f64,
    pub non_homeowner: f64,
}

/// Base fortnightly rates keyed by family and living configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseRateSchedule {
    pub single_at_home: f64,
    pub single_away_from_home: f64,
    pub partnered_no_children: f64,
    pub single_with_children: f64,
    pub partnered_with_children: f64,
}

/// The full student-payment threshold table for one policy year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPolicy {
    pub year: PolicyYear,
    pub effective_from: NaiveDate,
    pub age: AgeLimits,
    pub parental_income: ParentalIncomeTest,
    pub personal_income: PersonalIncomeTest,
    pub assets: AssetLimits,
    pub base_rates: BaseRateSchedule,
}

impl PaymentPolicy {
    /// Compiled-in table for a supported year, if one exists.
    pub fn for_year(year: PolicyYear) -> Option<Self> {
        match year.0 {
            2024 => Some(Self {
                year,
                effective_from: NaiveDate::from_ymd_opt(2024, 1, 1)?,
                age: AgeLimits {
                    min: 18,
                    max: 24,
                    independent_from: 22,
                },
                parental_income: ParentalIncomeTest {
                    free_area: 60_000.0,
                    taper: 0.20,
                },
                personal_income: PersonalIncomeTest {
                    free_area: 524.0,
                    lower_ceiling: 631.0,
                    lower_taper: 0.50,
                    upper_flat_offset: 53.50,
                    upper_taper: 0.60,
                },
                assets: AssetLimits {
                    homeowner: 301_750.0,
                    non_homeowner: 543_750.0,
                },
                base_rates: BaseRateSchedule {
                    single_at_home: 395.30,
                    single_away_from_home: 639.00,
                    partnered_no_children: 639.00,
                    single_with_children: 806.00,
                    partnered_with_children: 691.80,
                },
            }),
            2025 => Some(Self {
                year,
                effective_from: NaiveDate::from_ymd_opt(2025, 1, 1)?,
                age: AgeLimits {
                    min: 18,
                    max: 24,
                    independent_from: 22,
                },
                parental_income: ParentalIncomeTest {
                    free_area: 62_634.0,
                    taper: 0.20,
                },
                personal_income: PersonalIncomeTest {
                    free_area: 539.0,
                    lower_ceiling: 646.0,
                    lower_taper: 0.50,
                    upper_flat_offset: 53.50,
                    upper_taper: 0.60,
                },
                assets: AssetLimits {
                    homeowner: 314_000.0,
                    non_homeowner: 566_000.0,
                },
                base_rates: BaseRateSchedule {
                    single_at_home: 410.30,
                    single_away_from_home: 663.30,
                    partnered_no_children: 663.30,
                    single_with_children: 848.40,
                    partnered_with_children: 718.10,
                },
            }),
            _ => None,
        }
    }

    /// Structural validation; engines call this once at construction.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.age.min > self.age.max {
            return Err(PolicyError::AgeBounds {
                min: self.age.min,
                max: self.age.max,
            });
        }

        check_amount("parental_income.free_area", self.parental_income.free_area)?;
        check_amount("parental_income.taper", self.parental_income.taper)?;
        check_amount("personal_income.free_area", self.personal_income.free_area)?;
        check_amount("personal_income.lower_ceiling", self.personal_income.lower_ceiling)?;
        check_amount("personal_income.lower_taper", self.personal_income.lower_taper)?;
        check_amount("personal_income.upper_flat_offset", self.personal_income.upper_flat_offset)?;
        check_amount("personal_income.upper_taper", self.personal_income.upper_taper)?;
        check_amount("assets.homeowner", self.assets.homeowner)?;
        check_amount("assets.non_homeowner", self.assets.non_homeowner)?;

        if self.personal_income.free_area > self.personal_income.lower_ceiling {
            return Err(PolicyError::BandOrdering {
                free_area: self.personal_income.free_area,
                lower_ceiling: self.personal_income.lower_ceiling,
            });
        }
        if self.personal_income.upper_taper < self.personal_income.lower_taper {
            return Err(PolicyError::TaperOrdering {
                lower: self.personal_income.lower_taper,
                upper: self.personal_income.upper_taper,
            });
        }

        check_rate("base_rates.single_at_home", self.base_rates.single_at_home)?;
        check_rate(
            "base_rates.single_away_from_home",
            self.base_rates.single_away_from_home,
        )?;
        check_rate(
            "base_rates.partnered_no_children",
            self.base_rates.partnered_no_children,
        )?;
        check_rate(
            "base_rates.single_with_children",
            self.base_rates.single_with_children,
        )?;
        check_rate(
            "base_rates.partnered_with_children",
            self.base_rates.partnered_with_children,
        )?;

        Ok(())
    }
}

/// Minimum-rent threshold and payable cap for one household configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentTier {
    pub min_rent_threshold: f64,
    pub max_rate: f64,
}

/// Rent-assistance threshold table for one policy year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentAssistancePolicy {
    pub year: PolicyYear,
    pub effective_from: NaiveDate,
    pub single: RentTier,
    pub single_sharer: RentTier,
    pub couple: RentTier,
    /// Personal-income free area used for the downstream income-test note.
    pub income_free_area: f64,
}

impl RentAssistancePolicy {
    pub fn for_year(year: PolicyYear) -> Option<Self> {
        match year.0 {
            2024 => Some(Self {
                year,
                effective_from: NaiveDate::from_ymd_opt(2024, 1, 1)?,
                single: RentTier {
                    min_rent_threshold: 143.40,
                    max_rate: 188.20,
                },
                single_sharer: RentTier {
                    min_rent_threshold: 143.40,
                    max_rate: 125.47,
                },
                couple: RentTier {
                    min_rent_threshold: 232.40,
                    max_rate: 177.20,
                },
                income_free_area: 524.0,
            }),
            2025 => Some(Self {
                year,
                effective_from: NaiveDate::from_ymd_opt(2025, 1, 1)?,
                single: RentTier {
                    min_rent_threshold: 152.00,
                    max_rate: 215.40,
                },
                single_sharer: RentTier {
                    min_rent_threshold: 152.00,
                    max_rate: 143.60,
                },
                couple: RentTier {
                    min_rent_threshold: 246.00,
                    max_rate: 203.00,
                },
                income_free_area: 539.0,
            }),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        check_amount("single.min_rent_threshold", self.single.min_rent_threshold)?;
        check_rate("single.max_rate", self.single.max_rate)?;
        check_amount(
            "single_sharer.min_rent_threshold",
            self.single_sharer.min_rent_threshold,
        )?;
        check_rate("single_sharer.max_rate", self.single_sharer.max_rate)?;
        check_amount("couple.min_rent_threshold", self.couple.min_rent_threshold)?;
        check_rate("couple.max_rate", self.couple.max_rate)?;
        check_amount("income_free_area", self.income_free_area)?;
        Ok(())
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<(), PolicyError> {
    if !value.is_finite() {
        return Err(PolicyError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(PolicyError::Negative { field });
    }
    Ok(())
}

fn check_rate(field: &'static str, value: f64) -> Result<(), PolicyError> {
    check_amount(field, value)?;
    if value == 0.0 {
        return Err(PolicyError::ZeroRate { field });
    }
    Ok(())
}
