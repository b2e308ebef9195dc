//! Supplementary rent-assistance calculator.
//!
//! Rides on top of a student-payment assessment: only the rent-like portion
//! of what the applicant pays counts, a household-specific threshold must be
//! cleared, and the payable amount tapers up to a household-specific cap.

use serde::{Deserialize, Serialize};

use crate::policy::{PolicyError, RentAssistancePolicy, RentTier};

/// Portion of the assistance formula applied to rent above the threshold.
/// Fixed across household types.
const ASSISTANCE_TAPER: f64 = 0.75;

/// What the declared fortnightly payment covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentPaymentKind {
    /// Payment is rent alone.
    Rent,
    /// Board and lodging combined; two thirds counts as rent.
    BoardAndLodging,
    /// Board only; one third counts as rent.
    BoardOnly,
}

impl RentPaymentKind {
    /// Fraction of the declared payment treated as rent.
    pub(crate) const fn rent_fraction(self) -> f64 {
        match self {
            RentPaymentKind::Rent => 1.0,
            RentPaymentKind::BoardAndLodging => 2.0 / 3.0,
            RentPaymentKind::BoardOnly => 1.0 / 3.0,
        }
    }
}

/// Household configuration selecting the threshold/cap tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseholdType {
    Single,
    SingleSharer,
    Couple,
}

impl HouseholdType {
    pub const fn label(self) -> &'static str {
        match self {
            HouseholdType::Single => "single",
            HouseholdType::SingleSharer => "single sharer",
            HouseholdType::Couple => "couple",
        }
    }
}

/// Inputs to one rent-assistance calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentAssistanceInput {
    pub fortnightly_rent: f64,
    pub payment_kind: RentPaymentKind,
    pub household: HouseholdType,
    /// Fortnightly student payment the assistance would ride on.
    #[serde(default)]
    pub base_payment: Option<f64>,
    #[serde(default)]
    pub personal_income: Option<f64>,
}

/// Rejection of malformed rent-assistance input.
#[derive(Debug, thiserror::Error)]
pub enum RentInputError {
    #[error("'{field}' must be a finite number")]
    NonFinite { field: &'static str },
    #[error("'{field}' must not be negative")]
    Negative { field: &'static str },
}

impl RentAssistanceInput {
    pub fn validate(&self) -> Result<(), RentInputError> {
        check_amount("fortnightly_rent", Some(self.fortnightly_rent))?;
        check_amount("base_payment", self.base_payment)?;
        check_amount("personal_income", self.personal_income)?;
        Ok(())
    }
}

fn check_amount(field: &'static str, value: Option<f64>) -> Result<(), RentInputError> {
    let Some(value) = value else { return Ok(()) };
    if !value.is_finite() {
        return Err(RentInputError::NonFinite { field });
    }
    if value < 0.0 {
        return Err(RentInputError::Negative { field });
    }
    Ok(())
}

/// Outcome of one rent-assistance calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentAssistanceResult {
    pub eligible: bool,
    /// Portion of the declared payment counted as rent.
    pub eligible_rent: f64,
    pub threshold: f64,
    pub max_rate: f64,
    pub pre_cap_amount: f64,
    pub fortnightly_amount: f64,
    /// The supplied base payment was nil, so the supplement is forced to zero.
    pub reduced_to_zero: bool,
    pub warnings: Vec<String>,
}

/// Stateless calculator bound to one validated policy-year table.
pub struct RentAssistanceEngine {
    policy: RentAssistancePolicy,
}

impl RentAssistanceEngine {
    pub fn new(policy: RentAssistancePolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &RentAssistancePolicy {
        &self.policy
    }

    pub fn calculate(
        &self,
        input: &RentAssistanceInput,
    ) -> Result<RentAssistanceResult, RentInputError> {
        input.validate()?;

        let eligible_rent = input.fortnightly_rent * input.payment_kind.rent_fraction();
        let tier = self.tier_for(input.household);
        let mut warnings = Vec::new();

        if eligible_rent < tier.min_rent_threshold {
            let shortfall = tier.min_rent_threshold - eligible_rent;
            warnings.push(format!(
                "eligible rent of ${eligible_rent:.2} is ${shortfall:.2} short of the \
                 ${:.2} minimum for a {} household",
                tier.min_rent_threshold,
                input.household.label()
            ));
            return Ok(RentAssistanceResult {
                eligible: false,
                eligible_rent,
                threshold: tier.min_rent_threshold,
                max_rate: tier.max_rate,
                pre_cap_amount: 0.0,
                fortnightly_amount: 0.0,
                reduced_to_zero: false,
                warnings,
            });
        }

        let pre_cap_amount = (eligible_rent - tier.min_rent_threshold) * ASSISTANCE_TAPER;
        let mut fortnightly_amount = pre_cap_amount.min(tier.max_rate);
        let mut reduced_to_zero = false;

        match input.base_payment {
            Some(base) if base == 0.0 => {
                reduced_to_zero = true;
                fortnightly_amount = 0.0;
                warnings.push(
                    "the student payment is nil, so rent assistance is not payable".to_string(),
                );
            }
            Some(_) => {
                if let Some(income) = input.personal_income {
                    if income > self.policy.income_free_area {
                        warnings.push(format!(
                            "personal income of ${income:.2} exceeds the ${:.2} free area; \
                             rent assistance is paid on top of the student payment and falls \
                             to zero if the income test reduces that payment to zero",
                            self.policy.income_free_area
                        ));
                    }
                }
            }
            None => {}
        }

        Ok(RentAssistanceResult {
            eligible: true,
            eligible_rent,
            threshold: tier.min_rent_threshold,
            max_rate: tier.max_rate,
            pre_cap_amount,
            fortnightly_amount,
            reduced_to_zero,
            warnings,
        })
    }

    fn tier_for(&self, household: HouseholdType) -> &RentTier {
        match household {
            HouseholdType::Single => &self.policy.single,
            HouseholdType::SingleSharer => &self.policy.single_sharer,
            HouseholdType::Couple => &self.policy.couple,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyYear;
    use chrono::NaiveDate;

    fn policy() -> RentAssistancePolicy {
        RentAssistancePolicy {
            year: PolicyYear(2025),
            effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
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
        }
    }

    fn engine() -> RentAssistanceEngine {
        RentAssistanceEngine::new(policy()).expect("test policy is valid")
    }

    fn input(rent: f64) -> RentAssistanceInput {
        RentAssistanceInput {
            fortnightly_rent: rent,
            payment_kind: RentPaymentKind::Rent,
            household: HouseholdType::Single,
            base_payment: None,
            personal_income: None,
        }
    }

    #[test]
    fn published_single_household_scenario() {
        let result = engine().calculate(&input(400.0)).expect("well-formed");

        assert!(result.eligible);
        assert_eq!(result.eligible_rent, 400.0);
        assert_eq!(result.pre_cap_amount, 186.0);
        assert_eq!(result.fortnightly_amount, 186.0);
        assert!(result.fortnightly_amount < result.max_rate);
    }

    #[test]
    fn board_and_lodging_counts_two_thirds_as_rent() {
        let mut input = input(400.0);
        input.payment_kind = RentPaymentKind::BoardAndLodging;

        let result = engine().calculate(&input).expect("well-formed");

        assert_eq!(result.eligible_rent, 400.0 * (2.0 / 3.0));
    }

    #[test]
    fn board_only_counts_one_third_as_rent() {
        let mut input = input(400.0);
        input.payment_kind = RentPaymentKind::BoardOnly;

        let result = engine().calculate(&input).expect("well-formed");

        assert_eq!(result.eligible_rent, 400.0 * (1.0 / 3.0));
        assert!(!result.eligible, "133.33 of eligible rent is under the threshold");
        assert_eq!(result.fortnightly_amount, 0.0);
    }

    #[test]
    fn rent_under_the_threshold_is_ineligible_with_shortfall() {
        let result = engine().calculate(&input(100.0)).expect("well-formed");

        assert!(!result.eligible);
        assert_eq!(result.fortnightly_amount, 0.0);
        assert_eq!(result.pre_cap_amount, 0.0);
        assert!(result.warnings[0].contains("$52.00 short"));
    }

    #[test]
    fn rent_exactly_at_the_threshold_pays_nothing() {
        let result = engine().calculate(&input(152.0)).expect("well-formed");

        assert!(result.eligible);
        assert_eq!(result.fortnightly_amount, 0.0);
    }

    #[test]
    fn high_rent_is_capped_at_the_household_maximum() {
        let result = engine().calculate(&input(600.0)).expect("well-formed");

        assert_eq!(result.pre_cap_amount, 336.0);
        assert_eq!(result.fortnightly_amount, 215.40);
    }

    #[test]
    fn couple_households_use_their_own_tier() {
        let mut input = input(400.0);
        input.household = HouseholdType::Couple;

        let result = engine().calculate(&input).expect("well-formed");

        assert_eq!(result.threshold, 246.00);
        assert_eq!(result.max_rate, 203.00);
        assert_eq!(result.pre_cap_amount, (400.0 - 246.0) * 0.75);
    }

    #[test]
    fn amount_never_exceeds_the_cap_across_a_rent_sweep() {
        let engine = engine();

        for rent in (0..=1_000).step_by(10) {
            let result = engine
                .calculate(&input(f64::from(rent)))
                .expect("well-formed");
            assert!(result.fortnightly_amount <= result.max_rate);
            if result.eligible_rent <= result.threshold {
                assert_eq!(result.fortnightly_amount, 0.0);
            }
        }
    }

    #[test]
    fn income_note_requires_a_supplied_base_payment() {
        let engine = engine();

        let mut with_base = input(400.0);
        with_base.base_payment = Some(300.0);
        with_base.personal_income = Some(700.0);
        let result = engine.calculate(&with_base).expect("well-formed");
        assert!(result.warnings.iter().any(|w| w.contains("free area")));
        assert!(!result.reduced_to_zero);

        let mut without_base = input(400.0);
        without_base.personal_income = Some(700.0);
        let result = engine.calculate(&without_base).expect("well-formed");
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn nil_base_payment_forces_the_supplement_to_zero() {
        let mut input = input(400.0);
        input.base_payment = Some(0.0);

        let result = engine().calculate(&input).expect("well-formed");

        assert!(result.reduced_to_zero);
        assert_eq!(result.fortnightly_amount, 0.0);
        assert_eq!(result.pre_cap_amount, 186.0);
    }

    #[test]
    fn malformed_rent_is_rejected() {
        let mut bad = input(f64::NAN);
        assert!(matches!(
            engine().calculate(&bad),
            Err(RentInputError::NonFinite { field: "fortnightly_rent" })
        ));

        bad = input(-10.0);
        assert!(matches!(
            engine().calculate(&bad),
            Err(RentInputError::Negative { field: "fortnightly_rent" })
        ));
    }
}
