//! Student-payment eligibility and entitlement engine.
//!
//! Evaluation runs ordered qualification gates (age, study load, assets) and
//! short-circuits on the first hard failure; a profile that clears the gates
//! has the applicable income tests applied against the policy-year table to
//! arrive at a fortnightly payment. Every assessment carries its reasoning so
//! the portal can show applicants exactly how a figure was reached.

pub mod domain;
mod gates;
mod income;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

pub use domain::{
    ApplicantProfile, IndependenceBasis, IndependenceGround, IndependenceStatus, LivingSituation,
    ProfileError,
};
pub use gates::IneligibilityReason;

use crate::policy::{PaymentPolicy, PolicyError};

/// Records which optional tests actually ran. A test only counts as applied
/// when the applicant supplied the input it evaluates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedTests {
    pub assets: bool,
    pub parental_income: bool,
    pub personal_income: bool,
}

/// Immutable outcome of one eligibility evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentAssessment {
    pub eligible: bool,
    /// All gates passed but the income tests tapered the payment to zero.
    pub nil_rate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ineligibility: Option<IneligibilityReason>,
    pub reasons: Vec<String>,
    pub independence: IndependenceStatus,
    pub base_rate: f64,
    pub parental_income_reduction: f64,
    pub personal_income_reduction: f64,
    pub fortnightly_payment: f64,
    pub annual_payment: f64,
    pub tests_applied: AppliedTests,
    pub breakdown: Vec<String>,
}

/// Stateless evaluator bound to one validated policy-year table.
pub struct StudentPaymentEngine {
    policy: PaymentPolicy,
}

impl StudentPaymentEngine {
    /// Build an engine, rejecting a malformed threshold table outright.
    pub fn new(policy: PaymentPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &PaymentPolicy {
        &self.policy
    }

    /// Evaluate a profile against the policy table.
    ///
    /// Domain ineligibility is a normal assessment, never an error; only a
    /// malformed profile (non-finite or negative amounts) is rejected.
    pub fn assess(&self, profile: &ApplicantProfile) -> Result<PaymentAssessment, ProfileError> {
        profile.validate()?;

        let independence = determine_independence(profile, &self.policy);
        let report = gates::run_gates(profile, &self.policy);

        if let Some(failure) = report.failure {
            let mut breakdown = report.passed;
            breakdown.push(format!("failed: {}", failure.summary()));
            return Ok(PaymentAssessment {
                eligible: false,
                nil_rate: false,
                reasons: vec![failure.summary()],
                ineligibility: Some(failure),
                independence,
                base_rate: 0.0,
                parental_income_reduction: 0.0,
                personal_income_reduction: 0.0,
                fortnightly_payment: 0.0,
                annual_payment: 0.0,
                tests_applied: AppliedTests {
                    assets: report.assets_tested,
                    ..AppliedTests::default()
                },
                breakdown,
            });
        }

        let mut reasons = report.passed;
        let mut breakdown = reasons.clone();
        let mut tests_applied = AppliedTests {
            assets: report.assets_tested,
            ..AppliedTests::default()
        };

        breakdown.push(match independence {
            IndependenceStatus::Independent {
                basis: IndependenceBasis::Declared,
            } => "assessed as independent (declared)".to_string(),
            IndependenceStatus::Independent {
                basis: IndependenceBasis::AgeQualified,
            } => format!(
                "assessed as independent (aged {} or over)",
                self.policy.age.independent_from
            ),
            IndependenceStatus::Dependent => {
                "assessed as dependent on parental circumstances".to_string()
            }
        });

        let (base_rate, rate_label) = select_base_rate(profile, &self.policy);
        breakdown.push(format!(
            "base rate ${base_rate:.2} per fortnight ({rate_label})"
        ));

        let parental_reduction = match (independence.is_independent(), profile.parental_income) {
            (false, Some(annual_income)) => {
                tests_applied.parental_income = true;
                let reduction = income::parental_income_reduction(
                    annual_income,
                    profile.siblings_on_payment,
                    &self.policy.parental_income,
                );
                breakdown.push(format!(
                    "parental income test: ${annual_income:.2} declared, \
                     {} in the payment pool, reduction ${reduction:.2}",
                    profile.siblings_on_payment + 1
                ));
                reduction
            }
            _ => {
                breakdown.push("parental income test not applied".to_string());
                0.0
            }
        };

        let personal_reduction = match profile.personal_income {
            Some(fortnightly_income) if fortnightly_income > 0.0 => {
                tests_applied.personal_income = true;
                let credit = profile.income_bank_credit.unwrap_or(0.0);
                let reduction = income::personal_income_reduction(
                    fortnightly_income,
                    credit,
                    &self.policy.personal_income,
                );
                breakdown.push(format!(
                    "personal income test: ${fortnightly_income:.2} per fortnight \
                     less ${credit:.2} income bank credit, reduction ${reduction:.2}"
                ));
                reduction
            }
            _ => {
                breakdown.push("personal income test not applied".to_string());
                0.0
            }
        };

        let fortnightly_payment = (base_rate - parental_reduction - personal_reduction).max(0.0);
        let annual_payment = fortnightly_payment * 26.0;
        let nil_rate = fortnightly_payment == 0.0;

        breakdown.push(format!(
            "payable: ${fortnightly_payment:.2} per fortnight (${annual_payment:.2} per year)"
        ));
        if nil_rate {
            reasons.push(
                "entitled at a nil rate: income tests reduce the payment to zero".to_string(),
            );
        } else {
            reasons.push(format!(
                "payable at ${fortnightly_payment:.2} per fortnight"
            ));
        }

        Ok(PaymentAssessment {
            eligible: true,
            nil_rate,
            ineligibility: None,
            reasons,
            independence,
            base_rate,
            parental_income_reduction: parental_reduction,
            personal_income_reduction: personal_reduction,
            fortnightly_payment,
            annual_payment,
            tests_applied,
            breakdown,
        })
    }
}

/// The declared flag always wins; otherwise only age confers independence.
fn determine_independence(profile: &ApplicantProfile, policy: &PaymentPolicy) -> IndependenceStatus {
    if profile.declared_independent {
        IndependenceStatus::Independent {
            basis: IndependenceBasis::Declared,
        }
    } else if profile.age >= policy.age.independent_from {
        IndependenceStatus::Independent {
            basis: IndependenceBasis::AgeQualified,
        }
    } else {
        IndependenceStatus::Dependent
    }
}

/// Dependent-children configuration outranks partnered status, which outranks
/// the living-situation split.
fn select_base_rate(profile: &ApplicantProfile, policy: &PaymentPolicy) -> (f64, &'static str) {
    let rates = &policy.base_rates;
    if profile.has_dependent_children {
        if profile.partnered {
            (rates.partnered_with_children, "partnered with children")
        } else {
            (rates.single_with_children, "single with children")
        }
    } else if profile.partnered {
        (rates.partnered_no_children, "partnered")
    } else if profile.living_situation.away_from_home() {
        (
            rates.single_away_from_home,
            "single, living away from home",
        )
    } else {
        (rates.single_at_home, "single, living at home")
    }
}
