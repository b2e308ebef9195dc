use serde::{Deserialize, Serialize};

use super::domain::ApplicantProfile;
use crate::policy::PaymentPolicy;

/// Hard qualification failures, in the order the gates run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    AgeOutsideRange { age: u8, min: u8, max: u8 },
    InsufficientStudyLoad,
    AssetsOverLimit { assets: f64, limit: f64, homeowner: bool },
}

impl IneligibilityReason {
    pub fn summary(&self) -> String {
        match self {
            IneligibilityReason::AgeOutsideRange { age, min, max } => {
                format!("age {age} is outside the qualifying range {min}-{max}")
            }
            IneligibilityReason::InsufficientStudyLoad => {
                "study load is neither full-time nor an approved concessional load".to_string()
            }
            IneligibilityReason::AssetsOverLimit {
                assets,
                limit,
                homeowner,
            } => {
                let tenure = if *homeowner { "homeowner" } else { "non-homeowner" };
                format!("assets of ${assets:.2} exceed the {tenure} limit of ${limit:.2}")
            }
        }
    }
}

pub(crate) struct GateReport {
    pub failure: Option<IneligibilityReason>,
    /// Pass notes for the gates that ran, in evaluation order.
    pub passed: Vec<String>,
    pub assets_tested: bool,
}

/// Run the ordered qualification gates, stopping at the first hard failure.
pub(crate) fn run_gates(profile: &ApplicantProfile, policy: &PaymentPolicy) -> GateReport {
    let mut passed = Vec::new();
    let mut assets_tested = false;

    let age = &policy.age;
    if profile.age < age.min || profile.age > age.max {
        return GateReport {
            failure: Some(IneligibilityReason::AgeOutsideRange {
                age: profile.age,
                min: age.min,
                max: age.max,
            }),
            passed,
            assets_tested,
        };
    }
    passed.push(format!(
        "age {} is within the qualifying range {}-{}",
        profile.age, age.min, age.max
    ));

    if !profile.full_time_study && !profile.concessional_study_load {
        return GateReport {
            failure: Some(IneligibilityReason::InsufficientStudyLoad),
            passed,
            assets_tested,
        };
    }
    passed.push(if profile.full_time_study {
        "full-time study load requirement met".to_string()
    } else {
        "approved concessional study load accepted".to_string()
    });

    match profile.personal_assets {
        Some(assets) if assets > 0.0 => {
            assets_tested = true;
            let limit = if profile.homeowner {
                policy.assets.homeowner
            } else {
                policy.assets.non_homeowner
            };
            if assets > limit {
                return GateReport {
                    failure: Some(IneligibilityReason::AssetsOverLimit {
                        assets,
                        limit,
                        homeowner: profile.homeowner,
                    }),
                    passed,
                    assets_tested,
                };
            }
            passed.push(format!(
                "assets of ${assets:.2} are within the ${limit:.2} limit"
            ));
        }
        _ => passed.push("assets test not applied (no asset value declared)".to_string()),
    }

    GateReport {
        failure: None,
        passed,
        assets_tested,
    }
}
