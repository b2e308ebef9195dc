use chrono::NaiveDate;

use crate::calculators::student_payment::{ApplicantProfile, LivingSituation, StudentPaymentEngine};
use crate::policy::{
    AgeLimits, AssetLimits, BaseRateSchedule, ParentalIncomeTest, PaymentPolicy,
    PersonalIncomeTest, PolicyYear,
};

pub(super) fn policy() -> PaymentPolicy {
    PaymentPolicy {
        year: PolicyYear(2025),
        effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
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
            free_area: 539.0,
            lower_ceiling: 646.0,
            lower_taper: 0.50,
            upper_flat_offset: 53.50,
            upper_taper: 0.60,
        },
        assets: AssetLimits {
            homeowner: 300_000.0,
            non_homeowner: 550_000.0,
        },
        base_rates: BaseRateSchedule {
            single_at_home: 400.00,
            single_away_from_home: 650.00,
            partnered_no_children: 650.00,
            single_with_children: 850.00,
            partnered_with_children: 720.00,
        },
    }
}

pub(super) fn engine() -> StudentPaymentEngine {
    StudentPaymentEngine::new(policy()).expect("test policy is valid")
}

/// A dependent 18 year old full-time student living away from home, with no
/// optional tests triggered.
pub(super) fn profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 18,
        full_time_study: true,
        concessional_study_load: false,
        declared_independent: false,
        independence_ground: None,
        parental_income: None,
        siblings_on_payment: 0,
        personal_income: None,
        income_bank_credit: None,
        personal_assets: None,
        homeowner: false,
        living_situation: LivingSituation::AwayFromHome,
        has_dependent_children: false,
        partnered: false,
    }
}
