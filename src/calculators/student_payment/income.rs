//! Income-test reductions applied to the selected base rate.

use crate::policy::{ParentalIncomeTest, PersonalIncomeTest};

/// Reduction attributable to this applicant from the parental income test.
///
/// The taper applies to income above the free area and the resulting pool is
/// split evenly across the applicant and every sibling also on payment. The
/// even split ignores each sibling's own rate; the portal documents this as an
/// approximation.
pub(crate) fn parental_income_reduction(
    annual_income: f64,
    siblings_on_payment: u32,
    test: &ParentalIncomeTest,
) -> f64 {
    if annual_income <= test.free_area {
        return 0.0;
    }

    let excess = annual_income - test.free_area;
    let pooled = excess * test.taper;
    pooled / f64::from(siblings_on_payment + 1)
}

/// Reduction from the applicant's own fortnightly income under the two-band
/// taper. Any income-bank credit offsets income before the bands apply.
///
/// The lower-band amount accrued up to the ceiling is always computed from the
/// table, so the bands join continuously apart from the configured flat
/// offset.
pub(crate) fn personal_income_reduction(
    fortnightly_income: f64,
    income_bank_credit: f64,
    test: &PersonalIncomeTest,
) -> f64 {
    let effective = (fortnightly_income - income_bank_credit).max(0.0);

    if effective <= test.free_area {
        return 0.0;
    }

    if effective <= test.lower_ceiling {
        return (effective - test.free_area) * test.lower_taper;
    }

    let lower_band_amount = (test.lower_ceiling - test.free_area) * test.lower_taper;
    lower_band_amount + test.upper_flat_offset + (effective - test.lower_ceiling) * test.upper_taper
}
