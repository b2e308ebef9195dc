use crate::calculators::student_payment::income::{
    parental_income_reduction, personal_income_reduction,
};
use crate::policy::{ParentalIncomeTest, PersonalIncomeTest};

fn parental_test() -> ParentalIncomeTest {
    ParentalIncomeTest {
        free_area: 60_000.0,
        taper: 0.20,
    }
}

fn personal_test() -> PersonalIncomeTest {
    PersonalIncomeTest {
        free_area: 539.0,
        lower_ceiling: 646.0,
        lower_taper: 0.50,
        upper_flat_offset: 53.50,
        upper_taper: 0.60,
    }
}

#[test]
fn parental_income_below_free_area_reduces_nothing() {
    let test = parental_test();
    assert_eq!(parental_income_reduction(0.0, 0, &test), 0.0);
    assert_eq!(parental_income_reduction(59_999.99, 0, &test), 0.0);
    assert_eq!(parental_income_reduction(60_000.0, 0, &test), 0.0);
}

#[test]
fn parental_excess_is_tapered_and_pooled() {
    let test = parental_test();

    assert_eq!(parental_income_reduction(70_000.0, 0, &test), 2_000.0);
    assert_eq!(parental_income_reduction(70_000.0, 1, &test), 1_000.0);
    assert_eq!(parental_income_reduction(70_000.0, 3, &test), 500.0);
}

#[test]
fn parental_reduction_is_monotonic_in_income() {
    let test = parental_test();
    let mut previous = 0.0;

    for income in (50_000..=120_000).step_by(1_000) {
        let reduction = parental_income_reduction(f64::from(income), 2, &test);
        assert!(
            reduction >= previous,
            "reduction fell from {previous} to {reduction} at income {income}"
        );
        previous = reduction;
    }
}

#[test]
fn parental_reduction_never_rises_with_more_siblings() {
    let test = parental_test();
    let mut previous = f64::INFINITY;

    for siblings in 0..10 {
        let reduction = parental_income_reduction(90_000.0, siblings, &test);
        assert!(
            reduction <= previous,
            "reduction rose from {previous} to {reduction} with {siblings} sibling(s)"
        );
        previous = reduction;
    }
}

#[test]
fn personal_income_inside_free_area_reduces_nothing() {
    let test = personal_test();
    assert_eq!(personal_income_reduction(0.0, 0.0, &test), 0.0);
    assert_eq!(personal_income_reduction(539.0, 0.0, &test), 0.0);
}

#[test]
fn lower_band_applies_half_rate_to_the_excess() {
    let test = personal_test();
    assert_eq!(personal_income_reduction(600.0, 0.0, &test), 30.5);
    assert_eq!(personal_income_reduction(646.0, 0.0, &test), 53.5);
}

#[test]
fn published_upper_band_scenario() {
    // (646 - 539) * 0.50 + 53.50 + (700 - 646) * 0.60 = 139.40
    let test = personal_test();
    let reduction = personal_income_reduction(700.0, 0.0, &test);
    assert!((reduction - 139.40).abs() < 1e-9, "got {reduction}");
}

#[test]
fn bands_join_continuously_without_a_flat_offset() {
    let test = PersonalIncomeTest {
        upper_flat_offset: 0.0,
        ..personal_test()
    };

    let ceiling = test.lower_ceiling;
    let below = personal_income_reduction(ceiling - 0.01, 0.0, &test);
    let above = personal_income_reduction(ceiling + 0.01, 0.0, &test);
    assert!(
        (above - below).abs() < 0.02,
        "jump of {} at the band ceiling",
        above - below
    );

    // Exactly at the ceiling the lower band still applies.
    let at = personal_income_reduction(ceiling, 0.0, &test);
    assert_eq!(at, (ceiling - test.free_area) * test.lower_taper);
}

#[test]
fn income_bank_credit_offsets_income_first() {
    let test = personal_test();

    // 700 less 161 of credit lands exactly on the free area.
    assert_eq!(personal_income_reduction(700.0, 161.0, &test), 0.0);
    assert_eq!(personal_income_reduction(700.0, 100.0, &test), 30.5);
    // Credit larger than income clamps to zero rather than going negative.
    assert_eq!(personal_income_reduction(50.0, 100.0, &test), 0.0);
}

#[test]
fn personal_reduction_is_monotonic_in_income() {
    let test = personal_test();
    let mut previous = 0.0;

    for tenths in (0..=20_000).step_by(25) {
        let income = f64::from(tenths) / 10.0;
        let reduction = personal_income_reduction(income, 0.0, &test);
        assert!(
            reduction >= previous,
            "reduction fell from {previous} to {reduction} at income {income}"
        );
        previous = reduction;
    }
}
