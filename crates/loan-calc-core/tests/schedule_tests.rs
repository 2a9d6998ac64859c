use loan_calc_core::chart;
use loan_calc_core::engine::{self, DeferredInterest, LoanParams, LoanVariant};
use loan_calc_core::export;
use loan_calc_core::types::Currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn params(principal: Decimal, rate_pct: Decimal, term_months: u32) -> LoanParams {
    LoanParams {
        principal,
        annual_rate_pct: rate_pct,
        term_months,
        balloon_amount: Decimal::ZERO,
        currency: Currency::USD,
        deferred_interest: DeferredInterest::default(),
    }
}

fn all_variants() -> Vec<(LoanVariant, LoanParams)> {
    let mut balloon = params(dec!(50000), dec!(4), 60);
    balloon.balloon_amount = dec!(10000);
    vec![
        (LoanVariant::Amortized, params(dec!(100000), dec!(6), 360)),
        (LoanVariant::InterestOnly, params(dec!(20000), dec!(5), 24)),
        (LoanVariant::Deferred, params(dec!(5000), dec!(7), 12)),
        (LoanVariant::Balloon, balloon),
    ]
}

// ===========================================================================
// Schedule invariants shared by every variant
// ===========================================================================

#[test]
fn test_schedule_length_matches_term_for_every_variant() {
    for (variant, input) in all_variants() {
        let result = engine::compute(&input, variant).unwrap();
        assert_eq!(
            result.result.schedule.len(),
            input.term_months as usize,
            "{variant:?}"
        );
    }
}

#[test]
fn test_months_are_numbered_from_one() {
    for (variant, input) in all_variants() {
        let result = engine::compute(&input, variant).unwrap();
        for (i, row) in result.result.schedule.iter().enumerate() {
            assert_eq!(row.month as usize, i + 1, "{variant:?}");
        }
    }
}

#[test]
fn test_balance_never_increases_and_never_goes_negative() {
    for (variant, input) in all_variants() {
        let result = engine::compute(&input, variant).unwrap();
        let mut previous = input.principal;
        for row in &result.result.schedule {
            assert!(row.balance >= Decimal::ZERO, "{variant:?}");
            assert!(
                row.balance <= previous,
                "{variant:?} month {}: {} > {}",
                row.month,
                row.balance,
                previous
            );
            previous = row.balance;
        }
    }
}

#[test]
fn test_final_balance_is_zero_where_principal_is_repaid() {
    for (variant, input) in all_variants() {
        let result = engine::compute(&input, variant).unwrap();
        let last = result.result.schedule.last().unwrap();
        assert_eq!(last.balance, Decimal::ZERO, "{variant:?}");
    }
}

#[test]
fn test_total_cost_identity() {
    for (variant, input) in all_variants() {
        let result = engine::compute(&input, variant).unwrap();
        assert_eq!(
            result.result.total_cost,
            input.principal + result.result.total_interest,
            "{variant:?}"
        );
    }
}

#[test]
fn test_total_interest_is_the_sum_of_the_rows() {
    for (variant, input) in all_variants() {
        let result = engine::compute(&input, variant).unwrap();
        let summed: Decimal = result.result.schedule.iter().map(|r| r.interest).sum();
        assert_eq!(result.result.total_interest, summed, "{variant:?}");
    }
}

#[test]
fn test_amortized_principal_sums_to_loan_amount() {
    let input = params(dec!(100000), dec!(6), 360);
    let result = engine::compute(&input, LoanVariant::Amortized).unwrap();
    let repaid: Decimal = result.result.schedule.iter().map(|r| r.principal).sum();

    // One cent of rounding slack per emitted row
    let tolerance = dec!(0.01) * Decimal::from(input.term_months);
    assert!(
        (repaid - input.principal).abs() <= tolerance,
        "repaid {repaid}"
    );
}

// ===========================================================================
// Serializer and projector agree with the engine output
// ===========================================================================

#[test]
fn test_csv_round_trip_for_a_real_schedule() {
    let input = params(dec!(100000), dec!(6), 360);
    let result = engine::compute(&input, LoanVariant::Amortized).unwrap();
    let text = export::to_delimited_text(&result.result.schedule);

    let mut lines = text.split('\n');
    assert_eq!(
        lines.next().unwrap(),
        "Month,Interest,Principal,Payment,Remaining Balance"
    );

    for (line, row) in lines.zip(&result.result.schedule) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0].parse::<u32>().unwrap(), row.month);
        assert_eq!(fields[1].parse::<Decimal>().unwrap(), row.interest);
        assert_eq!(fields[2].parse::<Decimal>().unwrap(), row.principal);
        assert_eq!(fields[3].parse::<Decimal>().unwrap(), row.payment);
        assert_eq!(fields[4].parse::<Decimal>().unwrap(), row.balance);
    }
}

#[test]
fn test_projection_tracks_schedule_rows() {
    let input = params(dec!(20000), dec!(5), 24);
    let result = engine::compute(&input, LoanVariant::InterestOnly).unwrap();
    let projection = chart::project(&result.result.schedule);

    assert_eq!(projection.labels.len(), 24);
    assert_eq!(projection.labels[0], "Month 1");
    assert_eq!(projection.labels[23], "Month 24");
    for (i, row) in result.result.schedule.iter().enumerate() {
        assert_eq!(projection.balance[i], row.balance);
        assert_eq!(projection.principal[i], row.principal);
        assert_eq!(projection.interest[i], row.interest);
    }
    assert_eq!(
        projection.totals.interest_total,
        result.result.total_interest
    );
}
