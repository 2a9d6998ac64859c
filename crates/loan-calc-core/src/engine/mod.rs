use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::LoanCalcError;
use crate::types::*;
use crate::LoanCalcResult;

mod policy;

use policy::PaymentPolicy;

/// Repayment variant. Determines the payment formula and per-period
/// recurrence; no other input distinguishes behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoanVariant {
    Amortized,
    InterestOnly,
    Deferred,
    Balloon,
}

impl LoanVariant {
    pub fn label(&self) -> &'static str {
        match self {
            LoanVariant::Amortized => "Amortized Loan",
            LoanVariant::InterestOnly => "Interest-Only Loan",
            LoanVariant::Deferred => "Deferred Payment Loan",
            LoanVariant::Balloon => "Balloon Loan",
        }
    }
}

/// Interest treatment during the deferral period of a `Deferred` loan.
///
/// The two policies give materially different totals, so the choice is an
/// explicit input rather than a baked-in default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeferredInterest {
    /// No interest is ever charged; maturity repays principal only.
    #[default]
    Waived,
    /// Interest accrues at `P * r` per month and is collected in one piece
    /// with the principal at maturity.
    AccruedAtMaturity,
}

/// Input for a single loan computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParams {
    pub principal: Money,
    /// Annual rate in percent (6 means 6%/yr)
    pub annual_rate_pct: Rate,
    pub term_months: u32,
    /// Extra amount due with the final payment; balloon variant only
    #[serde(default)]
    pub balloon_amount: Money,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub deferred_interest: DeferredInterest,
}

/// A single period in the payment schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub interest: Money,
    pub principal: Money,
    pub payment: Money,
    pub balance: Money,
}

/// Output for a single loan computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSchedule {
    /// Nominal monthly payment, excluding any balloon top-up
    pub monthly_payment: Money,
    /// Sum of the rounded per-row interest figures
    pub total_interest: Money,
    /// `principal + total_interest`
    pub total_cost: Money,
    pub schedule: Vec<ScheduleRow>,
}

/// Build a month-by-month payment schedule for one loan.
///
/// Monetary row fields are rounded to cents at emission; the running balance
/// stays unrounded inside the recurrence. Totals are summed from the rounded
/// rows so displayed figures always reconcile with the displayed schedule.
pub fn compute(
    params: &LoanParams,
    variant: LoanVariant,
) -> LoanCalcResult<ComputationOutput<LoanSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(params, variant)?;

    if params.balloon_amount > Decimal::ZERO && variant != LoanVariant::Balloon {
        warnings.push(format!(
            "balloon_amount is ignored for the {} variant",
            variant.label()
        ));
    }

    let r = monthly_rate(params.annual_rate_pct);
    let policy = PaymentPolicy::build(params, variant, r);
    let monthly_payment = round_money(policy.nominal_payment());

    let term = params.term_months;
    let mut schedule = Vec::with_capacity(term as usize);
    let mut balance = params.principal;
    let mut total_interest = Decimal::ZERO;

    for month in 1..=term {
        let split = policy.split(month, term, balance, r);
        let interest = round_money(split.interest);
        let principal = round_money(split.principal);
        total_interest += interest;

        let payment = round_money(policy.payment(month, term, interest, principal, total_interest));

        // Negative residuals from the final annuity payment clamp to zero
        balance = (balance - split.principal).max(Decimal::ZERO);

        schedule.push(ScheduleRow {
            month,
            interest,
            principal,
            payment,
            balance: round_money(balance),
        });
    }

    let output = LoanSchedule {
        monthly_payment,
        total_interest,
        total_cost: params.principal + total_interest,
        schedule,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        &format!("{} Schedule", variant.label()),
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_rate_pct": params.annual_rate_pct.to_string(),
            "term_months": params.term_months,
            "balloon_amount": params.balloon_amount.to_string(),
            "currency": params.currency.code(),
            "variant": variant,
            "deferred_interest": params.deferred_interest,
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// Monthly rate from an annual percentage: `r = pct / 100 / 12`.
fn monthly_rate(annual_pct: Rate) -> Rate {
    annual_pct / dec!(100) / dec!(12)
}

fn validate(params: &LoanParams, variant: LoanVariant) -> LoanCalcResult<()> {
    if params.principal <= Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if params.annual_rate_pct < Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Annual rate cannot be negative".into(),
        });
    }
    if params.term_months == 0 {
        return Err(LoanCalcError::InvalidInput {
            field: "term_months".into(),
            reason: "Term must be at least 1 month".into(),
        });
    }
    if params.balloon_amount < Decimal::ZERO {
        return Err(LoanCalcError::InvalidInput {
            field: "balloon_amount".into(),
            reason: "Balloon amount cannot be negative".into(),
        });
    }
    // The balloon payment is sized for a notional term of n-1 months
    if variant == LoanVariant::Balloon && params.term_months < 2 {
        return Err(LoanCalcError::InvalidInput {
            field: "term_months".into(),
            reason: "Balloon schedules need a term of at least 2 months".into(),
        });
    }
    Ok(())
}
