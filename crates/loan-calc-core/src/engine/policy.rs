use rust_decimal::{Decimal, MathematicalOps};

use crate::engine::{DeferredInterest, LoanParams, LoanVariant};
use crate::types::{Money, Rate};

/// Per-variant payment formula, fixed once per computation.
///
/// Each variant is a named policy built up front from the loan parameters,
/// so the schedule loop never branches on the variant tag directly.
#[derive(Debug, Clone)]
pub(crate) enum PaymentPolicy {
    /// Equal payments sized to retire the full principal over the term.
    Annuity { payment: Money },
    /// Interest collected monthly, principal due in one piece at maturity.
    InterestOnly { payment: Money },
    /// Nothing collected until maturity; interest per the accrual flag.
    Deferred {
        accrual: DeferredInterest,
        monthly_accrual: Money,
    },
    /// Payments sized for a term one month short, balloon due at maturity.
    Balloon { payment: Money, balloon: Money },
}

/// Unrounded interest/principal amounts for a single period.
pub(crate) struct PeriodSplit {
    pub interest: Money,
    pub principal: Money,
}

impl PaymentPolicy {
    pub(crate) fn build(params: &LoanParams, variant: LoanVariant, r: Rate) -> Self {
        match variant {
            LoanVariant::Amortized => PaymentPolicy::Annuity {
                payment: annuity_payment(params.principal, r, params.term_months),
            },
            LoanVariant::InterestOnly => PaymentPolicy::InterestOnly {
                payment: params.principal * r,
            },
            LoanVariant::Deferred => PaymentPolicy::Deferred {
                accrual: params.deferred_interest,
                monthly_accrual: params.principal * r,
            },
            // term_months >= 2 is enforced by validation before we get here
            LoanVariant::Balloon => PaymentPolicy::Balloon {
                payment: annuity_payment(params.principal, r, params.term_months - 1),
                balloon: params.balloon_amount,
            },
        }
    }

    /// The advertised monthly payment, before any final-period top-up.
    pub(crate) fn nominal_payment(&self) -> Money {
        match self {
            PaymentPolicy::Annuity { payment }
            | PaymentPolicy::InterestOnly { payment }
            | PaymentPolicy::Balloon { payment, .. } => *payment,
            PaymentPolicy::Deferred { .. } => Decimal::ZERO,
        }
    }

    /// Interest accrued and principal retired in one period, unrounded.
    pub(crate) fn split(&self, month: u32, term: u32, balance: Money, r: Rate) -> PeriodSplit {
        let last = month == term;
        match self {
            PaymentPolicy::Annuity { payment } => {
                let interest = balance * r;
                PeriodSplit {
                    interest,
                    principal: payment - interest,
                }
            }
            PaymentPolicy::InterestOnly { .. } => PeriodSplit {
                interest: balance * r,
                principal: if last { balance } else { Decimal::ZERO },
            },
            PaymentPolicy::Deferred {
                accrual,
                monthly_accrual,
            } => PeriodSplit {
                interest: match accrual {
                    DeferredInterest::Waived => Decimal::ZERO,
                    DeferredInterest::AccruedAtMaturity => *monthly_accrual,
                },
                principal: if last { balance } else { Decimal::ZERO },
            },
            PaymentPolicy::Balloon { payment, .. } => {
                let interest = balance * r;
                PeriodSplit {
                    interest,
                    // The annuity portion retires the balance by month n-1;
                    // month n sweeps whatever residual remains.
                    principal: if last { balance } else { payment - interest },
                }
            }
        }
    }

    /// Cash collected in one period, given the rounded row figures.
    ///
    /// `interest_collected` is the cumulative rounded interest including the
    /// current row, so maturity payments reconcile exactly with the
    /// displayed rows.
    pub(crate) fn payment(
        &self,
        month: u32,
        term: u32,
        interest: Money,
        principal: Money,
        interest_collected: Money,
    ) -> Money {
        let last = month == term;
        match self {
            PaymentPolicy::Annuity { payment } => *payment,
            PaymentPolicy::InterestOnly { payment } => {
                if last {
                    interest + principal
                } else {
                    *payment
                }
            }
            PaymentPolicy::Deferred { .. } => {
                if last {
                    principal + interest_collected
                } else {
                    Decimal::ZERO
                }
            }
            PaymentPolicy::Balloon { payment, balloon } => {
                if last {
                    *payment + *balloon
                } else {
                    *payment
                }
            }
        }
    }
}

/// Level payment that retires `principal` over `periods` months at monthly
/// rate `r`. Falls back to straight-line division when the rate is zero,
/// where the annuity formula degenerates.
fn annuity_payment(principal: Money, r: Rate, periods: u32) -> Money {
    if r.is_zero() {
        return principal / Decimal::from(periods);
    }
    let factor = (Decimal::ONE + r).powd(Decimal::from(periods));
    principal * r * factor / (factor - Decimal::ONE)
}
