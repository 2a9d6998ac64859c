use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::engine::ScheduleRow;
use crate::types::Money;

/// Parallel series for a line chart, one entry per schedule row, plus the
/// principal/interest aggregate for pie-style summary views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartProjection {
    pub labels: Vec<String>,
    pub balance: Vec<Money>,
    pub principal: Vec<Money>,
    pub interest: Vec<Money>,
    pub totals: PaymentBreakdown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal_total: Money,
    pub interest_total: Money,
}

/// Project a schedule into chart-ready series.
///
/// Pure projection: values are taken from the rows as-is, never recomputed
/// from the loan parameters. The chart host owns its own lifecycle.
pub fn project(schedule: &[ScheduleRow]) -> ChartProjection {
    let mut labels = Vec::with_capacity(schedule.len());
    let mut balance = Vec::with_capacity(schedule.len());
    let mut principal = Vec::with_capacity(schedule.len());
    let mut interest = Vec::with_capacity(schedule.len());
    let mut principal_total = Decimal::ZERO;
    let mut interest_total = Decimal::ZERO;

    for row in schedule {
        labels.push(format!("Month {}", row.month));
        balance.push(row.balance);
        principal.push(row.principal);
        interest.push(row.interest);
        principal_total += row.principal;
        interest_total += row.interest;
    }

    ChartProjection {
        labels,
        balance,
        principal,
        interest,
        totals: PaymentBreakdown {
            principal_total,
            interest_total,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn rows() -> Vec<ScheduleRow> {
        vec![
            ScheduleRow {
                month: 1,
                interest: dec!(10.00),
                principal: dec!(90.00),
                payment: dec!(100.00),
                balance: dec!(910.00),
            },
            ScheduleRow {
                month: 2,
                interest: dec!(9.10),
                principal: dec!(90.90),
                payment: dec!(100.00),
                balance: dec!(819.10),
            },
        ]
    }

    #[test]
    fn test_labels_and_series_mirror_rows() {
        let projection = project(&rows());
        assert_eq!(projection.labels, vec!["Month 1", "Month 2"]);
        assert_eq!(projection.balance, vec![dec!(910.00), dec!(819.10)]);
        assert_eq!(projection.principal, vec![dec!(90.00), dec!(90.90)]);
        assert_eq!(projection.interest, vec![dec!(10.00), dec!(9.10)]);
    }

    #[test]
    fn test_totals_sum_the_series() {
        let projection = project(&rows());
        assert_eq!(projection.totals.principal_total, dec!(180.90));
        assert_eq!(projection.totals.interest_total, dec!(19.10));
    }

    #[test]
    fn test_empty_schedule_projects_empty_series() {
        let projection = project(&[]);
        assert!(projection.labels.is_empty());
        assert_eq!(projection.totals.principal_total, Decimal::ZERO);
        assert_eq!(projection.totals.interest_total, Decimal::ZERO);
    }
}
