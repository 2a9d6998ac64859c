use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::PathBuf;

use loan_calc_core::chart;
use loan_calc_core::engine::{self, DeferredInterest, LoanParams, LoanVariant};
use loan_calc_core::export;
use loan_calc_core::types::Currency;

use crate::input;

/// Repayment variant selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum VariantArg {
    Amortized,
    InterestOnly,
    Deferred,
    Balloon,
}

impl From<VariantArg> for LoanVariant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Amortized => LoanVariant::Amortized,
            VariantArg::InterestOnly => LoanVariant::InterestOnly,
            VariantArg::Deferred => LoanVariant::Deferred,
            VariantArg::Balloon => LoanVariant::Balloon,
        }
    }
}

/// Deferred-variant interest policy selector
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DeferredArg {
    Waived,
    Accrued,
}

impl From<DeferredArg> for DeferredInterest {
    fn from(arg: DeferredArg) -> Self {
        match arg {
            DeferredArg::Waived => DeferredInterest::Waived,
            DeferredArg::Accrued => DeferredInterest::AccruedAtMaturity,
        }
    }
}

/// Loan parameters shared by every subcommand
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (6 = 6%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Extra amount due with the final payment (balloon variant only)
    #[arg(long, default_value = "0")]
    pub balloon: Decimal,

    /// ISO 4217 currency code, display only
    #[arg(long, default_value = "USD")]
    pub currency: String,

    /// Repayment variant
    #[arg(long, value_enum, default_value = "amortized")]
    pub variant: VariantArg,

    /// Interest policy for the deferred variant
    #[arg(long, value_enum, default_value = "waived")]
    pub deferred_interest: DeferredArg,
}

impl LoanArgs {
    fn params(&self) -> Result<LoanParams, Box<dyn std::error::Error>> {
        if let Some(ref path) = self.input {
            return input::read_json(path);
        }
        if let Some(data) = input::read_stdin()? {
            return Ok(serde_json::from_value(data)?);
        }

        let principal = self
            .principal
            .ok_or("--principal is required (or provide --input)")?;
        let rate = self.rate.ok_or("--rate is required (or provide --input)")?;
        let term_months = self
            .term_months
            .ok_or("--term-months is required (or provide --input)")?;

        Ok(LoanParams {
            principal,
            annual_rate_pct: rate,
            term_months,
            balloon_amount: self.balloon,
            currency: Currency::from_code(&self.currency),
            deferred_interest: self.deferred_interest.into(),
        })
    }
}

/// Arguments for the schedule command
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.loan.params()?;
    let result = engine::compute(&params, args.loan.variant.into())?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the chart projection command
#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

pub fn run_chart(args: ChartArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.loan.params()?;
    let result = engine::compute(&params, args.loan.variant.into())?;
    let projection = chart::project(&result.result.schedule);
    Ok(serde_json::to_value(projection)?)
}

/// Arguments for CSV export
#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Destination file; prints to stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_export(args: ExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = args.loan.params()?;
    let result = engine::compute(&params, args.loan.variant.into())?;

    match args.out {
        Some(path) => {
            export::write_csv_file(&result.result.schedule, &path)?;
            Ok(serde_json::json!({
                "written": path.display().to_string(),
                "rows": result.result.schedule.len(),
            }))
        }
        None => {
            println!("{}", export::to_delimited_text(&result.result.schedule));
            Ok(Value::Null)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn export_args(out: Option<PathBuf>) -> ExportArgs {
        ExportArgs {
            loan: LoanArgs {
                input: None,
                principal: Some(Decimal::from(1200u32)),
                rate: Some(Decimal::from(6u32)),
                term_months: Some(12),
                balloon: Decimal::ZERO,
                currency: "USD".to_string(),
                variant: VariantArg::Amortized,
                deferred_interest: DeferredArg::Waived,
            },
            out,
        }
    }

    #[test]
    fn test_export_to_file_writes_schedule() {
        let path = std::env::temp_dir().join("loancalc_export_test.csv");
        let value = run_export(export_args(Some(path.clone()))).unwrap();

        assert_eq!(value["rows"], 12);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Month,Interest,Principal,Payment,Remaining Balance"));
        assert_eq!(text.split('\n').count(), 13);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_export_without_out_prints_and_returns_null() {
        let value = run_export(export_args(None)).unwrap();
        assert!(value.is_null());
    }
}
