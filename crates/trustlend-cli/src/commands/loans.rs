use chrono::{NaiveDate, Utc};
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use trustlend_core::ledger::workflow::{load_dashboard, submit_application};
use trustlend_core::lending::application::{LoanPurpose, LoanRequest};
use trustlend_core::lending::catalog::find_lender;
use trustlend_core::lending::installment::{
    monthly_installment, quote_loan, total_repayment, LOAN_TERM_MONTHS,
};
use trustlend_core::TrustLendError;

use super::StoreArgs;

/// Arguments for the EMI calculator
#[derive(Args)]
pub struct EmiArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Decimal,

    /// Annual interest rate in percent (12.5 = 12.5% p.a.)
    #[arg(long)]
    pub rate: Decimal,

    /// Term in months
    #[arg(long, default_value_t = LOAN_TERM_MONTHS)]
    pub term: u32,
}

/// Arguments for a loan quote against one lender
#[derive(Args)]
pub struct QuoteArgs {
    #[arg(long)]
    pub lender_id: u32,

    /// Principal to borrow
    #[arg(long)]
    pub amount: Decimal,
}

/// Arguments for submitting a loan application
#[derive(Args)]
pub struct ApplyArgs {
    /// Applicant; must have a stored assessment
    #[arg(long)]
    pub user: String,

    #[arg(long)]
    pub lender_id: u32,

    /// Principal to borrow
    #[arg(long)]
    pub amount: Decimal,

    /// e.g. "Working Capital", agriculture, home-improvement
    #[arg(long)]
    pub purpose: LoanPurpose,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the user dashboard
#[derive(Args)]
pub struct DashboardArgs {
    #[arg(long)]
    pub user: String,

    /// Date to count days remaining from (defaults to today, UTC)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi = monthly_installment(args.principal, args.rate, args.term)?;
    let total = total_repayment(emi, args.term)?;
    Ok(json!({
        "result": {
            "principal": args.principal,
            "annual_rate_percent": args.rate,
            "term_months": args.term,
            "monthly_installment": emi,
            "total_repayment": total,
        }
    }))
}

pub fn run_quote(args: QuoteArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let lender = find_lender(args.lender_id)
        .ok_or_else(|| TrustLendError::NotFound(format!("lender {}", args.lender_id)))?;
    let result = quote_loan(lender, args.amount)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_apply(args: ApplyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = args.store.open();
    let request = LoanRequest {
        user_id: args.user,
        lender_id: args.lender_id,
        amount: args.amount,
        purpose: args.purpose,
    };
    let record = submit_application(&store, &request, Utc::now())?;
    Ok(json!({ "result": record }))
}

pub fn run_dashboard(args: DashboardArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = args.store.open();
    let today = args.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let dashboard = load_dashboard(&store, &args.user, today)?;
    Ok(serde_json::to_value(dashboard)?)
}
