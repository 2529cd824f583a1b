//! Equated monthly installments and loan quotes.

use std::time::Instant;

use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TrustLendError;
use crate::types::{with_metadata, ComputationOutput, Money, PercentRate};
use crate::TrustLendResult;

use super::catalog::LenderOffer;

/// Every application is repaid over six months.
pub const LOAN_TERM_MONTHS: u32 = 6;

/// Smallest principal a lender will disburse.
pub const MIN_LOAN_AMOUNT: Money = dec!(1000);

/// Amortised monthly payment, rounded to the nearest whole currency unit.
///
/// `emi = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r = annual_rate / 1200`.
/// An interest-free loan amortises linearly (`P / n`).
pub fn monthly_installment(
    principal: Money,
    annual_rate_percent: PercentRate,
    term_months: u32,
) -> TrustLendResult<Money> {
    if term_months == 0 {
        return Err(TrustLendError::InvalidInput {
            field: "term_months".into(),
            reason: "Loan term must be at least one month".into(),
        });
    }

    let n = Decimal::from(term_months);
    let monthly_rate = annual_rate_percent / dec!(1200);

    let emi = if monthly_rate.is_zero() {
        principal / n
    } else {
        let growth = (Decimal::ONE + monthly_rate)
            .checked_powu(u64::from(term_months))
            .ok_or_else(|| out_of_range("term_months", "Loan term is too long to amortise"))?;
        let denominator = growth - Decimal::ONE;
        if denominator.is_zero() {
            return Err(TrustLendError::DivisionByZero {
                context: "EMI annuity factor".into(),
            });
        }
        principal
            .checked_mul(monthly_rate)
            .and_then(|v| v.checked_mul(growth))
            .and_then(|v| v.checked_div(denominator))
            .ok_or_else(|| out_of_range("principal", "Installment exceeds representable range"))?
    };

    Ok(round_currency(emi))
}

/// Sum of all installments over the term.
pub fn total_repayment(monthly: Money, term_months: u32) -> TrustLendResult<Money> {
    monthly
        .checked_mul(Decimal::from(term_months))
        .ok_or_else(|| out_of_range("principal", "Total repayment exceeds representable range"))
}

fn out_of_range(field: &str, reason: &str) -> TrustLendError {
    TrustLendError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Round half away from zero to whole currency units.
pub fn round_currency(amount: Money) -> Money {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Loan quote
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuote {
    pub lender_id: u32,
    pub bank_name: String,
    pub principal: Money,
    pub interest_rate: PercentRate,
    pub term_months: u32,
    /// One-off fee, rounded to whole currency units.
    pub processing_fee_amount: Money,
    pub monthly_installment: Money,
    pub total_repayment: Money,
    pub total_interest: Money,
}

/// Price a principal against one lender's terms over the standard term.
pub fn quote_loan(
    lender: &LenderOffer,
    principal: Money,
) -> TrustLendResult<ComputationOutput<LoanQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_principal(lender, principal)?;
    if principal < MIN_LOAN_AMOUNT {
        warnings.push(format!(
            "Principal is below the minimum application amount of {MIN_LOAN_AMOUNT}."
        ));
    }

    let monthly = monthly_installment(principal, lender.interest_rate, LOAN_TERM_MONTHS)?;
    let processing_fee_amount = round_currency(principal * lender.processing_fee / dec!(100));
    let total_repayment = total_repayment(monthly, LOAN_TERM_MONTHS)?;

    let quote = LoanQuote {
        lender_id: lender.id,
        bank_name: lender.name.to_string(),
        principal,
        interest_rate: lender.interest_rate,
        term_months: LOAN_TERM_MONTHS,
        processing_fee_amount,
        monthly_installment: monthly,
        total_repayment,
        total_interest: total_repayment - principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "term_months": LOAN_TERM_MONTHS,
        "compounding": "monthly, rate = annual / 1200",
        "rounding": "nearest whole currency unit"
    });

    Ok(with_metadata(
        "Equated monthly installment (reducing balance)",
        &assumptions,
        warnings,
        elapsed,
        quote,
    ))
}

/// Principal must be positive and within the lender's ceiling.
pub fn validate_principal(lender: &LenderOffer, principal: Money) -> TrustLendResult<()> {
    if principal <= Decimal::ZERO {
        return Err(TrustLendError::InvalidInput {
            field: "amount".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if principal > lender.max_loan_amount {
        return Err(TrustLendError::InvalidInput {
            field: "amount".into(),
            reason: format!(
                "Amount exceeds maximum limit of {} for {}",
                lender.max_loan_amount, lender.name
            ),
        });
    }
    Ok(())
}
