use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use trustlend_core::lending::{catalog, installment, matcher, recommendation};
use trustlend_core::scoring::assessment::{self, AssessmentInput, RiskLevel};
use trustlend_core::TrustLendError;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Bare score triple, shaped like the front end's `calculateCreditScore`.
#[napi]
pub fn calculate_credit_score(input_json: String) -> NapiResult<String> {
    let input: AssessmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = assessment::calculate_credit_score(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Score, breakdown and recommended lenders wrapped in the output envelope.
#[napi]
pub fn assess_applicant(input_json: String) -> NapiResult<String> {
    let input: AssessmentInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = recommendation::assess_applicant(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Lenders
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct MatchRequest {
    credit_score: u32,
    risk_level: RiskLevel,
}

#[napi]
pub fn recommended_lenders(input_json: String) -> NapiResult<String> {
    let req: MatchRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = matcher::recommended_lenders(req.credit_score, req.risk_level);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn lender_catalog() -> NapiResult<String> {
    serde_json::to_string(catalog::lender_catalog()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct EmiRequest {
    principal: Decimal,
    annual_rate_percent: Decimal,
    #[serde(default = "default_term")]
    term_months: u32,
}

fn default_term() -> u32 {
    installment::LOAN_TERM_MONTHS
}

#[napi]
pub fn monthly_installment(input_json: String) -> NapiResult<String> {
    let req: EmiRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let emi = installment::monthly_installment(req.principal, req.annual_rate_percent, req.term_months)
        .map_err(to_napi_error)?;
    serde_json::to_string(&emi).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct QuoteRequest {
    lender_id: u32,
    amount: Decimal,
}

#[napi]
pub fn loan_quote(input_json: String) -> NapiResult<String> {
    let req: QuoteRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let lender = catalog::find_lender(req.lender_id)
        .ok_or_else(|| to_napi_error(TrustLendError::NotFound(format!("lender {}", req.lender_id))))?;
    let output = installment::quote_loan(lender, req.amount).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
