use std::time::Instant;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::scoring::assessment::{
    calculate_credit_score, data_recharge_ratio, AssessmentInput, RiskLevel, ScoreResult,
};
use crate::scoring::breakdown::{score_breakdown, ScoreBreakdown};
use crate::types::{with_metadata, ComputationOutput};
use crate::TrustLendResult;

use super::catalog::LenderOffer;
use super::matcher::recommended_lenders;

#[derive(Debug, Clone, Serialize)]
pub struct AssessmentOutput {
    pub credit_score: u32,
    pub confidence_percentage: u32,
    pub risk_level: RiskLevel,
    pub breakdown: ScoreBreakdown,
    pub recommended_lenders: Vec<&'static LenderOffer>,
}

impl AssessmentOutput {
    pub fn score(&self) -> ScoreResult {
        ScoreResult {
            credit_score: self.credit_score,
            confidence_percentage: self.confidence_percentage,
            risk_level: self.risk_level,
        }
    }
}

/// Score an applicant and list the lenders that would accept them.
pub fn assess_applicant(
    input: &AssessmentInput,
) -> TrustLendResult<ComputationOutput<AssessmentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let negative_fields: Vec<&str> = [
        ("electricity_bill", input.electricity_bill),
        ("gas_bill", input.gas_bill),
        ("water_bill", input.water_bill),
        ("monthly_data_recharge", input.monthly_data_recharge),
        ("yearly_data_recharge", input.yearly_data_recharge),
    ]
    .into_iter()
    .filter(|(_, v)| *v < Decimal::ZERO)
    .map(|(name, _)| name)
    .collect();
    if !negative_fields.is_empty() {
        warnings.push(format!(
            "Negative amounts were scored as given: {}.",
            negative_fields.join(", ")
        ));
    }
    if data_recharge_ratio(input).is_none() {
        warnings.push(
            "Monthly data recharge is zero; data usage consistency was not scored.".into(),
        );
    }

    let score = calculate_credit_score(input);
    let lenders = recommended_lenders(score.credit_score, score.risk_level);
    if score.risk_level == RiskLevel::High {
        warnings.push("High Risk applicants cannot submit loan applications.".into());
    }

    let output = AssessmentOutput {
        credit_score: score.credit_score,
        confidence_percentage: score.confidence_percentage,
        risk_level: score.risk_level,
        breakdown: score_breakdown(input),
        recommended_lenders: lenders,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "base_score": 500,
        "score_range": [300, 850],
        "confidence_range": [50, 95],
        "risk_thresholds": { "low": 700, "moderate": 550 }
    });

    Ok(with_metadata(
        "Alternative-data additive trust score",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
