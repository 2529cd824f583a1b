//! Loan applications and the records they produce.
//!
//! An accepted application becomes a [`LoanRecord`] whose issue date is the
//! submission date and whose due date is six calendar months later. Neither
//! date is recomputed afterwards.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::TrustLendError;
use crate::scoring::assessment::{RiskLevel, ScoreResult};
use crate::types::{Money, UserId};
use crate::TrustLendResult;

use super::catalog::{find_lender, LenderOffer};
use super::installment::{validate_principal, LOAN_TERM_MONTHS, MIN_LOAN_AMOUNT};
use super::matcher::recommended_lenders;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanPurpose {
    #[serde(rename = "Business Expansion")]
    BusinessExpansion,
    #[serde(rename = "Equipment Purchase")]
    EquipmentPurchase,
    #[serde(rename = "Working Capital")]
    WorkingCapital,
    Agriculture,
    Education,
    #[serde(rename = "Medical Emergency")]
    MedicalEmergency,
    #[serde(rename = "Home Improvement")]
    HomeImprovement,
    Other,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 8] = [
        LoanPurpose::BusinessExpansion,
        LoanPurpose::EquipmentPurchase,
        LoanPurpose::WorkingCapital,
        LoanPurpose::Agriculture,
        LoanPurpose::Education,
        LoanPurpose::MedicalEmergency,
        LoanPurpose::HomeImprovement,
        LoanPurpose::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoanPurpose::BusinessExpansion => "Business Expansion",
            LoanPurpose::EquipmentPurchase => "Equipment Purchase",
            LoanPurpose::WorkingCapital => "Working Capital",
            LoanPurpose::Agriculture => "Agriculture",
            LoanPurpose::Education => "Education",
            LoanPurpose::MedicalEmergency => "Medical Emergency",
            LoanPurpose::HomeImprovement => "Home Improvement",
            LoanPurpose::Other => "Other",
        }
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LoanPurpose {
    type Err = TrustLendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        LoanPurpose::ALL
            .into_iter()
            .find(|p| {
                p.label()
                    .chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .flat_map(char::to_lowercase)
                    .eq(key.chars())
            })
            .ok_or_else(|| TrustLendError::InvalidInput {
                field: "purpose".into(),
                reason: format!("'{s}' is not a recognised loan purpose"),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Completed,
    Overdue,
    Default,
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanStatus::Active => "Active",
            LoanStatus::Completed => "Completed",
            LoanStatus::Overdue => "Overdue",
            LoanStatus::Default => "Default",
        };
        write!(f, "{}", s)
    }
}

/// What the applicant asks for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanRequest {
    pub user_id: UserId,
    pub lender_id: u32,
    pub amount: Money,
    pub purpose: LoanPurpose,
}

/// A persisted loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: Uuid,
    pub user_id: UserId,
    pub lender_id: u32,
    pub bank_name: String,
    pub amount: Money,
    pub purpose: LoanPurpose,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: LoanStatus,
    pub created_at: DateTime<Utc>,
}

/// Validate a request against the applicant's latest score and open the loan.
///
/// # Errors
///
/// - `Ineligible` for High Risk applicants or lenders that do not accept the
///   applicant's score
/// - `NotFound` for an unknown lender id
/// - `InvalidInput` for amounts below the minimum or above the lender ceiling
pub fn apply_for_loan(
    request: &LoanRequest,
    score: &ScoreResult,
    submitted_at: DateTime<Utc>,
) -> TrustLendResult<LoanRecord> {
    if score.risk_level == RiskLevel::High {
        return Err(TrustLendError::Ineligible(
            "High Risk applicants cannot apply; reassess after improving payment history".into(),
        ));
    }

    let lender = find_lender(request.lender_id)
        .ok_or_else(|| TrustLendError::NotFound(format!("lender {}", request.lender_id)))?;

    ensure_lender_accepts(lender, score)?;
    validate_principal(lender, request.amount)?;
    if request.amount < MIN_LOAN_AMOUNT {
        return Err(TrustLendError::InvalidInput {
            field: "amount".into(),
            reason: format!("Minimum loan amount is {MIN_LOAN_AMOUNT}"),
        });
    }

    let issue_date = submitted_at.date_naive();
    let due_date = due_date_for(issue_date)?;

    info!(
        user_id = %request.user_id,
        lender = lender.name,
        amount = %request.amount,
        %due_date,
        "loan application accepted"
    );

    Ok(LoanRecord {
        id: Uuid::new_v4(),
        user_id: request.user_id.clone(),
        lender_id: lender.id,
        bank_name: lender.name.to_string(),
        amount: request.amount,
        purpose: request.purpose,
        issue_date,
        due_date,
        status: LoanStatus::Active,
        created_at: submitted_at,
    })
}

/// Issue date plus the standard term.
///
/// The day of month is carried over as an offset from the first, so a day
/// past the end of a shorter target month rolls into the following month
/// (Aug 31 + 6 months = Mar 3, or Mar 2 in a leap year).
pub fn due_date_for(issue_date: NaiveDate) -> TrustLendResult<NaiveDate> {
    issue_date
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(LOAN_TERM_MONTHS)))
        .and_then(|d| d.checked_add_days(Days::new(u64::from(issue_date.day() - 1))))
        .ok_or_else(|| TrustLendError::DateError(format!("due date overflows from {issue_date}")))
}

fn ensure_lender_accepts(lender: &LenderOffer, score: &ScoreResult) -> TrustLendResult<()> {
    let eligible = recommended_lenders(score.credit_score, score.risk_level);
    if eligible.iter().any(|l| l.id == lender.id) {
        return Ok(());
    }
    debug!(
        lender = lender.name,
        credit_score = score.credit_score,
        risk_level = %score.risk_level,
        "lender rejects applicant"
    );
    Err(TrustLendError::Ineligible(format!(
        "{} requires a score of at least {} and one of {:?}",
        lender.name, lender.min_credit_score, lender.eligible_risk_levels
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn moderate_score() -> ScoreResult {
        ScoreResult {
            credit_score: 660,
            confidence_percentage: 95,
            risk_level: RiskLevel::Moderate,
        }
    }

    fn request(lender_id: u32, amount: Money) -> LoanRequest {
        LoanRequest {
            user_id: "user-1".into(),
            lender_id,
            amount,
            purpose: LoanPurpose::WorkingCapital,
        }
    }

    fn submitted() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_accepted_application_dates() {
        let rec = apply_for_loan(&request(2, dec!(40000)), &moderate_score(), submitted()).unwrap();
        assert_eq!(rec.issue_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(rec.due_date, NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());
        assert_eq!(rec.status, LoanStatus::Active);
        assert_eq!(rec.bank_name, "HDFC Bank Micro Credit");
        assert_eq!(rec.created_at, submitted());
    }

    #[test]
    fn test_due_date_rolls_past_short_month() {
        let issue = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
        assert_eq!(due_date_for(issue).unwrap(), NaiveDate::from_ymd_opt(2026, 3, 3).unwrap());
        let leap = NaiveDate::from_ymd_opt(2023, 8, 31).unwrap();
        assert_eq!(due_date_for(leap).unwrap(), NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());
        let december = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        assert_eq!(due_date_for(december).unwrap(), NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
    }

    #[test]
    fn test_due_date_keeps_day_when_it_fits() {
        let issue = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(due_date_for(issue).unwrap(), NaiveDate::from_ymd_opt(2025, 7, 31).unwrap());
        let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(due_date_for(first).unwrap(), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    }

    #[test]
    fn test_high_risk_rejected() {
        let score = ScoreResult {
            credit_score: 500,
            confidence_percentage: 75,
            risk_level: RiskLevel::High,
        };
        let err = apply_for_loan(&request(1, dec!(5000)), &score, submitted()).unwrap_err();
        assert!(matches!(err, TrustLendError::Ineligible(_)));
    }

    #[test]
    fn test_low_only_lender_rejects_moderate() {
        let err = apply_for_loan(&request(3, dec!(5000)), &moderate_score(), submitted()).unwrap_err();
        assert!(matches!(err, TrustLendError::Ineligible(_)));
    }

    #[test]
    fn test_unknown_lender() {
        let err = apply_for_loan(&request(9, dec!(5000)), &moderate_score(), submitted()).unwrap_err();
        assert!(matches!(err, TrustLendError::NotFound(_)));
    }

    #[test]
    fn test_amount_limits() {
        let score = moderate_score();
        assert!(apply_for_loan(&request(1, dec!(50001)), &score, submitted()).is_err());
        assert!(apply_for_loan(&request(1, dec!(999)), &score, submitted()).is_err());
        assert!(apply_for_loan(&request(1, dec!(1000)), &score, submitted()).is_ok());
        assert!(apply_for_loan(&request(1, dec!(50000)), &score, submitted()).is_ok());
    }

    #[test]
    fn test_purpose_parsing_and_labels() {
        assert_eq!(
            "business-expansion".parse::<LoanPurpose>().unwrap(),
            LoanPurpose::BusinessExpansion
        );
        assert_eq!("Medical Emergency".parse::<LoanPurpose>().unwrap(), LoanPurpose::MedicalEmergency);
        assert!("holiday".parse::<LoanPurpose>().is_err());
        let json = serde_json::to_string(&LoanPurpose::HomeImprovement).unwrap();
        assert_eq!(json, "\"Home Improvement\"");
    }
}
