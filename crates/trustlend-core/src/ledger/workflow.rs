//! Assessment and application flows over a [`RecordStore`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::TrustLendError;
use crate::lending::application::{apply_for_loan, LoanRecord, LoanRequest};
use crate::scoring::assessment::{calculate_credit_score, AssessmentInput};
use crate::TrustLendResult;

use super::loan_book::{summarize_loans, LoanBookSummary};
use super::records::AssessmentRecord;
use super::store::RecordStore;

/// Score an assessment and persist it for `user_id`.
pub fn record_assessment<S: RecordStore + ?Sized>(
    store: &S,
    user_id: &str,
    input: AssessmentInput,
    assessed_at: DateTime<Utc>,
) -> TrustLendResult<AssessmentRecord> {
    let score = calculate_credit_score(&input);
    let record = AssessmentRecord::new(user_id, input, score, assessed_at);
    store.insert_assessment(record.clone())?;
    info!(
        user_id,
        credit_score = record.credit_score,
        risk_level = %record.risk_level,
        "assessment recorded"
    );
    Ok(record)
}

/// Apply against the user's most recent assessment and persist the loan.
///
/// # Errors
///
/// - `NotFound` if the user has never been assessed
/// - anything [`apply_for_loan`] rejects
pub fn submit_application<S: RecordStore + ?Sized>(
    store: &S,
    request: &LoanRequest,
    submitted_at: DateTime<Utc>,
) -> TrustLendResult<LoanRecord> {
    let latest = store.latest_assessment(&request.user_id)?.ok_or_else(|| {
        TrustLendError::NotFound(format!("no assessment for user {}", request.user_id))
    })?;

    let record = match apply_for_loan(request, &latest.score(), submitted_at) {
        Ok(record) => record,
        Err(e) => {
            warn!(user_id = %request.user_id, error = %e, "loan application rejected");
            return Err(e);
        }
    };
    store.insert_loan(record.clone())?;
    Ok(record)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub user_id: String,
    pub as_of: NaiveDate,
    pub latest_assessment: Option<AssessmentRecord>,
    pub loan_book: LoanBookSummary,
}

/// Latest stored assessment (never recomputed) plus the loan book.
pub fn load_dashboard<S: RecordStore + ?Sized>(
    store: &S,
    user_id: &str,
    today: NaiveDate,
) -> TrustLendResult<Dashboard> {
    let latest_assessment = store.latest_assessment(user_id)?;
    let loans = store.loans_for_user(user_id)?;
    Ok(Dashboard {
        user_id: user_id.to_string(),
        as_of: today,
        latest_assessment,
        loan_book: summarize_loans(&loans, today),
    })
}
