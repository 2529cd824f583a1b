//! Loan book summary for the dashboard and loan report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lending::application::{LoanRecord, LoanStatus};
use crate::types::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanLine {
    pub id: Uuid,
    pub bank_name: String,
    pub amount: Money,
    pub status: LoanStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Days until the due date; negative once past due.
    pub days_remaining: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanBookSummary {
    pub total_loans: usize,
    pub active_loans: usize,
    pub completed_loans: usize,
    pub overdue_loans: usize,
    /// Sum of principal across every loan regardless of status.
    pub total_borrowed: Money,
    pub loans: Vec<LoanLine>,
}

/// Summarise a user's loans as of `today`, newest first.
pub fn summarize_loans(loans: &[LoanRecord], today: NaiveDate) -> LoanBookSummary {
    let mut ordered: Vec<&LoanRecord> = loans.iter().collect();
    ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let count = |status: LoanStatus| loans.iter().filter(|l| l.status == status).count();

    LoanBookSummary {
        total_loans: loans.len(),
        active_loans: count(LoanStatus::Active),
        completed_loans: count(LoanStatus::Completed),
        overdue_loans: count(LoanStatus::Overdue),
        total_borrowed: loans.iter().map(|l| l.amount).sum::<Decimal>(),
        loans: ordered
            .into_iter()
            .map(|l| LoanLine {
                id: l.id,
                bank_name: l.bank_name.clone(),
                amount: l.amount,
                status: l.status,
                issue_date: l.issue_date,
                due_date: l.due_date,
                days_remaining: (l.due_date - today).num_days(),
            })
            .collect(),
    }
}
