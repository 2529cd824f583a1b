//! Record store port.
//!
//! The engine only needs four operations from whatever persists its records:
//! insert an assessment, insert a loan, read a user's latest assessment and
//! list a user's loans newest first. Any failure is reported as an opaque
//! `Storage` error.

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use crate::error::TrustLendError;
use crate::lending::application::LoanRecord;
use crate::TrustLendResult;

use super::records::AssessmentRecord;

pub trait RecordStore {
    fn insert_assessment(&self, record: AssessmentRecord) -> TrustLendResult<()>;

    fn insert_loan(&self, record: LoanRecord) -> TrustLendResult<()>;

    /// The user's assessment with the greatest `assessed_at`, if any.
    fn latest_assessment(&self, user_id: &str) -> TrustLendResult<Option<AssessmentRecord>>;

    /// The user's loans ordered by `created_at`, newest first.
    fn loans_for_user(&self, user_id: &str) -> TrustLendResult<Vec<LoanRecord>>;
}

/// Latest record by timestamp; on ties the one inserted last wins.
pub fn latest_by<T, K: Ord>(records: &[T], key: impl Fn(&T) -> K) -> Option<&T> {
    records.iter().max_by_key(|r| key(*r))
}

/// Sort loans newest first.
pub fn sort_newest_first(loans: &mut [LoanRecord]) {
    loans.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Process-local store keyed by user.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    assessments: RwLock<HashMap<String, Vec<AssessmentRecord>>>,
    loans: RwLock<HashMap<String, Vec<LoanRecord>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<E>(_: E) -> TrustLendError {
    TrustLendError::Storage("in-memory store lock poisoned".into())
}

impl RecordStore for InMemoryStore {
    fn insert_assessment(&self, record: AssessmentRecord) -> TrustLendResult<()> {
        debug!(user_id = %record.user_id, id = %record.id, "insert assessment");
        let mut guard = self.assessments.write().map_err(poisoned)?;
        guard.entry(record.user_id.clone()).or_default().push(record);
        Ok(())
    }

    fn insert_loan(&self, record: LoanRecord) -> TrustLendResult<()> {
        debug!(user_id = %record.user_id, id = %record.id, "insert loan");
        let mut guard = self.loans.write().map_err(poisoned)?;
        guard.entry(record.user_id.clone()).or_default().push(record);
        Ok(())
    }

    fn latest_assessment(&self, user_id: &str) -> TrustLendResult<Option<AssessmentRecord>> {
        let guard = self.assessments.read().map_err(poisoned)?;
        Ok(guard
            .get(user_id)
            .and_then(|records| latest_by(records, |r| r.assessed_at))
            .cloned())
    }

    fn loans_for_user(&self, user_id: &str) -> TrustLendResult<Vec<LoanRecord>> {
        let guard = self.loans.read().map_err(poisoned)?;
        let mut loans = guard.get(user_id).cloned().unwrap_or_default();
        sort_newest_first(&mut loans);
        Ok(loans)
    }
}
