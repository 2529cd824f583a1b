//! JSON file implementation of the record store.
//!
//! The whole file is read for every query and rewritten for every insert;
//! writes go to a sibling temp file that is renamed over the original.
//!
//! The store assumes a single writer. Inserts are an unlocked
//! read-modify-write and every writer stages through the same `.json.tmp`
//! sibling, so two `trustlend` processes writing the same file at once can
//! lose one of the inserts.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use trustlend_core::ledger::records::AssessmentRecord;
use trustlend_core::ledger::store::{latest_by, sort_newest_first, RecordStore};
use trustlend_core::lending::application::LoanRecord;
use trustlend_core::{TrustLendError, TrustLendResult};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    assessments: Vec<AssessmentRecord>,
    #[serde(default)]
    loans: Vec<LoanRecord>,
}

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> TrustLendResult<StoreFile> {
        if !self.path.exists() {
            return Ok(StoreFile::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| self.storage_error("read", e))?;
        if contents.trim().is_empty() {
            return Ok(StoreFile::default());
        }
        serde_json::from_str(&contents).map_err(|e| self.storage_error("parse", e))
    }

    fn save(&self, file: &StoreFile) -> TrustLendResult<()> {
        let rendered = serde_json::to_string_pretty(file)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, rendered).map_err(|e| self.storage_error("write", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.storage_error("replace", e))?;
        debug!(
            path = %self.path.display(),
            assessments = file.assessments.len(),
            loans = file.loans.len(),
            "store saved"
        );
        Ok(())
    }

    fn storage_error(&self, action: &str, e: impl std::fmt::Display) -> TrustLendError {
        TrustLendError::Storage(format!(
            "failed to {} '{}': {}",
            action,
            self.path.display(),
            e
        ))
    }
}

impl RecordStore for JsonFileStore {
    fn insert_assessment(&self, record: AssessmentRecord) -> TrustLendResult<()> {
        let mut file = self.load()?;
        file.assessments.push(record);
        self.save(&file)
    }

    fn insert_loan(&self, record: LoanRecord) -> TrustLendResult<()> {
        let mut file = self.load()?;
        file.loans.push(record);
        self.save(&file)
    }

    fn latest_assessment(&self, user_id: &str) -> TrustLendResult<Option<AssessmentRecord>> {
        let file = self.load()?;
        let mine: Vec<AssessmentRecord> = file
            .assessments
            .into_iter()
            .filter(|a| a.user_id == user_id)
            .collect();
        Ok(latest_by(&mine, |a| a.assessed_at).cloned())
    }

    fn loans_for_user(&self, user_id: &str) -> TrustLendResult<Vec<LoanRecord>> {
        let file = self.load()?;
        let mut loans: Vec<LoanRecord> = file
            .loans
            .into_iter()
            .filter(|l| l.user_id == user_id)
            .collect();
        sort_newest_first(&mut loans);
        Ok(loans)
    }
}
