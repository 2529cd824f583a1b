use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::scoring::assessment::{AssessmentInput, RiskLevel, ScoreResult};
use crate::types::UserId;

/// A scored assessment as stored. Never recomputed once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub user_id: UserId,
    #[serde(flatten)]
    pub input: AssessmentInput,
    pub credit_score: u32,
    pub risk_level: RiskLevel,
    pub confidence_percentage: u32,
    pub assessed_at: DateTime<Utc>,
}

impl AssessmentRecord {
    pub fn new(
        user_id: impl Into<UserId>,
        input: AssessmentInput,
        score: ScoreResult,
        assessed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            input,
            credit_score: score.credit_score,
            risk_level: score.risk_level,
            confidence_percentage: score.confidence_percentage,
            assessed_at,
        }
    }

    pub fn score(&self) -> ScoreResult {
        ScoreResult {
            credit_score: self.credit_score,
            confidence_percentage: self.confidence_percentage,
            risk_level: self.risk_level,
        }
    }
}
