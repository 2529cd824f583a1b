//! Alternative-data trust score.
//!
//! Scores an applicant from six behavioural signals that do not require a
//! bureau file:
//! 1. **Bill consistency** -- monthly electricity + gas + water spend.
//! 2. **Data usage consistency** -- yearly prepaid recharge vs. 12x monthly.
//! 3. **Payment delay** -- average days late on utility payments.
//! 4. **Area type** -- urban or rural residence.
//! 5. **Location stability** -- how often the applicant moves.
//!
//! The score starts at 500 and every rule adds or subtracts a fixed number of
//! points, so evaluation order does not affect the result. The score is then
//! clamped to [300, 850] and the self-reported confidence to [50, 95].
//!
//! Inputs are not validated here: negative amounts flow through the
//! arithmetic unchanged. Callers that want to reject them should run
//! [`validate_assessment`] first.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TrustLendError;
use crate::types::Money;
use crate::TrustLendResult;

pub const BASE_SCORE: i32 = 500;
pub const BASE_CONFIDENCE: i32 = 70;
pub const MIN_SCORE: i32 = 300;
pub const MAX_SCORE: i32 = 850;
pub const MIN_CONFIDENCE: i32 = 50;
pub const MAX_CONFIDENCE: i32 = 95;

/// Score at or above which an applicant is Low Risk.
pub const LOW_RISK_THRESHOLD: u32 = 700;
/// Score at or above which an applicant is Moderate Risk.
pub const MODERATE_RISK_THRESHOLD: u32 = 550;

const CONSISTENT_RATIO_LOWER: Decimal = dec!(0.8);
const CONSISTENT_RATIO_UPPER: Decimal = dec!(1.2);

// ---------------------------------------------------------------------------
// Input / Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaType {
    Urban,
    Rural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationStability {
    Stable,
    Temporary,
    Frequent,
}

/// Risk category, ordered from least to most risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
}

/// One applicant's alternative-data signals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    /// Monthly electricity bill.
    pub electricity_bill: Money,
    /// Monthly gas bill.
    pub gas_bill: Money,
    /// Monthly water bill.
    pub water_bill: Money,
    /// Typical monthly prepaid data recharge.
    pub monthly_data_recharge: Money,
    /// Total prepaid data recharge over the last year.
    pub yearly_data_recharge: Money,
    /// Average number of days bills are paid late.
    pub payment_delay: u32,
    pub area_type: AreaType,
    pub location_stability: LocationStability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Trust score in [300, 850].
    pub credit_score: u32,
    /// Heuristic confidence in [50, 95].
    pub confidence_percentage: u32,
    pub risk_level: RiskLevel,
}

// ---------------------------------------------------------------------------
// Core function
// ---------------------------------------------------------------------------

/// Compute the trust score, confidence and risk level for one applicant.
pub fn calculate_credit_score(input: &AssessmentInput) -> ScoreResult {
    let mut score = BASE_SCORE;
    let mut confidence = BASE_CONFIDENCE;

    // Bill payment consistency (30% weight)
    let total = total_bills(input);
    if total > Decimal::ZERO {
        score += if total < dec!(2000) {
            50
        } else if total < dec!(5000) {
            30
        } else {
            10
        };
        confidence += 15;
    }

    // Data recharge consistency (25% weight)
    if let Some(ratio) = data_recharge_ratio(input) {
        if ratio > CONSISTENT_RATIO_LOWER && ratio < CONSISTENT_RATIO_UPPER {
            score += 40;
            confidence += 10;
        }
    }

    // Payment delay (35% weight)
    let (delay_points, delay_confidence) = match input.payment_delay {
        0 => (80, 20),
        1..=2 => (40, 10),
        3..=5 => (10, 0),
        _ => (-50, -10),
    };
    score += delay_points;
    confidence += delay_confidence;

    // Area type and location stability (10% weight)
    let (area_points, area_confidence) = match input.area_type {
        AreaType::Urban => (20, 5),
        AreaType::Rural => (10, 0),
    };
    score += area_points;
    confidence += area_confidence;

    let (stability_points, stability_confidence) = match input.location_stability {
        LocationStability::Stable => (30, 10),
        LocationStability::Temporary => (10, 0),
        LocationStability::Frequent => (-20, -5),
    };
    score += stability_points;
    confidence += stability_confidence;

    // Every adjustment is a whole number of points, so clamping is the only
    // normalisation needed.
    let credit_score = score.clamp(MIN_SCORE, MAX_SCORE) as u32;
    let confidence_percentage = confidence.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE) as u32;

    ScoreResult {
        credit_score,
        confidence_percentage,
        risk_level: RiskLevel::from_score(credit_score),
    }
}

/// Reject inputs outside the scoring domain (negative amounts).
pub fn validate_assessment(input: &AssessmentInput) -> TrustLendResult<()> {
    let amounts = [
        ("electricity_bill", input.electricity_bill),
        ("gas_bill", input.gas_bill),
        ("water_bill", input.water_bill),
        ("monthly_data_recharge", input.monthly_data_recharge),
        ("yearly_data_recharge", input.yearly_data_recharge),
    ];
    for (field, value) in amounts {
        if value < Decimal::ZERO {
            return Err(TrustLendError::InvalidInput {
                field: field.into(),
                reason: "Amount must be non-negative.".into(),
            });
        }
    }
    Ok(())
}

/// Sum of the three monthly utility bills.
pub fn total_bills(input: &AssessmentInput) -> Money {
    input
        .electricity_bill
        .saturating_add(input.gas_bill)
        .saturating_add(input.water_bill)
}

/// yearly recharge / (monthly recharge * 12).
///
/// `None` when the divisor is zero or the quotient does not fit a Decimal;
/// the data-usage rule is skipped in that case.
pub fn data_recharge_ratio(input: &AssessmentInput) -> Option<Decimal> {
    let expected_yearly = input.monthly_data_recharge.checked_mul(dec!(12))?;
    input.yearly_data_recharge.checked_div(expected_yearly)
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];

    /// Step function of the clamped credit score.
    pub fn from_score(credit_score: u32) -> Self {
        if credit_score >= LOW_RISK_THRESHOLD {
            RiskLevel::Low
        } else if credit_score >= MODERATE_RISK_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Moderate => "Moderate Risk",
            RiskLevel::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for AreaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaType::Urban => write!(f, "Urban"),
            AreaType::Rural => write!(f, "Rural"),
        }
    }
}

impl fmt::Display for LocationStability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationStability::Stable => write!(f, "Stable"),
            LocationStability::Temporary => write!(f, "Temporary"),
            LocationStability::Frequent => write!(f, "Frequent"),
        }
    }
}

/// Lowercase and drop separators so "Moderate Risk", "moderate-risk" and
/// "MODERATE" all compare equal.
fn normalise(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for RiskLevel {
    type Err = TrustLendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalise(s);
        match key.strip_suffix("risk").unwrap_or(key.as_str()) {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            _ => Err(TrustLendError::InvalidInput {
                field: "risk_level".into(),
                reason: format!("'{s}' is not one of Low Risk, Moderate Risk, High Risk"),
            }),
        }
    }
}

impl FromStr for AreaType {
    type Err = TrustLendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "urban" => Ok(AreaType::Urban),
            "rural" => Ok(AreaType::Rural),
            _ => Err(TrustLendError::InvalidInput {
                field: "area_type".into(),
                reason: format!("'{s}' is not one of Urban, Rural"),
            }),
        }
    }
}

impl FromStr for LocationStability {
    type Err = TrustLendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "stable" => Ok(LocationStability::Stable),
            "temporary" => Ok(LocationStability::Temporary),
            "frequent" => Ok(LocationStability::Frequent),
            _ => Err(TrustLendError::InvalidInput {
                field: "location_stability".into(),
                reason: format!("'{s}' is not one of Stable, Temporary, Frequent"),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn zero_input() -> AssessmentInput {
        AssessmentInput {
            electricity_bill: Decimal::ZERO,
            gas_bill: Decimal::ZERO,
            water_bill: Decimal::ZERO,
            monthly_data_recharge: Decimal::ZERO,
            yearly_data_recharge: Decimal::ZERO,
            payment_delay: 0,
            area_type: AreaType::Urban,
            location_stability: LocationStability::Stable,
        }
    }

    #[test]
    fn test_no_bills_no_recharge_on_time_urban_stable() {
        let out = calculate_credit_score(&zero_input());
        // 500 + 80 + 20 + 30
        assert_eq!(out.credit_score, 630);
        // 70 + 20 + 5 + 10 = 105, clamped
        assert_eq!(out.confidence_percentage, 95);
        assert_eq!(out.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_typical_household() {
        let input = AssessmentInput {
            electricity_bill: dec!(1800),
            gas_bill: dec!(900),
            water_bill: dec!(500),
            monthly_data_recharge: dec!(399),
            yearly_data_recharge: dec!(4800),
            payment_delay: 2,
            ..zero_input()
        };
        let out = calculate_credit_score(&input);
        // 500 + 30 (bills 3200) + 40 (ratio ~1.0025) + 40 + 20 + 30
        assert_eq!(out.credit_score, 660);
        assert_eq!(out.confidence_percentage, 95);
        assert_eq!(out.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_long_delay_is_high_risk() {
        let input = AssessmentInput {
            payment_delay: 6,
            ..zero_input()
        };
        let out = calculate_credit_score(&input);
        assert_eq!(out.credit_score, 500);
        assert_eq!(out.confidence_percentage, 75);
        assert_eq!(out.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_best_case_is_low_risk() {
        let input = AssessmentInput {
            electricity_bill: dec!(800),
            gas_bill: dec!(400),
            water_bill: dec!(200),
            monthly_data_recharge: dec!(300),
            yearly_data_recharge: dec!(3600),
            ..zero_input()
        };
        let out = calculate_credit_score(&input);
        // 500 + 50 + 40 + 80 + 20 + 30
        assert_eq!(out.credit_score, 720);
        assert_eq!(out.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_worst_case_stays_above_floor() {
        let input = AssessmentInput {
            payment_delay: 30,
            area_type: AreaType::Rural,
            location_stability: LocationStability::Frequent,
            ..zero_input()
        };
        let out = calculate_credit_score(&input);
        // 500 - 50 + 10 - 20
        assert_eq!(out.credit_score, 440);
        // 70 - 10 + 0 - 5
        assert_eq!(out.confidence_percentage, 55);
        assert_eq!(out.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_bill_bands() {
        let score_for = |total: Decimal| {
            let input = AssessmentInput {
                electricity_bill: total,
                ..zero_input()
            };
            calculate_credit_score(&input).credit_score
        };
        assert_eq!(score_for(dec!(1999.99)), 680);
        assert_eq!(score_for(dec!(2000)), 660);
        assert_eq!(score_for(dec!(4999)), 660);
        assert_eq!(score_for(dec!(5000)), 640);
        assert_eq!(score_for(dec!(1000000)), 640);
    }

    #[test]
    fn test_ratio_bounds_are_exclusive() {
        let with_yearly = |yearly: Decimal| AssessmentInput {
            monthly_data_recharge: dec!(100),
            yearly_data_recharge: yearly,
            ..zero_input()
        };
        // ratio exactly 0.8 and 1.2 do not qualify
        assert_eq!(calculate_credit_score(&with_yearly(dec!(960))).credit_score, 630);
        assert_eq!(calculate_credit_score(&with_yearly(dec!(1440))).credit_score, 630);
        assert_eq!(calculate_credit_score(&with_yearly(dec!(961))).credit_score, 670);
        assert_eq!(calculate_credit_score(&with_yearly(dec!(1439))).credit_score, 670);
    }

    #[test]
    fn test_ratio_is_exact_for_fractional_recharge() {
        // 1.44 / (0.1 * 12) is exactly 1.2 in decimal, so the strict upper
        // bound excludes it even though a double would land just below.
        let input = AssessmentInput {
            monthly_data_recharge: dec!(0.1),
            yearly_data_recharge: dec!(1.44),
            ..zero_input()
        };
        assert_eq!(data_recharge_ratio(&input), Some(dec!(1.2)));
        assert_eq!(calculate_credit_score(&input).credit_score, 630);
    }

    #[test]
    fn test_zero_monthly_recharge_skips_data_rule() {
        let input = AssessmentInput {
            yearly_data_recharge: dec!(4800),
            ..zero_input()
        };
        assert!(data_recharge_ratio(&input).is_none());
        assert_eq!(calculate_credit_score(&input).credit_score, 630);
    }

    #[test]
    fn test_delay_bands() {
        let expected = [(0, 630), (1, 590), (2, 590), (3, 560), (5, 560), (6, 500)];
        for (delay, score) in expected {
            let input = AssessmentInput {
                payment_delay: delay,
                ..zero_input()
            };
            assert_eq!(calculate_credit_score(&input).credit_score, score, "delay {delay}");
        }
    }

    #[test]
    fn test_temporary_and_rural_adjustments() {
        let input = AssessmentInput {
            area_type: AreaType::Rural,
            location_stability: LocationStability::Temporary,
            ..zero_input()
        };
        let out = calculate_credit_score(&input);
        // 500 + 80 + 10 + 10
        assert_eq!(out.credit_score, 600);
        // 70 + 20
        assert_eq!(out.confidence_percentage, 90);
    }

    #[test]
    fn test_negative_bills_pass_through() {
        let input = AssessmentInput {
            electricity_bill: dec!(-100),
            ..zero_input()
        };
        // total <= 0, no bill adjustment
        assert_eq!(calculate_credit_score(&input).credit_score, 630);
        assert!(validate_assessment(&input).is_err());
        assert!(validate_assessment(&zero_input()).is_ok());
    }

    #[test]
    fn test_huge_amounts_do_not_panic() {
        let input = AssessmentInput {
            electricity_bill: Decimal::MAX,
            gas_bill: Decimal::MAX,
            monthly_data_recharge: Decimal::MAX,
            yearly_data_recharge: Decimal::MAX,
            ..zero_input()
        };
        let out = calculate_credit_score(&input);
        assert_eq!(out.credit_score, 640);
    }

    #[test]
    fn test_risk_level_boundaries() {
        assert_eq!(RiskLevel::from_score(300), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(549), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(550), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(699), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(700), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(850), RiskLevel::Low);
    }

    #[test]
    fn test_risk_level_is_monotonic() {
        let mut previous = RiskLevel::High;
        for score in 300..=850 {
            let level = RiskLevel::from_score(score);
            assert!(level <= previous, "score {score} became riskier");
            previous = level;
        }
    }

    #[test]
    fn test_risk_level_serde_labels() {
        let json = serde_json::to_string(&RiskLevel::Moderate).unwrap();
        assert_eq!(json, "\"Moderate Risk\"");
        let parsed: RiskLevel = serde_json::from_str("\"High Risk\"").unwrap();
        assert_eq!(parsed, RiskLevel::High);
    }

    #[test]
    fn test_parse_enums_from_cli_text() {
        assert_eq!("low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert_eq!("Moderate Risk".parse::<RiskLevel>().unwrap(), RiskLevel::Moderate);
        assert_eq!("high-risk".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("medium".parse::<RiskLevel>().is_err());
        assert_eq!("RURAL".parse::<AreaType>().unwrap(), AreaType::Rural);
        assert_eq!(
            "temporary".parse::<LocationStability>().unwrap(),
            LocationStability::Temporary
        );
    }
}
