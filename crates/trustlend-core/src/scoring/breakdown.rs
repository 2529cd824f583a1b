//! Per-factor sub-scores behind a trust score.
//!
//! Each factor is expressed on a 0-100 scale alongside the display weight it
//! carries in the scoring narrative (bills 30, data usage 25, payment 35,
//! stability 10). These are explanatory only; the trust score itself comes
//! from [`calculate_credit_score`](super::assessment::calculate_credit_score).
//!
//! Weak factors also produce improvement suggestions. A factor is weak when
//! its sub-score falls below the factor's threshold: payment history 80,
//! bill consistency 70, data usage 80, location stability 70.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::assessment::{
    data_recharge_ratio, total_bills, AreaType, AssessmentInput, LocationStability,
};

const HUNDRED: Decimal = dec!(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    BillConsistency,
    DataUsage,
    PaymentHistory,
    LocationStability,
}

impl Factor {
    /// Display weight in percent.
    pub fn weight(&self) -> u32 {
        match self {
            Factor::BillConsistency => 30,
            Factor::DataUsage => 25,
            Factor::PaymentHistory => 35,
            Factor::LocationStability => 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorScore {
    pub factor: Factor,
    /// Sub-score, nominally 0-100.
    pub score: Decimal,
    pub weight: u32,
}

/// Advice for raising one weak factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub factor: Factor,
    pub title: String,
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorScore>,
    /// Residence-type sub-score. Shown separately; it carries no weight.
    pub area_score: Decimal,
    /// Ordered payment, bills, data usage, stability.
    pub suggestions: Vec<Suggestion>,
}

// ---------------------------------------------------------------------------
// Suggestion thresholds
// ---------------------------------------------------------------------------

const PAYMENT_THRESHOLD: Decimal = dec!(80);
const BILLS_THRESHOLD: Decimal = dec!(70);
const DATA_USAGE_THRESHOLD: Decimal = dec!(80);
const STABILITY_THRESHOLD: Decimal = dec!(70);

/// Estimated points regained by clearing payment delays, capped at 50.
fn payment_recovery_points(payment_delay: u32) -> u32 {
    payment_delay.saturating_mul(10).min(50)
}

/// Build the explanatory breakdown for an assessment.
pub fn score_breakdown(input: &AssessmentInput) -> ScoreBreakdown {
    // Every 100 currency units of monthly bills costs one point.
    let bill_consistency = (HUNDRED - total_bills(input) / HUNDRED)
        .max(Decimal::ZERO)
        .min(HUNDRED);

    // Undefined ratio (no monthly recharge) reads as no evidence.
    let data_usage = data_recharge_ratio(input)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .map(|pct| pct.min(HUNDRED))
        .unwrap_or(Decimal::ZERO);

    let payment_history =
        (HUNDRED - Decimal::from(input.payment_delay) * dec!(10)).max(Decimal::ZERO);

    let location_stability = match input.location_stability {
        LocationStability::Stable => dec!(90),
        LocationStability::Temporary => dec!(60),
        LocationStability::Frequent => dec!(30),
    };

    let area_score = match input.area_type {
        AreaType::Urban => dec!(70),
        AreaType::Rural => dec!(60),
    };

    let mut suggestions = Vec::new();
    if payment_history < PAYMENT_THRESHOLD {
        suggestions.push(Suggestion {
            factor: Factor::PaymentHistory,
            title: "Reduce Payment Delays".into(),
            detail: format!(
                "Your payment delays are affecting your score. Pay bills within the due date \
                 to improve by ~{} points.",
                payment_recovery_points(input.payment_delay)
            ),
        });
    }
    if bill_consistency < BILLS_THRESHOLD {
        suggestions.push(Suggestion {
            factor: Factor::BillConsistency,
            title: "Optimize Utility Expenses".into(),
            detail: "Reduce utility bills through energy-saving measures. This could improve \
                     your score by ~20-30 points."
                .into(),
        });
    }
    if data_usage < DATA_USAGE_THRESHOLD {
        suggestions.push(Suggestion {
            factor: Factor::DataUsage,
            title: "Maintain Consistent Data Usage".into(),
            detail: "Keep your monthly data recharge consistent throughout the year for better \
                     predictability."
                .into(),
        });
    }
    if location_stability < STABILITY_THRESHOLD {
        suggestions.push(Suggestion {
            factor: Factor::LocationStability,
            title: "Improve Location Stability".into(),
            detail: "Staying in one location for longer periods can improve your stability \
                     score by ~20-40 points."
                .into(),
        });
    }

    let factors = [
        (Factor::BillConsistency, bill_consistency),
        (Factor::DataUsage, data_usage),
        (Factor::PaymentHistory, payment_history),
        (Factor::LocationStability, location_stability),
    ]
    .into_iter()
    .map(|(factor, score)| FactorScore {
        factor,
        score,
        weight: factor.weight(),
    })
    .collect();

    ScoreBreakdown {
        factors,
        area_score,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AssessmentInput {
        AssessmentInput {
            electricity_bill: dec!(1800),
            gas_bill: dec!(900),
            water_bill: dec!(500),
            monthly_data_recharge: dec!(400),
            yearly_data_recharge: dec!(4320),
            payment_delay: 2,
            area_type: AreaType::Rural,
            location_stability: LocationStability::Temporary,
        }
    }

    fn score_of(b: &ScoreBreakdown, factor: Factor) -> Decimal {
        b.factors.iter().find(|f| f.factor == factor).unwrap().score
    }

    #[test]
    fn test_weights_sum_to_hundred() {
        let b = score_breakdown(&sample());
        let total: u32 = b.factors.iter().map(|f| f.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_factor_values() {
        let b = score_breakdown(&sample());
        // 100 - 3200 / 100
        assert_eq!(score_of(&b, Factor::BillConsistency), dec!(68));
        // 4320 / 4800 = 0.9
        assert_eq!(score_of(&b, Factor::DataUsage), dec!(90));
        assert_eq!(score_of(&b, Factor::PaymentHistory), dec!(80));
        assert_eq!(score_of(&b, Factor::LocationStability), dec!(60));
        assert_eq!(b.area_score, dec!(60));
    }

    #[test]
    fn test_factor_floors_and_caps() {
        let input = AssessmentInput {
            electricity_bill: dec!(20000),
            yearly_data_recharge: dec!(9600),
            payment_delay: 15,
            ..sample()
        };
        let b = score_breakdown(&input);
        assert_eq!(score_of(&b, Factor::BillConsistency), Decimal::ZERO);
        assert_eq!(score_of(&b, Factor::DataUsage), dec!(100));
        assert_eq!(score_of(&b, Factor::PaymentHistory), Decimal::ZERO);
    }

    fn suggested(b: &ScoreBreakdown) -> Vec<Factor> {
        b.suggestions.iter().map(|s| s.factor).collect()
    }

    fn strong() -> AssessmentInput {
        // bills 100 - 2000/100 = 80, data 100, payment 100, stability 90
        AssessmentInput {
            electricity_bill: dec!(1500),
            gas_bill: dec!(300),
            water_bill: dec!(200),
            monthly_data_recharge: dec!(300),
            yearly_data_recharge: dec!(3600),
            payment_delay: 0,
            area_type: AreaType::Urban,
            location_stability: LocationStability::Stable,
        }
    }

    #[test]
    fn test_strong_profile_has_no_suggestions() {
        assert!(score_breakdown(&strong()).suggestions.is_empty());
    }

    #[test]
    fn test_sample_suggestions_in_order() {
        // bills 68 < 70, data 90, payment 80, stability 60 < 70
        let b = score_breakdown(&sample());
        assert_eq!(
            suggested(&b),
            vec![Factor::BillConsistency, Factor::LocationStability]
        );
    }

    #[test]
    fn test_payment_suggestion_boundary() {
        // delay 2 -> 80, not below threshold
        let at = score_breakdown(&AssessmentInput { payment_delay: 2, ..strong() });
        assert!(suggested(&at).is_empty());

        let below = score_breakdown(&AssessmentInput { payment_delay: 3, ..strong() });
        assert_eq!(suggested(&below), vec![Factor::PaymentHistory]);
        assert!(below.suggestions[0].detail.contains("~30 points"));
    }

    #[test]
    fn test_payment_recovery_capped_at_fifty() {
        assert_eq!(payment_recovery_points(3), 30);
        assert_eq!(payment_recovery_points(5), 50);
        assert_eq!(payment_recovery_points(12), 50);
        assert_eq!(payment_recovery_points(u32::MAX), 50);
        let b = score_breakdown(&AssessmentInput { payment_delay: 9, ..strong() });
        assert!(b.suggestions[0].detail.contains("~50 points"));
    }

    #[test]
    fn test_bills_suggestion_boundary() {
        // 3000 total -> exactly 70
        let at = score_breakdown(&AssessmentInput { electricity_bill: dec!(2500), ..strong() });
        assert!(suggested(&at).is_empty());

        let below = score_breakdown(&AssessmentInput { electricity_bill: dec!(2501), ..strong() });
        assert_eq!(suggested(&below), vec![Factor::BillConsistency]);
    }

    #[test]
    fn test_data_usage_suggestion_boundary() {
        // 2880 / 3600 = 0.8 -> exactly 80
        let at = score_breakdown(&AssessmentInput { yearly_data_recharge: dec!(2880), ..strong() });
        assert!(suggested(&at).is_empty());

        let below =
            score_breakdown(&AssessmentInput { yearly_data_recharge: dec!(2879), ..strong() });
        assert_eq!(suggested(&below), vec![Factor::DataUsage]);
    }

    #[test]
    fn test_stability_suggestion_boundary() {
        let temporary = score_breakdown(&AssessmentInput {
            location_stability: LocationStability::Temporary,
            ..strong()
        });
        assert_eq!(suggested(&temporary), vec![Factor::LocationStability]);

        let frequent = score_breakdown(&AssessmentInput {
            location_stability: LocationStability::Frequent,
            ..strong()
        });
        assert_eq!(suggested(&frequent), vec![Factor::LocationStability]);
    }

    #[test]
    fn test_missing_monthly_recharge_scores_zero() {
        let input = AssessmentInput {
            monthly_data_recharge: Decimal::ZERO,
            ..sample()
        };
        let b = score_breakdown(&input);
        assert_eq!(score_of(&b, Factor::DataUsage), Decimal::ZERO);
    }
}
