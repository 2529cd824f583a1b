use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use trustlend_core::lending::catalog::{find_lender, lender_catalog};
use trustlend_core::lending::installment::{monthly_installment, quote_loan, LOAN_TERM_MONTHS};
use trustlend_core::lending::matcher::recommended_lenders;
use trustlend_core::lending::recommendation::assess_applicant;
use trustlend_core::scoring::assessment::{AreaType, AssessmentInput, LocationStability, RiskLevel};

fn ids(score: u32, level: RiskLevel) -> Vec<u32> {
    recommended_lenders(score, level).iter().map(|l| l.id).collect()
}

#[test]
fn test_match_moderate_650() {
    assert_eq!(ids(650, RiskLevel::Moderate), vec![1, 2, 4]);
}

#[test]
fn test_match_low_300() {
    assert_eq!(ids(300, RiskLevel::Low), vec![1]);
}

#[test]
fn test_matching_never_alters_catalog() {
    let before: Vec<_> = lender_catalog().to_vec();
    for level in RiskLevel::ALL {
        let _ = recommended_lenders(720, level);
    }
    assert_eq!(lender_catalog().to_vec(), before);
}

#[test]
fn test_every_score_with_any_risk_finds_sbi() {
    for score in 300..=850 {
        let level = RiskLevel::from_score(score);
        let matched = recommended_lenders(score, level);
        assert_eq!(matched.first().map(|l| l.id), Some(1));
    }
}

#[test]
fn test_assessment_to_quote() {
    let input = AssessmentInput {
        electricity_bill: dec!(600),
        gas_bill: dec!(350),
        water_bill: dec!(150),
        monthly_data_recharge: dec!(249),
        yearly_data_recharge: dec!(2988),
        payment_delay: 0,
        area_type: AreaType::Rural,
        location_stability: LocationStability::Stable,
    };
    let assessment = assess_applicant(&input).unwrap();
    // 500 + 50 + 40 + 80 + 10 + 30
    assert_eq!(assessment.result.credit_score, 710);
    assert_eq!(assessment.result.risk_level, RiskLevel::Low);
    assert_eq!(assessment.result.recommended_lenders.len(), 4);

    let icici = find_lender(3).unwrap();
    let quote = quote_loan(icici, dec!(200000)).unwrap().result;
    assert_eq!(quote.monthly_installment, dec!(34263));
    assert_eq!(quote.processing_fee_amount, dec!(3000));
    assert_eq!(
        quote.monthly_installment,
        monthly_installment(dec!(200000), dec!(9.5), LOAN_TERM_MONTHS).unwrap()
    );
}
