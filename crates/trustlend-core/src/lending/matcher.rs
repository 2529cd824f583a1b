use crate::scoring::assessment::RiskLevel;

use super::catalog::{lender_catalog, LenderOffer};

/// Lenders whose minimum score and risk appetite admit the applicant.
///
/// Stable filter over the catalog; no sorting.
pub fn recommended_lenders(credit_score: u32, risk_level: RiskLevel) -> Vec<&'static LenderOffer> {
    filter_lenders(lender_catalog(), credit_score, risk_level)
}

/// Same as [`recommended_lenders`] over an arbitrary catalog.
pub fn filter_lenders<'a>(
    catalog: &'a [LenderOffer],
    credit_score: u32,
    risk_level: RiskLevel,
) -> Vec<&'a LenderOffer> {
    catalog
        .iter()
        .filter(|lender| lender.accepts(credit_score, risk_level))
        .collect()
}
