//! Compiled-in lender offers.
//!
//! Declaration order is significant: matching preserves it.

use rust_decimal_macros::dec;
use serde::Serialize;

use crate::scoring::assessment::RiskLevel;
use crate::types::{Money, PercentRate};

const DEFAULT_LOGO_URL: &str =
    "https://images.pexels.com/photos/259200/pexels-photo-259200.jpeg?auto=compress&cs=tinysrgb&w=100&h=100";

/// A microfinance lender's published terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LenderOffer {
    pub id: u32,
    pub name: &'static str,
    pub logo_url: &'static str,
    pub min_credit_score: u32,
    pub max_loan_amount: Money,
    /// Percent per annum.
    pub interest_rate: PercentRate,
    /// Percent of principal charged once at disbursal.
    pub processing_fee: PercentRate,
    #[serde(rename = "risk_levels")]
    pub eligible_risk_levels: &'static [RiskLevel],
}

impl LenderOffer {
    pub fn accepts(&self, credit_score: u32, risk_level: RiskLevel) -> bool {
        credit_score >= self.min_credit_score && self.eligible_risk_levels.contains(&risk_level)
    }
}

static LENDER_CATALOG: [LenderOffer; 4] = [
    LenderOffer {
        id: 1,
        name: "SBI Micro Finance",
        logo_url: DEFAULT_LOGO_URL,
        min_credit_score: 300,
        max_loan_amount: dec!(50000),
        interest_rate: dec!(12.5),
        processing_fee: dec!(2.5),
        eligible_risk_levels: &[RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High],
    },
    LenderOffer {
        id: 2,
        name: "HDFC Bank Micro Credit",
        logo_url: DEFAULT_LOGO_URL,
        min_credit_score: 500,
        max_loan_amount: dec!(100000),
        interest_rate: dec!(10.8),
        processing_fee: dec!(2.0),
        eligible_risk_levels: &[RiskLevel::Low, RiskLevel::Moderate],
    },
    LenderOffer {
        id: 3,
        name: "ICICI Pradhan Mantri Mudra",
        logo_url: DEFAULT_LOGO_URL,
        min_credit_score: 600,
        max_loan_amount: dec!(200000),
        interest_rate: dec!(9.5),
        processing_fee: dec!(1.5),
        eligible_risk_levels: &[RiskLevel::Low],
    },
    LenderOffer {
        id: 4,
        name: "Axis Bank Rural Credit",
        logo_url: DEFAULT_LOGO_URL,
        min_credit_score: 450,
        max_loan_amount: dec!(75000),
        interest_rate: dec!(11.5),
        processing_fee: dec!(2.2),
        eligible_risk_levels: &[RiskLevel::Low, RiskLevel::Moderate],
    },
];

/// The full lender catalog in declaration order.
pub fn lender_catalog() -> &'static [LenderOffer] {
    &LENDER_CATALOG
}

pub fn find_lender(id: u32) -> Option<&'static LenderOffer> {
    LENDER_CATALOG.iter().find(|lender| lender.id == id)
}
