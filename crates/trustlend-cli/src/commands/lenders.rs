use clap::Args;
use serde_json::Value;

use trustlend_core::lending::catalog::lender_catalog;
use trustlend_core::lending::matcher::recommended_lenders;
use trustlend_core::scoring::assessment::RiskLevel;

/// Arguments for lender matching
#[derive(Args)]
pub struct LendersArgs {
    /// Applicant's credit score; omit to list the whole catalog
    #[arg(long)]
    pub credit_score: Option<u32>,

    /// Risk level (defaults to the level implied by --credit-score)
    #[arg(long)]
    pub risk_level: Option<RiskLevel>,

    /// List every catalog entry regardless of score
    #[arg(long, conflicts_with_all = ["credit_score", "risk_level"])]
    pub all: bool,
}

pub fn run_lenders(args: LendersArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.all {
        return Ok(serde_json::to_value(lender_catalog())?);
    }
    let Some(credit_score) = args.credit_score else {
        if args.risk_level.is_some() {
            return Err("--risk-level requires --credit-score".into());
        }
        return Ok(serde_json::to_value(lender_catalog())?);
    };

    let risk_level = args
        .risk_level
        .unwrap_or_else(|| RiskLevel::from_score(credit_score));
    tracing::debug!(credit_score, %risk_level, "matching lenders");
    Ok(serde_json::to_value(recommended_lenders(credit_score, risk_level))?)
}
