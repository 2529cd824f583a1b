use chrono::Utc;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use trustlend_core::ledger::workflow::record_assessment;
use trustlend_core::lending::recommendation::assess_applicant;
use trustlend_core::scoring::assessment::{
    validate_assessment, AreaType, AssessmentInput, LocationStability,
};

use super::StoreArgs;
use crate::input;

/// Arguments for a credit assessment
#[derive(Args)]
pub struct AssessArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly electricity bill
    #[arg(long)]
    pub electricity_bill: Option<Decimal>,

    /// Monthly gas bill
    #[arg(long)]
    pub gas_bill: Option<Decimal>,

    /// Monthly water bill
    #[arg(long)]
    pub water_bill: Option<Decimal>,

    /// Typical monthly prepaid data recharge
    #[arg(long, alias = "monthly-recharge")]
    pub monthly_data_recharge: Option<Decimal>,

    /// Total prepaid data recharge over the last year
    #[arg(long, alias = "yearly-recharge")]
    pub yearly_data_recharge: Option<Decimal>,

    /// Average days late on bill payments
    #[arg(long, alias = "delay")]
    pub payment_delay: Option<u32>,

    /// Urban or Rural
    #[arg(long, alias = "area")]
    pub area_type: Option<AreaType>,

    /// Stable, Temporary or Frequent
    #[arg(long, alias = "stability")]
    pub location_stability: Option<LocationStability>,

    /// Reject negative amounts instead of scoring them as given
    #[arg(long)]
    pub strict: bool,

    /// Persist the assessment for this user
    #[arg(long)]
    pub user: Option<String>,

    #[command(flatten)]
    pub store: StoreArgs,
}

impl AssessArgs {
    fn any_flag(&self) -> bool {
        self.electricity_bill.is_some()
            || self.gas_bill.is_some()
            || self.water_bill.is_some()
            || self.monthly_data_recharge.is_some()
            || self.yearly_data_recharge.is_some()
            || self.payment_delay.is_some()
            || self.area_type.is_some()
            || self.location_stability.is_some()
    }

    fn from_flags(&self) -> Result<AssessmentInput, Box<dyn std::error::Error>> {
        Ok(AssessmentInput {
            electricity_bill: self
                .electricity_bill
                .ok_or("--electricity-bill is required (or provide --input)")?,
            gas_bill: self
                .gas_bill
                .ok_or("--gas-bill is required (or provide --input)")?,
            water_bill: self
                .water_bill
                .ok_or("--water-bill is required (or provide --input)")?,
            monthly_data_recharge: self
                .monthly_data_recharge
                .ok_or("--monthly-data-recharge is required (or provide --input)")?,
            yearly_data_recharge: self
                .yearly_data_recharge
                .ok_or("--yearly-data-recharge is required (or provide --input)")?,
            payment_delay: self
                .payment_delay
                .ok_or("--payment-delay is required (or provide --input)")?,
            area_type: self
                .area_type
                .ok_or("--area-type is required (or provide --input)")?,
            location_stability: self
                .location_stability
                .ok_or("--location-stability is required (or provide --input)")?,
        })
    }
}

pub fn run_assess(args: AssessArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let assessment: AssessmentInput = if args.input.is_some() || !args.any_flag() {
        input::read_input(args.input.as_deref())?
            .ok_or("--input <file>, stdin, or the individual assessment flags are required")?
    } else {
        args.from_flags()?
    };

    if args.strict {
        validate_assessment(&assessment)?;
    }

    let output = assess_applicant(&assessment)?;
    let mut value = serde_json::to_value(&output)?;

    if let Some(ref user) = args.user {
        let store = args.store.open();
        let record = record_assessment(&store, user, assessment, Utc::now())?;
        if let Value::Object(ref mut map) = value {
            map.insert(
                "record".into(),
                serde_json::json!({
                    "id": record.id,
                    "user_id": record.user_id,
                    "assessed_at": record.assessed_at,
                    "store": store.path().display().to_string(),
                }),
            );
        }
    }

    Ok(value)
}
