pub mod assessment;
pub mod breakdown;
