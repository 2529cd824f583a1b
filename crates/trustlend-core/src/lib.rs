pub mod error;
pub mod types;

#[cfg(feature = "scoring")]
pub mod scoring;

#[cfg(feature = "lending")]
pub mod lending;

#[cfg(feature = "ledger")]
pub mod ledger;

pub use error::TrustLendError;
pub use types::*;

/// Standard result type for all trustlend operations
pub type TrustLendResult<T> = Result<T, TrustLendError>;
