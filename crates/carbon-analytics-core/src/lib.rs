pub mod error;
pub mod types;

#[cfg(feature = "simulator")]
pub mod simulator;

#[cfg(feature = "sbti")]
pub mod sbti;

#[cfg(feature = "benchmarking")]
pub mod benchmarking;

#[cfg(feature = "investment")]
pub mod investment;

pub use error::CarbonAnalyticsError;
pub use types::*;

/// Standard result type for all carbon-analytics operations
pub type CarbonAnalyticsResult<T> = Result<T, CarbonAnalyticsError>;
