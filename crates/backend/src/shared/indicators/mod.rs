pub mod compute;
pub mod currency;
pub mod metadata;
pub mod period;
pub mod trend;
