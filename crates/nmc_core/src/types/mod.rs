//! Data model for the nested Monte Carlo engine.

mod exposure;
mod path;
mod risk_factor;
mod time;
mod xva;

pub use exposure::{ExposureProfile, ResultSet};
pub use path::Path;
pub use risk_factor::RiskFactor;
pub use time::TimeGrid;
pub use xva::{XvaKind, XvaRequest};
