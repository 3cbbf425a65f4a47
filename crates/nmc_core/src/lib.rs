//! # NMC Core (Foundation)
//!
//! Foundation types shared by every layer of the nested Monte Carlo XVA
//! engine:
//!
//! - [`types::TimeGrid`] - immutable simulation time grid
//! - [`types::Path`] - a single simulated trajectory
//! - [`types::RiskFactor`] - the simulated risk factors (interest, FX, equity)
//! - [`types::XvaKind`] / [`types::XvaRequest`] - requested valuation adjustments
//! - [`types::ExposureProfile`] / [`types::ResultSet`] - engine output
//! - [`error::EngineError`] - the error taxonomy for the whole engine
//!
//! This crate deliberately carries no simulation logic and no heavy
//! dependencies so that the engine, adapter, and service layers can all
//! depend on it without cycles.

pub mod error;
pub mod types;

pub use error::{DeviceError, EngineError, Result};
pub use types::{
    ExposureProfile, Path, ResultSet, RiskFactor, TimeGrid, XvaKind, XvaRequest,
};
