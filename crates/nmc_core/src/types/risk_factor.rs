//! Risk factor enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three simulated risk factors.
///
/// Each risk factor carries a fixed model calibration (held by the
/// engine layer) and generates its outer path ensemble independently of
/// the other two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskFactor {
    /// Mean-reverting short rate.
    Interest,
    /// FX rate, geometric Brownian motion.
    Fx,
    /// Equity price, geometric Brownian motion.
    Equity,
}

impl RiskFactor {
    /// All risk factors, in canonical order.
    pub const ALL: [RiskFactor; 3] = [RiskFactor::Interest, RiskFactor::Fx, RiskFactor::Equity];

    /// Canonical index in `[0, 3)`, matching the order of [`Self::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            RiskFactor::Interest => 0,
            RiskFactor::Fx => 1,
            RiskFactor::Equity => 2,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            RiskFactor::Interest => "interest",
            RiskFactor::Fx => "fx",
            RiskFactor::Equity => "equity",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
