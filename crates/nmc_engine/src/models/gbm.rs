//! Geometric Brownian motion.
//!
//! Asset dynamics `dS = mu * S * dt + sigma * S * dW`, stepped in log
//! space for numerical stability:
//! ```text
//! S[j] = S[j-1] * exp((mu - 0.5 * sigma^2) * dt + sigma * dW)
//! ```
//! where `dW` is the Brownian increment over `dt` (standard deviation
//! `sqrt(dt)`).

/// GBM parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial value `S0`.
    pub spot: f64,
    /// Drift `mu` (annualised).
    pub drift: f64,
    /// Volatility `sigma` (annualised).
    pub volatility: f64,
}

impl GbmParams {
    /// Creates parameters with validation.
    ///
    /// Returns `None` if `spot` is not positive or `volatility` is
    /// negative.
    pub fn new(spot: f64, drift: f64, volatility: f64) -> Option<Self> {
        if spot <= 0.0 || volatility < 0.0 {
            return None;
        }
        Some(Self {
            spot,
            drift,
            volatility,
        })
    }

    /// One log-space Euler step from `prev` with Brownian increment `dw`.
    #[inline]
    pub fn evolve(&self, prev: f64, dt: f64, dw: f64) -> f64 {
        let drift = (self.drift - 0.5 * self.volatility * self.volatility) * dt;
        let diffusion = self.volatility * dw;
        prev * (drift + diffusion).exp()
    }
}
