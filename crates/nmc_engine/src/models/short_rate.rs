//! Mean-reverting short rate with square-root diffusion and zero floor.
//!
//! Euler discretisation of
//! ```text
//! r[j] = r[j-1] + k * (theta - r[j-1]) * dt + sigma * dW * sqrt(max(r[j-1], 0))
//! ```
//! floored at zero, where `dW` is the Brownian increment over `dt`
//! (standard deviation `sqrt(dt)`). The square-root diffusion damps
//! volatility near zero and the explicit floor keeps the discretised
//! rate non-negative for every draw.

/// Short rate model parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShortRateParams {
    /// Initial short rate `r0`.
    pub initial_rate: f64,
    /// Mean reversion speed `k`.
    pub mean_reversion: f64,
    /// Long-term mean level `theta`.
    pub long_term_mean: f64,
    /// Volatility `sigma`.
    pub volatility: f64,
}

impl ShortRateParams {
    /// Creates parameters with validation.
    ///
    /// Returns `None` if any of `initial_rate`, `mean_reversion`,
    /// `long_term_mean` or `volatility` is negative.
    pub fn new(
        initial_rate: f64,
        mean_reversion: f64,
        long_term_mean: f64,
        volatility: f64,
    ) -> Option<Self> {
        if initial_rate < 0.0 || mean_reversion < 0.0 || long_term_mean < 0.0 || volatility < 0.0
        {
            return None;
        }
        Some(Self {
            initial_rate,
            mean_reversion,
            long_term_mean,
            volatility,
        })
    }

    /// One Euler step from `prev` with Brownian increment `dw`, floored
    /// at zero.
    #[inline]
    pub fn evolve(&self, prev: f64, dt: f64, dw: f64) -> f64 {
        let drift = self.mean_reversion * (self.long_term_mean - prev) * dt;
        let diffusion = self.volatility * dw * prev.max(0.0).sqrt();
        (prev + drift + diffusion).max(0.0)
    }
}
