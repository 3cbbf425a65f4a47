//! Stochastic process models.
//!
//! One Euler-Maruyama step of each model maps the previous path value
//! and a Brownian increment `dw` (mean 0, standard deviation `sqrt(dt)`)
//! to the next value. Models are dispatched statically through the
//! [`Dynamics`] enum; no trait objects.
//!
//! Calibrations are fixed per risk factor (production-grade calibration
//! is out of scope):
//!
//! | factor   | model                      | parameters                      |
//! |----------|----------------------------|---------------------------------|
//! | interest | mean-reverting short rate  | r0=0.03, k=0.5, theta=0.04, sigma=0.1 |
//! | fx       | geometric Brownian motion  | S0=1.15, mu=0.02, sigma=0.1     |
//! | equity   | geometric Brownian motion  | S0=100, mu=0.08, sigma=0.2      |
//!
//! Inner resampled paths use GBM with mu=0.05, sigma=0.2 anchored at the
//! outer scenario's time-0 value.

pub mod gbm;
pub mod short_rate;

pub use gbm::GbmParams;
pub use short_rate::ShortRateParams;

use nmc_core::RiskFactor;

/// Statically dispatched model dynamics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Dynamics {
    /// Mean-reverting short rate with zero floor.
    ShortRate(ShortRateParams),
    /// Geometric Brownian motion.
    Gbm(GbmParams),
}

impl Dynamics {
    /// Fixed calibration for an outer risk factor.
    pub fn for_risk_factor(factor: RiskFactor) -> Self {
        match factor {
            RiskFactor::Interest => Dynamics::ShortRate(ShortRateParams {
                initial_rate: 0.03,
                mean_reversion: 0.5,
                long_term_mean: 0.04,
                volatility: 0.1,
            }),
            RiskFactor::Fx => Dynamics::Gbm(GbmParams {
                spot: 1.15,
                drift: 0.02,
                volatility: 0.1,
            }),
            RiskFactor::Equity => Dynamics::Gbm(GbmParams {
                spot: 100.0,
                drift: 0.08,
                volatility: 0.2,
            }),
        }
    }

    /// Dynamics for inner resampled paths, anchored at the outer
    /// scenario's time-0 value.
    ///
    /// Built as a struct literal: a floored short-rate anchor of exactly
    /// zero is a valid (absorbing) GBM start even though it would fail
    /// spot validation.
    pub fn inner_resample(anchor: f64) -> Self {
        Dynamics::Gbm(GbmParams {
            spot: anchor,
            drift: 0.05,
            volatility: 0.2,
        })
    }

    /// Value at time 0.
    #[inline]
    pub fn initial_value(&self) -> f64 {
        match self {
            Dynamics::ShortRate(params) => params.initial_rate,
            Dynamics::Gbm(params) => params.spot,
        }
    }

    /// Advances one Euler step of size `dt` from `prev` with Brownian
    /// increment `dw`.
    #[inline]
    pub fn evolve(&self, prev: f64, dt: f64, dw: f64) -> f64 {
        match self {
            Dynamics::ShortRate(params) => params.evolve(prev, dt, dw),
            Dynamics::Gbm(params) => params.evolve(prev, dt, dw),
        }
    }
}
