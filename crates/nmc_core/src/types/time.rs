//! Simulation time grid.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Immutable, uniform simulation time grid.
///
/// A grid covers the horizon `[0, T]` with `n_points` points; point `j`
/// sits at `j * dt` with `dt = T / n_points`. Every path and every
/// exposure profile produced during one run has exactly `n_points`
/// values, one per grid point.
///
/// # Examples
///
/// ```
/// use nmc_core::TimeGrid;
///
/// let grid = TimeGrid::new(1.0, 4).unwrap();
/// assert_eq!(grid.n_points(), 4);
/// assert_eq!(grid.dt(), 0.25);
/// assert_eq!(grid.time(2), 0.5);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    horizon: f64,
    n_points: usize,
}

impl TimeGrid {
    /// Creates a new time grid with validation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if `horizon` is not a
    /// finite positive number or `n_points` is zero.
    pub fn new(horizon: f64, n_points: usize) -> Result<Self> {
        if !horizon.is_finite() || horizon <= 0.0 {
            return Err(EngineError::invalid_parameter(
                "horizon",
                format!("must be a finite positive number, got {horizon}"),
            ));
        }
        if n_points == 0 {
            return Err(EngineError::invalid_parameter(
                "n_points",
                "must be at least 1",
            ));
        }
        Ok(Self { horizon, n_points })
    }

    /// Time horizon `T` in year fractions.
    #[inline]
    pub fn horizon(&self) -> f64 {
        self.horizon
    }

    /// Number of grid points `N`.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Step size `dt = T / N`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.horizon / self.n_points as f64
    }

    /// Time value at grid index `j`, i.e. `j * dt`.
    #[inline]
    pub fn time(&self, index: usize) -> f64 {
        index as f64 * self.dt()
    }

    /// Iterator over all grid times, index 0 first.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.n_points).map(move |j| self.time(j))
    }
}
