//! Outer scenario ensemble.
//!
//! Stage (a) of the simulation: one generation task per risk factor,
//! run concurrently and joined before the ensemble is returned. After
//! the join the ensemble is immutable and shared read-only with every
//! valuation task, so no further synchronisation is needed on it.

use tracing::{debug, info};

use nmc_core::{EngineError, Path, Result, RiskFactor, TimeGrid};

use crate::models::Dynamics;
use crate::paths::PathGenerator;
use crate::rng::{RngStreams, StreamId};

/// Fully populated outer path ensembles, one per risk factor.
#[derive(Clone, Debug)]
pub struct OuterScenarioSet {
    grid: TimeGrid,
    n_scenarios: usize,
    ensembles: [Vec<Path>; 3],
}

impl OuterScenarioSet {
    /// Generates `m0` outer paths for each of the three risk factors.
    ///
    /// The three factor tasks run concurrently; this function returns
    /// only once all of them have completed (the structured fork-join
    /// guarantees the join on every exit path).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if `m0` is zero.
    pub fn generate<S: RngStreams>(grid: TimeGrid, m0: usize, streams: &S) -> Result<Self> {
        if m0 == 0 {
            return Err(EngineError::invalid_parameter("m0", "must be at least 1"));
        }

        let generator = PathGenerator::new(grid);
        let generate = |factor: RiskFactor| {
            let dynamics = Dynamics::for_risk_factor(factor);
            let paths = generator.generate_ensemble(&dynamics, m0, streams, |path_idx| {
                StreamId::outer(factor, path_idx)
            });
            debug!(factor = %factor, paths = paths.len(), "outer ensemble generated");
            paths
        };

        let (interest, (fx, equity)) = rayon::join(
            || generate(RiskFactor::Interest),
            || {
                rayon::join(
                    || generate(RiskFactor::Fx),
                    || generate(RiskFactor::Equity),
                )
            },
        );

        info!(
            m0,
            n_points = grid.n_points(),
            "interest, FX and equity outer paths generated"
        );

        Ok(Self {
            grid,
            n_scenarios: m0,
            ensembles: [interest, fx, equity],
        })
    }

    /// The simulation time grid.
    #[inline]
    pub fn grid(&self) -> TimeGrid {
        self.grid
    }

    /// Number of outer scenarios `m0`.
    #[inline]
    pub fn n_scenarios(&self) -> usize {
        self.n_scenarios
    }

    /// All outer paths for `factor`.
    #[inline]
    pub fn paths(&self, factor: RiskFactor) -> &[Path] {
        &self.ensembles[factor.index()]
    }

    /// The outer path of `factor` at `scenario`.
    ///
    /// # Panics
    ///
    /// Panics if `scenario >= n_scenarios()`; scenario indices are
    /// produced internally by iteration over `0..n_scenarios()`.
    #[inline]
    pub fn path(&self, factor: RiskFactor, scenario: usize) -> &Path {
        &self.ensembles[factor.index()][scenario]
    }
}
