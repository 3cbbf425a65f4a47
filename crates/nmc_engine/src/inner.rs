//! Nested inner-path simulation.
//!
//! For each outer scenario the inner engine produces `m1` trajectories
//! conditioned on that scenario: path 0 is the outer realisation itself
//! (the nested tree is rooted at the outer path, preserving consistency
//! between outer and inner measures), and paths `1..m1` are resampled
//! forward with equity-style GBM dynamics anchored at the scenario's
//! time-0 value.

use nmc_core::{EngineError, Path, Result, RiskFactor, XvaKind};

use crate::models::Dynamics;
use crate::outer::OuterScenarioSet;
use crate::paths::PathGenerator;
use crate::rng::{RngStreams, StreamId};

/// Simulates inner path ensembles conditioned on outer scenarios.
///
/// Borrows the shared read-only outer ensemble; each produced inner
/// ensemble is owned by the valuation task that requested it and is
/// discarded after aggregation.
#[derive(Clone, Copy, Debug)]
pub struct InnerPathEngine<'a> {
    outer: &'a OuterScenarioSet,
    n_paths: usize,
}

impl<'a> InnerPathEngine<'a> {
    /// Creates an inner engine producing `m1` paths per scenario.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidParameter`] if `m1` is zero.
    pub fn new(outer: &'a OuterScenarioSet, m1: usize) -> Result<Self> {
        if m1 == 0 {
            return Err(EngineError::invalid_parameter("m1", "must be at least 1"));
        }
        Ok(Self {
            outer,
            n_paths: m1,
        })
    }

    /// Number of inner paths per scenario `m1`.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// The shared outer ensemble this engine conditions on.
    #[inline]
    pub fn outer(&self) -> &OuterScenarioSet {
        self.outer
    }

    /// Simulates the inner ensemble for one `(factor, scenario)` pair
    /// inside the valuation task for `kind`.
    ///
    /// Path 0 is a copy of the outer path; `m1 = 1` therefore degenerates
    /// to returning only the outer realisation, unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ComputationFailure`] if `scenario` is out
    /// of range for the outer ensemble.
    pub fn simulate<S: RngStreams>(
        &self,
        kind: XvaKind,
        factor: RiskFactor,
        scenario: usize,
        streams: &S,
    ) -> Result<Vec<Path>> {
        if scenario >= self.outer.n_scenarios() {
            return Err(EngineError::ComputationFailure(format!(
                "scenario index {scenario} out of range for {} outer scenarios",
                self.outer.n_scenarios()
            )));
        }

        let outer_path = self.outer.path(factor, scenario);
        let mut paths = Vec::with_capacity(self.n_paths);
        paths.push(outer_path.clone());

        if self.n_paths > 1 {
            let anchor = outer_path
                .initial_value()
                .ok_or_else(|| {
                    EngineError::ComputationFailure(format!(
                        "empty outer path for {factor} scenario {scenario}"
                    ))
                })?;
            let dynamics = Dynamics::inner_resample(anchor);
            let generator = PathGenerator::new(self.outer.grid());
            paths.extend(generator.generate_ensemble(
                &dynamics,
                self.n_paths - 1,
                streams,
                |path_idx| StreamId::inner(kind, factor, scenario, path_idx + 1),
            ));
        }

        Ok(paths)
    }
}
