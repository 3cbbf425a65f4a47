//! Valuation backends.
//!
//! Stage (b) of the simulation - one unit of work per requested XVA
//! kind - can run on the CPU thread pool or be delegated to an
//! accelerator. Both strategies honour the same contract: consume the
//! shared read-only outer ensemble, return the full result set or fail
//! as a whole. Backend choice never changes the observable results
//! contract.

use rayon::prelude::*;
use tracing::{debug, info};

use nmc_core::{
    DeviceError, EngineError, ExposureProfile, Result, ResultSet, RiskFactor, XvaKind,
    XvaRequest,
};

use crate::device::{self, DeviceHandle};
use crate::exposure;
use crate::inner::InnerPathEngine;
use crate::outer::OuterScenarioSet;
use crate::rng::RngStreams;

/// Execution strategy for the per-kind valuation stage.
#[derive(Clone, Copy, Debug)]
pub enum Backend {
    /// Rayon fork-join on the host.
    Cpu(CpuBackend),
    /// Device-resident execution.
    Accelerator(AcceleratorBackend),
}

impl Backend {
    /// The default host backend.
    pub fn cpu() -> Self {
        Backend::Cpu(CpuBackend)
    }

    /// An accelerator backend bound to `device_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if the device cannot be selected.
    pub fn accelerator(device_id: u32) -> std::result::Result<Self, DeviceError> {
        Ok(Backend::Accelerator(AcceleratorBackend::new(device_id)?))
    }

    /// Runs the valuation stage for every kind in `request`.
    pub fn valuate<S: RngStreams>(
        &self,
        request: &XvaRequest,
        outer: &OuterScenarioSet,
        m1: usize,
        streams: &S,
    ) -> Result<ResultSet> {
        match self {
            Backend::Cpu(backend) => backend.valuate(request, outer, m1, streams),
            Backend::Accelerator(backend) => backend.valuate(request, outer, m1, streams),
        }
    }
}

/// CPU valuation backend: one concurrent task per requested XVA kind.
///
/// Tasks share the outer ensemble read-only and own everything else
/// they touch (inner ensembles, RNG streams, accumulators), so the
/// reduction is race-free by construction. Any task failure aborts the
/// whole batch; the structured fork-join joins every task on every exit
/// path.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuBackend;

impl CpuBackend {
    /// Creates the CPU backend.
    pub fn new() -> Self {
        Self
    }

    /// Runs one valuation task per requested kind and assembles the
    /// result set.
    pub fn valuate<S: RngStreams>(
        &self,
        request: &XvaRequest,
        outer: &OuterScenarioSet,
        m1: usize,
        streams: &S,
    ) -> Result<ResultSet> {
        let engine = InnerPathEngine::new(outer, m1)?;
        let discount = exposure::discount_factors(&outer.grid());

        let entries: Vec<(XvaKind, f64)> = request.iter().collect();
        let profiles: Vec<(XvaKind, ExposureProfile)> = entries
            .par_iter()
            .map(|&(kind, rate)| {
                debug!(
                    kind = %kind,
                    rate,
                    thread = ?std::thread::current().id(),
                    "running nested valuation task"
                );
                let profile = valuate_kind(kind, rate, &engine, &discount, streams)?;
                Ok((kind, profile))
            })
            .collect::<Result<Vec<_>>>()?;

        info!(kinds = profiles.len(), "valuation stage complete");
        Ok(profiles.into_iter().collect())
    }
}

/// Nested valuation of one XVA kind across all outer scenarios.
fn valuate_kind<S: RngStreams>(
    kind: XvaKind,
    rate: f64,
    engine: &InnerPathEngine<'_>,
    discount: &[f64],
    streams: &S,
) -> Result<ExposureProfile> {
    let n_scenarios = engine.outer().n_scenarios();
    let mut per_scenario = Vec::with_capacity(n_scenarios);

    for scenario in 0..n_scenarios {
        let interest = exposure::inner_mean(&engine.simulate(
            kind,
            RiskFactor::Interest,
            scenario,
            streams,
        )?)?;
        let fx =
            exposure::inner_mean(&engine.simulate(kind, RiskFactor::Fx, scenario, streams)?)?;
        let equity = exposure::inner_mean(&engine.simulate(
            kind,
            RiskFactor::Equity,
            scenario,
            streams,
        )?)?;

        let combined = exposure::combine_means(&interest, &fx, &equity)?;
        let (epe, dpe) = exposure::exposure_split(&combined, rate);
        per_scenario.push(exposure::value_adjustment(kind, &epe, &dpe, discount));
    }

    exposure::average_profiles(&per_scenario)
}

/// Accelerator valuation backend.
///
/// Holds a selected device handle; from the orchestrator's point of
/// view `valuate` is a synchronous call that enqueues the equivalent
/// stage-(b) workload on the device and blocks until all device work
/// completes. The kernel wrapper is an external collaborator, so in a
/// build without an accelerator runtime this backend cannot be
/// constructed ([`Backend::accelerator`] fails with
/// [`DeviceError::Unavailable`]).
#[derive(Clone, Copy, Debug)]
pub struct AcceleratorBackend {
    device: DeviceHandle,
}

impl AcceleratorBackend {
    /// Selects `device_id` and binds the backend to it.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError`] if selection fails.
    pub fn new(device_id: u32) -> std::result::Result<Self, DeviceError> {
        let device = device::select_accelerator(device_id)?;
        Ok(Self { device })
    }

    /// The bound device.
    #[inline]
    pub fn device(&self) -> DeviceHandle {
        self.device
    }

    /// Runs the valuation stage on the device.
    pub fn valuate<S: RngStreams>(
        &self,
        _request: &XvaRequest,
        _outer: &OuterScenarioSet,
        _m1: usize,
        _streams: &S,
    ) -> Result<ResultSet> {
        // Reaching here requires a constructed handle, which the stub
        // runtime never grants.
        Err(EngineError::Device(DeviceError::SelectionFailed(format!(
            "device {} has no bound kernel runtime",
            self.device.id()
        ))))
    }
}
