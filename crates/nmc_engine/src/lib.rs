//! # NMC Engine (The Kernel)
//!
//! Nested Monte Carlo simulation engine for XVA exposure profiles.
//!
//! The engine turns a validated request into per-time-point exposure
//! profiles through two fork-join stages:
//!
//! 1. **Outer stage** - three concurrent tasks generate the outer path
//!    ensembles, one per risk factor (interest, FX, equity). The joined
//!    ensemble is immutable and shared read-only afterwards.
//! 2. **Valuation stage** - one concurrent task per requested XVA kind.
//!    Each task nests an inner simulation under every outer scenario,
//!    reduces the inner ensembles to a combined mean path, clamps it
//!    into positive/negative exposure, and applies the kind-specific
//!    valuation formula.
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │               SimulationOrchestrator             │
//! ├──────────────────────────────────────────────────┤
//! │  outer.rs     - OuterScenarioSet (3 tasks)       │
//! │  inner.rs     - InnerPathEngine (per scenario)   │
//! │  exposure.rs  - inner-mean, EPE/DPE, formulas    │
//! │  backend.rs   - CPU thread pool / accelerator    │
//! ├──────────────────────────────────────────────────┤
//! │  models/      - short rate, GBM dynamics         │
//! │  paths.rs     - ensemble generation              │
//! │  rng/         - injectable per-task RNG streams  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism
//!
//! Every generation unit derives its random stream from a stable
//! [`rng::StreamId`] (risk factor, scenario and path indices), never from
//! spawn order. With [`rng::SeededStreams`] two runs with identical
//! parameters produce bit-identical profiles regardless of how the
//! scheduler interleaves tasks.
//!
//! ## Example
//!
//! ```
//! use nmc_core::{XvaKind, XvaRequest};
//! use nmc_engine::simulate_seeded;
//!
//! let request = XvaRequest::parse("CVA=0.0").unwrap();
//! let results = simulate_seeded(&request, 10, 10, 5, 1.0, 42).unwrap();
//!
//! let profile = results.get(XvaKind::Cva).unwrap();
//! assert_eq!(profile.len(), 5);
//! assert!(profile.values().iter().all(|&v| v >= 0.0));
//! ```

pub mod backend;
pub mod device;
pub mod exposure;
pub mod inner;
pub mod models;
pub mod orchestrator;
pub mod outer;
pub mod paths;
pub mod rng;

pub use backend::{AcceleratorBackend, Backend, CpuBackend};
pub use inner::InnerPathEngine;
pub use orchestrator::{simulate, simulate_seeded, simulate_with};
pub use outer::OuterScenarioSet;
pub use paths::PathGenerator;
pub use rng::{EngineRng, EntropyStreams, PathRng, RngStreams, SeededStreams, StreamId};
