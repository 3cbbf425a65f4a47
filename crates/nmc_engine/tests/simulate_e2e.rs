//! End-to-end simulation tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use nmc_core::{XvaKind, XvaRequest};
use nmc_engine::{
    simulate_seeded, simulate_with, Backend, EngineRng, RngStreams, SeededStreams, StreamId,
};

#[test]
fn five_kind_run_produces_five_profiles() {
    let request = XvaRequest::parse("CVA=0.0,DVA=0.1,FVA=0.05,MVA=0.2,KVA=0.3").unwrap();
    let results = simulate_seeded(&request, 8, 6, 10, 1.0, 99).unwrap();

    assert_eq!(results.len(), 5);
    for kind in XvaKind::ALL {
        let profile = results.get(kind).expect("profile for every requested kind");
        assert_eq!(profile.len(), 10);
        assert!(profile.values().iter().all(|&v| v >= 0.0 && v.is_finite()));
    }
}

#[test]
fn baseline_cva_scenario() {
    // m0=10, m1=10, N=5, T=1.0, request {CVA: 0.0}.
    let request = XvaRequest::parse("CVA=0.0").unwrap();
    let results = simulate_seeded(&request, 10, 10, 5, 1.0, 1).unwrap();

    assert_eq!(results.len(), 1);
    let profile = results.get(XvaKind::Cva).unwrap();
    assert_eq!(profile.len(), 5);
    assert!(profile.values().iter().all(|&v| v >= 0.0));
}

#[test]
fn seeded_runs_are_bit_identical() {
    let request = XvaRequest::parse("CVA=0.1,DVA=0.1,KVA=0.05").unwrap();
    let a = simulate_seeded(&request, 5, 7, 12, 2.0, 2024).unwrap();
    let b = simulate_seeded(&request, 5, 7, 12, 2.0, 2024).unwrap();

    for kind in a.kinds() {
        let va = a.get(kind).unwrap().values();
        let vb = b.get(kind).unwrap().values();
        assert_eq!(va, vb, "profiles for {kind} differ between seeded runs");
    }
}

#[test]
fn different_seeds_differ() {
    let request = XvaRequest::parse("CVA=0.1").unwrap();
    let a = simulate_seeded(&request, 5, 5, 10, 1.0, 1).unwrap();
    let b = simulate_seeded(&request, 5, 5, 10, 1.0, 2).unwrap();
    assert_ne!(
        a.get(XvaKind::Cva).unwrap().values(),
        b.get(XvaKind::Cva).unwrap().values()
    );
}

/// Stream factory wrapper that counts handed-out streams, to prove the
/// fail-fast path triggers no path generation.
struct CountingStreams {
    inner: SeededStreams,
    count: AtomicUsize,
}

impl CountingStreams {
    fn new(seed: u64) -> Self {
        Self {
            inner: SeededStreams::new(seed),
            count: AtomicUsize::new(0),
        }
    }
}

impl RngStreams for CountingStreams {
    type Rng = EngineRng;

    fn stream(&self, id: StreamId) -> EngineRng {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.stream(id)
    }
}

#[test]
fn unknown_kind_fails_before_any_path_generation() {
    // Parsing the request already rejects the unknown token...
    let err = XvaRequest::parse("XYZ=0.1").unwrap_err();
    assert!(err.to_string().contains("XYZ"));

    // ...and invalid numeric parameters are rejected before the outer
    // stage requests a single random stream.
    let request = XvaRequest::parse("CVA=0.0").unwrap();
    let streams = CountingStreams::new(0);
    let result = simulate_with(&request, 10, 10, 0, 1.0, &Backend::cpu(), &streams);
    assert!(result.is_err());
    assert_eq!(streams.count.load(Ordering::SeqCst), 0);
}

#[test]
fn valid_run_exercises_outer_and_inner_streams() {
    let request = XvaRequest::parse("CVA=0.0").unwrap();
    let streams = CountingStreams::new(3);
    let results = simulate_with(&request, 2, 3, 4, 1.0, &Backend::cpu(), &streams).unwrap();

    assert_eq!(results.len(), 1);
    // 3 factors x 2 outer paths, plus 3 factors x 2 scenarios x 2
    // resampled inner paths for the single requested kind.
    assert_eq!(streams.count.load(Ordering::SeqCst), 6 + 12);
}
