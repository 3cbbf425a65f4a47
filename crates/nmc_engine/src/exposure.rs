//! Exposure aggregation and XVA valuation formulas.
//!
//! Reduction pipeline per outer scenario:
//!
//! 1. mean across inner paths, per risk factor and time index;
//! 2. combine the three factor means into one path (divide by 3 - a
//!    fixed design choice for the three-factor setup, not a general
//!    N-factor average);
//! 3. clamp against the kind's rate parameter `K` into EPE/DPE;
//! 4. apply the kind-specific valuation formula with a flat discount
//!    `exp(-0.03 * t_j)`.
//!
//! Per-scenario profiles are then averaged across outer scenarios.
//! The averaging order is fixed - inner mean first, outer mean second -
//! to keep the nested-MC variance structure intact.

use nmc_core::{EngineError, ExposureProfile, Path, Result, TimeGrid, XvaKind};

/// Loss-given-default proxy used by CVA and DVA.
pub const LGD: f64 = 0.4;
/// Funding cost used by FVA and MVA.
pub const FUNDING_COST: f64 = 0.05;
/// Capital cost used by KVA.
pub const CAPITAL_COST: f64 = 0.1;
/// Flat discounting rate.
pub const DISCOUNT_RATE: f64 = 0.03;

/// Number of combined risk factors (fixed divisor in the combined mean).
const N_RISK_FACTORS: f64 = 3.0;

/// Mean across inner paths at each time index.
///
/// # Errors
///
/// Returns [`EngineError::ComputationFailure`] if the ensemble is empty
/// or its paths have inconsistent lengths.
pub fn inner_mean(paths: &[Path]) -> Result<Vec<f64>> {
    let first = paths.first().ok_or_else(|| {
        EngineError::ComputationFailure("empty inner ensemble".to_string())
    })?;
    let n = first.len();
    let mut mean = vec![0.0; n];
    for path in paths {
        if path.len() != n {
            return Err(EngineError::ComputationFailure(format!(
                "inconsistent path length: expected {n}, got {}",
                path.len()
            )));
        }
        for (acc, &value) in mean.iter_mut().zip(path.values()) {
            *acc += value;
        }
    }
    let scale = 1.0 / paths.len() as f64;
    for value in &mut mean {
        *value *= scale;
    }
    Ok(mean)
}

/// Combines the three per-factor mean paths into one.
///
/// # Errors
///
/// Returns [`EngineError::ComputationFailure`] on length mismatch.
pub fn combine_means(interest: &[f64], fx: &[f64], equity: &[f64]) -> Result<Vec<f64>> {
    if interest.len() != fx.len() || fx.len() != equity.len() {
        return Err(EngineError::ComputationFailure(format!(
            "factor mean length mismatch: {} / {} / {}",
            interest.len(),
            fx.len(),
            equity.len()
        )));
    }
    Ok(interest
        .iter()
        .zip(fx)
        .zip(equity)
        .map(|((&i, &f), &e)| (i + f + e) / N_RISK_FACTORS)
        .collect())
}

/// Clamps a combined path against the rate parameter `K` into expected
/// positive and negative exposure.
///
/// `EPE[j] = max(combined[j] - K, 0)`, `DPE[j] = max(K - combined[j], 0)`;
/// both are non-negative by construction.
pub fn exposure_split(combined: &[f64], strike: f64) -> (Vec<f64>, Vec<f64>) {
    let epe = combined.iter().map(|&v| (v - strike).max(0.0)).collect();
    let dpe = combined.iter().map(|&v| (strike - v).max(0.0)).collect();
    (epe, dpe)
}

/// Flat discount factors `exp(-DISCOUNT_RATE * t_j)` over the grid.
///
/// Index 0 is `exp(0) = 1`, so a single-point grid discounts trivially.
pub fn discount_factors(grid: &TimeGrid) -> Vec<f64> {
    grid.times().map(|t| (-DISCOUNT_RATE * t).exp()).collect()
}

/// Applies the kind-specific valuation formula at every time index.
///
/// Pure function table over the closed kind set. The kind's rate
/// parameter enters earlier, as the clamp level in [`exposure_split`].
pub fn value_adjustment(
    kind: XvaKind,
    epe: &[f64],
    dpe: &[f64],
    discount: &[f64],
) -> Vec<f64> {
    match kind {
        XvaKind::Cva => epe.iter().map(|&e| e * (1.0 - LGD) * 0.01).collect(),
        XvaKind::Dva => dpe.iter().map(|&d| d * (1.0 - LGD) * 0.01).collect(),
        XvaKind::Fva => epe
            .iter()
            .zip(dpe)
            .zip(discount)
            .map(|((&e, &d), &df)| (e - d).max(0.0) * FUNDING_COST * df)
            .collect(),
        XvaKind::Mva => epe
            .iter()
            .zip(discount)
            .map(|(&e, &df)| e * FUNDING_COST * df)
            .collect(),
        XvaKind::Kva => epe
            .iter()
            .zip(discount)
            .map(|(&e, &df)| e * CAPITAL_COST * df)
            .collect(),
    }
}

/// Averages per-scenario valuation profiles into the final exposure
/// profile (the outer mean).
///
/// # Errors
///
/// Returns [`EngineError::ComputationFailure`] if no scenarios were
/// provided or profile lengths disagree.
pub fn average_profiles(per_scenario: &[Vec<f64>]) -> Result<ExposureProfile> {
    let first = per_scenario.first().ok_or_else(|| {
        EngineError::ComputationFailure("no scenario profiles to average".to_string())
    })?;
    let n = first.len();
    let mut mean = vec![0.0; n];
    for profile in per_scenario {
        if profile.len() != n {
            return Err(EngineError::ComputationFailure(format!(
                "inconsistent profile length: expected {n}, got {}",
                profile.len()
            )));
        }
        for (acc, &value) in mean.iter_mut().zip(profile) {
            *acc += value;
        }
    }
    let scale = 1.0 / per_scenario.len() as f64;
    for value in &mut mean {
        *value *= scale;
    }
    Ok(ExposureProfile::from_values(mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inner_mean() {
        let paths = vec![
            Path::from_values(vec![1.0, 2.0, 3.0]),
            Path::from_values(vec![3.0, 4.0, 5.0]),
        ];
        let mean = inner_mean(&paths).unwrap();
        assert_eq!(mean, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_inner_mean_rejects_empty_and_ragged() {
        assert!(inner_mean(&[]).is_err());
        let ragged = vec![
            Path::from_values(vec![1.0, 2.0]),
            Path::from_values(vec![1.0]),
        ];
        assert!(matches!(
            inner_mean(&ragged),
            Err(EngineError::ComputationFailure(_))
        ));
    }

    #[test]
    fn test_combine_means_divides_by_three() {
        let combined = combine_means(&[0.03], &[1.17], &[101.8]).unwrap();
        assert_relative_eq!(combined[0], (0.03 + 1.17 + 101.8) / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_exposure_split_non_negative_and_complementary() {
        let combined = vec![-1.0, 0.5, 2.0];
        let (epe, dpe) = exposure_split(&combined, 0.5);
        assert_eq!(epe, vec![0.0, 0.0, 1.5]);
        assert_eq!(dpe, vec![1.5, 0.0, 0.0]);
        assert!(epe.iter().chain(&dpe).all(|&v| v >= 0.0));
    }

    #[test]
    fn test_discount_factors() {
        let grid = TimeGrid::new(1.0, 4).unwrap();
        let df = discount_factors(&grid);
        assert_eq!(df.len(), 4);
        assert_relative_eq!(df[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(df[2], (-0.03 * 0.5_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_single_point_discount_is_one() {
        let grid = TimeGrid::new(1.0, 1).unwrap();
        assert_eq!(discount_factors(&grid), vec![1.0]);
    }

    #[test]
    fn test_cva_dva_formulas() {
        let epe = vec![2.0];
        let dpe = vec![0.5];
        let df = vec![1.0];
        let cva = value_adjustment(XvaKind::Cva, &epe, &dpe, &df);
        assert_relative_eq!(cva[0], 2.0 * 0.6 * 0.01, epsilon = 1e-12);
        let dva = value_adjustment(XvaKind::Dva, &epe, &dpe, &df);
        assert_relative_eq!(dva[0], 0.5 * 0.6 * 0.01, epsilon = 1e-12);
    }

    #[test]
    fn test_fva_clamps_net_exposure() {
        let df = vec![0.9];
        let funding = value_adjustment(XvaKind::Fva, &[1.0], &[3.0], &df);
        // DPE exceeds EPE: clamped to zero.
        assert_eq!(funding[0], 0.0);
        let funding = value_adjustment(XvaKind::Fva, &[3.0], &[1.0], &df);
        assert_relative_eq!(funding[0], 2.0 * FUNDING_COST * 0.9, epsilon = 1e-12);
    }

    #[test]
    fn test_mva_kva_formulas() {
        let df = vec![0.8];
        let mva = value_adjustment(XvaKind::Mva, &[2.0], &[0.0], &df);
        assert_relative_eq!(mva[0], 2.0 * FUNDING_COST * 0.8, epsilon = 1e-12);
        let kva = value_adjustment(XvaKind::Kva, &[2.0], &[0.0], &df);
        assert_relative_eq!(kva[0], 2.0 * CAPITAL_COST * 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_average_profiles() {
        let profiles = vec![vec![1.0, 2.0], vec![3.0, 6.0]];
        let avg = average_profiles(&profiles).unwrap();
        assert_eq!(avg.values(), &[2.0, 4.0]);
    }

    #[test]
    fn test_average_profiles_rejects_empty_and_ragged() {
        assert!(average_profiles(&[]).is_err());
        assert!(average_profiles(&[vec![1.0], vec![1.0, 2.0]]).is_err());
    }
}
