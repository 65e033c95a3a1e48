use super::kde::{GaussianKde, KdeError};
use rand::Rng;
use tracing::{debug, instrument};

/// Free energy of bulk water, kcal/mol.
pub const DG_BULK: f64 = -30.3;
/// Enthalpy of bulk water, kcal/mol.
pub const DH_BULK: f64 = -22.2;

/// RT in kcal/mol at the 300 K reference temperature.
const RT: f64 = 0.596;
/// RT · ln(10), pairing with the base-10 logarithm of the Boltzmann integral.
const RT_LN10: f64 = 1.373;

// Empirical tail coverage for the integration grid: extra bins appended to
// the data range, with the grid starting this many bins below the minimum.
// Tunable, but kept at the historical values for numerical parity.
const EXTRA_BINS: usize = 100;
const GRID_OFFSET_BINS: isize = 50;

/// Resampling parameters and bulk-water reference for one estimation run.
///
/// The bulk references encode a water-model choice, so they are explicit here
/// rather than buried as module globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeEnergyParams {
    /// Points per subsample; `0` means the full series length. Capped at the
    /// series length.
    pub sample_size: usize,
    /// Number of bootstrap subsamples; values below 1 are treated as 1, and
    /// exactly 1 means no resampling (deterministic point estimate).
    pub subsamples: usize,
    pub dg_bulk: f64,
    pub dh_bulk: f64,
}

impl Default for FreeEnergyParams {
    fn default() -> Self {
        Self {
            sample_size: 0,
            subsamples: 1,
            dg_bulk: DG_BULK,
            dh_bulk: DH_BULK,
        }
    }
}

/// Point estimates and bootstrap uncertainties for one site, relative to the
/// bulk-water references.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeEnergyEstimate {
    pub dg: f64,
    pub dg_std: f64,
    pub dh: f64,
    pub dh_std: f64,
    /// Entropic contribution, `ΔG − ΔH`.
    pub ntds: f64,
}

/// Estimates the binding free energy of one water site from its filtered
/// interaction-energy series (the "TOTAL" term).
///
/// A Gaussian KDE is fitted to the full series; each repetition either reuses
/// the full-series fit (`subsamples == 1`) or refits to a draw from it, then
/// numerically integrates the Boltzmann-weighted density over a grid spaced
/// by the fit's covariance factor. Means and population standard deviations
/// over the repetitions give the estimate and its uncertainty.
///
/// Degenerate series surface the underlying [`KdeError`] untouched.
#[instrument(skip_all, fields(n = energies.len()))]
pub fn estimate(
    energies: &[f64],
    params: &FreeEnergyParams,
    rng: &mut impl Rng,
) -> Result<FreeEnergyEstimate, KdeError> {
    let base = GaussianKde::fit(energies)?;

    let sample_size = if params.sample_size == 0 {
        energies.len()
    } else {
        params.sample_size.min(energies.len())
    };
    let subsamples = params.subsamples.max(1);

    let mut enthalpy = Vec::with_capacity(subsamples);
    let mut free_energy = Vec::with_capacity(subsamples);
    for _ in 0..subsamples {
        let kde = if subsamples == 1 {
            base.clone()
        } else {
            GaussianKde::fit(&base.resample(sample_size, rng))?
        };

        let binwidth = kde.covariance_factor();
        let lo = kde.min();
        let n_bins = ((kde.max() - lo) / binwidth + 0.5) as usize + EXTRA_BINS;
        let grid: Vec<f64> = (0..n_bins)
            .map(|i| lo + (i as isize - GRID_OFFSET_BINS) as f64 * binwidth)
            .collect();
        let density = kde.evaluate(&grid);

        let weighted: f64 = density
            .iter()
            .zip(&grid)
            .map(|(d, point)| d * (-point / RT).exp())
            .sum();
        let dataset = kde.dataset();
        enthalpy.push(dataset.iter().sum::<f64>() / dataset.len() as f64);
        free_energy.push(-RT_LN10 * (binwidth * weighted).log10());
    }

    let dg = mean(&free_energy) - params.dg_bulk;
    let dh = mean(&enthalpy) - params.dh_bulk;
    let result = FreeEnergyEstimate {
        dg,
        dg_std: population_std(&free_energy),
        dh,
        dh_std: population_std(&enthalpy),
        ntds: dg - dh,
    };
    debug!(
        dg = result.dg,
        dg_std = result.dg_std,
        dh = result.dh,
        subsamples,
        sample_size,
        "estimated site free energy"
    );
    Ok(result)
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64]) -> f64 {
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    fn gaussian_series(n: usize, mean: f64, std: f64, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(mean, std).unwrap();
        (0..n).map(|_| normal.sample(&mut rng)).collect()
    }

    #[test]
    fn point_estimate_mode_is_deterministic() {
        let series = gaussian_series(200, -8.0, 1.5, 1);
        let params = FreeEnergyParams::default();
        let a = estimate(&series, &params, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = estimate(&series, &params, &mut StdRng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dg_std, 0.0);
        assert_eq!(a.dh_std, 0.0);
    }

    #[test]
    fn enthalpy_is_the_series_mean_relative_to_bulk() {
        let series = gaussian_series(150, -9.0, 1.0, 2);
        let params = FreeEnergyParams::default();
        let result = estimate(&series, &params, &mut StdRng::seed_from_u64(0)).unwrap();
        let series_mean = series.iter().sum::<f64>() / series.len() as f64;
        assert!((result.dh - (series_mean - DH_BULK)).abs() < 1e-12);
    }

    #[test]
    fn entropic_term_closes_the_thermodynamic_cycle() {
        let series = gaussian_series(150, -9.0, 1.0, 3);
        let params = FreeEnergyParams {
            subsamples: 5,
            sample_size: 100,
            ..FreeEnergyParams::default()
        };
        let result = estimate(&series, &params, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!((result.ntds - (result.dg - result.dh)).abs() < 1e-12);
    }

    #[test]
    fn free_energy_matches_the_analytic_boltzmann_integral() {
        // For a Gaussian mixture the Boltzmann integral has a closed form:
        // ∫ kde(E) e^(-E/RT) dE = (1/n) Σ exp(-xi/RT + h²/(2RT²)).
        let series = gaussian_series(1000, -5.0, 2.0, 4);
        let params = FreeEnergyParams::default();
        let result = estimate(&series, &params, &mut StdRng::seed_from_u64(0)).unwrap();

        let kde = GaussianKde::fit(&series).unwrap();
        let h = kde.bandwidth();
        let n = series.len() as f64;
        let exact: f64 = series
            .iter()
            .map(|xi| (-xi / RT + h * h / (2.0 * RT * RT)).exp())
            .sum::<f64>()
            / n;
        let expected_dg = -RT_LN10 * exact.log10() - DG_BULK;
        assert!(
            (result.dg - expected_dg).abs() < 0.05,
            "dg = {}, expected = {}",
            result.dg,
            expected_dg
        );
    }

    #[test]
    fn uncertainty_shrinks_as_subsamples_approach_the_full_series() {
        let series = gaussian_series(400, -7.0, 1.2, 5);
        let small = FreeEnergyParams {
            sample_size: 10,
            subsamples: 25,
            ..FreeEnergyParams::default()
        };
        let large = FreeEnergyParams {
            sample_size: 400,
            subsamples: 25,
            ..FreeEnergyParams::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let loose = estimate(&series, &small, &mut rng).unwrap();
        let tight = estimate(&series, &large, &mut rng).unwrap();
        assert!(
            loose.dg_std > tight.dg_std,
            "expected std to shrink: {} vs {}",
            loose.dg_std,
            tight.dg_std
        );
    }

    #[test]
    fn oversized_sample_requests_are_capped_at_the_series_length() {
        let series = gaussian_series(50, -6.0, 1.0, 6);
        let params = FreeEnergyParams {
            sample_size: 5000,
            subsamples: 3,
            ..FreeEnergyParams::default()
        };
        // Would panic resampling 5000 indices if the cap were missing; the
        // assertion is that this runs at all.
        estimate(&series, &params, &mut StdRng::seed_from_u64(6)).unwrap();
    }

    #[test]
    fn degenerate_series_surface_a_kde_error() {
        let params = FreeEnergyParams::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            estimate(&[], &params, &mut rng),
            Err(KdeError::EmptySeries)
        );
        assert_eq!(
            estimate(&[-4.0], &params, &mut rng),
            Err(KdeError::TooFewSamples)
        );
        assert_eq!(
            estimate(&[-4.0, -4.0, -4.0], &params, &mut rng),
            Err(KdeError::SingularCovariance)
        );
    }
}
