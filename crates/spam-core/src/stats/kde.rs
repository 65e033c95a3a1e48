use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::TAU;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KdeError {
    #[error("Cannot fit a density estimate to an empty series")]
    EmptySeries,

    #[error("Cannot fit a density estimate to a single point")]
    TooFewSamples,

    #[error("Series has zero variance; the kernel covariance is singular")]
    SingularCovariance,
}

/// One-dimensional Gaussian kernel density estimate.
///
/// The kernel bandwidth follows the covariance-factor rule: Scott's factor
/// `n^(-1/5)` scaled by the sample standard deviation of the data. Degenerate
/// inputs (empty, a single point, zero variance) fail loudly with a
/// [`KdeError`] so a broken energy series is never silently smoothed over.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    dataset: Vec<f64>,
    factor: f64,
    bandwidth: f64,
}

impl GaussianKde {
    pub fn fit(data: &[f64]) -> Result<Self, KdeError> {
        match data.len() {
            0 => return Err(KdeError::EmptySeries),
            1 => return Err(KdeError::TooFewSamples),
            _ => {}
        }
        let n = data.len() as f64;
        let mean = data.iter().sum::<f64>() / n;
        let variance = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        if variance <= 0.0 || !variance.is_finite() {
            return Err(KdeError::SingularCovariance);
        }
        let factor = n.powf(-0.2);
        Ok(Self {
            dataset: data.to_vec(),
            factor,
            bandwidth: factor * variance.sqrt(),
        })
    }

    /// The points the estimate was fitted to.
    pub fn dataset(&self) -> &[f64] {
        &self.dataset
    }

    /// Scott's covariance factor `n^(-1/5)`.
    pub fn covariance_factor(&self) -> f64 {
        self.factor
    }

    /// Kernel standard deviation: covariance factor times the sample
    /// standard deviation.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn min(&self) -> f64 {
        self.dataset.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.dataset
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Evaluates the estimated density at each of the given points.
    pub fn evaluate(&self, points: &[f64]) -> Vec<f64> {
        let norm = 1.0 / (TAU.sqrt() * self.bandwidth * self.dataset.len() as f64);
        let inv_two_h2 = 1.0 / (2.0 * self.bandwidth * self.bandwidth);
        points
            .iter()
            .map(|&x| {
                let sum: f64 = self
                    .dataset
                    .iter()
                    .map(|&xi| (-(x - xi) * (x - xi) * inv_two_h2).exp())
                    .sum();
                sum * norm
            })
            .collect()
    }

    /// Draws `n` points with replacement from the fitted density: a dataset
    /// point chosen uniformly plus Gaussian noise of one bandwidth.
    pub fn resample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<f64> {
        (0..n)
            .map(|_| {
                let base = self.dataset[rng.gen_range(0..self.dataset.len())];
                let noise: f64 = rng.sample(StandardNormal);
                base + noise * self.bandwidth
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn spread_data(n: usize) -> Vec<f64> {
        (0..n).map(|i| -10.0 + 0.04 * i as f64).collect()
    }

    #[test]
    fn covariance_factor_follows_scotts_rule() {
        let kde = GaussianKde::fit(&spread_data(32)).unwrap();
        assert!((kde.covariance_factor() - (32.0f64).powf(-0.2)).abs() < 1e-12);
    }

    #[test]
    fn density_integrates_to_one_over_a_wide_grid() {
        let kde = GaussianKde::fit(&spread_data(100)).unwrap();
        let step = kde.bandwidth() / 4.0;
        let lo = kde.min() - 10.0 * kde.bandwidth();
        let n_steps = (((kde.max() - kde.min()) + 20.0 * kde.bandwidth()) / step) as usize;
        let grid: Vec<f64> = (0..n_steps).map(|i| lo + i as f64 * step).collect();
        let integral: f64 = kde.evaluate(&grid).iter().sum::<f64>() * step;
        assert!((integral - 1.0).abs() < 1e-3, "integral = {integral}");
    }

    #[test]
    fn density_is_symmetric_around_a_symmetric_dataset() {
        let kde = GaussianKde::fit(&[-1.0, 1.0]).unwrap();
        let values = kde.evaluate(&[-0.5, 0.5]);
        assert!((values[0] - values[1]).abs() < 1e-12);
    }

    #[test]
    fn resample_stays_near_the_source_distribution() {
        let data = spread_data(50);
        let kde = GaussianKde::fit(&data).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let draw = kde.resample(500, &mut rng);
        assert_eq!(draw.len(), 500);
        let (lo, hi) = (kde.min() - 6.0 * kde.bandwidth(), kde.max() + 6.0 * kde.bandwidth());
        assert!(draw.iter().all(|&x| x > lo && x < hi));
    }

    #[test]
    fn degenerate_inputs_fail_loudly() {
        assert_eq!(GaussianKde::fit(&[]), Err(KdeError::EmptySeries));
        assert_eq!(GaussianKde::fit(&[1.0]), Err(KdeError::TooFewSamples));
        assert_eq!(
            GaussianKde::fit(&[2.0, 2.0, 2.0]),
            Err(KdeError::SingularCovariance)
        );
    }
}
