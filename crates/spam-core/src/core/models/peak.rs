use nalgebra::Point3;
use std::cmp::Ordering;
use thiserror::Error;

/// Densities closer than this are considered equal when comparing peaks.
pub const TINY: f64 = 1e-10;

/// Sentinel for a peak whose density has not been assigned yet.
const UNSET_DENSITY: f64 = -1.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PeakError {
    #[error("Density of peak not set; peaks cannot be compared before their density is assigned")]
    UninitializedDensity,

    #[error("Peak index {index} is out of range for a collection of {len} peaks")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A water-density peak ("hot spot") located by the trajectory grid analysis.
///
/// Peaks are compared by density only: two peaks with the same density but
/// different coordinates compare equal. This is deliberate. The collection
/// order, not the coordinates, identifies a site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Peak {
    position: Point3<f64>,
    density: f64,
}

impl Peak {
    /// Creates a peak with an unset density.
    pub fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            density: UNSET_DENSITY,
        }
    }

    /// Creates a peak with its density already assigned.
    pub fn with_density(position: Point3<f64>, density: f64) -> Self {
        Self { position, density }
    }

    pub fn position(&self) -> Point3<f64> {
        self.position
    }

    /// Raw density value; negative means unset.
    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn has_density(&self) -> bool {
        self.density >= 0.0
    }

    /// Three-way comparison on density alone.
    ///
    /// Densities within [`TINY`] of each other compare equal. Fails if either
    /// peak still carries the unset sentinel.
    pub fn cmp_density(&self, other: &Peak) -> Result<Ordering, PeakError> {
        if !self.has_density() || !other.has_density() {
            return Err(PeakError::UninitializedDensity);
        }
        if (self.density - other.density).abs() < TINY {
            Ok(Ordering::Equal)
        } else if self.density > other.density {
            Ok(Ordering::Greater)
        } else {
            Ok(Ordering::Less)
        }
    }
}

/// An ordered collection of peaks; the position of a peak in the collection
/// is its site index for the whole downstream pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeakCollection {
    peaks: Vec<Peak>,
}

impl PeakCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Peak> {
        self.peaks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Peak> {
        self.peaks.iter()
    }

    pub fn as_slice(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn push(&mut self, peak: Peak) {
        self.peaks.push(peak);
    }

    pub fn extend<I>(&mut self, peaks: I)
    where
        I: IntoIterator<Item = Peak>,
    {
        self.peaks.extend(peaks);
    }

    /// Returns the peak with the highest density.
    ///
    /// Fails with [`PeakError::UninitializedDensity`] if any peak in the
    /// collection has no density assigned; returns `Ok(None)` when empty.
    pub fn max(&self) -> Result<Option<&Peak>, PeakError> {
        let mut best: Option<&Peak> = None;
        for peak in &self.peaks {
            best = match best {
                None => Some(peak),
                Some(current) => {
                    if peak.cmp_density(current)? == Ordering::Greater {
                        Some(peak)
                    } else {
                        Some(current)
                    }
                }
            };
        }
        Ok(best)
    }

    /// Removes the peaks at the given indices, in a single pass.
    ///
    /// Indices are applied in descending order internally so callers may pass
    /// them in any order; duplicates are ignored. Intended for the peak-file
    /// editing workflow where a user prunes spurious sites before the
    /// trajectory is reordered.
    pub fn remove_indices(&mut self, indices: &[usize]) -> Result<(), PeakError> {
        let len = self.peaks.len();
        if let Some(&index) = indices.iter().find(|&&i| i >= len) {
            return Err(PeakError::IndexOutOfRange { index, len });
        }
        let mut sorted: Vec<usize> = indices.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();
        for index in sorted {
            self.peaks.remove(index);
        }
        Ok(())
    }
}

impl FromIterator<Peak> for PeakCollection {
    fn from_iter<I: IntoIterator<Item = Peak>>(iter: I) -> Self {
        Self {
            peaks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PeakCollection {
    type Item = &'a Peak;
    type IntoIter = std::slice::Iter<'a, Peak>;

    fn into_iter(self) -> Self::IntoIter {
        self.peaks.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak(x: f64, density: f64) -> Peak {
        Peak::with_density(Point3::new(x, 0.0, 0.0), density)
    }

    #[test]
    fn comparison_uses_density_only() {
        let a = Peak::with_density(Point3::new(1.0, 2.0, 3.0), 0.7);
        let b = Peak::with_density(Point3::new(-4.0, 5.0, 9.0), 0.7);
        assert_eq!(a.cmp_density(&b), Ok(Ordering::Equal));
    }

    #[test]
    fn densities_within_epsilon_compare_equal() {
        let a = peak(0.0, 0.5);
        let b = peak(1.0, 0.5 + TINY / 2.0);
        assert_eq!(a.cmp_density(&b), Ok(Ordering::Equal));
        let c = peak(1.0, 0.5 + 2e-10);
        assert_eq!(c.cmp_density(&a), Ok(Ordering::Greater));
        assert_eq!(a.cmp_density(&c), Ok(Ordering::Less));
    }

    #[test]
    fn comparing_uninitialized_peak_fails() {
        let set = peak(0.0, 0.5);
        let unset = Peak::new(Point3::new(0.0, 0.0, 0.0));
        assert!(!unset.has_density());
        assert_eq!(
            set.cmp_density(&unset),
            Err(PeakError::UninitializedDensity)
        );
        assert_eq!(
            unset.cmp_density(&set),
            Err(PeakError::UninitializedDensity)
        );
    }

    #[test]
    fn max_returns_highest_density_peak() {
        let peaks: PeakCollection = [peak(0.0, 0.5), peak(1.0, 0.9), peak(2.0, 0.3)]
            .into_iter()
            .collect();
        let max = peaks.max().unwrap().unwrap();
        assert_eq!(max.density(), 0.9);
        assert_eq!(max.position().x, 1.0);
    }

    #[test]
    fn max_on_empty_collection_is_none() {
        let peaks = PeakCollection::new();
        assert_eq!(peaks.max().unwrap(), None);
    }

    #[test]
    fn max_fails_if_any_peak_is_uninitialized() {
        let mut peaks = PeakCollection::new();
        peaks.push(peak(0.0, 0.5));
        peaks.push(Peak::new(Point3::new(1.0, 1.0, 1.0)));
        assert_eq!(peaks.max(), Err(PeakError::UninitializedDensity));
    }

    #[test]
    fn remove_indices_accepts_any_order_and_duplicates() {
        let mut peaks: PeakCollection = (0..5).map(|i| peak(i as f64, 0.1 * i as f64)).collect();
        peaks.remove_indices(&[1, 3, 1]).unwrap();
        let xs: Vec<f64> = peaks.iter().map(|p| p.position().x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 4.0]);
    }

    #[test]
    fn remove_indices_rejects_out_of_range() {
        let mut peaks: PeakCollection = (0..3).map(|i| peak(i as f64, 0.1)).collect();
        assert_eq!(
            peaks.remove_indices(&[0, 3]),
            Err(PeakError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(peaks.len(), 3);
    }
}
