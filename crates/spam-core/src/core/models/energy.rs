use super::inclusion::{FrameInclusionIndex, InclusionError};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Name of the summed interaction term the free-energy estimator consumes.
pub const TOTAL_TERM: &str = "TOTAL";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnergySeriesError {
    #[error("Energy term '{term}' has {found} frames but the series declares {expected}")]
    InconsistentTermLength {
        term: String,
        expected: usize,
        found: usize,
    },

    #[error(
        "Energy series covers {series_frames} frames but the inclusion index covers {index_frames}; \
         the series and the index must come from the same trajectory"
    )]
    FrameCountMismatch {
        series_frames: usize,
        index_frames: usize,
    },

    #[error("Energy series has already been filtered; it cannot be filtered again")]
    AlreadyFiltered,

    #[error(transparent)]
    Inclusion(#[from] InclusionError),
}

/// One named energy time series per interaction term for a single site.
///
/// All terms share the same length: one slot per trajectory frame until
/// [`filter_frames`](Self::filter_frames) shrinks them to the included frames
/// of one site.
#[derive(Debug, Clone, PartialEq)]
pub struct PairEnergySeries {
    term_names: Vec<String>,
    data: HashMap<String, Vec<f64>>,
    n_frames: usize,
    filtered: bool,
}

impl PairEnergySeries {
    /// Builds a series from `(term name, values)` pairs in report order.
    pub fn from_terms(
        terms: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, EnergySeriesError> {
        let n_frames = terms.first().map_or(0, |(_, values)| values.len());
        let mut term_names = Vec::with_capacity(terms.len());
        let mut data = HashMap::with_capacity(terms.len());
        for (term, values) in terms {
            if values.len() != n_frames {
                return Err(EnergySeriesError::InconsistentTermLength {
                    term,
                    expected: n_frames,
                    found: values.len(),
                });
            }
            term_names.push(term.clone());
            data.insert(term, values);
        }
        Ok(Self {
            term_names,
            data,
            n_frames,
            filtered: false,
        })
    }

    /// Number of frames currently held per term.
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    /// Term names in the order the energy engine declared them.
    pub fn term_names(&self) -> &[String] {
        &self.term_names
    }

    pub fn term(&self, name: &str) -> Option<&[f64]> {
        self.data.get(name).map(Vec::as_slice)
    }

    /// The summed interaction term, if the report carried one.
    pub fn total(&self) -> Option<&[f64]> {
        self.term(TOTAL_TERM)
    }

    /// Discards the frames omitted for `site`, permanently shrinking every
    /// term to the site's included-frame count.
    ///
    /// Every term is compacted with the same index walk, so cross-term frame
    /// alignment is never broken. The series must still be unfiltered and must
    /// cover exactly the index's frame count; re-filtering against a second
    /// site would silently corrupt indices, so it is rejected.
    pub fn filter_frames(
        &mut self,
        index: &FrameInclusionIndex,
        site: usize,
    ) -> Result<(), EnergySeriesError> {
        if self.filtered {
            return Err(EnergySeriesError::AlreadyFiltered);
        }
        if self.n_frames != index.total_frames() {
            return Err(EnergySeriesError::FrameCountMismatch {
                series_frames: self.n_frames,
                index_frames: index.total_frames(),
            });
        }

        let included: Vec<usize> = index.included_frames(site)?.collect();
        for values in self.data.values_mut() {
            for (dst, &src) in included.iter().enumerate() {
                values[dst] = values[src];
            }
            values.truncate(included.len());
        }
        debug!(
            site,
            kept = included.len(),
            dropped = self.n_frames - included.len(),
            "filtered energy series"
        );
        self.n_frames = included.len();
        self.filtered = true;
        Ok(())
    }
}
