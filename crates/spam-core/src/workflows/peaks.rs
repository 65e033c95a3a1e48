use super::WorkflowError;
use crate::core::io::WriteOptions;
use crate::core::io::peaks::PeakFile;
use crate::core::models::peak::Peak;
use std::path::Path;
use tracing::{info, instrument};

/// What a peak file contains, for display before the user decides which
/// sites to prune.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakSummary {
    pub n_peaks: usize,
    /// The highest-density peak, if the collection is non-empty.
    pub strongest: Option<Peak>,
}

/// Loads a peak file and summarizes it.
pub fn summarize(input: impl AsRef<Path>) -> Result<PeakSummary, WorkflowError> {
    let peaks = PeakFile::read_from_path(input)?;
    let strongest = peaks.max()?.copied();
    Ok(PeakSummary {
        n_peaks: peaks.len(),
        strongest,
    })
}

/// Removes the given site indices from a peak file and writes the pruned
/// collection, returning how many peaks remain.
///
/// The peak file drives which sites the trajectory-reordering step creates,
/// so pruning happens here, before any site numbering is baked into
/// downstream reports.
#[instrument(skip_all, fields(removed = remove.len()))]
pub fn remove_peaks(
    input: impl AsRef<Path>,
    remove: &[usize],
    output: impl AsRef<Path>,
    options: WriteOptions,
) -> Result<usize, WorkflowError> {
    let mut peaks = PeakFile::read_from_path(input)?;
    peaks.remove_indices(remove)?;
    info!(remaining = peaks.len(), "pruned peak collection");
    PeakFile::write_to_path(&peaks, output, options)?;
    Ok(peaks.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::peaks::PeakFileError;
    use std::fs;

    const SAMPLE: &str = "3\n\nC 1.0 2.0 3.0 0.5\nC 4.0 5.0 6.0 0.9\nC 7.0 8.0 9.0 0.3\n";

    #[test]
    fn summarize_reports_count_and_strongest_peak() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("peaks.xyz");
        fs::write(&path, SAMPLE).unwrap();

        let summary = summarize(&path).unwrap();
        assert_eq!(summary.n_peaks, 3);
        let strongest = summary.strongest.unwrap();
        assert_eq!(strongest.density(), 0.9);
        assert_eq!(strongest.position().x, 4.0);
    }

    #[test]
    fn remove_peaks_prunes_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("peaks.xyz");
        let output = dir.path().join("pruned.xyz");
        fs::write(&input, SAMPLE).unwrap();

        let remaining = remove_peaks(&input, &[1], &output, WriteOptions::default()).unwrap();
        assert_eq!(remaining, 2);

        let pruned = PeakFile::read_from_path(&output).unwrap();
        assert_eq!(pruned.len(), 2);
        assert_eq!(pruned.get(0).unwrap().density(), 0.5);
        assert_eq!(pruned.get(1).unwrap().density(), 0.3);
    }

    #[test]
    fn removing_every_peak_fails_at_the_write_stage() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("peaks.xyz");
        let output = dir.path().join("pruned.xyz");
        fs::write(&input, SAMPLE).unwrap();

        let err = remove_peaks(&input, &[0, 1, 2], &output, WriteOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::PeakFile(PeakFileError::EmptyPeakSet)
        ));
    }
}
