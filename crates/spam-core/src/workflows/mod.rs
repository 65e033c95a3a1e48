//! # Workflows Module
//!
//! High-level entry points tying the core models and the statistics layer
//! together into complete procedures.
//!
//! - **Statistics Workflow** ([`stats`]) - The per-site batch pass: parse the
//!   frame-inclusion report once, then for every site read the energy log,
//!   filter it, and reduce it to free-energy statistics.
//! - **Peak Editing** ([`peaks`]) - Inspect a peak file and prune spurious
//!   sites before the trajectory is reordered around them.
//! - **Progress Monitoring** ([`progress`]) - Callback plumbing so an
//!   embedding front-end can display batch progress without the library
//!   depending on any terminal machinery.

pub mod peaks;
pub mod progress;
pub mod stats;

use crate::core::io::energy::EnergyFileError;
use crate::core::io::info::InfoError;
use crate::core::io::peaks::PeakFileError;
use crate::core::io::report::ReportError;
use crate::core::models::energy::EnergySeriesError;
use crate::core::models::peak::PeakError;
use crate::stats::kde::KdeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Frame-inclusion report: {0}")]
    Info(#[from] InfoError),

    #[error("Energy output: {0}")]
    Energy(#[from] EnergyFileError),

    #[error("Energy series: {0}")]
    Series(#[from] EnergySeriesError),

    #[error("Energy output {} for site {site} has no '{term}' term", path.display())]
    MissingTerm {
        site: usize,
        term: &'static str,
        path: PathBuf,
    },

    #[error("Density estimation failed for site {site}: {source}")]
    Kde {
        site: usize,
        #[source]
        source: KdeError,
    },

    #[error("Peak file: {0}")]
    PeakFile(#[from] PeakFileError),

    #[error("Peak collection: {0}")]
    Peak(#[from] PeakError),

    #[error("Report output: {0}")]
    Report(#[from] ReportError),
}
