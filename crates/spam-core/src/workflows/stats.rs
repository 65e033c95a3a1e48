use super::WorkflowError;
use super::progress::{Progress, ProgressReporter};
use crate::core::io::energy::PairEnergyFile;
use crate::core::io::info::SpamInfoFile;
use crate::core::io::report::SiteStatistics;
use crate::core::models::energy::TOTAL_TERM;
use crate::stats::free_energy::{self, FreeEnergyParams};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Configuration for one batch statistics pass over all sites.
#[derive(Debug, Clone, PartialEq)]
pub struct SpamStatsConfig {
    /// The frame-inclusion report emitted by the trajectory-reordering step.
    pub info_path: PathBuf,
    /// Per-site energy logs live at `<prefix>.<site>.out`, the site number
    /// zero-padded the way the energy-engine driver pads it.
    pub energy_prefix: PathBuf,
    pub params: FreeEnergyParams,
}

impl SpamStatsConfig {
    pub fn new(info_path: impl Into<PathBuf>, energy_prefix: impl Into<PathBuf>) -> Self {
        Self {
            info_path: info_path.into(),
            energy_prefix: energy_prefix.into(),
            params: FreeEnergyParams::default(),
        }
    }

    pub fn with_params(mut self, params: FreeEnergyParams) -> Self {
        self.params = params;
        self
    }
}

/// Runs the statistics pass: one [`SiteStatistics`] row per density peak, in
/// site order.
///
/// The frame-inclusion index is parsed once and shared read-only across all
/// sites; each site's energy series is read, filtered, and reduced in
/// isolation, so a future embedder may parallelize by site and concatenate
/// the rows by site index.
#[instrument(skip_all, name = "spam_stats_workflow")]
pub fn run(
    config: &SpamStatsConfig,
    reporter: &ProgressReporter,
) -> Result<Vec<SiteStatistics>, WorkflowError> {
    let index = SpamInfoFile::read_from_path(&config.info_path)?;
    info!(
        peaks = index.total_peaks(),
        frames = index.total_frames(),
        "parsed frame-inclusion report"
    );
    reporter.report(Progress::BatchStart {
        total_sites: index.total_peaks() as u64,
    });

    let width = site_suffix_width(index.total_peaks());
    let mut rng = rand::thread_rng();
    let mut rows = Vec::with_capacity(index.total_peaks());
    for site in 0..index.total_peaks() {
        reporter.report(Progress::SiteStart { site });
        let path = site_energy_path(&config.energy_prefix, site, width);

        let mut series = PairEnergyFile::read_from_path(&path)?;
        series.filter_frames(&index, site)?;
        let energies = series.total().ok_or_else(|| WorkflowError::MissingTerm {
            site,
            term: TOTAL_TERM,
            path: path.clone(),
        })?;

        let est = free_energy::estimate(energies, &config.params, &mut rng)
            .map_err(|source| WorkflowError::Kde { site, source })?;
        rows.push(SiteStatistics {
            site,
            dg: est.dg,
            dg_std: est.dg_std,
            dh: est.dh,
            dh_std: est.dh_std,
            ntds: est.ntds,
        });
        reporter.report(Progress::SiteFinish);
    }

    reporter.report(Progress::BatchFinish);
    info!(sites = rows.len(), "statistics pass complete");
    Ok(rows)
}

/// Site numbers in energy-log file names are zero-padded to
/// `floor(log10(total_peaks))` digits, matching the upstream energy-engine
/// driver's naming.
fn site_suffix_width(total_peaks: usize) -> usize {
    if total_peaks == 0 {
        0
    } else {
        (total_peaks as f64).log10() as usize
    }
}

fn site_energy_path(prefix: &Path, site: usize, width: usize) -> PathBuf {
    let mut name = prefix.as_os_str().to_os_string();
    name.push(format!(".{site:0width$}.out"));
    PathBuf::from(name)
}
