use crate::error::{CliError, Result};
use serde::Deserialize;
use spampp::stats::free_energy::{self, FreeEnergyParams};
use std::path::Path;
use tracing::debug;

/// Optional TOML settings file for the `stats` command.
///
/// ```toml
/// [sampling]
/// sample-size = 1000
/// subsamples = 20
///
/// [reference]
/// dg-bulk = -30.3
/// dh-bulk = -22.2
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct StatsFileConfig {
    pub sampling: SamplingSection,
    pub reference: ReferenceSection,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields, default, rename_all = "kebab-case")]
pub struct SamplingSection {
    /// Points per bootstrap subsample; 0 means the full series length.
    pub sample_size: usize,
    /// Number of bootstrap subsamples; 1 disables resampling.
    pub subsamples: usize,
}

impl Default for SamplingSection {
    fn default() -> Self {
        Self {
            sample_size: 0,
            subsamples: 1,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(deny_unknown_fields, default, rename_all = "kebab-case")]
pub struct ReferenceSection {
    /// Free energy of bulk water; depends on the water model.
    pub dg_bulk: f64,
    /// Enthalpy of bulk water; depends on the water model.
    pub dh_bulk: f64,
}

impl Default for ReferenceSection {
    fn default() -> Self {
        Self {
            dg_bulk: free_energy::DG_BULK,
            dh_bulk: free_energy::DH_BULK,
        }
    }
}

impl StatsFileConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        debug!(?config, "loaded stats settings file");
        Ok(config)
    }

    /// Folds the file settings and any CLI overrides into estimator params.
    pub fn to_params(
        &self,
        sample_size: Option<usize>,
        subsamples: Option<usize>,
    ) -> FreeEnergyParams {
        FreeEnergyParams {
            sample_size: sample_size.unwrap_or(self.sampling.sample_size),
            subsamples: subsamples.unwrap_or(self.sampling.subsamples),
            dg_bulk: self.reference.dg_bulk,
            dh_bulk: self.reference.dh_bulk,
        }
    }
}
