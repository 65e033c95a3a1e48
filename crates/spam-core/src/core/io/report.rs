use crate::core::io::WriteOptions;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{} exists. Not overwriting", .0.display())]
    FileExists(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Free-energy statistics for one water site, in the units of the input
/// energy series (kcal/mol for the stock pipeline).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiteStatistics {
    pub site: usize,
    pub dg: f64,
    pub dg_std: f64,
    pub dh: f64,
    pub dh_std: f64,
    pub ntds: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Fixed-width columns matching the historical SPAM output.
    #[default]
    Text,
    Csv,
}

/// Writer for the aggregated site-statistics report.
pub struct StatsReport;

impl StatsReport {
    pub fn write_text_to(
        rows: &[SiteStatistics],
        writer: &mut impl Write,
    ) -> Result<(), ReportError> {
        writeln!(
            writer,
            "# SITE {:>14} {:>14} {:>14} {:>14} {:>14}",
            "<G>", "Std. Dev. G", "<H>", "Std. Dev. H", "-T<S>"
        )?;
        for row in rows {
            writeln!(
                writer,
                "{:6} {:14.7} {:14.7} {:14.7} {:14.7} {:14.7}",
                row.site, row.dg, row.dg_std, row.dh, row.dh_std, row.ntds
            )?;
        }
        Ok(())
    }

    pub fn write_csv_to(
        rows: &[SiteStatistics],
        writer: &mut impl Write,
    ) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(
        rows: &[SiteStatistics],
        path: P,
        format: ReportFormat,
        options: WriteOptions,
    ) -> Result<(), ReportError> {
        let path = path.as_ref();
        if !options.overwrite && path.exists() {
            return Err(ReportError::FileExists(path.to_path_buf()));
        }
        let mut writer = BufWriter::new(File::create(path)?);
        match format {
            ReportFormat::Text => Self::write_text_to(rows, &mut writer),
            ReportFormat::Csv => Self::write_csv_to(rows, &mut writer),
        }
    }
}
