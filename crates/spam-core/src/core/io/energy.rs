use crate::core::models::energy::{EnergySeriesError, PairEnergySeries};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Prefix of a block title line enumerating the energy term names.
const TITLE_PREFIX: &str = "ETITLE:";

#[derive(Debug, Error)]
pub enum EnergyFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Energy output file {} cannot be found", .0.display())]
    MissingFile(PathBuf),

    #[error("Bad energy output file: no '{TITLE_PREFIX}' title line found")]
    MissingTitle,

    #[error("Energy block starting on line {line} is truncated")]
    TruncatedBlock { line: usize },

    #[error("Data line {line} carries {found} values but the title declared {expected} terms")]
    ColumnCountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Parse error on line {line}: expected a number, got '{value}'")]
    InvalidNumber { line: usize, value: String },

    #[error(transparent)]
    Series(#[from] EnergySeriesError),
}

/// The pair-interaction energy log written by the external energy engine.
///
/// The log is a sequence of blocks, each introduced by a title line that
/// enumerates the term names, followed (one line later) by a data line with a
/// frame label and one value per term. The frame count is determined by
/// counting title lines in a first pass, so every term vector can be sized
/// up front before the value pass fills them.
pub struct PairEnergyFile;

impl PairEnergyFile {
    pub fn read_from(reader: &mut impl Read) -> Result<PairEnergySeries, EnergyFileError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::parse(&content)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<PairEnergySeries, EnergyFileError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(EnergyFileError::MissingFile(path.to_path_buf()));
        }
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    fn parse(content: &str) -> Result<PairEnergySeries, EnergyFileError> {
        // Pass 1: term names from the first title line, frame count from the
        // number of title lines.
        let mut term_names: Option<Vec<String>> = None;
        let mut n_frames = 0usize;
        for line in content.lines() {
            if line.starts_with(TITLE_PREFIX) {
                n_frames += 1;
                if term_names.is_none() {
                    term_names = Some(
                        line.split_whitespace()
                            .skip(1)
                            .map(String::from)
                            .collect(),
                    );
                }
            }
        }
        let term_names = term_names.ok_or(EnergyFileError::MissingTitle)?;

        // Pass 2: stream each block's data line into the fixed-length columns.
        let mut columns: Vec<Vec<f64>> = term_names
            .iter()
            .map(|_| Vec::with_capacity(n_frames))
            .collect();
        let mut lines = content.lines().enumerate();
        while let Some((line_num, line)) = lines.next() {
            if !line.starts_with(TITLE_PREFIX) {
                continue;
            }
            // One spacer line sits between the title and its data line.
            lines.next();
            let (data_num, data_line) = lines
                .next()
                .ok_or(EnergyFileError::TruncatedBlock { line: line_num + 1 })?;
            let words: Vec<&str> = data_line.split_whitespace().collect();
            if words.len() != term_names.len() + 1 {
                return Err(EnergyFileError::ColumnCountMismatch {
                    line: data_num + 1,
                    expected: term_names.len(),
                    found: words.len().saturating_sub(1),
                });
            }
            for (column, word) in columns.iter_mut().zip(words.iter().skip(1)) {
                let value: f64 = word.parse().map_err(|_| EnergyFileError::InvalidNumber {
                    line: data_num + 1,
                    value: word.to_string(),
                })?;
                column.push(value);
            }
        }

        let series = PairEnergySeries::from_terms(
            term_names.into_iter().zip(columns).collect(),
        )?;
        Ok(series)
    }
}
