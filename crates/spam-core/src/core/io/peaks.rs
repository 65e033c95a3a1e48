use crate::core::io::WriteOptions;
use crate::core::models::peak::{Peak, PeakCollection};
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PeakFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Peak file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("{} exists. Not overwriting", .0.display())]
    FileExists(PathBuf),

    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PeakParseErrorKind,
    },

    #[error("Unexpected number of peaks. Found {found}, expected {expected}")]
    CountMismatch { expected: usize, found: usize },

    #[error("There are no peaks left to write")]
    EmptyPeakSet,
}

#[derive(Debug, Error)]
pub enum PeakParseErrorKind {
    #[error("Invalid peak count (value: '{value}')")]
    InvalidCount { value: String },

    #[error("Invalid float (value: '{value}')")]
    InvalidFloat { value: String },

    #[error("Peak record needs a tag and at least three coordinates")]
    TooFewFields,
}

/// The peak-list file: a count line, a blank line, then one `C x y z density`
/// record per peak. The tag literal is fixed to `C` (upstream encodes peaks as
/// carbon atoms for visualization compatibility) and ignored on read.
pub struct PeakFile;

impl PeakFile {
    pub fn read_from(reader: &mut impl BufRead) -> Result<PeakCollection, PeakFileError> {
        let mut lines = reader.lines().enumerate();

        let declared = match lines.next() {
            Some((line_num, line_res)) => {
                let line = line_res?;
                let value = line.trim();
                value
                    .parse::<usize>()
                    .map_err(|_| PeakFileError::Parse {
                        line: line_num + 1,
                        kind: PeakParseErrorKind::InvalidCount {
                            value: value.to_string(),
                        },
                    })?
            }
            None => {
                return Err(PeakFileError::Parse {
                    line: 1,
                    kind: PeakParseErrorKind::InvalidCount {
                        value: String::new(),
                    },
                });
            }
        };
        // Separator line between the count and the records.
        lines.next().map(|(_, line_res)| line_res).transpose()?;

        let mut peaks = PeakCollection::new();
        for (line_num, line_res) in lines {
            let line = line_res?;
            let line_num = line_num + 1;
            if line.trim().is_empty() {
                continue;
            }
            // First token is the atom tag; it carries no information.
            let words: Vec<&str> = line.split_whitespace().skip(1).collect();
            if words.len() < 3 {
                return Err(PeakFileError::Parse {
                    line: line_num,
                    kind: PeakParseErrorKind::TooFewFields,
                });
            }
            let mut floats = [0.0f64; 4];
            for (slot, word) in floats.iter_mut().zip(&words) {
                *slot = word.parse().map_err(|_| PeakFileError::Parse {
                    line: line_num,
                    kind: PeakParseErrorKind::InvalidFloat {
                        value: word.to_string(),
                    },
                })?;
            }
            let position = Point3::new(floats[0], floats[1], floats[2]);
            let peak = if words.len() >= 4 {
                Peak::with_density(position, floats[3])
            } else {
                Peak::new(position)
            };
            peaks.push(peak);
        }

        if peaks.len() != declared {
            return Err(PeakFileError::CountMismatch {
                expected: declared,
                found: peaks.len(),
            });
        }
        Ok(peaks)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<PeakCollection, PeakFileError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PeakFileError::MissingFile(path.to_path_buf()));
        }
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }

    pub fn write_to(
        peaks: &PeakCollection,
        writer: &mut impl Write,
    ) -> Result<(), PeakFileError> {
        if peaks.is_empty() {
            return Err(PeakFileError::EmptyPeakSet);
        }
        writeln!(writer, "{}", peaks.len())?;
        writeln!(writer)?;
        for peak in peaks {
            let p = peak.position();
            writeln!(
                writer,
                "C {:.6} {:.6} {:.6} {:.6}",
                p.x,
                p.y,
                p.z,
                peak.density()
            )?;
        }
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(
        peaks: &PeakCollection,
        path: P,
        options: WriteOptions,
    ) -> Result<(), PeakFileError> {
        let path = path.as_ref();
        if !options.overwrite && path.exists() {
            return Err(PeakFileError::FileExists(path.to_path_buf()));
        }
        let mut writer = BufWriter::new(File::create(path)?);
        Self::write_to(peaks, &mut writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "3\n\nC 1.0 2.0 3.0 0.5\nC 4.0 5.0 6.0 0.9\nC 7.0 8.0 9.0 0.3\n";

    fn read(content: &str) -> Result<PeakCollection, PeakFileError> {
        PeakFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_a_well_formed_peak_file() {
        let peaks = read(SAMPLE).unwrap();
        assert_eq!(peaks.len(), 3);
        assert_eq!(peaks.get(1).unwrap().density(), 0.9);
        assert_eq!(peaks.get(2).unwrap().position(), Point3::new(7.0, 8.0, 9.0));
    }

    #[test]
    fn tag_token_is_ignored() {
        let peaks = read("1\n\nX 1.0 2.0 3.0 0.5\n").unwrap();
        assert_eq!(peaks.get(0).unwrap().density(), 0.5);
    }

    #[test]
    fn record_without_density_yields_an_uninitialized_peak() {
        let peaks = read("1\n\nC 1.0 2.0 3.0\n").unwrap();
        assert!(!peaks.get(0).unwrap().has_density());
    }

    #[test]
    fn declared_count_mismatch_is_an_error() {
        let err = read("4\n\nC 1.0 2.0 3.0 0.5\n").unwrap_err();
        assert!(matches!(
            err,
            PeakFileError::CountMismatch {
                expected: 4,
                found: 1
            }
        ));
    }

    #[test]
    fn garbage_count_line_is_a_parse_error() {
        let err = read("lots\n\nC 1.0 2.0 3.0 0.5\n").unwrap_err();
        assert!(matches!(err, PeakFileError::Parse { line: 1, .. }));
    }

    #[test]
    fn round_trip_preserves_peaks_to_formatting_precision() {
        let peaks = read(SAMPLE).unwrap();
        let mut buffer = Vec::new();
        PeakFile::write_to(&peaks, &mut buffer).unwrap();
        let again = read(std::str::from_utf8(&buffer).unwrap()).unwrap();
        assert_eq!(again.len(), peaks.len());
        for (a, b) in again.iter().zip(peaks.iter()) {
            assert!((a.position() - b.position()).norm() < 1e-6);
            assert!((a.density() - b.density()).abs() < 1e-6);
        }
    }

    #[test]
    fn writing_an_empty_collection_fails() {
        let mut buffer = Vec::new();
        let err = PeakFile::write_to(&PeakCollection::new(), &mut buffer).unwrap_err();
        assert!(matches!(err, PeakFileError::EmptyPeakSet));
    }

    #[test]
    fn write_to_path_honors_the_overwrite_switch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("peaks.xyz");
        let peaks = read(SAMPLE).unwrap();

        PeakFile::write_to_path(&peaks, &path, WriteOptions::default()).unwrap();
        let err = PeakFile::write_to_path(&peaks, &path, WriteOptions::default()).unwrap_err();
        assert!(matches!(err, PeakFileError::FileExists(_)));
        PeakFile::write_to_path(&peaks, &path, WriteOptions::overwrite()).unwrap();
    }

    #[test]
    fn missing_file_is_reported_as_such() {
        let err = PeakFile::read_from_path("/no/such/peaks.xyz").unwrap_err();
        assert!(matches!(err, PeakFileError::MissingFile(_)));
    }
}
