use crate::core::models::inclusion::{FrameInclusionIndex, InclusionError};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum InfoError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("SPAM info file {} cannot be found", .0.display())]
    MissingFile(PathBuf),

    #[error("SPAM info file is corrupt: no '# There are P density peaks and F frames' header")]
    MissingHeader,

    #[error("Parse error on line {line}: expected an integer, got '{value}'")]
    InvalidInteger { line: usize, value: String },

    #[error("Line {line} declares omitted frames for peak {site}, but the header declared only {total_peaks} peaks")]
    PeakOutOfRange {
        line: usize,
        site: usize,
        total_peaks: usize,
    },

    #[error(transparent)]
    Inclusion(#[from] InclusionError),
}

/// The frame-inclusion report written by the trajectory-reordering step.
///
/// ```text
/// # There are <peaks> density peaks and <frames> frames
/// # Peak <k> has <n> omitted frames
/// <n whitespace-separated integers, possibly signed>
///
/// ...
/// ```
///
/// Omitted frame indices may carry a sign convention from the upstream
/// producer; their absolute value is taken. Lines that match neither header
/// are skipped with a logged warning.
pub struct SpamInfoFile;

impl SpamInfoFile {
    pub fn read_from(reader: &mut impl BufRead) -> Result<FrameInclusionIndex, InfoError> {
        let mut header_seen = false;
        let mut total_frames = 0usize;
        let mut omitted: Vec<Vec<usize>> = Vec::new();
        let mut current_site: Option<usize> = None;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();

            if !header_seen {
                if trimmed.is_empty() {
                    continue;
                }
                let (peaks, frames) =
                    parse_run_header(trimmed).ok_or(InfoError::MissingHeader)?;
                total_frames = frames;
                omitted = vec![Vec::new(); peaks];
                header_seen = true;
                continue;
            }

            if trimmed.is_empty() {
                current_site = None;
                continue;
            }

            if let Some(site) = parse_peak_header(trimmed) {
                if site >= omitted.len() {
                    return Err(InfoError::PeakOutOfRange {
                        line: line_num,
                        site,
                        total_peaks: omitted.len(),
                    });
                }
                current_site = Some(site);
                continue;
            }

            match current_site {
                Some(site) => {
                    for token in trimmed.split_whitespace() {
                        let value: i64 =
                            token.parse().map_err(|_| InfoError::InvalidInteger {
                                line: line_num,
                                value: token.to_string(),
                            })?;
                        omitted[site].push(value.unsigned_abs() as usize);
                    }
                }
                None => {
                    warn!(line = line_num, "skipping unrecognized line in SPAM info file");
                }
            }
        }

        if !header_seen {
            return Err(InfoError::MissingHeader);
        }
        Ok(FrameInclusionIndex::from_parts(total_frames, omitted)?)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<FrameInclusionIndex, InfoError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(InfoError::MissingFile(path.to_path_buf()));
        }
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_from(&mut reader)
    }
}

/// `# There are <peaks> density peaks and <frames> frames`
fn parse_run_header(line: &str) -> Option<(usize, usize)> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["#", "There", "are", peaks, "density", "peaks", "and", frames, "frames"] => {
            Some((peaks.parse().ok()?, frames.parse().ok()?))
        }
        _ => None,
    }
}

/// `# Peak <k> has <n> omitted frames`
///
/// The declared count is validated as an integer but otherwise unused; the
/// block is consumed until the next blank line regardless.
fn parse_peak_header(line: &str) -> Option<usize> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["#", "Peak", site, "has", count, "omitted", "frames"] => {
            count.parse::<usize>().ok()?;
            site.parse().ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
# There are 2 density peaks and 10 frames
# Peak 0 has 3 omitted frames
-2 5
7

# Peak 1 has 0 omitted frames

";

    fn read(content: &str) -> Result<FrameInclusionIndex, InfoError> {
        SpamInfoFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn parses_peak_and_frame_counts_from_the_header() {
        let index = read(SAMPLE).unwrap();
        assert_eq!(index.total_peaks(), 2);
        assert_eq!(index.total_frames(), 10);
    }

    #[test]
    fn accumulates_omitted_frames_across_block_lines() {
        let index = read(SAMPLE).unwrap();
        let excluded: Vec<usize> = index.excluded_frames(0).unwrap().collect();
        assert_eq!(excluded, vec![2, 5, 7]);
        assert_eq!(index.included_count(0), Ok(7));
        assert_eq!(index.excluded_count(1), Ok(0));
    }

    #[test]
    fn signed_frame_indices_are_taken_as_absolute_values() {
        let index = read(SAMPLE).unwrap();
        let included: Vec<usize> = index.included_frames(0).unwrap().collect();
        assert_eq!(included, vec![0, 1, 3, 4, 6, 8, 9]);
    }

    #[test]
    fn missing_header_is_a_corrupt_file() {
        let err = read("# Peak 0 has 1 omitted frames\n3\n").unwrap_err();
        assert!(matches!(err, InfoError::MissingHeader));
    }

    #[test]
    fn empty_input_is_a_corrupt_file() {
        let err = read("").unwrap_err();
        assert!(matches!(err, InfoError::MissingHeader));
    }

    #[test]
    fn a_peak_index_beyond_the_declared_count_is_rejected() {
        let content = "\
# There are 1 density peaks and 10 frames
# Peak 4 has 1 omitted frames
3
";
        let err = read(content).unwrap_err();
        assert!(matches!(
            err,
            InfoError::PeakOutOfRange {
                site: 4,
                total_peaks: 1,
                ..
            }
        ));
    }

    #[test]
    fn garbage_in_an_omission_block_is_a_parse_error() {
        let content = "\
# There are 1 density peaks and 10 frames
# Peak 0 has 2 omitted frames
3 banana
";
        let err = read(content).unwrap_err();
        assert!(matches!(
            err,
            InfoError::InvalidInteger { line: 3, .. }
        ));
    }

    #[test]
    fn missing_file_is_reported_as_such() {
        let err = SpamInfoFile::read_from_path("/no/such/spam.info").unwrap_err();
        assert!(matches!(err, InfoError::MissingFile(_)));
    }
}
