//! Parsers and writers for the textual reports exchanged between SPAM stages.
//!
//! Three formats are consumed from the external tools: the peak-list file
//! ([`peaks`]), the frame-inclusion report ([`info`]), and the per-site
//! pair-interaction energy log ([`energy`]). One format is produced: the
//! site-statistics report ([`report`]).
//!
//! All whole-file reads and writes happen at stage boundaries; nothing here
//! streams incrementally across stages.

pub mod energy;
pub mod info;
pub mod peaks;
pub mod report;

/// Output-file policy threaded explicitly through every write call.
///
/// The "ask once, apply everywhere" user experience lives at the orchestration
/// layer: a driver asks the user once and passes the same options to each
/// writer, instead of flipping a hidden global switch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Allow replacing a destination file that already exists.
    pub overwrite: bool,
}

impl WriteOptions {
    pub fn overwrite() -> Self {
        Self { overwrite: true }
    }
}
