use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InclusionError {
    #[error("Site index {site} is out of range; the index covers {total_peaks} peaks")]
    SiteOutOfRange { site: usize, total_peaks: usize },

    #[error(
        "Omitted frame {frame} for site {site} is outside the trajectory range [0, {total_frames})"
    )]
    FrameOutOfRange {
        site: usize,
        frame: usize,
        total_frames: usize,
    },
}

/// Per-site bookkeeping of which trajectory frames are valid.
///
/// One instance is produced per trajectory-reordering run and is read-only
/// afterwards, so it can be shared across the sequential (or, if an embedder
/// parallelizes by site, concurrent) per-site filtering calls. Every iterator
/// handed out keeps its own cursor state and never mutates the index.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInclusionIndex {
    total_frames: usize,
    omitted: Vec<Vec<usize>>,
}

impl FrameInclusionIndex {
    /// Builds an index from raw per-site omission lists.
    ///
    /// Each list is sorted ascending and deduplicated (the merge walk in
    /// [`included_frames`](Self::included_frames) depends on both) and every
    /// frame index is validated against `[0, total_frames)`.
    pub fn from_parts(
        total_frames: usize,
        mut omitted: Vec<Vec<usize>>,
    ) -> Result<Self, InclusionError> {
        for (site, frames) in omitted.iter_mut().enumerate() {
            frames.sort_unstable();
            frames.dedup();
            if let Some(&frame) = frames.last() {
                if frame >= total_frames {
                    return Err(InclusionError::FrameOutOfRange {
                        site,
                        frame,
                        total_frames,
                    });
                }
            }
        }
        Ok(Self {
            total_frames,
            omitted,
        })
    }

    /// Number of density peaks (sites) covered by this index.
    pub fn total_peaks(&self) -> usize {
        self.omitted.len()
    }

    /// Number of frames in the source trajectory.
    pub fn total_frames(&self) -> usize {
        self.total_frames
    }

    fn site(&self, site: usize) -> Result<&[usize], InclusionError> {
        self.omitted
            .get(site)
            .map(Vec::as_slice)
            .ok_or(InclusionError::SiteOutOfRange {
                site,
                total_peaks: self.omitted.len(),
            })
    }

    /// Number of frames that count towards the site's statistics. O(1).
    pub fn included_count(&self, site: usize) -> Result<usize, InclusionError> {
        Ok(self.total_frames - self.site(site)?.len())
    }

    /// Number of frames omitted for the site. O(1).
    pub fn excluded_count(&self, site: usize) -> Result<usize, InclusionError> {
        Ok(self.site(site)?.len())
    }

    /// Iterates over the omitted frame indices for a site, in stored order.
    pub fn excluded_frames(
        &self,
        site: usize,
    ) -> Result<impl Iterator<Item = usize> + '_, InclusionError> {
        Ok(self.site(site)?.iter().copied())
    }

    /// Iterates over every frame index in `[0, total_frames)` that is not
    /// omitted for the site, in ascending order.
    ///
    /// The full complement is never materialized: the iterator walks a cursor
    /// over the sorted omitted list in lock-step with the frame counter, an
    /// O(total_frames) merge.
    pub fn included_frames(&self, site: usize) -> Result<IncludedFrames<'_>, InclusionError> {
        Ok(IncludedFrames {
            omitted: self.site(site)?,
            cursor: 0,
            frame: 0,
            total_frames: self.total_frames,
        })
    }
}

/// Lazy merge-walk over the included frames of one site.
///
/// Cursor state is local to the iterator, so a fresh call to
/// [`FrameInclusionIndex::included_frames`] always restarts from frame zero.
#[derive(Debug, Clone)]
pub struct IncludedFrames<'a> {
    omitted: &'a [usize],
    cursor: usize,
    frame: usize,
    total_frames: usize,
}

impl Iterator for IncludedFrames<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.frame < self.total_frames {
            let frame = self.frame;
            self.frame += 1;
            if self.cursor < self.omitted.len() && self.omitted[self.cursor] == frame {
                self.cursor += 1;
                continue;
            }
            return Some(frame);
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining =
            (self.total_frames - self.frame) - (self.omitted.len() - self.cursor);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IncludedFrames<'_> {}
