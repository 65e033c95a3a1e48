//! # Core Models Module
//!
//! Data structures representing the SPAM analysis state between pipeline stages.
//!
//! ## Key Components
//!
//! - [`peak`] - Water-density peaks ("hot spots") and ordered peak collections
//! - [`inclusion`] - Per-site bookkeeping of which trajectory frames are valid
//! - [`energy`] - Per-site interaction-energy time series and frame filtering
//!
//! Site index `i` in [`inclusion::FrameInclusionIndex`] and
//! [`energy::PairEnergySeries`] corresponds to the `i`-th entry of the
//! [`peak::PeakCollection`] used to generate the reordered trajectory.

pub mod energy;
pub mod inclusion;
pub mod peak;
