//! # SPAM++ Core Library
//!
//! A modernized library for the SPAM (Solvent Partitioning Analysis Method)
//! free-energy analysis of water sites from molecular-dynamics trajectories.
//!
//! ## Architectural Philosophy
//!
//! The library is designed with a strict three-layer architecture to ensure a clear
//! separation of concerns, making it modular, testable, and extensible.
//!
//! - **[`core`]: The Foundation.** Contains stateless data models (`Peak`,
//!   `FrameInclusionIndex`, `PairEnergySeries`) and the parsers/writers for the
//!   textual report formats exchanged with the external trajectory and energy
//!   engines.
//!
//! - **[`stats`]: The Numerical Core.** Non-parametric density estimation
//!   (`GaussianKde`) and the bootstrap-subsampled free-energy estimator that
//!   turns a filtered interaction-energy series into ΔG / ΔH / −TΔS statistics.
//!
//! - **[`workflows`]: The Public API.** The highest-level, user-facing layer.
//!   It ties `core` and `stats` together to execute complete procedures: the
//!   per-site batch statistics pass and the peak-file editing flow.

pub mod core;
pub mod stats;
pub mod workflows;
