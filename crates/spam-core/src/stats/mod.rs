//! # Statistics Module
//!
//! The numerical core of SPAM++: non-parametric density estimation and the
//! bootstrap-subsampled free-energy estimator.
//!
//! - [`kde`] - One-dimensional Gaussian kernel density estimation with the
//!   covariance-factor bandwidth rule, evaluation, and resampling
//! - [`free_energy`] - Reduction of one site's filtered interaction-energy
//!   series into ΔG / ΔH / −TΔS statistics with bootstrap uncertainties

pub mod free_energy;
pub mod kde;
