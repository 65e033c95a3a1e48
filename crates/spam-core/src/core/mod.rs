//! # Core Module
//!
//! Fundamental data structures and file formats for the SPAM analysis pipeline.
//!
//! ## Overview
//!
//! The core module holds everything the statistics layer consumes: the density
//! peak model, the per-site frame-inclusion bookkeeping produced by the
//! trajectory-reordering step, and the per-site interaction-energy series
//! produced by the external energy engine.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - Peaks, frame-inclusion index, energy series
//! - **File I/O** ([`io`]) - Parsers and writers for the textual reports
//!   exchanged with the external trajectory and energy tools

pub mod io;
pub mod models;
