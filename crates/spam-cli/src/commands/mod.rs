pub mod check;
pub mod peaks;
pub mod stats;
