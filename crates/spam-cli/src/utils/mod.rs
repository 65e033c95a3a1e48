pub mod progress;
pub mod which;
