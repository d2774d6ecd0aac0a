//! In-memory mock filesystem and pre-built fixtures for testing collectors
//! without a real `/proc`.

mod filesystem;
mod scenarios;

pub use filesystem::MockFs;
