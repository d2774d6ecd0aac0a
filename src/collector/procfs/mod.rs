//! Parsers and collectors for the Linux `/proc` virtual filesystem.

pub mod parser;
pub mod process;
pub mod system;

pub use process::ProcessCollector;
pub use system::SystemCollector;
