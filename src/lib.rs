//! procmon — Linux `/proc` telemetry core.
//!
//! Reads kernel-exposed textual counters (memory, CPU time classes, uptime,
//! per-process scheduling stats) and turns them into typed values for a
//! monitoring front end.
//!
//! Provides:
//! - `collector` — `/proc` parsers and collectors, filesystem abstraction,
//!   in-memory mock filesystem for tests
//! - `monitor` — aggregate CPU meter, per-process snapshots, and the
//!   `SystemMonitor` facade that builds the filtered process table
//! - `fmt` — pure formatting helpers (elapsed time)
//!
//! All collectors are generic over [`collector::FileSystem`], so the whole
//! pipeline runs unchanged against [`collector::MockFs`] fixtures.

pub mod collector;
pub mod fmt;
pub mod monitor;
