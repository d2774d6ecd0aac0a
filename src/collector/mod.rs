//! System metrics collection from the Linux `/proc` filesystem.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        Collectors                          │
//! │  ┌───────────────────┐  ┌─────────────────────────────┐    │
//! │  │ ProcessCollector  │  │      SystemCollector        │    │
//! │  │  - /proc/[pid]/*  │  │  - /proc/meminfo            │    │
//! │  └─────────┬─────────┘  │  - /proc/stat               │    │
//! │            │            │  - /proc/uptime, version    │    │
//! │  ┌─────────┴───────┐    └──────────────┬──────────────┘    │
//! │  │  UserDirectory  │                   │                   │
//! │  │  - /etc/passwd  ├─────────┬─────────┘                   │
//! │  └─────────────────┘         │                             │
//! │                       ┌──────▼──────┐                      │
//! │                       │  FileSystem │ (trait)              │
//! │                       └──────┬──────┘                      │
//! └──────────────────────────────┼─────────────────────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!         ┌──────▼──────┐                 ┌──────▼──────┐
//!         │   RealFs    │                 │   MockFs    │
//!         │ (Linux)     │                 │ (Testing)   │
//!         └─────────────┘                 └─────────────┘
//! ```
//!
//! Every accessor performs one full read-parse pass per call and degrades to
//! a zero or empty value when its source is missing or malformed. Absence of
//! a kernel interface must never crash monitoring.

pub mod mock;
pub mod procfs;
pub mod traits;
pub mod users;

pub use mock::MockFs;
pub use procfs::parser::{CpuTimes, MemInfo, PidCounters};
pub use procfs::{ProcessCollector, SystemCollector};
pub use traits::{FileSystem, RealFs};
pub use users::UserDirectory;
