//! System-wide collector for `/proc` aggregate counters.

use crate::collector::procfs::parser::{
    CpuTimes, MemInfo, parse_cpu_times, parse_kernel_version, parse_mem_info,
    parse_pretty_os_name, parse_process_totals, parse_uptime_seconds,
};
use crate::collector::traits::FileSystem;
use std::path::Path;
use tracing::debug;

/// Collects system-wide metrics from `/proc` (and the os-release file).
///
/// Every accessor performs one full read-parse pass per call, with no
/// caching. A missing or unreadable source degrades to the zero or empty
/// value; the absence of a kernel interface must not crash monitoring.
pub struct SystemCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
    os_release_path: String,
}

impl<F: FileSystem> SystemCollector<F> {
    /// Creates a collector reading from `proc_path` (usually "/proc") and
    /// the default os-release location.
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self::with_os_release(fs, proc_path, "/etc/os-release")
    }

    /// Creates a collector with an explicit os-release path, for tests and
    /// non-standard roots.
    pub fn with_os_release(
        fs: F,
        proc_path: impl Into<String>,
        os_release_path: impl Into<String>,
    ) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            os_release_path: os_release_path.into(),
        }
    }

    fn read_file(&self, path: &str) -> Option<String> {
        match self.fs.read_to_string(Path::new(path)) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(path, error = %e, "source unreadable, degrading to defaults");
                None
            }
        }
    }

    /// Memory counters from `meminfo`. Missing file or keys yield zeros.
    pub fn memory(&self) -> MemInfo {
        let path = format!("{}/meminfo", self.proc_path);
        self.read_file(&path)
            .map(|c| parse_mem_info(&c))
            .unwrap_or_default()
    }

    /// Whole seconds since boot from `uptime`; 0 if unreadable.
    pub fn uptime_seconds(&self) -> u64 {
        let path = format!("{}/uptime", self.proc_path);
        self.read_file(&path)
            .map(|c| parse_uptime_seconds(&c))
            .unwrap_or(0)
    }

    /// Aggregate CPU time classes from the first line of `stat`.
    pub fn cpu_times(&self) -> CpuTimes {
        let path = format!("{}/stat", self.proc_path);
        self.read_file(&path)
            .map(|c| parse_cpu_times(&c))
            .unwrap_or_default()
    }

    /// `(total, running)` process counts from the `processes` and
    /// `procs_running` lines of `stat`.
    pub fn process_totals(&self) -> (u64, u64) {
        let path = format!("{}/stat", self.proc_path);
        self.read_file(&path)
            .map(|c| parse_process_totals(&c))
            .unwrap_or((0, 0))
    }

    /// Kernel release string from `version`; empty if unreadable.
    pub fn kernel_version(&self) -> String {
        let path = format!("{}/version", self.proc_path);
        self.read_file(&path)
            .map(|c| parse_kernel_version(&c))
            .unwrap_or_default()
    }

    /// `PRETTY_NAME` from the os-release file; empty if absent.
    pub fn os_name(&self) -> String {
        let path = self.os_release_path.clone();
        self.read_file(&path)
            .map(|c| parse_pretty_os_name(&c))
            .unwrap_or_default()
    }

    /// Enumerates pids: directory entries under the proc root whose names
    /// are purely numeric. Empty on enumeration failure.
    pub fn pids(&self) -> Vec<u32> {
        let entries = match self.fs.read_dir(Path::new(&self.proc_path)) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %self.proc_path, error = %e, "pid enumeration failed");
                return Vec::new();
            }
        };
        let mut pids: Vec<u32> = entries
            .iter()
            .filter_map(|entry| entry.file_name()?.to_str()?.parse().ok())
            .collect();
        pids.sort_unstable();
        pids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::MockFs;

    #[test]
    fn memory_from_typical_system() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        let info = collector.memory();
        assert_eq!(info.total_kb, 16384000);
        assert_eq!(info.available_kb, 12000000);
    }

    #[test]
    fn uptime_from_typical_system() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        assert_eq!(collector.uptime_seconds(), 12345);
    }

    #[test]
    fn cpu_times_from_typical_system() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        let times = collector.cpu_times();
        assert_eq!(times.user, 10000);
        assert_eq!(times.idle, 80000);
        assert_eq!(times.total_ticks(), 94800);
    }

    #[test]
    fn process_totals_from_typical_system() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        assert_eq!(collector.process_totals(), (10000, 2));
    }

    #[test]
    fn kernel_and_os_name() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        assert_eq!(collector.kernel_version(), "5.15.0-56-generic");
        assert_eq!(collector.os_name(), "Ubuntu 20.04 LTS");
    }

    #[test]
    fn pids_are_numeric_entries_only() {
        let collector = SystemCollector::new(MockFs::typical_system(), "/proc");
        assert_eq!(collector.pids(), vec![1, 1000, 1001]);
    }

    #[test]
    fn everything_degrades_on_empty_fs() {
        let collector = SystemCollector::new(MockFs::new(), "/proc");
        assert_eq!(collector.memory(), MemInfo::default());
        assert_eq!(collector.uptime_seconds(), 0);
        assert_eq!(collector.cpu_times(), CpuTimes::default());
        assert_eq!(collector.process_totals(), (0, 0));
        assert_eq!(collector.kernel_version(), "");
        assert_eq!(collector.os_name(), "");
        assert!(collector.pids().is_empty());
    }
}
