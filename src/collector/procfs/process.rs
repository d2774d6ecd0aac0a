//! Per-process collector for `/proc/[pid]/` counters.

use crate::collector::procfs::parser::{
    PidCounters, parse_cmdline, parse_pid_stat, parse_pid_status,
};
use crate::collector::traits::FileSystem;
use std::path::Path;
use tracing::debug;

/// Default clock ticks per second (USER_HZ) on Linux.
pub const DEFAULT_CLOCK_TICKS: u64 = 100;

/// Collects per-process metrics from `/proc/[pid]/` files.
///
/// The pid is externally supplied and may vanish between enumeration and
/// read; every accessor treats a vanished pid as "metrics unavailable" and
/// returns the zero or empty value. The clock-tick frequency is an explicit
/// constructor parameter, not a process-wide static.
pub struct ProcessCollector<F: FileSystem> {
    fs: F,
    proc_path: String,
    clock_ticks: u64,
}

impl<F: FileSystem> ProcessCollector<F> {
    /// Creates a collector reading from `proc_path` with the standard
    /// 100 Hz tick frequency.
    pub fn new(fs: F, proc_path: impl Into<String>) -> Self {
        Self::with_clock_ticks(fs, proc_path, DEFAULT_CLOCK_TICKS)
    }

    /// Creates a collector with an explicit tick frequency.
    pub fn with_clock_ticks(fs: F, proc_path: impl Into<String>, clock_ticks: u64) -> Self {
        Self {
            fs,
            proc_path: proc_path.into(),
            clock_ticks: clock_ticks.max(1),
        }
    }

    fn read_pid_file(&self, pid: u32, name: &str) -> Option<String> {
        let path = format!("{}/{}/{}", self.proc_path, pid, name);
        match self.fs.read_to_string(Path::new(&path)) {
            Ok(content) => Some(content),
            Err(e) => {
                debug!(pid, file = name, error = %e, "pid source unreadable");
                None
            }
        }
    }

    /// Scheduling counters from the per-pid `stat` record. The all-zero
    /// value means the process exited or the record was malformed.
    pub fn counters(&self, pid: u32) -> PidCounters {
        self.read_pid_file(pid, "stat")
            .map(|c| parse_pid_stat(&c))
            .unwrap_or_default()
    }

    /// Total ticks this process has been scheduled, children included.
    pub fn active_ticks(&self, pid: u32) -> u64 {
        self.counters(pid).active_ticks()
    }

    /// Resident memory in whole MB: the `VmRSS` kB reading
    /// truncating-divided by 1024. The whole-MB unit is part of the public
    /// contract; display layers do no further conversion.
    pub fn resident_memory_mb(&self, pid: u32) -> u64 {
        self.read_pid_file(pid, "status")
            .map(|c| parse_pid_status(&c).vm_rss_kb / 1024)
            .unwrap_or(0)
    }

    /// Real uid owning the process; 0 if unreadable.
    pub fn owner_uid(&self, pid: u32) -> u32 {
        self.read_pid_file(pid, "status")
            .map(|c| parse_pid_status(&c).uid)
            .unwrap_or(0)
    }

    /// Command line with NUL separators collapsed to spaces; empty for
    /// zombies, kernel threads, and vanished pids.
    pub fn command_line(&self, pid: u32) -> String {
        self.read_pid_file(pid, "cmdline")
            .map(|c| parse_cmdline(&c))
            .unwrap_or_default()
    }

    /// Boot-relative start timestamp of the process in whole seconds
    /// (`starttime / clock_ticks`). Used as the process age by the
    /// lifetime-average utilization below.
    pub fn start_time_seconds(&self, pid: u32) -> u64 {
        self.counters(pid).starttime / self.clock_ticks
    }

    /// Lifetime-average CPU utilization:
    /// `(active_ticks / clock_ticks) / start_time_seconds`.
    ///
    /// This is the average rate over the process's entire lifetime, not an
    /// instantaneous sample. A divisor of zero (process started within the
    /// last tick-second) is unmeasurable and yields 0.0 rather than
    /// infinity.
    pub fn cpu_utilization(&self, pid: u32) -> f64 {
        let counters = self.counters(pid);
        let age_seconds = counters.starttime / self.clock_ticks;
        if age_seconds == 0 {
            return 0.0;
        }
        (counters.active_ticks() as f64 / self.clock_ticks as f64) / age_seconds as f64
    }
}
