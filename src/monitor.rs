//! Aggregate CPU meter, per-process snapshots, and the `SystemMonitor`
//! facade consumed by display layers.

use crate::collector::procfs::process::DEFAULT_CLOCK_TICKS;
use crate::collector::{FileSystem, ProcessCollector, SystemCollector, UserDirectory};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Source locations and constants for a monitor instance.
///
/// The proc root, account listing, and clock-tick frequency are explicit
/// configuration rather than process-wide statics, so tests can point a
/// monitor at a fake root.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub proc_path: String,
    pub os_release_path: String,
    pub passwd_path: String,
    /// Clock ticks per second (USER_HZ).
    pub clock_ticks: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            proc_path: "/proc".to_string(),
            os_release_path: "/etc/os-release".to_string(),
            passwd_path: "/etc/passwd".to_string(),
            clock_ticks: DEFAULT_CLOCK_TICKS,
        }
    }
}

/// Aggregate CPU utilization derived from one read of the time classes.
///
/// The ratio is `busy / total` where `total` sums the eight accounted
/// classes and `busy` is total minus idle and iowait.
pub struct CpuMeter<F: FileSystem> {
    source: SystemCollector<F>,
}

impl<F: FileSystem> CpuMeter<F> {
    pub fn new(source: SystemCollector<F>) -> Self {
        Self { source }
    }

    /// Busy fraction of all CPU time since boot, in `0.0..=1.0`.
    ///
    /// Both numerator and denominator come from the same read, so the
    /// ratio is internally consistent. Returns 0.0 when the counters are
    /// unavailable (total of zero), never divides by zero.
    pub fn utilization(&self) -> f64 {
        let times = self.source.cpu_times();
        let total = times.total_ticks();
        if total == 0 {
            return 0.0;
        }
        times.busy_ticks() as f64 / total as f64
    }
}

/// Fully-resolved metrics for one process at one point in time.
///
/// Rebuilt from scratch on every [`SystemMonitor::refresh`], never retained
/// or diffed against a previous cycle.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ProcessSnapshot {
    pub pid: u32,
    /// Lifetime-average CPU utilization; may transiently exceed 1.0 for
    /// multi-threaded processes.
    pub cpu_utilization: f64,
    /// Resident memory in whole MB, truncated from the kB reading.
    pub ram_mb: u64,
    /// Owning user name; empty when the uid has no account record.
    pub user: String,
    /// Boot-relative start timestamp in seconds.
    pub age_seconds: u64,
    /// Command line; empty for zombies and kernel threads.
    pub command: String,
}

impl ProcessSnapshot {
    /// Comparator ordering higher CPU utilization first, for consumers
    /// that sort the table (`list.sort_by(ProcessSnapshot::by_cpu_desc)`).
    pub fn by_cpu_desc(a: &Self, b: &Self) -> Ordering {
        b.cpu_utilization.total_cmp(&a.cpu_utilization)
    }
}

/// Facade over the collectors: one queryable view of the whole system.
///
/// Owns the current process table, rebuilt (not incrementally mutated) by
/// [`refresh`](Self::refresh); every other accessor re-reads its source on
/// each call with no memoization.
pub struct SystemMonitor<F: FileSystem> {
    system: SystemCollector<F>,
    process: ProcessCollector<F>,
    users: UserDirectory<F>,
    cpu: CpuMeter<F>,
    processes: Vec<ProcessSnapshot>,
}

impl<F: FileSystem + Clone> SystemMonitor<F> {
    /// Creates a monitor with the default Linux paths.
    pub fn new(fs: F) -> Self {
        Self::with_config(fs, MonitorConfig::default())
    }

    /// Creates a monitor reading from explicit locations.
    pub fn with_config(fs: F, config: MonitorConfig) -> Self {
        let system = SystemCollector::with_os_release(
            fs.clone(),
            config.proc_path.clone(),
            config.os_release_path.clone(),
        );
        let cpu = CpuMeter::new(SystemCollector::with_os_release(
            fs.clone(),
            config.proc_path.clone(),
            config.os_release_path,
        ));
        let process =
            ProcessCollector::with_clock_ticks(fs.clone(), config.proc_path, config.clock_ticks);
        let users = UserDirectory::new(fs, config.passwd_path);
        Self {
            system,
            process,
            users,
            cpu,
            processes: Vec::new(),
        }
    }

    /// Rebuilds the process table: enumerate pids, read each one's
    /// counters, keep only processes with resident memory and nonzero
    /// measured utilization.
    ///
    /// A pid that vanishes between enumeration and read produces zero
    /// counters and falls out through the same filter; the refresh itself
    /// never fails. The kept list is in pid-enumeration order; consumers
    /// sort with [`ProcessSnapshot::by_cpu_desc`].
    pub fn refresh(&mut self) {
        self.processes.clear();

        for pid in self.system.pids() {
            let ram_mb = self.process.resident_memory_mb(pid);
            let cpu_utilization = self.process.cpu_utilization(pid);
            if ram_mb == 0 || cpu_utilization <= 0.0 {
                continue;
            }
            self.processes.push(ProcessSnapshot {
                pid,
                cpu_utilization,
                ram_mb,
                user: self.users.user_name(self.process.owner_uid(pid)),
                age_seconds: self.process.start_time_seconds(pid),
                command: self.process.command_line(pid),
            });
        }
    }

    /// Current process table, as built by the last [`refresh`](Self::refresh).
    pub fn processes(&self) -> &[ProcessSnapshot] {
        &self.processes
    }

    /// Aggregate CPU busy fraction.
    pub fn cpu_utilization(&self) -> f64 {
        self.cpu.utilization()
    }

    /// Fraction of total memory in use; 0.0 when the total is unknown.
    pub fn memory_utilization(&self) -> f64 {
        self.system.memory().utilization()
    }

    /// Kernel release string.
    pub fn kernel(&self) -> String {
        self.system.kernel_version()
    }

    /// Pretty OS name from os-release.
    pub fn operating_system(&self) -> String {
        self.system.os_name()
    }

    /// Seconds since boot.
    pub fn uptime_seconds(&self) -> u64 {
        self.system.uptime_seconds()
    }

    /// Total processes forked since boot.
    pub fn total_processes(&self) -> u64 {
        self.system.process_totals().0
    }

    /// Processes currently in the run queue.
    pub fn running_processes(&self) -> u64 {
        self.system.process_totals().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::MockFs;

    #[test]
    fn cpu_meter_busy_fraction() {
        let meter = CpuMeter::new(SystemCollector::new(MockFs::typical_system(), "/proc"));
        // 94800 total ticks, 81000 idle+iowait.
        let expected = (94800.0 - 81000.0) / 94800.0;
        assert!((meter.utilization() - expected).abs() < 1e-9);
    }

    #[test]
    fn cpu_meter_degenerate_counters() {
        let meter = CpuMeter::new(SystemCollector::new(MockFs::new(), "/proc"));
        assert_eq!(meter.utilization(), 0.0);
    }

    #[test]
    fn refresh_keeps_only_measurable_processes() {
        let mut monitor = SystemMonitor::new(MockFs::typical_system());
        monitor.refresh();

        // Enumeration order with the kworker (no resident memory) dropped.
        let pids: Vec<u32> = monitor.processes().iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![1, 1000]);
    }

    #[test]
    fn refresh_resolves_users_and_commands() {
        let mut monitor = SystemMonitor::new(MockFs::typical_system());
        monitor.refresh();

        let init = &monitor.processes()[0];
        assert_eq!(init.user, "root");
        assert_eq!(init.command, "/sbin/init splash");
        assert_eq!(init.ram_mb, 10);
        assert_eq!(init.age_seconds, 1);
        assert!((init.cpu_utilization - 0.5).abs() < 1e-9);

        let bash = &monitor.processes()[1];
        assert_eq!(bash.user, "user");
        assert_eq!(bash.command, "/bin/bash --login");
        assert_eq!(bash.ram_mb, 7);
        assert_eq!(bash.age_seconds, 900);
    }

    #[test]
    fn refresh_filter_end_to_end() {
        let mut monitor = SystemMonitor::new(MockFs::mixed_visibility());
        monitor.refresh();

        // pid 100 has no resident memory, pid 200 no measured utilization.
        assert_eq!(monitor.processes().len(), 1);
        let kept = &monitor.processes()[0];
        assert_eq!(kept.pid, 300);
        assert_eq!(kept.ram_mb, 200);
        assert!((kept.cpu_utilization - 50.0 / 300.0).abs() < 1e-9);
    }

    #[test]
    fn refresh_survives_vanished_pid() {
        let mut fs = MockFs::typical_system();
        // Directory still enumerates, files are gone: the exit race.
        fs.remove_process_files(1000);

        let mut monitor = SystemMonitor::new(fs);
        monitor.refresh();

        let pids: Vec<u32> = monitor.processes().iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![1]);
    }

    #[test]
    fn refresh_rebuilds_from_scratch() {
        let mut monitor = SystemMonitor::new(MockFs::typical_system());
        monitor.refresh();
        monitor.refresh();
        assert_eq!(monitor.processes().len(), 2);
    }

    #[test]
    fn comparator_orders_by_cpu_descending() {
        let mut monitor = SystemMonitor::new(MockFs::typical_system());
        monitor.refresh();

        let mut sorted = monitor.processes().to_vec();
        sorted.sort_by(ProcessSnapshot::by_cpu_desc);
        assert_eq!(sorted[0].pid, 1); // util 0.5 ahead of bash's lifetime average
        assert!(sorted[0].cpu_utilization >= sorted[1].cpu_utilization);
    }

    #[test]
    fn pass_through_accessors() {
        let monitor = SystemMonitor::new(MockFs::typical_system());

        assert_eq!(monitor.uptime_seconds(), 12345);
        assert_eq!(monitor.total_processes(), 10000);
        assert_eq!(monitor.running_processes(), 2);
        assert_eq!(monitor.kernel(), "5.15.0-56-generic");
        assert_eq!(monitor.operating_system(), "Ubuntu 20.04 LTS");

        let expected_mem = (16384000.0 - 12000000.0) / 16384000.0;
        assert!((monitor.memory_utilization() - expected_mem).abs() < 1e-9);
    }

    #[test]
    fn accessors_degrade_on_empty_system() {
        let mut monitor = SystemMonitor::new(MockFs::new());
        monitor.refresh();

        assert!(monitor.processes().is_empty());
        assert_eq!(monitor.uptime_seconds(), 0);
        assert_eq!(monitor.memory_utilization(), 0.0);
        assert_eq!(monitor.kernel(), "");
    }

    #[test]
    fn config_points_at_alternate_roots() {
        let mut fs = MockFs::new();
        fs.add_file("/fake/uptime", "42.00 10.00\n");
        fs.add_dir("/fake");

        let monitor = SystemMonitor::with_config(
            fs,
            MonitorConfig {
                proc_path: "/fake".to_string(),
                ..MonitorConfig::default()
            },
        );
        assert_eq!(monitor.uptime_seconds(), 42);
    }
}
