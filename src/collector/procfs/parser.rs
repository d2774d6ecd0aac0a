//! Parsers for `/proc` file formats.
//!
//! These are pure functions over file contents, designed to be testable with
//! string fixtures. All of them are tolerant: a malformed or truncated line
//! is skipped or zero-filled, never a panic or an error. A missing file is
//! handled one layer up, in the collectors, which substitute the same zero
//! values.

use serde::{Deserialize, Serialize};

/// System-wide memory counters from `/proc/meminfo`, in kB.
///
/// `total_kb == 0` is the degenerate "unknown" state reported when the
/// kernel interface is absent.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct MemInfo {
    pub total_kb: u64,
    pub available_kb: u64,
}

impl MemInfo {
    /// Fraction of total memory in use: `(total - available) / total`.
    ///
    /// Returns 0.0 for the degenerate `total_kb == 0` state.
    pub fn utilization(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        (self.total_kb.saturating_sub(self.available_kb)) as f64 / self.total_kb as f64
    }
}

/// Aggregate CPU time classes from the first line of `/proc/stat`, in
/// clock ticks, in kernel order.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct CpuTimes {
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    pub steal: u64,
    pub guest: u64,
    pub guest_nice: u64,
}

impl CpuTimes {
    /// Sum of the eight accounted classes (guest time is already folded into
    /// user/nice by the kernel and is excluded here).
    pub fn total_ticks(&self) -> u64 {
        self.user
            + self.nice
            + self.system
            + self.idle
            + self.iowait
            + self.irq
            + self.softirq
            + self.steal
    }

    /// Ticks spent idle or waiting for I/O.
    pub fn idle_ticks(&self) -> u64 {
        self.idle + self.iowait
    }

    /// Ticks spent doing work: total minus idle.
    pub fn busy_ticks(&self) -> u64 {
        self.total_ticks() - self.idle_ticks()
    }
}

/// Per-process scheduling counters from `/proc/[pid]/stat`, in clock ticks.
///
/// The all-zero value means "metrics unavailable for this pid" (process
/// exited mid-read, or the record was too short) and callers skip it.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct PidCounters {
    /// Time scheduled in user mode.
    pub utime: u64,
    /// Time scheduled in kernel mode.
    pub stime: u64,
    /// Waited-for children's user time.
    pub cutime: u64,
    /// Waited-for children's kernel time.
    pub cstime: u64,
    /// Boot-relative timestamp of process creation, not an elapsed age.
    pub starttime: u64,
}

impl PidCounters {
    /// Total ticks this process (and its reaped children) has been scheduled.
    pub fn active_ticks(&self) -> u64 {
        self.utime + self.stime + self.cutime + self.cstime
    }
}

/// Resident memory and ownership from `/proc/[pid]/status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PidStatus {
    /// `VmRSS` in kB; 0 for kernel threads and zombies, which have no
    /// resident pages.
    pub vm_rss_kb: u64,
    /// Real uid, the first value of the `Uid` line.
    pub uid: u32,
}

/// Parses `/proc/meminfo` content for `MemTotal` and `MemAvailable`.
///
/// Keys not present by end of file stay zero.
pub fn parse_mem_info(content: &str) -> MemInfo {
    let mut info = MemInfo::default();
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("MemTotal:") {
            info.total_kb = first_number(rest);
        } else if let Some(rest) = line.strip_prefix("MemAvailable:") {
            info.available_kb = first_number(rest);
        }
    }
    info
}

/// Parses `/proc/uptime` content: the first whitespace token as whole
/// seconds since boot.
///
/// The kernel writes a fractional value ("12345.67"); the fraction is
/// truncated. Returns 0 if the token is missing or non-numeric.
pub fn parse_uptime_seconds(content: &str) -> u64 {
    content
        .split_whitespace()
        .next()
        .map(first_number)
        .unwrap_or(0)
}

/// Parses the aggregate `cpu` line of `/proc/stat` into the ten time
/// classes.
///
/// Lines with fewer than ten numeric fields zero-fill the missing trailing
/// classes. Returns the all-zero `CpuTimes` when no aggregate line exists.
pub fn parse_cpu_times(content: &str) -> CpuTimes {
    for line in content.lines() {
        let mut parts = line.split_whitespace();
        if parts.next() != Some("cpu") {
            continue;
        }
        let fields: Vec<u64> = parts.map(|f| f.parse().unwrap_or(0)).collect();
        let get = |idx: usize| fields.get(idx).copied().unwrap_or(0);
        return CpuTimes {
            user: get(0),
            nice: get(1),
            system: get(2),
            idle: get(3),
            iowait: get(4),
            irq: get(5),
            softirq: get(6),
            steal: get(7),
            guest: get(8),
            guest_nice: get(9),
        };
    }
    CpuTimes::default()
}

/// Parses `/proc/stat` content for the `processes` and `procs_running`
/// lines. Returns `(total, running)`, zero for any key not found.
pub fn parse_process_totals(content: &str) -> (u64, u64) {
    let mut total = 0;
    let mut running = 0;
    for line in content.lines() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("processes") => total = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0),
            Some("procs_running") => {
                running = parts.next().and_then(|v| v.parse().ok()).unwrap_or(0)
            }
            _ => {}
        }
    }
    (total, running)
}

/// Parses `/proc/version` content: the third whitespace token of the first
/// line ("Linux version 5.15.0-56-generic ..." -> "5.15.0-56-generic").
pub fn parse_kernel_version(content: &str) -> String {
    content
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(2))
        .unwrap_or("")
        .to_string()
}

/// Parses os-release content (`KEY="VALUE"` lines) for `PRETTY_NAME`.
///
/// Surrounding quotes are stripped; embedded spaces survive intact. Returns
/// an empty string when the key is absent.
pub fn parse_pretty_os_name(content: &str) -> String {
    for line in content.lines() {
        if let Some((key, value)) = line.split_once('=')
            && key.trim() == "PRETTY_NAME"
        {
            return value.trim().trim_matches('"').to_string();
        }
    }
    String::new()
}

/// Parses `/proc/[pid]/stat` content into [`PidCounters`].
///
/// The comm field is enclosed in parentheses and may itself contain spaces
/// or parentheses, so the numeric fields are located relative to the last
/// `)` rather than by naive splitting. With a single-word comm the consumed
/// positions are the documented whole-record indices 13-16 (scheduled time)
/// and 21 (starttime).
///
/// A record with fewer than 22 whole-record fields, or without a comm, is a
/// process that exited mid-read or a format anomaly: the all-zero counters
/// are returned, never an error.
pub fn parse_pid_stat(content: &str) -> PidCounters {
    let Some(close_paren) = content.rfind(')') else {
        return PidCounters::default();
    };
    // Whole-record index 13 (utime) is index 11 of the fields after comm.
    let fields: Vec<&str> = content[close_paren + 1..].split_whitespace().collect();
    if fields.len() < 20 {
        return PidCounters::default();
    }
    let get = |idx: usize| fields[idx].parse().unwrap_or(0);
    PidCounters {
        utime: get(11),
        stime: get(12),
        cutime: get(13),
        cstime: get(14),
        starttime: get(19),
    }
}

/// Parses `/proc/[pid]/status` content for `VmRSS` and `Uid`.
pub fn parse_pid_status(content: &str) -> PidStatus {
    let mut status = PidStatus::default();
    for line in content.lines() {
        if let Some(rest) = line.strip_prefix("VmRSS:") {
            status.vm_rss_kb = first_number(rest);
        } else if let Some(rest) = line.strip_prefix("Uid:") {
            status.uid = rest
                .split_whitespace()
                .next()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
        }
    }
    status
}

/// Parses `/proc/[pid]/cmdline` content: NUL argument separators collapsed
/// to spaces, trimmed. Empty for zombies and kernel threads.
pub fn parse_cmdline(content: &str) -> String {
    content
        .lines()
        .next()
        .unwrap_or("")
        .replace('\0', " ")
        .trim()
        .to_string()
}

/// Looks up a uid in `/etc/passwd`-format content
/// (`username:password:uid:gid:gecos:home:shell`).
///
/// Single full pass, no caching; `None` when no record matches.
pub fn lookup_user_name(content: &str, uid: u32) -> Option<String> {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split(':');
        let name = parts.next()?;
        let _password = parts.next();
        if parts.next().and_then(|v| v.parse::<u32>().ok()) == Some(uid) {
            return Some(name.to_string());
        }
    }
    None
}

/// First unsigned integer at the start of a (possibly padded) token,
/// stopping at the first non-digit, so "12345.67" reads as 12345.
fn first_number(s: &str) -> u64 {
    let s = s.trim_start();
    let digits: &str = &s[..s.bytes().take_while(|b| b.is_ascii_digit()).count()];
    digits.parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mem_info_basic() {
        let content = "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
";
        let info = parse_mem_info(content);
        assert_eq!(info.total_kb, 16384000);
        assert_eq!(info.available_kb, 12000000);
    }

    #[test]
    fn mem_info_missing_keys_stay_zero() {
        let info = parse_mem_info("SwapTotal: 4096000 kB\n");
        assert_eq!(info, MemInfo::default());
    }

    #[test]
    fn mem_utilization_ratio() {
        let info = MemInfo {
            total_kb: 1000,
            available_kb: 400,
        };
        assert!((info.utilization() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn mem_utilization_degenerate_total() {
        assert_eq!(MemInfo::default().utilization(), 0.0);
    }

    #[test]
    fn uptime_truncates_fraction() {
        assert_eq!(parse_uptime_seconds("12345.67 98765.43\n"), 12345);
        assert_eq!(parse_uptime_seconds(""), 0);
        assert_eq!(parse_uptime_seconds("garbage\n"), 0);
    }

    #[test]
    fn cpu_times_ten_fields() {
        let times = parse_cpu_times(
            "cpu  10000 500 3000 80000 1000 200 100 50 25 10\n\
             cpu0 2500 125 750 20000 250 50 25 0 0 0\n",
        );
        assert_eq!(times.user, 10000);
        assert_eq!(times.steal, 50);
        assert_eq!(times.guest_nice, 10);
        // Sums over the fixed field lists.
        assert_eq!(times.total_ticks(), 10000 + 500 + 3000 + 80000 + 1000 + 200 + 100 + 50);
        assert_eq!(times.idle_ticks(), 80000 + 1000);
        assert_eq!(times.busy_ticks(), times.total_ticks() - times.idle_ticks());
    }

    #[test]
    fn cpu_times_short_line_zero_fills() {
        let times = parse_cpu_times("cpu 100 200 300\n");
        assert_eq!(times.user, 100);
        assert_eq!(times.system, 300);
        assert_eq!(times.idle, 0);
        assert_eq!(times.total_ticks(), 600);
    }

    #[test]
    fn cpu_times_no_aggregate_line() {
        assert_eq!(parse_cpu_times("intr 1000000\nctxt 500000\n"), CpuTimes::default());
    }

    #[test]
    fn process_totals() {
        let content = "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
ctxt 500000
processes 10000
procs_running 2
procs_blocked 0
";
        assert_eq!(parse_process_totals(content), (10000, 2));
        assert_eq!(parse_process_totals("ctxt 500000\n"), (0, 0));
    }

    #[test]
    fn kernel_version_third_token() {
        let content = "Linux version 5.15.0-56-generic (buildd@lcy02) (gcc 11.3.0) #62-Ubuntu\n";
        assert_eq!(parse_kernel_version(content), "5.15.0-56-generic");
        assert_eq!(parse_kernel_version(""), "");
    }

    #[test]
    fn pretty_os_name_preserves_spaces() {
        let content = "\
NAME=\"Ubuntu\"
VERSION=\"20.04 LTS (Focal Fossa)\"
PRETTY_NAME=\"Ubuntu 20.04 LTS\"
ID=ubuntu
";
        assert_eq!(parse_pretty_os_name(content), "Ubuntu 20.04 LTS");
    }

    #[test]
    fn pretty_os_name_absent() {
        assert_eq!(parse_pretty_os_name("ID=ubuntu\n"), "");
    }

    #[test]
    fn pid_stat_basic() {
        let content = "1234 (bash) S 1233 1234 1234 34816 1235 4194304 5000 50000 10 20 100 50 200 150 20 0 1 0 90000 25000000 2000 18446744073709551615 0 0 0 0 0 0 65536 3670020 1266777851 0 0 0 17 2 0 0 5 0 0 0 0 0 0 0 0 0 0";
        let counters = parse_pid_stat(content);
        assert_eq!(counters.utime, 100);
        assert_eq!(counters.stime, 50);
        assert_eq!(counters.cutime, 200);
        assert_eq!(counters.cstime, 150);
        assert_eq!(counters.starttime, 90000);
        assert_eq!(counters.active_ticks(), 500);
    }

    #[test]
    fn pid_stat_comm_with_spaces() {
        let content = "5000 (Web Content) S 4999 5000 4999 0 -1 4194304 100000 0 500 0 5000 1000 0 0 20 0 20 0 500000 2000000000 50000 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0";
        let counters = parse_pid_stat(content);
        assert_eq!(counters.utime, 5000);
        assert_eq!(counters.stime, 1000);
        assert_eq!(counters.starttime, 500000);
    }

    #[test]
    fn pid_stat_short_record_is_zero() {
        let counters = parse_pid_stat("999 (gone) Z 1 999 999 0 -1");
        assert_eq!(counters, PidCounters::default());
        assert_eq!(counters.active_ticks(), 0);
    }

    #[test]
    fn pid_stat_garbage_is_zero() {
        assert_eq!(parse_pid_stat(""), PidCounters::default());
        assert_eq!(parse_pid_stat("no parens here"), PidCounters::default());
    }

    #[test]
    fn pid_status_rss_and_uid() {
        let content = "\
Name:\tbash
Pid:\t1234
Uid:\t1000\t1000\t1000\t1000
VmSize:\t   25000 kB
VmRSS:\t    8000 kB
";
        let status = parse_pid_status(content);
        assert_eq!(status.vm_rss_kb, 8000);
        assert_eq!(status.uid, 1000);
    }

    #[test]
    fn pid_status_absent_keys() {
        let status = parse_pid_status("Name:\tkworker/0:1\n");
        assert_eq!(status.vm_rss_kb, 0);
        assert_eq!(status.uid, 0);
    }

    #[test]
    fn cmdline_collapses_nul_separators() {
        assert_eq!(parse_cmdline("/bin/bash\0--login\0"), "/bin/bash --login");
        assert_eq!(parse_cmdline(""), "");
    }

    #[test]
    fn user_lookup_matches_uid_field() {
        let content = "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
user:x:1000:1000:User Name:/home/user:/bin/bash
";
        assert_eq!(lookup_user_name(content, 0).as_deref(), Some("root"));
        assert_eq!(lookup_user_name(content, 1000).as_deref(), Some("user"));
        assert_eq!(lookup_user_name(content, 9999), None);
    }
}
