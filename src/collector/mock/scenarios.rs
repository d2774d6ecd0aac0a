//! Pre-built mock filesystem states for tests.

use super::filesystem::MockFs;

impl MockFs {
    /// A small but complete system: init, a bash shell, and a kernel
    /// worker, plus all the system-wide files the collectors read.
    ///
    /// Notable numbers, used by assertions across the crate:
    /// - memory: 16384000 kB total, 12000000 kB available
    /// - aggregate cpu: 94800 total ticks, 81000 of them idle+iowait
    /// - uptime: 12345.67 seconds
    /// - pid 1 (systemd, root): 50 active ticks, starttime 100, VmRSS 10240 kB
    /// - pid 1000 (bash, uid 1000): 500 active ticks, starttime 90000,
    ///   VmRSS 8000 kB
    /// - pid 1001 (kworker, root): no VmRSS line, empty cmdline
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file(
            "/etc/passwd",
            "\
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
nobody:x:65534:65534:nobody:/nonexistent:/usr/sbin/nologin
user:x:1000:1000:User:/home/user:/bin/bash
",
        );
        fs.add_file(
            "/etc/os-release",
            "\
NAME=\"Ubuntu\"
VERSION=\"20.04 LTS (Focal Fossa)\"
ID=ubuntu
PRETTY_NAME=\"Ubuntu 20.04 LTS\"
",
        );

        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file(
            "/proc/version",
            "Linux version 5.15.0-56-generic (buildd@lcy02-amd64-080) (gcc (Ubuntu 11.3.0-1ubuntu1) 11.3.0) #62-Ubuntu SMP Tue Nov 22 19:54:14 UTC 2022\n",
        );
        fs.add_file(
            "/proc/meminfo",
            "\
MemTotal:       16384000 kB
MemFree:         8192000 kB
MemAvailable:   12000000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapTotal:       4096000 kB
SwapFree:        4096000 kB
",
        );
        fs.add_file(
            "/proc/stat",
            "\
cpu  10000 500 3000 80000 1000 200 100 0 0 0
cpu0 2500 125 750 20000 250 50 25 0 0 0
cpu1 2500 125 750 20000 250 50 25 0 0 0
intr 1000000 50 0 0 0 0 0 0 0 1 0 0 0 100 0 0 1000
ctxt 500000
btime 1700000000
processes 10000
procs_running 2
procs_blocked 0
",
        );

        fs.add_process(
            1,
            "1 (systemd) S 0 1 1 0 -1 4194560 10000 100000 50 500 20 30 0 0 20 0 1 0 100 175000000 2500 18446744073709551615 0 0 0 0 0 0 671173123 4096 1260 0 0 0 17 0 0 0 10 0 0 0 0 0 0 0 0 0 0",
            "Name:\tsystemd\nPid:\t1\nPPid:\t0\nUid:\t0\t0\t0\t0\nGid:\t0\t0\t0\t0\nVmSize:\t170000 kB\nVmRSS:\t10240 kB\n",
            "/sbin/init\0splash\0",
        );
        fs.add_process(
            1000,
            "1000 (bash) S 1 1000 1000 34816 1000 4194304 5000 50000 10 20 100 50 200 150 20 0 1 0 90000 25000000 2000 18446744073709551615 0 0 0 0 0 0 65536 3670020 1266777851 0 0 0 17 2 0 0 5 0 0 0 0 0 0 0 0 0 0",
            "Name:\tbash\nPid:\t1000\nPPid:\t1\nUid:\t1000\t1000\t1000\t1000\nGid:\t1000\t1000\t1000\t1000\nVmSize:\t25000 kB\nVmRSS:\t8000 kB\n",
            "/bin/bash\0--login\0",
        );
        fs.add_process(
            1001,
            "1001 (kworker/0:1) I 2 0 0 0 -1 69238880 0 0 0 0 3 8 0 0 20 0 1 0 200 0 0 18446744073709551615 0 0 0 0 0 0 0 2147483647 0 0 0 0 17 1 0 0 0 0 0 0 0 0 0 0 0 0 0",
            "Name:\tkworker/0:1\nPid:\t1001\nPPid:\t2\nUid:\t0\t0\t0\t0\nGid:\t0\t0\t0\t0\n",
            "",
        );

        fs
    }

    /// Three processes exercising the visibility filter end to end:
    /// - pid 100: no resident memory (kernel-thread-like), nonzero CPU
    /// - pid 200: resident memory but zero measured utilization
    /// - pid 300: both, the only one a refresh keeps
    pub fn mixed_visibility() -> Self {
        let mut fs = Self::new();

        fs.add_file("/etc/passwd", "root:x:0:0:root:/root:/bin/bash\n");
        fs.add_file("/proc/uptime", "5000.00 9000.00\n");
        fs.add_file(
            "/proc/stat",
            "cpu  1000 0 500 8000 100 0 0 0 0 0\nprocesses 300\nprocs_running 1\n",
        );

        fs.add_process(
            100,
            "100 (flusher) I 2 0 0 0 -1 69238880 0 0 0 0 40 60 0 0 20 0 1 0 10000 0 0 18446744073709551615 0 0 0 0 0 0 0 2147483647 0 0 0 0 17 1 0 0 0 0 0 0 0 0 0 0 0 0 0",
            "Name:\tflusher\nUid:\t0\t0\t0\t0\n",
            "",
        );
        fs.add_process(
            200,
            "200 (sleeper) S 1 200 200 0 -1 4194304 100 0 0 0 0 0 0 0 20 0 1 0 50000 8000000 1000 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
            "Name:\tsleeper\nUid:\t0\t0\t0\t0\nVmRSS:\t4096 kB\n",
            "/usr/bin/sleeper\0",
        );
        fs.add_process(
            300,
            "300 (worker) R 1 300 300 0 -1 4194304 2000 0 5 0 4000 1000 0 0 20 0 4 0 30000 90000000 51200 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
            "Name:\tworker\nUid:\t0\t0\t0\t0\nVmRSS:\t204800 kB\n",
            "/usr/bin/worker\0--jobs\04\0",
        );

        fs
    }
}
