//! procmon-dump - one-shot system snapshot dump.
//!
//! Reads the current system and process telemetry and prints it as a text
//! summary with a ranked process table, or as JSON for scripting.

use clap::Parser;
use serde::Serialize;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use procmon::collector::RealFs;
use procmon::fmt::{elapsed_hms, percent};
use procmon::monitor::{MonitorConfig, ProcessSnapshot, SystemMonitor};

/// One-shot system telemetry dump.
#[derive(Parser)]
#[command(name = "procmon-dump", about = "Dump a system telemetry snapshot", version)]
struct Args {
    /// Path to the proc filesystem (for testing against a fake root).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Show only the top N processes by CPU utilization.
    #[arg(short = 'n', long, default_value = "15")]
    top: usize,

    /// Output as JSON.
    #[arg(long)]
    json: bool,

    /// Verbose logging (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Dump {
    operating_system: String,
    kernel: String,
    uptime_seconds: u64,
    cpu_utilization: f64,
    memory_utilization: f64,
    total_processes: u64,
    running_processes: u64,
    processes: Vec<ProcessSnapshot>,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut monitor = SystemMonitor::with_config(
        RealFs::new(),
        MonitorConfig {
            proc_path: args.proc_path.clone(),
            ..MonitorConfig::default()
        },
    );
    monitor.refresh();

    let mut processes = monitor.processes().to_vec();
    processes.sort_by(ProcessSnapshot::by_cpu_desc);
    processes.truncate(args.top);

    let dump = Dump {
        operating_system: monitor.operating_system(),
        kernel: monitor.kernel(),
        uptime_seconds: monitor.uptime_seconds(),
        cpu_utilization: monitor.cpu_utilization(),
        memory_utilization: monitor.memory_utilization(),
        total_processes: monitor.total_processes(),
        running_processes: monitor.running_processes(),
        processes,
    };

    if args.json {
        match serde_json::to_string_pretty(&dump) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("failed to serialize snapshot: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_text(&dump);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("procmon={}", level).parse().unwrap());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_text(dump: &Dump) {
    println!("{} (kernel {})", dump.operating_system, dump.kernel);
    println!(
        "uptime {}  cpu {}  mem {}  processes {} ({} running)",
        elapsed_hms(dump.uptime_seconds),
        percent(dump.cpu_utilization),
        percent(dump.memory_utilization),
        dump.total_processes,
        dump.running_processes,
    );
    println!();
    println!(
        "{:>7} {:>6} {:>8} {:<12} {:>10}  {}",
        "PID", "CPU%", "RAM(MB)", "USER", "STARTED", "COMMAND"
    );
    for p in &dump.processes {
        println!(
            "{:>7} {:>6} {:>8} {:<12} {:>10}  {}",
            p.pid,
            percent(p.cpu_utilization),
            p.ram_mb,
            p.user,
            elapsed_hms(p.age_seconds),
            p.command,
        );
    }
}
