use std::collections::BTreeMap;
use std::env;
use std::time::Instant;

use cart_split::layouts::{nested_partition, NestedBounds};
use cart_split::{OptimalSplitter, OptimalSplitterBuilder, CART_SLOTS};
use sysinfo::{get_current_pid, ProcessRefreshKind, System};

const SIZES: &[usize] = &[256, 512, 1024, 2048, 4096, 8192, 16384, 32768, 65536];

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("split_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(80));
    eprintln!("Cart Split Probe");
    eprintln!("{}", "=".repeat(80));
    eprintln!("  DP results are compared with a full-table DP up to length {}", options.verify_limit);
    eprintln!("  rss_delta_kib is the resident memory growth across one run");
    eprintln!();

    let mut sys = System::new();
    let mut measurements = Vec::new();

    eprintln!("[1/3] Sparse waits (one in seven)...");
    measurements.extend(run_split("sparse_waits", 7, &options, &mut sys));
    eprintln!();

    eprintln!("[2/3] Dense waits (every other move)...");
    measurements.extend(run_split("dense_waits", 2, &options, &mut sys));
    eprintln!();

    eprintln!("[3/3] Nested 729-slot layout...");
    measurements.extend(run_nested(&mut sys));
    eprintln!();

    print_summary(&measurements);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("split_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 4096usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = parse_limit(value)?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = parse_limit(&value)?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin split_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Longest sequence checked against the full-table DP (default: 4096)
  -h, --help                    Print this help message
"
        );
    }
}

fn parse_limit(value: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| "verify limit must be a positive integer".to_string())
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

struct Measurement {
    scenario: &'static str,
    len: usize,
    carts: usize,
    wall_s: f64,
    rss_delta_kib: u64,
    status: Status,
    detail: Option<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Status {
    NotChecked,
    Passed,
    Failed,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::NotChecked => "not_checked",
            Status::Passed => "passed",
            Status::Failed => "failed",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Status::Passed => "✓",
            Status::Failed => "✗",
            Status::NotChecked => "○",
        }
    }
}

fn run_split(
    scenario: &'static str,
    wait_every: usize,
    options: &Options,
    sys: &mut System,
) -> Vec<Measurement> {
    let splitter = match OptimalSplitterBuilder::new()
        .with_bounds(1, CART_SLOTS)
        .with_cost(0.0, 1.0)
        .build()
    {
        Ok(s) => s,
        Err(err) => {
            eprintln!("split_probe: {err}");
            return Vec::new();
        }
    };

    SIZES
        .iter()
        .map(|&len| {
            let mask: Vec<bool> = (0..len).map(|i| i % wait_every == wait_every - 1).collect();
            let m = measure(scenario, len, sys, || {
                let Some(split) = splitter.solve(&mask) else {
                    return (0, Status::Failed, Some("no split found".to_string()));
                };
                let carts = split.sizes.len();
                if len > options.verify_limit {
                    return (carts, Status::NotChecked, None);
                }
                let baseline = full_table_cost(&splitter, &mask);
                if (baseline - split.cost).abs() < 1e-9 {
                    (carts, Status::Passed, None)
                } else {
                    let detail = format!("expected {baseline}, got {}", split.cost);
                    (carts, Status::Failed, Some(detail))
                }
            });
            eprintln!(
                "      {} len={len} carts={} time={:.3}s",
                m.status.icon(),
                m.carts,
                m.wall_s
            );
            m
        })
        .collect()
}

fn run_nested(sys: &mut System) -> Vec<Measurement> {
    let bounds = match NestedBounds::full_carts(2, 2, 3) {
        Ok(b) => b,
        Err(err) => {
            eprintln!("split_probe: {err}");
            return Vec::new();
        }
    };

    SIZES
        .iter()
        .map(|&len| {
            let items: Vec<u32> = (0..len as u32).collect();
            let m = measure("nested_729", len, sys, || match nested_partition(&items, bounds) {
                Ok(carts) => {
                    let kept: usize = carts.iter().flatten().map(Vec::len).sum();
                    if kept == len {
                        (carts.len(), Status::Passed, None)
                    } else {
                        let detail = format!("kept {kept} of {len} items");
                        (carts.len(), Status::Failed, Some(detail))
                    }
                }
                Err(err) => (0, Status::Failed, Some(err.to_string())),
            });
            eprintln!("      {} len={len} carts={} time={:.3}s", m.status.icon(), m.carts, m.wall_s);
            m
        })
        .collect()
}

/// O(n * max_k) table without the sliding window.
fn full_table_cost(splitter: &OptimalSplitter, is_wait: &[bool]) -> f64 {
    let min_k = splitter.bounds().min_k();
    let max_k = splitter.bounds().max_k();
    let cost = splitter.cost();
    let n = is_wait.len();
    let mut dp = vec![f64::INFINITY; n + 1];
    dp[0] = 0.0;
    for i in 1..=n {
        for k in min_k.max(1)..=max_k.min(i) {
            dp[i] = dp[i].min(dp[i - k] + cost.cart_cost(k));
        }
        if is_wait[i - 1] {
            for k in min_k..=max_k.min(i - 1) {
                dp[i] = dp[i].min(dp[i - 1 - k] + cost.cart_cost(k));
            }
        }
    }
    dp[n]
}

fn measure<F>(scenario: &'static str, len: usize, sys: &mut System, compute: F) -> Measurement
where
    F: FnOnce() -> (usize, Status, Option<String>),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (carts, status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        len,
        carts,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        status,
        detail,
    }
}

fn print_summary(measurements: &[Measurement]) {
    let failed: Vec<&Measurement> = measurements
        .iter()
        .filter(|m| m.status == Status::Failed)
        .collect();
    let passed = measurements
        .iter()
        .filter(|m| m.status == Status::Passed)
        .count();

    eprintln!("{}", "=".repeat(80));
    eprintln!(
        "runs: {}  passed: {passed}  failed: {}  not checked: {}",
        measurements.len(),
        failed.len(),
        measurements.len() - passed - failed.len()
    );
    for m in &failed {
        eprintln!(
            "  ✗ {} len={}: {}",
            m.scenario,
            m.len,
            m.detail.as_deref().unwrap_or("")
        );
    }

    let mut by_scenario: BTreeMap<&str, Vec<&Measurement>> = BTreeMap::new();
    for m in measurements {
        by_scenario.entry(m.scenario).or_default().push(m);
    }
    for (scenario, ms) in &by_scenario {
        let total: f64 = ms.iter().map(|m| m.wall_s).sum();
        let max_mem = ms.iter().map(|m| m.rss_delta_kib).max().unwrap_or(0);
        eprintln!("  {scenario}: total {total:.3}s, max rss delta {max_mem} KiB");
    }
    eprintln!("{}", "=".repeat(80));
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,len,carts,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m.detail.as_ref().map(|s| s.replace('"', "'")).unwrap_or_default();
        println!(
            "{},{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.len,
            m.carts,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let col1 = measurements
        .iter()
        .map(|m| m.scenario.len())
        .max()
        .unwrap_or(0)
        .max("scenario".len());

    println!(
        "{:<col1$}  {:>8}  {:>8}  {:>10}  {:>14}  {:>12}  detail",
        "scenario", "len", "carts", "wall_s", "rss_delta_kib", "status"
    );
    println!(
        "{:-<col1$}  {:-<8}  {:-<8}  {:-<10}  {:-<14}  {:-<12}  {:-<6}",
        "", "", "", "", "", "", ""
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:>8}  {:>8}  {:>10.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.len,
            m.carts,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            m.detail.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = match &m.detail {
            Some(d) => format!("\"{}\"", d.replace('"', "'")),
            None => "null".to_string(),
        };
        println!(
            "  {{\"scenario\":\"{}\",\"len\":{},\"carts\":{},\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.len,
            m.carts,
            m.wall_s,
            m.rss_delta_kib,
            m.status.label(),
            detail,
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}
