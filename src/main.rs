//! Distributed Bubble Sort Driver
//!
//! Runs the same deterministic input through a sequential reference bubble
//! sort and through two distributed disciplines (synchronous and pipelined
//! boundary handshakes), verifies element-for-element and swap-for-swap
//! equality, and reports speedup and efficiency.
//!
//! Usage:
//!   channel-sorting <n> <seed> [workers]
//!   channel-sorting --benchmark

use std::path::Path;
use std::process;
use std::time::Instant;

use channel_sorting::element::{self, Element};
use channel_sorting::report::{
    RunResult, SpeedupReport, MODE_PIPELINED, MODE_SEQUENTIAL, MODE_SYNCHRONOUS,
};
use channel_sorting::{pipelined_sort, seq_sort, sync_sort, SortError, SortRun};

/// Inputs this long or shorter are echoed before and after sorting.
const ECHO_LIMIT: usize = 20;

/// Generation switches to rayon above this size.
const PAR_GENERATE_THRESHOLD: usize = 1 << 16;

/// Where `--benchmark` drops its Links Notation report.
const REPORT_PATH: &str = "speedup_report.lino";

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--benchmark") {
        run_benchmark();
        return;
    }

    if args.len() < 3 {
        eprintln!("Usage: {} <n> <seed> [workers]", args[0]);
        eprintln!("       {} --benchmark", args[0]);
        process::exit(1);
    }

    let n: usize = match args[1].parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Error: n must be a non-negative integer, got '{}'", args[1]);
            process::exit(1);
        }
    };
    let seed: u64 = match args[2].parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("Error: seed must be a non-negative integer, got '{}'", args[2]);
            process::exit(1);
        }
    };
    let workers: usize = if args.len() > 3 {
        match args[3].parse() {
            Ok(v) => v,
            Err(_) => {
                eprintln!("Error: workers must be a positive integer, got '{}'", args[3]);
                process::exit(1);
            }
        }
    } else {
        default_workers(n)
    };

    // Validate the divisibility constraint once, before any worker starts.
    if workers == 0 || n % workers != 0 {
        eprintln!(
            "Error: workers must evenly divide n (n={}, workers={})",
            n, workers
        );
        process::exit(1);
    }

    println!("Distributed Bubble Sort");
    println!("=======================\n");
    println!("n = {}, seed = {}, workers = {}", n, seed, workers);

    let input = if n >= PAR_GENERATE_THRESHOLD {
        element::par_generate_all(seed, n)
    } else {
        element::generate_all(seed, n)
    };

    if n <= ECHO_LIMIT {
        print_elements("Input:", &input);
    }

    println!("\n--- Sequential Reference ---");
    let mut reference = input.clone();
    let seq_start = Instant::now();
    let seq_swaps = seq_sort::bubble_sort(&mut reference);
    let seq_ms = seq_start.elapsed().as_secs_f64() * 1000.0;
    println!("time: {:.3} ms", seq_ms);
    println!("n_swaps = {}", seq_swaps);

    let sync_run = run_distributed(
        "Synchronous",
        sync_sort::sort,
        &input,
        &reference,
        seq_swaps,
        seq_ms,
        workers,
    );
    run_distributed(
        "Pipelined",
        pipelined_sort::sort,
        &input,
        &reference,
        seq_swaps,
        seq_ms,
        workers,
    );

    if let Some(run) = sync_run {
        print_partition_bounds(&run, workers);
        if n <= ECHO_LIMIT {
            print_elements("Output:", &run.elements);
        }
    }
}

/// Largest worker count that divides n and does not exceed the machine's
/// parallelism.
fn default_workers(n: usize) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|c| c.get())
        .unwrap_or(1);
    (1..=cores.min(n.max(1)))
        .rev()
        .find(|w| n % w == 0)
        .unwrap_or(1)
}

/// Time one distributed run and verify it against the sequential reference.
fn run_distributed(
    label: &str,
    sort: fn(Vec<Element>, usize) -> Result<SortRun, SortError>,
    input: &[Element],
    reference: &[Element],
    seq_swaps: u64,
    seq_ms: f64,
    workers: usize,
) -> Option<SortRun> {
    println!("\n--- {} ({} workers) ---", label, workers);
    let start = Instant::now();
    match sort(input.to_vec(), workers) {
        Ok(run) => {
            let ms = start.elapsed().as_secs_f64() * 1000.0;
            println!("time: {:.3} ms", ms);
            println!("n_swaps = {}", run.total_swaps);

            if run.elements == reference && run.total_swaps == seq_swaps {
                println!("matches sequential reference: OK");
            } else {
                println!("ERROR: result differs from sequential reference!");
            }

            let speedup = seq_ms / ms;
            println!(
                "speedup: {:.2}x, efficiency: {:.1}%",
                speedup,
                speedup / workers as f64 * 100.0
            );
            Some(run)
        }
        Err(e) => {
            println!("{} run failed: {}", label, e);
            None
        }
    }
}

/// First and last element of every partition plus its swap count, in rank
/// order. Printed from the gathered result, so no cross-worker output
/// coordination is needed.
fn print_partition_bounds(run: &SortRun, workers: usize) {
    let local_len = run.elements.len() / workers;
    if local_len == 0 {
        return;
    }
    println!();
    for rank in 0..workers {
        let first = &run.elements[rank * local_len];
        let last = &run.elements[rank * local_len + local_len - 1];
        println!(
            "P{}: ({}, {:.1}) ({}, {:.1}) swaps={}",
            rank, first.index, first.value, last.index, last.value, run.worker_swaps[rank]
        );
    }
}

fn print_elements(label: &str, elements: &[Element]) {
    print!("{}", label);
    for elem in elements {
        print!(" ({}, {:.1})", elem.index, elem.value);
    }
    println!();
}

/// Sweep sizes and worker counts, print a comparison table, and save the
/// Links Notation report for later conversion with `lino2md`.
fn run_benchmark() {
    println!("\n====================================");
    println!("Running comprehensive benchmark...");
    println!("====================================\n");

    let sizes = [256usize, 512, 1024, 2048];
    let worker_counts = [2usize, 4, 8];
    let seed = 42u64;

    let mut report = SpeedupReport::new("bubble sort sweep: sequential vs distributed disciplines");

    println!(
        "{:>8} | {:>8} | {:>12} | {:>12} | {:>10} | {:>12} | {:>10}",
        "Size", "Workers", "Seq (ms)", "Sync (ms)", "Sync Spd", "Pipe (ms)", "Pipe Spd"
    );
    println!(
        "{:-<8}-+-{:-<8}-+-{:-<12}-+-{:-<12}-+-{:-<10}-+-{:-<12}-+-{:-<10}",
        "", "", "", "", "", "", ""
    );

    for &n in &sizes {
        let input = element::generate_all(seed, n);

        let mut reference = input.clone();
        let seq_start = Instant::now();
        let seq_swaps = seq_sort::bubble_sort(&mut reference);
        let seq_ms = seq_start.elapsed().as_secs_f64() * 1000.0;
        report.add_result(RunResult {
            mode: MODE_SEQUENTIAL.to_string(),
            n,
            seed,
            workers: 1,
            time_ms: seq_ms,
            swaps: seq_swaps,
            verified: true,
        });

        for &workers in &worker_counts {
            let timed = |sort: fn(Vec<Element>, usize) -> Result<SortRun, SortError>| {
                let start = Instant::now();
                let run = sort(input.clone(), workers);
                let ms = start.elapsed().as_secs_f64() * 1000.0;
                (run, ms)
            };

            let (sync_run, sync_ms) = timed(sync_sort::sort);
            let (pipe_run, pipe_ms) = timed(pipelined_sort::sort);

            let mut record = |mode: &str, run: &Result<SortRun, SortError>, ms: f64| match run {
                Ok(run) => {
                    let verified = run.elements == reference && run.total_swaps == seq_swaps;
                    report.add_result(RunResult {
                        mode: mode.to_string(),
                        n,
                        seed,
                        workers,
                        time_ms: ms,
                        swaps: run.total_swaps,
                        verified,
                    });
                    if verified {
                        format!("{:.2}x", seq_ms / ms)
                    } else {
                        "ERROR".to_string()
                    }
                }
                Err(_) => "ERROR".to_string(),
            };

            let sync_speedup = record(MODE_SYNCHRONOUS, &sync_run, sync_ms);
            let pipe_speedup = record(MODE_PIPELINED, &pipe_run, pipe_ms);

            println!(
                "{:>8} | {:>8} | {:>12.3} | {:>12.3} | {:>10} | {:>12.3} | {:>10}",
                n, workers, seq_ms, sync_ms, sync_speedup, pipe_ms, pipe_speedup
            );
        }
    }

    match report.save_lino(Path::new(REPORT_PATH)) {
        Ok(()) => {
            println!("\nReport written to: {}", REPORT_PATH);
            println!("Convert to Markdown with: lino2md {}", REPORT_PATH);
        }
        Err(e) => {
            eprintln!("\nError writing report: {}", e);
        }
    }
}
