use std::collections::VecDeque;
use std::fmt::Write as _;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use mergeinsert::input::parse_values;
use mergeinsert::{Comparisons, MergeInsert, Sequence, max_comparisons};

/// Sorts positive integers with merge-insertion and times it on two
/// containers.
#[derive(Parser, Debug)]
#[command(name = "mergeinsert", version, about, long_about = None)]
struct Args {
    /// Positive integers to sort, at most 2147483647.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    values: Vec<String>,

    /// Print at most this many values on the Before/After lines.
    #[arg(long, value_name = "N")]
    show: Option<usize>,

    /// Report comparisons spent in each stage.
    #[arg(long)]
    stats: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::builder().filter_level(log_level).init();

    match run(&args) {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String> {
    let values = parse_values(&args.values).context("cannot sort the given values")?;
    debug!("parsed {} values", values.len());

    let vec = timed::<Vec<u32>>(&values);
    let deque = timed::<VecDeque<u32>>(&values);
    debug_assert!(vec.sorted.iter().eq(deque.sorted.iter()));

    let mut out = String::new();
    writeln!(out, "Before: {}", render(&values, args.show))?;
    writeln!(out, "After:  {}", render(&vec.sorted, args.show))?;
    for (name, elapsed) in [("Vec<u32>", vec.elapsed), ("VecDeque<u32>", deque.elapsed)] {
        writeln!(
            out,
            "Time to process a range of {} elements with {name} : {:.5} us",
            values.len(),
            elapsed.as_secs_f64() * 1e6
        )?;
    }
    if args.stats {
        writeln!(out, "{}", stats_line(vec.comparisons, values.len()))?;
    }
    debug!(
        "sorted {} values with {} comparisons",
        values.len(),
        vec.comparisons.total()
    );
    Ok(out)
}

struct Timed<C> {
    sorted: C,
    comparisons: Comparisons,
    elapsed: Duration,
}

fn timed<C: Sequence<u32>>(values: &[u32]) -> Timed<C> {
    let start = Instant::now();
    let mut sorter: MergeInsert<u32, C> = MergeInsert::new(values.iter().copied());
    sorter.run(u32::cmp);
    let comparisons = sorter.comparisons();
    let sorted = sorter.into_sorted();
    let elapsed = start.elapsed();
    debug!("{} values sorted in {elapsed:?}: {comparisons:?}", values.len());
    Timed {
        sorted,
        comparisons,
        elapsed,
    }
}

fn render<'a>(values: impl IntoIterator<Item = &'a u32>, show: Option<usize>) -> String {
    let mut out = String::new();
    let mut values = values.into_iter();
    let limit = show.unwrap_or(usize::MAX);
    for (i, value) in values.by_ref().take(limit).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{value}");
    }
    if values.next().is_some() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str("[...]");
    }
    out
}

fn stats_line(spent: Comparisons, n: usize) -> String {
    format!(
        "Comparisons: {} pairing, {} ordering, {} insertion ({} total, pairing + insertion bound {})",
        spent.pairing,
        spent.ordering,
        spent.insertion,
        spent.total(),
        max_comparisons(n)
    )
}
