use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;

use pairbench::engine::{align_pair, AlignOutcome, EngineParams};
use pairbench::fasta::read_fasta;
use pairbench::pairs::PairReader;
use pairbench::render::write_alignment;
use pairbench::types::{AlignMode, ReportFormat, TaskLevel};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Benchmark harness for the edlib alignment engine",
    long_about = None
)]
struct Args {
    /// Either one seq-pair file (two lines per pair, query first; the first
    /// byte of each line is a marker), or a queries FASTA plus a target
    /// FASTA. Plain or gzipped.
    #[arg(required = true, num_args = 1..=2, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Alignment mode: HW, NW or SHW
    #[arg(short = 'm', default_value = "NW", value_name = "MODE")]
    mode: String,

    /// Discard alignments with edit distance above K; -1 = unbounded
    #[arg(short = 'k', default_value_t = -1, allow_hyphen_values = true, value_name = "K")]
    k: i32,

    /// Find and print the full alignment path
    #[arg(short = 'p')]
    find_alignment: bool,

    /// Find start locations; superseded by -p
    #[arg(short = 'l')]
    find_start_locations: bool,

    /// Alignment path format: NICE, CIG_STD or CIG_EXT; used with -p
    #[arg(short = 'f', default_value = "NICE", value_name = "FORMAT")]
    format: String,

    /// Silent mode: no per-pair output, computation still runs
    #[arg(short = 's')]
    silent: bool,

    /// Repeat each alignment N times; useful only for timing
    #[arg(short = 'r', default_value_t = 1, value_name = "N")]
    repeats: u32,

    /// Report only the N best-scoring queries (FASTA mode); 0 = all
    #[arg(short = 'n', default_value_t = 0, value_name = "N")]
    num_best: usize,
}

/// Validated run configuration, built once before any record is processed.
struct RunConfig {
    params: EngineParams,
    format: ReportFormat,
    silent: bool,
    repeats: u32,
    num_best: usize,
}

impl RunConfig {
    fn from_args(args: &Args) -> Result<Self> {
        let mode: AlignMode = args.mode.parse().map_err(anyhow::Error::msg)?;
        let format: ReportFormat = args.format.parse().map_err(anyhow::Error::msg)?;
        let task = if args.find_alignment {
            TaskLevel::Path
        } else if args.find_start_locations {
            TaskLevel::Locations
        } else {
            TaskLevel::Distance
        };
        if args.repeats == 0 {
            bail!("repeat count (-r) must be at least 1");
        }
        Ok(RunConfig {
            params: EngineParams {
                k: args.k,
                mode,
                task,
            },
            format,
            silent: args.silent,
            repeats: args.repeats,
            num_best: args.num_best,
        })
    }
}

#[derive(Debug, Default)]
struct RunSummary {
    pairs: usize,
    invocations: u64,
}

fn main() -> Result<()> {
    let args = Args::try_parse().unwrap_or_else(|err| {
        use clap::error::ErrorKind;
        let _ = err.print();
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => process::exit(0),
            _ => process::exit(1),
        }
    });
    let config = RunConfig::from_args(&args)?;

    println!("Using {} alignment mode.", config.params.mode);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let started = Instant::now();
    let summary = match args.inputs.as_slice() {
        [pairs] => {
            if config.num_best > 0 {
                eprintln!("warning: -n applies to FASTA mode input only, ignoring");
            }
            run_pair_stream(pairs, &config, &mut out)?
        }
        [queries, target] => run_fasta(queries, target, &config, &mut out)?,
        _ => unreachable!("clap enforces one or two inputs"),
    };
    let elapsed = started.elapsed().as_secs_f64();

    writeln!(out)?;
    writeln!(
        out,
        "Aligned {} pair(s), {} engine invocation(s).",
        summary.pairs, summary.invocations
    )?;
    writeln!(out, "Time of searching: {elapsed:.6} s")?;
    Ok(())
}

/// Stream pairs from a two-lines-per-pair file and align each one.
fn run_pair_stream(path: &Path, config: &RunConfig, out: &mut dyn Write) -> Result<RunSummary> {
    let mut reader = PairReader::from_path(path)?;
    let mut summary = RunSummary::default();
    // One pair's buffers are live at a time; each is dropped at the end of
    // its iteration.
    while let Some(pair) = reader.next_pair()? {
        let outcome = run_repeated(&pair.query, &pair.target, config)?;
        if !config.silent {
            let label = format!("#{}", summary.pairs);
            report_outcome(out, &label, &pair.query, &pair.target, &outcome, config)?;
        }
        summary.pairs += 1;
        summary.invocations += u64::from(config.repeats);
    }
    Ok(summary)
}

/// Align every query record against the first target record, then report
/// all of them or only the best-scoring `-n`.
fn run_fasta(
    queries_path: &Path,
    target_path: &Path,
    config: &RunConfig,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let queries = read_fasta(queries_path)?;
    let targets = read_fasta(target_path)?;
    let Some(target) = targets.first() else {
        bail!("no sequences in target file {}", target_path.display());
    };
    if targets.len() > 1 {
        eprintln!(
            "warning: {} holds {} sequences, aligning against the first only",
            target_path.display(),
            targets.len()
        );
    }
    writeln!(
        out,
        "Comparing {} queries to target {} ({} bp)...",
        queries.len(),
        target.id,
        target.seq.len()
    )?;

    let mut summary = RunSummary::default();
    let mut outcomes = Vec::with_capacity(queries.len());
    for query in &queries {
        outcomes.push(run_repeated(&query.seq, &target.seq, config)?);
        summary.pairs += 1;
        summary.invocations += u64::from(config.repeats);
    }

    if !config.silent {
        let mut order: Vec<usize> = (0..outcomes.len()).collect();
        if config.num_best > 0 {
            // Unresolved scores (distance above k) rank last.
            order.sort_by_key(|&i| outcomes[i].distance.map_or(u32::MAX, |d| d));
            order.truncate(config.num_best);
        }
        for &i in &order {
            let label = format!("#{i} ({})", queries[i].id);
            report_outcome(out, &label, &queries[i].seq, &target.seq, &outcomes[i], config)?;
        }
    }
    Ok(summary)
}

/// Invoke the engine `repeats` times over one pair; every invocation is
/// identical and only the last result is kept.
fn run_repeated(query: &[u8], target: &[u8], config: &RunConfig) -> Result<AlignOutcome> {
    let mut outcome = align_pair(query, target, &config.params)?;
    for _ in 1..config.repeats {
        outcome = align_pair(query, target, &config.params)?;
    }
    Ok(outcome)
}

fn report_outcome(
    out: &mut dyn Write,
    label: &str,
    query: &[u8],
    target: &[u8],
    outcome: &AlignOutcome,
    config: &RunConfig,
) -> Result<()> {
    let Some(distance) = outcome.distance else {
        writeln!(out, "{label}: -1")?;
        return Ok(());
    };
    writeln!(out, "{label}: {distance}")?;

    if config.params.task >= TaskLevel::Locations {
        if let Some(ends) = &outcome.end_locations {
            writeln!(out, "  end locations: {ends:?}")?;
        }
        if let Some(starts) = &outcome.start_locations {
            writeln!(out, "  start locations: {starts:?}")?;
        }
    }

    if config.params.task == TaskLevel::Path {
        if let Some(trace) = &outcome.trace {
            let target_end = outcome
                .end_locations
                .as_ref()
                .and_then(|ends| ends.first().copied())
                .context("engine reported an alignment path without an end location")?;
            write_alignment(out, query, target, trace, config.params.mode, target_end, config.format)?;
        }
    }
    Ok(())
}
