//! papercheck -- compare two documents and write their similarity.
//!
//! Usage: papercheck <file1> <file2> <resultFile> [chunkSizeBytes]

use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use papercheck::memory::{FixedUsage, MIB, MemorySampler, ProcessMemory};
use papercheck::mode::Mode;
use papercheck::{CheckConfig, CheckError, CheckReport, CheckRequest, PreparedCheck};

#[derive(Parser, Debug)]
#[command(name = "papercheck")]
#[command(about = "Edit-distance similarity between two documents, bounded by a memory budget")]
#[command(version)]
struct Args {
    /// Original document
    file1: Option<PathBuf>,

    /// Document to check against the original
    file2: Option<PathBuf>,

    /// File that receives the similarity percentage
    result: Option<PathBuf>,

    /// Chunk size in bytes for streaming mode (0 = derive from the budget)
    chunk_size: Option<String>,

    /// Memory limit in MiB
    #[arg(long, env = "PAPERCHECK_MEMORY_MB", default_value_t = 2048)]
    memory_mb: u64,

    /// Use a fixed current-usage figure (MiB) instead of sampling the process
    #[arg(long)]
    assume_usage_mb: Option<u64>,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays clean for the summary or JSON report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let (Some(original), Some(suspect), Some(result)) =
        (args.file1.clone(), args.file2.clone(), args.result.clone())
    else {
        Args::command().print_help()?;
        println!("\nMemory limit: {} MB", args.memory_mb);
        return Ok(());
    };

    let config = CheckConfig {
        memory_limit_bytes: args.memory_mb.saturating_mul(MIB),
        chunk_size_override: parse_chunk_size(args.chunk_size.as_deref())?,
    };
    let request = CheckRequest {
        original,
        suspect,
        result,
    };

    let sampler: Box<dyn MemorySampler> = match args.assume_usage_mb {
        Some(mb) => Box::new(FixedUsage(mb.saturating_mul(MIB))),
        None => Box::new(ProcessMemory),
    };

    let context = || {
        format!(
            "comparing {} with {}",
            request.original.display(),
            request.suspect.display()
        )
    };

    let prepared =
        papercheck::prepare(&request, &config, sampler.as_ref()).with_context(context)?;

    // Plan and mode go out before scoring so long streaming runs are not silent.
    if !args.json {
        print_plan(&prepared);
    }
    let bar = if args.json || prepared.mode == Mode::WholeFile {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("Progress: {bar:40.cyan/blue} {pos:>3}%")?
                .progress_chars("=> "),
        );
        bar
    };

    let report = papercheck::execute(&request, prepared, |percent| bar.set_position(percent))
        .with_context(context)?;
    bar.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_result(&report);
    }

    Ok(())
}

fn parse_chunk_size(raw: Option<&str>) -> Result<u64, CheckError> {
    raw.map_or(Ok(0), |s| {
        s.trim().parse::<u64>().map_err(|_| {
            CheckError::InvalidArgument(format!(
                "chunk size must be a non-negative integer number of bytes, got {s:?}"
            ))
        })
    })
}

fn print_plan(prepared: &PreparedCheck) {
    let mb = |bytes: u64| bytes as f64 / MIB as f64;
    println!("File 1 size: {:.2} MB", mb(prepared.files.size1));
    println!("File 2 size: {:.2} MB", mb(prepared.files.size2));
    println!("Chunk size: {} KB", prepared.plan.chunk_size_bytes / 1024);
    println!("Mode: {}", prepared.mode);
}

fn print_result(report: &CheckReport) {
    println!("Check complete.");
    println!("Similarity: {}%", report.percentage());
}
