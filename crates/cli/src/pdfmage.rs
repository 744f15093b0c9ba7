//! pdfmage - Rebuild reading columns from extracted PDF words
//!
//! A command line tool that reads a word dump (text plus bounding boxes per
//! page, as produced by any PDF text extractor), groups the words into
//! clusters and columns, and writes the text in column reading order or the
//! full structure as JSON.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use pdfmage_core::api::{ExtractOptions, JsonWordSource, extract_columns};
use pdfmage_core::converter::{TextConverter, write_json};
use pdfmage_core::layout::{LayoutParams, MergeMode};
use tracing_subscriber::EnvFilter;

/// Output type for the reconstructed layout.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq)]
enum OutputType {
    /// Plain text, one line per cluster, columns separated by blank lines (default)
    #[default]
    Text,
    /// JSON with columns, clusters, labels and word boxes
    Json,
}

/// Rebuild reading columns from a JSON word dump.
#[derive(Parser, Debug)]
#[command(name = "pdfmage")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// One or more word dump files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Use debug logging level
    #[arg(short = 'd', long, action = ArgAction::SetTrue)]
    debug: bool,

    /// JSON file with layout parameters; flags below override it
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    // === Page selection ===
    /// A comma- or space-separated list of page numbers to process (1-indexed)
    #[arg(short = 'p', long = "page-numbers")]
    page_numbers: Option<String>,

    /// The maximum number of pages to process (0 = no limit)
    #[arg(short = 'm', long, default_value = "0")]
    maxpages: usize,

    /// Worker threads (defaults to available parallelism)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    // === Layout options ===
    /// Radius for grouping words into clusters
    #[arg(short = 'W', long = "word-eps")]
    word_eps: Option<f64>,

    /// Radius for grouping clusters into columns
    #[arg(short = 'C', long = "column-eps")]
    column_eps: Option<f64>,

    /// Word box scale factors as "X,Y"
    #[arg(short = 'E', long = "extend")]
    extend: Option<String>,

    /// Word distance weights as "X,Y"
    #[arg(long = "word-weights")]
    word_weights: Option<String>,

    /// Column distance weights as "X,Y"
    #[arg(long = "column-weights")]
    column_weights: Option<String>,

    /// Merge overlapping clusters in a single pass instead of to a fixed point
    #[arg(long = "single-pass-merge", action = ArgAction::SetTrue)]
    single_pass_merge: bool,

    // === Debug overlays ===
    /// Write an overlay image per page
    #[arg(long = "debug-images", action = ArgAction::SetTrue)]
    debug_images: bool,

    /// Draw word boxes on overlays
    #[arg(long = "debug-words", action = ArgAction::SetTrue)]
    debug_words: bool,

    /// Draw cluster boxes on overlays (on by default)
    #[arg(long = "debug-clusters", action = ArgAction::SetTrue, conflicts_with = "no_debug_clusters")]
    debug_clusters: bool,

    /// Do not draw cluster boxes on overlays
    #[arg(long = "no-debug-clusters", action = ArgAction::SetTrue)]
    no_debug_clusters: bool,

    /// Draw column boxes on overlays
    #[arg(long = "debug-columns", action = ArgAction::SetTrue)]
    debug_columns: bool,

    /// Directory receiving overlay images
    #[arg(short = 'O', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Overlay resolution in dots per inch
    #[arg(long)]
    dpi: Option<u32>,

    // === Output options ===
    /// Path to file where output is written, or "-" for stdout
    #[arg(short = 'o', long, default_value = "-")]
    outfile: String,

    /// Type of output to generate
    #[arg(short = 't', long = "output-type", value_enum, default_value = "text")]
    output_type: OutputType,

    /// Write a "Page N" header before each page of text output
    #[arg(long = "show-page-numbers", action = ArgAction::SetTrue)]
    show_page_numbers: bool,
}

/// Parse an "X,Y" pair of floats.
fn parse_pair(s: &str) -> std::result::Result<(f64, f64), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [x, y] => {
            let x = x
                .parse::<f64>()
                .map_err(|_| format!("invalid float value: {}", x))?;
            let y = y
                .parse::<f64>()
                .map_err(|_| format!("invalid float value: {}", y))?;
            Ok((x, y))
        }
        _ => Err(format!("expected two comma-separated numbers, got {:?}", s)),
    }
}

/// Parse page numbers from --page-numbers.
fn parse_page_numbers(args: &Args) -> Option<Vec<usize>> {
    let nums: Vec<usize> = args
        .page_numbers
        .as_deref()?
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .collect();
    if nums.is_empty() { None } else { Some(nums) }
}

/// Build LayoutParams from the config file (if any) and command line flags.
fn build_params(args: &Args) -> Result<LayoutParams> {
    let mut params = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            LayoutParams::from_json(&json)?
        }
        None => LayoutParams::default(),
    };

    if let Some(eps) = args.word_eps {
        params.word_cluster_eps = eps;
    }
    if let Some(eps) = args.column_eps {
        params.column_cluster_eps = eps;
    }
    if let Some(s) = &args.extend {
        params.extend_word_coordinates = parse_pair(s).map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = &args.word_weights {
        params.word_distance_weights = parse_pair(s).map_err(anyhow::Error::msg)?;
    }
    if let Some(s) = &args.column_weights {
        params.column_distance_weights = parse_pair(s).map_err(anyhow::Error::msg)?;
    }
    if args.single_pass_merge {
        params.merge_mode = MergeMode::SinglePass;
    }

    params.debug.images |= args.debug_images;
    params.debug.words |= args.debug_words;
    params.debug.columns |= args.debug_columns;
    params.debug.clusters |= args.debug_clusters;
    if args.no_debug_clusters {
        params.debug.clusters = false;
    }
    if let Some(dir) = &args.output_dir {
        params.debug.output_dir = dir.clone();
    }
    if let Some(dpi) = args.dpi {
        params.debug.dpi = dpi;
    }

    params.validate()?;
    Ok(params)
}

/// Process a single word dump.
fn process_file<W: Write>(
    path: &PathBuf,
    writer: &mut W,
    args: &Args,
    params: &LayoutParams,
) -> Result<()> {
    let source = JsonWordSource::from_path(path)?;

    let options = ExtractOptions {
        pages: parse_page_numbers(args),
        max_pages: args.maxpages,
        threads: args.threads,
    };

    let pages = extract_columns(&source, params, &options, None)?;
    tracing::debug!(file = %path.display(), pages = pages.len(), "processed file");

    match args.output_type {
        OutputType::Text => {
            let mut converter = TextConverter::new(writer, args.show_page_numbers);
            for (&page_number, columns) in &pages {
                converter.receive_columns(page_number, columns)?;
            }
        }
        OutputType::Json => write_json(writer, &pages)?,
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    let params = build_params(&args)?;

    // Open output file or use stdout
    let mut output: Box<dyn Write> = if args.outfile == "-" {
        Box::new(BufWriter::new(io::stdout()))
    } else {
        let file = File::create(&args.outfile)
            .with_context(|| format!("failed to create output file {}", args.outfile))?;
        Box::new(BufWriter::new(file))
    };

    for path in &args.files {
        if !path.exists() {
            bail!("file not found: {}", path.display());
        }
        process_file(path, &mut output, &args, &params)
            .with_context(|| format!("error processing {}", path.display()))?;
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pdfmage"];
        argv.extend_from_slice(extra);
        argv.push("words.json");
        Args::parse_from(argv)
    }

    #[test]
    fn parse_pair_accepts_two_floats() {
        assert_eq!(parse_pair("1.2, 1.5"), Ok((1.2, 1.5)));
        assert!(parse_pair("1.2").is_err());
        assert!(parse_pair("a,b").is_err());
    }

    #[test]
    fn page_numbers_accept_commas_and_spaces() {
        let a = args(&["-p", "1,3 5"]);
        assert_eq!(parse_page_numbers(&a), Some(vec![1, 3, 5]));
        assert_eq!(parse_page_numbers(&args(&[])), None);
        assert_eq!(parse_page_numbers(&args(&["-p", "0"])), None);
    }

    #[test]
    fn flags_override_defaults() {
        let a = args(&[
            "--word-eps",
            "4",
            "--extend",
            "1.2,1.0",
            "--single-pass-merge",
            "--debug-images",
            "--no-debug-clusters",
        ]);
        let params = build_params(&a).unwrap();
        assert_eq!(params.word_cluster_eps, 4.0);
        assert_eq!(params.column_cluster_eps, 200.0);
        assert_eq!(params.extend_word_coordinates, (1.2, 1.0));
        assert_eq!(params.merge_mode, MergeMode::SinglePass);
        assert!(params.debug.images);
        assert!(!params.debug.clusters);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(build_params(&args(&["--column-eps=-1"])).is_err());
        assert!(build_params(&args(&["--word-eps", "0"])).is_err());
        assert!(build_params(&args(&["--dpi", "0"])).is_err());
        assert!(build_params(&args(&["--extend", "1.0"])).is_err());
    }

    #[test]
    fn bare_negative_value_is_a_parse_error() {
        let err = Args::try_parse_from(["pdfmage", "--column-eps", "-1", "words.json"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
