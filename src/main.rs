mod error;
mod file_loader;
mod file_source;
mod report;
mod rule;
mod scan;

use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use error::Result;
use file_loader::MappedFile;
use file_source::{LineSource, TextBuffer};
use report::{ReportOptions, Reporter};
use rule::{parse_rule_spec, MatchRule, RuleSpec};
use scan::{scan, scan_source, Scan};

const STDIN_NAME: &str = "<stdin>";

#[derive(Parser)]
#[command(name = "linescan")]
#[command(about = "Read a text file line by line and report the lines matching a rule")]
struct Args {
    /// File to scan, or `-` for standard input
    file: PathBuf,

    /// exact:<text>, contains:<text> or regex:<pattern>; without it every line is listed
    #[arg(value_parser = parse_rule_spec)]
    rule: Option<RuleSpec>,

    /// Print matched lines only
    #[arg(short = 'o', long, requires = "rule")]
    only_matching: bool,

    /// Prefix printed lines with their line number
    #[arg(short = 'n', long, requires = "rule")]
    line_numbers: bool,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = ReportOptions {
        only_matching: args.only_matching,
        line_numbers: args.line_numbers,
    };
    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), options);

    if let Err(write_err) = execute(&args, io::stdin().lock(), &mut reporter) {
        eprintln!("Failed to write report: {}", write_err);
    }
}

/// Runs one scan and reports a failure as a diagnostic; the process then ends normally.
fn execute<R: Read, W: Write>(args: &Args, stdin: R, reporter: &mut Reporter<W>) -> io::Result<()> {
    match run(args, stdin, reporter) {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!(file = %args.file.display(), error = %e, "scan failed");
            reporter.failure(&e)
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

fn run<R: Read, W: Write>(args: &Args, stdin: R, reporter: &mut Reporter<W>) -> Result<()> {
    // Build the rule first so a bad pattern is reported before any file is touched.
    let rule = args.rule.as_ref().map(RuleSpec::build).transpose()?;
    let from_stdin = args.file == Path::new("-");

    match (rule, from_stdin) {
        (Some(rule), false) => report_scan(scan(&args.file, &rule)?, reporter),
        (Some(rule), true) => {
            let source = TextBuffer::from_reader(STDIN_NAME, stdin)?;
            report_scan(scan_source(source, &rule), reporter)
        }
        (None, false) => report_listing(&MappedFile::open(&args.file)?, reporter),
        (None, true) => {
            let source = TextBuffer::from_reader(STDIN_NAME, stdin)?;
            report_listing(&source, reporter)
        }
    }
}

fn report_scan<S: LineSource, W: Write>(
    mut scan: Scan<'_, S>,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    let rule: &MatchRule = scan.rule();
    let total = scan.line_count();
    for entry in scan.by_ref() {
        reporter.entry(rule, &entry)?;
    }
    tracing::debug!(total, matched = scan.matched_count(), "report written");
    reporter.finish(true)?;
    Ok(())
}

fn report_listing<S: LineSource, W: Write>(source: &S, reporter: &mut Reporter<W>) -> Result<()> {
    tracing::debug!(source = source.display_name(), lines = source.line_count(), "listing");
    for line_num in 0..source.line_count() {
        if let Some(text) = source.get_line(line_num) {
            reporter.listing(line_num, &text)?;
        }
    }
    reporter.finish(false)?;
    Ok(())
}
