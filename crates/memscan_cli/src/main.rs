//! msc: The memscan command-line interface.
//!
//! Usage:
//!   msc [options] [FILE...]
//!
//! Reads each input file fully into memory, scans it for multiply and
//! toggle instructions, and prints both totals: the unconditional sum of
//! every multiply, and the conditional sum that honors `do()`/`don't()`.

use clap::{Parser as ClapParser, ValueEnum};
use memscan_core::text::LineMap;
use memscan_eval::{parallel, report, scan_totals_with, MatcherKind, ScanReport, Totals};
use std::process;
use std::time::Instant;

#[derive(ClapParser, Debug)]
#[command(name = "msc", about = "memscan - scans noisy buffers for multiply instructions", disable_version_flag = true)]
struct Cli {
    /// Files to scan.
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    /// Matcher backend to drive the scan with.
    #[arg(long, value_enum, default_value = "direct")]
    matcher: MatcherArg,

    /// Scan in parallel chunks (direct matcher only).
    #[arg(long)]
    parallel: bool,

    /// List every recognized instruction with its position.
    #[arg(long)]
    list: bool,

    /// Emit machine-readable JSON instead of text.
    #[arg(long)]
    json: bool,

    /// Enable colored output.
    #[arg(long, default_value_t = true)]
    pretty: bool,

    /// Print the version.
    #[arg(short = 'v', long)]
    version: bool,
}

/// Matcher backend choices exposed on the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MatcherArg {
    /// Direct byte-comparison scanner.
    Direct,
    /// Regex-backed scanner.
    Regex,
}

impl From<MatcherArg> for MatcherKind {
    fn from(arg: MatcherArg) -> Self {
        match arg {
            MatcherArg::Direct => MatcherKind::Direct,
            MatcherArg::Regex => MatcherKind::Regex,
        }
    }
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();

    if cli.version {
        println!("msc Version 0.1.0");
        return;
    }

    let exit_code = run_scan(&cli);
    process::exit(exit_code);
}

fn run_scan(cli: &Cli) -> i32 {
    let start = Instant::now();

    if cli.files.is_empty() {
        print_error("No input files given.");
        return 1;
    }

    if cli.parallel && cli.matcher == MatcherArg::Regex {
        print_error("--parallel is only available with the direct matcher.");
        return 1;
    }

    let use_color = cli.pretty && !cli.json && atty_is_terminal();

    for path in &cli.files {
        let buffer = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                print_error(&format!("Failed to read '{}': {}", path, e));
                return 1;
            }
        };

        if cli.list || cli.json {
            let rep = match report(&buffer) {
                Ok(rep) => rep,
                Err(e) => {
                    print_error(&format!("{}: {}", path, e));
                    return 1;
                }
            };
            if cli.json {
                print_json(path, &rep, cli.list);
            } else {
                print_listing(path, &buffer, &rep, use_color);
                print_totals(path, rep.totals, use_color);
            }
            continue;
        }

        let result = if cli.parallel {
            parallel::scan_totals(&buffer)
        } else {
            scan_totals_with(cli.matcher.into(), &buffer)
        };

        match result {
            Ok(totals) => print_totals(path, totals, use_color),
            Err(e) => {
                print_error(&format!("{}: {}", path, e));
                return 1;
            }
        }
    }

    let elapsed = start.elapsed();
    if use_color {
        eprintln!(
            "{}Scanned {} file{} in {:.2?}.{}",
            GRAY,
            cli.files.len(),
            if cli.files.len() == 1 { "" } else { "s" },
            elapsed,
            RESET
        );
    }

    0
}

fn print_totals(path: &str, totals: Totals, use_color: bool) {
    if use_color {
        println!(
            "{}{}{}: unconditional {}{}{}  conditional {}{}{}",
            CYAN, path, RESET, BOLD, totals.unconditional, RESET, BOLD, totals.conditional, RESET
        );
    } else {
        println!(
            "{}: unconditional {}  conditional {}",
            path, totals.unconditional, totals.conditional
        );
    }
}

fn print_listing(path: &str, buffer: &[u8], rep: &ScanReport, use_color: bool) {
    let line_map = LineMap::new(buffer);
    for info in &rep.tokens {
        let lc = line_map.line_and_column_of(info.span.start);
        if use_color {
            println!(
                "{}{}:{}:{}{}  {}",
                CYAN,
                path,
                lc.line + 1,
                lc.column + 1,
                RESET,
                info.token
            );
        } else {
            println!("{}:{}:{}  {}", path, lc.line + 1, lc.column + 1, info.token);
        }
    }
    println!(
        "{} instruction{} ({} mul, {} suppressed, {} do, {} don't)",
        rep.tokens.len(),
        if rep.tokens.len() == 1 { "" } else { "s" },
        rep.mul_count,
        rep.suppressed_count,
        rep.do_count,
        rep.dont_count
    );
}

fn print_json(path: &str, rep: &ScanReport, include_tokens: bool) {
    let value = if include_tokens {
        serde_json::json!({
            "file": path,
            "totals": rep.totals,
            "mul_count": rep.mul_count,
            "suppressed_count": rep.suppressed_count,
            "do_count": rep.do_count,
            "dont_count": rep.dont_count,
            "tokens": rep.tokens,
        })
    } else {
        serde_json::json!({
            "file": path,
            "totals": rep.totals,
        })
    };
    println!("{}", value);
}

fn print_error(msg: &str) {
    if atty_is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

fn atty_is_terminal() -> bool {
    // Simple check - on Unix, check if stderr is a terminal
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true // Assume terminal on other platforms
    }
}
