use anyhow::Result;
use audit_log_viewer::audit::category::OperationCategory;
use audit_log_viewer::audit::loader::load_log;
use audit_log_viewer::commands::{self, entries::EntryLimit, OutputFormat};
use clap::{ArgAction, CommandFactory, Parser};
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "audit-view")]
#[command(about = "OpenBao audit log viewer - parse and analyze audit logs", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to audit log file (.gz and .zst are decompressed automatically)
    #[arg(
        short,
        long,
        env = "AUDIT_LOG_FILE",
        default_value = "./openbao/logs/audit.log"
    )]
    file: String,

    /// Show summary statistics
    #[arg(short, long)]
    summary: bool,

    /// Show N most recent entries (0 shows the default of 10)
    #[arg(short, long, value_name = "N")]
    entries: Option<usize>,

    /// Show every entry instead of a limited page
    #[arg(short, long, conflicts_with = "entries")]
    all: bool,

    /// Filter entries by operation type (e.g. "Key Management")
    #[arg(short = 't', long, value_name = "TYPE")]
    filter: Option<OperationCategory>,

    /// Search for entries containing specific text
    #[arg(short = 'q', long, value_name = "TERM")]
    search: Option<String>,

    /// Match the search term case-sensitively
    #[arg(short, long, requires = "search")]
    case_sensitive: bool,

    /// Export report to specified file
    #[arg(short = 'x', long, value_name = "PATH")]
    export: Option<String>,

    /// Output format for summary, entries and search
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Increase diagnostic output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Print a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    generate_completion: Option<clap_complete::Shell>,
}

impl Cli {
    fn listing_requested(&self) -> bool {
        self.entries.is_some() || self.all || self.filter.is_some()
    }

    fn entry_limit(&self) -> EntryLimit {
        if self.all {
            EntryLimit::All
        } else {
            self.entries.map_or(EntryLimit::Default, EntryLimit::from_count)
        }
    }
}

/// Log level used when `RUST_LOG` is not set.
fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

fn init_logging(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "audit-view", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);

    let log = load_log(&cli.file)?;
    eprintln!("Loaded {} audit log entries", log.len());
    if !log.diagnostics.is_empty() {
        eprintln!("Skipped {} unparsable line(s)", log.diagnostics.len());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(destination) = &cli.export {
        match commands::export::run(&log, destination) {
            Ok(()) => eprintln!("\nReport exported to: {}", destination),
            Err(e) => eprintln!("{}", e),
        }
    }

    if cli.summary {
        commands::summary::run(&mut out, &log, cli.format)?;
    }

    if let Some(term) = &cli.search {
        commands::search::run(&mut out, &log, term, cli.case_sensitive, cli.format)?;
    }

    if cli.listing_requested() {
        commands::entries::run(&mut out, &log, cli.entry_limit(), cli.filter, cli.format)?;
    } else if !cli.summary && cli.search.is_none() && cli.export.is_none() {
        commands::summary::run(&mut out, &log, cli.format)?;
        commands::entries::run(&mut out, &log, EntryLimit::Default, None, cli.format)?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("audit-view").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_summary_alone_is_not_a_listing() {
        let cli = parse(&["--summary"]);
        assert!(cli.summary);
        assert!(!cli.listing_requested());
    }

    #[test]
    fn test_entry_limits() {
        assert_eq!(parse(&["-e", "0"]).entry_limit(), EntryLimit::Default);
        assert_eq!(parse(&["-e", "25"]).entry_limit(), EntryLimit::Count(25));
        assert_eq!(parse(&["--all"]).entry_limit(), EntryLimit::All);
        assert!(parse(&["--all"]).listing_requested());
    }

    #[test]
    fn test_filter_parses_label() {
        let cli = parse(&["--filter", "key-management"]);
        assert_eq!(cli.filter, Some(OperationCategory::KeyManagement));
        assert!(cli.listing_requested());
        assert!(Cli::try_parse_from(["audit-view", "--filter", "Billing"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(default_log_level(parse(&[]).verbose), "warn");
        assert_eq!(default_log_level(parse(&["-v"]).verbose), "info");
        assert_eq!(default_log_level(parse(&["-vv"]).verbose), "debug");
        assert_eq!(default_log_level(parse(&["-vvv"]).verbose), "debug");
    }

    #[test]
    fn test_case_sensitive_requires_search() {
        assert!(Cli::try_parse_from(["audit-view", "--case-sensitive"]).is_err());
        let cli = parse(&["-q", "Patient", "-c"]);
        assert!(cli.case_sensitive);
    }
}
