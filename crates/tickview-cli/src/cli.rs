//! CLI argument definitions for tickview.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `show` | Render the dashboard for a ticker and period |
//! | `periods` | List selectable periods |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `text` | Output format (text, json) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--mock` | `false` | Use the offline sample provider |
//! | `--timeout-ms` | `10000` | Request timeout in ms |
//! | `--log-format` | `text` | Log line format on stderr (text, json) |
//!
//! # Examples
//!
//! ```bash
//! # Default ticker over one year
//! tickview show
//!
//! # Apple over six months as JSON
//! tickview show aapl --period 6mo --format json --pretty
//!
//! # Offline demo
//! tickview --mock show MSFT --period 1mo
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

use tickview_core::{http_client::DEFAULT_TIMEOUT_MS, DEFAULT_TICKER};

/// Single-ticker stock dashboard for the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "tickview",
    author,
    version,
    about = "Single-ticker stock dashboard",
    long_about = "Fetches descriptive quote data and daily closes for one ticker, \
computes start/low/high/current prices and percent change over the selected period, \
and prints the dashboard page."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Serve data from the built-in offline sample provider.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Request timeout budget in milliseconds.
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Log line format written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal rendering with an ASCII price chart.
    Text,
    /// The page widget tree as JSON.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the dashboard for one ticker.
    Show(ShowArgs),
    /// List the selectable periods.
    Periods,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Ticker symbol, case-insensitive.
    #[arg(default_value = DEFAULT_TICKER)]
    pub ticker: String,

    /// Period code: 1y, 6mo, 3mo or 1mo.
    #[arg(long, short, default_value = "1y")]
    pub period: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_defaults_to_placeholder_ticker_and_one_year() {
        let cli = Cli::try_parse_from(["tickview", "show"]).expect("parses");

        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.ticker, "MSTR");
        assert_eq!(args.period, "1y");
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.timeout_ms, 10_000);
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from([
            "tickview", "show", "aapl", "-p", "6mo", "--mock", "--format", "json",
        ])
        .expect("parses");

        assert!(cli.mock);
        assert_eq!(cli.format, OutputFormat::Json);
        let Command::Show(args) = cli.command else {
            panic!("expected show");
        };
        assert_eq!(args.ticker, "aapl");
        assert_eq!(args.period, "6mo");
    }
}
