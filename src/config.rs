//! Command line configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use tender_pricing::discounts::DiscountMode;

/// Tender pricing command line
#[derive(Debug, Parser)]
#[command(
    name = "tender-pricing",
    about = "Line-item discount calculator for order and tender items tables",
    long_about = None
)]
pub(crate) struct Config {
    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,

    /// Command to run.
    #[command(subcommand)]
    pub(crate) command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Log level used when none is configured, or the configured one cannot be parsed.
pub(crate) const DEFAULT_LOG_LEVEL: &str = "info";

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = DEFAULT_LOG_LEVEL,
        global = true
    )]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub(crate) log_format: LogFormat,
}

/// Subcommands
#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Print the items table and totals for an order sheet.
    Report {
        /// Order sheet (YAML, or a JSON response envelope)
        file: PathBuf,
    },

    /// Print the request payloads for every line of an order sheet as JSON.
    Payload {
        /// Order sheet (YAML, or a JSON response envelope)
        file: PathBuf,
    },

    /// Calculate a single line.
    Calc(CalcArgs),
}

/// Arguments for a single line calculation, as typed text.
#[derive(Debug, Args)]
pub(crate) struct CalcArgs {
    /// Unit price, e.g. "1,250.50"
    #[arg(long)]
    pub(crate) unit_price: String,

    /// Quantity; omitted means one unit
    #[arg(long)]
    pub(crate) quantity: Option<String>,

    /// Discount mode
    #[arg(long, value_enum, default_value_t = DiscountMode::Percent)]
    pub(crate) mode: DiscountMode,

    /// Discount value in the chosen mode
    #[arg(long, default_value = "0")]
    pub(crate) discount: String,

    /// Print the derived values as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_calc_command() -> TestResult {
        let config = Config::try_parse_from([
            "tender-pricing",
            "calc",
            "--unit-price",
            "1,250.50",
            "--quantity",
            "3",
            "--mode",
            "amount",
            "--discount",
            "25",
        ])?;

        let Command::Calc(args) = config.command else {
            return Err("expected calc command".into());
        };

        assert_eq!(args.unit_price, "1,250.50");
        assert_eq!(args.quantity.as_deref(), Some("3"));
        assert_eq!(args.mode, DiscountMode::Amount);
        assert_eq!(args.discount, "25");
        assert!(!args.json);

        Ok(())
    }

    #[test]
    fn parses_report_command_with_logging() -> TestResult {
        let config = Config::try_parse_from([
            "tender-pricing",
            "report",
            "sheet.yaml",
            "--log-format",
            "json",
            "--log-level",
            "debug",
        ])?;

        assert!(matches!(
            config.command,
            Command::Report { ref file } if file.ends_with("sheet.yaml")
        ));
        assert_eq!(config.logging.log_format, LogFormat::Json);
        assert_eq!(config.logging.log_level, "debug");

        Ok(())
    }

    #[test]
    fn calc_defaults_to_percent_mode() -> TestResult {
        let config = Config::try_parse_from(["tender-pricing", "calc", "--unit-price", "10"])?;

        let Command::Calc(args) = config.command else {
            return Err("expected calc command".into());
        };

        assert_eq!(args.mode, DiscountMode::Percent);
        assert_eq!(args.discount, "0");
        assert_eq!(args.quantity, None);

        Ok(())
    }

    #[test]
    fn logging_defaults_to_info_compact() -> TestResult {
        if std::env::var_os("RUST_LOG").is_some() || std::env::var_os("LOG_FORMAT").is_some() {
            return Ok(());
        }

        let config = Config::try_parse_from(["tender-pricing", "payload", "sheet.yaml"])?;

        assert_eq!(config.logging.log_level, "info");
        assert_eq!(config.logging.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn missing_command_is_an_error() {
        assert!(Config::try_parse_from(["tender-pricing"]).is_err());
    }
}
