use crate::billing::{aggregate, usd, OutputFormat, PlayType, PricingSchedule};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::loader::{load_catalog, load_invoice};
use crate::telemetry;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "theater-billing",
    about = "Price theatrical performances and print customer statements",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the statement for an invoice
    Statement(StatementArgs),
    /// Price a single hypothetical performance
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Clone)]
pub(crate) struct StatementArgs {
    /// Invoice file (.json, or .csv with playID,audience columns)
    #[arg(long)]
    pub(crate) invoice: PathBuf,
    /// Play catalog (.json or .csv); falls back to THEATER_PLAYS_PATH
    #[arg(long)]
    pub(crate) plays: Option<PathBuf>,
    /// Customer name; required for CSV invoices, overrides JSON ones
    #[arg(long)]
    pub(crate) customer: Option<String>,
    /// Output format: text, html or json; falls back to STATEMENT_FORMAT
    #[arg(long)]
    pub(crate) format: Option<OutputFormat>,
    /// Write the statement to a file instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Copy)]
pub(crate) struct QuoteArgs {
    /// Play type (tragedy or comedy)
    #[arg(long = "type")]
    pub(crate) play_type: PlayType,
    /// Number of seats sold
    #[arg(long)]
    pub(crate) audience: u32,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "theater billing starting");

    match cli.command {
        Command::Statement(args) => {
            let output = args.output.clone();
            let rendered = render_statement(args, &config)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    info!(path = %path.display(), "statement written");
                }
                None => print!("{rendered}"),
            }
            Ok(())
        }
        Command::Quote(args) => {
            println!("{}", render_quote(args));
            Ok(())
        }
    }
}

pub(crate) fn render_statement(
    args: StatementArgs,
    config: &AppConfig,
) -> Result<String, AppError> {
    let plays = args
        .plays
        .or_else(|| config.statement.plays_path.clone())
        .ok_or(AppError::MissingCatalog)?;
    let format = match args.format {
        Some(format) => format,
        None => config.statement.default_format()?,
    };

    let catalog = load_catalog(&plays)?;
    let invoice = load_invoice(&args.invoice, args.customer.as_deref())?;
    let statement = aggregate(&invoice, &catalog)?;

    info!(
        customer = %statement.customer,
        format = format.label(),
        "rendering statement"
    );
    Ok(format.render(&statement)?)
}

pub(crate) fn render_quote(args: QuoteArgs) -> String {
    let schedule = PricingSchedule::standard();
    let amount = schedule.amount(args.play_type, args.audience);
    let credits = schedule.volume_credits(args.play_type, args.audience);

    match amount {
        Some(amount) => format!(
            "{} for {} seats: {} ({} credits)",
            args.play_type,
            args.audience,
            usd(amount),
            credits
        ),
        None => format!(
            "{} for {} seats: amount exceeds the representable range",
            args.play_type, args.audience
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppEnvironment, StatementConfig, TelemetryConfig};
    use std::path::Path;

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn config(plays_path: Option<PathBuf>) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            statement: StatementConfig {
                format: None,
                plays_path,
            },
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
            },
        }
    }

    fn args(invoice: &str) -> StatementArgs {
        StatementArgs {
            invoice: fixture(invoice),
            plays: None,
            customer: None,
            format: None,
            output: None,
        }
    }

    #[test]
    fn statement_uses_configured_catalog_and_format() {
        let config = config(Some(fixture("plays.json")));
        let rendered = render_statement(args("invoice.json"), &config).expect("statement renders");
        assert!(rendered.starts_with("Statement for BigCo\n"));
        assert!(rendered.ends_with("You earned 40 credits\n"));
    }

    #[test]
    fn statement_flags_override_config() {
        let mut args = args("performances.csv");
        args.plays = Some(fixture("plays.csv"));
        args.customer = Some("SmallCo".to_string());
        args.format = Some(OutputFormat::Html);

        let rendered = render_statement(args, &config(None)).expect("statement renders");
        assert!(rendered.contains("<h1>Statement for SmallCo</h1>"));
    }

    #[test]
    fn format_flag_bypasses_invalid_configured_format() {
        let mut config = config(Some(fixture("plays.json")));
        config.statement.format = Some("pdf".to_string());

        let err = render_statement(args("invoice.json"), &config)
            .expect_err("configured format is invalid");
        assert!(matches!(err, AppError::Config(_)));

        let mut args = args("invoice.json");
        args.format = Some(OutputFormat::Json);
        let rendered = render_statement(args, &config).expect("flag wins over config");
        assert!(rendered.contains("\"total_amount\": 147500"));
    }

    #[test]
    fn statement_without_catalog_fails() {
        let err = render_statement(args("invoice.json"), &config(None))
            .expect_err("no catalog configured");
        assert!(matches!(err, AppError::MissingCatalog));
    }

    #[test]
    fn quote_reports_amount_and_credits() {
        let line = render_quote(QuoteArgs {
            play_type: PlayType::Comedy,
            audience: 35,
        });
        assert_eq!(line, "comedy for 35 seats: $480.00 (12 credits)");
    }

    #[test]
    fn cli_parses_statement_flags() {
        let cli = Cli::try_parse_from([
            "theater-billing",
            "statement",
            "--invoice",
            "invoice.json",
            "--format",
            "html",
        ])
        .expect("arguments parse");
        match cli.command {
            Command::Statement(args) => assert_eq!(args.format, Some(OutputFormat::Html)),
            other => panic!("expected statement command, got {other:?}"),
        }
    }
}
