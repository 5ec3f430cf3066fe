//! Binary entry point for `mention-responder`.
//!
//! Deployed as the `bootstrap` executable of an AWS Lambda custom runtime.
//! Options exist mostly for local runs; on Lambda everything comes from the
//! environment.

use clap::Parser;
use mention_responder::base::{config::Config, types::Void};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Mention-responder – replies in thread whenever the Slack bot is mentioned.
///
/// Configuration can come from `config.toml` or environment variables
/// (`SLACK_BOT_TOKEN`, `SLACK_SIGNING_SECRET`).
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the bot will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Main entry point for the `bootstrap` binary.
///
/// Sets up logging based on verbosity, loads configuration, and starts the bot.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer. CloudWatch stamps every line itself.

    let stdout = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry().with(level_filter).with(stdout).init();

    let config = Config::load(args.config.as_deref())?;

    mention_responder::start(config).await
}
