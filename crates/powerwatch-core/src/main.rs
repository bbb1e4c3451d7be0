//! PowerWatch CLI
//!
//! Checks a prepaid electricity balance once and emails alerts when it is low.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info};

use powerwatch::alerting::{DryRunMailer, SmtpNotifier};
use powerwatch::config::{load_env_file, LoggingConfig};
use powerwatch::desco::DescoClient;
use powerwatch::monitor::{self, BalanceMonitor, RunReport, RunState};
use powerwatch::{telemetry, Config};

/// PowerWatch - prepaid balance alerts
#[derive(Parser)]
#[command(name = "powerwatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Dotenv file to load instead of ./.env
    #[arg(long, env = "POWERWATCH_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Evaluate thresholds and render emails without sending them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Before logging, so LOG_LEVEL and LOG_FORMAT can come from the file
    let env_file = load_env_file(cli.env_file.as_deref());

    telemetry::init(&LoggingConfig::from_env(), cli.verbose);

    let result = match env_file {
        Ok(path) => {
            if let Some(path) = path {
                debug!(path = %path.display(), "Loaded environment file");
            }
            run(&cli).await
        }
        Err(e) => Err(e.into()),
    };

    ExitCode::from(monitor::exit_status(&result))
}

async fn run(cli: &Cli) -> powerwatch::Result<RunReport> {
    let config = Config::load()?;
    monitor::transition(RunState::Idle, RunState::ConfigLoaded);
    let source = DescoClient::new()?;

    if cli.dry_run {
        info!("Dry run enabled, notifications will be logged only");
        BalanceMonitor::new(config, source, DryRunMailer::new())
            .run()
            .await
    } else {
        let mailer = SmtpNotifier::new(&config)?;
        BalanceMonitor::new(config, source, mailer).run().await
    }
}
