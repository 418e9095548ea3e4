mod cli;
mod config;

use std::io::Write;
use std::process::ExitCode;

use adapters::brapi::BrapiClient;
use adapters::smtp::SmtpNotifier;
use anyhow::Context;
use clap::Parser;
use common::logger::{LogFormat, init_logger};
use corelib::Thresholds;
use engine::{MonitorConfig, MonitorLoop, Shutdown, ShutdownTrigger, shutdown_channel};
use tracing::{error, info, warn};

use cli::{Cli, EXAMPLE};
use config::{AppConfig, default_config_path};

const EXIT_OK: u8 = 0;
const EXIT_FAILURE: u8 = 1;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return ExitCode::from(report_usage_error(&e)),
    };

    init_logger("stock-alarm", LogFormat::from_env());

    // Before any startup work, so an early Ctrl+C still ends in a clean exit.
    let (trigger, shutdown) = shutdown_channel();
    spawn_ctrl_c_listener(trigger);

    let result = run(cli, shutdown).await;
    ExitCode::from(exit_status(&result))
}

/// What a failed `try_parse` should print, where, and the exit status.
struct UsageReport {
    text: String,
    to_stderr: bool,
    status: u8,
}

fn usage_report(e: &clap::Error) -> UsageReport {
    if !e.use_stderr() {
        // --help / --version
        return UsageReport {
            text: e.render().to_string(),
            to_stderr: false,
            status: EXIT_OK,
        };
    }

    UsageReport {
        text: format!("{}\n{EXAMPLE}\n", e.render()),
        to_stderr: true,
        status: EXIT_FAILURE,
    }
}

fn report_usage_error(e: &clap::Error) -> u8 {
    let report = usage_report(e);
    let written = if report.to_stderr {
        std::io::stderr().write_all(report.text.as_bytes())
    } else {
        std::io::stdout().write_all(report.text.as_bytes())
    };

    if let Err(error) = written {
        init_logger("stock-alarm", LogFormat::from_env());
        warn!(%error, "cannot print usage");
    }

    report.status
}

fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => {
            info!("program finished");
            EXIT_OK
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "startup failed");
            EXIT_FAILURE
        }
    }
}

fn configured_thresholds(cli: &Cli) -> Thresholds {
    let thresholds = Thresholds::new(cli.buy_price, cli.sell_price);

    info!(
        ticker = %cli.ticker,
        sell = %thresholds.sell,
        buy = %thresholds.buy,
        "monitoring configured"
    );
    if thresholds.is_degenerate() {
        warn!(
            sell = %thresholds.sell,
            buy = %thresholds.buy,
            "sell price is not above buy price, a single quote may fire both alerts"
        );
    }

    thresholds
}

async fn run(cli: Cli, shutdown: Shutdown) -> anyhow::Result<()> {
    let thresholds = configured_thresholds(&cli);

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let cfg = AppConfig::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;

    info!(
        email_to = %cfg.email_to,
        poll_interval_ms = cfg.poll_interval_ms,
        "config loaded"
    );

    // One HTTP client for the whole run.
    let source = BrapiClient::new(cfg.brapi_base_url()).context("failed to build quote client")?;
    let notifier =
        SmtpNotifier::new(cfg.smtp_settings()).context("failed to set up smtp notifier")?;

    let monitor_cfg = MonitorConfig {
        ticker: cli.ticker,
        thresholds,
        poll_interval: cfg.poll_interval(),
        auth_token: cfg.brapi_token.clone(),
    };

    info!("starting monitor, press Ctrl+C to exit");
    MonitorLoop::new(monitor_cfg, source, notifier)
        .run(shutdown)
        .await;

    Ok(())
}

fn spawn_ctrl_c_listener(trigger: ShutdownTrigger) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl+C received, shutting down");
                trigger.trigger();
            }
            Err(error) => warn!(%error, "cannot listen for Ctrl+C"),
        }
    });
}
