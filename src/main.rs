use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use schemars::schema_for;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use firerisk::config::AppConfig;
use firerisk::core::WeatherInputs;
use firerisk::pipeline::ModelContext;
use firerisk::session::{Session, Trigger};
use firerisk::ui::cli::InteractiveApp;
use firerisk::ui::cli::drivers::InquireDriver;

#[derive(Parser)]
#[command(name = "firerisk")]
#[command(about = "Weather-driven fire risk prediction", long_about = None)]
struct Cli {
    /// Config file (overrides FIRERISK_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Directory holding the scaler and classifier artifacts
    #[arg(long, global = true)]
    artifacts: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session (default)
    Run,
    /// Predict once from the given inputs and exit
    Predict {
        #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
        temp: f64,
        #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
        humidity: f64,
        #[arg(long, default_value_t = 15.0, allow_negative_numbers = true)]
        windspeed: f64,
        #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, default_value_t = -124.0, allow_negative_numbers = true)]
        long: f64,
    },
    /// Print the JSON schema of the config file
    ConfigSchema,
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Command::ConfigSchema)) {
        return match serde_json::to_string_pretty(&schema_for!(AppConfig)) {
            Ok(s) => {
                println!("{s}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("✗ {e}");
                ExitCode::FAILURE
            }
        };
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "firerisk stopped");
            eprintln!("✗ {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(dir) = cli.artifacts {
        config.artifact_dir = dir;
    }
    init_logging(&config.log_filter);

    let ctx = ModelContext::load(&config).context("model artifacts are not usable")?;
    info!(
        artifact_dir = %config.artifact_dir.display(),
        n_features = ctx.classifier().n_features(),
        classes = ?ctx.classifier().classes(),
        "firerisk started"
    );

    match cli.command {
        None | Some(Command::Run) => {
            let stdout = io::stdout();
            let mut app = InteractiveApp::new(&ctx, InquireDriver, stdout.lock(), &config.export_dir)?;
            app.run()?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Predict {
            temp,
            humidity,
            windspeed,
            lat,
            long,
        }) => {
            let mut session = Session::new(&ctx)?;
            session.controls_mut().apply(&WeatherInputs {
                temp,
                humidity,
                windspeed,
                lat,
                long,
            })?;
            let frame = session.refresh(Trigger::Predict);
            println!("{}", frame.display);
            match frame.notice {
                Some(notice) => {
                    eprintln!("✗ {notice}");
                    Ok(ExitCode::FAILURE)
                }
                None => Ok(ExitCode::SUCCESS),
            }
        }
        Some(Command::ConfigSchema) => Ok(ExitCode::SUCCESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_accepts_negative_values_for_every_field() {
        let cli = Cli::try_parse_from([
            "firerisk", "predict", "--temp", "-5", "--humidity", "-5", "--windspeed", "-1",
            "--lat", "-30", "--long", "-60",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Predict {
                temp,
                humidity,
                windspeed,
                lat,
                long,
            }) => assert_eq!((temp, humidity, windspeed, lat, long), (-5.0, -5.0, -1.0, -30.0, -60.0)),
            _ => panic!("expected the predict subcommand"),
        }
    }

    #[test]
    fn no_subcommand_means_interactive_run() {
        let cli = Cli::try_parse_from(["firerisk", "--artifacts", "/tmp/models"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.artifacts, Some(PathBuf::from("/tmp/models")));
    }
}
