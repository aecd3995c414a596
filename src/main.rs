use clap::{Parser, Subcommand};
use learnhub::application::app::{Outcome, SessionContext};
use learnhub::config::{BasePath, Config};
use learnhub::domain::ports::{CatalogBox, GatewayHandle};
use learnhub::infrastructure::in_memory::StaticCatalog;
use learnhub::infrastructure::json_catalog::load_catalog;
use learnhub::infrastructure::simulated_gateway::SimulatedGateway;
use learnhub::interfaces::csv::command_reader::CommandReader;
use learnhub::interfaces::csv::course_writer::CourseWriter;
use learnhub::interfaces::views;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path prefix the app is deployed under
    #[arg(long, env = "LEARNHUB_BASE_URL", default_value = "/")]
    base_url: String,

    /// Directory downloaded receipts are written to
    #[arg(long, env = "LEARNHUB_RECEIPT_DIR", default_value = ".")]
    receipt_dir: PathBuf,

    /// Simulated payment gateway latency in milliseconds
    #[arg(long, env = "LEARNHUB_GATEWAY_DELAY_MS", default_value_t = 2000)]
    gateway_delay_ms: u64,

    /// JSON file replacing the built-in course catalog
    #[arg(long, env = "LEARNHUB_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a session script (CSV: command, arg, value); "-" reads stdin
    Run { script: PathBuf },
    /// Print the course catalog as CSV
    Catalog,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = Config {
        base_path: BasePath::new(&cli.base_url),
        receipt_dir: cli.receipt_dir,
        gateway_delay: Duration::from_millis(cli.gateway_delay_ms),
        catalog: cli.catalog,
    };

    let catalog: CatalogBox = match &config.catalog {
        Some(path) => Box::new(load_catalog(path).into_diagnostic()?),
        None => Box::new(StaticCatalog::new()),
    };

    match cli.command {
        Commands::Catalog => {
            let courses = catalog.courses().await.into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = CourseWriter::new(stdout.lock(), config.base_path.clone());
            writer.write_courses(&courses).into_diagnostic()?;
        }
        Commands::Run { script } => {
            let source: Box<dyn Read> = if script.as_os_str() == "-" {
                Box::new(io::stdin())
            } else {
                Box::new(File::open(&script).into_diagnostic()?)
            };
            let gateway: GatewayHandle = Arc::new(SimulatedGateway::new(config.gateway_delay));
            let mut session = SessionContext::open(config, catalog, gateway)
                .await
                .into_diagnostic()?;

            print!("{}", views::render(&session));
            for command in CommandReader::new(source).commands() {
                let command = match command {
                    Ok(command) => command,
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping malformed script row");
                        eprintln!("Error reading command: {}", e);
                        continue;
                    }
                };

                match session.handle(command).await {
                    Ok(Outcome::ReceiptSaved(path)) => {
                        println!("Receipt saved to {}", path.display());
                    }
                    Ok(Outcome::Updated) => {}
                    Err(e) => eprintln!("Error handling command: {}", e),
                }
                println!();
                print!("{}", views::render(&session));
            }
        }
    }

    Ok(())
}
