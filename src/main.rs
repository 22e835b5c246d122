use std::fs::File;
use std::io;
use std::sync::Arc;

use barconsole::client::HttpActionClient;
use barconsole::core::config::{self, CliOverrides};
use barconsole::{screens, tui};
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "barconsole", about = "Touch console for the cocktail mixer")]
struct Args {
    /// Base URL of the appliance controller
    #[arg(long)]
    appliance_url: Option<String>,

    /// Base URL of the system controller (start, reboot, shutdown)
    #[arg(long)]
    system_url: Option<String>,

    /// Status poll interval in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,

    /// Screen shown at startup, e.g. `list_recipes`
    #[arg(long)]
    screen: Option<String>,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to barconsole.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("barconsole.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().map_err(|e| {
        log::error!("Failed to load config: {}", e);
        eprintln!("barconsole: {e}");
        io::Error::other(e)
    })?;
    let cli = CliOverrides {
        appliance_url: args.appliance_url,
        system_url: args.system_url,
        poll_interval_ms: args.poll_interval_ms,
        screen: args.screen,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Bar console starting: appliance={}, system={}, poll={:?}, screen={}",
        resolved.appliance_url,
        resolved.system_url,
        resolved.poll_interval,
        resolved.default_screen
    );

    let client = HttpActionClient::new(
        resolved.appliance_url.clone(),
        resolved.system_url.clone(),
        resolved.request_timeout,
    )
    .map_err(io::Error::other)?;

    let registry = screens::registry();
    registry.ensure_complete().map_err(io::Error::other)?;

    tui::run(resolved, Arc::new(client), Arc::new(registry))
}
