mod app;
mod screens;
mod widgets;

use std::fs::File;

use clap::Parser;
use intake_lib::IntakeClient;
use intake_lib::identity::MemoryIdentityStore;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::App;

/// Terminal client for schema-driven intake forms.
#[derive(Debug, Parser)]
#[command(name = "intake-tui", version, about)]
struct Args {
    /// Base URL of the intake service.
    #[arg(
        long,
        default_value = "https://dynamic-form-generator-9rl7.onrender.com"
    )]
    base_url: String,

    /// Path of the debug log file.
    #[arg(long, default_value = "intake-tui.log")]
    log_file: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let log_file = File::create(&args.log_file).expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let client = match IntakeClient::builder().base_url(&args.base_url).build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Invalid base URL '{}': {e}", args.base_url);
            std::process::exit(1);
        }
    };

    let mut terminal = ratatui::init();
    let result = App::new(client, MemoryIdentityStore::new())
        .run(&mut terminal)
        .await;
    ratatui::restore();

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }
}
