use std::fs::File;
use std::sync::Mutex;

use clap::Parser;
use slide_puzzle::{terminal, Config, Result};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    let config = Config::parse();
    if let Err(err) = init_tracing(&config).and_then(|()| terminal::run(&config)) {
        error!(error = %err, "puzzle exited with error");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

/// Logs go to a file when asked for; the terminal itself is taken by the board.
fn init_tracing(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}
