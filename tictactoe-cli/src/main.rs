use anyhow::Result;
use clap::Parser;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use tracing::{error, info};

mod config;
mod console;
mod session;

use crate::config::{Config, Settings};
use crate::session::Session;

fn main() -> Result<()> {
    // Parse and validate configuration
    let config = Config::parse();
    let settings = Settings::resolve(&config)?;

    // Logs go to stderr; stdout belongs to the board
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(settings.level()?)
        .init();

    info!(
        size = settings.size,
        pruning = settings.pruning,
        rounds = ?settings.rounds,
        "Starting tictactoe"
    );

    let input = Rc::new(RefCell::new(io::stdin().lock()));
    let output = Rc::new(RefCell::new(io::stdout()));
    let mut session = Session::new(settings, input, output);

    match session.run() {
        Ok(tally) => {
            info!(games = tally.games(), ties = tally.ties(), "Session completed");
            Ok(())
        }
        Err(e) => {
            error!("Session failed: {:#}", e);
            Err(e)
        }
    }
}
