use chrono::Local;
use obgyn_core::config::{id_strategy_from_env_value, store_source_from_env_value};
use obgyn_core::constants::{ID_STRATEGY_ENV, STORE_PATH_ENV};
use obgyn_core::{App, Component, Context, CoreConfig, InMemoryStore};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod command;
mod render;

use command::Command;

/// Main entry point for the interactive records session
///
/// Reads one command per line from stdin, applies it to the app state and
/// prints the resulting screen. A rejected command prints its error and
/// leaves the state as it was.
///
/// # Environment Variables
/// - `OBGYN_STORE_PATH`: YAML patient store (default: the bundled demo store)
/// - `OBGYN_ID_STRATEGY`: `random` or `sequential` ids for new entries
/// - `RUST_LOG`: log filter, logs go to stderr
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("obgyn=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CoreConfig::new(
        store_source_from_env_value(std::env::var(STORE_PATH_ENV).ok()),
        id_strategy_from_env_value(std::env::var(ID_STRATEGY_ENV).ok())?,
    )?;
    let store = InMemoryStore::open(config.store_source())?;
    let mut ctx = Context::from_config(&config, Local::now().date_naive());

    tracing::info!(store = %config.store_source(), ids = %config.id_strategy(), "++ Starting session");

    let mut app = App::new(Arc::new(store), &ctx);
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", render::render(&app.view()))?;

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(stdout, "{}", command::HELP)?,
            Ok(Command::Act(action)) => match app.reduce(action, &mut ctx) {
                Ok(next) => {
                    app = next;
                    writeln!(stdout, "{}", render::render(&app.view()))?;
                }
                Err(e) => {
                    tracing::debug!("action rejected: {e}");
                    writeln!(stdout, "error: {e}")?;
                }
            },
            Err(e) => writeln!(stdout, "error: {e}")?,
        }
        stdout.flush()?;
    }

    Ok(())
}
