//! Random hexabomb player.

use anyhow::Context;
use hexabomb_bot::{BotConfig, JsonLinesClient, TurnController};
use hexabomb_core::{Bot, NEUTRAL};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries protocol messages
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = BotConfig::from_env()?;

    let bot = match config.seed {
        Some(seed) => Bot::with_seed(NEUTRAL, seed),
        None => Bot::new(NEUTRAL),
    };

    let reader: Box<dyn BufRead> = match &config.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };
    let client = JsonLinesClient::new(reader, io::stdout().lock());

    info!(nickname = %config.nickname, seed = ?config.seed, "starting hexabomb bot");

    let mut controller = TurnController::new(client, config.nickname, bot);
    let summary = controller.run()?;
    info!(
        player_id = summary.info.player_id,
        turns_played = summary.turns_played,
        "done"
    );
    Ok(())
}
