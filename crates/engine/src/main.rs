//! Pokebot - console entry point.
//!
//! Reads commands from stdin as a single configured user and prints replies.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokebot_engine::api::CommandRouter;
use pokebot_engine::infrastructure::{
    catalog::GameData,
    console::ConsoleChat,
    in_memory::InMemoryStore,
    random::SystemRandom,
    settings::{load_dotenv_from_repo_root, BotSettings},
};
use pokebot_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the bot may be run from `crates/engine`).
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pokebot_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting Pokebot");

    let settings = BotSettings::from_env();

    let catalog = match &settings.catalog_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading species catalog");
            GameData::from_path(path)?
        }
        None => GameData::bundled()?,
    };
    tracing::info!(species = catalog.len(), "Catalog ready");

    let store = Arc::new(InMemoryStore::new());
    let console = ConsoleChat::spawn_stdin(
        settings.prefix.clone(),
        settings.console_user,
        settings.console_channel,
    );

    let app = App::new(
        store.clone(),
        store,
        Arc::new(catalog),
        console.clone(),
        Arc::new(SystemRandom::new()),
        settings,
    );
    let router = Arc::new(CommandRouter::new(Arc::new(app)));

    // Each command runs as its own task so an open paged session never
    // holds up the next one.
    tracing::info!("Listening on stdin");
    let mut commands = JoinSet::new();
    while let Some(message) = console.next_incoming().await {
        while commands.try_join_next().is_some() {}
        let router = router.clone();
        commands.spawn(async move {
            if let Err(e) = router.handle(&message).await {
                tracing::warn!(error = %e, "Failed to reply to command");
            }
        });
    }
    while commands.join_next().await.is_some() {}

    tracing::info!("Input closed, shutting down");
    Ok(())
}
