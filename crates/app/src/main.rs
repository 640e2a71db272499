use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use quiz_core::{TopicCatalog, UserIntent};
use services::{Clock, QuizController, QuizRuntime, RuntimeError};
use tokio::io::BufReader;
use tokio::sync::mpsc;

mod config;
#[cfg(feature = "desktop")]
mod desktop;
mod logging;
mod pipe;
mod terminal;

use config::{AppConfig, Cli, Command};

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let catalog = TopicCatalog::builtin().context("loading built-in topics")?;
    tracing::info!(topics = catalog.len(), command = ?config.command, "starting");
    let controller = QuizController::new(Arc::new(catalog), Clock::system());

    let (intent_tx, intent_rx) = mpsc::unbounded_channel();
    let (render_tx, render_rx) = mpsc::unbounded_channel();
    let runtime = tokio::spawn(QuizRuntime::new(controller, config.pacing, render_tx).run(intent_rx));

    if let Some(topic) = config.initial_topic {
        intent_tx
            .send(UserIntent::SelectTopic(topic))
            .context("quiz runtime stopped before launch")?;
    }

    match config.command {
        Command::Play => {
            let stdin = BufReader::new(tokio::io::stdin());
            terminal::run(stdin, tokio::io::stdout(), intent_tx, render_rx).await?;
        }
        Command::Pipe => {
            let stdin = BufReader::new(tokio::io::stdin());
            pipe::run(stdin, tokio::io::stdout(), intent_tx, render_rx).await?;
        }
        Command::Ui => launch_desktop(intent_tx, render_rx)?,
    }

    match runtime.await.context("quiz runtime panicked")? {
        Ok(controller) => {
            let progress = controller.progress();
            tracing::info!(
                xp = progress.xp,
                level = progress.level,
                lifetime_xp = controller.progress_tracker().lifetime_xp(),
                "session ended"
            );
        }
        // The front end hung up first; nothing left to show.
        Err(RuntimeError::PresenterClosed) => tracing::debug!("presenter closed before runtime"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

#[cfg(feature = "desktop")]
fn launch_desktop(
    intents: mpsc::UnboundedSender<UserIntent>,
    renders: mpsc::UnboundedReceiver<quiz_core::RenderCommand>,
) -> anyhow::Result<()> {
    desktop::launch(intents, renders)
}

#[cfg(not(feature = "desktop"))]
fn launch_desktop(
    _intents: mpsc::UnboundedSender<UserIntent>,
    _renders: mpsc::UnboundedReceiver<quiz_core::RenderCommand>,
) -> anyhow::Result<()> {
    anyhow::bail!("`ui` needs the desktop feature: cargo run -p app --features desktop -- ui")
}

async fn start(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_cli(cli)?;
    logging::init(&config.log_level)?;
    run(config).await
}

#[tokio::main]
async fn main() {
    if let Err(err) = start(Cli::parse()).await {
        eprintln!("{err:#}");
        std::process::exit(2);
    }
}
