//! PoppyTalk - spoken greetings on a button press
//!
//! Waits for the trigger, then says the date, the time and two temperatures
//! in two alternating recorded voices.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use poppytalk::assets::AssetLibrary;
use poppytalk::config::{self, Config};
use poppytalk::core::TimeContext;
use poppytalk::phrases::PhraseBuilder;
use poppytalk::scheduler::Actor;
use poppytalk::trigger::{self, Trigger};
use poppytalk::Engine;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of the per-user one
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Playback volume in percent
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: Option<u8>,

    /// Log the clips instead of playing them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Greet on every trigger until stopped (default)
    Run,
    /// Greet once, right now
    Once,
    /// Print the greetings without playing anything
    Preview {
        /// Time to greet for, as "YYYY-MM-DD HH:MM" (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// List every clip the greetings can use
    Vocabulary,
    /// Report clips missing from the actor directories
    CheckAssets,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let mut config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    if let Some(volume) = args.volume {
        config.volume = volume;
    }

    // Setup logging
    let default_level = if args.verbose {
        "debug".to_string()
    } else {
        config.log_level.to_lowercase()
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    config.validate()?;

    match args.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            info!("👧 PoppyTalk v{} starting...", env!("CARGO_PKG_VERSION"));
            let engine = Engine::from_config(&config, args.dry_run)?;
            let trigger = trigger::create_trigger(&config)?;
            run_loop(engine, trigger).await
        }
        Commands::Once => {
            let mut engine = Engine::from_config(&config, args.dry_run)?;
            engine.trigger().await?;
            Ok(())
        }
        Commands::Preview { at } => {
            let time = match at {
                Some(text) => TimeContext::parse(&text)?,
                None => TimeContext::now(),
            };
            let mut engine = Engine::from_config(&config, true)?;
            for assignment in engine.compose(&time).await {
                println!("{}: {}", assignment.actor, assignment.sequence);
            }
            Ok(())
        }
        Commands::Vocabulary => {
            let phrases = PhraseBuilder::new(&config.country_code);
            for token in phrases.vocabulary(&config.parsed_locations()?) {
                println!("{}", token);
            }
            Ok(())
        }
        Commands::CheckAssets => check_assets(&config),
    }
}

async fn run_loop(mut engine: Engine, mut trigger: Box<dyn Trigger>) -> Result<()> {
    // Pinned across iterations so a signal during playback is still seen
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    info!("✅ PoppyTalk ready - waiting for {}", trigger.name());
    loop {
        let fired = tokio::select! {
            fired = trigger.wait() => fired?,
            _ = &mut shutdown => {
                info!("👋 Shutting down");
                break;
            }
        };

        if !fired {
            info!("Trigger source closed");
            break;
        }

        if let Err(e) = engine.trigger().await {
            error!("❌ Greeting aborted: {}", e);
        }
    }

    engine.stop()?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            warn!("Could not listen for SIGTERM: {}", e);
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

fn check_assets(config: &Config) -> Result<()> {
    let asset_root = config.asset_root();
    let actors = [
        Actor::under(&asset_root, &config.actors[0]),
        Actor::under(&asset_root, &config.actors[1]),
    ];
    let vocabulary =
        PhraseBuilder::new(&config.country_code).vocabulary(&config.parsed_locations()?);

    let missing = AssetLibrary::new().missing(&actors, vocabulary.iter());
    for clip in &missing {
        println!("{}\t{}\t{}", clip.actor, clip.token, clip.path.display());
    }

    if missing.is_empty() {
        info!(
            "✅ All {} clips present for {} and {}",
            vocabulary.len(),
            actors[0],
            actors[1]
        );
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} of {} clips missing",
            missing.len(),
            vocabulary.len() * actors.len()
        ))
    }
}
