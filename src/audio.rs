//! Clip playback
//!
//! Every backend plays exactly one token per call and returns only once the
//! clip has finished, so a greeting is heard in order.

pub mod dry_run;
pub mod engine;
pub mod wav;

use crate::assets::AssetLibrary;
use crate::config::{Config, AUDIO_BACKENDS};
use crate::core::Token;
use crate::error::{PoppyError, PoppyResult};
use crate::scheduler::Actor;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

pub use dry_run::DryRunPlayer;
pub use engine::SoundEngine;
pub use wav::WavPlayer;

/// Trait for clip players
#[async_trait]
pub trait ClipPlayer: Send + Sync + std::fmt::Debug {
    /// Play `token` in `actor`'s voice, blocking until it has been heard
    async fn play(&self, actor: &Actor, token: &Token) -> Result<()>;

    /// Abandon anything still sounding
    fn stop(&self) -> Result<()> {
        Ok(())
    }

    /// Get the player name
    fn name(&self) -> &str;
}

/// Factory to create the configured player
pub fn create_player(config: &Config, dry_run: bool) -> PoppyResult<Arc<dyn ClipPlayer>> {
    let backend = if dry_run {
        "dry_run"
    } else {
        config.audio_backend.as_str()
    };

    info!("🛠️ Creating clip player: {}", backend);
    let player: Arc<dyn ClipPlayer> = match backend {
        "wav" => Arc::new(WavPlayer::new(
            AssetLibrary::new(),
            SoundEngine::new(config.volume)?,
        )),
        "dry_run" => Arc::new(DryRunPlayer::new(AssetLibrary::new())),
        other => {
            return Err(PoppyError::Config(format!(
                "unknown audio backend '{}' (expected one of {:?})",
                other, AUDIO_BACKENDS
            )))
        }
    };
    info!("✅ Clip player '{}' initialized", player.name());
    Ok(player)
}
