//! Recorded clip playback through rodio

use super::{ClipPlayer, SoundEngine};
use crate::assets::AssetLibrary;
use crate::core::Token;
use crate::error::PoppyError;
use crate::scheduler::Actor;
use anyhow::Result;
use async_trait::async_trait;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct WavPlayer {
    library: AssetLibrary,
    sound_engine: SoundEngine,
}

impl WavPlayer {
    pub fn new(library: AssetLibrary, sound_engine: SoundEngine) -> Self {
        Self {
            library,
            sound_engine,
        }
    }
}

#[async_trait]
impl ClipPlayer for WavPlayer {
    async fn play(&self, actor: &Actor, token: &Token) -> Result<()> {
        let path = self.library.clip_path(actor, token);
        if !path.exists() {
            return Err(PoppyError::MissingAsset {
                actor: actor.name().to_string(),
                path,
            }
            .into());
        }

        debug!("🔊 {} says '{}'", actor, token);
        let sound_engine = self.sound_engine.clone();

        // The engine blocks until the sink drains
        tokio::task::spawn_blocking(move || sound_engine.play_file_sync(path))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))??;

        Ok(())
    }

    fn stop(&self) -> Result<()> {
        self.sound_engine.stop()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "wav"
    }
}
