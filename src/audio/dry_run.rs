//! Dry-run player that only logs what would be heard

use super::ClipPlayer;
use crate::assets::AssetLibrary;
use crate::core::Token;
use crate::scheduler::Actor;
use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct DryRunPlayer {
    library: AssetLibrary,
}

impl DryRunPlayer {
    pub fn new(library: AssetLibrary) -> Self {
        Self { library }
    }
}

#[async_trait]
impl ClipPlayer for DryRunPlayer {
    async fn play(&self, actor: &Actor, token: &Token) -> Result<()> {
        let path = self.library.clip_path(actor, token);
        let marker = if path.exists() { " " } else { "!" };
        info!("{} [{}] {} -> {}", marker, actor, token, path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "dry_run"
    }
}
