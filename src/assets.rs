//! Clip lookup
//!
//! Maps a token spoken by an actor to its recorded clip,
//! `<actor-root>/<token>.wav`, and inventories what has been recorded.

use crate::core::Token;
use crate::scheduler::Actor;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;
use walkdir::WalkDir;

const CLIP_EXTENSION: &str = "wav";

/// A clip the vocabulary needs but the actor has not recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingClip {
    pub actor: String,
    pub token: Token,
    pub path: PathBuf,
}

/// Resolves tokens to clip files on disk
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    extension: String,
}

impl Default for AssetLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self {
            extension: CLIP_EXTENSION.to_string(),
        }
    }

    pub fn clip_path(&self, actor: &Actor, token: &Token) -> PathBuf {
        actor
            .root()
            .join(format!("{}.{}", token.as_str(), self.extension))
    }

    /// Stems of the clips recorded in the actor's directory
    pub fn inventory(&self, actor: &Actor) -> BTreeSet<String> {
        let clips: BTreeSet<String> = WalkDir::new(actor.root())
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .is_some_and(|ext| ext == self.extension.as_str())
            })
            .filter_map(|entry| {
                entry
                    .path()
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().to_string())
            })
            .collect();

        debug!("🎵 {} has {} clips in {:?}", actor, clips.len(), actor.root());
        clips
    }

    /// Every (actor, token) pair in `vocabulary` with no recording
    pub fn missing<'a>(
        &self,
        actors: &[Actor],
        vocabulary: impl IntoIterator<Item = &'a Token> + Clone,
    ) -> Vec<MissingClip> {
        let mut missing = Vec::new();
        for actor in actors {
            let recorded = self.inventory(actor);
            for token in vocabulary.clone() {
                if !recorded.contains(token.as_str()) {
                    missing.push(MissingClip {
                        actor: actor.name().to_string(),
                        token: token.clone(),
                        path: self.clip_path(actor, token),
                    });
                }
            }
        }
        missing
    }
}
