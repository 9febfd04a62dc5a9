//! Mock Clip Player for Testing
//!
//! Records every (actor, token) pair it is asked to play.

use anyhow::Result;
use async_trait::async_trait;
use poppytalk::audio::ClipPlayer;
use poppytalk::core::Token;
use poppytalk::scheduler::Actor;
use std::sync::{Arc, Mutex};

/// Mock player that records what was "heard"
#[derive(Debug, Clone, Default)]
pub struct MockPlayer {
    /// Every clip played, as (actor name, token)
    pub played: Arc<Mutex<Vec<(String, String)>>>,
    /// Fail when asked to play this token
    pub fail_on: Option<String>,
}

impl MockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(token: &str) -> Self {
        Self {
            fail_on: Some(token.to_string()),
            ..Self::default()
        }
    }

    pub fn get_played(&self) -> Vec<(String, String)> {
        self.played.lock().unwrap().clone()
    }

    /// Tokens spoken by one actor, in order
    pub fn words_of(&self, actor: &str) -> Vec<String> {
        self.get_played()
            .into_iter()
            .filter(|(a, _)| a == actor)
            .map(|(_, t)| t)
            .collect()
    }
}

#[async_trait]
impl ClipPlayer for MockPlayer {
    async fn play(&self, actor: &Actor, token: &Token) -> Result<()> {
        if self.fail_on.as_deref() == Some(token.as_str()) {
            return Err(anyhow::anyhow!("Mock clip missing: {}", token));
        }
        self.played
            .lock()
            .unwrap()
            .push((actor.name().to_string(), token.to_string()));
        Ok(())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
