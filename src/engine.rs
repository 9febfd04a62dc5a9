//! Greeting engine
//!
//! One trigger produces four greetings (date, time, two temperatures), binds
//! them to the actors and plays every clip in order before returning.

use crate::audio::{self, ClipPlayer};
use crate::config::Config;
use crate::core::TimeContext;
use crate::error::PoppyResult;
use crate::phrases::{Location, PhraseBuilder};
use crate::scheduler::{ActorScheduler, Actor, Assignment};
use crate::weather::{OpenWeatherClient, WeatherGateway};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct Engine {
    phrases: PhraseBuilder,
    gateway: Arc<dyn WeatherGateway>,
    scheduler: ActorScheduler,
    player: Arc<dyn ClipPlayer>,
    locations: [Location; 2],
    rng: Box<dyn RngCore + Send>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("gateway", &self.gateway.name())
            .field("player", &self.player.name())
            .field("locations", &self.locations)
            .finish()
    }
}

impl Engine {
    pub fn new(
        phrases: PhraseBuilder,
        gateway: Arc<dyn WeatherGateway>,
        scheduler: ActorScheduler,
        player: Arc<dyn ClipPlayer>,
        locations: [Location; 2],
    ) -> Self {
        Self {
            phrases,
            gateway,
            scheduler,
            player,
            locations,
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Replace the random source used to cast the actors
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Wire up the production gateway and the configured player
    pub fn from_config(config: &Config, dry_run: bool) -> PoppyResult<Self> {
        config.validate()?;

        let asset_root = config.asset_root();
        let scheduler = ActorScheduler::new([
            Actor::under(&asset_root, &config.actors[0]),
            Actor::under(&asset_root, &config.actors[1]),
        ]);
        let gateway: Arc<dyn WeatherGateway> = Arc::new(OpenWeatherClient::from_config(config)?);
        let player = audio::create_player(config, dry_run)?;

        let engine = Self::new(
            PhraseBuilder::new(&config.country_code),
            gateway,
            scheduler,
            player,
            config.parsed_locations()?,
        );

        Ok(match config.rng_seed {
            Some(seed) => engine.with_rng(StdRng::seed_from_u64(seed)),
            None => engine,
        })
    }

    pub fn phrases(&self) -> &PhraseBuilder {
        &self.phrases
    }

    pub fn scheduler(&self) -> &ActorScheduler {
        &self.scheduler
    }

    pub fn locations(&self) -> &[Location; 2] {
        &self.locations
    }

    /// Build the four greetings for `time` and cast them
    pub async fn compose(&mut self, time: &TimeContext) -> Vec<Assignment> {
        let date = self.phrases.date_greeting(time);
        let clock = self.phrases.time_greeting(time);

        // One lookup per location, one after the other
        let first = self
            .phrases
            .temperature_greeting(self.gateway.as_ref(), &self.locations[0])
            .await;
        let second = self
            .phrases
            .temperature_greeting(self.gateway.as_ref(), &self.locations[1])
            .await;

        self.scheduler
            .assign_random([date, clock, first, second], &mut self.rng)
    }

    /// Play every token of every assignment in order; the first failure aborts
    pub async fn play(&self, assignments: &[Assignment]) -> PoppyResult<()> {
        for assignment in assignments {
            debug!("🗣️ {}: {}", assignment.actor, assignment.sequence);
            for token in assignment.tokens() {
                self.player.play(&assignment.actor, token).await?;
            }
        }
        Ok(())
    }

    /// Greet for the current local time
    pub async fn trigger(&mut self) -> PoppyResult<()> {
        self.trigger_at(TimeContext::now()).await
    }

    pub async fn trigger_at(&mut self, time: TimeContext) -> PoppyResult<()> {
        let started = Instant::now();
        let assignments = self.compose(&time).await;
        info!(
            "🎬 {} greetings composed, {} opens",
            assignments.len(),
            assignments
                .first()
                .map(|a| a.actor.name())
                .unwrap_or("nobody")
        );

        self.play(&assignments).await?;
        info!("✅ Greeting finished in {:.1?}", started.elapsed());
        Ok(())
    }

    /// Stop any clip still playing
    pub fn stop(&self) -> PoppyResult<()> {
        self.player.stop()?;
        Ok(())
    }
}
