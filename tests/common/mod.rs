#![allow(dead_code)]

pub mod mock_player;
pub mod mock_weather;

use mock_player::MockPlayer;
use mock_weather::MockWeather;
use poppytalk::phrases::{Location, PhraseBuilder};
use poppytalk::scheduler::{Actor, ActorScheduler};
use poppytalk::Engine;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::sync::Arc;

/// Engine wired to mocks, with the default actors and locations
pub fn test_engine(weather: Arc<MockWeather>, player: MockPlayer, seed: u64) -> Engine {
    let root = Path::new("/home/pi");
    Engine::new(
        PhraseBuilder::new("US"),
        weather,
        ActorScheduler::new([Actor::under(root, "child1"), Actor::under(root, "child2")]),
        Arc::new(player),
        [
            Location::parse("waynesboro").expect("valid location"),
            Location::parse("ocean_city").expect("valid location"),
        ],
    )
    .with_rng(StdRng::seed_from_u64(seed))
}
