//! Actor assignment
//!
//! Two voices take turns: whoever speaks the first greeting also speaks the
//! third, the other speaks the second and fourth. Which voice goes first is a
//! coin flip on every trigger.

use crate::core::{Token, TokenSequence};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;
use std::path::{Path, PathBuf};

/// Number of greetings spoken per trigger
pub const GREETINGS_PER_TRIGGER: usize = 4;

/// One of the two voices, with its own clip directory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Actor {
    name: String,
    root: PathBuf,
}

impl Actor {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Actor whose clips live in `<asset_root>/<name>`
    pub fn under(asset_root: &Path, name: &str) -> Self {
        Self::new(name, asset_root.join(name))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Which configured actor opens the greeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casting {
    AsConfigured,
    Swapped,
}

impl Distribution<Casting> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Casting {
        if rng.gen::<bool>() {
            Casting::Swapped
        } else {
            Casting::AsConfigured
        }
    }
}

/// A greeting bound to the actor who speaks it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub actor: Actor,
    pub sequence: TokenSequence,
}

impl Assignment {
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sequence.iter()
    }
}

/// Binds greetings to the fixed pair of actors
#[derive(Debug, Clone)]
pub struct ActorScheduler {
    actors: [Actor; 2],
}

impl ActorScheduler {
    pub fn new(actors: [Actor; 2]) -> Self {
        Self { actors }
    }

    pub fn actors(&self) -> &[Actor; 2] {
        &self.actors
    }

    /// Alternate the two actors over the greetings, keeping their order
    pub fn assign(
        &self,
        sequences: [TokenSequence; GREETINGS_PER_TRIGGER],
        casting: Casting,
    ) -> Vec<Assignment> {
        let [first, second] = &self.actors;
        let cast = match casting {
            Casting::AsConfigured => [first, second],
            Casting::Swapped => [second, first],
        };

        sequences
            .into_iter()
            .enumerate()
            .map(|(i, sequence)| Assignment {
                actor: cast[i % 2].clone(),
                sequence,
            })
            .collect()
    }

    /// Same as [`assign`](Self::assign) with the casting drawn from `rng`
    pub fn assign_random<R: Rng + ?Sized>(
        &self,
        sequences: [TokenSequence; GREETINGS_PER_TRIGGER],
        rng: &mut R,
    ) -> Vec<Assignment> {
        let casting: Casting = rng.gen();
        self.assign(sequences, casting)
    }
}
