//! PoppyTalk Library
//!
//! Composes spoken date, time and temperature greetings from recorded word
//! clips and plays them through two alternating voices.

pub mod assets;
pub mod audio;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod phrases;
pub mod scheduler;
pub mod trigger;
pub mod weather;

pub use engine::Engine;
pub use error::{PoppyError, PoppyResult};
