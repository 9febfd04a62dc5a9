//! Core vocabulary types shared by the phrase builder and the players.

pub mod number_words;
pub mod time_context;
pub mod token;

pub use time_context::TimeContext;
pub use token::{Token, TokenSequence};
