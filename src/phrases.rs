//! Greeting phrase builder
//!
//! Turns a [`TimeContext`] and weather readings into the token sequences the
//! actors speak. Only the weather lookup can fail, and that failure is
//! absorbed here: the temperature is replaced by "minus minus".

use crate::core::number_words::{cardinal, ordinal};
use crate::core::time_context::MONTHS;
use crate::core::{TimeContext, Token, TokenSequence};
use crate::error::{PoppyError, PoppyResult};
use crate::weather::WeatherGateway;
use chrono::Month;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, warn};

lazy_static! {
    static ref LOCATION_ID: Regex = Regex::new(r"^[a-z0-9]+(?:_[a-z0-9]+)*$").unwrap();
}

/// Temperatures the vocabulary covers when listing clips to record
pub const VOCABULARY_TEMPERATURES: std::ops::RangeInclusive<i64> = -50..=150;

/// Words spoken in place of a temperature when the lookup failed
const UNAVAILABLE: [&str; 2] = ["minus", "minus"];

/// Part of the day used in the date greeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl DayPeriod {
    pub const ALL: [DayPeriod; 4] = [
        DayPeriod::Morning,
        DayPeriod::Afternoon,
        DayPeriod::Evening,
        DayPeriod::Night,
    ];

    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => DayPeriod::Morning,
            12..=16 => DayPeriod::Afternoon,
            17..=19 => DayPeriod::Evening,
            _ => DayPeriod::Night,
        }
    }

    pub fn word(&self) -> &'static str {
        match self {
            DayPeriod::Morning => "morning",
            DayPeriod::Afternoon => "afternoon",
            DayPeriod::Evening => "evening",
            DayPeriod::Night => "night",
        }
    }
}

/// A place identifier such as `ocean_city`, spoken as its own clip
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(Token);

impl Location {
    pub fn parse(id: &str) -> PoppyResult<Self> {
        if !LOCATION_ID.is_match(id) {
            return Err(PoppyError::Config(format!(
                "location {:?} must be lowercase words joined by underscores",
                id
            )));
        }
        Ok(Self(Token::new(id)?))
    }

    pub fn token(&self) -> &Token {
        &self.0
    }

    /// Human place name for the weather service: `ocean_city` -> `Ocean City, US`
    pub fn place_name(&self, country: &str) -> String {
        let city = self
            .0
            .as_str()
            .split('_')
            .map(title_case)
            .collect::<Vec<_>>()
            .join(" ");
        if country.is_empty() {
            city
        } else {
            format!("{}, {}", city, country)
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A location and its rounded Fahrenheit reading, `None` when unavailable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherObservation {
    pub location: Location,
    pub fahrenheit: Option<i64>,
}

/// Builds the date, time and temperature greetings
#[derive(Debug, Clone)]
pub struct PhraseBuilder {
    country: String,
}

impl PhraseBuilder {
    /// `country` is appended to place names sent to the weather service
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }

    /// "good morning nana_and_poppy today is april twenty second"
    pub fn date_greeting(&self, time: &TimeContext) -> TokenSequence {
        let mut msg = TokenSequence::starting_with(Token::known("good"));
        msg.word(DayPeriod::from_hour(time.hour()).word());
        msg.word("nana_and_poppy");
        msg.word("today");
        msg.word("is");
        msg.push(month_token(time.month()));
        msg.extend(ordinal(time.day() as i64));
        msg
    }

    /// "the_time is eight oh five am"
    pub fn time_greeting(&self, time: &TimeContext) -> TokenSequence {
        let mut msg = TokenSequence::starting_with(Token::known("the_time"));
        msg.word("is");

        let hour = match time.hour() % 12 {
            0 => 12,
            h => h,
        };
        msg.extend(cardinal(hour as i64));

        let minute = time.minute();
        if (1..=9).contains(&minute) {
            msg.word("oh");
        }
        if minute > 0 {
            msg.extend(cardinal(minute as i64));
        }

        msg.word(if time.hour() < 12 { "am" } else { "pm" });
        msg
    }

    /// Ask the gateway for the temperature at `location`, absorbing any failure
    pub async fn observe(
        &self,
        gateway: &dyn WeatherGateway,
        location: &Location,
    ) -> WeatherObservation {
        let place = location.place_name(&self.country);
        let fahrenheit = match gateway.fetch_temperature_f(&place).await {
            Ok(temp) if temp.is_finite() => {
                debug!("🌡️ {} reads {:.1}°F via {}", place, temp, gateway.name());
                Some(temp.round_ties_even() as i64)
            }
            Ok(temp) => {
                warn!("⚠️ {} returned {} for {}, treating as unavailable", gateway.name(), temp, place);
                None
            }
            Err(e) => {
                warn!("⚠️ Temperature for {} unavailable: {}", place, e);
                None
            }
        };

        WeatherObservation {
            location: location.clone(),
            fahrenheit,
        }
    }

    /// "the_current_temperature_for ocean_city is seventy two degrees"
    pub fn temperature_phrase(&self, observation: &WeatherObservation) -> TokenSequence {
        let mut msg = TokenSequence::starting_with(Token::known("the_current_temperature_for"));
        msg.push(observation.location.token().clone());
        msg.word("is");

        match observation.fahrenheit {
            Some(temp) => {
                if temp < 0 {
                    msg.word("minus");
                }
                msg.extend(cardinal(temp.saturating_abs()));
            }
            None => {
                for word in UNAVAILABLE {
                    msg.word(word);
                }
            }
        }

        msg.word("degrees");
        msg
    }

    pub async fn temperature_greeting(
        &self,
        gateway: &dyn WeatherGateway,
        location: &Location,
    ) -> TokenSequence {
        let observation = self.observe(gateway, location).await;
        self.temperature_phrase(&observation)
    }

    /// Every token these greetings can contain for the given locations
    pub fn vocabulary(&self, locations: &[Location]) -> BTreeSet<Token> {
        let mut words: BTreeSet<Token> = [
            "good",
            "nana_and_poppy",
            "today",
            "is",
            "the_time",
            "oh",
            "am",
            "pm",
            "the_current_temperature_for",
            "minus",
            "degrees",
        ]
        .into_iter()
        .map(Token::known)
        .collect();

        words.extend(DayPeriod::ALL.iter().map(|p| Token::known(p.word())));
        words.extend(MONTHS.iter().map(|m| month_token(*m)));
        words.extend((1..=31).flat_map(ordinal));
        words.extend((1..=59).flat_map(cardinal));
        words.extend(VOCABULARY_TEMPERATURES.flat_map(|t| cardinal(t.abs())));
        words.extend(locations.iter().map(|l| l.token().clone()));
        words
    }
}

fn month_token(month: Month) -> Token {
    Token::known(month.name().to_lowercase())
}
