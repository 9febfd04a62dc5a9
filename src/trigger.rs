//! Trigger sources
//!
//! A trigger fires once per edge. The greeting loop only waits again after the
//! previous greeting has been fully played, and a button pressed meanwhile
//! does not queue another one.

use crate::config::Config;
use crate::error::{PoppyError, PoppyResult};
use async_trait::async_trait;
use evdev::{Device, EventType, Key};
use std::thread;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Key press value reported by evdev (0 = release, 2 = autorepeat)
const KEY_DOWN: i32 = 1;

/// Trait for trigger sources
#[async_trait]
pub trait Trigger: Send {
    /// Wait for the next trigger; `false` once the source is gone
    async fn wait(&mut self) -> PoppyResult<bool>;

    /// Get the trigger name
    fn name(&self) -> &str;
}

/// Fires on every line read from stdin
pub struct EnterTrigger {
    lines: Lines<BufReader<Stdin>>,
}

impl Default for EnterTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl EnterTrigger {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

#[async_trait]
impl Trigger for EnterTrigger {
    async fn wait(&mut self) -> PoppyResult<bool> {
        Ok(self.lines.next_line().await?.is_some())
    }

    fn name(&self) -> &str {
        "enter"
    }
}

/// Fires when a key on an input device goes down
pub struct ButtonTrigger {
    presses: mpsc::UnboundedReceiver<()>,
}

impl ButtonTrigger {
    pub fn open(device_path: &str, key_name: &str) -> PoppyResult<Self> {
        let key = parse_key(key_name)
            .ok_or_else(|| PoppyError::Trigger(format!("unknown button key '{}'", key_name)))?;
        let mut device = Device::open(device_path).map_err(|e| {
            PoppyError::Trigger(format!("cannot open input device {}: {}", device_path, e))
        })?;

        info!(
            "🔘 Listening for {:?} on {} ({})",
            key,
            device_path,
            device.name().unwrap_or("unnamed device")
        );

        let (tx, presses) = mpsc::unbounded_channel();
        let path = device_path.to_string();
        thread::Builder::new()
            .name("poppytalk-button".to_string())
            .spawn(move || loop {
                let events = match device.fetch_events() {
                    Ok(events) => events,
                    Err(e) => {
                        warn!("🔘 Input device {} failed: {}", path, e);
                        return;
                    }
                };
                for event in events {
                    if is_press(event.event_type(), event.code(), event.value(), key)
                        && tx.send(()).is_err()
                    {
                        return;
                    }
                }
            })?;

        Ok(Self { presses })
    }
}

fn is_press(event_type: EventType, code: u16, value: i32, key: Key) -> bool {
    event_type == EventType::KEY && code == key.code() && value == KEY_DOWN
}

#[async_trait]
impl Trigger for ButtonTrigger {
    async fn wait(&mut self) -> PoppyResult<bool> {
        // Presses made while a greeting was playing are dropped
        let mut stale = 0;
        while self.presses.try_recv().is_ok() {
            stale += 1;
        }
        if stale > 0 {
            debug!("🔘 Ignored {} press(es) during playback", stale);
        }

        Ok(self.presses.recv().await.is_some())
    }

    fn name(&self) -> &str {
        "button"
    }
}

/// Factory to create the configured trigger
pub fn create_trigger(config: &Config) -> PoppyResult<Box<dyn Trigger>> {
    match config.trigger.as_str() {
        "button" => Ok(Box::new(ButtonTrigger::open(
            &config.button_device,
            &config.button_key,
        )?)),
        "enter" => Ok(Box::new(EnterTrigger::new())),
        other => Err(PoppyError::Config(format!(
            "unknown trigger '{}' (expected 'button' or 'enter')",
            other
        ))),
    }
}

/// Parse a button name to an evdev key
pub fn parse_key(name: &str) -> Option<Key> {
    match name.to_uppercase().trim_start_matches("KEY_") {
        "ENTER" | "RETURN" => Some(Key::KEY_ENTER),
        "SPACE" => Some(Key::KEY_SPACE),
        "PLAY" => Some(Key::KEY_PLAY),
        "PLAYPAUSE" => Some(Key::KEY_PLAYPAUSE),
        "F1" => Some(Key::KEY_F1),
        "F12" => Some(Key::KEY_F12),
        "A" => Some(Key::KEY_A),
        "B" => Some(Key::KEY_B),
        "0" => Some(Key::KEY_0),
        "1" => Some(Key::KEY_1),
        "BTN_0" | "BTN0" => Some(Key::BTN_0),
        "BTN_LEFT" => Some(Key::BTN_LEFT),
        _ => None,
    }
}
