//! Sound Engine for clip playback
//!
//! Uses a channel-based architecture to handle rodio's non-Send stream.
//! The engine spawns a dedicated audio thread that owns the playback infrastructure.

use crate::error::{PoppyError, PoppyResult};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use tracing::{debug, error, info, warn};

/// Commands sent to the audio thread
enum AudioCommand {
    PlayWait(PathBuf, mpsc::Sender<Result<(), String>>),
    SetVolume(f32),
    Stop,
}

/// Thread-safe handle to the sound engine
#[derive(Clone)]
pub struct SoundEngine {
    sender: mpsc::Sender<AudioCommand>,
}

impl std::fmt::Debug for SoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundEngine").finish()
    }
}

impl SoundEngine {
    /// Open the default output device; `volume` is a 0-100 percentage
    pub fn new(volume: u8) -> PoppyResult<Self> {
        let (sender, receiver) = mpsc::channel::<AudioCommand>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        // Spawn dedicated audio thread
        thread::Builder::new()
            .name("poppytalk-audio".to_string())
            .spawn(move || {
                Self::audio_thread(receiver, ready_tx);
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(PoppyError::Audio(e)),
            Err(_) => {
                return Err(PoppyError::Audio(
                    "audio thread exited during startup".to_string(),
                ))
            }
        }

        let engine = Self { sender };
        engine.set_volume(volume)?;
        Ok(engine)
    }

    fn audio_thread(
        receiver: mpsc::Receiver<AudioCommand>,
        ready: mpsc::Sender<Result<(), String>>,
    ) {
        use rodio::OutputStream;

        // Initialize audio output on this thread
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(s) => s,
            Err(e) => {
                warn!("🔇 Failed to initialize audio output: {}", e);
                let _ = ready.send(Err(format!("no audio output: {}", e)));
                return;
            }
        };

        // Keep stream alive
        let _stream = stream;
        let mut sink = match rodio::Sink::try_new(&stream_handle) {
            Ok(s) => s,
            Err(e) => {
                error!("❌ Failed to create audio sink: {}", e);
                let _ = ready.send(Err(format!("cannot create audio sink: {}", e)));
                return;
            }
        };
        let mut volume = 1.0;

        info!("🔊 Audio thread started");
        let _ = ready.send(Ok(()));

        while let Ok(cmd) = receiver.recv() {
            match cmd {
                AudioCommand::PlayWait(path, resp) => {
                    debug!("🔊 Playing clip: {:?}", path);
                    let result = Self::append_clip(&sink, &path).map_err(|e| e.to_string());
                    if let Err(e) = &result {
                        error!("❌ Clip playback failed for {:?}: {}", path, e);
                    } else {
                        sink.sleep_until_end();
                    }
                    let _ = resp.send(result);
                }
                AudioCommand::SetVolume(level) => {
                    volume = level;
                    sink.set_volume(volume);
                }
                AudioCommand::Stop => {
                    info!("🛑 Stopping playback");
                    sink.stop();
                    // A stopped sink cannot be reused
                    if let Ok(new_sink) = rodio::Sink::try_new(&stream_handle) {
                        new_sink.set_volume(volume);
                        sink = new_sink;
                    }
                }
            }
        }

        info!("🔇 Audio thread stopped");
    }

    fn append_clip(sink: &rodio::Sink, path: &Path) -> anyhow::Result<()> {
        use rodio::Decoder;
        use std::fs::File;
        use std::io::BufReader;

        if !path.exists() {
            anyhow::bail!("Audio file not found: {:?}", path);
        }

        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?;

        sink.append(source);
        Ok(())
    }

    /// Play a clip and wait for it to finish
    pub fn play_file_sync<P: Into<PathBuf>>(&self, path: P) -> PoppyResult<()> {
        let (tx, rx) = mpsc::channel();
        self.sender
            .send(AudioCommand::PlayWait(path.into(), tx))
            .map_err(|e| PoppyError::Audio(format!("Audio thread disconnected: {}", e)))?;

        rx.recv()
            .map_err(|e| PoppyError::Audio(format!("Audio thread disconnected: {}", e)))?
            .map_err(PoppyError::Audio)
    }

    /// Set output volume as a 0-100 percentage
    pub fn set_volume(&self, percent: u8) -> PoppyResult<()> {
        let level = f32::from(percent.min(100)) / 100.0;
        self.sender
            .send(AudioCommand::SetVolume(level))
            .map_err(|e| PoppyError::Audio(format!("Audio thread disconnected: {}", e)))
    }

    /// Stop current playback
    pub fn stop(&self) -> PoppyResult<()> {
        self.sender
            .send(AudioCommand::Stop)
            .map_err(|e| PoppyError::Audio(format!("Audio thread disconnected: {}", e)))
    }
}
