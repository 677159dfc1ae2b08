use std::io::Cursor;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;
use vocabulary::{Accent, VocabularyEntry};

/// Synthesis fallback speaks at 0.8x the engine's normal rate.
pub const SPEECH_RATE_SCALE: f32 = 0.8;

/// Plays the pre-recorded clip for the selected accent, falling back to
/// on-device speech synthesis when playback fails for any reason.
pub struct Player {
    client: reqwest::Client,
}

impl Player {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Fire-and-forget: all audio work runs on spawned tasks so a slow or
    /// failed playback attempt never stalls navigation. Failures only reach
    /// the log.
    pub fn speak(&self, entry: &VocabularyEntry, accent: Accent) {
        let word = entry.word.clone();
        let clip = entry.pronunciation(accent).mp3.clone();
        let locale = accent.locale();
        let client = self.client.clone();
        tokio::spawn(async move {
            let bytes = fetch_clip(&client, &clip).await;
            let playback = tokio::task::spawn_blocking(move || {
                if let Err(error) = bytes.and_then(play_clip) {
                    debug!("clip playback failed, falling back to synthesis: {error:#}");
                    return synthesize(&word, locale);
                }
                Ok(())
            })
            .await;
            match playback {
                Ok(Err(error)) => debug!("speech synthesis failed: {error:#}"),
                Err(error) => debug!("playback task failed: {error}"),
                Ok(Ok(())) => {}
            }
        });
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn is_remote(clip: &str) -> bool {
    clip.starts_with("http://") || clip.starts_with("https://")
}

async fn fetch_clip(client: &reqwest::Client, clip: &str) -> Result<Vec<u8>> {
    if is_remote(clip) {
        let response = client.get(clip).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    } else {
        tokio::fs::read(clip)
            .await
            .with_context(|| format!("reading audio clip {clip}"))
    }
}

fn play_clip(bytes: Vec<u8>) -> Result<()> {
    let mut stream = rodio::stream::OutputStreamBuilder::open_default_stream()?;
    stream.log_on_drop(false);
    let sink = rodio::Sink::connect_new(stream.mixer());
    let source = rodio::Decoder::new(Cursor::new(bytes))?;
    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}

fn synthesize(word: &str, locale: &str) -> Result<()> {
    let mut tts = match tts::Tts::default() {
        Ok(tts) => tts,
        // Host offers no speech synthesis; not an error.
        Err(_) => return Ok(()),
    };
    if let Ok(voices) = tts.voices() {
        if let Some(voice) = voices
            .iter()
            .find(|voice| voice.language().as_str().eq_ignore_ascii_case(locale))
        {
            let _ = tts.set_voice(voice);
        }
    }
    let rate = (tts.normal_rate() * SPEECH_RATE_SCALE).clamp(tts.min_rate(), tts.max_rate());
    let _ = tts.set_rate(rate);
    tts.speak(word.to_string(), true)?;
    // Keep the engine alive until the utterance finishes.
    while tts.is_speaking().unwrap_or(false) {
        std::thread::sleep(Duration::from_millis(100));
    }
    Ok(())
}
