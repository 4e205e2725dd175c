//! Platform abstraction layer
//!
//! The game talks to its host only through these ports:
//! - Score storage
//! - UI panels and labels
//! - Sound effects
//! - The optional host channel (score reports, sharing)
//! - Frame scheduling
//!
//! Browser implementations live in `web`; `headless` has the stand-ins used
//! natively and in tests.

use serde::{Deserialize, Serialize};

use crate::GameError;
use crate::audio::SoundEffect;

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod web;

/// Persistent best score
pub trait ScoreStore {
    /// Stored best, 0 when missing or unreadable
    fn load(&self) -> u64;
    fn save(&mut self, score: u64) -> Result<(), GameError>;
}

/// Visible UI. Every method defaults to a no-op so hosts implement only the
/// panels they actually have.
pub trait UiSink {
    fn game_started(&mut self) {}
    fn score_changed(&mut self, _score: u64, _high_score: u64) {}
    fn game_over(&mut self, _score: u64) {}
    fn theme_changed(&mut self, _index: usize) {}
    /// Local fallback message (e.g. an alert)
    fn notify(&mut self, _text: &str) {}
}

/// Fire-and-forget sound triggers; failures stay inside the implementation
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// External host (chat/bot platform) that accepts results
pub trait HostChannel {
    fn send_report(&mut self, report: &ScoreReport) -> Result<(), GameError>;
    fn share(&mut self, summary: &str) -> Result<(), GameError>;
}

/// Host "next frame" primitive. The loop stops by not asking again.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

/// Structured result forwarded to the host channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub score: u64,
    #[serde(rename = "highScore")]
    pub high_score: u64,
}

impl ScoreReport {
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }
}
