//! Host stand-ins for native runs and tests

use std::cell::RefCell;
use std::rc::Rc;

use super::{AudioSink, FrameScheduler, HostChannel, ScoreReport, ScoreStore, UiSink};
use crate::GameError;
use crate::audio::SoundEffect;

/// UI that only logs
#[derive(Debug, Default)]
pub struct LogUi;

impl UiSink for LogUi {
    fn game_over(&mut self, score: u64) {
        log::info!("Game over, final score {}", score);
    }

    fn notify(&mut self, text: &str) {
        log::info!("{}", text);
    }
}

/// Audio that goes nowhere
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("sound: {}", effect.name());
    }
}

/// Best score kept in memory for the lifetime of the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub best: u64,
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, score: u64) -> Result<(), GameError> {
        self.best = score;
        Ok(())
    }
}

/// Scheduler the host drains by hand: each request is one pending frame.
///
/// Clones share the same counter, so the host can keep one while the game
/// owns another.
#[derive(Debug, Default, Clone)]
pub struct ManualScheduler {
    pending: Rc<RefCell<u32>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one pending request, if any
    pub fn take(&self) -> bool {
        let mut pending = self.pending.borrow_mut();
        if *pending > 0 {
            *pending -= 1;
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> u32 {
        *self.pending.borrow()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        *self.pending.borrow_mut() += 1;
    }
}

/// Host channel that records what it was sent
#[derive(Debug, Default, Clone)]
pub struct RecordingChannel {
    pub reports: Rc<RefCell<Vec<ScoreReport>>>,
    pub shared: Rc<RefCell<Vec<String>>>,
}

impl HostChannel for RecordingChannel {
    fn send_report(&mut self, report: &ScoreReport) -> Result<(), GameError> {
        self.reports.borrow_mut().push(*report);
        Ok(())
    }

    fn share(&mut self, summary: &str) -> Result<(), GameError> {
        self.shared.borrow_mut().push(summary.to_string());
        Ok(())
    }
}
