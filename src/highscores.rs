//! Best-score persistence
//!
//! Persisted to LocalStorage on the web as a plain integer string; native
//! builds keep it in memory.

use crate::GameError;
use crate::platform::ScoreStore;

/// The single best score across sessions
#[derive(Debug, Clone, Default)]
pub struct HighScore {
    best: u64,
}

impl HighScore {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "cyberDashHighScore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Lenient parse of a stored value: anything that isn't a non-negative
    /// integer reads as 0
    pub fn parse(raw: &str) -> u64 {
        let trimmed = raw.trim();
        trimmed
            .parse::<u64>()
            .ok()
            .or_else(|| {
                // Older builds stored the number as a float string
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map(|v| v.floor() as u64)
            })
            .unwrap_or(0)
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                let best = Self::parse(&raw);
                log::info!("Loaded high score {}", best);
                return Self { best };
            }
        }

        log::info!("No high score found, starting fresh");
        Self::new()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(target_arch = "wasm32")]
    fn persist(&self) -> Result<(), GameError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| GameError::Storage("LocalStorage unavailable".into()))?;
        storage
            .set_item(Self::STORAGE_KEY, &self.best.to_string())
            .map_err(|e| GameError::Storage(format!("{:?}", e)))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn persist(&self) -> Result<(), GameError> {
        Ok(())
    }
}

impl ScoreStore for HighScore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, score: u64) -> Result<(), GameError> {
        self.best = score;
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults_to_zero() {
        assert_eq!(HighScore::parse("420"), 420);
        assert_eq!(HighScore::parse(" 17 "), 17);
        assert_eq!(HighScore::parse("12.9"), 12);
        assert_eq!(HighScore::parse("-5"), 0);
        assert_eq!(HighScore::parse("NaN"), 0);
        assert_eq!(HighScore::parse(""), 0);
    }

    #[test]
    fn test_save_updates_best() {
        let mut store = HighScore::load();
        assert_eq!(ScoreStore::load(&store), 0);
        store.save(90).unwrap();
        assert_eq!(ScoreStore::load(&store), 90);
    }
}
