//! Cyber Dash - a one-button side-scrolling runner
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, spawning, scoring)
//! - `game`: Session state machine and frame orchestration
//! - `renderer`: Scene building and the WebGPU pipeline
//! - `platform`: Ports to the host (storage, UI, audio, scheduling)
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::GameError;
pub use game::Game;
pub use highscores::HighScore;
pub use settings::{QualityPreset, Settings};
pub use tuning::{Theme, Tuning, Variant};

/// sRGB-encoded RGBA color, written to the surface without conversion
pub type Color = [f32; 4];

/// Game configuration constants
pub mod consts {
    /// Fixed player column
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_SIZE: f32 = 48.0;

    /// Ground band sits this far above the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 100.0;
    /// Raised strip drawn on top of the ground band
    pub const GROUND_STRIP: f32 = 8.0;

    pub const COLLECTIBLE_SIZE: f32 = 22.0;
    /// Collectibles float this far above the ground line
    pub const COLLECTIBLE_LIFT: f32 = 70.0;
    pub const COLLECTIBLE_SPIN: f32 = 0.15;

    /// Player trail length (newest first)
    pub const TRAIL_LENGTH: usize = 12;

    pub const TEXT_RISE: f32 = 2.5;
    pub const TEXT_FADE: f32 = 0.025;

    /// Viewport used before the host reports a size
    pub const DEFAULT_WIDTH: f32 = 960.0;
    pub const DEFAULT_HEIGHT: f32 = 640.0;
}

/// Build an opaque color from a 0xRRGGBB literal
pub const fn hex(rgb: u32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with its alpha scaled
#[inline]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}
