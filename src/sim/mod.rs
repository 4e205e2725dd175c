//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module touches the host:
//! no rendering, no storage, no audio. Randomness comes in through
//! [`RandomSource`] and notifications go out as [`GameEvent`]s.

pub mod collision;
pub mod effects;
pub mod factory;
pub mod rng;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{Aabb, check_collision};
pub use rng::{EntropyRng, RandomSource, SequenceRng};
pub use scoring::{Difficulty, Scoring};
pub use state::{
    Cloud, Collectible, Expression, GameEvent, GamePhase, GrassBlade, Ground, GroundDetail,
    Obstacle, ObstacleKind, Particle, Player, Sun, TextEffect, World,
};
pub use tick::{begin, game_over, jump, tick};
