//! Session state machine and frame orchestration
//!
//! [`Game`] owns the [`World`] and every host collaborator. Input handlers
//! call into it, the host scheduler calls [`Game::frame`], and everything the
//! outside world needs to know leaves through the platform ports.

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::platform::headless::{LogUi, MemoryStore, SilentAudio};
use crate::platform::{AudioSink, FrameScheduler, HostChannel, ScoreReport, ScoreStore, UiSink};
use crate::renderer::{self, SceneOptions, Surface};
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GamePhase, RandomSource, World};

/// Particles spawned at a touch point
const TAP_BURST: usize = 5;

/// Host collaborators handed to the game at construction
pub struct Ports {
    pub store: Box<dyn ScoreStore>,
    pub ui: Box<dyn UiSink>,
    pub audio: Box<dyn AudioSink>,
    pub host: Option<Box<dyn HostChannel>>,
    pub scheduler: Box<dyn FrameScheduler>,
}

impl Ports {
    /// In-memory store, logging UI, no audio, no host channel
    pub fn headless(scheduler: impl FrameScheduler + 'static) -> Self {
        Self {
            store: Box::new(MemoryStore::default()),
            ui: Box::new(LogUi),
            audio: Box::new(SilentAudio),
            host: None,
            scheduler: Box::new(scheduler),
        }
    }
}

pub struct Game {
    world: World,
    rng: Box<dyn RandomSource>,
    settings: Settings,
    high_score: u64,
    ports: Ports,
    surface: Option<Box<dyn Surface>>,
}

impl Game {
    pub fn new(
        settings: Settings,
        viewport: Vec2,
        ports: Ports,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let mut world = World::new(settings.variant.tuning(), 0, viewport, rng.as_mut());
        world.max_particles = settings.max_particles();
        let high_score = ports.store.load();
        log::info!(
            "Game ready ({} variant, high score {})",
            settings.variant.as_str(),
            high_score
        );

        let mut game = Self {
            world,
            rng,
            settings,
            high_score,
            ports,
            surface: None,
        };
        game.ports.ui.score_changed(0, high_score);
        game.ports.ui.theme_changed(0);
        game
    }

    /// Attach the drawing surface and show the idle scene
    pub fn set_surface(&mut self, surface: Box<dyn Surface>) {
        self.surface = Some(surface);
        self.draw();
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct world access for hosts and tests that script a session
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn score(&self) -> u64 {
        self.world.scoring.score
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn theme_index(&self) -> usize {
        self.world.theme_index
    }

    /// Start a session from `Menu` or `GameOver`. Ignored while playing so a
    /// second frame loop can never start.
    pub fn start_game(&mut self) {
        if self.world.phase == GamePhase::Playing {
            log::debug!("start_game ignored, already playing");
            return;
        }
        let theme_index = self.world.theme_index;
        self.enter_session(theme_index);
        self.ports.scheduler.request_frame();
    }

    /// Advance the theme and start over from a fresh session
    pub fn restart_game(&mut self) {
        let was_playing = self.world.phase == GamePhase::Playing;
        let next_theme = (self.world.theme_index + 1) % self.world.tuning.theme_count();
        self.enter_session(next_theme);
        self.ports.ui.theme_changed(next_theme);
        // A running loop keeps going on its own
        if !was_playing {
            self.ports.scheduler.request_frame();
        }
    }

    fn enter_session(&mut self, theme_index: usize) {
        let tuning = self.settings.variant.tuning();
        let viewport = self.world.viewport;
        self.world = World::new(tuning, theme_index, viewport, self.rng.as_mut());
        self.world.max_particles = self.settings.max_particles();
        sim::begin(&mut self.world, self.rng.as_mut());

        self.ports.audio.play(SoundEffect::Powerup);
        self.ports.ui.game_started();
        self.ports.ui.score_changed(0, self.high_score);
        log::info!("Session started (theme {})", theme_index);
    }

    /// The single action input. Only acts while playing and grounded.
    pub fn jump(&mut self) -> bool {
        let jumped = sim::jump(&mut self.world, self.rng.as_mut());
        self.dispatch_events();
        jumped
    }

    /// Pointer or touch press at canvas-local coordinates. Starts the first
    /// session from the menu, jumps while playing.
    pub fn tap(&mut self, x: f32, y: f32, touch: bool) {
        match self.world.phase {
            GamePhase::Menu => return self.start_game(),
            GamePhase::GameOver => return,
            GamePhase::Playing => {}
        }
        if touch {
            let color = self.world.theme().primary;
            self.world
                .burst(Vec2::new(x, y), TAP_BURST, color, self.rng.as_mut());
        }
        self.jump();
    }

    /// One display refresh: update, draw, then reschedule while playing
    pub fn frame(&mut self) {
        sim::tick(&mut self.world, self.rng.as_mut());
        self.dispatch_events();
        self.draw();

        if self.world.phase == GamePhase::Playing {
            self.ports.scheduler.request_frame();
        }
    }

    /// New viewport size in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let viewport = Vec2::new(width as f32, height as f32);
        self.world.resize(viewport, self.rng.as_mut());
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(width, height);
        }
        // The loop redraws on its own while playing
        if self.world.phase != GamePhase::Playing {
            self.draw();
        }
    }

    /// Share the current score through the host, or tell the player locally
    pub fn share_score(&mut self) {
        let text = share_text(self.world.scoring.score);
        match self.ports.host.as_mut() {
            Some(host) => {
                if let Err(e) = host.share(&text) {
                    log::warn!("Host share failed: {}", e);
                    self.ports.ui.notify(&text);
                }
            }
            None => self.ports.ui.notify(&text),
        }
    }

    fn draw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let shake = if self.settings.effective_screen_shake() {
            renderer::shake_offset(self.world.screen_shake, self.rng.as_mut())
        } else {
            Vec2::ZERO
        };
        let options = SceneOptions {
            trail: self.settings.quality.trail_enabled(),
        };
        let scene = renderer::build(&self.world, shake, &options);
        if let Err(e) = surface.present(&scene) {
            log::warn!("Render error: {}", e);
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.world.drain_events() {
            match event {
                GameEvent::Jumped => self.ports.audio.play(SoundEffect::Jump),
                GameEvent::Collected => self.ports.audio.play(SoundEffect::Score),
                GameEvent::MultiplierUp(multiplier) => {
                    log::debug!("Multiplier x{}", multiplier);
                    self.ports.audio.play(SoundEffect::Powerup);
                }
                GameEvent::ObstaclePassed => {}
                GameEvent::ScoreChanged(score) => {
                    if score > self.high_score {
                        self.high_score = score;
                        if let Err(e) = self.ports.store.save(score) {
                            log::warn!("Could not save high score: {}", e);
                        }
                    }
                    self.ports.ui.score_changed(score, self.high_score);
                }
                GameEvent::Crashed => self.on_crash(),
            }
        }
    }

    fn on_crash(&mut self) {
        let score = self.world.scoring.score;
        log::info!("Game over: score {}, high score {}", score, self.high_score);
        self.ports.audio.play(SoundEffect::Crash);
        self.ports.ui.game_over(score);

        if let Some(host) = self.ports.host.as_mut() {
            let report = ScoreReport {
                score,
                high_score: self.high_score,
            };
            if let Err(e) = host.send_report(&report) {
                log::warn!("Score report not delivered: {}", e);
            }
        }
    }
}

/// Message used when sharing a result
pub fn share_text(score: u64) -> String {
    format!("I scored {score} points in Cyber Dash!")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::headless::ManualScheduler;
    use crate::sim::SequenceRng;

    fn game() -> (Game, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let game = Game::new(
            Settings::default(),
            Vec2::new(800.0, 700.0),
            Ports::headless(scheduler.clone()),
            Box::new(SequenceRng::constant(0.5)),
        );
        (game, scheduler)
    }

    #[test]
    fn test_share_text() {
        assert_eq!(share_text(120), "I scored 120 points in Cyber Dash!");
    }

    #[test]
    fn test_start_twice_requests_one_frame() {
        let (mut game, scheduler) = game();
        game.start_game();
        game.start_game();
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(game.world().particles.len(), 20);
    }

    #[test]
    fn test_menu_frame_does_not_reschedule() {
        let (mut game, scheduler) = game();
        game.frame();
        assert_eq!(game.phase(), GamePhase::Menu);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(game.world().frame, 0);
    }

    #[test]
    fn test_tap_jumps_and_sparks_on_touch() {
        let (mut game, _scheduler) = game();
        game.start_game();
        let before = game.world().particles.len();
        game.tap(300.0, 200.0, true);
        assert!(game.world().player.is_jumping);
        assert_eq!(game.world().particles.len(), before + TAP_BURST + 12);
    }

    #[test]
    fn test_tap_in_menu_starts_without_jumping() {
        let (mut game, scheduler) = game();
        game.tap(300.0, 200.0, true);
        assert_eq!(game.phase(), GamePhase::Playing);
        assert_eq!(scheduler.pending(), 1);
        assert!(!game.world().player.is_jumping);
    }

    #[test]
    fn test_tap_ignored_after_game_over() {
        let (mut game, scheduler) = game();
        game.start_game();
        game.world_mut().phase = GamePhase::GameOver;
        let particles = game.world().particles.len();
        game.tap(300.0, 200.0, true);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert_eq!(game.world().particles.len(), particles);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_restart_cycles_theme() {
        let (mut game, _scheduler) = game();
        let count = game.world().tuning.theme_count();
        for i in 1..=count {
            game.restart_game();
            assert_eq!(game.theme_index(), i % count);
        }
    }

    #[test]
    fn test_resize_moves_ground() {
        let (mut game, _scheduler) = game();
        game.resize(1024, 768);
        assert_eq!(game.world().ground.y, 668.0);
        assert_eq!(game.world().player.bottom(), 668.0);
        game.resize(0, 768);
        assert_eq!(game.world().viewport, Vec2::new(1024.0, 768.0));
    }
}
