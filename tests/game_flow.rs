//! Drives `Game` end to end through recording host fakes

use std::cell::RefCell;
use std::rc::Rc;

use cyber_dash::audio::SoundEffect;
use cyber_dash::game::{Game, Ports, share_text};
use cyber_dash::platform::headless::{ManualScheduler, RecordingChannel};
use cyber_dash::platform::{AudioSink, HostChannel, ScoreReport, ScoreStore, UiSink};
use cyber_dash::sim::{GamePhase, Obstacle, ObstacleKind, SequenceRng};
use cyber_dash::{GameError, Settings, hex};
use glam::Vec2;

#[derive(Clone, Default)]
struct RecordingUi(Rc<RefCell<Vec<String>>>);

impl UiSink for RecordingUi {
    fn game_started(&mut self) {
        self.0.borrow_mut().push("started".into());
    }
    fn score_changed(&mut self, score: u64, high_score: u64) {
        self.0.borrow_mut().push(format!("score {score}/{high_score}"));
    }
    fn game_over(&mut self, score: u64) {
        self.0.borrow_mut().push(format!("over {score}"));
    }
    fn theme_changed(&mut self, index: usize) {
        self.0.borrow_mut().push(format!("theme {index}"));
    }
    fn notify(&mut self, text: &str) {
        self.0.borrow_mut().push(format!("notify {text}"));
    }
}

#[derive(Clone, Default)]
struct RecordingAudio(Rc<RefCell<Vec<SoundEffect>>>);

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.0.borrow_mut().push(effect);
    }
}

#[derive(Clone, Default)]
struct SharedStore {
    best: Rc<RefCell<u64>>,
    writes: Rc<RefCell<u32>>,
}

impl ScoreStore for SharedStore {
    fn load(&self) -> u64 {
        *self.best.borrow()
    }
    fn save(&mut self, score: u64) -> Result<(), GameError> {
        *self.best.borrow_mut() = score;
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}

/// Host whose every call fails
struct FailingChannel;

impl HostChannel for FailingChannel {
    fn send_report(&mut self, _report: &ScoreReport) -> Result<(), GameError> {
        Err(GameError::HostChannel("sendData rejected".into()))
    }
    fn share(&mut self, _summary: &str) -> Result<(), GameError> {
        Err(GameError::HostChannel("share sheet unavailable".into()))
    }
}

struct Harness {
    game: Game,
    scheduler: ManualScheduler,
    ui: RecordingUi,
    audio: RecordingAudio,
    store: SharedStore,
    channel: RecordingChannel,
}

fn harness(best: u64, with_channel: bool) -> Harness {
    let channel = RecordingChannel::default();
    let host = with_channel.then(|| Box::new(channel.clone()) as Box<dyn HostChannel>);
    harness_with_host(best, host, channel)
}

fn harness_with_host(
    best: u64,
    host: Option<Box<dyn HostChannel>>,
    channel: RecordingChannel,
) -> Harness {
    let scheduler = ManualScheduler::new();
    let ui = RecordingUi::default();
    let audio = RecordingAudio::default();
    let store = SharedStore::default();
    *store.best.borrow_mut() = best;

    let ports = Ports {
        store: Box::new(store.clone()),
        ui: Box::new(ui.clone()),
        audio: Box::new(audio.clone()),
        host,
        scheduler: Box::new(scheduler.clone()),
    };
    let game = Game::new(
        Settings::default(),
        Vec2::new(800.0, 700.0),
        ports,
        Box::new(SequenceRng::constant(0.5)),
    );
    Harness {
        game,
        scheduler,
        ui,
        audio,
        store,
        channel,
    }
}

fn spike_at(game: &Game, x: f32) -> Obstacle {
    let size = ObstacleKind::Spike.size();
    Obstacle {
        pos: Vec2::new(x, game.world().ground.y - size.y),
        size,
        kind: ObstacleKind::Spike,
        color: hex(0xb040ff),
    }
}

/// Run frames for as long as the game keeps asking for them
fn run_loop(h: &mut Harness, limit: u32) -> u32 {
    let mut frames = 0;
    while h.scheduler.take() && frames < limit {
        h.game.frame();
        frames += 1;
    }
    frames
}

#[test]
fn loop_stops_after_crash() {
    let mut h = harness(0, true);
    h.game.start_game();
    assert_eq!(h.scheduler.pending(), 1);

    let frames = run_loop(&mut h, 5_000);

    assert!(frames < 5_000);
    assert_eq!(h.game.phase(), GamePhase::GameOver);
    assert_eq!(h.scheduler.pending(), 0);

    // Further frames are inert
    let world_frame = h.game.world().frame;
    h.game.frame();
    assert_eq!(h.game.world().frame, world_frame);
    assert_eq!(h.scheduler.pending(), 0);
}

#[test]
fn crash_notifies_every_port_once() {
    let mut h = harness(0, true);
    h.game.start_game();
    let spike = spike_at(&h.game, 150.0);
    h.game.world_mut().obstacles.push(spike);

    h.game.frame();
    h.game.frame();

    assert_eq!(h.game.phase(), GamePhase::GameOver);
    let sounds = h.audio.0.borrow();
    assert_eq!(sounds.as_slice(), &[SoundEffect::Powerup, SoundEffect::Crash]);
    let ui = h.ui.0.borrow();
    assert_eq!(ui.iter().filter(|e| e.starts_with("over")).count(), 1);
    assert_eq!(
        h.channel.reports.borrow().as_slice(),
        &[ScoreReport {
            score: 0,
            high_score: 0
        }]
    );
}

#[test]
fn passing_obstacle_saves_high_score_immediately() {
    let mut h = harness(0, true);
    h.game.start_game();
    let spike = spike_at(&h.game, -25.0);
    h.game.world_mut().obstacles.push(spike);

    h.game.frame();

    assert_eq!(h.game.score(), 10);
    assert_eq!(h.game.high_score(), 10);
    assert_eq!(*h.store.best.borrow(), 10);
    assert!(h.ui.0.borrow().contains(&"score 10/10".to_string()));

    let spike = spike_at(&h.game, 120.0);
    h.game.world_mut().obstacles.push(spike);
    h.game.frame();

    assert_eq!(
        h.channel.reports.borrow().last(),
        Some(&ScoreReport {
            score: 10,
            high_score: 10
        })
    );
}

#[test]
fn stored_best_is_not_overwritten_by_lower_scores() {
    let mut h = harness(500, false);
    assert_eq!(h.game.high_score(), 500);
    assert!(h.ui.0.borrow().contains(&"score 0/500".to_string()));

    h.game.start_game();
    let spike = spike_at(&h.game, -25.0);
    h.game.world_mut().obstacles.push(spike);
    h.game.frame();

    assert_eq!(h.game.score(), 10);
    assert_eq!(*h.store.best.borrow(), 500);
    assert_eq!(*h.store.writes.borrow(), 0);
}

#[test]
fn restart_builds_a_clean_session() {
    let mut h = harness(0, true);
    h.game.start_game();
    {
        let world = h.game.world_mut();
        world.scoring.score = 340;
        world.scoring.combo = 9;
        world.scoring.multiplier = 2;
    }
    let spike = spike_at(&h.game, 120.0);
    h.game.world_mut().obstacles.push(spike);
    run_loop(&mut h, 10);
    assert_eq!(h.game.phase(), GamePhase::GameOver);

    h.game.restart_game();
    let pending_after_first = h.scheduler.pending();
    h.game.restart_game();

    let world = h.game.world();
    assert_eq!(world.phase, GamePhase::Playing);
    assert_eq!(world.scoring.score, 0);
    assert_eq!(world.scoring.combo, 0);
    assert_eq!(world.scoring.multiplier, 1);
    assert!(world.obstacles.is_empty());
    assert!(world.collectibles.is_empty());
    assert!(world.effects.is_empty());
    // Only the start burst survives a restart
    assert_eq!(world.particles.len(), 20);
    assert_eq!(world.screen_shake, 0.0);
    assert_eq!(world.theme_index, 2);

    // Only the restart from GameOver started a loop
    assert_eq!(pending_after_first, 1);
    assert_eq!(h.scheduler.pending(), 1);
    assert!(h.ui.0.borrow().contains(&"theme 2".to_string()));
}

#[test]
fn start_after_game_over_keeps_theme() {
    let mut h = harness(0, false);
    h.game.restart_game();
    assert_eq!(h.game.theme_index(), 1);
    let spike = spike_at(&h.game, 120.0);
    h.game.world_mut().obstacles.push(spike);
    run_loop(&mut h, 10);

    h.game.start_game();

    assert_eq!(h.game.phase(), GamePhase::Playing);
    assert_eq!(h.game.theme_index(), 1);
}

#[test]
fn share_uses_channel_or_falls_back() {
    let mut with = harness(0, true);
    with.game.share_score();
    assert_eq!(with.channel.shared.borrow().as_slice(), &[share_text(0)]);

    let mut without = harness(0, false);
    without.game.share_score();
    assert!(
        without
            .ui
            .0
            .borrow()
            .contains(&format!("notify {}", share_text(0)))
    );
}

fn failing_harness() -> Harness {
    harness_with_host(0, Some(Box::new(FailingChannel)), RecordingChannel::default())
}

#[test]
fn failed_share_falls_back_to_notify() {
    let mut h = failing_harness();
    h.game.start_game();
    let spike = spike_at(&h.game, -25.0);
    h.game.world_mut().obstacles.push(spike);
    h.game.frame();

    h.game.share_score();

    let ui = h.ui.0.borrow();
    let notices: Vec<_> = ui.iter().filter(|e| e.starts_with("notify")).collect();
    assert_eq!(notices, [&format!("notify {}", share_text(10))]);
}

#[test]
fn failed_report_still_ends_the_session() {
    let mut h = failing_harness();
    h.game.start_game();
    let spike = spike_at(&h.game, 150.0);
    h.game.world_mut().obstacles.push(spike);

    let frames = run_loop(&mut h, 10);

    assert!(frames < 10);
    assert_eq!(h.game.phase(), GamePhase::GameOver);
    assert_eq!(h.scheduler.pending(), 0);
    let ui = h.ui.0.borrow();
    let overs: Vec<_> = ui.iter().filter(|e| e.starts_with("over")).collect();
    assert_eq!(overs, [&"over 0".to_string()]);
    assert_eq!(h.audio.0.borrow().last(), Some(&SoundEffect::Crash));

    // The next session starts normally
    drop(ui);
    h.game.restart_game();
    assert_eq!(h.game.phase(), GamePhase::Playing);
}

#[test]
fn jump_plays_once_per_takeoff() {
    let mut h = harness(0, false);
    h.game.start_game();

    assert!(h.game.jump());
    assert!(!h.game.jump());
    h.game.frame();
    assert!(!h.game.jump());

    let jumps = h
        .audio
        .0
        .borrow()
        .iter()
        .filter(|s| **s == SoundEffect::Jump)
        .count();
    assert_eq!(jumps, 1);
}
