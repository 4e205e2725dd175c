//! Per-frame simulation step
//!
//! One call to [`tick`] is one display refresh. All removals and phase
//! changes complete before it returns, so a draw never sees a half-updated
//! world.

use glam::Vec2;

use super::effects;
use super::factory;
use super::rng::RandomSource;
use super::state::{Expression, GameEvent, GamePhase, World};

/// Advance the world by one frame. Does nothing outside `Playing`.
pub fn tick(world: &mut World, rng: &mut dyn RandomSource) {
    if world.phase != GamePhase::Playing {
        return;
    }
    world.frame += 1;

    world.player.animate_face(&world.tuning);

    // Ambient decoration
    world.sun.bob();
    effects::update_clouds(&mut world.clouds, world.viewport.x, rng);
    effects::update_grass(&mut world.grass, world.viewport.x);
    effects::update_ground_details(
        &mut world.ground_details,
        world.viewport.x,
        world.difficulty.speed,
    );

    // Player physics
    world.player.integrate(&world.tuning, world.ground.y);
    world.player.record_trail();

    // Spawning
    if world.difficulty.tick_spawn(&world.tuning) {
        let obstacle = factory::obstacle(
            world.viewport.x,
            world.ground.y,
            world.theme().secondary,
            rng,
        );
        log::debug!(
            "spawned {:?}, next interval {:.2}",
            obstacle.kind,
            world.difficulty.spawn_interval
        );
        world.obstacles.push(obstacle);
    }
    if rng.chance(world.tuning.collectible_chance) {
        world
            .collectibles
            .push(factory::collectible(world.viewport.x, world.ground.y));
    }

    if advance_obstacles(world, rng) {
        game_over(world, rng);
        return;
    }
    advance_collectibles(world, rng);

    world.difficulty.ramp_speed(&world.tuning);
    effects::update_particles(&mut world.particles);
    effects::update_text(&mut world.effects);

    if world.screen_shake > 0.0 {
        world.screen_shake *= world.tuning.shake_decay;
        if world.screen_shake < 0.1 {
            world.screen_shake = 0.0;
        }
    }
}

/// Scroll obstacles, credit passed ones. Returns true on a fatal hit.
fn advance_obstacles(world: &mut World, rng: &mut dyn RandomSource) -> bool {
    let speed = world.difficulty.speed;
    let player = world.player.bounds();

    let mut i = world.obstacles.len();
    while i > 0 {
        i -= 1;
        world.obstacles[i].pos.x -= speed;

        if player.overlaps(&world.obstacles[i].bounds()) {
            return true;
        }

        if world.obstacles[i].is_passed() {
            let obstacle = world.obstacles.swap_remove(i);
            let step = world.scoring.obstacle_passed(&world.tuning);
            world.events.push(GameEvent::ObstaclePassed);

            if let Some(multiplier) = step {
                world.float_text(
                    format!("x{multiplier}"),
                    obstacle.pos,
                    factory::COLLECTIBLE_COLOR,
                );
                world.player.set_expression(Expression::Smiling, 18);
                world.events.push(GameEvent::MultiplierUp(multiplier));
            }
            world.events.push(GameEvent::ScoreChanged(world.scoring.score));
            world.burst(obstacle.pos, 6, obstacle.color, rng);
        }
    }
    false
}

/// Scroll and spin pickups, collect the ones the player touches
fn advance_collectibles(world: &mut World, rng: &mut dyn RandomSource) {
    let speed = world.difficulty.speed;
    let player = world.player.bounds();

    let mut i = world.collectibles.len();
    while i > 0 {
        i -= 1;
        let c = &mut world.collectibles[i];
        c.pos.x -= speed;
        c.rotation += crate::consts::COLLECTIBLE_SPIN;

        if player.overlaps(&c.bounds()) {
            let c = world.collectibles.swap_remove(i);
            world.scoring.collected(&world.tuning);

            let theme = world.theme();
            world.float_text(
                format!("+{}", world.tuning.collectible_bonus),
                c.pos,
                factory::COLLECTIBLE_COLOR,
            );
            world.burst(c.pos, 12, theme.secondary, rng);
            world.player.set_expression(Expression::Smiling, 20);
            world.player.start_talking(12);
            world.events.push(GameEvent::Collected);
            world.events.push(GameEvent::ScoreChanged(world.scoring.score));
        } else if c.is_offscreen() {
            world.collectibles.swap_remove(i);
        }
    }
}

/// Jump if grounded and playing. Returns whether the jump happened.
pub fn jump(world: &mut World, rng: &mut dyn RandomSource) -> bool {
    if world.phase != GamePhase::Playing {
        return false;
    }
    if !world.player.try_jump(&world.tuning) {
        return false;
    }
    let feet = Vec2::new(
        world.player.pos.x + world.player.size.x / 2.0,
        world.player.bottom(),
    );
    let color = world.theme().primary;
    world.burst(feet, 12, color, rng);
    world.events.push(GameEvent::Jumped);
    true
}

/// Enter `Playing` with a celebratory burst at the player
pub fn begin(world: &mut World, rng: &mut dyn RandomSource) {
    world.phase = GamePhase::Playing;
    let at = world.player.pos;
    let color = world.theme().primary;
    world.burst(at, 20, color, rng);
}

/// `Playing` -> `GameOver`; safe to call more than once
pub fn game_over(world: &mut World, rng: &mut dyn RandomSource) {
    if world.phase != GamePhase::Playing {
        return;
    }
    world.phase = GamePhase::GameOver;
    world.player.set_expression(Expression::Sad, 30);
    world.screen_shake = world.tuning.death_shake;

    let center = world.player.center();
    let color = world.theme().secondary;
    world.burst(center, 35, color, rng);
    world.events.push(GameEvent::Crashed);
}
