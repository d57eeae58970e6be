/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::{BonusMode, GameConfig, MovementMode, WaveMode};
use crate::entities::{Apple, Enemy, Entity, GameState, GameStatus, HeldKeys, Ship, Shot, ShotKind};
use crate::error::ConfigError;
use crate::geometry::{Position, LEFT, RIGHT};
use crate::input::{InputEvent, Key};
use crate::render::restart_region;

// ── Spawn rules ──────────────────────────────────────────────────────────────

/// Row the wave lines up on, and the spacing between enemies.
const WAVE_ROW_Y: f32 = 20.0;
const WAVE_SPACING: f32 = 50.0;
const WAVE_MARGIN: f32 = 20.0;

/// Apple spawn box: 20 px in from the sides and top, 100 px up from the bottom.
const APPLE_SIDE_MARGIN: i64 = 20;
const APPLE_TOP_MARGIN: i64 = 20;
const APPLE_BOTTOM_MARGIN: i64 = 100;

/// One enemy every 50 px along the top row, starting 20 px in and stopping
/// short of the last 10 px.
pub fn spawn_wave(config: &GameConfig) -> Vec<Enemy> {
    let mut enemies = Vec::new();
    let mut x = WAVE_MARGIN;
    while x < config.width - 10.0 {
        enemies.push(Enemy::new(Position::new(x, WAVE_ROW_Y), config.vibration_rate));
        x += WAVE_SPACING;
    }
    enemies
}

/// Uniform integer position inside the apple spawn box.  On fields too small
/// for the box each range collapses onto its lower bound.
pub fn respawn_apple(config: &GameConfig, rng: &mut impl Rng) -> Apple {
    let x_hi = (config.width as i64 - APPLE_SIDE_MARGIN).max(APPLE_SIDE_MARGIN);
    let y_hi = (config.height as i64 - APPLE_BOTTOM_MARGIN).max(APPLE_TOP_MARGIN);
    let x = rng.gen_range(APPLE_SIDE_MARGIN..=x_hi);
    let y = rng.gen_range(APPLE_TOP_MARGIN..=y_hi);
    Apple {
        position: Position::new(x as f32, y as f32),
    }
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Validate `config` and build the opening state of a run.
pub fn new_game(config: GameConfig, rng: &mut impl Rng) -> Result<GameState, ConfigError> {
    config.validate()?;
    let state = fresh_state(config, rng);
    log::info!(
        "New game: {}x{} field, {} enemies, {:?}/{:?}",
        state.config.width,
        state.config.height,
        state.wave_size,
        state.config.wave_mode,
        state.config.bonus_mode
    );
    Ok(state)
}

/// Throw the current run away and rebuild it from the same configuration.
pub fn restart(state: &GameState, rng: &mut impl Rng) -> GameState {
    log::info!("Restarting (final score {}, level {})", state.score, state.level);
    fresh_state(state.config.clone(), rng)
}

fn fresh_state(config: GameConfig, rng: &mut impl Rng) -> GameState {
    let enemies = spawn_wave(&config);
    let apple = respawn_apple(&config, rng);
    GameState {
        ship: Ship::new(&config),
        friendly_shots: Vec::new(),
        enemy_shots: Vec::new(),
        wave_size: enemies.len() as u32,
        enemies,
        apple,
        score: 0,
        level: 1,
        lives: config.starting_lives,
        enemy_deaths_this_level: 0,
        status: GameStatus::Playing,
        held: HeldKeys::default(),
        frame: 0,
        quit_requested: false,
        config,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Step left, unless the step would leave the field; the ship then stays put.
pub fn move_ship_left(state: &GameState) -> GameState {
    let target = state.ship.position.offset(LEFT.scale(state.config.ship_step));
    if target.x < 0.0 {
        return state.clone();
    }
    GameState {
        ship: Ship { position: target },
        ..state.clone()
    }
}

pub fn move_ship_right(state: &GameState) -> GameState {
    let target = state.ship.position.offset(RIGHT.scale(state.config.ship_step));
    if target.x > state.config.width {
        return state.clone();
    }
    GameState {
        ship: Ship { position: target },
        ..state.clone()
    }
}

/// Fire one friendly shot from the ship's muzzle.  No cooldown.
pub fn ship_shoot(state: &GameState) -> GameState {
    let mut friendly_shots = state.friendly_shots.clone();
    friendly_shots.push(Shot::new(ShotKind::Friendly, state.ship.muzzle()));
    GameState {
        friendly_shots,
        ..state.clone()
    }
}

/// One Bernoulli trial per tick: with `enemy_fire_chance`, a single
/// uniformly chosen enemy fires.  Without enemies nothing is drawn.
pub fn enemies_shoot(state: &GameState, rng: &mut impl Rng) -> GameState {
    if state.enemies.is_empty() || !rng.gen_bool(state.config.enemy_fire_chance) {
        return state.clone();
    }
    let shooter = &state.enemies[rng.gen_range(0..state.enemies.len())];
    let mut enemy_shots = state.enemy_shots.clone();
    enemy_shots.push(Shot::new(ShotKind::Enemy, shooter.position));
    GameState {
        enemy_shots,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the game by one frame.
///
/// Events are applied first, in order.  Unless the game is in a terminal
/// state, the world then advances: held movement, enemy fire, friendly shots
/// against enemies, enemy shots against the ship, friendly shots against the
/// apple, off-field culling, the victory check, and finally enemy vibration.
/// In a terminal state only `Quit` and a click on the restart button do
/// anything.
pub fn tick(state: &GameState, events: &[InputEvent], rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();

    for event in events {
        next = apply_event(&next, *event, rng);
    }

    if next.is_terminal() {
        return next;
    }

    if next.config.movement == MovementMode::Held {
        // Right wins when both are down.
        if next.held.right {
            next = move_ship_right(&next);
        } else if next.held.left {
            next = move_ship_left(&next);
        }
    }

    next.frame += 1;
    next = enemies_shoot(&next, rng);

    resolve_friendly_fire(&mut next);
    resolve_enemy_fire(&mut next);
    if next.is_terminal() {
        return next;
    }
    resolve_bonus(&mut next, rng);
    cull_off_field(&mut next);

    if matches!(next.config.wave_mode, WaveMode::SingleWave { .. }) && next.enemies.is_empty() {
        log::info!("Wave cleared: victory with score {}", next.score);
        next.status = GameStatus::Victory;
        return next;
    }

    for enemy in &mut next.enemies {
        enemy.vibrate();
    }
    next
}

fn apply_event(state: &GameState, event: InputEvent, rng: &mut impl Rng) -> GameState {
    let playing = !state.is_terminal();
    let step_mode = state.config.movement == MovementMode::Step;
    match event {
        InputEvent::Quit => GameState {
            quit_requested: true,
            ..state.clone()
        },
        InputEvent::PointerDown(p) => match restart_region(state) {
            Some(region) if region.contains(p) => GameState {
                quit_requested: state.quit_requested,
                ..restart(state, rng)
            },
            _ => state.clone(),
        },
        InputEvent::KeyDown(key) => {
            let mut next = state.clone();
            match key {
                Key::Left => next.held.left = true,
                Key::Right => next.held.right = true,
                Key::Fire => {}
            }
            match key {
                Key::Left if playing && step_mode => move_ship_left(&next),
                Key::Right if playing && step_mode => move_ship_right(&next),
                Key::Fire if playing => ship_shoot(&next),
                _ => next,
            }
        }
        InputEvent::KeyUp(key) => {
            let mut next = state.clone();
            match key {
                Key::Left => next.held.left = false,
                Key::Right => next.held.right = false,
                Key::Fire => {}
            }
            next
        }
    }
}

/// Each friendly shot moves, then kills at most one enemy: the first one in
/// roster order it encounters.  The shot is spent on a kill.
fn resolve_friendly_fire(state: &mut GameState) {
    let speed = state.config.shot_speed;
    let padding = state.config.padding;
    let shots = std::mem::take(&mut state.friendly_shots);
    let mut survivors = Vec::with_capacity(shots.len());

    for mut shot in shots {
        shot.advance(speed);
        match state.enemies.iter().position(|e| shot.encounters(e, padding)) {
            Some(hit) => {
                state.enemies.remove(hit);
                state.score += 1;
                state.enemy_deaths_this_level += 1;
                log::debug!("Enemy down at ({:.0}, {:.0}), score {}", shot.position.x, shot.position.y, state.score);
                record_kill(state);
            }
            None => survivors.push(shot),
        }
    }
    state.friendly_shots = survivors;
}

/// Level bookkeeping after a kill.
fn record_kill(state: &mut GameState) {
    match state.config.wave_mode {
        WaveMode::Infinite => {
            if state.enemy_deaths_this_level >= state.wave_size {
                advance_level(state);
                state.enemies = spawn_wave(&state.config);
                state.wave_size = state.enemies.len() as u32;
            }
        }
        WaveMode::SingleWave { kills_per_level } => {
            if state.enemy_deaths_this_level >= kills_per_level {
                advance_level(state);
            }
        }
    }
}

fn advance_level(state: &mut GameState) {
    state.level += 1;
    state.enemy_deaths_this_level = 0;
    log::info!("Level {} reached (score {})", state.level, state.score);
}

/// Enemy shots move; the first one touching the ship is spent and costs a
/// life.  Any other shot overlapping the ship this tick lands next tick.
fn resolve_enemy_fire(state: &mut GameState) {
    let speed = state.config.shot_speed;
    let padding = state.config.padding;
    let ship = state.ship.clone();
    let mut hit = false;

    state.enemy_shots.retain_mut(|shot| {
        shot.advance(speed);
        if !hit && shot.encounters(&ship, padding) {
            hit = true;
            return false;
        }
        true
    });

    if hit {
        lose_life(state);
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    log::debug!("Ship hit, {} lives left", state.lives);
    if state.lives == 0 {
        log::info!("Game over: score {}, level {}", state.score, state.level);
        state.status = GameStatus::GameOver;
    }
}

/// Every friendly shot is tested against a respawning apple, in order; each
/// hit scores and moves the apple, so later shots test the new spot.  Shots
/// are not spent on the apple.
fn resolve_bonus(state: &mut GameState, rng: &mut impl Rng) {
    let BonusMode::Respawning { score } = state.config.bonus_mode else {
        return;
    };
    let padding = state.config.padding;
    for i in 0..state.friendly_shots.len() {
        if state.friendly_shots[i].encounters(&state.apple, padding) {
            state.score += score;
            state.apple = respawn_apple(&state.config, rng);
            log::debug!("Apple hit, score {}", state.score);
        }
    }
}

/// Shots whose centre is more than one shot radius outside the field are gone.
fn cull_off_field(state: &mut GameState) {
    let r = state.config.shot_radius;
    let (w, h) = (state.config.width, state.config.height);
    let on_field = |shot: &Shot| {
        let p = shot.position;
        p.x >= -r && p.x <= w + r && p.y >= -r && p.y <= h + r
    };
    state.friendly_shots.retain(on_field);
    state.enemy_shots.retain(on_field);
}
