/// All game entity types.  Mostly data; the only behaviour here is the
/// per-entity motion each type owns (shot travel, enemy vibration).

use crate::config::GameConfig;
use crate::geometry::{collides, Position, Vector, DOWN, LEFT, RIGHT, UP};
use crate::render::Sprite;

// ── Shared capability ────────────────────────────────────────────────────────

/// Anything that occupies a spot on the field and can be drawn there.
pub trait Entity {
    fn position(&self) -> Position;

    fn sprite(&self) -> Sprite;

    fn encounters<E: Entity + ?Sized>(&self, other: &E, padding: f32) -> bool {
        collides(self.position(), other.position(), padding)
    }
}

// ── Ship ─────────────────────────────────────────────────────────────────────

/// Ship sprite is 40x40, centred on its position.
pub const SHIP_SIZE: f32 = 40.0;

#[derive(Clone, Debug)]
pub struct Ship {
    pub position: Position,
}

impl Ship {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: Position::new(config.width / 2.0, config.height - SHIP_SIZE / 2.0),
        }
    }

    /// Where a fired shot appears: top-centre of the sprite.
    pub fn muzzle(&self) -> Position {
        self.position.offset(UP.scale(SHIP_SIZE / 2.0))
    }
}

impl Entity for Ship {
    fn position(&self) -> Position {
        self.position
    }

    fn sprite(&self) -> Sprite {
        Sprite::Ship
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

pub const ENEMY_SIZE: f32 = 20.0;

/// Enemies shiver in a tiny closed loop: up, left, down, right.
pub const VIBRATION_PATTERN: [Vector; 4] = [UP, LEFT, DOWN, RIGHT];

#[derive(Clone, Debug)]
pub struct Enemy {
    pub position: Position,
    pub vibration_rate: f32,
    /// Index into `VIBRATION_PATTERN` of the next step.
    pub vibration_step: usize,
}

impl Enemy {
    pub fn new(position: Position, vibration_rate: f32) -> Self {
        Self {
            position,
            vibration_rate,
            vibration_step: 0,
        }
    }

    /// Take one step of the vibration cycle.
    pub fn vibrate(&mut self) {
        let step = VIBRATION_PATTERN[self.vibration_step].scale(self.vibration_rate);
        self.position.apply(step);
        self.vibration_step = (self.vibration_step + 1) % VIBRATION_PATTERN.len();
    }
}

impl Entity for Enemy {
    fn position(&self) -> Position {
        self.position
    }

    fn sprite(&self) -> Sprite {
        Sprite::Enemy
    }
}

// ── Apple (bonus target) ─────────────────────────────────────────────────────

pub const APPLE_SIZE: f32 = 20.0;

#[derive(Clone, Debug)]
pub struct Apple {
    pub position: Position,
}

impl Entity for Apple {
    fn position(&self) -> Position {
        self.position
    }

    fn sprite(&self) -> Sprite {
        Sprite::Apple
    }
}

// ── Shots ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShotKind {
    Friendly,
    Enemy,
}

impl ShotKind {
    /// Signed multiple of the base shot speed along y.
    pub fn direction(self) -> f32 {
        match self {
            ShotKind::Friendly => -2.0,
            ShotKind::Enemy => 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Shot {
    pub position: Position,
    pub kind: ShotKind,
}

impl Shot {
    /// `origin` is copied, so later motion of the shooter never drags the shot.
    pub fn new(kind: ShotKind, origin: Position) -> Self {
        Self {
            position: origin,
            kind,
        }
    }

    /// Move one tick at `base_speed` px/tick scaled by the kind's direction.
    pub fn advance(&mut self, base_speed: f32) {
        self.position.apply(Vector::new(0.0, base_speed * self.kind.direction()));
    }
}

impl Entity for Shot {
    fn position(&self) -> Position {
        self.position
    }

    fn sprite(&self) -> Sprite {
        match self.kind {
            ShotKind::Friendly => Sprite::FriendlyShot,
            ShotKind::Enemy => Sprite::EnemyShot,
        }
    }
}

// ── Master game state ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Lives exhausted.
    GameOver,
    /// Wave cleared in single-wave mode.
    Victory,
}

/// Direction keys currently down, for `MovementMode::Held`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// The entire game state.  Cloneable so `tick` can return a fresh copy
/// without touching its input.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub ship: Ship,
    pub friendly_shots: Vec<Shot>,
    pub enemy_shots: Vec<Shot>,
    pub enemies: Vec<Enemy>,
    pub apple: Apple,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub enemy_deaths_this_level: u32,
    /// Number of enemies spawned by the most recent wave.
    pub wave_size: u32,
    pub status: GameStatus,
    pub held: HeldKeys,
    /// Advanced (non-terminal) ticks since the run started.
    pub frame: u64,
    pub quit_requested: bool,
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn is_victory(&self) -> bool {
        self.status == GameStatus::Victory
    }

    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::Playing
    }
}
