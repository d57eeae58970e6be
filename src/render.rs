/// Render snapshot — turns a `GameState` into an ordered list of draw
/// commands.  No I/O happens here; a front end replays the list onto
/// whatever surface it owns.

use crate::entities::{Entity, GameState, GameStatus};
use crate::geometry::{Position, Rect};

// ── Draw vocabulary ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Blue,
    Green,
    Red,
}

/// Image handles the front end knows how to draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    Enemy,
    Apple,
    FriendlyShot,
    EnemyShot,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    /// Sprite centred on `at`.
    Sprite { sprite: Sprite, at: Position },
    /// Text whose top-left corner is `at`.
    Text { text: String, at: Position, color: Color },
    Rect { rect: Rect, color: Color },
    Present,
}

// ── Layout ───────────────────────────────────────────────────────────────────

const BACKGROUND: Color = Color::White;
const HUD_COLOR: Color = Color::Black;
/// HUD column sits this far in from the right edge.
const HUD_INSET: f32 = 120.0;

fn restart_button(state: &GameState) -> Rect {
    let (w, h) = (state.config.width, state.config.height);
    Rect::new((w / 2.0).floor() - 50.0, (h / 2.0).floor() - 25.0, 100.0, 50.0)
}

fn play_again_button(state: &GameState) -> Rect {
    let (w, h) = (state.config.width, state.config.height);
    Rect::new((w / 2.0).floor() - 50.0, (h / 2.0).floor() + 50.0, 100.0, 50.0)
}

/// The clickable button shown over a terminal state, if any.
pub fn restart_region(state: &GameState) -> Option<Rect> {
    match state.status {
        GameStatus::Playing => None,
        GameStatus::GameOver => Some(restart_button(state)),
        GameStatus::Victory => Some(play_again_button(state)),
    }
}

// ── Public entry point ───────────────────────────────────────────────────────

/// Build one complete frame.
pub fn render(state: &GameState) -> Vec<DrawCommand> {
    let mut frame = vec![DrawCommand::Clear(BACKGROUND)];

    push_sprite(&mut frame, &state.apple);
    push_sprite(&mut frame, &state.ship);
    for enemy in &state.enemies {
        push_sprite(&mut frame, enemy);
    }
    for shot in state.friendly_shots.iter().chain(&state.enemy_shots) {
        push_sprite(&mut frame, shot);
    }

    draw_hud(&mut frame, state);

    match state.status {
        GameStatus::Playing => {}
        GameStatus::GameOver => draw_game_over(&mut frame, state),
        GameStatus::Victory => draw_victory(&mut frame, state),
    }

    frame.push(DrawCommand::Present);
    frame
}

fn push_sprite<E: Entity>(frame: &mut Vec<DrawCommand>, entity: &E) {
    frame.push(DrawCommand::Sprite {
        sprite: entity.sprite(),
        at: entity.position(),
    });
}

fn text(frame: &mut Vec<DrawCommand>, text: String, at: Position) {
    frame.push(DrawCommand::Text {
        text,
        at,
        color: HUD_COLOR,
    });
}

// ── HUD ──────────────────────────────────────────────────────────────────────

fn draw_hud(frame: &mut Vec<DrawCommand>, state: &GameState) {
    let x = state.config.width - HUD_INSET;
    text(frame, format!("Score: {}", state.score), Position::new(x, 30.0));
    text(frame, format!("Level: {}", state.level), Position::new(x, 70.0));
    text(frame, format!("Lives: {}", state.lives), Position::new(x, 110.0));
}

// ── Terminal overlays ────────────────────────────────────────────────────────

fn draw_button(frame: &mut Vec<DrawCommand>, rect: Rect, color: Color, label: &str) {
    frame.push(DrawCommand::Rect { rect, color });
    text(frame, label.to_string(), Position::new(rect.x + 10.0, rect.center().y));
}

fn draw_game_over(frame: &mut Vec<DrawCommand>, state: &GameState) {
    draw_button(frame, restart_button(state), Color::Red, "Restart");
}

fn draw_victory(frame: &mut Vec<DrawCommand>, state: &GameState) {
    let (cx, cy) = ((state.config.width / 2.0).floor(), (state.config.height / 2.0).floor());
    text(frame, "Congratulations!".to_string(), Position::new(cx - 120.0, cy - 50.0));
    text(frame, format!("Score: {}", state.score), Position::new(cx - 60.0, cy));
    draw_button(frame, play_again_button(state), Color::Green, "Play Again");
}
