/// Discrete input events fed to `compute::tick`, one slice per frame.

use crate::geometry::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Fire,
}

#[derive(Clone, Copy, Debug)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    KeyUp(Key),
    /// A click or tap, already in field coordinates.
    PointerDown(Position),
}
