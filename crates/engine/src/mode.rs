//! Application mode state machine.
//!
//! The table here is pure: it only answers "where does this trigger lead".
//! Side effects (clearing the world, loading, toggling the player) belong to
//! whoever drives the machine.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Start screen. Only a new or loaded canvas leaves it.
    #[default]
    Title,
    /// Player moves and edits the world.
    Playing,
    /// Pause menu over a frozen world.
    Paused,
}

/// Menu actions and the escape control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    NewCanvas,
    LoadCanvas,
    SaveCanvas,
    Return,
    Escape,
}

impl Mode {
    /// The mode `trigger` leads to, or `None` if it is not valid here.
    pub fn transition(self, trigger: Trigger) -> Option<Mode> {
        use Mode::*;
        use Trigger::*;
        match (self, trigger) {
            (Title, NewCanvas | LoadCanvas) => Some(Playing),
            (Playing, Escape) => Some(Paused),
            (Paused, Return | Escape) => Some(Playing),
            (Paused, SaveCanvas) => Some(Paused),
            (Paused, NewCanvas | LoadCanvas) => Some(Playing),
            _ => None,
        }
    }

    /// Gameplay input (clicks, scroll, number keys) is only honored while playing.
    pub fn accepts_gameplay_input(self) -> bool {
        self == Mode::Playing
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Title => "title",
            Mode::Playing => "playing",
            Mode::Paused => "paused",
        };
        f.write_str(name)
    }
}
