//! Symbolic input identifiers delivered by the host.
//!
//! Device events use the host's event names (`"left mouse down"`,
//! `"scroll up"`, `"3"`, `"escape"`); menu buttons use their labels.

use std::str::FromStr;

use canvas_engine::mode::Trigger;
use canvas_engine::rules::Click;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Click(Click),
    ScrollUp,
    ScrollDown,
    /// Number key `1`..=`9`.
    Digit(u8),
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    NewCanvas,
    LoadCanvas,
    SaveCanvas,
    Return,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{name}`")]
pub struct UnknownInput {
    kind: &'static str,
    name: String,
}

impl InputEvent {
    /// Palette index selected by a number key.
    pub fn palette_index(self) -> Option<usize> {
        match self {
            InputEvent::Digit(d) => Some(usize::from(d).saturating_sub(1)),
            _ => None,
        }
    }
}

impl FromStr for InputEvent {
    type Err = UnknownInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let event = match s.trim() {
            "left mouse down" => InputEvent::Click(Click::Primary),
            "right mouse down" => InputEvent::Click(Click::Secondary),
            "scroll up" => InputEvent::ScrollUp,
            "scroll down" => InputEvent::ScrollDown,
            "escape" => InputEvent::Escape,
            other => match other.parse::<u8>() {
                Ok(d @ 1..=9) if other.len() == 1 => InputEvent::Digit(d),
                _ => {
                    return Err(UnknownInput {
                        kind: "input",
                        name: other.to_owned(),
                    });
                }
            },
        };
        Ok(event)
    }
}

impl FromStr for MenuAction {
    type Err = UnknownInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new canvas" => Ok(MenuAction::NewCanvas),
            "load canvas" => Ok(MenuAction::LoadCanvas),
            "save canvas" => Ok(MenuAction::SaveCanvas),
            "return" => Ok(MenuAction::Return),
            other => Err(UnknownInput {
                kind: "menu action",
                name: other.to_owned(),
            }),
        }
    }
}

impl From<MenuAction> for Trigger {
    fn from(action: MenuAction) -> Self {
        match action {
            MenuAction::NewCanvas => Trigger::NewCanvas,
            MenuAction::LoadCanvas => Trigger::LoadCanvas,
            MenuAction::SaveCanvas => Trigger::SaveCanvas,
            MenuAction::Return => Trigger::Return,
        }
    }
}
