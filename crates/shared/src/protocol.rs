use serde::{Deserialize, Serialize};

use crate::domain::DocumentCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuAction {
    New,
    Open,
    Save,
    SaveAs,
}

impl From<MenuAction> for DocumentCommand {
    fn from(value: MenuAction) -> Self {
        match value {
            MenuAction::New => Self::New,
            MenuAction::Open => Self::Open,
            MenuAction::Save => Self::Save,
            MenuAction::SaveAs => Self::SaveAs,
        }
    }
}

/// Inbound menu click as delivered by the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEvent {
    pub payload: MenuAction,
}

impl MenuEvent {
    pub fn new(payload: MenuAction) -> Self {
        Self { payload }
    }
}

/// Raw key-press record. `key` is the logical key name, e.g. `"s"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, ctrl: bool, shift: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
            shift,
        }
    }

    pub fn is(&self, key: &str) -> bool {
        self.key.eq_ignore_ascii_case(key)
    }
}
