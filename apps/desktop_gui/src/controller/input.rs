//! Keyboard and menu listeners for the editor window.

use document_core::{InputChannel, InputListeners, ListenerToken, Shortcut};
use shared::{
    domain::DocumentCommand,
    protocol::{KeyPress, MenuEvent},
};

/// Owns the window's two input listeners. Both are registered together at
/// startup and torn down together on exit.
#[derive(Debug, Default)]
pub struct InputController {
    listeners: InputListeners,
    keyboard: Option<ListenerToken>,
    menu: Option<ListenerToken>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self) {
        self.keyboard = Some(self.listeners.register(InputChannel::Keyboard));
        self.menu = Some(self.listeners.register(InputChannel::Menu));
    }

    pub fn teardown(&mut self) {
        self.listeners.deregister_all();
        self.keyboard = None;
        self.menu = None;
    }

    pub fn is_registered(&self) -> bool {
        self.listeners.active_count() == 2
    }

    pub fn on_key(&self, key: &KeyPress) -> Option<Shortcut> {
        let token = self.keyboard?;
        match self.listeners.route_key(token, key) {
            Ok(shortcut) => shortcut,
            Err(err) => {
                tracing::warn!("ignoring key press: {err}");
                None
            }
        }
    }

    pub fn on_menu(&self, event: MenuEvent) -> Option<DocumentCommand> {
        let token = self.menu?;
        match self.listeners.route_menu(token, event) {
            Ok(command) => Some(command),
            Err(err) => {
                tracing::warn!("ignoring menu event: {err}");
                None
            }
        }
    }
}
