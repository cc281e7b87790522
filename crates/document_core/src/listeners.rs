//! Registration lifecycle for the keyboard and menu input channels.
//!
//! Re-registering a channel invalidates the previous token, so a listener left
//! behind by an earlier initialization can no longer dispatch commands.

use std::collections::HashMap;

use shared::{
    domain::DocumentCommand,
    error::InputError,
    protocol::{KeyPress, MenuEvent},
};

use crate::input::{shortcut_for, Shortcut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputChannel {
    Keyboard,
    Menu,
}

impl InputChannel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Menu => "menu",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerToken {
    channel: InputChannel,
    epoch: u64,
}

#[derive(Debug, Default)]
pub struct InputListeners {
    active: HashMap<InputChannel, u64>,
    next_epoch: u64,
}

impl InputListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, channel: InputChannel) -> ListenerToken {
        self.next_epoch += 1;
        let epoch = self.next_epoch;
        if let Some(previous) = self.active.insert(channel, epoch) {
            tracing::debug!(
                channel = channel.label(),
                previous,
                epoch,
                "replaced existing input listener"
            );
        } else {
            tracing::debug!(channel = channel.label(), epoch, "registered input listener");
        }
        ListenerToken { channel, epoch }
    }

    /// Returns false when the token was already stale.
    pub fn deregister(&mut self, token: ListenerToken) -> bool {
        if !self.is_active(token) {
            return false;
        }
        self.active.remove(&token.channel);
        tracing::debug!(channel = token.channel.label(), "deregistered input listener");
        true
    }

    pub fn deregister_all(&mut self) {
        if !self.active.is_empty() {
            tracing::debug!(count = self.active.len(), "deregistering all input listeners");
        }
        self.active.clear();
    }

    pub fn is_active(&self, token: ListenerToken) -> bool {
        self.active.get(&token.channel) == Some(&token.epoch)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn route_key(
        &self,
        token: ListenerToken,
        key: &KeyPress,
    ) -> Result<Option<Shortcut>, InputError> {
        self.check(token, InputChannel::Keyboard)?;
        Ok(shortcut_for(key))
    }

    pub fn route_menu(
        &self,
        token: ListenerToken,
        event: MenuEvent,
    ) -> Result<DocumentCommand, InputError> {
        self.check(token, InputChannel::Menu)?;
        Ok(event.payload.into())
    }

    fn check(&self, token: ListenerToken, expected: InputChannel) -> Result<(), InputError> {
        if token.channel == expected && self.is_active(token) {
            Ok(())
        } else {
            Err(InputError::StaleListener {
                channel: expected.label(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::protocol::MenuAction;

    use super::*;

    #[test]
    fn routes_through_registered_listeners() {
        let mut listeners = InputListeners::new();
        let keyboard = listeners.register(InputChannel::Keyboard);
        let menu = listeners.register(InputChannel::Menu);

        assert_eq!(listeners.active_count(), 2);
        assert_eq!(
            listeners
                .route_key(keyboard, &KeyPress::new("o", true, false))
                .expect("active keyboard listener")
                .map(|shortcut| shortcut.command),
            Some(DocumentCommand::Open)
        );
        assert_eq!(
            listeners.route_menu(menu, MenuEvent::new(MenuAction::SaveAs)),
            Ok(DocumentCommand::SaveAs)
        );
    }

    #[test]
    fn re_registration_invalidates_previous_token() {
        let mut listeners = InputListeners::new();
        let first = listeners.register(InputChannel::Menu);
        let second = listeners.register(InputChannel::Menu);

        assert_eq!(listeners.active_count(), 1);
        assert_eq!(
            listeners.route_menu(first, MenuEvent::new(MenuAction::New)),
            Err(InputError::StaleListener { channel: "menu" })
        );
        assert!(listeners
            .route_menu(second, MenuEvent::new(MenuAction::New))
            .is_ok());
        assert!(!listeners.deregister(first));
        assert!(listeners.deregister(second));
        assert_eq!(listeners.active_count(), 0);
    }

    #[test]
    fn teardown_silences_every_channel() {
        let mut listeners = InputListeners::new();
        let keyboard = listeners.register(InputChannel::Keyboard);
        let menu = listeners.register(InputChannel::Menu);
        listeners.deregister_all();

        assert!(listeners
            .route_key(keyboard, &KeyPress::new("s", true, false))
            .is_err());
        assert!(listeners
            .route_menu(menu, MenuEvent::new(MenuAction::Save))
            .is_err());
    }

    #[test]
    fn token_for_one_channel_cannot_route_the_other() {
        let mut listeners = InputListeners::new();
        let menu = listeners.register(InputChannel::Menu);
        assert_eq!(
            listeners.route_key(menu, &KeyPress::new("s", true, false)),
            Err(InputError::StaleListener {
                channel: "keyboard"
            })
        );
    }
}
