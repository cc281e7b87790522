//! Keyboard shortcut table shared by every front end.

use shared::{domain::DocumentCommand, protocol::KeyPress};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortcut {
    pub command: DocumentCommand,
    /// The host must swallow the key press instead of running its own
    /// default action for it.
    pub prevent_default: bool,
}

impl Shortcut {
    fn plain(command: DocumentCommand) -> Self {
        Self {
            command,
            prevent_default: false,
        }
    }
}

/// Ctrl+N, Ctrl+O, Ctrl+S and Ctrl+Shift+S. Shift only matters for S.
pub fn shortcut_for(key: &KeyPress) -> Option<Shortcut> {
    if !key.ctrl {
        return None;
    }

    if key.is("n") {
        Some(Shortcut::plain(DocumentCommand::New))
    } else if key.is("o") {
        Some(Shortcut::plain(DocumentCommand::Open))
    } else if key.is("s") && !key.shift {
        Some(Shortcut::plain(DocumentCommand::Save))
    } else if key.is("s") {
        Some(Shortcut {
            command: DocumentCommand::SaveAs,
            prevent_default: true,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_the_four_shortcuts() {
        let cases = [
            (KeyPress::new("n", true, false), DocumentCommand::New, false),
            (KeyPress::new("o", true, false), DocumentCommand::Open, false),
            (KeyPress::new("s", true, false), DocumentCommand::Save, false),
            (KeyPress::new("s", true, true), DocumentCommand::SaveAs, true),
            (KeyPress::new("S", true, true), DocumentCommand::SaveAs, true),
            (KeyPress::new("N", true, true), DocumentCommand::New, false),
        ];

        for (key, command, prevent_default) in cases {
            assert_eq!(
                shortcut_for(&key),
                Some(Shortcut {
                    command,
                    prevent_default
                }),
                "{key:?}"
            );
        }
    }

    #[test]
    fn ignores_keys_without_control() {
        assert_eq!(shortcut_for(&KeyPress::new("s", false, false)), None);
        assert_eq!(shortcut_for(&KeyPress::new("s", false, true)), None);
        assert_eq!(shortcut_for(&KeyPress::new("x", true, false)), None);
    }
}
