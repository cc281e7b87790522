//! Backend commands queued from UI to backend worker.

use shared::domain::{ControllerCommand, DocumentCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Run(DocumentCommand),
    /// Buffer text after a keystroke, tagged with the document generation the
    /// UI was editing.
    Edit {
        text: String,
        generation: u64,
    },
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Run(command) => command.label(),
            Self::Edit { .. } => "edit",
            Self::Shutdown => "shutdown",
        }
    }

    /// Converts to a controller command unless the edit targets a buffer that
    /// has since been replaced by New or Open.
    pub fn into_controller_command(self, current_generation: u64) -> Option<ControllerCommand> {
        match self {
            Self::Run(command) => Some(ControllerCommand::Run(command)),
            Self::Edit { text, generation } if generation == current_generation => {
                Some(ControllerCommand::Edit(text))
            }
            Self::Edit { .. } | Self::Shutdown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_edits_are_dropped() {
        let edit = BackendCommand::Edit {
            text: "typed before open finished".to_string(),
            generation: 3,
        };
        assert_eq!(edit.clone().into_controller_command(4), None);
        assert_eq!(
            edit.into_controller_command(3),
            Some(ControllerCommand::Edit("typed before open finished".to_string()))
        );
    }

    #[test]
    fn document_commands_pass_through() {
        assert_eq!(
            BackendCommand::Run(DocumentCommand::SaveAs).into_controller_command(0),
            Some(ControllerCommand::Run(DocumentCommand::SaveAs))
        );
        assert_eq!(BackendCommand::Shutdown.into_controller_command(0), None);
        assert_eq!(BackendCommand::Run(DocumentCommand::SaveAs).name(), "save_as");
    }
}
