//! UI/backend events and error modeling for the desktop GUI.

use std::path::PathBuf;

use shared::{
    domain::{display_name, Document},
    error::{DocumentError, ErrorCode},
};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    TitleChanged(String),
    /// New or Open replaced the buffer; the UI must drop its local text.
    DocumentReplaced(Document),
    DocumentStatus {
        path: Option<PathBuf>,
        dirty: bool,
    },
}

impl UiEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Info(_) => "info",
            Self::Error(_) => "error",
            Self::TitleChanged(_) => "title_changed",
            Self::DocumentReplaced(_) => "document_replaced",
            Self::DocumentStatus { .. } => "document_status",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Io,
    Backend,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Open,
    Save,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("failed to read")
            || message_lower.contains("failed to write")
            || message_lower.contains("permission denied")
            || message_lower.contains("no such file")
            || message_lower.contains("utf-8")
        {
            UiErrorCategory::Io
        } else if message_lower.contains("backend")
            || message_lower.contains("runtime")
            || message_lower.contains("disconnected")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Backend
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_document_error(command: &str, err: &DocumentError) -> Self {
        let context = match err.code() {
            ErrorCode::Read => UiErrorContext::Open,
            ErrorCode::Write => UiErrorContext::Save,
        };
        let verb = match context {
            UiErrorContext::Open => "open",
            _ => "save",
        };
        Self {
            category: UiErrorCategory::Io,
            context,
            message: format!(
                "Could not {verb} {} ({command}): {err}",
                display_name(err.path())
            ),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_failures_are_io_errors_in_save_context() {
        let err = DocumentError::write("/home/me/notes.txt", "permission denied");
        let ui = UiError::from_document_error("save", &err);

        assert_eq!(ui.category(), UiErrorCategory::Io);
        assert_eq!(ui.context(), UiErrorContext::Save);
        assert!(ui.message().starts_with("Could not save notes.txt (save):"));
    }

    #[test]
    fn read_failures_map_to_open_context() {
        let err = DocumentError::read("/tmp/x.txt", "not valid UTF-8");
        assert_eq!(
            UiError::from_document_error("open", &err).context(),
            UiErrorContext::Open
        );
    }

    #[test]
    fn classifies_queue_disconnect_as_backend_error() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "Backend command processor disconnected",
        );
        assert_eq!(err.category(), UiErrorCategory::Backend);
    }
}
