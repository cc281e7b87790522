use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Result;
use async_trait::async_trait;
use shared::{
    domain::{ControllerCommand, Document, DocumentCommand, PickRequest},
    error::DocumentError,
};
use tracing::{debug, info, warn};

pub mod input;
pub mod listeners;

pub use input::{shortcut_for, Shortcut};
pub use listeners::{InputChannel, InputListeners, ListenerToken};

/// Native open/save prompts. `None` means the user dismissed the dialog.
#[async_trait]
pub trait FilePicker: Send + Sync {
    async fn pick_read(&self, request: &PickRequest) -> Option<PathBuf>;
    async fn pick_write(&self, request: &PickRequest) -> Option<PathBuf>;
}

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn read(&self, path: &Path) -> Result<String>;
    async fn write(&self, path: &Path, content: &str) -> Result<()>;
}

pub trait WindowChrome: Send + Sync {
    fn set_title(&self, title: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Cancelled,
}

/// Owns the single [`Document`] and applies commands to it.
///
/// Every command takes `&mut self`, so a command's picker and I/O steps can
/// never interleave with another command's state update. The window title is
/// republished after every command, including cancelled and failed ones.
pub struct DocumentController {
    picker: Arc<dyn FilePicker>,
    store: Arc<dyn FileStore>,
    chrome: Arc<dyn WindowChrome>,
    document: Document,
}

impl DocumentController {
    pub fn new(
        picker: Arc<dyn FilePicker>,
        store: Arc<dyn FileStore>,
        chrome: Arc<dyn WindowChrome>,
    ) -> Self {
        let controller = Self {
            picker,
            store,
            chrome,
            document: Document::default(),
        };
        controller.publish_title();
        controller
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn title(&self) -> String {
        self.document.title()
    }

    pub fn publish_title(&self) {
        self.chrome.set_title(&self.document.title());
    }

    pub async fn dispatch(
        &mut self,
        command: ControllerCommand,
    ) -> Result<CommandOutcome, DocumentError> {
        match command {
            ControllerCommand::Run(command) => self.run(command).await,
            ControllerCommand::Edit(text) => {
                self.edit(text);
                Ok(CommandOutcome::Applied)
            }
        }
    }

    pub async fn run(&mut self, command: DocumentCommand) -> Result<CommandOutcome, DocumentError> {
        match command {
            DocumentCommand::New => {
                self.new_document();
                Ok(CommandOutcome::Applied)
            }
            DocumentCommand::Open => self.open().await,
            DocumentCommand::Save => self.save().await,
            DocumentCommand::SaveAs => self.save_as().await,
        }
    }

    pub fn new_document(&mut self) {
        self.document.reset();
        info!(command = "new", "started a new document");
        self.publish_title();
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.document.edit(text);
        self.publish_title();
    }

    pub async fn open(&mut self) -> Result<CommandOutcome, DocumentError> {
        let result = self.open_inner().await;
        self.finish(DocumentCommand::Open, result)
    }

    /// Writes to the known path, prompting only when the document has never
    /// been saved.
    pub async fn save(&mut self) -> Result<CommandOutcome, DocumentError> {
        let known = self.document.path().map(Path::to_path_buf);
        let result = match known {
            Some(path) => self.write_to(path).await,
            None => self.prompt_and_write().await,
        };
        self.finish(DocumentCommand::Save, result)
    }

    pub async fn save_as(&mut self) -> Result<CommandOutcome, DocumentError> {
        let result = self.prompt_and_write().await;
        self.finish(DocumentCommand::SaveAs, result)
    }

    async fn open_inner(&mut self) -> Result<CommandOutcome, DocumentError> {
        let request = PickRequest::for_read(self.document.path());
        let Some(path) = self.picker.pick_read(&request).await else {
            return Ok(CommandOutcome::Cancelled);
        };

        let content = self
            .store
            .read(&path)
            .await
            .map_err(|err| DocumentError::read(&path, format!("{err:#}")))?;
        debug!(path = %path.display(), bytes = content.len(), "read document");
        self.document.load(path, content);
        Ok(CommandOutcome::Applied)
    }

    async fn prompt_and_write(&mut self) -> Result<CommandOutcome, DocumentError> {
        let request = PickRequest::for_write(self.document.path());
        match self.picker.pick_write(&request).await {
            Some(path) => self.write_to(path).await,
            None => Ok(CommandOutcome::Cancelled),
        }
    }

    async fn write_to(&mut self, path: PathBuf) -> Result<CommandOutcome, DocumentError> {
        self.store
            .write(&path, self.document.content())
            .await
            .map_err(|err| DocumentError::write(&path, format!("{err:#}")))?;
        debug!(
            path = %path.display(),
            bytes = self.document.content().len(),
            "wrote document"
        );
        self.document.mark_saved(path);
        Ok(CommandOutcome::Applied)
    }

    fn finish(
        &self,
        command: DocumentCommand,
        result: Result<CommandOutcome, DocumentError>,
    ) -> Result<CommandOutcome, DocumentError> {
        match &result {
            Ok(CommandOutcome::Applied) => info!(
                command = command.label(),
                path = ?self.document.path(),
                "document command applied"
            ),
            Ok(CommandOutcome::Cancelled) => {
                debug!(command = command.label(), "picker dismissed; nothing changed")
            }
            Err(err) => warn!(command = command.label(), "document command failed: {err}"),
        }
        self.publish_title();
        result
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
