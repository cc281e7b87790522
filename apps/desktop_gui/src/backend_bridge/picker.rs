//! Native file dialogs via `rfd`.
//!
//! The async dialogs are awaited on the backend runtime; rfd moves the native
//! window onto the platform UI thread where one is required.

use std::path::PathBuf;

use async_trait::async_trait;
use document_core::FilePicker;
use rfd::{AsyncFileDialog, FileHandle};
use shared::domain::PickRequest;

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeFilePicker;

fn file_dialog(request: &PickRequest) -> AsyncFileDialog {
    let mut dialog =
        AsyncFileDialog::new().add_filter(request.filter.name, request.filter.extensions);
    if let Some(dir) = &request.starting_dir {
        dialog = dialog.set_directory(dir);
    }
    if let Some(name) = &request.suggested_name {
        dialog = dialog.set_file_name(name);
    }
    dialog
}

fn chosen(kind: &'static str, handle: Option<FileHandle>) -> Option<PathBuf> {
    let choice = handle.map(|handle| handle.path().to_path_buf());
    tracing::debug!(kind, chosen = choice.is_some(), "file dialog closed");
    choice
}

#[async_trait]
impl FilePicker for NativeFilePicker {
    async fn pick_read(&self, request: &PickRequest) -> Option<PathBuf> {
        let dialog = file_dialog(request);
        chosen("open", dialog.pick_file().await)
    }

    async fn pick_write(&self, request: &PickRequest) -> Option<PathBuf> {
        let dialog = file_dialog(request);
        chosen("save", dialog.save_file().await)
    }
}

