use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "Daedalus";
pub const UNTITLED: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCommand {
    New,
    Open,
    Save,
    SaveAs,
}

impl DocumentCommand {
    pub fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Open => "open",
            Self::Save => "save",
            Self::SaveAs => "save_as",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerCommand {
    Run(DocumentCommand),
    Edit(String),
}

impl From<DocumentCommand> for ControllerCommand {
    fn from(value: DocumentCommand) -> Self {
        Self::Run(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const TEXT_FILTER: FileFilter = FileFilter {
    name: "Text",
    extensions: &["txt"],
};

/// Parameters for a single picker prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    pub filter: FileFilter,
    pub starting_dir: Option<PathBuf>,
    pub suggested_name: Option<String>,
}

impl PickRequest {
    pub fn for_read(current: Option<&Path>) -> Self {
        Self {
            filter: TEXT_FILTER,
            starting_dir: current.and_then(parent_dir),
            suggested_name: None,
        }
    }

    pub fn for_write(current: Option<&Path>) -> Self {
        Self {
            filter: TEXT_FILTER,
            starting_dir: current.and_then(parent_dir),
            suggested_name: current.and_then(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            }),
        }
    }
}

fn parent_dir(path: &Path) -> Option<PathBuf> {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
}

/// The single open document.
///
/// Fields are private so every change goes through one of the transition
/// methods below, which keep `dirty` consistent with what was last loaded or
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    path: Option<PathBuf>,
    content: String,
    dirty: bool,
    generation: u64,
}

impl Document {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Bumped whenever the buffer is replaced wholesale (New, Open).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn title(&self) -> String {
        display_title(self.path(), self.dirty)
    }

    pub fn reset(&mut self) {
        self.content.clear();
        self.path = None;
        self.dirty = false;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn load(&mut self, path: PathBuf, content: String) {
        self.content = content;
        self.path = Some(path);
        self.dirty = false;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn mark_saved(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.dirty = false;
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.content = text.into();
        self.dirty = true;
    }
}

pub fn display_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}

pub fn display_title(path: Option<&Path>, dirty: bool) -> String {
    let marker = if dirty { "*" } else { "" };
    let name = path.map_or_else(|| UNTITLED.to_string(), display_name);
    format!("{marker}{name} - {APP_NAME}")
}
