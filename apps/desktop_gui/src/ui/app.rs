use std::{path::PathBuf, time::Duration};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{display_title, Document, DocumentCommand},
    protocol::{KeyPress, MenuAction, MenuEvent},
};

use crate::backend_bridge::commands::BackendCommand;
use crate::config::Settings;
use crate::controller::{
    events::{UiError, UiEvent},
    input::InputController,
    orchestration::dispatch_backend_command,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingShortcut {
    command: DocumentCommand,
    prevent_default: bool,
    modifiers: egui::Modifiers,
    key: egui::Key,
}

/// Builds a key-press record from a raw egui key-down event. `command` is
/// Ctrl on Linux/Windows and Cmd on macOS.
pub fn key_press_from_event(
    event: &egui::Event,
) -> Option<(KeyPress, egui::Modifiers, egui::Key)> {
    match event {
        egui::Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => Some((
            KeyPress::new(key.name(), modifiers.command, modifiers.shift),
            *modifiers,
            *key,
        )),
        _ => None,
    }
}

pub struct DaedalusApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    input: InputController,
    buffer: String,
    generation: u64,
    /// Latest buffer not yet accepted by the command queue, with its
    /// generation. Newer keystrokes overwrite it.
    pending_edit: Option<(String, u64)>,
    path: Option<PathBuf>,
    dirty: bool,
    title: String,
    status: String,
    error_banner: Option<UiError>,
    font_size: f32,
    shut_down: bool,
}

impl DaedalusApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        settings: &Settings,
    ) -> Self {
        let mut input = InputController::new();
        input.register();
        Self {
            cmd_tx,
            ui_rx,
            input,
            buffer: String::new(),
            generation: 0,
            pending_edit: None,
            path: None,
            dirty: false,
            title: display_title(None, false),
            status: "Starting...".to_string(),
            error_banner: None,
            font_size: settings.font_size,
            shut_down: false,
        }
    }

    fn process_ui_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(
                        category = ?err.category(),
                        context = ?err.context(),
                        "{}",
                        err.message()
                    );
                    self.status = err.message().to_string();
                    self.error_banner = Some(err);
                }
                UiEvent::TitleChanged(title) => {
                    if title != self.title {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
                        self.title = title;
                    }
                }
                UiEvent::DocumentReplaced(document) => self.adopt_document(document),
                UiEvent::DocumentStatus { path, dirty } => {
                    self.path = path;
                    self.dirty = dirty || self.pending_edit.is_some();
                }
            }
        }
    }

    fn adopt_document(&mut self, document: Document) {
        self.buffer = document.content().to_string();
        self.generation = document.generation();
        self.pending_edit = None;
        self.path = document.path().map(|path| path.to_path_buf());
        self.dirty = document.is_dirty();
        self.error_banner = None;
    }

    fn queue(&mut self, cmd: BackendCommand) {
        dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status);
    }

    fn buffer_edited(&mut self) {
        self.dirty = true;
        self.pending_edit = Some((self.buffer.clone(), self.generation));
        self.flush_pending_edit();
    }

    /// Returns true once no edit is waiting for the backend.
    fn flush_pending_edit(&mut self) -> bool {
        let Some((text, generation)) = self.pending_edit.clone() else {
            return true;
        };
        let delivered = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Edit { text, generation },
            &mut self.status,
        );
        if delivered {
            self.pending_edit = None;
        }
        delivered
    }

    /// Document commands queue behind the latest edit, so Save never writes
    /// text older than what is on screen.
    fn run_command(&mut self, command: DocumentCommand) {
        if !self.flush_pending_edit() {
            tracing::warn!(
                command = command.label(),
                "latest edit not delivered yet; command not queued"
            );
            return;
        }
        tracing::debug!(command = command.label(), "dispatching document command");
        self.queue(BackendCommand::Run(command));
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let presses: Vec<_> =
            ctx.input(|i| i.events.iter().filter_map(key_press_from_event).collect());
        let shortcuts: Vec<PendingShortcut> = presses
            .into_iter()
            .filter_map(|(press, modifiers, key)| {
                self.input.on_key(&press).map(|shortcut| PendingShortcut {
                    command: shortcut.command,
                    prevent_default: shortcut.prevent_default,
                    modifiers,
                    key,
                })
            })
            .collect();

        for shortcut in shortcuts {
            if shortcut.prevent_default {
                ctx.input_mut(|i| i.consume_key(shortcut.modifiers, shortcut.key));
            }
            self.run_command(shortcut.command);
        }
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        let mut clicked = None;
        egui::TopBottomPanel::top("editor_menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("File", |ui| {
                    for (action, label, hint) in [
                        (MenuAction::New, "New", "Ctrl+N"),
                        (MenuAction::Open, "Open...", "Ctrl+O"),
                        (MenuAction::Save, "Save", "Ctrl+S"),
                        (MenuAction::SaveAs, "Save As...", "Ctrl+Shift+S"),
                    ] {
                        if ui.add(egui::Button::new(label).shortcut_text(hint)).clicked() {
                            clicked = Some(MenuEvent::new(action));
                            ui.close();
                        }
                    }
                });
            });
        });

        if let Some(event) = clicked {
            if let Some(command) = self.input.on_menu(event) {
                self.run_command(command);
            }
        }
    }

    fn show_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("editor_status_bar").show(ctx, |ui| {
            if let Some(banner) = self.error_banner.clone() {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgb(111, 53, 53))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::symmetric(10, 6))
                    .show(ui, |ui| {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                egui::RichText::new(banner.message()).color(egui::Color32::WHITE),
                            );
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.button("Dismiss").clicked() {
                                    self.error_banner = None;
                                }
                            });
                        });
                    });
            }

            ui.horizontal(|ui| {
                let location = self.path.as_ref().map_or_else(
                    || "(not saved yet)".to_string(),
                    |path| path.display().to_string(),
                );
                ui.label(location);
                if self.dirty {
                    ui.label(egui::RichText::new("modified").italics());
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(&self.status);
                });
            });
        });
    }

    fn show_editor(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let response = ui.add_sized(
                    ui.available_size(),
                    egui::TextEdit::multiline(&mut self.buffer)
                        .font(egui::FontId::monospace(self.font_size))
                        .desired_width(f32::INFINITY),
                );
                if response.changed() {
                    self.buffer_edited();
                }
            });
        });
    }

    /// Deregisters both listeners and stops the backend. Safe to call twice.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if self.input.is_registered() {
            self.input.teardown();
        }
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
        tracing::info!("editor window closed");
    }
}

impl eframe::App for DaedalusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events(ctx);
        if !self.flush_pending_edit() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
        self.handle_shortcuts(ctx);
        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);
        self.show_editor(ctx);
    }
}

impl Drop for DaedalusApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_down(key: egui::Key, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn translates_key_down_events() {
        let modifiers = egui::Modifiers::COMMAND | egui::Modifiers::SHIFT;
        let (press, mods, key) =
            key_press_from_event(&key_down(egui::Key::S, modifiers)).expect("key down");

        assert!(press.is("s"));
        assert!(press.ctrl);
        assert!(press.shift);
        assert_eq!(mods, modifiers);
        assert_eq!(key, egui::Key::S);
    }

    #[test]
    fn ignores_key_release_and_text_events() {
        let release = egui::Event::Key {
            key: egui::Key::S,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: egui::Modifiers::COMMAND,
        };
        assert!(key_press_from_event(&release).is_none());
        assert!(key_press_from_event(&egui::Event::Text("s".to_string())).is_none());
    }

    #[test]
    fn shutdown_deregisters_and_signals_backend_once() {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(8);
        let (_ui_tx, ui_rx) = crossbeam_channel::bounded(8);
        let mut app = DaedalusApp::new(cmd_tx, ui_rx, &Settings::default());
        assert!(app.input.is_registered());

        app.shutdown();
        app.shutdown();
        drop(app);

        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Shutdown)));
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn replaced_document_resets_local_buffer() {
        let (cmd_tx, _cmd_rx) = crossbeam_channel::bounded(8);
        let (_ui_tx, ui_rx) = crossbeam_channel::bounded(8);
        let mut app = DaedalusApp::new(cmd_tx, ui_rx, &Settings::default());
        app.buffer = "typed".to_string();
        app.dirty = true;

        let mut document = Document::default();
        document.load(PathBuf::from("/tmp/a.txt"), "loaded".to_string());
        app.adopt_document(document);

        assert_eq!(app.buffer, "loaded");
        assert_eq!(app.generation, 1);
        assert!(!app.dirty);
        assert_eq!(app.path.as_deref(), Some(std::path::Path::new("/tmp/a.txt")));
    }

    fn app_with_queue(
        capacity: usize,
    ) -> (DaedalusApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(capacity);
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(8);
        (DaedalusApp::new(cmd_tx, ui_rx, &Settings::default()), cmd_rx, ui_tx)
    }

    #[test]
    fn latest_edit_is_kept_until_the_queue_has_room() {
        let (mut app, cmd_rx, _ui_tx) = app_with_queue(1);
        app.queue(BackendCommand::Run(DocumentCommand::Save));

        app.buffer = "hello".to_string();
        app.buffer_edited();
        app.buffer = "hello world".to_string();
        app.buffer_edited();

        assert_eq!(app.pending_edit, Some(("hello world".to_string(), 0)));
        assert!(app.dirty);
        assert_eq!(cmd_rx.try_recv(), Ok(BackendCommand::Run(DocumentCommand::Save)));

        assert!(app.flush_pending_edit());
        assert_eq!(
            cmd_rx.try_recv(),
            Ok(BackendCommand::Edit {
                text: "hello world".to_string(),
                generation: 0,
            })
        );
        assert_eq!(app.pending_edit, None);
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn commands_are_held_back_until_the_pending_edit_is_delivered() {
        let (mut app, cmd_rx, _ui_tx) = app_with_queue(2);
        app.queue(BackendCommand::Run(DocumentCommand::New));
        app.queue(BackendCommand::Run(DocumentCommand::Open));
        app.buffer = "draft".to_string();
        app.buffer_edited();

        app.run_command(DocumentCommand::Save);
        assert_eq!(cmd_rx.try_iter().count(), 2);

        app.run_command(DocumentCommand::Save);
        assert_eq!(
            cmd_rx.try_iter().collect::<Vec<_>>(),
            vec![
                BackendCommand::Edit {
                    text: "draft".to_string(),
                    generation: 0,
                },
                BackendCommand::Run(DocumentCommand::Save),
            ]
        );
    }

    #[test]
    fn saved_status_does_not_hide_an_undelivered_edit() {
        let (mut app, _cmd_rx, ui_tx) = app_with_queue(1);
        app.queue(BackendCommand::Run(DocumentCommand::Save));
        app.buffer = "typed after save".to_string();
        app.buffer_edited();

        ui_tx
            .send(UiEvent::DocumentStatus {
                path: Some(PathBuf::from("/docs/p.txt")),
                dirty: false,
            })
            .expect("ui event");
        app.process_ui_events(&egui::Context::default());

        assert!(app.dirty);
        assert_eq!(app.path.as_deref(), Some(std::path::Path::new("/docs/p.txt")));
    }

    #[test]
    fn replaced_document_discards_pending_edit() {
        let (mut app, _cmd_rx, _ui_tx) = app_with_queue(1);
        app.queue(BackendCommand::Run(DocumentCommand::Open));
        app.buffer = "old text".to_string();
        app.buffer_edited();

        let mut document = Document::default();
        document.load(PathBuf::from("/docs/q.txt"), "opened".to_string());
        app.adopt_document(document);

        assert_eq!(app.pending_edit, None);
        assert_eq!(app.buffer, "opened");
        assert!(!app.dirty);
    }
}
