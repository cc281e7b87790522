//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, SendError, Sender, TrySendError};
use document_core::{CommandOutcome, DocumentController, WindowChrome};
use eframe::egui;
use shared::domain::ControllerCommand;
use storage::LocalFileStore;

use crate::backend_bridge::{commands::BackendCommand, picker::NativeFilePicker};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Window Chrome sink: forwards titles to the UI thread, which owns the
/// viewport.
struct ChannelChrome {
    ui_tx: Sender<UiEvent>,
    ctx: egui::Context,
}

impl WindowChrome for ChannelChrome {
    fn set_title(&self, title: &str) {
        notify(&self.ui_tx, UiEvent::TitleChanged(title.to_string()));
        self.ctx.request_repaint();
    }
}

/// Best-effort delivery; a full or closed UI queue is logged.
fn notify(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    let kind = event.kind();
    match ui_tx.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(event = kind, "backend->ui event queue is full; event dropped");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!(event = kind, "ui closed; event not delivered");
            false
        }
    }
}

/// Waits for room in the UI queue. Used for buffer replacements, which the
/// UI must see or every later edit would be tagged with a stale generation.
/// The UI thread never blocks on the backend, so this cannot deadlock.
fn notify_blocking(ui_tx: &Sender<UiEvent>, event: UiEvent) -> bool {
    let kind = event.kind();
    match ui_tx.send(event) {
        Ok(()) => true,
        Err(SendError(_)) => {
            tracing::debug!(event = kind, "ui closed; event not delivered");
            false
        }
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, ctx: egui::Context) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let error = UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                );
                notify(&ui_tx, UiEvent::Error(error));
                tracing::error!("failed to build backend runtime: {err}");
                ctx.request_repaint();
                return;
            }
        };

        runtime.block_on(run_backend(cmd_rx, ui_tx, ctx));
        tracing::info!("backend worker stopped");
    });
}

async fn run_backend(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, ctx: egui::Context) {
    let chrome = Arc::new(ChannelChrome {
        ui_tx: ui_tx.clone(),
        ctx: ctx.clone(),
    });
    let mut controller = DocumentController::new(
        Arc::new(NativeFilePicker),
        Arc::new(LocalFileStore::new()),
        chrome,
    );
    notify(&ui_tx, UiEvent::Info("Ready".to_string()));

    // Commands run strictly one after another; a prompt that is still open
    // holds back every command queued behind it.
    while let Ok(cmd) = cmd_rx.recv() {
        if cmd == BackendCommand::Shutdown {
            tracing::debug!("backend received shutdown");
            break;
        }
        apply(&mut controller, cmd, &ui_tx).await;
        ctx.request_repaint();
    }
}

async fn apply(controller: &mut DocumentController, cmd: BackendCommand, ui_tx: &Sender<UiEvent>) {
    let name = cmd.name();
    let generation_before = controller.document().generation();
    let Some(command) = cmd.into_controller_command(generation_before) else {
        tracing::debug!(command = name, generation = generation_before, "dropping stale edit");
        return;
    };
    let is_edit = matches!(command, ControllerCommand::Edit(_));

    match controller.dispatch(command).await {
        Ok(outcome) => {
            let document = controller.document();
            if document.generation() != generation_before {
                notify_blocking(ui_tx, UiEvent::DocumentReplaced(document.clone()));
            } else {
                notify(
                    ui_tx,
                    UiEvent::DocumentStatus {
                        path: document.path().map(|path| path.to_path_buf()),
                        dirty: document.is_dirty(),
                    },
                );
            }
            if !is_edit {
                let message = match outcome {
                    CommandOutcome::Applied => format!("{name}: done"),
                    CommandOutcome::Cancelled => format!("{name}: cancelled"),
                };
                notify(ui_tx, UiEvent::Info(message));
            }
        }
        Err(err) => {
            notify(
                ui_tx,
                UiEvent::Error(UiError::from_document_error(name, &err)),
            );
        }
    }
}
