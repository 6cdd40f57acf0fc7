// view.rs — Host-side collaborators a diff session talks to.
//
// The session never renders anything itself. It pushes payloads, titles,
// and errors to a SessionView, hands finished saves to a SaveHandler, and
// forwards unknown commands to an EventListener.

use std::path::PathBuf;

use serde_json::Value;

use crate::event::SaveEvent;
use crate::session::{SessionParams, SessionPayload};

/// The rendering surface for one session (a webview panel, a terminal, ...).
pub trait SessionView {
    /// Send the full session payload (paths, contents, theme).
    fn send_payload(&mut self, payload: &SessionPayload);

    /// Tell the surface that left and right were exchanged.
    fn send_swap(&mut self);

    fn set_title(&mut self, title: &str);

    /// Show a user-facing error notification.
    fn show_error(&mut self, message: &str);
}

/// Receives every save after the core has reconciled it.
pub trait SaveHandler {
    /// Persist the save however the host likes. Returning a path moves the
    /// session's right-hand side to that file.
    fn on_save(
        &mut self,
        event: &SaveEvent,
        params: &SessionParams,
    ) -> anyhow::Result<Option<PathBuf>>;
}

/// Receives commands the core does not handle itself.
pub trait EventListener {
    fn on_event(&mut self, command: &str, payload: &Value);
}

/// A view that discards everything except errors, which it logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessView;

impl SessionView for HeadlessView {
    fn send_payload(&mut self, _payload: &SessionPayload) {}

    fn send_swap(&mut self) {}

    fn set_title(&mut self, _title: &str) {}

    fn show_error(&mut self, message: &str) {
        tracing::error!("{}", message);
    }
}
