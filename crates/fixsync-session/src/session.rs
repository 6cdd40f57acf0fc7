// session.rs — DiffSession: one interactive before/after comparison.
//
// A session pairs the original content (left) with the machine-proposed
// content (right) for a single file. The host feeds it SessionEvents one at
// a time through `handle`; each event is fully processed before `handle`
// returns, and because `handle` takes `&mut self` a swap can never run in
// the middle of a save.
//
// Lifecycle:
//   Loaded ──change──▶ Editing ──save──▶ Loaded
//
// Only Patch sessions (those opened from a fix) reconcile saves and record
// decisions. ContentOnly sessions pass saves straight to the host.

use std::path::{Path, PathBuf};

use fixsync_decisions::Outcome;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::event::{SaveEvent, SessionEvent};
use crate::reconcile::{reconcile_save, SaveContext};
use crate::view::{EventListener, SaveHandler, SessionView};

/// Appended to the title while the right-hand side has unsaved edits.
pub const UNSAVED_MARKER: &str = " ●";

/// What kind of session this is. Each case carries only its own fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKind {
    /// Plain content view; saves go to the host unchanged.
    ContentOnly,
    /// Comparison opened from a fix: `left_path` is the original source file
    /// and `patch_path` the fix's patch artifact.
    Patch {
        left_path: PathBuf,
        patch_path: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionParams {
    pub kind: SessionKind,
    /// The file the right-hand side belongs to.
    pub right_path: PathBuf,
    pub left_content: String,
    /// Machine-proposed content. Never modified by the session.
    pub right_content: String,
    pub theme: String,
    pub tab_size: u32,
}

impl SessionParams {
    pub fn content_only(right_path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        Self {
            kind: SessionKind::ContentOnly,
            right_path: right_path.as_ref().to_path_buf(),
            left_content: String::new(),
            right_content: content.into(),
            theme: default_theme(),
            tab_size: default_tab_size(),
        }
    }

    pub fn patch(
        left_path: impl AsRef<Path>,
        right_path: impl AsRef<Path>,
        patch_path: impl Into<String>,
        left_content: impl Into<String>,
        right_content: impl Into<String>,
    ) -> Self {
        Self {
            kind: SessionKind::Patch {
                left_path: left_path.as_ref().to_path_buf(),
                patch_path: patch_path.into(),
            },
            right_path: right_path.as_ref().to_path_buf(),
            left_content: left_content.into(),
            right_content: right_content.into(),
            theme: default_theme(),
            tab_size: default_tab_size(),
        }
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_tab_size(mut self, tab_size: u32) -> Self {
        self.tab_size = tab_size;
        self
    }

    pub fn left_path(&self) -> Option<&Path> {
        match &self.kind {
            SessionKind::Patch { left_path, .. } => Some(left_path),
            SessionKind::ContentOnly => None,
        }
    }

    pub fn patch_path(&self) -> Option<&str> {
        match &self.kind {
            SessionKind::Patch { patch_path, .. } => Some(patch_path),
            SessionKind::ContentOnly => None,
        }
    }

    /// The payload sent to the rendering surface on `load`.
    pub fn payload(&self) -> SessionPayload {
        SessionPayload {
            left_path: self.left_path().map(Path::to_path_buf),
            right_path: self.right_path.clone(),
            left_content: self.left_content.clone(),
            right_content: self.right_content.clone(),
            patch_path: self.patch_path().map(str::to_string),
            theme: self.theme.clone(),
            tab_size: self.tab_size,
        }
    }
}

fn default_theme() -> String {
    "vs-dark".to_string()
}

fn default_tab_size() -> u32 {
    4
}

/// Wire form of the session for the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_path: Option<PathBuf>,
    pub right_path: PathBuf,
    pub left_content: String,
    pub right_content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch_path: Option<String>,
    pub theme: String,
    pub tab_size: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Content delivered, no unsaved edits.
    Loaded,
    /// The user has changed the right-hand side since the last save.
    Editing,
}

/// What one save did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    /// Recorded decision; None for content-only sessions.
    pub outcome: Option<Outcome>,
    /// Whether a save handler was attached and ran.
    pub handler_invoked: bool,
    /// New right path returned by the save handler.
    pub new_right_path: Option<PathBuf>,
}

/// What `handle` did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    PayloadSent,
    MarkedEditing,
    Swapped,
    /// Swap requested on a content-only session; nothing changed.
    SwapIgnored,
    Saved(SaveReport),
    Forwarded,
    /// Custom command with no listener attached.
    Unhandled,
}

pub struct DiffSession {
    params: SessionParams,
    state: SessionState,
    title: String,
    view: Box<dyn SessionView>,
    save_handler: Option<Box<dyn SaveHandler>>,
    listener: Option<Box<dyn EventListener>>,
}

impl DiffSession {
    /// Create a session and push its initial title to the view.
    pub fn new(params: SessionParams, view: Box<dyn SessionView>) -> Self {
        let mut session = Self {
            title: derive_title(&params),
            params,
            state: SessionState::Loaded,
            view,
            save_handler: None,
            listener: None,
        };
        let title = session.title.clone();
        session.view.set_title(&title);
        session
    }

    /// Register the host's save handler (replaces any previous one).
    pub fn on_save(&mut self, handler: Box<dyn SaveHandler>) {
        self.save_handler = Some(handler);
    }

    /// Register the listener for custom commands.
    pub fn on_event(&mut self, listener: Box<dyn EventListener>) {
        self.listener = Some(listener);
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Process one event to completion.
    pub fn handle(
        &mut self,
        event: SessionEvent,
        ctx: &mut SaveContext<'_>,
    ) -> Result<EventOutcome, SessionError> {
        tracing::debug!(command = event.command(), "session event");
        match event {
            SessionEvent::Load => {
                self.view.send_payload(&self.params.payload());
                Ok(EventOutcome::PayloadSent)
            }
            SessionEvent::Change => {
                if self.state == SessionState::Loaded {
                    self.state = SessionState::Editing;
                    self.refresh_title();
                }
                Ok(EventOutcome::MarkedEditing)
            }
            SessionEvent::Swap => Ok(self.swap()),
            SessionEvent::Save(save) => self.save(save, ctx).map(EventOutcome::Saved),
            SessionEvent::Custom { command, payload } => match self.listener.as_mut() {
                Some(listener) => {
                    listener.on_event(&command, &payload);
                    Ok(EventOutcome::Forwarded)
                }
                None => {
                    tracing::debug!(command, "no listener for custom command");
                    Ok(EventOutcome::Unhandled)
                }
            },
        }
    }

    /// Exchange left and right paths of a Patch session.
    pub fn swap(&mut self) -> EventOutcome {
        let SessionKind::Patch { left_path, .. } = &mut self.params.kind else {
            tracing::debug!("swap ignored for content-only session");
            return EventOutcome::SwapIgnored;
        };
        std::mem::swap(left_path, &mut self.params.right_path);

        self.refresh_title();
        self.view.send_swap();
        EventOutcome::Swapped
    }

    fn save(
        &mut self,
        event: SaveEvent,
        ctx: &mut SaveContext<'_>,
    ) -> Result<SaveReport, SessionError> {
        // On failure the session keeps its state and unsaved marker.
        let outcome = match &self.params.kind {
            SessionKind::Patch {
                left_path,
                patch_path,
            } => {
                let result = reconcile_save(
                    left_path,
                    patch_path,
                    &self.params.right_content,
                    event.saved_content(),
                    ctx,
                );
                match result {
                    Ok(outcome) => Some(outcome),
                    Err(e) => {
                        tracing::error!(error = %e, "save aborted");
                        self.view
                            .show_error(&format!("Unable to save manual changes: {}", e));
                        return Err(e);
                    }
                }
            }
            SessionKind::ContentOnly => None,
        };

        let mut report = SaveReport {
            outcome,
            handler_invoked: false,
            new_right_path: None,
        };

        match self.save_handler.as_mut() {
            Some(handler) => {
                report.handler_invoked = true;
                match handler.on_save(&event, &self.params) {
                    Ok(Some(path)) => {
                        self.params.right_path = path.clone();
                        report.new_right_path = Some(path);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        let err = SessionError::SaveHandler(e);
                        tracing::error!(error = %err, "save handler failed");
                        self.view.show_error(&err.to_string());
                        return Err(err);
                    }
                }
            }
            None => {
                tracing::warn!(error = %SessionError::NoListener, "save not forwarded");
            }
        }

        self.state = SessionState::Loaded;
        self.refresh_title();
        Ok(report)
    }

    fn refresh_title(&mut self) {
        let mut title = derive_title(&self.params);
        if self.state == SessionState::Editing {
            title.push_str(UNSAVED_MARKER);
        }
        self.title = title;
        self.view.set_title(&self.title);
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn derive_title(params: &SessionParams) -> String {
    match &params.kind {
        SessionKind::ContentOnly => file_label(&params.right_path),
        SessionKind::Patch { left_path, .. } => format!(
            "{} ↔ {}",
            file_label(left_path),
            file_label(&params.right_path)
        ),
    }
}
