//! # fixsync-session
//!
//! Interactive before/after comparison of one file, and what happens when the
//! user saves it.
//!
//! A [`DiffSession`] receives [`SessionEvent`]s from a rendering surface
//! ([`SessionView`]). For sessions opened from a fix, every save is
//! reconciled against the proposed content: an unchanged save records
//! [`Outcome::Applied`](fixsync_decisions::Outcome::Applied), an edited one
//! writes a uniquely named variant under the manual area and records
//! `applied-with-manual-changes[<path>]`.

pub mod error;
pub mod event;
pub mod normalize;
pub mod reconcile;
pub mod session;
pub mod variant;
pub mod view;

pub use error::SessionError;
pub use event::{SaveContents, SaveEvent, SessionEvent};
pub use normalize::{normalize_line_endings, same_after_normalization};
pub use reconcile::{reconcile_save, SaveContext};
pub use session::{
    DiffSession, EventOutcome, SaveReport, SessionKind, SessionParams, SessionPayload,
    SessionState, UNSAVED_MARKER,
};
pub use variant::{base_file_name, name_variant, name_variant_with_token, write_variant};
pub use view::{EventListener, HeadlessView, SaveHandler, SessionView};
