//! Proofreading session: UI-side state machine, editor logic and the
//! background worker that performs the model call.
//!
//! # Architecture
//!
//! ```text
//! EditorState::submit ──▶ ProofreadSession::begin   (Idle/Success/Error → Loading)
//!        │
//!        ▼ SessionCommand (mpsc)
//! ProofreadWorker::run()  ← async tokio task
//!        │ Proofreader::proofread
//!        ▼ SessionEvent (mpsc)
//! ProofreadSession::succeed / fail                  (Loading → Success/Error)
//! EditorState::sync                                  (edit ↔ highlight view)
//! ```

pub mod editor;
pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use editor::{EditorState, FocusRequest};
pub use runner::{ProofreadWorker, SessionCommand, SessionEvent};
pub use state::{LoadingState, ProofreadSession, GENERIC_ERROR_MESSAGE};
