//! Loading state machine for a proofreading session.
//!
//! [`LoadingState`] drives which pane the UI renders on the right-hand side.
//! [`ProofreadSession`] pairs it with the last result and error message.
//!
//! ```text
//! Idle ──submit──▶ Loading ──Completed──▶ Success
//!                          ──Failed─────▶ Error
//! Success / Error ──submit──▶ Loading
//! ```

use crate::proofread::{ChangeItem, ProofreadResult};

/// Message shown to the user for any failed request.  The detailed cause is
/// only logged.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while connecting to the AI service. Please try again.";

// ---------------------------------------------------------------------------
// LoadingState
// ---------------------------------------------------------------------------

/// States of the single outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request produced a result.
    Success,
    /// The last request failed.
    Error,
}

impl LoadingState {
    /// Returns `true` while a request is in flight.
    ///
    /// ```
    /// use thai_proofreader::session::LoadingState;
    ///
    /// assert!(LoadingState::Loading.is_busy());
    /// assert!(!LoadingState::Success.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    /// A short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            LoadingState::Idle => "Idle",
            LoadingState::Loading => "Checking",
            LoadingState::Success => "Done",
            LoadingState::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// ProofreadSession
// ---------------------------------------------------------------------------

/// The UI's view of the current request and its outcome.
#[derive(Debug, Default)]
pub struct ProofreadSession {
    state: LoadingState,
    result: Option<ProofreadResult>,
    error: Option<String>,
}

impl ProofreadSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoadingState {
        self.state
    }

    /// The result of the last successful request.  Only `Some` in
    /// [`LoadingState::Success`].
    pub fn result(&self) -> Option<&ProofreadResult> {
        self.result.as_ref()
    }

    /// Changes of the current result, if any.
    pub fn changes(&self) -> Option<&[ChangeItem]> {
        self.result.as_ref().map(|r| r.changes.as_slice())
    }

    /// User-facing error message.  Only `Some` in [`LoadingState::Error`].
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Enter `Loading`, dropping the previous result and error.
    ///
    /// Returns `false` (and changes nothing) if a request is already in
    /// flight.
    pub fn begin(&mut self) -> bool {
        if self.state.is_busy() {
            return false;
        }
        self.state = LoadingState::Loading;
        self.result = None;
        self.error = None;
        true
    }

    /// Record a successful response.  Ignored unless `Loading`.
    pub fn succeed(&mut self, result: ProofreadResult) {
        if !self.state.is_busy() {
            log::warn!("session: dropping result received in state {:?}", self.state);
            return;
        }
        self.result = Some(result);
        self.state = LoadingState::Success;
    }

    /// Record a failure.  Ignored unless `Loading`.
    pub fn fail(&mut self, message: impl Into<String>) {
        if !self.state.is_busy() {
            log::warn!("session: dropping failure received in state {:?}", self.state);
            return;
        }
        self.error = Some(message.into());
        self.state = LoadingState::Error;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
