//! Input editor logic, independent of the widget toolkit.
//!
//! The editor is either in *edit* mode (a text area) or *view* mode (the
//! same text with the changed substrings highlighted).  It flips to view
//! mode when a result with changes arrives and back to edit mode while a
//! request is loading or when the user asks to edit.

use crate::proofread::ChangeItem;

use super::state::LoadingState;

/// Where the cursor should land when the text area next takes focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusRequest {
    /// Focus without moving the cursor.
    Focus,
    /// Focus and place the cursor after the last character.
    FocusAtEnd,
}

#[derive(Debug)]
pub struct EditorState {
    /// Current input text.
    pub text: String,
    editing: bool,
    focus: Option<FocusRequest>,
    last_state: LoadingState,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            text: String::new(),
            editing: true,
            focus: None,
            last_state: LoadingState::Idle,
        }
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Text is not blank and nothing is in flight.
    pub fn can_submit(&self, state: LoadingState) -> bool {
        !self.text.trim().is_empty() && !state.is_busy()
    }

    /// Text to send, untrimmed, when submission is allowed.
    pub fn submit(&self, state: LoadingState) -> Option<String> {
        self.can_submit(state).then(|| self.text.clone())
    }

    /// Empty the editor and return to edit mode with focus.
    pub fn clear(&mut self) {
        self.text.clear();
        self.editing = true;
        self.focus = Some(FocusRequest::Focus);
    }

    /// Return to edit mode with the cursor at the end of the text.
    pub fn switch_to_edit(&mut self) {
        self.editing = true;
        self.focus = Some(FocusRequest::FocusAtEnd);
    }

    /// React to a change of the session state.
    ///
    /// Only state transitions count, so a user who switched back to edit
    /// mode after a result stays there.
    pub fn sync(&mut self, state: LoadingState, changes: Option<&[ChangeItem]>) {
        if state == self.last_state {
            return;
        }
        self.last_state = state;

        match state {
            LoadingState::Success if changes.is_some_and(|c| !c.is_empty()) => {
                self.editing = false;
            }
            LoadingState::Loading => {
                self.editing = true;
            }
            _ => {}
        }
    }

    /// Pending focus request, consumed by the widget on the next frame.
    pub fn take_focus_request(&mut self) -> Option<FocusRequest> {
        self.focus.take()
    }

    /// Number of characters in the text (shown in the editor footer).
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
