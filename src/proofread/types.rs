//! Structured proofreading result returned by the model.
//!
//! The model is asked for JSON matching [`response_schema`](super::prompt::response_schema);
//! parsing here is optimistic.  Missing fields fall back to their defaults and
//! an unknown change `type` becomes [`ChangeType::Other`].

use serde::{Deserialize, Serialize};

/// Placeholder shown when a change has no original text.
pub const BLANK_PLACEHOLDER: &str = "(blank)";

/// Placeholder shown when a change deletes text.  The model sometimes emits
/// it literally as the `corrected` value.
pub const REMOVED_PLACEHOLDER: &str = "(removed)";

// ---------------------------------------------------------------------------
// ChangeType
// ---------------------------------------------------------------------------

/// Category of a single correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Spelling,
    Grammar,
    Spacing,
    #[default]
    #[serde(other)]
    Other,
}

impl ChangeType {
    /// All variants, in the order used by the response schema enum.
    pub const ALL: [ChangeType; 4] = [
        ChangeType::Spelling,
        ChangeType::Grammar,
        ChangeType::Spacing,
        ChangeType::Other,
    ];

    /// Wire name used in the JSON contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Spelling => "spelling",
            ChangeType::Grammar => "grammar",
            ChangeType::Spacing => "spacing",
            ChangeType::Other => "other",
        }
    }

    /// Thai label shown on change cards.
    pub fn label(&self) -> &'static str {
        match self {
            ChangeType::Spelling => "สะกดคำ",
            ChangeType::Grammar => "ไวยากรณ์",
            ChangeType::Spacing => "เว้นวรรค",
            ChangeType::Other => "อื่นๆ",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChangeItem
// ---------------------------------------------------------------------------

/// One `original → corrected` edit with the model's rationale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeItem {
    pub original: String,
    pub corrected: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub explanation: String,
}

impl ChangeItem {
    /// `original`, or [`BLANK_PLACEHOLDER`] when empty.
    pub fn original_display(&self) -> &str {
        if self.original.is_empty() {
            BLANK_PLACEHOLDER
        } else {
            &self.original
        }
    }

    /// `corrected`, or [`REMOVED_PLACEHOLDER`] when empty.
    pub fn corrected_display(&self) -> &str {
        if self.corrected.is_empty() {
            REMOVED_PLACEHOLDER
        } else {
            &self.corrected
        }
    }

    /// Whether the corrected text is worth offering a copy button for.
    pub fn is_copyable(&self) -> bool {
        !self.corrected.is_empty() && self.corrected != REMOVED_PLACEHOLDER
    }
}

// ---------------------------------------------------------------------------
// ProofreadResult
// ---------------------------------------------------------------------------

/// Full proofreading response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofreadResult {
    pub original_text: String,
    pub corrected_text: String,
    pub changes: Vec<ChangeItem>,
    pub overall_comment: String,
}

impl ProofreadResult {
    /// `true` when the model reported no corrections.
    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
