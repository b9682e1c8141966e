//! Proofreading module for Thai Proofreader.
//!
//! This module provides:
//! * [`Proofreader`]: async trait implemented by proofreading backends.
//! * [`GeminiProofreader`]: Gemini `generateContent` backend.
//! * [`PromptBuilder`]: request body with the schema-constrained contract.
//! * [`ProofreadResult`] / [`ChangeItem`] / [`ChangeType`]: structured output.
//! * [`Highlighter`]: marks the changed substrings in the original text.
//! * [`ProofreadError`]: error variants for the model call.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use thai_proofreader::config::AppConfig;
//! use thai_proofreader::proofread::{GeminiProofreader, Highlighter, Proofreader};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let proofreader = GeminiProofreader::from_config(&config.llm);
//!
//!     let text = "วันนี้อากาศดีมากๆเลยค่ะ";
//!     let result = proofreader.proofread(text).await.unwrap();
//!
//!     for segment in Highlighter::new(&result.changes).segments(text) {
//!         print!("{}", if segment.is_error { "[" } else { "" });
//!         print!("{}", segment.text);
//!         print!("{}", if segment.is_error { "]" } else { "" });
//!     }
//!     println!("\n{}", result.corrected_text);
//! }
//! ```

pub mod client;
pub mod highlight;
pub mod prompt;
pub mod types;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{GeminiProofreader, ProofreadError, Proofreader};
pub use highlight::{highlight, Highlighter, Segment};
pub use prompt::{response_schema, PromptBuilder, SYSTEM_INSTRUCTION};
pub use types::{ChangeItem, ChangeType, ProofreadResult};
