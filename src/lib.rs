//! Thai Proofreader, an AI-assisted Thai proofreading desktop app.
//!
//! * [`config`]: TOML settings and platform paths.
//! * [`proofread`]: Gemini request/response contract and inline highlighting.
//! * [`session`]: loading state machine, editor logic and background worker.
//! * [`app`]: the egui window.
//! * [`fonts`]: Thai glyph fallback for egui.

pub mod app;
pub mod config;
pub mod fonts;
pub mod proofread;
pub mod session;
