//! Proofreading worker that runs model calls off the UI thread.
//!
//! [`ProofreadWorker`] receives [`SessionCommand`]s over a
//! `tokio::sync::mpsc` channel and answers each with exactly one
//! [`SessionEvent`].
//!
//! ```text
//! SessionCommand::Proofread { text }
//!   └─▶ proofreader.proofread(text)
//!         ├─ Ok  → SessionEvent::Completed(result)
//!         └─ Err → log error, SessionEvent::Failed { GENERIC_ERROR_MESSAGE }
//! ```
//!
//! Commands are handled strictly one after another, so at most one request
//! is in flight.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::proofread::{ProofreadResult, Proofreader};

use super::state::GENERIC_ERROR_MESSAGE;

/// Commands sent from the UI thread to the worker.
#[derive(Debug, Clone)]
pub enum SessionCommand {
    /// Proofread `text` as entered by the user.
    Proofread { text: String },
}

/// Outcomes delivered from the worker to the UI.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The model returned a parsed result.
    Completed(ProofreadResult),
    /// The request failed; `message` is safe to show to the user.
    Failed { message: String },
}

/// Drives proofreading requests.
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use thai_proofreader::config::AppConfig;
/// use thai_proofreader::proofread::GeminiProofreader;
/// use thai_proofreader::session::ProofreadWorker;
///
/// # async fn example() {
/// let config = AppConfig::default();
/// let worker = ProofreadWorker::new(Arc::new(GeminiProofreader::from_config(&config.llm)));
///
/// let (command_tx, command_rx) = tokio::sync::mpsc::channel(4);
/// let (event_tx, event_rx) = tokio::sync::mpsc::channel(4);
/// tokio::spawn(worker.run(command_rx, event_tx));
/// # drop((command_tx, event_rx));
/// # }
/// ```
pub struct ProofreadWorker {
    proofreader: Arc<dyn Proofreader>,
}

impl ProofreadWorker {
    pub fn new(proofreader: Arc<dyn Proofreader>) -> Self {
        Self { proofreader }
    }

    /// Run until `command_rx` is closed or the UI drops `event_tx`'s peer.
    pub async fn run(
        self,
        mut command_rx: mpsc::Receiver<SessionCommand>,
        event_tx: mpsc::Sender<SessionEvent>,
    ) {
        while let Some(cmd) = command_rx.recv().await {
            let event = match cmd {
                SessionCommand::Proofread { text } => self.handle_proofread(&text).await,
            };

            if event_tx.send(event).await.is_err() {
                log::info!("worker: event channel closed, shutting down");
                return;
            }
        }

        log::info!("worker: command channel closed, shutting down");
    }

    async fn handle_proofread(&self, text: &str) -> SessionEvent {
        log::debug!("worker: proofreading {} chars", text.chars().count());

        match self.proofreader.proofread(text).await {
            Ok(result) => SessionEvent::Completed(result),
            Err(e) => {
                log::error!("worker: proofreading failed: {e}");
                SessionEvent::Failed {
                    message: GENERIC_ERROR_MESSAGE.to_string(),
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
