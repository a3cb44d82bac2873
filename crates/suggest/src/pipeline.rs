use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::recognizer::{CategoryRecognizer, RecognizerError};
use crate::types::{Suggestion, SuggestionRequest};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Suggestion queue is full")]
    Full,
    #[error("Suggestion worker has stopped")]
    Closed,
}

/// Runs the recognizer on one request and checks that the answer is one of
/// the offered categories.
pub fn suggest(
    recognizer: &dyn CategoryRecognizer,
    request: &SuggestionRequest,
) -> Result<Suggestion, RecognizerError> {
    let category = recognizer.recognize(request)?;
    if let Some(id) = category {
        if !request.categories.iter().any(|c| c.id == id) {
            return Err(RecognizerError::UnknownCategory(id));
        }
    }
    Ok(Suggestion {
        transaction_id: request.transaction_id,
        category,
    })
}

/// Background worker fed through a bounded channel.
///
/// Dispatch never waits: a full or stopped queue is reported and the request
/// is dropped. Failed recognitions are logged and not retried.
pub struct SuggestionQueue {
    tx: mpsc::Sender<SuggestionRequest>,
    worker: JoinHandle<()>,
}

impl SuggestionQueue {
    /// Spawns the worker on the current tokio runtime. Suggestions are sent to `results`.
    pub fn spawn<R>(recognizer: R, capacity: usize, results: mpsc::Sender<Suggestion>) -> Self
    where
        R: CategoryRecognizer + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run_worker(Arc::new(recognizer), rx, results));
        Self { tx, worker }
    }

    pub fn dispatch(&self, request: SuggestionRequest) -> Result<(), DispatchError> {
        self.tx.try_send(request).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DispatchError::Full,
            mpsc::error::TrySendError::Closed(_) => DispatchError::Closed,
        })
    }

    /// Stops accepting work and waits for queued requests to drain.
    pub async fn shutdown(self) {
        drop(self.tx);
        if let Err(e) = self.worker.await {
            tracing::warn!("Suggestion worker panicked: {e}");
        }
    }
}

async fn run_worker<R>(
    recognizer: Arc<R>,
    mut rx: mpsc::Receiver<SuggestionRequest>,
    results: mpsc::Sender<Suggestion>,
) where
    R: CategoryRecognizer + 'static,
{
    tracing::info!("Suggestion worker started");

    while let Some(request) = rx.recv().await {
        if request.categories.is_empty() {
            tracing::debug!(transaction = %request.transaction_id, "no categories to suggest from");
            continue;
        }

        // Recognizers may block (e.g. a remote call), so keep them off the async threads.
        let recognizer = Arc::clone(&recognizer);
        let outcome =
            tokio::task::spawn_blocking(move || suggest(recognizer.as_ref(), &request)).await;

        match outcome {
            Ok(Ok(suggestion)) => {
                tracing::debug!(
                    transaction = %suggestion.transaction_id,
                    category = ?suggestion.category,
                    "suggestion ready"
                );
                if results.send(suggestion).await.is_err() {
                    tracing::info!("Suggestion receiver dropped");
                    break;
                }
            }
            Ok(Err(e)) => tracing::warn!("Category recognition failed: {e}"),
            Err(e) => tracing::warn!("Category recognition task failed: {e}"),
        }
    }

    tracing::info!("Suggestion worker stopped");
}
