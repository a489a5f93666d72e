//! Defines structures and types for progress reporting.

use std::sync::{Arc, Mutex};

/// Represents a snapshot of the progress during a long-running operation.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// A description of the current stage (e.g., "Downloading WordNet dataset").
    pub stage_description: String,
    /// Number of items processed in the current stage.
    pub current_item: u64,
    /// Total number of items expected in the current stage (if calculable).
    pub total_items: Option<u64>,
    /// An optional message providing more context (e.g., "Download complete.").
    pub message: Option<String>,
}

/// Type alias for the progress callback function.
///
/// The callback receives a `ProgressUpdate` and should return `true` to continue the operation,
/// or `false` to request cancellation (cancellation support is not yet implemented in the caller).
///
/// The callback must be `Send` and `Sync` to be safely passed between threads if needed,
/// and `FnMut` allows it to modify its captured state (e.g., update a UI element).
pub type ProgressCallback = Box<dyn FnMut(ProgressUpdate) -> bool + Send + Sync>;

impl ProgressUpdate {
    /// Creates a new progress update for the start of a stage.
    pub fn new_stage(description: String, total_items: Option<u64>) -> Self {
        ProgressUpdate {
            stage_description: description,
            current_item: 0,
            total_items,
            message: None,
        }
    }
}

/// Shared handle around an optional callback, cheap to clone across the
/// stages of the load pipeline.
#[derive(Clone)]
pub struct Reporter {
    callback: Arc<Mutex<Option<ProgressCallback>>>,
}

impl Reporter {
    pub fn new(callback: Option<ProgressCallback>) -> Self {
        Reporter {
            callback: Arc::new(Mutex::new(callback)),
        }
    }

    /// Forwards an update to the callback, if one is installed.
    pub fn report(&self, update: ProgressUpdate) {
        if let Ok(mut guard) = self.callback.lock() {
            if let Some(cb) = guard.as_mut() {
                let _ = cb(update); // Cancellation requests are currently ignored
            }
        }
    }
}
