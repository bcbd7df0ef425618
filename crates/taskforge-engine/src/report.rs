//! Per-item outcomes for batch operations
//!
//! Batch operations (account delete, account update) process each item
//! independently; one failure never aborts the batch. Overall success
//! requires every item to succeed; anything less is a partial result the
//! caller re-drives item by item.

use serde::Serialize;

/// Outcome of a single batch item.
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutcome {
    pub id: String,
    pub success: bool,
    pub message: String,
}

impl BatchOutcome {
    pub fn ok(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            success: false,
            message: message.into(),
        }
    }
}

/// Itemized batch result with explicit counts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub successful_count: usize,
    pub failed_count: usize,
    pub results: Vec<BatchOutcome>,
}

impl BatchReport {
    pub fn push(&mut self, outcome: BatchOutcome) {
        if outcome.success {
            self.successful_count += 1;
        } else {
            self.failed_count += 1;
        }
        self.results.push(outcome);
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed_count == 0
    }

    pub fn is_partial(&self) -> bool {
        self.failed_count > 0 && self.successful_count > 0
    }
}
