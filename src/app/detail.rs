//! Detail screen state for a single catalog entry.

use crate::api::ApiRequest;
use crate::domain::{DetailItem, Resource};

/// State of the detail screen.
///
/// Exists only while the screen is open. `epoch` is the generation of the
/// screen instance, so a reply for an entry the user already navigated away
/// from is never applied to the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailScreen {
    pub id: u32,
    pub detail: Option<DetailItem>,
    pub is_loading: bool,
    pub error: Option<String>,
    epoch: u64,
}

impl DetailScreen {
    /// Opens the screen for `id` and returns the fetch that populates it.
    #[must_use]
    pub fn open(id: u32, epoch: u64) -> (Self, ApiRequest) {
        tracing::debug!(id, epoch, "opening detail screen");
        let screen = Self {
            id,
            detail: None,
            is_loading: true,
            error: None,
            epoch,
        };
        (screen, ApiRequest::Detail { id, epoch })
    }

    /// Applies a detail reply. Returns `false` when it belongs to another
    /// screen instance or entry.
    pub fn apply(&mut self, id: u32, epoch: u64, outcome: Resource<DetailItem>) -> bool {
        if id != self.id || epoch != self.epoch {
            tracing::debug!(id, epoch, current_id = self.id, "dropping stale detail");
            return false;
        }

        match outcome {
            Resource::Success(detail) => {
                self.detail = Some(detail);
                self.error = None;
                self.is_loading = false;
            }
            Resource::Error(message) => {
                tracing::warn!(id, error = %message, "detail load failed");
                self.error = Some(message);
                self.is_loading = false;
            }
            Resource::Loading => self.is_loading = true,
        }
        true
    }

    /// Re-issues the fetch after a failure.
    pub fn retry(&mut self) -> Option<ApiRequest> {
        if self.is_loading || self.error.is_none() {
            return None;
        }
        self.is_loading = true;
        self.error = None;
        Some(ApiRequest::Detail {
            id: self.id,
            epoch: self.epoch,
        })
    }
}
