//! Tri-state outcome of a repository call.

use super::error::DexError;

/// Outcome of loading a piece of remote data.
///
/// The repository never surfaces structured errors to the screens; failures
/// arrive as the human-readable message carried by [`Resource::Error`].
#[derive(Debug, Clone, PartialEq)]
pub enum Resource<T> {
    /// Data was loaded and mapped into domain records.
    Success(T),
    /// Loading failed; the message is rendered verbatim.
    Error(String),
    /// A request is still outstanding.
    Loading,
}

impl<T> Resource<T> {
    /// Collapses a `Result` into a resource, prefixing failures with a
    /// description of the operation that failed.
    ///
    /// ```
    /// use dexplorer::domain::{DexError, Resource};
    ///
    /// let failed: Result<u32, DexError> = Err(DexError::ResourceUrl("x".into()));
    /// let resource = Resource::from_result(failed, "Search failed");
    /// assert_eq!(resource, Resource::Error("Search failed: malformed resource url: x".into()));
    /// ```
    pub fn from_result(result: std::result::Result<T, DexError>, context: &str) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(e) => Self::Error(format!("{context}: {e}")),
        }
    }
}
