// Copyright (c) The Tierfall Project Authors.
// Licensed under the MIT License.

//! Error types for provider and retrieval operations.

/// An error from a provider operation or an exhausted retrieval chain.
///
/// This is an opaque error type that can wrap any underlying error from a
/// provider implementation. Per-entry retrieval failures and the terminal
/// "every source missed" failure are both expressed as this one kind with
/// different messages; use [`std::error::Error::source()`] to reach the
/// underlying cause if one exists.
///
/// # Example
///
/// ```
/// use tierfall_provider::Error;
///
/// let error = Error::from_message("remote directory unreachable");
/// ```
#[ohno::error]
pub struct Error {}

impl Error {
    /// Creates a new error from any type that can be converted to an error.
    ///
    /// This is the public API for creating provider errors from external crates.
    ///
    /// # Examples
    ///
    /// ```
    /// use tierfall_provider::Error;
    ///
    /// let error = Error::from_message("retrieval failed");
    /// ```
    pub fn from_message(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::caused_by(cause)
    }
}

/// A specialized [`Result`] type for provider operations.
pub type Result<T> = std::result::Result<T, Error>;
