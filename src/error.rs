//! Error types for the load pipeline.
//!
//! This module defines the error hierarchy:
//!
//! - [`ReadError`] - source file reading errors
//! - [`TransportError`] - per-record delivery errors
//! - [`LoadError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. [`TransportError`]
//! is the exception: it is never propagated with `?`, because a failed
//! record must not abort the rows after it. The loader logs it and
//! moves on.

use thiserror::Error;

// =============================================================================
// Source Reading Errors
// =============================================================================

/// Errors while reading the source file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Source file missing. The single fatal pre-flight condition:
    /// reported before any transformation or network activity occurs.
    #[error("Source file not found: {path}")]
    NotFound { path: String },

    /// Any other I/O failure while reading the source.
    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited data.
    #[error("Invalid delimited data: {0}")]
    Parse(#[from] csv::Error),
}

// =============================================================================
// Transport Errors (per-record)
// =============================================================================

/// Per-record delivery failures.
///
/// Carries the destination URL so the offending record can be retried
/// by hand from the log line alone.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never completed (connect failure, timeout, ...).
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The destination answered with a non-success status.
    #[error("Destination {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

// =============================================================================
// Load Errors (top-level)
// =============================================================================

/// Top-level loader errors.
///
/// This is the main error type returned by [`crate::loader::Loader`].
#[derive(Debug, Error)]
pub enum LoadError {
    /// Source reading error.
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    /// HTTP client construction or a fatal request failure
    /// (only `fetch` treats request failures as fatal).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON rendering error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for source reading operations.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;
