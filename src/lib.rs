//! # Projload - bulk delimited-export loading
//!
//! Projload reads a comma-delimited spreadsheet export, maps positional
//! columns onto a fixed named schema, coerces year and list fields into
//! typed values, and POSTs each record as an independent JSON document
//! to an HTTP collection endpoint.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐     ┌────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  CSV file  │────▶│   Reader   │────▶│  Transform  │────▶│  POST / JSON │
//! │  (export)  │     │ (auto-enc) │     │ (coercion)  │     │  (per row)   │
//! └────────────┘     └────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use projload::{LoadConfig, Loader};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = LoadConfig::from_env();
//!     let loader = Loader::new(&config).unwrap();
//!     let report = loader.load("projects.csv", &config.endpoint_url).await.unwrap();
//!     println!("Delivered {} of {} records", report.posted, report.rows);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - error hierarchy
//! - [`config`] - field schema and runtime configuration
//! - [`reader`] - source file reading with encoding detection
//! - [`transform`] - per-field coercion rules
//! - [`loader`] - sequential delivery, preview, and fetch
//! - [`logs`] - console diagnostics

// Core modules
pub mod config;
pub mod error;

// Diagnostics
pub mod logs;

// Reading
pub mod reader;

// Transformation
pub mod transform;

// Delivery
pub mod loader;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{LoadError, LoadResult, ReadError, ReadResult, TransportError};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{
    LoadConfig, DEFAULT_SENTINEL, DEFAULT_SOURCE, DEFAULT_TIMEOUT_SECS, DEFAULT_URL,
};

// =============================================================================
// Re-exports - Reading
// =============================================================================

pub use reader::{decode_content, detect_encoding, parse_rows, read_rows, RawRow};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    classify, sanitize, transform_row, transform_rows, year_value, CoercionNote, FieldKind,
    TransformedRow,
};

// =============================================================================
// Re-exports - Delivery
// =============================================================================

pub use loader::{preview_records, render_preview, LoadReport, Loader, PostOutcome};
