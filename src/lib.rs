/*!
 * # subalign - sentence-level alignment for timed transcripts
 *
 * A Rust library that turns SRT-style transcripts into sentence entries
 * with their own playback intervals, for synchronized listening and reading.
 *
 * ## Features
 *
 * - Tolerant SRT block parsing (blank lines, CRLF, odd arrows, missing final newline)
 * - Pass-through or linguistic sentence splitting, selected per language
 * - Proportional time allocation by sentence length with millisecond output
 * - Per-language transcript and audio library lookup
 * - SQLite-backed vocabulary notes per article
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `alignment`: the alignment engine:
 *   - `alignment::timecode`: timecode conversion
 *   - `alignment::parser`: raw block scanning
 *   - `alignment::model`: sentence models and their registry
 *   - `alignment::splitter`: sentence splitting strategies
 *   - `alignment::allocator`: time allocation
 *   - `alignment::pipeline`: the end-to-end pipeline
 * - `app_config`: Configuration management
 * - `library`: Transcript and audio lookup
 * - `notes`: Notes persistence
 * - `app_controller`: Main application controller
 * - `language_utils`: Language identifier utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod alignment;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod language_utils;
pub mod library;
pub mod notes;

// Re-export main types for easier usage
pub use alignment::{align, AlignmentPipeline, AlignmentReport, SentenceEntry, SplitterKind};
pub use app_config::Config;
pub use errors::{AlignmentError, LibraryError, ModelError};
pub use language_utils::{get_language_name, language_codes_match};
