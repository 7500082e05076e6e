/*!
 * Error types for the subalign application.
 *
 * Typed errors for the alignment engine and the transcript library.
 * Application layers wrap them in `anyhow::Error` with context.
 */

use thiserror::Error;

/// Recoverable problems found while aligning a single block.
///
/// None of these abort an alignment run; the offending block is skipped and
/// the error is attached to it in the alignment report.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlignmentError {
    /// A timecode does not follow the `HH:MM:SS,mmm` grammar
    #[error("Malformed timestamp '{value}': {reason}")]
    MalformedTimestamp {
        /// The original timecode string
        value: String,
        /// What was wrong with it
        reason: String,
    },

    /// The block's end time is not after its start time
    #[error("Degenerate interval: {start:.3}s --> {end:.3}s")]
    DegenerateInterval {
        /// Start in seconds
        start: f64,
        /// End in seconds
        end: f64,
    },

    /// The block text is empty once whitespace is collapsed
    #[error("Block text is empty after normalization")]
    EmptyText,
}

/// Errors raised while resolving a sentence model
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The requested model could not be loaded
    #[error("Sentence model '{model}' is unavailable: {reason}")]
    ModelUnavailable {
        /// Model identifier
        model: String,
        /// Loader message
        reason: String,
    },

    /// Neither the requested nor the default model could be loaded
    #[error("No sentence model available (requested '{requested}', default '{default}')")]
    NoModelAvailable {
        /// Model the caller asked for
        requested: String,
        /// Configured fallback model
        default: String,
    },
}

/// Errors from the transcript library
#[derive(Error, Debug)]
pub enum LibraryError {
    /// No directory is configured for the language
    #[error("Language not supported: {0}")]
    LanguageNotSupported(String),

    /// The transcript or audio file does not exist
    #[error("Source not found: {0}")]
    SourceNotFound(String),
}
