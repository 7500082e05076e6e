/*!
 * Tests for error types
 */

use subalign::errors::{AlignmentError, LibraryError, ModelError};

/// Test alignment error messages
#[test]
fn test_alignmentError_display_shouldDescribeProblem() {
    let malformed = AlignmentError::MalformedTimestamp {
        value: "00:00:abc,000".to_string(),
        reason: "seconds are not numeric".to_string(),
    };
    assert_eq!(
        malformed.to_string(),
        "Malformed timestamp '00:00:abc,000': seconds are not numeric"
    );

    let degenerate = AlignmentError::DegenerateInterval { start: 5.0, end: 4.5 };
    assert_eq!(degenerate.to_string(), "Degenerate interval: 5.000s --> 4.500s");

    assert_eq!(AlignmentError::EmptyText.to_string(), "Block text is empty after normalization");
}

/// Test model error messages
#[test]
fn test_modelError_display_shouldNameModels() {
    let unavailable = ModelError::ModelUnavailable {
        model: "de_core_news_lg".to_string(),
        reason: "not installed".to_string(),
    };
    assert_eq!(
        unavailable.to_string(),
        "Sentence model 'de_core_news_lg' is unavailable: not installed"
    );

    let none = ModelError::NoModelAvailable {
        requested: "a".to_string(),
        default: "b".to_string(),
    };
    assert!(none.to_string().contains("requested 'a'"));
    assert!(none.to_string().contains("default 'b'"));
}

/// Test that library errors survive the trip through anyhow
#[test]
fn test_libraryError_throughAnyhow_shouldDowncast() {
    let err: anyhow::Error = LibraryError::SourceNotFound("lesson1".to_string()).into();

    assert_eq!(err.to_string(), "Source not found: lesson1");
    assert!(matches!(
        err.downcast_ref::<LibraryError>(),
        Some(LibraryError::SourceNotFound(name)) if name == "lesson1"
    ));
    assert_eq!(
        LibraryError::LanguageNotSupported("klingon".to_string()).to_string(),
        "Language not supported: klingon"
    );
}
