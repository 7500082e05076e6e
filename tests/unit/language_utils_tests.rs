/*!
 * Tests for language utility functions
 */

use isolang::Language;
use subalign::language_utils::{
    get_language_name, language_codes_match, normalize_to_part1_or_part3, resolve_language,
};

/// Test resolving each identifier form
#[test]
fn test_resolveLanguage_withCodesAndNames_shouldFindLanguage() {
    assert_eq!(resolve_language("en").unwrap(), Language::Eng);
    assert_eq!(resolve_language("eng").unwrap(), Language::Eng);
    assert_eq!(resolve_language("English").unwrap(), Language::Eng);
    assert_eq!(resolve_language("  english ").unwrap(), Language::Eng);
    assert_eq!(resolve_language("ger").unwrap(), Language::Deu);
    assert_eq!(resolve_language("fre").unwrap(), Language::Fra);
}

/// Test that unknown identifiers are rejected
#[test]
fn test_resolveLanguage_withInvalidIdentifier_shouldFail() {
    assert!(resolve_language("").is_err());
    assert!(resolve_language("xx").is_err());
    assert!(resolve_language("not-a-language").is_err());
}

/// Test normalizing to the shortest code
#[test]
fn test_normalizeToPart1OrPart3_shouldPreferTwoLetterCodes() {
    assert_eq!(normalize_to_part1_or_part3("english").unwrap(), "en");
    assert_eq!(normalize_to_part1_or_part3("deu").unwrap(), "de");
    assert_eq!(normalize_to_part1_or_part3("yue").unwrap(), "yue");
}

/// Test identifier comparison
#[test]
fn test_languageCodesMatch_shouldCompareResolvedLanguages() {
    assert!(language_codes_match("english", "en"));
    assert!(language_codes_match("ger", "de"));
    assert!(!language_codes_match("english", "fr"));
    assert!(!language_codes_match("english", "not-a-language"));
}

/// Test language display names
#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("fra").unwrap(), "French");
    assert!(get_language_name("not-a-language").is_err());
}
