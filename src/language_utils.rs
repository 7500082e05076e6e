use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for language identifier handling
///
/// Transcripts are filed under loose identifiers such as "english", "en" or
/// "eng". This module resolves all of them to the same ISO 639 language so
/// that configuration lookups do not depend on which form a caller used.
/// ISO 639-2/B codes that differ from their 639-2/T counterpart
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Resolve an ISO 639-1/639-2 code or an English language name
pub fn resolve_language(identifier: &str) -> Result<Language> {
    let normalized = identifier.trim().to_lowercase();

    let resolved = match normalized.len() {
        0 => None,
        2 => Language::from_639_1(&normalized),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == normalized)
                .map_or(normalized.as_str(), |(_, t)| *t);
            Language::from_639_3(part2t)
        }
        _ => None,
    };

    resolved
        .or_else(|| Language::from_name(&capitalize(&normalized)))
        .ok_or_else(|| anyhow!("Unknown language: {}", identifier))
}

/// Normalize a language identifier to ISO 639-1 if possible, else ISO 639-3
pub fn normalize_to_part1_or_part3(identifier: &str) -> Result<String> {
    let lang = resolve_language(identifier)?;
    Ok(lang
        .to_639_1()
        .map_or_else(|| lang.to_639_3().to_string(), |code| code.to_string()))
}

/// Check if two identifiers name the same language
pub fn language_codes_match(first: &str, second: &str) -> bool {
    match (resolve_language(first), resolve_language(second)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name for an identifier
pub fn get_language_name(identifier: &str) -> Result<String> {
    Ok(resolve_language(identifier)?.to_name().to_string())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
