/// Collapse every whitespace run, newlines included, into one ASCII space and trim.
///
/// Normalizing already-normalized text returns it unchanged.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
