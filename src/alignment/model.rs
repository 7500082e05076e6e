/*!
 * Sentence boundary models.
 *
 * A model turns normalized block text into sentence slices. Models are loaded
 * through a `ModelLoader` and memoized per identifier by the `ModelRegistry`,
 * which also handles falling back to the configured default model.
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, warn};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

use crate::errors::ModelError;

/// Sentence boundary detection over normalized text
pub trait SentenceModel: Send + Sync {
    /// Identifier the model was loaded under
    fn id(&self) -> &str;

    /// Split text into sentence slices in left-to-right order.
    ///
    /// Slices may carry surrounding whitespace; callers trim them.
    fn sentences<'t>(&self, text: &'t str) -> Vec<&'t str>;
}

/// Source of sentence models
pub trait ModelLoader: Send + Sync {
    /// Load the model with the given identifier
    fn load(&self, model_id: &str) -> Result<Arc<dyn SentenceModel>, ModelError>;
}

// Characters that end a sentence when followed by whitespace or end of text
const TERMINATORS: &[char] = &['.', '!', '?', '…'];

// Full-width terminators end a sentence even without trailing whitespace
const WIDE_TERMINATORS: &[char] = &['。', '！', '？'];

// Characters allowed between a terminator and the following whitespace
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '”', '’', '»', '」', '』'];

/// Punctuation driven sentence model with a per-language abbreviation list
#[derive(Debug, Clone)]
pub struct RuleBasedModel {
    id: String,
    abbreviations: HashSet<String>,
}

impl RuleBasedModel {
    /// Create a model that will not break after the given abbreviations.
    ///
    /// Abbreviations are matched case-insensitively and without their final period.
    pub fn new(id: &str, abbreviations: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            abbreviations: abbreviations
                .iter()
                .map(|a| a.trim_end_matches('.').to_lowercase())
                .collect(),
        }
    }

    /// Check if a period after `word` is part of an abbreviation rather than a sentence end
    fn is_abbreviation(&self, word: &str) -> bool {
        let word = word.trim_start_matches(|c: char| CLOSERS.contains(&c) || matches!(c, '(' | '[' | '“' | '‘' | '«'));
        if word.is_empty() {
            return false;
        }

        // Single letter initials like "J." and dotted forms like "e.g." or "U.S."
        let mut letters = word.chars();
        if let (Some(first), None) = (letters.next(), letters.next()) {
            // "I" and "A" are far more often words than initials
            if first.is_alphabetic() && !matches!(first, 'I' | 'A') {
                return true;
            }
        }
        if word.contains('.') && word.chars().any(|c| c.is_alphabetic()) {
            return true;
        }

        self.abbreviations.contains(&word.to_lowercase())
    }
}

impl SentenceModel for RuleBasedModel {
    fn id(&self) -> &str {
        &self.id
    }

    fn sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut sentences = Vec::new();
        let mut sentence_start = 0;
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut i = 0;

        while i < chars.len() {
            let (pos, c) = chars[i];
            let wide = WIDE_TERMINATORS.contains(&c);
            if !wide && !TERMINATORS.contains(&c) {
                i += 1;
                continue;
            }

            // Swallow runs like "?!" or "..." and closing quotes
            let mut j = i + 1;
            while j < chars.len() {
                let next = chars[j].1;
                if TERMINATORS.contains(&next) || WIDE_TERMINATORS.contains(&next) || CLOSERS.contains(&next) {
                    j += 1;
                } else {
                    break;
                }
            }
            let boundary = chars.get(j).map_or(text.len(), |&(p, _)| p);

            let at_end = j >= chars.len();
            let followed_by_space = chars.get(j).is_some_and(|&(_, n)| n.is_whitespace());
            if !at_end && !followed_by_space && !wide {
                i = j;
                continue;
            }

            if c == '.' && !at_end && chars[i + 1..j].iter().all(|&(_, n)| n != '.') {
                let word = text[sentence_start..pos].split_whitespace().last().unwrap_or("");

                let next_word_lowercase = text[boundary..]
                    .trim_start()
                    .chars()
                    .next()
                    .is_some_and(|n| n.is_lowercase());

                if self.is_abbreviation(word) || next_word_lowercase {
                    i = j;
                    continue;
                }
            }

            sentences.push(&text[sentence_start..boundary]);
            sentence_start = boundary;
            i = j;
        }

        if sentence_start < text.len() {
            sentences.push(&text[sentence_start..]);
        }

        sentences
    }
}

const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "inc", "ltd", "co",
    "corp", "dept", "est", "approx", "fig", "no", "vol", "jan", "feb", "mar", "apr", "jun",
    "jul", "aug", "sep", "sept", "oct", "nov", "dec", "gen", "gov", "sen", "rep", "capt", "lt",
];

const GERMAN_ABBREVIATIONS: &[&str] = &[
    "hr", "fr", "dr", "prof", "bzw", "ca", "usw", "vgl", "nr", "str", "evtl", "ggf", "inkl",
];

const FRENCH_ABBREVIATIONS: &[&str] = &["m", "mme", "mlle", "dr", "pr", "st", "ste", "etc", "av", "env"];

const SPANISH_ABBREVIATIONS: &[&str] = &["sr", "sra", "srta", "dr", "dra", "ud", "uds", "etc", "pág", "núm"];

/// Loader for the rule based models shipped with the crate.
///
/// Identifiers follow the common `<lang>_core_<genre>_<size>` naming so that
/// configuration written for statistical pipelines keeps working.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinModelLoader;

impl BuiltinModelLoader {
    /// Identifiers this loader understands
    pub fn available_models() -> &'static [&'static str] {
        &[
            "en_core_web_sm",
            "de_core_news_sm",
            "fr_core_news_sm",
            "es_core_news_sm",
            "xx_sent_ud_sm",
        ]
    }
}

impl ModelLoader for BuiltinModelLoader {
    fn load(&self, model_id: &str) -> Result<Arc<dyn SentenceModel>, ModelError> {
        let abbreviations: &[&str] = match model_id {
            "en_core_web_sm" => ENGLISH_ABBREVIATIONS,
            "de_core_news_sm" => GERMAN_ABBREVIATIONS,
            "fr_core_news_sm" => FRENCH_ABBREVIATIONS,
            "es_core_news_sm" => SPANISH_ABBREVIATIONS,
            "xx_sent_ud_sm" => &[],
            _ => {
                return Err(ModelError::ModelUnavailable {
                    model: model_id.to_string(),
                    reason: "not a built-in sentence model".to_string(),
                });
            }
        };

        Ok(Arc::new(RuleBasedModel::new(model_id, abbreviations)))
    }
}

type ModelCell = Arc<OnceCell<Arc<dyn SentenceModel>>>;

/// Lazily loaded, shared sentence models keyed by identifier.
///
/// Each identifier gets its own cell, so a slow or failing load only blocks
/// callers asking for that same identifier. Failed loads are not cached and
/// are retried on the next request.
pub struct ModelRegistry {
    loader: Arc<dyn ModelLoader>,
    default_model: String,
    cells: Mutex<HashMap<String, ModelCell>>,
}

impl ModelRegistry {
    /// Create a registry over the given loader
    pub fn new(loader: Arc<dyn ModelLoader>, default_model: &str) -> Self {
        Self {
            loader,
            default_model: default_model.to_string(),
            cells: Mutex::new(HashMap::new()),
        }
    }

    /// Create a registry over the built-in models
    pub fn builtin(default_model: &str) -> Self {
        Self::new(Arc::new(BuiltinModelLoader), default_model)
    }

    /// The fallback model identifier
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Get a model, loading it on first use
    pub fn get(&self, model_id: &str) -> Result<Arc<dyn SentenceModel>, ModelError> {
        let cell = {
            let mut cells = self.cells.lock();
            cells
                .entry(model_id.to_string())
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        cell.get_or_try_init(|| {
            debug!("Loading sentence model '{}'", model_id);
            self.loader.load(model_id)
        })
        .cloned()
    }

    /// Get a model, falling back to the default model when it cannot be loaded
    pub fn resolve(&self, model_id: &str) -> Result<Arc<dyn SentenceModel>, ModelError> {
        let err = match self.get(model_id) {
            Ok(model) => return Ok(model),
            Err(e) => e,
        };

        let no_model = || ModelError::NoModelAvailable {
            requested: model_id.to_string(),
            default: self.default_model.clone(),
        };

        if model_id == self.default_model {
            warn!("{}", err);
            return Err(no_model());
        }

        warn!("{}, falling back to default model '{}'", err, self.default_model);
        self.get(&self.default_model).map_err(|default_err| {
            warn!("{}", default_err);
            no_model()
        })
    }

    /// Check if a model has already been loaded
    pub fn is_loaded(&self, model_id: &str) -> bool {
        self.cells
            .lock()
            .get(model_id)
            .is_some_and(|cell| cell.get().is_some())
    }
}
