use anyhow::{anyhow, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::default::Default;
use std::path::{Path, PathBuf};

use crate::alignment::SplitterKind;
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Base directory that relative language directories are resolved against
    #[serde(default = "default_library_root")]
    pub library_root: PathBuf,

    /// Languages with a transcript directory
    #[serde(default = "default_languages")]
    pub languages: Vec<LanguageConfig>,

    /// Sentence model selection
    #[serde(default)]
    pub splitter: SplitterConfig,

    /// Notes database location, defaults to the user data directory
    #[serde(default)]
    pub notes_database: Option<PathBuf>,

    /// Maximum number of transcripts aligned at once during export
    #[serde(default = "default_max_concurrent_alignments")]
    pub max_concurrent_alignments: usize,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// A language whose transcripts live in one directory
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LanguageConfig {
    // @field: Language identifier (name or ISO code)
    pub name: String,

    // @field: Directory holding <name>.mp3 and <name>_merged.srt files
    pub directory: PathBuf,

    // @field: Splitting strategy for this language
    #[serde(default)]
    pub splitter: SplitterKind,
}

impl LanguageConfig {
    pub fn new(name: &str, directory: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            directory: directory.into(),
            splitter: SplitterKind::default(),
        }
    }
}

/// Sentence model selection by language
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SplitterConfig {
    /// Model used when a language has no entry or its model cannot be loaded
    #[serde(default = "default_sentence_model")]
    pub default_model: String,

    /// Language identifier to model identifier
    #[serde(default = "default_language_models")]
    pub models: BTreeMap<String, String>,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            default_model: default_sentence_model(),
            models: default_language_models(),
        }
    }
}

impl SplitterConfig {
    /// Model identifier configured for a language.
    ///
    /// Keys match exactly first, then by resolved language, so "en" finds an
    /// "english" entry. Unknown languages get the default model.
    pub fn model_for(&self, language: &str) -> &str {
        let wanted = language.trim().to_lowercase();

        self.models
            .iter()
            .find(|(key, _)| key.to_lowercase() == wanted)
            .or_else(|| {
                self.models
                    .iter()
                    .find(|(key, _)| language_utils::language_codes_match(key, language))
            })
            .map_or(self.default_model.as_str(), |(_, model)| model.as_str())
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_library_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![LanguageConfig::new("english", "english")]
}

fn default_sentence_model() -> String {
    "en_core_web_sm".to_string()
}

fn default_language_models() -> BTreeMap<String, String> {
    BTreeMap::from([("english".to_string(), "en_core_web_sm".to_string())])
}

fn default_max_concurrent_alignments() -> usize {
    4
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.languages.is_empty() {
            return Err(anyhow!("At least one language must be configured"));
        }

        for language in &self.languages {
            language_utils::get_language_name(&language.name)
                .map_err(|e| anyhow!("Invalid language entry '{}': {}", language.name, e))?;

            if language.directory.as_os_str().is_empty() {
                return Err(anyhow!("Language '{}' has an empty directory", language.name));
            }
        }

        for key in self.splitter.models.keys() {
            language_utils::get_language_name(key)
                .map_err(|e| anyhow!("Invalid sentence model mapping '{}': {}", key, e))?;
        }

        if self.splitter.default_model.trim().is_empty() {
            return Err(anyhow!("A default sentence model is required"));
        }

        if self.max_concurrent_alignments == 0 {
            return Err(anyhow!("max_concurrent_alignments must be at least 1"));
        }

        Ok(())
    }

    /// Find the configuration entry for a language identifier
    pub fn language(&self, identifier: &str) -> Option<&LanguageConfig> {
        let wanted = identifier.trim().to_lowercase();

        self.languages
            .iter()
            .find(|l| l.name.to_lowercase() == wanted)
            .or_else(|| {
                self.languages
                    .iter()
                    .find(|l| language_utils::language_codes_match(&l.name, identifier))
            })
    }

    /// Directory for a language, resolved against the library root
    pub fn language_dir(&self, identifier: &str) -> Option<PathBuf> {
        self.language(identifier)
            .map(|l| resolve_dir(&self.library_root, &l.directory))
    }
}

fn resolve_dir(root: &Path, dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        root.join(dir)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            library_root: default_library_root(),
            languages: default_languages(),
            splitter: SplitterConfig::default(),
            notes_database: None,
            max_concurrent_alignments: default_max_concurrent_alignments(),
            log_level: LogLevel::default(),
        }
    }
}
