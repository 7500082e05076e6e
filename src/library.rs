use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::app_config::Config;
use crate::errors::LibraryError;

// @module: Transcript and audio lookup per language

// @const: Suffix of aligned transcript files, "<name>_merged.srt"
const TRANSCRIPT_SUFFIX: &str = "_merged.srt";

// @const: Audio extension used to enumerate articles
const AUDIO_EXTENSION: &str = "mp3";

// @struct: Resolves articles to files in per-language directories
#[derive(Debug, Clone)]
pub struct TranscriptLibrary {
    config: Config,
}

impl TranscriptLibrary {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Directory configured for a language
    pub fn language_dir(&self, language: &str) -> Result<PathBuf, LibraryError> {
        self.config
            .language_dir(language)
            .ok_or_else(|| LibraryError::LanguageNotSupported(language.to_string()))
    }

    /// Article names in a language: stems of its audio files, sorted
    pub fn list_articles(&self, language: &str) -> Result<Vec<String>> {
        let dir = self.language_dir(language)?;
        if !dir.is_dir() {
            return Err(LibraryError::SourceNotFound(format!("{}", dir.display())).into());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && has_extension(path, AUDIO_EXTENSION) {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().to_string());
                }
            }
        }

        names.sort();
        debug!("Found {} article(s) for '{}' in {:?}", names.len(), language, dir);
        Ok(names)
    }

    /// Path of an article's transcript, which must exist
    pub fn transcript_path(&self, language: &str, name: &str) -> Result<PathBuf, LibraryError> {
        let path = self.language_dir(language)?.join(format!("{}{}", name, TRANSCRIPT_SUFFIX));
        existing_file(path)
    }

    /// Path of an article's audio file, which must exist
    pub fn audio_path(&self, language: &str, name: &str) -> Result<PathBuf, LibraryError> {
        let path = self
            .language_dir(language)?
            .join(format!("{}.{}", name, AUDIO_EXTENSION));
        existing_file(path)
    }

    /// Read an article's transcript text
    pub async fn read_transcript(&self, language: &str, name: &str) -> Result<String> {
        let path = self.transcript_path(language, name)?;
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read transcript: {:?}", path))
    }
}

fn existing_file(path: PathBuf) -> Result<PathBuf, LibraryError> {
    if path.is_file() {
        Ok(path)
    } else {
        Err(LibraryError::SourceNotFound(format!("{}", path.display())))
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
}

/// Output path for an aligned transcript: "<dir>/<name>.sentences.json"
pub fn sentences_output_path<P: AsRef<Path>>(dir: P, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.sentences.json", name))
}
