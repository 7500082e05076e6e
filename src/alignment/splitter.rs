use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::model::SentenceModel;

/// Splits normalized block text into sentences
pub trait SentenceSplitter: Send + Sync {
    /// Ordered, trimmed, non-empty sentence strings
    fn split(&self, text: &str) -> Vec<String>;
}

/// Which splitting strategy a caller wants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplitterKind {
    /// Each block is a single sentence
    PassThrough,
    /// Sentences come from a language model
    #[default]
    Linguistic,
}

impl fmt::Display for SplitterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough => write!(f, "pass_through"),
            Self::Linguistic => write!(f, "linguistic"),
        }
    }
}

impl std::str::FromStr for SplitterKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pass_through" | "passthrough" => Ok(Self::PassThrough),
            "linguistic" => Ok(Self::Linguistic),
            _ => Err(anyhow::anyhow!("Invalid splitter kind: {}", s)),
        }
    }
}

/// Keeps the whole block as one sentence
#[derive(Debug, Default, Clone, Copy)]
pub struct PassThroughSplitter;

impl SentenceSplitter for PassThroughSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let text = text.trim();
        if text.is_empty() {
            Vec::new()
        } else {
            vec![text.to_string()]
        }
    }
}

/// Splits text with a sentence boundary model
#[derive(Clone)]
pub struct LinguisticSplitter {
    model: Arc<dyn SentenceModel>,
}

impl LinguisticSplitter {
    pub fn new(model: Arc<dyn SentenceModel>) -> Self {
        Self { model }
    }

    /// Identifier of the underlying model
    pub fn model_id(&self) -> &str {
        self.model.id()
    }
}

impl SentenceSplitter for LinguisticSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        self.model
            .sentences(text)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Debug for LinguisticSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinguisticSplitter")
            .field("model", &self.model.id())
            .finish()
    }
}
