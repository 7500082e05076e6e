/*!
 * Alignment pipeline.
 *
 * Composes block parsing, timestamp conversion, normalization, sentence
 * splitting and time allocation into one pass over a transcript. Problems
 * local to a block never abort the pass: the block is skipped, logged and
 * recorded in the report.
 */

use std::sync::Arc;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::allocator::{allocate, round_millis, TimedInterval};
use super::model::{ModelLoader, ModelRegistry};
use super::normalizer::normalize_text;
use super::parser::{parse_blocks, RawBlock};
use super::splitter::{LinguisticSplitter, PassThroughSplitter, SentenceSplitter, SplitterKind};
use super::timecode::parse_timecode_or_zero;
use crate::app_config::SplitterConfig;
use crate::errors::{AlignmentError, ModelError};

/// One sentence with its playback interval
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceEntry {
    /// 1-based position across the whole result, serialized as a string
    #[serde(with = "index_as_string")]
    pub index: usize,

    /// Start in seconds, rounded to milliseconds
    pub start: f64,

    /// End in seconds, rounded to milliseconds
    pub end: f64,

    /// Normalized sentence text
    pub text: String,
}

/// A block that produced no entries, and why
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedBlock {
    /// Ordinal from the source file
    pub sequence: usize,
    pub reason: AlignmentError,
}

/// Result of aligning one transcript
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignmentReport {
    pub entries: Vec<SentenceEntry>,
    pub skipped: Vec<SkippedBlock>,
}

impl AlignmentReport {
    /// Number of blocks that failed on timestamps rather than empty text
    pub fn timing_failures(&self) -> usize {
        self.skipped
            .iter()
            .filter(|s| !matches!(s.reason, AlignmentError::EmptyText))
            .count()
    }
}

/// Aligns transcripts using a configured set of sentence models
pub struct AlignmentPipeline {
    config: SplitterConfig,
    registry: ModelRegistry,
}

impl AlignmentPipeline {
    /// Create a pipeline backed by the built-in sentence models
    pub fn new(config: SplitterConfig) -> Self {
        let registry = ModelRegistry::builtin(&config.default_model);
        Self { config, registry }
    }

    /// Create a pipeline that loads sentence models through `loader`
    pub fn with_loader(config: SplitterConfig, loader: Arc<dyn ModelLoader>) -> Self {
        let registry = ModelRegistry::new(loader, &config.default_model);
        Self { config, registry }
    }

    pub fn config(&self) -> &SplitterConfig {
        &self.config
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Build the linguistic splitter for a language, honoring the default model fallback
    pub fn linguistic_splitter(&self, language: &str) -> Result<LinguisticSplitter, ModelError> {
        let model_id = self.config.model_for(language);
        let model = self.registry.resolve(model_id)?;
        Ok(LinguisticSplitter::new(model))
    }

    /// Build the splitter a caller asked for.
    ///
    /// When no sentence model can be loaded at all the pass-through splitter
    /// is used instead.
    pub fn splitter(&self, kind: SplitterKind, language: &str) -> Arc<dyn SentenceSplitter> {
        match kind {
            SplitterKind::PassThrough => Arc::new(PassThroughSplitter),
            SplitterKind::Linguistic => match self.linguistic_splitter(language) {
                Ok(splitter) => {
                    debug!("Splitting '{}' sentences with model '{}'", language, splitter.model_id());
                    Arc::new(splitter)
                }
                Err(e) => {
                    warn!("{}; keeping each block as one sentence", e);
                    Arc::new(PassThroughSplitter)
                }
            },
        }
    }

    /// Align raw transcript text into sentence entries
    pub fn align(&self, content: &str, kind: SplitterKind, language: &str) -> Vec<SentenceEntry> {
        self.align_with_report(content, kind, language).entries
    }

    /// Align raw transcript text, keeping a record of skipped blocks
    pub fn align_with_report(&self, content: &str, kind: SplitterKind, language: &str) -> AlignmentReport {
        let splitter = self.splitter(kind, language);
        align_with_splitter(content, splitter.as_ref())
    }
}

/// Align raw transcript text with an explicit splitter
pub fn align_with_splitter(content: &str, splitter: &dyn SentenceSplitter) -> AlignmentReport {
    let blocks = parse_blocks(content);
    align_blocks(&blocks, splitter)
}

/// Align already parsed blocks, numbering entries from 1 across all blocks
pub fn align_blocks(blocks: &[RawBlock], splitter: &dyn SentenceSplitter) -> AlignmentReport {
    let mut report = AlignmentReport::default();
    let mut next_index = 1;

    for block in blocks {
        let interval = match block_interval(block) {
            Ok(interval) => interval,
            Err(reason) => {
                warn!("Skipping block {}: {}", block.sequence, reason);
                report.skipped.push(SkippedBlock { sequence: block.sequence, reason });
                continue;
            }
        };

        let text = normalize_text(&block.text);
        if text.is_empty() {
            debug!("Skipping block {}: empty text", block.sequence);
            report.skipped.push(SkippedBlock {
                sequence: block.sequence,
                reason: AlignmentError::EmptyText,
            });
            continue;
        }

        let sentences = splitter.split(&text);
        let block_first = report.entries.len();

        // Sentences too short to survive millisecond rounding carry over into the next one
        let mut pending: Option<(f64, String)> = None;
        for sentence in allocate(interval, &sentences) {
            if sentence.text.is_empty() {
                continue;
            }

            let (raw_start, text) = match pending.take() {
                Some((raw_start, prefix)) => (raw_start, format!("{} {}", prefix, sentence.text)),
                None => (sentence.start, sentence.text),
            };

            let start = round_millis(raw_start);
            let end = round_millis(sentence.end);
            if end <= start {
                pending = Some((raw_start, text));
                continue;
            }

            report.entries.push(SentenceEntry {
                index: next_index,
                start,
                end,
                text,
            });
            next_index += 1;
        }

        // A trailing short sentence joins the block's last entry instead
        if let Some((_, text)) = pending {
            if report.entries.len() > block_first {
                if let Some(last) = report.entries.last_mut() {
                    last.text = format!("{} {}", last.text, text);
                }
            } else {
                debug!("Dropping sentence shorter than a millisecond in block {}", block.sequence);
            }
        }
    }

    debug!(
        "Aligned {} block(s) into {} sentence(s), skipped {}",
        blocks.len(),
        report.entries.len(),
        report.skipped.len()
    );

    report
}

/// Convert a block's timecodes, rejecting malformed or empty intervals
fn block_interval(block: &RawBlock) -> Result<TimedInterval, AlignmentError> {
    let (start, start_err) = parse_timecode_or_zero(&block.start);
    let (end, end_err) = parse_timecode_or_zero(&block.end);

    if let Some(err) = start_err.or(end_err) {
        return Err(err);
    }

    TimedInterval::new(start, end)
}

mod index_as_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(index: &usize, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&index.to_string())
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawIndex {
        Number(usize),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
        match RawIndex::deserialize(deserializer)? {
            RawIndex::Number(n) => Ok(n),
            RawIndex::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}
