/*!
 * Subtitle time-alignment engine.
 *
 * Turns SRT-style transcripts into sentence-level entries whose intervals
 * are carved out of their block's interval in proportion to sentence length.
 *
 * - `timecode`: `HH:MM:SS,mmm` conversion
 * - `parser`: raw block scanning
 * - `normalizer`: whitespace collapsing
 * - `model`: sentence boundary models and their registry
 * - `splitter`: pass-through and linguistic splitters
 * - `allocator`: proportional interval division
 * - `pipeline`: the composition of all of the above
 */

pub mod allocator;
pub mod model;
pub mod normalizer;
pub mod parser;
pub mod pipeline;
pub mod splitter;
pub mod timecode;

use once_cell::sync::Lazy;

use crate::app_config::SplitterConfig;

pub use allocator::{allocate, AllocatedSentence, TimedInterval};
pub use model::{BuiltinModelLoader, ModelLoader, ModelRegistry, RuleBasedModel, SentenceModel};
pub use normalizer::normalize_text;
pub use parser::{parse_blocks, RawBlock};
pub use pipeline::{
    align_blocks, align_with_splitter, AlignmentPipeline, AlignmentReport, SentenceEntry, SkippedBlock,
};
pub use splitter::{LinguisticSplitter, PassThroughSplitter, SentenceSplitter, SplitterKind};
pub use timecode::{format_timecode, parse_timecode};

static DEFAULT_PIPELINE: Lazy<AlignmentPipeline> =
    Lazy::new(|| AlignmentPipeline::new(SplitterConfig::default()));

/// Align a transcript with the default sentence model configuration
pub fn align(content: &str, kind: SplitterKind, language: &str) -> Vec<SentenceEntry> {
    DEFAULT_PIPELINE.align(content, kind, language)
}
