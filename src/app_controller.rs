use anyhow::{Context, Result, anyhow};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::alignment::{AlignmentPipeline, AlignmentReport, SentenceEntry, SplitterKind};
use crate::app_config::Config;
use crate::library::{sentences_output_path, TranscriptLibrary};
use crate::notes::{DatabaseConnection, NotesRepository};

// @module: Application controller for transcript alignment

/// Outcome of exporting one article
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// Aligned and written
    Written { name: String, entries: usize, skipped_blocks: usize },
    /// Output already existed and overwriting was not requested
    Skipped { name: String },
    /// Alignment or writing failed
    Failed { name: String, error: String },
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Shared pipeline, sentence models are loaded once per controller
    pipeline: Arc<AlignmentPipeline>,

    library: TranscriptLibrary,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let pipeline = Arc::new(AlignmentPipeline::new(config.splitter.clone()));
        Ok(Self::with_pipeline(config, pipeline))
    }

    /// Create a controller around an existing pipeline
    pub fn with_pipeline(config: Config, pipeline: Arc<AlignmentPipeline>) -> Self {
        let library = TranscriptLibrary::new(config.clone());
        Self {
            config,
            pipeline,
            library,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn library(&self) -> &TranscriptLibrary {
        &self.library
    }

    /// Splitting strategy configured for a language
    pub fn splitter_kind_for(&self, language: &str) -> SplitterKind {
        self.config
            .language(language)
            .map(|l| l.splitter)
            .unwrap_or_default()
    }

    /// Open the notes repository configured for this controller
    pub fn notes(&self) -> Result<NotesRepository> {
        let db = match &self.config.notes_database {
            Some(path) => DatabaseConnection::new(path)?,
            None => DatabaseConnection::new_default()?,
        };
        Ok(NotesRepository::new(db))
    }

    /// Align a transcript file on disk
    pub async fn align_file(&self, path: &Path, kind: SplitterKind, language: &str) -> Result<AlignmentReport> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read transcript: {:?}", path))?;

        let report = self.align_text(content, kind, language).await?;
        log_report(&path.display().to_string(), &report);
        Ok(report)
    }

    /// Align an article from the library with its language's configured splitter
    pub async fn align_article(&self, language: &str, name: &str) -> Result<Vec<SentenceEntry>> {
        let content = self.library.read_transcript(language, name).await?;
        let kind = self.splitter_kind_for(language);

        let report = self.align_text(content, kind, language).await?;
        log_report(name, &report);
        Ok(report.entries)
    }

    /// Run the pipeline off the async runtime
    async fn align_text(&self, content: String, kind: SplitterKind, language: &str) -> Result<AlignmentReport> {
        let pipeline = self.pipeline.clone();
        let language = language.to_string();

        tokio::task::spawn_blocking(move || pipeline.align_with_report(&content, kind, &language))
            .await
            .context("Alignment task panicked")
    }

    /// Align every article of a language and write "<name>.sentences.json" beside it
    pub async fn export_language(&self, language: &str, force_overwrite: bool) -> Result<Vec<ExportOutcome>> {
        let start_time = std::time::Instant::now();
        let dir = self.library.language_dir(language)?;
        let articles = self.library.list_articles(language)?;

        if articles.is_empty() {
            warn!("No articles found for '{}' in {:?}", language, dir);
            return Ok(Vec::new());
        }

        info!("Exporting {} article(s) for '{}'", articles.len(), language);

        let progress = ProgressBar::new(articles.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .map_err(|e| anyhow!("Invalid progress template: {}", e))?
                .progress_chars("#>-"),
        );

        let concurrency = self.config.max_concurrent_alignments.max(1);
        let outcomes: Vec<ExportOutcome> = stream::iter(articles)
            .map(|name| {
                let dir = dir.clone();
                let progress = progress.clone();
                async move {
                    let outcome = self.export_article(language, &name, &dir, force_overwrite).await;
                    progress.set_message(name);
                    progress.inc(1);
                    outcome
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        progress.finish_and_clear();

        let written = outcomes.iter().filter(|o| matches!(o, ExportOutcome::Written { .. })).count();
        let failed = outcomes.iter().filter(|o| matches!(o, ExportOutcome::Failed { .. })).count();
        info!(
            "Exported {} of {} article(s) for '{}' in {:.1}s ({} failed)",
            written,
            outcomes.len(),
            language,
            start_time.elapsed().as_secs_f64(),
            failed
        );

        Ok(outcomes)
    }

    async fn export_article(&self, language: &str, name: &str, dir: &Path, force_overwrite: bool) -> ExportOutcome {
        let output_path = sentences_output_path(dir, name);
        if output_path.exists() && !force_overwrite {
            debug!("Skipping '{}', output already exists (use -f to force overwrite)", name);
            return ExportOutcome::Skipped { name: name.to_string() };
        }

        match self.export_article_inner(language, name, &output_path).await {
            Ok((entries, skipped_blocks)) => ExportOutcome::Written {
                name: name.to_string(),
                entries,
                skipped_blocks,
            },
            Err(e) => {
                error!("Failed to export '{}': {:#}", name, e);
                ExportOutcome::Failed {
                    name: name.to_string(),
                    error: format!("{:#}", e),
                }
            }
        }
    }

    async fn export_article_inner(&self, language: &str, name: &str, output_path: &Path) -> Result<(usize, usize)> {
        let content = self.library.read_transcript(language, name).await?;
        let kind = self.splitter_kind_for(language);
        let report = self.align_text(content, kind, language).await?;

        let json = serde_json::to_string_pretty(&report.entries).context("Failed to serialize sentences")?;
        tokio::fs::write(output_path, json)
            .await
            .with_context(|| format!("Failed to write {:?}", output_path))?;

        Ok((report.entries.len(), report.skipped.len()))
    }
}

fn log_report(source: &str, report: &AlignmentReport) {
    if report.timing_failures() > 0 {
        warn!(
            "{}: {} block(s) skipped because of bad timing",
            source,
            report.timing_failures()
        );
    }
    debug!(
        "{}: {} sentence(s), {} block(s) skipped",
        source,
        report.entries.len(),
        report.skipped.len()
    );
}
