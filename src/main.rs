// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use subalign::alignment::SentenceEntry;
use subalign::app_config::{self, Config};
use subalign::app_controller::{Controller, ExportOutcome};
use subalign::SplitterKind;

/// CLI Wrapper for SplitterKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliSplitterKind {
    PassThrough,
    Linguistic,
}

impl From<CliSplitterKind> for SplitterKind {
    fn from(cli_kind: CliSplitterKind) -> Self {
        match cli_kind {
            CliSplitterKind::PassThrough => SplitterKind::PassThrough,
            CliSplitterKind::Linguistic => SplitterKind::Linguistic,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align a transcript file into sentence entries
    Align {
        /// Transcript file (SRT)
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Sentence splitting strategy
        #[arg(short, long, value_enum, default_value = "linguistic")]
        splitter: CliSplitterKind,

        /// Language of the transcript, selects the sentence model
        #[arg(short, long, default_value = "english")]
        language: String,

        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Align an article from the transcript library
    Article {
        /// Language of the article
        language: String,

        /// Article name (audio file stem)
        name: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List the articles available for a language
    List {
        /// Language to list
        language: String,
    },

    /// Print the audio file path of an article
    Audio {
        /// Language of the article
        language: String,

        /// Article name
        name: String,
    },

    /// Align every article of a language into <name>.sentences.json files
    Export {
        /// Language to export
        language: String,

        /// Force overwrite of existing output files
        #[arg(short, long)]
        force_overwrite: bool,
    },

    /// Manage vocabulary notes
    Notes {
        #[command(subcommand)]
        command: NotesCommand,
    },

    /// Generate shell completions for subalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
enum NotesCommand {
    /// Print the notes of an article as JSON
    Get { article: String },

    /// Replace the notes of an article
    Set {
        article: String,

        /// Notes, in order
        notes: Vec<String>,
    },

    /// List articles that have notes
    List,

    /// Delete the notes of an article
    Delete { article: String },
}

/// subalign - sentence-level alignment for timed transcripts
///
/// Splits SRT transcripts into sentences and gives every sentence its own
/// share of the subtitle's time interval.
#[derive(Parser, Debug)]
#[command(name = "subalign")]
#[command(version)]
#[command(about = "Sentence-level alignment for timed transcripts")]
#[command(long_about = "subalign splits SRT transcripts into sentences and gives each sentence a share of its block's time.

EXAMPLES:
    subalign align lesson.srt                      # Align with the English sentence model
    subalign align -s pass-through lesson.srt      # One entry per subtitle block
    subalign article english lesson1               # Align assets/english/lesson1_merged.srt
    subalign export english -f                     # Re-export every English article
    subalign notes set lesson1 ephemeral ubiquitous
    subalign completions bash > subalign.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logger starts at trace so the runtime max level alone decides
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "subalign", &mut std::io::stdout());
        return Ok(());
    }

    let mut config = load_config(&cli.config_path)?;
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level.into();
    }
    config.validate().context("Configuration validation failed")?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    run_command(&controller, cli.command).await
}

async fn run_command(controller: &Controller, command: Commands) -> Result<()> {
    match command {
        Commands::Align { input_path, splitter, language, output, pretty } => {
            if !input_path.is_file() {
                return Err(anyhow!("Input file does not exist: {:?}", input_path));
            }
            let report = controller.align_file(&input_path, splitter.into(), &language).await?;
            let json = entries_to_json(&report.entries, pretty)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write output file: {:?}", path))?;
                    info!("Wrote {} sentence(s) to {:?}", report.entries.len(), path);
                }
                None => println!("{}", json),
            }
        }
        Commands::Article { language, name, pretty } => {
            let entries = controller.align_article(&language, &name).await?;
            println!("{}", entries_to_json(&entries, pretty)?);
        }
        Commands::List { language } => {
            for name in controller.library().list_articles(&language)? {
                println!("{}", name);
            }
        }
        Commands::Audio { language, name } => {
            let path = controller.library().audio_path(&language, &name)?;
            println!("{}", path.display());
        }
        Commands::Export { language, force_overwrite } => {
            let outcomes = controller.export_language(&language, force_overwrite).await?;
            if outcomes.iter().any(|o| matches!(o, ExportOutcome::Failed { .. })) {
                return Err(anyhow!("Some articles failed to export"));
            }
        }
        Commands::Notes { command } => run_notes(controller, command).await?,
        Commands::Completions { .. } => {}
    }

    Ok(())
}

async fn run_notes(controller: &Controller, command: NotesCommand) -> Result<()> {
    let notes = controller.notes()?;

    match command {
        NotesCommand::Get { article } => {
            let saved = notes.get_notes(&article).await?;
            println!("{}", serde_json::to_string(&saved)?);
        }
        NotesCommand::Set { article, notes: items } => {
            notes.save_notes(&article, &items).await?;
            info!("Saved {} note(s) for '{}'", items.len(), article);
        }
        NotesCommand::List => {
            for article in notes.list_articles().await? {
                println!("{}", article);
            }
        }
        NotesCommand::Delete { article } => {
            if !notes.delete_notes(&article).await? {
                warn!("No notes stored for '{}'", article);
            }
        }
    }

    Ok(())
}

fn entries_to_json(entries: &[SentenceEntry], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(entries)
    } else {
        serde_json::to_string(entries)
    };
    json.context("Failed to serialize sentence entries")
}

fn load_config(config_path: &str) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;
        return Ok(config);
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let config = Config::default();

    let config_json = serde_json::to_string_pretty(&config)
        .context("Failed to serialize default config to JSON")?;
    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;

    Ok(config)
}
