/*!
 * Full app lifecycle tests: library, export and notes through the controller
 */

use anyhow::Result;
use std::fs;
use std::path::Path;

use subalign::alignment::{SentenceEntry, SplitterKind};
use subalign::app_config::{Config, LanguageConfig};
use subalign::app_controller::{Controller, ExportOutcome};
use crate::common;

fn controller_for(root: &Path) -> Result<Controller> {
    let mut config = Config::default();
    config.library_root = root.to_path_buf();
    config.notes_database = Some(root.join("data").join("notes.db"));

    let mut german = LanguageConfig::new("german", "deutsch");
    german.splitter = SplitterKind::PassThrough;
    config.languages.push(german);

    config.validate()?;
    Controller::with_config(config)
}

fn sorted_names(outcomes: &[ExportOutcome]) -> Vec<String> {
    let mut names: Vec<String> = outcomes
        .iter()
        .map(|o| match o {
            ExportOutcome::Written { name, .. }
            | ExportOutcome::Skipped { name }
            | ExportOutcome::Failed { name, .. } => name.clone(),
        })
        .collect();
    names.sort();
    names
}

/// Test aligning a library article with each language's splitter
#[tokio::test]
async fn test_alignArticle_shouldUseLanguageSplitter() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_article(&temp_dir.path().join("english"), "lesson1", common::SAMPLE_TRANSCRIPT)?;
    common::create_test_article(&temp_dir.path().join("deutsch"), "lektion1", common::SAMPLE_TRANSCRIPT)?;
    let controller = controller_for(temp_dir.path())?;

    let english = controller.align_article("en", "lesson1").await?;
    let german = controller.align_article("german", "lektion1").await?;

    assert_eq!(controller.splitter_kind_for("english"), SplitterKind::Linguistic);
    assert_eq!(controller.splitter_kind_for("de"), SplitterKind::PassThrough);
    assert_eq!(english.len(), 4);
    assert_eq!(german.len(), 3);
    assert!(controller.align_article("english", "missing").await.is_err());
    assert!(controller.align_article("french", "lesson1").await.is_err());
    Ok(())
}

/// Test exporting a language writes one JSON file per article
#[tokio::test]
async fn test_exportLanguage_shouldWriteSentenceFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let english = temp_dir.path().join("english");
    common::create_test_article(&english, "lesson1", common::SAMPLE_TRANSCRIPT)?;
    common::create_test_article(&english, "lesson2", "1\n00:00:00,000 --> 00:00:02,000\nShort one.\n")?;
    common::create_test_file(&english, "lesson3.mp3", "ID3")?;
    let controller = controller_for(temp_dir.path())?;

    let outcomes = controller.export_language("english", false).await?;

    assert_eq!(sorted_names(&outcomes), vec!["lesson1", "lesson2", "lesson3"]);
    assert!(outcomes.contains(&ExportOutcome::Written {
        name: "lesson1".to_string(),
        entries: 4,
        skipped_blocks: 0,
    }));
    assert!(outcomes
        .iter()
        .any(|o| matches!(o, ExportOutcome::Failed { name, .. } if name == "lesson3")));

    let written: Vec<SentenceEntry> =
        serde_json::from_str(&fs::read_to_string(english.join("lesson2.sentences.json"))?)?;
    assert_eq!(written.len(), 1);
    assert_eq!(written[0].text, "Short one.");
    assert!(!english.join("lesson3.sentences.json").exists());
    Ok(())
}

/// Test that existing exports are kept unless overwriting is forced
#[tokio::test]
async fn test_exportLanguage_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let english = temp_dir.path().join("english");
    common::create_test_article(&english, "lesson1", common::SAMPLE_TRANSCRIPT)?;
    common::create_test_file(&english, "lesson1.sentences.json", "[]")?;
    let controller = controller_for(temp_dir.path())?;

    let outcomes = controller.export_language("english", false).await?;
    assert_eq!(outcomes, vec![ExportOutcome::Skipped { name: "lesson1".to_string() }]);
    assert_eq!(fs::read_to_string(english.join("lesson1.sentences.json"))?, "[]");

    let outcomes = controller.export_language("english", true).await?;
    assert!(matches!(outcomes[0], ExportOutcome::Written { entries: 4, .. }));
    assert_ne!(fs::read_to_string(english.join("lesson1.sentences.json"))?, "[]");
    Ok(())
}

/// Test exporting an empty language directory
#[tokio::test]
async fn test_exportLanguage_withNoArticles_shouldReturnEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    fs::create_dir_all(temp_dir.path().join("english"))?;
    let controller = controller_for(temp_dir.path())?;

    assert!(controller.export_language("english", false).await?.is_empty());
    assert!(controller.export_language("french", false).await.is_err());
    Ok(())
}

/// Test the notes store through the controller
#[tokio::test]
async fn test_notes_saveGetDelete_shouldPersistPerArticle() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller_for(temp_dir.path())?;
    let notes = controller.notes()?;

    assert!(notes.get_notes("lesson1").await?.is_empty());

    notes.save_notes("lesson1", &["dawn".to_string(), "readings".to_string()]).await?;
    notes.save_notes("lesson1", &["team".to_string()]).await?;
    notes.save_notes("lesson2", &[]).await?;

    // A second repository over the same file sees the saved records
    let reopened = controller.notes()?;
    assert_eq!(reopened.get_notes("lesson1").await?, vec!["team"]);
    assert_eq!(reopened.list_articles().await?, vec!["lesson1", "lesson2"]);

    assert!(reopened.delete_notes("lesson1").await?);
    assert!(!reopened.delete_notes("lesson1").await?);
    assert!(temp_dir.path().join("data").join("notes.db").exists());
    Ok(())
}

/// Test a controller built on the default configuration
#[test]
fn test_newForTest_shouldUseDefaultConfig() -> Result<()> {
    let controller = Controller::new_for_test()?;

    assert_eq!(controller.config().languages[0].name, "english");
    assert_eq!(controller.splitter_kind_for("english"), SplitterKind::Linguistic);
    assert_eq!(controller.splitter_kind_for("unknown"), SplitterKind::Linguistic);
    Ok(())
}
