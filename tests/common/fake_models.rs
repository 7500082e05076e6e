/*!
 * Fake sentence models and loaders for tests
 */

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use subalign::alignment::{ModelLoader, SentenceModel, SentenceSplitter};
use subalign::errors::ModelError;

/// Splits on whitespace, one "sentence" per word
pub struct WordSplitter;

impl SentenceSplitter for WordSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }
}

/// Model that splits on '|' so tests control boundaries exactly
pub struct PipeModel {
    id: String,
}

impl PipeModel {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl SentenceModel for PipeModel {
    fn id(&self) -> &str {
        &self.id
    }

    fn sentences<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.split('|').collect()
    }
}

/// Loader that serves `PipeModel`s, counts loads and fails for chosen ids
pub struct CountingLoader {
    failing: HashSet<String>,
    loads: AtomicUsize,
}

impl CountingLoader {
    pub fn new(failing: &[&str]) -> Self {
        Self {
            failing: failing.iter().map(|s| s.to_string()).collect(),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ModelLoader for CountingLoader {
    fn load(&self, model_id: &str) -> Result<Arc<dyn SentenceModel>, ModelError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(model_id) {
            return Err(ModelError::ModelUnavailable {
                model: model_id.to_string(),
                reason: "failing on purpose".to_string(),
            });
        }
        Ok(Arc::new(PipeModel::new(model_id)))
    }
}

/// Loader whose "slow" model blocks until the test releases it
pub struct GatedLoader {
    release: Mutex<Receiver<()>>,
}

impl GatedLoader {
    pub fn new(release: Receiver<()>) -> Self {
        Self {
            release: Mutex::new(release),
        }
    }
}

impl ModelLoader for GatedLoader {
    fn load(&self, model_id: &str) -> Result<Arc<dyn SentenceModel>, ModelError> {
        if model_id == "slow" {
            let release = self.release.lock().expect("release lock poisoned");
            let _ = release.recv_timeout(Duration::from_secs(5));
        }
        Ok(Arc::new(PipeModel::new(model_id)))
    }
}
