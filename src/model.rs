//! Model loading and the process-wide model pool.
//!
//! Loading a tagging model is expensive, so loaded models are memoized by
//! path. A [`ModelPool`] hands out the same `Arc` for every request of a path
//! and runs the loader at most once per path, even when several threads ask
//! for it at the same time.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;
use tracing::{error, info};

use crate::dictionary::CoreDictionary;
use crate::error::{Result, SegmentError};
use crate::tagger::{LongestMatchTagger, Tagger};

/// Produces a tagger from a model path
pub trait ModelLoader: Send + Sync {
    /// Load the model at `path`
    fn load(&self, path: &Path) -> io::Result<Arc<dyn Tagger>>;
}

/// Loads a [`LongestMatchTagger`] from a dictionary file
#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryModelLoader;

impl ModelLoader for DictionaryModelLoader {
    fn load(&self, path: &Path) -> io::Result<Arc<dyn Tagger>> {
        let content = fs::read_to_string(path)?;
        let dictionary = CoreDictionary::from_text(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        if dictionary.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "dictionary has no entries",
            ));
        }
        Ok(Arc::new(LongestMatchTagger::new(dictionary)))
    }
}

type Slot = Arc<OnceCell<Arc<dyn Tagger>>>;

/// Loaded models keyed by path
#[derive(Default)]
pub struct ModelPool {
    slots: Mutex<HashMap<PathBuf, Slot>>,
}

static GLOBAL_POOL: Lazy<ModelPool> = Lazy::new(ModelPool::new);

impl ModelPool {
    /// Create an empty pool
    pub fn new() -> Self {
        ModelPool::default()
    }

    /// The pool shared by the whole process
    pub fn global() -> &'static ModelPool {
        &GLOBAL_POOL
    }

    /// Get the model for `path`, loading it with `loader` on first use.
    ///
    /// A failed load drops the slot, so a later call retries.
    pub fn get_or_load(&self, path: &Path, loader: &dyn ModelLoader) -> Result<Arc<dyn Tagger>> {
        let slot = {
            let mut slots = self.slots.lock();
            Arc::clone(slots.entry(path.to_path_buf()).or_default())
        };

        if let Some(model) = slot.get() {
            return Ok(Arc::clone(model));
        }

        let loaded = slot.get_or_try_init(|| {
            info!(path = %path.display(), "loading segmentation model");
            let start = Instant::now();
            match loader.load(path) {
                Ok(model) => {
                    info!(
                        path = %path.display(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "segmentation model loaded"
                    );
                    Ok(model)
                }
                Err(source) => {
                    let elapsed_ms = start.elapsed().as_millis();
                    error!(
                        path = %path.display(),
                        elapsed_ms = elapsed_ms as u64,
                        error = %source,
                        "failed to load segmentation model"
                    );
                    Err(SegmentError::ModelLoad {
                        path: path.to_path_buf(),
                        elapsed_ms,
                        source,
                    })
                }
            }
        });

        match loaded {
            Ok(model) => Ok(Arc::clone(model)),
            Err(e) => {
                self.discard_empty_slot(path, &slot);
                Err(e)
            }
        }
    }

    /// Remove `slot` from the map unless another caller has filled it
    fn discard_empty_slot(&self, path: &Path, slot: &Slot) {
        let mut slots = self.slots.lock();
        let stale = slots
            .get(path)
            .map_or(false, |current| Arc::ptr_eq(current, slot) && current.get().is_none());
        if stale {
            slots.remove(path);
        }
    }

    /// Check whether a model for `path` is already loaded
    pub fn contains(&self, path: &Path) -> bool {
        self.slots
            .lock()
            .get(path)
            .map_or(false, |slot| slot.get().is_some())
    }

    /// Number of loaded models
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    /// Check if no model is loaded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
