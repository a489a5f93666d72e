// Declare modules
pub mod data;
pub mod error;
pub mod index;
pub mod logic;
pub mod models;
pub mod parse;
pub mod progress;
pub mod relations;

// Re-export key types for easier use
pub use error::{OewnLogicError, Result};
pub use index::LexiconIndex;
pub use logic::Var;
pub use models::{
    LinkEdge, LinkType, PartOfSpeech, Synset, SynsetId, SynsetRef, WordnetDatabase,
};
pub use relations::{Relations, Value};

use crate::progress::{ProgressCallback, ProgressUpdate, Reporter};
use log::info;
use rand::seq::IteratorRandom;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

// --- WordNet Struct ---

/// Options for loading WordNet data.
#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    /// Optional path to a specific dataset file to use.
    /// If None, the default location based on ProjectDirs will be used,
    /// downloading the dataset there first when it is missing.
    pub data_path: Option<PathBuf>,
    /// Force a fresh download of the dataset, ignoring any cached copy.
    /// Only meaningful when `data_path` is None.
    pub force_download: bool,
}

/// The main WordNet interface: an immutable index snapshot plus the
/// relation predicates querying it.
#[derive(Clone)] // Clone is cheap due to Arc
pub struct WordNet {
    index: Arc<LexiconIndex>,
}

impl WordNet {
    /// Loads the WordNet data using default options (cached dataset path).
    ///
    /// Downloads the dataset on first use.
    pub async fn load() -> Result<Self> {
        Self::load_with_options(LoadOptions::default(), None).await
    }

    /// Loads the WordNet data with specific options.
    pub async fn load_with_options(
        options: LoadOptions,
        progress: Option<ProgressCallback>,
    ) -> Result<Self> {
        let reporter = Reporter::new(progress);

        // 1. Locate the dataset file, downloading into the cache if needed
        let data_path = match options.data_path {
            Some(path) => {
                info!("Using provided dataset path: {:?}", path);
                if !path.exists() {
                    return Err(OewnLogicError::DataFileNotFound(
                        path.display().to_string(),
                    ));
                }
                path
            }
            None => data::ensure_data(&reporter, options.force_download).await?,
        };

        // 2. Read and parse the raw dataset
        info!("Reading dataset file: {:?}", data_path);
        let json_content = data::read_dataset(&data_path).await?;
        let database = parse::parse_database(json_content).await?;

        // 3. Build the in-memory index snapshot
        let stage_desc = "Indexing dataset".to_string();
        reporter.report(ProgressUpdate::new_stage(stage_desc.clone(), Some(1)));
        let index = LexiconIndex::build(database);
        reporter.report(ProgressUpdate {
            stage_description: stage_desc,
            current_item: 1,
            total_items: Some(1),
            message: Some("Index ready.".to_string()),
        });

        info!(
            "WordNet ready: {} synsets, {} links.",
            index.synset_count(),
            index.link_count()
        );

        Ok(WordNet {
            index: Arc::new(index),
        })
    }

    /// Builds an instance directly from an already parsed database,
    /// bypassing the cache and loader entirely. Intended for synthetic
    /// datasets and embedding.
    pub fn from_database(database: WordnetDatabase) -> Self {
        WordNet {
            index: Arc::new(LexiconIndex::build(database)),
        }
    }

    /// The relation predicates bound to this instance's index snapshot.
    ///
    /// Reloading a dataset means loading a new `WordNet` and taking fresh
    /// `Relations` from it; snapshots are never mutated in place.
    pub fn relations(&self) -> Relations {
        Relations::new(Arc::clone(&self.index))
    }

    /// Direct read access to the underlying tables.
    pub fn index(&self) -> &LexiconIndex {
        &self.index
    }

    /// Picks a uniformly random synset id, or None for an empty dataset.
    pub fn random_synset_id(&self) -> Option<SynsetId> {
        let mut rng = rand::rng();
        self.index.synset_ids().choose(&mut rng)
    }

    /// The default dataset cache location.
    pub fn default_data_path() -> Result<PathBuf> {
        data::default_data_path()
    }

    /// Clears the cached dataset file.
    ///
    /// If `data_path_override` is `Some`, it attempts to delete that specific file.
    /// If `data_path_override` is `None`, it deletes the default cached dataset.
    pub fn clear_data(data_path_override: Option<PathBuf>) -> Result<()> {
        match data_path_override {
            Some(path) => {
                if path.exists() {
                    info!("Removing specified dataset file: {:?}", path);
                    fs::remove_file(&path)?;
                } else {
                    info!("Dataset file not found, nothing to clear: {:?}", path);
                }
                Ok(())
            }
            None => data::remove_cached_data(),
        }
    }
}
