use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{instrument, warn};

use crate::batch::BatchRunner;
use crate::model::{Entry, InsertResult};
use crate::supabase::WaitlistService;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("Error reading file: expected a JSON array of entries")]
    NotAnArray,
    #[error("Error reading file: record {index}: {source}")]
    InvalidRecord {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Error reading file: {0}")]
    Io(#[from] io::Error),
}

/// Read a JSON array of entries. Any bad record rejects the whole file.
pub async fn load_entries(path: &Path) -> Result<Vec<Entry>, LoadError> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::NotFound(path.to_path_buf()))
        }
        Err(err) => return Err(err.into()),
    };

    let items = match serde_json::from_str::<Value>(&content).map_err(LoadError::InvalidJson)? {
        Value::Array(items) => items,
        _ => return Err(LoadError::NotAnArray),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value::<Entry>(item)
                .map_err(|source| LoadError::InvalidRecord { index, source })
        })
        .collect()
}

/// Load entries from `path` and push them. Returns no results if the file
/// cannot be loaded; nothing is inserted in that case.
#[instrument(skip(service, runner))]
pub async fn push_from_json(
    path: &Path,
    service: &dyn WaitlistService,
    runner: &BatchRunner,
) -> Vec<InsertResult> {
    match load_entries(path).await {
        Ok(entries) => runner.run(service, &entries).await,
        Err(err) => {
            println!("{}", err);
            warn!(path = %path.display(), %err, "failed to load entries");
            Vec::new()
        }
    }
}
