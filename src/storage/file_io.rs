//! File I/O utilities with atomic writes
//!
//! Documents are JSON or YAML depending on the file extension. Writes go to
//! a temp file first so a failed write never leaves a half-written document.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{BudgetError, BudgetResult};

/// Serialization format of a document on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` and `.yml` are YAML, everything else is JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read a document, returning an error if the file doesn't exist
pub fn read_document<T, P>(path: P) -> BudgetResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(BudgetError::Storage(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let file = File::open(path)
        .map_err(|e| BudgetError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    let reader = BufReader::new(file);

    let parsed = match DocumentFormat::from_path(path) {
        DocumentFormat::Json => serde_json::from_reader(reader).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_reader(reader).map_err(|e| e.to_string()),
    };
    parsed.map_err(|e| BudgetError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a document atomically (write to temp, then rename)
pub fn write_atomic<T, P>(path: P, data: &T) -> BudgetResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target, so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let file = File::create(&temp_path)
        .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    let written = match DocumentFormat::from_path(path) {
        DocumentFormat::Json => serde_json::to_writer_pretty(&mut writer, data).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::to_writer(&mut writer, data).map_err(|e| e.to_string()),
    };
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(BudgetError::Storage(format!("Failed to serialize data: {}", e)));
    }

    writer
        .flush()
        .map_err(|e| BudgetError::Storage(format!("Failed to flush data: {}", e)))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        BudgetError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    tracing::debug!(path = %path.display(), "wrote document");
    Ok(())
}
