use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::config::Settings;
use crate::errors::{LedgerError, Result};
use crate::ledger::Transaction;
use crate::utils::{app_data_dir, ensure_dir};

use super::{StorageBackend, CURRENCY_KEY, TRANSACTIONS_KEY};

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// File-per-blob JSON persistence rooted in the app data directory. Writes
/// go through a tmp file plus rename so a crash never leaves a truncated
/// blob behind.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    root: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        if root.exists() && !root.is_dir() {
            return Err(LedgerError::Storage(format!(
                "cannot prepare data directory {}: path exists and is not a directory",
                root.display()
            )));
        }
        ensure_dir(&root).map_err(|err| {
            LedgerError::Storage(format!(
                "cannot prepare data directory {}: {}",
                root.display(),
                err
            ))
        })?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, BLOB_EXTENSION))
    }

    fn read_blob<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&data)?))
    }

    fn write_blob<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        ensure_dir(&self.root)?;
        let path = self.blob_path(key);
        let json = serde_json::to_string_pretty(value)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load_transactions(&self) -> Result<Option<Vec<Transaction>>> {
        self.read_blob(TRANSACTIONS_KEY)
    }

    fn save_transactions(&self, transactions: &[Transaction]) -> Result<()> {
        self.write_blob(TRANSACTIONS_KEY, &transactions)
    }

    fn load_settings(&self) -> Result<Option<Settings>> {
        self.read_blob(CURRENCY_KEY)
    }

    fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.write_blob(CURRENCY_KEY, settings)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
