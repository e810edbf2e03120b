use super::{DataStore, Record};
use crate::error::{FolioError, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed store: one `<table>.json` per record type under `root`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.root.join(format!("{}.json", table))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FolioError::Io)?;
        }
        Ok(())
    }

    fn read_table(&self, table: &str) -> Result<BTreeMap<Uuid, Value>> {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path).map_err(FolioError::Io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| {
            FolioError::Store(format!("Corrupt table {}: {}", path.display(), e))
        })
    }

    fn write_table(&self, table: &str, rows: &BTreeMap<Uuid, Value>) -> Result<()> {
        self.ensure_dir()?;
        let path = self.table_path(table);
        let content = serde_json::to_string_pretty(rows).map_err(FolioError::Serialization)?;
        fs::write(&path, content).map_err(FolioError::Io)?;
        tracing::debug!(table, rows = rows.len(), "wrote {}", path.display());
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load<R: Record>(&self) -> Result<Vec<R>> {
        self.read_table(R::TABLE)?
            .into_values()
            .map(|v| serde_json::from_value(v).map_err(FolioError::Serialization))
            .collect()
    }

    fn upsert<R: Record>(&mut self, record: &R) -> Result<()> {
        let mut rows = self.read_table(R::TABLE)?;
        let value = serde_json::to_value(record).map_err(FolioError::Serialization)?;
        rows.insert(record.id(), value);
        self.write_table(R::TABLE, &rows)
    }

    fn remove<R: Record>(&mut self, id: &Uuid) -> Result<()> {
        let mut rows = self.read_table(R::TABLE)?;
        if rows.remove(id).is_none() {
            return Err(FolioError::NotFound(format!("{} {}", R::LABEL, id)));
        }
        self.write_table(R::TABLE, &rows)
    }
}
