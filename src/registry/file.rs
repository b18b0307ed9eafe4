//! File-backed registry: one JSON object on disk, keyed by bouquet id.
//!
//! Every `put` reloads the file, checks the id, inserts, and writes the whole
//! object back under a process-wide lock. Writes go to a sibling temp file
//! which is then renamed over the original, so a crash mid-write leaves the
//! previous contents intact. A missing file is an empty registry; a file that
//! does not parse is an error rather than silently treated as empty, since the
//! next write would otherwise discard every stored bouquet.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::{Registry, RegistryError};
use crate::bouquet::BouquetRecord;

type RecordMap = BTreeMap<String, BouquetRecord>;

#[derive(Debug)]
pub struct FileRegistry {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileRegistry {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn load(&self) -> Result<RecordMap, RegistryError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(RecordMap::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    fn save(&self, records: &RecordMap) -> Result<(), RegistryError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.temp_path();
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, records)?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        debug!(path = %self.path.display(), records = records.len(), "saved bouquet registry");
        Ok(())
    }
}

impl Registry for FileRegistry {
    fn put(&self, id: &str, record: BouquetRecord) -> Result<(), RegistryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load()?;
        if records.contains_key(id) {
            return Err(RegistryError::Conflict(id.to_owned()));
        }
        records.insert(id.to_owned(), record);
        self.save(&records)
    }

    fn get(&self, id: &str) -> Result<BouquetRecord, RegistryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.load()?;
        records.remove(id).ok_or_else(|| RegistryError::NotFound(id.to_owned()))
    }
}
