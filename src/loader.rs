//! Where snapshots come from.

use std::{
    collections::HashMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use bzip2::read::MultiBzDecoder;

use crate::{
    config::RecordPolicy,
    error::{Error, Result},
    snapshot::Snapshot,
};

/// Resolves a source identifier into a loaded snapshot.
///
/// Implementations return [`Error::SourceNotFound`] when the identifier does
/// not name an existing source.
pub trait SnapshotSource {
    fn load(&self, source_id: &str, policy: RecordPolicy) -> Result<Snapshot>;
}

/// Reads RIB dumps from disk. Identifiers are file paths, resolved against an
/// optional base directory. Files ending in `.bz2` are decompressed on the fly.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    base_dir: Option<PathBuf>,
}

impl FileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn resolve(&self, source_id: &str) -> PathBuf {
        match &self.base_dir {
            Some(dir) => dir.join(source_id),
            None => PathBuf::from(source_id),
        }
    }
}

fn is_bzip2(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "bz2")
}

impl SnapshotSource for FileSource {
    fn load(&self, source_id: &str, policy: RecordPolicy) -> Result<Snapshot> {
        let path = self.resolve(source_id);
        if !path.is_file() {
            return Err(Error::SourceNotFound {
                source_id: source_id.to_string(),
            });
        }

        let file = File::open(&path).map_err(|e| Error::io(source_id, e))?;

        if is_bzip2(&path) {
            Snapshot::from_reader(source_id, BufReader::new(MultiBzDecoder::new(file)), policy)
        } else {
            Snapshot::from_reader(source_id, BufReader::new(file), policy)
        }
    }
}

/// Serves dumps held in memory, keyed by source identifier.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    dumps: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, source_id: impl Into<String>, dump: impl Into<String>) -> Self {
        self.insert(source_id, dump);
        self
    }

    pub fn insert(&mut self, source_id: impl Into<String>, dump: impl Into<String>) {
        self.dumps.insert(source_id.into(), dump.into());
    }
}

impl SnapshotSource for MemorySource {
    fn load(&self, source_id: &str, policy: RecordPolicy) -> Result<Snapshot> {
        let dump = self
            .dumps
            .get(source_id)
            .ok_or_else(|| Error::SourceNotFound {
                source_id: source_id.to_string(),
            })?;
        Snapshot::from_reader(source_id, dump.as_bytes(), policy)
    }
}
