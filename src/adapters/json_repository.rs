//! JSON implementation of the store repository, for files meant to be read.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::{Result, error::Error, ports::StoreRepository, store::StateStore};

/// Pretty-printed JSON store files
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRepository;

impl JsonRepository {
    pub fn new() -> Self {
        Self
    }
}

impl StoreRepository for JsonRepository {
    fn save(&self, store: &StateStore, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &store.snapshot())?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush file {path:?}"),
            source,
        })?;

        debug!(path = %path.display(), states = store.len(), "saved store");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<StateStore> {
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open file {path:?}"),
            source,
        })?;
        let store: StateStore = serde_json::from_reader(BufReader::new(file))?;

        debug!(path = %path.display(), states = store.len(), "loaded store");
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::tictactoe::{Board, GameResult};

    #[test]
    fn test_json_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("weights.json");

        let mut store = StateStore::with_default_weight(0.5);
        store.record_outcome(&Board::parse("----X----").unwrap(), GameResult::OWon);

        let repo = JsonRepository::new();
        repo.save(&store, &file_path).unwrap();

        let text = std::fs::read_to_string(&file_path).unwrap();
        assert!(text.contains("\"----X----\""));

        let loaded = repo.load(&file_path).unwrap();
        assert_eq!(loaded.snapshot(), store.snapshot());
        assert_eq!(loaded.default_weight(), 0.5);
    }

    #[test]
    fn test_load_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bad.json");
        std::fs::write(&file_path, "{\"version\": 1").unwrap();
        assert!(matches!(
            JsonRepository::new().load(&file_path),
            Err(Error::Serialization(_))
        ));
    }
}
