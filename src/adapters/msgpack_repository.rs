//! MessagePack implementation of the store repository.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use tracing::debug;

use crate::{Result, error::Error, ports::StoreRepository, store::StateStore};

/// Compact binary store files via rmp_serde.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
///
/// use ttt_weights::{adapters::MsgPackRepository, ports::StoreRepository, store::StateStore};
///
/// let repo = MsgPackRepository;
/// repo.save(&StateStore::new(), Path::new("weights.msgpack"))?;
/// let loaded = repo.load(Path::new("weights.msgpack"))?;
/// # Ok::<(), ttt_weights::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MsgPackRepository;

impl MsgPackRepository {
    pub fn new() -> Self {
        Self
    }
}

impl StoreRepository for MsgPackRepository {
    fn save(&self, store: &StateStore, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create file {path:?}"),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, &store.snapshot()).map_err(|e| {
            Error::SerializationContext {
                operation: "serialize store to MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;
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

        let store: StateStore = rmp_serde::decode::from_read(BufReader::new(file)).map_err(|e| {
            Error::SerializationContext {
                operation: "deserialize store from MessagePack".to_string(),
                message: e.to_string(),
            }
        })?;

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
    fn test_msgpack_roundtrip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("weights.msgpack");

        let mut store = StateStore::new();
        store.record_outcome(&Board::empty(), GameResult::XWon);
        store.record_outcome(&Board::parse("X--------").unwrap(), GameResult::Draw);

        let repo = MsgPackRepository::new();
        repo.save(&store, &file_path).expect("Failed to save");
        let loaded = repo.load(&file_path).expect("Failed to load");

        assert_eq!(loaded.snapshot(), store.snapshot());
    }

    #[test]
    fn test_load_nonexistent_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let result = MsgPackRepository::new().load(&temp_dir.path().join("missing.msgpack"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_load_garbage_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file_path = temp_dir.path().join("garbage.msgpack");
        std::fs::write(&file_path, b"not a store").unwrap();
        let result = MsgPackRepository::new().load(&file_path);
        assert!(matches!(result, Err(Error::SerializationContext { .. })));
    }

    #[test]
    fn test_save_to_invalid_path_returns_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("no_such_dir").join("weights.msgpack");
        assert!(MsgPackRepository::new().save(&StateStore::new(), &path).is_err());
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_save_reports_flush_failure() {
        // writes to /dev/full fail with ENOSPC once the buffer is flushed
        let path = Path::new("/dev/full");
        if !path.exists() {
            return;
        }
        let mut store = StateStore::new();
        store.record_outcome(&Board::empty(), GameResult::Draw);
        let result = MsgPackRepository::new().save(&store, path);
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
