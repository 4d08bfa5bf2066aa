//! Adapters implementing domain ports.
//!
//! Infrastructure implementations of the storage port. Adapters depend on
//! the ports module, never the other way around.

pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;

use std::path::Path;

pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;

use crate::ports::StoreRepository;

/// File repository matching the path's extension: JSON for `.json`,
/// MessagePack for anything else
pub fn repository_for_path(path: &Path) -> Box<dyn StoreRepository> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Box::new(JsonRepository::new())
    } else {
        Box::new(MsgPackRepository::new())
    }
}
