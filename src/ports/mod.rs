//! Ports (trait boundaries) for external dependencies.
//!
//! These traits are owned by the domain and implemented by adapters: policies
//! plug into the game loop, repositories persist the store, observers watch
//! tournaments.

pub mod observer;
pub mod policy;
pub mod repository;

pub use observer::Observer;
pub use policy::{Decision, Policy};
pub use repository::StoreRepository;
