//! # presence-store
//!
//! Storage layer implementing the `PresenceStore` trait from `presence-core`.
//!
//! The crate ships an in-memory store backed by `DashMap`, suitable for
//! single-process grids and for tests. Production deployments substitute
//! their own implementation of the trait; the registry service only ever
//! sees `Arc<dyn PresenceStore>`.

pub mod stores;

// Re-export commonly used types
pub use stores::MemoryPresenceStore;
