// Utils compartidos

pub mod storage;

pub use storage::{KeyValueStore, LocalStorage, StorageError};
