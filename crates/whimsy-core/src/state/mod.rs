// # State Stores
//
// Backends that keep generated entities between engine calls:
// - `memory`: process lifetime only
// - `file`: JSON on disk, survives restarts

pub mod file;
pub mod memory;

pub use file::{FileStateStore, FileStateStoreFactory};
pub use memory::{MemoryStateStore, MemoryStateStoreFactory};
