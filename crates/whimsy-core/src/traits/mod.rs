//! Core traits for the whimsy system
//!
//! This module defines the seams between the engine and its collaborators.
//!
//! - [`NameSource`]: Produce names from a word catalog
//! - [`StateStore`]: Persist generated entities between runs

pub mod name_source;
pub mod state_store;

pub use name_source::NameSource;
pub use state_store::{StateRecord, StateStore, StateStoreFactory};
