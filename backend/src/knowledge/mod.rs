//! Knowledge base module
//!
//! Ordered trigger-phrase entries and the built-in EcoBot catalogs.

pub mod base;
pub mod catalog;

pub use base::{KnowledgeBase, KnowledgeEntry, KnowledgeError};
pub use catalog::{builtin, CatalogVariant};
