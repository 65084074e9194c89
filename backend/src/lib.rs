//! EcoBot Backend Library
//!
//! Rule-based chat widget for the ocean-acidification site: knowledge base,
//! matcher, typing delay, per-widget sessions and the optional completion
//! service. The HTTP binary is in `src/main.rs`; the desktop widget links
//! this library directly.

pub mod api;
pub mod chat;
pub mod completion;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod knowledge;
pub mod matcher;
/// Application state wiring
///
/// Builds the knowledge base, credential store and widget registry from `Config`.
pub mod state;
pub mod typing;
