// State management module
// Wires configuration, knowledge base, credentials and open widgets together

pub mod app_state;

pub use app_state::{spawn_idle_sweeper, AppState, SharedState};
