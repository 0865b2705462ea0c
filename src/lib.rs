//! natref - native reference viewer
//!
//! Loads native API datasets, flattens them into a searchable collection and
//! resolves permalinks to single entries.

pub mod config;
pub mod deeplink;
pub mod error;
pub mod fetch;
pub mod init;
pub mod loader;
pub mod natives;
pub mod signature;
pub mod state;
pub mod syntax;
pub mod view;

// Re-export commonly used types
pub use error::{NatrefError, Result};
pub use natives::{Criteria, Native, NativeIndex};
pub use state::{AppState, Selection};
