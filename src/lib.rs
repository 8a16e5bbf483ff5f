//! Playground Store: Session State Management
//!
//! State layer for a browser-based code playground. Owns a virtual in-memory
//! file set, dependency version selections, a derived import map, and a
//! URL-safe compact session token codec for shareable links.

pub mod codec;
pub mod compiler;
pub mod config;
pub mod dependency;
pub mod error;
pub mod file;
pub mod import_map;
pub mod logging;
pub mod store;

pub use compiler::{Compiler, Confirmer, Diagnostic, ModuleLoader, RuntimeModule};
pub use config::{Initial, StoreConfig, UserOptions};
pub use dependency::{VersionKey, Versions};
pub use error::{DecodeError, StoreError};
pub use file::PlaygroundFile;
pub use import_map::ImportMap;
pub use logging::{init_logging, LoggingConfig};
pub use store::PlaygroundStore;
