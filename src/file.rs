//! Managed Playground Files
//!
//! A playground session is a set of named virtual files. Some are
//! user-authored, some are generated support files (bootstrap, dependency
//! shim, derived import map) that stay hidden from the editor tab set unless
//! the session opts into showing them.

use serde::{Deserialize, Serialize};

/// Main entry file that bootstraps the user's app.
pub const MAIN_FILE: &str = "PlaygroundMain.vue";
/// Application root file, the default active file.
pub const APP_FILE: &str = "App.vue";
/// Dependency shim for the UI library. Protected: never deletable.
pub const ELEMENT_PLUS_FILE: &str = "element-plus.js";
/// Pinia bootstrap support file.
pub const PINIA_FILE: &str = "pinia.js";
/// Generated merged import map, regenerated on every input change.
pub const IMPORT_MAP_FILE: &str = "import-map.json";
/// User-supplied import-map overlay, editable in the playground.
pub const USER_IMPORT_MAP_FILE: &str = "user-imports.json";

/// Reserved key carrying user options inside a serialized session. Skipped
/// when materializing files, so it must never be used as a filename.
pub const SERIALIZE_OPTIONS_KEY: &str = "_o";

/// Starter content for the application root file.
pub const WELCOME_CODE: &str = include_str!("templates/welcome.vue");
/// Bootstrap code for the main entry file.
pub const MAIN_CODE: &str = include_str!("templates/main.vue");
/// Dependency-shim template; `#EP_STYLE#` is replaced at generation time.
pub const ELEMENT_PLUS_CODE: &str = include_str!("templates/element-plus.js");
/// Pinia bootstrap code.
pub const PINIA_CODE: &str = include_str!("templates/pinia.js");

/// A single managed file in the playground session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaygroundFile {
    /// Unique key within the session.
    pub filename: String,
    /// Full source text.
    pub code: String,
    /// Hidden files are excluded from listings, exports, and the editor
    /// tab set. Used for generated/support content.
    pub hidden: bool,
}

impl PlaygroundFile {
    /// Create a visible file.
    pub fn new(filename: impl Into<String>, code: impl Into<String>) -> Self {
        PlaygroundFile {
            filename: filename.into(),
            code: code.into(),
            hidden: false,
        }
    }

    /// Create a file with explicit visibility.
    pub fn with_hidden(
        filename: impl Into<String>,
        code: impl Into<String>,
        hidden: bool,
    ) -> Self {
        PlaygroundFile {
            filename: filename.into(),
            code: code.into(),
            hidden,
        }
    }

    /// Create an empty visible file, as the "new tab" editor action does.
    pub fn empty(filename: impl Into<String>) -> Self {
        Self::new(filename, "")
    }
}
