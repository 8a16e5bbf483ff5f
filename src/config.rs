//! Configuration Surface
//!
//! Initial inputs for a playground session and the user options that ride
//! along inside serialized sessions. All fields are optional with the
//! defaults the store applies itself; serde names stay camelCase so tokens
//! shared from older playground builds keep round-tripping.

use crate::dependency::Versions;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// User-tunable options persisted with a session under the reserved `_o` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOptions {
    /// Stylesheet URL override for the UI-library shim; `#VERSION#` inside
    /// it is replaced with the selected version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_source: Option<String>,

    /// Show generated/support files in listings and the editor tab set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_hidden: Option<bool>,

    /// Open the output pane on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_output: Option<bool>,

    /// Open the compile-output pane on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_compile_output: Option<bool>,

    /// Layout selector for the embedding UI.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<String>,
}

impl UserOptions {
    /// Overlay `other` on `self`: set fields in `other` win. Used to merge
    /// options persisted in a session over caller-provided defaults.
    pub fn merged_with(&self, other: &UserOptions) -> UserOptions {
        UserOptions {
            style_source: other.style_source.clone().or_else(|| self.style_source.clone()),
            show_hidden: other.show_hidden.or(self.show_hidden),
            show_output: other.show_output.or(self.show_output),
            show_compile_output: other.show_compile_output.or(self.show_compile_output),
            layout: other.layout.clone().or_else(|| self.layout.clone()),
        }
    }

    pub fn show_hidden(&self) -> bool {
        self.show_hidden.unwrap_or(false)
    }

    pub fn show_output(&self) -> bool {
        self.show_output.unwrap_or(false)
    }
}

/// Initial inputs for constructing a session.
#[derive(Debug, Clone, Default)]
pub struct Initial {
    /// Serialized session token from a shared link, if any.
    pub serialized_state: Option<String>,
    /// Starting version selections; defaults to "latest" for everything.
    pub versions: Option<Versions>,
    /// Default user options, overridden by any persisted in the token.
    pub user_options: Option<UserOptions>,
}

/// Root configuration for embedders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
}
