//! Import Map Derivation
//!
//! The browser module loader resolves bare specifiers through an import map.
//! The playground derives one from two sources: builtin entries generated
//! from the current dependency versions, overlaid with a user-supplied map
//! parsed from a reserved editable file. User keys win on conflict.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// A module specifier → URL mapping consumed by the in-browser loader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMap {
    #[serde(default)]
    pub imports: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scopes: BTreeMap<String, BTreeMap<String, String>>,
}

impl ImportMap {
    /// Parse a user-supplied import map, tolerating bad input.
    ///
    /// Empty or malformed JSON yields the empty map: a half-typed overlay in
    /// the editor must never break import-map derivation. Parse failures are
    /// logged, not surfaced.
    pub fn from_user_json(code: &str) -> Self {
        let code = code.trim();
        if code.is_empty() {
            return ImportMap::default();
        }
        match serde_json::from_str(code) {
            Ok(map) => map,
            Err(err) => {
                warn!("ignoring malformed user import map: {}", err);
                ImportMap::default()
            }
        }
    }

    /// Render as pretty-printed JSON for the generated import-map file.
    pub fn to_json_pretty(&self) -> String {
        // BTreeMap keys serialize in a stable order; a struct of maps
        // cannot fail to serialize.
        serde_json::to_string_pretty(self).expect("import map serialization")
    }
}

/// Deterministic two-source overlay: `user` entries win over `builtin` for
/// the same key, in both `imports` and per-scope maps.
pub fn merge_import_map(builtin: &ImportMap, user: &ImportMap) -> ImportMap {
    let mut merged = builtin.clone();
    merged
        .imports
        .extend(user.imports.iter().map(|(k, v)| (k.clone(), v.clone())));
    for (scope, mappings) in &user.scopes {
        merged
            .scopes
            .entry(scope.clone())
            .or_default()
            .extend(mappings.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}
