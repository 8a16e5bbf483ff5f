//! Dependency Versions and CDN Links
//!
//! Tracks the version selections for the playground's named dependencies and
//! generates the builtin import-map entries and runtime module URLs from
//! them. Version strings are whatever the CDN accepts ("latest", "2.4.1",
//! a dist-tag, ...); no resolution happens here.

use crate::import_map::ImportMap;
use serde::{Deserialize, Serialize};

const JSDELIVR: &str = "https://cdn.jsdelivr.net/npm";
const UNPKG: &str = "https://unpkg.com";

/// The fixed set of dependencies a session tracks versions for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VersionKey {
    /// The core framework. Changing it requires reloading the runtime
    /// compiler module, so updates are asynchronous.
    Vue,
    /// The UI library. Only affects generated static content, so updates
    /// are synchronous.
    ElementPlus,
}

/// Current version selection per dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Versions {
    pub vue: String,
    pub element_plus: String,
}

impl Default for Versions {
    fn default() -> Self {
        Versions {
            vue: "latest".to_string(),
            element_plus: "latest".to_string(),
        }
    }
}

/// URLs of the runtime modules for a given core-framework version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VueLinks {
    pub compiler_sfc: String,
    pub runtime_dom: String,
}

/// jsDelivr link for a package path.
pub fn gen_cdn_link(pkg: &str, version: &str, path: &str) -> String {
    format!("{JSDELIVR}/{pkg}@{version}{path}")
}

/// unpkg link for a package path.
pub fn gen_unpkg_link(pkg: &str, version: &str, path: &str) -> String {
    format!("{UNPKG}/{pkg}@{version}{path}")
}

/// Runtime module URLs for a Vue version.
pub fn gen_vue_link(version: &str) -> VueLinks {
    VueLinks {
        compiler_sfc: gen_cdn_link(
            "@vue/compiler-sfc",
            version,
            "/dist/compiler-sfc.esm-browser.js",
        ),
        runtime_dom: gen_cdn_link(
            "@vue/runtime-dom",
            version,
            "/dist/runtime-dom.esm-browser.js",
        ),
    }
}

/// Package name of the UI library, accounting for the nightly channel.
pub fn element_plus_pkg(nightly: bool) -> &'static str {
    if nightly {
        "@element-plus/nightly"
    } else {
        "element-plus"
    }
}

/// Default stylesheet link for the UI library.
pub fn element_plus_style_link(version: &str, nightly: bool) -> String {
    gen_unpkg_link(element_plus_pkg(nightly), version, "/dist/index.css")
}

/// Generate the builtin import-map entries from the current versions.
pub fn gen_import_map(versions: &Versions, nightly: bool) -> ImportMap {
    let ep_pkg = element_plus_pkg(nightly);
    let mut map = ImportMap::default();
    let entries = [
        (
            "vue".to_string(),
            gen_vue_link(&versions.vue).runtime_dom,
        ),
        (
            "@vue/shared".to_string(),
            gen_cdn_link("@vue/shared", &versions.vue, "/dist/shared.esm-bundler.js"),
        ),
        (
            "element-plus".to_string(),
            gen_cdn_link(ep_pkg, &versions.element_plus, "/dist/index.full.min.mjs"),
        ),
        (
            "element-plus/".to_string(),
            gen_unpkg_link(ep_pkg, &versions.element_plus, "/"),
        ),
        (
            "@element-plus/icons-vue".to_string(),
            gen_cdn_link("@element-plus/icons-vue", "latest", "/dist/index.min.js"),
        ),
        (
            "pinia".to_string(),
            gen_cdn_link("pinia", "latest", "/dist/pinia.esm-browser.js"),
        ),
        (
            "vue-demi".to_string(),
            gen_cdn_link("vue-demi", "latest", "/lib/index.mjs"),
        ),
    ];
    map.imports.extend(entries);
    map
}
