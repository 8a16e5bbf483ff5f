//! External Collaborator Contracts
//!
//! Trait seams for everything the session store does not own: the compiler
//! that turns files into preview output, the loader that fetches a runtime
//! module for a version change, and the confirmation prompt the UI shows
//! before destructive actions. The store only ever talks through these, so
//! the core logic is testable without a browser.

use crate::error::StoreError;
use crate::file::PlaygroundFile;
use crate::import_map::ImportMap;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// A compiler message for one file. Diagnostics are data in this layer, not
/// errors: they are collected for display, never propagated as failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub filename: String,
    pub message: String,
}

/// Everything a compiler may need beyond the target file itself.
#[derive(Debug, Clone)]
pub struct CompileContext<'a> {
    /// The full current file set, including hidden files.
    pub files: &'a BTreeMap<String, PlaygroundFile>,
    /// The merged import map in effect.
    pub import_map: &'a ImportMap,
    /// URL of the active runtime module, empty before `init`.
    pub vue_runtime_url: &'a str,
}

/// Compiler contract: synchronous from the caller's perspective, invoked
/// reactively on every compile-relevant change.
pub trait Compiler: Send + Sync {
    fn compile(&self, ctx: &CompileContext<'_>, file: &PlaygroundFile) -> Vec<Diagnostic>;
}

/// Handle to a loaded runtime module for a specific version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeModule {
    pub version: String,
    pub compiler_url: String,
    pub runtime_url: String,
}

/// Asynchronously resolves a version identifier to a runtime module handle.
/// The sole async boundary in the store.
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, version: &str) -> Result<RuntimeModule, StoreError>;
}

/// Confirmation capability for destructive actions, injected by the caller
/// (a UI dialog in the browser, a stub in tests).
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Compiler that accepts everything. Useful as a default and in tests.
#[derive(Debug, Default)]
pub struct NoopCompiler;

impl Compiler for NoopCompiler {
    fn compile(&self, _ctx: &CompileContext<'_>, _file: &PlaygroundFile) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Loader that resolves module URLs from the CDN link scheme without any
/// network round-trip. Embedders with a real module system supply their own.
#[derive(Debug, Default)]
pub struct CdnModuleLoader;

#[async_trait]
impl ModuleLoader for CdnModuleLoader {
    async fn load(&self, version: &str) -> Result<RuntimeModule, StoreError> {
        let links = crate::dependency::gen_vue_link(version);
        Ok(RuntimeModule {
            version: version.to_string(),
            compiler_url: links.compiler_sfc,
            runtime_url: links.runtime_dom,
        })
    }
}

/// Confirmer that always approves. The right default for headless embedding.
#[derive(Debug, Default)]
pub struct AlwaysConfirm;

impl Confirmer for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
