//! Playground Session Store
//!
//! Owns the virtual file set, dependency version selections, and derived
//! state for one playground session. All mutations are synchronous and
//! eager: whenever an input of a derived value changes (the generated
//! import-map file, the dependency-shim file), the derived value is
//! recomputed and recompiled before the mutation returns, so reads never
//! observe stale generated content. The sole asynchronous boundary is
//! loading a new runtime module on a core-framework version change.
//!
//! There is no ambient global state: a store is an explicit session object,
//! and every external effect goes through an injected contract
//! ([`Compiler`], [`ModuleLoader`], [`Confirmer`]).

use crate::codec;
use crate::compiler::{
    AlwaysConfirm, CdnModuleLoader, CompileContext, Compiler, Confirmer, Diagnostic, ModuleLoader,
    NoopCompiler, RuntimeModule,
};
use crate::config::{Initial, UserOptions};
use crate::dependency::{element_plus_style_link, gen_import_map, VersionKey, Versions};
use crate::error::{DecodeError, StoreError};
use crate::file::{
    PlaygroundFile, APP_FILE, ELEMENT_PLUS_CODE, ELEMENT_PLUS_FILE, IMPORT_MAP_FILE, MAIN_CODE,
    MAIN_FILE, PINIA_CODE, PINIA_FILE, SERIALIZE_OPTIONS_KEY, USER_IMPORT_MAP_FILE, WELCOME_CODE,
};
use crate::import_map::{merge_import_map, ImportMap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Wire layout of a serialized session: filename → content, with user
/// options riding along under the reserved `_o` key.
#[derive(Debug, Serialize, Deserialize)]
struct SerializedSession {
    #[serde(rename = "_o", default, skip_serializing_if = "Option::is_none")]
    options: Option<UserOptions>,

    #[serde(flatten)]
    files: BTreeMap<String, String>,
}

/// The playground session manager.
pub struct PlaygroundStore {
    files: BTreeMap<String, PlaygroundFile>,
    active_file: String,
    main_file: String,
    versions: Versions,
    nightly: bool,
    user_options: UserOptions,
    errors: Vec<Diagnostic>,
    vue_runtime_url: String,

    compiler: Arc<dyn Compiler>,
    loader: Arc<dyn ModuleLoader>,
    confirmer: Box<dyn Confirmer>,

    /// Monotonic ticket for runtime-module loads. Only the latest-requested
    /// load is allowed to commit; stale completions are discarded.
    load_generation: u64,
}

impl PlaygroundStore {
    /// Build a session from its initial inputs and collaborator contracts.
    ///
    /// A malformed `serialized_state` fails with [`StoreError::Decode`]; the
    /// caller is expected to log it and retry with a default session.
    pub fn new(
        initial: Initial,
        compiler: Arc<dyn Compiler>,
        loader: Arc<dyn ModuleLoader>,
        confirmer: Box<dyn Confirmer>,
    ) -> Result<Self, StoreError> {
        let versions = initial.versions.unwrap_or_default();
        let mut user_options = initial.user_options.unwrap_or_default();

        let mut files = BTreeMap::new();
        let token = initial
            .serialized_state
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        if let Some(token) = token {
            let session = Self::deserialize(token)?;
            for (filename, code) in session.files {
                files.insert(filename.clone(), PlaygroundFile::new(filename, code));
            }
            // Options persisted in the shared link win over caller defaults.
            if let Some(persisted) = session.options {
                user_options = user_options.merged_with(&persisted);
            }
        } else {
            files.insert(
                APP_FILE.to_string(),
                PlaygroundFile::new(APP_FILE, WELCOME_CODE),
            );
        }

        let hide = !user_options.show_hidden();

        // Required support files are (re-)injected on every init, replacing
        // whatever a deserialized session may have carried for them.
        files.insert(
            MAIN_FILE.to_string(),
            PlaygroundFile::with_hidden(MAIN_FILE, MAIN_CODE, hide),
        );
        files.insert(
            PINIA_FILE.to_string(),
            PlaygroundFile::with_hidden(PINIA_FILE, PINIA_CODE, hide),
        );
        if !files.contains_key(USER_IMPORT_MAP_FILE) {
            files.insert(
                USER_IMPORT_MAP_FILE.to_string(),
                PlaygroundFile::new(USER_IMPORT_MAP_FILE, "{\n  \"imports\": {}\n}\n"),
            );
        }

        let active_file = if files.contains_key(APP_FILE) {
            APP_FILE.to_string()
        } else {
            files
                .values()
                .find(|f| !f.hidden)
                .map(|f| f.filename.clone())
                .unwrap_or_else(|| MAIN_FILE.to_string())
        };

        let mut store = PlaygroundStore {
            files,
            active_file,
            main_file: MAIN_FILE.to_string(),
            versions,
            nightly: false,
            user_options,
            errors: Vec::new(),
            vue_runtime_url: String::new(),
            compiler,
            loader,
            confirmer,
            load_generation: 0,
        };

        // Derived files must be in place before the first reactive read.
        store.sync_element_plus_file();
        store.sync_import_map_file();

        debug!(
            files = store.files.len(),
            active = %store.active_file,
            "session initialized"
        );
        Ok(store)
    }

    /// Build a session with no-op collaborators, for headless embedding.
    pub fn with_defaults(initial: Initial) -> Result<Self, StoreError> {
        Self::new(
            initial,
            Arc::new(NoopCompiler),
            Arc::new(CdnModuleLoader),
            Box::new(AlwaysConfirm),
        )
    }

    /// Load the runtime module for the current core-framework version and
    /// compile the full file set. Call once after construction.
    pub async fn init(&mut self) -> Result<(), StoreError> {
        let version = self.versions.vue.clone();
        self.set_vue_version(&version).await?;

        let filenames: Vec<String> = self.files.keys().cloned().collect();
        for filename in filenames {
            self.compile_file(&filename);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // File operations
    // ------------------------------------------------------------------

    /// Switch the active file. No-op for hidden or missing files. The newly
    /// active file is recompiled eagerly.
    pub fn set_active(&mut self, filename: &str) {
        let visible = match self.files.get(filename) {
            Some(file) => !file.hidden,
            None => {
                debug!(%filename, "ignoring set_active on missing file");
                return;
            }
        };
        if !visible {
            debug!(%filename, "ignoring set_active on hidden file");
            return;
        }
        self.active_file = filename.to_string();
        self.compile_file(filename);
    }

    /// Insert a file, silently overwriting any existing file with the same
    /// name, then make it active (when visible).
    pub fn add_file(&mut self, file: PlaygroundFile) {
        let filename = file.filename.clone();
        let hidden = file.hidden;
        self.files.insert(filename.clone(), file);

        if filename == USER_IMPORT_MAP_FILE {
            self.sync_import_map_file();
        }

        if hidden {
            self.compile_file(&filename);
        } else {
            self.set_active(&filename);
        }
    }

    /// Insert an empty visible file by name (the "new tab" action).
    pub fn add_file_named(&mut self, filename: &str) {
        self.add_file(PlaygroundFile::empty(filename));
    }

    /// Replace a file's content, then recompute anything derived from it.
    pub fn update_file(&mut self, filename: &str, code: impl Into<String>) -> Result<(), StoreError> {
        let file = self
            .files
            .get_mut(filename)
            .ok_or_else(|| StoreError::FileNotFound(filename.to_string()))?;
        file.code = code.into();

        // The user overlay feeds the generated import map; regenerate it
        // before compiling so the compile sees current state.
        if filename == USER_IMPORT_MAP_FILE {
            self.sync_import_map_file();
        }
        self.compile_file(filename);
        Ok(())
    }

    /// Delete a file after confirmation.
    ///
    /// The dependency-shim file is protected and never deletable. If the
    /// deleted file was active, the active pointer resets to the
    /// application root file when it exists.
    pub fn delete_file(&mut self, filename: &str) -> Result<(), StoreError> {
        if filename == ELEMENT_PLUS_FILE {
            warn!(%filename, "refusing to delete protected dependency shim");
            return Err(StoreError::ProtectedFile(filename.to_string()));
        }
        if !self.files.contains_key(filename) {
            return Err(StoreError::FileNotFound(filename.to_string()));
        }
        if !self
            .confirmer
            .confirm(&format!("Are you sure you want to delete {filename}?"))
        {
            return Ok(());
        }

        self.files.remove(filename);
        self.errors.retain(|d| d.filename != filename);

        if self.active_file == filename {
            if self.files.contains_key(APP_FILE) {
                self.set_active(APP_FILE);
            } else if let Some(fallback) = self
                .files
                .values()
                .find(|f| !f.hidden)
                .map(|f| f.filename.clone())
            {
                self.set_active(&fallback);
            }
        }
        Ok(())
    }

    /// Export filename → content, filtering hidden files unless requested.
    pub fn get_files(&self, include_hidden: bool) -> BTreeMap<String, String> {
        self.files
            .values()
            .filter(|f| include_hidden || !f.hidden)
            .map(|f| (f.filename.clone(), f.code.clone()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Versions
    // ------------------------------------------------------------------

    /// Change a dependency version.
    ///
    /// UI-library changes only affect generated static content and commit
    /// synchronously. Core-framework changes must load a new runtime module
    /// first and commit atomically: on load failure the version state is
    /// untouched.
    pub async fn set_version(&mut self, key: VersionKey, version: &str) -> Result<(), StoreError> {
        match key {
            VersionKey::ElementPlus => {
                self.set_element_plus_version(version);
                Ok(())
            }
            VersionKey::Vue => self.set_vue_version(version).await,
        }
    }

    fn set_element_plus_version(&mut self, version: &str) {
        self.versions.element_plus = version.to_string();
        self.sync_element_plus_file();
        self.sync_import_map_file();
        info!(%version, "element-plus version updated");
    }

    async fn set_vue_version(&mut self, version: &str) -> Result<(), StoreError> {
        let ticket = self.begin_vue_load();
        let module = self.loader.load(version).await?;
        self.commit_vue_module(ticket, module);
        Ok(())
    }

    /// Start a runtime-module load, returning the ticket that must
    /// accompany the commit. Each new load invalidates all prior tickets.
    pub fn begin_vue_load(&mut self) -> u64 {
        self.load_generation += 1;
        self.load_generation
    }

    /// Commit a loaded runtime module. Returns false (and changes nothing)
    /// when a newer load was requested after this one started.
    pub fn commit_vue_module(&mut self, ticket: u64, module: RuntimeModule) -> bool {
        if ticket != self.load_generation {
            debug!(
                version = %module.version,
                "discarding stale runtime module load"
            );
            return false;
        }
        info!(version = %module.version, "now using vue version");
        self.versions.vue = module.version;
        self.vue_runtime_url = module.runtime_url;
        self.sync_import_map_file();
        true
    }

    /// Toggle the nightly dependency channel and regenerate derived files.
    pub fn toggle_nightly(&mut self) {
        self.nightly = !self.nightly;
        self.sync_element_plus_file();
        self.sync_import_map_file();
    }

    // ------------------------------------------------------------------
    // Derived state
    // ------------------------------------------------------------------

    /// The current merged import map: builtin entries generated from the
    /// version selections, overlaid with the user-supplied map. User keys
    /// win on conflict.
    pub fn get_import_map(&self) -> ImportMap {
        let builtin = gen_import_map(&self.versions, self.nightly);
        let user_code = self
            .files
            .get(USER_IMPORT_MAP_FILE)
            .map(|f| f.code.as_str())
            .unwrap_or("");
        merge_import_map(&builtin, &ImportMap::from_user_json(user_code))
    }

    /// Regenerate the import-map output file from its two sources.
    fn sync_import_map_file(&mut self) {
        let content = self.get_import_map().to_json_pretty();
        let hide = !self.user_options.show_hidden();
        self.files.insert(
            IMPORT_MAP_FILE.to_string(),
            PlaygroundFile::with_hidden(IMPORT_MAP_FILE, content, hide),
        );
        self.compile_file(IMPORT_MAP_FILE);
    }

    /// Regenerate the dependency-shim file for the current UI-library
    /// version and style source.
    fn sync_element_plus_file(&mut self) {
        let version = self.versions.element_plus.clone();
        let style = match &self.user_options.style_source {
            Some(source) => source.replace("#VERSION#", &version),
            None => element_plus_style_link(&version, self.nightly),
        };
        let code = ELEMENT_PLUS_CODE.replace("#EP_STYLE#", &style);
        let hide = !self.user_options.show_hidden();
        self.files.insert(
            ELEMENT_PLUS_FILE.to_string(),
            PlaygroundFile::with_hidden(ELEMENT_PLUS_FILE, code.trim().to_string(), hide),
        );
        self.compile_file(ELEMENT_PLUS_FILE);
    }

    /// Run the compiler contract for one file, replacing its recorded
    /// diagnostics. Diagnostics are data, not failures.
    fn compile_file(&mut self, filename: &str) {
        let Some(file) = self.files.get(filename).cloned() else {
            return;
        };
        let import_map = self.get_import_map();
        let diagnostics = self.compiler.compile(
            &CompileContext {
                files: &self.files,
                import_map: &import_map,
                vue_runtime_url: &self.vue_runtime_url,
            },
            &file,
        );
        self.errors.retain(|d| d.filename != filename);
        self.errors.extend(diagnostics);
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Produce the compact URL-safe token for the current session: visible
    /// files plus user options.
    pub fn serialize(&self) -> String {
        let mut files = self.get_files(false);
        // The options side channel owns this key; a file squatting on it
        // would produce a duplicate-key token our own decoder rejects.
        files.remove(SERIALIZE_OPTIONS_KEY);
        let session = SerializedSession {
            options: Some(self.user_options.clone()),
            files,
        };
        // Maps of strings cannot fail to serialize.
        let json = serde_json::to_string(&session).expect("session serialization");
        codec::encode(&json)
    }

    fn deserialize(token: &str) -> Result<SerializedSession, DecodeError> {
        let json = codec::decode(token)?;
        Ok(serde_json::from_str(&json)?)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn active_file(&self) -> &str {
        &self.active_file
    }

    pub fn main_file(&self) -> &str {
        &self.main_file
    }

    pub fn file(&self, filename: &str) -> Option<&PlaygroundFile> {
        self.files.get(filename)
    }

    pub fn versions(&self) -> &Versions {
        &self.versions
    }

    pub fn nightly(&self) -> bool {
        self.nightly
    }

    pub fn user_options(&self) -> &UserOptions {
        &self.user_options
    }

    pub fn vue_runtime_url(&self) -> &str {
        &self.vue_runtime_url
    }

    /// Recorded compiler diagnostics, most recent per file.
    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }
}
