//! Dependency version changes across the async module-load boundary.

use async_trait::async_trait;
use playground_store::file::ELEMENT_PLUS_FILE;
use playground_store::{
    Initial, ModuleLoader, PlaygroundStore, RuntimeModule, StoreError, VersionKey,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Loader that fails every other request, starting with a failure.
struct FlakyLoader {
    calls: AtomicUsize,
}

#[async_trait]
impl ModuleLoader for FlakyLoader {
    async fn load(&self, version: &str) -> Result<RuntimeModule, StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call % 2 == 0 {
            Err(StoreError::ModuleLoad {
                version: version.to_string(),
                reason: "cdn timeout".to_string(),
            })
        } else {
            Ok(RuntimeModule {
                version: version.to_string(),
                compiler_url: format!("compiler@{version}"),
                runtime_url: format!("runtime@{version}"),
            })
        }
    }
}

#[tokio::test]
async fn failed_then_retried_vue_change() {
    let mut store = PlaygroundStore::new(
        Initial::default(),
        Arc::new(playground_store::compiler::NoopCompiler),
        Arc::new(FlakyLoader {
            calls: AtomicUsize::new(0),
        }),
        Box::new(playground_store::compiler::AlwaysConfirm),
    )
    .unwrap();

    // First attempt fails; version state is untouched.
    let err = store.set_version(VersionKey::Vue, "3.4.0").await.unwrap_err();
    assert!(matches!(err, StoreError::ModuleLoad { .. }));
    assert_eq!(store.versions().vue, "latest");
    assert_eq!(store.vue_runtime_url(), "");

    // Retry succeeds and commits atomically.
    store.set_version(VersionKey::Vue, "3.4.0").await.unwrap();
    assert_eq!(store.versions().vue, "3.4.0");
    assert_eq!(store.vue_runtime_url(), "runtime@3.4.0");
}

#[tokio::test]
async fn out_of_order_loads_commit_only_the_latest() {
    let mut store = PlaygroundStore::with_defaults(Initial::default()).unwrap();

    // Two requests in flight; the older one resolves last.
    let first = store.begin_vue_load();
    let second = store.begin_vue_load();

    let committed = store.commit_vue_module(
        second,
        RuntimeModule {
            version: "3.5.1".to_string(),
            compiler_url: "compiler@3.5.1".to_string(),
            runtime_url: "runtime@3.5.1".to_string(),
        },
    );
    assert!(committed);

    let committed = store.commit_vue_module(
        first,
        RuntimeModule {
            version: "3.4.0".to_string(),
            compiler_url: "compiler@3.4.0".to_string(),
            runtime_url: "runtime@3.4.0".to_string(),
        },
    );
    assert!(!committed, "stale load must be discarded");
    assert_eq!(store.versions().vue, "3.5.1");
}

#[tokio::test]
async fn element_plus_change_is_synchronous_and_regenerates() {
    let mut store = PlaygroundStore::with_defaults(Initial::default()).unwrap();
    store
        .set_version(VersionKey::ElementPlus, "2.4.4")
        .await
        .unwrap();

    assert_eq!(store.versions().element_plus, "2.4.4");
    let shim = &store.file(ELEMENT_PLUS_FILE).unwrap().code;
    assert!(shim.contains("element-plus@2.4.4/dist/index.css"));
    assert!(store.get_import_map().imports["element-plus"].contains("@2.4.4"));
}
