//! End-to-end session lifecycle: build, edit, share, restore.

use playground_store::file::{
    APP_FILE, ELEMENT_PLUS_FILE, IMPORT_MAP_FILE, MAIN_FILE, USER_IMPORT_MAP_FILE,
};
use playground_store::{Initial, PlaygroundFile, PlaygroundStore, StoreError, UserOptions};

#[tokio::test]
async fn full_session_lifecycle() {
    let mut store = PlaygroundStore::with_defaults(Initial::default()).unwrap();
    store.init().await.unwrap();

    // Fresh session: welcome app active, runtime resolved, no diagnostics.
    assert_eq!(store.active_file(), APP_FILE);
    assert!(store.vue_runtime_url().contains("runtime-dom"));
    assert!(store.errors().is_empty());

    // Author a component and wire a custom import.
    store.add_file(PlaygroundFile::new(
        "Counter.vue",
        "<script setup>import dayjs from 'dayjs'</script>",
    ));
    store
        .update_file(
            USER_IMPORT_MAP_FILE,
            r#"{ "imports": { "dayjs": "https://cdn.example/dayjs/esm.js" } }"#,
        )
        .unwrap();

    // The generated import map file already reflects the overlay.
    let generated = &store.file(IMPORT_MAP_FILE).unwrap().code;
    assert!(generated.contains("cdn.example/dayjs"));

    // Share and restore.
    let token = store.serialize();
    let mut restored = PlaygroundStore::with_defaults(Initial {
        serialized_state: Some(token),
        ..Default::default()
    })
    .unwrap();
    restored.init().await.unwrap();

    assert_eq!(
        restored.file("Counter.vue").unwrap().code,
        store.file("Counter.vue").unwrap().code
    );
    assert_eq!(
        restored.get_import_map().imports["dayjs"],
        "https://cdn.example/dayjs/esm.js"
    );
    // Support files come back hidden and regenerated, not from the token.
    assert!(restored.file(MAIN_FILE).unwrap().hidden);
    assert!(restored.file(ELEMENT_PLUS_FILE).unwrap().hidden);
}

#[test]
fn corrupt_share_link_falls_back_to_default_session() {
    let result = PlaygroundStore::with_defaults(Initial {
        serialized_state: Some("corrupt-token-###".to_string()),
        ..Default::default()
    });
    let err = result.err().expect("corrupt token must be rejected");
    assert!(matches!(err, StoreError::Decode(_)));

    // The documented recovery: retry without the token.
    let fallback = PlaygroundStore::with_defaults(Initial::default()).unwrap();
    assert_eq!(fallback.active_file(), APP_FILE);
}

#[test]
fn hidden_files_never_leak_into_shared_sessions() {
    let store = PlaygroundStore::with_defaults(Initial {
        user_options: Some(UserOptions {
            show_output: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    })
    .unwrap();
    let token = store.serialize();

    let restored = PlaygroundStore::with_defaults(Initial {
        serialized_state: Some(token),
        ..Default::default()
    })
    .unwrap();

    // Only visible files travel; options ride the side channel.
    let visible = restored.get_files(false);
    assert!(visible.contains_key(APP_FILE));
    assert!(!visible.contains_key(MAIN_FILE));
    assert_eq!(restored.user_options().show_output, Some(true));
}

#[test]
fn protected_shim_survives_generic_delete_paths() {
    let mut store = PlaygroundStore::with_defaults(Initial::default()).unwrap();
    assert!(store.delete_file(ELEMENT_PLUS_FILE).is_err());
    assert!(store.file(ELEMENT_PLUS_FILE).is_some());
}
