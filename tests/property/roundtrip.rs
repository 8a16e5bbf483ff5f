//! Property-based tests for the session token round-trip law

use playground_store::codec;
use playground_store::file::{
    ELEMENT_PLUS_FILE, IMPORT_MAP_FILE, MAIN_FILE, PINIA_FILE, SERIALIZE_OPTIONS_KEY,
    USER_IMPORT_MAP_FILE,
};
use playground_store::{Initial, PlaygroundFile, PlaygroundStore};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// decode(encode(s)) == s for arbitrary Unicode text
#[test]
fn test_codec_roundtrip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<String>(), |text| {
            let token = codec::encode(&text);
            prop_assert_eq!(codec::decode(&token).unwrap(), text);
            Ok(())
        })
        .unwrap();
}

/// Tokens only ever contain URL-fragment-safe characters
#[test]
fn test_codec_output_url_safe_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&any::<String>(), |text| {
            let token = codec::encode(&text);
            prop_assert!(token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
            Ok(())
        })
        .unwrap();
}

/// Session maps survive JSON encoding, compression, and decoding, regardless
/// of filename/content Unicode and of key order
#[test]
fn test_session_map_roundtrip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    let sessions = proptest::collection::btree_map(any::<String>(), any::<String>(), 0..10);

    runner
        .run(&sessions, |session| {
            let json = serde_json::to_string(&session).unwrap();
            let token = codec::encode(&json);
            let decoded: BTreeMap<String, String> =
                serde_json::from_str(&codec::decode(&token).unwrap()).unwrap();
            prop_assert_eq!(decoded, session);
            Ok(())
        })
        .unwrap();
}

/// Full store round-trip: user-authored files come back byte-for-byte
#[test]
fn test_store_serialize_roundtrip_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    // User-style filenames; reserved/generated names are managed by the
    // store itself and excluded here.
    let reserved = [
        MAIN_FILE,
        PINIA_FILE,
        ELEMENT_PLUS_FILE,
        IMPORT_MAP_FILE,
        USER_IMPORT_MAP_FILE,
        SERIALIZE_OPTIONS_KEY,
    ];
    let filenames = "[A-Za-z][A-Za-z0-9]{0,12}\\.(vue|js|ts|css|json)"
        .prop_filter("reserved filename", move |name: &String| {
            !reserved.contains(&name.as_str())
        });
    let sessions = proptest::collection::btree_map(filenames, any::<String>(), 0..6);

    runner
        .run(&sessions, |session| {
            let mut store = PlaygroundStore::with_defaults(Initial::default()).unwrap();
            for (filename, code) in &session {
                store.add_file(PlaygroundFile::new(filename.clone(), code.clone()));
            }

            let token = store.serialize();
            let restored = PlaygroundStore::with_defaults(Initial {
                serialized_state: Some(token),
                ..Default::default()
            })
            .unwrap();

            for (filename, code) in &session {
                prop_assert_eq!(&restored.file(filename).unwrap().code, code);
            }
            Ok(())
        })
        .unwrap();
}
