//! Session Token Codec
//!
//! Compresses a JSON session into a compact string safe for embedding in a
//! URL fragment, and decodes it back. Encoding is raw-deflate followed by
//! URL-safe base64 without padding, so tokens contain only `[A-Za-z0-9_-]`.
//!
//! Decoding also accepts legacy uncompressed tokens (base64 over plain JSON)
//! produced by older playground builds.

use crate::error::DecodeError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Encode a JSON session string into a URL-safe compact token.
pub fn encode(text: &str) -> String {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    // Writing to a Vec cannot fail.
    encoder
        .write_all(text.as_bytes())
        .expect("deflate to in-memory buffer");
    let compressed = encoder.finish().expect("deflate to in-memory buffer");
    URL_SAFE_NO_PAD.encode(compressed)
}

/// Decode a token produced by [`encode`] back into the JSON session string.
///
/// Fails with [`DecodeError`] on corrupt, truncated, or foreign input. The
/// caller is expected to log the failure and fall back to a default session.
pub fn decode(token: &str) -> Result<String, DecodeError> {
    let bytes = URL_SAFE_NO_PAD.decode(token.trim())?;

    let mut inflated = String::new();
    let result = DeflateDecoder::new(bytes.as_slice()).read_to_string(&mut inflated);
    match result {
        Ok(_) => Ok(inflated),
        // Legacy links base64 the JSON without compressing it first.
        Err(err) => match String::from_utf8(bytes) {
            Ok(plain) if looks_like_json(&plain) => Ok(plain),
            _ => Err(DecodeError::Inflate(err)),
        },
    }
}

fn looks_like_json(text: &str) -> bool {
    matches!(text.trim_start().as_bytes().first(), Some(b'{') | Some(b'['))
}
