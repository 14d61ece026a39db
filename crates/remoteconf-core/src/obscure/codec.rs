//! Obscure/reveal codec
//!
//! Format: `base64url_nopad(nonce || ciphertext)` where the ciphertext is the
//! plaintext XORed with a ChaCha20 keystream under a fixed key.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use chacha20::{ChaCha20, Key, Nonce};
use rand::RngCore;
use thiserror::Error;

use crate::types::ErrorKind;

/// Fixed obscuring key. Changing it makes every stored password unreadable.
const OBSCURE_KEY: [u8; 32] = [
    0x9c, 0x93, 0x5b, 0x48, 0x73, 0x0a, 0x55, 0x4d,
    0x6b, 0xfd, 0x7c, 0x63, 0xc8, 0x86, 0xa9, 0x2b,
    0xd3, 0x90, 0x19, 0x8e, 0xb8, 0x12, 0x8a, 0xfb,
    0xf4, 0xde, 0x16, 0x2b, 0x8b, 0x95, 0xf6, 0x38,
];

const NONCE_LEN: usize = 12;

/// Errors from revealing an obscured value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObscureError {
    #[error("Failed to reveal value: {0}")]
    Decode(String),
}

impl ObscureError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Decode
    }
}

pub type ObscureResult<T> = Result<T, ObscureError>;

fn apply_keystream(nonce: &[u8], buf: &mut [u8]) {
    let mut cipher = ChaCha20::new(Key::from_slice(&OBSCURE_KEY), Nonce::from_slice(nonce));
    cipher.apply_keystream(buf);
}

/// Obscure a value for storage in the config file
///
/// A fresh nonce is drawn on every call, so obscuring the same value twice
/// gives different strings that both reveal to the original.
///
/// ```
/// use remoteconf_core::obscure::{obscure, reveal};
///
/// let stored = obscure("hunter2");
/// assert_ne!(stored, "hunter2");
/// assert_eq!(reveal(&stored).unwrap(), "hunter2");
/// ```
pub fn obscure(plaintext: &str) -> String {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);

    let mut buf = Vec::with_capacity(NONCE_LEN + plaintext.len());
    buf.extend_from_slice(&nonce);
    buf.extend_from_slice(plaintext.as_bytes());
    apply_keystream(&nonce, &mut buf[NONCE_LEN..]);

    URL_SAFE_NO_PAD.encode(buf)
}

/// Reveal a value produced by [`obscure`]
pub fn reveal(obscured: &str) -> ObscureResult<String> {
    let mut buf = URL_SAFE_NO_PAD.decode(obscured.as_bytes()).map_err(|e| {
        ObscureError::Decode(format!("base64 decode failed, is it obscured? {}", e))
    })?;

    if buf.len() < NONCE_LEN {
        return Err(ObscureError::Decode(
            "input too short, is it obscured?".to_string(),
        ));
    }

    let (nonce, body) = buf.split_at_mut(NONCE_LEN);
    apply_keystream(nonce, body);

    String::from_utf8(body.to_vec())
        .map_err(|_| ObscureError::Decode("revealed value is not valid UTF-8".to_string()))
}

/// Reveal a value that is known to be well formed
///
/// # Panics
///
/// Panics if `obscured` was not produced by [`obscure`]. Only use this on
/// values the caller obscured itself.
pub fn must_reveal(obscured: &str) -> String {
    match reveal(obscured) {
        Ok(plaintext) => plaintext,
        Err(e) => panic!("must_reveal on malformed input: {}", e),
    }
}
