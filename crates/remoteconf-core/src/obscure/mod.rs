//! Reversible obscuring of secret config values
//!
//! Passwords are stored obscured so the config file can be viewed without
//! giving them away at a glance. This is obfuscation, not encryption: the key
//! is built into the binary and anyone with this crate can reveal a value.

mod codec;

pub use codec::{obscure, reveal, must_reveal, ObscureError, ObscureResult};
