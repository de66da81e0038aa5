//! Error types for the engine surface.
//!
//! Only genuinely exceptional conditions are errors: I/O failure on the key
//! source and malformed configuration. Editing edge cases (boundary moves,
//! failed motions, unbound keys) are valid states signalled by the bell.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    #[error("I/O error reading key input")]
    Io(#[from] std::io::Error),

    #[error("unknown widget name `{0}`")]
    UnknownWidget(String),

    #[error("unknown keymap name `{0}`")]
    UnknownKeymap(String),

    #[error("invalid key notation `{0}`")]
    InvalidKeyNotation(String),

    #[error("invalid configuration")]
    Config(#[from] toml::de::Error),
}
