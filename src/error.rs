/// Crate-level error types for playshare diagnostics.
use std::path::PathBuf;

/// Errors surfaced by the CLI layer. The codec and hover parser never return
/// these across their public boundary; they degrade to `None` instead.
#[allow(clippy::error_impl_error, reason = "crate-level error type")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A named input file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// A base location cannot be turned into a share or embed URL.
    #[error("invalid location `{location}`: {reason}")]
    InvalidLocation {
        /// The location string as given.
        location: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Underlying I/O error from the filesystem or stdio.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// A fragment was given but no source text could be recovered from it.
    #[error("nothing to restore from the given fragment")]
    NothingToRestore,

    /// None of the hover rules produced a type name.
    #[error("no type name found in hover content")]
    NoTypeMatch,

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The configured code-fence language tag is not a usable token.
    #[error("unknown language tag: `{language}`")]
    UnknownLanguage {
        /// The rejected tag.
        language: String,
    },
}

/// Why a share payload could not be decoded. Only used internally and for
/// debug logging; callers of `share::decode` see an absent value.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Payload was not valid base64 after the alphabet remap.
    #[error("base64: {0}")]
    Base64(
        /// The wrapped base64 error.
        #[from]
        base64::DecodeError,
    ),

    /// Nothing left after stripping the fragment markers.
    #[error("empty payload")]
    Empty,

    /// Compressed stream is corrupt.
    #[error("inflate: {0}")]
    Inflate(
        /// The wrapped stream error.
        #[from]
        flate2::DecompressError,
    ),

    /// Payload length can never be produced by the encoder.
    #[error("payload length {len} is not a valid base64 length")]
    InvalidLength {
        /// Length of the payload in characters.
        len: usize,
    },

    /// Compressed stream ended before its end marker.
    #[error("compressed stream is truncated")]
    Truncated,

    /// Inflated bytes are not UTF-8 text.
    #[error("utf-8: {0}")]
    Utf8(
        /// The wrapped conversion error.
        #[from]
        std::string::FromUtf8Error,
    ),
}
