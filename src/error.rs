/// Crate-level error types for msgident diagnostics.
use std::path::PathBuf;

/// All errors in msgident carry enough context to produce a useful diagnostic
/// without a debugger. Each variant names the file, line, or reason for failure.
///
/// Lookup misses are not errors: the table returns absent values for names,
/// ids, and hashes it does not hold, and an ambiguous hash is folded into
/// "unresolved" rather than reported separately.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Catalog file exists but its contents cannot be used.
    #[error("catalog corrupt: {reason}")]
    CatalogCorrupt {
        /// Description of the corruption.
        reason: String,
    },

    /// The analyzer's catalog dump does not exist on disk.
    #[error("catalog not found: {}", path.display())]
    CatalogNotFound {
        /// Path to the missing catalog file.
        path: PathBuf,
    },

    /// The curated identifiers file does not exist on disk.
    #[error("identifiers not found: {}", path.display())]
    IdentifiersNotFound {
        /// Path to the missing identifiers file.
        path: PathBuf,
    },

    /// The `--filter` expression is not a valid regex.
    #[error("invalid filter: {reason}")]
    InvalidFilter {
        /// Description of the regex compile failure.
        reason: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON deserialization of the catalog dump failed.
    #[error("json deserialize: {0}")]
    JsonDe(
        /// The wrapped JSON deserialization error.
        #[from]
        serde_json::Error,
    ),

    /// An in-section data line lacks the required `name=hash` shape.
    /// This aborts the entire load; the table's prior state is undefined.
    #[error("malformed line {line_number}: `{content}`")]
    MalformedLine {
        /// Raw text of the offending line.
        content: String,
        /// One-based line number within the curated file.
        line_number: usize,
    },

    /// TOML deserialization of the config file failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// No configured section matches the given name.
    #[error("unknown section: `{name}`")]
    UnknownSection {
        /// Section name that was not found in the config.
        name: String,
    },
}
