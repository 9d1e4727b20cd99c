//! Error types for request compilation.

/// Result type for request-compilation operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors raised while compiling a resource path into a request.
///
/// All of these surface synchronously, before any network I/O is
/// attempted.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The builder was invoked with no path segments.
    #[error("cannot compile a request from an empty path")]
    EmptyPath,

    /// An identifier was supplied but its anchor segment is not in the path.
    #[error("identifier `{identifier}` has no anchor segment `{anchor}` in the path")]
    InvalidPath {
        /// The identifier key that was supplied.
        identifier: String,
        /// The anchor segment the identifier binds to.
        anchor: String,
    },

    /// The request body could not be serialized to JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid binding-table configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
