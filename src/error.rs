//! Error taxonomy for dialog lifecycle operations.
//!
//! Two lookup outcomes are deliberately *not* errors: a missing template
//! resolves to a placeholder body, and a close-by-id miss degrades to
//! closing every open dialog.

/// Result type for dialog operations
pub type DialogResult<T> = std::result::Result<T, DialogError>;

/// Dialog-specific error types
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    /// The asynchronous template fetch failed. The open operation is
    /// aborted: no instance is created and no listeners are bound.
    #[error("template resolution failed: {0}")]
    TemplateResolution(#[source] anyhow::Error),

    /// A `data` payload that looked structured (leading `{`) failed to
    /// parse. The caller is responsible for well-formed payloads.
    #[error("malformed structured data payload: {0}")]
    MalformedData(#[from] serde_json::Error),

    /// The markup compiler collaborator reported a failure while binding
    /// a mounted dialog to its scope.
    #[error("markup compilation failed: {0}")]
    Compile(#[source] anyhow::Error),
}
