use thiserror::Error;

/// Errors surfaced by visualization schemes.
///
/// Misconfiguration is reported at construction time so a scheme that was
/// built successfully can only fail on I/O, rendering, or malformed data.
#[derive(Debug, Error)]
pub enum VisualizeError {
    /// Missing mandatory configuration (projection, output path) or an
    /// unknown scheme identifier.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Table or label shapes that cannot be visualized, e.g. a projection
    /// yielding fewer than two dimensions or labels for unknown identifiers.
    #[error("data shape error: {0}")]
    DataShape(String),

    /// Directory creation or file write failure, propagated unretried.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Checkpoint serialization or deserialization failure.
    #[error("checkpoint error: {0}")]
    Checkpoint(#[from] serde_json::Error),

    /// Plotting backend failure.
    #[error("render error: {0}")]
    Render(String),
}
