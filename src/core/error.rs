use thiserror::Error;

/// Universal error type for text-on-path operations.
///
/// Layout itself never fails: degenerate input is skipped silently. Every
/// variant here originates from a drawing surface capability and is
/// propagated to the caller unmodified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TextPathError {
    /// Font description could not be parsed (e.g. `"Arial"` without a size)
    #[error("Invalid font description: '{0}'")]
    InvalidFont(String),

    /// Font family is not registered on the surface
    #[error("Font '{0}' not found")]
    FontNotLoaded(String),

    /// Font data could not be parsed
    #[error("Failed to load font: {0}")]
    FontParse(String),

    /// Surface operation failed
    #[error("Surface error: {0}")]
    Surface(String),

    /// Failure injected by a recording surface
    #[error("Injected failure in '{0}'")]
    Injected(String),
}

/// Result type alias for text-on-path operations
pub type TextPathResult<T> = Result<T, TextPathError>;
