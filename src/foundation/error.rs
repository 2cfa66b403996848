/// Result alias used across the crate.
pub type PaintResult<T> = Result<T, PaintError>;

/// Errors surfaced by the painting pipeline.
///
/// Driver failures ([`PaintError::Surface`], or [`PaintError::Other`] for frame dump I/O) end the
/// painter loop. The remaining variants come from constructors and configuration.
#[derive(thiserror::Error, Debug)]
pub enum PaintError {
    /// Invalid input, e.g. bounds requested over an empty point set.
    #[error("validation error: {0}")]
    Validation(String),

    /// The driver failed to hand out or present its drawable.
    #[error("surface error: {0}")]
    Surface(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// A command was submitted after the painter stopped receiving.
    #[error("painter disconnected: command channel is closed")]
    Disconnected,

    /// Any other failure (I/O, encoding).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PaintError {
    /// Build a [`PaintError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PaintError::Surface`].
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`PaintError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
