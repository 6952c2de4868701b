use crate::foundation::core::PixelFormat;

/// Convenience result type used across pixeloom.
pub type PixeloomResult<T> = Result<T, PixeloomError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PixeloomError {
    /// Invalid caller-provided dimensions, buffers or tables.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pixel buffer could not be sized or allocated. The construction is abandoned.
    #[error("allocation error: cannot allocate {bytes} bytes")]
    Allocation {
        /// Requested buffer size, saturated at `usize::MAX` when the size itself overflowed.
        bytes: usize,
    },

    /// An operation was handed a surface in the wrong pixel encoding.
    #[error("encoding mismatch: expected {expected:?}, found {found:?}")]
    EncodingMismatch {
        /// Encoding the operation requires.
        expected: PixelFormat,
        /// Encoding the surface actually carries.
        found: PixelFormat,
    },

    /// Unknown or malformed widget theme.
    #[error("theme error: {0}")]
    Theme(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixeloomError {
    /// Build a [`PixeloomError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PixeloomError::Theme`] value.
    pub fn theme(msg: impl Into<String>) -> Self {
        Self::Theme(msg.into())
    }

    /// Build a [`PixeloomError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`PixeloomError::EncodingMismatch`] value.
    pub fn encoding(expected: PixelFormat, found: PixelFormat) -> Self {
        Self::EncodingMismatch { expected, found }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
