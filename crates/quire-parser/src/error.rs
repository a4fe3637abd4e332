//! Parser error types
//!
//! Malformed markdown or frontmatter never produces an error; those degrade
//! to plain text or empty frontmatter. Errors here are caller contract
//! violations, such as a stale task offset.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    /// No task line starts at the offset
    #[error("No task at offset {offset}")]
    TaskNotFound {
        /// Offset supplied by the caller
        offset: usize,
    },

    /// Offset lies outside the content
    #[error("Offset {offset} out of bounds for content of {len} bytes")]
    OffsetOutOfBounds {
        offset: usize,
        /// Content length in bytes
        len: usize,
    },
}

/// Specialized Result type for parser operations
pub type ParserResult<T> = Result<T, ParserError>;

impl ParserError {
    pub fn task_not_found(offset: usize) -> Self {
        Self::TaskNotFound { offset }
    }

    pub fn out_of_bounds(offset: usize, len: usize) -> Self {
        Self::OffsetOutOfBounds { offset, len }
    }

    /// The offset was computed against different content and tasks should be re-extracted
    pub fn is_stale_offset(&self) -> bool {
        matches!(self, Self::TaskNotFound { .. } | Self::OffsetOutOfBounds { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParserError::task_not_found(12);
        assert_eq!(err.to_string(), "No task at offset 12");

        let err = ParserError::out_of_bounds(40, 10);
        assert_eq!(err.to_string(), "Offset 40 out of bounds for content of 10 bytes");
        assert!(err.is_stale_offset());
    }
}
