use thiserror::Error;

pub type Result<T> = std::result::Result<T, PuzzleError>;

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("puzzle invariant violated: {message}")]
    InvariantViolation { message: String },

    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PuzzleError {
    #[must_use]
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the current grid has to be thrown away.
    #[must_use]
    pub fn is_fatal_to_grid(&self) -> bool {
        matches!(self, Self::InvariantViolation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::PuzzleError;

    #[test]
    fn constructors_keep_message() {
        let error = PuzzleError::config("grid size must be at least 2, got 1");
        assert_eq!(
            error.to_string(),
            "invalid configuration: grid size must be at least 2, got 1"
        );

        let error = PuzzleError::invariant("no empty cell");
        assert_eq!(error.to_string(), "puzzle invariant violated: no empty cell");
    }

    #[test]
    fn only_invariant_violations_are_fatal_to_grid() {
        assert!(PuzzleError::invariant("x").is_fatal_to_grid());
        assert!(!PuzzleError::config("x").is_fatal_to_grid());
        let io = std::io::Error::new(std::io::ErrorKind::Other, "tty gone");
        assert!(!PuzzleError::from(io).is_fatal_to_grid());
    }
}
