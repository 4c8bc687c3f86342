//! Error types for persistence and configuration.
//!
//! Gameplay itself has no error paths; these only surface from storage and
//! tuning files, and callers fall back to defaults after logging them.

use std::io;

/// Failure reading or writing persisted data (high scores, settings).
#[derive(thiserror::Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Corrupt record on line {line}: {reason}")]
    Corrupt { line: usize, reason: String },

    #[error("Storage unavailable: {0}")]
    Storage(String),

    #[error("Settings format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure loading a tuning override file.
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid tuning JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid tuning value: {0}")]
    Invalid(String),

    #[error("Horizontal enemy lane is empty: {0}")]
    EmptyLane(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_error_messages() {
        let err = PersistError::Corrupt {
            line: 4,
            reason: "expected integer score".into(),
        };
        assert_eq!(err.to_string(), "Corrupt record on line 4: expected integer score");

        let err: PersistError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, PersistError::Io(_)));
    }

    #[test]
    fn test_tuning_error_from_json() {
        let err: TuningError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(err.to_string().starts_with("Invalid tuning JSON"));
    }
}
