use thiserror::Error;

#[derive(Error, Debug)]
pub enum TacticError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Document has no frames: {tactic_id}")]
    EmptyDocument { tactic_id: String },

    #[error("Document not found: {tactic_id}")]
    NotFound { tactic_id: String },

    #[error("Invalid tactic selection: {0}")]
    Selection(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl TacticError {
    /// Transport failures can be retried; structural problems cannot.
    pub fn is_recoverable(&self) -> bool {
        match self {
            TacticError::Io(_) => true,
            TacticError::NotFound { .. } => true,
            TacticError::Json(_) => false,
            TacticError::Validation(_) => false,
            TacticError::EmptyDocument { .. } => false,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TacticError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_is_recoverable() {
        let err: TacticError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(err.is_recoverable());
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_empty_document_not_recoverable() {
        let err = TacticError::EmptyDocument { tactic_id: "t-1".to_string() };
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Document has no frames: t-1");
    }
}
