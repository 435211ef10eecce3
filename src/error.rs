use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropWiseError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Prediction service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl CropWiseError {
    /// Errors a user can act on without restarting anything.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CropWiseError::Validation(_) | CropWiseError::ServiceUnavailable(_)
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            CropWiseError::Validation(msg) => msg.clone(),
            CropWiseError::ServiceUnavailable(_) => {
                "The prediction service could not be reached. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CropWiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recoverable_variants() {
        assert!(CropWiseError::Validation("x".into()).is_recoverable());
        assert!(CropWiseError::ServiceUnavailable("x".into()).is_recoverable());
        assert!(!CropWiseError::Config("x".into()).is_recoverable());
        assert!(!CropWiseError::InvalidData("x".into()).is_recoverable());
    }

    #[test]
    fn user_message_hides_transport_detail() {
        let err = CropWiseError::ServiceUnavailable("connection refused (os error 111)".into());
        assert!(!err.user_message().contains("os error"));

        let err = CropWiseError::Validation("Please select a soil type".into());
        assert_eq!(err.user_message(), "Please select a soil type");
    }
}
