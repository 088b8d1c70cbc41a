use thiserror::Error;

/// Failures that end a ground-detection run.
///
/// The `Display` text of each variant is exactly the message the CLI prints
/// in its `{"error": ...}` document.
#[derive(Error, Debug)]
pub enum DetectError {
    #[error("No image provided")]
    MissingArgument,

    #[error("Invalid arguments")]
    InvalidArguments,

    #[error("Failed to read image")]
    DecodeFailure { path: String },

    #[error("Detection failed")]
    OpenCv(#[from] opencv::Error),
}

pub type Result<T> = std::result::Result<T, DetectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_cli_contract() {
        assert_eq!(DetectError::MissingArgument.to_string(), "No image provided");
        let err = DetectError::DecodeFailure {
            path: "missing.jpg".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to read image");
        assert_eq!(DetectError::InvalidArguments.to_string(), "Invalid arguments");
    }
}
