use thiserror::Error;

/// Fallback shown when the service fails without a usable `detail`.
pub const GENERIC_PREDICTION_ERROR: &str = "An error occurred during prediction";

/// Local input problems. The `Display` text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a FASTA or FA file")]
    UnsupportedFileType,
    #[error("File size exceeds 200MB limit")]
    FileTooLarge,
    #[error("Please select a gene")]
    MissingGene,
    #[error("Please upload a FASTA file")]
    MissingFile,
}

/// Why a submitted prediction did not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictionError {
    /// The service could not be reached or answered with something other than JSON.
    /// `cause` is kept for logs only.
    #[error("Failed to connect to the prediction API")]
    Transport { cause: String },
    /// The service answered with a non-success status.
    #[error("{}", .detail.as_deref().unwrap_or(GENERIC_PREDICTION_ERROR))]
    Service { status: u16, detail: Option<String> },
}

impl PredictionError {
    pub fn transport(cause: impl Into<String>) -> Self {
        Self::Transport {
            cause: cause.into(),
        }
    }

    pub fn service(status: u16, detail: Option<String>) -> Self {
        Self::Service { status, detail }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported gene '{0}'; expected one of PTEN, BRCA1, TP53")]
pub struct UnknownGene(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_user_copy() {
        assert_eq!(
            ValidationError::UnsupportedFileType.to_string(),
            "Please upload a FASTA or FA file"
        );
        assert_eq!(
            ValidationError::FileTooLarge.to_string(),
            "File size exceeds 200MB limit"
        );
        assert_eq!(ValidationError::MissingGene.to_string(), "Please select a gene");
        assert_eq!(
            ValidationError::MissingFile.to_string(),
            "Please upload a FASTA file"
        );
    }

    #[test]
    fn transport_message_hides_cause() {
        let err = PredictionError::transport("connection refused");
        assert_eq!(err.to_string(), "Failed to connect to the prediction API");
    }

    #[test]
    fn service_message_prefers_detail() {
        assert_eq!(
            PredictionError::service(400, Some("Invalid gene".to_string())).to_string(),
            "Invalid gene"
        );
        assert_eq!(
            PredictionError::service(500, None).to_string(),
            GENERIC_PREDICTION_ERROR
        );
    }
}
