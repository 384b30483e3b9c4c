use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path of the prediction endpoint, relative to the service root.
pub const PREDICT_PATH: &str = "/predict/";
/// Multipart text field carrying the gene identifier.
pub const GENE_FIELD: &str = "gene";
/// Multipart file field carrying the sequence file.
pub const FASTA_FILE_FIELD: &str = "fasta_file";

/// Success body of `POST /predict/`. The service sends one of the two fields.
///
/// Items and the message stay loosely typed so an odd value degrades to text
/// instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_diseases: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
}

/// Failure body sent with non-2xx statuses. Validation failures carry a list
/// in `detail` rather than a string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

/// What a successful prediction carries back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Diseases(Vec<String>),
    Message(String),
}

/// Text of a JSON string value, ignoring empty strings and other kinds.
pub fn non_empty_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}

impl PredictResponse {
    /// `predicted_diseases` wins when present, even if empty; `None` when the
    /// body carries neither usable field.
    pub fn into_prediction(self) -> Option<Prediction> {
        if let Some(diseases) = self.predicted_diseases {
            let diseases = diseases
                .into_iter()
                .map(|disease| match disease {
                    Value::String(name) => name,
                    other => other.to_string(),
                })
                .collect();
            return Some(Prediction::Diseases(diseases));
        }
        self.message.and_then(non_empty_text).map(Prediction::Message)
    }
}

impl ErrorResponse {
    pub fn into_detail(self) -> Option<String> {
        self.detail.and_then(non_empty_text)
    }
}
