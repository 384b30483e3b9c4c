//! Multipart request construction and response interpretation for `POST /predict/`.

use std::{io, sync::Arc};

use bytes::Bytes;
use reqwest::{
    multipart::{Form, Part},
    Body, StatusCode,
};
use serde_json::Value;
use shared::{
    error::PredictionError,
    protocol::{ErrorResponse, PredictResponse, FASTA_FILE_FIELD, GENE_FIELD},
};

use crate::{input::FileSource, CandidateFile, PredictionRequest, PredictionResult};

/// Builds the two-part form: the gene as text and the file under its original name.
/// The file is opened here, so a vanished file surfaces as a transport failure.
pub async fn build_form(request: &PredictionRequest) -> Result<Form, PredictionError> {
    let (body, length) = upload_body(&request.file).await.map_err(|err| {
        PredictionError::transport(format!(
            "failed to open '{}' for upload: {err}",
            request.file.name()
        ))
    })?;
    let mime = mime_guess::from_path(request.file.name()).first_or_octet_stream();
    let file_part = Part::stream_with_length(body, length)
        .file_name(request.file.name().to_string())
        .mime_str(mime.as_ref())
        .map_err(|err| PredictionError::transport(format!("invalid content type: {err}")))?;

    Ok(Form::new()
        .text(GENE_FIELD, request.gene.as_str())
        .part(FASTA_FILE_FIELD, file_part))
}

/// Streams files on disk; in-memory contents are shared, not copied.
async fn upload_body(file: &CandidateFile) -> io::Result<(Body, u64)> {
    match file.source() {
        FileSource::Path(path) => {
            let handle = tokio::fs::File::open(path).await?;
            let length = handle.metadata().await?.len();
            Ok((Body::from(handle), length))
        }
        FileSource::Memory(contents) => {
            let length = contents.len() as u64;
            Ok((Body::from(Bytes::from_owner(Arc::clone(contents))), length))
        }
    }
}

/// Maps a received response to a prediction. The body must be JSON whatever the
/// status; `Ok(None)` means a success body carried neither known field.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> PredictionResult {
    if !status.is_success() {
        let json: Value = serde_json::from_slice(body).map_err(not_json)?;
        let detail = serde_json::from_value::<ErrorResponse>(json)
            .ok()
            .and_then(ErrorResponse::into_detail);
        return Err(PredictionError::service(status.as_u16(), detail));
    }

    let response: PredictResponse = serde_json::from_slice(body).map_err(not_json)?;
    Ok(response.into_prediction())
}

fn not_json(err: serde_json::Error) -> PredictionError {
    PredictionError::transport(format!("response body is not a prediction payload: {err}"))
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
