use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use reqwest::blocking::multipart::{Form, Part};
use reqwest::StatusCode;
use thiserror::Error;

use crate::audio::domain::audio_preparer::is_wav;
use crate::inference::request::TranscriptionRequest;
use crate::shared::constants::{BINARY_CONTENT_TYPE, WAV_CONTENT_TYPE};

#[derive(Error, Debug)]
pub enum InferenceError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("failed to read upload file {path}: {source}")]
    ReadUpload {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The raw outcome of one inference POST.
///
/// HTTP error statuses are carried here rather than raised, so the caller
/// can report the status line and body itself.
pub struct InferenceResponse {
    pub status: StatusCode,
    pub body: String,
    pub elapsed: Duration,
}

impl InferenceResponse {
    /// `"200 OK"`, or just the code when the reason phrase is unknown.
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{} {}", self.status.as_u16(), reason),
            None => self.status.as_u16().to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status.is_client_error() || self.status.is_server_error()
    }
}

/// Blocking HTTP client for a whisper-server style inference endpoint.
pub struct InferenceClient {
    http: reqwest::blocking::Client,
}

impl InferenceClient {
    pub fn new(timeout: Duration) -> Result<Self, InferenceError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Performs exactly one multipart POST; no retries.
    ///
    /// Elapsed time covers the HTTP exchange only, not audio preparation.
    pub fn transcribe(
        &self,
        request: &TranscriptionRequest,
        upload: &Path,
    ) -> Result<InferenceResponse, InferenceError> {
        let form = build_form(request, upload)?;

        log::info!("POST {} ({})", request.endpoint, upload.display());
        let started = Instant::now();
        let response = self.http.post(&request.endpoint).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;
        let elapsed = started.elapsed();

        Ok(InferenceResponse {
            status,
            body,
            elapsed,
        })
    }
}

fn build_form(request: &TranscriptionRequest, upload: &Path) -> Result<Form, InferenceError> {
    let mut form = Form::new();
    for (name, value) in request.form_fields() {
        form = form.text(name, value);
    }

    let bytes = fs::read(upload).map_err(|e| InferenceError::ReadUpload {
        path: upload.display().to_string(),
        source: e,
    })?;
    let file_name = upload
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(content_type_for(upload))?;
    Ok(form.part("file", part))
}

/// Content type for the upload: `audio/wav` for WAV paths, a generic
/// binary type otherwise.
pub fn content_type_for(path: &Path) -> &'static str {
    if is_wav(path) {
        WAV_CONTENT_TYPE
    } else {
        BINARY_CONTENT_TYPE
    }
}
