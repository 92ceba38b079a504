use std::time::Duration;

/// Parameters for one transcription request, immutable once built.
///
/// `response_format` is forwarded to the server verbatim; the CLI restricts
/// it to the set whisper-server understands.
#[derive(Clone, Debug)]
pub struct TranscriptionRequest {
    pub endpoint: String,
    pub response_format: String,
    pub temperature: f64,
    pub temperature_inc: f64,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub timeout: Duration,
}

impl TranscriptionRequest {
    /// The non-file multipart fields, in the order they are sent.
    ///
    /// `language` and `prompt` are skipped when absent or empty.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("temperature", self.temperature.to_string()),
            ("temperature_inc", self.temperature_inc.to_string()),
            ("response_format", self.response_format.clone()),
        ];
        if let Some(language) = self.language.as_deref().filter(|s| !s.is_empty()) {
            fields.push(("language", language.to_string()));
        }
        if let Some(prompt) = self.prompt.as_deref().filter(|s| !s.is_empty()) {
            fields.push(("prompt", prompt.to_string()));
        }
        fields
    }
}
