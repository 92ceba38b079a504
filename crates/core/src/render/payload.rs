use serde_json::{Map, Value};

/// One time-bounded span of transcribed text from a segments sequence.
///
/// `start`/`end` are seconds; anything non-numeric in the payload becomes
/// `None`. Text is trimmed, empty when absent.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub text: String,
}

impl Segment {
    fn from_value(value: &Value) -> Self {
        Self {
            start: value.get("start").and_then(as_seconds),
            end: value.get("end").and_then(as_seconds),
            text: value
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or("")
                .trim()
                .to_string(),
        }
    }
}

/// Numbers, or strings that parse as numbers; some servers stringify floats.
fn as_seconds(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

/// The object that actually carries `text`/`segments`, wherever it was
/// found in the payload.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptionResult {
    pub text: Option<String>,
    pub segments: Vec<Segment>,
}

impl TranscriptionResult {
    fn from_object(object: &Map<String, Value>) -> Self {
        let text = object.get("text").and_then(Value::as_str).map(String::from);
        let segments = object
            .get("segments")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Segment::from_value).collect())
            .unwrap_or_default();
        Self { text, segments }
    }

    /// Transcript text with surrounding whitespace removed, if non-empty.
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty()).map(str::trim)
    }
}

/// Classified response body, in the priority order the renderer follows.
///
/// The chain is ordered: a bare string never reaches result extraction,
/// and a found result keeps the raw value around for the JSON fallback.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponsePayload {
    /// Body that is not JSON, or a bare JSON string.
    Text(String),
    /// An object carrying `text`/`segments`, directly or under `result`.
    Result {
        result: TranscriptionResult,
        raw: Value,
    },
    /// Valid JSON with no recognizable transcription shape.
    Unstructured(Value),
}

/// Classifies a response body. JSON parsing is always attempted first,
/// regardless of the declared content type; failure falls back to text.
pub fn classify(body: &str) -> ResponsePayload {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return ResponsePayload::Text(body.to_string()),
    };
    if let Value::String(s) = value {
        return ResponsePayload::Text(s);
    }
    match result_object(&value) {
        Some(object) => ResponsePayload::Result {
            result: TranscriptionResult::from_object(object),
            raw: value,
        },
        None => ResponsePayload::Unstructured(value),
    }
}

/// Top-level objects with `text`/`segments` win over a nested `result`.
fn result_object(value: &Value) -> Option<&Map<String, Value>> {
    let object = value.as_object()?;
    if object.contains_key("text") || object.contains_key("segments") {
        return Some(object);
    }
    object.get("result").and_then(Value::as_object)
}
