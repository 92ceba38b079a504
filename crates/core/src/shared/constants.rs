pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/inference";

pub const DEFAULT_AUDIO_FILE: &str = "workspace/sample.m4a";

pub const DEFAULT_TEMPERATURE: f64 = 0.0;
pub const DEFAULT_TEMPERATURE_INC: f64 = 0.2;

/// Request timeout in seconds; whisper-server can take minutes on long audio.
pub const DEFAULT_TIMEOUT_SECS: f64 = 300.0;

/// Sample rate whisper-server expects for uploaded WAV audio.
pub const TARGET_SAMPLE_RATE: u32 = 16000;

pub const RESPONSE_FORMATS: &[&str] = &["json", "text", "srt", "vtt", "tsv"];

pub const WAV_CONTENT_TYPE: &str = "audio/wav";
pub const BINARY_CONTENT_TYPE: &str = "application/octet-stream";
