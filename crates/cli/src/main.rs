use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;

use transcribe_core::audio::domain::audio_preparer::{prepare, PrepareError};
use transcribe_core::audio::infrastructure::ffmpeg_transcoder::FfmpegTranscoder;
use transcribe_core::inference::client::{InferenceClient, InferenceError};
use transcribe_core::inference::request::TranscriptionRequest;
use transcribe_core::render::console::{panel, render_response};
use transcribe_core::shared::constants::{
    DEFAULT_AUDIO_FILE, DEFAULT_ENDPOINT, DEFAULT_TEMPERATURE, DEFAULT_TEMPERATURE_INC,
    DEFAULT_TIMEOUT_SECS, RESPONSE_FORMATS,
};

/// Send audio to a whisper-server inference endpoint.
#[derive(Parser)]
#[command(name = "transcribe")]
struct Cli {
    /// Inference endpoint URL.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    url: String,

    /// Path to the audio file to transcribe.
    #[arg(long, default_value = DEFAULT_AUDIO_FILE)]
    file: PathBuf,

    /// Server response format.
    #[arg(
        long,
        default_value = "json",
        value_parser = clap::builder::PossibleValuesParser::new(RESPONSE_FORMATS.iter().copied())
    )]
    response_format: String,

    /// Decode temperature.
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f64,

    /// Temperature increment for fallback decoding.
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE_INC)]
    temperature_inc: f64,

    /// Spoken language (e.g. en).
    #[arg(long)]
    language: Option<String>,

    /// Optional initial prompt.
    #[arg(long)]
    prompt: Option<String>,

    /// Do not convert non-WAV input to WAV before upload.
    #[arg(long)]
    no_convert: bool,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: f64,
}

#[derive(Debug)]
enum AppError {
    InvalidInput(String),
    Prepare(PrepareError),
    Inference(InferenceError),
    HttpStatus(String),
}

impl AppError {
    /// 2 for unusable input or audio, 1 for network and server failures.
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidInput(_) | AppError::Prepare(_) => 2,
            AppError::Inference(_) | AppError::HttpStatus(_) => 1,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidInput(msg) => write!(f, "{msg}"),
            AppError::Prepare(e) => write!(f, "{e}"),
            AppError::Inference(e) => write!(f, "{e}"),
            AppError::HttpStatus(status_line) => {
                write!(f, "server returned HTTP {status_line}")
            }
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    validate(&cli)?;

    let transcoder = FfmpegTranscoder::new();
    let prepared = prepare(&cli.file, !cli.no_convert, &transcoder).map_err(AppError::Prepare)?;

    let request = TranscriptionRequest {
        endpoint: cli.url,
        response_format: cli.response_format,
        temperature: cli.temperature,
        temperature_inc: cli.temperature_inc,
        language: cli.language,
        prompt: cli.prompt,
        timeout: Duration::from_secs_f64(cli.timeout),
    };

    log::info!("Source: {}", cli.file.display());
    log::info!("Upload: {}", prepared.path().display());
    log::info!("URL: {}", request.endpoint);
    log::info!("Format: {}", request.response_format);

    let client = InferenceClient::new(request.timeout).map_err(AppError::Inference)?;
    let response = client
        .transcribe(&request, prepared.path())
        .map_err(AppError::Inference)?;
    // `prepared` stays alive to here, so a transcoding scratch dir outlives
    // the request on success and failure alike.

    if response.is_error() {
        let body = response.body.trim();
        let body = if body.is_empty() {
            "(empty response body)"
        } else {
            body
        };
        print!("{}", panel(&format!("HTTP {}", response.status_line()), body));
        return Err(AppError::HttpStatus(response.status_line()));
    }

    print!("{}", render_response(&response));
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), AppError> {
    if !cli.file.is_file() {
        return Err(AppError::InvalidInput(format!(
            "File not found: {}",
            cli.file.display()
        )));
    }
    if !cli.timeout.is_finite() || cli.timeout <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "Timeout must be a positive number of seconds, got {}",
            cli.timeout
        )));
    }
    Ok(())
}
