use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscodeError {
    #[error("transcoder executable not found on PATH")]
    NotFound,
    #[error("transcoder exited with an error:\n{stderr}")]
    Failed { stderr: String },
    #[error("failed to run transcoder: {0}")]
    Io(#[from] std::io::Error),
}

/// Converts an audio file to the PCM WAV format the inference server accepts.
///
/// Implementations handle the external tool invocation; the preparer works
/// with the abstract input/output paths only.
pub trait Transcoder {
    /// Transcodes `input` into a 16 kHz mono s16le PCM WAV at `output`.
    fn transcode_to_wav(&self, input: &Path, output: &Path) -> Result<(), TranscodeError>;
}
