use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::audio::domain::transcoder::{TranscodeError, Transcoder};
use crate::shared::constants::TARGET_SAMPLE_RATE;

/// Transcodes audio by shelling out to the `ffmpeg` binary.
///
/// Output is fixed to what whisper-server accepts without `--convert`:
/// 16 kHz, mono, signed 16-bit little-endian PCM WAV.
pub struct FfmpegTranscoder {
    program: PathBuf,
}

impl FfmpegTranscoder {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
        }
    }

    /// Uses a specific executable instead of resolving `ffmpeg` from PATH.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcoder for FfmpegTranscoder {
    fn transcode_to_wav(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
        log::debug!(
            "Running {} on {} -> {}",
            self.program.display(),
            input.display(),
            output.display()
        );

        let result = Command::new(&self.program)
            .arg("-hide_banner")
            .args(["-loglevel", "error"])
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-ar", &TARGET_SAMPLE_RATE.to_string()])
            .args(["-ac", "1"])
            .args(["-c:a", "pcm_s16le"])
            .arg(output)
            .output();

        let out = result.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                TranscodeError::NotFound
            } else {
                TranscodeError::Io(e)
            }
        })?;

        if !out.status.success() {
            return Err(TranscodeError::Failed {
                stderr: String::from_utf8_lossy(&out.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
