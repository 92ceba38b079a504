use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;

use crate::audio::domain::transcoder::{TranscodeError, Transcoder};

#[derive(Error, Debug)]
pub enum PrepareError {
    #[error("input is not WAV and local conversion is disabled; re-run without --no-convert or start the server with --convert")]
    UnsupportedFormat,
    #[error("ffmpeg not found in PATH; install ffmpeg or run the server with --convert")]
    TranscoderNotFound,
    #[error("ffmpeg failed to convert the input:\n{stderr}")]
    Transcode { stderr: String },
    #[error("failed to prepare audio: {0}")]
    Io(#[from] std::io::Error),
}

/// An uploadable audio file, plus ownership of any scratch space backing it.
///
/// The `Transcoded` variant keeps its temporary directory alive until the
/// value is dropped, so the converted WAV outlives the HTTP request on
/// every exit path.
#[derive(Debug)]
pub enum PreparedAudio {
    Original(PathBuf),
    Transcoded { path: PathBuf, workdir: TempDir },
}

impl PreparedAudio {
    pub fn path(&self) -> &Path {
        match self {
            PreparedAudio::Original(path) => path,
            PreparedAudio::Transcoded { path, .. } => path,
        }
    }
}

/// Decides whether the source needs transcoding and performs it if allowed.
///
/// WAV sources (by extension, case-insensitive) pass through untouched.
/// Anything else is converted into a fresh temporary directory, which is
/// released immediately if the transcoder fails.
pub fn prepare(
    source: &Path,
    allow_convert: bool,
    transcoder: &dyn Transcoder,
) -> Result<PreparedAudio, PrepareError> {
    if is_wav(source) {
        return Ok(PreparedAudio::Original(source.to_path_buf()));
    }
    if !allow_convert {
        return Err(PrepareError::UnsupportedFormat);
    }

    let workdir = TempDir::new()?;
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string());
    let output = workdir.path().join(format!("{stem}.wav"));

    // A failed conversion drops `workdir` here, removing any partial output.
    transcoder
        .transcode_to_wav(source, &output)
        .map_err(|e| match e {
            TranscodeError::NotFound => PrepareError::TranscoderNotFound,
            TranscodeError::Failed { stderr } => PrepareError::Transcode { stderr },
            TranscodeError::Io(e) => PrepareError::Io(e),
        })?;

    log::info!("Converted to WAV for upload: {}", output.display());
    Ok(PreparedAudio::Transcoded {
        path: output,
        workdir,
    })
}

pub fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("wav"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;

    struct StubTranscoder {
        result: Box<dyn Fn(&Path, &Path) -> Result<(), TranscodeError>>,
        calls: Cell<usize>,
    }

    impl StubTranscoder {
        fn new(result: impl Fn(&Path, &Path) -> Result<(), TranscodeError> + 'static) -> Self {
            Self {
                result: Box::new(result),
                calls: Cell::new(0),
            }
        }
    }

    impl Transcoder for StubTranscoder {
        fn transcode_to_wav(&self, input: &Path, output: &Path) -> Result<(), TranscodeError> {
            self.calls.set(self.calls.get() + 1);
            (self.result)(input, output)
        }
    }

    fn write_wav_named(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"RIFF").unwrap();
        path
    }

    #[test]
    fn test_wav_source_passes_through_without_transcoding() {
        let tmp = TempDir::new().unwrap();
        let source = write_wav_named(tmp.path(), "speech.wav");
        let transcoder = StubTranscoder::new(|_, _| panic!("should not be called"));

        let prepared = prepare(&source, true, &transcoder).unwrap();
        assert_eq!(prepared.path(), source.as_path());
        assert!(matches!(prepared, PreparedAudio::Original(_)));
        assert_eq!(transcoder.calls.get(), 0);
    }

    #[test]
    fn test_wav_extension_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        let source = write_wav_named(tmp.path(), "speech.WAV");
        let transcoder = StubTranscoder::new(|_, _| panic!("should not be called"));

        let prepared = prepare(&source, true, &transcoder).unwrap();
        assert!(matches!(prepared, PreparedAudio::Original(_)));
    }

    #[test]
    fn test_non_wav_with_conversion_disabled_is_unsupported() {
        let tmp = TempDir::new().unwrap();
        let source = write_wav_named(tmp.path(), "speech.m4a");
        let transcoder = StubTranscoder::new(|_, _| panic!("should not be called"));

        let err = prepare(&source, false, &transcoder).unwrap_err();
        assert!(matches!(err, PrepareError::UnsupportedFormat));
        assert_eq!(transcoder.calls.get(), 0);
    }

    #[test]
    fn test_non_wav_is_transcoded_into_scratch_dir() {
        let tmp = TempDir::new().unwrap();
        let source = write_wav_named(tmp.path(), "speech.m4a");
        let transcoder = StubTranscoder::new(|_, output| {
            fs::write(output, b"RIFF").unwrap();
            Ok(())
        });

        let prepared = prepare(&source, true, &transcoder).unwrap();
        assert_eq!(transcoder.calls.get(), 1);
        assert!(prepared.path().exists());
        assert_eq!(prepared.path().file_name().unwrap(), "speech.wav");
        match &prepared {
            PreparedAudio::Transcoded { path, workdir } => {
                assert!(path.starts_with(workdir.path()));
            }
            PreparedAudio::Original(_) => panic!("expected transcoded audio"),
        }
    }

    #[test]
    fn test_scratch_dir_is_removed_when_prepared_audio_drops() {
        let tmp = TempDir::new().unwrap();
        let source = write_wav_named(tmp.path(), "speech.m4a");
        let transcoder = StubTranscoder::new(|_, output| {
            fs::write(output, b"RIFF").unwrap();
            Ok(())
        });

        let prepared = prepare(&source, true, &transcoder).unwrap();
        let scratch = prepared.path().parent().unwrap().to_path_buf();
        assert!(scratch.exists());
        drop(prepared);
        assert!(!scratch.exists());
    }

    #[test]
    fn test_missing_transcoder_maps_to_not_found() {
        let tmp = TempDir::new().unwrap();
        let source = write_wav_named(tmp.path(), "speech.ogg");
        let transcoder = StubTranscoder::new(|_, _| Err(TranscodeError::NotFound));

        let err = prepare(&source, true, &transcoder).unwrap_err();
        assert!(matches!(err, PrepareError::TranscoderNotFound));
    }

    #[test]
    fn test_failed_transcode_reports_stderr_and_removes_scratch_dir() {
        use std::rc::Rc;

        let tmp = TempDir::new().unwrap();
        let source = write_wav_named(tmp.path(), "speech.m4a");
        let seen_output: Rc<Cell<Option<PathBuf>>> = Rc::new(Cell::new(None));
        let seen = seen_output.clone();
        let transcoder = StubTranscoder::new(move |_, output| {
            // Leave a partial file behind; cleanup must still remove it.
            fs::write(output, b"partial").unwrap();
            seen.set(Some(output.to_path_buf()));
            Err(TranscodeError::Failed {
                stderr: "Invalid data found when processing input".to_string(),
            })
        });

        let err = prepare(&source, true, &transcoder).unwrap_err();
        match err {
            PrepareError::Transcode { stderr } => {
                assert!(stderr.contains("Invalid data"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        let partial = seen_output.take().expect("transcoder was called");
        assert!(!partial.exists());
        assert!(!partial.parent().unwrap().exists());
    }
}
