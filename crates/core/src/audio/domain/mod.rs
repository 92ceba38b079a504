pub mod audio_preparer;
pub mod transcoder;
