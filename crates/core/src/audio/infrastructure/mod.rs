pub mod ffmpeg_transcoder;
