pub mod console;
pub mod payload;
pub mod timecode;
