pub mod audio;
pub mod inference;
pub mod render;
pub mod shared;
