pub mod bored;
pub mod misc;
