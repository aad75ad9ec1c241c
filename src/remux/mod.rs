pub mod command_builder;
pub mod ffmpeg;

pub use ffmpeg::{DispositionRewriter, Install};
