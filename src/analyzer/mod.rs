pub mod ffprobe;

pub use ffprobe::inspect;
