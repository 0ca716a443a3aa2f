/// `ffmpeg` subprocess sink for MP4 output.
pub mod ffmpeg;
/// PNG sequence sink.
pub mod png;
/// Sink trait and in-memory sink.
pub mod sink;
