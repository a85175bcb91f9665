pub mod whisper;

pub use whisper::WhisperSTT;
