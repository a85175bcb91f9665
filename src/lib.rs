pub mod audio;
pub mod cli;
pub mod domain;
pub mod models;
pub mod transcription;
pub mod vad;
