//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

/// Audio Transcribe - Offline speech-to-text for audio files
#[derive(Parser, Debug)]
#[command(name = "audio-transcribe")]
#[command(about = "Offline speech-to-text transcription using Whisper", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the audio file (WAV) to transcribe
    pub audio_path: PathBuf,

    /// Model size (tiny, base, small, medium, large) or path to a ggml model file
    #[arg(default_value = "small")]
    pub model_size: String,

    /// Language hint (e.g. "en", "ar"); auto-detected when omitted
    pub language: Option<String>,
}
