//! CLI transcription command implementation.

use crate::audio;
use crate::cli::Cli;
use crate::domain::traits::Transcription;
use crate::domain::types::Segment;
use crate::models;
use crate::transcription::WhisperSTT;
use crate::vad::{self, VadConfig};
use anyhow::Result;
use log::info;

/// Run the transcribe command.
pub fn run(cli: &Cli) -> Result<()> {
    // 1. Validate the model identifier before any heavy work
    let model_source = models::parse_model_arg(&cli.model_size)?;

    // 2. Read and prepare the audio
    let wav = audio::read_wav(&cli.audio_path)?;
    info!(
        "Read {}: {} channels, {}Hz, {:.1}s",
        cli.audio_path.display(),
        wav.channels,
        wav.sample_rate,
        wav.duration_secs
    );
    let samples = audio::prepare_for_whisper(&wav)?;

    // 3. Voice-activity filter
    let speech = vad::filter_speech(&samples, &VadConfig::default())?;
    if speech.is_empty() {
        info!("No speech detected, nothing to transcribe");
        return Ok(());
    }

    // 4. Provision and load the model
    let model_path = models::ensure_model(&model_source)?;
    info!("Loading model: {}", model_path.display());
    let stt = WhisperSTT::new(&model_path.to_string_lossy())?;

    // 5. Transcribe and print
    info!(
        "Transcribing (language: {})...",
        cli.language.as_deref().unwrap_or("auto")
    );
    let text = transcribe_to_text(&stt, &speech, cli.language.as_deref())?;
    if !text.is_empty() {
        println!("{}", text);
    }

    Ok(())
}

/// Transcribe prepared speech samples and format the transcript.
fn transcribe_to_text(
    backend: &dyn Transcription,
    speech: &[f32],
    language: Option<&str>,
) -> Result<String> {
    let segments = backend.transcribe(speech, language)?;

    for segment in &segments {
        log::debug!(
            "[{:6.2}s -> {:6.2}s] {}",
            segment.start,
            segment.end,
            segment.text.trim()
        );
    }

    Ok(join_segments(&segments))
}

/// Join segment texts with newlines.
///
/// Each segment's text is trimmed, and the joined result is trimmed so the
/// transcript carries no leading or trailing blank lines.
fn join_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
