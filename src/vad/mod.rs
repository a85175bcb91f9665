//! Voice Activity Detection module.
//!
//! Provides multiple VAD implementations:
//! - Silero VAD: Neural network-based, more accurate in noisy environments
//! - WebRTC VAD: Fast, energy-based, good for quiet environments
//!
//! The span-extraction layer on top of the detectors removes silent
//! stretches from a prepared audio buffer before transcription.

mod silero;
mod webrtc;

pub use silero::SileroVoiceDetector;
pub use webrtc::WebRtcVoiceDetector;

use crate::domain::traits::VoiceDetection;
use anyhow::Result;

/// Samples per millisecond at the 16kHz Whisper rate.
const SAMPLES_PER_MS: usize = 16;

/// VAD engine selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VadEngine {
    /// Silero VAD (neural network, more accurate)
    #[default]
    Silero,
    /// WebRTC-based VAD (fast, energy-based)
    WebRtc,
}

/// Configuration for VAD creation and speech-span extraction.
pub struct VadConfig {
    pub engine: VadEngine,
    /// Speech probability threshold for Silero (0.0-1.0)
    pub silero_threshold: f32,
    /// Runs of speech shorter than this are discarded
    pub min_speech_ms: u32,
    /// Gaps of silence shorter than this do not split a speech run
    pub min_silence_ms: u32,
    /// Padding kept around each detected speech run
    pub speech_pad_ms: u32,
}

impl Default for VadConfig {
    fn default() -> Self {
        Self {
            engine: VadEngine::Silero,
            silero_threshold: 0.5,
            min_speech_ms: 500,
            min_silence_ms: 1000,
            speech_pad_ms: 300,
        }
    }
}

/// A half-open range of samples `[start, end)` classified as speech.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechSpan {
    pub start: usize,
    pub end: usize,
}

impl SpeechSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

/// Create a VAD instance based on configuration.
///
/// # Returns
/// A boxed trait object implementing VoiceDetection.
/// Note: The returned object is NOT Send/Sync - create in the thread where it will be used.
pub fn create_vad(config: &VadConfig) -> Result<Box<dyn VoiceDetection>> {
    match config.engine {
        VadEngine::Silero => {
            let vad = SileroVoiceDetector::with_threshold(config.silero_threshold)?;
            Ok(Box::new(vad))
        }
        VadEngine::WebRtc => {
            let vad = WebRtcVoiceDetector::new()?;
            Ok(Box::new(vad))
        }
    }
}

/// Scan a 16kHz mono buffer and return the spans classified as speech.
///
/// Walks the buffer in detector-sized frames (a trailing partial frame is
/// ignored), then merges runs separated by less than `min_silence_ms`,
/// drops runs shorter than `min_speech_ms`, and pads the survivors by
/// `speech_pad_ms` on each side, clamped to the buffer.
pub fn detect_speech_spans(
    samples: &[f32],
    vad: &dyn VoiceDetection,
    config: &VadConfig,
) -> Result<Vec<SpeechSpan>> {
    vad.reset();

    let frame = vad.frame_size();
    let mut raw: Vec<SpeechSpan> = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut pos = 0;

    while pos + frame <= samples.len() {
        let speech = vad.is_speech(&samples[pos..pos + frame])?;
        match (speech, run_start) {
            (true, None) => run_start = Some(pos),
            (false, Some(start)) => {
                raw.push(SpeechSpan { start, end: pos });
                run_start = None;
            }
            _ => {}
        }
        pos += frame;
    }
    if let Some(start) = run_start {
        raw.push(SpeechSpan { start, end: pos });
    }

    let min_silence = config.min_silence_ms as usize * SAMPLES_PER_MS;
    let min_speech = config.min_speech_ms as usize * SAMPLES_PER_MS;
    let pad = config.speech_pad_ms as usize * SAMPLES_PER_MS;

    // Merge runs separated by short silence
    let mut merged: Vec<SpeechSpan> = Vec::new();
    for span in raw {
        match merged.last_mut() {
            Some(prev) if span.start - prev.end < min_silence => prev.end = span.end,
            _ => merged.push(span),
        }
    }

    merged.retain(|s| s.len() >= min_speech);

    // Pad and re-merge overlapping spans
    let mut padded: Vec<SpeechSpan> = Vec::new();
    for span in merged {
        let start = span.start.saturating_sub(pad);
        let end = (span.end + pad).min(samples.len());
        match padded.last_mut() {
            Some(prev) if start <= prev.end => prev.end = end,
            _ => padded.push(SpeechSpan { start, end }),
        }
    }

    Ok(padded)
}

/// Apply the voice-activity filter to a prepared 16kHz mono buffer.
///
/// Returns the concatenated speech-only samples. An empty result means
/// no speech was detected.
pub fn filter_speech(samples: &[f32], config: &VadConfig) -> Result<Vec<f32>> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }

    let vad = create_vad(config)?;
    let spans = detect_speech_spans(samples, vad.as_ref(), config)?;

    let total: usize = spans.iter().map(SpeechSpan::len).sum();
    let mut filtered = Vec::with_capacity(total);
    for span in &spans {
        filtered.extend_from_slice(&samples[span.start..span.end]);
    }

    log::debug!(
        "VAD kept {} of {} samples across {} span(s)",
        filtered.len(),
        samples.len(),
        spans.len()
    );

    Ok(filtered)
}
