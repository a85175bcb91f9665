//! Silero VAD - Neural network-based Voice Activity Detection.
//!
//! Uses the voice_activity_detector crate which bundles the Silero ONNX model.
//! More accurate than WebRTC VAD, especially in noisy environments.

use crate::domain::traits::VoiceDetection;
use anyhow::Result;
use std::cell::RefCell;
use voice_activity_detector::VoiceActivityDetector as SileroVad;

const SAMPLE_RATE_HZ: u32 = 16000;
/// Chunk size for Silero VAD at 16kHz (must be 512 samples per V5 model requirements)
const CHUNK_SIZE: usize = 512;

/// Silero-based Voice Activity Detector.
///
/// Uses a neural network model for more accurate speech detection.
///
/// # Thread Safety
///
/// This type is intentionally `!Send` and `!Sync` because the underlying
/// model uses RefCell for interior mutability. Create a new instance for
/// each thread that needs VAD functionality.
pub struct SileroVoiceDetector {
    vad: RefCell<SileroVad>,
    threshold: f32,
}

impl SileroVoiceDetector {
    /// Create a new Silero VAD instance with the default threshold.
    pub fn new() -> Result<Self> {
        Self::with_threshold(0.5)
    }

    /// Create a new Silero VAD instance with a custom speech probability
    /// threshold (0.0-1.0).
    pub fn with_threshold(threshold: f32) -> Result<Self> {
        let vad = SileroVad::builder()
            .sample_rate(SAMPLE_RATE_HZ)
            .chunk_size(CHUNK_SIZE)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create Silero VAD: {}", e))?;

        Ok(Self {
            vad: RefCell::new(vad),
            threshold,
        })
    }

    /// Get the configured speech probability threshold.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

impl VoiceDetection for SileroVoiceDetector {
    fn is_speech(&self, frame: &[f32]) -> Result<bool> {
        if frame.is_empty() {
            return Ok(false);
        }

        let mut vad = self.vad.borrow_mut();

        // Process samples in chunks of CHUNK_SIZE
        // Return true if any chunk has probability above threshold
        for chunk in frame.chunks(CHUNK_SIZE) {
            let probability = vad.predict(chunk.iter().copied());
            if probability >= self.threshold {
                return Ok(true);
            }
        }

        Ok(false)
    }

    fn frame_size(&self) -> usize {
        CHUNK_SIZE
    }

    fn reset(&self) {
        self.vad.borrow_mut().reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silero_vad_new() {
        let vad = SileroVoiceDetector::new();
        assert!(vad.is_ok());
    }

    #[test]
    fn test_silero_vad_with_threshold() {
        let vad = SileroVoiceDetector::with_threshold(0.7);
        assert!(vad.is_ok());
        assert_eq!(vad.unwrap().threshold(), 0.7);
    }

    #[test]
    fn test_silero_vad_frame_size() {
        let vad = SileroVoiceDetector::new().unwrap();
        assert_eq!(vad.frame_size(), CHUNK_SIZE);
    }

    #[test]
    fn test_silero_vad_silence_not_speech() {
        let vad = SileroVoiceDetector::new().unwrap();
        // 1 second of silence
        let silence = vec![0.0f32; SAMPLE_RATE_HZ as usize];
        let result = vad.is_speech(&silence).unwrap();
        assert!(!result, "Silence should not be detected as speech");
    }

    #[test]
    fn test_silero_vad_empty_frame() {
        let vad = SileroVoiceDetector::new().unwrap();
        let result = vad.is_speech(&[]).unwrap();
        assert!(!result);
    }

    #[test]
    fn test_silero_vad_reset() {
        let vad = SileroVoiceDetector::new().unwrap();
        vad.reset();

        let silence = vec![0.0f32; CHUNK_SIZE];
        let result = vad.is_speech(&silence).unwrap();
        assert!(!result);
    }
}
