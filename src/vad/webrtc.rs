//! WebRTC-based Voice Activity Detection.
//!
//! Uses the webrtc-vad crate for energy-based VAD.
//! Fast and lightweight, works well in quiet environments.

use crate::domain::traits::VoiceDetection;
use anyhow::Result;
use std::cell::RefCell;
use webrtc_vad::{SampleRate, Vad, VadMode};

const SAMPLE_RATE_HZ: u32 = 16000;
const FRAME_SIZE_MS: u32 = 30; // 30ms frames for VAD
const FRAME_SIZE_SAMPLES: usize = (SAMPLE_RATE_HZ as usize * FRAME_SIZE_MS as usize) / 1000;

/// WebRTC-based Voice Activity Detector.
///
/// # Thread Safety
///
/// This type is intentionally `!Send` and `!Sync` because the underlying
/// `webrtc_vad::Vad` type is not thread-safe. Create a new instance for
/// each thread that needs VAD functionality.
pub struct WebRtcVoiceDetector {
    vad: RefCell<Vad>,
}

impl WebRtcVoiceDetector {
    /// Create a new VAD instance.
    pub fn new() -> Result<Self> {
        let vad = Vad::new_with_rate_and_mode(SampleRate::Rate16kHz, VadMode::Aggressive);

        Ok(Self {
            vad: RefCell::new(vad),
        })
    }
}

impl VoiceDetection for WebRtcVoiceDetector {
    fn is_speech(&self, frame: &[f32]) -> Result<bool> {
        if frame.len() < FRAME_SIZE_SAMPLES {
            return Ok(false);
        }

        // Convert f32 samples to i16 for VAD
        let i16_samples: Vec<i16> = frame
            .iter()
            .map(|&s| (s * 32767.0).clamp(-32768.0, 32767.0) as i16)
            .collect();

        let mut vad = self.vad.borrow_mut();
        let result = vad
            .is_voice_segment(&i16_samples[..FRAME_SIZE_SAMPLES])
            .map_err(|_| anyhow::anyhow!("Invalid frame length"))?;

        Ok(result)
    }

    fn frame_size(&self) -> usize {
        FRAME_SIZE_SAMPLES
    }

    fn reset(&self) {
        *self.vad.borrow_mut() =
            Vad::new_with_rate_and_mode(SampleRate::Rate16kHz, VadMode::Aggressive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webrtc_vad_new() {
        let vad = WebRtcVoiceDetector::new();
        assert!(vad.is_ok());
    }

    #[test]
    fn test_webrtc_vad_frame_size() {
        let vad = WebRtcVoiceDetector::new().unwrap();
        assert_eq!(vad.frame_size(), 480);
    }

    #[test]
    fn test_webrtc_vad_silence_not_speech() {
        let vad = WebRtcVoiceDetector::new().unwrap();
        let silence = vec![0.0f32; FRAME_SIZE_SAMPLES];
        let result = vad.is_speech(&silence).unwrap();
        assert!(!result, "Silence should not be detected as speech");
    }

    #[test]
    fn test_webrtc_vad_short_frame_not_speech() {
        let vad = WebRtcVoiceDetector::new().unwrap();
        let short = vec![0.0f32; FRAME_SIZE_SAMPLES - 1];
        let result = vad.is_speech(&short).unwrap();
        assert!(!result, "Too-short frames should return false");
    }

    #[test]
    fn test_webrtc_vad_empty_frame_not_speech() {
        let vad = WebRtcVoiceDetector::new().unwrap();
        let result = vad.is_speech(&[]).unwrap();
        assert!(!result);
    }

    #[test]
    fn test_webrtc_vad_reset() {
        let vad = WebRtcVoiceDetector::new().unwrap();
        vad.reset();

        let silence = vec![0.0f32; FRAME_SIZE_SAMPLES];
        let result = vad.is_speech(&silence).unwrap();
        assert!(!result);
    }
}
