//! Core domain traits for dependency inversion.
//!
//! These traits define contracts between layers without depending on
//! concrete implementations. They enable:
//! - Testability via mock implementations
//! - Flexibility to swap implementations
//! - Clear API boundaries

use crate::domain::types::Segment;
use anyhow::Result;

/// Speech-to-text transcription abstraction.
///
/// Implementors convert audio samples to ordered text segments.
pub trait Transcription {
    /// Transcribe audio samples to text segments.
    ///
    /// # Arguments
    /// * `samples` - Audio samples at 16kHz mono
    /// * `language` - Language code (e.g. "en", "ar"); `None` means auto-detect
    fn transcribe(&self, samples: &[f32], language: Option<&str>) -> Result<Vec<Segment>>;

    /// Get the name/path of the loaded model.
    fn model_name(&self) -> Option<String>;
}

/// Voice activity detection abstraction.
///
/// Implementors classify fixed-size audio frames as speech or non-speech.
///
/// Note: Uses `&self` with interior mutability pattern to allow
/// implementations to use `RefCell` or similar for thread-local state.
pub trait VoiceDetection {
    /// Check if an audio frame contains speech.
    ///
    /// # Arguments
    /// * `frame` - Audio frame at 16kHz mono, `frame_size()` samples long
    fn is_speech(&self, frame: &[f32]) -> Result<bool>;

    /// Number of samples per analysis frame at 16kHz.
    fn frame_size(&self) -> usize;

    /// Reset internal state before scanning a new buffer.
    fn reset(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test implementation of Transcription.
    struct TestTranscription;

    impl Transcription for TestTranscription {
        fn transcribe(&self, _samples: &[f32], _language: Option<&str>) -> Result<Vec<Segment>> {
            Ok(vec![Segment::new("hello", 0.0, 1.0)])
        }

        fn model_name(&self) -> Option<String> {
            Some("test".to_string())
        }
    }

    #[test]
    fn test_transcription_trait() {
        let stt = TestTranscription;
        let segments = stt.transcribe(&[0.0; 100], None).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "hello");
        assert_eq!(stt.model_name().as_deref(), Some("test"));
    }
}
