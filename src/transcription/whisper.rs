//! Whisper inference via whisper-rs (whisper.cpp bindings).

use crate::domain::traits::Transcription;
use crate::domain::types::Segment;
use anyhow::{Context, Result};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

pub struct WhisperSTT {
    ctx: WhisperContext,
    model_path: String,
}

impl WhisperSTT {
    pub fn new(model_path: &str) -> Result<Self> {
        let ctx = WhisperContext::new_with_params(model_path, WhisperContextParameters::default())
            .with_context(|| format!("Failed to load Whisper model from {}", model_path))?;

        Ok(Self {
            ctx,
            model_path: model_path.to_string(),
        })
    }

    /// Transcribe 16kHz mono samples, returning segments in order.
    ///
    /// `language` is passed through verbatim; when absent, "auto" is used
    /// because the bindings otherwise default to English rather than
    /// detecting the spoken language.
    pub fn transcribe(&self, samples: &[f32], language: Option<&str>) -> Result<Vec<Segment>> {
        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        let lang = language.unwrap_or("auto");
        params.set_language(Some(lang));

        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_translate(false);
        params.set_n_threads(num_threads());

        let mut state = self
            .ctx
            .create_state()
            .context("Failed to create Whisper state")?;
        state
            .full(params, samples)
            .context("Whisper inference failed")?;

        let num_segments = state.full_n_segments()?;
        let mut segments = Vec::with_capacity(num_segments as usize);

        for i in 0..num_segments {
            let text = state.full_get_segment_text(i)?;
            // Segment timestamps are in centiseconds
            let start = state.full_get_segment_t0(i)? as f64 / 100.0;
            let end = state.full_get_segment_t1(i)? as f64 / 100.0;
            segments.push(Segment { text, start, end });
        }

        Ok(segments)
    }
}

fn num_threads() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(4) as i32
}

// === Trait Implementation ===

impl Transcription for WhisperSTT {
    fn transcribe(&self, samples: &[f32], language: Option<&str>) -> Result<Vec<Segment>> {
        WhisperSTT::transcribe(self, samples, language)
    }

    fn model_name(&self) -> Option<String> {
        Some(self.model_path.clone())
    }
}
