//! Integration test: audio decode and preparation pipeline.
//!
//! Round-trips real WAV files written with hound through the decode,
//! downmix, resample, and voice-activity stages.

use audio_transcribe::audio::{prepare_for_whisper, read_wav};
use audio_transcribe::vad::{filter_speech, VadConfig};
use std::path::{Path, PathBuf};

fn write_wav(
    dir: &Path,
    name: &str,
    sample_rate: u32,
    channels: u16,
    samples: &[i16],
) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
    for &s in samples {
        writer.write_sample(s).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
    path
}

#[test]
fn read_wav_reports_spec_and_duration() {
    let dir = tempfile::tempdir().unwrap();
    // 0.5s of 44.1kHz stereo silence
    let samples = vec![0i16; 44100];
    let path = write_wav(dir.path(), "stereo.wav", 44100, 2, &samples);

    let wav = read_wav(&path).unwrap();
    assert_eq!(wav.sample_rate, 44100);
    assert_eq!(wav.channels, 2);
    assert!((wav.duration_secs - 0.5).abs() < 0.01, "{}", wav.duration_secs);
}

#[test]
fn prepare_downmixes_and_resamples() {
    let dir = tempfile::tempdir().unwrap();
    // 1s of 44.1kHz stereo
    let samples = vec![0i16; 88200];
    let path = write_wav(dir.path(), "stereo.wav", 44100, 2, &samples);

    let wav = read_wav(&path).unwrap();
    let prepared = prepare_for_whisper(&wav).unwrap();

    // 1s at 16kHz mono
    let ratio = prepared.len() as f64 / 16000.0;
    assert!((ratio - 1.0).abs() < 0.05, "got {} samples", prepared.len());
}

#[test]
fn decoded_sine_stays_in_unit_range() {
    let dir = tempfile::tempdir().unwrap();
    let samples: Vec<i16> = (0..16000)
        .map(|i| {
            let t = i as f64 / 16000.0;
            ((2.0 * std::f64::consts::PI * 440.0 * t).sin() * 0.8 * i16::MAX as f64) as i16
        })
        .collect();
    let path = write_wav(dir.path(), "sine.wav", 16000, 1, &samples);

    let wav = read_wav(&path).unwrap();
    assert!(wav.samples.iter().all(|&s| (-1.0..=1.0).contains(&s)));
}

#[test]
fn silence_survives_no_vad_span() {
    let dir = tempfile::tempdir().unwrap();
    let samples = vec![0i16; 32000];
    let path = write_wav(dir.path(), "silence.wav", 16000, 1, &samples);

    let wav = read_wav(&path).unwrap();
    let prepared = prepare_for_whisper(&wav).unwrap();
    let speech = filter_speech(&prepared, &VadConfig::default()).unwrap();

    assert!(speech.is_empty(), "silence should yield no speech samples");
}

#[test]
fn read_wav_nonexistent_path_errors() {
    let result = read_wav(Path::new("/nonexistent/audio.wav"));
    assert!(result.is_err());
}

#[test]
fn read_wav_garbage_bytes_errors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("garbage.wav");
    std::fs::write(&path, b"this is not a wav file").unwrap();

    let result = read_wav(&path);
    assert!(result.is_err());
}
