//! Audio Test Fixtures
//!
//! Programmatically generated 16kHz 16-bit mono PCM, the format Home Assistant
//! satellites stream over Wyoming.

use std::f32::consts::PI;

/// Standard sample rate for STT (16kHz)
pub const SAMPLE_RATE: u32 = 16000;

/// Bytes per 16-bit sample
pub const SAMPLE_WIDTH: u16 = 2;

pub const CHANNELS: u16 = 1;

/// Duration constants (in samples at 16kHz)
pub const MS_100: usize = 1600;
pub const SECOND: usize = 16000;

/// Generate silence as raw bytes
pub fn generate_silence_bytes(duration_samples: usize) -> Vec<u8> {
    vec![0u8; duration_samples * SAMPLE_WIDTH as usize]
}

/// Generate a sine wave tone
pub fn generate_sine_wave(duration_samples: usize, frequency: f32, amplitude: f32) -> Vec<i16> {
    let max_amplitude = amplitude * i16::MAX as f32;
    let angular_freq = 2.0 * PI * frequency / SAMPLE_RATE as f32;

    (0..duration_samples)
        .map(|i| ((angular_freq * i as f32).sin() * max_amplitude) as i16)
        .collect()
}

/// Generate a sine wave as raw bytes
pub fn generate_sine_wave_bytes(duration_samples: usize, frequency: f32, amplitude: f32) -> Vec<u8> {
    samples_to_bytes(&generate_sine_wave(duration_samples, frequency, amplitude))
}

/// Speech-like signal: harmonics under a slowly varying envelope
pub fn generate_speech_pattern_bytes(duration_samples: usize) -> Vec<u8> {
    let base_freq = 150.0;
    let mut state: u64 = 54321;
    let mut envelope = 0.0f32;

    let samples: Vec<i16> = (0..duration_samples)
        .map(|i| {
            if i % 800 == 0 {
                state = state.wrapping_mul(1103515245).wrapping_add(12345);
                let target = ((state >> 16) & 0x7FFF) as f32 / 0x7FFF as f32;
                envelope = envelope * 0.7 + target * 0.3;
            }

            let t = i as f32 / SAMPLE_RATE as f32;
            let waveform = ((2.0 * PI * base_freq * t).sin()
                + (2.0 * PI * base_freq * 2.0 * t).sin() * 0.5)
                / 1.5;
            (waveform * envelope * i16::MAX as f32 * 0.6) as i16
        })
        .collect();

    samples_to_bytes(&samples)
}

/// Convert i16 samples to little-endian bytes
pub fn samples_to_bytes(samples: &[i16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

/// Split audio the way a satellite streams it: fixed-size chunks, last one short
pub fn split_into_chunks(audio: &[u8], chunk_size: usize) -> Vec<Vec<u8>> {
    audio.chunks(chunk_size).map(<[u8]>::to_vec).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silence_generation() {
        let silence = generate_silence_bytes(MS_100);
        assert_eq!(silence.len(), MS_100 * 2);
        assert!(silence.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_speech_pattern_is_deterministic() {
        assert_eq!(
            generate_speech_pattern_bytes(1000),
            generate_speech_pattern_bytes(1000)
        );
    }

    #[test]
    fn test_split_into_chunks() {
        let chunks = split_into_chunks(&[0u8; 10], 4);
        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 2]);
    }
}
