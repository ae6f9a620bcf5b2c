/// Sound engine: procedural cue sounds via rodio.
///
/// Every `Cue` is synthesised once at start into an in-memory WAV buffer,
/// scaled by the configured volume. Playback is fire-and-forget on a
/// detached sink.
///
/// Without the "sound" feature `SoundEngine::new` returns `None` and the
/// hub falls back to a silent backend.

use std::f32::consts::PI;

use crate::nav::sound::Cue;

#[cfg_attr(not(feature = "sound"), allow(dead_code))]
const SAMPLE_RATE: u32 = 22050;

#[cfg(feature = "sound")]
mod inner {
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::{make_wav, samples_for};
    use crate::error::HubError;
    use crate::nav::sound::{Cue, CueBackend};

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        /// Indexed by `Cue as usize`.
        buffers: Vec<Arc<Vec<u8>>>,
    }

    impl SoundEngine {
        pub fn new(volume: f32) -> Option<Self> {
            let (stream, handle) = match OutputStream::try_default() {
                Ok(pair) => pair,
                Err(e) => {
                    tracing::info!(error = %e, "no audio output, sound disabled");
                    return None;
                }
            };
            let buffers = Cue::ALL
                .iter()
                .map(|&cue| Arc::new(make_wav(&samples_for(cue, volume))))
                .collect();
            Some(SoundEngine { _stream: stream, handle, buffers })
        }
    }

    impl CueBackend for SoundEngine {
        fn play(&self, cue: Cue) -> Result<(), HubError> {
            let buf = self
                .buffers
                .get(cue as usize)
                .ok_or_else(|| HubError::Playback(format!("no buffer for {cue}")))?;
            let sink = Sink::try_new(&self.handle).map_err(|e| HubError::Playback(e.to_string()))?;
            let src = rodio::Decoder::new(Cursor::new(buf.as_ref().clone()))
                .map_err(|e| HubError::Playback(e.to_string()))?;
            sink.append(src);
            sink.detach(); // fire-and-forget
            Ok(())
        }
    }
}

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new(_volume: f32) -> Option<Self> {
        None
    }
}

#[cfg(not(feature = "sound"))]
impl crate::nav::sound::CueBackend for SoundEngine {
    fn play(&self, _cue: Cue) -> Result<(), crate::error::HubError> {
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════
//  Waveform generators: mono f32 samples
// ════════════════════════════════════════════════════════════

/// Sine note with a linear fade.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn tone(freq: f32, duration: f32, amp: f32) -> Vec<f32> {
    let n = (SAMPLE_RATE as f32 * duration) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = 1.0 - (i as f32 / n as f32);
            (t * freq * 2.0 * PI).sin() * env * amp
        })
        .collect()
}

/// Notes back to back, each with a soft harmonic.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn arpeggio(notes: &[f32], note_dur: f32, amp: f32) -> Vec<f32> {
    let mut samples = Vec::new();
    for &freq in notes {
        let n = (SAMPLE_RATE as f32 * note_dur) as usize;
        for i in 0..n {
            let t = i as f32 / SAMPLE_RATE as f32;
            let env = 1.0 - (i as f32 / n as f32) * 0.4;
            let wave = (t * freq * 2.0 * PI).sin() * 0.7 + (t * freq * 4.0 * PI).sin() * 0.3;
            samples.push(wave * env * amp);
        }
    }
    samples
}

/// Pitch sweep from `from` to `to` Hz.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn sweep(from: f32, to: f32, duration: f32, amp: f32) -> Vec<f32> {
    let n = (SAMPLE_RATE as f32 * duration) as usize;
    let mut phase = 0.0_f32;
    (0..n)
        .map(|i| {
            let p = i as f32 / n as f32;
            let freq = from + (to - from) * p;
            phase += freq * 2.0 * PI / SAMPLE_RATE as f32;
            phase.sin() * (1.0 - p).powf(0.6) * amp
        })
        .collect()
}

/// Samples for one cue at the given master volume.
#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn samples_for(cue: Cue, volume: f32) -> Vec<f32> {
    let mut samples = match cue {
        Cue::Start => arpeggio(&[523.0, 784.0], 0.08, 0.3), // C5 G5
        Cue::Click => tone(900.0, 0.03, 0.25),
        Cue::Flip => sweep(400.0, 900.0, 0.07, 0.25),
        Cue::Correct => arpeggio(&[1047.0, 1319.0, 1568.0], 0.06, 0.25), // C6 E6 G6
        Cue::Wrong => arpeggio(&[330.0, 262.0], 0.12, 0.25), // gentle, not harsh
        Cue::Win => {
            let mut s = arpeggio(&[523.0, 659.0, 784.0, 1047.0], 0.1, 0.3);
            s.extend(tone(1047.0, 0.3, 0.3));
            s
        }
        Cue::Go => tone(880.0, 0.18, 0.35),
    };
    let gain = volume.clamp(0.0, 1.0);
    for s in &mut samples {
        *s *= gain;
    }
    samples
}

// ════════════════════════════════════════════════════════════
//  WAV encoder: wraps f32 samples into a valid WAV buffer
// ════════════════════════════════════════════════════════════

#[cfg_attr(not(feature = "sound"), allow(dead_code))]
fn make_wav(samples: &[f32]) -> Vec<u8> {
    let num_channels: u16 = 1;
    let bits_per_sample: u16 = 16;
    let byte_rate = SAMPLE_RATE * (num_channels as u32) * (bits_per_sample as u32) / 8;
    let block_align = num_channels * bits_per_sample / 8;
    let data_size = samples.len() as u32 * 2;
    let file_size = 36 + data_size;

    let mut buf = Vec::with_capacity(44 + data_size as usize);

    // RIFF header
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(b"WAVE");

    // fmt chunk
    buf.extend_from_slice(b"fmt ");
    buf.extend_from_slice(&16u32.to_le_bytes());
    buf.extend_from_slice(&1u16.to_le_bytes()); // PCM
    buf.extend_from_slice(&num_channels.to_le_bytes());
    buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    buf.extend_from_slice(&byte_rate.to_le_bytes());
    buf.extend_from_slice(&block_align.to_le_bytes());
    buf.extend_from_slice(&bits_per_sample.to_le_bytes());

    // data chunk
    buf.extend_from_slice(b"data");
    buf.extend_from_slice(&data_size.to_le_bytes());

    for &s in samples {
        let val = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
        buf.extend_from_slice(&val.to_le_bytes());
    }

    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_cue_has_audible_samples() {
        for cue in Cue::ALL {
            let s = samples_for(cue, 1.0);
            assert!(!s.is_empty(), "{cue}");
            assert!(s.iter().all(|v| v.abs() <= 1.0), "{cue} clips");
            assert!(s.iter().any(|v| v.abs() > 0.01), "{cue} is silent");
        }
    }

    #[test]
    fn volume_scales_and_zero_is_silent() {
        let loud = samples_for(Cue::Go, 1.0);
        let soft = samples_for(Cue::Go, 0.5);
        assert!((loud[100] * 0.5 - soft[100]).abs() < 1e-6);
        assert!(samples_for(Cue::Win, 0.0).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn wav_header_is_consistent() {
        let samples = tone(440.0, 0.01, 0.5);
        let wav = make_wav(&samples);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + samples.len() * 2);
        let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]);
        assert_eq!(data_size as usize, samples.len() * 2);
    }
}
