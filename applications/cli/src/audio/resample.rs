//! Fit decoded clips to the output device's channel count and sample rate

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};

use super::decode::DecodedClip;
use crate::error::{CliError, Result};

/// Interleaved samples ready for a device with `channels` at `sample_rate`
pub fn prepare_for_device(clip: &DecodedClip, channels: u16, sample_rate: u32) -> Result<Vec<f32>> {
    let remapped = remap_channels(&clip.samples, clip.channels, channels);
    if clip.sample_rate == sample_rate {
        Ok(remapped)
    } else {
        resample(&remapped, channels, clip.sample_rate, sample_rate)
    }
}

/// Convert between channel layouts
///
/// Mono is copied to every output channel; mixing down to mono averages; any
/// other change keeps the leading channels and fills the rest with the first.
pub fn remap_channels(samples: &[f32], from: u16, to: u16) -> Vec<f32> {
    let from = usize::from(from.max(1));
    let to = usize::from(to.max(1));
    if from == to {
        return samples.to_vec();
    }

    let mut out = Vec::with_capacity(samples.len() / from * to);
    for frame in samples.chunks_exact(from) {
        if to == 1 {
            out.push(frame.iter().sum::<f32>() / from as f32);
        } else {
            for ch in 0..to {
                out.push(*frame.get(ch).unwrap_or(&frame[0]));
            }
        }
    }
    out
}

/// Band-limited sample rate conversion of interleaved audio
pub fn resample(samples: &[f32], channels: u16, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    let channels = usize::from(channels.max(1));
    let frames = samples.len() / channels;
    if frames == 0 {
        return Ok(Vec::new());
    }

    let params = SincInterpolationParameters {
        sinc_len: 128,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 128,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(
        f64::from(to_rate) / f64::from(from_rate),
        2.0,
        params,
        frames,
        channels,
    )
    .map_err(|e| CliError::audio(format!("Resampler setup failed: {}", e)))?;

    // Deinterleave input samples
    let mut deinterleaved = vec![Vec::with_capacity(frames); channels];
    for frame in samples.chunks_exact(channels) {
        for (ch, channel_vec) in deinterleaved.iter_mut().enumerate() {
            channel_vec.push(frame[ch]);
        }
    }

    let resampled = resampler
        .process(&deinterleaved, None)
        .map_err(|e| CliError::audio(format!("Resampling failed: {}", e)))?;

    // Interleave output samples
    let output_frames = resampled.first().map_or(0, Vec::len);
    let mut interleaved = Vec::with_capacity(output_frames * channels);
    for frame_idx in 0..output_frames {
        for channel_data in &resampled {
            interleaved.push(channel_data[frame_idx]);
        }
    }

    Ok(interleaved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_to_stereo_duplicates() {
        assert_eq!(
            remap_channels(&[0.1, 0.2], 1, 2),
            vec![0.1, 0.1, 0.2, 0.2]
        );
    }

    #[test]
    fn stereo_to_mono_averages() {
        let out = remap_channels(&[0.25, 0.75, -1.0, 1.0], 2, 1);
        assert_eq!(out, vec![0.5, 0.0]);
    }

    #[test]
    fn stereo_to_surround_fills_extra_channels() {
        let out = remap_channels(&[0.1, 0.2], 2, 4);
        assert_eq!(out, vec![0.1, 0.2, 0.1, 0.1]);
    }

    #[test]
    fn doubling_the_rate_doubles_the_length() {
        let input: Vec<f32> = (0..8000).map(|i| (i as f32 * 0.01).sin() * 0.5).collect();
        let output = resample(&input, 1, 8000, 16000).unwrap();

        let ratio = output.len() as f64 / input.len() as f64;
        assert!((ratio - 2.0).abs() < 0.05, "ratio was {}", ratio);
    }

    #[test]
    fn same_format_is_untouched() {
        let clip = DecodedClip {
            samples: vec![0.1, -0.1, 0.2, -0.2],
            channels: 2,
            sample_rate: 48000,
        };
        assert_eq!(prepare_for_device(&clip, 2, 48000).unwrap(), clip.samples);
    }
}
