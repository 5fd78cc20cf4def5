//! Clip decoding with Symphonia

use std::io::Cursor;
use std::time::Duration;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use crate::error::{CliError, Result};

/// A fully decoded clip, interleaved `f32`
#[derive(Debug, Clone)]
pub struct DecodedClip {
    pub samples: Vec<f32>,
    pub channels: u16,
    pub sample_rate: u32,
}

impl DecodedClip {
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels.max(1))
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frames() as f64 / f64::from(self.sample_rate.max(1)))
    }
}

/// Decode an in-memory audio file
///
/// `extension` (e.g. `mp3`) helps the probe pick a format. Corrupt packets are
/// skipped; a file with no decodable audio is an error.
pub fn decode_clip(bytes: Vec<u8>, extension: Option<&str>) -> Result<DecodedClip> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| CliError::audio(format!("Failed to probe clip: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| CliError::audio("No audio tracks found"))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(44100);
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(2);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| CliError::audio(format!("Failed to create decoder: {}", e)))?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(CliError::audio(format!("Error reading packet: {}", e))),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                channels = spec.channels.count() as u16;

                let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            Err(SymphoniaError::DecodeError(e)) => {
                warn!(error = %e, "Skipping corrupt packet");
            }
            Err(e) => return Err(CliError::audio(format!("Decode error: {}", e))),
        }
    }

    if samples.is_empty() {
        return Err(CliError::audio("Clip contains no audio"));
    }

    let clip = DecodedClip {
        samples,
        channels,
        sample_rate,
    };
    debug!(
        channels = clip.channels,
        sample_rate = clip.sample_rate,
        seconds = clip.duration().as_secs_f32(),
        "Decoded clip"
    );
    Ok(clip)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 16-bit PCM WAV file holding `frames` frames of a ramp
    pub(crate) fn wav_bytes(sample_rate: u32, channels: u16, frames: u32) -> Vec<u8> {
        use hound::{WavSpec, WavWriter};

        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut bytes = Vec::new();
        let mut writer = WavWriter::new(std::io::Cursor::new(&mut bytes), spec).unwrap();
        for i in 0..frames * u32::from(channels) {
            let sample = ((i % 200) as i16 - 100) * 100;
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
        bytes
    }

    #[test]
    fn decodes_wav() {
        let clip = decode_clip(wav_bytes(8000, 1, 4000), Some("wav")).unwrap();
        assert_eq!(clip.channels, 1);
        assert_eq!(clip.sample_rate, 8000);
        assert_eq!(clip.frames(), 4000);
        assert!((clip.duration().as_secs_f32() - 0.5).abs() < 0.01);
        assert!(clip.samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    }

    #[test]
    fn decodes_stereo_without_hint() {
        let clip = decode_clip(wav_bytes(22050, 2, 1000), None).unwrap();
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.samples.len(), 2000);
    }

    #[test]
    fn rejects_garbage() {
        let result = decode_clip(b"<html>Not Found</html>".to_vec(), Some("mp3"));
        assert!(matches!(result, Err(CliError::Audio(_))));
    }
}
