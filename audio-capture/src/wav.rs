//! WAV finalization for captured samples.

use crate::error::Result;

/// MIME type of finalized captures.
pub const WAV_MIME: &str = "audio/wav";

/// Convert f32 samples to WAV bytes (mono 16-bit PCM).
pub fn samples_to_wav(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    let mut cursor = std::io::Cursor::new(Vec::new());
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
    for &s in samples {
        let clamped = s.clamp(-1.0, 1.0);
        writer.write_sample((clamped * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_header_and_data() {
        let bytes = samples_to_wav(&[0.0, 0.5, -0.5], 16_000).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(bytes.len(), 44 + 3 * 2);
    }

    #[test]
    fn empty_capture_still_produces_a_header() {
        let bytes = samples_to_wav(&[], 16_000).unwrap();
        assert_eq!(bytes.len(), 44);
    }
}
