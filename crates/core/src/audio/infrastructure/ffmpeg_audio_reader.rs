use std::path::Path;

use ffmpeg_next::format::sample::Type as SampleType;
use ffmpeg_next::format::Sample;
use ffmpeg_next::util::frame::audio::Audio;
use ffmpeg_next::ChannelLayout;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::audio_segment::AudioSegment;

/// Decodes any container/codec FFmpeg understands into mono f32 PCM.
pub struct FfmpegAudioReader;

impl AudioReader for FfmpegAudioReader {
    fn read_audio(
        &self,
        path: &Path,
        target_sample_rate: u32,
    ) -> Result<Option<AudioSegment>, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(path)?;

        let audio_stream = match ictx.streams().best(ffmpeg_next::media::Type::Audio) {
            Some(stream) => stream,
            None => return Ok(None),
        };

        let audio_stream_index = audio_stream.index();
        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(audio_stream.parameters())?;
        let mut decoder = codec_ctx.decoder().audio()?;

        // Some containers (raw WAV, some OGG) leave the layout unset
        let source_layout = if decoder.channel_layout().is_empty() {
            ChannelLayout::default(decoder.channels() as i32)
        } else {
            decoder.channel_layout()
        };

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            source_layout,
            decoder.rate(),
            Sample::F32(SampleType::Planar),
            ChannelLayout::MONO,
            target_sample_rate,
        )?;

        log::debug!(
            "Decoding {} ({} Hz, {} ch) to {target_sample_rate} Hz mono",
            path.display(),
            decoder.rate(),
            decoder.channels()
        );

        let mut all_samples: Vec<f32> = Vec::new();
        let mut decoded_frame = Audio::empty();
        let mut resampled_frame = Audio::empty();

        for (stream, packet) in ictx.packets() {
            if stream.index() != audio_stream_index {
                continue;
            }

            decoder.send_packet(&packet)?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                resampler.run(&decoded_frame, &mut resampled_frame)?;
                extract_f32_samples(&resampled_frame, &mut all_samples);
            }
        }

        decoder.send_eof()?;
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            resampler.run(&decoded_frame, &mut resampled_frame)?;
            extract_f32_samples(&resampled_frame, &mut all_samples);
        }

        // The resampler may still hold buffered samples
        if let Ok(Some(delay)) = resampler.flush(&mut resampled_frame) {
            if delay.output > 0 {
                extract_f32_samples(&resampled_frame, &mut all_samples);
            }
        }

        Ok(Some(AudioSegment::new(all_samples, target_sample_rate, 1)))
    }
}

/// Append the samples of a planar mono f32 frame.
fn extract_f32_samples(frame: &Audio, out: &mut Vec<f32>) {
    if frame.samples() == 0 {
        return;
    }
    out.extend_from_slice(frame.plane::<f32>(0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_audio_nonexistent_file() {
        let reader = FfmpegAudioReader;
        let result = reader.read_audio(Path::new("/nonexistent/speech.wav"), 16000);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_audio_garbage_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("noise.mp3");
        fs::write(&path, b"this is not an mp3 file").unwrap();

        let reader = FfmpegAudioReader;
        let result = reader.read_audio(&path, 16000);
        assert!(!matches!(result, Ok(Some(ref seg)) if !seg.samples().is_empty()));
    }

    #[test]
    fn test_read_audio_decodes_pcm_wav() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tone.wav");
        fs::write(&path, pcm16_wav(&vec![1000i16; 16000], 16000)).unwrap();

        let reader = FfmpegAudioReader;
        let audio = reader.read_audio(&path, 16000).unwrap().unwrap();
        assert_eq!(audio.sample_rate(), 16000);
        assert_eq!(audio.channels(), 1);
        assert!((audio.duration() - 1.0).abs() < 0.05);
    }

    /// Minimal 16-bit mono PCM WAV container.
    fn pcm16_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
        let data_len = (samples.len() * 2) as u32;
        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes());
        out.extend_from_slice(&sample_rate.to_le_bytes());
        out.extend_from_slice(&(sample_rate * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for s in samples {
            out.extend_from_slice(&s.to_le_bytes());
        }
        out
    }
}
