use std::path::Path;

use crate::audio::domain::audio_reader::AudioReader;
use crate::audio::domain::speech_recognizer::{SpeechRecognizer, TranscribeOptions};
use crate::shared::constants::{BEAM_SIZE, MIN_SILENCE_DURATION_MS, WHISPER_SAMPLE_RATE};
use crate::transcription::error::TranscribeError;
use crate::transcription::report::TranscriptionResult;
use crate::transcription::result_formatter::format_result;

/// Decode one audio file, run it through the recognizer once, and shape the
/// output.
pub struct TranscribeFileUseCase {
    reader: Box<dyn AudioReader>,
    recognizer: Box<dyn SpeechRecognizer>,
    options: TranscribeOptions,
}

impl TranscribeFileUseCase {
    pub fn new(
        reader: Box<dyn AudioReader>,
        recognizer: Box<dyn SpeechRecognizer>,
        language: &str,
    ) -> Self {
        Self {
            reader,
            recognizer,
            options: TranscribeOptions {
                language: language.to_string(),
                beam_size: BEAM_SIZE,
                vad_filter: true,
                min_silence_duration_ms: MIN_SILENCE_DURATION_MS,
            },
        }
    }

    pub fn run(&self, audio_path: &Path) -> Result<TranscriptionResult, TranscribeError> {
        let audio = self
            .reader
            .read_audio(audio_path, WHISPER_SAMPLE_RATE)?
            .ok_or_else(|| {
                TranscribeError::unexpected(format!(
                    "no audio stream in {}",
                    audio_path.display()
                ))
            })?;
        log::info!("Decoded {:.2}s of audio", audio.duration());

        log::info!("Starting transcription (language: {})", self.options.language);
        let (segments, info) = self.recognizer.transcribe(&audio, &self.options)?;

        let result = format_result(segments, &info);
        log::info!(
            "Transcription finished: {} characters, {} segments",
            result.text.chars().count(),
            result.segments.len()
        );
        Ok(result)
    }
}
