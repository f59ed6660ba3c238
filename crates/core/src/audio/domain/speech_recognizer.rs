use thiserror::Error;

use super::audio_segment::AudioSegment;
use super::transcript::{RecognizedSegment, TranscriptionInfo};

#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("model not found at: {0}")]
    ModelNotFound(String),
    #[error("failed to load model: {0}")]
    Load(String),
    #[error("failed to create inference state: {0}")]
    State(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Decoding parameters for one call to [`SpeechRecognizer::transcribe`].
#[derive(Clone, Debug, PartialEq)]
pub struct TranscribeOptions {
    pub language: String,
    pub beam_size: i32,
    pub vad_filter: bool,
    pub min_silence_duration_ms: i32,
}

/// Domain interface for speech-to-text transcription.
///
/// Implementations run inference on decoded audio and return the segments in
/// chronological order together with metadata about the run.
pub trait SpeechRecognizer {
    fn transcribe(
        &self,
        audio: &AudioSegment,
        options: &TranscribeOptions,
    ) -> Result<(Vec<RecognizedSegment>, TranscriptionInfo), RecognizerError>;
}
