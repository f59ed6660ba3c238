use thiserror::Error;

use crate::audio::domain::speech_recognizer::RecognizerError;
use crate::shared::config::ConfigError;
use crate::shared::model_resolver::ModelResolveError;

/// Every way a transcription run can fail. The `Display` text is the message
/// reported to the caller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TranscribeError {
    #[error("Ses dosyası yolu eksik. Kullanım: voxtext <dosya.mp3>")]
    MissingArgument,
    #[error("Dosya bulunamadı: {0}")]
    FileNotFound(String),
    #[error("Desteklenmeyen dosya formatı. MP3, WAV, M4A, FLAC, OGG kullanın.")]
    UnsupportedFormat,
    #[error("Beklenmeyen hata: {0}")]
    Unexpected(String),
}

impl TranscribeError {
    pub fn unexpected(err: impl std::fmt::Display) -> Self {
        TranscribeError::Unexpected(err.to_string())
    }
}

impl From<ConfigError> for TranscribeError {
    fn from(err: ConfigError) -> Self {
        Self::unexpected(err)
    }
}

impl From<ModelResolveError> for TranscribeError {
    fn from(err: ModelResolveError) -> Self {
        Self::unexpected(err)
    }
}

impl From<RecognizerError> for TranscribeError {
    fn from(err: RecognizerError) -> Self {
        Self::unexpected(err)
    }
}

impl From<Box<dyn std::error::Error>> for TranscribeError {
    fn from(err: Box<dyn std::error::Error>) -> Self {
        Self::unexpected(err)
    }
}
