use std::path::{Path, PathBuf};

use super::error::TranscribeError;
use crate::shared::constants::SUPPORTED_AUDIO_EXTENSIONS;

/// Turn the raw path argument into a usable audio path.
///
/// Checks run in order: presence, existence, extension. Surrounding single or
/// double quotes are stripped first; an argument that strips to nothing is a
/// path that does not exist.
pub fn validate_input(arg: Option<&str>) -> Result<PathBuf, TranscribeError> {
    let raw = arg.ok_or(TranscribeError::MissingArgument)?;
    let stripped = strip_quotes(raw);

    let path = PathBuf::from(stripped);
    if !path.is_file() {
        return Err(TranscribeError::FileNotFound(stripped.to_string()));
    }
    if !is_supported_audio(&path) {
        return Err(TranscribeError::UnsupportedFormat);
    }
    Ok(path)
}

pub fn strip_quotes(raw: &str) -> &str {
    raw.trim_matches(|c| c == '"' || c == '\'')
}

/// Suffix match on the lowercased path, so a file named just `.mp3` counts.
pub fn is_supported_audio(path: &Path) -> bool {
    let name = path.to_string_lossy().to_lowercase();
    SUPPORTED_AUDIO_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!(".{ext}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, b"").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(validate_input(None), Err(TranscribeError::MissingArgument));
    }

    #[rstest]
    #[case("\"\"")]
    #[case("''")]
    #[case("")]
    fn test_only_quotes_is_file_not_found(#[case] raw: &str) {
        let err = validate_input(Some(raw)).unwrap_err();
        assert_eq!(err, TranscribeError::FileNotFound(String::new()));
        assert_eq!(err.to_string(), "Dosya bulunamadı: ");
    }

    #[test]
    fn test_nonexistent_file_reports_path() {
        let err = validate_input(Some("missing.mp3")).unwrap_err();
        assert_eq!(err, TranscribeError::FileNotFound("missing.mp3".to_string()));
        assert_eq!(err.to_string(), "Dosya bulunamadı: missing.mp3");
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("album.mp3");
        fs::create_dir(&dir).unwrap();
        let err = validate_input(Some(&dir.to_string_lossy())).unwrap_err();
        assert!(matches!(err, TranscribeError::FileNotFound(_)));
    }

    #[test]
    fn test_existence_checked_before_extension() {
        let err = validate_input(Some("/nonexistent/notes.txt")).unwrap_err();
        assert!(matches!(err, TranscribeError::FileNotFound(_)));
    }

    #[rstest]
    #[case("speech.mp3")]
    #[case("speech.wav")]
    #[case("speech.m4a")]
    #[case("speech.flac")]
    #[case("speech.ogg")]
    #[case("SPEECH.WAV")]
    #[case("speech.Mp3")]
    #[case(".mp3")]
    #[case(".FLAC")]
    fn test_supported_extensions_accepted(#[case] name: &str) {
        let tmp = TempDir::new().unwrap();
        let path = touch(&tmp, name);
        assert_eq!(validate_input(Some(&path)), Ok(PathBuf::from(&path)));
    }

    #[rstest]
    #[case("notes.txt")]
    #[case("video.mp4")]
    #[case("speech.mp3.bak")]
    #[case("no_extension")]
    #[case("mp3")]
    #[case("speechmp3")]
    fn test_unsupported_extensions_rejected(#[case] name: &str) {
        let tmp = TempDir::new().unwrap();
        let path = touch(&tmp, name);
        assert_eq!(
            validate_input(Some(&path)),
            Err(TranscribeError::UnsupportedFormat)
        );
    }

    #[rstest]
    #[case("\"speech.wav\"", "speech.wav")]
    #[case("'speech.wav'", "speech.wav")]
    #[case("\"'speech.wav'\"", "speech.wav")]
    #[case("speech.wav", "speech.wav")]
    #[case("\"my file.wav", "my file.wav")]
    fn test_strip_quotes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(strip_quotes(raw), expected);
    }

    #[test]
    fn test_quoted_path_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let path = touch(&tmp, "kayıt.wav");
        let quoted = format!("\"{path}\"");
        assert_eq!(validate_input(Some(&quoted)), Ok(PathBuf::from(&path)));
    }
}
