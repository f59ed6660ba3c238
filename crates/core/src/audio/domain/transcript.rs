/// A span of recognized speech as the model produced it. Text is untrimmed.
#[derive(Clone, Debug, PartialEq)]
pub struct RecognizedSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl RecognizedSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }
}

/// Metadata reported alongside the segments of one transcription.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptionInfo {
    pub language: String,
    pub language_probability: f32,
    /// Length of the input audio in seconds, before voice-activity filtering.
    pub duration: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_segment_fields() {
        let s = RecognizedSegment::new(1.0, 1.5, " merhaba");
        assert_eq!(s.text, " merhaba");
        assert_eq!(s.start, 1.0);
        assert_eq!(s.end, 1.5);
    }
}
