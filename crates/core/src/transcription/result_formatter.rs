use super::report::{SegmentRecord, TranscriptionResult};
use crate::audio::domain::transcript::{RecognizedSegment, TranscriptionInfo};

/// Shape raw model output into a [`TranscriptionResult`].
///
/// Segment texts are trimmed and empty ones dropped; the survivors feed both
/// the joined `text` and the `segments` list in a single pass, so a one-shot
/// iterator is enough.
pub fn format_result<I>(segments: I, info: &TranscriptionInfo) -> TranscriptionResult
where
    I: IntoIterator<Item = RecognizedSegment>,
{
    let records: Vec<SegmentRecord> = segments
        .into_iter()
        .filter_map(|segment| {
            let text = segment.text.trim();
            if text.is_empty() {
                return None;
            }
            Some(SegmentRecord {
                start: round_to(segment.start, 2),
                end: round_to(segment.end, 2),
                text: text.to_string(),
            })
        })
        .collect();

    let text = records
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    TranscriptionResult {
        language: info.language.clone(),
        confidence: round_to(info.language_probability as f64, 4),
        duration_seconds: round_to(info.duration, 2),
        text,
        segments: records,
    }
}

/// Round the exact binary value to `decimals` places, ties to even.
///
/// Goes through decimal formatting so that e.g. 3.125 becomes 3.12 and
/// 1.005 (really 1.00499...) becomes 1.0, with no error from scaling.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
