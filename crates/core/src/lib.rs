//! Audio file transcription to timestamped JSON.
//!
//! Validation, result shaping and error reporting live here; speech
//! recognition is delegated to whisper.cpp and decoding to FFmpeg, both behind
//! the `whisper` feature.

pub mod audio;
pub mod pipeline;
pub mod shared;
pub mod transcription;
