pub const SUPPORTED_AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg"];

pub const WHISPER_SAMPLE_RATE: u32 = 16000;
pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";

pub const VAD_MODEL_NAME: &str = "ggml-silero-v5.1.2.bin";
pub const VAD_MODEL_URL: &str =
    "https://huggingface.co/ggml-org/whisper-vad/resolve/main/ggml-silero-v5.1.2.bin";

pub const DEFAULT_MODEL_DIR: &str = "./models";
pub const DEFAULT_LANGUAGE: &str = "tr";

/// Number of hypotheses kept alive during beam search decoding.
pub const BEAM_SIZE: i32 = 5;

/// Silence shorter than this does not split speech into separate VAD chunks.
pub const MIN_SILENCE_DURATION_MS: i32 = 500;

/// Upper bound on whisper.cpp worker threads.
pub const MAX_INFERENCE_THREADS: usize = 4;
