use std::path::{Path, PathBuf};

use whisper_rs::{
    FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters, WhisperVadParams,
};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::speech_recognizer::{
    RecognizerError, SpeechRecognizer, TranscribeOptions,
};
use crate::audio::domain::transcript::{RecognizedSegment, TranscriptionInfo};
use crate::shared::config::Device;
use crate::shared::constants::MAX_INFERENCE_THREADS;

/// Speech recognizer using whisper.cpp via whisper-rs.
///
/// The model is loaded once in [`WhisperRecognizer::new`] and released when the
/// recognizer is dropped. Voice-activity filtering uses the Silero VAD model
/// bundled with whisper.cpp.
pub struct WhisperRecognizer {
    context: WhisperContext,
    vad_model_path: PathBuf,
}

impl WhisperRecognizer {
    pub fn new(
        model_path: &Path,
        vad_model_path: &Path,
        device: Device,
    ) -> Result<Self, RecognizerError> {
        for path in [model_path, vad_model_path] {
            if !path.is_file() {
                return Err(RecognizerError::ModelNotFound(path.display().to_string()));
            }
        }

        let mut params = WhisperContextParameters::default();
        params.use_gpu(device == Device::Gpu);

        let context = WhisperContext::new_with_params(
            model_path
                .to_str()
                .ok_or_else(|| RecognizerError::Load("invalid model path".to_string()))?,
            params,
        )
        .map_err(|e| RecognizerError::Load(e.to_string()))?;

        Ok(Self {
            context,
            vad_model_path: vad_model_path.to_path_buf(),
        })
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn transcribe(
        &self,
        audio: &AudioSegment,
        options: &TranscribeOptions,
    ) -> Result<(Vec<RecognizedSegment>, TranscriptionInfo), RecognizerError> {
        if whisper_rs::get_lang_id(&options.language).is_none() {
            return Err(RecognizerError::UnsupportedLanguage(options.language.clone()));
        }

        let mut state = self
            .context
            .create_state()
            .map_err(|e| RecognizerError::State(e.to_string()))?;

        let mut params = FullParams::new(SamplingStrategy::BeamSearch {
            beam_size: options.beam_size,
            patience: -1.0,
        });
        params.set_language(Some(&options.language));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(MAX_INFERENCE_THREADS) as i32);

        if options.vad_filter {
            let mut vad_params = WhisperVadParams::new();
            vad_params.set_min_silence_duration(options.min_silence_duration_ms);
            params.enable_vad(true);
            params.set_vad_model_path(self.vad_model_path.to_str());
            params.set_vad_params(vad_params);
        }

        state
            .full(params, audio.samples())
            .map_err(|e| RecognizerError::Inference(e.to_string()))?;

        let mut segments = Vec::new();
        for seg_idx in 0..state.full_n_segments() {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let text = segment
                .to_str_lossy()
                .map_err(|e| RecognizerError::Inference(e.to_string()))?;

            // Segment timestamps are in centiseconds (10ms units)
            segments.push(RecognizedSegment::new(
                segment.start_timestamp() as f64 / 100.0,
                segment.end_timestamp() as f64 / 100.0,
                text.into_owned(),
            ));
        }

        // The language was given, not detected, so there was nothing to doubt
        let info = TranscriptionInfo {
            language: options.language.clone(),
            language_probability: 1.0,
            duration: audio.duration(),
        };

        Ok((segments, info))
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
