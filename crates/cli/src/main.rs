use std::io;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Env;

use voxtext_core::pipeline::transcribe_file_use_case::TranscribeFileUseCase;
use voxtext_core::shared::config::TranscriberConfig;
use voxtext_core::transcription::error::TranscribeError;
use voxtext_core::transcription::input_validator::validate_input;
use voxtext_core::transcription::report::{Report, TranscriptionResult};

/// Transcribe an audio file and print the result as one line of JSON.
///
/// Model settings come from the VOXTEXT_MODEL_SIZE, VOXTEXT_DEVICE,
/// VOXTEXT_PRECISION, VOXTEXT_MODEL_DIR and VOXTEXT_LANGUAGE environment
/// variables.
#[derive(Parser)]
#[command(name = "voxtext", version)]
struct Cli {
    /// Audio file (mp3, wav, m4a, flac, ogg). Surrounding quotes are stripped.
    #[arg(allow_hyphen_values = true)]
    input: Option<String>,

    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<String>,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let report = match run() {
        Ok(result) => Report::from(result),
        Err(e) => Report::error(e.to_string()),
    };

    if let Err(e) = report.write_line(io::stdout().lock()) {
        eprintln!("Error: failed to write result: {e}");
        process::exit(1);
    }
    process::exit(report.exit_code());
}

fn run() -> Result<TranscriptionResult, TranscribeError> {
    let cli = parse_cli()?;
    if !cli.extra.is_empty() {
        log::debug!("Ignoring extra arguments: {:?}", cli.extra);
    }

    let audio_path = validate_input(cli.input.as_deref())?;
    log::info!("Received file: {}", audio_path.display());

    let config = TranscriberConfig::from_env()?;
    let use_case = build_use_case(&config)?;
    use_case.run(&audio_path)
}

/// Help and version output exit directly; any other parse problem becomes an
/// error report like every other failure.
fn parse_cli() -> Result<Cli, TranscribeError> {
    match Cli::try_parse() {
        Ok(cli) => Ok(cli),
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => Err(TranscribeError::unexpected(clap_error_message(&e))),
    }
}

/// First line of clap's rendered error, without the `error: ` prefix.
fn clap_error_message(e: &clap::Error) -> String {
    let rendered = e.render().to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    first.strip_prefix("error: ").unwrap_or(first).to_string()
}

#[cfg(feature = "whisper")]
fn build_use_case(config: &TranscriberConfig) -> Result<TranscribeFileUseCase, TranscribeError> {
    use voxtext_core::audio::infrastructure::ffmpeg_audio_reader::FfmpegAudioReader;
    use voxtext_core::audio::infrastructure::whisper_recognizer::WhisperRecognizer;
    use voxtext_core::shared::constants::{VAD_MODEL_NAME, VAD_MODEL_URL};
    use voxtext_core::shared::model_resolver;

    let model_name = config.model_file_name();
    log::info!("Resolving model: {model_name}");
    let model_path = model_resolver::resolve(
        &model_name,
        &config.model_url(),
        &config.model_dir,
        Some(Box::new(download_progress)),
    )?;

    log::info!("Resolving VAD model: {VAD_MODEL_NAME}");
    let vad_model_path = model_resolver::resolve(
        VAD_MODEL_NAME,
        VAD_MODEL_URL,
        &config.model_dir,
        Some(Box::new(download_progress)),
    )?;

    log::info!(
        "Loading model ({}, device: {}, precision: {})",
        config.model_size,
        config.device,
        config.precision
    );
    let recognizer = WhisperRecognizer::new(&model_path, &vad_model_path, config.device)?;

    Ok(TranscribeFileUseCase::new(
        Box::new(FfmpegAudioReader),
        Box::new(recognizer),
        &config.language,
    ))
}

#[cfg(not(feature = "whisper"))]
fn build_use_case(_config: &TranscriberConfig) -> Result<TranscribeFileUseCase, TranscribeError> {
    Err(TranscribeError::unexpected(
        "speech recognition is not available in this build (enable the `whisper` feature)",
    ))
}

#[cfg(feature = "whisper")]
fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["voxtext", "-kayit.mp3"], Some("-kayit.mp3"))]
    #[case(&["voxtext", "--ses.wav"], Some("--ses.wav"))]
    #[case(&["voxtext", "speech.mp3"], Some("speech.mp3"))]
    #[case(&["voxtext"], None)]
    fn test_input_may_start_with_hyphen(#[case] args: &[&str], #[case] expected: Option<&str>) {
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.input.as_deref(), expected);
    }

    #[test]
    fn test_hyphen_extra_arguments_are_collected() {
        let cli = Cli::try_parse_from(["voxtext", "a.mp3", "-x", "b.wav"]).unwrap();
        assert_eq!(cli.input.as_deref(), Some("a.mp3"));
        assert_eq!(cli.extra, vec!["-x", "b.wav"]);
    }

    #[test]
    fn test_help_flag_still_recognized() {
        let err = Cli::try_parse_from(["voxtext", "--help"]).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_clap_error_message_drops_prefix_and_usage() {
        let err = clap::Error::raw(
            ErrorKind::InvalidUtf8,
            "invalid UTF-8 was detected in one or more arguments\n",
        );
        assert_eq!(
            clap_error_message(&err),
            "invalid UTF-8 was detected in one or more arguments"
        );
    }
}
