use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use super::constants::{DEFAULT_LANGUAGE, DEFAULT_MODEL_DIR, WHISPER_MODEL_BASE_URL};

pub const ENV_MODEL_SIZE: &str = "VOXTEXT_MODEL_SIZE";
pub const ENV_DEVICE: &str = "VOXTEXT_DEVICE";
pub const ENV_PRECISION: &str = "VOXTEXT_PRECISION";
pub const ENV_MODEL_DIR: &str = "VOXTEXT_MODEL_DIR";
pub const ENV_LANGUAGE: &str = "VOXTEXT_LANGUAGE";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}' (expected one of: {expected})")]
    InvalidValue {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("automatic language detection is not supported; set VOXTEXT_LANGUAGE to a language code")]
    AutoLanguage,
    #[error("unsupported language code for VOXTEXT_LANGUAGE: '{0}'")]
    UnknownLanguage(String),
}

/// Whisper checkpoint size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSize {
    Tiny,
    Base,
    Small,
    Medium,
    LargeV3,
}

impl ModelSize {
    fn as_str(self) -> &'static str {
        match self {
            ModelSize::Tiny => "tiny",
            ModelSize::Base => "base",
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::LargeV3 => "large-v3",
        }
    }
}

impl FromStr for ModelSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tiny" => Ok(ModelSize::Tiny),
            "base" => Ok(ModelSize::Base),
            "small" => Ok(ModelSize::Small),
            "medium" => Ok(ModelSize::Medium),
            "large-v3" => Ok(ModelSize::LargeV3),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where inference runs. `Gpu` silently falls back to CPU when whisper.cpp
/// was built without a GPU backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Gpu,
    Cpu,
}

impl FromStr for Device {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gpu" | "cuda" => Ok(Device::Gpu),
            "cpu" => Ok(Device::Cpu),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Gpu => f.write_str("gpu"),
            Device::Cpu => f.write_str("cpu"),
        }
    }
}

/// Numeric precision of the model weights.
///
/// `Float32` selects the full-precision ggml checkpoint, `Int8` the
/// 8-bit quantized one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    Float32,
    Int8,
}

impl FromStr for Precision {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "float32" => Ok(Precision::Float32),
            "int8" => Ok(Precision::Int8),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Float32 => f.write_str("float32"),
            Precision::Int8 => f.write_str("int8"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriberConfig {
    pub model_size: ModelSize,
    pub device: Device,
    pub precision: Precision,
    pub model_dir: PathBuf,
    pub language: String,
}

impl Default for TranscriberConfig {
    fn default() -> Self {
        Self {
            model_size: ModelSize::Small,
            device: Device::Gpu,
            precision: Precision::Float32,
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl TranscriberConfig {
    /// Build the configuration from `VOXTEXT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Unset or blank
    /// values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(value) = get(ENV_MODEL_SIZE) {
            config.model_size = parse(
                ENV_MODEL_SIZE,
                &value,
                "tiny, base, small, medium, large-v3",
            )?;
        }
        if let Some(value) = get(ENV_DEVICE) {
            config.device = parse(ENV_DEVICE, &value, "gpu, cpu")?;
        }
        if let Some(value) = get(ENV_PRECISION) {
            config.precision = parse(ENV_PRECISION, &value, "float32, int8")?;
        }
        if let Some(value) = get(ENV_MODEL_DIR) {
            config.model_dir = PathBuf::from(value);
        }
        if let Some(value) = get(ENV_LANGUAGE) {
            let language = value.to_lowercase();
            if language == "auto" {
                return Err(ConfigError::AutoLanguage);
            }
            if !is_known_language(&language) {
                return Err(ConfigError::UnknownLanguage(language));
            }
            config.language = language;
        }

        Ok(config)
    }

    /// File name of the Whisper checkpoint for this size and precision.
    pub fn model_file_name(&self) -> String {
        match self.precision {
            Precision::Float32 => format!("ggml-{}.bin", self.model_size),
            Precision::Int8 => format!("ggml-{}-q8_0.bin", self.model_size),
        }
    }

    pub fn model_url(&self) -> String {
        format!("{WHISPER_MODEL_BASE_URL}/{}", self.model_file_name())
    }
}

/// Checked before any weights are resolved or loaded.
#[cfg(feature = "whisper")]
fn is_known_language(code: &str) -> bool {
    whisper_rs::get_lang_id(code).is_some()
}

#[cfg(not(feature = "whisper"))]
fn is_known_language(_code: &str) -> bool {
    true
}

fn parse<T: FromStr>(var: &'static str, value: &str, expected: &'static str) -> Result<T, ConfigError> {
    value
        .to_lowercase()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            var,
            value: value.to_string(),
            expected,
        })
}
