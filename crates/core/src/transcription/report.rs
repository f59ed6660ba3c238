use std::io::Write;

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentRecord {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TranscriptionResult {
    pub language: String,
    pub confidence: f64,
    pub duration_seconds: f64,
    pub text: String,
    pub segments: Vec<SegmentRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ErrorResult {
    pub message: String,
}

/// The one JSON document a run prints, tagged by `status`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Report {
    Success(TranscriptionResult),
    Error(ErrorResult),
}

impl Report {
    pub fn error(message: impl Into<String>) -> Self {
        Report::Error(ErrorResult {
            message: message.into(),
        })
    }

    /// Process exit code matching this report.
    pub fn exit_code(&self) -> i32 {
        match self {
            Report::Success(_) => 0,
            Report::Error(_) => 1,
        }
    }

    /// Serialize to compact JSON. Non-ASCII characters are kept as-is.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Write the report as a single newline-terminated JSON line.
    pub fn write_line<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        serde_json::to_writer(&mut out, self)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

impl From<TranscriptionResult> for Report {
    fn from(result: TranscriptionResult) -> Self {
        Report::Success(result)
    }
}
