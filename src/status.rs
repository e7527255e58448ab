use serde::Deserialize;
use std::fmt;

/// Recorder state as reported by the `status` endpoint.
///
/// The service sends the state as an upper-case string. Anything outside
/// the four known values parses as `Unknown` so one odd snapshot doesn't
/// take the whole poll cycle down; `Unknown` matches no panel branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RecorderState {
    #[serde(rename = "IDLE")]
    Idle,
    #[serde(rename = "RECORDING")]
    Recording,
    #[serde(rename = "WRITING")]
    Writing,
    #[serde(rename = "ERROR")]
    Error,
    #[serde(other)]
    Unknown,
}

impl fmt::Display for RecorderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecorderState::Idle => "IDLE",
            RecorderState::Recording => "RECORDING",
            RecorderState::Writing => "WRITING",
            RecorderState::Error => "ERROR",
            RecorderState::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// One status snapshot from the recorder service
///
/// Fetched fresh on every poll cycle and never merged with earlier
/// snapshots; the panel is rewritten from whichever snapshot is newest.
#[derive(Debug, Clone, Deserialize)]
pub struct RecorderStatus {
    pub status: RecorderState,
    /// Human-readable elapsed/clock time, displayed verbatim
    #[serde(default)]
    pub time_string: String,
    /// Active or last output filename
    #[serde(default)]
    pub filename: String,
}
