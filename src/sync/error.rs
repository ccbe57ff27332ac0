//! Media failure taxonomy.

use serde::{Deserialize, Serialize};

/// Native media error code: fetching was aborted by the user agent.
pub const NATIVE_ERR_ABORTED: u16 = 1;
/// Native media error code: a network error interrupted fetching.
pub const NATIVE_ERR_NETWORK: u16 = 2;
/// Native media error code: the resource could not be decoded.
pub const NATIVE_ERR_DECODE: u16 = 3;
/// Native media error code: the source is not supported.
pub const NATIVE_ERR_SRC_NOT_SUPPORTED: u16 = 4;

/// Why the current source failed to load.
///
/// Every kind is terminal for the current source. The controller never
/// retries on its own; the caller re-attaches the source via
/// [`PlaybackSyncController::retry`](super::PlaybackSyncController::retry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum MediaErrorKind {
    #[error("Video loading was aborted")]
    Aborted,

    #[error("Network error while loading video")]
    NetworkFailure,

    #[error("Video format not supported by browser")]
    DecodeUnsupported,

    #[error("Video source not supported")]
    SourceUnsupported,

    #[error("Failed to load video")]
    UnknownFailure,
}

impl MediaErrorKind {
    /// Map a native error code to its kind.
    ///
    /// `None` covers surfaces that fire an error event without attaching
    /// an error object.
    pub fn from_native_code(code: Option<u16>) -> Self {
        match code {
            Some(NATIVE_ERR_ABORTED) => Self::Aborted,
            Some(NATIVE_ERR_NETWORK) => Self::NetworkFailure,
            Some(NATIVE_ERR_DECODE) => Self::DecodeUnsupported,
            Some(NATIVE_ERR_SRC_NOT_SUPPORTED) => Self::SourceUnsupported,
            _ => Self::UnknownFailure,
        }
    }

    /// Stable identifier, used in scenario expectations and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aborted => "aborted",
            Self::NetworkFailure => "network_failure",
            Self::DecodeUnsupported => "decode_unsupported",
            Self::SourceUnsupported => "source_unsupported",
            Self::UnknownFailure => "unknown_failure",
        }
    }

    /// Human-readable message shown next to the retry affordance.
    pub fn message(&self) -> String {
        self.to_string()
    }
}
