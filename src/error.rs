// MIT License - Copyright (c) 2026 Peter Wright
// Error taxonomy for the PTZ control client

use std::fmt;

/// Response codes returned by the camera in the `rspCode` field of a failed
/// command reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceErrorCode {
    /// -1 - Missing parameters
    MissingParameters,
    /// -2 - Used up memory
    OutOfMemory,
    /// -3 - Check error
    CheckError,
    /// -4 - Parameters error
    ParameterError,
    /// -5 - Reached the max session number
    MaxSessions,
    /// -6 - Login required
    LoginRequired,
    /// -7 - Login error
    LoginError,
    /// -8 - Operation timeout
    OperationTimeout,
    /// -9 - Not supported
    NotSupported,
    /// -10 - Protocol error
    ProtocolError,
    /// -11 - Failed to read operation
    ReadFailed,
    /// -12 - Failed to get configuration
    GetConfigFailed,
    /// -13 - Failed to set configuration
    SetConfigFailed,
    /// -21 - Token error
    TokenError,
    /// -24 - Command error
    CommandError,
    /// -25 - Internal error
    InternalError,
    /// -26 - Ability error
    AbilityError,
    /// Any code not listed above, kept verbatim.
    Other(i64),
}

impl DeviceErrorCode {
    /// Map a raw `rspCode` to a known code.
    pub fn from_code(code: i64) -> Self {
        match code {
            -1 => Self::MissingParameters,
            -2 => Self::OutOfMemory,
            -3 => Self::CheckError,
            -4 => Self::ParameterError,
            -5 => Self::MaxSessions,
            -6 => Self::LoginRequired,
            -7 => Self::LoginError,
            -8 => Self::OperationTimeout,
            -9 => Self::NotSupported,
            -10 => Self::ProtocolError,
            -11 => Self::ReadFailed,
            -12 => Self::GetConfigFailed,
            -13 => Self::SetConfigFailed,
            -21 => Self::TokenError,
            -24 => Self::CommandError,
            -25 => Self::InternalError,
            -26 => Self::AbilityError,
            other => Self::Other(other),
        }
    }

    /// The raw wire value.
    pub fn code(&self) -> i64 {
        match self {
            Self::MissingParameters => -1,
            Self::OutOfMemory => -2,
            Self::CheckError => -3,
            Self::ParameterError => -4,
            Self::MaxSessions => -5,
            Self::LoginRequired => -6,
            Self::LoginError => -7,
            Self::OperationTimeout => -8,
            Self::NotSupported => -9,
            Self::ProtocolError => -10,
            Self::ReadFailed => -11,
            Self::GetConfigFailed => -12,
            Self::SetConfigFailed => -13,
            Self::TokenError => -21,
            Self::CommandError => -24,
            Self::InternalError => -25,
            Self::AbilityError => -26,
            Self::Other(code) => *code,
        }
    }

    /// Human-readable description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingParameters => "Missing parameters",
            Self::OutOfMemory => "Used up memory",
            Self::CheckError => "Check error",
            Self::ParameterError => "Parameters error",
            Self::MaxSessions => "Reached the max session number",
            Self::LoginRequired => "Login required",
            Self::LoginError => "Login error",
            Self::OperationTimeout => "Operation timeout",
            Self::NotSupported => "Not supported",
            Self::ProtocolError => "Protocol error",
            Self::ReadFailed => "Failed to read operation",
            Self::GetConfigFailed => "Failed to get configuration",
            Self::SetConfigFailed => "Failed to set configuration",
            Self::TokenError => "Token error",
            Self::CommandError => "Command error",
            Self::InternalError => "Internal error",
            Self::AbilityError => "Ability error",
            Self::Other(_) => "Unknown error",
        }
    }
}

impl fmt::Display for DeviceErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// All errors that can occur in the PTZ control client.
#[derive(Debug, thiserror::Error)]
pub enum PtzError {
    /// Rejected locally, before anything was sent to the camera.
    #[error("Validation failed: {reason}")]
    Validation { reason: String },

    /// The camera answered the command with a failure code.
    #[error("Device rejected {command} ({code}){}", detail_suffix(.detail))]
    Device {
        command: String,
        code: DeviceErrorCode,
        detail: String,
    },

    /// The transport could not complete the exchange.
    #[error("Transport failure on {command}: {reason}")]
    Transport { command: String, reason: String },

    #[error("Invalid response: {details}")]
    InvalidResponse { details: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

fn detail_suffix(detail: &str) -> String {
    if detail.is_empty() {
        String::new()
    } else {
        format!(": {detail}")
    }
}

impl PtzError {
    pub fn validation(reason: impl Into<String>) -> Self {
        PtzError::Validation {
            reason: reason.into(),
        }
    }

    pub fn invalid_response(details: impl Into<String>) -> Self {
        PtzError::InvalidResponse {
            details: details.into(),
        }
    }

    /// Whether the error came from the device or the link to it.
    ///
    /// These are always surfaced to the caller unchanged. Everything else
    /// (malformed replies, local validation) may be absorbed by best-effort
    /// paths such as the motion-zone merge read.
    pub fn is_device_error(&self) -> bool {
        matches!(self, PtzError::Device { .. } | PtzError::Transport { .. })
    }

    /// Whether the error was raised before any request was issued.
    pub fn is_validation(&self) -> bool {
        matches!(self, PtzError::Validation { .. })
    }
}

pub type Result<T> = std::result::Result<T, PtzError>;
