// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Decode(String),
    Encode(String),
    Config(String),
    InvalidCounter(String),
    Capture(CaptureError),
}

/// Specific error types for screen-capture failures.
/// Used to give the shell something more actionable than a raw message.
#[derive(Debug, Clone)]
pub enum CaptureError {
    /// No monitor could be found to capture from.
    NoMonitor,

    /// The OS capture call itself failed.
    CaptureFailed(String),

    /// The requested region falls outside the captured screen.
    RegionOutOfBounds {
        /// Requested region as (x, y, width, height).
        requested: (u32, u32, u32, u32),
        /// Size of the captured screen.
        screen_size: (u32, u32),
    },

    /// The requested region has zero width or height.
    EmptyRegion,
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NoMonitor => write!(f, "No monitor available for capture"),
            CaptureError::CaptureFailed(msg) => write!(f, "Screen capture failed: {}", msg),
            CaptureError::RegionOutOfBounds {
                requested,
                screen_size,
            } => write!(
                f,
                "Region ({},{},{},{}) exceeds screen bounds {}x{}",
                requested.0, requested.1, requested.2, requested.3, screen_size.0, screen_size.1
            ),
            CaptureError::EmptyRegion => write!(f, "Capture region has zero width or height"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Encode(e) => write!(f, "Encode Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::InvalidCounter(e) => write!(f, "Invalid counter value: {}", e),
            Error::Capture(e) => write!(f, "Capture Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<CaptureError> for Error {
    fn from(err: CaptureError) -> Self {
        Error::Capture(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
