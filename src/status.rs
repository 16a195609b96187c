//! Status side channel and error taxonomy.
//!
//! Every user-visible operation resolves to exactly one [`Status`]; failures
//! are recovered where they occur and never propagate past the UI layer. The
//! `Display` text of each error is the message shown to the user.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

impl Tone {
    /// Value of the `data-tone` attribute on the status line.
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Info => "info",
            Tone::Success => "success",
            Tone::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub tone: Tone,
}

impl Status {
    pub fn info(text: impl Into<String>) -> Status {
        Status { text: text.into(), tone: Tone::Info }
    }

    pub fn success(text: impl Into<String>) -> Status {
        Status { text: text.into(), tone: Tone::Success }
    }

    pub fn error(text: impl Into<String>) -> Status {
        Status { text: text.into(), tone: Tone::Error }
    }
}

/// Failures raised while producing or exporting the QR image.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("QR engine is not available. Try again in a moment.")]
    EngineUnavailable,
    #[error("Content is too long for a QR code at this correction level.")]
    PayloadTooLong,
    #[error("Could not acquire a drawing surface for the QR code.")]
    SurfaceFailed,
    #[error("Unable to export the QR image.")]
    ExportFailed,
}

/// Failures raised by the host clipboard capability.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("Clipboard access is not supported in this browser.")]
    Unavailable,
    #[error("Clipboard access failed.")]
    WriteRejected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tones_serialize_for_the_dom() {
        assert_eq!(Tone::Info.as_str(), "info");
        assert_eq!(Tone::Success.as_str(), "success");
        assert_eq!(Tone::Error.as_str(), "error");
    }

    #[test]
    fn error_text_is_user_facing() {
        assert_eq!(
            RenderError::PayloadTooLong.to_string(),
            "Content is too long for a QR code at this correction level."
        );
        assert_eq!(
            ClipboardError::Unavailable.to_string(),
            "Clipboard access is not supported in this browser."
        );
    }
}
