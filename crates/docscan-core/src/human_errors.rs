// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the scan flow.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Nothing here retries automatically: `recoverable` only says whether the
// user can try the same step again.

use crate::error::ScanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user can fix it by adjusting or trying again.
    ActionRequired,
    /// The current scan is lost; start over.
    Abort,
    /// Something is wrong with the app or device, not the user's input.
    Defect,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether the user may repeat the same step.
    pub recoverable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `ScanError` into a `HumanError` suitable for a toast or dialog.
pub fn humanize_error(err: &ScanError) -> HumanError {
    match err {
        ScanError::CaptureFailure(_) => HumanError {
            message: "The photo couldn't be taken.".into(),
            suggestion: "Make sure no other app is using the camera, then tap capture again.".into(),
            recoverable: true,
            severity: Severity::ActionRequired,
        },

        ScanError::DecodeFailure(_) => HumanError {
            message: "The photo couldn't be read.".into(),
            suggestion: "Please take the picture again.".into(),
            recoverable: false,
            severity: Severity::Abort,
        },

        ScanError::InvalidGeometry(_) => HumanError {
            message: "The crop area couldn't be worked out.".into(),
            suggestion: "Try rotating the device or reopening the scanner. If this keeps happening, please report it.".into(),
            recoverable: true,
            severity: Severity::Defect,
        },

        ScanError::DegenerateRegion { .. } => HumanError {
            message: "The corners are too close together.".into(),
            suggestion: "Drag the corners out so they surround the document, then crop again.".into(),
            recoverable: true,
            severity: Severity::ActionRequired,
        },

        ScanError::IoFailure(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The app isn't allowed to save there.".into(),
                    suggestion: "Check the app's storage permission, then try saving again.".into(),
                    recoverable: true,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::StorageFull {
                HumanError {
                    message: "Your device is out of space.".into(),
                    suggestion: "Delete some old scans or other files, then try saving again.".into(),
                    recoverable: true,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "The scan couldn't be saved.".into(),
                    suggestion: "Try again, or choose a different file name.".into(),
                    recoverable: true,
                    severity: Severity::ActionRequired,
                }
            }
        }

        ScanError::InvalidFileName(_) => HumanError {
            message: "That file name can't be used.".into(),
            suggestion: "Use a name without slashes, for example \"receipt-march\".".into(),
            recoverable: true,
            severity: Severity::ActionRequired,
        },

        ScanError::NotFound(_) => HumanError {
            message: "That scan no longer exists.".into(),
            suggestion: "It may have been deleted already. Refresh the list.".into(),
            recoverable: false,
            severity: Severity::ActionRequired,
        },

        ScanError::Serialization(_) => HumanError {
            message: "The app's settings couldn't be saved.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            recoverable: true,
            severity: Severity::Defect,
        },

        ScanError::InvalidTransition { .. } => HumanError {
            message: "That step isn't available right now.".into(),
            suggestion: "Finish the current step first.".into(),
            recoverable: true,
            severity: Severity::Defect,
        },

        ScanError::PlatformUnavailable => HumanError {
            message: "This feature isn't available on your device.".into(),
            suggestion: "Some features need a camera or a PDF viewer to be installed.".into(),
            recoverable: false,
            severity: Severity::Defect,
        },
    }
}
