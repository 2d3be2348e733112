// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for docscan.

use thiserror::Error;

/// Top-level error type for all docscan operations.
#[derive(Debug, Error)]
pub enum ScanError {
    // -- Capture / decode --
    #[error("camera capture failed: {0}")]
    CaptureFailure(String),

    #[error("could not decode captured image: {0}")]
    DecodeFailure(String),

    // -- Geometry --
    #[error("invalid display geometry: {0}")]
    InvalidGeometry(String),

    #[error("selected corners enclose no area ({width}x{height} px)")]
    DegenerateRegion { width: i64, height: i64 },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    IoFailure(#[from] std::io::Error),

    #[error("invalid file name {0:?}")]
    InvalidFileName(String),

    #[error("no saved scan named {0:?}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Session --
    #[error("cannot {action} while session is {from}")]
    InvalidTransition { from: String, action: &'static str },

    // -- Platform bridge --
    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Coarse classification of a [`ScanError`], recorded by the scan session
/// when a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanErrorKind {
    CaptureFailure,
    DecodeFailure,
    InvalidGeometry,
    DegenerateRegion,
    IoFailure,
    InvalidFileName,
    NotFound,
    InvalidTransition,
    PlatformUnavailable,
}

impl ScanError {
    /// The classification of this error.
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            Self::CaptureFailure(_) => ScanErrorKind::CaptureFailure,
            Self::DecodeFailure(_) => ScanErrorKind::DecodeFailure,
            Self::InvalidGeometry(_) => ScanErrorKind::InvalidGeometry,
            Self::DegenerateRegion { .. } => ScanErrorKind::DegenerateRegion,
            // A config file that fails to serialise is a write failure from
            // the user's point of view.
            Self::IoFailure(_) | Self::Serialization(_) => ScanErrorKind::IoFailure,
            Self::InvalidFileName(_) => ScanErrorKind::InvalidFileName,
            Self::NotFound(_) => ScanErrorKind::NotFound,
            Self::InvalidTransition { .. } => ScanErrorKind::InvalidTransition,
            Self::PlatformUnavailable => ScanErrorKind::PlatformUnavailable,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanError>;
