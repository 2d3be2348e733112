// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan — native platform bridge abstractions.
//
// Defines the camera and viewer traits the scan session talks to, and picks
// the implementation for the target operating system.

pub mod traits;

#[cfg(not(any(target_os = "ios", target_os = "android")))]
pub mod desktop;

pub mod stub;

pub use traits::{NativeCamera, NativeViewer, PlatformBridge};

/// Returns the bridge implementation for the target operating system.
///
/// Mobile targets get the stub until their native camera is wired in.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        Box::new(desktop::DesktopBridge::new())
    }
    #[cfg(any(target_os = "ios", target_os = "android"))]
    {
        Box::new(stub::StubBridge)
    }
}
