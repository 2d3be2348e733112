// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — single-page scan export and read-back inspection.

pub mod reader;
pub mod writer;

pub use reader::PdfInspector;
pub use writer::{PdfExporter, normalize_file_name};
