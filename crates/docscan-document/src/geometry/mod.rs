// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry module — display-to-image corner mapping and corner handle dragging.

pub mod handles;
pub mod mapper;

pub use handles::{CornerDrag, DragEvent};
pub use mapper::GeometryMapper;
