// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — storage layout, persisted settings, and the saved-scan
// library, shared by the command handlers.

pub mod app_services;
pub mod data_dir;
pub mod scan_library;
