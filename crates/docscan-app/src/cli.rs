// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use docscan_core::{CornerSet, DisplayPoint, Viewport};

#[derive(Parser, Debug)]
#[command(
    name = "docscan",
    version,
    about = "Capture a document, adjust its corners, crop, and save it as a PDF"
)]
pub struct Cli {
    /// Data directory (default: $XDG_DATA_HOME/docscan)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Capture, crop, and export one page
    Scan(ScanArgs),
    /// List saved scans, newest first
    List,
    /// Open a saved scan in the system PDF viewer
    Open { name: String },
    /// Delete a saved scan
    Delete { name: String },
    /// Show or change scanner settings
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Use this photo instead of asking the camera (or file picker)
    #[arg(long)]
    pub image: Option<PathBuf>,
    /// Name for the PDF (default: scan_YYYYMMDD_HHMMSS)
    #[arg(long)]
    pub name: Option<String>,
    /// Size of the preview the corners refer to, as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<Viewport>,
    /// Corners in display units, as "x,y x,y x,y x,y"
    #[arg(long, value_parser = parse_corners, allow_hyphen_values = true)]
    pub corners: Option<CornerSet>,
    /// Drag gesture applied after --corners, as "x,y:dx,dy" (repeatable)
    #[arg(long = "drag", value_parser = parse_drag, allow_hyphen_values = true)]
    pub drags: Vec<DragArg>,
    /// Write the capture with the corner overlay to this PNG before cropping
    #[arg(long)]
    pub preview: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Horizontal calibration offset
    #[arg(long, allow_negative_numbers = true)]
    pub fine_tune_x: Option<f32>,
    /// Vertical calibration offset
    #[arg(long, allow_negative_numbers = true)]
    pub fine_tune_y: Option<f32>,
    /// Corner grab radius
    #[arg(long)]
    pub handle_radius: Option<f32>,
    /// Side of the initial corner square
    #[arg(long)]
    pub box_size: Option<f32>,
    /// Default preview size, as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<Viewport>,
    /// Restore every setting to its default
    #[arg(long, conflicts_with_all = ["fine_tune_x", "fine_tune_y", "handle_radius", "box_size", "viewport"])]
    pub reset: bool,
}

/// One press-move-release gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragArg {
    pub start: DisplayPoint,
    pub dx: f32,
    pub dy: f32,
}

fn parse_pair(text: &str) -> Result<(f32, f32), String> {
    let (a, b) = text
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {text:?}"))?;
    let a: f32 = a.trim().parse().map_err(|e| format!("{a:?}: {e}"))?;
    let b: f32 = b.trim().parse().map_err(|e| format!("{b:?}: {e}"))?;
    if !(a.is_finite() && b.is_finite()) {
        return Err(format!("{text:?} is not a finite point"));
    }
    Ok((a, b))
}

pub fn parse_viewport(text: &str) -> Result<Viewport, String> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {text:?}"))?;
    let w: f32 = w.trim().parse().map_err(|e| format!("{w:?}: {e}"))?;
    let h: f32 = h.trim().parse().map_err(|e| format!("{h:?}: {e}"))?;
    let viewport = Viewport::new(w, h);
    if viewport.is_valid() {
        Ok(viewport)
    } else {
        Err(format!("viewport {text:?} must be positive"))
    }
}

pub fn parse_corners(text: &str) -> Result<CornerSet, String> {
    let points = text
        .split([' ', ';'])
        .filter(|part| !part.is_empty())
        .map(|part| parse_pair(part).map(|(x, y)| DisplayPoint::new(x, y)))
        .collect::<Result<Vec<_>, _>>()?;
    let points: [DisplayPoint; 4] = points
        .try_into()
        .map_err(|found: Vec<_>| format!("expected 4 corners, got {}", found.len()))?;
    Ok(CornerSet::from(points))
}

pub fn parse_drag(text: &str) -> Result<DragArg, String> {
    let (start, delta) = text
        .split_once(':')
        .ok_or_else(|| format!("expected \"x,y:dx,dy\", got {text:?}"))?;
    let (x, y) = parse_pair(start)?;
    let (dx, dy) = parse_pair(delta)?;
    Ok(DragArg {
        start: DisplayPoint::new(x, y),
        dx,
        dy,
    })
}
