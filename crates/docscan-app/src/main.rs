// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan — document scanner
//
// Entry point. Initialises logging and backend services, then runs one
// command: a full scan flow, or a saved-scan library operation.

mod cli;
mod services;
mod session;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use docscan_bridge::PlatformBridge;
use docscan_core::error::{Result, ScanError};
use docscan_core::human_errors::{HumanError, humanize_error};
use docscan_core::{FineTuneOffset, ScanConfig};
use docscan_document::DragEvent;
use docscan_document::image::overlay::OverlayStyle;

use cli::{Cli, Command, ConfigArgs, ScanArgs};
use services::app_services::AppServices;
use session::ScanSession;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("docscan starting");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = %err, "command failed");
            report(&humanize_error(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut services = AppServices::init(cli.data_dir.as_deref())?;

    match cli.command {
        Command::Scan(args) => scan(&services, args).await,
        Command::List => list(&services),
        Command::Open { name } => {
            let bridge = docscan_bridge::platform_bridge();
            let path = services.library()?.open_in_viewer(&name, bridge.as_ref())?;
            println!("Opened {}", path.display());
            Ok(())
        }
        Command::Delete { name } => {
            let removed = services.library()?.delete(&name)?;
            println!("Deleted {}", removed.file_name);
            Ok(())
        }
        Command::Config(args) => configure(&mut services, args),
    }
}

// -- Scan --------------------------------------------------------------------

async fn scan(services: &AppServices, args: ScanArgs) -> Result<()> {
    let bridge: Arc<dyn PlatformBridge> = match args.image {
        #[cfg(not(any(target_os = "ios", target_os = "android")))]
        Some(path) => Arc::new(docscan_bridge::desktop::DesktopBridge::with_image(path)),
        #[cfg(any(target_os = "ios", target_os = "android"))]
        Some(_) => Arc::from(docscan_bridge::platform_bridge()),
        None => Arc::from(docscan_bridge::platform_bridge()),
    };
    tracing::info!(platform = bridge.platform_name(), "starting scan");

    let mut session = services.new_session();
    tracing::debug!(
        session = %session.id(),
        captures = %services.captures_dir().display(),
        scans = %services.scans_dir().display(),
        "session created"
    );
    if let Some(viewport) = args.viewport {
        session.set_viewport(viewport);
    }

    let captured = session.capture(bridge).await;
    if !step(&session, captured)? {
        println!("Capture cancelled.");
        return Ok(());
    }
    if let (Some((width, height)), Some(path)) = (session.captured_size(), session.capture_path()) {
        println!("Captured {width}x{height} px ({})", path.display());
    }

    if let Some(corners) = args.corners {
        session.update_corners(corners)?;
    }
    for drag in &args.drags {
        session.drag(DragEvent::Start(drag.start))?;
        session.drag(DragEvent::Move {
            dx: drag.dx,
            dy: drag.dy,
        })?;
        session.drag(DragEvent::End)?;
    }

    if let Some(path) = &args.preview {
        let overlay = session.preview(&OverlayStyle::default())?;
        overlay
            .save(path)
            .map_err(|e| ScanError::IoFailure(std::io::Error::other(e)))?;
        println!("Preview written to {}", path.display());
    }

    let region = session.confirm_crop().await;
    let region = step(&session, region)?;
    match session.cropped_path() {
        Some(path) => println!("Cropped to {region} ({})", path.display()),
        None => println!("Cropped to {region}"),
    }

    let document = session.export(args.name.as_deref()).await;
    let document = step(&session, document)?;
    println!(
        "Saved {} ({}x{} px, {} bytes, sha256 {})",
        document.path.display(),
        document.width,
        document.height,
        document.size_bytes,
        document.sha256
    );
    Ok(())
}

/// Pass a step's result through, noting where the session can resume on
/// failure.
fn step<T>(session: &ScanSession, result: Result<T>) -> Result<T> {
    if let (Err(_), Some(failure)) = (&result, session.failure()) {
        tracing::info!(
            kind = ?failure.kind,
            resume = %failure.resume,
            detail = %failure.detail,
            recoverable = failure.human.recoverable,
            "scan stopped"
        );
    }
    result
}

// -- Library -----------------------------------------------------------------

fn list(services: &AppServices) -> Result<()> {
    let library = services.library()?;
    if library.entries().is_empty() {
        println!("No saved scans in {}", library.dir().display());
        return Ok(());
    }
    for entry in library.entries() {
        let modified = entry
            .modified
            .map(|m| {
                m.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|| "-".into());
        println!("{:<40} {:>8} KB  {}", entry.file_name, entry.size_kb(), modified);
    }
    Ok(())
}

// -- Config ------------------------------------------------------------------

fn configure(services: &mut AppServices, args: ConfigArgs) -> Result<()> {
    let current = services.config().clone();
    let updated = if args.reset {
        ScanConfig::default()
    } else {
        ScanConfig {
            fine_tune: FineTuneOffset::new(
                args.fine_tune_x.unwrap_or(current.fine_tune.x),
                args.fine_tune_y.unwrap_or(current.fine_tune.y),
            ),
            handle_radius: args.handle_radius.unwrap_or(current.handle_radius),
            default_box_size: args.box_size.unwrap_or(current.default_box_size),
            viewport: args.viewport.unwrap_or(current.viewport),
            ..current.clone()
        }
    };

    if updated != current {
        services.save_config(updated)?;
        tracing::info!("settings saved");
    }
    let json = serde_json::to_string_pretty(services.config())?;
    println!("{json}");
    Ok(())
}

fn report(human: &HumanError) {
    eprintln!("error: {}", human.message);
    if !human.suggestion.is_empty() {
        eprintln!("  {}", human.suggestion);
    }
}
