use std::path::Path;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use mypostcard_core::export::Exporter;
use mypostcard_core::raster::SoftwareRasterizer;
use mypostcard_core::scene::Scene;
use mypostcard_core::state::SourceImage;

use crate::messages::{WorkerCommand, WorkerResult};

/// Pause between receiving an export request and capturing, so the frame
/// composed right before the request (slider still settling, dialog closing)
/// is what ends up in the file.
const EXPORT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    rasterizer: Option<Arc<SoftwareRasterizer>>,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("postcard-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, rasterizer);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn send_error(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, msg: impl Into<String>) {
    send(tx, ctx, WorkerResult::Error { message: msg.into() });
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    rasterizer: Option<Arc<SoftwareRasterizer>>,
) {
    let exporter = Exporter::new();

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::LoadImage { path } => {
                handle_load_image(&path, &tx, &ctx);
            }
            WorkerCommand::Export { scene, path } => {
                handle_export(&scene, &path, rasterizer.as_deref(), &exporter, &tx, &ctx);
            }
        }
    }
}

fn handle_load_image(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    let loaded = std::fs::read(path)
        .with_context(|| format!("reading {}", path.display()))
        .and_then(|bytes| {
            SourceImage::decode(&bytes).with_context(|| format!("decoding {}", path.display()))
        });

    match loaded {
        Ok(source) => send(
            tx,
            ctx,
            WorkerResult::ImageLoaded {
                source,
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Failed to load photo: {e:#}")),
    }
}

fn handle_export(
    scene: &Scene,
    path: &Path,
    rasterizer: Option<&SoftwareRasterizer>,
    exporter: &Exporter,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(rasterizer) = rasterizer else {
        send_error(tx, ctx, "Export unavailable: no usable fonts on this system");
        return;
    };

    std::thread::sleep(EXPORT_SETTLE_DELAY);
    let start = Instant::now();
    match exporter.export_to_file(rasterizer, scene, path) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::ExportFinished {
                path: path.to_path_buf(),
                elapsed: start.elapsed(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Export failed: {e}")),
    }
}
