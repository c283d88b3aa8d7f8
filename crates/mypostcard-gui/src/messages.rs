use std::path::PathBuf;
use std::time::Duration;

use mypostcard_core::scene::Scene;
use mypostcard_core::state::SourceImage;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Read and decode a photo file off the UI thread.
    LoadImage { path: PathBuf },

    /// Rasterize the composed scene at export resolution and write a PNG.
    Export { scene: Scene, path: PathBuf },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    ImageLoaded {
        source: SourceImage,
        path: PathBuf,
    },
    ExportFinished {
        path: PathBuf,
        elapsed: Duration,
    },
    /// The save dialog was dismissed without picking a destination.
    ExportCancelled,
    Error {
        message: String,
    },
}
