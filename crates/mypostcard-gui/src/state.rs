use std::path::PathBuf;

/// Transient UI state that never affects composed output.
#[derive(Default)]
pub struct UIState {
    /// Path of the last uploaded photo, for display in the file section.
    pub photo_path: Option<PathBuf>,
    /// True between requesting an export and hearing back from the worker.
    pub exporting: bool,
    /// Set on worker errors; shown as a modal until dismissed.
    pub error_message: Option<String>,
    pub log_messages: Vec<String>,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
