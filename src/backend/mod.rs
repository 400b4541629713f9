//! Host-toolkit boundary.
//!
//! The facade drives a small set of host primitives through the [`Toolkit`]
//! trait: window creation, output-area attachment, text append, popups, and
//! modal path selection. `win32` is the production backend; `headless` is an
//! in-memory recording backend used on non-Windows hosts and in tests.

use std::path::PathBuf;

use crate::error::WindowError;
use crate::options::{OutputAreaOptions, WindowOptions};

pub mod headless;

#[cfg(windows)]
pub mod win32;

#[cfg(windows)]
pub use win32::Win32Toolkit as NativeToolkit;

#[cfg(not(windows))]
pub use headless::HeadlessToolkit as NativeToolkit;

/// Opaque handle to a toolkit-owned window resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowHandle(pub(crate) usize);

/// Opaque handle to a toolkit-owned output area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AreaHandle(pub(crate) usize);

/// What happens to the process when the user closes a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosePolicy {
    /// Closing the window terminates the process. Applied to the main window
    /// and to error popups.
    ExitProcess,
    /// Closing only destroys the window. Applied to message popups.
    HostDefault,
}

/// File vs folder selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    FilesOnly,
    FoldersOnly,
}

/// A modal path-selection request.
#[derive(Clone, Debug)]
pub struct SelectionRequest {
    pub title: String,
    /// Label on the confirm button.
    pub confirm_label: String,
    pub mode: SelectionMode,
    /// Directory the dialog opens in.
    pub start_dir: PathBuf,
}

impl SelectionRequest {
    pub fn new(title: &str, mode: SelectionMode) -> Self {
        Self {
            title: title.to_string(),
            confirm_label: "Use".to_string(),
            mode,
            start_dir: std::env::current_dir().unwrap_or_default(),
        }
    }
}

/// The host primitives the facade consumes.
///
/// All methods are expected to run on the UI thread; see the crate docs for
/// the single-threaded model.
pub trait Toolkit {
    /// Best-effort native styling setup. Failure is reported, not fatal.
    fn init_look_and_feel(&mut self) -> Result<(), WindowError>;

    /// Creates a window sized per `options` and centered on the primary
    /// display. The window starts hidden.
    fn create_window(
        &mut self,
        options: &WindowOptions,
        policy: ClosePolicy,
    ) -> Result<WindowHandle, WindowError>;

    /// Attaches a word-wrapped, read-only, auto-scrolling text area inside a
    /// scrollable viewport.
    fn attach_output_area(
        &mut self,
        window: WindowHandle,
        options: &OutputAreaOptions,
    ) -> Result<AreaHandle, WindowError>;

    /// Appends `text` verbatim and scrolls the area to the latest output.
    fn append_text(&mut self, area: AreaHandle, text: &str);

    /// Makes the window visible. Safe to call repeatedly.
    fn show_window(&mut self, window: WindowHandle);

    /// Opens an independent popup window with a centered label. Never touches
    /// any previously created window.
    fn show_popup(&mut self, title: &str, body: &str, policy: ClosePolicy);

    /// Runs a modal selection dialog, blocking until the user responds.
    /// Dismissal yields [`WindowError::SelectionCancelled`].
    fn select_path(&mut self, request: &SelectionRequest) -> Result<PathBuf, WindowError>;

    /// Enters the host event loop and services windows until one carrying
    /// [`ClosePolicy::ExitProcess`] is closed. The native backend then ends
    /// the process; the headless backend records the termination request and
    /// returns.
    fn run_event_loop(&mut self, window: WindowHandle);
}
