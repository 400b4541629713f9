//! The window-output facade.
//!
//! [`OutputWindow`] owns one host window and, optionally, one append-only
//! text area inside it. It exposes print-style output, blocking file/folder
//! pickers, and independent error/message popups, all forwarded to a
//! [`Toolkit`] backend.

use std::fmt::Display;
use std::path::PathBuf;

use log::{debug, warn};

use crate::backend::{
    AreaHandle, ClosePolicy, NativeToolkit, SelectionMode, SelectionRequest, Toolkit,
    WindowHandle,
};
use crate::error::WindowError;
use crate::options::{OutputAreaOptions, WindowOptions};

/// Lifecycle of the facade's window.
///
/// Transitions are one-way: `Constructed` -> `Visible` -> `Closed`. `Closed`
/// is terminal; on the native backend reaching it ends the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowState {
    /// Window resource exists but has never been shown.
    Constructed,
    /// Window is on screen.
    Visible,
    /// Window was closed by the user. No transition out.
    Closed,
}

/// One window, at most one output area, and a handful of forwarding methods.
///
/// Not designed for concurrent use; every method is expected to run on the
/// thread that constructed the facade.
pub struct OutputWindow<T: Toolkit> {
    toolkit: T,
    handle: WindowHandle,
    area: Option<AreaHandle>,
    state: WindowState,
    options: WindowOptions,
}

impl OutputWindow<NativeToolkit> {
    /// Creates a hidden window with the given title and default geometry.
    pub fn create(title: &str) -> Result<Self, WindowError> {
        Self::create_with(WindowOptions::new(title))
    }

    /// Creates a hidden window from explicit options.
    pub fn create_with(options: WindowOptions) -> Result<Self, WindowError> {
        Self::with_toolkit(NativeToolkit::new(), options)
    }
}

impl<T: Toolkit> OutputWindow<T> {
    /// Creates the facade over an explicit backend.
    ///
    /// Look-and-feel initialization runs first, best-effort: a failure is
    /// logged and reported through an error popup, then construction
    /// continues. Only window creation itself is fatal.
    pub fn with_toolkit(mut toolkit: T, options: WindowOptions) -> Result<Self, WindowError> {
        if let Err(err) = toolkit.init_look_and_feel() {
            warn!("look-and-feel init failed: {err}");
            toolkit.show_popup("Exception", &err.to_string(), ClosePolicy::ExitProcess);
        }

        let handle = toolkit.create_window(&options, ClosePolicy::ExitProcess)?;
        debug!("created window '{}' ({}x{})", options.title, options.width, options.height);

        Ok(Self {
            toolkit,
            handle,
            area: None,
            state: WindowState::Constructed,
            options,
        })
    }

    /// Attaches the output area with default options.
    pub fn add_output_area(&mut self) -> Result<(), WindowError> {
        self.add_output_area_with(OutputAreaOptions::default())
    }

    /// Attaches the output area: word-wrapped, read-only, scrolled to the
    /// latest output. At most one area exists per window; a second call
    /// fails with [`WindowError::OutputAreaAlreadyAttached`].
    pub fn add_output_area_with(&mut self, options: OutputAreaOptions) -> Result<(), WindowError> {
        if self.area.is_some() {
            return Err(WindowError::OutputAreaAlreadyAttached);
        }
        let area = self.toolkit.attach_output_area(self.handle, &options)?;
        debug!("attached output area ({}x{})", options.width, options.height);
        self.area = Some(area);
        Ok(())
    }

    /// Appends `text` without a line terminator.
    pub fn print(&mut self, text: impl Display) -> Result<(), WindowError> {
        let area = self.area.ok_or(WindowError::OutputAreaNotInitialized)?;
        self.toolkit.append_text(area, &text.to_string());
        Ok(())
    }

    /// Appends `text` followed by a line terminator.
    pub fn println(&mut self, text: impl Display) -> Result<(), WindowError> {
        let area = self.area.ok_or(WindowError::OutputAreaNotInitialized)?;
        self.toolkit.append_text(area, &format!("{text}\n"));
        Ok(())
    }

    /// Appends a bare line terminator.
    pub fn newline(&mut self) -> Result<(), WindowError> {
        let area = self.area.ok_or(WindowError::OutputAreaNotInitialized)?;
        self.toolkit.append_text(area, "\n");
        Ok(())
    }

    /// Makes the window visible. Idempotent: repeated calls leave the same
    /// single window visible.
    pub fn show(&mut self) {
        if self.state == WindowState::Closed {
            return;
        }
        self.toolkit.show_window(self.handle);
        self.state = WindowState::Visible;
    }

    /// Opens an independent popup window titled `Exception` with the error's
    /// description centered in it. Closing that popup terminates the
    /// process. The facade's own window is untouched.
    pub fn show_error(&mut self, description: impl Display) {
        self.toolkit
            .show_popup("Exception", &description.to_string(), ClosePolicy::ExitProcess);
    }

    /// Opens an independent informational popup titled `Message`. Closing it
    /// only dismisses the popup.
    pub fn show_message(&mut self, text: impl Display) {
        self.toolkit
            .show_popup("Message", &text.to_string(), ClosePolicy::HostDefault);
    }

    /// Opens a modal files-only picker rooted at the current working
    /// directory. Blocks until the user confirms or dismisses.
    pub fn select_file(&mut self, title: &str) -> Result<PathBuf, WindowError> {
        self.select(SelectionRequest::new(title, SelectionMode::FilesOnly))
    }

    /// Opens a modal folders-only picker rooted at the current working
    /// directory. Blocks until the user confirms or dismisses.
    pub fn select_folder(&mut self, title: &str) -> Result<PathBuf, WindowError> {
        self.select(SelectionRequest::new(title, SelectionMode::FoldersOnly))
    }

    fn select(&mut self, request: SelectionRequest) -> Result<PathBuf, WindowError> {
        match self.toolkit.select_path(&request) {
            Ok(path) => {
                debug!("selection '{}' confirmed: {}", request.title, path.display());
                Ok(path)
            }
            Err(err) => {
                debug!("selection '{}' failed: {err}", request.title);
                Err(err)
            }
        }
    }

    /// Enters the host event loop until the window is closed.
    ///
    /// On the native backend this does not return: the window carries a
    /// close-terminates-process policy. On the headless backend the
    /// termination request is recorded and the terminal state is returned.
    pub fn run(&mut self) -> WindowState {
        self.toolkit.run_event_loop(self.handle);
        self.state = WindowState::Closed;
        self.state
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn title(&self) -> &str {
        &self.options.title
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn has_output_area(&self) -> bool {
        self.area.is_some()
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::headless::HeadlessToolkit;
    use crate::color::Color;

    fn facade(title: &str) -> OutputWindow<HeadlessToolkit> {
        OutputWindow::with_toolkit(HeadlessToolkit::new(), WindowOptions::new(title)).unwrap()
    }

    #[test]
    fn test_construction_records_options() {
        let opts = WindowOptions::new("Report")
            .size(320, 240)
            .background(Color::new(30, 30, 30));
        let win = OutputWindow::with_toolkit(HeadlessToolkit::new(), opts.clone()).unwrap();

        assert_eq!(win.state(), WindowState::Constructed);
        assert_eq!(win.title(), "Report");
        assert_eq!(win.options(), &opts);
        assert_eq!(
            win.toolkit().window_options(WindowHandle(0)),
            Some(&opts)
        );
        assert!(!win.toolkit().is_visible(WindowHandle(0)));
    }

    #[test]
    fn test_print_accumulates_in_append_order() {
        let mut win = facade("t");
        win.add_output_area().unwrap();
        win.println("a").unwrap();
        win.print("b").unwrap();
        win.println("c").unwrap();
        assert_eq!(win.toolkit().buffer(0), "a\nbc\n");
    }

    #[test]
    fn test_newline_appends_bare_terminator() {
        let mut win = facade("t");
        win.add_output_area().unwrap();
        win.print("x").unwrap();
        win.newline().unwrap();
        assert_eq!(win.toolkit().buffer(0), "x\n");
    }

    #[test]
    fn test_println_accepts_display_values() {
        let mut win = facade("t");
        win.add_output_area().unwrap();
        win.println(42).unwrap();
        win.println(PathBuf::from("/tmp").display()).unwrap();
        assert_eq!(win.toolkit().buffer(0), "42\n/tmp\n");
    }

    #[test]
    fn test_print_before_area_fails_loudly() {
        let mut win = facade("t");
        assert!(matches!(
            win.print("x"),
            Err(WindowError::OutputAreaNotInitialized)
        ));
        assert!(matches!(
            win.println("x"),
            Err(WindowError::OutputAreaNotInitialized)
        ));
        assert!(matches!(
            win.newline(),
            Err(WindowError::OutputAreaNotInitialized)
        ));
    }

    #[test]
    fn test_second_output_area_is_rejected() {
        let mut win = facade("t");
        win.add_output_area().unwrap();
        win.println("kept").unwrap();

        let err = win.add_output_area();
        assert!(matches!(err, Err(WindowError::OutputAreaAlreadyAttached)));
        // the first area and its contents are untouched
        assert_eq!(win.toolkit().area_count(), 1);
        assert_eq!(win.toolkit().buffer(0), "kept\n");
    }

    #[test]
    fn test_show_is_idempotent() {
        let mut win = facade("t");
        win.show();
        win.show();
        assert_eq!(win.state(), WindowState::Visible);
        assert_eq!(win.toolkit().window_count(), 1);
        assert!(win.toolkit().is_visible(WindowHandle(0)));
    }

    #[test]
    fn test_select_file_returns_confirmed_path() {
        let mut win = facade("t");
        win.toolkit_mut().queue_selection("/data/in.csv");
        assert_eq!(
            win.select_file("Pick input").unwrap(),
            PathBuf::from("/data/in.csv")
        );
    }

    #[test]
    fn test_dismissed_dialog_is_cancellation_not_empty_success() {
        let mut win = facade("t");
        win.toolkit_mut().queue_cancelled();
        assert!(matches!(
            win.select_folder("Pick output"),
            Err(WindowError::SelectionCancelled)
        ));
    }

    #[test]
    fn test_popups_are_fresh_and_leave_window_alone() {
        let mut win = facade("t");
        // before show()
        win.show_error("boom");
        win.show();
        // after show()
        win.show_message("done");
        win.show_error("boom again");

        let popups = win.toolkit().popups();
        assert_eq!(popups.len(), 3);
        assert_eq!(popups[0].title, "Exception");
        assert_eq!(popups[1].title, "Message");
        assert_eq!(popups[2].body, "boom again");
        // the facade's own window is untouched by popups
        assert_eq!(win.state(), WindowState::Visible);
        assert_eq!(win.toolkit().window_count(), 1);
        assert!(win.toolkit().is_visible(WindowHandle(0)));
    }

    #[test]
    fn test_error_popup_exits_message_popup_does_not() {
        let mut win = facade("t");
        win.show_error("boom");
        win.show_message("fyi");

        let popups = win.toolkit().popups();
        assert_eq!(popups[0].policy, ClosePolicy::ExitProcess);
        assert_eq!(popups[1].policy, ClosePolicy::HostDefault);
    }

    #[test]
    fn test_close_is_terminal_and_requests_exit() {
        let mut win = facade("t");
        win.show();
        win.toolkit_mut().simulate_close(WindowHandle(0));
        let state = win.run();
        assert_eq!(state, WindowState::Closed);
        assert_eq!(win.state(), WindowState::Closed);
        // close-to-exit policy on the main window reached the host
        assert!(win.toolkit().exit_requested());
        // no way back out of Closed
        win.show();
        assert_eq!(win.state(), WindowState::Closed);
    }

    #[test]
    fn test_broken_look_and_feel_reports_and_continues() {
        let win = OutputWindow::with_toolkit(
            HeadlessToolkit::with_broken_look_and_feel(),
            WindowOptions::new("t"),
        )
        .unwrap();

        // construction survived and the failure went out the popup channel
        assert_eq!(win.state(), WindowState::Constructed);
        let popups = win.toolkit().popups();
        assert_eq!(popups.len(), 1);
        assert_eq!(popups[0].title, "Exception");
        assert_eq!(popups[0].policy, ClosePolicy::ExitProcess);
    }
}
