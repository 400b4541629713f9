//! In-memory toolkit backend.
//!
//! Records every primitive the facade drives instead of touching a real
//! display: appended text accumulates in per-area `String` buffers, dialogs
//! play back scripted outcomes, and process termination is recorded as a flag
//! so terminal behavior stays observable. This is the native backend on
//! non-Windows hosts and the simulation harness for tests.

use std::collections::VecDeque;
use std::path::PathBuf;

use crate::backend::{
    AreaHandle, ClosePolicy, SelectionRequest, Toolkit, WindowHandle,
};
use crate::error::WindowError;
use crate::options::{OutputAreaOptions, WindowOptions};

struct HeadlessWindow {
    options: WindowOptions,
    policy: ClosePolicy,
    visible: bool,
    closed: bool,
}

struct HeadlessArea {
    options: OutputAreaOptions,
    buffer: String,
}

/// A recorded popup window.
#[derive(Clone, Debug)]
pub struct PopupRecord {
    pub title: String,
    pub body: String,
    pub policy: ClosePolicy,
}

#[derive(Default)]
pub struct HeadlessToolkit {
    windows: Vec<HeadlessWindow>,
    areas: Vec<HeadlessArea>,
    popups: Vec<PopupRecord>,
    /// Scripted dialog outcomes; `None` plays back a dismissal.
    selections: VecDeque<Option<PathBuf>>,
    look_and_feel_broken: bool,
    exit_requested: bool,
}

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `init_look_and_feel` fail, for exercising the reporting path.
    pub fn with_broken_look_and_feel() -> Self {
        Self {
            look_and_feel_broken: true,
            ..Self::default()
        }
    }

    /// Scripts the next dialog to confirm `path`.
    pub fn queue_selection(&mut self, path: impl Into<PathBuf>) {
        self.selections.push_back(Some(path.into()));
    }

    /// Scripts the next dialog to be dismissed.
    pub fn queue_cancelled(&mut self) {
        self.selections.push_back(None);
    }

    /// Simulates the user closing a window, with the same effects the real
    /// close would have under a running event loop.
    pub fn simulate_close(&mut self, window: WindowHandle) {
        self.close_window(window);
    }

    fn close_window(&mut self, window: WindowHandle) {
        if let Some(win) = self.windows.get_mut(window.0) {
            win.closed = true;
            win.visible = false;
            if win.policy == ClosePolicy::ExitProcess {
                self.exit_requested = true;
            }
        }
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn is_visible(&self, window: WindowHandle) -> bool {
        self.windows.get(window.0).is_some_and(|w| w.visible)
    }

    pub fn is_closed(&self, window: WindowHandle) -> bool {
        self.windows.get(window.0).is_some_and(|w| w.closed)
    }

    pub fn window_options(&self, window: WindowHandle) -> Option<&WindowOptions> {
        self.windows.get(window.0).map(|w| &w.options)
    }

    pub fn area_options(&self, area: AreaHandle) -> Option<&OutputAreaOptions> {
        self.areas.get(area.0).map(|a| &a.options)
    }

    /// Accumulated text of the `index`-th attached area.
    pub fn buffer(&self, index: usize) -> &str {
        self.areas.get(index).map(|a| a.buffer.as_str()).unwrap_or("")
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    pub fn popups(&self) -> &[PopupRecord] {
        &self.popups
    }

    /// Whether a close-to-exit window was closed during `run_event_loop`.
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

impl Toolkit for HeadlessToolkit {
    fn init_look_and_feel(&mut self) -> Result<(), WindowError> {
        if self.look_and_feel_broken {
            return Err(WindowError::look_and_feel("no styling on this host"));
        }
        Ok(())
    }

    fn create_window(
        &mut self,
        options: &WindowOptions,
        policy: ClosePolicy,
    ) -> Result<WindowHandle, WindowError> {
        self.windows.push(HeadlessWindow {
            options: options.clone(),
            policy,
            visible: false,
            closed: false,
        });
        Ok(WindowHandle(self.windows.len() - 1))
    }

    fn attach_output_area(
        &mut self,
        _window: WindowHandle,
        options: &OutputAreaOptions,
    ) -> Result<AreaHandle, WindowError> {
        self.areas.push(HeadlessArea {
            options: options.clone(),
            buffer: String::new(),
        });
        Ok(AreaHandle(self.areas.len() - 1))
    }

    fn append_text(&mut self, area: AreaHandle, text: &str) {
        if let Some(a) = self.areas.get_mut(area.0) {
            a.buffer.push_str(text);
        }
    }

    fn show_window(&mut self, window: WindowHandle) {
        if let Some(win) = self.windows.get_mut(window.0) {
            win.visible = true;
        }
    }

    fn show_popup(&mut self, title: &str, body: &str, policy: ClosePolicy) {
        self.popups.push(PopupRecord {
            title: title.to_string(),
            body: body.to_string(),
            policy,
        });
    }

    fn select_path(&mut self, _request: &SelectionRequest) -> Result<PathBuf, WindowError> {
        match self.selections.pop_front() {
            Some(Some(path)) => Ok(path),
            // Unscripted dialogs behave like a dismissal
            Some(None) | None => Err(WindowError::SelectionCancelled),
        }
    }

    fn run_event_loop(&mut self, window: WindowHandle) {
        // The loop "returns" once the window is gone; without an explicit
        // simulate_close this models the user closing it right away.
        self.close_window(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_accumulates_in_order() {
        let mut tk = HeadlessToolkit::new();
        let win = tk
            .create_window(&WindowOptions::new("t"), ClosePolicy::ExitProcess)
            .unwrap();
        let area = tk.attach_output_area(win, &OutputAreaOptions::default()).unwrap();
        tk.append_text(area, "a\n");
        tk.append_text(area, "b");
        assert_eq!(tk.buffer(0), "a\nb");
    }

    #[test]
    fn test_selection_script_plays_back_in_order() {
        let mut tk = HeadlessToolkit::new();
        tk.queue_selection("/tmp/one");
        tk.queue_cancelled();
        let req = SelectionRequest::new("pick", crate::backend::SelectionMode::FilesOnly);

        assert_eq!(tk.select_path(&req).unwrap(), PathBuf::from("/tmp/one"));
        assert!(matches!(
            tk.select_path(&req),
            Err(WindowError::SelectionCancelled)
        ));
        // empty queue also reads as dismissal
        assert!(matches!(
            tk.select_path(&req),
            Err(WindowError::SelectionCancelled)
        ));
    }

    #[test]
    fn test_exit_only_requested_for_exit_policy_windows() {
        let mut tk = HeadlessToolkit::new();
        let win = tk
            .create_window(&WindowOptions::new("t"), ClosePolicy::HostDefault)
            .unwrap();
        tk.simulate_close(win);
        tk.run_event_loop(win);
        assert!(tk.is_closed(win));
        assert!(!tk.exit_requested());
    }
}
