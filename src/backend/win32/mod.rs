//! Native Win32 backend.
//!
//! Thin adapter over raw Win32: one registered window class, an EDIT control
//! for the output area, `IFileOpenDialog` for path selection, and a standard
//! message loop. All calls must stay on the thread that created the toolkit.

use std::path::PathBuf;

use log::debug;
use windows_sys::Win32::Foundation::HWND;

use crate::backend::{
    AreaHandle, ClosePolicy, SelectionRequest, Toolkit, WindowHandle,
};
use crate::error::WindowError;
use crate::options::{OutputAreaOptions, WindowOptions};

mod com;
mod dialog;
mod theme;
mod util;
mod window;

pub struct Win32Toolkit {
    windows: Vec<HWND>,
    areas: Vec<HWND>,
}

impl Win32Toolkit {
    pub fn new() -> Self {
        unsafe {
            // Required by IFileOpenDialog; may already be initialized
            let _ = com::CoInitializeEx(std::ptr::null_mut(), com::COINIT_APARTMENTTHREADED);
        }
        Self {
            windows: Vec::new(),
            areas: Vec::new(),
        }
    }

    fn hwnd(&self, handle: WindowHandle) -> HWND {
        self.windows
            .get(handle.0)
            .copied()
            .unwrap_or(std::ptr::null_mut())
    }
}

impl Default for Win32Toolkit {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolkit for Win32Toolkit {
    fn init_look_and_feel(&mut self) -> Result<(), WindowError> {
        unsafe { theme::init_look_and_feel() }
    }

    fn create_window(
        &mut self,
        options: &WindowOptions,
        policy: ClosePolicy,
    ) -> Result<WindowHandle, WindowError> {
        let hwnd = unsafe { window::create_main_window(options, policy)? };
        self.windows.push(hwnd);
        Ok(WindowHandle(self.windows.len() - 1))
    }

    fn attach_output_area(
        &mut self,
        window: WindowHandle,
        options: &OutputAreaOptions,
    ) -> Result<AreaHandle, WindowError> {
        let edit = unsafe { window::attach_output_area(self.hwnd(window), options)? };
        self.areas.push(edit);
        Ok(AreaHandle(self.areas.len() - 1))
    }

    fn append_text(&mut self, area: AreaHandle, text: &str) {
        if let Some(&edit) = self.areas.get(area.0) {
            unsafe { window::append_text(edit, text) };
        }
    }

    fn show_window(&mut self, window: WindowHandle) {
        unsafe { window::show_window(self.hwnd(window)) };
    }

    fn show_popup(&mut self, title: &str, body: &str, policy: ClosePolicy) {
        unsafe { window::create_popup(title, body, policy) };
    }

    fn select_path(&mut self, request: &SelectionRequest) -> Result<PathBuf, WindowError> {
        unsafe { dialog::select_path(request) }
    }

    fn run_event_loop(&mut self, _window: WindowHandle) {
        unsafe { util::run_message_loop() };
        // The loop only ends when a close-terminates-process window was
        // closed, so honor that policy here.
        debug!("event loop ended, terminating process");
        std::process::exit(0);
    }
}
