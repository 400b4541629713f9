//! winout - a minimal window-output facade.
//!
//! One window, an optional append-only text area, print-style output,
//! blocking file/folder pickers, and independent error/message popups.
//! The native backend drives raw Win32; everywhere else (and in tests) a
//! headless recording backend stands in.
//!
//! # Overview
//!
//! - [`OutputWindow`]: the facade. Owns the window and at most one output
//!   area; forwards everything to a [`Toolkit`] backend.
//! - `Win32Toolkit` / [`HeadlessToolkit`]: the two backends;
//!   `NativeToolkit` is the platform default.
//! - [`WindowError`]: the error taxonomy, including the distinct
//!   `SelectionCancelled` outcome for dismissed dialogs.
//!
//! # Example
//!
//! ```no_run
//! use winout::OutputWindow;
//!
//! let mut window = OutputWindow::create("Report").unwrap();
//! window.add_output_area().unwrap();
//! window.println("processing inputs").unwrap();
//! window.show();
//!
//! match window.select_file("Pick an input file") {
//!     Ok(path) => window.println(path.display()).unwrap(),
//!     Err(winout::WindowError::SelectionCancelled) => {
//!         window.println("selection cancelled").unwrap()
//!     }
//!     Err(err) => window.show_error(err),
//! }
//!
//! window.run();
//! ```
//!
//! The facade is single-threaded by design: construct it and call it from
//! one thread, the one that runs the event loop.

pub mod backend;
pub mod color;
pub mod error;
pub mod options;
pub mod window;

// Re-export commonly used types
pub use backend::headless::HeadlessToolkit;
pub use backend::{
    AreaHandle, ClosePolicy, NativeToolkit, SelectionMode, SelectionRequest, Toolkit, WindowHandle,
};
pub use color::Color;
pub use error::WindowError;
pub use options::{OutputAreaOptions, WindowOptions};
pub use window::{OutputWindow, WindowState};
