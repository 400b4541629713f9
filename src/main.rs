#![cfg_attr(windows, windows_subsystem = "windows")]
//! Demo driver for the winout facade.
//!
//! Creates a window with an output area, prints a few lines, and (with
//! `--pick`) exercises the file picker, printing the outcome to the area.

use winout::{OutputWindow, WindowError};

fn main() {
    env_logger::init();

    let pick = std::env::args().any(|a| a == "--pick");

    let mut window = match OutputWindow::create("winout demo") {
        Ok(window) => window,
        Err(err) => {
            eprintln!("failed to create window: {err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = build_output(&mut window, pick) {
        window.show_error(err);
    }

    window.show();
    window.run();
}

fn build_output(
    window: &mut OutputWindow<winout::NativeToolkit>,
    pick: bool,
) -> Result<(), WindowError> {
    window.add_output_area()?;
    window.println("winout demo")?;
    window.newline()?;
    window.println("close this window to exit")?;

    if pick {
        match window.select_file("Pick any file") {
            Ok(path) => window.println(format!("picked: {}", path.display()))?,
            Err(WindowError::SelectionCancelled) => window.println("picker dismissed")?,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}
