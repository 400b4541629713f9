//! Construction options for the window and its output area.
//!
//! Plain structs with fluent setters; defaults match the historical behavior
//! of the wrapper (600x600 black window, 550x550 white-on-black 16pt area).

use crate::color::Color;

/// Options for the main window.
///
/// # Example
/// ```
/// use winout::{Color, WindowOptions};
///
/// let opts = WindowOptions::new("Report")
///     .size(800, 400)
///     .background(Color::new(30, 30, 30));
/// assert_eq!(opts.width, 800);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WindowOptions {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub background: Color,
}

impl WindowOptions {
    /// Creates options with the given title and default geometry.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            width: 600,
            height: 600,
            background: Color::BLACK,
        }
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }
}

/// Options for the scrollable output area.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputAreaOptions {
    pub width: i32,
    pub height: i32,
    pub foreground: Color,
    pub background: Color,
    /// Point size of the output font.
    pub font_size: i32,
}

impl Default for OutputAreaOptions {
    fn default() -> Self {
        Self {
            width: 550,
            height: 550,
            foreground: Color::WHITE,
            background: Color::BLACK,
            font_size: 16,
        }
    }
}

impl OutputAreaOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn font_size(mut self, size: i32) -> Self {
        self.font_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_defaults() {
        let opts = WindowOptions::new("t");
        assert_eq!((opts.width, opts.height), (600, 600));
        assert_eq!(opts.background, Color::BLACK);
    }

    #[test]
    fn test_area_defaults() {
        let opts = OutputAreaOptions::default();
        assert_eq!((opts.width, opts.height), (550, 550));
        assert_eq!(opts.foreground, Color::WHITE);
        assert_eq!(opts.background, Color::BLACK);
        assert_eq!(opts.font_size, 16);
    }

    #[test]
    fn test_fluent_setters() {
        let opts = WindowOptions::new("t").size(100, 50).background(Color::WHITE);
        assert_eq!((opts.width, opts.height), (100, 50));
        assert_eq!(opts.background, Color::WHITE);
    }
}
