/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 *
 * Unless you explicitly state otherwise, any contribution intentionally
 * submitted for inclusion in the work by you, as defined in the Apache-2.0
 * license, shall be dual licensed as above, without any additional terms or
 * conditions.
 */

//! Sizing of the widget container.
//!
//! Minimized meetings occupy a fixed footprint in a window corner; maximized
//! meetings fill the window minus a border on every side.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportConfig {
    pub border_inset: u32,
    pub minimized_width: u32,
    pub minimized_height: u32,
}

/// Inner size of the browser window in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl WindowSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Target size of the widget iframe in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// CSS length for the width, e.g. `"320px"`.
    pub fn css_width(&self) -> String {
        format!("{}px", self.width)
    }

    pub fn css_height(&self) -> String {
        format!("{}px", self.height)
    }
}

impl ViewportConfig {
    pub fn compute_dimensions(&self, minimized: bool, window: WindowSize) -> Dimensions {
        if minimized {
            return Dimensions::new(self.minimized_width, self.minimized_height);
        }
        let inset = self.border_inset.saturating_mul(2);
        Dimensions::new(
            window.width.saturating_sub(inset),
            window.height.saturating_sub(inset),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: ViewportConfig = ViewportConfig {
        border_inset: 20,
        minimized_width: 320,
        minimized_height: 240,
    };

    #[test]
    fn maximized_subtracts_inset_on_each_side() {
        let dims = CONFIG.compute_dimensions(false, WindowSize::new(1280, 800));
        assert_eq!(dims, Dimensions::new(1240, 760));
    }

    #[test]
    fn minimized_ignores_window_size() {
        for window in [WindowSize::new(1280, 800), WindowSize::new(100, 50), WindowSize::default()] {
            assert_eq!(
                CONFIG.compute_dimensions(true, window),
                Dimensions::new(320, 240)
            );
        }
    }

    #[test]
    fn tiny_windows_saturate_at_zero() {
        let dims = CONFIG.compute_dimensions(false, WindowSize::new(30, 10));
        assert_eq!(dims, Dimensions::new(0, 0));
    }

    #[test]
    fn css_lengths() {
        let dims = Dimensions::new(320, 240);
        assert_eq!(dims.css_width(), "320px");
        assert_eq!(dims.css_height(), "240px");
    }
}
