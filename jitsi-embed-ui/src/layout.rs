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

//! Geometry and stacking of the conference overlay.
//!
//! Pure functions of the controller's [`SessionView`], so the layout rules can
//! be tested without a browser.

use jitsi_embed_client::{Dock, Phase, SessionView};

pub const BACKDROP_Z_INDEX: u32 = 1000;
pub const WIDGET_Z_INDEX: u32 = 1100;
pub const CONTROLS_Z_INDEX: u32 = 1200;

/// Distance between the overlay and the window edges it is anchored to.
pub const EDGE_MARGIN: u32 = 20;

/// Which way the "move" control sends a minimized meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveControl {
    Up,
    Down,
}

/// The one size control shown at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeControl {
    Minimize,
    Maximize,
}

/// Inline styles and visible controls for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceLayout {
    /// Style of the element the widget iframe lives in. Always rendered so
    /// the widget has a parent to mount into.
    pub container: String,
    pub backdrop: Option<String>,
    pub loading: Option<String>,
    pub buttons: Option<String>,
    pub move_control: Option<MoveControl>,
    pub size_control: SizeControl,
}

fn anchor(dock: Dock) -> String {
    match dock {
        Dock::Top => format!("top: {EDGE_MARGIN}px;"),
        Dock::Bottom => format!("bottom: {EDGE_MARGIN}px;"),
    }
}

pub fn conference_layout(view: &SessionView) -> ConferenceLayout {
    let width = view.dimensions.width;
    let height = view.dimensions.height;
    let anchor = anchor(view.dock);
    let visible = view.phase != Phase::Idle;

    let container = if visible {
        format!(
            "position: absolute; width: {width}px; height: {height}px; display: flex; \
             align-items: center; justify-content: center; background: #474747; \
             {anchor} right: {EDGE_MARGIN}px; z-index: {WIDGET_Z_INDEX};"
        )
    } else {
        "display: none;".to_string()
    };

    let backdrop = (visible && !view.minimized).then(|| {
        format!(
            "position: absolute; top: 0; left: 0; background: black; opacity: 0.7; \
             width: 100%; height: 100%; z-index: {BACKDROP_Z_INDEX};"
        )
    });

    let loading = (visible && view.loading).then(|| {
        format!(
            "position: absolute; width: {width}px; height: {height}px; \
             background: #00000077; {anchor} right: {EDGE_MARGIN}px; display: flex; \
             align-items: center; justify-content: center; z-index: {CONTROLS_Z_INDEX}; \
             font-size: 48px; opacity: 0.85; color: white;"
        )
    });

    // Bottom-docked controls sit just inside the top edge of the widget.
    let buttons_anchor = match view.dock {
        Dock::Top => format!("top: {EDGE_MARGIN}px;"),
        Dock::Bottom => format!("bottom: {}px;", height.saturating_sub(10)),
    };
    let buttons = visible.then(|| {
        format!(
            "position: absolute; {buttons_anchor} right: 22px; color: white; \
             font-size: 18px; cursor: pointer; opacity: 0.85; z-index: {CONTROLS_Z_INDEX};"
        )
    });

    let move_control = match (view.minimized, view.dock) {
        (true, Dock::Top) => Some(MoveControl::Down),
        (true, Dock::Bottom) => Some(MoveControl::Up),
        (false, _) => None,
    };
    let size_control = if view.minimized {
        SizeControl::Maximize
    } else {
        SizeControl::Minimize
    };

    ConferenceLayout {
        container,
        backdrop,
        loading,
        buttons,
        move_control,
        size_control,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jitsi_embed_client::Dimensions;

    fn view(phase: Phase, minimized: bool, dock: Dock, loading: bool) -> SessionView {
        let dimensions = if minimized {
            Dimensions::new(320, 240)
        } else {
            Dimensions::new(1240, 760)
        };
        SessionView {
            phase,
            meeting: None,
            minimized,
            dock,
            loading,
            dimensions,
        }
    }

    #[test]
    fn minimized_bottom_dock() {
        let layout = conference_layout(&view(Phase::Active, true, Dock::Bottom, false));
        assert!(layout.container.contains("width: 320px; height: 240px;"));
        assert!(layout.container.contains("bottom: 20px;"));
        assert!(layout.container.contains("z-index: 1100;"));
        assert_eq!(layout.backdrop, None);
        assert_eq!(layout.loading, None);
        assert!(layout.buttons.unwrap().contains("bottom: 230px;"));
        assert_eq!(layout.move_control, Some(MoveControl::Up));
        assert_eq!(layout.size_control, SizeControl::Maximize);
    }

    #[test]
    fn maximized_shows_backdrop_and_no_move_control() {
        let layout = conference_layout(&view(Phase::Active, false, Dock::Top, false));
        assert!(layout.container.contains("top: 20px;"));
        assert!(layout.backdrop.unwrap().contains("z-index: 1000;"));
        assert_eq!(layout.move_control, None);
        assert_eq!(layout.size_control, SizeControl::Minimize);
    }

    #[test]
    fn spinner_covers_widget_while_loading() {
        let layout = conference_layout(&view(Phase::Initializing, true, Dock::Top, true));
        let loading = layout.loading.unwrap();
        assert!(loading.contains("width: 320px; height: 240px;"));
        assert!(loading.contains("z-index: 1200;"));
        assert_eq!(layout.move_control, Some(MoveControl::Down));
    }

    #[test]
    fn idle_keeps_hidden_container_only() {
        let layout = conference_layout(&view(Phase::Idle, true, Dock::Bottom, true));
        assert_eq!(layout.container, "display: none;");
        assert_eq!(layout.backdrop, None);
        assert_eq!(layout.loading, None);
        assert_eq!(layout.buttons, None);
    }
}
