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

use super::harness::{meeting, Harness};
use crate::session::{Dock, LayoutMemory};
use crate::viewport::Dimensions;
use crate::widget::{WidgetCommand, WidgetEvent};

const TILE: WidgetCommand = WidgetCommand::ToggleTileView;
const FILM: WidgetCommand = WidgetCommand::ToggleFilmStrip;

/// A maximized meeting that has joined the conference.
fn joined_maximized() -> Harness {
    let h = Harness::maximized();
    h.open(meeting("standup-1")).unwrap();
    let widget = h.widget();
    widget.emit(WidgetEvent::Loaded);
    widget.emit(WidgetEvent::ConferenceJoined);
    h
}

#[test]
fn minimize_hides_and_maximize_restores_layout() {
    let h = joined_maximized();
    let widget = h.widget();
    assert_eq!(widget.count(&TILE), 0);

    h.controller.minimize();
    assert_eq!(widget.count(&TILE), 1);
    assert_eq!(widget.count(&FILM), 1);
    assert_eq!(widget.resizes().last(), Some(&Dimensions::new(320, 240)));
    widget.flush_events();
    assert_eq!(widget.layout(), (false, false));
    assert_eq!(
        h.controller.presentation().layout,
        LayoutMemory {
            was_tile_view: true,
            is_tile_view: false,
            was_film_strip: true,
            is_film_strip: false,
        }
    );

    h.controller.maximize();
    assert_eq!(widget.count(&TILE), 2);
    assert_eq!(widget.count(&FILM), 2);
    assert_eq!(widget.resizes().last(), Some(&Dimensions::new(1240, 760)));
    widget.flush_events();
    assert_eq!(widget.layout(), (true, true));
    assert_eq!(h.controller.presentation().layout, LayoutMemory::default());
}

#[test]
fn nothing_visible_means_no_toggles() {
    let h = joined_maximized();
    let widget = h.widget();
    widget.user_sets_tile_view(false);
    widget.user_sets_film_strip(false);

    h.controller.minimize();
    h.controller.maximize();

    assert_eq!(widget.count(&TILE), 0);
    assert_eq!(widget.count(&FILM), 0);
    assert_eq!(widget.layout(), (false, false));
}

#[test]
fn only_visible_decorations_are_toggled() {
    let h = joined_maximized();
    let widget = h.widget();
    widget.user_sets_film_strip(false);

    h.controller.minimize();
    widget.flush_events();
    assert_eq!(widget.count(&TILE), 1);
    assert_eq!(widget.count(&FILM), 0);

    h.controller.maximize();
    widget.flush_events();
    assert_eq!(widget.count(&TILE), 2);
    assert_eq!(widget.count(&FILM), 0);
    assert_eq!(widget.layout(), (true, false));
}

#[test]
fn changes_while_minimized_do_not_overwrite_remembered_layout() {
    let h = joined_maximized();
    let widget = h.widget();
    widget.user_sets_tile_view(false);

    h.controller.minimize();
    widget.flush_events();
    assert_eq!(widget.layout(), (false, false));

    // The user turns tile view on inside the small window.
    widget.user_sets_tile_view(true);
    let layout = h.controller.presentation().layout;
    assert!(layout.is_tile_view);
    assert!(!layout.was_tile_view);

    h.controller.maximize();
    widget.flush_events();
    assert_eq!(widget.layout(), (false, true));
}

#[test]
fn joining_while_minimized_hides_decorations() {
    let h = Harness::new();
    h.open(meeting("standup-1")).unwrap();
    let widget = h.widget();
    widget.emit(WidgetEvent::Loaded);
    widget.emit(WidgetEvent::ConferenceJoined);

    assert_eq!(widget.count(&TILE), 1);
    assert_eq!(widget.count(&FILM), 1);
    widget.flush_events();
    assert_eq!(widget.layout(), (false, false));

    h.controller.maximize();
    widget.flush_events();
    assert_eq!(widget.layout(), (true, true));
}

#[test]
fn rejoining_while_minimized_does_not_toggle_twice() {
    let h = Harness::new();
    h.open(meeting("standup-1")).unwrap();
    let widget = h.widget();
    widget.emit(WidgetEvent::Loaded);
    widget.emit(WidgetEvent::ConferenceJoined);
    widget.emit(WidgetEvent::ConferenceJoined);

    assert_eq!(widget.count(&TILE), 1);
    assert_eq!(widget.count(&FILM), 1);
    widget.flush_events();
    assert_eq!(widget.layout(), (false, false));

    // Settled: another rejoin finds nothing left to hide.
    widget.emit(WidgetEvent::ConferenceJoined);
    assert_eq!(widget.count(&TILE), 1);
    assert_eq!(widget.layout(), (false, false));
}

#[test]
fn maximize_before_hide_is_answered_restores_layout() {
    let h = joined_maximized();
    let widget = h.widget();

    h.controller.minimize();
    h.controller.maximize();
    // The hide toggles are still unanswered: nothing overlaps them.
    assert_eq!(widget.count(&TILE), 1);
    assert_eq!(widget.count(&FILM), 1);

    widget.flush_events();
    assert_eq!(widget.count(&TILE), 2);
    assert_eq!(widget.count(&FILM), 2);
    assert_eq!(widget.layout(), (true, true));
    assert_eq!(h.controller.presentation().layout, LayoutMemory::default());
}

#[test]
fn minimize_maximize_minimize_settles_hidden() {
    let h = joined_maximized();
    let widget = h.widget();

    h.controller.minimize();
    h.controller.maximize();
    h.controller.minimize();
    assert_eq!(widget.count(&TILE), 1);

    widget.flush_events();
    assert_eq!(widget.count(&TILE), 1);
    assert_eq!(widget.count(&FILM), 1);
    assert_eq!(widget.layout(), (false, false));

    let layout = h.controller.presentation().layout;
    assert!(layout.was_tile_view && layout.was_film_strip);

    h.controller.maximize();
    widget.flush_events();
    assert_eq!(widget.layout(), (true, true));
}

#[test]
fn repeated_intents_and_events_are_harmless() {
    let h = joined_maximized();
    let widget = h.widget();

    h.controller.maximize();
    assert_eq!(widget.count(&TILE), 0);

    widget.emit(WidgetEvent::TileViewChanged { enabled: true });
    widget.emit(WidgetEvent::TileViewChanged { enabled: true });
    assert_eq!(h.controller.presentation().layout, LayoutMemory::default());

    h.controller.minimize();
    h.controller.minimize();
    assert_eq!(widget.count(&TILE), 1);
    assert_eq!(widget.count(&FILM), 1);
}

#[test]
fn synchronous_widget_events_are_queued_not_reentered() {
    let h = Harness::maximized();
    h.factory.set_synchronous_events(true);
    h.open(meeting("standup-1")).unwrap();
    let widget = h.widget();
    widget.emit(WidgetEvent::ConferenceJoined);

    h.controller.minimize();
    let layout = h.controller.presentation().layout;
    assert!(!layout.is_tile_view && !layout.is_film_strip);
    assert!(layout.was_tile_view && layout.was_film_strip);

    h.controller.maximize();
    assert_eq!(widget.layout(), (true, true));
    assert_eq!(h.controller.presentation().layout, LayoutMemory::default());
}

#[test]
fn reposition_moves_dock_without_widget_commands() {
    let h = Harness::new();
    h.controller.reposition();
    assert_eq!(h.controller.view().dock, Dock::Bottom);

    h.open(meeting("standup-1")).unwrap();
    let widget = h.widget();
    let before = widget.commands();

    h.controller.reposition();
    assert_eq!(h.controller.view().dock, Dock::Top);
    h.controller.reposition();
    assert_eq!(h.controller.view().dock, Dock::Bottom);
    assert_eq!(widget.commands(), before);
}

#[test]
fn dock_survives_reopen_but_not_teardown() {
    let h = Harness::new();
    h.open(meeting("first")).unwrap();
    h.controller.reposition();
    h.open(meeting("second")).unwrap();
    assert_eq!(h.controller.view().dock, Dock::Top);

    h.controller.close();
    h.finish_teardown();
    assert_eq!(h.controller.view().dock, Dock::Bottom);
}
