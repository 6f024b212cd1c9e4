//! End-to-end context tests against the headless backend

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use approx::assert_relative_eq;

use super::active;
use super::Platform;
use crate::backend::{Backends, HeadlessBackend, HeadlessHandle, NativeEvent, NotifyStyle, WaitTimeout};
use crate::config::PlatformConfig;
use crate::error::{Diagnostic, ErrorCode, WindowError};
use crate::events::{Event, EventData, EventKind, EventMask};
use crate::foundation::geometry::{Point, Rect};
use crate::input::{Key, Modifiers, MouseButton};
use crate::monitor::Monitor;
use crate::window::{Icon, IconSlot, NativeMode, StandardCursor, WindowDesc, WindowFlags, WindowId, WindowMode};

fn platform_with(style: NotifyStyle, config: PlatformConfig) -> (Platform, HeadlessHandle) {
    crate::foundation::logging::init_for_tests();
    let backend = HeadlessBackend::new(style);
    let handle = backend.handle();
    let platform = Platform::init(config, Backends::new(backend)).expect("platform init");
    (platform, handle)
}

fn setup(style: NotifyStyle) -> (Platform, HeadlessHandle, WindowId) {
    let (mut platform, handle) = platform_with(style, PlatformConfig::default());
    let id = platform
        .create_window(WindowDesc::new("test", 640, 480))
        .expect("create window");
    (platform, handle, id)
}

fn drain(platform: &mut Platform, window: Option<WindowId>) -> Vec<EventData> {
    let mut events = Vec::new();
    while let Some(event) = platform.check_queued_event(window) {
        events.push(event.data);
    }
    events
}

fn kinds(events: &[EventData]) -> Vec<EventKind> {
    events.iter().map(EventData::kind).collect()
}

fn record_diagnostics(platform: &mut Platform) -> Rc<RefCell<Vec<ErrorCode>>> {
    let codes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&codes);
    platform.set_debug_callback(Some(Box::new(move |d: &Diagnostic<'_>| {
        sink.borrow_mut().push(d.code);
    })));
    codes
}

#[test]
fn test_new_window_starts_quiet() {
    let (mut platform, handle, id) = setup(NotifyStyle::Push);
    platform.poll_events();
    assert!(drain(&mut platform, None).is_empty());
    assert_eq!(handle.window_count(), 1);
    assert_eq!(platform.root_window(), Some(id));
    assert_eq!(platform.window(id).expect("live").rect(), Rect::new(0, 0, 640, 480));
}

#[test]
fn test_key_edges_across_poll_passes() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);

    handle.press_key(id, Key::A);
    platform.poll_events();
    assert!(platform.is_key_pressed(Key::A));
    assert!(platform.is_key_down(Key::A));

    let events = drain(&mut platform, Some(id));
    let [EventData::KeyPressed(key)] = events.as_slice() else {
        panic!("expected one key press, got {events:?}");
    };
    assert_eq!(key.key, Key::A);
    assert_eq!(key.native, 30);

    platform.poll_events();
    assert!(!platform.is_key_pressed(Key::A));
    assert!(platform.is_key_down(Key::A));

    handle.release_key(id, Key::A);
    platform.poll_events();
    assert!(platform.is_key_released(Key::A));
    assert!(!platform.is_key_down(Key::A));
}

#[test]
fn test_modifiers_follow_key_table_and_locks() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);

    handle.press_key(id, Key::ShiftL);
    platform.poll_events();
    assert_eq!(platform.modifiers(), Modifiers::SHIFT);

    handle.set_locks(Modifiers::CAPS_LOCK);
    handle.press_key(id, Key::A);
    handle.release_key(id, Key::ShiftL);
    platform.poll_events();
    assert_eq!(platform.modifiers(), Modifiers::CAPS_LOCK);

    let events = drain(&mut platform, Some(id));
    let modifiers: Vec<Modifiers> = events
        .iter()
        .filter_map(|e| match e {
            EventData::KeyPressed(k) | EventData::KeyReleased(k) => Some(k.modifiers),
            _ => None,
        })
        .collect();
    assert_eq!(
        modifiers,
        vec![
            Modifiers::SHIFT,
            Modifiers::SHIFT | Modifiers::CAPS_LOCK,
            Modifiers::CAPS_LOCK
        ]
    );
}

#[test]
fn test_unknown_scancode_is_reported_not_recorded() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    handle.inject(NativeEvent::Key {
        window: id,
        scancode: 200,
        pressed: true,
        repeat: false,
        locks: Modifiers::empty(),
    });
    platform.poll_events();

    assert!(!platform.is_key_down(Key::Unknown));
    let events = drain(&mut platform, None);
    assert!(matches!(
        events.as_slice(),
        [EventData::KeyPressed(k)] if k.key == Key::Unknown && k.native == 200
    ));
}

#[test]
fn test_exit_key_requests_close() {
    let (mut platform, handle, id) = setup(NotifyStyle::Push);
    handle.press_key(id, Key::Escape);
    platform.poll_events();

    // Closing is deferred until the application sees the quit event.
    assert!(!platform.should_close(id));
    let events = drain(&mut platform, Some(id));
    assert_eq!(kinds(&events), vec![EventKind::KeyPressed, EventKind::Quit]);
    assert!(platform.should_close(id));
}

#[test]
fn test_close_without_queue_sets_flag_immediately() {
    let (mut platform, handle, id) = setup(NotifyStyle::Push);
    platform.set_queue_events(false);

    let quits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&quits);
    platform.set_quit_callback(Some(Box::new(move |_: &Event| *counter.borrow_mut() += 1)));

    handle.request_close(id);
    platform.poll_events();

    assert!(platform.should_close(id));
    assert_eq!(*quits.borrow(), 1);
    assert_eq!(platform.queued_len(), 0);
}

#[test]
fn test_focus_loss_releases_held_keys_once() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    handle.focus_in(id);
    handle.press_key(id, Key::W);
    handle.press_button(id, MouseButton::Left);
    platform.poll_events();
    assert!(platform.is_key_down(Key::W));

    handle.focus_out(id);
    platform.poll_events();

    assert!(!platform.is_key_down(Key::W));
    assert!(platform.is_key_released(Key::W));
    assert!(!platform.is_mouse_down(MouseButton::Left));
    assert!(!platform.window(id).expect("live").is_focused());

    let releases = drain(&mut platform, Some(id))
        .into_iter()
        .filter(|e| matches!(e, EventData::KeyReleased(k) if k.key == Key::W))
        .count();
    assert_eq!(releases, 1);
}

#[test]
fn test_focus_loss_minimizes_fullscreen_window() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    platform.set_fullscreen(id, true).expect("fullscreen");
    assert!(handle.is_fullscreen(id));
    assert_eq!(handle.window_rect(id), Some(Rect::new(0, 0, 1920, 1080)));

    platform.focus_lost(id).expect("focus lost");
    assert_eq!(platform.window(id).expect("live").mode(), WindowMode::Minimized);
    assert!(kinds(&drain(&mut platform, Some(id))).contains(&EventKind::Minimized));
}

fn mode_sequence(style: NotifyStyle) {
    let (mut platform, handle, id) = setup(style);
    let mut seen = Vec::new();

    for mode in [
        NativeMode::NORMAL,
        NativeMode::MINIMIZED,
        NativeMode::MINIMIZED,
        NativeMode::NORMAL,
    ] {
        handle.set_native_mode(id, mode);
        platform.poll_events();
        seen.extend(kinds(&drain(&mut platform, Some(id))));
    }

    assert_eq!(seen, vec![EventKind::Minimized, EventKind::Restored], "{style:?}");
}

#[test]
fn test_mode_changes_detected_by_polling() {
    mode_sequence(NotifyStyle::Polling);
}

#[test]
fn test_mode_changes_detected_by_push() {
    mode_sequence(NotifyStyle::Push);
}

#[test]
fn test_check_mode_is_idempotent() {
    for style in [NotifyStyle::Polling, NotifyStyle::Push] {
        let (mut platform, handle, id) = setup(style);
        handle.set_native_mode(id, NativeMode::MAXIMIZED);

        assert!(platform.check_mode(id).expect("live").is_some());
        assert_eq!(platform.check_mode(id).expect("live"), None);
        platform.poll_events();

        let maximized = kinds(&drain(&mut platform, Some(id)))
            .into_iter()
            .filter(|k| *k == EventKind::Maximized)
            .count();
        assert_eq!(maximized, 1, "{style:?}");
    }
}

#[test]
fn test_maximize_reports_geometry_then_mode() {
    for style in [NotifyStyle::Polling, NotifyStyle::Push] {
        let (mut platform, _handle, id) = setup(style);
        platform.maximize(id).expect("maximize");

        let full = Rect::new(0, 0, 1920, 1080);
        assert_eq!(
            drain(&mut platform, Some(id)),
            vec![
                EventData::WindowResized { rect: full },
                EventData::Maximized { rect: full }
            ]
        );

        // The push notification for the same change adds nothing.
        platform.poll_events();
        assert!(drain(&mut platform, Some(id)).is_empty(), "{style:?}");

        platform.restore(id).expect("restore");
        let restored = Rect::new(0, 0, 640, 480);
        assert_eq!(
            drain(&mut platform, Some(id)),
            vec![
                EventData::WindowResized { rect: restored },
                EventData::Restored { rect: restored }
            ]
        );
    }
}

#[test]
fn test_user_configure_emits_move_and_resize() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    let rect = Rect::new(10, 20, 800, 600);
    handle.user_configure(id, rect);
    platform.poll_events();

    assert_eq!(
        drain(&mut platform, Some(id)),
        vec![EventData::WindowMoved { rect }, EventData::WindowResized { rect }]
    );
    assert_eq!(platform.window(id).expect("live").rect(), rect);
}

#[test]
fn test_configure_with_empty_size_is_rejected() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    let codes = record_diagnostics(&mut platform);
    handle.inject(NativeEvent::Configure {
        window: id,
        rect: Rect::new(5, 5, 0, 480),
    });
    platform.poll_events();

    assert!(drain(&mut platform, Some(id)).is_empty());
    assert_eq!(platform.window(id).expect("live").rect(), Rect::new(0, 0, 640, 480));
    assert_eq!(*codes.borrow(), vec![ErrorCode::NativeProtocol]);
}

#[test]
fn test_disabled_kinds_are_not_delivered() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    platform.set_key_callback(Some(Box::new(move |_: &Event| *counter.borrow_mut() += 1)));

    platform.set_disabled_events(id, EventMask::KEY).expect("live");
    handle.press_key(id, Key::A);
    handle.scroll(id, 0.0, 1.0);
    platform.poll_events();

    assert_eq!(*calls.borrow(), 0);
    assert_eq!(kinds(&drain(&mut platform, Some(id))), vec![EventKind::MouseScroll]);
    // The state table still tracks the key.
    assert!(platform.is_key_down(Key::A));

    platform.set_enabled_events(id, EventMask::all()).expect("live");
    handle.release_key(id, Key::A);
    platform.poll_events();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_callback_setters_return_previous() {
    let (mut platform, _handle, _id) = setup(NotifyStyle::Push);
    assert!(platform.set_scroll_callback(Some(Box::new(|_: &Event| {}))).is_none());
    assert!(platform.set_scroll_callback(None).is_some());
    assert!(platform.set_debug_callback(Some(Box::new(|_: &Diagnostic<'_>| {}))).is_none());
    assert!(platform.set_debug_callback(None).is_some());
}

#[test]
fn test_callbacks_can_be_chained() {
    let (mut platform, handle, id) = setup(NotifyStyle::Push);
    let log = Rc::new(RefCell::new(Vec::new()));

    let first = Rc::clone(&log);
    platform.set_focus_callback(Some(Box::new(move |_: &Event| first.borrow_mut().push("first"))));

    let second = Rc::clone(&log);
    let mut previous = platform.set_focus_callback(None);
    platform.set_focus_callback(Some(Box::new(move |event: &Event| {
        second.borrow_mut().push("second");
        if let Some(previous) = previous.as_mut() {
            previous(event);
        }
    })));

    handle.focus_in(id);
    platform.poll_events();
    assert_eq!(*log.borrow(), vec!["second", "first"]);
}

#[test]
fn test_queue_overflow_flushes_and_reports() {
    let config = PlatformConfig::default().with_event_queue_capacity(4);
    let (mut platform, handle) = platform_with(NotifyStyle::Polling, config);
    let id = platform.create_window(WindowDesc::new("small", 100, 100)).expect("window");
    let codes = record_diagnostics(&mut platform);

    for _ in 0..5 {
        handle.scroll(id, 0.0, 1.0);
    }
    platform.poll_events();

    assert_eq!(platform.queued_len(), 0);
    assert_eq!(*codes.borrow(), vec![ErrorCode::EventQueueOverflow]);
    let (dx, dy) = platform.scroll_delta();
    assert_relative_eq!(dx, 0.0);
    assert_relative_eq!(dy, 5.0);
}

#[test]
fn test_events_are_delivered_per_window() {
    let (mut platform, handle, a) = setup(NotifyStyle::Polling);
    let b = platform.create_window(WindowDesc::new("second", 320, 240)).expect("window");

    handle.press_key(a, Key::A);
    handle.press_key(b, Key::B);
    platform.poll_events();

    // B's first check rotates A's event to the back.
    assert!(platform.check_queued_event(Some(b)).is_none());
    let for_b = platform.check_queued_event(Some(b)).expect("b's event");
    assert_eq!(for_b.window, Some(b));
    let for_a = platform.check_queued_event(Some(a)).expect("a's event");
    assert_eq!(for_a.window, Some(a));
    assert_eq!(platform.queued_len(), 0);
}

#[test]
fn test_check_event_polls_when_queue_is_empty() {
    let (mut platform, handle, id) = setup(NotifyStyle::Push);
    handle.refresh(id);

    let event = platform.check_event(Some(id)).expect("refresh");
    assert_eq!(event.data, EventData::WindowRefresh);
    assert!(platform.check_event(Some(id)).is_none());
}

#[test]
fn test_edges_survive_check_event_drain() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    handle.press_key(id, Key::Space);

    let mut events = 0;
    while platform.check_event(Some(id)).is_some() {
        events += 1;
    }
    assert_eq!(events, 1);
    assert!(platform.is_key_pressed(Key::Space));
    assert!(platform.is_key_down(Key::Space));

    // The next drain starts a new frame.
    handle.release_key(id, Key::Space);
    while platform.check_event(Some(id)).is_some() {}
    assert!(platform.is_key_released(Key::Space));
    assert!(!platform.is_key_pressed(Key::Space));

    while platform.check_event(Some(id)).is_some() {}
    assert!(!platform.is_key_released(Key::Space));
}

#[test]
fn test_close_window_purges_its_events() {
    let (mut platform, handle, a) = setup(NotifyStyle::Polling);
    let b = platform.create_window(WindowDesc::new("second", 320, 240)).expect("window");
    handle.refresh(a);
    handle.refresh(b);
    handle.refresh(a);
    platform.poll_events();

    platform.close_window(a).expect("close");
    assert_eq!(platform.queued_len(), 1);
    assert_eq!(platform.check_queued_event(None).map(|e| e.window), Some(Some(b)));
    assert_eq!(handle.window_count(), 1);
    assert_eq!(platform.root_window(), Some(b));

    platform.close_window(b).expect("close");
    assert_eq!(platform.root_window(), None);
}

#[test]
fn test_closed_window_is_unknown() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    let codes = record_diagnostics(&mut platform);
    platform.close_window(id).expect("close");

    assert!(matches!(platform.close_window(id), Err(WindowError::UnknownWindow(_))));
    assert!(matches!(platform.resize(id, 1, 1), Err(WindowError::UnknownWindow(_))));
    assert!(platform.window(id).is_err());

    handle.inject(NativeEvent::Refresh { window: id });
    platform.poll_events();
    assert_eq!(platform.queued_len(), 0);
    assert!(codes.borrow().contains(&ErrorCode::StaleWindow));
}

#[test]
fn test_mouse_motion_and_vector() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    handle.enter(id, Point::new(10, 10));
    handle.move_mouse(id, Point::new(15, 12));
    handle.press_button(id, MouseButton::Right);
    platform.poll_events();

    let window = platform.window(id).expect("live");
    assert!(window.is_mouse_inside());
    assert!(window.did_mouse_enter());
    assert_eq!(platform.mouse_vector(), Point::new(5, 2));
    assert!(platform.is_mouse_pressed(MouseButton::Right));

    let events = drain(&mut platform, Some(id));
    assert_eq!(
        events[1],
        EventData::MouseMotion {
            position: Point::new(15, 12),
            delta: Point::new(5, 2)
        }
    );
    assert!(matches!(events[2], EventData::MouseButtonPressed(b) if b.position == Point::new(15, 12)));

    // One-shot flags and deltas reset on the next pass.
    handle.leave(id);
    platform.poll_events();
    let window = platform.window(id).expect("live");
    assert!(!window.did_mouse_enter());
    assert!(window.did_mouse_leave());
    assert_eq!(platform.mouse_vector(), Point::default());
}

#[test]
fn test_held_mouse_reports_relative_motion() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    platform.hold_mouse(id).expect("hold");
    let center = Point::new(320, 240);
    assert!(handle.is_captured(id));
    assert_eq!(handle.mouse_position(id), Some(center));

    handle.move_mouse(id, Point::new(1, 1));
    handle.move_mouse_relative(id, Point::new(5, -3));
    platform.poll_events();

    assert_eq!(
        drain(&mut platform, Some(id)),
        vec![EventData::MouseMotion {
            position: Point::new(325, 237),
            delta: Point::new(5, -3)
        }]
    );
    assert_eq!(handle.mouse_position(id), Some(center));
    assert_eq!(platform.mouse_vector(), Point::new(5, -3));

    // Focus loss drops the native capture but keeps the request.
    handle.focus_out(id);
    platform.poll_events();
    assert!(!handle.is_captured(id));
    assert!(platform.window(id).expect("live").is_holding_mouse());

    handle.focus_in(id);
    platform.poll_events();
    assert!(handle.is_captured(id));

    platform.unhold_mouse(id).expect("unhold");
    assert!(!handle.is_captured(id));
}

#[test]
fn test_drops_require_opt_in() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    handle.drag(id, Point::new(1, 1));
    handle.drop_files(id, Point::new(1, 1), vec![PathBuf::from("a.txt")]);
    platform.poll_events();

    assert!(drain(&mut platform, Some(id)).is_empty());
    assert!(!platform.window(id).expect("live").did_data_drop());
}

#[test]
fn test_drops_are_truncated_to_capacity() {
    let config = PlatformConfig::default().with_max_drops(2);
    let (mut platform, handle) = platform_with(NotifyStyle::Polling, config);
    let id = platform
        .create_window(WindowDesc::new("dnd", 200, 200).with_flags(WindowFlags::ALLOW_DND))
        .expect("window");
    let codes = record_diagnostics(&mut platform);

    let paths = ["a.txt", "b.txt", "c.txt"].map(PathBuf::from).to_vec();
    handle.drag(id, Point::new(4, 4));
    handle.drop_files(id, Point::new(5, 5), paths);
    platform.poll_events();

    assert_eq!(
        drain(&mut platform, Some(id)),
        vec![
            EventData::DataDrag { position: Point::new(4, 4) },
            EventData::DataDrop {
                position: Point::new(5, 5),
                count: 2
            }
        ]
    );
    let window = platform.window(id).expect("live");
    assert!(window.did_data_drop());
    assert_eq!(window.drops().len(), 2);
    assert_eq!(*codes.borrow(), vec![ErrorCode::DropLimitExceeded]);
}

#[test]
fn test_monitor_hot_plug() {
    let config = PlatformConfig::default().with_monitor_capacity(2);
    let (mut platform, handle) = platform_with(NotifyStyle::Push, config);
    let id = platform.create_window(WindowDesc::default()).expect("window");
    let codes = record_diagnostics(&mut platform);
    assert_eq!(platform.monitors().count(), 1);

    handle.plug_monitor(Monitor::new("EXT-1", Rect::new(1920, 0, 1280, 1024)));
    handle.plug_monitor(Monitor::new("EXT-2", Rect::new(3200, 0, 1280, 1024)));
    platform.poll_events();

    // Monitor events have no target window, so every caller receives them.
    let events = drain(&mut platform, Some(id));
    let [EventData::MonitorConnected { monitor }] = events.as_slice() else {
        panic!("expected one connection, got {events:?}");
    };
    assert_eq!(platform.monitor(*monitor).map(|m| m.name.as_str()), Some("EXT-1"));
    assert_eq!(*codes.borrow(), vec![ErrorCode::MonitorPoolExhausted]);

    handle.unplug_monitor("EXT-1");
    handle.plug_monitor(Monitor::new("EXT-2", Rect::new(3200, 0, 1280, 1024)));
    handle.unplug_monitor("NOPE");
    platform.poll_events();

    assert_eq!(
        kinds(&drain(&mut platform, None)),
        vec![EventKind::MonitorDisconnected, EventKind::MonitorConnected]
    );
    let names: Vec<&str> = platform.monitors().map(|(_, m)| m.name.as_str()).collect();
    assert_eq!(names, vec!["HEADLESS-1", "EXT-2"]);
    assert!(codes.borrow().contains(&ErrorCode::UnknownMonitor));
}

#[test]
fn test_window_monitor_snapshot() {
    crate::foundation::logging::init_for_tests();
    let backend = HeadlessBackend::new(NotifyStyle::Polling).with_monitors(vec![
        Monitor::new("LEFT", Rect::new(0, 0, 1920, 1080)),
        Monitor::new("RIGHT", Rect::new(1920, 0, 2560, 1440)).with_scale(2.0, 2.0),
    ]);
    let mut platform = Platform::init(PlatformConfig::default(), Backends::new(backend)).expect("init");
    let id = platform.create_window(WindowDesc::new("w", 400, 300)).expect("window");

    assert_eq!(platform.primary_monitor().map(|m| m.name.as_str()), Some("LEFT"));
    platform.move_window(id, 2200, 100).expect("move");

    let snapshot = platform.window_monitor(id).expect("live").expect("on a monitor");
    assert_eq!(snapshot.name, "RIGHT");
    assert_relative_eq!(snapshot.scale_x, 2.0);
}

#[test]
fn test_creation_flags() {
    let (mut platform, handle) = platform_with(NotifyStyle::Push, PlatformConfig::default());

    let centered = platform
        .create_window(WindowDesc::new("c", 640, 480).with_flags(WindowFlags::CENTER | WindowFlags::FOCUS))
        .expect("window");
    assert_eq!(platform.window(centered).expect("live").rect(), Rect::new(640, 300, 640, 480));
    assert_eq!(handle.focused(), Some(centered));

    let hidden = platform
        .create_window(
            WindowDesc::new("h", 100, 100)
                .with_flags(WindowFlags::HIDE | WindowFlags::HIDE_MOUSE | WindowFlags::HOLD_MOUSE),
        )
        .expect("window");
    assert!(!handle.is_visible(hidden));
    assert!(!handle.is_mouse_visible(hidden));
    assert!(handle.is_captured(hidden));

    let maximized = platform
        .create_window(WindowDesc::new("m", 100, 100).with_flags(WindowFlags::MAXIMIZE))
        .expect("window");
    assert_eq!(platform.window(maximized).expect("live").mode(), WindowMode::Maximized);

    let fullscreen = platform
        .create_window(WindowDesc::new("f", 100, 100).with_flags(WindowFlags::FULLSCREEN))
        .expect("window");
    assert!(platform.window(fullscreen).expect("live").is_fullscreen());
    assert!(handle.is_fullscreen(fullscreen));

    platform.poll_events();
    assert_eq!(platform.focused_window(), Some(centered));
}

#[test]
fn test_window_mutators_forward_to_backend() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    platform.set_title(id, "renamed").expect("title");
    platform.set_cursor(id, StandardCursor::IBeam).expect("cursor");
    platform.set_mouse_position(id, Point::new(7, 8)).expect("warp");
    platform.hide(id).expect("hide");

    assert_eq!(handle.title(id).as_deref(), Some("renamed"));
    assert_eq!(platform.window(id).expect("live").title(), "renamed");
    assert_eq!(handle.cursor(id), Some(StandardCursor::IBeam));
    assert_eq!(handle.mouse_position(id), Some(Point::new(7, 8)));
    assert!(!handle.is_visible(id));

    platform.show(id).expect("show");
    assert!(handle.is_visible(id));
}

#[test]
fn test_scale_and_refresh_events() {
    let (mut platform, handle, id) = setup(NotifyStyle::Push);
    handle.set_scale(id, 1.5, 1.5);
    handle.refresh(id);
    platform.poll_events();

    let events = drain(&mut platform, Some(id));
    let EventData::ScaleUpdated { x, y } = events[0] else {
        panic!("expected scale update, got {events:?}");
    };
    assert_relative_eq!(x, 1.5);
    assert_relative_eq!(y, 1.5);
    assert_eq!(events[1], EventData::WindowRefresh);
}

#[test]
fn test_clipboard_round_trip() {
    let (mut platform, handle, _id) = setup(NotifyStyle::Push);
    assert_eq!(platform.read_clipboard(), None);

    handle.set_clipboard(Some("from elsewhere"));
    assert_eq!(platform.read_clipboard(), Some("from elsewhere"));

    assert!(platform.write_clipboard("ours"));
    assert_eq!(handle.clipboard().as_deref(), Some("ours"));
}

#[test]
fn test_backend_fallback_on_init() {
    crate::foundation::logging::init_for_tests();
    let preferred = HeadlessBackend::new(NotifyStyle::Push).named("wayland-sim");
    preferred.handle().fail_init("no compositor");
    let fallback = HeadlessBackend::new(NotifyStyle::Polling).named("x11-sim");
    let fallback_handle = fallback.handle();

    let mut platform = Platform::init(
        PlatformConfig::default(),
        Backends::new(preferred).with_fallback(fallback),
    )
    .expect("fallback binds");
    assert_eq!(platform.backend_name(), "x11-sim");

    // Every operation now goes to the fallback.
    let id = platform.create_window(WindowDesc::default()).expect("window");
    assert_eq!(fallback_handle.window_count(), 1);
    assert!(platform.keycodes().native(Key::Space).is_some());

    let rebind = platform.select_backend(Backends::default());
    assert!(matches!(rebind, Err(WindowError::BackendLocked)));
    platform.close_window(id).expect("close");
}

#[test]
fn test_select_backend_before_first_window() {
    let (mut platform, _handle) = platform_with(NotifyStyle::Push, PlatformConfig::default());
    let other = HeadlessBackend::new(NotifyStyle::Polling).named("other");
    let other_handle = other.handle();

    platform.select_backend(Backends::new(other)).expect("not locked yet");
    assert_eq!(platform.backend_name(), "other");
    assert!(other_handle.is_initialized());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = PlatformConfig::default().with_event_queue_capacity(0);
    let result = Platform::init(config, Backends::default());
    assert!(matches!(result, Err(WindowError::InvalidConfig(_))));
}

#[test]
fn test_wait_returns_with_pending_notification() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    handle.request_close(id);
    platform.wait_for_event(WaitTimeout::Forever);
    assert_eq!(kinds(&drain(&mut platform, Some(id))), vec![EventKind::Quit]);
}

#[test]
fn test_waker_unblocks_wait_from_another_thread() {
    let (mut platform, _handle, _id) = setup(NotifyStyle::Polling);
    let waker = platform.waker();
    let remote = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        waker.wake();
    });

    platform.wait_for_event(WaitTimeout::Forever);
    remote.join().expect("waker thread");
}

#[test]
fn test_wait_times_out() {
    let (mut platform, _handle, _id) = setup(NotifyStyle::Polling);
    platform.wait_for_event(WaitTimeout::from_millis(5));
    assert_eq!(platform.queued_len(), 0);
}

#[test]
fn test_drop_tears_down_backend() {
    let (platform, handle, _id) = setup(NotifyStyle::Push);
    assert!(handle.is_initialized());
    platform.deinit();
    assert!(!handle.is_initialized());
    assert_eq!(handle.window_count(), 0);
}

#[test]
fn test_lazy_context_released_on_last_close() {
    crate::foundation::logging::init_for_tests();
    assert!(active::set_active(None).is_none());

    let first = active::create_window(WindowDesc::new("one", 100, 100)).expect("window");
    let second = active::create_window(WindowDesc::new("two", 100, 100)).expect("window");
    let platform = active::active().expect("created lazily");
    assert!(platform.borrow().is_lazy());
    assert_eq!(platform.borrow().window_count(), 2);
    drop(platform);

    active::close_window(first).expect("close");
    assert!(active::active().is_some());
    active::close_window(second).expect("close");
    assert!(active::active().is_none());
}

#[test]
fn test_explicit_context_survives_last_close() {
    crate::foundation::logging::init_for_tests();
    let platform = Rc::new(RefCell::new(Platform::new().expect("init")));
    assert!(active::set_active(Some(Rc::clone(&platform))).is_none());

    let id = active::create_window(WindowDesc::default()).expect("window");
    active::close_window(id).expect("close");
    assert!(active::active().is_some_and(|current| Rc::ptr_eq(&current, &platform)));

    let count = active::with_active(|p| p.window_count());
    assert_eq!(count, Some(0));

    let previous = active::set_active(None).expect("was active");
    assert!(Rc::ptr_eq(&previous, &platform));
    assert!(active::with_active(|p| p.window_count()).is_none());
}

#[test]
fn test_typed_characters_are_queued_per_pass() {
    let config = PlatformConfig::default().with_char_queue_capacity(3);
    let (mut platform, handle) = platform_with(NotifyStyle::Polling, config);
    let id = platform.create_window(WindowDesc::new("text", 320, 240)).expect("window");

    handle.type_text(id, "héllo");
    platform.poll_events();

    let typed: Vec<char> = std::iter::from_fn(|| platform.char_pressed()).collect();
    assert_eq!(typed, vec!['h', 'é', 'l']);
    assert_eq!(
        drain(&mut platform, Some(id)),
        "héllo".chars().map(|ch| EventData::KeyChar { ch }).collect::<Vec<_>>()
    );

    handle.type_char(id, 'x');
    platform.poll_events();
    platform.poll_events();
    assert_eq!(platform.char_pressed(), None);
}

#[test]
fn test_key_char_callback_and_mask() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    let seen = Rc::new(RefCell::new(String::new()));
    let sink = Rc::clone(&seen);
    platform.set_key_char_callback(Some(Box::new(move |event: &Event| {
        if let EventData::KeyChar { ch } = event.data {
            sink.borrow_mut().push(ch);
        }
    })));

    handle.type_text(id, "ok");
    platform.poll_events();
    assert_eq!(*seen.borrow(), "ok");

    platform.set_disabled_events(id, EventMask::KEY_CHAR).expect("live");
    handle.type_char(id, '!');
    handle.press_key(id, Key::A);
    platform.poll_events();
    assert_eq!(*seen.borrow(), "ok");
    assert_eq!(platform.char_pressed(), Some('!'));
    let _ = drain(&mut platform, Some(id));
}

#[test]
fn test_custom_cursor_load_set_free() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    let image = Icon::from_rgba(8, 8, vec![0x80; 8 * 8 * 4]).expect("icon");

    let cursor = platform.load_cursor(&image, Point::new(3, 4)).expect("load");
    assert_eq!(handle.loaded_cursor(cursor), Some(((8, 8), Point::new(3, 4))));

    platform.set_custom_cursor(id, cursor).expect("set");
    assert_eq!(handle.custom_cursor(id), Some(cursor));

    platform.set_cursor(id, StandardCursor::Crosshair).expect("standard");
    assert_eq!(handle.custom_cursor(id), None);
    assert_eq!(handle.cursor(id), Some(StandardCursor::Crosshair));

    platform.set_custom_cursor(id, cursor).expect("set again");
    platform.free_cursor(cursor).expect("free");
    assert_eq!(handle.custom_cursor(id), None);
    assert!(matches!(platform.free_cursor(cursor), Err(WindowError::UnknownCursor(_))));
    assert!(matches!(
        platform.set_custom_cursor(id, cursor),
        Err(WindowError::UnknownCursor(_))
    ));
}

#[test]
fn test_cursor_load_failure_is_reported() {
    let (mut platform, _handle, _id) = setup(NotifyStyle::Polling);
    let codes = record_diagnostics(&mut platform);
    let image = Icon::from_rgba(4, 4, vec![0u8; 4 * 4 * 4]).expect("icon");

    let result = platform.load_cursor(&image, Point::new(4, 0));
    assert!(matches!(result, Err(WindowError::CursorLoad(_))));
    assert_eq!(*codes.borrow(), vec![ErrorCode::Cursor]);
}

#[test]
fn test_window_icons() {
    let (mut platform, handle, id) = setup(NotifyStyle::Polling);
    let icon = |size: u32| Icon::from_rgba(size, size, vec![0u8; (size * size * 4) as usize]).expect("icon");

    platform.set_window_icon(id, Some(&icon(32))).expect("icon");
    assert_eq!(handle.icon_size(id, IconSlot::Window), Some((32, 32)));
    assert_eq!(handle.icon_size(id, IconSlot::Taskbar), Some((32, 32)));

    platform.set_window_icons(id, &[icon(48), icon(16), icon(256)]).expect("icons");
    assert_eq!(handle.icon_size(id, IconSlot::Window), Some((16, 16)));
    assert_eq!(handle.icon_size(id, IconSlot::Taskbar), Some((256, 256)));

    platform.set_window_icons(id, &[]).expect("clear");
    assert_eq!(handle.icon_size(id, IconSlot::Window), None);
    assert_eq!(handle.icon_size(id, IconSlot::Taskbar), None);

    platform.close_window(id).expect("close");
    assert!(matches!(
        platform.set_window_icon(id, None),
        Err(WindowError::UnknownWindow(_))
    ));
}
