//! Window demo application
//!
//! Drives the public API against the headless backend: a scripted "user"
//! types, drags the window around, minimizes it, plugs in a monitor and
//! finally presses Escape. Every event the context reports is logged.
//!
//! Run with `RUST_LOG=debug` to see the backend and diagnostic output too.

use std::thread;
use std::time::Duration;

use rust_window::prelude::*;

const CONFIG_PATH: &str = "window_demo.toml";

/// Scripted user actions, one per frame
const SCRIPT: &[fn(&HeadlessHandle, WindowId)] = &[
    |user, w| user.focus_in(w),
    |user, w| user.enter(w, Point::new(40, 30)),
    |user, w| user.move_mouse(w, Point::new(120, 90)),
    |user, w| {
        user.press_key(w, Key::ShiftL);
        user.press_key(w, Key::H);
    },
    |user, w| {
        user.release_key(w, Key::H);
        user.release_key(w, Key::ShiftL);
    },
    |user, w| user.type_text(w, "Hi!"),
    |user, w| user.scroll(w, 0.0, -2.5),
    |user, w| user.user_configure(w, Rect::new(200, 150, 1024, 768)),
    |user, w| user.set_native_mode(w, rust_window::window::NativeMode::MINIMIZED),
    |user, w| user.set_native_mode(w, rust_window::window::NativeMode::NORMAL),
    |user, _| user.plug_monitor(Monitor::new("EXTERNAL-1", Rect::new(1920, 0, 2560, 1440)).with_scale(1.5, 1.5)),
    |user, w| user.set_scale(w, 1.5, 1.5),
    |user, w| user.drop_files(w, Point::new(10, 10), vec!["notes.txt".into(), "image.png".into()]),
    |user, w| user.press_key(w, Key::Escape),
];

struct DemoApp {
    platform: Platform,
    user: HeadlessHandle,
    window: WindowId,
    frame: usize,
}

impl DemoApp {
    fn new(config: PlatformConfig) -> WindowResult<Self> {
        log::info!("Creating window demo application...");
        let backend = HeadlessBackend::new(NotifyStyle::Push).named("demo-push");
        let user = backend.handle();
        let backends = Backends::new(backend).with_fallback(HeadlessBackend::new(NotifyStyle::Polling));

        let mut platform = Platform::init(config, backends)?;
        platform.set_debug_callback(Some(Box::new(|d: &Diagnostic<'_>| match d.severity {
            Severity::Error => log::error!("Diagnostic {:?}: {}", d.code, d.message),
            Severity::Warning => log::warn!("Diagnostic {:?}: {}", d.code, d.message),
            Severity::Info => {}
        })));
        platform.set_window_mode_callback(Some(Box::new(|event: &Event| {
            log::info!("Window mode callback: {:?}", event.data);
        })));

        let window = platform.create_window(
            WindowDesc::new("rust_window demo", 800, 600)
                .with_flags(WindowFlags::CENTER | WindowFlags::ALLOW_DND),
        )?;
        log::info!("Window created on backend '{}'", platform.backend_name());

        let icons = [checkerboard(16)?, checkerboard(64)?];
        platform.set_window_icons(window, &icons)?;
        let pointer = platform.load_cursor(&checkerboard(16)?, Point::new(8, 8))?;
        platform.set_custom_cursor(window, pointer)?;

        Ok(Self {
            platform,
            user,
            window,
            frame: 0,
        })
    }

    fn run(&mut self) -> WindowResult<()> {
        while !self.platform.should_close(self.window) {
            if let Some(step) = SCRIPT.get(self.frame) {
                step(&self.user, self.window);
            }
            self.frame += 1;

            while let Some(event) = self.platform.check_event(Some(self.window)) {
                self.handle_event(&event);
            }
            self.report_frame()?;

            if self.frame > SCRIPT.len() + 1 {
                log::warn!("Script finished without a close request");
                break;
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        match event.data {
            EventData::KeyPressed(key) => {
                log::info!("Key pressed: {} (modifiers {:?})", key.key.name(), key.modifiers);
            }
            EventData::DataDrop { count, .. } => {
                if let Ok(window) = self.platform.window(self.window) {
                    for path in window.drops().paths() {
                        log::info!("Dropped: {}", path.display());
                    }
                }
                log::info!("{} file(s) dropped", count);
            }
            EventData::MonitorConnected { monitor } => {
                if let Some(m) = self.platform.monitor(monitor) {
                    log::info!("Monitor connected: {} {:?} scale {}", m.name, m.rect, m.scale_x);
                }
            }
            EventData::Quit => log::info!("Close requested"),
            other => log::debug!("Event: {:?}", other),
        }
    }

    fn report_frame(&mut self) -> WindowResult<()> {
        let (_, dy) = self.platform.scroll_delta();
        if dy != 0.0 {
            log::info!("Scrolled {dy}");
        }
        let mut typed = String::new();
        while let Some(ch) = self.platform.char_pressed() {
            typed.push(ch);
        }
        if !typed.is_empty() {
            log::info!("Typed: {typed:?}");
        }
        if self.platform.is_key_pressed(Key::H) {
            let text = "Hello from rust_window";
            self.platform.write_clipboard(text);
            log::info!("Clipboard now holds: {:?}", self.platform.read_clipboard());
        }
        if let Some(monitor) = self.platform.window_monitor(self.window)? {
            log::debug!("Frame {}: window on {}", self.frame, monitor.name);
        }
        Ok(())
    }

    fn wait_demo(&mut self) {
        log::info!("Waiting for an event; a helper thread will wake us...");
        let waker = self.platform.waker();
        let helper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            waker.wake();
        });
        self.platform.wait_for_event(WaitTimeout::Forever);
        if helper.join().is_err() {
            log::error!("Waker thread panicked");
        }
        log::info!("Woken up");
    }
}

/// Two-tone RGBA test pattern used for the icons and the cursor
fn checkerboard(size: u32) -> WindowResult<Icon> {
    let pixels = (0..size * size)
        .flat_map(|i| {
            let dark = ((i % size) / 4 + (i / size) / 4) % 2 == 0;
            if dark {
                [0x20, 0x20, 0x40, 0xff]
            } else {
                [0xe0, 0xe0, 0xff, 0xff]
            }
        })
        .collect::<Vec<u8>>();
    Ok(Icon::from_rgba(size, size, pixels)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PlatformConfig::load_or_default(CONFIG_PATH)?;
    rust_window::foundation::logging::init(&config.log_level);

    let mut app = DemoApp::new(config)?;
    app.run()?;
    app.wait_demo();

    let DemoApp { mut platform, window, .. } = app;
    platform.close_window(window)?;
    platform.deinit();

    log::info!("Window demo finished");
    Ok(())
}
