//! Integration tests driving the coordinator through its tick

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use bridgiron::config::MiniWindowPosition;
use bridgiron::coordinator::{
    Coordinator, Geometry, Mode, Position, SelfIdentity, Size, WindowCommand,
};
use bridgiron::window::{PollingSignal, Rect, WindowHandle, WindowProbe};

const OWN_PID: u32 = 4242;
const OWN: WindowHandle = WindowHandle(1);
const TERMINAL: WindowHandle = WindowHandle(2);
const BROWSER: WindowHandle = WindowHandle(3);
const SECOND_TERMINAL: WindowHandle = WindowHandle(4);
const WORK_AREA: Rect = Rect::new(0, 0, 1920, 1040);

struct FakeWindow {
    process: &'static str,
    pid: u32,
    rect: Rect,
}

/// Scriptable desktop
struct FakeDesk {
    active: Cell<WindowHandle>,
    windows: RefCell<HashMap<WindowHandle, FakeWindow>>,
    lowered: Cell<usize>,
}

impl FakeDesk {
    fn new() -> Self {
        let mut windows = HashMap::new();
        windows.insert(
            OWN,
            FakeWindow {
                process: "bridgiron.exe",
                pid: OWN_PID,
                rect: Rect::new(300, 200, 900, 840),
            },
        );
        windows.insert(
            TERMINAL,
            FakeWindow {
                process: "WindowsTerminal.exe",
                pid: 100,
                rect: Rect::new(100, 100, 900, 700),
            },
        );
        windows.insert(
            BROWSER,
            FakeWindow {
                process: "chrome.exe",
                pid: 200,
                rect: Rect::new(0, 0, 1920, 1040),
            },
        );
        windows.insert(
            SECOND_TERMINAL,
            FakeWindow {
                process: "pwsh.exe",
                pid: 300,
                rect: Rect::new(1000, 50, 1800, 400),
            },
        );
        Self {
            active: Cell::new(OWN),
            windows: RefCell::new(windows),
            lowered: Cell::new(0),
        }
    }

    fn activate(&self, handle: WindowHandle) {
        self.active.set(handle);
    }

    fn move_window(&self, handle: WindowHandle, rect: Rect) {
        if let Some(window) = self.windows.borrow_mut().get_mut(&handle) {
            window.rect = rect;
        }
    }
}

impl WindowProbe for FakeDesk {
    fn active_window(&self) -> WindowHandle {
        self.active.get()
    }

    fn process_name_of(&self, handle: WindowHandle) -> Option<String> {
        self.windows
            .borrow()
            .get(&handle)
            .map(|w| w.process.to_lowercase())
    }

    fn process_id_of(&self, handle: WindowHandle) -> Option<u32> {
        self.windows.borrow().get(&handle).map(|w| w.pid)
    }

    fn parent_of(&self, _handle: WindowHandle) -> Option<WindowHandle> {
        None
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        self.windows.borrow().contains_key(&handle)
    }

    fn rect_of(&self, handle: WindowHandle) -> Option<Rect> {
        self.windows.borrow().get(&handle).map(|w| w.rect)
    }

    fn monitor_work_area(&self, _handle: WindowHandle) -> Option<Rect> {
        Some(WORK_AREA)
    }

    fn is_maximized(&self, _handle: WindowHandle) -> bool {
        false
    }

    fn primary_screen_size(&self) -> Option<(i32, i32)> {
        Some((1920, 1080))
    }

    fn lower(&self, _handle: WindowHandle) -> bool {
        self.lowered.set(self.lowered.get() + 1);
        true
    }
}

fn full_geometry() -> Geometry {
    Geometry {
        position: Position::new(300, 200),
        size: Size::new(600, 640),
    }
}

fn compact_geometry(position: Position) -> Geometry {
    Geometry {
        position,
        size: Size::new(220, 60),
    }
}

#[test]
fn test_terminal_session_round_trip() {
    let desk = FakeDesk::new();
    let mut signal = PollingSignal::new(&desk);
    let mut coordinator = Coordinator::new(
        MiniWindowPosition::CliBottomLeft,
        false,
        SelfIdentity {
            pid: OWN_PID,
            handle: Some(OWN),
        },
    );

    // Tick 1: nothing changed yet
    assert!(coordinator.tick(&desk, &mut signal, Some(full_geometry())).is_empty());

    // Tick 2: the terminal takes focus
    desk.activate(TERMINAL);
    let commands = coordinator.tick(&desk, &mut signal, Some(full_geometry()));
    assert_eq!(
        commands,
        vec![
            WindowCommand::ShowCompact {
                size: Size::new(220, 60)
            },
            WindowCommand::MoveTo(Position::new(100, 710)),
            WindowCommand::SetAlwaysOnTop(true),
        ]
    );
    assert_eq!(coordinator.mode(), Mode::Compact);

    // Ticks 3-4: the terminal is moved, the compact window follows
    desk.move_window(TERMINAL, Rect::new(200, 100, 1000, 500));
    let here = compact_geometry(Position::new(100, 710));
    assert!(coordinator.tick(&desk, &mut signal, Some(here)).is_empty());
    assert_eq!(
        coordinator.tick(&desk, &mut signal, Some(here)),
        vec![WindowCommand::MoveTo(Position::new(200, 510))]
    );

    // Tick 5: a browser takes focus
    desk.activate(BROWSER);
    let here = compact_geometry(Position::new(200, 510));
    assert_eq!(
        coordinator.tick(&desk, &mut signal, Some(here)),
        vec![WindowCommand::SetAlwaysOnTop(false), WindowCommand::Lower]
    );
    assert_eq!(coordinator.mode(), Mode::Compact);

    // Expand button
    assert_eq!(
        coordinator.exit_compact(),
        vec![
            WindowCommand::SetAlwaysOnTop(false),
            WindowCommand::ShowFull {
                position: Some(Position::new(300, 200)),
                size: Size::new(600, 640),
                min_size: Size::new(500, 570),
            },
            WindowCommand::Focus,
        ]
    );
    assert_eq!(coordinator.mode(), Mode::Full);
}

#[test]
fn test_focusing_own_window_keeps_compact_mode() {
    let desk = FakeDesk::new();
    let mut signal = PollingSignal::new(&desk);
    let mut coordinator = Coordinator::new(
        MiniWindowPosition::CliBottomLeft,
        true,
        SelfIdentity {
            pid: OWN_PID,
            handle: None,
        },
    );

    desk.activate(TERMINAL);
    coordinator.tick(&desk, &mut signal, Some(full_geometry()));
    assert!(coordinator.is_compact());

    // Clicking the compact window itself, recognised by process id
    desk.activate(OWN);
    let here = compact_geometry(Position::new(100, 710));
    assert!(coordinator.tick(&desk, &mut signal, Some(here)).is_empty());
    assert!(coordinator.is_compact());
}

#[test]
fn test_last_position_policy_ignores_terminal_moves() {
    let desk = FakeDesk::new();
    let mut signal = PollingSignal::new(&desk);
    let mut coordinator = Coordinator::new(
        MiniWindowPosition::LastPosition,
        false,
        SelfIdentity {
            pid: OWN_PID,
            handle: Some(OWN),
        },
    );

    desk.activate(TERMINAL);
    let commands = coordinator.tick(&desk, &mut signal, Some(full_geometry()));
    // First entry is seeded from the full window's position
    assert!(commands.contains(&WindowCommand::MoveTo(Position::new(300, 200))));

    desk.move_window(TERMINAL, Rect::new(500, 100, 1300, 500));
    let here = compact_geometry(Position::new(300, 200));
    for _ in 0..4 {
        let commands = coordinator.tick(&desk, &mut signal, Some(here));
        assert!(
            !commands
                .iter()
                .any(|c| matches!(c, WindowCommand::MoveTo(_))),
            "unexpected move: {:?}",
            commands
        );
    }
}

#[test]
fn test_switching_terminals_in_compact_follows_new_terminal() {
    let desk = FakeDesk::new();
    let mut signal = PollingSignal::new(&desk);
    let mut coordinator = Coordinator::new(
        MiniWindowPosition::CliBottomLeft,
        false,
        SelfIdentity {
            pid: OWN_PID,
            handle: Some(OWN),
        },
    );

    desk.activate(TERMINAL);
    let commands = coordinator.tick(&desk, &mut signal, Some(full_geometry()));
    assert!(commands.contains(&WindowCommand::MoveTo(Position::new(100, 710))));

    desk.activate(SECOND_TERMINAL);
    let here = compact_geometry(Position::new(100, 710));
    let mut moves = Vec::new();
    for _ in 0..4 {
        moves.extend(
            coordinator
                .tick(&desk, &mut signal, Some(here))
                .into_iter()
                .filter(|c| matches!(c, WindowCommand::MoveTo(_))),
        );
    }
    assert_eq!(
        moves,
        vec![WindowCommand::MoveTo(Position::new(1000, 410))],
        "compact window should sit under the second terminal"
    );
    assert!(coordinator.is_compact());
}
