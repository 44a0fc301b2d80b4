//! FULL/COMPACT window coordinator
//!
//! A UI-free state machine driven by a 100 ms tick. Each tick it consumes the
//! foreground-change signal, decides on mode transitions and, every second
//! tick, follows the tracked CLI window. It never touches a window itself: it
//! returns [`WindowCommand`]s that the UI thread applies.
//!
//! All coordinates are physical pixels. Layout sizes are given in logical
//! points and scaled with [`Coordinator::set_scale`].

pub mod placement;

use std::time::Duration;

use tracing::debug;

use crate::config::MiniWindowPosition;
use crate::window::{FocusSignal, Rect, WindowHandle, WindowProbe};

pub use placement::{default_position, follow_position};

/// Period of [`Coordinator::tick`]
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// CLI window tracking runs on every n-th tick
pub const TRACK_EVERY: u64 = 2;

/// Ticks to wait for the compact window to reach a commanded position
const SETTLE_TICKS: u32 = 10;

/// Position mismatch still counted as "arrived", absorbs DPI rounding
const POSITION_TOLERANCE: i32 = 2;

/// Compact window size in logical points
pub const COMPACT_SIZE: Size = Size::new(220, 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn near(&self, other: Position, tolerance: i32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    fn scaled(&self, scale: f32) -> Size {
        Size::new(
            (self.width as f32 * scale).round() as i32,
            (self.height as f32 * scale).round() as i32,
        )
    }
}

/// Outer position plus inner size of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub position: Position,
    pub size: Size,
}

/// Default and minimum size of the full window, in logical points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FullLayout {
    pub size: Size,
    pub min_size: Size,
}

impl FullLayout {
    /// Taller layout leaving room for the first-run hint
    pub const FIRST_RUN: FullLayout = FullLayout {
        size: Size::new(600, 690),
        min_size: Size::new(500, 620),
    };

    pub const REGULAR: FullLayout = FullLayout {
        size: Size::new(600, 640),
        min_size: Size::new(500, 570),
    };

    pub fn for_first_run(first_run: bool) -> Self {
        if first_run {
            Self::FIRST_RUN
        } else {
            Self::REGULAR
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Full,
    Compact,
}

/// Window operation for the UI thread to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    /// Switch to the compact layout and pin the window to `size`
    ShowCompact { size: Size },
    /// Move the window's outer top-left corner
    MoveTo(Position),
    /// Switch back to the full layout; `position` is `None` when unknown
    ShowFull {
        position: Option<Position>,
        size: Size,
        min_size: Size,
    },
    SetAlwaysOnTop(bool),
    /// Drop the application window below all others
    Lower,
    Focus,
}

/// How the coordinator recognises its own windows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfIdentity {
    pub pid: u32,
    pub handle: Option<WindowHandle>,
}

impl SelfIdentity {
    pub fn current_process() -> Self {
        Self {
            pid: std::process::id(),
            handle: None,
        }
    }
}

/// The CLI window being followed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedWindow {
    pub handle: WindowHandle,
    pub rect: Option<Rect>,
    pub process: Option<String>,
}

/// FULL/COMPACT state machine
#[derive(Debug)]
pub struct Coordinator {
    mode: Mode,
    policy: MiniWindowPosition,
    identity: SelfIdentity,
    layout: FullLayout,
    compact_size: Size,
    scale: f32,
    tick_count: u64,
    tracked: Option<TrackedWindow>,
    saved_full: Option<Geometry>,
    last_compact_position: Option<Position>,
    pending_move: Option<(Position, u32)>,
}

impl Coordinator {
    pub fn new(policy: MiniWindowPosition, first_run: bool, identity: SelfIdentity) -> Self {
        Self {
            mode: Mode::Full,
            policy,
            identity,
            layout: FullLayout::for_first_run(first_run),
            compact_size: COMPACT_SIZE,
            scale: 1.0,
            tick_count: 0,
            tracked: None,
            saved_full: None,
            last_compact_position: None,
            pending_move: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_compact(&self) -> bool {
        self.mode == Mode::Compact
    }

    pub fn set_policy(&mut self, policy: MiniWindowPosition) {
        self.policy = policy;
    }

    pub fn own_handle(&self) -> Option<WindowHandle> {
        self.identity.handle
    }

    /// Full window layout in logical points
    pub fn full_layout(&self) -> FullLayout {
        self.layout
    }

    pub fn set_first_run(&mut self, first_run: bool) {
        self.layout = FullLayout::for_first_run(first_run);
    }

    /// Pixels per logical point of the application window
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
    }

    pub fn set_compact_size(&mut self, size: Size) {
        self.compact_size = size;
    }

    /// Compact window size in physical pixels
    pub fn compact_size_px(&self) -> Size {
        self.compact_size.scaled(self.scale)
    }

    /// Remember the active window as our own if it belongs to this process.
    ///
    /// Call only while the main window has focus, so a popup is never adopted.
    pub fn adopt_own_window(&mut self, probe: &dyn WindowProbe) -> bool {
        if self.identity.handle.is_some() {
            return false;
        }
        let active = probe.active_window();
        if active.is_null() || probe.process_id_of(active) != Some(self.identity.pid) {
            return false;
        }
        debug!("Adopted own window handle {:?}", active);
        self.identity.handle = Some(active);
        true
    }

    /// Whether `handle` is this application, by handle, then parent handle,
    /// then owning process
    pub fn is_self(&self, probe: &dyn WindowProbe, handle: WindowHandle) -> bool {
        if handle.is_null() {
            return false;
        }
        if let Some(own) = self.identity.handle {
            if own == handle {
                return true;
            }
            if probe.parent_of(own) == Some(handle) {
                return true;
            }
        }
        probe.process_id_of(handle) == Some(self.identity.pid)
    }

    /// One 100 ms step.
    ///
    /// `own` is the application window's current geometry, if known.
    pub fn tick(
        &mut self,
        probe: &dyn WindowProbe,
        signal: &mut dyn FocusSignal,
        own: Option<Geometry>,
    ) -> Vec<WindowCommand> {
        self.tick_count += 1;
        let mut commands = Vec::new();

        self.observe_own_position(own);

        if signal.take_changed(probe) {
            commands.extend(self.on_foreground_changed(probe, own));
        }

        if self.tick_count % TRACK_EVERY == 0 {
            commands.extend(self.track_cli_window(probe));
        }

        commands
    }

    /// Transition decision after the foreground window changed
    pub fn on_foreground_changed(
        &mut self,
        probe: &dyn WindowProbe,
        own: Option<Geometry>,
    ) -> Vec<WindowCommand> {
        let active = probe.active_window();

        if self.is_self(probe, active) {
            debug!("Foreground is this application, ignoring");
            return Vec::new();
        }

        let process = probe.process_name_of(active);
        let is_cli = process
            .as_deref()
            .is_some_and(crate::window::is_cli_process);
        debug!(
            "Foreground changed: process={:?} cli={} mode={:?}",
            process, is_cli, self.mode
        );

        if !is_cli {
            return vec![WindowCommand::SetAlwaysOnTop(false), WindowCommand::Lower];
        }

        // While compact, only tracking records the rect; a newly focused
        // terminal starts unmeasured and is followed on the next track tick
        let rect = match (&self.tracked, self.mode) {
            (_, Mode::Full) => probe.rect_of(active),
            (Some(t), Mode::Compact) if t.handle == active => t.rect,
            _ => None,
        };
        self.tracked = Some(TrackedWindow {
            handle: active,
            rect,
            process,
        });

        let mut commands = Vec::new();
        if self.mode == Mode::Full {
            commands.extend(self.enter_compact(probe, own));
        }
        commands.push(WindowCommand::SetAlwaysOnTop(true));
        commands
    }

    fn enter_compact(&mut self, probe: &dyn WindowProbe, own: Option<Geometry>) -> Vec<WindowCommand> {
        self.mode = Mode::Compact;

        if let Some(own) = own {
            self.saved_full = Some(own);
            self.last_compact_position.get_or_insert(own.position);
        }

        let position = match (self.policy, self.last_compact_position) {
            (MiniWindowPosition::LastPosition, Some(last)) => last,
            _ => self.follow_placement(probe),
        };
        debug!("Entering compact mode at {:?}", position);

        self.note_applied(position);
        vec![
            WindowCommand::ShowCompact {
                size: self.compact_size_px(),
            },
            WindowCommand::MoveTo(position),
        ]
    }

    /// Return to the full layout, e.g. from the compact view's expand button
    pub fn exit_compact(&mut self) -> Vec<WindowCommand> {
        if self.mode != Mode::Compact {
            return Vec::new();
        }
        self.mode = Mode::Full;
        self.pending_move = None;

        let default_size = self.layout.size.scaled(self.scale);
        let (position, size) = match self.saved_full {
            Some(saved) => (Some(saved.position), saved.size),
            None => (None, default_size),
        };
        debug!("Leaving compact mode, restoring {:?} {:?}", position, size);

        vec![
            WindowCommand::SetAlwaysOnTop(false),
            WindowCommand::ShowFull {
                position,
                size,
                min_size: self.layout.min_size.scaled(self.scale),
            },
            WindowCommand::Focus,
        ]
    }

    /// Re-place the compact window when the tracked CLI window moved
    fn track_cli_window(&mut self, probe: &dyn WindowProbe) -> Vec<WindowCommand> {
        if self.mode != Mode::Compact {
            return Vec::new();
        }

        let last = self.tracked.as_ref().map(|t| t.handle);
        let Some(handle) = probe.resolve_cli_window(last) else {
            return Vec::new();
        };
        let Some(rect) = probe.rect_of(handle) else {
            return Vec::new();
        };

        let unchanged = self
            .tracked
            .as_ref()
            .is_some_and(|t| t.handle == handle && t.rect == Some(rect));
        if unchanged {
            return Vec::new();
        }

        let process = match self.tracked.take() {
            Some(t) if t.handle == handle => t.process,
            _ => probe.process_name_of(handle),
        };
        self.tracked = Some(TrackedWindow {
            handle,
            rect: Some(rect),
            process,
        });

        if self.policy == MiniWindowPosition::LastPosition {
            return Vec::new();
        }

        let position = self.follow_placement(probe);
        debug!("CLI window moved to {:?}, compact window to {:?}", rect, position);
        self.note_applied(position);
        vec![WindowCommand::MoveTo(position)]
    }

    /// Placement next to the tracked window, or the fallback position
    fn follow_placement(&self, probe: &dyn WindowProbe) -> Position {
        let compact = self.compact_size_px();

        if let Some(handle) = self.tracked.as_ref().map(|t| t.handle) {
            let rect = probe.rect_of(handle);
            let work = probe.monitor_work_area(handle);
            if let (Some(rect), Some(work)) = (rect, work) {
                return follow_position(rect, work, probe.is_maximized(handle), compact);
            }
            debug!("Could not measure CLI window, using default position");
        }

        let screen_height = probe
            .primary_screen_size()
            .map_or(placement::FALLBACK_SCREEN_HEIGHT, |(_, height)| height);
        default_position(screen_height, compact)
    }

    fn note_applied(&mut self, position: Position) {
        self.last_compact_position = Some(position);
        self.pending_move = Some((position, 0));
    }

    /// Record where the compact window actually is, so user drags are
    /// remembered. Waits for commanded moves to land first.
    fn observe_own_position(&mut self, own: Option<Geometry>) {
        if self.mode != Mode::Compact {
            return;
        }
        let Some(own) = own else {
            return;
        };

        if let Some((target, waited)) = self.pending_move {
            if !own.position.near(target, POSITION_TOLERANCE) && waited < SETTLE_TICKS {
                self.pending_move = Some((target, waited + 1));
                return;
            }
            self.pending_move = None;
        }

        let moved = self
            .last_compact_position
            .is_none_or(|last| !own.position.near(last, POSITION_TOLERANCE));
        if moved {
            debug!("Compact window now at {:?}", own.position);
            self.last_compact_position = Some(own.position);
        }
    }

    /// Last position the compact window had
    pub fn last_compact_position(&self) -> Option<Position> {
        self.last_compact_position
    }
}
