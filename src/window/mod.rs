//! Window-manager queries
//!
//! [`WindowProbe`] is the read side of the platform window manager plus the one
//! mutation the coordinator needs ([`WindowProbe::lower`]). Every query
//! degrades to a default instead of failing: windows close between a query and
//! its use, and that must never take the coordinator down.
//!
//! [`FocusSignal`] reports foreground changes. On Windows an event hook only
//! raises a flag which the UI tick consumes; elsewhere the active window is
//! polled.

mod null;
#[cfg(windows)]
mod win32;

pub use null::NullProbe;
#[cfg(windows)]
pub use win32::{HookSignal, Win32Probe};

/// Executables whose windows count as CLI windows (lowercase)
pub const CLI_PROCESS_NAMES: [&str; 3] = ["powershell.exe", "pwsh.exe", "windowsterminal.exe"];

/// Error type for window-manager setup
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to install the foreground event hook")]
    HookInstall,
}

/// Opaque native window handle; zero is the null handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(pub isize);

impl WindowHandle {
    pub const NULL: WindowHandle = WindowHandle(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// Screen rectangle in physical pixels, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// True if `process_name` is one of [`CLI_PROCESS_NAMES`], ignoring case
pub fn is_cli_process(process_name: &str) -> bool {
    let lower = process_name.to_lowercase();
    CLI_PROCESS_NAMES.contains(&lower.as_str())
}

/// Platform window-manager queries
pub trait WindowProbe {
    /// Foreground window, [`WindowHandle::NULL`] when unknown
    fn active_window(&self) -> WindowHandle;

    /// Lowercase executable file name of the owning process
    fn process_name_of(&self, handle: WindowHandle) -> Option<String>;

    fn process_id_of(&self, handle: WindowHandle) -> Option<u32>;

    fn parent_of(&self, handle: WindowHandle) -> Option<WindowHandle>;

    /// Whether `handle` still names a live window
    fn is_window(&self, handle: WindowHandle) -> bool;

    fn rect_of(&self, handle: WindowHandle) -> Option<Rect>;

    /// Usable area of the monitor nearest to `handle`, taskbars excluded
    fn monitor_work_area(&self, handle: WindowHandle) -> Option<Rect>;

    /// False on error
    fn is_maximized(&self, handle: WindowHandle) -> bool;

    /// Width and height of the primary display
    fn primary_screen_size(&self) -> Option<(i32, i32)>;

    /// Push `handle` to the bottom of the z-order without activating it
    fn lower(&self, handle: WindowHandle) -> bool;

    fn is_cli_window(&self, handle: WindowHandle) -> bool {
        !handle.is_null()
            && self
                .process_name_of(handle)
                .is_some_and(|name| is_cli_process(&name))
    }

    fn is_cli_window_active(&self) -> bool {
        self.is_cli_window(self.active_window())
    }

    /// The active CLI window, or `last` while it is still alive
    fn resolve_cli_window(&self, last: Option<WindowHandle>) -> Option<WindowHandle> {
        let active = self.active_window();
        if self.is_cli_window(active) {
            return Some(active);
        }
        last.filter(|handle| self.is_window(*handle))
    }
}

/// Probe for the platform this binary was built for
pub fn system_probe() -> Box<dyn WindowProbe> {
    #[cfg(windows)]
    {
        Box::new(Win32Probe)
    }
    #[cfg(not(windows))]
    {
        Box::new(NullProbe)
    }
}

/// Foreground-change notification, consumed on the UI thread
pub trait FocusSignal {
    /// True once for every batch of foreground changes since the last call
    fn take_changed(&mut self, probe: &dyn WindowProbe) -> bool;
}

/// Detects foreground changes by comparing the active window between calls
#[derive(Debug, Default)]
pub struct PollingSignal {
    last: WindowHandle,
}

impl PollingSignal {
    pub fn new(probe: &dyn WindowProbe) -> Self {
        Self {
            last: probe.active_window(),
        }
    }
}

impl FocusSignal for PollingSignal {
    fn take_changed(&mut self, probe: &dyn WindowProbe) -> bool {
        let active = probe.active_window();
        if active == self.last {
            return false;
        }
        self.last = active;
        true
    }
}

/// Event hook where available, polling otherwise.
///
/// Must be called on the UI thread: hook callbacks are delivered through that
/// thread's message loop.
pub fn focus_signal(probe: &dyn WindowProbe) -> Box<dyn FocusSignal> {
    #[cfg(windows)]
    {
        match HookSignal::install() {
            Ok(hook) => return Box::new(hook),
            Err(e) => tracing::warn!("{}, polling the foreground window instead", e),
        }
    }
    Box::new(PollingSignal::new(probe))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Desk {
        active: Cell<WindowHandle>,
    }

    impl WindowProbe for Desk {
        fn active_window(&self) -> WindowHandle {
            self.active.get()
        }
        fn process_name_of(&self, handle: WindowHandle) -> Option<String> {
            match handle.0 {
                1 => Some("WindowsTerminal.exe".to_lowercase()),
                2 => Some("notepad.exe".to_string()),
                _ => None,
            }
        }
        fn process_id_of(&self, _handle: WindowHandle) -> Option<u32> {
            None
        }
        fn parent_of(&self, _handle: WindowHandle) -> Option<WindowHandle> {
            None
        }
        fn is_window(&self, handle: WindowHandle) -> bool {
            handle.0 == 1 || handle.0 == 2
        }
        fn rect_of(&self, _handle: WindowHandle) -> Option<Rect> {
            None
        }
        fn monitor_work_area(&self, _handle: WindowHandle) -> Option<Rect> {
            None
        }
        fn is_maximized(&self, _handle: WindowHandle) -> bool {
            false
        }
        fn primary_screen_size(&self) -> Option<(i32, i32)> {
            None
        }
        fn lower(&self, _handle: WindowHandle) -> bool {
            false
        }
    }

    #[test]
    fn test_cli_process_names() {
        assert!(is_cli_process("pwsh.exe"));
        assert!(is_cli_process("PowerShell.exe"));
        assert!(!is_cli_process("cmd.exe"));
    }

    #[test]
    fn test_resolve_cli_window_keeps_last_live_handle() {
        let desk = Desk {
            active: Cell::new(WindowHandle(1)),
        };
        assert_eq!(desk.resolve_cli_window(None), Some(WindowHandle(1)));

        desk.active.set(WindowHandle(2));
        assert!(!desk.is_cli_window_active());
        assert_eq!(
            desk.resolve_cli_window(Some(WindowHandle(1))),
            Some(WindowHandle(1))
        );
        assert_eq!(desk.resolve_cli_window(Some(WindowHandle(9))), None);
    }

    #[test]
    fn test_polling_signal_fires_once_per_change() {
        let desk = Desk {
            active: Cell::new(WindowHandle(2)),
        };
        let mut signal = PollingSignal::new(&desk);
        assert!(!signal.take_changed(&desk));

        desk.active.set(WindowHandle(1));
        assert!(signal.take_changed(&desk));
        assert!(!signal.take_changed(&desk));
    }
}
