use super::{Rect, WindowHandle, WindowProbe};

/// Probe for platforms without window-manager support.
///
/// Reports no active window, so compact mode never engages.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProbe;

impl WindowProbe for NullProbe {
    fn active_window(&self) -> WindowHandle {
        WindowHandle::NULL
    }

    fn process_name_of(&self, _handle: WindowHandle) -> Option<String> {
        None
    }

    fn process_id_of(&self, _handle: WindowHandle) -> Option<u32> {
        None
    }

    fn parent_of(&self, _handle: WindowHandle) -> Option<WindowHandle> {
        None
    }

    fn is_window(&self, _handle: WindowHandle) -> bool {
        false
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
