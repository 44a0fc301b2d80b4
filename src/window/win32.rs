//! Win32 implementation of the window probe and the foreground hook

use std::ffi::c_void;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use windows::Win32::Foundation::{CloseHandle, HMODULE, HWND, RECT};
use windows::Win32::Graphics::Gdi::{GetMonitorInfoW, MONITOR_DEFAULTTONEAREST, MONITORINFO, MonitorFromWindow};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_NAME_FORMAT, PROCESS_QUERY_LIMITED_INFORMATION, QueryFullProcessImageNameW,
};
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_SYSTEM_FOREGROUND, GetForegroundWindow, GetParent, GetSystemMetrics, GetWindowRect,
    GetWindowThreadProcessId, HWND_BOTTOM, IsWindow, IsZoomed, SM_CXSCREEN, SM_CYSCREEN, SWP_NOACTIVATE,
    SWP_NOMOVE, SWP_NOSIZE, SetWindowPos, WINEVENT_OUTOFCONTEXT,
};
use windows::core::PWSTR;

use super::{FocusSignal, Rect, WindowError, WindowHandle, WindowProbe};

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

fn handle_of(hwnd: HWND) -> WindowHandle {
    WindowHandle(hwnd.0 as isize)
}

fn rect_from(rect: RECT) -> Rect {
    Rect::new(rect.left, rect.top, rect.right, rect.bottom)
}

/// Window probe backed by user32
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Probe;

impl WindowProbe for Win32Probe {
    fn active_window(&self) -> WindowHandle {
        handle_of(unsafe { GetForegroundWindow() })
    }

    fn process_name_of(&self, handle: WindowHandle) -> Option<String> {
        let pid = self.process_id_of(handle)?;

        unsafe {
            let process = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid).ok()?;
            if process.is_invalid() {
                return None;
            }

            let mut buffer = vec![0u16; 512];
            let mut size = buffer.len() as u32;
            let queried = QueryFullProcessImageNameW(
                process,
                PROCESS_NAME_FORMAT(0),
                PWSTR(buffer.as_mut_ptr()),
                &mut size,
            );
            let _ = CloseHandle(process);

            if let Err(e) = queried {
                tracing::debug!("QueryFullProcessImageNameW failed for pid {}: {}", pid, e);
                return None;
            }

            let full_path = String::from_utf16_lossy(&buffer[..size as usize]);
            Path::new(&full_path)
                .file_name()
                .map(|name| name.to_string_lossy().to_lowercase())
        }
    }

    fn process_id_of(&self, handle: WindowHandle) -> Option<u32> {
        if handle.is_null() {
            return None;
        }
        let mut pid = 0u32;
        unsafe { GetWindowThreadProcessId(hwnd(handle), Some(&mut pid)) };
        (pid != 0).then_some(pid)
    }

    fn parent_of(&self, handle: WindowHandle) -> Option<WindowHandle> {
        let parent = unsafe { GetParent(hwnd(handle)) }.ok()?;
        let parent = handle_of(parent);
        (!parent.is_null()).then_some(parent)
    }

    fn is_window(&self, handle: WindowHandle) -> bool {
        !handle.is_null() && unsafe { IsWindow(hwnd(handle)) }.as_bool()
    }

    fn rect_of(&self, handle: WindowHandle) -> Option<Rect> {
        let mut rect = RECT::default();
        match unsafe { GetWindowRect(hwnd(handle), &mut rect) } {
            Ok(()) => Some(rect_from(rect)),
            Err(e) => {
                tracing::debug!("GetWindowRect failed: {}", e);
                None
            }
        }
    }

    fn monitor_work_area(&self, handle: WindowHandle) -> Option<Rect> {
        unsafe {
            let monitor = MonitorFromWindow(hwnd(handle), MONITOR_DEFAULTTONEAREST);
            if monitor.is_invalid() {
                return None;
            }
            let mut info = MONITORINFO {
                cbSize: std::mem::size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            if !GetMonitorInfoW(monitor, &mut info).as_bool() {
                tracing::debug!("GetMonitorInfoW failed");
                return None;
            }
            Some(rect_from(info.rcWork))
        }
    }

    fn is_maximized(&self, handle: WindowHandle) -> bool {
        unsafe { IsZoomed(hwnd(handle)) }.as_bool()
    }

    fn primary_screen_size(&self) -> Option<(i32, i32)> {
        let (width, height) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
        (width > 0 && height > 0).then_some((width, height))
    }

    fn lower(&self, handle: WindowHandle) -> bool {
        let flags = SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE;
        match unsafe { SetWindowPos(hwnd(handle), HWND_BOTTOM, 0, 0, 0, 0, flags) } {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("SetWindowPos(HWND_BOTTOM) failed: {}", e);
                false
            }
        }
    }
}

/// Raised by the hook callback, cleared by [`HookSignal::take_changed`]
static FOREGROUND_CHANGED: AtomicBool = AtomicBool::new(false);

unsafe extern "system" fn on_foreground_event(
    _hook: HWINEVENTHOOK,
    _event: u32,
    _hwnd: HWND,
    _id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    FOREGROUND_CHANGED.store(true, Ordering::Release);
}

/// `EVENT_SYSTEM_FOREGROUND` hook; unhooked on drop
#[derive(Debug)]
pub struct HookSignal {
    hook: HWINEVENTHOOK,
}

impl HookSignal {
    pub fn install() -> Result<Self, WindowError> {
        let hook = unsafe {
            SetWinEventHook(
                EVENT_SYSTEM_FOREGROUND,
                EVENT_SYSTEM_FOREGROUND,
                HMODULE::default(),
                Some(on_foreground_event),
                0,
                0,
                WINEVENT_OUTOFCONTEXT,
            )
        };
        if hook.is_invalid() {
            return Err(WindowError::HookInstall);
        }

        FOREGROUND_CHANGED.store(false, Ordering::Release);
        tracing::info!("Foreground hook installed");
        Ok(Self { hook })
    }
}

impl FocusSignal for HookSignal {
    fn take_changed(&mut self, _probe: &dyn WindowProbe) -> bool {
        FOREGROUND_CHANGED.swap(false, Ordering::AcqRel)
    }
}

impl Drop for HookSignal {
    fn drop(&mut self) {
        let _ = unsafe { UnhookWinEvent(self.hook) };
        tracing::info!("Foreground hook removed");
    }
}
