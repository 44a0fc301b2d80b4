//! Background clipboard watcher
//!
//! The bookmarklet copies extracted prompts as `MARKER + "\n" + prompt`. The
//! watcher notices that, hands the prompt to a callback (which records it in
//! the history) and puts the bare prompt back on the clipboard so the next
//! paste into the CLI does not carry the marker.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use super::ClipboardAccess;

/// Prefix identifying a pending GPT→CC transfer
pub const MARKER: &str = "[BRIDGIRON_GPT2CC]";

/// Clipboard sampling period
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// How long [`ClipboardWatcher::stop`] waits for the thread
pub const STOP_TIMEOUT: Duration = Duration::from_secs(2);

/// Payload of a marked clipboard text.
///
/// Removes the marker and at most one line break (`\r\n`, `\n` or `\r`)
/// directly after it. Returns `None` when the text is not marked.
pub fn strip_marker(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(MARKER)?;
    Some(
        rest.strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .or_else(|| rest.strip_prefix('\r'))
            .unwrap_or(rest),
    )
}

/// Per-thread polling state
struct WatchLoop<C, F> {
    clipboard: C,
    last_seen: String,
    on_detect: F,
}

impl<C, F> WatchLoop<C, F>
where
    C: ClipboardAccess,
    F: Fn(String),
{
    fn new(mut clipboard: C, on_detect: F) -> Self {
        let last_seen = clipboard.get_text().unwrap_or_default();
        Self {
            clipboard,
            last_seen,
            on_detect,
        }
    }

    /// Sample the clipboard once
    fn poll_once(&mut self) {
        let current = match self.clipboard.get_text() {
            Ok(text) => text,
            Err(e) => {
                debug!("Clipboard watcher read failed: {}", e);
                return;
            }
        };

        if current == self.last_seen {
            return;
        }
        debug!("Clipboard changed, length={}", current.len());

        if let Some(payload) = strip_marker(&current).filter(|p| !p.is_empty()) {
            let payload = payload.to_string();
            (self.on_detect)(payload.clone());

            match self.clipboard.set_text(&payload) {
                Ok(()) => debug!("Re-copied payload without marker"),
                Err(e) => warn!("Clipboard watcher write failed: {}", e),
            }
        }

        self.last_seen = self.clipboard.get_text().unwrap_or(current);
    }
}

struct Running {
    stop_tx: Sender<()>,
    done_rx: Receiver<()>,
    handle: JoinHandle<()>,
}

/// Polls the clipboard on its own thread while running
pub struct ClipboardWatcher {
    interval: Duration,
    running: Option<Running>,
}

impl Default for ClipboardWatcher {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl ClipboardWatcher {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Start polling; does nothing when already running.
    ///
    /// `on_detect` runs on the watcher thread, not the UI thread.
    pub fn start<C, F>(&mut self, clipboard: C, on_detect: F)
    where
        C: ClipboardAccess + Send + 'static,
        F: Fn(String) + Send + 'static,
    {
        if self.running.is_some() {
            return;
        }

        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let interval = self.interval;

        let spawned = thread::Builder::new()
            .name("clipboard-watcher".to_string())
            .spawn(move || {
                let mut watch = WatchLoop::new(clipboard, on_detect);
                loop {
                    watch.poll_once();
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                let _ = done_tx.send(());
            });

        match spawned {
            Ok(handle) => {
                info!("Clipboard watcher started");
                self.running = Some(Running {
                    stop_tx,
                    done_rx,
                    handle,
                });
            }
            Err(e) => warn!("Failed to start clipboard watcher: {}", e),
        }
    }

    /// Signal the thread and wait up to [`STOP_TIMEOUT`] for it.
    ///
    /// Returns false when the thread did not finish in time; it is then left
    /// detached and dies with the process.
    pub fn stop(&mut self) -> bool {
        let Some(running) = self.running.take() else {
            return true;
        };

        let _ = running.stop_tx.send(());
        match running.done_rx.recv_timeout(STOP_TIMEOUT) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                let _ = running.handle.join();
                info!("Clipboard watcher stopped");
                true
            }
            Err(RecvTimeoutError::Timeout) => {
                warn!("Clipboard watcher did not stop within {:?}", STOP_TIMEOUT);
                false
            }
        }
    }
}

impl Drop for ClipboardWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
