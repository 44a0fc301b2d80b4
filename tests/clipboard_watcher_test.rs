//! Integration tests for the clipboard watcher thread

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bridgiron::clipboard::{ClipboardAccess, ClipboardError, ClipboardWatcher, MARKER};

const INTERVAL: Duration = Duration::from_millis(20);
const WAIT: Duration = Duration::from_secs(3);

/// Clipboard shared between the test and the watcher thread
#[derive(Clone, Default)]
struct SharedClipboard {
    text: Arc<Mutex<String>>,
    reads: Arc<AtomicUsize>,
}

impl SharedClipboard {
    fn set(&self, text: &str) {
        *self.text.lock().expect("clipboard lock") = text.to_string();
    }

    fn get(&self) -> String {
        self.text.lock().expect("clipboard lock").clone()
    }

    /// Block until the watcher has sampled at least `count` times
    fn wait_for_reads(&self, count: usize) {
        let deadline = Instant::now() + WAIT;
        while self.reads.load(Ordering::SeqCst) < count {
            assert!(Instant::now() < deadline, "watcher never read the clipboard");
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}

impl ClipboardAccess for SharedClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.get())
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.set(text);
        Ok(())
    }
}

fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + WAIT;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn test_marked_text_is_reported_and_recopied() {
    let clipboard = SharedClipboard::default();
    clipboard.set("before");
    let (tx, rx) = mpsc::channel();

    let mut watcher = ClipboardWatcher::new(INTERVAL);
    watcher.start(clipboard.clone(), move |text| {
        let _ = tx.send(text);
    });
    assert!(watcher.is_running());
    clipboard.wait_for_reads(1);

    clipboard.set(&format!("{}\r\nHello", MARKER));

    assert_eq!(rx.recv_timeout(WAIT).expect("no detection"), "Hello");
    assert!(wait_until(|| clipboard.get() == "Hello"));

    assert!(watcher.stop());
    assert!(!watcher.is_running());
}

#[test]
fn test_plain_text_is_left_alone() {
    let clipboard = SharedClipboard::default();
    let (tx, rx) = mpsc::channel::<String>();

    let mut watcher = ClipboardWatcher::new(INTERVAL);
    watcher.start(clipboard.clone(), move |text| {
        let _ = tx.send(text);
    });
    clipboard.wait_for_reads(1);

    clipboard.set("just some text");
    let reads = clipboard.reads.load(Ordering::SeqCst);
    clipboard.wait_for_reads(reads + 3);

    assert!(rx.try_recv().is_err());
    assert_eq!(clipboard.get(), "just some text");
    assert!(watcher.stop());
}

#[test]
fn test_start_is_idempotent_and_stop_is_repeatable() {
    let clipboard = SharedClipboard::default();
    let detections = Arc::new(AtomicUsize::new(0));

    let mut watcher = ClipboardWatcher::new(INTERVAL);
    for _ in 0..2 {
        let detections = Arc::clone(&detections);
        watcher.start(clipboard.clone(), move |_| {
            detections.fetch_add(1, Ordering::SeqCst);
        });
    }
    clipboard.wait_for_reads(1);

    clipboard.set(&format!("{}\nonce", MARKER));
    assert!(wait_until(|| clipboard.get() == "once"));
    let reads = clipboard.reads.load(Ordering::SeqCst);
    clipboard.wait_for_reads(reads + 3);

    assert_eq!(detections.load(Ordering::SeqCst), 1);
    assert!(watcher.stop());
    assert!(watcher.stop());
}
