//! A small shared snapshot of the current emission: the context object the
//! design notes ask for in place of the reference implementation's
//! process-wide globals. The enumeration driver updates it after every
//! emission; the signal handler thread reads it to write a final progress
//! line before the process exits.

use std::sync::Mutex;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub emitted_count: u64,
    pub last_emitted: String,
}

/// Shared between the main enumeration loop and the signal handler thread.
pub struct Progress {
    snapshot: Mutex<Snapshot>,
}

impl Progress {
    pub fn new() -> Progress {
        Progress {
            snapshot: Mutex::new(Snapshot::default()),
        }
    }

    pub fn record(&self, word: &str) {
        let mut s = self.snapshot.lock().unwrap();
        s.emitted_count += 1;
        s.last_emitted = word.to_string();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().unwrap().clone()
    }
}

impl Default for Progress {
    fn default() -> Progress {
        Progress::new()
    }
}
