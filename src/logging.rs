//! Structured diagnostics via `tracing`, plus the dedicated append-only
//! progress/signal log file the external interface contract describes:
//! timestamped startup options, signal receipts, and periodic progress
//! lines with word count and elapsed time, matching the reference
//! implementation's `logmessage` one-line-per-event format.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use thousands::Separable;
use tracing_subscriber::fmt::format::FmtSpan;

use crate::error::ResourceError;

/// How many emissions pass between progress checkpoints, matching the
/// reference implementation's cadence constant.
pub const WORDS_LIMIT: u64 = 500_000_000;

/// Installs a `tracing` subscriber that writes structured spans/events to
/// the process's log file, mirroring the way the teacher stack wires
/// `tracing_subscriber::fmt` to a file writer.
pub fn init_tracing(file: &File) -> std::io::Result<()> {
    let file = file.try_clone()?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// The bespoke append-only text log the external interface contract names:
/// startup options, signal banners, and periodic progress lines.
pub struct ProgressLog {
    file: Mutex<File>,
    checkpoint: Instant,
    emitted_since_checkpoint: u64,
    last_emitted: String,
}

impl ProgressLog {
    pub fn open(path: &str) -> Result<ProgressLog, ResourceError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ResourceError::OpenLog {
                path: path.to_string(),
                source: e,
            })?;
        Ok(ProgressLog {
            file: Mutex::new(file),
            checkpoint: Instant::now(),
            emitted_since_checkpoint: 0,
            last_emitted: String::new(),
        })
    }

    fn write_line(&self, line: &str) -> Result<(), ResourceError> {
        let mut file = self.file.lock().unwrap();
        writeln!(file, "{line}").map_err(ResourceError::OutputWrite)?;
        file.flush().map_err(ResourceError::OutputWrite)?;
        Ok(())
    }

    pub fn log_startup(&self, options: &str) -> Result<(), ResourceError> {
        self.write_line(&format!("startup options: {options}"))
    }

    pub fn log_signal(&self, name: &str) -> Result<(), ResourceError> {
        self.write_line(&format!("received signal {name}, flushing and exiting"))
    }

    /// Records a single emission; emits a progress line every [`WORDS_LIMIT`]
    /// words, reporting the count (thousands-separated) and elapsed time
    /// since the previous checkpoint.
    pub fn note_emission(&mut self, word: &str) -> Result<(), ResourceError> {
        self.emitted_since_checkpoint += 1;
        self.last_emitted = word.to_string();
        if self.emitted_since_checkpoint >= WORDS_LIMIT {
            self.checkpoint_progress()?;
        }
        Ok(())
    }

    fn checkpoint_progress(&mut self) -> Result<(), ResourceError> {
        let elapsed = self.checkpoint.elapsed();
        let line = format!(
            "progress: {} words, {} elapsed, last = {}",
            self.emitted_since_checkpoint.separate_with_underscores(),
            humantime::format_duration(round_to_secs(elapsed)),
            self.last_emitted,
        );
        self.write_line(&line)?;
        self.checkpoint = Instant::now();
        self.emitted_since_checkpoint = 0;
        Ok(())
    }

    pub fn final_progress_line(&mut self) -> Result<(), ResourceError> {
        self.checkpoint_progress()
    }

    /// Folds a last-emitted word observed elsewhere (the shared
    /// [`crate::progress::Progress`] snapshot) into this log, so a final
    /// line written from a thread other than the one calling
    /// [`Self::note_emission`] still reports the true last word.
    pub fn absorb_last_emitted(&mut self, last_emitted: &str) {
        if !last_emitted.is_empty() {
            self.last_emitted = last_emitted.to_string();
        }
    }
}

fn round_to_secs(d: Duration) -> Duration {
    Duration::from_secs(d.as_secs())
}
