//! A dedicated signal-handling thread, grounded on the teacher pack's
//! `shpool::daemon::signals::Handler`: `signal-hook`'s self-pipe iterator
//! is watched on its own thread rather than installing a raw `sigaction`
//! handler, and the shared [`Progress`] context (not process-wide globals)
//! is consulted to write the final log line before exiting.
//!
//! Adapted to the five signals named in the error-handling policy instead
//! of shpool's terminate-signal set: SIGINT, SIGTERM, SIGALRM, SIGPIPE, and
//! SIGSEGV. A scheduled `--stop` timeout is delivered as SIGALRM by the
//! caller via `libc::alarm`, and is handled identically to the other four.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use signal_hook::consts::{SIGALRM, SIGINT, SIGPIPE, SIGSEGV, SIGTERM};
use signal_hook::iterator::Signals;
use tracing::{error, info};

use crate::logging::ProgressLog;
use crate::progress::Progress;

const HANDLED_SIGNALS: [i32; 5] = [SIGINT, SIGTERM, SIGALRM, SIGPIPE, SIGSEGV];

fn signal_name(sig: i32) -> &'static str {
    match sig {
        SIGINT => "SIGINT",
        SIGTERM => "SIGTERM",
        SIGALRM => "SIGALRM",
        SIGPIPE => "SIGPIPE",
        SIGSEGV => "SIGSEGV",
        _ => "UNKNOWN",
    }
}

/// Spawns the signal-watching thread. On receipt of any handled signal, it
/// logs a banner, writes the final progress line from the shared
/// [`Progress`] snapshot, flushes, and exits the process with code 0 — the
/// policy named in the error-handling design.
pub fn spawn(
    progress: Arc<Progress>,
    log: Arc<std::sync::Mutex<ProgressLog>>,
) -> std::io::Result<Arc<AtomicBool>> {
    let shutdown_requested = Arc::new(AtomicBool::new(false));
    let mut signals = Signals::new(HANDLED_SIGNALS)?;
    let flag = Arc::clone(&shutdown_requested);

    thread::spawn(move || {
        for sig in &mut signals {
            flag.store(true, Ordering::SeqCst);
            info!(signal = signal_name(sig), "signal received");

            let snapshot = progress.snapshot();
            let mut log = log.lock().unwrap();
            log.absorb_last_emitted(&snapshot.last_emitted);
            if let Err(e) = log.log_signal(signal_name(sig)) {
                error!("failed to log signal banner: {e}");
            }
            if let Err(e) = log.final_progress_line() {
                error!("failed to log final progress: {e}");
            }

            std::process::exit(0);
        }
    });

    Ok(shutdown_requested)
}
