use std::fs::File;
use std::io::BufReader;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use keywalk::cli::Args;
use keywalk::config;
use keywalk::driver::{run_counting, run_enumeration};
use keywalk::error::{ResourceError, WalkError};
use keywalk::logging::ProgressLog;
use keywalk::progress::Progress;
use keywalk::signals;

fn main() {
    let args = Args::parse();
    match run(args) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("keywalk: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    args.validate().map_err(WalkError::from)?;

    let log_handle = Arc::new(Mutex::new(
        ProgressLog::open(&args.logfile).map_err(WalkError::from)?,
    ));
    {
        let log = log_handle.lock().unwrap();
        log.log_startup(&format!(
            "arrangement={} keys={} min={} max={} dryrun={} infinite={} stop={:?} restart={:?}",
            args.arrangement,
            args.keys,
            args.min,
            args.max,
            args.dryrun,
            args.infinite,
            args.stop,
            args.restart
        ))
        .map_err(WalkError::from)?;
    }

    let log_file = File::options()
        .append(true)
        .open(&args.logfile)
        .map_err(|e| ResourceError::OpenLog {
            path: args.logfile.clone(),
            source: e,
        })
        .map_err(WalkError::from)?;
    keywalk::logging::init_tracing(&log_file).context("installing tracing subscriber")?;

    let config_file = File::open(&args.arrangement)
        .map_err(|e| ResourceError::OpenConfig {
            path: args.arrangement.clone(),
            source: e,
        })
        .map_err(WalkError::from)?;
    let keyboard = config::load(BufReader::new(config_file)).map_err(WalkError::from)?;

    let starts: Vec<_> = args
        .start_keys()
        .map(|c| {
            keyboard
                .find_by_char(c)
                .ok_or(keywalk::error::ConfigError::UnknownStartKey(c))
        })
        .collect::<Result<_, _>>()
        .map_err(WalkError::from)?;

    let progress = Arc::new(Progress::new());

    if let Some(seconds) = args.stop {
        unsafe {
            libc::alarm(seconds);
        }
    }

    let shutdown = signals::spawn(Arc::clone(&progress), Arc::clone(&log_handle))
        .context("installing signal handler")?;

    if args.dryrun {
        let (results, total) = run_counting(&keyboard, &starts, args.min, args.max)?;
        for r in &results {
            println!("{}: {}", r.base, r.count);
        }
        println!("Total: {total}");
    } else {
        let mut sink = |word: &str| {
            println!("{word}");
            progress.record(word);
            if let Err(e) = log_handle.lock().unwrap().note_emission(word) {
                error!("failed to update progress log: {e}");
            }
        };
        run_enumeration(
            &keyboard,
            &starts,
            args.min,
            args.max,
            args.restart.as_deref(),
            &mut sink,
        )?;
    }

    {
        let mut log = log_handle.lock().unwrap();
        log.absorb_last_emitted(&progress.snapshot().last_emitted);
        log.final_progress_line().map_err(WalkError::from)?;
    }

    info!("run complete");

    if args.infinite {
        loop {
            if shutdown.load(std::sync::atomic::Ordering::SeqCst) {
                break;
            }
            std::thread::park();
        }
    }

    Ok(())
}
