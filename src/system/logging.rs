// src/system/logging.rs

use crate::system::shutdown;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};

static INIT: Once = Once::new();
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// Installs the process logger. Only the first call has any effect.
///
/// Records are written as `[timestamp] LEVEL: thread: message`, to stderr or, when
/// `file_path` is given, appended to that file. `RUST_LOG` directives are applied on
/// top of `level`.
pub fn init(level: LevelFilter, file_path: Option<&Path>) {
    INIT.call_once(|| {
        let mut builder = Builder::new();
        builder
            .filter_level(level)
            .parse_env(Env::default())
            .format(|buf, record| {
                let thread = std::thread::current();
                writeln!(
                    buf,
                    "[{}] {}: {}: {}",
                    buf.timestamp_micros(),
                    record.level(),
                    thread.name().unwrap_or("unnamed"),
                    record.args()
                )
            });

        let mut file_error = None;
        if let Some(path) = file_path {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => {
                    builder.target(Target::Pipe(Box::new(file)));
                }
                Err(e) => file_error = Some((path.display().to_string(), e)),
            }
        }

        if builder.try_init().is_ok() {
            ACTIVE.store(true, Ordering::SeqCst);
            shutdown::register(shutdown::LOG_FLUSH_HOOK, flush);
        }
        if let Some((path, e)) = file_error {
            log::warn!("Cannot open log file '{}' ({}); logging to stderr.", path, e);
        }
    });
}

/// Flushes the logging sink if a logger was ever installed.
pub fn flush() {
    if ACTIVE.load(Ordering::SeqCst) {
        log::logger().flush();
    }
}

/// Maps a stored numeric level (10 debug, 20 info, 30 warning, 40 error, 50 critical)
/// to a `LevelFilter`. Values in between round down to the more verbose level.
pub fn level_from_numeric(level: i64) -> LevelFilter {
    match level {
        i64::MIN..=9 => LevelFilter::Trace,
        10..=19 => LevelFilter::Debug,
        20..=29 => LevelFilter::Info,
        30..=39 => LevelFilter::Warn,
        40..=50 => LevelFilter::Error,
        _ => LevelFilter::Off,
    }
}
