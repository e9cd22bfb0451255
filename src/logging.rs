use std::fs::{create_dir_all, File};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::EnvFilter;

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

const DEFAULT_FILTER: &str = "bbissues=info";

/// Sends `tracing` output to a timestamped file in the user's cache directory.
///
/// Terminal output is left to the presenter; `RUST_LOG` overrides the filter.
pub fn init_logging() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("bbissues")
        .join("logs");

    create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!("bbissues-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
    let file = File::create(&log_file)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| e as Box<dyn std::error::Error>)?;

    *LOG_FILE.lock().unwrap_or_else(|e| e.into_inner()) = Some(log_file.clone());

    tracing::info!("Logging initialized to: {}", log_file.display());

    Ok(log_file)
}

#[allow(deprecated)]
pub fn log_panic_info(info: &std::panic::PanicInfo) {
    let mut message = String::from("PANIC: ");

    if let Some(location) = info.location() {
        message.push_str(&format!(
            "at {}:{}:{} - ",
            location.file(),
            location.line(),
            location.column()
        ));
    }

    if let Some(s) = info.payload().downcast_ref::<&str>() {
        message.push_str(s);
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        message.push_str(s);
    } else {
        message.push_str("Unknown panic payload");
    }

    tracing::error!("{}", message);

    let backtrace = std::backtrace::Backtrace::capture();
    tracing::debug!("Backtrace:\n{}", backtrace);
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().unwrap_or_else(|e| e.into_inner()).clone()
}
