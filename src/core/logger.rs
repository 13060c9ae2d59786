// src/core/logger.rs

use crate::{constants::LOG_FILTER_ENV, core::paths};
use chrono::{DateTime, Local};
use log::Level;
use std::{
    fmt,
    fs::{self, File, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Log path '{}' is outside the project root '{}'.", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
    #[error("Could not prepare log file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Writes every log line both to stderr and to the log file.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // A broken console must not stop the file from being written.
        let _ = io::stderr().write_all(buf);
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let _ = io::stderr().flush();
        self.file.flush()
    }
}

/// The application logger: one UTF-8 file per (app, script, day), mirrored to the console.
///
/// Records are formatted as `<timestamp> [<LEVEL>] <message>`.
#[derive(Debug, Clone)]
pub struct AppLogger {
    app_name: String,
    script_name: String,
    log_path: PathBuf,
    installed: bool,
}

impl AppLogger {
    /// Creates the log directory and file, then installs the process logger.
    ///
    /// When `project_root` is given, both the directory and the file must lie inside it.
    /// A process can only hold one logger: if another one is already installed, the
    /// file is still prepared and `installed()` reports `false`.
    pub fn init(
        log_dir: &Path,
        app_name: &str,
        script_name: &str,
        log_ext: &str,
        project_root: Option<&Path>,
    ) -> Result<Self, LoggerError> {
        ensure_in_root(log_dir, project_root)?;

        fs::create_dir_all(log_dir).map_err(|source| LoggerError::Io {
            path: log_dir.to_path_buf(),
            source,
        })?;

        let log_path = log_dir.join(log_file_name(app_name, script_name, log_ext));
        ensure_in_root(&log_path, project_root)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .map_err(|source| LoggerError::Io {
                path: log_path.clone(),
                source,
            })?;

        let installed = env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .parse_env(LOG_FILTER_ENV)
            .format(|buf, record| {
                writeln!(buf, "{}", format_line(&Local::now(), record.level(), record.args()))
            })
            .target(env_logger::Target::Pipe(Box::new(TeeWriter { file })))
            .try_init()
            .is_ok();

        let logger = Self {
            app_name: app_name.to_string(),
            script_name: script_name.to_string(),
            log_path,
            installed,
        };

        if installed {
            logger.info(&format!("Logger initialized: {}", logger.log_path.display()));
        } else {
            log::debug!(
                "A logger is already installed; '{}' was prepared but not attached.",
                logger.log_path.display()
            );
        }
        Ok(logger)
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    /// Whether this logger is the one attached to the `log` facade.
    pub fn installed(&self) -> bool {
        self.installed
    }

    pub fn debug(&self, message: &str) {
        log::debug!(target: self.app_name.as_str(), "{}", message);
    }

    pub fn info(&self, message: &str) {
        log::info!(target: self.app_name.as_str(), "{}", message);
    }

    pub fn warning(&self, message: &str) {
        log::warn!(target: self.app_name.as_str(), "{}", message);
    }

    pub fn error(&self, message: &str) {
        log::error!(target: self.app_name.as_str(), "{}", message);
    }
}

/// One log record: `<YYYY-mm-dd HH:MM:SS> [<LEVEL>] <message>`.
pub fn format_line(timestamp: &DateTime<Local>, level: Level, message: &fmt::Arguments<'_>) -> String {
    format!("{} [{}] {}", timestamp.format("%Y-%m-%d %H:%M:%S"), level, message)
}

/// `<YYYYMMDD>_<app_name>_<script_name>.<ext>` for today.
pub fn log_file_name(app_name: &str, script_name: &str, log_ext: &str) -> String {
    let date = Local::now().format("%Y%m%d");
    let ext = log_ext.trim_start_matches('.');
    format!("{}_{}_{}.{}", date, app_name, script_name, ext)
}

fn ensure_in_root(path: &Path, project_root: Option<&Path>) -> Result<(), LoggerError> {
    match project_root {
        Some(root) if !paths::is_path_in_root(path, Some(root)) => Err(LoggerError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        }),
        _ => Ok(()),
    }
}
