use crate::common::types::{LinkLogLevel, LinkLogRecord, LinkStatus, LinkStringView};

use core::ffi::{c_char, c_void};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Mutex, OnceLock};

pub type LinkLogCallback = Option<extern "C" fn(record: *const LinkLogRecord, user_data: *mut c_void)>;

#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum LogMode {
    Disabled = 0,
    Stderr = 1,
    Callback = 2,
}

impl LogMode {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => LogMode::Stderr,
            2 => LogMode::Callback,
            _ => LogMode::Disabled,
        }
    }
}

impl LinkLogLevel {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => LinkLogLevel::Error,
            2 => LinkLogLevel::Warn,
            3 => LinkLogLevel::Info,
            4 => LinkLogLevel::Debug,
            5 => LinkLogLevel::Trace,
            _ => LinkLogLevel::Off,
        }
    }

    fn filter(self) -> LevelFilter {
        match self {
            LinkLogLevel::Off => LevelFilter::Off,
            LinkLogLevel::Error => LevelFilter::Error,
            LinkLogLevel::Warn => LevelFilter::Warn,
            LinkLogLevel::Info => LevelFilter::Info,
            LinkLogLevel::Debug => LevelFilter::Debug,
            LinkLogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl From<Level> for LinkLogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => LinkLogLevel::Error,
            Level::Warn => LinkLogLevel::Warn,
            Level::Info => LinkLogLevel::Info,
            Level::Debug => LinkLogLevel::Debug,
            Level::Trace => LinkLogLevel::Trace,
        }
    }
}

struct CallbackState {
    callback: LinkLogCallback,
    user_data: usize,
}

/// Routes `log` records to stderr or to a host-supplied C callback.
pub struct LinkLogger {
    mode: AtomicU8,
    level: AtomicU8,
    callback: Mutex<CallbackState>,
}

impl LinkLogger {
    const fn new() -> Self {
        Self {
            mode: AtomicU8::new(LogMode::Disabled as u8),
            level: AtomicU8::new(LinkLogLevel::Off as u8),
            callback: Mutex::new(CallbackState {
                callback: None,
                user_data: 0,
            }),
        }
    }

    fn level(&self) -> LinkLogLevel {
        LinkLogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    fn set_level(&self, level: LinkLogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
        log::set_max_level(level.filter());
    }

    fn mode(&self) -> LogMode {
        LogMode::from_u8(self.mode.load(Ordering::Relaxed))
    }

    fn set_mode(&self, mode: LogMode) {
        self.mode.store(mode as u8, Ordering::Relaxed);
    }

    fn set_callback(&self, callback: LinkLogCallback, user_data: *mut c_void) {
        if let Ok(mut state) = self.callback.lock() {
            state.callback = callback;
            state.user_data = user_data as usize;
        }
    }

    fn forward(&self, record: &Record) {
        // Not held across the call: the callback may reconfigure logging.
        let (callback, user_data) = match self.callback.lock() {
            Ok(state) => (state.callback, state.user_data),
            Err(_) => return,
        };
        let Some(callback) = callback else {
            return;
        };
        let message = record.args().to_string();
        let out = LinkLogRecord {
            level: record.level().into(),
            target: string_view_from_str(record.target()),
            message: string_view_from_str(&message),
            file: string_view_from_str(record.file().unwrap_or("")),
            line: record.line().unwrap_or(0),
        };
        callback(&out as *const LinkLogRecord, user_data as *mut c_void);
    }
}

impl Log for LinkLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level().filter()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match self.mode() {
            LogMode::Stderr => eprintln!("[wclink][{}] {}", record.level(), record.args()),
            LogMode::Callback => self.forward(record),
            LogMode::Disabled => {}
        }
    }

    fn flush(&self) {}
}

static LOGGER: LinkLogger = LinkLogger::new();
static LOGGER_STATE: OnceLock<LoggerInstall> = OnceLock::new();

#[derive(Copy, Clone)]
enum LoggerInstall {
    Installed,
    /// Another logger owns the `log` facade; only the max level is ours.
    External,
}

fn init_logger() -> LoggerInstall {
    *LOGGER_STATE.get_or_init(|| match log::set_logger(&LOGGER) {
        Ok(()) => {
            log::set_max_level(LevelFilter::Off);
            LoggerInstall::Installed
        }
        Err(_) => LoggerInstall::External,
    })
}

fn string_view_from_str(value: &str) -> LinkStringView {
    LinkStringView {
        ptr: value.as_ptr() as *const c_char,
        len: value.len(),
    }
}

pub fn log_set_stderr(level: LinkLogLevel) -> LinkStatus {
    if matches!(init_logger(), LoggerInstall::External) {
        return LinkStatus::IoError;
    }
    LOGGER.set_mode(LogMode::Stderr);
    LOGGER.set_level(level);
    LinkStatus::Ok
}

pub fn log_set_callback(callback: LinkLogCallback, user_data: *mut c_void, level: LinkLogLevel) -> LinkStatus {
    if callback.is_none() {
        return log_disable();
    }
    if matches!(init_logger(), LoggerInstall::External) {
        return LinkStatus::IoError;
    }
    LOGGER.set_callback(callback, user_data);
    LOGGER.set_mode(LogMode::Callback);
    LOGGER.set_level(level);
    LinkStatus::Ok
}

pub fn log_set_level(level: LinkLogLevel) -> LinkStatus {
    match init_logger() {
        LoggerInstall::Installed => LOGGER.set_level(level),
        LoggerInstall::External => log::set_max_level(level.filter()),
    }
    LinkStatus::Ok
}

pub fn log_disable() -> LinkStatus {
    match init_logger() {
        LoggerInstall::Installed => {
            LOGGER.set_mode(LogMode::Disabled);
            LOGGER.set_level(LinkLogLevel::Off);
        }
        LoggerInstall::External => log::set_max_level(LevelFilter::Off),
    }
    LinkStatus::Ok
}
