//! Engine log messages.
use std::ffi::{c_char, c_int, c_void, CStr};
use std::sync::{Arc, PoisonError, RwLock};
use std::{panic, process};

use log::log;
use vlckit_sys as ffi;

use crate::api::{owned_string, API};

/// The severity of an engine log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug = ffi::LIBVLC_DEBUG as isize,
    Notice = ffi::LIBVLC_NOTICE as isize,
    Warning = ffi::LIBVLC_WARNING as isize,
    Error = ffi::LIBVLC_ERROR as isize,
}

impl From<c_int> for Level {
    fn from(value: c_int) -> Self {
        match value {
            ffi::LIBVLC_NOTICE => Level::Notice,
            ffi::LIBVLC_WARNING => Level::Warning,
            ffi::LIBVLC_ERROR => Level::Error,
            _ => Level::Debug, // fallback
        }
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Debug => log::Level::Debug,
            Level::Notice => log::Level::Info,
            Level::Warning => log::Level::Warn,
            Level::Error => log::Level::Error,
        }
    }
}

/// The engine object that emitted a message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// The object type name, e.g. "input" or "decoder".
    pub name: Option<String>,
    pub header: Option<String>,
    pub id: usize,
}

/// Where in the engine's sources a message was emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DebugInfo {
    pub module: Option<String>,
    pub file: Option<String>,
    pub line: u32,
}

/// One formatted engine log message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: Level,
    pub message: String,
    pub context: Context,
    pub debug: DebugInfo,
}

/// Receives engine log messages, on arbitrary engine threads.
pub trait LogHandler: Send + Sync {
    fn handle(&self, message: &Message);
}

impl<F> LogHandler for F
where
    F: Fn(&Message) + Send + Sync,
{
    #[inline]
    fn handle(&self, message: &Message) {
        self(message)
    }
}

/// LogHandler implementation forwarding to [`log`](https://github.com/rust-lang/log), with target `vlc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl LogHandler for LogFacade {
    fn handle(&self, message: &Message) {
        let origin = message
            .debug
            .module
            .as_deref()
            .or(message.context.name.as_deref())
            .unwrap_or("core");
        let level = log::Level::from(message.level);
        log!(target: "vlc", level, "{}: {}", origin, message.message);
    }
}

// Longer messages are truncated.
const MESSAGE_CAPACITY: usize = 4096;

/// The log handler slot of an instance, shared with the engine as callback data.
pub(crate) struct LogSlot {
    api: API,
    handler: RwLock<Option<Arc<dyn LogHandler>>>,
}

impl LogSlot {
    pub(crate) fn new(api: API) -> Self {
        Self {
            api,
            handler: RwLock::new(None),
        }
    }

    pub(crate) fn set(&self, handler: Option<Arc<dyn LogHandler>>) {
        *self.handler.write().unwrap_or_else(PoisonError::into_inner) = handler;
    }

    fn get(&self) -> Option<Arc<dyn LogHandler>> {
        self.handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn is_set(&self) -> bool {
        self.get().is_some()
    }

    unsafe fn message(
        &self,
        level: c_int,
        ctx: *const ffi::libvlc_log_t,
        fmt: *const c_char,
        args: ffi::va_list,
    ) -> Message {
        let mut buf = vec![0u8; MESSAGE_CAPACITY];
        let written = self.api.vsnprintf(&mut buf, fmt, args);
        let message = if written < 0 {
            CStr::from_ptr(fmt).to_string_lossy().into_owned()
        } else {
            let len = (written as usize).min(MESSAGE_CAPACITY - 1);
            String::from_utf8_lossy(&buf[..len]).into_owned()
        };

        let (context, debug) = if ctx.is_null() {
            Default::default()
        } else {
            let (name, header, id) = self.api.log_get_object(ctx);
            let (module, file, line) = self.api.log_get_context(ctx);
            (
                Context {
                    name: owned_string(name),
                    header: owned_string(header),
                    id,
                },
                DebugInfo {
                    module: owned_string(module),
                    file: owned_string(file),
                    line,
                },
            )
        };

        Message {
            level: Level::from(level),
            message,
            context,
            debug,
        }
    }
}

// C callback function that bridges to the LogHandler of an instance.
pub(crate) unsafe extern "C" fn log_callback(
    data: *mut c_void,
    level: c_int,
    ctx: *const ffi::libvlc_log_t,
    fmt: *const c_char,
    args: ffi::va_list,
) {
    if data.is_null() || fmt.is_null() {
        return;
    }

    let closure = panic::AssertUnwindSafe(move || {
        let slot = &*(data as *const LogSlot);
        if let Some(handler) = slot.get() {
            let message = slot.message(level, ctx, fmt, args);
            handler.handle(&message);
        }
    });

    if panic::catch_unwind(closure).is_err() {
        process::abort();
    }
}
