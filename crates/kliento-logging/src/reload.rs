//! Dynamic log level reloading support

use crate::subscriber::level_filter;
use kliento_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::reload;

type FilterHandle = reload::Handle<LevelFilter, tracing_subscriber::Registry>;

/// Handle for dynamically reloading the log level filter
pub struct ReloadHandle {
    handle: Mutex<Option<FilterHandle>>,
    level: Mutex<Option<LogLevel>>,
}

impl ReloadHandle {
    /// Create a new reload handle
    pub fn new() -> Self {
        Self {
            handle: Mutex::new(None),
            level: Mutex::new(None),
        }
    }

    /// Get the global reload handle
    pub fn global() -> &'static ReloadHandle {
        static INSTANCE: OnceCell<ReloadHandle> = OnceCell::new();
        INSTANCE.get_or_init(ReloadHandle::new)
    }

    /// Set the reload handle (called during initialization)
    pub(crate) fn set_handle(&self, handle: FilterHandle, level: LogLevel) {
        *self.handle.lock() = Some(handle);
        *self.level.lock() = Some(level);
    }

    /// Whether a subscriber has been installed through this handle
    pub fn is_initialized(&self) -> bool {
        self.handle.lock().is_some()
    }

    /// Level most recently applied, if initialized
    pub fn current_level(&self) -> Option<LogLevel> {
        *self.level.lock()
    }

    /// Reload the filter to use a new log level
    pub fn reload_level(&self, level: LogLevel) -> Result<(), String> {
        let guard = self.handle.lock();
        let Some(handle) = guard.as_ref() else {
            return Err("Reload handle not initialized".to_string());
        };

        handle
            .reload(level_filter(level))
            .map_err(|e| format!("Failed to reload filter: {e}"))?;
        *self.level.lock() = Some(level);
        Ok(())
    }
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}
