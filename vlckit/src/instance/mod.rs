//! Engine instances.

use std::ffi::{c_char, c_void, CString};
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::api::API;
use crate::configuration::Configuration;
use crate::error::Result;
use crate::handle::{InstanceResource, ManagedHandle};
use crate::log::{log_callback, LogHandler, LogSlot};
use vlckit_sys as ffi;

#[cfg(test)]
mod tests;

struct InstanceInner {
    // Dropped before `log`, so the slot outlives the native instance.
    handle: ManagedHandle<InstanceResource>,
    log: LogSlot,
}

impl Drop for InstanceInner {
    fn drop(&mut self) {
        self.log.set(None);
        unsafe { self.handle.api().log_unset(self.handle.ptr()) };
        debug!("releasing engine instance");
    }
}

/// A running engine.
///
/// Clones share one native reference; the instance is released when the last clone, and every
/// [`Media`](crate::media::Media) and [`Player`](crate::player::Player) created from it, is gone.
#[derive(Clone)]
pub struct Instance {
    inner: Arc<InstanceInner>,
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Instance")
            .field("handle", &self.inner.handle)
            .finish()
    }
}

impl PartialEq for Instance {
    /// Whether both values share one native instance.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Instance {}

impl Instance {
    /// Starts an engine with `configuration`.
    pub fn new(api: API, configuration: &Configuration) -> Result<Self> {
        let args = configuration.to_c_args()?;
        let argv: Vec<*const c_char> = args.iter().map(|arg| arg.as_ptr()).collect();
        debug!("starting engine with {:?}", configuration.to_args());

        let handle = unsafe { ManagedHandle::adopt(api, api.new_instance(&argv))? };
        Ok(Self {
            inner: Arc::new(InstanceInner {
                handle,
                log: LogSlot::new(api),
            }),
        })
    }

    #[inline]
    pub fn api(&self) -> API {
        self.inner.handle.api()
    }

    /// Identifies the application to HTTP servers, e.g. `("FooBar player 1.2.3", "FooBar/1.2.3 Python/3.2")`.
    pub fn set_user_agent(&self, name: &str, http: &str) -> Result<()> {
        let name = CString::new(name)?;
        let http = CString::new(http)?;
        unsafe {
            self.api()
                .set_user_agent(self.ptr(), name.as_ptr(), http.as_ptr())
        };
        Ok(())
    }

    /// Sets the reverse-DNS application id, version and icon name.
    pub fn set_app_id(&self, id: &str, version: &str, icon: &str) -> Result<()> {
        let id = CString::new(id)?;
        let version = CString::new(version)?;
        let icon = CString::new(icon)?;
        unsafe {
            self.api()
                .set_app_id(self.ptr(), id.as_ptr(), version.as_ptr(), icon.as_ptr())
        };
        Ok(())
    }

    /// Routes engine log messages to `handler`, replacing any previous handler.
    ///
    /// The handler is called on engine threads.
    pub fn set_log_handler<H>(&self, handler: H)
    where
        H: LogHandler + 'static,
    {
        self.inner.log.set(Some(Arc::new(handler)));
        let data = &self.inner.log as *const LogSlot as *mut c_void;
        unsafe { self.api().log_set(self.ptr(), Some(log_callback), data) };
    }

    /// Stops routing engine log messages.
    pub fn clear_log_handler(&self) {
        unsafe { self.api().log_unset(self.ptr()) };
        self.inner.log.set(None);
    }

    pub fn has_log_handler(&self) -> bool {
        self.inner.log.is_set()
    }

    /// Returns the underlying pointer.
    #[inline]
    pub(crate) fn ptr(&self) -> *mut ffi::libvlc_instance_t {
        self.inner.handle.ptr()
    }
}
