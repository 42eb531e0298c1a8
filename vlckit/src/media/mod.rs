//! Media descriptors.

use std::ffi::CString;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use log::debug;
use percent_encoding::percent_decode_str;
use url::Url;
use vlckit_sys as ffi;

use crate::api::API;
use crate::error::{Error, ResourceKind, Result};
use crate::event_manager::EventManager;
use crate::handle::{ManagedHandle, MediaResource};
use crate::instance::Instance;
use crate::state::{MediaType, State};
use crate::time::Time;

#[cfg(test)]
mod tests;

// Schemes the engine expects without percent-encoding.
const DECODED_SCHEMES: [&str; 2] = ["sftp", "smb"];

/// A media descriptor: something a [`Player`](crate::player::Player) can play.
///
/// Cloning yields a second owner of the same native media with its own, empty event bridge. Use
/// [`duplicate`](Media::duplicate) for an independent native copy.
pub struct Media {
    events: OnceLock<EventManager>,
    handle: ManagedHandle<MediaResource>,
    instance: Instance,
}

impl fmt::Debug for Media {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Media")
            .field("handle", &self.handle)
            .field("events", &self.events.get())
            .finish()
    }
}

impl Clone for Media {
    fn clone(&self) -> Self {
        Self {
            events: OnceLock::new(),
            handle: self.handle.clone(),
            instance: self.instance.clone(),
        }
    }
}

impl Drop for Media {
    #[inline]
    fn drop(&mut self) {
        // Subscriptions go before the native reference.
        if let Some(events) = self.events.get() {
            events.unregister_all();
        }
    }
}

impl Media {
    fn from_handle(instance: &Instance, handle: ManagedHandle<MediaResource>) -> Self {
        Self {
            events: OnceLock::new(),
            handle,
            instance: instance.clone(),
        }
    }

    /// Creates a media for a location such as `"https://example.com/movie.mkv"`.
    pub fn new_location(instance: &Instance, location: &str) -> Result<Self> {
        let mrl = CString::new(location)?;
        let ptr = unsafe { instance.api().media_new_location(instance.ptr(), mrl.as_ptr()) };
        let handle = unsafe { ManagedHandle::adopt(instance.api(), ptr)? };
        debug!("created media for {}", location);
        Ok(Self::from_handle(instance, handle))
    }

    /// Creates a media for a local file.
    pub fn new_path<P: AsRef<Path>>(instance: &Instance, path: P) -> Result<Self> {
        let path = path.as_ref();
        let path = path
            .to_str()
            .ok_or_else(|| Error::InvalidLocation(path.display().to_string()))?;
        let cpath = CString::new(path)?;
        let ptr = unsafe { instance.api().media_new_path(instance.ptr(), cpath.as_ptr()) };
        let handle = unsafe { ManagedHandle::adopt(instance.api(), ptr)? };
        debug!("created media for path {}", path);
        Ok(Self::from_handle(instance, handle))
    }

    /// Creates a media for `url`.
    ///
    /// `sftp` and `smb` locations are handed to the engine percent-decoded.
    pub fn from_url(instance: &Instance, url: &Url) -> Result<Self> {
        if DECODED_SCHEMES.contains(&url.scheme()) {
            let decoded = percent_decode_str(url.as_str())
                .decode_utf8()
                .map_err(|_| Error::InvalidLocation(url.to_string()))?;
            Self::new_location(instance, &decoded)
        } else {
            Self::new_location(instance, url.as_str())
        }
    }

    /// Creates a media for `location`, either a URL such as `"smb://host/share/movie.mkv"` or a
    /// local path.
    pub fn open(instance: &Instance, location: &str) -> Result<Self> {
        match Url::parse(location) {
            // Single letter schemes are Windows drive letters.
            Ok(url) if url.scheme().len() > 1 => Self::from_url(instance, &url),
            _ => Self::new_path(instance, location),
        }
    }

    /// Creates an independent native copy of this media, with its own event bridge.
    pub fn duplicate(&self) -> Result<Self> {
        let ptr = unsafe { self.api().media_duplicate(self.ptr()) };
        let handle = unsafe { ManagedHandle::adopt(self.api(), ptr)? };
        Ok(Self::from_handle(&self.instance, handle))
    }

    /// The media resource locator.
    pub fn mrl(&self) -> Option<String> {
        unsafe {
            let ptr = self.api().media_get_mrl(self.ptr());
            if ptr.is_null() {
                return None;
            }
            let mrl = crate::api::owned_string(ptr);
            self.api().free(ptr.cast());
            mrl
        }
    }

    pub fn media_type(&self) -> MediaType {
        MediaType::from(unsafe { self.api().media_get_type(self.ptr()) })
    }

    pub fn state(&self) -> State {
        State::from(unsafe { self.api().media_get_state(self.ptr()) })
    }

    /// The duration, `None` until the engine knows it.
    pub fn duration(&self) -> Option<Time> {
        Time::from_raw(unsafe { self.api().media_get_duration(self.ptr()) })
    }

    /// The event bridge of this media, created on first use.
    pub fn event_manager(&self) -> Result<&EventManager> {
        if let Some(events) = self.events.get() {
            return Ok(events);
        }
        let manager = unsafe {
            let ptr = self.api().media_event_manager(self.ptr());
            EventManager::from_ptr(self.api(), ptr, ResourceKind::Media)?
        };
        // A racing thread may have won; its bridge is the one kept.
        Ok(self.events.get_or_init(|| manager))
    }

    /// The instance this media was created from.
    #[inline]
    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    #[inline]
    fn api(&self) -> API {
        self.handle.api()
    }

    /// Returns the underlying pointer.
    #[inline]
    pub(crate) fn ptr(&self) -> *mut ffi::libvlc_media_t {
        self.handle.ptr()
    }
}
