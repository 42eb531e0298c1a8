//! Reference-counted ownership of native objects.

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use log::trace;
use vlckit_sys as ffi;

use crate::api::API;
use crate::error::{Error, ResourceKind, Result};

/// The retain/release pair of one kind of native object.
pub(crate) trait Resource {
    type Raw;
    const KIND: ResourceKind;

    unsafe fn retain(api: API, ptr: *mut Self::Raw);
    unsafe fn release(api: API, ptr: *mut Self::Raw);
}

#[derive(Debug)]
pub(crate) struct InstanceResource;

impl Resource for InstanceResource {
    type Raw = ffi::libvlc_instance_t;
    const KIND: ResourceKind = ResourceKind::Instance;

    #[inline]
    unsafe fn retain(api: API, ptr: *mut Self::Raw) {
        api.retain(ptr)
    }

    #[inline]
    unsafe fn release(api: API, ptr: *mut Self::Raw) {
        api.release(ptr)
    }
}

#[derive(Debug)]
pub(crate) struct MediaResource;

impl Resource for MediaResource {
    type Raw = ffi::libvlc_media_t;
    const KIND: ResourceKind = ResourceKind::Media;

    #[inline]
    unsafe fn retain(api: API, ptr: *mut Self::Raw) {
        api.media_retain(ptr)
    }

    #[inline]
    unsafe fn release(api: API, ptr: *mut Self::Raw) {
        api.media_release(ptr)
    }
}

#[derive(Debug)]
pub(crate) struct PlayerResource;

impl Resource for PlayerResource {
    type Raw = ffi::libvlc_media_player_t;
    const KIND: ResourceKind = ResourceKind::Player;

    #[inline]
    unsafe fn retain(api: API, ptr: *mut Self::Raw) {
        api.media_player_retain(ptr)
    }

    #[inline]
    unsafe fn release(api: API, ptr: *mut Self::Raw) {
        api.media_player_release(ptr)
    }
}

/// Owns exactly one native reference to an engine object.
///
/// The guard contributes one retain for as long as it lives and gives it back on drop. Cloning
/// creates a second, independent owner of the same object.
pub(crate) struct ManagedHandle<R: Resource> {
    api: API,
    handle: NonNull<R::Raw>,
    _resource: PhantomData<R>,
}

// The engine's objects are internally synchronized and may be released from any thread.
unsafe impl<R: Resource> Send for ManagedHandle<R> {}
unsafe impl<R: Resource> Sync for ManagedHandle<R> {}

impl<R: Resource> fmt::Debug for ManagedHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ManagedHandle")
            .field("kind", &R::KIND)
            .field("handle", &self.handle)
            .finish()
    }
}

impl<R: Resource> ManagedHandle<R> {
    /// Takes over the reference a native constructor handed out.
    ///
    /// # Safety
    /// `ptr` must be null or a live object of kind `R` carrying one reference that nobody else
    /// will release.
    #[inline]
    pub(crate) unsafe fn adopt(api: API, ptr: *mut R::Raw) -> Result<Self> {
        let handle = NonNull::new(ptr).ok_or(Error::ResourceUnavailable(R::KIND))?;
        trace!("adopted {} {:p}", R::KIND, ptr);
        Ok(Self {
            api,
            handle,
            _resource: PhantomData,
        })
    }

    /// Retains a borrowed object on behalf of the new guard.
    ///
    /// # Safety
    /// `ptr` must be null or a live object of kind `R`.
    #[inline]
    pub(crate) unsafe fn wrap(api: API, ptr: *mut R::Raw) -> Result<Self> {
        let handle = NonNull::new(ptr).ok_or(Error::ResourceUnavailable(R::KIND))?;
        R::retain(api, ptr);
        trace!("retained {} {:p}", R::KIND, ptr);
        Ok(Self {
            api,
            handle,
            _resource: PhantomData,
        })
    }

    /// Returns the underlying pointer.
    #[inline]
    pub(crate) fn ptr(&self) -> *mut R::Raw {
        self.handle.as_ptr()
    }

    #[inline]
    pub(crate) fn api(&self) -> API {
        self.api
    }
}

impl<R: Resource> Clone for ManagedHandle<R> {
    #[inline]
    fn clone(&self) -> Self {
        unsafe { R::retain(self.api, self.handle.as_ptr()) };
        trace!("retained {} {:p}", R::KIND, self.handle);
        Self {
            api: self.api,
            handle: self.handle,
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> Drop for ManagedHandle<R> {
    #[inline]
    fn drop(&mut self) {
        trace!("releasing {} {:p}", R::KIND, self.handle);
        unsafe { R::release(self.api, self.handle.as_ptr()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{self, Call};

    fn fake_media(api: API, instance: *mut ffi::libvlc_instance_t) -> *mut ffi::libvlc_media_t {
        unsafe { api.media_new_location(instance, b"file:///tmp/a.mkv\0".as_ptr().cast()) }
    }

    #[test]
    fn test_adopt_releases_once() {
        let api = mock::api();
        let instance = unsafe { ManagedHandle::<InstanceResource>::adopt(api, api.new_instance(&[])) }
            .unwrap();
        let journal = unsafe { mock::journal_of(instance.ptr()) };
        let raw = fake_media(api, instance.ptr());
        let id = unsafe { mock::id_of(raw) };

        let media = unsafe { ManagedHandle::<MediaResource>::adopt(api, raw) }.unwrap();
        assert_eq!(journal.ref_count(id), 1);
        drop(media);

        assert!(journal.is_freed(id));
        assert_eq!(journal.count(|c| *c == Call::Retain(id)), 0);
        assert_eq!(journal.count(|c| *c == Call::Release(id)), 1);
        assert!(journal.violations().is_empty());
    }

    #[test]
    fn test_wrap_and_clone_balance() {
        let api = mock::api();
        let instance = unsafe { ManagedHandle::<InstanceResource>::adopt(api, api.new_instance(&[])) }
            .unwrap();
        let journal = unsafe { mock::journal_of(instance.ptr()) };
        let raw = fake_media(api, instance.ptr());
        let id = unsafe { mock::id_of(raw) };

        let wrapped = unsafe { ManagedHandle::<MediaResource>::wrap(api, raw) }.unwrap();
        assert_eq!(journal.ref_count(id), 2);
        let cloned = wrapped.clone();
        assert_eq!(journal.ref_count(id), 3);
        assert_eq!(cloned.ptr(), wrapped.ptr());

        drop(wrapped);
        drop(cloned);
        assert_eq!(journal.ref_count(id), 1);

        // The constructor's own reference.
        unsafe { api.media_release(raw) };
        assert!(journal.is_freed(id));
        assert!(journal.violations().is_empty());
    }

    #[test]
    fn test_null_is_unavailable() {
        let api = mock::api();
        let err = unsafe {
            ManagedHandle::<PlayerResource>::adopt(api, std::ptr::null_mut())
        }
        .unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable(ResourceKind::Player)));

        let err =
            unsafe { ManagedHandle::<MediaResource>::wrap(api, std::ptr::null_mut()) }.unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable(ResourceKind::Media)));
    }
}
