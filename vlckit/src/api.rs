//! Module for calling into the native engine
use std::ffi::{c_char, c_float, c_int, c_uint, c_void, CStr};
use std::fmt;

use vlckit_sys as ffi;

use crate::event::EventType;

/// A handle to an engine entry point table.
///
/// Every wrapper carries the `API` it was created with, so objects from different tables (the
/// linked libvlc and a fake engine, say) never mix.
#[derive(Clone, Copy)]
pub struct API {
    table: &'static ffi::VLCAPI,
}

impl fmt::Debug for API {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("API")
            .field("table", &(self.table as *const ffi::VLCAPI))
            .finish()
    }
}

impl PartialEq for API {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.table, other.table)
    }
}

impl Eq for API {}

// Macros for implementing the many one-handle passthroughs.
macro_rules! passthrough {
    ($name:ident($handle:ty) -> $rv:ty) => {
        #[inline]
        pub(crate) unsafe fn $name(self, handle: *mut $handle) -> $rv {
            (self.table.$name)(handle)
        }
    };
    ($name:ident($handle:ty, $arg:ty) -> $rv:ty) => {
        #[inline]
        pub(crate) unsafe fn $name(self, handle: *mut $handle, value: $arg) -> $rv {
            (self.table.$name)(handle, value)
        }
    };
}

impl API {
    /// Returns the API of the linked libvlc.
    #[cfg(feature = "libvlc-functions")]
    #[inline]
    pub fn get() -> Self {
        Self {
            table: &ffi::LIBVLC_API,
        }
    }

    /// Wraps a custom entry point table.
    ///
    /// Every entry of `table` must honour the libvlc contract of the function of the same name.
    #[inline]
    pub const fn from_table(table: &'static ffi::VLCAPI) -> Self {
        Self { table }
    }

    /// The engine version, e.g. "3.0.20 Vetinari".
    pub fn version(&self) -> String {
        unsafe { owned_string((self.table.get_version)()) }.unwrap_or_default()
    }

    /// The compiler the engine was built with.
    pub fn compiler(&self) -> String {
        unsafe { owned_string((self.table.get_compiler)()) }.unwrap_or_default()
    }

    /// The engine changeset, e.g. "aa9bce0bc4".
    pub fn changeset(&self) -> String {
        unsafe { owned_string((self.table.get_changeset)()) }.unwrap_or_default()
    }

    pub(crate) unsafe fn new_instance(self, argv: &[*const c_char]) -> *mut ffi::libvlc_instance_t {
        (self.table.new)(argv.len() as c_int, argv.as_ptr())
    }

    passthrough!(retain(ffi::libvlc_instance_t) -> ());
    passthrough!(release(ffi::libvlc_instance_t) -> ());
    passthrough!(log_unset(ffi::libvlc_instance_t) -> ());

    pub(crate) unsafe fn free(self, ptr: *mut c_void) {
        (self.table.free)(ptr)
    }

    pub(crate) unsafe fn set_user_agent(
        self,
        instance: *mut ffi::libvlc_instance_t,
        name: *const c_char,
        http: *const c_char,
    ) {
        (self.table.set_user_agent)(instance, name, http)
    }

    pub(crate) unsafe fn set_app_id(
        self,
        instance: *mut ffi::libvlc_instance_t,
        id: *const c_char,
        version: *const c_char,
        icon: *const c_char,
    ) {
        (self.table.set_app_id)(instance, id, version, icon)
    }

    pub(crate) unsafe fn log_set(
        self,
        instance: *mut ffi::libvlc_instance_t,
        callback: ffi::libvlc_log_cb,
        data: *mut c_void,
    ) {
        (self.table.log_set)(instance, callback, data)
    }

    pub(crate) unsafe fn log_get_context(
        self,
        ctx: *const ffi::libvlc_log_t,
    ) -> (*const c_char, *const c_char, c_uint) {
        let mut module = std::ptr::null();
        let mut file = std::ptr::null();
        let mut line = 0;
        (self.table.log_get_context)(ctx, &mut module, &mut file, &mut line);
        (module, file, line)
    }

    pub(crate) unsafe fn log_get_object(
        self,
        ctx: *const ffi::libvlc_log_t,
    ) -> (*const c_char, *const c_char, usize) {
        let mut name = std::ptr::null();
        let mut header = std::ptr::null();
        let mut id = 0;
        (self.table.log_get_object)(ctx, &mut name, &mut header, &mut id);
        (name, header, id)
    }

    pub(crate) unsafe fn vsnprintf(
        self,
        buf: &mut [u8],
        fmt: *const c_char,
        args: ffi::va_list,
    ) -> c_int {
        (self.table.vsnprintf)(buf.as_mut_ptr() as *mut c_char, buf.len(), fmt, args)
    }

    pub(crate) unsafe fn event_attach(
        self,
        manager: *mut ffi::libvlc_event_manager_t,
        event: ffi::libvlc_event_type_t,
        callback: ffi::libvlc_callback_t,
        user_data: *mut c_void,
    ) -> c_int {
        (self.table.event_attach)(manager, event, callback, user_data)
    }

    pub(crate) unsafe fn event_detach(
        self,
        manager: *mut ffi::libvlc_event_manager_t,
        event: ffi::libvlc_event_type_t,
        callback: ffi::libvlc_callback_t,
        user_data: *mut c_void,
    ) {
        (self.table.event_detach)(manager, event, callback, user_data)
    }

    /// The engine's name for an event kind, e.g. "MediaPlayerEndReached".
    pub fn event_type_name(&self, event: EventType) -> Option<String> {
        unsafe { owned_string((self.table.event_type_name)(event.into_raw())) }
    }

    pub(crate) unsafe fn media_new_location(
        self,
        instance: *mut ffi::libvlc_instance_t,
        mrl: *const c_char,
    ) -> *mut ffi::libvlc_media_t {
        (self.table.media_new_location)(instance, mrl)
    }

    pub(crate) unsafe fn media_new_path(
        self,
        instance: *mut ffi::libvlc_instance_t,
        path: *const c_char,
    ) -> *mut ffi::libvlc_media_t {
        (self.table.media_new_path)(instance, path)
    }

    passthrough!(media_retain(ffi::libvlc_media_t) -> ());
    passthrough!(media_release(ffi::libvlc_media_t) -> ());
    passthrough!(media_duplicate(ffi::libvlc_media_t) -> *mut ffi::libvlc_media_t);
    passthrough!(media_get_mrl(ffi::libvlc_media_t) -> *mut c_char);
    passthrough!(media_get_state(ffi::libvlc_media_t) -> ffi::libvlc_state_t);
    passthrough!(media_get_type(ffi::libvlc_media_t) -> ffi::libvlc_media_type_t);
    passthrough!(media_get_duration(ffi::libvlc_media_t) -> ffi::libvlc_time_t);
    passthrough!(media_event_manager(ffi::libvlc_media_t) -> *mut ffi::libvlc_event_manager_t);

    passthrough!(media_player_new(ffi::libvlc_instance_t) -> *mut ffi::libvlc_media_player_t);
    passthrough!(media_player_new_from_media(ffi::libvlc_media_t) -> *mut ffi::libvlc_media_player_t);
    passthrough!(media_player_retain(ffi::libvlc_media_player_t) -> ());
    passthrough!(media_player_release(ffi::libvlc_media_player_t) -> ());
    passthrough!(media_player_set_media(ffi::libvlc_media_player_t, *mut ffi::libvlc_media_t) -> ());
    passthrough!(media_player_event_manager(ffi::libvlc_media_player_t) -> *mut ffi::libvlc_event_manager_t);
    passthrough!(media_player_is_playing(ffi::libvlc_media_player_t) -> c_int);
    passthrough!(media_player_will_play(ffi::libvlc_media_player_t) -> c_int);
    passthrough!(media_player_play(ffi::libvlc_media_player_t) -> c_int);
    passthrough!(media_player_pause(ffi::libvlc_media_player_t) -> ());
    passthrough!(media_player_set_pause(ffi::libvlc_media_player_t, c_int) -> ());
    passthrough!(media_player_stop(ffi::libvlc_media_player_t) -> ());
    passthrough!(media_player_get_state(ffi::libvlc_media_player_t) -> ffi::libvlc_state_t);
    passthrough!(media_player_get_time(ffi::libvlc_media_player_t) -> ffi::libvlc_time_t);
    passthrough!(media_player_set_time(ffi::libvlc_media_player_t, ffi::libvlc_time_t) -> ());
    passthrough!(media_player_get_length(ffi::libvlc_media_player_t) -> ffi::libvlc_time_t);
    passthrough!(media_player_get_position(ffi::libvlc_media_player_t) -> c_float);
    passthrough!(media_player_set_position(ffi::libvlc_media_player_t, c_float) -> ());
    passthrough!(media_player_get_rate(ffi::libvlc_media_player_t) -> c_float);
    passthrough!(media_player_set_rate(ffi::libvlc_media_player_t, c_float) -> c_int);
    passthrough!(media_player_is_seekable(ffi::libvlc_media_player_t) -> c_int);
    passthrough!(media_player_can_pause(ffi::libvlc_media_player_t) -> c_int);

    passthrough!(audio_get_volume(ffi::libvlc_media_player_t) -> c_int);
    passthrough!(audio_set_volume(ffi::libvlc_media_player_t, c_int) -> c_int);
    passthrough!(audio_get_mute(ffi::libvlc_media_player_t) -> c_int);
    passthrough!(audio_set_mute(ffi::libvlc_media_player_t, c_int) -> ());
    passthrough!(audio_get_channel(ffi::libvlc_media_player_t) -> c_int);
    passthrough!(audio_set_channel(ffi::libvlc_media_player_t, c_int) -> c_int);
    passthrough!(audio_get_track_count(ffi::libvlc_media_player_t) -> c_int);
    passthrough!(audio_get_track(ffi::libvlc_media_player_t) -> c_int);
    passthrough!(audio_set_track(ffi::libvlc_media_player_t, c_int) -> c_int);
}

/// Copies a borrowed, nul-terminated engine string.
///
/// # Safety
/// `ptr` must be null or point to a valid C string.
#[inline]
pub(crate) unsafe fn owned_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}
