//! Low level libvlc bindings to Rust
//!
//! This crate provides the raw unsafe ABI of libvlc 3.x: opaque handle types, callback
//! signatures, event and state constants, and [`VLCAPI`], a table of the entry points the safe
//! wrapper calls through.
//! For a safe wrapper, see [vlckit](https://crates.io/crates/vlckit).
//!
//! ## Feature Flags
//!
//! - **`libvlc-functions`** - Links to libvlc and exposes [`LIBVLC_API`], a table built from the
//!   real libvlc symbols. Set `LIBVLC_LIB_DIR` to point the linker at a non-standard location.
//!
//! Without the feature nothing is linked, and the table has to be provided by the embedder
//! (for example an instrumented fake engine in tests).

#![allow(non_upper_case_globals)]
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(clippy::missing_safety_doc)]

use std::os::raw::{c_char, c_float, c_int, c_uint, c_void};

#[cfg(feature = "libvlc-functions")]
mod functions;
#[cfg(feature = "libvlc-functions")]
pub use functions::*;

/// An engine instance.
#[repr(C)]
pub struct libvlc_instance_t {
    _private: [u8; 0],
}

/// A media descriptor.
#[repr(C)]
pub struct libvlc_media_t {
    _private: [u8; 0],
}

/// A media player.
#[repr(C)]
pub struct libvlc_media_player_t {
    _private: [u8; 0],
}

/// The event manager of a media or a media player. It is not reference counted and lives as long
/// as the object it belongs to.
#[repr(C)]
pub struct libvlc_event_manager_t {
    _private: [u8; 0],
}

/// The context of a log message, only valid while the log callback runs.
#[repr(C)]
pub struct libvlc_log_t {
    _private: [u8; 0],
}

/// Milliseconds.
pub type libvlc_time_t = i64;

/// `va_list` as a parameter. Every supported ABI passes it as a single pointer.
pub type va_list = *mut c_void;

pub type libvlc_event_type_t = c_int;

/// A native event as handed to a [`libvlc_callback_t`].
///
/// Only the header fields are stable across event kinds; `u` holds the kind-specific payload.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct libvlc_event_t {
    pub type_: libvlc_event_type_t,
    pub p_obj: *mut c_void,
    pub u: libvlc_event_payload,
}

#[repr(C)]
#[derive(Clone, Copy)]
pub union libvlc_event_payload {
    pub new_state: c_int,
    pub new_time: libvlc_time_t,
    pub new_position: c_float,
    pub new_length: libvlc_time_t,
    pub new_duration: i64,
    pub _reserved: [*mut c_void; 4],
}

pub type libvlc_callback_t =
    Option<unsafe extern "C" fn(p_event: *const libvlc_event_t, p_data: *mut c_void)>;

pub type libvlc_log_cb = Option<
    unsafe extern "C" fn(
        data: *mut c_void,
        level: c_int,
        ctx: *const libvlc_log_t,
        fmt: *const c_char,
        args: va_list,
    ),
>;

// libvlc_event_e
pub const libvlc_MediaMetaChanged: libvlc_event_type_t = 0;
pub const libvlc_MediaSubItemAdded: libvlc_event_type_t = 1;
pub const libvlc_MediaDurationChanged: libvlc_event_type_t = 2;
pub const libvlc_MediaParsedChanged: libvlc_event_type_t = 3;
pub const libvlc_MediaFreed: libvlc_event_type_t = 4;
pub const libvlc_MediaStateChanged: libvlc_event_type_t = 5;
pub const libvlc_MediaSubItemTreeAdded: libvlc_event_type_t = 6;

pub const libvlc_MediaPlayerMediaChanged: libvlc_event_type_t = 0x100;
pub const libvlc_MediaPlayerNothingSpecial: libvlc_event_type_t = 0x101;
pub const libvlc_MediaPlayerOpening: libvlc_event_type_t = 0x102;
pub const libvlc_MediaPlayerBuffering: libvlc_event_type_t = 0x103;
pub const libvlc_MediaPlayerPlaying: libvlc_event_type_t = 0x104;
pub const libvlc_MediaPlayerPaused: libvlc_event_type_t = 0x105;
pub const libvlc_MediaPlayerStopped: libvlc_event_type_t = 0x106;
pub const libvlc_MediaPlayerForward: libvlc_event_type_t = 0x107;
pub const libvlc_MediaPlayerBackward: libvlc_event_type_t = 0x108;
pub const libvlc_MediaPlayerEndReached: libvlc_event_type_t = 0x109;
pub const libvlc_MediaPlayerEncounteredError: libvlc_event_type_t = 0x10a;
pub const libvlc_MediaPlayerTimeChanged: libvlc_event_type_t = 0x10b;
pub const libvlc_MediaPlayerPositionChanged: libvlc_event_type_t = 0x10c;
pub const libvlc_MediaPlayerSeekableChanged: libvlc_event_type_t = 0x10d;
pub const libvlc_MediaPlayerPausableChanged: libvlc_event_type_t = 0x10e;
pub const libvlc_MediaPlayerTitleChanged: libvlc_event_type_t = 0x10f;
pub const libvlc_MediaPlayerSnapshotTaken: libvlc_event_type_t = 0x110;
pub const libvlc_MediaPlayerLengthChanged: libvlc_event_type_t = 0x111;
pub const libvlc_MediaPlayerVout: libvlc_event_type_t = 0x112;
pub const libvlc_MediaPlayerScrambledChanged: libvlc_event_type_t = 0x113;
pub const libvlc_MediaPlayerESAdded: libvlc_event_type_t = 0x114;
pub const libvlc_MediaPlayerESDeleted: libvlc_event_type_t = 0x115;
pub const libvlc_MediaPlayerESSelected: libvlc_event_type_t = 0x116;
pub const libvlc_MediaPlayerCorked: libvlc_event_type_t = 0x117;
pub const libvlc_MediaPlayerUncorked: libvlc_event_type_t = 0x118;
pub const libvlc_MediaPlayerMuted: libvlc_event_type_t = 0x119;
pub const libvlc_MediaPlayerUnmuted: libvlc_event_type_t = 0x11a;
pub const libvlc_MediaPlayerAudioVolume: libvlc_event_type_t = 0x11b;
pub const libvlc_MediaPlayerAudioDevice: libvlc_event_type_t = 0x11c;
pub const libvlc_MediaPlayerChapterChanged: libvlc_event_type_t = 0x11d;

pub const libvlc_MediaListItemAdded: libvlc_event_type_t = 0x200;
pub const libvlc_MediaListWillAddItem: libvlc_event_type_t = 0x201;
pub const libvlc_MediaListItemDeleted: libvlc_event_type_t = 0x202;
pub const libvlc_MediaListWillDeleteItem: libvlc_event_type_t = 0x203;
pub const libvlc_MediaListEndReached: libvlc_event_type_t = 0x204;

pub const libvlc_MediaListViewItemAdded: libvlc_event_type_t = 0x300;
pub const libvlc_MediaListViewWillAddItem: libvlc_event_type_t = 0x301;
pub const libvlc_MediaListViewItemDeleted: libvlc_event_type_t = 0x302;
pub const libvlc_MediaListViewWillDeleteItem: libvlc_event_type_t = 0x303;

pub const libvlc_MediaListPlayerPlayed: libvlc_event_type_t = 0x400;
pub const libvlc_MediaListPlayerNextItemSet: libvlc_event_type_t = 0x401;
pub const libvlc_MediaListPlayerStopped: libvlc_event_type_t = 0x402;

pub const libvlc_MediaDiscovererStarted: libvlc_event_type_t = 0x500;
pub const libvlc_MediaDiscovererEnded: libvlc_event_type_t = 0x501;
pub const libvlc_RendererDiscovererItemAdded: libvlc_event_type_t = 0x502;
pub const libvlc_RendererDiscovererItemDeleted: libvlc_event_type_t = 0x503;

pub const libvlc_VlmMediaAdded: libvlc_event_type_t = 0x600;
pub const libvlc_VlmMediaRemoved: libvlc_event_type_t = 0x601;
pub const libvlc_VlmMediaChanged: libvlc_event_type_t = 0x602;
pub const libvlc_VlmMediaInstanceStarted: libvlc_event_type_t = 0x603;
pub const libvlc_VlmMediaInstanceStopped: libvlc_event_type_t = 0x604;
pub const libvlc_VlmMediaInstanceStatusInit: libvlc_event_type_t = 0x605;
pub const libvlc_VlmMediaInstanceStatusOpening: libvlc_event_type_t = 0x606;
pub const libvlc_VlmMediaInstanceStatusPlaying: libvlc_event_type_t = 0x607;
pub const libvlc_VlmMediaInstanceStatusPause: libvlc_event_type_t = 0x608;
pub const libvlc_VlmMediaInstanceStatusEnd: libvlc_event_type_t = 0x609;
pub const libvlc_VlmMediaInstanceStatusError: libvlc_event_type_t = 0x60a;

// libvlc_state_t
pub type libvlc_state_t = c_int;
pub const libvlc_NothingSpecial: libvlc_state_t = 0;
pub const libvlc_Opening: libvlc_state_t = 1;
pub const libvlc_Buffering: libvlc_state_t = 2;
pub const libvlc_Playing: libvlc_state_t = 3;
pub const libvlc_Paused: libvlc_state_t = 4;
pub const libvlc_Stopped: libvlc_state_t = 5;
pub const libvlc_Ended: libvlc_state_t = 6;
pub const libvlc_Error: libvlc_state_t = 7;

// libvlc_media_type_t
pub type libvlc_media_type_t = c_int;
pub const libvlc_media_type_unknown: libvlc_media_type_t = 0;
pub const libvlc_media_type_file: libvlc_media_type_t = 1;
pub const libvlc_media_type_directory: libvlc_media_type_t = 2;
pub const libvlc_media_type_disc: libvlc_media_type_t = 3;
pub const libvlc_media_type_stream: libvlc_media_type_t = 4;
pub const libvlc_media_type_playlist: libvlc_media_type_t = 5;

// libvlc_log_level
pub const LIBVLC_DEBUG: c_int = 0;
pub const LIBVLC_NOTICE: c_int = 2;
pub const LIBVLC_WARNING: c_int = 3;
pub const LIBVLC_ERROR: c_int = 4;

// libvlc_audio_output_channel_t
pub const libvlc_AudioChannel_Error: c_int = -1;
pub const libvlc_AudioChannel_Stereo: c_int = 1;
pub const libvlc_AudioChannel_RStereo: c_int = 2;
pub const libvlc_AudioChannel_Left: c_int = 3;
pub const libvlc_AudioChannel_Right: c_int = 4;
pub const libvlc_AudioChannel_Dolbys: c_int = 5;

/// The table of engine entry points.
///
/// Every field has exactly the signature of the libvlc function of the same name (without the
/// `libvlc_` prefix), except `vsnprintf`, which formats log messages and is the C library's
/// `vsnprintf` when linked against the real engine.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct VLCAPI {
    pub new: unsafe extern "C" fn(argc: c_int, argv: *const *const c_char) -> *mut libvlc_instance_t,
    pub retain: unsafe extern "C" fn(p_instance: *mut libvlc_instance_t),
    pub release: unsafe extern "C" fn(p_instance: *mut libvlc_instance_t),
    pub get_version: unsafe extern "C" fn() -> *const c_char,
    pub get_compiler: unsafe extern "C" fn() -> *const c_char,
    pub get_changeset: unsafe extern "C" fn() -> *const c_char,
    pub free: unsafe extern "C" fn(ptr: *mut c_void),
    pub set_user_agent:
        unsafe extern "C" fn(p_instance: *mut libvlc_instance_t, name: *const c_char, http: *const c_char),
    pub set_app_id: unsafe extern "C" fn(
        p_instance: *mut libvlc_instance_t,
        id: *const c_char,
        version: *const c_char,
        icon: *const c_char,
    ),

    pub log_set:
        unsafe extern "C" fn(p_instance: *mut libvlc_instance_t, cb: libvlc_log_cb, data: *mut c_void),
    pub log_unset: unsafe extern "C" fn(p_instance: *mut libvlc_instance_t),
    pub log_get_context: unsafe extern "C" fn(
        ctx: *const libvlc_log_t,
        module: *mut *const c_char,
        file: *mut *const c_char,
        line: *mut c_uint,
    ),
    pub log_get_object: unsafe extern "C" fn(
        ctx: *const libvlc_log_t,
        name: *mut *const c_char,
        header: *mut *const c_char,
        id: *mut usize,
    ),
    pub vsnprintf:
        unsafe extern "C" fn(buf: *mut c_char, size: usize, fmt: *const c_char, args: va_list) -> c_int,

    pub event_attach: unsafe extern "C" fn(
        p_event_manager: *mut libvlc_event_manager_t,
        i_event_type: libvlc_event_type_t,
        f_callback: libvlc_callback_t,
        user_data: *mut c_void,
    ) -> c_int,
    pub event_detach: unsafe extern "C" fn(
        p_event_manager: *mut libvlc_event_manager_t,
        i_event_type: libvlc_event_type_t,
        f_callback: libvlc_callback_t,
        p_user_data: *mut c_void,
    ),
    pub event_type_name: unsafe extern "C" fn(event_type: libvlc_event_type_t) -> *const c_char,

    pub media_new_location:
        unsafe extern "C" fn(p_instance: *mut libvlc_instance_t, psz_mrl: *const c_char) -> *mut libvlc_media_t,
    pub media_new_path:
        unsafe extern "C" fn(p_instance: *mut libvlc_instance_t, path: *const c_char) -> *mut libvlc_media_t,
    pub media_retain: unsafe extern "C" fn(p_md: *mut libvlc_media_t),
    pub media_release: unsafe extern "C" fn(p_md: *mut libvlc_media_t),
    pub media_duplicate: unsafe extern "C" fn(p_md: *mut libvlc_media_t) -> *mut libvlc_media_t,
    pub media_get_mrl: unsafe extern "C" fn(p_md: *mut libvlc_media_t) -> *mut c_char,
    pub media_get_state: unsafe extern "C" fn(p_md: *mut libvlc_media_t) -> libvlc_state_t,
    pub media_get_type: unsafe extern "C" fn(p_md: *mut libvlc_media_t) -> libvlc_media_type_t,
    pub media_get_duration: unsafe extern "C" fn(p_md: *mut libvlc_media_t) -> libvlc_time_t,
    pub media_event_manager:
        unsafe extern "C" fn(p_md: *mut libvlc_media_t) -> *mut libvlc_event_manager_t,

    pub media_player_new:
        unsafe extern "C" fn(p_libvlc_instance: *mut libvlc_instance_t) -> *mut libvlc_media_player_t,
    pub media_player_new_from_media:
        unsafe extern "C" fn(p_md: *mut libvlc_media_t) -> *mut libvlc_media_player_t,
    pub media_player_retain: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t),
    pub media_player_release: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t),
    pub media_player_set_media:
        unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t, p_md: *mut libvlc_media_t),
    pub media_player_event_manager:
        unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> *mut libvlc_event_manager_t,
    pub media_player_is_playing: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,
    pub media_player_will_play: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,
    pub media_player_play: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,
    pub media_player_pause: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t),
    pub media_player_set_pause: unsafe extern "C" fn(mp: *mut libvlc_media_player_t, do_pause: c_int),
    pub media_player_stop: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t),
    pub media_player_get_state: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> libvlc_state_t,
    pub media_player_get_time: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> libvlc_time_t,
    pub media_player_set_time: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t, i_time: libvlc_time_t),
    pub media_player_get_length: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> libvlc_time_t,
    pub media_player_get_position: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_float,
    pub media_player_set_position: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t, f_pos: c_float),
    pub media_player_get_rate: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_float,
    pub media_player_set_rate: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t, rate: c_float) -> c_int,
    pub media_player_is_seekable: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,
    pub media_player_can_pause: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,

    pub audio_get_volume: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,
    pub audio_set_volume: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t, i_volume: c_int) -> c_int,
    pub audio_get_mute: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,
    pub audio_set_mute: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t, status: c_int),
    pub audio_get_channel: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,
    pub audio_set_channel: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t, channel: c_int) -> c_int,
    pub audio_get_track_count: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,
    pub audio_get_track: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t) -> c_int,
    pub audio_set_track: unsafe extern "C" fn(p_mi: *mut libvlc_media_player_t, i_track: c_int) -> c_int,
}

/// Makes a libvlc compatible version integer
///
/// # Example
/// ```
/// use vlckit_sys::version;
/// let v = version!(3, 0, 20);
/// assert!(v == 0x0300_1400);
/// ```
#[macro_export]
macro_rules! version {
    ($major:expr, $minor:expr, $revision:expr) => {
        (($major) << 24) | (($minor) << 16) | (($revision) << 8)
    };
}

/// The libvlc ABI generation these bindings describe.
pub const LIBVLC_ABI_VERSION: i32 = version!(3, 0, 0);
