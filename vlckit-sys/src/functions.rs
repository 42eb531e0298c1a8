//! Entry points of the linked libvlc.

use std::os::raw::{c_char, c_float, c_int, c_uint, c_void};

use crate::*;

extern "C" {
    pub fn libvlc_new(argc: c_int, argv: *const *const c_char) -> *mut libvlc_instance_t;
    pub fn libvlc_retain(p_instance: *mut libvlc_instance_t);
    pub fn libvlc_release(p_instance: *mut libvlc_instance_t);
    pub fn libvlc_get_version() -> *const c_char;
    pub fn libvlc_get_compiler() -> *const c_char;
    pub fn libvlc_get_changeset() -> *const c_char;
    pub fn libvlc_free(ptr: *mut c_void);
    pub fn libvlc_set_user_agent(
        p_instance: *mut libvlc_instance_t,
        name: *const c_char,
        http: *const c_char,
    );
    pub fn libvlc_set_app_id(
        p_instance: *mut libvlc_instance_t,
        id: *const c_char,
        version: *const c_char,
        icon: *const c_char,
    );

    pub fn libvlc_log_set(p_instance: *mut libvlc_instance_t, cb: libvlc_log_cb, data: *mut c_void);
    pub fn libvlc_log_unset(p_instance: *mut libvlc_instance_t);
    pub fn libvlc_log_get_context(
        ctx: *const libvlc_log_t,
        module: *mut *const c_char,
        file: *mut *const c_char,
        line: *mut c_uint,
    );
    pub fn libvlc_log_get_object(
        ctx: *const libvlc_log_t,
        name: *mut *const c_char,
        header: *mut *const c_char,
        id: *mut usize,
    );

    pub fn libvlc_event_attach(
        p_event_manager: *mut libvlc_event_manager_t,
        i_event_type: libvlc_event_type_t,
        f_callback: libvlc_callback_t,
        user_data: *mut c_void,
    ) -> c_int;
    pub fn libvlc_event_detach(
        p_event_manager: *mut libvlc_event_manager_t,
        i_event_type: libvlc_event_type_t,
        f_callback: libvlc_callback_t,
        p_user_data: *mut c_void,
    );
    pub fn libvlc_event_type_name(event_type: libvlc_event_type_t) -> *const c_char;

    pub fn libvlc_media_new_location(
        p_instance: *mut libvlc_instance_t,
        psz_mrl: *const c_char,
    ) -> *mut libvlc_media_t;
    pub fn libvlc_media_new_path(
        p_instance: *mut libvlc_instance_t,
        path: *const c_char,
    ) -> *mut libvlc_media_t;
    pub fn libvlc_media_retain(p_md: *mut libvlc_media_t);
    pub fn libvlc_media_release(p_md: *mut libvlc_media_t);
    pub fn libvlc_media_duplicate(p_md: *mut libvlc_media_t) -> *mut libvlc_media_t;
    pub fn libvlc_media_get_mrl(p_md: *mut libvlc_media_t) -> *mut c_char;
    pub fn libvlc_media_get_state(p_md: *mut libvlc_media_t) -> libvlc_state_t;
    pub fn libvlc_media_get_type(p_md: *mut libvlc_media_t) -> libvlc_media_type_t;
    pub fn libvlc_media_get_duration(p_md: *mut libvlc_media_t) -> libvlc_time_t;
    pub fn libvlc_media_event_manager(p_md: *mut libvlc_media_t) -> *mut libvlc_event_manager_t;

    pub fn libvlc_media_player_new(p_libvlc_instance: *mut libvlc_instance_t)
        -> *mut libvlc_media_player_t;
    pub fn libvlc_media_player_new_from_media(p_md: *mut libvlc_media_t) -> *mut libvlc_media_player_t;
    pub fn libvlc_media_player_retain(p_mi: *mut libvlc_media_player_t);
    pub fn libvlc_media_player_release(p_mi: *mut libvlc_media_player_t);
    pub fn libvlc_media_player_set_media(p_mi: *mut libvlc_media_player_t, p_md: *mut libvlc_media_t);
    pub fn libvlc_media_player_event_manager(
        p_mi: *mut libvlc_media_player_t,
    ) -> *mut libvlc_event_manager_t;
    pub fn libvlc_media_player_is_playing(p_mi: *mut libvlc_media_player_t) -> c_int;
    pub fn libvlc_media_player_will_play(p_mi: *mut libvlc_media_player_t) -> c_int;
    pub fn libvlc_media_player_play(p_mi: *mut libvlc_media_player_t) -> c_int;
    pub fn libvlc_media_player_pause(p_mi: *mut libvlc_media_player_t);
    pub fn libvlc_media_player_set_pause(mp: *mut libvlc_media_player_t, do_pause: c_int);
    pub fn libvlc_media_player_stop(p_mi: *mut libvlc_media_player_t);
    pub fn libvlc_media_player_get_state(p_mi: *mut libvlc_media_player_t) -> libvlc_state_t;
    pub fn libvlc_media_player_get_time(p_mi: *mut libvlc_media_player_t) -> libvlc_time_t;
    pub fn libvlc_media_player_set_time(p_mi: *mut libvlc_media_player_t, i_time: libvlc_time_t);
    pub fn libvlc_media_player_get_length(p_mi: *mut libvlc_media_player_t) -> libvlc_time_t;
    pub fn libvlc_media_player_get_position(p_mi: *mut libvlc_media_player_t) -> c_float;
    pub fn libvlc_media_player_set_position(p_mi: *mut libvlc_media_player_t, f_pos: c_float);
    pub fn libvlc_media_player_get_rate(p_mi: *mut libvlc_media_player_t) -> c_float;
    pub fn libvlc_media_player_set_rate(p_mi: *mut libvlc_media_player_t, rate: c_float) -> c_int;
    pub fn libvlc_media_player_is_seekable(p_mi: *mut libvlc_media_player_t) -> c_int;
    pub fn libvlc_media_player_can_pause(p_mi: *mut libvlc_media_player_t) -> c_int;

    pub fn libvlc_audio_get_volume(p_mi: *mut libvlc_media_player_t) -> c_int;
    pub fn libvlc_audio_set_volume(p_mi: *mut libvlc_media_player_t, i_volume: c_int) -> c_int;
    pub fn libvlc_audio_get_mute(p_mi: *mut libvlc_media_player_t) -> c_int;
    pub fn libvlc_audio_set_mute(p_mi: *mut libvlc_media_player_t, status: c_int);
    pub fn libvlc_audio_get_channel(p_mi: *mut libvlc_media_player_t) -> c_int;
    pub fn libvlc_audio_set_channel(p_mi: *mut libvlc_media_player_t, channel: c_int) -> c_int;
    pub fn libvlc_audio_get_track_count(p_mi: *mut libvlc_media_player_t) -> c_int;
    pub fn libvlc_audio_get_track(p_mi: *mut libvlc_media_player_t) -> c_int;
    pub fn libvlc_audio_set_track(p_mi: *mut libvlc_media_player_t, i_track: c_int) -> c_int;

    // From the C library, used to expand log message formats.
    fn vsnprintf(buf: *mut c_char, size: usize, fmt: *const c_char, args: va_list) -> c_int;
}

/// The entry point table of the linked libvlc.
pub static LIBVLC_API: VLCAPI = VLCAPI {
    new: libvlc_new,
    retain: libvlc_retain,
    release: libvlc_release,
    get_version: libvlc_get_version,
    get_compiler: libvlc_get_compiler,
    get_changeset: libvlc_get_changeset,
    free: libvlc_free,
    set_user_agent: libvlc_set_user_agent,
    set_app_id: libvlc_set_app_id,

    log_set: libvlc_log_set,
    log_unset: libvlc_log_unset,
    log_get_context: libvlc_log_get_context,
    log_get_object: libvlc_log_get_object,
    vsnprintf,

    event_attach: libvlc_event_attach,
    event_detach: libvlc_event_detach,
    event_type_name: libvlc_event_type_name,

    media_new_location: libvlc_media_new_location,
    media_new_path: libvlc_media_new_path,
    media_retain: libvlc_media_retain,
    media_release: libvlc_media_release,
    media_duplicate: libvlc_media_duplicate,
    media_get_mrl: libvlc_media_get_mrl,
    media_get_state: libvlc_media_get_state,
    media_get_type: libvlc_media_get_type,
    media_get_duration: libvlc_media_get_duration,
    media_event_manager: libvlc_media_event_manager,

    media_player_new: libvlc_media_player_new,
    media_player_new_from_media: libvlc_media_player_new_from_media,
    media_player_retain: libvlc_media_player_retain,
    media_player_release: libvlc_media_player_release,
    media_player_set_media: libvlc_media_player_set_media,
    media_player_event_manager: libvlc_media_player_event_manager,
    media_player_is_playing: libvlc_media_player_is_playing,
    media_player_will_play: libvlc_media_player_will_play,
    media_player_play: libvlc_media_player_play,
    media_player_pause: libvlc_media_player_pause,
    media_player_set_pause: libvlc_media_player_set_pause,
    media_player_stop: libvlc_media_player_stop,
    media_player_get_state: libvlc_media_player_get_state,
    media_player_get_time: libvlc_media_player_get_time,
    media_player_set_time: libvlc_media_player_set_time,
    media_player_get_length: libvlc_media_player_get_length,
    media_player_get_position: libvlc_media_player_get_position,
    media_player_set_position: libvlc_media_player_set_position,
    media_player_get_rate: libvlc_media_player_get_rate,
    media_player_set_rate: libvlc_media_player_set_rate,
    media_player_is_seekable: libvlc_media_player_is_seekable,
    media_player_can_pause: libvlc_media_player_can_pause,

    audio_get_volume: libvlc_audio_get_volume,
    audio_set_volume: libvlc_audio_set_volume,
    audio_get_mute: libvlc_audio_get_mute,
    audio_set_mute: libvlc_audio_set_mute,
    audio_get_channel: libvlc_audio_get_channel,
    audio_set_channel: libvlc_audio_set_channel,
    audio_get_track_count: libvlc_audio_get_track_count,
    audio_get_track: libvlc_audio_get_track,
    audio_set_track: libvlc_audio_set_track,
};
