//! An instrumented fake engine.
//!
//! [`api()`] returns an entry point table whose objects behave like a small libvlc: reference
//! counted, with per-object event managers that invoke listeners while holding their lock, and a
//! media player with just enough of a state machine to drive the wrappers. Every native call is
//! recorded in the [`Journal`] of the engine instance it descends from, so tests can assert on
//! call order, live references, live subscriptions and lifetime violations.
//!
//! ```
//! use vlckit::prelude::*;
//! use vlckit::mock;
//!
//! let instance = Instance::new(mock::api(), &Configuration::default()).unwrap();
//! let media = Media::new_location(&instance, "file:///tmp/movie.mkv").unwrap();
//! let player = Player::with_media(&media).unwrap();
//!
//! assert!(player.play());
//! mock::fire(&player, EventType::MediaPlayerEndReached);
//! assert_eq!(player.state(), State::Ended);
//! assert!(mock::journal(&instance).violations().is_empty());
//! ```

use std::ffi::{c_char, c_float, c_int, c_uint, c_void, CStr, CString};
use std::{fmt, ptr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use vlckit_sys as ffi;

use crate::api::API;
use crate::event::EventType;
use crate::instance::Instance;
use crate::log::Level;
use crate::media::Media;
use crate::player::Player;

mod journal;
pub use self::journal::{Call, Journal, ObjectId, ObjectKind};

/// Every fake media reports this duration, in milliseconds.
pub const MEDIA_DURATION: i64 = 60_000;

/// Audio tracks of every fake media.
pub const AUDIO_TRACKS: c_int = 2;

const VERSION: &[u8] = b"3.0.20-fake Vetinari\0";
const COMPILER: &[u8] = b"rustc\0";
const CHANGESET: &[u8] = b"fake\0";
const LOG_MODULE: &[u8] = b"mock\0";
const LOG_FILE: &[u8] = b"mock/mod.rs\0";
const LOG_OBJECT: &[u8] = b"fake-engine\0";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Clone, Copy)]
struct Listener {
    event: ffi::libvlc_event_type_t,
    callback: ffi::libvlc_callback_t,
    data: usize,
}

impl Listener {
    fn matches(&self, event: ffi::libvlc_event_type_t, callback: ffi::libvlc_callback_t, data: usize) -> bool {
        self.event == event
            && self.data == data
            && self.callback.map(|f| f as usize) == callback.map(|f| f as usize)
    }
}

#[derive(Debug)]
struct FakeState {
    state: ffi::libvlc_state_t,
    // Instance
    args: Vec<String>,
    log: ffi::libvlc_log_cb,
    log_data: usize,
    // Media
    mrl: String,
    media_type: ffi::libvlc_media_type_t,
    duration: i64,
    // Player
    media: Option<&'static FakeObject>,
    time: i64,
    position: c_float,
    rate: c_float,
    volume: c_int,
    muted: bool,
    channel: c_int,
    track: c_int,
}

impl Default for FakeState {
    fn default() -> Self {
        FakeState {
            state: ffi::libvlc_NothingSpecial,
            args: Vec::new(),
            log: None,
            log_data: 0,
            mrl: String::new(),
            media_type: ffi::libvlc_media_type_unknown,
            duration: -1,
            media: None,
            time: 0,
            position: 0.0,
            rate: 1.0,
            volume: 100,
            muted: false,
            channel: ffi::libvlc_AudioChannel_Stereo,
            track: 1,
        }
    }
}

/// One fake native object. Objects are leaked so stale pointers stay inspectable.
struct FakeObject {
    id: ObjectId,
    kind: ObjectKind,
    journal: Arc<Journal>,
    refs: AtomicUsize,
    state: Mutex<FakeState>,
    listeners: Mutex<Vec<Listener>>,
}

impl fmt::Debug for FakeObject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("FakeObject")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("refs", &self.ref_count())
            .finish()
    }
}

impl FakeObject {
    fn create(journal: &Arc<Journal>, kind: ObjectKind, state: FakeState) -> &'static FakeObject {
        let id = journal.next_id();
        let object: &'static FakeObject = Box::leak(Box::new(FakeObject {
            id,
            kind,
            journal: Arc::clone(journal),
            refs: AtomicUsize::new(1),
            state: Mutex::new(state),
            listeners: Mutex::new(Vec::new()),
        }));
        journal.adopt(object);
        journal.record(Call::Create(kind, id));
        object
    }

    fn ref_count(&self) -> usize {
        self.refs.load(Ordering::SeqCst)
    }

    fn attachment_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        lock(&self.state)
    }

    fn violation(&self, what: &str) {
        self.journal.record(Call::Violation(format!(
            "{} on freed {:?} {:?}",
            what, self.kind, self.id
        )));
    }

    fn as_ptr<T>(&'static self) -> *mut T {
        self as *const FakeObject as *mut T
    }

    fn retain(&self) {
        if self.ref_count() == 0 {
            return self.violation("retain");
        }
        self.refs.fetch_add(1, Ordering::SeqCst);
        self.journal.record(Call::Retain(self.id));
    }

    fn release(&self) {
        if self.ref_count() == 0 {
            return self.violation("release");
        }
        self.journal.record(Call::Release(self.id));
        if self.refs.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.free();
        }
    }

    fn free(&self) {
        self.journal.record(Call::Freed(self.id));
        let live = self.attachment_count();
        if live > 0 {
            self.journal.record(Call::Violation(format!(
                "{:?} {:?} freed with {} live subscriptions",
                self.kind, self.id, live
            )));
        }
        let media = self.state().media.take();
        if let Some(media) = media {
            media.release();
        }
    }

    /// Moves a player, and the media it plays, to `state`.
    fn set_state(&self, state: ffi::libvlc_state_t) {
        let media = {
            let mut guard = self.state();
            guard.state = state;
            guard.media
        };
        if let Some(media) = media {
            media.state().state = state;
        }
    }

    fn fire(&'static self, event: ffi::libvlc_event_type_t) {
        if self.ref_count() == 0 {
            return self.violation("event");
        }
        let native = ffi::libvlc_event_t {
            type_: event,
            p_obj: self.as_ptr(),
            u: ffi::libvlc_event_payload {
                new_state: self.state().state,
            },
        };
        // Like libvlc, listeners run under the event manager lock.
        let listeners = lock(&self.listeners);
        for listener in listeners.iter().filter(|listener| listener.event == event) {
            if let Some(callback) = listener.callback {
                unsafe { callback(&native, listener.data as *mut c_void) };
            }
        }
    }
}

/// Resolves a fake handle, recording a violation for freed objects.
unsafe fn live<T>(ptr: *mut T, what: &str) -> Option<&'static FakeObject> {
    let object = (ptr as *const FakeObject).as_ref()?;
    if object.ref_count() == 0 {
        object.violation(what);
        None
    } else {
        Some(object)
    }
}

unsafe fn string(ptr: *const c_char) -> String {
    if ptr.is_null() {
        String::new()
    } else {
        CStr::from_ptr(ptr).to_string_lossy().into_owned()
    }
}

fn media_type_of(mrl: &str) -> ffi::libvlc_media_type_t {
    if mrl.starts_with("file://") {
        ffi::libvlc_media_type_file
    } else if mrl.contains("://") {
        ffi::libvlc_media_type_stream
    } else {
        ffi::libvlc_media_type_unknown
    }
}

unsafe extern "C" fn fake_new(argc: c_int, argv: *const *const c_char) -> *mut ffi::libvlc_instance_t {
    let mut args = Vec::new();
    for i in 0..argc.max(0) as usize {
        let arg = string(*argv.add(i));
        // libvlc refuses malformed options.
        if !arg.starts_with("--") {
            return ptr::null_mut();
        }
        args.push(arg);
    }
    let journal = Arc::new(Journal::new());
    let state = FakeState {
        args,
        ..FakeState::default()
    };
    FakeObject::create(&journal, ObjectKind::Instance, state).as_ptr()
}

unsafe extern "C" fn fake_retain<T>(handle: *mut T) {
    if let Some(object) = live(handle, "retain") {
        object.retain();
    }
}

unsafe extern "C" fn fake_release<T>(handle: *mut T) {
    if let Some(object) = live(handle, "release") {
        object.release();
    }
}

unsafe extern "C" fn fake_get_version() -> *const c_char {
    VERSION.as_ptr().cast()
}

unsafe extern "C" fn fake_get_compiler() -> *const c_char {
    COMPILER.as_ptr().cast()
}

unsafe extern "C" fn fake_get_changeset() -> *const c_char {
    CHANGESET.as_ptr().cast()
}

// Only strings handed out by `fake_media_get_mrl` are ever freed.
unsafe extern "C" fn fake_free(ptr: *mut c_void) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr.cast()));
    }
}

unsafe extern "C" fn fake_set_user_agent(
    instance: *mut ffi::libvlc_instance_t,
    name: *const c_char,
    http: *const c_char,
) {
    if let Some(object) = live(instance, "set_user_agent") {
        object
            .journal
            .record(Call::SetUserAgent(object.id, string(name), string(http)));
    }
}

unsafe extern "C" fn fake_set_app_id(
    instance: *mut ffi::libvlc_instance_t,
    id: *const c_char,
    version: *const c_char,
    icon: *const c_char,
) {
    if let Some(object) = live(instance, "set_app_id") {
        object.journal.record(Call::SetAppId(
            object.id,
            string(id),
            string(version),
            string(icon),
        ));
    }
}

unsafe extern "C" fn fake_log_set(
    instance: *mut ffi::libvlc_instance_t,
    callback: ffi::libvlc_log_cb,
    data: *mut c_void,
) {
    if let Some(object) = live(instance, "log_set") {
        {
            let mut state = object.state();
            state.log = callback;
            state.log_data = data as usize;
        }
        object.journal.record(Call::LogSet(object.id));
    }
}

unsafe extern "C" fn fake_log_unset(instance: *mut ffi::libvlc_instance_t) {
    if let Some(object) = live(instance, "log_unset") {
        {
            let mut state = object.state();
            state.log = None;
            state.log_data = 0;
        }
        object.journal.record(Call::LogUnset(object.id));
    }
}

/// The `libvlc_log_t` of the fake engine.
#[repr(C)]
struct FakeLogContext {
    object: usize,
    line: c_uint,
}

unsafe extern "C" fn fake_log_get_context(
    ctx: *const ffi::libvlc_log_t,
    module: *mut *const c_char,
    file: *mut *const c_char,
    line: *mut c_uint,
) {
    let ctx = &*(ctx as *const FakeLogContext);
    *module = LOG_MODULE.as_ptr().cast();
    *file = LOG_FILE.as_ptr().cast();
    *line = ctx.line;
}

unsafe extern "C" fn fake_log_get_object(
    ctx: *const ffi::libvlc_log_t,
    name: *mut *const c_char,
    header: *mut *const c_char,
    id: *mut usize,
) {
    let ctx = &*(ctx as *const FakeLogContext);
    *name = LOG_OBJECT.as_ptr().cast();
    *header = ptr::null();
    *id = ctx.object;
}

// Messages carry no arguments, so formatting is a truncating copy.
unsafe extern "C" fn fake_vsnprintf(
    buf: *mut c_char,
    size: usize,
    fmt: *const c_char,
    _args: ffi::va_list,
) -> c_int {
    let bytes = CStr::from_ptr(fmt).to_bytes();
    if size > 0 {
        let len = bytes.len().min(size - 1);
        ptr::copy_nonoverlapping(bytes.as_ptr().cast::<c_char>(), buf, len);
        *buf.add(len) = 0;
    }
    bytes.len() as c_int
}

unsafe extern "C" fn fake_event_attach(
    manager: *mut ffi::libvlc_event_manager_t,
    event: ffi::libvlc_event_type_t,
    callback: ffi::libvlc_callback_t,
    data: *mut c_void,
) -> c_int {
    let object = match live(manager, "event_attach") {
        Some(object) => object,
        None => return -1,
    };
    if callback.is_none() || !object.journal.attach_allowed() {
        return -1;
    }
    if let Some(latency) = object.journal.attach_latency() {
        thread::sleep(latency);
    }
    lock(&object.listeners).push(Listener {
        event,
        callback,
        data: data as usize,
    });
    object.journal.record(Call::Attach(object.id, event));
    0
}

unsafe extern "C" fn fake_event_detach(
    manager: *mut ffi::libvlc_event_manager_t,
    event: ffi::libvlc_event_type_t,
    callback: ffi::libvlc_callback_t,
    data: *mut c_void,
) {
    let object = match live(manager, "event_detach") {
        Some(object) => object,
        None => return,
    };
    let removed = {
        let mut listeners = lock(&object.listeners);
        match listeners
            .iter()
            .position(|listener| listener.matches(event, callback, data as usize))
        {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    };
    if removed {
        object.journal.record(Call::Detach(object.id, event));
    } else {
        object.journal.record(Call::Violation(format!(
            "detach of an unknown {:#x} listener on {:?}",
            event, object.id
        )));
    }
}

unsafe extern "C" fn fake_event_type_name(event: ffi::libvlc_event_type_t) -> *const c_char {
    let name: &[u8] = match EventType::from_raw(event) {
        Some(EventType::MediaStateChanged) => b"MediaStateChanged\0",
        Some(EventType::MediaPlayerMediaChanged) => b"MediaPlayerMediaChanged\0",
        Some(EventType::MediaPlayerPlaying) => b"MediaPlayerPlaying\0",
        Some(EventType::MediaPlayerPaused) => b"MediaPlayerPaused\0",
        Some(EventType::MediaPlayerStopped) => b"MediaPlayerStopped\0",
        Some(EventType::MediaPlayerEndReached) => b"MediaPlayerEndReached\0",
        Some(EventType::MediaPlayerEncounteredError) => b"MediaPlayerEncounteredError\0",
        _ => b"Unknown Event\0",
    };
    name.as_ptr().cast()
}

unsafe fn new_media(instance: *mut ffi::libvlc_instance_t, mrl: String) -> *mut ffi::libvlc_media_t {
    let object = match live(instance, "media_new") {
        Some(object) => object,
        None => return ptr::null_mut(),
    };
    let state = FakeState {
        media_type: media_type_of(&mrl),
        duration: MEDIA_DURATION,
        mrl,
        ..FakeState::default()
    };
    FakeObject::create(&object.journal, ObjectKind::Media, state).as_ptr()
}

unsafe extern "C" fn fake_media_new_location(
    instance: *mut ffi::libvlc_instance_t,
    mrl: *const c_char,
) -> *mut ffi::libvlc_media_t {
    let mrl = string(mrl);
    if mrl.is_empty() {
        return ptr::null_mut();
    }
    new_media(instance, mrl)
}

unsafe extern "C" fn fake_media_new_path(
    instance: *mut ffi::libvlc_instance_t,
    path: *const c_char,
) -> *mut ffi::libvlc_media_t {
    let path = string(path);
    if path.is_empty() {
        return ptr::null_mut();
    }
    new_media(instance, format!("file://{path}"))
}

unsafe extern "C" fn fake_media_duplicate(media: *mut ffi::libvlc_media_t) -> *mut ffi::libvlc_media_t {
    let object = match live(media, "media_duplicate") {
        Some(object) => object,
        None => return ptr::null_mut(),
    };
    let state = {
        let source = object.state();
        FakeState {
            mrl: source.mrl.clone(),
            media_type: source.media_type,
            duration: source.duration,
            ..FakeState::default()
        }
    };
    FakeObject::create(&object.journal, ObjectKind::Media, state).as_ptr()
}

unsafe extern "C" fn fake_media_get_mrl(media: *mut ffi::libvlc_media_t) -> *mut c_char {
    live(media, "media_get_mrl")
        .and_then(|object| CString::new(object.state().mrl.clone()).ok())
        .map_or(ptr::null_mut(), CString::into_raw)
}

unsafe extern "C" fn fake_media_get_state(media: *mut ffi::libvlc_media_t) -> ffi::libvlc_state_t {
    live(media, "media_get_state").map_or(ffi::libvlc_Error, |object| object.state().state)
}

unsafe extern "C" fn fake_media_get_type(media: *mut ffi::libvlc_media_t) -> ffi::libvlc_media_type_t {
    live(media, "media_get_type").map_or(ffi::libvlc_media_type_unknown, |object| {
        object.state().media_type
    })
}

unsafe extern "C" fn fake_media_get_duration(media: *mut ffi::libvlc_media_t) -> ffi::libvlc_time_t {
    live(media, "media_get_duration").map_or(-1, |object| object.state().duration)
}

unsafe extern "C" fn fake_event_manager<T>(handle: *mut T) -> *mut ffi::libvlc_event_manager_t {
    live(handle, "event_manager").map_or(ptr::null_mut(), FakeObject::as_ptr)
}

unsafe extern "C" fn fake_media_player_new(
    instance: *mut ffi::libvlc_instance_t,
) -> *mut ffi::libvlc_media_player_t {
    match live(instance, "media_player_new") {
        Some(object) => {
            FakeObject::create(&object.journal, ObjectKind::Player, FakeState::default()).as_ptr()
        }
        None => ptr::null_mut(),
    }
}

unsafe extern "C" fn fake_media_player_new_from_media(
    media: *mut ffi::libvlc_media_t,
) -> *mut ffi::libvlc_media_player_t {
    let media = match live(media, "media_player_new_from_media") {
        Some(media) => media,
        None => return ptr::null_mut(),
    };
    media.retain();
    let state = FakeState {
        media: Some(media),
        ..FakeState::default()
    };
    FakeObject::create(&media.journal, ObjectKind::Player, state).as_ptr()
}

unsafe extern "C" fn fake_media_player_set_media(
    player: *mut ffi::libvlc_media_player_t,
    media: *mut ffi::libvlc_media_t,
) {
    let player = match live(player, "media_player_set_media") {
        Some(player) => player,
        None => return,
    };
    let media = if media.is_null() {
        None
    } else {
        match live(media, "media_player_set_media") {
            Some(media) => Some(media),
            None => return,
        }
    };
    if let Some(media) = media {
        media.retain();
    }
    let old = {
        let mut state = player.state();
        state.state = ffi::libvlc_NothingSpecial;
        state.time = 0;
        state.position = 0.0;
        std::mem::replace(&mut state.media, media)
    };
    player
        .journal
        .record(Call::SetMedia(player.id, media.map(|media| media.id)));
    if let Some(old) = old {
        old.release();
    }
    player.fire(ffi::libvlc_MediaPlayerMediaChanged);
}

macro_rules! with_player {
    ($player:expr, $what:literal, $default:expr, |$object:ident, $state:ident| $body:expr) => {
        match live($player, $what) {
            Some($object) => {
                let $state = $object.state();
                $body
            }
            None => $default,
        }
    };
}

unsafe extern "C" fn fake_media_player_is_playing(player: *mut ffi::libvlc_media_player_t) -> c_int {
    with_player!(player, "is_playing", 0, |_object, state| {
        (state.state == ffi::libvlc_Playing) as c_int
    })
}

unsafe extern "C" fn fake_media_player_will_play(player: *mut ffi::libvlc_media_player_t) -> c_int {
    with_player!(player, "will_play", 0, |_object, state| {
        (state.media.is_some() && state.state != ffi::libvlc_Error) as c_int
    })
}

unsafe extern "C" fn fake_media_player_play(player: *mut ffi::libvlc_media_player_t) -> c_int {
    let object = match live(player, "play") {
        Some(object) => object,
        None => return -1,
    };
    object.journal.record(Call::Play(object.id));
    if object.state().media.is_none() {
        return -1;
    }
    object.set_state(ffi::libvlc_Playing);
    object.fire(ffi::libvlc_MediaPlayerPlaying);
    0
}

fn toggle(object: &'static FakeObject, pause: Option<bool>) {
    let current = object.state().state;
    let next = match (current, pause) {
        (ffi::libvlc_Playing, None | Some(true)) => ffi::libvlc_Paused,
        (ffi::libvlc_Paused, None | Some(false)) => ffi::libvlc_Playing,
        _ => return,
    };
    object.set_state(next);
    object.fire(if next == ffi::libvlc_Paused {
        ffi::libvlc_MediaPlayerPaused
    } else {
        ffi::libvlc_MediaPlayerPlaying
    });
}

unsafe extern "C" fn fake_media_player_pause(player: *mut ffi::libvlc_media_player_t) {
    if let Some(object) = live(player, "pause") {
        object.journal.record(Call::Pause(object.id));
        toggle(object, None);
    }
}

unsafe extern "C" fn fake_media_player_set_pause(player: *mut ffi::libvlc_media_player_t, pause: c_int) {
    if let Some(object) = live(player, "set_pause") {
        object.journal.record(Call::Pause(object.id));
        toggle(object, Some(pause != 0));
    }
}

unsafe extern "C" fn fake_media_player_stop(player: *mut ffi::libvlc_media_player_t) {
    let object = match live(player, "stop") {
        Some(object) => object,
        None => return,
    };
    object.journal.record(Call::Stop(object.id));
    {
        let mut state = object.state();
        if state.media.is_none() {
            return;
        }
        state.time = 0;
        state.position = 0.0;
    }
    object.set_state(ffi::libvlc_Stopped);
    object.fire(ffi::libvlc_MediaPlayerStopped);
}

unsafe extern "C" fn fake_media_player_get_state(
    player: *mut ffi::libvlc_media_player_t,
) -> ffi::libvlc_state_t {
    with_player!(player, "get_state", ffi::libvlc_Error, |_object, state| state.state)
}

unsafe extern "C" fn fake_media_player_get_time(player: *mut ffi::libvlc_media_player_t) -> ffi::libvlc_time_t {
    with_player!(player, "get_time", -1, |_object, state| {
        if state.media.is_some() {
            state.time
        } else {
            -1
        }
    })
}

unsafe extern "C" fn fake_media_player_set_time(player: *mut ffi::libvlc_media_player_t, time: ffi::libvlc_time_t) {
    with_player!(player, "set_time", (), |object, state| {
        let mut state = state;
        object.journal.record(Call::SetTime(object.id));
        if state.media.is_some() {
            state.time = time;
            state.position = time as c_float / MEDIA_DURATION as c_float;
        }
    })
}

unsafe extern "C" fn fake_media_player_get_length(
    player: *mut ffi::libvlc_media_player_t,
) -> ffi::libvlc_time_t {
    let media = with_player!(player, "get_length", None, |_object, state| state.media);
    media.map_or(-1, |media| media.state().duration)
}

unsafe extern "C" fn fake_media_player_get_position(player: *mut ffi::libvlc_media_player_t) -> c_float {
    with_player!(player, "get_position", -1.0, |_object, state| {
        if state.media.is_some() {
            state.position
        } else {
            -1.0
        }
    })
}

unsafe extern "C" fn fake_media_player_set_position(player: *mut ffi::libvlc_media_player_t, position: c_float) {
    with_player!(player, "set_position", (), |object, state| {
        let mut state = state;
        object.journal.record(Call::SetPosition(object.id));
        if state.media.is_some() {
            state.position = position;
            state.time = (position * MEDIA_DURATION as c_float) as i64;
        }
    })
}

unsafe extern "C" fn fake_media_player_get_rate(player: *mut ffi::libvlc_media_player_t) -> c_float {
    with_player!(player, "get_rate", 0.0, |_object, state| state.rate)
}

unsafe extern "C" fn fake_media_player_set_rate(player: *mut ffi::libvlc_media_player_t, rate: c_float) -> c_int {
    with_player!(player, "set_rate", -1, |_object, state| {
        let mut state = state;
        if rate > 0.0 {
            state.rate = rate;
            0
        } else {
            -1
        }
    })
}

unsafe extern "C" fn fake_media_player_is_seekable(player: *mut ffi::libvlc_media_player_t) -> c_int {
    with_player!(player, "is_seekable", 0, |_object, state| state.media.is_some() as c_int)
}

unsafe extern "C" fn fake_media_player_can_pause(player: *mut ffi::libvlc_media_player_t) -> c_int {
    with_player!(player, "can_pause", 0, |_object, state| state.media.is_some() as c_int)
}

unsafe extern "C" fn fake_audio_get_volume(player: *mut ffi::libvlc_media_player_t) -> c_int {
    with_player!(player, "audio_get_volume", -1, |_object, state| {
        if state.media.is_some() {
            state.volume
        } else {
            -1
        }
    })
}

unsafe extern "C" fn fake_audio_set_volume(player: *mut ffi::libvlc_media_player_t, volume: c_int) -> c_int {
    with_player!(player, "audio_set_volume", -1, |_object, state| {
        let mut state = state;
        if (0..=200).contains(&volume) {
            state.volume = volume;
            0
        } else {
            -1
        }
    })
}

unsafe extern "C" fn fake_audio_get_mute(player: *mut ffi::libvlc_media_player_t) -> c_int {
    with_player!(player, "audio_get_mute", -1, |_object, state| {
        if state.media.is_some() {
            state.muted as c_int
        } else {
            -1
        }
    })
}

unsafe extern "C" fn fake_audio_set_mute(player: *mut ffi::libvlc_media_player_t, mute: c_int) {
    with_player!(player, "audio_set_mute", (), |_object, state| {
        let mut state = state;
        state.muted = mute != 0;
    })
}

unsafe extern "C" fn fake_audio_get_channel(player: *mut ffi::libvlc_media_player_t) -> c_int {
    with_player!(player, "audio_get_channel", ffi::libvlc_AudioChannel_Error, |_object, state| {
        if state.media.is_some() {
            state.channel
        } else {
            ffi::libvlc_AudioChannel_Error
        }
    })
}

unsafe extern "C" fn fake_audio_set_channel(player: *mut ffi::libvlc_media_player_t, channel: c_int) -> c_int {
    with_player!(player, "audio_set_channel", -1, |_object, state| {
        let mut state = state;
        if state.media.is_some()
            && (ffi::libvlc_AudioChannel_Stereo..=ffi::libvlc_AudioChannel_Dolbys).contains(&channel)
        {
            state.channel = channel;
            0
        } else {
            -1
        }
    })
}

unsafe extern "C" fn fake_audio_get_track_count(player: *mut ffi::libvlc_media_player_t) -> c_int {
    with_player!(player, "audio_get_track_count", -1, |_object, state| {
        if state.media.is_some() {
            AUDIO_TRACKS
        } else {
            -1
        }
    })
}

unsafe extern "C" fn fake_audio_get_track(player: *mut ffi::libvlc_media_player_t) -> c_int {
    with_player!(player, "audio_get_track", -1, |_object, state| {
        if state.media.is_some() {
            state.track
        } else {
            -1
        }
    })
}

unsafe extern "C" fn fake_audio_set_track(player: *mut ffi::libvlc_media_player_t, track: c_int) -> c_int {
    with_player!(player, "audio_set_track", -1, |_object, state| {
        let mut state = state;
        if state.media.is_some() && (0..AUDIO_TRACKS).contains(&track) {
            state.track = track;
            0
        } else {
            -1
        }
    })
}

const FAKE_TABLE: ffi::VLCAPI = ffi::VLCAPI {
    new: fake_new,
    retain: fake_retain::<ffi::libvlc_instance_t>,
    release: fake_release::<ffi::libvlc_instance_t>,
    get_version: fake_get_version,
    get_compiler: fake_get_compiler,
    get_changeset: fake_get_changeset,
    free: fake_free,
    set_user_agent: fake_set_user_agent,
    set_app_id: fake_set_app_id,

    log_set: fake_log_set,
    log_unset: fake_log_unset,
    log_get_context: fake_log_get_context,
    log_get_object: fake_log_get_object,
    vsnprintf: fake_vsnprintf,

    event_attach: fake_event_attach,
    event_detach: fake_event_detach,
    event_type_name: fake_event_type_name,

    media_new_location: fake_media_new_location,
    media_new_path: fake_media_new_path,
    media_retain: fake_retain::<ffi::libvlc_media_t>,
    media_release: fake_release::<ffi::libvlc_media_t>,
    media_duplicate: fake_media_duplicate,
    media_get_mrl: fake_media_get_mrl,
    media_get_state: fake_media_get_state,
    media_get_type: fake_media_get_type,
    media_get_duration: fake_media_get_duration,
    media_event_manager: fake_event_manager::<ffi::libvlc_media_t>,

    media_player_new: fake_media_player_new,
    media_player_new_from_media: fake_media_player_new_from_media,
    media_player_retain: fake_retain::<ffi::libvlc_media_player_t>,
    media_player_release: fake_release::<ffi::libvlc_media_player_t>,
    media_player_set_media: fake_media_player_set_media,
    media_player_event_manager: fake_event_manager::<ffi::libvlc_media_player_t>,
    media_player_is_playing: fake_media_player_is_playing,
    media_player_will_play: fake_media_player_will_play,
    media_player_play: fake_media_player_play,
    media_player_pause: fake_media_player_pause,
    media_player_set_pause: fake_media_player_set_pause,
    media_player_stop: fake_media_player_stop,
    media_player_get_state: fake_media_player_get_state,
    media_player_get_time: fake_media_player_get_time,
    media_player_set_time: fake_media_player_set_time,
    media_player_get_length: fake_media_player_get_length,
    media_player_get_position: fake_media_player_get_position,
    media_player_set_position: fake_media_player_set_position,
    media_player_get_rate: fake_media_player_get_rate,
    media_player_set_rate: fake_media_player_set_rate,
    media_player_is_seekable: fake_media_player_is_seekable,
    media_player_can_pause: fake_media_player_can_pause,

    audio_get_volume: fake_audio_get_volume,
    audio_set_volume: fake_audio_set_volume,
    audio_get_mute: fake_audio_get_mute,
    audio_set_mute: fake_audio_set_mute,
    audio_get_channel: fake_audio_get_channel,
    audio_set_channel: fake_audio_set_channel,
    audio_get_track_count: fake_audio_get_track_count,
    audio_get_track: fake_audio_get_track,
    audio_set_track: fake_audio_set_track,
};

static FAKE_API: ffi::VLCAPI = FAKE_TABLE;
static SECOND_FAKE_API: ffi::VLCAPI = FAKE_TABLE;

/// The entry point table of the fake engine.
#[inline]
pub fn api() -> API {
    API::from_table(&FAKE_API)
}

/// Another fake engine table that compares unequal to [`api()`], for mixing engines.
#[inline]
pub fn second_api() -> API {
    API::from_table(&SECOND_FAKE_API)
}

fn is_fake(api: API) -> bool {
    api == self::api() || api == second_api()
}

mod sealed {
    use std::ffi::c_void;

    use crate::api::API;

    pub trait Sealed {
        fn raw(&self) -> *mut c_void;
        fn api(&self) -> API;
    }
}

/// A wrapper around a fake engine object.
pub trait Object: sealed::Sealed {}

/// A wrapper around a fake engine object that fires events.
pub trait Emitter: Object {}

impl sealed::Sealed for Instance {
    fn raw(&self) -> *mut c_void {
        self.ptr().cast()
    }

    fn api(&self) -> API {
        Instance::api(self)
    }
}

impl sealed::Sealed for Media {
    fn raw(&self) -> *mut c_void {
        self.ptr().cast()
    }

    fn api(&self) -> API {
        self.instance().api()
    }
}

impl sealed::Sealed for Player {
    fn raw(&self) -> *mut c_void {
        self.ptr().cast()
    }

    fn api(&self) -> API {
        self.instance().api()
    }
}

impl Object for Instance {}
impl Object for Media {}
impl Object for Player {}
impl Emitter for Media {}
impl Emitter for Player {}

/// # Safety
/// `ptr` must be a handle returned by a fake engine table.
unsafe fn raw_object<T>(ptr: *mut T) -> &'static FakeObject {
    // Objects of the fake engine are never deallocated.
    &*(ptr as *const FakeObject)
}

/// Resolves the fake object behind `object`.
///
/// # Panics
/// If `object` was created through a table other than [`api()`] or [`second_api()`].
fn object_of<O: Object>(object: &O) -> &'static FakeObject {
    assert!(
        is_fake(sealed::Sealed::api(object)),
        "not an object of the fake engine"
    );
    unsafe { raw_object(sealed::Sealed::raw(object)) }
}

/// The journal of a raw fake handle.
///
/// # Safety
/// `ptr` must be a handle returned by a fake engine table.
pub(crate) unsafe fn journal_of<T>(ptr: *mut T) -> Arc<Journal> {
    Arc::clone(&raw_object(ptr).journal)
}

/// The object id of a raw fake handle.
///
/// # Safety
/// `ptr` must be a handle returned by a fake engine table.
pub(crate) unsafe fn id_of<T>(ptr: *mut T) -> ObjectId {
    raw_object(ptr).id
}

/// The journal shared by `object` and everything created from the same engine instance.
///
/// # Panics
/// If `object` does not belong to a fake engine.
pub fn journal<O: Object>(object: &O) -> Arc<Journal> {
    Arc::clone(&object_of(object).journal)
}

/// The fake engine's id for `object`.
pub fn id<O: Object>(object: &O) -> ObjectId {
    object_of(object).id
}

/// The options the engine instance was created with.
pub fn args(instance: &Instance) -> Vec<String> {
    object_of(instance).state().args.clone()
}

fn apply(object: &'static FakeObject, event: EventType) {
    let state = match event {
        EventType::MediaPlayerOpening => ffi::libvlc_Opening,
        EventType::MediaPlayerBuffering => ffi::libvlc_Buffering,
        EventType::MediaPlayerPlaying => ffi::libvlc_Playing,
        EventType::MediaPlayerPaused => ffi::libvlc_Paused,
        EventType::MediaPlayerStopped => ffi::libvlc_Stopped,
        EventType::MediaPlayerEndReached => ffi::libvlc_Ended,
        EventType::MediaPlayerEncounteredError => ffi::libvlc_Error,
        _ => return,
    };
    if object.kind == ObjectKind::Player {
        object.set_state(state);
    }
}

/// Simulates the engine firing `event` on `emitter`, on the calling thread.
///
/// Player state events also move the fake player to the matching state first, e.g.
/// `MediaPlayerEndReached` leaves it `Ended`.
pub fn fire<E: Emitter>(emitter: &E, event: EventType) {
    let object = object_of(emitter);
    apply(object, event);
    object.fire(event.into_raw());
}

/// Like [`fire`], from a freshly spawned engine thread. Returns once the firing completed.
pub fn fire_from_thread<E: Emitter>(emitter: &E, event: EventType) {
    let object = object_of(emitter);
    let firing = thread::spawn(move || {
        apply(object, event);
        object.fire(event.into_raw());
    });
    if firing.join().is_err() {
        object.journal.record(Call::Violation("engine thread panicked".to_owned()));
    }
}

/// Simulates the engine logging `message` through the callback installed on `instance`.
///
/// Does nothing when no callback is installed.
pub fn emit_log(instance: &Instance, level: Level, message: &str) {
    let object = object_of(instance);
    let (callback, data) = {
        let state = object.state();
        (state.log, state.log_data)
    };
    let (Some(callback), Ok(fmt)) = (callback, CString::new(message)) else {
        return;
    };
    let ctx = FakeLogContext {
        object: object.id.0 as usize,
        line: line!(),
    };
    unsafe {
        callback(
            data as *mut c_void,
            level as c_int,
            &ctx as *const FakeLogContext as *const ffi::libvlc_log_t,
            fmt.as_ptr(),
            ptr::null_mut(),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Configuration;

    // Behaves like the fake engine but is not one of its tables.
    static UNLISTED_API: ffi::VLCAPI = FAKE_TABLE;

    #[test]
    fn test_second_api_is_a_separate_engine() {
        assert!(api() != second_api());
        let instance =
            Instance::new(second_api(), &Configuration::default()).expect("Failed to create instance");
        let media = Media::new_location(&instance, "file:///tmp/movie.mkv").unwrap();
        assert!(Arc::ptr_eq(&journal(&instance), &journal(&media)));
        assert!(journal(&instance).violations().is_empty());
    }

    #[test]
    #[should_panic(expected = "not an object of the fake engine")]
    fn test_helpers_refuse_other_tables() {
        let api = API::from_table(&UNLISTED_API);
        let instance = Instance::new(api, &Configuration::default()).expect("Failed to create instance");
        let _ = id(&instance);
    }
}
