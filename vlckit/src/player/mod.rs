//! Media players.

use std::ffi::c_int;
use std::fmt;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use log::debug;
use vlckit_sys as ffi;

use crate::api::API;
use crate::error::{Error, ResourceKind, Result};
use crate::event_manager::EventManager;
use crate::handle::{ManagedHandle, PlayerResource};
use crate::instance::Instance;
use crate::media::Media;
use crate::state::{AudioChannel, State};
use crate::time::Time;

#[cfg(test)]
mod tests;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Plays a [`Media`].
///
/// Transport calls return immediately; watch the [`event_manager`](Player::event_manager) to
/// learn when the engine got there.
///
/// Once playback has `Ended`, [`play`](Player::play) does nothing until the position is reset to
/// the start or a media is assigned.
pub struct Player {
    events: OnceLock<EventManager>,
    handle: ManagedHandle<PlayerResource>,
    media: Mutex<Option<Media>>,
    // Serializes media switches without blocking `media()`.
    switching: Mutex<()>,
    rearmed: AtomicBool,
    instance: Instance,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Player")
            .field("handle", &self.handle)
            .field("media", &*lock(&self.media))
            .field("events", &self.events.get())
            .finish()
    }
}

impl Drop for Player {
    #[inline]
    fn drop(&mut self) {
        // Subscriptions go before the native reference.
        if let Some(events) = self.events.get() {
            events.unregister_all();
        }
    }
}

impl Player {
    fn from_handle(
        instance: &Instance,
        handle: ManagedHandle<PlayerResource>,
        media: Option<Media>,
    ) -> Self {
        Self {
            events: OnceLock::new(),
            handle,
            media: Mutex::new(media),
            switching: Mutex::new(()),
            rearmed: AtomicBool::new(false),
            instance: instance.clone(),
        }
    }

    /// Creates a player without media.
    pub fn new(instance: &Instance) -> Result<Self> {
        let ptr = unsafe { instance.api().media_player_new(instance.ptr()) };
        let handle = unsafe { ManagedHandle::adopt(instance.api(), ptr)? };
        Ok(Self::from_handle(instance, handle, None))
    }

    /// Creates a player for `media`.
    pub fn with_media(media: &Media) -> Result<Self> {
        let api = media.instance().api();
        let ptr = unsafe { api.media_player_new_from_media(media.ptr()) };
        let handle = unsafe { ManagedHandle::adopt(api, ptr)? };
        Ok(Self::from_handle(media.instance(), handle, Some(media.clone())))
    }

    /// The assigned media.
    pub fn media(&self) -> Option<Media> {
        lock(&self.media).clone()
    }

    /// Assigns `media`, or clears the assignment.
    ///
    /// The previous media is released only after the engine switched away from it. A media
    /// created through another engine table is refused.
    pub fn set_media(&self, media: Option<Media>) -> Result<()> {
        if let Some(media) = &media {
            if media.instance().api() != self.api() {
                return Err(Error::ForeignMedia);
            }
        }
        let _switching = lock(&self.switching);
        let raw = media.as_ref().map_or(ptr::null_mut(), Media::ptr);
        unsafe { self.api().media_player_set_media(self.ptr(), raw) };
        let previous = std::mem::replace(&mut *lock(&self.media), media);
        self.rearmed.store(true, Ordering::SeqCst);
        drop(previous);
        Ok(())
    }

    /// Starts playback. Returns `false` if the engine refused, or if playback has ended and was
    /// not reset since.
    pub fn play(&self) -> bool {
        let rearmed = self.rearmed.swap(false, Ordering::SeqCst);
        if !rearmed && self.state() == State::Ended {
            debug!("ignoring play() on an ended player");
            return false;
        }
        let started = unsafe { self.api().media_player_play(self.ptr()) == 0 };
        if !started && rearmed {
            // The reset still stands for the next attempt.
            self.rearmed.store(true, Ordering::SeqCst);
        }
        started
    }

    /// Toggles between playing and paused.
    pub fn pause(&self) {
        unsafe { self.api().media_player_pause(self.ptr()) }
    }

    pub fn set_pause(&self, pause: bool) {
        unsafe { self.api().media_player_set_pause(self.ptr(), pause as c_int) }
    }

    pub fn stop(&self) {
        unsafe { self.api().media_player_stop(self.ptr()) }
    }

    pub fn state(&self) -> State {
        State::from(unsafe { self.api().media_player_get_state(self.ptr()) })
    }

    pub fn is_playing(&self) -> bool {
        unsafe { self.api().media_player_is_playing(self.ptr()) != 0 }
    }

    /// Whether the player is able to play.
    pub fn will_play(&self) -> bool {
        unsafe { self.api().media_player_will_play(self.ptr()) != 0 }
    }

    pub fn is_seekable(&self) -> bool {
        unsafe { self.api().media_player_is_seekable(self.ptr()) != 0 }
    }

    pub fn can_pause(&self) -> bool {
        unsafe { self.api().media_player_can_pause(self.ptr()) != 0 }
    }

    /// The playback time, `None` without media.
    pub fn time(&self) -> Option<Time> {
        Time::from_raw(unsafe { self.api().media_player_get_time(self.ptr()) })
    }

    pub fn set_time(&self, time: Time) {
        unsafe { self.api().media_player_set_time(self.ptr(), time.as_millis()) };
        if time == Time::ZERO {
            self.rearm();
        }
    }

    /// The length of the media, `None` when unknown.
    pub fn length(&self) -> Option<Time> {
        Time::from_raw(unsafe { self.api().media_player_get_length(self.ptr()) })
    }

    /// The playback position as a fraction of the length, `None` without media.
    ///
    /// The engine's value is passed through as is; it may fall outside `0.0..=1.0`.
    pub fn position(&self) -> Option<f32> {
        let position = unsafe { self.api().media_player_get_position(self.ptr()) };
        if position < 0.0 {
            None
        } else {
            Some(position)
        }
    }

    pub fn set_position(&self, position: f32) {
        unsafe { self.api().media_player_set_position(self.ptr(), position) };
        if position == 0.0 {
            self.rearm();
        }
    }

    // A reset only counts once playback has ended.
    fn rearm(&self) {
        if self.state() == State::Ended {
            self.rearmed.store(true, Ordering::SeqCst);
        }
    }

    /// The playback rate, 1.0 being normal speed.
    pub fn rate(&self) -> f32 {
        unsafe { self.api().media_player_get_rate(self.ptr()) }
    }

    pub fn set_rate(&self, rate: f32) -> bool {
        unsafe { self.api().media_player_set_rate(self.ptr(), rate) == 0 }
    }

    /// The volume in percent, `None` without audio output.
    pub fn volume(&self) -> Option<u32> {
        u32::try_from(unsafe { self.api().audio_get_volume(self.ptr()) }).ok()
    }

    pub fn set_volume(&self, volume: u32) -> bool {
        match c_int::try_from(volume) {
            Ok(volume) => unsafe { self.api().audio_set_volume(self.ptr(), volume) == 0 },
            Err(_) => false,
        }
    }

    pub fn is_muted(&self) -> bool {
        unsafe { self.api().audio_get_mute(self.ptr()) == 1 }
    }

    pub fn set_mute(&self, mute: bool) {
        unsafe { self.api().audio_set_mute(self.ptr(), mute as c_int) }
    }

    pub fn audio_channel(&self) -> Option<AudioChannel> {
        AudioChannel::from_raw(unsafe { self.api().audio_get_channel(self.ptr()) })
    }

    pub fn set_audio_channel(&self, channel: AudioChannel) -> bool {
        unsafe { self.api().audio_set_channel(self.ptr(), channel.into_raw()) == 0 }
    }

    /// The number of audio tracks, `None` when unavailable.
    pub fn audio_track_count(&self) -> Option<u32> {
        u32::try_from(unsafe { self.api().audio_get_track_count(self.ptr()) }).ok()
    }

    /// The id of the current audio track, `None` when unavailable.
    pub fn audio_track(&self) -> Option<i32> {
        let track = unsafe { self.api().audio_get_track(self.ptr()) };
        if track < 0 {
            None
        } else {
            Some(track)
        }
    }

    pub fn set_audio_track(&self, track: i32) -> bool {
        unsafe { self.api().audio_set_track(self.ptr(), track) == 0 }
    }

    /// The event bridge of this player, created on first use.
    pub fn event_manager(&self) -> Result<&EventManager> {
        if let Some(events) = self.events.get() {
            return Ok(events);
        }
        let manager = unsafe {
            let ptr = self.api().media_player_event_manager(self.ptr());
            EventManager::from_ptr(self.api(), ptr, ResourceKind::Player)?
        };
        // A racing thread may have won; its bridge is the one kept.
        Ok(self.events.get_or_init(|| manager))
    }

    /// The instance this player was created from.
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
    pub(crate) fn ptr(&self) -> *mut ffi::libvlc_media_player_t {
        self.handle.ptr()
    }
}
