use vlckit_sys as ffi;

/// The session state of a media or a media player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    NothingSpecial = ffi::libvlc_NothingSpecial as isize,
    Opening = ffi::libvlc_Opening as isize,
    Buffering = ffi::libvlc_Buffering as isize,
    Playing = ffi::libvlc_Playing as isize,
    Paused = ffi::libvlc_Paused as isize,
    Stopped = ffi::libvlc_Stopped as isize,
    Ended = ffi::libvlc_Ended as isize,
    Error = ffi::libvlc_Error as isize,
}

impl From<ffi::libvlc_state_t> for State {
    fn from(value: ffi::libvlc_state_t) -> Self {
        match value {
            ffi::libvlc_Opening => State::Opening,
            ffi::libvlc_Buffering => State::Buffering,
            ffi::libvlc_Playing => State::Playing,
            ffi::libvlc_Paused => State::Paused,
            ffi::libvlc_Stopped => State::Stopped,
            ffi::libvlc_Ended => State::Ended,
            ffi::libvlc_Error => State::Error,
            _ => State::NothingSpecial, // fallback
        }
    }
}

/// The type of a media descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Unknown,
    File,
    Directory,
    Disc,
    Stream,
    Playlist,
}

impl From<ffi::libvlc_media_type_t> for MediaType {
    fn from(value: ffi::libvlc_media_type_t) -> Self {
        match value {
            ffi::libvlc_media_type_file => MediaType::File,
            ffi::libvlc_media_type_directory => MediaType::Directory,
            ffi::libvlc_media_type_disc => MediaType::Disc,
            ffi::libvlc_media_type_stream => MediaType::Stream,
            ffi::libvlc_media_type_playlist => MediaType::Playlist,
            _ => MediaType::Unknown,
        }
    }
}

/// The audio channel routing of a media player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioChannel {
    Stereo,
    ReverseStereo,
    Left,
    Right,
    Dolby,
}

impl AudioChannel {
    pub(crate) fn from_raw(value: i32) -> Option<Self> {
        match value {
            ffi::libvlc_AudioChannel_Stereo => Some(AudioChannel::Stereo),
            ffi::libvlc_AudioChannel_RStereo => Some(AudioChannel::ReverseStereo),
            ffi::libvlc_AudioChannel_Left => Some(AudioChannel::Left),
            ffi::libvlc_AudioChannel_Right => Some(AudioChannel::Right),
            ffi::libvlc_AudioChannel_Dolbys => Some(AudioChannel::Dolby),
            _ => None,
        }
    }

    pub(crate) fn into_raw(self) -> i32 {
        match self {
            AudioChannel::Stereo => ffi::libvlc_AudioChannel_Stereo,
            AudioChannel::ReverseStereo => ffi::libvlc_AudioChannel_RStereo,
            AudioChannel::Left => ffi::libvlc_AudioChannel_Left,
            AudioChannel::Right => ffi::libvlc_AudioChannel_Right,
            AudioChannel::Dolby => ffi::libvlc_AudioChannel_Dolbys,
        }
    }
}
