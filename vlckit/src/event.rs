//! Native event kinds.

use vlckit_sys as ffi;

macro_rules! event_types {
    ($($(#[$attr:meta])* $variant:ident => $raw:ident,)*) => {
        /// The kind of an event fired by the engine.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum EventType {
            $($(#[$attr])* $variant = ffi::$raw as isize,)*
        }

        impl EventType {
            /// Returns the event kind for a raw engine value, `None` for values this crate
            /// doesn't know about.
            pub fn from_raw(raw: ffi::libvlc_event_type_t) -> Option<Self> {
                match raw {
                    $(ffi::$raw => Some(EventType::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

event_types! {
    MediaMetaChanged => libvlc_MediaMetaChanged,
    MediaSubItemAdded => libvlc_MediaSubItemAdded,
    MediaDurationChanged => libvlc_MediaDurationChanged,
    MediaParsedChanged => libvlc_MediaParsedChanged,
    MediaFreed => libvlc_MediaFreed,
    MediaStateChanged => libvlc_MediaStateChanged,
    MediaSubItemTreeAdded => libvlc_MediaSubItemTreeAdded,

    MediaPlayerMediaChanged => libvlc_MediaPlayerMediaChanged,
    MediaPlayerNothingSpecial => libvlc_MediaPlayerNothingSpecial,
    MediaPlayerOpening => libvlc_MediaPlayerOpening,
    MediaPlayerBuffering => libvlc_MediaPlayerBuffering,
    MediaPlayerPlaying => libvlc_MediaPlayerPlaying,
    MediaPlayerPaused => libvlc_MediaPlayerPaused,
    MediaPlayerStopped => libvlc_MediaPlayerStopped,
    MediaPlayerForward => libvlc_MediaPlayerForward,
    MediaPlayerBackward => libvlc_MediaPlayerBackward,
    /// The player reached the end of its media.
    MediaPlayerEndReached => libvlc_MediaPlayerEndReached,
    MediaPlayerEncounteredError => libvlc_MediaPlayerEncounteredError,
    MediaPlayerTimeChanged => libvlc_MediaPlayerTimeChanged,
    MediaPlayerPositionChanged => libvlc_MediaPlayerPositionChanged,
    MediaPlayerSeekableChanged => libvlc_MediaPlayerSeekableChanged,
    MediaPlayerPausableChanged => libvlc_MediaPlayerPausableChanged,
    MediaPlayerTitleChanged => libvlc_MediaPlayerTitleChanged,
    MediaPlayerSnapshotTaken => libvlc_MediaPlayerSnapshotTaken,
    MediaPlayerLengthChanged => libvlc_MediaPlayerLengthChanged,
    MediaPlayerVout => libvlc_MediaPlayerVout,
    MediaPlayerScrambledChanged => libvlc_MediaPlayerScrambledChanged,
    MediaPlayerESAdded => libvlc_MediaPlayerESAdded,
    MediaPlayerESDeleted => libvlc_MediaPlayerESDeleted,
    MediaPlayerESSelected => libvlc_MediaPlayerESSelected,
    MediaPlayerCorked => libvlc_MediaPlayerCorked,
    MediaPlayerUncorked => libvlc_MediaPlayerUncorked,
    MediaPlayerMuted => libvlc_MediaPlayerMuted,
    MediaPlayerUnmuted => libvlc_MediaPlayerUnmuted,
    MediaPlayerAudioVolume => libvlc_MediaPlayerAudioVolume,
    MediaPlayerAudioDevice => libvlc_MediaPlayerAudioDevice,
    MediaPlayerChapterChanged => libvlc_MediaPlayerChapterChanged,

    MediaListItemAdded => libvlc_MediaListItemAdded,
    MediaListWillAddItem => libvlc_MediaListWillAddItem,
    MediaListItemDeleted => libvlc_MediaListItemDeleted,
    MediaListWillDeleteItem => libvlc_MediaListWillDeleteItem,
    MediaListEndReached => libvlc_MediaListEndReached,

    MediaListViewItemAdded => libvlc_MediaListViewItemAdded,
    MediaListViewWillAddItem => libvlc_MediaListViewWillAddItem,
    MediaListViewItemDeleted => libvlc_MediaListViewItemDeleted,
    MediaListViewWillDeleteItem => libvlc_MediaListViewWillDeleteItem,

    MediaListPlayerPlayed => libvlc_MediaListPlayerPlayed,
    MediaListPlayerNextItemSet => libvlc_MediaListPlayerNextItemSet,
    MediaListPlayerStopped => libvlc_MediaListPlayerStopped,

    MediaDiscovererStarted => libvlc_MediaDiscovererStarted,
    MediaDiscovererEnded => libvlc_MediaDiscovererEnded,
    RendererDiscovererItemAdded => libvlc_RendererDiscovererItemAdded,
    RendererDiscovererItemDeleted => libvlc_RendererDiscovererItemDeleted,

    VlmMediaAdded => libvlc_VlmMediaAdded,
    VlmMediaRemoved => libvlc_VlmMediaRemoved,
    VlmMediaChanged => libvlc_VlmMediaChanged,
    VlmMediaInstanceStarted => libvlc_VlmMediaInstanceStarted,
    VlmMediaInstanceStopped => libvlc_VlmMediaInstanceStopped,
    VlmMediaInstanceStatusInit => libvlc_VlmMediaInstanceStatusInit,
    VlmMediaInstanceStatusOpening => libvlc_VlmMediaInstanceStatusOpening,
    VlmMediaInstanceStatusPlaying => libvlc_VlmMediaInstanceStatusPlaying,
    VlmMediaInstanceStatusPause => libvlc_VlmMediaInstanceStatusPause,
    VlmMediaInstanceStatusEnd => libvlc_VlmMediaInstanceStatusEnd,
    VlmMediaInstanceStatusError => libvlc_VlmMediaInstanceStatusError,
}

impl EventType {
    /// Returns the raw engine value.
    #[inline]
    pub fn into_raw(self) -> ffi::libvlc_event_type_t {
        self as ffi::libvlc_event_type_t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_values() {
        assert_eq!(EventType::MediaMetaChanged.into_raw(), 0);
        assert_eq!(EventType::MediaPlayerMediaChanged.into_raw(), 0x100);
        assert_eq!(EventType::MediaPlayerEndReached.into_raw(), 0x109);
        assert_eq!(EventType::MediaListItemAdded.into_raw(), 0x200);
        assert_eq!(EventType::VlmMediaInstanceStatusError.into_raw(), 0x60a);
    }

    #[test]
    fn test_unknown_event_type() {
        assert_eq!(EventType::from_raw(0x7fff), None);
        assert_eq!(
            EventType::from_raw(ffi::libvlc_MediaPlayerEncounteredError),
            Some(EventType::MediaPlayerEncounteredError)
        );
    }
}
