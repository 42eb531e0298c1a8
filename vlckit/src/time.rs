//! Engine time values.

use std::time::Duration;

use vlckit_sys as ffi;

/// A point or span on the media timeline, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time(i64);

impl Time {
    pub const ZERO: Time = Time(0);

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Time(millis)
    }

    #[inline]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns `None` for negative times.
    #[inline]
    pub fn to_duration(self) -> Option<Duration> {
        u64::try_from(self.0).ok().map(Duration::from_millis)
    }

    /// Maps the engine's `-1` "unavailable" sentinel to `None`.
    #[inline]
    pub(crate) fn from_raw(raw: ffi::libvlc_time_t) -> Option<Self> {
        if raw < 0 {
            None
        } else {
            Some(Time(raw))
        }
    }
}

impl From<Duration> for Time {
    #[inline]
    fn from(duration: Duration) -> Self {
        Time(i64::try_from(duration.as_millis()).unwrap_or(i64::MAX))
    }
}
