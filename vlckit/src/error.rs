use std::ffi::NulError;
use std::{fmt, io, result};

use thiserror::Error;

use crate::event::EventType;

/// The kind of native object an operation was about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Instance,
    Media,
    Player,
}

impl fmt::Display for ResourceKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Instance => "engine instance",
            ResourceKind::Media => "media",
            ResourceKind::Player => "media player",
        })
    }
}

/// The error type for `vlckit` operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Couldn't convert to a CString")]
    CStringConversion(#[from] NulError),
    #[error("The engine couldn't create the {0}")]
    ResourceUnavailable(ResourceKind),
    #[error("The {0} has no event manager")]
    NoEventManager(ResourceKind),
    #[error("Couldn't register for {0:?}")]
    RegistrationFailed(EventType),
    #[error("The media belongs to a different engine")]
    ForeignMedia,
    #[error("Invalid media location: {0}")]
    InvalidLocation(String),
    #[error("A shared engine instance is already installed")]
    SharedInstanceInstalled,
    #[error("The command queue has shut down")]
    CommandQueueClosed,
    #[error("Couldn't spawn the command thread")]
    Spawn(#[source] io::Error),
}

/// A specialized `Result` type for `vlckit` operations.
pub type Result<T> = result::Result<T, Error>;
