//! A safe wrapper for [libvlc], written in Rust
//!
//! The primary goal is safety: engine objects are reference counted by their wrappers, event
//! callbacks are routed through owned registrations that are torn down before the object they
//! observe, and nothing in safe code can reach a released native handle.
//!
//! [libvlc]: https://www.videolan.org/vlc/libvlc.html
pub extern crate vlckit_sys;
pub use vlckit_sys as ffi;

pub use url::Url;

mod api;
pub mod command;
pub mod configuration;
pub mod context;
mod error;
pub mod event;
pub mod event_manager;
mod handle;
pub mod instance;
pub mod log;
pub mod media;
#[cfg(any(test, feature = "mock-engine"))]
pub mod mock;
pub mod player;
pub mod shared;
pub mod state;
pub mod time;

pub use api::API;
pub use error::{Error, ResourceKind, Result};

pub mod prelude {
    //! The vlckit prelude.
    //!
    //! Contains the types you most likely want to import anyway.
    pub use super::{
        command::{Command, Controller},
        configuration::{Configuration, Switches},
        event::EventType,
        event_manager::EventManager,
        instance::Instance,
        media::Media,
        player::Player,
        state::{AudioChannel, MediaType, State},
        time::Time,
        API,
    };
}

/// The version of the engine as a single number, see [`ffi::version`].
pub fn abi_version() -> i32 {
    ffi::LIBVLC_ABI_VERSION
}
