//! Routing of native event firings to application callbacks.

use std::ffi::c_void;
use std::fmt;
use std::panic;
use std::process;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, trace, warn};
use vlckit_sys as ffi;

use crate::api::API;
use crate::error::{Error, ResourceKind, Result};
use crate::event::EventType;

#[cfg(test)]
mod tests;

type Callback = Arc<dyn Fn() + Send + Sync>;

/// The correlation token handed to the engine with every subscription.
///
/// The engine only ever sees a pointer to one of these. It names the registry weakly, so a
/// firing that races the registry's destruction resolves to nothing.
#[repr(C)]
struct Ticket {
    id: u64,
    registry: Weak<Registry>,
}

/// Owning pointer to a heap `Ticket` that the engine also holds.
struct TicketPtr(NonNull<Ticket>);

// The ticket is only read through shared references until it is freed after detaching.
unsafe impl Send for TicketPtr {}

impl TicketPtr {
    fn new(ticket: Ticket) -> Self {
        TicketPtr(NonNull::from(Box::leak(Box::new(ticket))))
    }

    #[inline]
    fn as_user_data(&self) -> *mut c_void {
        self.0.as_ptr().cast()
    }

    /// Frees the ticket.
    ///
    /// # Safety
    /// The engine must no longer hold a subscription with this ticket.
    unsafe fn free(self) {
        drop(Box::from_raw(self.0.as_ptr()));
    }
}

struct Entry {
    id: u64,
    event: EventType,
    callback: Callback,
    ticket: TicketPtr,
}

/// The registrations of one emitter.
#[derive(Default)]
struct Registry {
    entries: Mutex<Vec<Entry>>,
    next_id: AtomicU64,
}

impl Registry {
    fn entries(&self) -> MutexGuard<'_, Vec<Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fire(&self, id: u64, raw: ffi::libvlc_event_type_t) {
        let callbacks: Vec<Callback> = self
            .entries()
            .iter()
            .filter(|entry| entry.id == id && entry.event.into_raw() == raw)
            .map(|entry| Arc::clone(&entry.callback))
            .collect();

        for callback in callbacks {
            callback();
        }
    }
}

/// The single native callback behind every subscription.
unsafe extern "C" fn dispatch(event: *const ffi::libvlc_event_t, user_data: *mut c_void) {
    if event.is_null() || user_data.is_null() {
        return;
    }

    let closure = panic::AssertUnwindSafe(move || {
        let ticket = &*(user_data as *const Ticket);
        let raw = (*event).type_;
        match ticket.registry.upgrade() {
            Some(registry) => registry.fire(ticket.id, raw),
            None => trace!("dropping event {:#x} for a released emitter", raw),
        }
    });

    if panic::catch_unwind(closure).is_err() {
        process::abort();
    }
}

/// The event bridge of one emitter.
///
/// Each [`register`](EventManager::register) call installs its own native subscription, so
/// registering the same callback twice makes it fire twice. Callbacks run on whichever thread the
/// engine fires from and must not register or unregister on the same emitter synchronously; post
/// to a [`Poster`](crate::context::Poster) instead.
///
/// Dropping the bridge removes every subscription.
pub struct EventManager {
    api: API,
    manager: NonNull<ffi::libvlc_event_manager_t>,
    registry: Arc<Registry>,
    // Held from an entry change until the matching native attach or detach returned.
    attaching: Mutex<()>,
}

unsafe impl Send for EventManager {}
unsafe impl Sync for EventManager {}

impl fmt::Debug for EventManager {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("EventManager")
            .field("manager", &self.manager)
            .field("events", &self.events())
            .finish()
    }
}

impl EventManager {
    /// Wraps the event manager sub-handle of an emitter.
    ///
    /// # Safety
    /// `manager` must be null or stay valid until the returned value is dropped.
    pub(crate) unsafe fn from_ptr(
        api: API,
        manager: *mut ffi::libvlc_event_manager_t,
        kind: ResourceKind,
    ) -> Result<Self> {
        let manager = NonNull::new(manager).ok_or(Error::NoEventManager(kind))?;
        Ok(Self {
            api,
            manager,
            registry: Arc::new(Registry::default()),
            attaching: Mutex::new(()),
        })
    }

    fn attaching(&self) -> MutexGuard<'_, ()> {
        self.attaching.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Calls `callback` every time the emitter fires `event`.
    pub fn register<F>(&self, event: EventType, callback: F) -> Result<()>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let ticket = TicketPtr::new(Ticket {
            id,
            registry: Arc::downgrade(&self.registry),
        });
        let user_data = ticket.as_user_data();

        let _attaching = self.attaching();
        self.registry.entries().push(Entry {
            id,
            event,
            callback: Arc::new(callback),
            ticket,
        });

        let rv = unsafe {
            self.api
                .event_attach(self.manager.as_ptr(), event.into_raw(), Some(dispatch), user_data)
        };
        if rv != 0 {
            warn!("engine refused a subscription to {:?} ({})", event, rv);
            let mut entries = self.registry.entries();
            if let Some(index) = entries.iter().position(|entry| entry.id == id) {
                let entry = entries.remove(index);
                drop(entries);
                // Never attached.
                unsafe { entry.ticket.free() };
            }
            return Err(Error::RegistrationFailed(event));
        }

        debug!("registered for {:?}", event);
        Ok(())
    }

    /// Removes every registration for `event`.
    pub fn unregister(&self, event: EventType) {
        let _attaching = self.attaching();
        let removed = {
            let mut entries = self.registry.entries();
            let (removed, kept): (Vec<Entry>, Vec<Entry>) =
                entries.drain(..).partition(|entry| entry.event == event);
            *entries = kept;
            removed
        };
        self.detach(removed);
    }

    /// Removes every registration.
    pub fn unregister_all(&self) {
        let _attaching = self.attaching();
        let removed = std::mem::take(&mut *self.registry.entries());
        self.detach(removed);
    }

    fn detach(&self, removed: Vec<Entry>) {
        if !removed.is_empty() {
            debug!("detaching {} registrations", removed.len());
        }
        for entry in removed {
            unsafe {
                self.api.event_detach(
                    self.manager.as_ptr(),
                    entry.event.into_raw(),
                    Some(dispatch),
                    entry.ticket.as_user_data(),
                );
                entry.ticket.free();
            }
        }
    }

    /// The distinct registered event kinds, in first registration order.
    pub fn events(&self) -> Vec<EventType> {
        let mut events = Vec::new();
        for entry in self.registry.entries().iter() {
            if !events.contains(&entry.event) {
                events.push(entry.event);
            }
        }
        events
    }

    pub fn registration_count(&self) -> usize {
        self.registry.entries().len()
    }

    pub fn is_registered(&self, event: EventType) -> bool {
        self.registry.entries().iter().any(|entry| entry.event == event)
    }
}

impl Drop for EventManager {
    fn drop(&mut self) {
        self.unregister_all();
    }
}
