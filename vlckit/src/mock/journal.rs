use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use super::FakeObject;

/// Identifies one fake native object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

/// The kind of a fake native object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Instance,
    Media,
    Player,
}

/// One native call observed by the fake engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(ObjectKind, ObjectId),
    Retain(ObjectId),
    Release(ObjectId),
    /// The last reference went away.
    Freed(ObjectId),
    Attach(ObjectId, i32),
    Detach(ObjectId, i32),
    SetMedia(ObjectId, Option<ObjectId>),
    Play(ObjectId),
    Pause(ObjectId),
    Stop(ObjectId),
    SetPosition(ObjectId),
    SetTime(ObjectId),
    LogSet(ObjectId),
    LogUnset(ObjectId),
    SetUserAgent(ObjectId, String, String),
    SetAppId(ObjectId, String, String, String),
    /// A call broke the native lifetime contract, e.g. touched a freed object.
    Violation(String),
}

/// The call log shared by every object created from one fake engine instance.
#[derive(Debug)]
pub struct Journal {
    calls: Mutex<Vec<Call>>,
    objects: Mutex<Vec<&'static FakeObject>>,
    attach_limit: Mutex<Option<usize>>,
    attach_latency: Mutex<Option<Duration>>,
    next_id: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Journal {
    pub(super) fn new() -> Self {
        Journal {
            calls: Mutex::new(Vec::new()),
            objects: Mutex::new(Vec::new()),
            attach_limit: Mutex::new(None),
            attach_latency: Mutex::new(None),
            next_id: AtomicU64::new(1),
        }
    }

    pub(super) fn next_id(&self) -> ObjectId {
        ObjectId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    pub(super) fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }

    pub(super) fn adopt(&self, object: &'static FakeObject) {
        lock(&self.objects).push(object);
    }

    fn object(&self, id: ObjectId) -> Option<&'static FakeObject> {
        lock(&self.objects).iter().copied().find(|object| object.id == id)
    }

    /// Every call recorded so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    /// The index of the first recorded call equal to `call`.
    pub fn index_of(&self, call: &Call) -> Option<usize> {
        lock(&self.calls).iter().position(|c| c == call)
    }

    /// The index of the last recorded call equal to `call`.
    pub fn last_index_of(&self, call: &Call) -> Option<usize> {
        lock(&self.calls).iter().rposition(|c| c == call)
    }

    /// How many recorded calls satisfy `predicate`.
    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        lock(&self.calls).iter().filter(|c| predicate(c)).count()
    }

    pub fn violations(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                Call::Violation(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// The native reference count of an object.
    pub fn ref_count(&self, id: ObjectId) -> usize {
        self.object(id).map_or(0, FakeObject::ref_count)
    }

    pub fn is_freed(&self, id: ObjectId) -> bool {
        self.ref_count(id) == 0
    }

    /// Live native event subscriptions on one object.
    pub fn attachments(&self, id: ObjectId) -> usize {
        self.object(id).map_or(0, FakeObject::attachment_count)
    }

    /// Live native event subscriptions across every object of this engine.
    pub fn total_attachments(&self) -> usize {
        lock(&self.objects)
            .iter()
            .map(|object| object.attachment_count())
            .sum()
    }

    /// Makes `event_attach` fail once `limit` subscriptions are live across the engine.
    pub fn limit_attachments(&self, limit: Option<usize>) {
        *lock(&self.attach_limit) = limit;
    }

    pub(super) fn attach_allowed(&self) -> bool {
        match *lock(&self.attach_limit) {
            Some(limit) => self.total_attachments() < limit,
            None => true,
        }
    }

    /// Makes every `event_attach` sleep for `latency` before it subscribes.
    pub fn delay_attachments(&self, latency: Option<Duration>) {
        *lock(&self.attach_latency) = latency;
    }

    pub(super) fn attach_latency(&self) -> Option<Duration> {
        *lock(&self.attach_latency)
    }
}
