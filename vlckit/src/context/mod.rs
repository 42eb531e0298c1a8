//! Confined execution contexts.
//!
//! Engine callbacks arrive on engine threads. Application state that belongs to one thread is
//! reached by posting a task to that thread's [`Mailbox`] through a [`Poster`]:
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use vlckit::context;
//!
//! let (poster, mut mailbox) = context::channel();
//! let ends = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&ends);
//! let on_end = poster.bind(move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! // An engine thread fires.
//! std::thread::spawn(on_end).join().unwrap();
//! assert_eq!(ends.load(Ordering::SeqCst), 0);
//!
//! assert_eq!(mailbox.run_pending(), 1);
//! assert_eq!(ends.load(Ordering::SeqCst), 1);
//! ```

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::executor::block_on;
use futures::StreamExt;
use std::fmt;
use std::sync::Arc;

#[cfg(test)]
mod tests;

type Task = Box<dyn FnOnce() + Send>;

/// Creates a confined context: the [`Mailbox`] is drained by its owning thread, any number of
/// [`Poster`]s feed it from anywhere.
pub fn channel() -> (Poster, Mailbox) {
    let (sender, receiver) = mpsc::unbounded();
    (Poster { sender }, Mailbox { receiver })
}

/// Sends tasks to a [`Mailbox`].
#[derive(Clone)]
pub struct Poster {
    sender: UnboundedSender<Task>,
}

impl fmt::Debug for Poster {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Poster")
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Poster {
    /// Queues `task`. Never runs it in place. Returns `false` if the mailbox is gone.
    pub fn post<F>(&self, task: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender.unbounded_send(Box::new(task)).is_ok()
    }

    /// Turns `f` into an event callback that posts `f` every time it is called.
    pub fn bind<F>(&self, f: F) -> impl Fn() + Send + Sync + 'static
    where
        F: Fn() + Send + Sync + 'static,
    {
        let poster = self.clone();
        let f = Arc::new(f);
        move || {
            let f = Arc::clone(&f);
            poster.post(move || (*f)());
        }
    }

    /// Whether the mailbox is gone.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Runs posted tasks on the thread that owns it.
pub struct Mailbox {
    receiver: UnboundedReceiver<Task>,
}

impl fmt::Debug for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mailbox").finish_non_exhaustive()
    }
}

impl Mailbox {
    /// Runs every task that is ready, without waiting. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Waits for the next task and runs it. Returns `false`, without waiting, once every
    /// [`Poster`] is gone and the queue is empty.
    pub fn run_next(&mut self) -> bool {
        match block_on(self.receiver.next()) {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }
}
