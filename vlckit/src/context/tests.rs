use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use super::*;

#[test]
fn test_post_never_runs_in_place() {
    let (poster, mut mailbox) = channel();
    let ran = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&ran);
    assert!(poster.post(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));
    assert_eq!(ran.load(Ordering::SeqCst), 0);

    assert_eq!(mailbox.run_pending(), 1);
    assert_eq!(ran.load(Ordering::SeqCst), 1);
    assert_eq!(mailbox.run_pending(), 0);
}

#[test]
fn test_tasks_run_on_the_owning_thread() {
    let (poster, mut mailbox) = channel();
    let (tx, rx) = mpsc::channel();

    let callback = poster.bind(move || tx.send(thread::current().id()).unwrap());
    thread::spawn(move || {
        callback();
        callback();
    })
    .join()
    .unwrap();

    assert_eq!(mailbox.run_pending(), 2);
    let owner = thread::current().id();
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), [owner, owner]);
}

#[test]
fn test_tasks_keep_post_order() {
    let (poster, mut mailbox) = channel();
    let (tx, rx) = mpsc::channel();

    for i in 0..5 {
        let tx = tx.clone();
        poster.post(move || tx.send(i).unwrap());
    }
    mailbox.run_pending();

    assert_eq!(rx.try_iter().collect::<Vec<_>>(), [0, 1, 2, 3, 4]);
}

#[test]
fn test_run_pending_drains_after_posters_are_gone() {
    let (poster, mut mailbox) = channel();
    let (tx, rx) = mpsc::channel();

    for i in 0..3 {
        let tx = tx.clone();
        poster.post(move || tx.send(i).unwrap());
    }
    drop(poster);

    assert_eq!(mailbox.run_pending(), 3);
    assert_eq!(mailbox.run_pending(), 0);
    assert_eq!(rx.try_iter().collect::<Vec<_>>(), [0, 1, 2]);
}

#[test]
fn test_run_next_waits_for_a_task() {
    let (poster, mut mailbox) = channel();
    let (tx, rx) = mpsc::channel();

    let worker = thread::spawn(move || {
        thread::sleep(std::time::Duration::from_millis(20));
        poster.post(move || tx.send(()).unwrap());
    });

    assert!(mailbox.run_next());
    assert_eq!(rx.try_recv(), Ok(()));
    worker.join().unwrap();

    // The only poster is gone.
    assert!(!mailbox.run_next());
}

#[test]
fn test_post_after_mailbox_dropped() {
    let (poster, mailbox) = channel();
    drop(mailbox);

    assert!(poster.is_closed());
    assert!(!poster.post(|| unreachable!()));
}
