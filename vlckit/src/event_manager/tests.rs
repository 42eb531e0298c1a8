use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Barrier, Weak};
use std::thread;
use std::time::Duration;

use super::*;
use crate::configuration::Configuration;
use crate::instance::Instance;
use crate::media::Media;
use crate::mock::{self, Call};
use crate::player::Player;

fn setup_player() -> (Instance, Player) {
    let instance =
        Instance::new(mock::api(), &Configuration::default()).expect("Failed to create instance");
    let media = Media::new_location(&instance, "file:///tmp/movie.mkv").expect("Failed to create media");
    let player = Player::with_media(&media).expect("Failed to create player");
    (instance, player)
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let count = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&count);
    (count, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn test_register_fires_callback() {
    let (instance, player) = setup_player();
    let events = player.event_manager().unwrap();
    let (ended, on_end) = counter();

    events.register(EventType::MediaPlayerEndReached, on_end).unwrap();
    mock::fire(&player, EventType::MediaPlayerEndReached);
    assert_eq!(ended.load(Ordering::SeqCst), 1);

    // Other kinds are filtered out.
    mock::fire(&player, EventType::MediaPlayerPaused);
    assert_eq!(ended.load(Ordering::SeqCst), 1);

    assert!(mock::journal(&instance).violations().is_empty());
}

#[test]
fn test_attachments_match_registrations() {
    let (instance, player) = setup_player();
    let journal = mock::journal(&instance);
    let id = mock::id(&player);
    let events = player.event_manager().unwrap();

    events.register(EventType::MediaPlayerPlaying, || {}).unwrap();
    events.register(EventType::MediaPlayerPaused, || {}).unwrap();
    events.register(EventType::MediaPlayerPaused, || {}).unwrap();
    assert_eq!(events.registration_count(), 3);
    assert_eq!(journal.attachments(id), 3);

    events.unregister(EventType::MediaPlayerPaused);
    assert_eq!(events.registration_count(), 1);
    assert_eq!(journal.attachments(id), 1);

    // Unregistering is idempotent.
    events.unregister(EventType::MediaPlayerPaused);
    events.unregister(EventType::MediaPlayerStopped);
    assert_eq!(journal.attachments(id), 1);

    events.register(EventType::MediaPlayerStopped, || {}).unwrap();
    events.unregister_all();
    assert_eq!(events.registration_count(), 0);
    assert_eq!(journal.attachments(id), 0);
    assert!(journal.violations().is_empty());
}

#[test]
fn test_duplicate_registration_fires_twice() {
    let (_instance, player) = setup_player();
    let events = player.event_manager().unwrap();
    let (count, callback) = counter();
    let callback = Arc::new(callback);

    let first = Arc::clone(&callback);
    let second = Arc::clone(&callback);
    events.register(EventType::MediaPlayerEndReached, move || (*first)()).unwrap();
    events.register(EventType::MediaPlayerEndReached, move || (*second)()).unwrap();

    mock::fire(&player, EventType::MediaPlayerEndReached);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[test]
fn test_unregister_stops_notifications() {
    let (_instance, player) = setup_player();
    let events = player.event_manager().unwrap();
    let (count, callback) = counter();

    events.register(EventType::MediaPlayerStopped, callback).unwrap();
    events.unregister(EventType::MediaPlayerStopped);
    mock::fire(&player, EventType::MediaPlayerStopped);

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(!events.is_registered(EventType::MediaPlayerStopped));
}

#[test]
fn test_concurrent_register_and_unregister() {
    let (instance, player) = setup_player();
    let journal = mock::journal(&instance);
    let id = mock::id(&player);
    let events = player.event_manager().unwrap();
    journal.delay_attachments(Some(Duration::from_micros(200)));

    let barrier = Barrier::new(2);
    for _ in 0..200 {
        thread::scope(|scope| {
            scope.spawn(|| {
                barrier.wait();
                events.unregister(EventType::MediaPlayerPaused);
            });
            barrier.wait();
            events.register(EventType::MediaPlayerPaused, || {}).unwrap();
        });
        assert_eq!(journal.attachments(id), events.registration_count());
    }

    events.unregister_all();
    assert_eq!(journal.attachments(id), 0);
    assert!(journal.violations().is_empty());
}

#[test]
fn test_events_in_registration_order() {
    let (_instance, player) = setup_player();
    let events = player.event_manager().unwrap();

    events.register(EventType::MediaPlayerPaused, || {}).unwrap();
    events.register(EventType::MediaPlayerPlaying, || {}).unwrap();
    events.register(EventType::MediaPlayerPaused, || {}).unwrap();

    assert_eq!(
        events.events(),
        [EventType::MediaPlayerPaused, EventType::MediaPlayerPlaying]
    );
    assert!(events.is_registered(EventType::MediaPlayerPlaying));
    assert!(!events.is_registered(EventType::MediaPlayerEndReached));
}

#[test]
fn test_emitter_drop_detaches_before_release() {
    let (instance, player) = setup_player();
    let journal = mock::journal(&instance);
    let id = mock::id(&player);

    let events = player.event_manager().unwrap();
    events.register(EventType::MediaPlayerEndReached, || {}).unwrap();
    events.register(EventType::MediaPlayerEncounteredError, || {}).unwrap();
    drop(player);

    let last_detach = journal
        .calls()
        .iter()
        .rposition(|call| matches!(call, Call::Detach(object, _) if *object == id))
        .expect("no detach recorded");
    let release = journal.index_of(&Call::Release(id)).expect("no release recorded");
    assert!(last_detach < release);
    assert_eq!(journal.count(|call| matches!(call, Call::Detach(object, _) if *object == id)), 2);
    assert!(journal.is_freed(id));
    assert!(journal.violations().is_empty());
}

#[test]
fn test_registration_failure() {
    let (instance, player) = setup_player();
    let journal = mock::journal(&instance);
    let events = player.event_manager().unwrap();

    journal.limit_attachments(Some(1));
    events.register(EventType::MediaPlayerPlaying, || {}).unwrap();
    let err = events
        .register(EventType::MediaPlayerPaused, || {})
        .unwrap_err();
    assert!(matches!(err, Error::RegistrationFailed(EventType::MediaPlayerPaused)));

    // The failed registration left nothing behind.
    assert_eq!(events.registration_count(), 1);
    assert_eq!(events.events(), [EventType::MediaPlayerPlaying]);
    assert_eq!(journal.total_attachments(), 1);
}

#[test]
fn test_bridges_are_independent() {
    let (_instance, player) = setup_player();
    let media = player.media().unwrap();
    let (media_count, on_media) = counter();
    let (player_count, on_player) = counter();

    media
        .event_manager()
        .unwrap()
        .register(EventType::MediaStateChanged, on_media)
        .unwrap();
    player
        .event_manager()
        .unwrap()
        .register(EventType::MediaStateChanged, on_player)
        .unwrap();

    mock::fire(&media, EventType::MediaStateChanged);
    assert_eq!(media_count.load(Ordering::SeqCst), 1);
    assert_eq!(player_count.load(Ordering::SeqCst), 0);
}

#[test]
fn test_callbacks_run_on_engine_thread() {
    let (_instance, player) = setup_player();
    let (tx, rx) = mpsc::channel();

    player
        .event_manager()
        .unwrap()
        .register(EventType::MediaPlayerEncounteredError, move || {
            tx.send(thread::current().id()).unwrap();
        })
        .unwrap();
    mock::fire_from_thread(&player, EventType::MediaPlayerEncounteredError);

    let fired_on = rx.try_recv().expect("callback did not run");
    assert_ne!(fired_on, thread::current().id());
}

#[test]
fn test_firing_after_registry_is_gone() {
    let ticket = Ticket {
        id: 0,
        registry: Weak::new(),
    };
    let event = ffi::libvlc_event_t {
        type_: EventType::MediaPlayerEndReached.into_raw(),
        p_obj: std::ptr::null_mut(),
        u: ffi::libvlc_event_payload { new_state: 0 },
    };

    // Resolves to nothing instead of touching freed memory.
    unsafe { dispatch(&event, &ticket as *const Ticket as *mut c_void) };
}

#[test]
fn test_null_manager() {
    let err = unsafe {
        EventManager::from_ptr(mock::api(), std::ptr::null_mut(), ResourceKind::Player)
    }
    .unwrap_err();
    assert!(matches!(err, Error::NoEventManager(ResourceKind::Player)));
}
