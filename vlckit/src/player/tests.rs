use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;
use crate::configuration::Configuration;
use crate::context;
use crate::event::EventType;
use crate::mock::{self, Call};
use crate::Url;

fn setup_instance() -> Instance {
    Instance::new(mock::api(), &Configuration::default()).expect("Failed to create instance")
}

fn setup_player(instance: &Instance) -> Player {
    let media = Media::new_location(instance, "file:///tmp/movie.mkv").expect("Failed to create media");
    Player::with_media(&media).expect("Failed to create player")
}

#[test]
fn test_ended_scenario() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let url = Url::from_file_path("/tmp/movie.mkv").unwrap();
    let media = Media::from_url(&instance, &url).unwrap();
    let player = Player::with_media(&media).unwrap();
    let player_id = mock::id(&player);

    let (poster, mut mailbox) = context::channel();
    let ended = Arc::new(AtomicUsize::new(0));
    let errors = Arc::new(AtomicUsize::new(0));
    let events = player.event_manager().unwrap();
    let counter = Arc::clone(&ended);
    events
        .register(
            EventType::MediaPlayerEndReached,
            poster.bind(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();
    let counter = Arc::clone(&errors);
    events
        .register(
            EventType::MediaPlayerEncounteredError,
            poster.bind(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        )
        .unwrap();

    assert!(player.play());
    assert_eq!(player.state(), State::Playing);

    mock::fire_from_thread(&player, EventType::MediaPlayerEndReached);
    // Nothing ran in place on the engine thread.
    assert_eq!(ended.load(Ordering::SeqCst), 0);
    mailbox.run_pending();
    assert_eq!(ended.load(Ordering::SeqCst), 1);
    assert_eq!(errors.load(Ordering::SeqCst), 0);
    assert_eq!(player.state(), State::Ended);

    // A bare play() is a no-op.
    let plays = journal.count(|call| *call == Call::Play(player_id));
    assert!(!player.play());
    assert!(!player.play());
    assert_eq!(journal.count(|call| *call == Call::Play(player_id)), plays);
    assert_eq!(player.state(), State::Ended);

    player.set_position(0.0);
    assert!(player.play());
    assert_eq!(player.state(), State::Playing);
    assert_eq!(journal.count(|call| *call == Call::Play(player_id)), plays + 1);
    assert!(journal.violations().is_empty());
}

#[test]
fn test_time_reset_rearms() {
    let instance = setup_instance();
    let player = setup_player(&instance);

    assert!(player.play());
    mock::fire(&player, EventType::MediaPlayerEndReached);
    assert!(!player.play());

    player.set_time(Time::ZERO);
    assert!(player.play());
}

#[test]
fn test_media_assignment_rearms() {
    let instance = setup_instance();
    let player = setup_player(&instance);

    assert!(player.play());
    mock::fire(&player, EventType::MediaPlayerEndReached);
    assert!(!player.play());

    let next = Media::new_location(&instance, "file:///tmp/next.mkv").unwrap();
    player.set_media(Some(next)).unwrap();
    assert!(player.play());
}

#[test]
fn test_reset_before_end_does_not_rearm() {
    let instance = setup_instance();
    let player = setup_player(&instance);

    assert!(player.play());
    player.set_position(0.0);
    mock::fire(&player, EventType::MediaPlayerEndReached);
    assert!(!player.play());
}

#[test]
fn test_refused_play_keeps_the_reset() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let player = Player::new(&instance).unwrap();
    let player_id = mock::id(&player);

    mock::fire(&player, EventType::MediaPlayerEndReached);
    player.set_position(0.0);

    // Without media the engine refuses, but the reset is not used up.
    assert!(!player.play());
    assert!(!player.play());
    assert_eq!(journal.count(|call| *call == Call::Play(player_id)), 2);
}

#[test]
fn test_set_media_refuses_other_engines() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let player = setup_player(&instance);
    let player_id = mock::id(&player);
    let current = mock::id(&player.media().unwrap());

    let elsewhere = Instance::new(mock::second_api(), &Configuration::default()).unwrap();
    let media = Media::new_location(&elsewhere, "file:///tmp/other.mkv").unwrap();
    let media_id = mock::id(&media);
    assert!(matches!(
        player.set_media(Some(media)),
        Err(Error::ForeignMedia)
    ));

    assert_eq!(player.media().map(|media| mock::id(&media)), Some(current));
    assert_eq!(
        journal.count(|call| matches!(call, Call::SetMedia(id, _) if *id == player_id)),
        0
    );
    assert!(mock::journal(&elsewhere).is_freed(media_id));
}

#[test]
fn test_set_media_switches_before_release() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let player = setup_player(&instance);
    let player_id = mock::id(&player);
    let old_id = mock::id(&player.media().unwrap());

    let next = Media::new_location(&instance, "file:///tmp/next.mkv").unwrap();
    let next_id = mock::id(&next);
    player.set_media(Some(next)).unwrap();

    let switch = journal
        .index_of(&Call::SetMedia(player_id, Some(next_id)))
        .unwrap();
    let freed = journal.index_of(&Call::Freed(old_id)).unwrap();
    assert!(switch < freed);
    assert!(journal.is_freed(old_id));

    // The player and its wrapper each hold one reference.
    assert_eq!(journal.ref_count(next_id), 2);
    assert_eq!(player.media().map(|media| mock::id(&media)), Some(next_id));

    player.set_media(None).unwrap();
    assert!(player.media().is_none());
    assert!(journal.is_freed(next_id));
    assert!(journal.violations().is_empty());
}

#[test]
fn test_sentinels_without_media() {
    let instance = setup_instance();
    let player = Player::new(&instance).unwrap();

    assert!(player.media().is_none());
    assert_eq!(player.state(), State::NothingSpecial);
    assert_eq!(player.time(), None);
    assert_eq!(player.length(), None);
    assert_eq!(player.position(), None);
    assert_eq!(player.volume(), None);
    assert_eq!(player.audio_track_count(), None);
    assert_eq!(player.audio_track(), None);
    assert_eq!(player.audio_channel(), None);
    assert!(!player.play());
    assert!(!player.will_play());
}

#[test]
fn test_accessors_with_media() {
    let instance = setup_instance();
    let player = setup_player(&instance);

    assert!(player.will_play());
    assert!(player.is_seekable());
    assert!(player.can_pause());
    assert_eq!(player.length(), Some(Time::from_millis(mock::MEDIA_DURATION)));
    assert_eq!(player.time(), Some(Time::ZERO));
    assert_eq!(player.position(), Some(0.0));

    player.set_position(0.5);
    assert_eq!(player.position(), Some(0.5));
    assert_eq!(player.time(), Some(Time::from_millis(mock::MEDIA_DURATION / 2)));

    // Positions are passed through unclamped.
    player.set_position(1.5);
    assert_eq!(player.position(), Some(1.5));

    assert!(player.set_rate(2.0));
    assert_eq!(player.rate(), 2.0);
    assert!(!player.set_rate(-1.0));
    assert_eq!(player.rate(), 2.0);
}

#[test]
fn test_audio_accessors() {
    let instance = setup_instance();
    let player = setup_player(&instance);

    assert_eq!(player.volume(), Some(100));
    assert!(player.set_volume(50));
    assert_eq!(player.volume(), Some(50));
    assert!(!player.set_volume(u32::MAX));

    assert!(!player.is_muted());
    player.set_mute(true);
    assert!(player.is_muted());

    assert_eq!(player.audio_channel(), Some(AudioChannel::Stereo));
    assert!(player.set_audio_channel(AudioChannel::Dolby));
    assert_eq!(player.audio_channel(), Some(AudioChannel::Dolby));

    assert_eq!(player.audio_track_count(), Some(mock::AUDIO_TRACKS as u32));
    assert_eq!(player.audio_track(), Some(1));
    assert!(player.set_audio_track(0));
    assert_eq!(player.audio_track(), Some(0));
    assert!(!player.set_audio_track(7));
}

#[test]
fn test_transport() {
    let instance = setup_instance();
    let player = setup_player(&instance);

    assert!(player.play());
    assert!(player.is_playing());
    player.pause();
    assert_eq!(player.state(), State::Paused);
    player.pause();
    assert_eq!(player.state(), State::Playing);
    player.set_pause(true);
    player.set_pause(true);
    assert_eq!(player.state(), State::Paused);
    player.set_pause(false);
    assert_eq!(player.state(), State::Playing);

    player.stop();
    assert_eq!(player.state(), State::Stopped);
    assert!(!player.is_playing());
    assert_eq!(player.media().unwrap().state(), State::Stopped);

    // Stopped is not ended.
    assert!(player.play());
}

#[test]
fn test_error_state() {
    let instance = setup_instance();
    let player = setup_player(&instance);
    let errors = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&errors);
    player
        .event_manager()
        .unwrap()
        .register(EventType::MediaPlayerEncounteredError, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    assert!(player.play());
    mock::fire(&player, EventType::MediaPlayerEncounteredError);
    assert_eq!(errors.load(Ordering::SeqCst), 1);
    assert_eq!(player.state(), State::Error);
}

#[test]
fn test_teardown_order() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let player = setup_player(&instance);
    let player_id = mock::id(&player);
    let media_id = mock::id(&player.media().unwrap());
    player
        .event_manager()
        .unwrap()
        .register(EventType::MediaPlayerEndReached, || {})
        .unwrap();
    drop(player);

    let detach = journal
        .index_of(&Call::Detach(player_id, EventType::MediaPlayerEndReached.into_raw()))
        .unwrap();
    let player_freed = journal.index_of(&Call::Freed(player_id)).unwrap();
    let media_freed = journal.index_of(&Call::Freed(media_id)).unwrap();
    assert!(detach < player_freed);
    assert!(player_freed < media_freed);
    assert!(journal.violations().is_empty());
}
