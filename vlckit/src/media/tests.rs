use super::*;
use crate::configuration::Configuration;
use crate::event::EventType;
use crate::mock::{self, Call};

fn setup_instance() -> Instance {
    Instance::new(mock::api(), &Configuration::default()).expect("Failed to create instance")
}

#[test]
fn test_new_location() {
    let instance = setup_instance();
    let media = Media::new_location(&instance, "https://example.com/movie.mkv").unwrap();

    assert_eq!(media.mrl().as_deref(), Some("https://example.com/movie.mkv"));
    assert_eq!(media.media_type(), MediaType::Stream);
    assert_eq!(media.state(), State::NothingSpecial);
    assert_eq!(media.duration(), Some(Time::from_millis(mock::MEDIA_DURATION)));
    assert_eq!(media.instance(), &instance);
}

#[test]
fn test_new_path() {
    let instance = setup_instance();
    let media = Media::new_path(&instance, "/tmp/movie.mkv").unwrap();

    assert_eq!(media.mrl().as_deref(), Some("file:///tmp/movie.mkv"));
    assert_eq!(media.media_type(), MediaType::File);
}

#[test]
fn test_construction_failure() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);

    let err = Media::new_location(&instance, "").unwrap_err();
    assert!(matches!(err, Error::ResourceUnavailable(ResourceKind::Media)));
    let err = Media::new_location(&instance, "file:///a\0b").unwrap_err();
    assert!(matches!(err, Error::CStringConversion(_)));

    // Nothing was retained or released on failure.
    assert_eq!(journal.count(|call| matches!(call, Call::Release(_))), 0);
}

#[test]
fn test_from_url_decodes_smb_and_sftp() {
    let instance = setup_instance();

    let url = Url::parse("smb://nas/My%20Movies/movie.mkv").unwrap();
    let media = Media::from_url(&instance, &url).unwrap();
    assert_eq!(media.mrl().as_deref(), Some("smb://nas/My Movies/movie.mkv"));

    let url = Url::parse("sftp://host/home/user/a%20b.mkv").unwrap();
    let media = Media::from_url(&instance, &url).unwrap();
    assert_eq!(media.mrl().as_deref(), Some("sftp://host/home/user/a b.mkv"));

    // Other schemes keep their encoding.
    let url = Url::parse("https://example.com/a%20b.mkv").unwrap();
    let media = Media::from_url(&instance, &url).unwrap();
    assert_eq!(media.mrl().as_deref(), Some("https://example.com/a%20b.mkv"));
}

#[test]
fn test_open_location_or_path() {
    let instance = setup_instance();

    let media = Media::open(&instance, "http://example.com/stream").unwrap();
    assert_eq!(media.mrl().as_deref(), Some("http://example.com/stream"));

    let media = Media::open(&instance, "/srv/media/movie.mkv").unwrap();
    assert_eq!(media.mrl().as_deref(), Some("file:///srv/media/movie.mkv"));
}

#[test]
fn test_clone_is_another_owner() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let media = Media::new_location(&instance, "file:///tmp/movie.mkv").unwrap();
    let id = mock::id(&media);

    let clone = media.clone();
    assert_eq!(mock::id(&clone), id);
    assert_eq!(journal.ref_count(id), 2);

    drop(media);
    assert_eq!(clone.mrl().as_deref(), Some("file:///tmp/movie.mkv"));
    drop(clone);
    assert!(journal.is_freed(id));
    assert!(journal.violations().is_empty());
}

#[test]
fn test_duplicate_is_independent() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let original = Media::new_location(&instance, "file:///tmp/movie.mkv").unwrap();
    original
        .event_manager()
        .unwrap()
        .register(EventType::MediaStateChanged, || {})
        .unwrap();

    let copy = original.duplicate().unwrap();
    let (original_id, copy_id) = (mock::id(&original), mock::id(&copy));
    assert_ne!(original_id, copy_id);
    assert_eq!(journal.ref_count(copy_id), 1);
    assert_eq!(copy.mrl(), original.mrl());

    // The copy starts with an empty bridge.
    assert_eq!(copy.event_manager().unwrap().registration_count(), 0);

    drop(original);
    assert!(journal.is_freed(original_id));
    assert!(!journal.is_freed(copy_id));
    assert_eq!(copy.mrl().as_deref(), Some("file:///tmp/movie.mkv"));

    drop(copy);
    assert!(journal.is_freed(copy_id));
    assert!(journal.violations().is_empty());
}

#[test]
fn test_drop_detaches_before_release() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let media = Media::new_location(&instance, "file:///tmp/movie.mkv").unwrap();
    let id = mock::id(&media);

    let events = media.event_manager().unwrap();
    events.register(EventType::MediaStateChanged, || {}).unwrap();
    events.register(EventType::MediaDurationChanged, || {}).unwrap();
    drop(media);

    let detach = journal
        .last_index_of(&Call::Detach(id, EventType::MediaDurationChanged.into_raw()))
        .unwrap();
    let release = journal.index_of(&Call::Release(id)).unwrap();
    assert!(detach < release);
    assert_eq!(journal.attachments(id), 0);
    assert!(journal.violations().is_empty());
}

#[test]
fn test_media_keeps_instance_alive() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let instance_id = mock::id(&instance);
    let media = Media::new_location(&instance, "file:///tmp/movie.mkv").unwrap();

    drop(instance);
    assert!(!journal.is_freed(instance_id));
    drop(media);
    assert!(journal.is_freed(instance_id));
}
