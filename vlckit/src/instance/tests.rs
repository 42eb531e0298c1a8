use std::sync::{Arc, Mutex};

use super::*;
use crate::configuration::Switches;
use crate::error::{Error, ResourceKind};
use crate::log::{Level, LogFacade, Message};
use crate::mock::{self, Call};

fn setup_instance() -> Instance {
    Instance::new(mock::api(), &Configuration::default()).expect("Failed to create instance")
}

fn collector() -> (Arc<Mutex<Vec<Message>>>, impl Fn(&Message) + Send + Sync + 'static) {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    (messages, move |message: &Message| {
        sink.lock().unwrap().push(message.clone())
    })
}

#[test]
fn test_configuration_reaches_engine() {
    let config = Configuration {
        switches: Switches::NO_COLOR | Switches::NO_STATS,
        avi_index: Some(3),
        ..Configuration::default()
    };
    let instance = Instance::new(mock::api(), &config).unwrap();

    assert_eq!(
        mock::args(&instance),
        ["--no-color", "--no-stats", "--avi-index=3"]
    );
}

#[test]
fn test_refused_options() {
    let config = Configuration {
        extra: vec!["not-an-option".into()],
        ..Configuration::default()
    };
    let err = Instance::new(mock::api(), &config).unwrap_err();
    assert!(matches!(err, Error::ResourceUnavailable(ResourceKind::Instance)));
}

#[test]
fn test_clones_share_one_reference() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let id = mock::id(&instance);

    let clone = instance.clone();
    assert_eq!(clone, instance);
    assert_eq!(journal.ref_count(id), 1);

    drop(instance);
    assert!(!journal.is_freed(id));
    drop(clone);
    assert!(journal.is_freed(id));
    assert!(journal.violations().is_empty());
}

#[test]
fn test_user_agent_and_app_id() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let id = mock::id(&instance);

    instance.set_user_agent("Player 1.0", "Player/1.0").unwrap();
    instance
        .set_app_id("org.example.player", "1.0", "player")
        .unwrap();

    assert!(journal
        .index_of(&Call::SetUserAgent(id, "Player 1.0".into(), "Player/1.0".into()))
        .is_some());
    assert!(journal
        .index_of(&Call::SetAppId(
            id,
            "org.example.player".into(),
            "1.0".into(),
            "player".into()
        ))
        .is_some());
    assert!(matches!(
        instance.set_user_agent("bad\0name", ""),
        Err(Error::CStringConversion(_))
    ));
}

#[test]
fn test_log_handler_receives_messages() {
    let instance = setup_instance();
    let (messages, handler) = collector();

    instance.set_log_handler(handler);
    assert!(instance.has_log_handler());
    mock::emit_log(&instance, Level::Warning, "buffer underrun");

    let messages = messages.lock().unwrap();
    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert_eq!(message.level, Level::Warning);
    assert_eq!(message.message, "buffer underrun");
    assert_eq!(message.context.name.as_deref(), Some("fake-engine"));
    assert_eq!(message.context.id as u64, mock::id(&instance).0);
    assert_eq!(message.debug.module.as_deref(), Some("mock"));
    assert!(message.debug.line > 0);
}

#[test]
fn test_long_messages_are_truncated() {
    let instance = setup_instance();
    let (messages, handler) = collector();
    instance.set_log_handler(handler);

    let long = "x".repeat(10_000);
    mock::emit_log(&instance, Level::Debug, &long);

    let messages = messages.lock().unwrap();
    assert_eq!(messages[0].message.len(), 4095);
}

#[test]
fn test_clear_log_handler() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let (messages, handler) = collector();

    instance.set_log_handler(handler);
    instance.clear_log_handler();
    mock::emit_log(&instance, Level::Error, "ignored");

    assert!(!instance.has_log_handler());
    assert!(messages.lock().unwrap().is_empty());
    assert!(journal.index_of(&Call::LogUnset(mock::id(&instance))).is_some());
}

#[test]
fn test_teardown_unsets_logging_before_release() {
    let instance = setup_instance();
    let journal = mock::journal(&instance);
    let id = mock::id(&instance);

    instance.set_log_handler(LogFacade);
    drop(instance);

    let unset = journal.last_index_of(&Call::LogUnset(id)).unwrap();
    let release = journal.index_of(&Call::Release(id)).unwrap();
    assert!(unset < release);
    assert!(journal.is_freed(id));
}

#[test]
fn test_engine_strings() {
    let api = mock::api();
    assert!(api.version().starts_with("3.0"));
    assert_eq!(api.compiler(), "rustc");
    assert_eq!(api.changeset(), "fake");
    assert_eq!(
        api.event_type_name(crate::event::EventType::MediaPlayerEndReached).as_deref(),
        Some("MediaPlayerEndReached")
    );
}
