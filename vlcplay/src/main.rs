use clap::{Arg, ArgAction, Command as Cli};
use log::{debug, info};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};
use vlckit::context::{self, Poster};
use vlckit::log::LogFacade;
use vlckit::prelude::*;
use vlckit::{mock, shared};

mod progress;

use progress::ProgressTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Ended,
    Failed,
    TimedOut,
}

fn engine_api(use_mock: bool) -> Option<API> {
    if use_mock {
        return Some(mock::api());
    }
    #[cfg(feature = "libvlc")]
    {
        Some(API::get())
    }
    #[cfg(not(feature = "libvlc"))]
    {
        None
    }
}

fn exit_on_err<T>(result: vlckit::Result<T>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("{}: {}", what, e);
            process::exit(1);
        }
    }
}

// Wakes the main loop regularly so progress and the timeout are checked.
fn spawn_ticker(poster: Poster) {
    let ticker = thread::Builder::new()
        .name("vlcplay-ticker".to_owned())
        .spawn(move || {
            while poster.post(|| {}) {
                thread::sleep(Duration::from_millis(250));
            }
        });
    if let Err(e) = ticker {
        eprintln!("Failed to start ticker thread: {}", e);
        process::exit(1);
    }
}

fn main() {
    let matches = Cli::new("vlcplay")
        .version("0.3.0")
        .disable_version_flag(true)
        .about("Plays a media location until it ends")
        .arg(
            Arg::new("location")
                .help("URL or local path of the media")
                .required_unless_present("version")
                .index(1),
        )
        .arg(
            Arg::new("option")
                .short('o')
                .long("option")
                .help("Engine option, e.g. --network-caching=300")
                .value_name("OPTION")
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("verbosity")
                .long("verbosity")
                .help("Engine log verbosity")
                .value_name("N")
                .value_parser(clap::value_parser!(u8)),
        )
        .arg(
            Arg::new("start")
                .short('s')
                .long("start")
                .help("Start playback at this many seconds")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("volume")
                .long("volume")
                .help("Audio volume in percent")
                .value_name("PERCENT")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .help("Give up after this many seconds")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .help("Play through the built-in fake engine")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("progress")
                .short('p')
                .long("progress")
                .help("Print playback progress to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Show version info and exit")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .get_matches();

    env_logger::init();

    let use_mock = matches.get_flag("mock");
    let api = match engine_api(use_mock) {
        Some(api) => api,
        None => {
            eprintln!("vlcplay was built without libvlc support, use --mock");
            process::exit(1);
        }
    };

    if matches.get_flag("version") {
        println!(
            "vlcplay 0.3.0 (libvlc {}, abi {})",
            api.version(),
            vlckit::abi_version()
        );
        return;
    }

    let location = match matches.get_one::<String>("location") {
        Some(location) => location.clone(),
        None => {
            eprintln!("No media location given");
            process::exit(1);
        }
    };

    let configuration = Configuration {
        switches: Switches::NO_VIDEO_TITLE_SHOW | Switches::NO_STATS,
        verbosity: matches.get_one::<u8>("verbosity").copied(),
        extra: matches
            .get_many::<String>("option")
            .map(|options| options.cloned().collect())
            .unwrap_or_default(),
        ..Configuration::default()
    };

    let instance = exit_on_err(
        Instance::new(api, &configuration),
        "Failed to create engine instance",
    );
    instance.set_log_handler(LogFacade);
    exit_on_err(
        instance.set_user_agent("vlcplay", "vlcplay/0.3.0"),
        "Failed to set user agent",
    );
    exit_on_err(shared::install(instance.clone()), "Failed to share instance");

    let player = exit_on_err(Player::new(&instance), "Failed to create player");
    let controller = exit_on_err(Controller::new(player), "Failed to start player");

    let (poster, mut mailbox) = context::channel();
    let outcome = Arc::new(OnceLock::new());
    let started = Arc::new(AtomicBool::new(false));

    let events = exit_on_err(
        controller.player().event_manager(),
        "Failed to observe player",
    );
    let ended = Arc::clone(&outcome);
    let failed = Arc::clone(&outcome);
    let playing = Arc::clone(&started);
    let registrations = [
        events.register(
            EventType::MediaPlayerEndReached,
            poster.bind(move || {
                let _ = ended.set(Outcome::Ended);
            }),
        ),
        events.register(
            EventType::MediaPlayerEncounteredError,
            poster.bind(move || {
                let _ = failed.set(Outcome::Failed);
            }),
        ),
        events.register(
            EventType::MediaPlayerPlaying,
            poster.bind(move || playing.store(true, Ordering::SeqCst)),
        ),
        events.register(EventType::MediaPlayerTimeChanged, poster.bind(|| {})),
    ];
    for registration in registrations {
        exit_on_err(registration, "Failed to observe player");
    }
    spawn_ticker(poster);

    if let Some(volume) = matches.get_one::<u32>("volume") {
        exit_on_err(
            controller.send(Command::SetVolume(*volume)),
            "Failed to queue command",
        );
    }
    exit_on_err(
        controller.send(Command::Open(location.clone())),
        "Failed to queue command",
    );
    if let Some(start) = matches.get_one::<f64>("start") {
        let time = Time::from(Duration::try_from_secs_f64(*start).unwrap_or(Duration::ZERO));
        exit_on_err(
            controller.send(Command::SetTime(time)),
            "Failed to queue command",
        );
    }
    info!("playing {}", location);

    let deadline = matches
        .get_one::<u64>("timeout")
        .map(|secs| Instant::now() + Duration::from_secs(*secs));
    let mut progress = ProgressTracker::new(matches.get_flag("progress"));
    let mut end_simulated = false;

    while outcome.get().is_none() {
        if !mailbox.run_next() {
            break;
        }
        let player = controller.player();
        progress.update(player.time(), player.length());

        // The fake engine never reaches the end by itself.
        if use_mock && !end_simulated && started.load(Ordering::SeqCst) {
            debug!("simulating the end of {}", location);
            mock::fire_from_thread(player, EventType::MediaPlayerEndReached);
            end_simulated = true;
        }

        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            let _ = outcome.set(Outcome::TimedOut);
        }
    }

    let result = outcome.get().copied().unwrap_or(Outcome::Failed);
    let _ = controller.send(Command::Stop);
    drop(controller);
    drop(shared::teardown());

    match result {
        Outcome::Ended => progress.finish("Finished"),
        Outcome::Failed => {
            progress.finish("Failed");
            eprintln!("Playback of {} failed", location);
            process::exit(1);
        }
        Outcome::TimedOut => {
            progress.finish("Timed out");
            process::exit(2);
        }
    }
}
