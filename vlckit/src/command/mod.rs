//! Serialized player commands.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use futures::channel::{mpsc, oneshot};
use futures::executor::block_on;
use futures::StreamExt;
use log::{debug, error, warn};

use crate::error::{Error, Result};
use crate::media::Media;
use crate::player::Player;
use crate::time::Time;


/// A mutation of a [`Player`].
#[derive(Debug, Clone)]
pub enum Command {
    Play,
    /// Pauses, staying paused when already paused.
    Pause,
    /// Resumes, staying put when already playing.
    Resume,
    TogglePause,
    Stop,
    SetPosition(f32),
    SetTime(Time),
    SetRate(f32),
    SetVolume(u32),
    SetMute(bool),
    SetMedia(Option<Media>),
    /// Creates a media for a URL or a local path, assigns it, then plays.
    Open(String),
}

enum Message {
    Run(Command),
    Sync(oneshot::Sender<()>),
}

fn execute(player: &Player, command: Command) -> Result<()> {
    debug!("executing {:?}", command);
    match command {
        Command::Play => {
            if !player.play() {
                warn!("the player refused to play");
            }
        }
        Command::Pause => player.set_pause(true),
        Command::Resume => player.set_pause(false),
        Command::TogglePause => player.pause(),
        Command::Stop => player.stop(),
        Command::SetPosition(position) => player.set_position(position),
        Command::SetTime(time) => player.set_time(time),
        Command::SetRate(rate) => {
            if !player.set_rate(rate) {
                warn!("rate {} refused", rate);
            }
        }
        Command::SetVolume(volume) => {
            if !player.set_volume(volume) {
                warn!("volume {} refused", volume);
            }
        }
        Command::SetMute(mute) => player.set_mute(mute),
        Command::SetMedia(media) => player.set_media(media)?,
        Command::Open(location) => {
            let media = Media::open(player.instance(), &location)?;
            player.set_media(Some(media))?;
            if !player.play() {
                warn!("the player refused to play {}", location);
            }
        }
    }
    Ok(())
}

/// Owns a [`Player`] and applies every [`Command`] on one dedicated worker thread, in the order
/// they were sent.
///
/// Reads go straight to [`player`](Controller::player). Failed commands are logged. Dropping the
/// controller waits for the queued commands to finish.
pub struct Controller {
    player: Arc<Player>,
    sender: mpsc::UnboundedSender<Message>,
    worker: Option<JoinHandle<()>>,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Controller")
            .field("player", &self.player)
            .finish()
    }
}

impl Controller {
    /// Moves `player` onto a new worker thread.
    pub fn new(player: Player) -> Result<Self> {
        let player = Arc::new(player);
        let (sender, mut receiver) = mpsc::unbounded();

        let worker_player = Arc::clone(&player);
        let worker = thread::Builder::new()
            .name("vlckit-command".to_owned())
            .spawn(move || {
                block_on(async {
                    while let Some(message) = receiver.next().await {
                        match message {
                            Message::Run(command) => {
                                if let Err(err) = execute(&worker_player, command) {
                                    error!("command failed: {}", err);
                                }
                            }
                            Message::Sync(done) => {
                                // The waiter may have given up.
                                let _ = done.send(());
                            }
                        }
                    }
                });
                debug!("command worker exiting");
            })
            .map_err(Error::Spawn)?;

        Ok(Self {
            player,
            sender,
            worker: Some(worker),
        })
    }

    /// Queues `command`.
    pub fn send(&self, command: Command) -> Result<()> {
        self.sender
            .unbounded_send(Message::Run(command))
            .map_err(|_| Error::CommandQueueClosed)
    }

    /// Waits until every command sent before has run.
    ///
    /// Must not be called from an event callback, which may run on the worker thread.
    pub fn sync(&self) -> Result<()> {
        let (done, wait) = oneshot::channel();
        self.sender
            .unbounded_send(Message::Sync(done))
            .map_err(|_| Error::CommandQueueClosed)?;
        block_on(wait).map_err(|_| Error::CommandQueueClosed)
    }

    /// The controlled player, for reads and event registration.
    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.sender.close_channel();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("command worker panicked");
            }
        }
    }
}
