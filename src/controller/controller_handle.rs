//! Pad Handle - runs a direction controller on its own tokio task
//!
//! All input for one pad is funnelled through a single command queue into one
//! task that owns the [`DirectionController`]. That task is the pad's event
//! loop: commands and repeat ticks are handled strictly one after another, so
//! a press and a tick can never interleave.
//!
//! ```text
//! PadHandle ─[PadCommand]→ pad loop ─[Option<Direction>]→ observer
//!           (mpsc::channel)     │
//!                               └─[PadState]→ watch subscribers
//! ```
//!
//! The task lives until [`PadHandle::teardown`] is awaited. Dropping the handle
//! without teardown still stops the task, but the owner is expected to call
//! teardown explicitly once the observer is about to go away.

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::direction::{Direction, PadState};
use super::direction_controller::{ControllerSettings, DirectionController, PadCommand};
use super::error::PadError;
use super::observer::DirectionObserver;
use crate::config::PadSettings;

pub struct PadHandle {
    commands: mpsc::Sender<PadCommand>,
    state_receiver: watch::Receiver<PadState>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for PadHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PadHandle")
            .field("state", &*self.state_receiver.borrow())
            .field("running", &self.task.is_some())
            .finish()
    }
}

impl PadHandle {
    /// Spawns the pad loop on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// [`PadError::InitializationError`] when called outside a tokio runtime.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use dpad::controller::{Direction, PadHandle};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let observer = |direction: Option<Direction>| println!("{:?}", direction);
    /// let mut pad = PadHandle::spawn(None, Some(Box::new(observer)))?;
    ///
    /// pad.press(Direction::Up).await?;
    /// pad.release().await?;
    /// pad.teardown().await;
    /// # Ok(())
    /// # }
    /// ```
    pub fn spawn(
        settings: Option<PadSettings>,
        observer: Option<Box<dyn DirectionObserver>>,
    ) -> Result<Self, PadError> {
        let settings = settings.unwrap_or_default();
        info!("Spawning direction pad with settings: {:?}", settings);

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| PadError::InitializationError(e.to_string()))?;

        let controller_settings = ControllerSettings {
            emit_idle_release: settings.emit_idle_release,
        };
        let controller = DirectionController::new(observer, Some(controller_settings));

        let (command_sender, command_receiver) = mpsc::channel(settings.command_buffer.max(1));
        debug!(
            "Created command channel with buffer capacity {}",
            settings.command_buffer.max(1)
        );

        let (state_sender, state_receiver) = watch::channel(controller.state());
        let cancel = CancellationToken::new();

        let task = runtime.spawn(run_pad_loop(
            controller,
            command_receiver,
            state_sender,
            cancel.clone(),
        ));
        info!("Direction pad started");

        Ok(Self {
            commands: command_sender,
            state_receiver,
            cancel,
            task: Some(task),
        })
    }

    pub async fn press(&self, direction: Direction) -> Result<(), PadError> {
        self.send(PadCommand::Press(direction)).await
    }

    pub async fn release(&self) -> Result<(), PadError> {
        self.send(PadCommand::Release).await
    }

    /// Routes a raw touch or pointer event to the pad
    pub async fn send_input(&self, event: impl Into<PadCommand>) -> Result<(), PadError> {
        self.send(event.into()).await
    }

    /// Non-blocking variant of [`send_input`](Self::send_input) for synchronous
    /// view callbacks. Fails instead of waiting when the queue is full.
    pub fn try_send_input(&self, event: impl Into<PadCommand>) -> Result<(), PadError> {
        self.ensure_running()?;
        self.commands
            .try_send(event.into())
            .map_err(|e| PadError::ChannelError(e.to_string()))
    }

    pub fn subscribe(&self) -> watch::Receiver<PadState> {
        debug!("New subscriber to pad state");
        self.state_receiver.clone()
    }

    pub fn state(&self) -> PadState {
        *self.state_receiver.borrow()
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops the pad loop and waits for it to finish.
    ///
    /// Once this returns no further emission reaches the observer. Commands
    /// still queued are discarded. Calling it again does nothing.
    pub async fn teardown(&mut self) {
        self.cancel.cancel();

        let Some(task) = self.task.take() else {
            debug!("Pad already torn down");
            return;
        };

        match task.await {
            Ok(()) => info!("Direction pad torn down"),
            Err(e) => error!("Pad task ended abnormally during teardown: {}", e),
        }
    }

    async fn send(&self, command: PadCommand) -> Result<(), PadError> {
        self.ensure_running()?;
        debug!("Queueing {:?}", command);
        self.commands
            .send(command)
            .await
            .map_err(|e| PadError::ChannelError(e.to_string()))
    }

    fn ensure_running(&self) -> Result<(), PadError> {
        if self.cancel.is_cancelled() {
            return Err(PadError::TornDown);
        }
        Ok(())
    }
}

impl Drop for PadHandle {
    fn drop(&mut self) {
        if self.task.is_some() {
            warn!("PadHandle dropped without teardown, cancelling pad loop");
            self.cancel.cancel();
        }
    }
}

// The pad's event loop. Cancellation wins over pending commands and ticks.
async fn run_pad_loop(
    mut controller: DirectionController,
    mut commands: mpsc::Receiver<PadCommand>,
    state_sender: watch::Sender<PadState>,
    cancel: CancellationToken,
) {
    info!("Entering pad loop");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Pad loop cancelled");
                break;
            }
            command = commands.recv() => match command {
                Some(command) => {
                    debug!("Applying {:?}", command);
                    controller.apply(command);
                    state_sender.send_replace(controller.state());
                }
                None => {
                    info!("All pad handles gone, leaving pad loop");
                    break;
                }
            },
            _ = controller.next_tick() => {}
        }
    }

    controller.teardown();
    state_sender.send_replace(controller.state());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tokio::time::{sleep, Duration};

    fn recording_pad(settings: Option<PadSettings>) -> (PadHandle, Arc<Mutex<Vec<Option<Direction>>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let observer = move |direction: Option<Direction>| sink.lock().unwrap().push(direction);
        let pad = PadHandle::spawn(settings, Some(Box::new(observer))).unwrap();
        (pad, log)
    }

    #[test]
    fn spawn_outside_runtime_fails() {
        let result = PadHandle::spawn(None, None);
        assert!(matches!(result, Err(PadError::InitializationError(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn state_follows_commands() {
        let (mut pad, _log) = recording_pad(None);
        let mut states = pad.subscribe();
        assert_eq!(*states.borrow(), PadState::Idle);

        pad.press(Direction::Left).await.unwrap();
        states.changed().await.unwrap();
        assert_eq!(*states.borrow_and_update(), PadState::Held(Direction::Left));

        pad.release().await.unwrap();
        states.changed().await.unwrap();
        assert_eq!(*states.borrow_and_update(), PadState::Idle);

        pad.teardown().await;
        assert_eq!(pad.state(), PadState::TornDown);
    }

    #[tokio::test(start_paused = true)]
    async fn input_after_teardown_is_rejected() {
        let (mut pad, log) = recording_pad(None);

        pad.teardown().await;
        pad.teardown().await;

        assert!(matches!(pad.press(Direction::Up).await, Err(PadError::TornDown)));
        assert!(matches!(
            pad.try_send_input(PadCommand::Release),
            Err(PadError::TornDown)
        ));
        assert!(pad.is_torn_down());
        assert!(log.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_repeating() {
        let (pad, log) = recording_pad(None);

        pad.press(Direction::Down).await.unwrap();
        sleep(Duration::from_millis(150)).await;
        drop(pad);
        sleep(Duration::from_millis(10)).await;
        let count = log.lock().unwrap().len();

        sleep(Duration::from_secs(2)).await;

        assert_eq!(count, 2);
        assert_eq!(log.lock().unwrap().len(), count);
    }

    #[tokio::test(start_paused = true)]
    async fn suppressed_idle_release_is_honoured() {
        let settings = PadSettings {
            emit_idle_release: false,
            ..PadSettings::default()
        };
        let (mut pad, log) = recording_pad(Some(settings));

        pad.release().await.unwrap();
        sleep(Duration::from_millis(10)).await;
        pad.teardown().await;

        assert!(log.lock().unwrap().is_empty());
    }
}
