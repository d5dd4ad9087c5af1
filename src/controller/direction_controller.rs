//! Direction Controller - press/hold/repeat state machine
//!
//! Owns the active direction and at most one [`RepeatTimer`]. Every press emits
//! the direction immediately and (re)starts the repeat timer, every release
//! emits `None` and drops the timer, teardown drops the timer silently and
//! makes the controller terminal.
//!
//! ```text
//!            press(d)                 press(d')
//!   Idle ───────────────► Held(d) ───────────────► Held(d')
//!    ▲                       │
//!    └────── release ────────┘
//!
//!   any ── teardown ──► TornDown (no further transitions)
//! ```
//!
//! The controller is synchronous. The embedding event loop calls [`press`],
//! [`release`] and [`teardown`] and races [`next_tick`] against its other event
//! sources; see [`PadHandle`](super::controller_handle::PadHandle) for the
//! tokio task that does exactly that.
//!
//! [`press`]: DirectionController::press
//! [`release`]: DirectionController::release
//! [`teardown`]: DirectionController::teardown
//! [`next_tick`]: DirectionController::next_tick

use tracing::{debug, info, warn};

use super::direction::{Direction, EmissionKind, PadState};
use super::observer::DirectionObserver;
use super::repeat_timer::RepeatTimer;

// Logical operations every input modality converges on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadCommand {
    Press(Direction),
    Release,
}

// Core controller settings
#[derive(Clone, Debug)]
pub struct ControllerSettings {
    /// Emit `None` on a release while already idle
    pub emit_idle_release: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            emit_idle_release: true,
        }
    }
}

pub struct DirectionController {
    // Currently held direction, None while idle
    active: Option<Direction>,

    // Live repeat timer, Some iff active is Some
    repeat: Option<RepeatTimer>,

    observer: Option<Box<dyn DirectionObserver>>,

    settings: ControllerSettings,

    torn_down: bool,
}

impl std::fmt::Debug for DirectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectionController")
            .field("active", &self.active)
            .field("repeat", &self.repeat)
            .field("has_observer", &self.observer.is_some())
            .field("settings", &self.settings)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}

impl DirectionController {
    /// Creates an idle controller. Without an observer the state machine still
    /// runs but emissions are dropped.
    pub fn new(
        observer: Option<Box<dyn DirectionObserver>>,
        settings: Option<ControllerSettings>,
    ) -> Self {
        let settings = settings.unwrap_or_default();
        debug!(
            "Creating DirectionController (observer: {}, settings: {:?})",
            observer.is_some(),
            settings
        );
        Self {
            active: None,
            repeat: None,
            observer,
            settings,
            torn_down: false,
        }
    }

    pub fn with_observer<O: DirectionObserver>(observer: O) -> Self {
        Self::new(Some(Box::new(observer)), None)
    }

    pub fn press(&mut self, direction: Direction) {
        if self.torn_down {
            warn!("Ignoring press({}) on torn down controller", direction);
            return;
        }

        if let Some(previous) = self.active {
            debug!("Press {} preempts held {}", direction, previous);
        }

        self.active = Some(direction);
        self.emit(Some(direction), EmissionKind::Press);
        self.replace_timer(Some(RepeatTimer::start(direction)));
    }

    pub fn release(&mut self) {
        if self.torn_down {
            warn!("Ignoring release on torn down controller");
            return;
        }

        let was_held = self.active.take();
        self.replace_timer(None);

        if was_held.is_some() || self.settings.emit_idle_release {
            self.emit(None, EmissionKind::Release);
        } else {
            debug!("Release while idle, emission suppressed");
        }
    }

    /// Cancels any live repeat timer without emitting and makes the controller
    /// terminal. Safe to call in any state, any number of times.
    pub fn teardown(&mut self) {
        if self.torn_down {
            debug!("Teardown called again, nothing to do");
            return;
        }

        self.replace_timer(None);
        self.active = None;
        self.torn_down = true;
        info!("DirectionController torn down");
    }

    pub fn apply(&mut self, command: PadCommand) {
        match command {
            PadCommand::Press(direction) => self.press(direction),
            PadCommand::Release => self.release(),
        }
    }

    /// Waits for the next repeat boundary and emits the held direction.
    ///
    /// Never completes while idle or torn down. Cancel safe, so it can be
    /// polled inside `tokio::select!` alongside the input sources.
    pub async fn next_tick(&mut self) {
        let direction = match self.repeat.as_mut() {
            Some(timer) => timer.tick().await,
            None => std::future::pending().await,
        };
        self.emit(Some(direction), EmissionKind::Repeat);
    }

    pub fn active_direction(&self) -> Option<Direction> {
        self.active
    }

    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn state(&self) -> PadState {
        match (self.torn_down, self.active) {
            (true, _) => PadState::TornDown,
            (false, Some(direction)) => PadState::Held(direction),
            (false, None) => PadState::Idle,
        }
    }

    // Single cancel-then-replace path shared by press, release and teardown
    fn replace_timer(&mut self, next: Option<RepeatTimer>) {
        if let Some(old) = self.repeat.take() {
            debug!(
                "Cancelling repeat timer for {} after {} ticks",
                old.direction(),
                old.ticks()
            );
            drop(old);
        }
        self.repeat = next;
    }

    fn emit(&mut self, direction: Option<Direction>, kind: EmissionKind) {
        match self.observer.as_mut() {
            Some(observer) => {
                debug!("Emitting {:?} ({:?})", direction, kind);
                observer.on_direction(direction, kind);
            }
            None => debug!("No observer registered, dropping {:?}", direction),
        }
    }
}
