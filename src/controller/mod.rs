//! Direction pad controller
//!
//! Turns press/release signals on four zones into a stream of direction
//! values with repeat-while-held semantics:
//!
//! 1. [`direction_controller`] - press/hold/repeat state machine
//! 2. [`repeat_timer`] - the single cancelable 100ms repeat timer
//! 3. [`controller_handle`] - tokio task that serializes input and ticks
//!
//! # Architecture
//!
//! ```text
//! Touch/Pointer ──► PadCommand ──► DirectionController ──► Observer
//!                   (mpsc)         (pad loop task)         (callback)
//! ```
//!
//! The first emission happens synchronously at press time, repeats follow
//! every 100ms until release or teardown.

pub mod controller_handle;
pub mod direction;
pub mod direction_controller;
pub mod error;
pub mod observer;
pub mod repeat_timer;

pub use controller_handle::PadHandle;
pub use direction::{Direction, DirectionEvent, EmissionKind, PadState, Zone};
pub use direction_controller::{ControllerSettings, DirectionController, PadCommand};
pub use error::PadError;
pub use observer::{ChannelObserver, DirectionObserver};
pub use repeat_timer::{RepeatTimer, REPEAT_INTERVAL};
