//! Four-way direction pad with press-and-hold repeat.
//!
//! A press on a zone emits its direction immediately and then every 100ms
//! until released; touch and pointer input both feed the same state machine.

pub mod config;
pub mod controller;
pub mod input;

pub use config::PadSettings;
pub use controller::{Direction, DirectionController, PadHandle, PadState};
pub use input::InputEvent;
