//! Input adapters for the direction pad
//!
//! Each input modality gets its own event type. Both convert into the same
//! [`PadCommand`], so touch and pointer input drive one state machine and
//! neither can start a second repeat timer.
//!
//! | Modality | Begin contact | End contact      |
//! |----------|---------------|------------------|
//! | Touch    | `Start`       | `End`            |
//! | Pointer  | `Down`        | `Up`, `Leave`    |

pub mod pointer;
pub mod touch;

pub use pointer::PointerEvent;
pub use touch::TouchEvent;

use std::str::FromStr;

use crate::controller::{PadCommand, PadError, Zone};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Touch(TouchEvent),
    Pointer(PointerEvent),
}

impl InputEvent {
    pub fn zone(&self) -> Zone {
        match self {
            InputEvent::Touch(event) => event.zone(),
            InputEvent::Pointer(event) => event.zone(),
        }
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(event: TouchEvent) -> Self {
        InputEvent::Touch(event)
    }
}

impl From<PointerEvent> for InputEvent {
    fn from(event: PointerEvent) -> Self {
        InputEvent::Pointer(event)
    }
}

impl From<InputEvent> for PadCommand {
    fn from(event: InputEvent) -> Self {
        match event {
            InputEvent::Touch(event) => event.into(),
            InputEvent::Pointer(event) => event.into(),
        }
    }
}

/// Parses `<modality> <signal> <zone>`, e.g. `touch start up` or
/// `pointer leave left`. `mouse` is accepted as an alias for `pointer`.
impl FromStr for InputEvent {
    type Err = PadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<String> = s.split_whitespace().map(str::to_ascii_lowercase).collect();
        let [modality, signal, zone] = parts.as_slice() else {
            return Err(PadError::ParseError(format!(
                "expected '<modality> <signal> <zone>', got '{}'",
                s.trim()
            )));
        };
        let zone: Zone = zone.parse()?;

        match (modality.as_str(), signal.as_str()) {
            ("touch", "start") => Ok(TouchEvent::Start(zone).into()),
            ("touch", "end") => Ok(TouchEvent::End(zone).into()),
            ("pointer" | "mouse", "down") => Ok(PointerEvent::Down(zone).into()),
            ("pointer" | "mouse", "up") => Ok(PointerEvent::Up(zone).into()),
            ("pointer" | "mouse", "leave") => Ok(PointerEvent::Leave(zone).into()),
            (modality, signal) => Err(PadError::ParseError(format!(
                "unknown input signal '{} {}'",
                modality, signal
            ))),
        }
    }
}
