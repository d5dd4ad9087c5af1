use tracing::debug;

use crate::controller::{PadCommand, Zone};

// Mouse / pen signals on a single zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down(Zone),
    Up(Zone),
    /// The pointer left the zone's area, treated exactly like `Up`
    Leave(Zone),
}

impl PointerEvent {
    pub fn zone(&self) -> Zone {
        match self {
            PointerEvent::Down(zone) | PointerEvent::Up(zone) | PointerEvent::Leave(zone) => *zone,
        }
    }
}

impl From<PointerEvent> for PadCommand {
    fn from(event: PointerEvent) -> Self {
        let command = match event {
            PointerEvent::Down(zone) => PadCommand::Press(zone),
            PointerEvent::Up(_) | PointerEvent::Leave(_) => PadCommand::Release,
        };
        debug!("Pointer {:?} -> {:?}", event, command);
        command
    }
}
