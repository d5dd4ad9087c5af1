use tracing::debug;

use crate::controller::{PadCommand, Zone};

// Touch signals on a single zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    Start(Zone),
    End(Zone),
}

impl TouchEvent {
    pub fn zone(&self) -> Zone {
        match self {
            TouchEvent::Start(zone) | TouchEvent::End(zone) => *zone,
        }
    }
}

impl From<TouchEvent> for PadCommand {
    fn from(event: TouchEvent) -> Self {
        let command = match event {
            TouchEvent::Start(zone) => PadCommand::Press(zone),
            // Ending a touch releases whatever is held, not only this zone
            TouchEvent::End(_) => PadCommand::Release,
        };
        debug!("Touch {:?} -> {:?}", event, command);
        command
    }
}
