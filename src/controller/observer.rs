use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::direction::{Direction, DirectionEvent, EmissionKind};

/// Receiver of emitted direction values.
///
/// Called on the controller's event loop for every press, repeat tick and
/// release. `None` means no direction is held.
pub trait DirectionObserver: Send + 'static {
    fn on_direction(&mut self, direction: Option<Direction>, kind: EmissionKind);
}

impl<F> DirectionObserver for F
where
    F: FnMut(Option<Direction>) + Send + 'static,
{
    fn on_direction(&mut self, direction: Option<Direction>, _kind: EmissionKind) {
        self(direction)
    }
}

// Forwards emissions into a bounded channel, stamped with a local timestamp
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::Sender<DirectionEvent>,
}

impl ChannelObserver {
    pub fn new(sender: mpsc::Sender<DirectionEvent>) -> Self {
        Self { sender }
    }

    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<DirectionEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self::new(sender), receiver)
    }
}

impl DirectionObserver for ChannelObserver {
    fn on_direction(&mut self, direction: Option<Direction>, kind: EmissionKind) {
        let event = DirectionEvent::new(direction, kind);
        // The emission path must not block, so a full or closed channel drops the event
        match self.sender.try_send(event) {
            Ok(_) => debug!("Direction event forwarded: {:?} ({:?})", direction, kind),
            Err(e) => warn!("Dropping direction event {:?}: {}", direction, e),
        }
    }
}
