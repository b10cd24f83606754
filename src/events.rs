//! Lifecycle notifications fanned out to the surrounding application.

use crate::registry::DialogId;
use tokio::sync::mpsc;

/// Fire-and-forget notifications emitted by the controller. `root` is the
/// element id of the dialog root; on `Closed` the element is about to be
/// removed (teardown is committed, the exit animation may still be
/// playing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogEvent {
    Opened { id: DialogId, root: String },
    Closed { id: DialogId, root: String },
}

/// Fan-out bus over unbounded channels. Any number of listeners may
/// subscribe; dropped receivers are pruned on the next broadcast.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<mpsc::UnboundedSender<DialogEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<DialogEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn broadcast(&mut self, event: DialogEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_every_subscriber_sees_every_event() {
        let mut bus = EventBus::new();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        let event = DialogEvent::Opened {
            id: DialogId::from_serial(1),
            root: "scrim-1".to_string(),
        };
        bus.broadcast(event.clone());

        assert_eq!(first.recv().await, Some(event.clone()));
        assert_eq!(second.recv().await, Some(event));
    }

    #[tokio::test]
    async fn test_dropped_subscribers_are_pruned() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        drop(rx);

        bus.broadcast(DialogEvent::Closed {
            id: DialogId::from_serial(1),
            root: "scrim-1".to_string(),
        });
        assert!(bus.subscribers.is_empty());
    }
}
