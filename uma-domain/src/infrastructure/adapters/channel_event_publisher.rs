use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::trace;

use crate::application::ports::{DomainEvent, EventError, EventPublisher};

/// Receiving half handed to whoever consumes the published events
pub type EventStream = mpsc::UnboundedReceiver<DomainEvent>;

/// Forwards every event, unchanged and in publish order, into a tokio channel.
///
/// Publishing fails once the [`EventStream`] has been dropped.
#[derive(Clone)]
pub struct ChannelEventPublisher {
    sender: mpsc::UnboundedSender<DomainEvent>,
}

impl ChannelEventPublisher {
    pub fn channel() -> (Self, EventStream) {
        let (sender, stream) = mpsc::unbounded_channel();
        (Self { sender }, stream)
    }
}

#[async_trait]
impl EventPublisher for ChannelEventPublisher {
    async fn publish(&self, event: DomainEvent) -> Result<(), EventError> {
        trace!(
            event_id = %event.id,
            aggregate = %event.aggregate_id,
            "Queueing {} event",
            event.event_type
        );

        self.sender
            .send(event)
            .map_err(|rejected| EventError::PublishFailed {
                message: format!("event stream closed, dropped {}", rejected.0.event_type),
            })
    }
}
