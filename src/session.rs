use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::mpsc::UnboundedReceiver;
use futures::future::BoxFuture;
use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use cdp_context_types::{Command, Event, Method, MethodId, MethodType};

use crate::error::Result;

/// The connection to a single target that commands are sent over and events
/// are received from.
///
/// Implementations must forward every event a target emits before the
/// response to a command to its listeners before that command's future
/// resolves.
pub trait Session: Send + Sync {
    /// Send the raw `params` of the `method` and resolve with the raw result
    fn send(&self, method: MethodId, params: Value) -> BoxFuture<'static, Result<Value>>;

    /// Register a new listener for the event with the identifier `event`.
    ///
    /// The listener is removed once the receiver is dropped.
    fn listen(&self, event: MethodId) -> UnboundedReceiver<Value>;
}

/// Pseudo event emitted by a session once its connection is gone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDisconnected {}

impl EventDisconnected {
    pub const IDENTIFIER: &'static str = "CDPSession.Disconnected";
}

impl MethodType for EventDisconnected {
    fn method_id() -> MethodId {
        Self::IDENTIFIER.into()
    }
}

impl Event for EventDisconnected {}

/// Execute a command on the session and deserialize the response
pub async fn execute<T: Command>(session: &dyn Session, cmd: T) -> Result<T::Response> {
    let method = cmd.identifier();
    let params = serde_json::to_value(cmd)?;
    let resp = session.send(method, params).await?;
    Ok(serde_json::from_value(resp)?)
}

/// Subscribe to all events of type `T` on the session
pub fn subscribe<T: Event>(session: &dyn Session) -> EventStream<T> {
    EventStream::new(session.listen(T::method_id()))
}

/// The receiver part of an event subscription
#[must_use = "streams do nothing unless polled"]
pub struct EventStream<T: Event> {
    events: UnboundedReceiver<Value>,
    _marker: PhantomData<T>,
}

impl<T: Event> EventStream<T> {
    pub fn new(events: UnboundedReceiver<Value>) -> Self {
        Self {
            events,
            _marker: PhantomData,
        }
    }
}

impl<T: Event> std::fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("event", &T::method_id())
            .finish()
    }
}

// the stream never pins `T`
impl<T: Event> Unpin for EventStream<T> {}

impl<T: Event> Stream for EventStream<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let pin = self.get_mut();
        loop {
            match Stream::poll_next(Pin::new(&mut pin.events), cx) {
                Poll::Ready(Some(event)) => match serde_json::from_value::<T>(event) {
                    Ok(event) => return Poll::Ready(Some(event)),
                    Err(err) => {
                        let method = T::method_id();
                        tracing::warn!(event = %method, "Failed to decode event: {}", err);
                    }
                },
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cdp_context_types::runtime::EventExecutionContextDestroyed;
    use futures::{SinkExt, StreamExt};
    use serde_json::json;

    #[async_std::test]
    async fn event_stream() {
        let (mut tx, rx) = futures::channel::mpsc::unbounded();

        let mut stream = EventStream::<EventExecutionContextDestroyed>::new(rx);

        tx.send(json!({ "executionContextId": 7 })).await.unwrap();
        let next = stream.next().await.unwrap();
        assert_eq!(next.execution_context_id.inner(), 7);
    }

    #[async_std::test]
    async fn skips_undecodable_events() {
        let (mut tx, rx) = futures::channel::mpsc::unbounded();

        let mut stream = EventStream::<EventExecutionContextDestroyed>::new(rx);

        tx.send(json!({ "unrelated": true })).await.unwrap();
        tx.send(json!({ "executionContextId": 3 })).await.unwrap();
        drop(tx);
        let events = stream.collect::<Vec<_>>().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].execution_context_id.inner(), 3);
    }

    #[async_std::test]
    async fn disconnected_pseudo_event() {
        let (mut tx, rx) = futures::channel::mpsc::unbounded();
        let mut stream = EventStream::<EventDisconnected>::new(rx);
        tx.send(json!({})).await.unwrap();
        assert_eq!(stream.next().await, Some(EventDisconnected {}));
        assert_eq!(EventDisconnected::method_id(), "CDPSession.Disconnected");
    }
}
