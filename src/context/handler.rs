use std::collections::VecDeque;
use std::pin::Pin;

use futures::future::BoxFuture;
use futures::stream::{Fuse, FuturesUnordered, Stream, StreamExt};
use futures::task::{Context, Poll};

use cdp_context_types::runtime::{
    EventBindingCalled, EventConsoleApiCalled, EventExecutionContextDestroyed,
    EventExecutionContextsCleared,
};

use crate::config::ContextConfig;
use crate::context::bindings::Dispatch;
use crate::context::ExecutionContext;
use crate::session::{subscribe, EventDisconnected, EventStream, Session};

/// Notifications of an execution context
#[derive(Debug, Clone, PartialEq)]
pub enum ContextEvent {
    /// A binding was called that this context does not handle itself
    BindingCalled(EventBindingCalled),
    /// A console API was called in this context
    ConsoleApiCalled(EventConsoleApiCalled),
    /// The context was disposed, this is the last event. It is yielded once
    /// the binding calls that were running have settled
    Disposed,
}

/// The event subscriptions a context holds while it is active
pub(crate) struct Subscriptions {
    binding_called: Fuse<EventStream<EventBindingCalled>>,
    console_api_called: Fuse<EventStream<EventConsoleApiCalled>>,
    destroyed: Option<Fuse<EventStream<EventExecutionContextDestroyed>>>,
    cleared: Option<Fuse<EventStream<EventExecutionContextsCleared>>>,
    disconnected: Option<EventStream<EventDisconnected>>,
}

impl Subscriptions {
    pub(crate) fn new(session: &dyn Session, config: &ContextConfig) -> Self {
        let (destroyed, cleared) = if config.runtime_fix() {
            (None, None)
        } else {
            (
                Some(subscribe(session).fuse()),
                Some(subscribe(session).fuse()),
            )
        };
        Self {
            binding_called: subscribe(session).fuse(),
            console_api_called: subscribe(session).fuse(),
            destroyed,
            cleared,
            disconnected: Some(subscribe(session)),
        }
    }

    /// Drain everything that is ready
    fn poll_events(&mut self, cx: &mut Context<'_>, events: &mut Vec<Inbound>) {
        while let Poll::Ready(Some(event)) = self.binding_called.poll_next_unpin(cx) {
            events.push(Inbound::BindingCalled(event));
        }
        while let Poll::Ready(Some(event)) = self.console_api_called.poll_next_unpin(cx) {
            events.push(Inbound::ConsoleApiCalled(event));
        }
        if let Some(destroyed) = self.destroyed.as_mut() {
            while let Poll::Ready(Some(event)) = destroyed.poll_next_unpin(cx) {
                events.push(Inbound::Destroyed(event));
            }
        }
        if let Some(cleared) = self.cleared.as_mut() {
            while let Poll::Ready(Some(_)) = cleared.poll_next_unpin(cx) {
                events.push(Inbound::Cleared);
            }
        }
        if let Some(disconnected) = self.disconnected.as_mut() {
            loop {
                match disconnected.poll_next_unpin(cx) {
                    Poll::Ready(Some(_)) => events.push(Inbound::Disconnected),
                    Poll::Ready(None) => {
                        // the session dropped its listeners
                        self.disconnected = None;
                        events.push(Inbound::Disconnected);
                        break;
                    }
                    Poll::Pending => break,
                }
            }
        }
    }
}

pub(crate) enum Lifecycle {
    Active(Subscriptions),
    Disposed,
}

enum Inbound {
    BindingCalled(EventBindingCalled),
    ConsoleApiCalled(EventConsoleApiCalled),
    Destroyed(EventExecutionContextDestroyed),
    Cleared,
    Disconnected,
}

/// Drives the event subscriptions of an [`ExecutionContext`] and runs the
/// bindings that scripts in it call.
#[must_use = "streams do nothing unless polled"]
pub struct ContextHandler {
    ctx: ExecutionContext,
    /// Bindings that are currently running
    running: FuturesUnordered<BoxFuture<'static, ()>>,
    /// Events ready to be yielded
    pending: VecDeque<ContextEvent>,
    done: bool,
}

impl ContextHandler {
    pub(crate) fn new(ctx: ExecutionContext) -> Self {
        Self {
            ctx,
            running: FuturesUnordered::new(),
            pending: VecDeque::new(),
            done: false,
        }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    fn on_inbound(&mut self, event: Inbound) {
        match event {
            Inbound::BindingCalled(event) => match self.ctx.dispatch_binding(event) {
                Dispatch::Ignore => {}
                Dispatch::Forward(event) => {
                    self.pending.push_back(ContextEvent::BindingCalled(event))
                }
                Dispatch::Run(fut) => self.running.push(fut),
            },
            Inbound::ConsoleApiCalled(event) => {
                if self.ctx.id().resolved() == Some(event.execution_context_id) {
                    self.pending.push_back(ContextEvent::ConsoleApiCalled(event));
                }
            }
            Inbound::Destroyed(event) => {
                if self.ctx.id().resolved() == Some(event.execution_context_id) {
                    self.ctx.dispose();
                }
            }
            Inbound::Cleared | Inbound::Disconnected => self.ctx.dispose(),
        }
    }
}

impl Stream for ContextHandler {
    type Item = ContextEvent;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let pin = self.get_mut();
        if pin.done {
            return Poll::Ready(None);
        }
        pin.ctx.inner.waker.register(cx.waker());

        loop {
            if let Some(event) = pin.pending.pop_front() {
                return Poll::Ready(Some(event));
            }

            while let Poll::Ready(Some(())) = pin.running.poll_next_unpin(cx) {}

            // collect under the lock, handle after releasing it since handling
            // may dispose the context
            let mut events = Vec::new();
            let disposed = match &mut *pin.ctx.inner.lifecycle() {
                Lifecycle::Active(subscriptions) => {
                    subscriptions.poll_events(cx, &mut events);
                    false
                }
                Lifecycle::Disposed => true,
            };

            if disposed {
                // binding calls in flight still settle their promise in the page
                if !pin.running.is_empty() {
                    return Poll::Pending;
                }
                pin.done = true;
                return Poll::Ready(Some(ContextEvent::Disposed));
            }
            if events.is_empty() {
                return Poll::Pending;
            }
            for event in events {
                pin.on_inbound(event);
            }
        }
    }
}

impl std::fmt::Debug for ContextHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextHandler")
            .field("ctx", &self.ctx)
            .field("running", &self.running.len())
            .field("pending", &self.pending)
            .field("done", &self.done)
            .finish()
    }
}
