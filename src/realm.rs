use std::sync::{Arc, Mutex, PoisonError};

use cdp_context_types::runtime::RemoteObject;

use crate::context::{ContextId, ExecutionContext, WorldKind};
use crate::handle::{JsHandle, RealmId};
use crate::session::Session;

/// The owner of an execution context that materializes handles for the
/// objects evaluated in it.
pub trait Realm: Send + Sync {
    fn id(&self) -> RealmId;

    /// Wrap a remote object that was evaluated in this realm
    fn create_handle(&self, remote_object: RemoteObject) -> JsHandle;
}

/// There are two different kinds of worlds tracked for each frame, that
/// represent a context for JavaScript execution.
/// - the main world is the default execution context that is always created
///   after the frame is attached to DOM.
/// - the secondary world is an isolated world with universal access, that
///   shares the DOM but not the globals of the main world.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum DomWorldKind {
    /// The main world of a frame that represents the default execution context
    /// of a frame and is also created.
    #[default]
    Main,
    /// Each frame gets its own isolated world with universal access
    Secondary,
}

/// A realm of a frame that owns at most one execution context at a time.
pub struct DomWorld {
    id: RealmId,
    kind: DomWorldKind,
    session: Arc<dyn Session>,
    execution_ctx: Mutex<Option<ExecutionContext>>,
}

impl DomWorld {
    pub fn new(kind: DomWorldKind, session: Arc<dyn Session>) -> Arc<Self> {
        Arc::new(Self {
            id: RealmId::next(),
            kind,
            session,
            execution_ctx: Mutex::new(None),
        })
    }

    pub fn main_world(session: Arc<dyn Session>) -> Arc<Self> {
        Self::new(DomWorldKind::Main, session)
    }

    pub fn secondary_world(session: Arc<dyn Session>) -> Arc<Self> {
        Self::new(DomWorldKind::Secondary, session)
    }

    pub fn kind(&self) -> DomWorldKind {
        self.kind
    }

    /// The id an execution context of this world starts with before its real
    /// id is known
    pub fn pending_id(&self) -> ContextId {
        match self.kind {
            DomWorldKind::Main => ContextId::Unresolved(WorldKind::Main),
            DomWorldKind::Secondary => ContextId::Unresolved(WorldKind::Isolated),
        }
    }

    pub fn execution_context(&self) -> Option<ExecutionContext> {
        self.execution_ctx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the execution context and return the previous one
    pub fn set_context(&self, ctx: ExecutionContext) -> Option<ExecutionContext> {
        self.execution_ctx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(ctx)
    }

    pub fn take_context(&self) -> Option<ExecutionContext> {
        self.execution_ctx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Realm for DomWorld {
    fn id(&self) -> RealmId {
        self.id
    }

    fn create_handle(&self, remote_object: RemoteObject) -> JsHandle {
        JsHandle::new(remote_object, self.id, Arc::clone(&self.session))
    }
}

impl std::fmt::Debug for DomWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomWorld")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}
