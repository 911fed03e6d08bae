use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use fnv::FnvHashMap;
use futures::future::{BoxFuture, Shared};
use futures::task::AtomicWaker;

use cdp_context_types::page::FrameId;
use cdp_context_types::runtime::{ExecutionContextDescription, ExecutionContextId};

use crate::binding::Binding;
use crate::config::ContextConfig;
use crate::error::{CdpError, Result};
use crate::handle::{JsHandle, RealmId};
use crate::injector::ScriptInjector;
use crate::realm::Realm;
use crate::session::Session;

pub use handler::{ContextEvent, ContextHandler};

mod acquire;
mod bindings;
mod evaluate;
mod handler;
mod utility;

pub use acquire::MAX_ACQUIRE_ATTEMPTS;

/// The kind of world an execution context belongs to, before its id is known
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WorldKind {
    /// The default world of a frame
    Main,
    /// An isolated world with its own globals, like the utility world
    Isolated,
    /// A web worker
    Worker,
}

/// Identity of an execution context.
///
/// The remote side assigns ids. A context that was created for a world whose
/// id is not known yet, or whose previous id went stale, is `Unresolved` until
/// [`ExecutionContext::acquire_context_id`] finds the id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContextId {
    Resolved(ExecutionContextId),
    Unresolved(WorldKind),
}

impl ContextId {
    pub fn resolved(&self) -> Option<ExecutionContextId> {
        match self {
            ContextId::Resolved(id) => Some(*id),
            ContextId::Unresolved(_) => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ContextId::Resolved(_))
    }
}

/// Negative ids are the placeholders `-1` (main world), `-2` (isolated
/// world) and `-3` (worker)
impl From<i64> for ContextId {
    fn from(id: i64) -> Self {
        match id {
            id if id >= 0 => ContextId::Resolved(ExecutionContextId::new(id)),
            -2 => ContextId::Unresolved(WorldKind::Isolated),
            -3 => ContextId::Unresolved(WorldKind::Worker),
            _ => ContextId::Unresolved(WorldKind::Main),
        }
    }
}

impl From<ExecutionContextId> for ContextId {
    fn from(id: ExecutionContextId) -> Self {
        ContextId::Resolved(id)
    }
}

impl From<WorldKind> for ContextId {
    fn from(kind: WorldKind) -> Self {
        ContextId::Unresolved(kind)
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextId::Resolved(id) => write!(f, "{}", id),
            ContextId::Unresolved(kind) => write!(f, "unresolved {:?} world", kind),
        }
    }
}

type UtilityFuture = Shared<BoxFuture<'static, Result<JsHandle, Arc<CdpError>>>>;

/// Mutable state of a context. The lock is never held across an await.
struct ContextState {
    id: ContextId,
    /// Bumped by every `clear`
    epoch: u64,
    /// Bindings installed for the current epoch
    bindings: FnvHashMap<String, Binding>,
    /// Whether the intrinsic bindings were installed for the current epoch
    bindings_installed: bool,
    utility: Option<UtilityFuture>,
}

pub(crate) struct ContextInner {
    session: Arc<dyn Session>,
    realm: Weak<dyn Realm>,
    realm_id: RealmId,
    name: Option<String>,
    frame_id: Option<FrameId>,
    config: ContextConfig,
    injector: Option<Arc<ScriptInjector>>,
    intrinsic_bindings: Vec<Binding>,
    state: Mutex<ContextState>,
    /// Serializes binding registration
    binding_lock: futures::lock::Mutex<()>,
    lifecycle: Mutex<handler::Lifecycle>,
    /// Wakes the handler once the context is disposed
    waker: AtomicWaker,
}

impl ContextInner {
    fn state(&self) -> MutexGuard<'_, ContextState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lifecycle(&self) -> MutexGuard<'_, handler::Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Represents a context for JavaScript execution. A page might have many
/// execution contexts
/// - each [iframe](https://developer.mozilla.org/en-US/docs/Web/HTML/Element/iframe)
///   has a "default" execution context that is always created after the frame
///   is attached to DOM.
/// - isolated worlds share the DOM of a frame but have their own globals.
///
/// Besides pages, execution contexts can be found in
/// [Web Workers](https://developer.mozilla.org/en-US/docs/Web/API/Web_Workers_API).
///
/// This is a cheap handle to shared state, clones refer to the same context.
#[derive(Clone)]
pub struct ExecutionContext {
    inner: Arc<ContextInner>,
}

impl ExecutionContext {
    pub fn builder(session: Arc<dyn Session>, realm: &Arc<dyn Realm>) -> ExecutionContextBuilder {
        ExecutionContextBuilder::new(session, realm)
    }

    /// The current identity of this context
    pub fn id(&self) -> ContextId {
        self.inner.state().id
    }

    /// The declared world name, used to scope bindings
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn frame_id(&self) -> Option<&FrameId> {
        self.inner.frame_id.as_ref()
    }

    pub fn realm_id(&self) -> RealmId {
        self.inner.realm_id
    }

    /// The realm that owns this context
    pub fn realm(&self) -> Result<Arc<dyn Realm>> {
        self.inner.realm.upgrade().ok_or(CdpError::RealmDropped)
    }

    pub fn config(&self) -> &ContextConfig {
        &self.inner.config
    }

    pub fn session(&self) -> &Arc<dyn Session> {
        &self.inner.session
    }

    /// Whether a binding with that name is installed in the current identity
    pub fn has_binding(&self, name: &str) -> bool {
        self.inner.state().bindings.contains_key(name)
    }

    pub fn is_disposed(&self) -> bool {
        matches!(*self.inner.lifecycle(), handler::Lifecycle::Disposed)
    }

    /// Install a new identity without recreating the context.
    ///
    /// This forgets all installed bindings and the injected utility, they are
    /// installed again on demand.
    pub fn clear(&self, id: impl Into<ContextId>) {
        let mut state = self.inner.state();
        state.id = id.into();
        state.epoch += 1;
        state.bindings.clear();
        state.bindings_installed = false;
        state.utility = None;
    }

    /// Release all event subscriptions.
    ///
    /// The [`ContextHandler`] yields [`ContextEvent::Disposed`] once and ends.
    /// Disposing an already disposed context does nothing.
    pub fn dispose(&self) {
        let previous =
            std::mem::replace(&mut *self.inner.lifecycle(), handler::Lifecycle::Disposed);
        if let handler::Lifecycle::Active(subscriptions) = previous {
            drop(subscriptions);
            self.inner.waker.wake();
        }
    }

    fn epoch(&self) -> u64 {
        self.inner.state().epoch
    }

    /// Replace the id if no `clear` happened since `epoch`
    fn set_resolved_id(&self, id: ExecutionContextId, epoch: u64) -> bool {
        let mut state = self.inner.state();
        if state.epoch != epoch {
            return false;
        }
        state.id = ContextId::Resolved(id);
        true
    }

    fn downgrade(&self) -> WeakContext {
        WeakContext {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("id", &self.id())
            .field("name", &self.inner.name)
            .field("frame_id", &self.inner.frame_id)
            .field("realm", &self.inner.realm_id)
            .finish()
    }
}

/// A context reference that does not keep the context alive
#[derive(Clone)]
struct WeakContext {
    inner: Weak<ContextInner>,
}

impl WeakContext {
    fn upgrade(&self) -> Option<ExecutionContext> {
        self.inner.upgrade().map(|inner| ExecutionContext { inner })
    }
}

pub struct ExecutionContextBuilder {
    session: Arc<dyn Session>,
    realm: Weak<dyn Realm>,
    realm_id: RealmId,
    id: Option<ContextId>,
    name: Option<String>,
    frame_id: Option<FrameId>,
    config: Option<ContextConfig>,
    injector: Option<Arc<ScriptInjector>>,
    intrinsic_bindings: Vec<Binding>,
}

impl ExecutionContextBuilder {
    fn new(session: Arc<dyn Session>, realm: &Arc<dyn Realm>) -> Self {
        Self {
            session,
            realm: Arc::downgrade(realm),
            realm_id: realm.id(),
            id: None,
            name: None,
            frame_id: None,
            config: None,
            injector: None,
            intrinsic_bindings: Vec::new(),
        }
    }

    /// Take id, name and frame from the description of a
    /// `Runtime.executionContextCreated` event
    pub fn description(mut self, desc: &ExecutionContextDescription) -> Self {
        self.id = Some(ContextId::Resolved(desc.id));
        if !desc.name.is_empty() {
            self.name = Some(desc.name.clone());
        }
        if let Some(frame_id) = desc.frame_id() {
            self.frame_id = Some(FrameId::new(frame_id));
        }
        self
    }

    pub fn id(mut self, id: impl Into<ContextId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn frame_id(mut self, frame_id: impl Into<FrameId>) -> Self {
        self.frame_id = Some(frame_id.into());
        self
    }

    /// Defaults to [`ContextConfig::from_env`]
    pub fn config(mut self, config: ContextConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// The injector of the utility script, required for
    /// [`ExecutionContext::injected_utility`]
    pub fn injector(mut self, injector: Arc<ScriptInjector>) -> Self {
        self.injector = Some(injector);
        self
    }

    /// A binding that is installed together with the utility script
    pub fn intrinsic_binding(mut self, binding: Binding) -> Self {
        self.intrinsic_bindings.push(binding);
        self
    }

    pub fn intrinsic_bindings(mut self, bindings: impl IntoIterator<Item = Binding>) -> Self {
        self.intrinsic_bindings.extend(bindings);
        self
    }

    /// Create the context and the handler that drives its event
    /// subscriptions
    pub fn build(self) -> Result<(ExecutionContext, ContextHandler)> {
        let id = self
            .id
            .ok_or_else(|| CdpError::msg("Missing execution context id"))?;
        let config = self.config.unwrap_or_else(ContextConfig::from_env);
        let subscriptions = handler::Subscriptions::new(&*self.session, &config);

        let inner = ContextInner {
            session: self.session,
            realm: self.realm,
            realm_id: self.realm_id,
            name: self.name,
            frame_id: self.frame_id,
            config,
            injector: self.injector,
            intrinsic_bindings: self.intrinsic_bindings,
            state: Mutex::new(ContextState {
                id,
                epoch: 0,
                bindings: Default::default(),
                bindings_installed: false,
                utility: None,
            }),
            binding_lock: futures::lock::Mutex::new(()),
            lifecycle: Mutex::new(handler::Lifecycle::Active(subscriptions)),
            waker: AtomicWaker::new(),
        };
        let ctx = ExecutionContext {
            inner: Arc::new(inner),
        };
        let handler = ContextHandler::new(ctx.clone());
        Ok((ctx, handler))
    }
}

impl fmt::Debug for ExecutionContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContextBuilder")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("frame_id", &self.frame_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
