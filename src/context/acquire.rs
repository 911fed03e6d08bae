use futures::{FutureExt, StreamExt};

use cdp_context_types::page::{
    AddScriptToEvaluateOnNewDocumentParams, CreateIsolatedWorldParams, FrameId,
};
use cdp_context_types::runtime::{
    AddBindingParams, DisableParams, EnableParams, EvaluateParams, EventBindingCalled,
    EventExecutionContextCreated, ExecutionContextDescription, ExecutionContextId,
};

use crate::config::AcquireStrategy;
use crate::context::{ContextId, ExecutionContext, WorldKind};
use crate::error::{CdpError, Result};
use crate::session::{execute, subscribe};
use crate::utils;

/// How often the acquisition of a context id is attempted before giving up
pub const MAX_ACQUIRE_ATTEMPTS: usize = 3;

/// The frame of the context is gone, no point in reporting it
const NO_FRAME: &str = "No frame for given id found";

/// Log acquisition diagnostics if the context was configured with `debug`
macro_rules! trace_acquire {
    ($ctx:expr, $($arg:tt)+) => {
        if $ctx.config().debug() {
            tracing::info!(target: "cdp_context::acquire", $($arg)+);
        }
    };
}

impl ExecutionContext {
    /// Find the id of this context if it is not known yet.
    ///
    /// Fails after [`MAX_ACQUIRE_ATTEMPTS`] attempts that did not turn up an
    /// id.
    pub async fn acquire_context_id(&self) -> Result<()> {
        let strategy = self.config().strategy();
        for attempt in 1..=MAX_ACQUIRE_ATTEMPTS {
            let (kind, epoch) = {
                let state = self.inner.state();
                match state.id {
                    ContextId::Resolved(_) => return Ok(()),
                    ContextId::Unresolved(kind) => (kind, state.epoch),
                }
            };
            trace_acquire!(
                self,
                ?kind,
                name = ?self.name(),
                %strategy,
                attempt,
                "acquiring context id"
            );

            let acquired = match strategy {
                AcquireStrategy::AddBinding => self.acquire_with_binding(kind).await,
                AcquireStrategy::AlwaysIsolated => {
                    if kind == WorldKind::Worker {
                        return Err(CdpError::WorkerNotSupported);
                    }
                    Some(self.create_isolated_world(self.name().map(str::to_string)).await?)
                }
                AcquireStrategy::EnableDisable => self.acquire_with_enable_disable(kind).await?,
            };

            match acquired {
                Some(id) if self.set_resolved_id(id, epoch) => return Ok(()),
                // cleared in the meantime, start over with the new id
                Some(_) => {}
                None => trace_acquire!(self, attempt, "failed to acquire context id"),
            }
        }
        if self.id().is_resolved() {
            return Ok(());
        }
        Err(CdpError::AcquireContextId(MAX_ACQUIRE_ATTEMPTS))
    }

    /// Contains all errors, an error just means that this attempt did not
    /// resolve an id
    async fn acquire_with_binding(&self, kind: WorldKind) -> Option<ExecutionContextId> {
        let res = match kind {
            WorldKind::Isolated => self
                .create_isolated_world(self.name().map(str::to_string))
                .await
                .map(Some),
            WorldKind::Main | WorldKind::Worker => self.main_world_handshake().await,
        };
        match res {
            Ok(id) => id,
            Err(err) => {
                trace_acquire!(self, "acquisition failed: {}", err);
                let msg = err.to_string();
                if !msg.contains(NO_FRAME) {
                    tracing::debug!("Failed to acquire execution context id: {}", msg);
                }
                None
            }
        }
    }

    fn require_frame_id(&self) -> Result<FrameId> {
        self.frame_id().cloned().ok_or(CdpError::MissingFrameId)
    }

    async fn create_isolated_world(
        &self,
        world_name: Option<String>,
    ) -> Result<ExecutionContextId> {
        let params = CreateIsolatedWorldParams {
            world_name,
            grant_univeral_access: Some(true),
            ..CreateIsolatedWorldParams::new(self.require_frame_id()?)
        };
        let resp = execute(&**self.session(), params).await?;
        trace_acquire!(self, id = %resp.execution_context_id, "Page.createIsolatedWorld");
        Ok(resp.execution_context_id)
    }

    /// The main world can't be created, but it can be told apart by the
    /// context id of a binding call.
    ///
    /// A one time binding is installed into every document, an isolated world
    /// then signals the document of the frame, which answers by calling the
    /// binding with the frame id from the main world.
    async fn main_world_handshake(&self) -> Result<Option<ExecutionContextId>> {
        let frame_id = self.require_frame_id()?;
        let session = &**self.session();
        let name = utils::random_binding_name();
        trace_acquire!(self, binding = %name, "one time binding");

        execute(session, AddBindingParams::new(name.clone())).await?;
        let mut calls = subscribe::<EventBindingCalled>(session);

        let source = format!(
            "document.addEventListener('{name}', (e) => self['{name}'](e.detail.frameId))",
            name = name
        );
        let params = AddScriptToEvaluateOnNewDocumentParams {
            run_immediately: Some(true),
            ..AddScriptToEvaluateOnNewDocumentParams::new(source)
        };
        execute(session, params).await?;

        let world = self.create_isolated_world(Some(name.clone())).await?;
        let signal = format!(
            "document.dispatchEvent(new CustomEvent('{}', {{ detail: {{ frameId: '{}' }} }}))",
            name,
            frame_id.as_ref()
        );
        let params = EvaluateParams {
            context_id: Some(world),
            ..EvaluateParams::new(signal)
        };
        execute(session, params).await?;

        while let Some(Some(call)) = calls.next().now_or_never() {
            trace_acquire!(
                self,
                name = %call.name,
                payload = %call.payload,
                id = %call.execution_context_id,
                "binding called"
            );
            if call.name == name && call.payload == frame_id.as_ref() {
                return Ok(Some(call.execution_context_id));
            }
        }
        Ok(None)
    }

    /// Enabling the `Runtime` domain reports every existing context
    async fn acquire_with_enable_disable(
        &self,
        kind: WorldKind,
    ) -> Result<Option<ExecutionContextId>> {
        let session = &**self.session();
        let mut created = subscribe::<EventExecutionContextCreated>(session);
        execute(session, EnableParams::default()).await?;
        execute(session, DisableParams::default()).await?;

        let mut acquired = None;
        while let Some(Some(event)) = created.next().now_or_never() {
            trace_acquire!(
                self,
                id = %event.context.id,
                name = %event.context.name,
                "execution context created"
            );
            if acquired.is_none() && self.is_context_of(kind, &event.context) {
                acquired = Some(event.context.id);
            }
        }
        Ok(acquired)
    }

    fn is_context_of(&self, kind: WorldKind, desc: &ExecutionContextDescription) -> bool {
        match kind {
            WorldKind::Main => desc.is_default(),
            WorldKind::Isolated => self.name() == Some(desc.name.as_str()),
            WorldKind::Worker => true,
        }
    }
}
