use futures::future::BoxFuture;
use futures::FutureExt;

use cdp_context_types::runtime::{AddBindingParams, EventBindingCalled};

use crate::binding::{Binding, BindingPayload, ADD_PAGE_BINDING, BINDING_PREFIX};
use crate::context::ExecutionContext;
use crate::error::Result;
use crate::js::Script;
use crate::session::execute;

/// What to do with a `Runtime.bindingCalled` event
pub(crate) enum Dispatch {
    /// Not for this context or not decodable
    Ignore,
    /// Not a binding of this context, pass it on
    Forward(EventBindingCalled),
    Run(BoxFuture<'static, ()>),
}

impl ExecutionContext {
    /// Expose `binding` to the scripts of this context.
    ///
    /// Installing a binding that is already installed does nothing. Failures
    /// are logged, a context that went away in the meantime is not an error.
    pub async fn add_binding(&self, binding: Binding) {
        let name = binding.name().to_string();
        if let Err(err) = self.install_binding(binding).await {
            tracing::debug!(binding = %name, "Failed to add binding: {}", err);
        }
    }

    /// Like `add_binding`, for bindings that hosts may not support
    pub(crate) async fn add_binding_without_throwing(&self, binding: Binding) {
        let name = binding.name().to_string();
        if let Err(err) = self.install_binding(binding).await {
            tracing::debug!(binding = %name, "Skipped binding: {}", err);
        }
    }

    async fn install_binding(&self, binding: Binding) -> Result<()> {
        if self.has_binding(binding.name()) {
            return Ok(());
        }
        let _guard = self.inner.binding_lock.lock().await;
        // a concurrent call may have installed it while we waited
        if self.has_binding(binding.name()) {
            return Ok(());
        }
        let epoch = self.epoch();

        match self.register_binding(&binding).await {
            Ok(()) => {
                let mut state = self.inner.state();
                if state.epoch == epoch {
                    state.bindings.insert(binding.name().to_string(), binding);
                }
                Ok(())
            }
            Err(err) if err.is_context_gone() => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn register_binding(&self, binding: &Binding) -> Result<()> {
        let mut params = AddBindingParams::new(format!("{}{}", BINDING_PREFIX, binding.name()));
        match self.name() {
            Some(name) => params.execution_context_name = Some(name.to_string()),
            None => params.execution_context_id = Some(self.resolved_id().await?),
        }
        execute(&**self.session(), params).await?;

        self.evaluate(
            Script::function(ADD_PAGE_BINDING),
            vec!["internal".into(), binding.name().into(), BINDING_PREFIX.into()],
        )
        .await?;
        Ok(())
    }

    pub(crate) fn dispatch_binding(&self, event: EventBindingCalled) -> Dispatch {
        if self.id().resolved() != Some(event.execution_context_id) {
            return Dispatch::Ignore;
        }
        // page scripts may call the binding with anything
        let payload: serde_json::Value = match serde_json::from_str(&event.payload) {
            Ok(payload) => payload,
            Err(_) => return Dispatch::Ignore,
        };
        if payload.get("type").and_then(serde_json::Value::as_str) != Some("internal") {
            return Dispatch::Forward(event);
        }
        let payload: BindingPayload = match serde_json::from_value(payload) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!("Ignoring malformed binding payload: {}", err);
                return Dispatch::Ignore;
            }
        };
        let binding = match self.inner.state().bindings.get(&payload.name) {
            Some(binding) => binding.clone(),
            None => return Dispatch::Forward(event),
        };
        let ctx = self.clone();
        Dispatch::Run(
            async move {
                binding
                    .run(ctx, payload.seq, payload.args, payload.is_trivial)
                    .await
            }
            .boxed(),
        )
    }
}
