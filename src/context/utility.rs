use std::sync::Arc;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::context::{ExecutionContext, UtilityFuture};
use crate::error::{CdpError, Result};
use crate::handle::JsHandle;
use crate::js::Script;

impl ExecutionContext {
    /// Handle to the utility script of the [`ScriptInjector`], evaluated in
    /// this context.
    ///
    /// The first access also installs the intrinsic bindings. The script is
    /// evaluated again once the injector reports that it changed, the
    /// outdated handle is disposed.
    ///
    /// [`ScriptInjector`]: crate::injector::ScriptInjector
    pub async fn injected_utility(&self) -> Result<JsHandle> {
        let injector = self
            .inner
            .injector
            .clone()
            .ok_or(CdpError::NoScriptInjector)?;

        let (utility, install, stale) = {
            let mut state = self.inner.state();
            let install = if state.bindings_installed {
                None
            } else {
                state.bindings_installed = true;
                Some(self.install_intrinsic_bindings())
            };
            match injector.inject(state.utility.is_none()) {
                Some(script) => {
                    let utility = self.evaluate_utility(script, install);
                    let stale = state.utility.replace(utility.clone());
                    (utility, None, stale)
                }
                None => match state.utility.clone() {
                    Some(utility) => (utility, install, None),
                    // not reachable, `inject` is forced without a utility
                    None => return Err(CdpError::NoScriptInjector),
                },
            }
        };

        if let Some(install) = install {
            install.await;
        }
        if let Some(stale) = stale {
            if let Ok(handle) = stale.await {
                handle.dispose().await;
            }
        }
        utility.await.map_err(CdpError::Shared)
    }

    /// Install the intrinsic bindings concurrently, ignoring failures
    fn install_intrinsic_bindings(&self) -> BoxFuture<'static, ()> {
        let ctx = self.downgrade();
        let bindings = self.inner.intrinsic_bindings.clone();
        async move {
            if let Some(ctx) = ctx.upgrade() {
                join_all(
                    bindings
                        .into_iter()
                        .map(|binding| ctx.add_binding_without_throwing(binding)),
                )
                .await;
            }
        }
        .boxed()
    }

    fn evaluate_utility(
        &self,
        script: String,
        install: Option<BoxFuture<'static, ()>>,
    ) -> UtilityFuture {
        let ctx = self.downgrade();
        async move {
            if let Some(install) = install {
                install.await;
            }
            let ctx = ctx
                .upgrade()
                .ok_or_else(|| Arc::new(CdpError::ContextDestroyed))?;
            ctx.evaluate_handle(Script::expression(script), Vec::new())
                .await
                .map_err(Arc::new)
        }
        .boxed()
        .shared()
    }
}
