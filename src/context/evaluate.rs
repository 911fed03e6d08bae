use futures::future::try_join_all;

use cdp_context_types::runtime::{
    CallArgument, CallFunctionOnParams, EvaluateParams, ExecutionContextId, RemoteObject,
    RemoteObjectType,
};

use crate::context::{ContextId, ExecutionContext};
use crate::error::{CdpError, Result};
use crate::handle::JsHandle;
use crate::js::{EvalArg, JsValue, Script, ScriptKind};
use crate::session::execute;

impl ExecutionContext {
    /// Evaluate the script and return its result by value.
    ///
    /// Only functions accept `args`.
    pub async fn evaluate(&self, script: impl Into<Script>, args: Vec<EvalArg>) -> Result<JsValue> {
        let object = self.evaluate_remote(script.into(), args, true).await?;
        JsValue::from_remote_object(&object)
    }

    /// Evaluate the script and return a handle to its result
    pub async fn evaluate_handle(
        &self,
        script: impl Into<Script>,
        args: Vec<EvalArg>,
    ) -> Result<JsHandle> {
        let object = self.evaluate_remote(script.into(), args, false).await?;
        Ok(self.realm()?.create_handle(object))
    }

    /// The id of the context, acquired first if it is not known
    pub(crate) async fn resolved_id(&self) -> Result<ExecutionContextId> {
        loop {
            if let ContextId::Resolved(id) = self.id() {
                return Ok(id);
            }
            self.acquire_context_id().await?;
        }
    }

    async fn evaluate_remote(
        &self,
        script: Script,
        args: Vec<EvalArg>,
        return_by_value: bool,
    ) -> Result<RemoteObject> {
        let kind = script.kind();
        if kind == ScriptKind::Expression && !args.is_empty() {
            return Err(CdpError::ExpressionArguments);
        }
        let id = self.resolved_id().await?;
        let source = script.into_source();

        let resp = match kind {
            ScriptKind::Expression => {
                let params = EvaluateParams {
                    context_id: Some(id),
                    return_by_value: Some(return_by_value),
                    await_promise: Some(true),
                    user_gesture: Some(true),
                    ..EvaluateParams::new(source)
                };
                execute(&**self.session(), params)
                    .await
                    .map(|resp| (resp.result, resp.exception_details))
            }
            ScriptKind::Function => {
                let arguments = self.convert_args(args).await?;
                let params = CallFunctionOnParams {
                    execution_context_id: Some(id),
                    arguments: Some(arguments),
                    return_by_value: Some(return_by_value),
                    await_promise: Some(true),
                    user_gesture: Some(true),
                    ..CallFunctionOnParams::new(source)
                };
                execute(&**self.session(), params)
                    .await
                    .map(|resp| (resp.result, resp.exception_details))
            }
        };

        match resp {
            Ok((_, Some(details))) => Err(CdpError::JavascriptException(Box::new(details))),
            Ok((result, None)) => Ok(result),
            Err(err) => rewrite_error(err),
        }
    }

    /// Convert the arguments in order, resolving lazy ones first
    async fn convert_args(&self, args: Vec<EvalArg>) -> Result<Vec<CallArgument>> {
        if !args.iter().any(EvalArg::is_lazy) {
            return args.iter().map(|arg| self.convert_arg(arg)).collect();
        }
        let args = try_join_all(args.into_iter().map(|arg| {
            let ctx = self.clone();
            async move {
                match arg {
                    EvalArg::Lazy(lazy) => lazy.resolve(ctx).await,
                    arg => Ok(arg),
                }
            }
        }))
        .await?;
        args.iter().map(|arg| self.convert_arg(arg)).collect()
    }

    fn convert_arg(&self, arg: &EvalArg) -> Result<CallArgument> {
        match arg {
            EvalArg::Value(value) => Ok(value.to_call_argument()),
            EvalArg::Handle(handle) => {
                if handle.realm_id() != self.realm_id() {
                    return Err(CdpError::ForeignHandle);
                }
                if handle.is_disposed() {
                    return Err(CdpError::DisposedHandle);
                }
                let object = handle.remote_object();
                if let Some(value) = object.unserializable_value.clone() {
                    return Ok(CallArgument {
                        unserializable_value: Some(value),
                        ..Default::default()
                    });
                }
                Ok(match object.object_id.clone() {
                    Some(object_id) => CallArgument::object(object_id),
                    None => CallArgument {
                        value: object.value.clone(),
                        ..Default::default()
                    },
                })
            }
            EvalArg::Lazy(_) => Err(CdpError::UnresolvedArgument),
        }
    }
}

/// Translate protocol errors that have a more useful meaning for an
/// evaluation
fn rewrite_error(err: CdpError) -> Result<RemoteObject> {
    let msg = err.to_string();
    if msg.contains("Object reference chain is too long")
        || msg.contains("Object couldn't be returned by value")
    {
        return Ok(RemoteObject::new(RemoteObjectType::Undefined));
    }
    if msg.ends_with("Cannot find context with specified id")
        || msg.ends_with("Inspected target navigated or closed")
    {
        return Err(CdpError::ContextDestroyed);
    }
    Err(err)
}
