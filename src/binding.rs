use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

use crate::context::ExecutionContext;
use crate::error::Result;
use crate::handle::JsHandle;
use crate::js::{EvalArg, Script};
use crate::utils::evaluation_string;

/// Prefix of the name under which a binding is registered with
/// `Runtime.addBinding`
pub const BINDING_PREFIX: &str = "__cdp_binding_";

/// Replaces the raw protocol binding `prefix + name` with a function that
/// keeps track of every call and returns a promise that is settled once the
/// binding ran on this side.
pub const ADD_PAGE_BINDING: &str = r#"function addPageBinding(type, name, prefix) {
  if (globalThis[name]) {
    return;
  }
  Object.assign(globalThis, {
    [name](...args) {
      const callBinding = globalThis[name];
      callBinding.args ??= new Map();
      callBinding.callbacks ??= new Map();
      const seq = (callBinding.lastSeq ?? 0) + 1;
      callBinding.lastSeq = seq;
      callBinding.args.set(seq, args);
      globalThis[prefix + name](
        JSON.stringify({
          type,
          name,
          seq,
          args,
          isTrivial: !args.some(value => value instanceof Node),
        })
      );
      return new Promise((resolve, reject) => {
        callBinding.callbacks.set(seq, {
          resolve(value) {
            callBinding.args.delete(seq);
            resolve(value);
          },
          reject(value) {
            callBinding.args.delete(seq);
            reject(value);
          },
        });
      });
    },
  });
}"#;

const GET_ARG: &str = "(name, seq, index) => globalThis[name].args.get(seq)[index]";

const RESOLVE: &str = r#"(name, seq, result) => {
  const callbacks = globalThis[name].callbacks;
  callbacks.get(seq).resolve(result);
  callbacks.delete(seq);
}"#;

const REJECT: &str = r#"(name, seq, message) => {
  const error = new Error(message);
  const callbacks = globalThis[name].callbacks;
  callbacks.get(seq).reject(error);
  callbacks.delete(seq);
}"#;

/// An argument a page passed to a binding
#[derive(Debug, Clone)]
pub enum BindingArg {
    /// Plain JSON value
    Value(serde_json::Value),
    /// A DOM node
    Handle(JsHandle),
}

impl BindingArg {
    pub fn as_value(&self) -> Option<&serde_json::Value> {
        match self {
            BindingArg::Value(value) => Some(value),
            BindingArg::Handle(_) => None,
        }
    }

    pub fn as_handle(&self) -> Option<&JsHandle> {
        match self {
            BindingArg::Handle(handle) => Some(handle),
            BindingArg::Value(_) => None,
        }
    }
}

/// The decoded payload of a `Runtime.bindingCalled` event of a binding
/// installed with [`ADD_PAGE_BINDING`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingPayload {
    pub r#type: String,
    pub name: String,
    pub seq: u64,
    pub args: Vec<serde_json::Value>,
    #[serde(default)]
    pub is_trivial: bool,
}

type BindingFn =
    dyn Fn(ExecutionContext, Vec<BindingArg>) -> BoxFuture<'static, Result<EvalArg>> + Send + Sync;

/// A function that scripts in an execution context can call.
#[derive(Clone)]
pub struct Binding {
    inner: Arc<BindingInner>,
}

struct BindingInner {
    name: String,
    init_source: Option<String>,
    callback: Box<BindingFn>,
}

impl Binding {
    pub fn new<F, Fut>(name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(ExecutionContext, Vec<BindingArg>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<EvalArg>> + Send + 'static,
    {
        Self::with_init_source(name, None, callback)
    }

    /// A binding with a custom script that installs it into new documents
    pub fn with_init_source<F, Fut>(
        name: impl Into<String>,
        init_source: Option<String>,
        callback: F,
    ) -> Self
    where
        F: Fn(ExecutionContext, Vec<BindingArg>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<EvalArg>> + Send + 'static,
    {
        Self {
            inner: Arc::new(BindingInner {
                name: name.into(),
                init_source,
                callback: Box::new(move |ctx, args| callback(ctx, args).boxed()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The script that installs this binding into a new document
    pub fn init_source(&self) -> String {
        self.inner.init_source.clone().unwrap_or_else(|| {
            evaluation_string(ADD_PAGE_BINDING, &["internal", self.name(), BINDING_PREFIX])
        })
    }

    /// Run the binding for the call `seq` and settle the promise the page
    /// is waiting on.
    ///
    /// Errors are logged, a binding never fails the caller.
    pub async fn run(
        &self,
        ctx: ExecutionContext,
        seq: u64,
        args: Vec<serde_json::Value>,
        is_trivial: bool,
    ) {
        let args = if is_trivial {
            args.into_iter().map(BindingArg::Value).collect()
        } else {
            self.fetch_args(&ctx, seq, args).await
        };
        let handles: Vec<JsHandle> = args
            .iter()
            .filter_map(|arg| arg.as_handle().cloned())
            .collect();

        let delivered = match (self.inner.callback)(ctx.clone(), args).await {
            Ok(result) => {
                ctx.evaluate(
                    Script::function(RESOLVE),
                    vec![self.name().into(), seq.into(), result],
                )
                .await
            }
            Err(err) => {
                ctx.evaluate(
                    Script::function(REJECT),
                    vec![self.name().into(), seq.into(), err.to_string().into()],
                )
                .await
            }
        };
        if let Err(err) = delivered {
            tracing::debug!(binding = self.name(), seq, "Failed to settle binding call: {}", err);
        }
        for handle in handles {
            handle.dispose().await;
        }
    }

    /// Replace the arguments that are DOM nodes with handles
    async fn fetch_args(
        &self,
        ctx: &ExecutionContext,
        seq: u64,
        args: Vec<serde_json::Value>,
    ) -> Vec<BindingArg> {
        let mut resolved = Vec::with_capacity(args.len());
        for (index, arg) in args.into_iter().enumerate() {
            let handle = ctx
                .evaluate_handle(
                    Script::function(GET_ARG),
                    vec![self.name().into(), seq.into(), index.into()],
                )
                .await;
            match handle {
                Ok(handle) if handle.is_element() => resolved.push(BindingArg::Handle(handle)),
                Ok(handle) => {
                    handle.dispose().await;
                    resolved.push(BindingArg::Value(arg));
                }
                Err(err) => {
                    tracing::debug!(
                        binding = self.name(),
                        seq,
                        index,
                        "Failed to fetch binding argument: {}",
                        err
                    );
                    resolved.push(BindingArg::Value(arg));
                }
            }
        }
        resolved
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.inner.name)
            .field("init_source", &self.inner.init_source)
            .finish_non_exhaustive()
    }
}
