use std::fmt;

use futures::future::BoxFuture;
use num_bigint::BigInt;
use serde::de::{DeserializeOwned, IntoDeserializer};
use serde::Serialize;

use cdp_context_types::runtime::{CallArgument, RemoteObject, RemoteObjectType};

use crate::binding::BindingArg;
use crate::context::ExecutionContext;
use crate::error::{CdpError, Result};
use crate::handle::JsHandle;
use crate::utils::{self, SOURCE_URL};

/// A javascript value that was transferred by value.
///
/// Besides plain JSON this covers the primitives JSON can't express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsValue {
    Undefined,
    NegativeZero,
    Infinity,
    NegativeInfinity,
    NaN,
    BigInt(BigInt),
    Value(serde_json::Value),
}

impl JsValue {
    /// Converts the value of a `RemoteObject` that was returned by value
    pub fn from_remote_object(object: &RemoteObject) -> Result<Self> {
        if let Some(unserializable) = object.unserializable_value.as_ref() {
            let literal = unserializable.as_ref();
            if object.r#type == RemoteObjectType::Bigint || literal.ends_with('n') {
                return literal
                    .trim_end_matches('n')
                    .parse::<BigInt>()
                    .map(JsValue::BigInt)
                    .map_err(|_| CdpError::UnsupportedValue(literal.to_string()));
            }
            return match literal {
                "-0" => Ok(JsValue::NegativeZero),
                "NaN" => Ok(JsValue::NaN),
                "Infinity" => Ok(JsValue::Infinity),
                "-Infinity" => Ok(JsValue::NegativeInfinity),
                other => Err(CdpError::UnsupportedValue(other.to_string())),
            };
        }
        Ok(object
            .value
            .clone()
            .map(JsValue::Value)
            .unwrap_or(JsValue::Undefined))
    }

    /// The literal of values that have no JSON representation
    pub fn unserializable(&self) -> Option<String> {
        match self {
            JsValue::NegativeZero => Some("-0".to_string()),
            JsValue::Infinity => Some("Infinity".to_string()),
            JsValue::NegativeInfinity => Some("-Infinity".to_string()),
            JsValue::NaN => Some("NaN".to_string()),
            JsValue::BigInt(b) => Some(format!("{}n", b)),
            JsValue::Undefined | JsValue::Value(_) => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, JsValue::Undefined)
    }

    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            JsValue::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Attempts to deserialize the value into the given type
    pub fn into_value<T: DeserializeOwned>(self) -> serde_json::Result<T> {
        match self {
            JsValue::Undefined => serde_json::from_value(serde_json::Value::Null),
            JsValue::Value(value) => serde_json::from_value(value),
            JsValue::NegativeZero => T::deserialize(f64_deserializer(-0.0)),
            JsValue::Infinity => T::deserialize(f64_deserializer(f64::INFINITY)),
            JsValue::NegativeInfinity => T::deserialize(f64_deserializer(f64::NEG_INFINITY)),
            JsValue::NaN => T::deserialize(f64_deserializer(f64::NAN)),
            JsValue::BigInt(b) => {
                if let Ok(n) = i64::try_from(&b) {
                    serde_json::from_value(n.into())
                } else if let Ok(n) = u64::try_from(&b) {
                    serde_json::from_value(n.into())
                } else {
                    serde_json::from_value(b.to_string().into())
                }
            }
        }
    }

    pub(crate) fn to_call_argument(&self) -> CallArgument {
        match self {
            JsValue::Undefined => CallArgument::default(),
            JsValue::Value(value) => CallArgument::value(value.clone()),
            other => other
                .unserializable()
                .map(CallArgument::unserializable)
                .unwrap_or_default(),
        }
    }
}

fn f64_deserializer(
    value: f64,
) -> serde::de::value::F64Deserializer<serde_json::Error> {
    value.into_deserializer()
}

impl From<f64> for JsValue {
    fn from(n: f64) -> Self {
        if n.is_nan() {
            JsValue::NaN
        } else if n == f64::INFINITY {
            JsValue::Infinity
        } else if n == f64::NEG_INFINITY {
            JsValue::NegativeInfinity
        } else if n == 0.0 && n.is_sign_negative() {
            JsValue::NegativeZero
        } else {
            JsValue::Value(n.into())
        }
    }
}

impl From<BigInt> for JsValue {
    fn from(b: BigInt) -> Self {
        JsValue::BigInt(b)
    }
}

impl From<serde_json::Value> for JsValue {
    fn from(value: serde_json::Value) -> Self {
        JsValue::Value(value)
    }
}

impl fmt::Display for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsValue::Undefined => f.write_str("undefined"),
            JsValue::Value(value) => write!(f, "{}", value),
            other => f.write_str(&other.unserializable().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScriptKind {
    /// Evaluated with `Runtime.evaluate`
    Expression,
    /// A function declaration invoked with `Runtime.callFunctionOn`
    Function,
}

/// The source of a script to evaluate in an execution context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    source: String,
    kind: ScriptKind,
    source_url: Option<String>,
}

impl Script {
    pub fn expression(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: ScriptKind::Expression,
            source_url: None,
        }
    }

    pub fn function(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            kind: ScriptKind::Function,
            source_url: None,
        }
    }

    /// Report the script under this url in stack traces instead of the
    /// internal one
    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn kind(&self) -> ScriptKind {
        self.kind
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The source with a `//# sourceURL=` comment
    pub(crate) fn into_source(self) -> String {
        let url = self.source_url.as_deref().unwrap_or(SOURCE_URL);
        utils::with_source_url(self.source, url)
    }
}

impl From<&str> for Script {
    fn from(source: &str) -> Self {
        Script::from(source.to_string())
    }
}

impl From<String> for Script {
    fn from(source: String) -> Self {
        if utils::is_likely_js_function(&source) {
            Script::function(source)
        } else {
            Script::expression(source)
        }
    }
}

type LazyFn =
    Box<dyn FnOnce(ExecutionContext) -> BoxFuture<'static, Result<EvalArg>> + Send + Sync>;

/// An argument that is only known once the evaluating context is, like the
/// injected utility of that context.
pub struct LazyArg {
    get: LazyFn,
}

impl LazyArg {
    pub fn new<F>(get: F) -> Self
    where
        F: FnOnce(ExecutionContext) -> BoxFuture<'static, Result<EvalArg>> + Send + Sync + 'static,
    {
        Self { get: Box::new(get) }
    }

    /// The injected utility of the evaluating context
    pub fn injected_utility() -> Self {
        Self::new(|ctx| {
            Box::pin(async move { Ok(EvalArg::Handle(ctx.injected_utility().await?)) })
        })
    }

    pub(crate) async fn resolve(self, ctx: ExecutionContext) -> Result<EvalArg> {
        (self.get)(ctx).await
    }
}

impl fmt::Debug for LazyArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyArg").finish_non_exhaustive()
    }
}

/// An argument passed to a function evaluated in an execution context
#[derive(Debug)]
pub enum EvalArg {
    Value(JsValue),
    Handle(JsHandle),
    Lazy(LazyArg),
}

impl EvalArg {
    /// Serialize any value into an argument
    pub fn serialize(value: &impl Serialize) -> Result<Self> {
        match serde_json::to_value(value) {
            Ok(value) => Ok(EvalArg::Value(JsValue::Value(value))),
            Err(err) => {
                let msg = err.to_string();
                if msg.contains("circular") || msg.contains("recursion") {
                    Err(CdpError::RecursiveArgument(msg))
                } else {
                    Err(err.into())
                }
            }
        }
    }

    pub fn undefined() -> Self {
        EvalArg::Value(JsValue::Undefined)
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, EvalArg::Lazy(_))
    }
}

impl From<JsValue> for EvalArg {
    fn from(value: JsValue) -> Self {
        EvalArg::Value(value)
    }
}

impl From<JsHandle> for EvalArg {
    fn from(handle: JsHandle) -> Self {
        EvalArg::Handle(handle)
    }
}

impl From<&JsHandle> for EvalArg {
    fn from(handle: &JsHandle) -> Self {
        EvalArg::Handle(handle.clone())
    }
}

impl From<LazyArg> for EvalArg {
    fn from(arg: LazyArg) -> Self {
        EvalArg::Lazy(arg)
    }
}

impl From<BindingArg> for EvalArg {
    fn from(arg: BindingArg) -> Self {
        match arg {
            BindingArg::Value(value) => EvalArg::Value(JsValue::Value(value)),
            BindingArg::Handle(handle) => EvalArg::Handle(handle),
        }
    }
}

impl From<f64> for EvalArg {
    fn from(n: f64) -> Self {
        EvalArg::Value(n.into())
    }
}

impl From<BigInt> for EvalArg {
    fn from(b: BigInt) -> Self {
        EvalArg::Value(JsValue::BigInt(b))
    }
}

impl From<serde_json::Value> for EvalArg {
    fn from(value: serde_json::Value) -> Self {
        EvalArg::Value(JsValue::Value(value))
    }
}

macro_rules! impl_json_arg {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for EvalArg {
                fn from(value: $ty) -> Self {
                    EvalArg::Value(JsValue::Value(value.into()))
                }
            }
        )*
    };
}

impl_json_arg!(i64, u64, i32, u32, usize, bool, &str, String);
