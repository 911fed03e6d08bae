use std::sync::Arc;

use thiserror::Error;

use cdp_context_types::runtime::ExceptionDetails;

pub type Result<T, E = CdpError> = std::result::Result<T, E>;

/// Message of the error that replaces transport errors caused by a navigation
pub const CONTEXT_DESTROYED: &str =
    "Execution context was destroyed, most likely because of a navigation.";

#[derive(Debug, Error)]
pub enum CdpError {
    #[error("{0}")]
    Serde(#[from] serde_json::Error),
    #[error("{0}")]
    Chrome(#[from] cdp_context_types::Error),
    /// A script raised while being evaluated
    #[error("{}", exception_message(.0))]
    JavascriptException(Box<ExceptionDetails>),
    #[error("{}", CONTEXT_DESTROYED)]
    ContextDestroyed,
    #[error("JSHandles can be evaluated only in the context they were created!")]
    ForeignHandle,
    #[error("JSHandle is disposed!")]
    DisposedHandle,
    #[error("{0} Recursive objects are not allowed.")]
    RecursiveArgument(String),
    #[error("Cannot create isolated world for workers")]
    WorkerNotSupported,
    #[error("Failed to acquire an execution context id after {0} attempts")]
    AcquireContextId(usize),
    #[error("Unsupported unserializable value: {0}")]
    UnsupportedValue(String),
    #[error("The realm that owns this execution context was dropped")]
    RealmDropped,
    #[error("Execution context has no frame id to create an isolated world in")]
    MissingFrameId,
    #[error("No script injector configured for this execution context")]
    NoScriptInjector,
    #[error("Arguments can only be passed to a function, got an expression")]
    ExpressionArguments,
    #[error("Argument must be resolved before it is converted")]
    UnresolvedArgument,
    #[error(transparent)]
    Shared(Arc<CdpError>),
    #[error("{0}")]
    ChromeMessage(String),
}

impl CdpError {
    pub fn msg(msg: impl Into<String>) -> Self {
        CdpError::ChromeMessage(msg.into())
    }

    /// Whether the remote side reported that the context or its frame is gone.
    pub(crate) fn is_context_gone(&self) -> bool {
        let msg = self.to_string();
        msg.contains("Execution context was destroyed")
            || msg.contains("Cannot find context with specified id")
    }
}

impl From<Arc<CdpError>> for CdpError {
    fn from(err: Arc<CdpError>) -> Self {
        CdpError::Shared(err)
    }
}

fn exception_message(details: &ExceptionDetails) -> String {
    details
        .exception
        .as_ref()
        .and_then(|obj| obj.description.clone())
        .unwrap_or_else(|| details.text.clone())
}
