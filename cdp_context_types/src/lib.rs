use std::borrow::Cow;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod page;
pub mod runtime;

/// The identifier of a method or event, like `Runtime.evaluate`
pub type MethodId = Cow<'static, str>;

pub trait Method {
    /// The whole string identifier for this method like: `DOM.removeNode`
    fn identifier(&self) -> MethodId;

    /// The name of the domain this method belongs to: `DOM`
    fn domain_name(&self) -> MethodId {
        self.split().0
    }

    /// The standalone identifier of the method inside the domain: `removeNode`
    fn method_name(&self) -> MethodId {
        self.split().1
    }

    /// Tuple of (`domain_name`, `method_name`) : (`DOM`, `removeNode`)
    fn split(&self) -> (MethodId, MethodId) {
        match self.identifier() {
            Cow::Borrowed(id) => {
                let (domain, method) = id.split_once('.').unwrap_or((id, ""));
                (domain.into(), method.into())
            }
            Cow::Owned(id) => {
                let (domain, method) = id.split_once('.').unwrap_or((id.as_str(), ""));
                (Cow::Owned(domain.into()), Cow::Owned(method.into()))
            }
        }
    }
}

/// Static identifier of a method or event type.
///
/// Used when subscribing to an event before any instance of it exists.
pub trait MethodType {
    fn method_id() -> MethodId
    where
        Self: Sized;
}

/// A request that expects a `Response` from the remote side
pub trait Command: serde::ser::Serialize + Method {
    type Response: DeserializeOwned + fmt::Debug;
}

/// A notification pushed by the remote side
pub trait Event: MethodType + DeserializeOwned + fmt::Debug + Send + 'static {}

/// The Reason why a method call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Error {
    /// Error code
    pub code: i64,
    /// Error Message
    pub message: String,
}

impl Error {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

/// Implements `Method` and `MethodType` for a params or event type with an
/// `IDENTIFIER` constant.
macro_rules! impl_method {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::Method for $ty {
                fn identifier(&self) -> $crate::MethodId {
                    Self::IDENTIFIER.into()
                }
            }

            impl $crate::MethodType for $ty {
                fn method_id() -> $crate::MethodId {
                    Self::IDENTIFIER.into()
                }
            }
        )*
    };
}
pub(crate) use impl_method;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::EvaluateParams;

    #[test]
    fn split_method() {
        let params = EvaluateParams::new("1 + 2");
        assert_eq!(params.identifier(), "Runtime.evaluate");
        assert_eq!(params.domain_name(), "Runtime");
        assert_eq!(params.method_name(), "evaluate");
    }

    #[test]
    fn error_display() {
        let err = Error::new(-32000, "Cannot find context with specified id");
        assert_eq!(
            err.to_string(),
            "Error -32000: Cannot find context with specified id"
        );
    }
}
