use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::BoxStream;
use futures::TryStreamExt;

use crate::binding::{Binding, BindingArg};
use crate::context::ExecutionContext;
use crate::error::{CdpError, Result};
use crate::handle::JsHandle;
use crate::js::{EvalArg, JsValue, Script};

/// Name of the binding that resolves the first element matching a selector
pub const QUERY_ONE_BINDING: &str = "__ariaQuerySelector";

/// Name of the binding that resolves all elements matching a selector
pub const QUERY_ALL_BINDING: &str = "__ariaQuerySelectorAll";

/// Resolves selectors below an element on this side of the connection, for
/// selectors the page can't resolve on its own.
pub trait QueryHandler: Send + Sync + 'static {
    fn query_one(&self, element: JsHandle, selector: String)
        -> BoxFuture<'static, Result<Option<JsHandle>>>;

    fn query_all(&self, element: JsHandle, selector: String)
        -> BoxStream<'static, Result<JsHandle>>;
}

/// The two bindings that expose `handler` to the injected utility script
pub fn query_bindings(handler: Arc<dyn QueryHandler>) -> [Binding; 2] {
    let one = Arc::clone(&handler);
    let query_one = Binding::with_init_source(
        QUERY_ONE_BINDING,
        Some(String::new()),
        move |_, args| {
            let handler = Arc::clone(&one);
            async move {
                let (element, selector) = query_args(args)?;
                Ok(match handler.query_one(element, selector).await? {
                    Some(handle) => EvalArg::Handle(handle),
                    None => EvalArg::Value(JsValue::Value(serde_json::Value::Null)),
                })
            }
        },
    );

    let query_all = Binding::with_init_source(
        QUERY_ALL_BINDING,
        Some(String::new()),
        move |ctx: ExecutionContext, args| {
            let handler = Arc::clone(&handler);
            async move {
                let (element, selector) = query_args(args)?;
                let elements: Vec<JsHandle> =
                    handler.query_all(element, selector).try_collect().await?;
                let args = elements.iter().map(EvalArg::from).collect();
                let array = ctx
                    .evaluate_handle(Script::function("(...elements) => elements"), args)
                    .await?;
                for element in elements {
                    element.dispose().await;
                }
                Ok(EvalArg::Handle(array))
            }
        },
    );

    [query_one, query_all]
}

fn query_args(args: Vec<BindingArg>) -> Result<(JsHandle, String)> {
    let mut args = args.into_iter();
    let element = match args.next() {
        Some(BindingArg::Handle(handle)) => handle,
        _ => return Err(CdpError::msg("Query binding expects an element")),
    };
    let selector = match args.next() {
        Some(BindingArg::Value(serde_json::Value::String(selector))) => selector,
        _ => return Err(CdpError::msg("Query binding expects a selector")),
    };
    Ok((element, selector))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_args_need_an_element() {
        let err = query_args(vec![BindingArg::Value(json!("div"))]).unwrap_err();
        assert_eq!(err.to_string(), "Query binding expects an element");
        assert!(query_args(Vec::new()).is_err());
    }
}
