use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::stream::{self, BoxStream};
use futures::future::BoxFuture;
use futures::{FutureExt, StreamExt};
use serde_json::json;

use cdp_context::{
    query_bindings, Binding, CdpError, ContextConfig, EvalArg, JsHandle, LazyArg, QueryHandler,
    Result, ScriptInjector,
};

mod common;
use common::{fixture, fixture_with, result, CapturedLogs, Fixture, MockSession};

const UTILITY: &str = "module.exports.default = { marker: 1 };";

fn utility_session() -> Arc<MockSession> {
    let evaluations = AtomicUsize::new(0);
    MockSession::new(move |_, method, params| match method {
        "Runtime.evaluate"
            if params["expression"]
                .as_str()
                .map_or(false, |expr| expr.starts_with("(() => {")) =>
        {
            let n = evaluations.fetch_add(1, Ordering::SeqCst) + 1;
            result(json!({ "type": "object", "objectId": format!("utility-{}", n) }))
        }
        _ => None,
    })
}

fn with_injector(session: Arc<MockSession>, injector: Arc<ScriptInjector>) -> Fixture {
    fixture_with(session, 5i64, ContextConfig::default(), move |b| {
        b.injector(injector)
            .intrinsic_binding(Binding::new("intrinsic", |_, _| async {
                Ok(EvalArg::undefined())
            }))
    })
}

fn object_id(handle: &JsHandle) -> &str {
    handle.object_id().map(|id| id.as_ref()).unwrap_or_default()
}

#[async_std::test]
async fn requires_an_injector() {
    let f = fixture(MockSession::silent(), 5i64);
    let err = f.ctx.injected_utility().await.unwrap_err();
    assert!(matches!(err, CdpError::NoScriptInjector));
}

#[async_std::test]
async fn utility_is_evaluated_once() {
    let f = with_injector(utility_session(), Arc::new(ScriptInjector::new(UTILITY)));

    let (first, second) = futures::join!(f.ctx.injected_utility(), f.ctx.injected_utility());
    let (first, second) = (first.unwrap(), second.unwrap());
    assert_eq!(object_id(&first), "utility-1");
    assert_eq!(object_id(&second), "utility-1");
    let third = f.ctx.injected_utility().await.unwrap();
    assert_eq!(object_id(&third), "utility-1");

    let evaluations = f.session.calls_to("Runtime.evaluate");
    assert_eq!(evaluations.len(), 1);
    assert!(evaluations[0]["expression"].as_str().unwrap().contains(UTILITY));

    // the intrinsic bindings are installed before the utility is evaluated
    let methods = f.session.methods();
    let binding = methods.iter().position(|m| m == "Runtime.addBinding").unwrap();
    let evaluate = methods.iter().position(|m| m == "Runtime.evaluate").unwrap();
    assert!(binding < evaluate);
    assert!(f.ctx.has_binding("intrinsic"));
}

#[async_std::test]
async fn updated_utility_replaces_the_old_one() {
    let injector = Arc::new(ScriptInjector::new(UTILITY));
    let f = with_injector(utility_session(), Arc::clone(&injector));

    let first = f.ctx.injected_utility().await.unwrap();
    assert_eq!(object_id(&first), "utility-1");

    injector.append("(utility) => { utility.extra = true; }");
    let second = f.ctx.injected_utility().await.unwrap();
    assert_eq!(object_id(&second), "utility-2");
    assert!(first.is_disposed());
    assert_eq!(
        f.session.calls_to("Runtime.releaseObject"),
        vec![json!({ "objectId": "utility-1" })]
    );
    let evaluations = f.session.calls_to("Runtime.evaluate");
    assert!(evaluations[1]["expression"]
        .as_str()
        .unwrap()
        .contains("((utility) => { utility.extra = true; })(module.exports.default);"));
    assert_eq!(f.session.calls_to("Runtime.addBinding").len(), 1);
}

#[async_std::test]
async fn cleared_context_reinjects() {
    let f = with_injector(utility_session(), Arc::new(ScriptInjector::new(UTILITY)));
    f.ctx.injected_utility().await.unwrap();

    f.ctx.clear(6i64);
    let utility = f.ctx.injected_utility().await.unwrap();
    assert_eq!(object_id(&utility), "utility-2");
    assert_eq!(f.session.calls_to("Runtime.addBinding").len(), 2);
    assert_eq!(
        f.session.calls_to("Runtime.evaluate")[1]["contextId"],
        json!(6)
    );
}

#[async_std::test]
async fn lazy_utility_argument() {
    let f = with_injector(utility_session(), Arc::new(ScriptInjector::new(UTILITY)));
    f.ctx
        .evaluate(
            "(utility, selector) => utility.query(selector)",
            vec![LazyArg::injected_utility().into(), "div".into()],
        )
        .await
        .unwrap();

    let calls = f.session.calls_to("Runtime.callFunctionOn");
    let call = calls
        .iter()
        .find(|c| {
            c["functionDeclaration"]
                .as_str()
                .unwrap()
                .starts_with("(utility, selector)")
        })
        .unwrap();
    assert_eq!(
        call["arguments"],
        json!([{ "objectId": "utility-1" }, { "value": "div" }])
    );
}

struct FixedQuery {
    found: Vec<JsHandle>,
}

impl QueryHandler for FixedQuery {
    fn query_one(&self, _: JsHandle, _: String) -> BoxFuture<'static, Result<Option<JsHandle>>> {
        let found = self.found.first().cloned();
        async move { Ok(found) }.boxed()
    }

    fn query_all(&self, _: JsHandle, _: String) -> BoxStream<'static, Result<JsHandle>> {
        stream::iter(self.found.clone().into_iter().map(Ok)).boxed()
    }
}

#[async_std::test]
async fn query_bindings_resolve_elements() {
    use cdp_context::types::runtime::{RemoteObject, RemoteObjectId, RemoteObjectType};
    use cdp_context::Realm;

    let session = MockSession::new(|_, method, params| {
        let declaration = params["functionDeclaration"].as_str().unwrap_or_default();
        match method {
            "Runtime.callFunctionOn" if declaration.starts_with("(name, seq, index)") => {
                if params["arguments"][2] == json!({ "value": 0 }) {
                    result(json!({ "type": "object", "subtype": "node", "objectId": "root" }))
                } else {
                    result(json!({ "type": "string", "value": "button" }))
                }
            }
            "Runtime.callFunctionOn" if declaration.starts_with("(...elements)") => {
                result(json!({ "type": "object", "subtype": "array", "objectId": "array-1" }))
            }
            _ => None,
        }
    });
    let mut f = fixture(session, 5i64);

    let element = |id: &str| {
        let mut object = RemoteObject::new(RemoteObjectType::Object);
        object.object_id = Some(RemoteObjectId::new(id));
        f.world.create_handle(object)
    };
    let handler = FixedQuery {
        found: vec![element("a"), element("b")],
    };
    for binding in query_bindings(Arc::new(handler)) {
        assert_eq!(binding.init_source(), "");
        f.ctx.add_binding(binding).await;
    }

    let payload = json!({
        "type": "internal",
        "name": "__ariaQuerySelectorAll",
        "seq": 1,
        "args": [{}, "button"],
        "isTrivial": false
    });
    f.session.emit(
        "Runtime.bindingCalled",
        json!({
            "name": "__cdp_binding___ariaQuerySelectorAll",
            "payload": payload.to_string(),
            "executionContextId": 5
        }),
    );
    assert!(f.handler.next().now_or_never().is_none());

    let calls = f.session.calls_to("Runtime.callFunctionOn");
    let collect = calls
        .iter()
        .find(|c| {
            c["functionDeclaration"]
                .as_str()
                .unwrap()
                .starts_with("(...elements)")
        })
        .unwrap();
    assert_eq!(
        collect["arguments"],
        json!([{ "objectId": "a" }, { "objectId": "b" }])
    );
    let resolve = calls.last().unwrap();
    assert_eq!(resolve["arguments"][2], json!({ "objectId": "array-1" }));

    let released = f.session.calls_to("Runtime.releaseObject");
    for id in ["a", "b", "root"] {
        assert!(released.contains(&json!({ "objectId": id })), "{}", id);
    }
}

#[async_std::test]
async fn skipped_intrinsic_bindings_are_logged() {
    let (logs, _guard) = CapturedLogs::start();
    let session = MockSession::new(|_, method, params| match method {
        "Runtime.addBinding" => Some(Err(common::protocol_error("Internal error"))),
        "Runtime.evaluate"
            if params["expression"]
                .as_str()
                .map_or(false, |expr| expr.starts_with("(() => {")) =>
        {
            result(json!({ "type": "object", "objectId": "utility-1" }))
        }
        _ => None,
    });
    let f = with_injector(session, Arc::new(ScriptInjector::new(UTILITY)));

    let utility = f.ctx.injected_utility().await.unwrap();
    assert_eq!(object_id(&utility), "utility-1");
    assert!(!f.ctx.has_binding("intrinsic"));

    let logs = logs.contents();
    let line = logs
        .lines()
        .find(|line| line.contains("Skipped binding"))
        .unwrap();
    assert!(line.contains("DEBUG"));
    assert!(line.contains("Internal error"));
}
