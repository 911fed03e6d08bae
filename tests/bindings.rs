use std::sync::{Arc, Mutex};

use futures::{FutureExt, StreamExt};
use serde_json::{json, Value};

use cdp_context::{Binding, BindingArg, CdpError, ContextConfig, ContextEvent, EvalArg};

mod common;
use common::{fixture, fixture_with, protocol_error, result, MockSession};

fn echo_binding(name: &str) -> Binding {
    Binding::new(name, |_, args: Vec<BindingArg>| async move {
        let n = args[0].as_value().and_then(Value::as_i64).unwrap_or_default();
        Ok(EvalArg::from(n + 1))
    })
}

fn binding_called(name: &str, payload: Value, id: i64) -> Value {
    json!({
        "name": format!("__cdp_binding_{}", name),
        "payload": payload.to_string(),
        "executionContextId": id
    })
}

fn declarations(session: &MockSession) -> Vec<String> {
    session
        .calls_to("Runtime.callFunctionOn")
        .into_iter()
        .filter_map(|params| params["functionDeclaration"].as_str().map(str::to_string))
        .collect()
}

#[async_std::test]
async fn bindings_are_installed_once() {
    let f = fixture(MockSession::silent(), 5i64);
    let binding = echo_binding("onEvent");

    futures::join!(
        f.ctx.add_binding(binding.clone()),
        f.ctx.add_binding(binding.clone())
    );
    f.ctx.add_binding(binding).await;

    assert!(f.ctx.has_binding("onEvent"));
    assert_eq!(
        f.session.calls_to("Runtime.addBinding"),
        vec![json!({ "name": "__cdp_binding_onEvent", "executionContextId": 5 })]
    );
    let installs = f.session.calls_to("Runtime.callFunctionOn");
    assert_eq!(installs.len(), 1);
    assert!(installs[0]["functionDeclaration"]
        .as_str()
        .unwrap()
        .starts_with("function addPageBinding(type, name, prefix)"));
    assert_eq!(
        installs[0]["arguments"],
        json!([{ "value": "internal" }, { "value": "onEvent" }, { "value": "__cdp_binding_" }])
    );
}

#[async_std::test]
async fn named_contexts_scope_bindings_by_name() {
    let f = fixture_with(MockSession::silent(), 5i64, ContextConfig::default(), |b| {
        b.name("util")
    });
    f.ctx.add_binding(echo_binding("onEvent")).await;
    assert_eq!(
        f.session.calls_to("Runtime.addBinding"),
        vec![json!({ "name": "__cdp_binding_onEvent", "executionContextName": "util" })]
    );
}

#[async_std::test]
async fn clear_forgets_bindings() {
    let f = fixture(MockSession::silent(), 5i64);
    f.ctx.add_binding(echo_binding("onEvent")).await;
    assert!(f.ctx.has_binding("onEvent"));

    f.ctx.clear(6i64);
    assert!(!f.ctx.has_binding("onEvent"));
    f.ctx.add_binding(echo_binding("onEvent")).await;
    assert!(f.ctx.has_binding("onEvent"));

    let calls = f.session.calls_to("Runtime.addBinding");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1]["executionContextId"], json!(6));
}

#[async_std::test]
async fn failed_installs_are_not_recorded() {
    let session = MockSession::new(|_, method, params| match method {
        "Runtime.addBinding" if params["name"] == json!("__cdp_binding_gone") => {
            Some(Err(protocol_error("Cannot find context with specified id")))
        }
        "Runtime.addBinding" => Some(Err(protocol_error("Internal error"))),
        _ => None,
    });
    let f = fixture(session, 5i64);

    f.ctx.add_binding(echo_binding("gone")).await;
    f.ctx.add_binding(echo_binding("broken")).await;
    assert!(!f.ctx.has_binding("gone"));
    assert!(!f.ctx.has_binding("broken"));
    assert!(f.session.calls_to("Runtime.callFunctionOn").is_empty());
}

#[async_std::test]
async fn handler_runs_installed_bindings() {
    let mut f = fixture(MockSession::silent(), 5i64);
    f.ctx.add_binding(echo_binding("onEvent")).await;

    let payload = json!({
        "type": "internal",
        "name": "onEvent",
        "seq": 1,
        "args": [41],
        "isTrivial": true
    });
    f.session
        .emit("Runtime.bindingCalled", binding_called("onEvent", payload, 5));
    assert!(f.handler.next().now_or_never().is_none());

    let calls = f.session.calls_to("Runtime.callFunctionOn");
    let resolve = calls.last().unwrap();
    assert!(resolve["functionDeclaration"]
        .as_str()
        .unwrap()
        .starts_with("(name, seq, result) =>"));
    assert_eq!(
        resolve["arguments"],
        json!([{ "value": "onEvent" }, { "value": 1 }, { "value": 42 }])
    );
}

#[async_std::test]
async fn failing_bindings_reject_the_call() {
    let mut f = fixture(MockSession::silent(), 5i64);
    f.ctx
        .add_binding(Binding::new("fail", |_, _| async {
            Err::<EvalArg, _>(CdpError::msg("nope"))
        }))
        .await;

    let payload = json!({
        "type": "internal",
        "name": "fail",
        "seq": 4,
        "args": [],
        "isTrivial": true
    });
    f.session
        .emit("Runtime.bindingCalled", binding_called("fail", payload, 5));
    assert!(f.handler.next().now_or_never().is_none());

    let calls = f.session.calls_to("Runtime.callFunctionOn");
    let reject = calls.last().unwrap();
    assert!(reject["functionDeclaration"]
        .as_str()
        .unwrap()
        .starts_with("(name, seq, message) =>"));
    assert_eq!(
        reject["arguments"],
        json!([{ "value": "fail" }, { "value": 4 }, { "value": "nope" }])
    );
}

#[async_std::test]
async fn node_arguments_are_passed_as_handles() {
    let session = MockSession::new(|_, method, params| {
        let declaration = params["functionDeclaration"].as_str().unwrap_or_default();
        match method {
            "Runtime.callFunctionOn" if declaration.starts_with("(name, seq, index)") => {
                if params["arguments"][2] == json!({ "value": 0 }) {
                    result(json!({ "type": "object", "subtype": "node", "objectId": "node-1" }))
                } else {
                    result(json!({ "type": "number", "value": 2 }))
                }
            }
            _ => None,
        }
    });
    let mut f = fixture(session, 5i64);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let binding = Binding::new("onNode", move |_, args: Vec<BindingArg>| {
        let record = Arc::clone(&record);
        async move {
            let mut record = record.lock().unwrap();
            record.push(args[0].as_handle().map(|h| h.is_element()).unwrap_or_default());
            record.push(args[1].as_value() == Some(&json!(2)));
            Ok(EvalArg::undefined())
        }
    });
    f.ctx.add_binding(binding).await;

    let payload = json!({
        "type": "internal",
        "name": "onNode",
        "seq": 2,
        "args": [{}, 2],
        "isTrivial": false
    });
    f.session
        .emit("Runtime.bindingCalled", binding_called("onNode", payload, 5));
    assert!(f.handler.next().now_or_never().is_none());

    assert_eq!(*seen.lock().unwrap(), vec![true, true]);
    let fetches = declarations(&f.session)
        .into_iter()
        .filter(|d| d.starts_with("(name, seq, index)"))
        .count();
    assert_eq!(fetches, 2);
    // the element handle is released after the binding returned
    assert_eq!(
        f.session.calls_to("Runtime.releaseObject"),
        vec![json!({ "objectId": "node-1" })]
    );
}

#[async_std::test]
async fn foreign_calls_are_forwarded() {
    let mut f = fixture(MockSession::silent(), 5i64);
    f.ctx.add_binding(echo_binding("onEvent")).await;
    let installs = f.session.calls_to("Runtime.callFunctionOn").len();

    // another context
    let payload = json!({ "type": "internal", "name": "onEvent", "seq": 1, "args": [1] });
    f.session
        .emit("Runtime.bindingCalled", binding_called("onEvent", payload, 9));
    // not json
    f.session.emit(
        "Runtime.bindingCalled",
        json!({ "name": "__cdp_binding_onEvent", "payload": "{", "executionContextId": 5 }),
    );
    assert!(f.handler.next().now_or_never().is_none());

    let exposed = json!({ "type": "exposedFun", "name": "onEvent", "seq": 1, "args": [] });
    f.session
        .emit("Runtime.bindingCalled", binding_called("onEvent", exposed.clone(), 5));
    let unknown = json!({ "type": "internal", "name": "unknown", "seq": 1, "args": [] });
    f.session
        .emit("Runtime.bindingCalled", binding_called("unknown", unknown.clone(), 5));

    match f.handler.next().await {
        Some(ContextEvent::BindingCalled(event)) => {
            assert_eq!(event.payload, exposed.to_string())
        }
        other => panic!("unexpected event {:?}", other),
    }
    match f.handler.next().await {
        Some(ContextEvent::BindingCalled(event)) => {
            assert_eq!(event.payload, unknown.to_string())
        }
        other => panic!("unexpected event {:?}", other),
    }
    assert_eq!(f.session.calls_to("Runtime.callFunctionOn").len(), installs);
}
