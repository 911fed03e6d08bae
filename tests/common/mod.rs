#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use serde_json::{json, Value};

use cdp_context::types::MethodId;
use cdp_context::{
    CdpError, ContextConfig, ContextHandler, ContextId, DomWorld, ExecutionContext, Realm,
    Session,
};

type Responder =
    Box<dyn Fn(&MockSession, &str, &Value) -> Option<Result<Value, CdpError>> + Send + Sync>;

/// A session that answers commands with a script and records them.
///
/// The responder runs synchronously inside `send`, so events it emits reach
/// the listeners before the response.
pub struct MockSession {
    responder: Responder,
    calls: Mutex<Vec<(String, Value)>>,
    listeners: Mutex<HashMap<String, Vec<UnboundedSender<Value>>>>,
}

impl MockSession {
    /// Commands the responder returns `None` for get the `default_response`
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&MockSession, &str, &Value) -> Option<Result<Value, CdpError>>
            + Send
            + Sync
            + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
            listeners: Mutex::new(HashMap::new()),
        })
    }

    /// Resolves every command with its `default_response`
    pub fn silent() -> Arc<Self> {
        Self::new(|_, _, _| None)
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(method, _)| method).collect()
    }

    /// The params of all calls of `method`
    pub fn calls_to(&self, method: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params)
            .collect()
    }

    pub fn emit(&self, event: &str, params: Value) {
        let mut listeners = self.listeners.lock().unwrap();
        if let Some(senders) = listeners.get_mut(event) {
            senders.retain(|tx| tx.unbounded_send(params.clone()).is_ok());
        }
    }

    /// Number of listeners whose receiver is still alive
    pub fn listener_count(&self, event: &str) -> usize {
        let mut listeners = self.listeners.lock().unwrap();
        listeners
            .get_mut(event)
            .map(|senders| {
                senders.retain(|tx| !tx.is_closed());
                senders.len()
            })
            .unwrap_or_default()
    }
}

impl Session for MockSession {
    fn send(
        &self,
        method: MethodId,
        params: Value,
    ) -> BoxFuture<'static, cdp_context::Result<Value>> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), params.clone()));
        let resp = (self.responder)(self, method.as_ref(), &params)
            .unwrap_or_else(|| Ok(default_response(method.as_ref())));
        future::ready(resp).boxed()
    }

    fn listen(&self, event: MethodId) -> UnboundedReceiver<Value> {
        let (tx, rx) = unbounded();
        self.listeners
            .lock()
            .unwrap()
            .entry(event.to_string())
            .or_default()
            .push(tx);
        rx
    }
}

/// `undefined` for evaluations, fixed ids for created worlds and scripts and
/// `{}` otherwise
pub fn default_response(method: &str) -> Value {
    match method {
        "Runtime.evaluate" | "Runtime.callFunctionOn" => {
            json!({ "result": { "type": "undefined" } })
        }
        "Page.createIsolatedWorld" => json!({ "executionContextId": 100 }),
        "Page.addScriptToEvaluateOnNewDocument" => json!({ "identifier": "1" }),
        _ => json!({}),
    }
}

pub fn protocol_error(message: &str) -> CdpError {
    cdp_context::types::Error::new(-32000, message).into()
}

/// A `Runtime.evaluate`/`Runtime.callFunctionOn` response
pub fn result(object: Value) -> Option<Result<Value, CdpError>> {
    Some(Ok(json!({ "result": object })))
}

/// Echo the first argument of `Runtime.callFunctionOn` as the result
pub fn echo_first_argument(params: &Value) -> Option<Result<Value, CdpError>> {
    let arg = &params["arguments"][0];
    if let Some(literal) = arg["unserializableValue"].as_str() {
        let ty = if literal.ends_with('n') { "bigint" } else { "number" };
        return result(json!({ "type": ty, "unserializableValue": literal }));
    }
    result(json!({ "type": "object", "value": arg["value"].clone() }))
}

pub struct Fixture {
    pub session: Arc<MockSession>,
    pub world: Arc<DomWorld>,
    pub ctx: ExecutionContext,
    pub handler: ContextHandler,
}

pub fn fixture(session: Arc<MockSession>, id: impl Into<ContextId>) -> Fixture {
    fixture_with(session, id, ContextConfig::default(), |builder| builder)
}

pub fn fixture_with(
    session: Arc<MockSession>,
    id: impl Into<ContextId>,
    config: ContextConfig,
    customize: impl FnOnce(
        cdp_context::ExecutionContextBuilder,
    ) -> cdp_context::ExecutionContextBuilder,
) -> Fixture {
    let dyn_session: Arc<dyn Session> = session.clone();
    let world = DomWorld::main_world(Arc::clone(&dyn_session));
    let realm: Arc<dyn Realm> = world.clone();
    let builder = ExecutionContext::builder(dyn_session, &realm)
        .id(id)
        .frame_id("F1")
        .config(config);
    let (ctx, handler) = customize(builder).build().unwrap();
    world.set_context(ctx.clone());
    Fixture {
        session,
        world,
        ctx,
        handler,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Log lines of the current thread up to `DEBUG`, while the guard lives
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn start() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
