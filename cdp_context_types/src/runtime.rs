use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impl_method;
use crate::Command;

#[doc = "Id of an execution context.\n[ExecutionContextId](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-ExecutionContextId)"]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct ExecutionContextId(i64);

impl ExecutionContextId {
    pub const IDENTIFIER: &'static str = "Runtime.ExecutionContextId";

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn inner(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExecutionContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[doc = "Unique script identifier.\n[ScriptId](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-ScriptId)"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct ScriptId(String);

impl ScriptId {
    pub const IDENTIFIER: &'static str = "Runtime.ScriptId";
}

impl AsRef<str> for ScriptId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[doc = "Unique object identifier.\n[RemoteObjectId](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-RemoteObjectId)"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct RemoteObjectId(String);

impl RemoteObjectId {
    pub const IDENTIFIER: &'static str = "Runtime.RemoteObjectId";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for RemoteObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[doc = "Primitive value which cannot be JSON-stringified. Includes values `-0`, `NaN`, `Infinity`,\n`-Infinity`, and bigint literals.\n[UnserializableValue](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-UnserializableValue)"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnserializableValue(String);

impl UnserializableValue {
    pub const IDENTIFIER: &'static str = "Runtime.UnserializableValue";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AsRef<str> for UnserializableValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[doc = "Mirror object referencing original JavaScript object.\n[RemoteObject](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-RemoteObject)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    #[doc = "Object type."]
    pub r#type: RemoteObjectType,
    #[doc = "Object subtype hint. Specified for `object` or `wasm` type values only."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<RemoteObjectSubtype>,
    #[doc = "Object class (constructor) name. Specified for `object` type values only."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[doc = "Remote object value in case of primitive values or JSON values (if it was requested)."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[doc = "Primitive value which can not be JSON-stringified does not have `value`, but gets this\nproperty."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unserializable_value: Option<UnserializableValue>,
    #[doc = "String representation of the object."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[doc = "Unique object identifier (for non-primitive values)."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<RemoteObjectId>,
}

impl RemoteObject {
    pub const IDENTIFIER: &'static str = "Runtime.RemoteObject";

    pub fn new(r#type: RemoteObjectType) -> RemoteObject {
        Self {
            r#type,
            subtype: Default::default(),
            class_name: Default::default(),
            value: Default::default(),
            unserializable_value: Default::default(),
            description: Default::default(),
            object_id: Default::default(),
        }
    }
}

#[doc = "Object type."]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteObjectType {
    Object,
    Function,
    Undefined,
    String,
    Number,
    Boolean,
    Symbol,
    Bigint,
    Wasm,
}

impl RemoteObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteObjectType::Object => "object",
            RemoteObjectType::Function => "function",
            RemoteObjectType::Undefined => "undefined",
            RemoteObjectType::String => "string",
            RemoteObjectType::Number => "number",
            RemoteObjectType::Boolean => "boolean",
            RemoteObjectType::Symbol => "symbol",
            RemoteObjectType::Bigint => "bigint",
            RemoteObjectType::Wasm => "wasm",
        }
    }
}

#[doc = "Object subtype hint. Specified for `object` or `wasm` type values only."]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteObjectSubtype {
    Array,
    Null,
    Node,
    Regexp,
    Date,
    Map,
    Set,
    Weakmap,
    Weakset,
    Iterator,
    Generator,
    Error,
    Proxy,
    Promise,
    Typedarray,
    Arraybuffer,
    Dataview,
    Webassemblymemory,
    Wasmvalue,
    #[serde(other)]
    Other,
}

#[doc = "Represents function call argument. Either remote object id `objectId`, primitive `value`,\nunserializable primitive value or neither of (for undefined) them should be specified.\n[CallArgument](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-CallArgument)"]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallArgument {
    #[doc = "Primitive value or serializable javascript object."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    #[doc = "Primitive value which can not be JSON-stringified."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unserializable_value: Option<UnserializableValue>,
    #[doc = "Remote object handle."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<RemoteObjectId>,
}

impl CallArgument {
    pub const IDENTIFIER: &'static str = "Runtime.CallArgument";

    pub fn value(value: serde_json::Value) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }

    pub fn unserializable(value: impl Into<String>) -> Self {
        Self {
            unserializable_value: Some(UnserializableValue::new(value)),
            ..Default::default()
        }
    }

    pub fn object(object_id: RemoteObjectId) -> Self {
        Self {
            object_id: Some(object_id),
            ..Default::default()
        }
    }
}

#[doc = "Description of an isolated world.\n[ExecutionContextDescription](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-ExecutionContextDescription)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContextDescription {
    #[doc = "Unique id of the execution context. It can be used to specify in which execution context\nscript evaluation should be performed."]
    pub id: ExecutionContextId,
    #[doc = "Execution context origin."]
    #[serde(default)]
    pub origin: String,
    #[doc = "Human readable name describing given context."]
    #[serde(default)]
    pub name: String,
    #[doc = "A system-unique execution context identifier."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    #[doc = "Embedder-specific auxiliary data likely matching {isDefault: boolean, type: 'default'|'isolated'|'worker', frameId: string}"]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aux_data: Option<serde_json::Value>,
}

impl ExecutionContextDescription {
    pub fn new(id: ExecutionContextId) -> Self {
        Self {
            id,
            origin: Default::default(),
            name: Default::default(),
            unique_id: None,
            aux_data: None,
        }
    }

    /// Whether `auxData.isDefault` is set, marking the main world of a frame
    pub fn is_default(&self) -> bool {
        self.aux_data
            .as_ref()
            .and_then(|data| data.get("isDefault"))
            .and_then(serde_json::Value::as_bool)
            .unwrap_or_default()
    }

    /// The `auxData.frameId` of the frame this context belongs to
    pub fn frame_id(&self) -> Option<&str> {
        self.aux_data
            .as_ref()
            .and_then(|data| data.get("frameId"))
            .and_then(serde_json::Value::as_str)
    }
}

#[doc = "Stack entry for runtime errors and assertions.\n[CallFrame](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-CallFrame)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFrame {
    #[doc = "JavaScript function name."]
    pub function_name: String,
    #[doc = "JavaScript script id."]
    pub script_id: ScriptId,
    #[doc = "JavaScript script name or url."]
    pub url: String,
    #[doc = "JavaScript script line number (0-based)."]
    pub line_number: i64,
    #[doc = "JavaScript script column number (0-based)."]
    pub column_number: i64,
}

#[doc = "Call frames for assertions or error messages.\n[StackTrace](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-StackTrace)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackTrace {
    #[doc = "String label of this stack trace. For async traces this may be a name of the function that\ninitiated the async call."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[doc = "JavaScript function name."]
    pub call_frames: Vec<CallFrame>,
    #[doc = "Asynchronous JavaScript stack trace that preceded this stack, if available."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Box<StackTrace>>,
}

impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(desc) = self.description.as_ref() {
            writeln!(f, "{}", desc)?;
        }
        for frame in &self.call_frames {
            writeln!(
                f,
                "{}@{}:{}:{}",
                frame.function_name, frame.url, frame.line_number, frame.column_number
            )?;
        }
        Ok(())
    }
}

#[doc = "Detailed information about exception (or error) that was thrown during script compilation or\nexecution.\n[ExceptionDetails](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#type-ExceptionDetails)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    #[doc = "Exception id."]
    pub exception_id: i64,
    #[doc = "Exception text, which should be used together with exception object when available."]
    pub text: String,
    #[doc = "Line number of the exception location (0-based)."]
    pub line_number: i64,
    #[doc = "Column number of the exception location (0-based)."]
    pub column_number: i64,
    #[doc = "Script ID of the exception location."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_id: Option<ScriptId>,
    #[doc = "URL of the exception location, to be used when the script was not reported."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[doc = "JavaScript stack trace if available."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<StackTrace>,
    #[doc = "Exception object if available."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<RemoteObject>,
    #[doc = "Identifier of the context where exception happened."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_context_id: Option<ExecutionContextId>,
}

impl ExceptionDetails {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            exception_id: 0,
            text: text.into(),
            line_number: 0,
            column_number: 0,
            script_id: None,
            url: None,
            stack_trace: None,
            exception: None,
            execution_context_id: None,
        }
    }
}

impl fmt::Display for ExceptionDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}:{}: {}",
            self.line_number, self.column_number, self.text
        )?;

        if let Some(stack) = self.stack_trace.as_ref() {
            write!(f, "{}", stack)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExceptionDetails {}

#[doc = "If executionContextId is empty, adds binding with the given name on the\nglobal objects of all inspected contexts, including those created later,\nbindings survive reloads.\n[addBinding](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#method-addBinding)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBindingParams {
    pub name: String,
    #[doc = "If specified, the binding is exposed to the executionContext with\nmatching name, even for contexts created after the binding is added."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_context_id: Option<ExecutionContextId>,
    #[doc = "If specified, the binding is exposed to the executionContext with\nmatching name, even for contexts created after the binding is added."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_context_name: Option<String>,
}

impl AddBindingParams {
    pub const IDENTIFIER: &'static str = "Runtime.addBinding";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            execution_context_id: None,
            execution_context_name: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddBindingReturns {}

impl Command for AddBindingParams {
    type Response = AddBindingReturns;
}

#[doc = "Evaluates expression on global object.\n[evaluate](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#method-evaluate)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateParams {
    #[doc = "Expression to evaluate."]
    pub expression: String,
    #[doc = "Specifies in which execution context to perform evaluation. If the parameter is omitted the\nevaluation will be performed in the context of the inspected page."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context_id: Option<ExecutionContextId>,
    #[doc = "Whether the result is expected to be a JSON object that should be sent by value."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_by_value: Option<bool>,
    #[doc = "Whether execution should be treated as initiated by user in the UI."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_gesture: Option<bool>,
    #[doc = "Whether execution should `await` for resulting value and return once awaited promise is\nresolved."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub await_promise: Option<bool>,
}

impl EvaluateParams {
    pub const IDENTIFIER: &'static str = "Runtime.evaluate";

    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            context_id: None,
            return_by_value: None,
            user_gesture: None,
            await_promise: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateReturns {
    #[doc = "Evaluation result."]
    pub result: RemoteObject,
    #[doc = "Exception details."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_details: Option<ExceptionDetails>,
}

impl Command for EvaluateParams {
    type Response = EvaluateReturns;
}

#[doc = "Calls function with given declaration on the given object. Object group of the result is\ninherited from the target object.\n[callFunctionOn](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#method-callFunctionOn)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFunctionOnParams {
    #[doc = "Declaration of the function to call."]
    pub function_declaration: String,
    #[doc = "Identifier of the object to call function on. Either objectId or executionContextId should\nbe specified."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<RemoteObjectId>,
    #[doc = "Call arguments. All call arguments must belong to the same JavaScript world as the target\nobject."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<CallArgument>>,
    #[doc = "Whether the result is expected to be a JSON object which should be sent by value."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_by_value: Option<bool>,
    #[doc = "Whether execution should be treated as initiated by user in the UI."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_gesture: Option<bool>,
    #[doc = "Whether execution should `await` for resulting value and return once awaited promise is\nresolved."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub await_promise: Option<bool>,
    #[doc = "Specifies execution context which global object will be used to call function on. Either\nexecutionContextId or objectId should be specified."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_context_id: Option<ExecutionContextId>,
}

impl CallFunctionOnParams {
    pub const IDENTIFIER: &'static str = "Runtime.callFunctionOn";

    pub fn new(function_declaration: impl Into<String>) -> Self {
        Self {
            function_declaration: function_declaration.into(),
            object_id: None,
            arguments: None,
            return_by_value: None,
            user_gesture: None,
            await_promise: None,
            execution_context_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallFunctionOnReturns {
    #[doc = "Call result."]
    pub result: RemoteObject,
    #[doc = "Exception details."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_details: Option<ExceptionDetails>,
}

impl Command for CallFunctionOnParams {
    type Response = CallFunctionOnReturns;
}

#[doc = "Enables reporting of execution contexts creation by means of `executionContextCreated` event.\nWhen the reporting gets enabled the event will be sent immediately for each existing execution\ncontext.\n[enable](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#method-enable)"]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnableParams {}

impl EnableParams {
    pub const IDENTIFIER: &'static str = "Runtime.enable";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnableReturns {}

impl Command for EnableParams {
    type Response = EnableReturns;
}

#[doc = "Disables reporting of execution contexts creation.\n[disable](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#method-disable)"]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisableParams {}

impl DisableParams {
    pub const IDENTIFIER: &'static str = "Runtime.disable";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisableReturns {}

impl Command for DisableParams {
    type Response = DisableReturns;
}

#[doc = "Releases remote object with given id.\n[releaseObject](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#method-releaseObject)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseObjectParams {
    #[doc = "Identifier of the object to release."]
    pub object_id: RemoteObjectId,
}

impl ReleaseObjectParams {
    pub const IDENTIFIER: &'static str = "Runtime.releaseObject";

    pub fn new(object_id: RemoteObjectId) -> Self {
        Self { object_id }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReleaseObjectReturns {}

impl Command for ReleaseObjectParams {
    type Response = ReleaseObjectReturns;
}

#[doc = "Notification is issued every time when binding is called.\n[bindingCalled](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#event-bindingCalled)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventBindingCalled {
    pub name: String,
    pub payload: String,
    #[doc = "Identifier of the context where the call was made."]
    pub execution_context_id: ExecutionContextId,
}

impl EventBindingCalled {
    pub const IDENTIFIER: &'static str = "Runtime.bindingCalled";
}

#[doc = "Issued when console API was called.\n[consoleAPICalled](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#event-consoleAPICalled)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventConsoleApiCalled {
    #[doc = "Type of the call."]
    pub r#type: String,
    #[doc = "Call arguments."]
    pub args: Vec<RemoteObject>,
    #[doc = "Identifier of the context where the call was made."]
    pub execution_context_id: ExecutionContextId,
    #[doc = "Call timestamp."]
    pub timestamp: f64,
    #[doc = "Stack trace captured when the call was made."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<StackTrace>,
}

impl EventConsoleApiCalled {
    pub const IDENTIFIER: &'static str = "Runtime.consoleAPICalled";
}

#[doc = "Issued when new execution context is created.\n[executionContextCreated](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#event-executionContextCreated)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventExecutionContextCreated {
    #[doc = "A newly created execution context."]
    pub context: ExecutionContextDescription,
}

impl EventExecutionContextCreated {
    pub const IDENTIFIER: &'static str = "Runtime.executionContextCreated";
}

#[doc = "Issued when execution context is destroyed.\n[executionContextDestroyed](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#event-executionContextDestroyed)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventExecutionContextDestroyed {
    #[doc = "Id of the destroyed context"]
    pub execution_context_id: ExecutionContextId,
}

impl EventExecutionContextDestroyed {
    pub const IDENTIFIER: &'static str = "Runtime.executionContextDestroyed";
}

#[doc = "Issued when all executionContexts were cleared in browser\n[executionContextsCleared](https://chromedevtools.github.io/devtools-protocol/tot/Runtime/#event-executionContextsCleared)"]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventExecutionContextsCleared {}

impl EventExecutionContextsCleared {
    pub const IDENTIFIER: &'static str = "Runtime.executionContextsCleared";
}

impl_method!(
    AddBindingParams,
    EvaluateParams,
    CallFunctionOnParams,
    EnableParams,
    DisableParams,
    ReleaseObjectParams,
    EventBindingCalled,
    EventConsoleApiCalled,
    EventExecutionContextCreated,
    EventExecutionContextDestroyed,
    EventExecutionContextsCleared,
);

impl crate::Event for EventBindingCalled {}
impl crate::Event for EventConsoleApiCalled {}
impl crate::Event for EventExecutionContextCreated {}
impl crate::Event for EventExecutionContextDestroyed {}
impl crate::Event for EventExecutionContextsCleared {}
