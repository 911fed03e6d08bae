use serde::{Deserialize, Serialize};

use crate::impl_method;
use crate::runtime::ExecutionContextId;
use crate::Command;

#[doc = "Unique frame identifier.\n[FrameId](https://chromedevtools.github.io/devtools-protocol/tot/Page/#type-FrameId)"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct FrameId(String);

impl FrameId {
    pub const IDENTIFIER: &'static str = "Page.FrameId";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn inner(&self) -> &String {
        &self.0
    }
}

impl AsRef<str> for FrameId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for FrameId {
    fn from(id: &str) -> Self {
        FrameId::new(id)
    }
}

impl From<String> for FrameId {
    fn from(id: String) -> Self {
        FrameId(id)
    }
}

#[doc = "Unique script identifier.\n[ScriptIdentifier](https://chromedevtools.github.io/devtools-protocol/tot/Page/#type-ScriptIdentifier)"]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(transparent)]
pub struct ScriptIdentifier(String);

impl ScriptIdentifier {
    pub const IDENTIFIER: &'static str = "Page.ScriptIdentifier";
}

impl AsRef<str> for ScriptIdentifier {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[doc = "Creates an isolated world for the given frame.\n[createIsolatedWorld](https://chromedevtools.github.io/devtools-protocol/tot/Page/#method-createIsolatedWorld)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIsolatedWorldParams {
    #[doc = "Id of the frame in which the isolated world should be created."]
    pub frame_id: FrameId,
    #[doc = "An optional name which is reported in the Execution Context."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_name: Option<String>,
    #[doc = "Whether or not universal access should be granted to the isolated world. This is a powerful\noption, use with caution."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grant_univeral_access: Option<bool>,
}

impl CreateIsolatedWorldParams {
    pub const IDENTIFIER: &'static str = "Page.createIsolatedWorld";

    pub fn new(frame_id: impl Into<FrameId>) -> Self {
        Self {
            frame_id: frame_id.into(),
            world_name: None,
            grant_univeral_access: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIsolatedWorldReturns {
    #[doc = "Execution context of the isolated world."]
    pub execution_context_id: ExecutionContextId,
}

impl Command for CreateIsolatedWorldParams {
    type Response = CreateIsolatedWorldReturns;
}

#[doc = "Evaluates given script in every frame upon creation (before loading frame's scripts).\n[addScriptToEvaluateOnNewDocument](https://chromedevtools.github.io/devtools-protocol/tot/Page/#method-addScriptToEvaluateOnNewDocument)"]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddScriptToEvaluateOnNewDocumentParams {
    pub source: String,
    #[doc = "If specified, creates an isolated world with the given name and evaluates given script in it.\nThis world name will be used as the ExecutionContextDescription::name when the corresponding\nevent is emitted."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_name: Option<String>,
    #[doc = "If true, runs the script immediately on existing execution contexts or worlds.\nDefault: false."]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_immediately: Option<bool>,
}

impl AddScriptToEvaluateOnNewDocumentParams {
    pub const IDENTIFIER: &'static str = "Page.addScriptToEvaluateOnNewDocument";

    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            world_name: None,
            run_immediately: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddScriptToEvaluateOnNewDocumentReturns {
    #[doc = "Identifier of the added script."]
    pub identifier: ScriptIdentifier,
}

impl Command for AddScriptToEvaluateOnNewDocumentParams {
    type Response = AddScriptToEvaluateOnNewDocumentReturns;
}

impl_method!(
    CreateIsolatedWorldParams,
    AddScriptToEvaluateOnNewDocumentParams
);
