use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use cdp_context_types::runtime::{
    ReleaseObjectParams, RemoteObject, RemoteObjectId, RemoteObjectSubtype,
};

use crate::error::Result;
use crate::js::JsValue;
use crate::session::{execute, Session};

static NEXT_REALM_ID: AtomicUsize = AtomicUsize::new(0);

/// Process unique identity of a realm.
///
/// Handles remember the realm they were created in, and may only be passed
/// to execution contexts of that realm.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct RealmId(usize);

impl RealmId {
    pub fn next() -> Self {
        RealmId(NEXT_REALM_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A handle to an object that lives in the remote javascript realm.
///
/// Cloning the handle does not clone the remote object, all clones share
/// the disposed state.
#[derive(Clone)]
pub struct JsHandle {
    inner: Arc<HandleInner>,
}

struct HandleInner {
    remote_object: RemoteObject,
    realm: RealmId,
    disposed: AtomicBool,
    session: Arc<dyn Session>,
}

impl JsHandle {
    pub fn new(remote_object: RemoteObject, realm: RealmId, session: Arc<dyn Session>) -> Self {
        Self {
            inner: Arc::new(HandleInner {
                remote_object,
                realm,
                disposed: AtomicBool::new(false),
                session,
            }),
        }
    }

    pub fn remote_object(&self) -> &RemoteObject {
        &self.inner.remote_object
    }

    pub fn object_id(&self) -> Option<&RemoteObjectId> {
        self.inner.remote_object.object_id.as_ref()
    }

    pub fn realm_id(&self) -> RealmId {
        self.inner.realm
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::Acquire)
    }

    /// Whether this references a DOM node
    pub fn is_element(&self) -> bool {
        self.inner.remote_object.subtype == Some(RemoteObjectSubtype::Node)
    }

    /// The value of the remote object if it was returned by value or is a
    /// primitive
    pub fn value(&self) -> Result<JsValue> {
        JsValue::from_remote_object(&self.inner.remote_object)
    }

    /// Release the remote object.
    ///
    /// Only the first call talks to the remote side. Failures are logged.
    pub async fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Some(object_id) = self.object_id().cloned() {
            let session = Arc::clone(&self.inner.session);
            if let Err(err) = execute(&*session, ReleaseObjectParams::new(object_id)).await {
                tracing::debug!("Failed to release remote object: {}", err);
            }
        }
    }
}

impl fmt::Debug for JsHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsHandle")
            .field("remote_object", &self.inner.remote_object)
            .field("realm", &self.inner.realm)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
