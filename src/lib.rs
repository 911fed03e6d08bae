//! Execution contexts of the chrome devtools protocol.
//!
//! An [`ExecutionContext`] wraps a single javascript realm of a target behind
//! a [`Session`]. It evaluates scripts in that realm, exposes [`Binding`]s to
//! it and recovers its own id when the remote side did not report it yet.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use futures::StreamExt;
//! # use cdp_context::{DomWorld, ExecutionContext, Realm, Session};
//! # async fn demo(session: Arc<dyn Session>) -> cdp_context::Result<()> {
//! let world = DomWorld::main_world(Arc::clone(&session));
//! let realm: Arc<dyn Realm> = world.clone();
//! let (ctx, mut handler) = ExecutionContext::builder(session, &realm)
//!     .id(world.pending_id())
//!     .frame_id("F1")
//!     .build()?;
//! world.set_context(ctx.clone());
//!
//! async_std::task::spawn(async move { while handler.next().await.is_some() {} });
//!
//! let sum = ctx.evaluate("1 + 2", vec![]).await?;
//! assert_eq!(sum.into_value::<u32>()?, 3);
//! # Ok(())
//! # }
//! ```

pub mod binding;
pub mod config;
pub mod context;
pub mod error;
pub mod handle;
pub mod injector;
pub mod js;
pub mod query;
pub mod realm;
pub mod session;
pub mod utils;

pub use cdp_context_types as types;

pub use crate::binding::{Binding, BindingArg};
pub use crate::config::{AcquireStrategy, ContextConfig};
pub use crate::context::{
    ContextEvent, ContextHandler, ContextId, ExecutionContext, ExecutionContextBuilder, WorldKind,
};
pub use crate::error::{CdpError, Result};
pub use crate::handle::{JsHandle, RealmId};
pub use crate::injector::ScriptInjector;
pub use crate::js::{EvalArg, JsValue, LazyArg, Script, ScriptKind};
pub use crate::query::{query_bindings, QueryHandler};
pub use crate::realm::{DomWorld, DomWorldKind, Realm};
pub use crate::session::{execute, EventStream, Session};
