//! Hook types and per-stage configuration

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::document::RuntimeValue;

/// Boxed future, the crate's async boundary type.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Single-document hook: transform the document or veto it with `None`.
pub type OneHook<D> =
    Arc<dyn Fn(Arc<HookContext>, D) -> BoxFuture<'static, Option<D>> + Send + Sync>;

/// Batch hook: receives the previous hook's output list and the composed
/// "one" hook of the same stage as a delegate it may call per item or
/// ignore entirely.
pub type ManyHook<D> = Arc<
    dyn Fn(Arc<HookContext>, Vec<D>, Option<OneHook<D>>) -> BoxFuture<'static, Vec<D>>
        + Send
        + Sync,
>;

/// Wraps an async closure as a [`OneHook`].
pub fn one<D, F, Fut>(hook: F) -> OneHook<D>
where
    D: 'static,
    F: Fn(Arc<HookContext>, D) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Option<D>> + Send + 'static,
{
    Arc::new(move |ctx, doc| Box::pin(hook(ctx, doc)))
}

/// Wraps an async closure as a [`ManyHook`].
pub fn many<D, F, Fut>(hook: F) -> ManyHook<D>
where
    D: 'static,
    F: Fn(Arc<HookContext>, Vec<D>, Option<OneHook<D>>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Vec<D>> + Send + 'static,
{
    Arc::new(move |ctx, docs, delegate| Box::pin(hook(ctx, docs, delegate)))
}

/// Context a hook observes: which request, which collection, and for
/// write-stage hooks, what kind of write.
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Request ID for tracing.
    pub request_id: Uuid,
    /// Collection the document belongs to, when known.
    pub collection: Option<String>,
    /// Write-operation metadata; `None` on the read path.
    pub write: Option<WriteInfo>,
}

impl HookContext {
    /// Context for a read-path stage.
    pub fn read(request_id: Uuid, collection: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            request_id,
            collection: Some(collection.into()),
            write: None,
        })
    }

    /// Context for a read-path stage with no known collection.
    pub fn read_untyped(request_id: Uuid) -> Arc<Self> {
        Arc::new(Self {
            request_id,
            collection: None,
            write: None,
        })
    }

    /// Context for a write-path stage.
    pub fn write(request_id: Uuid, collection: impl Into<String>, write: WriteInfo) -> Arc<Self> {
        Arc::new(Self {
            request_id,
            collection: Some(collection.into()),
            write: Some(write),
        })
    }
}

/// What kind of write a pre-encode hook is observing.
#[derive(Debug, Clone)]
pub enum WriteInfo {
    /// A whole-document insert.
    Insert,
    /// A partial patch; carries a snapshot of the pre-existing document in
    /// runtime form.
    Patch { existing: RuntimeValue },
}

/// Hooks for every pipeline stage, as authored or as composed.
///
/// An absent stage means "no-op". Compose configurations with
/// [`HookConfig::compose`].
#[derive(Clone, Default)]
pub struct HookConfig {
    /// Wire document, before codec decode. May veto the read.
    pub pre_decode: Option<OneHook<Value>>,
    /// Batch variant of `pre_decode`.
    pub pre_decode_many: Option<ManyHook<Value>>,
    /// Runtime document, after codec decode. May veto the read.
    pub post_decode: Option<OneHook<RuntimeValue>>,
    /// Batch variant of `post_decode`.
    pub post_decode_many: Option<ManyHook<RuntimeValue>>,
    /// Runtime document, before codec encode. Receives write metadata via
    /// the context. May veto the write.
    pub pre_encode: Option<OneHook<RuntimeValue>>,
    /// Wire document, after codec encode, before the storage write.
    pub post_encode: Option<OneHook<Value>>,
}

impl HookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pre_decode(mut self, hook: OneHook<Value>) -> Self {
        self.pre_decode = Some(hook);
        self
    }

    pub fn on_pre_decode_many(mut self, hook: ManyHook<Value>) -> Self {
        self.pre_decode_many = Some(hook);
        self
    }

    pub fn on_post_decode(mut self, hook: OneHook<RuntimeValue>) -> Self {
        self.post_decode = Some(hook);
        self
    }

    pub fn on_post_decode_many(mut self, hook: ManyHook<RuntimeValue>) -> Self {
        self.post_decode_many = Some(hook);
        self
    }

    pub fn on_pre_encode(mut self, hook: OneHook<RuntimeValue>) -> Self {
        self.pre_encode = Some(hook);
        self
    }

    pub fn on_post_encode(mut self, hook: OneHook<Value>) -> Self {
        self.post_encode = Some(hook);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_one_helper_wraps_async_closure() {
        let hook: OneHook<Value> = one(|_ctx, doc: Value| async move { Some(doc) });
        let ctx = HookContext::read(Uuid::new_v4(), "users");
        let out = hook(ctx, Value::from(1)).await;
        assert_eq!(out, Some(Value::from(1)));
    }

    #[test]
    fn test_write_info_carries_snapshot() {
        let info = WriteInfo::Patch {
            existing: RuntimeValue::object([("name", RuntimeValue::string("A"))]),
        };
        match info {
            WriteInfo::Patch { existing } => {
                assert_eq!(existing.get("name"), Some(&RuntimeValue::string("A")))
            }
            WriteInfo::Insert => panic!("expected patch"),
        }
    }
}
