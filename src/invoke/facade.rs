//! Transcoding-aware document access
//!
//! The facade sits between handler code and the storage backend: every
//! read runs pre-decode → codec decode → post-decode, every write runs
//! pre-encode → codec encode → post-encode, in that order, awaiting each
//! stage before the next proceeds. A hook veto surfaces as an absent
//! result, never as an error, so handler code treats denial and absence
//! identically.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use uuid::Uuid;

use crate::document::RuntimeValue;
use crate::hooks::{run_many, run_one, BoxFuture, HookConfig, HookContext, WriteInfo};
use crate::transcode::{decode, encode, encode_partial, SchemaMap};

use super::errors::{InvokeError, InvokeResult};

/// Storage backend behind the facade.
///
/// The physical engine is an external collaborator; its only contract is
/// "supply a wire document / consume a wire document".
pub trait DocumentStore: Send + Sync {
    /// Read a document by collection and id.
    fn get(&self, collection: &str, id: &str) -> BoxFuture<'_, Result<Option<Value>, String>>;

    /// Read a document by id alone, collection unknown.
    fn find(&self, id: &str) -> BoxFuture<'_, Result<Option<Value>, String>>;

    /// List all documents in a collection.
    fn list(&self, collection: &str) -> BoxFuture<'_, Result<Vec<Value>, String>>;

    /// Insert a document, returning its id.
    fn insert(&self, collection: &str, document: Value) -> BoxFuture<'_, Result<String, String>>;

    /// Merge fields into an existing document, returning the updated
    /// document.
    fn patch(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> BoxFuture<'_, Result<Value, String>>;

    /// Delete a document.
    fn delete(&self, collection: &str, id: &str) -> BoxFuture<'_, Result<bool, String>>;
}

/// Transcoding-aware facade over a [`DocumentStore`].
#[derive(Clone)]
pub struct DocumentFacade {
    request_id: Uuid,
    schemas: Arc<SchemaMap>,
    hooks: Arc<HookConfig>,
    store: Arc<dyn DocumentStore>,
}

impl DocumentFacade {
    pub fn new(
        request_id: Uuid,
        schemas: Arc<SchemaMap>,
        hooks: Arc<HookConfig>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        Self {
            request_id,
            schemas,
            hooks,
            store,
        }
    }

    /// Reads one document, running the full read pipeline.
    pub async fn get(&self, collection: &str, id: &str) -> InvokeResult<Option<RuntimeValue>> {
        let schema = self.schemas.require(collection)?;
        let Some(wire) = self
            .store
            .get(collection, id)
            .await
            .map_err(InvokeError::Store)?
        else {
            return Ok(None);
        };

        let ctx = HookContext::read(self.request_id, collection);
        let Some(wire) = run_one(&self.hooks.pre_decode, &ctx, wire).await else {
            return Ok(None);
        };
        let runtime = decode(schema, &wire)?;
        let Some(runtime) = run_one(&self.hooks.post_decode, &ctx, runtime).await else {
            return Ok(None);
        };
        Ok(Some(runtime))
    }

    /// Reads a document by id alone, resolving its collection by trying
    /// each registered schema's wire shape in registration order.
    ///
    /// A document no registered schema parses is reported as absent.
    pub async fn get_auto(&self, id: &str) -> InvokeResult<Option<(String, RuntimeValue)>> {
        let Some(wire) = self.store.find(id).await.map_err(InvokeError::Store)? else {
            return Ok(None);
        };
        let Some((collection, schema)) = self.schemas.find_by_trial_parse(&wire) else {
            return Ok(None);
        };
        let collection = collection.to_string();

        let ctx = HookContext::read(self.request_id, collection.clone());
        let Some(wire) = run_one(&self.hooks.pre_decode, &ctx, wire).await else {
            return Ok(None);
        };
        let runtime = decode(schema, &wire)?;
        let Some(runtime) = run_one(&self.hooks.post_decode, &ctx, runtime).await else {
            return Ok(None);
        };
        Ok(Some((collection, runtime)))
    }

    /// Lists a collection, running the batch read pipeline.
    pub async fn list(&self, collection: &str) -> InvokeResult<Vec<RuntimeValue>> {
        let schema = self.schemas.require(collection)?;
        let wires = self
            .store
            .list(collection)
            .await
            .map_err(InvokeError::Store)?;

        let ctx = HookContext::read(self.request_id, collection);
        let wires = run_many(
            &self.hooks.pre_decode_many,
            &self.hooks.pre_decode,
            &ctx,
            wires,
        )
        .await;

        let mut runtimes = Vec::with_capacity(wires.len());
        for wire in &wires {
            runtimes.push(decode(schema, wire)?);
        }

        Ok(run_many(
            &self.hooks.post_decode_many,
            &self.hooks.post_decode,
            &ctx,
            runtimes,
        )
        .await)
    }

    /// Inserts a runtime document, running the full write pipeline.
    /// Returns the new id, or `None` if a hook vetoed the write.
    pub async fn insert(
        &self,
        collection: &str,
        document: RuntimeValue,
    ) -> InvokeResult<Option<String>> {
        let schema = self.schemas.require(collection)?;

        let ctx = HookContext::write(self.request_id, collection, WriteInfo::Insert);
        let Some(document) = run_one(&self.hooks.pre_encode, &ctx, document).await else {
            return Ok(None);
        };
        let wire = encode(schema, &document)?;
        let Some(wire) = run_one(&self.hooks.post_encode, &ctx, wire).await else {
            return Ok(None);
        };

        let id = self
            .store
            .insert(collection, wire)
            .await
            .map_err(InvokeError::Store)?;
        Ok(Some(id))
    }

    /// Patches a document with a partial runtime document.
    ///
    /// The pre-encode hook observes the patch metadata, including a
    /// runtime-form snapshot of the pre-existing document. Returns the
    /// updated document, or `None` if the document is absent or a hook
    /// vetoed the write.
    pub async fn patch(
        &self,
        collection: &str,
        id: &str,
        partial: RuntimeValue,
    ) -> InvokeResult<Option<RuntimeValue>> {
        let schema = self.schemas.require(collection)?;
        let Some(existing_wire) = self
            .store
            .get(collection, id)
            .await
            .map_err(InvokeError::Store)?
        else {
            return Ok(None);
        };
        let existing = decode(schema, &existing_wire)?;

        let ctx = HookContext::write(
            self.request_id,
            collection,
            WriteInfo::Patch { existing },
        );
        let Some(partial) = run_one(&self.hooks.pre_encode, &ctx, partial).await else {
            return Ok(None);
        };
        let fields = encode_partial(schema, &partial)?;
        let Some(fields) = run_one(&self.hooks.post_encode, &ctx, fields).await else {
            return Ok(None);
        };

        let updated = self
            .store
            .patch(collection, id, fields)
            .await
            .map_err(InvokeError::Store)?;
        Ok(Some(decode(schema, &updated)?))
    }

    /// Deletes a document. No transcoding is involved.
    pub async fn delete(&self, collection: &str, id: &str) -> InvokeResult<bool> {
        self.schemas.require(collection)?;
        self.store
            .delete(collection, id)
            .await
            .map_err(InvokeError::Store)
    }
}

/// In-memory storage backend for testing
pub struct InMemoryStore {
    data: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryStore {
    fn get(&self, collection: &str, id: &str) -> BoxFuture<'_, Result<Option<Value>, String>> {
        let result = self
            .data
            .read()
            .map_err(|e| e.to_string())
            .map(|data| data.get(collection).and_then(|c| c.get(id)).cloned());
        Box::pin(async move { result })
    }

    fn find(&self, id: &str) -> BoxFuture<'_, Result<Option<Value>, String>> {
        let result = self.data.read().map_err(|e| e.to_string()).map(|data| {
            data.values()
                .find_map(|collection| collection.get(id).cloned())
        });
        Box::pin(async move { result })
    }

    fn list(&self, collection: &str) -> BoxFuture<'_, Result<Vec<Value>, String>> {
        let result = self.data.read().map_err(|e| e.to_string()).map(|data| {
            data.get(collection)
                .map(|c| {
                    let mut docs: Vec<(String, Value)> =
                        c.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
                    // Deterministic order for tests.
                    docs.sort_by(|a, b| a.0.cmp(&b.0));
                    docs.into_iter().map(|(_, v)| v).collect()
                })
                .unwrap_or_default()
        });
        Box::pin(async move { result })
    }

    fn insert(&self, collection: &str, mut document: Value) -> BoxFuture<'_, Result<String, String>> {
        let result = self.data.write().map_err(|e| e.to_string()).map(|mut data| {
            let id = document
                .get("_id")
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(|| Uuid::new_v4().to_string());

            if let Some(obj) = document.as_object_mut() {
                obj.insert("_id".to_string(), Value::String(id.clone()));
            }

            data.entry(collection.to_string())
                .or_default()
                .insert(id.clone(), document);
            id
        });
        Box::pin(async move { result })
    }

    fn patch(
        &self,
        collection: &str,
        id: &str,
        fields: Value,
    ) -> BoxFuture<'_, Result<Value, String>> {
        let result = self
            .data
            .write()
            .map_err(|e| e.to_string())
            .and_then(|mut data| {
                let doc = data
                    .get_mut(collection)
                    .ok_or_else(|| format!("Collection {} not found", collection))?
                    .get_mut(id)
                    .ok_or_else(|| format!("Document {} not found", id))?;

                if let (Some(doc_obj), Some(fields_obj)) =
                    (doc.as_object_mut(), fields.as_object())
                {
                    for (k, v) in fields_obj {
                        doc_obj.insert(k.clone(), v.clone());
                    }
                }
                Ok(doc.clone())
            });
        Box::pin(async move { result })
    }

    fn delete(&self, collection: &str, id: &str) -> BoxFuture<'_, Result<bool, String>> {
        let result = self
            .data
            .write()
            .map_err(|e| e.to_string())
            .map(|mut data| {
                data.get_mut(collection)
                    .map(|c| c.remove(id).is_some())
                    .unwrap_or(false)
            });
        Box::pin(async move { result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::date_codec;
    use crate::hooks::one;
    use crate::schema::{FieldMap, SchemaNode};
    use serde_json::json;

    fn schemas() -> Arc<SchemaMap> {
        let map = SchemaMap::new()
            .with(
                "events",
                SchemaNode::object(
                    FieldMap::new()
                        .with("name", SchemaNode::string())
                        .with("at", SchemaNode::codec(date_codec())),
                ),
            )
            .unwrap();
        Arc::new(map)
    }

    fn facade(hooks: HookConfig) -> DocumentFacade {
        DocumentFacade::new(
            Uuid::new_v4(),
            schemas(),
            Arc::new(hooks),
            Arc::new(InMemoryStore::new()),
        )
    }

    fn event(name: &str) -> RuntimeValue {
        RuntimeValue::object([
            ("name", RuntimeValue::string(name)),
            (
                "at",
                RuntimeValue::from_timestamp_millis(1_700_000_000_000).unwrap(),
            ),
        ])
    }

    #[tokio::test]
    async fn test_insert_then_get_round_trips_rich_values() {
        let db = facade(HookConfig::new());

        let id = db.insert("events", event("launch")).await.unwrap().unwrap();
        let stored = db.get("events", &id).await.unwrap().unwrap();

        assert_eq!(stored.get("name"), Some(&RuntimeValue::string("launch")));
        assert!(matches!(
            stored.get("at"),
            Some(RuntimeValue::DateTime(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_collection_is_an_error() {
        let db = facade(HookConfig::new());
        let err = db.get("ghosts", "g1").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_read_veto_surfaces_as_absent() {
        let hooks = HookConfig::new().on_post_decode(one(|_ctx, _doc: RuntimeValue| async move {
            None
        }));
        let db = facade(HookConfig::compose(vec![hooks]));

        let id = db.insert("events", event("hidden")).await.unwrap().unwrap();
        assert!(db.get("events", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_veto_skips_storage() {
        let hooks = HookConfig::new().on_pre_encode(one(|_ctx, _doc: RuntimeValue| async move {
            None
        }));
        let db = facade(HookConfig::compose(vec![hooks]));

        assert!(db.insert("events", event("vetoed")).await.unwrap().is_none());
        assert!(db.list("events").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_patch_pre_encode_sees_existing_snapshot() {
        let observed = Arc::new(std::sync::Mutex::new(None));
        let observed_in_hook = observed.clone();
        let hooks = HookConfig::new().on_pre_encode(one(move |ctx: Arc<HookContext>, doc: RuntimeValue| {
            let observed = observed_in_hook.clone();
            async move {
                if let Some(WriteInfo::Patch { existing }) = &ctx.write {
                    *observed.lock().unwrap() =
                        existing.get("name").and_then(|n| n.as_str()).map(String::from);
                }
                Some(doc)
            }
        }));
        let db = facade(HookConfig::compose(vec![hooks]));

        let id = db.insert("events", event("before")).await.unwrap().unwrap();
        let updated = db
            .patch(
                "events",
                &id,
                RuntimeValue::object([("name", RuntimeValue::string("after"))]),
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(*observed.lock().unwrap(), Some("before".to_string()));
        assert_eq!(updated.get("name"), Some(&RuntimeValue::string("after")));
        // The untouched codec field survives the patch.
        assert!(matches!(updated.get("at"), Some(RuntimeValue::DateTime(_))));
    }

    #[tokio::test]
    async fn test_get_auto_resolves_by_trial_parse() {
        let db = facade(HookConfig::new());
        let id = db.insert("events", event("solo")).await.unwrap().unwrap();

        let (collection, doc) = db.get_auto(&id).await.unwrap().unwrap();
        assert_eq!(collection, "events");
        assert_eq!(doc.get("name"), Some(&RuntimeValue::string("solo")));
    }

    #[tokio::test]
    async fn test_list_applies_batch_pipeline() {
        let db = facade(HookConfig::new());
        db.insert("events", event("a")).await.unwrap();
        db.insert("events", event("b")).await.unwrap();

        let docs = db.list("events").await.unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = facade(HookConfig::new());
        let id = db.insert("events", event("gone")).await.unwrap().unwrap();
        assert!(db.delete("events", &id).await.unwrap());
        assert!(db.get("events", &id).await.unwrap().is_none());
    }

    #[test]
    fn test_in_memory_store_assigns_ids() {
        let store = InMemoryStore::new();
        let rt = tokio::runtime::Runtime::new().unwrap();
        let id = rt
            .block_on(store.insert("c", json!({ "x": 1 })))
            .unwrap();
        let doc = rt.block_on(store.get("c", &id)).unwrap().unwrap();
        assert_eq!(doc["_id"], json!(id));
    }
}
