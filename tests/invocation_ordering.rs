//! Invocation ordering invariant tests
//!
//! The load-bearing ordering: wire arguments decode before the handler
//! runs, success callbacks observe the runtime result before the wire
//! boundary erases rich values, and the caller only ever sees wire
//! encodings. Around the store, read stages run pre-decode → decode →
//! post-decode and write stages run pre-encode → encode → post-encode.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use docbridge::codec::date_codec;
use docbridge::document::RuntimeValue;
use docbridge::hooks::{one, HookConfig};
use docbridge::invoke::{handler, HandlerDef, InMemoryStore, Invoker};
use docbridge::schema::{FieldMap, SchemaNode};
use docbridge::transcode::SchemaMap;

type CallLog = Arc<Mutex<Vec<&'static str>>>;

fn event_schemas() -> Arc<SchemaMap> {
    Arc::new(
        SchemaMap::new()
            .with(
                "events",
                SchemaNode::object(
                    FieldMap::new()
                        .with("name", SchemaNode::string())
                        .with("at", SchemaNode::codec(date_codec())),
                ),
            )
            .unwrap(),
    )
}

fn logging_hooks(log: CallLog) -> HookConfig {
    let pre_decode_log = log.clone();
    let post_decode_log = log.clone();
    let pre_encode_log = log.clone();
    let post_encode_log = log;

    HookConfig::new()
        .on_pre_decode(one(move |_ctx, doc: Value| {
            let log = pre_decode_log.clone();
            async move {
                log.lock().unwrap().push("pre-decode");
                Some(doc)
            }
        }))
        .on_post_decode(one(move |_ctx, doc: RuntimeValue| {
            let log = post_decode_log.clone();
            async move {
                log.lock().unwrap().push("post-decode");
                Some(doc)
            }
        }))
        .on_pre_encode(one(move |_ctx, doc: RuntimeValue| {
            let log = pre_encode_log.clone();
            async move {
                log.lock().unwrap().push("pre-encode");
                Some(doc)
            }
        }))
        .on_post_encode(one(move |_ctx, doc: Value| {
            let log = post_encode_log.clone();
            async move {
                log.lock().unwrap().push("post-encode");
                Some(doc)
            }
        }))
}

fn event_doc(name: &str) -> RuntimeValue {
    RuntimeValue::object([
        ("name", RuntimeValue::string(name)),
        (
            "at",
            RuntimeValue::from_timestamp_millis(1_700_000_000_000).unwrap(),
        ),
    ])
}

// ===========================================================================
// Write and read pipeline stage ordering
// ===========================================================================

#[tokio::test]
async fn write_then_read_runs_stages_in_order() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let invoker = Invoker::new(
        event_schemas(),
        HookConfig::compose(vec![logging_hooks(log.clone())]),
        Arc::new(InMemoryStore::new()),
    );

    let def = HandlerDef::new(
        "store_and_load",
        SchemaNode::object(FieldMap::new()),
        handler(|ctx, _args| async move {
            let id = ctx
                .db
                .insert("events",
                    RuntimeValue::object([
                        ("name", RuntimeValue::string("launch")),
                        (
                            "at",
                            RuntimeValue::from_timestamp_millis(1_700_000_000_000)
                                .ok_or_else(|| "bad time".to_string())?,
                        ),
                    ]))
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| "vetoed".to_string())?;
            ctx.db
                .get("events", &id)
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| "missing".to_string())
        }),
    );

    invoker.invoke(&def, json!({})).await.unwrap();

    assert_eq!(
        *log.lock().unwrap(),
        vec!["pre-encode", "post-encode", "pre-decode", "post-decode"]
    );
}

// ===========================================================================
// Success callbacks and the wire boundary
// ===========================================================================

#[tokio::test]
async fn success_callback_sees_runtime_result_caller_sees_wire() {
    let observed: Arc<Mutex<Option<RuntimeValue>>> = Arc::new(Mutex::new(None));
    let observed_in_callback = observed.clone();

    let def = HandlerDef::new(
        "when",
        SchemaNode::object(FieldMap::new().with("at", SchemaNode::codec(date_codec()))),
        handler(|_ctx, args| async move {
            args.get("at").cloned().ok_or_else(|| "no at".to_string())
        }),
    )
    .returns(SchemaNode::codec(date_codec()))
    .on_success(Arc::new(move |_ctx, result| {
        *observed_in_callback.lock().unwrap() = Some(result.clone());
    }));

    let invoker = Invoker::new(
        event_schemas(),
        HookConfig::new(),
        Arc::new(InMemoryStore::new()),
    );
    let wire = invoker
        .invoke(&def, json!({ "at": 1_700_000_000_000_i64 }))
        .await
        .unwrap();

    // The callback observed the rich date value.
    match observed.lock().unwrap().as_ref() {
        Some(RuntimeValue::DateTime(dt)) => {
            assert_eq!(dt.timestamp_millis(), 1_700_000_000_000)
        }
        other => panic!("callback saw {:?}", other),
    }
    // The caller received the numeric wire encoding of the same instant.
    assert_eq!(wire, json!(1_700_000_000_000_i64));
}

#[tokio::test]
async fn callbacks_fire_in_registration_order_after_validation() {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let first_log = log.clone();
    let second_log = log.clone();

    let def = HandlerDef::new(
        "ping",
        SchemaNode::object(FieldMap::new()),
        handler(|_ctx, _args| async move { Ok(RuntimeValue::string("pong")) }),
    )
    .returns(SchemaNode::string())
    .on_success(Arc::new(move |_ctx, _result| {
        first_log.lock().unwrap().push("first");
    }))
    .on_success(Arc::new(move |_ctx, _result| {
        second_log.lock().unwrap().push("second");
    }));

    let invoker = Invoker::new(
        Arc::new(SchemaMap::new()),
        HookConfig::new(),
        Arc::new(InMemoryStore::new()),
    );
    invoker.invoke(&def, json!({})).await.unwrap();

    assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
}

#[tokio::test]
async fn no_callbacks_on_result_validation_failure() {
    let fired = Arc::new(Mutex::new(false));
    let fired_in_callback = fired.clone();

    let def = HandlerDef::new(
        "lies",
        SchemaNode::object(FieldMap::new()),
        handler(|_ctx, _args| async move { Ok(RuntimeValue::string("not a date")) }),
    )
    .returns(SchemaNode::codec(date_codec()))
    .on_success(Arc::new(move |_ctx, _result| {
        *fired_in_callback.lock().unwrap() = true;
    }));

    let invoker = Invoker::new(
        Arc::new(SchemaMap::new()),
        HookConfig::new(),
        Arc::new(InMemoryStore::new()),
    );
    assert!(invoker.invoke(&def, json!({})).await.is_err());
    assert!(!*fired.lock().unwrap());
}

// ===========================================================================
// Hook composition and veto semantics end to end
// ===========================================================================

#[tokio::test]
async fn veto_in_read_pipeline_reads_as_absence() {
    let hooks = HookConfig::new().on_post_decode(one(|_ctx, doc: RuntimeValue| async move {
        // Deny documents named "secret"; everything else passes.
        if doc.get("name") == Some(&RuntimeValue::string("secret")) {
            None
        } else {
            Some(doc)
        }
    }));

    let invoker = Invoker::new(
        event_schemas(),
        HookConfig::compose(vec![hooks]),
        Arc::new(InMemoryStore::new()),
    );

    let def = HandlerDef::new(
        "probe",
        SchemaNode::object(FieldMap::new()),
        handler(|ctx, _args| async move {
            let secret_id = ctx
                .db
                .insert("events", {
                    RuntimeValue::object([
                        ("name", RuntimeValue::string("secret")),
                        (
                            "at",
                            RuntimeValue::from_timestamp_millis(0)
                                .ok_or_else(|| "bad time".to_string())?,
                        ),
                    ])
                })
                .await
                .map_err(|e| e.to_string())?
                .ok_or_else(|| "vetoed".to_string())?;

            // Denied and missing reads look identical to handler code.
            let denied = ctx
                .db
                .get("events", &secret_id)
                .await
                .map_err(|e| e.to_string())?;
            let missing = ctx
                .db
                .get("events", "no-such-id")
                .await
                .map_err(|e| e.to_string())?;

            Ok(RuntimeValue::object([
                ("denied_is_none", RuntimeValue::Bool(denied.is_none())),
                ("missing_is_none", RuntimeValue::Bool(missing.is_none())),
            ]))
        }),
    );

    let result = invoker.invoke(&def, json!({})).await.unwrap();
    assert_eq!(
        result,
        json!({ "denied_is_none": true, "missing_is_none": true })
    );
}

#[tokio::test]
async fn batch_read_drops_vetoed_items_only() {
    let hooks = HookConfig::new().on_post_decode(one(|_ctx, doc: RuntimeValue| async move {
        if doc.get("name") == Some(&RuntimeValue::string("secret")) {
            None
        } else {
            Some(doc)
        }
    }));

    let invoker = Invoker::new(
        event_schemas(),
        HookConfig::compose(vec![hooks]),
        Arc::new(InMemoryStore::new()),
    );

    let def = HandlerDef::new(
        "scan",
        SchemaNode::object(FieldMap::new()),
        handler(|ctx, _args| async move {
            for name in ["public", "secret", "shared"] {
                ctx.db
                    .insert("events", {
                        RuntimeValue::object([
                            ("name", RuntimeValue::string(name)),
                            (
                                "at",
                                RuntimeValue::from_timestamp_millis(0)
                                    .ok_or_else(|| "bad time".to_string())?,
                            ),
                        ])
                    })
                    .await
                    .map_err(|e| e.to_string())?;
            }
            let docs = ctx.db.list("events").await.map_err(|e| e.to_string())?;
            Ok(RuntimeValue::Int(docs.len() as i64))
        }),
    );

    let result = invoker.invoke(&def, json!({})).await.unwrap();
    assert_eq!(result, json!(2));
}
