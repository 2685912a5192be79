mod fixtures;

use facesync_binding::{BindOutcome, BindingRequest, FontBinder, Prepared};
use facesync_domain::{FallbackStyle, Style, StyleMap};
use facesync_domain::node::NodeRef;
use facesync_kernel::platform::Platform;
use facesync_provider::FontsProvider;
use fixtures::{NodeCall, RecordingEngine, mount, mounted, raw, ubuntu, unmounted};
use serde_json::json;
use std::time::Duration;

const NODE: NodeRef = NodeRef(7);

#[tokio::test]
async fn unknown_name_shows_fallback_without_engine_calls() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();

    let outcome = binder.request(BindingRequest::named("Missing", Some(NODE))).await;

    assert_eq!(outcome, BindOutcome::Fallback);
    assert!(engine.node_calls().is_empty());
    let result = binder.result();
    assert_eq!(result.style, provider.sync_state().fallback.to_style());
    assert_eq!(result.node_ref, Some(NODE));
}

#[tokio::test]
async fn known_name_shows_fallback_until_bound() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();
    let fallback = provider.sync_state().fallback.to_style();

    let Prepared::Pending(pending) = binder.prepare(BindingRequest::named("Ubuntu", Some(NODE))) else {
        panic!("expected an engine request");
    };
    assert_eq!(binder.result().style, fallback);

    assert_eq!(binder.complete(pending).await, BindOutcome::Bound { sequence: 1 });
    assert_eq!(
        binder.result().style,
        Style::new().font_family("Ubuntu-Regular").font_weight("Bold").attr("letterSpacing", 1)
    );
    assert_eq!(
        engine.node_calls(),
        vec![NodeCall { handle: 1007, family: "Ubuntu-Regular".into(), weight: "Bold".into() }]
    );
}

#[tokio::test]
async fn failed_bind_stays_on_fallback() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();
    engine.fail_nodes(true);

    let outcome = binder.request(BindingRequest::named("Ubuntu", Some(NODE))).await;

    assert_eq!(outcome, BindOutcome::Failed { sequence: 1 });
    assert_eq!(binder.result().style, provider.sync_state().fallback.to_style());
}

#[tokio::test]
async fn unmounted_node_is_a_bind_failure() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, unmounted).unwrap();

    let outcome = binder.request(BindingRequest::named("Ubuntu", Some(NODE))).await;

    assert_eq!(outcome, BindOutcome::Failed { sequence: 1 });
    assert!(engine.node_calls().is_empty());
}

#[tokio::test]
async fn same_request_is_not_repeated_and_weight_change_binds_once() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();
    let request = BindingRequest::named("Ubuntu", Some(NODE));

    assert_eq!(binder.request(request.clone()).await, BindOutcome::Bound { sequence: 1 });
    assert_eq!(binder.request(request.clone()).await, BindOutcome::Unchanged);
    assert_eq!(engine.node_calls().len(), 1);

    let lighter = BindingRequest::new(Style::new().font_family("Ubuntu").font_weight("Light"), Some(NODE));
    assert_eq!(binder.request(lighter).await, BindOutcome::Bound { sequence: 2 });

    let calls = engine.node_calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].weight, "Light");
    assert_eq!(binder.result().style.font_weight.as_deref(), Some("Light"));
}

#[tokio::test]
async fn binds_once_the_node_arrives() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();

    assert_eq!(binder.request(BindingRequest::named("Ubuntu", None)).await, BindOutcome::AwaitingNode);
    assert!(engine.node_calls().is_empty());

    assert_eq!(
        binder.request(BindingRequest::named("Ubuntu", Some(NODE))).await,
        BindOutcome::Bound { sequence: 2 }
    );
    assert_eq!(binder.result().node_ref, Some(NODE));
}

#[tokio::test]
async fn fallback_override_reaches_an_unbound_node() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();
    assert_eq!(binder.request(BindingRequest::named("Ubuntu", None)).await, BindOutcome::AwaitingNode);

    provider
        .set_fallback(FallbackStyle {
            color: "#ff0000".to_owned(),
            font_family: "Serif".to_owned(),
            font_weight: "Normal".to_owned(),
            extra: StyleMap::new(),
        })
        .unwrap();

    assert_eq!(binder.refresh().await, BindOutcome::Unchanged);
    let style = &binder.result().style;
    assert_eq!(style.font_family.as_deref(), Some("Serif"));
    assert_eq!(*style, provider.sync_state().fallback.to_style());
    assert!(engine.node_calls().is_empty());
}

#[tokio::test]
async fn superseded_response_is_dropped() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();

    let Prepared::Pending(first) = binder.prepare(BindingRequest::named("Ubuntu", Some(NODE))) else {
        panic!("expected an engine request");
    };
    let lighter = BindingRequest::new(Style::new().font_family("Ubuntu").font_weight("Light"), Some(NODE));
    let Prepared::Pending(second) = binder.prepare(lighter) else {
        panic!("expected an engine request");
    };

    assert_eq!(binder.complete(first).await, BindOutcome::Superseded { sequence: 1 });
    assert_eq!(binder.result().style, provider.sync_state().fallback.to_style());
    assert_eq!(binder.complete(second).await, BindOutcome::Bound { sequence: 2 });
    assert_eq!(binder.result().style.font_weight.as_deref(), Some("Light"));
}

#[tokio::test]
async fn detached_binder_ignores_late_responses() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();

    let Prepared::Pending(pending) = binder.prepare(BindingRequest::named("Ubuntu", Some(NODE))) else {
        panic!("expected an engine request");
    };
    binder.detach();

    assert_eq!(binder.complete(pending).await, BindOutcome::Detached);
    assert_eq!(binder.result().style, provider.sync_state().fallback.to_style());
    assert_eq!(binder.request(BindingRequest::named("Ubuntu", Some(NODE))).await, BindOutcome::Detached);
}

#[tokio::test]
async fn caller_attributes_pass_through() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();
    let style = Style::new().font_family("Ubuntu").attr("fontSize", 18).attr("color", "#123456");

    binder.request(BindingRequest::new(style, Some(NODE))).await;

    let resolved = binder.result().style.clone();
    assert_eq!(resolved.extra.get("fontSize"), Some(&json!(18)));
    assert_eq!(resolved.extra.get("color"), Some(&json!("#123456")));
    assert_eq!(resolved.extra.get("letterSpacing"), Some(&json!(1)));
}

#[tokio::test]
async fn registry_change_rebinds_only_when_descriptor_changes() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();
    binder.request(BindingRequest::named("Ubuntu", Some(NODE))).await;

    let mut extended = ubuntu("Bold");
    extended.extend(raw(json!({ "Mono": { "uri": "u", "fontFamily": "Mono" } })));
    provider.update(&extended).await.unwrap();
    assert_eq!(binder.refresh().await, BindOutcome::Unchanged);

    provider.update(&ubuntu("Light")).await.unwrap();
    assert_eq!(binder.refresh().await, BindOutcome::Bound { sequence: 2 });
    assert_eq!(engine.node_calls().len(), 2);
    assert_eq!(binder.result().style.font_weight.as_deref(), Some("Light"));
}

#[tokio::test]
async fn removed_face_reverts_to_fallback() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();
    binder.request(BindingRequest::named("Ubuntu", Some(NODE))).await;

    provider.update(&raw(json!({ "Mono": { "uri": "u", "fontFamily": "Mono" } }))).await.unwrap();

    assert_eq!(binder.refresh().await, BindOutcome::Fallback);
    assert_eq!(binder.result().style, provider.sync_state().fallback.to_style());
}

#[tokio::test]
async fn follow_tracks_published_registries() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();
    let mut results = binder.results();
    binder.request(BindingRequest::named("Ubuntu", Some(NODE))).await;

    let follower = binder.clone();
    let task = tokio::spawn(async move { follower.follow().await });

    provider.update(&ubuntu("Light")).await.unwrap();
    loop {
        results.changed().await.unwrap();
        if results.borrow_and_update().style.font_weight.as_deref() == Some("Light") {
            break;
        }
    }

    provider.shutdown();
    task.await.unwrap();
}

#[tokio::test]
async fn detach_stops_following_without_a_publish() {
    let engine = RecordingEngine::new();
    let provider = mount(&engine, ubuntu("Bold")).await;
    let binder = FontBinder::new(&provider, mounted).unwrap();

    let follower = binder.clone();
    let task = tokio::spawn(async move { follower.follow().await });
    tokio::task::yield_now().await;

    binder.detach();
    tokio::time::timeout(Duration::from_secs(1), task).await.unwrap().unwrap();
    assert!(provider.is_alive());
}

#[tokio::test(start_paused = true)]
async fn deferred_handle_platform_waits_and_omits_font_props() {
    let engine = RecordingEngine::new();
    let provider = FontsProvider::builder(engine.clone())
        .platform(Platform::android())
        .latency(Duration::from_millis(50))
        .font_faces(ubuntu("Bold"))
        .mount()
        .await
        .unwrap();
    let binder = FontBinder::new(&provider, mounted).unwrap();

    let started = tokio::time::Instant::now();
    let outcome = binder.request(BindingRequest::named("Ubuntu", Some(NODE))).await;

    assert_eq!(outcome, BindOutcome::Bound { sequence: 1 });
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert_eq!(engine.node_calls()[0].weight, "bold");
    assert_eq!(binder.result().style, Style::new().attr("letterSpacing", 1));
}

#[tokio::test]
async fn ubuntu_end_to_end() {
    let engine = RecordingEngine::new();
    let provider = FontsProvider::builder(engine.clone())
        .platform(Platform::ios())
        .font_faces(ubuntu("Bold"))
        .mount()
        .await
        .unwrap();
    assert!(provider.is_known("Ubuntu"));

    let binder = FontBinder::new(&provider, mounted).unwrap();
    let style = Style::new().font_family("Ubuntu").attr("fontSize", 24);
    assert_eq!(binder.request(BindingRequest::new(style, Some(NODE))).await, BindOutcome::Bound { sequence: 1 });

    assert_eq!(
        binder.result().style,
        Style::new()
            .font_family("Ubuntu-Regular")
            .font_weight("Bold")
            .attr("fontSize", 24)
            .attr("letterSpacing", 1)
    );
    assert_eq!(engine.node_calls()[0].family, "Ubuntu-Regular");
}
