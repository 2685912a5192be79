#![allow(dead_code)]

use facesync_binding::Animator;
use facesync_domain::node::{NativeHandle, NodeRef};
use facesync_domain::{FaceDescriptor, RawFaces};
use facesync_provider::{EngineError, FontEngine, FontsProvider};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCall {
    pub handle: i64,
    pub family: String,
    pub weight: String,
}

/// Accepts every registry and records node applies.
#[derive(Clone, Default)]
pub struct RecordingEngine {
    node_calls: Arc<Mutex<Vec<NodeCall>>>,
    fail_nodes: Arc<AtomicBool>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_nodes(&self, fail: bool) {
        self.fail_nodes.store(fail, Ordering::SeqCst);
    }

    pub fn node_calls(&self) -> Vec<NodeCall> {
        self.node_calls.lock().clone()
    }
}

impl FontEngine for RecordingEngine {
    fn apply_faces(
        &self,
        _faces: &[FaceDescriptor],
    ) -> impl Future<Output = Result<(), EngineError>> + Send {
        async { Ok(()) }
    }

    fn apply_face_to_node(
        &self,
        handle: NativeHandle,
        font_family: &str,
        font_weight: &str,
    ) -> impl Future<Output = Result<(), EngineError>> + Send {
        self.node_calls.lock().push(NodeCall {
            handle: handle.0,
            family: font_family.to_owned(),
            weight: font_weight.to_owned(),
        });
        let fail = self.fail_nodes.load(Ordering::SeqCst);
        async move { if fail { Err(EngineError::rejected("typeface not registered")) } else { Ok(()) } }
    }
}

/// Resolves every node to a handle derived from its id.
pub fn mounted(node: NodeRef) -> Option<NativeHandle> {
    i64::try_from(node.0).ok().map(|id| NativeHandle(id + 1000))
}

pub fn unmounted(_node: NodeRef) -> Option<NativeHandle> {
    None
}

#[derive(Clone, Default)]
pub struct RecordingAnimator {
    frames: Arc<Mutex<Vec<(Option<NodeRef>, f32)>>>,
}

impl RecordingAnimator {
    pub fn frames(&self) -> Vec<(Option<NodeRef>, f32)> {
        self.frames.lock().clone()
    }
}

impl Animator for RecordingAnimator {
    fn animate(
        &self,
        node: Option<NodeRef>,
        opacity: f32,
        _duration: Duration,
    ) -> impl Future<Output = ()> + Send {
        self.frames.lock().push((node, opacity));
        async {}
    }
}

pub fn raw(value: Value) -> RawFaces {
    match value {
        Value::Object(map) => map,
        _ => panic!("raw faces must be an object"),
    }
}

pub fn ubuntu(weight: &str) -> RawFaces {
    raw(json!({
        "Ubuntu": {
            "uri": "https://fonts.test/Ubuntu-Regular.ttf",
            "fontFamily": "Ubuntu-Regular",
            "fontWeight": weight,
            "letterSpacing": 1,
        }
    }))
}

pub async fn mount(engine: &RecordingEngine, faces: RawFaces) -> FontsProvider<RecordingEngine> {
    FontsProvider::builder(engine.clone()).font_faces(faces).mount().await.unwrap()
}
