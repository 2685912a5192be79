#![allow(dead_code)]

use facesync_domain::FaceDescriptor;
use facesync_domain::RawFaces;
use facesync_domain::node::NativeHandle;
use facesync_provider::{EngineError, FontEngine};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::oneshot;

type Gate = oneshot::Sender<Result<(), EngineError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Faces(Vec<String>),
    Node { handle: i64, family: String, weight: String },
}

/// A font engine whose responses are scripted by the test.
///
/// In hold mode every `apply_faces` call waits until [`ScriptedEngine::release`]
/// resolves it, so tests can reorder responses.
#[derive(Clone, Default)]
pub struct ScriptedEngine {
    calls: Arc<Mutex<Vec<EngineCall>>>,
    gates: Arc<Mutex<Vec<Option<Gate>>>>,
    hold: Arc<AtomicBool>,
    fail_faces: Arc<AtomicBool>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&self, hold: bool) {
        self.hold.store(hold, Ordering::SeqCst);
    }

    pub fn fail_faces(&self, fail: bool) {
        self.fail_faces.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn face_calls(&self) -> usize {
        self.calls.lock().iter().filter(|c| matches!(c, EngineCall::Faces(_))).count()
    }

    /// Resolves the `index`-th held `apply_faces` call.
    pub fn release(&self, index: usize, result: Result<(), EngineError>) {
        let gate = self.gates.lock().get_mut(index).and_then(Option::take).expect("held call");
        gate.send(result).expect("sync task alive");
    }

    pub async fn wait_for_held(&self, count: usize) {
        while self.gates.lock().len() < count {
            tokio::task::yield_now().await;
        }
    }
}

impl FontEngine for ScriptedEngine {
    fn apply_faces(
        &self,
        faces: &[FaceDescriptor],
    ) -> impl Future<Output = Result<(), EngineError>> + Send {
        let names = faces.iter().map(|f| f.logical_name().to_owned()).collect();
        self.calls.lock().push(EngineCall::Faces(names));

        let gate = self.hold.load(Ordering::SeqCst).then(|| {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().push(Some(tx));
            rx
        });
        let fail = self.fail_faces.load(Ordering::SeqCst);

        async move {
            match gate {
                Some(rx) => rx.await.unwrap_or_else(|_| Err(EngineError::rejected("gate dropped"))),
                None if fail => Err(EngineError::rejected("download failed")),
                None => Ok(()),
            }
        }
    }

    fn apply_face_to_node(
        &self,
        handle: NativeHandle,
        font_family: &str,
        font_weight: &str,
    ) -> impl Future<Output = Result<(), EngineError>> + Send {
        self.calls.lock().push(EngineCall::Node {
            handle: handle.0,
            family: font_family.to_owned(),
            weight: font_weight.to_owned(),
        });
        async { Ok(()) }
    }
}

pub fn raw(value: Value) -> RawFaces {
    match value {
        Value::Object(map) => map,
        _ => panic!("raw faces must be an object"),
    }
}

pub fn face(name: &str) -> RawFaces {
    let mut faces = RawFaces::new();
    faces.insert(
        name.to_owned(),
        json!({ "uri": format!("https://fonts.test/{name}.ttf"), "fontFamily": name }),
    );
    faces
}
