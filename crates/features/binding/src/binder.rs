//! # Per-Node Font Binder
//!
//! Binds a named face from the published registry to one rendering node.
//!
//! Each resolution computes a [`BindKey`] (node identity, descriptor behind the
//! requested name, effective weight) and compares it with the key of the previous
//! resolution. Only a changed key reaches the engine. Every engine request gets a
//! sequence number from the binder; a response whose sequence is no longer the
//! latest, or that arrives after [`FontBinder::detach`], is dropped.
//!
//! Until the first successful bind the node shows the fallback style. Later
//! re-binds keep the previous style until the engine answers.

use crate::error::BindError;
use crate::resolver::NodeHandleResolver;
use facesync_domain::node::NodeRef;
use facesync_domain::{FaceDescriptor, Style, SyncState};
use facesync_kernel::platform::Platform;
use facesync_provider::{FontEngine, FontsProvider, SyncError};
use parking_lot::Mutex;
use std::pin::pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tracing::{debug, trace, warn};

/// What a consumer asks for: the style it would render with, and its node.
///
/// `style.font_family` carries the logical face name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingRequest {
    pub style: Style,
    pub node: Option<NodeRef>,
}

impl BindingRequest {
    #[must_use]
    pub fn new(style: Style, node: Option<NodeRef>) -> Self {
        Self { style, node }
    }

    /// A request for `logical_name` with no other style attributes.
    #[must_use]
    pub fn named(logical_name: impl Into<String>, node: Option<NodeRef>) -> Self {
        Self { style: Style::new().font_family(logical_name), node }
    }

    #[must_use]
    pub fn logical_name(&self) -> Option<&str> {
        self.style.font_family.as_deref()
    }
}

/// The style a consumer should render with right now.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingResult {
    pub style: Style,
    pub node_ref: Option<NodeRef>,
}

/// How one resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    /// No custom face for the requested name; the fallback is shown.
    Fallback,
    /// The dependencies did not change; nothing was sent to the engine.
    Unchanged,
    /// A custom face exists but there is no node to bind it to yet.
    AwaitingNode,
    /// The engine bound the face and its style was adopted.
    Bound { sequence: u64 },
    /// The bind failed; the fallback is shown.
    Failed { sequence: u64 },
    /// A newer request made this one irrelevant.
    Superseded { sequence: u64 },
    /// The binder was detached before the response arrived.
    Detached,
}

/// The dependency set of a resolution.
#[derive(Debug, Clone, PartialEq)]
struct BindKey {
    node: Option<NodeRef>,
    face: FaceDescriptor,
    weight: String,
}

/// An engine request that has been planned but not sent.
#[derive(Debug)]
pub struct PendingBind {
    sequence: u64,
    node: NodeRef,
    face: FaceDescriptor,
    weight: String,
}

impl PendingBind {
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    #[must_use]
    pub const fn node(&self) -> NodeRef {
        self.node
    }
}

/// Result of the synchronous half of a resolution.
#[derive(Debug)]
pub enum Prepared {
    Ready(BindOutcome),
    Pending(PendingBind),
}

#[derive(Debug, Default)]
struct BinderState {
    request: BindingRequest,
    key: Option<BindKey>,
    sequence: u64,
    /// Font layer currently shown: the fallback style or a bound face style.
    layer: Style,
    bound: bool,
}

struct Shared<E: FontEngine, R: NodeHandleResolver> {
    engine: Arc<E>,
    resolver: R,
    platform: Platform,
    latency: Duration,
    states: watch::Receiver<Arc<SyncState>>,
    state: Mutex<BinderState>,
    results: watch::Sender<Arc<BindingResult>>,
    alive: AtomicBool,
    detached: Notify,
}

/// Resolves the style of one consumer node against the published registry.
///
/// Clones share state, so a clone can [`FontBinder::follow`] registry changes on a
/// separate task while the owner issues requests.
pub struct FontBinder<E: FontEngine, R: NodeHandleResolver> {
    shared: Arc<Shared<E, R>>,
}

impl<E: FontEngine, R: NodeHandleResolver> Clone for FontBinder<E, R> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<E: FontEngine, R: NodeHandleResolver> std::fmt::Debug for FontBinder<E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("FontBinder")
            .field("request", &state.request)
            .field("sequence", &state.sequence)
            .field("bound", &state.bound)
            .field("alive", &self.is_alive())
            .finish_non_exhaustive()
    }
}

impl<E: FontEngine, R: NodeHandleResolver> FontBinder<E, R> {
    /// Creates a binder reading `provider`'s published state.
    ///
    /// # Errors
    /// Returns [`SyncError::Context`] if the provider has been shut down.
    pub fn new(provider: &FontsProvider<E>, resolver: R) -> Result<Self, SyncError> {
        let states = provider.subscribe()?;
        let fallback = states.borrow().fallback.to_style();
        let (results, _) = watch::channel(Arc::new(BindingResult { style: fallback.clone(), node_ref: None }));

        Ok(Self {
            shared: Arc::new(Shared {
                engine: provider.engine(),
                resolver,
                platform: provider.platform(),
                latency: provider.latency(),
                states,
                state: Mutex::new(BinderState { layer: fallback, ..BinderState::default() }),
                results,
                alive: AtomicBool::new(true),
                detached: Notify::new(),
            }),
        })
    }

    /// Replaces the request and resolves it.
    pub async fn request(&self, request: BindingRequest) -> BindOutcome {
        match self.prepare(request) {
            Prepared::Ready(outcome) => outcome,
            Prepared::Pending(pending) => self.complete(pending).await,
        }
    }

    /// Re-resolves the current request against the latest published state.
    pub async fn refresh(&self) -> BindOutcome {
        match self.prepare_refresh() {
            Prepared::Ready(outcome) => outcome,
            Prepared::Pending(pending) => self.complete(pending).await,
        }
    }

    /// Stores `request` and runs the synchronous half of its resolution.
    pub fn prepare(&self, request: BindingRequest) -> Prepared {
        self.shared.state.lock().request = request;
        self.prepare_refresh()
    }

    /// Runs the synchronous half of resolving the current request.
    pub fn prepare_refresh(&self) -> Prepared {
        if !self.is_alive() {
            return Prepared::Ready(BindOutcome::Detached);
        }

        let snapshot = Arc::clone(&self.shared.states.borrow());
        let mut state = self.shared.state.lock();
        let request = state.request.clone();

        let face = request.logical_name().and_then(|name| snapshot.font_faces.get(name));
        let Some(face) = face else {
            trace!(name = ?request.logical_name(), "No custom face; showing fallback");
            state.key = None;
            state.sequence += 1;
            state.layer = snapshot.fallback.to_style();
            state.bound = false;
            self.publish(&state);
            return Prepared::Ready(BindOutcome::Fallback);
        };

        let weight = request.style.font_weight.as_deref().map_or_else(
            || face.font_weight().to_owned(),
            |weight| self.shared.platform.normalize_weight(weight).into_owned(),
        );
        let key = BindKey { node: request.node, face: face.clone(), weight };

        if state.key.as_ref() == Some(&key) {
            // The fallback may have been replaced since it was last shown.
            if !state.bound {
                state.layer = snapshot.fallback.to_style();
            }
            self.publish(&state);
            return Prepared::Ready(BindOutcome::Unchanged);
        }

        state.sequence += 1;
        if !state.bound {
            state.layer = snapshot.fallback.to_style();
        }
        let sequence = state.sequence;
        let BindKey { node, face, weight } = key.clone();
        state.key = Some(key);
        self.publish(&state);

        let Some(node) = node else {
            debug!(face = face.logical_name(), "Custom face waits for a node");
            return Prepared::Ready(BindOutcome::AwaitingNode);
        };

        Prepared::Pending(PendingBind { sequence, node, face, weight })
    }

    /// Sends a planned request to the engine and adopts its result.
    pub async fn complete(&self, pending: PendingBind) -> BindOutcome {
        let PendingBind { sequence, node, face, weight } = pending;

        if let Some(delay) = self.shared.platform.apply_delay(self.shared.latency) {
            tokio::time::sleep(delay).await;
            if let Some(outcome) = self.discard(sequence) {
                return outcome;
            }
        }

        let result = match self.shared.resolver.resolve(node) {
            Some(handle) => self
                .shared
                .engine
                .apply_face_to_node(handle, face.font_family(), &weight)
                .await
                .map_err(|source| BindError::EngineBindFailure {
                    source,
                    context: Some(format!("{} on {node}", face.logical_name()).into()),
                }),
            None => Err(BindError::UnknownFontFamily {
                message: format!("{node} has no native handle").into(),
                context: Some(face.logical_name().to_owned().into()),
            }),
        };

        if let Some(outcome) = self.discard(sequence) {
            return outcome;
        }

        let mut state = self.shared.state.lock();
        if state.sequence != sequence {
            return BindOutcome::Superseded { sequence };
        }

        match result {
            Ok(()) => {
                state.layer = self.shared.platform.face_style(&face, &weight);
                state.bound = true;
                self.publish(&state);
                debug!(face = face.logical_name(), %node, sequence, "Custom face bound");
                BindOutcome::Bound { sequence }
            },
            Err(err) => {
                state.layer = self.shared.states.borrow().fallback.to_style();
                state.bound = false;
                self.publish(&state);
                warn!(error = %err, sequence, "Font bind failed; showing fallback");
                BindOutcome::Failed { sequence }
            },
        }
    }

    /// Re-resolves whenever the provider publishes a new state, until the provider
    /// shuts down or the binder is detached.
    pub async fn follow(&self) {
        let mut states = self.shared.states.clone();
        loop {
            let mut detached = pin!(self.shared.detached.notified());
            detached.as_mut().enable();
            if !self.is_alive() {
                break;
            }

            tokio::select! {
                changed = states.changed() => {
                    if changed.is_err() {
                        break;
                    }
                },
                () = &mut detached => break,
            }
            if !self.is_alive() {
                break;
            }

            let outcome = self.refresh().await;
            trace!(?outcome, "Re-resolved after registry change");
        }
        trace!("Stopped following registry changes");
    }

    /// The result consumers should render with.
    #[must_use]
    pub fn result(&self) -> Arc<BindingResult> {
        Arc::clone(&self.shared.results.borrow())
    }

    /// Subscribes to resolved results.
    #[must_use]
    pub fn results(&self) -> watch::Receiver<Arc<BindingResult>> {
        self.shared.results.subscribe()
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.shared.platform
    }

    #[must_use]
    pub fn node(&self) -> Option<NodeRef> {
        self.shared.state.lock().request.node
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.shared.alive.load(Ordering::Acquire)
    }

    /// Marks the consumer as torn down; responses still in flight are dropped.
    pub fn detach(&self) {
        if self.shared.alive.swap(false, Ordering::AcqRel) {
            self.shared.detached.notify_waiters();
            trace!("Font binder detached");
        }
    }

    fn discard(&self, sequence: u64) -> Option<BindOutcome> {
        if !self.is_alive() {
            return Some(BindOutcome::Detached);
        }
        if self.shared.state.lock().sequence != sequence {
            debug!(sequence, "Dropping superseded bind response");
            return Some(BindOutcome::Superseded { sequence });
        }
        None
    }

    fn publish(&self, state: &BinderState) {
        let style = state.request.style.without_font().merged(&state.layer);
        let result = BindingResult { style, node_ref: state.request.node };
        self.shared.results.send_if_modified(|current| {
            if **current == result {
                false
            } else {
                *current = Arc::new(result);
                true
            }
        });
    }
}
