//! # Registry Synchronizer
//!
//! Owns the authoritative font-face registry of the application. Each update is
//! validated synchronously, tagged with a monotonically increasing sequence number
//! and pushed to the [`FontEngine`]. Only the response for the latest sequence may
//! change the published [`SyncState`]; responses that arrive after a newer update
//! was issued are discarded.
//!
//! ## Phases
//! `Idle -> Validating -> Syncing -> Settled | Failed`, or `Validating -> Rejected`
//! when the raw registry is invalid. A rejected update allocates no sequence and
//! does not cancel a sync already in flight.

use crate::builder::ProviderBuilder;
use crate::engine::FontEngine;
use crate::error::SyncError;
use crate::listeners::DownloadListeners;
use facesync_context::{ContextBus, ContextError};
use facesync_domain::events::DownloadEvent;
use facesync_domain::{FaceDescriptor, FallbackStyle, RawFaces, Registry, SyncPhase, SyncState};
use facesync_faces::FaceValidator;
use facesync_kernel::platform::Platform;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// How a single registry update ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The engine accepted the registry and it was published.
    Settled { sequence: u64, generation: u64 },
    /// The engine failed; the default empty state was published.
    Failed { sequence: u64, generation: u64 },
    /// A newer update (or shutdown) made this response irrelevant.
    Discarded { sequence: u64 },
}

impl SyncOutcome {
    #[must_use]
    pub const fn sequence(self) -> u64 {
        match self {
            Self::Settled { sequence, .. }
            | Self::Failed { sequence, .. }
            | Self::Discarded { sequence } => sequence,
        }
    }
}

/// A validated update waiting for the engine.
#[derive(Debug)]
struct PendingSync {
    sequence: u64,
    registry: Arc<Registry>,
}

#[derive(Debug)]
struct Cursor {
    latest: u64,
    phase: SyncPhase,
    state: Arc<SyncState>,
    /// Fallback published with accepted registries.
    fallback: Arc<FallbackStyle>,
}

impl Cursor {
    fn replace(&mut self, font_faces: Arc<Registry>, fallback: Arc<FallbackStyle>) -> Arc<SyncState> {
        let generation = self.state.generation + 1;
        self.state = Arc::new(SyncState { generation, font_faces, fallback });
        Arc::clone(&self.state)
    }
}

#[derive(Debug)]
struct Inner<E: FontEngine> {
    engine: Arc<E>,
    validator: FaceValidator,
    latency: Duration,
    fade_duration: Duration,
    bus: ContextBus,
    owns_bus: bool,
    listeners: DownloadListeners,
    cursor: Mutex<Cursor>,
    alive: AtomicBool,
}

/// The registry synchronizer.
///
/// Cheap to clone; clones share the same registry, bus and sequence counter.
#[derive(Debug)]
pub struct FontsProvider<E: FontEngine> {
    inner: Arc<Inner<E>>,
}

impl<E: FontEngine> Clone for FontsProvider<E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<E: FontEngine> FontsProvider<E> {
    pub fn builder(engine: E) -> ProviderBuilder<E> {
        ProviderBuilder::new(Arc::new(engine))
    }

    pub(crate) fn from_builder(builder: ProviderBuilder<E>) -> Result<(Self, RawFaces), SyncError> {
        let ProviderBuilder {
            engine,
            font_faces,
            platform,
            latency,
            fade_duration,
            fallback,
            bus,
            listeners,
        } = builder;

        let fallback = Arc::new(fallback.unwrap_or_else(|| platform.default_fallback()));
        let initial = Arc::new(SyncState::empty(0, Arc::clone(&fallback)));
        let owns_bus = bus.is_none();
        let bus = bus.unwrap_or_default();
        bus.provide_arc(Arc::clone(&initial))?;

        let inner = Inner {
            engine,
            validator: FaceValidator::new(platform),
            latency,
            fade_duration,
            bus,
            owns_bus,
            listeners,
            cursor: Mutex::new(Cursor { latest: 0, phase: SyncPhase::Idle, state: initial, fallback }),
            alive: AtomicBool::new(true),
        };
        debug!(?platform, "Font provider created");

        Ok((Self { inner: Arc::new(inner) }, font_faces))
    }

    /// Validates `raw` and synchronizes it with the engine.
    ///
    /// # Errors
    /// Returns [`SyncError::InvalidDescriptor`] when validation fails and
    /// [`SyncError::ShutDown`] after [`FontsProvider::shutdown`]. Engine failures are
    /// not errors here: they are reported through the error callback and the
    /// returned [`SyncOutcome::Failed`].
    #[instrument(skip_all, fields(faces = raw.len()))]
    pub async fn update(&self, raw: &RawFaces) -> Result<SyncOutcome, SyncError> {
        let pending = self.inner.begin(raw)?;
        Ok(self.inner.finish(pending).await)
    }

    /// Validates `raw` now and runs the engine sync on a spawned task.
    ///
    /// # Errors
    /// Same as [`FontsProvider::update`]; validation happens before spawning.
    pub fn spawn_update(&self, raw: &RawFaces) -> Result<JoinHandle<SyncOutcome>, SyncError> {
        let pending = self.inner.begin(raw)?;
        let inner = Arc::clone(&self.inner);
        Ok(tokio::spawn(async move { inner.finish(pending).await }))
    }

    /// Replaces the fallback style and republishes the current registry with it.
    ///
    /// # Errors
    /// Returns [`SyncError::ShutDown`] after shutdown.
    pub fn set_fallback(&self, fallback: FallbackStyle) -> Result<(), SyncError> {
        self.inner.ensure_alive()?;
        let mut cursor = self.inner.cursor.lock();
        let fallback = Arc::new(fallback);
        cursor.fallback = Arc::clone(&fallback);
        let font_faces = Arc::clone(&cursor.state.font_faces);
        let state = cursor.replace(font_faces, fallback);
        self.inner.bus.publish_arc(state)?;
        debug!(generation = cursor.state.generation, "Fallback style replaced");
        Ok(())
    }

    #[must_use]
    pub fn phase(&self) -> SyncPhase {
        self.inner.cursor.lock().phase
    }

    /// The currently published state.
    #[must_use]
    pub fn sync_state(&self) -> Arc<SyncState> {
        Arc::clone(&self.inner.cursor.lock().state)
    }

    /// Whether `logical_name` is part of the published registry.
    #[must_use]
    pub fn is_known(&self, logical_name: &str) -> bool {
        self.inner.cursor.lock().state.font_faces.contains(logical_name)
    }

    /// Subscribes to published states, starting at the current one.
    ///
    /// # Errors
    /// Returns [`SyncError::Context`] once the bus has been shut down.
    pub fn subscribe(&self) -> Result<watch::Receiver<Arc<SyncState>>, SyncError> {
        Ok(self.inner.bus.consume::<SyncState>()?)
    }

    /// Listens for download lifecycle notifications.
    ///
    /// # Errors
    /// Returns [`SyncError::Context`] if the bus cannot carry the notifications.
    pub fn events(&self) -> Result<broadcast::Receiver<Arc<DownloadEvent>>, SyncError> {
        Ok(self.inner.bus.listen::<DownloadEvent>()?)
    }

    #[must_use]
    pub fn engine(&self) -> Arc<E> {
        Arc::clone(&self.inner.engine)
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.inner.validator.platform()
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        self.inner.latency
    }

    #[must_use]
    pub fn fade_duration(&self) -> Duration {
        self.inner.fade_duration
    }

    #[must_use]
    pub fn bus(&self) -> &ContextBus {
        &self.inner.bus
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.inner.alive.load(Ordering::Acquire)
    }

    /// Tears the provider down. Engine responses still in flight are discarded.
    ///
    /// Closes the bus when the provider created it.
    pub fn shutdown(&self) {
        if !self.inner.alive.swap(false, Ordering::AcqRel) {
            return;
        }
        let closed = if self.inner.owns_bus { self.inner.bus.shutdown() } else { 0 };
        info!(closed, "Font provider shut down");
    }
}

impl<E: FontEngine> Inner<E> {
    fn ensure_alive(&self) -> Result<(), SyncError> {
        if self.alive.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(SyncError::ShutDown { message: "provider is no longer mounted".into(), context: None })
        }
    }

    fn begin(&self, raw: &RawFaces) -> Result<PendingSync, SyncError> {
        self.ensure_alive()?;
        let prior = std::mem::replace(&mut self.cursor.lock().phase, SyncPhase::Validating);

        let registry = match self.validator.validate(raw) {
            Ok(registry) => Arc::new(registry),
            Err(source) => {
                self.restore_after_rejection(prior);
                let err = SyncError::from(source);
                warn!(error = %err, "Font-face registry rejected");
                self.listeners.failed(&err);
                self.notify(DownloadEvent::Failed { sequence: None, reason: err.to_string().into() });
                return Err(err);
            },
        };

        let sequence = {
            let mut cursor = self.cursor.lock();
            cursor.latest += 1;
            cursor.phase = SyncPhase::Syncing { sequence: cursor.latest };
            cursor.latest
        };

        info!(sequence, faces = registry.len(), "Syncing font faces");
        let event = DownloadEvent::Started { sequence, faces: registry.len() };
        self.listeners.started(&event);
        self.notify(event);

        Ok(PendingSync { sequence, registry })
    }

    async fn finish(&self, pending: PendingSync) -> SyncOutcome {
        let PendingSync { sequence, registry } = pending;
        let faces: Vec<FaceDescriptor> = registry.descriptors().cloned().collect();
        let result = self.engine.apply_faces(&faces).await;

        let settled = {
            let mut cursor = self.cursor.lock();
            if !self.alive.load(Ordering::Acquire) || cursor.latest != sequence {
                None
            } else {
                let (phase, published, fallback) = match &result {
                    Ok(()) => {
                        (SyncPhase::Settled { sequence }, Arc::clone(&registry), Arc::clone(&cursor.fallback))
                    },
                    Err(_) => (
                        SyncPhase::Failed { sequence },
                        Arc::new(Registry::empty()),
                        Arc::new(self.validator.platform().default_fallback()),
                    ),
                };
                cursor.phase = phase;
                let state = cursor.replace(published, fallback);
                Some((state.generation, self.bus.publish_arc(state)))
            }
        };

        let Some((generation, published)) = settled else {
            debug!(sequence, "Discarding stale engine response");
            return SyncOutcome::Discarded { sequence };
        };
        if let Err(err) = published {
            self.report_context(&err);
        }

        match result {
            Ok(()) => {
                info!(sequence, generation, faces = registry.len(), "Font faces settled");
                let event = DownloadEvent::Finished { sequence, faces: registry.len() };
                self.listeners.finished(&event);
                self.notify(event);
                SyncOutcome::Settled { sequence, generation }
            },
            Err(source) => {
                let err = SyncError::EngineSyncFailure {
                    source,
                    context: Some(format!("sync #{sequence}").into()),
                };
                error!(sequence, error = %err, "Font engine sync failed; falling back");
                self.listeners.failed(&err);
                self.notify(DownloadEvent::Failed { sequence: Some(sequence), reason: err.to_string().into() });
                SyncOutcome::Failed { sequence, generation }
            },
        }
    }

    /// A rejected update leaves a sync that is still in flight reported as syncing.
    fn restore_after_rejection(&self, prior: SyncPhase) {
        let mut cursor = self.cursor.lock();
        cursor.phase = match (cursor.phase, prior) {
            (SyncPhase::Validating, SyncPhase::Syncing { sequence }) if cursor.latest == sequence => prior,
            _ => SyncPhase::Rejected,
        };
    }

    fn notify(&self, event: DownloadEvent) {
        if let Err(err) = self.bus.notify(event) {
            self.report_context(&err);
        }
    }

    fn report_context(&self, err: &ContextError) {
        if self.alive.load(Ordering::Acquire) {
            warn!(error = %err, "Failed to write font state to the shared context");
        }
    }
}
