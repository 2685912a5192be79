use crate::error::ContextError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId, type_name};
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing::{trace, warn};

/// Notification buffers only need to absorb a burst of lifecycle events.
const DEFAULT_CAPACITY: usize = 64;
const MIN_CAPACITY: usize = 1;

/// Supported channel kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Latest-value semantics; every consumer sees the current snapshot.
    Snapshot,
    /// Fan-out semantics for transient notifications.
    Notification { capacity: usize },
}

/// Marker trait for values that can travel through the [`ContextBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait ContextValue: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> ContextValue for T {}

#[derive(Debug)]
struct ChannelState {
    kind: ChannelKind,
    sender: Box<dyn Any + Send + Sync>,
}

impl ChannelState {
    fn snapshot<T: ContextValue>(&self) -> Result<&watch::Sender<Arc<T>>, ContextError> {
        match self.kind {
            ChannelKind::Snapshot => {
                self.sender.downcast_ref::<watch::Sender<Arc<T>>>().ok_or_else(type_mismatch::<T>)
            },
            ChannelKind::Notification { .. } => Err(kind_mismatch::<T>(ChannelKind::Snapshot, self.kind)),
        }
    }

    fn notification<T: ContextValue>(&self) -> Result<&broadcast::Sender<Arc<T>>, ContextError> {
        match self.kind {
            ChannelKind::Notification { .. } => self
                .sender
                .downcast_ref::<broadcast::Sender<Arc<T>>>()
                .ok_or_else(type_mismatch::<T>),
            ChannelKind::Snapshot => Err(kind_mismatch::<T>(
                ChannelKind::Notification { capacity: DEFAULT_CAPACITY },
                self.kind,
            )),
        }
    }
}

/// A typed shared-context bus.
///
/// Each value type owns at most one channel. Snapshot channels hold the single
/// current value for that type and are replaced wholesale on publish; readers never
/// observe a partially updated value. Notification channels fan transient events
/// out to every live listener.
#[derive(Debug, Clone, Default)]
pub struct ContextBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelState>>>,
}

impl ContextBus {
    /// Creates a new, empty `ContextBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provides the initial snapshot for `T`.
    ///
    /// # Errors
    /// Returns [`ContextError::AlreadyProvided`] if `T` already has a snapshot, or
    /// [`ContextError::ChannelKindMismatch`] if `T` is used for notifications.
    ///
    /// # Examples
    /// ```rust
    /// use facesync_context::ContextBus;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct Theme(&'static str);
    ///
    /// # fn main() -> Result<(), facesync_context::ContextError> {
    /// let bus = ContextBus::new();
    /// bus.provide(Theme("dark"))?;
    /// assert_eq!(*bus.current::<Theme>()?, Theme("dark"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn provide<T: ContextValue>(&self, initial: T) -> Result<(), ContextError> {
        self.provide_arc(Arc::new(initial))
    }

    /// Provides the initial snapshot for `T` without re-wrapping.
    ///
    /// # Errors
    /// Same as [`ContextBus::provide`].
    pub fn provide_arc<T: ContextValue>(&self, initial: Arc<T>) -> Result<(), ContextError> {
        let mut channels = self.channels.write();
        if let Some(existing) = channels.get(&TypeId::of::<T>()) {
            existing.snapshot::<T>()?;
            return Err(ContextError::AlreadyProvided {
                message: type_name::<T>().into(),
                context: None,
            });
        }

        trace!(value = type_name::<T>(), "Providing snapshot channel");
        let (tx, _) = watch::channel(initial);
        channels.insert(
            TypeId::of::<T>(),
            ChannelState { kind: ChannelKind::Snapshot, sender: Box::new(tx) },
        );
        Ok(())
    }

    /// Subscribes to the snapshot of `T`.
    ///
    /// The returned receiver starts at the current value; `changed()` resolves when a
    /// newer snapshot is published.
    ///
    /// # Errors
    /// Returns [`ContextError::NotProvided`] if no snapshot exists for `T`.
    pub fn consume<T: ContextValue>(&self) -> Result<watch::Receiver<Arc<T>>, ContextError> {
        self.with_snapshot::<T, _>(watch::Sender::subscribe)
    }

    /// Returns the current snapshot of `T`.
    ///
    /// # Errors
    /// Returns [`ContextError::NotProvided`] if no snapshot exists for `T`.
    pub fn current<T: ContextValue>(&self) -> Result<Arc<T>, ContextError> {
        self.with_snapshot::<T, _>(|tx| tx.borrow().clone())
    }

    /// Replaces the snapshot of `T`.
    ///
    /// # Errors
    /// Returns [`ContextError::NotProvided`] if no snapshot exists for `T`.
    pub fn publish<T: ContextValue>(&self, value: T) -> Result<(), ContextError> {
        self.publish_arc(Arc::new(value))
    }

    /// Replaces the snapshot of `T` without re-wrapping.
    ///
    /// # Errors
    /// Returns [`ContextError::NotProvided`] if no snapshot exists for `T`.
    pub fn publish_arc<T: ContextValue>(&self, value: Arc<T>) -> Result<(), ContextError> {
        self.with_snapshot::<T, _>(|tx| {
            tx.send_replace(value);
            trace!(value = type_name::<T>(), receivers = tx.receiver_count(), "Snapshot replaced");
        })
    }

    /// Listens for notifications of type `T` using the default capacity.
    ///
    /// # Errors
    /// Returns [`ContextError::ChannelKindMismatch`] if `T` is a snapshot value.
    pub fn listen<T: ContextValue>(&self) -> Result<broadcast::Receiver<Arc<T>>, ContextError> {
        self.listen_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Listens for notifications of type `T` with a specific buffer capacity.
    ///
    /// # Errors
    /// Returns [`ContextError::ChannelKindMismatch`] if `T` is a snapshot value, or
    /// [`ContextError::InvalidCapacity`] if `capacity` is zero.
    pub fn listen_with_capacity<T: ContextValue>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, ContextError> {
        let capacity = validate_capacity(capacity)?;
        self.ensure_notification::<T>(capacity).map(|tx| tx.subscribe())
    }

    /// Sends a notification to every current listener of `T`.
    ///
    /// Returns the number of listeners reached; zero listeners is not an error.
    ///
    /// # Errors
    /// Returns [`ContextError::ChannelKindMismatch`] if `T` is a snapshot value.
    pub fn notify<T: ContextValue>(&self, event: T) -> Result<usize, ContextError> {
        let sender = self.ensure_notification::<T>(DEFAULT_CAPACITY)?;
        Ok(sender.send(Arc::new(event)).map_or_else(
            |_| {
                trace!(event = type_name::<T>(), "Notification dropped: no active listeners");
                0
            },
            |count| {
                trace!(event = type_name::<T>(), count, "Notification dispatched");
                count
            },
        ))
    }

    /// Closes every channel on the bus.
    ///
    /// Snapshot receivers keep their last value but `changed()` reports closure;
    /// notification receivers observe `Closed`. Returns the number of channels closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn with_snapshot<T: ContextValue, R>(
        &self,
        f: impl FnOnce(&watch::Sender<Arc<T>>) -> R,
    ) -> Result<R, ContextError> {
        let channels = self.channels.read();
        let state = channels.get(&TypeId::of::<T>()).ok_or_else(|| ContextError::NotProvided {
            message: type_name::<T>().into(),
            context: None,
        })?;
        Ok(f(state.snapshot::<T>()?))
    }

    fn ensure_notification<T: ContextValue>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, ContextError> {
        let id = TypeId::of::<T>();

        if let Some(existing) = self.channels.read().get(&id) {
            if let ChannelKind::Notification { capacity: existing_capacity } = existing.kind
                && existing_capacity != capacity
                && capacity != DEFAULT_CAPACITY
            {
                warn!(
                    event = type_name::<T>(),
                    existing_capacity,
                    requested_capacity = capacity,
                    "Notification channel already initialized with a different capacity"
                );
            }
            return existing.notification::<T>().cloned();
        }

        let mut channels = self.channels.write();
        let state = channels.entry(id).or_insert_with(|| {
            trace!(event = type_name::<T>(), capacity, "Initializing notification channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            ChannelState { kind: ChannelKind::Notification { capacity }, sender: Box::new(tx) }
        });
        state.notification::<T>().cloned()
    }
}

fn type_mismatch<T>() -> ContextError {
    ContextError::TypeMismatch {
        message: type_name::<T>().into(),
        context: Some("Unexpected value type".into()),
    }
}

fn kind_mismatch<T>(expected: ChannelKind, found: ChannelKind) -> ContextError {
    ContextError::ChannelKindMismatch {
        message: format!("Expected {expected:?} but found {found:?} for {}", type_name::<T>()).into(),
        context: None,
    }
}

fn validate_capacity(capacity: usize) -> Result<usize, ContextError> {
    if capacity < MIN_CAPACITY {
        return Err(ContextError::InvalidCapacity {
            message: format!("capacity must be >= {MIN_CAPACITY}").into(),
            context: None,
        });
    }
    Ok(capacity)
}
