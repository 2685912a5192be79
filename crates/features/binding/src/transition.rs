use crate::animator::{Animator, TimerAnimator};
use crate::binder::{BindOutcome, BindingRequest, BindingResult, FontBinder, Prepared};
use crate::resolver::NodeHandleResolver;
use facesync_kernel::platform::OPAQUE;
use facesync_provider::FontEngine;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;

/// Fades a bound node out while its face is swapped and back in once the new
/// style is adopted.
///
/// Platforms without the fade capability never animate.
#[derive(Debug)]
pub struct FadeTransition<E: FontEngine, R: NodeHandleResolver, A: Animator = TimerAnimator> {
    binder: FontBinder<E, R>,
    animator: A,
    duration: Duration,
    opacity: Mutex<f32>,
    /// Sequence of the latest engine request presented here.
    presenting: AtomicU64,
}

impl<E: FontEngine, R: NodeHandleResolver> FadeTransition<E, R> {
    pub fn new(binder: FontBinder<E, R>, duration: Duration) -> Self {
        Self::with_animator(binder, TimerAnimator, duration)
    }
}

impl<E: FontEngine, R: NodeHandleResolver, A: Animator> FadeTransition<E, R, A> {
    pub fn with_animator(binder: FontBinder<E, R>, animator: A, duration: Duration) -> Self {
        Self { binder, animator, duration, opacity: Mutex::new(OPAQUE), presenting: AtomicU64::new(0) }
    }

    /// Resolves `request`, fading around the engine call when one is made.
    pub async fn request(&self, request: BindingRequest) -> BindOutcome {
        let prepared = self.binder.prepare(request);
        self.present(prepared).await
    }

    /// Re-resolves the current request with the same transition.
    pub async fn refresh(&self) -> BindOutcome {
        let prepared = self.binder.prepare_refresh();
        self.present(prepared).await
    }

    async fn present(&self, prepared: Prepared) -> BindOutcome {
        let pending = match prepared {
            Prepared::Ready(outcome @ (BindOutcome::Detached | BindOutcome::Unchanged)) => return outcome,
            Prepared::Ready(outcome) => {
                // An earlier request may have faded the node out and is now superseded.
                self.fade_to(OPAQUE).await;
                return outcome;
            },
            Prepared::Pending(pending) => pending,
        };

        let sequence = pending.sequence();
        self.presenting.store(sequence, Ordering::Release);
        self.fade_to(self.binder.platform().transition_opacity()).await;
        let outcome = self.binder.complete(pending).await;
        let fade_back = match outcome {
            BindOutcome::Bound { .. } | BindOutcome::Failed { .. } => true,
            // No later engine request will restore the node.
            BindOutcome::Superseded { .. } => self.presenting.load(Ordering::Acquire) == sequence,
            _ => false,
        };
        if fade_back {
            self.fade_to(OPAQUE).await;
        }
        outcome
    }

    async fn fade_to(&self, target: f32) {
        let current = *self.opacity.lock();
        if (current - target).abs() < f32::EPSILON {
            return;
        }
        trace!(from = current, to = target, "Fading node");
        self.animator.animate(self.binder.node(), target, self.duration).await;
        *self.opacity.lock() = target;
    }

    /// Current opacity of the wrapped node.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        *self.opacity.lock()
    }

    #[must_use]
    pub fn result(&self) -> Arc<BindingResult> {
        self.binder.result()
    }

    #[must_use]
    pub const fn binder(&self) -> &FontBinder<E, R> {
        &self.binder
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }
}
