use facesync_domain::node::NodeRef;
use std::future::Future;
use std::time::Duration;

/// Tweens a node's opacity. Resolves when the animation has finished.
pub trait Animator: Send + Sync + 'static {
    fn animate(
        &self,
        node: Option<NodeRef>,
        opacity: f32,
        duration: Duration,
    ) -> impl Future<Output = ()> + Send;
}

/// Waits out the duration without drawing anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimerAnimator;

impl Animator for TimerAnimator {
    async fn animate(&self, _node: Option<NodeRef>, _opacity: f32, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
