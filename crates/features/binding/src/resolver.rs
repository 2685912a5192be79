use facesync_domain::node::{NativeHandle, NodeRef};

/// Maps a node reference to its native handle, or `None` while it is unmounted.
pub trait NodeHandleResolver: Send + Sync + 'static {
    fn resolve(&self, node: NodeRef) -> Option<NativeHandle>;
}

impl<F> NodeHandleResolver for F
where
    F: Fn(NodeRef) -> Option<NativeHandle> + Send + Sync + 'static,
{
    fn resolve(&self, node: NodeRef) -> Option<NativeHandle> {
        self(node)
    }
}
