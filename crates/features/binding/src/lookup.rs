use crate::binder::{BindingRequest, BindingResult, FontBinder};
use crate::resolver::NodeHandleResolver;
use facesync_domain::node::NodeRef;
use facesync_provider::{FontEngine, FontsProvider, SyncError};
use std::sync::Arc;

/// One-shot resolution of `logical_name` for `node`, without a transition.
///
/// Returns the style the node should render with once the engine answered (or the
/// fallback when the name is unknown, the node is missing or the bind failed).
///
/// # Errors
/// Returns [`SyncError::Context`] if the provider has been shut down.
pub async fn lookup<E, R>(
    provider: &FontsProvider<E>,
    resolver: R,
    logical_name: &str,
    node: Option<NodeRef>,
) -> Result<Arc<BindingResult>, SyncError>
where
    E: FontEngine,
    R: NodeHandleResolver,
{
    let binder = FontBinder::new(provider, resolver)?;
    binder.request(BindingRequest::named(logical_name, node)).await;
    let result = binder.result();
    binder.detach();
    Ok(result)
}
